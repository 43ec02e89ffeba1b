//! Capture Session
//!
//! Owns the sample log for one tracing test. Pointer handlers call the
//! `record_*` methods synchronously; each call is O(1) and never blocks.
//! Coordinates must already be in canvas space (see
//! [`CanvasMapping`](super::types::CanvasMapping)).

use super::types::{CanvasSize, Sample};
use crate::workflow::analyzer::{AnalysisInput, AnalysisResult, StrokeAnalyzer};
use crate::workflow::report::TestReport;
use tracing::{debug, info};
use uuid::Uuid;

/// Recorder state for one tracing test
#[derive(Debug, Clone)]
pub struct CaptureSession {
    id: Uuid,
    reference_text: String,
    canvas: CanvasSize,
    samples: Vec<Sample>,
    drawing: bool,
}

impl CaptureSession {
    /// Start a test for `reference_text` on a canvas of the given size
    pub fn begin(reference_text: &str, canvas_width: f64, canvas_height: f64) -> crate::Result<Self> {
        let reference_text = validate_reference_text(reference_text)?;
        let canvas = CanvasSize::new(canvas_width, canvas_height)?;
        let id = Uuid::new_v4();

        info!(session = %id, chars = reference_text.chars().count(), "capture session started");

        Ok(Self {
            id,
            reference_text,
            canvas,
            samples: Vec::new(),
            drawing: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Recorded samples in capture order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Whether a stroke is currently being drawn
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Pointer pressed at canvas position `(x, y)`
    pub fn record_start(&mut self, x: f64, y: f64, timestamp_ms: i64) {
        self.drawing = true;
        self.samples.push(Sample::start(x, y, timestamp_ms));
    }

    /// Pointer moved; ignored unless a stroke is in progress
    pub fn record_move(&mut self, x: f64, y: f64, timestamp_ms: i64) {
        if !self.drawing {
            return;
        }
        self.samples.push(Sample::draw(x, y, timestamp_ms));
    }

    /// Pointer released or left the canvas; ignored unless a stroke is in progress
    pub fn record_end(&mut self, timestamp_ms: i64) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.samples.push(Sample::end(timestamp_ms));
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64, timestamp_ms: i64) {
        self.record_start(x, y, timestamp_ms);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, timestamp_ms: i64) {
        self.record_move(x, y, timestamp_ms);
    }

    pub fn on_pointer_up(&mut self, timestamp_ms: i64) {
        self.record_end(timestamp_ms);
    }

    /// Wipe the drawing but keep the reference text and canvas
    pub fn clear(&mut self) {
        debug!(session = %self.id, dropped = self.samples.len(), "sample log cleared");
        self.samples.clear();
        self.drawing = false;
    }

    /// Start over with a new reference text on the same canvas
    pub fn reset(&mut self, reference_text: &str) -> crate::Result<()> {
        let reference_text = validate_reference_text(reference_text)?;
        self.clear();
        self.reference_text = reference_text;
        self.id = Uuid::new_v4();
        info!(session = %self.id, "capture session reset");
        Ok(())
    }

    /// Change the canvas size (the host resized the tracing surface)
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) -> crate::Result<()> {
        self.canvas = CanvasSize::new(canvas_width, canvas_height)?;
        Ok(())
    }

    /// Owned copy of the current log, safe to analyse while recording continues
    pub fn snapshot(&self) -> AnalysisInput {
        AnalysisInput::new(self.reference_text.clone(), self.samples.clone(), self.canvas)
    }

    /// Analyse everything recorded so far
    pub fn analyze(&self, analyzer: &StrokeAnalyzer) -> crate::Result<AnalysisResult> {
        if self.samples.is_empty() {
            return Err(crate::Error::Validation(
                "nothing to analyze: draw something first".to_string(),
            ));
        }
        let result = analyzer.analyze(&self.snapshot())?;
        info!(session = %self.id, accuracy = result.accuracy, indicators = result.indicators.len(), "session analysed");
        Ok(result)
    }

    /// Analyse and package the session as an exportable report
    pub fn export(&self, analyzer: &StrokeAnalyzer) -> crate::Result<TestReport> {
        let input = self.snapshot();
        let analysis = self.analyze(analyzer)?;
        Ok(TestReport::new(&input, analysis))
    }
}

fn validate_reference_text(text: &str) -> crate::Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(crate::Error::Validation(
            "reference text must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
