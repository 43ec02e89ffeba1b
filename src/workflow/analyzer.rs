//! Analysis pipeline
//!
//! Runs a captured sample log through segmentation, the geometry analyzers,
//! scoring and indicator classification to produce an [`AnalysisResult`].
//! The analyzer holds only configuration, so one instance can serve any
//! number of inputs from any thread.

use crate::analysis::geometry::DrawingPatterns;
use crate::analysis::indicators::{self, Indicator, LetterAnalysis};
use crate::analysis::scoring::{self, DrawingMetrics, TextCoverage};
use crate::analysis::segmentation::{self, Stroke};
use crate::analysis::spacing::SpacingAnalysis;
use crate::app::config::AnalysisConfig;
use crate::capture::types::{CanvasSize, Sample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest coordinate magnitude (pixels) accepted in a sample log
pub const MAX_COORDINATE_PX: f64 = 1.0e9;

/// Everything needed to analyse one tracing attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Text the learner was asked to trace
    pub reference_text: String,
    /// Chronological sample log
    pub samples: Vec<Sample>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl AnalysisInput {
    pub fn new(reference_text: impl Into<String>, samples: Vec<Sample>, canvas: CanvasSize) -> Self {
        Self {
            reference_text: reference_text.into(),
            samples,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        }
    }

    /// Check the input is analysable and return its canvas size
    pub fn validate(&self) -> crate::Result<CanvasSize> {
        if self.samples.is_empty() {
            return Err(crate::Error::Validation("nothing to analyze: sample log is empty".to_string()));
        }
        for (index, sample) in self.samples.iter().enumerate() {
            for value in [sample.x, sample.y].into_iter().flatten() {
                if !value.is_finite() || value.abs() > MAX_COORDINATE_PX {
                    return Err(crate::Error::Validation(format!(
                        "sample {index} has coordinate {value} outside +/-{MAX_COORDINATE_PX}"
                    )));
                }
            }
        }
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }
}

/// Full result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Composite accuracy percentage
    pub accuracy: u8,
    pub letter_analysis: LetterAnalysis,
    pub spacing_analysis: SpacingAnalysis,
    #[serde(rename = "dyslexiaIndicators", alias = "indicators")]
    pub indicators: Vec<Indicator>,
    pub drawing_metrics: DrawingMetrics,
    pub text_coverage: TextCoverage,
}

/// Stroke analysis engine
#[derive(Debug, Clone, Default)]
pub struct StrokeAnalyzer {
    config: AnalysisConfig,
}

impl StrokeAnalyzer {
    /// Create with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse a sample log.
    ///
    /// Fails with [`crate::Error::Validation`] on an empty log or an invalid
    /// canvas; otherwise always succeeds.
    pub fn analyze(&self, input: &AnalysisInput) -> crate::Result<AnalysisResult> {
        let canvas = input.validate()?;
        let samples = &input.samples;

        let strokes = segmentation::segment(samples);
        debug!(samples = samples.len(), strokes = strokes.len(), "segmented sample log");

        let text_coverage = self.text_coverage(samples, &strokes, &canvas);
        let letter_analysis = LetterAnalysis::analyze(&strokes, &input.reference_text);
        let spacing_analysis = SpacingAnalysis::analyze(&strokes, &self.config.spacing_thresholds());
        let drawing_metrics = DrawingMetrics::measure(samples, &strokes);
        let indicators = indicators::classify(&letter_analysis, &spacing_analysis, &drawing_metrics);
        let accuracy = text_coverage.accuracy();

        debug!(
            accuracy,
            coverage = text_coverage.coverage,
            pattern_accuracy = text_coverage.pattern_accuracy,
            consistency = text_coverage.consistency,
            indicators = indicators.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            accuracy,
            letter_analysis,
            spacing_analysis,
            indicators,
            drawing_metrics,
            text_coverage,
        })
    }

    fn text_coverage(&self, samples: &[Sample], strokes: &[Stroke], canvas: &CanvasSize) -> TextCoverage {
        let patterns = DrawingPatterns::measure(samples, strokes, canvas, self.config.min_pattern_samples);
        debug!(
            linearity = patterns.linearity,
            direction_consistency = patterns.direction_consistency,
            density = patterns.density,
            rhythm = patterns.rhythm,
            "measured drawing patterns"
        );

        TextCoverage {
            coverage: scoring::text_coverage(samples, canvas, self.config.grid_cell_px),
            pattern_accuracy: scoring::pattern_accuracy(&patterns),
            consistency: scoring::drawing_consistency(strokes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::indicators::IndicatorKind;

    fn canvas() -> CanvasSize {
        CanvasSize::new(200.0, 200.0).unwrap()
    }

    #[test]
    fn test_empty_log_is_rejected() {
        let input = AnalysisInput::new("cat", vec![], canvas());
        let err = StrokeAnalyzer::new().analyze(&input).unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));
    }

    #[test]
    fn test_invalid_canvas_is_rejected() {
        let mut input = AnalysisInput::new("cat", vec![Sample::start(0.0, 0.0, 0)], canvas());
        input.canvas_height = 0.0;
        assert!(StrokeAnalyzer::new().analyze(&input).is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let samples = vec![
            Sample::start(0.0, 0.0, 0),
            Sample::draw(1e308, 0.0, 10),
            Sample::draw(-1e308, 0.0, 20),
            Sample::end(30),
            Sample::start(1e308, 0.0, 40),
            Sample::draw(0.0, 0.0, 50),
            Sample::end(60),
        ];
        let input = AnalysisInput::new("cat", samples, canvas());
        let err = StrokeAnalyzer::new().analyze(&input).unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));

        let input = AnalysisInput::new("cat", vec![Sample::draw(f64::NAN, 0.0, 0)], canvas());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_extreme_values_reparse_losslessly() {
        let samples = vec![
            Sample::start(0.0, 0.0, 0),
            Sample::draw(MAX_COORDINATE_PX, 0.0, 10),
            Sample::draw(-MAX_COORDINATE_PX, MAX_COORDINATE_PX, 20),
            Sample::end(30),
            Sample::start(MAX_COORDINATE_PX, -MAX_COORDINATE_PX, 40),
            Sample::draw(0.0, 0.0, 50),
            Sample::end(60),
        ];
        let input = AnalysisInput::new("cat", samples, canvas());
        let result = StrokeAnalyzer::new().analyze(&input).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("null"), "non-finite value in {json}");
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let samples = vec![
            Sample::start(0.0, 0.0, i64::MIN),
            Sample::draw(10.0, 0.0, 0),
            Sample::end(i64::MAX),
            Sample::start(0.0, 20.0, i64::MIN),
            Sample::draw(10.0, 20.0, 0),
            Sample::end(i64::MAX),
        ];
        let input = AnalysisInput::new("cat", samples, canvas());
        let result = StrokeAnalyzer::new().analyze(&input).unwrap();

        assert_eq!(result.drawing_metrics.total_strokes, 2);
        assert_eq!(result.drawing_metrics.drawing_time, i64::MAX as f64 / 1000.0);
        assert!(result.drawing_metrics.speed_variation.is_finite());
        assert!(result.text_coverage.consistency.is_finite());
        assert!(result.accuracy <= 100);
    }

    #[test]
    fn test_start_end_only_log() {
        let samples = vec![Sample::start(10.0, 10.0, 0), Sample::end(40)];
        let input = AnalysisInput::new("cat", samples, canvas());
        let result = StrokeAnalyzer::new().analyze(&input).unwrap();

        assert_eq!(result.text_coverage.coverage, 0.0);
        assert_eq!(result.text_coverage.pattern_accuracy, 0.0);
        assert_eq!(result.text_coverage.consistency, 50.0);
        assert_eq!(result.accuracy, 10);
        assert_eq!(result.drawing_metrics.total_strokes, 1);
        assert_eq!(result.letter_analysis.omissions.len(), 1);
        assert_eq!(result.indicators[0].kind, IndicatorKind::Omissions);
    }

    #[test]
    fn test_result_field_names() {
        let samples = vec![Sample::start(10.0, 10.0, 0), Sample::draw(20.0, 10.0, 10), Sample::end(40)];
        let input = AnalysisInput::new("cat", samples, canvas());
        let result = StrokeAnalyzer::new().analyze(&input).unwrap();
        let value = serde_json::to_value(&result).unwrap();

        for key in [
            "accuracy",
            "letterAnalysis",
            "spacingAnalysis",
            "dyslexiaIndicators",
            "drawingMetrics",
            "textCoverage",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["letterAnalysis"]["substitutions"].is_array());
        assert!(value["spacingAnalysis"]["lineSpacing"]["averageLineHeight"].is_number());
        assert!(value["drawingMetrics"]["pressureVariation"].is_number());
        assert!(value["textCoverage"]["patternAccuracy"].is_number());
    }

    #[test]
    fn test_indicators_alias_on_load() {
        let samples = vec![Sample::start(10.0, 10.0, 0), Sample::end(40)];
        let input = AnalysisInput::new("cat", samples, canvas());
        let result = StrokeAnalyzer::new().analyze(&input).unwrap();

        let mut value = serde_json::to_value(&result).unwrap();
        let object = value.as_object_mut().unwrap();
        let indicators = object.remove("dyslexiaIndicators").unwrap();
        object.insert("indicators".to_string(), indicators);

        let parsed: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_input_wire_format() {
        let json = r#"{
            "referenceText": "dog",
            "samples": [{"type":"start","x":1,"y":2,"timestamp":0},{"type":"end","timestamp":5}],
            "canvasWidth": 300,
            "canvasHeight": 120
        }"#;
        let input: AnalysisInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.reference_text, "dog");
        assert_eq!(input.samples.len(), 2);
        assert_eq!(input.validate().unwrap(), CanvasSize::new(300.0, 120.0).unwrap());
    }

    #[test]
    fn test_custom_grid_changes_coverage() {
        let samples = vec![Sample::start(0.0, 0.0, 0), Sample::draw(5.0, 5.0, 5), Sample::end(10)];
        let input = AnalysisInput::new("cat", samples, canvas());

        let default = StrokeAnalyzer::new().analyze(&input).unwrap();
        let config = AnalysisConfig {
            grid_cell_px: 100.0,
            ..Default::default()
        };
        let coarse = StrokeAnalyzer::with_config(config).analyze(&input).unwrap();

        assert_eq!(default.text_coverage.coverage, 1.0);
        assert_eq!(coarse.text_coverage.coverage, 25.0);
    }
}
