//! # Stroke Analyzer
//!
//! Captures freehand tracing of a reference text and analyses the resulting
//! strokes for accuracy and for handwriting patterns that can accompany
//! reading and writing difficulties.
//!
//! ## Overview
//!
//! A host application forwards pointer activity on a tracing canvas to a
//! [`CaptureSession`]. The session keeps a chronological log of start, draw
//! and end samples. On request the log is segmented into strokes, measured
//! by the geometry analyzers, scored into a composite accuracy and
//! classified into indicators. The whole test can be exported as a JSON
//! [`TestReport`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use stroke_analyzer::{CaptureSession, StrokeAnalyzer};
//!
//! let mut session = CaptureSession::begin("was", 600.0, 200.0)?;
//!
//! session.record_start(40.0, 80.0, 0);
//! session.record_move(60.0, 120.0, 16);
//! session.record_move(80.0, 80.0, 32);
//! session.record_end(48);
//!
//! let analyzer = StrokeAnalyzer::new();
//! let report = session.export(&analyzer)?;
//! println!("accuracy: {}%", report.analysis.accuracy);
//! report.save(&report.default_path(std::path::Path::new(".")), true)?;
//! # Ok::<(), stroke_analyzer::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`capture`]: Sample log recording and canvas coordinate mapping
//! - [`analysis`]: Segmentation, geometry, spacing, scoring and indicators
//! - [`workflow`]: Analysis pipeline and report export
//! - [`app`]: CLI and configuration management
//!
//! ## Analysis Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer   │───▶│ Sample Log  │───▶│  Segmenter  │
//! │   events    │    │  (session)  │    │  (strokes)  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │
//!                                              ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ TestReport  │◀───│  Scoring &  │◀───│  Geometry & │
//! │   (JSON)    │    │ Indicators  │    │   Spacing   │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod capture;
pub mod analysis;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use capture::types::{CanvasMapping, CanvasSize, Point, Sample, SampleKind};
pub use capture::session::CaptureSession;
pub use analysis::segmentation::Stroke;
pub use analysis::indicators::{Indicator, IndicatorKind, Severity};
pub use workflow::{AnalysisInput, AnalysisResult, StrokeAnalyzer, TestReport};

/// Result type alias for the stroke analyzer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the stroke analyzer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
