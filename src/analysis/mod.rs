//! Stroke analysis
//!
//! Turns a sample log into strokes and measures them:
//! - Stroke segmentation from start/draw/end samples
//! - Geometry signals (linearity, direction, density, rhythm, complexity)
//! - Spacing between strokes, letters and lines
//! - Scoring into a composite accuracy
//! - Indicator classification

pub mod stats;
pub mod segmentation;
pub mod geometry;
pub mod spacing;
pub mod scoring;
pub mod indicators;

pub use segmentation::{segment, Stroke};
pub use geometry::DrawingPatterns;
pub use spacing::{SpacingAnalysis, SpacingThresholds};
pub use scoring::{DrawingMetrics, TextCoverage};
pub use indicators::{Indicator, IndicatorKind, LetterAnalysis, Severity};
