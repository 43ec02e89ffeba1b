//! Scoring aggregation
//!
//! Folds the geometry analyzers into the coverage, pattern-accuracy and
//! consistency scores and the composite accuracy percentage.

use super::geometry::{self, DrawingPatterns};
use super::segmentation::Stroke;
use super::stats;
use crate::capture::types::{CanvasSize, Sample};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Side length (pixels) of a coverage grid cell
pub const DEFAULT_GRID_CELL_PX: f64 = 20.0;

/// Drawing consistency reported when fewer than two strokes exist
pub const SPARSE_DRAWING_CONSISTENCY: f64 = 50.0;

/// Speed consistency reported when fewer than two strokes exist (0..=1 scale)
pub const SPARSE_SPEED_VARIATION: f64 = 0.5;

const COVERAGE_WEIGHT: f64 = 0.4;
const PATTERN_WEIGHT: f64 = 0.4;
const CONSISTENCY_WEIGHT: f64 = 0.2;

/// Percentage of grid cells touched by `Draw` samples, capped at 100.
///
/// The grid holds `floor(width / cell) * floor(height / cell)` cells; a canvas
/// too small for a single cell scores 0.
pub fn text_coverage(samples: &[Sample], canvas: &CanvasSize, cell_px: f64) -> f64 {
    if cell_px <= 0.0 || !cell_px.is_finite() {
        return 0.0;
    }

    let cols = (canvas.width / cell_px).floor();
    let rows = (canvas.height / cell_px).floor();
    let total_cells = cols * rows;
    if total_cells <= 0.0 || !total_cells.is_finite() {
        return 0.0;
    }

    let touched: HashSet<(i64, i64)> = samples
        .iter()
        .filter(|s| s.is_draw())
        .filter_map(Sample::position)
        .map(|p| ((p.x / cell_px).floor() as i64, (p.y / cell_px).floor() as i64))
        .collect();

    (touched.len() as f64 / total_cells * 100.0).min(100.0)
}

/// Rule-based score out of 100 for text-like drawing patterns
pub fn pattern_accuracy(patterns: &DrawingPatterns) -> f64 {
    let mut score = 0.0;

    if patterns.linearity > 0.6 {
        score += 30.0;
    }
    if patterns.direction_consistency > 0.7 {
        score += 25.0;
    }
    if patterns.density > 0.3 && patterns.density < 0.8 {
        score += 25.0;
    }
    if patterns.rhythm > 0.5 {
        score += 20.0;
    }

    f64::min(score, 100.0)
}

/// Mean of length and duration consistency across strokes
pub fn drawing_consistency(strokes: &[Stroke]) -> f64 {
    if strokes.len() < 2 {
        return SPARSE_DRAWING_CONSISTENCY;
    }

    let lengths: Vec<f64> = strokes.iter().map(|s| s.length).collect();
    let durations: Vec<f64> = strokes.iter().map(|s| s.duration as f64).collect();

    (stats::consistency(&lengths) + stats::consistency(&durations)) / 2.0
}

/// Weighted composite of the three scores, rounded to a whole percentage
pub fn composite_accuracy(coverage: f64, pattern_accuracy: f64, consistency: f64) -> u8 {
    let weighted = coverage * COVERAGE_WEIGHT
        + pattern_accuracy * PATTERN_WEIGHT
        + consistency * CONSISTENCY_WEIGHT;

    if !weighted.is_finite() {
        return 0;
    }
    weighted.round().clamp(0.0, 100.0) as u8
}

/// Consistency of per-stroke drawing speed on a 0..=1 scale
pub fn speed_consistency(strokes: &[Stroke]) -> f64 {
    if strokes.len() < 2 {
        return SPARSE_SPEED_VARIATION;
    }
    let speeds: Vec<f64> = strokes.iter().map(Stroke::speed).collect();
    stats::consistency(&speeds) / 100.0
}

/// Seconds between the first and last captured sample
pub fn drawing_time_secs(samples: &[Sample]) -> f64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() >= 2 => {
            last.timestamp.saturating_sub(first.timestamp) as f64 / 1000.0
        }
        _ => 0.0,
    }
}

/// The three component scores behind the composite accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCoverage {
    pub coverage: f64,
    pub pattern_accuracy: f64,
    pub consistency: f64,
}

impl TextCoverage {
    pub fn accuracy(&self) -> u8 {
        composite_accuracy(self.coverage, self.pattern_accuracy, self.consistency)
    }
}

/// Aggregate drawing statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingMetrics {
    pub total_strokes: usize,
    /// Seconds
    pub drawing_time: f64,
    pub complexity: f64,
    /// No pressure channel is captured; this mirrors the speed-based proxy
    pub pressure_variation: f64,
    pub speed_variation: f64,
}

impl DrawingMetrics {
    pub fn measure(samples: &[Sample], strokes: &[Stroke]) -> Self {
        let speed_variation = speed_consistency(strokes);
        Self {
            total_strokes: strokes.len(),
            drawing_time: drawing_time_secs(samples),
            complexity: geometry::overall_complexity(strokes),
            pressure_variation: speed_variation,
            speed_variation,
        }
    }
}
