//! Shape and timing analyzers
//!
//! Pure functions over a stroke list. None of them mutate their input, so
//! they can run in any order or on any thread.

use super::segmentation::Stroke;
use super::stats;
use crate::capture::types::{CanvasSize, Sample};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

/// Direction change (radians) above which a triplet counts as a turn
pub const TURN_THRESHOLD: f64 = FRAC_PI_4;

/// Canvas area unit for [`density`] (square pixels)
pub const DENSITY_AREA_UNIT: f64 = 1000.0;

/// Straightness of one stroke in `[0, 1]`, `None` below three points.
///
/// Each interior point scores `max(0, 1 - |a1 - a2| / PI)` where `a1`, `a2`
/// are the incoming and outgoing segment angles. The raw difference is not
/// wrapped, so a turn across the +/-PI seam scores 0.
pub fn stroke_linearity(stroke: &Stroke) -> Option<f64> {
    if stroke.points.len() < 3 {
        return None;
    }

    let total: f64 = stroke
        .points
        .windows(3)
        .map(|w| {
            let deviation = (w[0].angle_to(&w[1]) - w[1].angle_to(&w[2])).abs();
            (1.0 - deviation / PI).max(0.0)
        })
        .sum();

    Some(total / (stroke.points.len() - 2) as f64)
}

/// Mean stroke linearity over all strokes; strokes below three points count as 0
pub fn linearity(strokes: &[Stroke]) -> f64 {
    if strokes.is_empty() {
        return 0.0;
    }
    let total: f64 = strokes.iter().filter_map(stroke_linearity).sum();
    total / strokes.len() as f64
}

/// Angular difference between two directions, wrapped to `[0, PI]` and scaled to `[0, 1]`
pub fn normalized_angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % (2.0 * PI);
    diff.min(2.0 * PI - diff) / PI
}

/// Agreement of net direction between consecutive strokes, 0 below two strokes
pub fn direction_consistency(strokes: &[Stroke]) -> f64 {
    if strokes.len() < 2 {
        return 0.0;
    }

    let directions: Vec<f64> = strokes.iter().map(Stroke::direction).collect();
    let total: f64 = directions
        .windows(2)
        .map(|w| 1.0 - normalized_angle_difference(w[1], w[0]))
        .sum();

    total / (directions.len() - 1) as f64
}

/// `Draw` samples per thousand square pixels of canvas (not bounded to 1)
pub fn density(samples: &[Sample], canvas: &CanvasSize) -> f64 {
    let units = canvas.area() / DENSITY_AREA_UNIT;
    if units <= 0.0 || !units.is_finite() {
        return 0.0;
    }
    let draws = samples.iter().filter(|s| s.is_draw()).count();
    draws as f64 / units
}

/// Pauses between strokes (`next.start_time - prev.end_time`, ms)
pub fn inter_stroke_intervals(strokes: &[Stroke]) -> Vec<f64> {
    strokes
        .windows(2)
        .map(|w| w[1].start_time.saturating_sub(w[0].end_time) as f64)
        .collect()
}

/// Regularity of pauses between strokes in `[0, 1]`, 0 below three strokes
pub fn rhythm(strokes: &[Stroke]) -> f64 {
    if strokes.len() < 3 {
        return 0.0;
    }
    stats::consistency(&inter_stroke_intervals(strokes)) / 100.0
}

/// Fraction of point triplets whose heading changes by more than [`TURN_THRESHOLD`]
pub fn stroke_complexity(stroke: &Stroke) -> f64 {
    if stroke.points.len() < 3 {
        return 0.0;
    }

    let turns = stroke
        .points
        .windows(3)
        .filter(|w| (w[0].angle_to(&w[1]) - w[1].angle_to(&w[2])).abs() > TURN_THRESHOLD)
        .count();

    turns as f64 / (stroke.points.len() - 2) as f64
}

/// Mean stroke complexity, 0 when there are no strokes
pub fn overall_complexity(strokes: &[Stroke]) -> f64 {
    let complexities: Vec<f64> = strokes.iter().map(stroke_complexity).collect();
    stats::mean(&complexities)
}

/// The four pattern signals that feed the pattern-accuracy score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPatterns {
    pub linearity: f64,
    pub direction_consistency: f64,
    pub density: f64,
    pub rhythm: f64,
}

impl DrawingPatterns {
    /// Measure all pattern signals.
    ///
    /// Logs shorter than `min_samples` are too sparse to judge and yield all zeros.
    pub fn measure(
        samples: &[Sample],
        strokes: &[Stroke],
        canvas: &CanvasSize,
        min_samples: usize,
    ) -> Self {
        if samples.len() < min_samples {
            return Self::default();
        }

        Self {
            linearity: linearity(strokes),
            direction_consistency: direction_consistency(strokes),
            density: density(samples, canvas),
            rhythm: rhythm(strokes),
        }
    }
}
