//! Spacing analysis
//!
//! Word spacing looks at the jump from one stroke's last point to the next
//! stroke's first point. Letter spacing looks at large jumps inside long
//! strokes. Line spacing groups strokes into text lines by their vertical
//! centre and measures the distance between neighbouring lines.

use super::segmentation::Stroke;
use super::stats;
use serde::{Deserialize, Serialize};

/// Jump (pixels) inside a stroke that counts as a letter gap
pub const DEFAULT_LETTER_GAP_PX: f64 = 20.0;

/// Strokes shorter than this (points) are not scanned for letter gaps
pub const DEFAULT_LETTER_GAP_MIN_POINTS: usize = 10;

/// Maximum distance (pixels) between a stroke's centre and a line's centre
pub const DEFAULT_LINE_THRESHOLD_PX: f64 = 50.0;

/// Thresholds used by the spacing analyzers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingThresholds {
    pub letter_gap_px: f64,
    pub letter_gap_min_points: usize,
    pub line_threshold_px: f64,
}

impl Default for SpacingThresholds {
    fn default() -> Self {
        Self {
            letter_gap_px: DEFAULT_LETTER_GAP_PX,
            letter_gap_min_points: DEFAULT_LETTER_GAP_MIN_POINTS,
            line_threshold_px: DEFAULT_LINE_THRESHOLD_PX,
        }
    }
}

/// Gap statistics for word and letter spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapStats {
    pub average_gap: f64,
    pub gap_count: usize,
    pub consistency: f64,
}

impl GapStats {
    pub fn from_gaps(gaps: &[f64]) -> Self {
        Self {
            average_gap: stats::mean(gaps),
            gap_count: gaps.len(),
            consistency: stats::consistency(gaps),
        }
    }
}

/// Line spacing statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpacingStats {
    pub line_count: usize,
    pub average_line_height: f64,
    pub consistency: f64,
}

/// Combined spacing report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingAnalysis {
    pub word_spacing: GapStats,
    pub letter_spacing: GapStats,
    pub line_spacing: LineSpacingStats,
}

impl SpacingAnalysis {
    pub fn analyze(strokes: &[Stroke], thresholds: &SpacingThresholds) -> Self {
        Self {
            word_spacing: word_spacing(strokes),
            letter_spacing: letter_spacing(strokes, thresholds),
            line_spacing: line_spacing(strokes, thresholds.line_threshold_px),
        }
    }
}

/// Distances from each stroke's last point to the next stroke's first point
pub fn stroke_gaps(strokes: &[Stroke]) -> Vec<f64> {
    strokes
        .windows(2)
        .filter_map(|w| match (w[0].last_point(), w[1].first_point()) {
            (Some(prev_end), Some(next_start)) => Some(prev_end.distance_to(next_start)),
            _ => None,
        })
        .collect()
}

/// Point-to-point jumps larger than the letter-gap threshold inside long strokes
pub fn internal_gaps(strokes: &[Stroke], thresholds: &SpacingThresholds) -> Vec<f64> {
    strokes
        .iter()
        .filter(|s| s.points.len() >= thresholds.letter_gap_min_points)
        .flat_map(|s| s.points.windows(2).map(|w| w[0].distance_to(&w[1])))
        .filter(|&distance| distance > thresholds.letter_gap_px)
        .collect()
}

pub fn word_spacing(strokes: &[Stroke]) -> GapStats {
    GapStats::from_gaps(&stroke_gaps(strokes))
}

pub fn letter_spacing(strokes: &[Stroke], thresholds: &SpacingThresholds) -> GapStats {
    GapStats::from_gaps(&internal_gaps(strokes, thresholds))
}

/// A cluster of strokes judged to sit on the same text line
#[derive(Debug, Clone, PartialEq)]
pub struct LineCluster {
    /// Indices into the analysed stroke list, in arrival order
    pub stroke_indices: Vec<usize>,
    center_sum: f64,
}

impl LineCluster {
    fn new(index: usize, center_y: f64) -> Self {
        Self {
            stroke_indices: vec![index],
            center_sum: center_y,
        }
    }

    fn push(&mut self, index: usize, center_y: f64) {
        self.stroke_indices.push(index);
        self.center_sum += center_y;
    }

    /// Mean vertical centre of the member strokes
    pub fn center_y(&self) -> f64 {
        self.center_sum / self.stroke_indices.len() as f64
    }

    pub fn len(&self) -> usize {
        self.stroke_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_indices.is_empty()
    }
}

/// Greedy first-fit line clustering.
///
/// Each stroke joins the first existing line whose running mean centre is
/// strictly closer than `threshold_px`; otherwise it starts a new line.
/// Strokes are taken in arrival order, so the outcome depends on drawing order.
pub fn group_strokes_by_line(strokes: &[Stroke], threshold_px: f64) -> Vec<LineCluster> {
    let mut lines: Vec<LineCluster> = Vec::new();

    for (index, stroke) in strokes.iter().enumerate() {
        let center_y = stroke.center_y();
        match lines
            .iter_mut()
            .find(|line| (center_y - line.center_y()).abs() < threshold_px)
        {
            Some(line) => line.push(index, center_y),
            None => lines.push(LineCluster::new(index, center_y)),
        }
    }

    lines
}

pub fn line_spacing(strokes: &[Stroke], threshold_px: f64) -> LineSpacingStats {
    let lines = group_strokes_by_line(strokes, threshold_px);
    let heights: Vec<f64> = lines
        .windows(2)
        .map(|w| (w[1].center_y() - w[0].center_y()).abs())
        .collect();

    LineSpacingStats {
        line_count: lines.len(),
        average_line_height: stats::mean(&heights),
        consistency: stats::consistency(&heights),
    }
}
