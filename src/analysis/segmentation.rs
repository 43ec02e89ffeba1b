//! Stroke Segmentation
//!
//! Rebuilds discrete pen strokes from the flat pointer sample log. A stroke
//! runs from a `Start` sample through any `Draw` samples to the next `End`.
//! A `Start` that arrives while a stroke is still open closes that stroke
//! first, so a lost pointer-up never discards ink.

use crate::capture::types::{Point, Sample, SampleKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A finalized stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// Points in capture order (never empty)
    pub points: Vec<Point>,
    /// Timestamp of the opening `Start` sample (ms)
    pub start_time: i64,
    /// Timestamp of the last sample belonging to the stroke (ms)
    pub end_time: i64,
    /// Polyline length in pixels
    pub length: f64,
    /// `end_time - start_time` (ms), saturating at the `i64` range
    pub duration: i64,
}

impl Stroke {
    /// Build a stroke and derive its length and duration
    pub fn new(points: Vec<Point>, start_time: i64, end_time: i64) -> Self {
        let length = polyline_length(&points);
        Self {
            points,
            start_time,
            end_time,
            length,
            duration: end_time.saturating_sub(start_time),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn first_point(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last_point(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Net direction (radians) from the first to the last point, 0 for fewer than two points
    pub fn direction(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(start), Some(end)) if self.points.len() >= 2 => start.angle_to(end),
            _ => 0.0,
        }
    }

    /// Net vertical travel divided by the point count, 0 for fewer than two points
    pub fn vertical_movement(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(start), Some(end)) if self.points.len() >= 2 => {
                (end.y - start.y) / self.points.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Mean y coordinate of the stroke's points
    pub fn center_y(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.y).sum::<f64>() / self.points.len() as f64
    }

    /// Drawing speed in pixels per millisecond, 0 for instantaneous strokes
    pub fn speed(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            self.length / self.duration as f64
        }
    }
}

/// Sum of Euclidean distances between consecutive points
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Stroke under construction
struct OpenStroke {
    points: Vec<Point>,
    start_time: i64,
    end_time: i64,
}

impl OpenStroke {
    fn open(origin: Point, timestamp: i64) -> Self {
        Self {
            points: vec![origin],
            start_time: timestamp,
            end_time: timestamp,
        }
    }

    fn extend(&mut self, point: Point, timestamp: i64) {
        self.points.push(point);
        self.end_time = timestamp;
    }

    fn finish(self) -> Stroke {
        Stroke::new(self.points, self.start_time, self.end_time)
    }
}

/// Split a chronological sample log into strokes.
///
/// `Draw` and `End` samples outside an open stroke are ignored, as are
/// `Start`/`Draw` samples without coordinates. A stroke still open when the
/// log ends is emitted as-is.
pub fn segment(samples: &[Sample]) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    let mut current: Option<OpenStroke> = None;

    for (index, sample) in samples.iter().enumerate() {
        match sample.kind {
            SampleKind::Start => {
                let Some(origin) = sample.position() else {
                    warn!(index, "start sample without coordinates ignored");
                    continue;
                };
                if let Some(open) = current.take() {
                    warn!(
                        index,
                        start_time = open.start_time,
                        "stroke closed implicitly by a new start sample"
                    );
                    strokes.push(open.finish());
                }
                current = Some(OpenStroke::open(origin, sample.timestamp));
            }
            SampleKind::Draw => {
                if let (Some(open), Some(point)) = (current.as_mut(), sample.position()) {
                    open.extend(point, sample.timestamp);
                }
            }
            SampleKind::End => {
                if let Some(mut open) = current.take() {
                    open.end_time = sample.timestamp;
                    strokes.push(open.finish());
                }
            }
        }
    }

    if let Some(open) = current {
        strokes.push(open.finish());
    }

    strokes
}
