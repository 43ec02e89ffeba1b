//! Core types for stroke capture
//!
//! Defines the sample log entries recorded from pointer events and the
//! canvas geometry they are expressed in.

use serde::{Deserialize, Serialize};

/// Kind of a captured pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    /// Pointer pressed; opens a stroke
    Start,
    /// Pointer moved while pressed
    Draw,
    /// Pointer released; closes the stroke
    End,
}

impl SampleKind {
    /// Check if this sample carries a position
    pub fn has_position(&self) -> bool {
        matches!(self, SampleKind::Start | SampleKind::Draw)
    }
}

/// A point in canvas logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle (radians, `atan2` convention) of the vector from this point to `other`
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// One captured pointer event.
///
/// Serialized in the same shape the browser tool exports:
/// `{"type":"draw","x":12.0,"y":40.5,"timestamp":1700000000123}`.
/// `End` samples carry no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Event kind
    #[serde(rename = "type")]
    pub kind: SampleKind,
    /// Canvas x coordinate (absent for `End`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Canvas y coordinate (absent for `End`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Capture time in milliseconds
    pub timestamp: i64,
}

impl Sample {
    pub fn start(x: f64, y: f64, timestamp: i64) -> Self {
        Self {
            kind: SampleKind::Start,
            x: Some(x),
            y: Some(y),
            timestamp,
        }
    }

    pub fn draw(x: f64, y: f64, timestamp: i64) -> Self {
        Self {
            kind: SampleKind::Draw,
            x: Some(x),
            y: Some(y),
            timestamp,
        }
    }

    pub fn end(timestamp: i64) -> Self {
        Self {
            kind: SampleKind::End,
            x: None,
            y: None,
            timestamp,
        }
    }

    /// Position of the sample, if it has both coordinates
    pub fn position(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.kind == SampleKind::Draw
    }
}

/// Logical canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Create a canvas size, rejecting non-positive or non-finite dimensions
    pub fn new(width: f64, height: f64) -> crate::Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0 {
            return Err(crate::Error::Validation(format!(
                "canvas must have positive finite dimensions, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Maps client (device) coordinates onto the canvas' logical pixel grid.
///
/// The host reports the canvas' on-screen bounding rectangle; when the
/// element is displayed at a different size than its backing store, points
/// are scaled by `canvas / rect` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Left edge of the canvas in client coordinates
    pub left: f64,
    /// Top edge of the canvas in client coordinates
    pub top: f64,
    /// Displayed width
    pub rect_width: f64,
    /// Displayed height
    pub rect_height: f64,
    /// Backing canvas size
    pub canvas: CanvasSize,
}

impl CanvasMapping {
    pub fn new(left: f64, top: f64, rect_width: f64, rect_height: f64, canvas: CanvasSize) -> Self {
        Self {
            left,
            top,
            rect_width,
            rect_height,
            canvas,
        }
    }

    /// Convert a client position to canvas coordinates
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let scale_x = axis_scale(self.canvas.width, self.rect_width);
        let scale_y = axis_scale(self.canvas.height, self.rect_height);
        Point::new(
            (client_x - self.left) * scale_x,
            (client_y - self.top) * scale_y,
        )
    }
}

fn axis_scale(canvas: f64, displayed: f64) -> f64 {
    if displayed > 0.0 && displayed.is_finite() {
        canvas / displayed
    } else {
        1.0
    }
}
