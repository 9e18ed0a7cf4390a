//! Core types for Galaxy Align
//!
//! Plain 2D geometry shared by the population and the projector:
//! - Points in field coordinates
//! - Line segments (orientation vectors)
//! - Polylines (ellipse outlines)

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint
    pub start: Point,
    /// Second endpoint
    pub end: Point,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Ordered sequence of points forming an open or closed curve
pub type Polyline = Vec<Point>;
