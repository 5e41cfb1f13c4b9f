//! Distance-field helpers for antialiased strokes and shape edges

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A line segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean distance from `p` to the closest point of the segment.
    ///
    /// The projection parameter is clamped to `[0, 1]`, so points beyond either
    /// end measure to that endpoint. A zero-length segment behaves as a point.
    pub fn distance_to(&self, p: Point) -> f64 {
        let ex = self.end.x - self.start.x;
        let ey = self.end.y - self.start.y;
        let len_sq = ex * ex + ey * ey;
        if len_sq == 0.0 {
            return p.distance(self.start);
        }

        let t = (((p.x - self.start.x) * ex + (p.y - self.start.y) * ey) / len_sq).clamp(0.0, 1.0);
        p.distance(Point::new(self.start.x + t * ex, self.start.y + t * ey))
    }
}

/// Coverage of a stroke of half-width `threshold` at `distance` from its spine.
///
/// Fully covered up to `threshold - band`, then ramps linearly to zero at
/// `threshold`. A non-positive `band` gives a hard edge.
pub fn stroke_coverage(distance: f64, threshold: f64, band: f64) -> f64 {
    if distance >= threshold {
        0.0
    } else if band > 0.0 && distance > threshold - band {
        (threshold - distance) / band
    } else {
        1.0
    }
}

/// `c1 + (c2 - c1) * t`, truncated and clamped to a byte.
pub fn lerp_channel(c1: u8, c2: u8, t: f64) -> u8 {
    let value = c1 as f64 + (c2 as f64 - c1 as f64) * t;
    value.clamp(0.0, 255.0) as u8
}

/// `bg * (1 - coverage) + fg * coverage`, truncated to a byte.
pub fn blend_channel(bg: u8, fg: u8, coverage: f64) -> u8 {
    let value = bg as f64 * (1.0 - coverage) + fg as f64 * coverage;
    value.clamp(0.0, 255.0) as u8
}
