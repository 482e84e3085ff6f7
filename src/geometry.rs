//! 2D points and the drawing area they are sampled from.

use serde::Serialize;

/// A position on the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Ordering-equivalent to the true distance,
    /// so nearest-centroid searches never take a square root.
    #[must_use]
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Rectangle `[0, width] x [0, height]` with a margin kept free on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    width: f64,
    height: f64,
    margin: f64,
}

impl Bounds {
    /// Returns `None` when the margin leaves no room to sample in.
    #[must_use]
    pub fn new(width: f64, height: f64, margin: f64) -> Option<Self> {
        let finite = width.is_finite() && height.is_finite() && margin.is_finite();
        if !finite || margin < 0.0 || width <= 2.0 * margin || height <= 2.0 * margin {
            return None;
        }
        Some(Self {
            width,
            height,
            margin,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Half-open horizontal sampling range.
    #[must_use]
    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.margin..self.width - self.margin
    }

    /// Half-open vertical sampling range.
    #[must_use]
    pub fn y_range(&self) -> std::ops::Range<f64> {
        self.margin..self.height - self.margin
    }

    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.x_range().contains(&point.x) && self.y_range().contains(&point.y)
    }
}
