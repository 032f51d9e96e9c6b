use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Canvas size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Location in a 2D space.
///
/// Whether the coordinates are canvas pixels or data units is decided by the
/// caller; conversions only go through `ViewportTransform`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Stroke settings carried by a segment. Never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentStyle {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.0, 0.0, 0.0),
            width: 6.0,
            dashed: false,
        }
    }
}

/// Oriented line from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub style: Option<SegmentStyle>,
}

impl Segment {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            style: None,
        }
    }

    #[must_use]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    #[must_use]
    pub fn with_style(mut self, style: SegmentStyle) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start().is_finite() && self.end().is_finite()
    }

    /// Applies `map` to both endpoints, keeping the style.
    #[must_use]
    pub fn map_points(&self, map: impl Fn(Point) -> Point) -> Self {
        let start = map(self.start());
        let end = map(self.end());
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            style: self.style,
        }
    }
}

/// One axis gridline.
///
/// `band_px` is the pixel extent of the period that ends at this gridline, so
/// renderers can centre the label inside its band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position_px: f64,
    pub label: String,
    pub is_major: bool,
    pub band_px: f64,
}

impl AxisTick {
    #[must_use]
    pub fn new(position_px: f64, label: impl Into<String>, is_major: bool, band_px: f64) -> Self {
        Self {
            position_px,
            label: label.into(),
            is_major,
            band_px,
        }
    }
}
