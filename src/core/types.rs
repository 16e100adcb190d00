use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TimeBoxError, TimeBoxResult};

/// Chart axis identifier used in diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Time,
    Value,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Plot-local drawing area in pixels. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> TimeBoxResult<Self> {
        if !self.is_valid() {
            return Err(TimeBoxError::InvalidPlotArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Clamps a point into `[0, width] x [0, height]`.
    #[must_use]
    pub fn clamp(self, point: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: point.x.clamp(0.0, self.width),
            y: point.y.clamp(0.0, self.height),
        }
    }
}

/// Offset of the plot area inside the outer drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargin {
    pub x: f64,
    pub y: f64,
}

impl PlotMargin {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin)
    }
}

impl Default for PlotMargin {
    fn default() -> Self {
        Self::uniform(75.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn between(from: PixelPoint, to: PixelPoint) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }
}
