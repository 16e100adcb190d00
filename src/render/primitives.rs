use serde::{Deserialize, Serialize};

use crate::core::{BoxId, BoxRect, PixelPoint};
use crate::error::{TimeBoxError, TimeBoxResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> TimeBoxResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TimeBoxError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke/label colors for matching and non-matching series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub passing_stroke: Color,
    pub failing_stroke: Color,
    pub passing_label: Color,
    pub failing_label: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            // firebrick
            passing_stroke: Color::rgb(178.0 / 255.0, 34.0 / 255.0, 34.0 / 255.0),
            failing_stroke: Color::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0),
            passing_label: Color::rgb(0.0, 0.0, 0.0),
            failing_label: Color::rgba(180.0 / 255.0, 180.0 / 255.0, 180.0 / 255.0, 0.5),
        }
    }
}

impl RenderStyle {
    pub fn validate(self) -> TimeBoxResult<Self> {
        self.passing_stroke.validate()?;
        self.failing_stroke.validate()?;
        self.passing_label.validate()?;
        self.failing_label.validate()?;
        Ok(self)
    }
}

/// Draw command for one filter box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPrimitive {
    pub id: BoxId,
    pub rect: BoxRect,
    /// Present only while resize handles are attached (EDIT mode, finalized box).
    pub handle: Option<PixelPoint>,
    pub hovered: bool,
}

impl BoxPrimitive {
    pub fn validate(self) -> TimeBoxResult<()> {
        let rect = self.rect;
        if !rect.x.is_finite() || !rect.y.is_finite() {
            return Err(TimeBoxError::InvalidData(
                "box coordinates must be finite".to_owned(),
            ));
        }
        if !rect.width.is_finite() || !rect.height.is_finite() || rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(TimeBoxError::InvalidData(
                "box size must be finite and > 0".to_owned(),
            ));
        }
        if self.handle.is_some_and(|handle| !handle.is_finite()) {
            return Err(TimeBoxError::InvalidData(
                "handle coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Styling verdict for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPrimitive {
    pub name: String,
    pub label: String,
    pub passes: bool,
    pub stroke: Color,
    pub label_color: Color,
}
