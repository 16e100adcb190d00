use serde::{Deserialize, Serialize};

use crate::core::{BoxGeometryConfig, PlotArea, PlotMargin, ValueHeadroom};
use crate::error::{TimeBoxError, TimeBoxResult};
use crate::render::RenderStyle;

/// Public chart-session bootstrap configuration.
///
/// Serializable so host applications can persist/load the setup without
/// inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSearcherConfig {
    pub plot: PlotArea,
    #[serde(default)]
    pub margin: PlotMargin,
    #[serde(default)]
    pub value_headroom: ValueHeadroom,
    #[serde(default)]
    pub box_geometry: BoxGeometryConfig,
    #[serde(default)]
    pub render_style: RenderStyle,
}

impl TimeSearcherConfig {
    /// Creates a config with default margin, headroom, geometry and style.
    #[must_use]
    pub fn new(plot: PlotArea) -> Self {
        Self {
            plot,
            margin: PlotMargin::default(),
            value_headroom: ValueHeadroom::default(),
            box_geometry: BoxGeometryConfig::default(),
            render_style: RenderStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: PlotMargin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_value_headroom(mut self, headroom: ValueHeadroom) -> Self {
        self.value_headroom = headroom;
        self
    }

    #[must_use]
    pub fn with_box_geometry(mut self, geometry: BoxGeometryConfig) -> Self {
        self.box_geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    pub fn validate(self) -> TimeBoxResult<Self> {
        self.plot.validate()?;
        if !self.margin.x.is_finite() || !self.margin.y.is_finite() {
            return Err(TimeBoxError::InvalidData(
                "plot margin must be finite".to_owned(),
            ));
        }
        self.value_headroom.validate()?;
        self.box_geometry.validate()?;
        self.render_style.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> TimeBoxResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimeBoxError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> TimeBoxResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| TimeBoxError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()
    }
}
