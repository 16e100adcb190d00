use serde::{Deserialize, Serialize};

use crate::core::time_scale::extent;
use crate::core::{Axis, LinearScale, PlotArea};
use crate::error::{TimeBoxError, TimeBoxResult};

/// How the headroom factor is applied to the value extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeadroomMode {
    /// Grows the extent span by the factor, half the padding on each side.
    /// The data extent always stays inside the domain.
    #[default]
    PadSpan,
    /// Multiplies both extent ends by the factor. With a positive minimum
    /// the lower end moves above the data minimum.
    ScaleExtent,
    /// Multiplies only the upper extent end by the factor.
    ScaleMax,
    /// Uses the raw extent; the factor is ignored.
    None,
}

/// Multiplicative widening of the value-axis domain so extrema are not flush
/// against the plot edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueHeadroom {
    pub factor: f64,
    #[serde(default)]
    pub mode: HeadroomMode,
}

impl Default for ValueHeadroom {
    fn default() -> Self {
        Self {
            factor: 1.1,
            mode: HeadroomMode::PadSpan,
        }
    }
}

impl ValueHeadroom {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            factor: 1.0,
            mode: HeadroomMode::None,
        }
    }

    pub fn validate(self) -> TimeBoxResult<Self> {
        if !self.factor.is_finite() || self.factor < 1.0 {
            return Err(TimeBoxError::InvalidData(
                "value headroom factor must be finite and >= 1".to_owned(),
            ));
        }
        Ok(self)
    }

    fn apply(self, min: f64, max: f64) -> TimeBoxResult<(f64, f64)> {
        let (start, end) = match self.mode {
            HeadroomMode::PadSpan => {
                let pad = (max - min) * (self.factor - 1.0) / 2.0;
                (min - pad, max + pad)
            }
            HeadroomMode::ScaleExtent => (min * self.factor, max * self.factor),
            HeadroomMode::ScaleMax => (min, max * self.factor),
            HeadroomMode::None => (min, max),
        };
        if !(start < end) {
            return Err(TimeBoxError::InvalidData(format!(
                "value headroom collapses domain [{min}, {max}] to [{start}, {end}]"
            )));
        }
        Ok((start, end))
    }
}

/// Value axis mapped onto an inverted pixel Y range (`height` at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    pub fn from_values<I>(values: I, plot: PlotArea, headroom: ValueHeadroom) -> TimeBoxResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let headroom = headroom.validate()?;
        let (min, max) = extent(values, Axis::Value)?;
        let (start, end) = headroom.apply(min, max)?;
        Self::new(start, end, plot)
    }

    /// Builds the axis from an explicit domain; no headroom is applied.
    pub fn new(value_min: f64, value_max: f64, plot: PlotArea) -> TimeBoxResult<Self> {
        let plot = plot.validate()?;
        if !value_min.is_finite() || !value_max.is_finite() || value_min == value_max {
            return Err(TimeBoxError::EmptyDomain { axis: Axis::Value });
        }
        Ok(Self {
            linear: LinearScale::new((value_min, value_max), (plot.height, 0.0))?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        self.linear.forward(value)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }
}
