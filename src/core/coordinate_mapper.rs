use serde::{Deserialize, Serialize};

use crate::core::{
    PixelPoint, PlotArea, PlotMargin, Point, TimeScale, ValueHeadroom, ValueScale,
};
use crate::error::TimeBoxResult;

/// Bidirectional mapping between plot-local pixels and `(time, value)` data.
///
/// Immutable once built; box geometry and the filter engine share it by
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    time: TimeScale,
    value: ValueScale,
    plot: PlotArea,
    margin: PlotMargin,
}

impl CoordinateMapper {
    /// Builds both axes from the full extent of the flat point list.
    pub fn from_points(
        points: &[Point],
        plot: PlotArea,
        margin: PlotMargin,
        headroom: ValueHeadroom,
    ) -> TimeBoxResult<Self> {
        let time = TimeScale::from_times(points.iter().map(Point::time), plot)?;
        let value = ValueScale::from_values(
            points.iter().map(|point| point.screen_time),
            plot,
            headroom,
        )?;
        Ok(Self {
            time,
            value,
            plot,
            margin,
        })
    }

    /// Builds both axes from raw extents (unix seconds and values).
    pub fn from_extents(
        time_extent: (f64, f64),
        value_extent: (f64, f64),
        plot: PlotArea,
        margin: PlotMargin,
        headroom: ValueHeadroom,
    ) -> TimeBoxResult<Self> {
        let time = TimeScale::from_times([time_extent.0, time_extent.1], plot)?;
        let value = ValueScale::from_values([value_extent.0, value_extent.1], plot, headroom)?;
        Ok(Self {
            time,
            value,
            plot,
            margin,
        })
    }

    /// Uses externally constructed axes.
    pub fn from_scales(
        time: TimeScale,
        value: ValueScale,
        plot: PlotArea,
        margin: PlotMargin,
    ) -> TimeBoxResult<Self> {
        Ok(Self {
            time,
            value,
            plot: plot.validate()?,
            margin,
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn margin(&self) -> PlotMargin {
        self.margin
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time
    }

    #[must_use]
    pub fn value_scale(&self) -> ValueScale {
        self.value
    }

    /// Translates a raw pointer position into plot-local coordinates. No clamping.
    #[must_use]
    pub fn to_plot_local(&self, raw: PixelPoint) -> PixelPoint {
        PixelPoint::new(raw.x - self.margin.x, raw.y - self.margin.y)
    }

    #[must_use]
    pub fn time_to_pixel(&self, time: f64) -> f64 {
        self.time.time_to_pixel(time)
    }

    #[must_use]
    pub fn pixel_to_time(&self, x: f64) -> f64 {
        self.time.pixel_to_time(x)
    }

    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        self.value.value_to_pixel(value)
    }

    #[must_use]
    pub fn pixel_to_value(&self, y: f64) -> f64 {
        self.value.pixel_to_value(y)
    }

    /// Maps `(time seconds, value)` to a plot-local pixel.
    #[must_use]
    pub fn forward(&self, time: f64, value: f64) -> PixelPoint {
        PixelPoint::new(self.time_to_pixel(time), self.value_to_pixel(value))
    }

    /// Maps a plot-local pixel to `(time seconds, value)`.
    #[must_use]
    pub fn invert(&self, pixel: PixelPoint) -> (f64, f64) {
        (self.pixel_to_time(pixel.x), self.pixel_to_value(pixel.y))
    }
}
