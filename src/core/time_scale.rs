use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::{Axis, LinearScale, PlotArea};
use crate::error::{TimeBoxError, TimeBoxResult};

/// Time axis mapping unix seconds onto `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    /// Builds the axis from the full time extent of `times`.
    ///
    /// Fails with [`TimeBoxError::EmptyDomain`] when fewer than two distinct
    /// finite times are supplied.
    pub fn from_times<I>(times: I, plot: PlotArea) -> TimeBoxResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = extent(times, Axis::Time)?;
        Self::new(min, max, plot)
    }

    pub fn new(time_start: f64, time_end: f64, plot: PlotArea) -> TimeBoxResult<Self> {
        let plot = plot.validate()?;
        if !time_start.is_finite() || !time_end.is_finite() || time_start == time_end {
            return Err(TimeBoxError::EmptyDomain { axis: Axis::Time });
        }
        Ok(Self {
            linear: LinearScale::new((time_start, time_end), (0.0, plot.width))?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        self.linear.forward(time)
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn datetime_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.time_to_pixel(datetime_to_unix_seconds(time))
    }

    /// Inverts a pixel into a timestamp rounded to the millisecond.
    pub fn pixel_to_datetime(self, pixel: f64) -> TimeBoxResult<DateTime<Utc>> {
        unix_seconds_to_datetime(self.pixel_to_time(pixel))
    }
}

/// Returns `(min, max)` over finite values, requiring two distinct values.
pub(crate) fn extent<I>(values: I, axis: Axis) -> TimeBoxResult<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if !value.is_finite() {
            return Err(TimeBoxError::InvalidData(format!(
                "{axis} values must be finite"
            )));
        }
        min = min.min(value);
        max = max.max(value);
    }

    if !min.is_finite() || min == max {
        return Err(TimeBoxError::EmptyDomain { axis });
    }
    Ok((min, max))
}
