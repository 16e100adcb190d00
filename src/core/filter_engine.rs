use indexmap::IndexMap;
use ordered_float::OrderedFloat;
#[cfg(feature = "parallel-filter")]
use rayon::prelude::*;
use tracing::trace;

use crate::core::{DataRange, Series};
use crate::error::{TimeBoxError, TimeBoxResult};

/// Whether `series` satisfies every range. An empty range set always passes.
#[must_use]
pub fn passes(series: &Series, ranges: &[DataRange]) -> bool {
    ranges.iter().all(|range| passes_range(series, range))
}

/// Single-range test.
///
/// Points inside `[xmin, xmax]` must all lie within `[ymin, ymax]`. When the
/// time window holds no point, the two points nearest the window midpoint
/// are averaged and that value is tested instead; series too short to
/// interpolate fail.
#[must_use]
pub fn passes_range(series: &Series, range: &DataRange) -> bool {
    let mut selected = series
        .values()
        .iter()
        .filter(|point| range.contains_time(point.time()))
        .map(|point| point.screen_time)
        .peekable();

    if selected.peek().is_some() {
        let (min, max) = selected.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        return max <= range.ymax && min >= range.ymin;
    }

    match interpolate_nearest(series, range.mid_time()) {
        Ok(value) => range.contains_value(value),
        Err(err) => {
            trace!(series = series.name(), error = %err, "series fails range closed");
            false
        }
    }
}

/// Unweighted mean of the values of the two points whose months are closest
/// to `time`. Ties keep series order.
pub fn interpolate_nearest(series: &Series, time: f64) -> TimeBoxResult<f64> {
    let values = series.values();
    if values.len() < 2 {
        return Err(TimeBoxError::DegenerateSeries {
            name: series.name().to_owned(),
            points: values.len(),
        });
    }

    let mut by_distance: Vec<(OrderedFloat<f64>, f64)> = values
        .iter()
        .map(|point| (OrderedFloat((point.time() - time).abs()), point.screen_time))
        .collect();
    by_distance.sort_by_key(|(distance, _)| *distance);

    Ok((by_distance[0].1 + by_distance[1].1) / 2.0)
}

/// Evaluates every series against the full range set, keyed by series name
/// in input order.
#[must_use]
pub fn evaluate_all(series: &[Series], ranges: &[DataRange]) -> IndexMap<String, bool> {
    #[cfg(feature = "parallel-filter")]
    {
        let verdicts: Vec<bool> = series.par_iter().map(|s| passes(s, ranges)).collect();
        series
            .iter()
            .zip(verdicts)
            .map(|(s, verdict)| (s.name().to_owned(), verdict))
            .collect()
    }

    #[cfg(not(feature = "parallel-filter"))]
    {
        series
            .iter()
            .map(|s| (s.name().to_owned(), passes(s, ranges)))
            .collect()
    }
}
