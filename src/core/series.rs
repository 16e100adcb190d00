use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{TimeBoxError, TimeBoxResult};

/// One monthly sample of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub month: DateTime<Utc>,
    pub screen_time: f64,
}

impl Point {
    #[must_use]
    pub fn new(month: DateTime<Utc>, screen_time: f64) -> Self {
        Self { month, screen_time }
    }

    pub fn from_decimal(month: DateTime<Utc>, screen_time: Decimal) -> TimeBoxResult<Self> {
        Ok(Self {
            month,
            screen_time: decimal_to_f64(screen_time, "screen_time")?,
        })
    }

    /// Month as unix seconds, the unit the time axis works in.
    #[must_use]
    pub fn time(&self) -> f64 {
        datetime_to_unix_seconds(self.month)
    }
}

/// Named, non-empty sequence of points sorted ascending by month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    values: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<Point>) -> TimeBoxResult<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(TimeBoxError::InvalidData(format!(
                "series `{name}` must contain at least one point"
            )));
        }
        if let Some(point) = values.iter().find(|point| !point.screen_time.is_finite()) {
            return Err(TimeBoxError::InvalidData(format!(
                "series `{name}` has non-finite value at {}",
                point.month
            )));
        }
        if values.windows(2).any(|pair| pair[0].month > pair[1].month) {
            return Err(TimeBoxError::InvalidData(format!(
                "series `{name}` must be sorted ascending by month"
            )));
        }
        Ok(Self { name, values })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[Point] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label text: first letter of every space-separated word upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Groups flat `(name, point)` rows into series.
///
/// Series keep the order in which their names first appear; points within a
/// series are sorted by month (stable for equal months).
pub fn group_points_by_name<I, S>(rows: I) -> TimeBoxResult<Vec<Series>>
where
    I: IntoIterator<Item = (S, Point)>,
    S: Into<String>,
{
    let mut grouped: IndexMap<String, Vec<Point>> = IndexMap::new();
    for (name, point) in rows {
        grouped.entry(name.into()).or_default().push(point);
    }

    grouped
        .into_iter()
        .map(|(name, mut values)| {
            values.sort_by_key(|point| point.month);
            Series::new(name, values)
        })
        .collect()
}
