use thiserror::Error;

use crate::core::Axis;

pub type TimeBoxResult<T> = Result<T, TimeBoxError>;

#[derive(Debug, Error)]
pub enum TimeBoxError {
    /// Axis extent is undefined: fewer than two distinct values.
    #[error("empty {axis} domain: need at least two distinct values")]
    EmptyDomain { axis: Axis },

    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Interpolation needs two neighbours; the filter engine treats this as a failed match.
    #[error("series `{name}` has {points} point(s), interpolation needs at least 2")]
    DegenerateSeries { name: String, points: usize },
}
