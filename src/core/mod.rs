pub mod coordinate_mapper;
pub mod filter_box;
pub mod filter_engine;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use coordinate_mapper::CoordinateMapper;
pub use filter_box::{BoxGeometryConfig, BoxId, BoxRect, DataRange, FilterBox};
pub use filter_engine::{evaluate_all, interpolate_nearest, passes, passes_range};
pub use scale::LinearScale;
pub use series::{Point, Series, group_points_by_name};
pub use time_scale::TimeScale;
pub use types::{Axis, PixelDelta, PixelPoint, PlotArea, PlotMargin};
pub use value_scale::{HeadroomMode, ValueHeadroom, ValueScale};
