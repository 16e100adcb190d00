mod frame;
mod null_renderer;
mod primitives;

pub use frame::FilterFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{BoxPrimitive, Color, RenderStyle, SeriesPrimitive};

use crate::error::TimeBoxResult;

/// Contract implemented by the rendering collaborator.
///
/// Backends receive a fully materialized `FilterFrame` after every mutation,
/// so drawing code never reaches into box or filter state.
pub trait Renderer {
    fn render(&mut self, frame: &FilterFrame) -> TimeBoxResult<()>;
}
