use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::interaction::{BoxChange, InteractionMode};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub plot: PlotArea,
    pub interaction_mode: InteractionMode,
    pub boxes_len: usize,
    pub series_len: usize,
    pub passing_len: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterEvent {
    Box(BoxChange),
    SeriesReplaced { series_len: usize },
    FiltersEvaluated { passing_len: usize, series_len: usize },
    Rendered,
}

/// Extension hook interface.
///
/// Plugins observe events and read engine context; they never mutate boxes
/// or series directly.
pub trait FilterPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: FilterEvent, context: PluginContext);
}
