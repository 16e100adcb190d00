use crate::extensions::{FilterEvent, PluginContext};
use crate::render::Renderer;

use super::TimeSearcher;

impl<R: Renderer> TimeSearcher<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            plot: self.mapper.plot(),
            interaction_mode: self.manager.mode(),
            boxes_len: self.manager.boxes().len(),
            series_len: self.series.len(),
            passing_len: self.verdicts.values().filter(|verdict| **verdict).count(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: FilterEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
