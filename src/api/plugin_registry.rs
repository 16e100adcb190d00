use indexmap::map::Entry;

use crate::error::{TimeBoxError, TimeBoxResult};
use crate::extensions::FilterPlugin;
use crate::render::Renderer;

use super::TimeSearcher;

impl<R: Renderer> TimeSearcher<R> {
    /// Adds an observer. Ids must be non-blank and unique per session;
    /// observers are notified in registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn FilterPlugin>) -> TimeBoxResult<()> {
        if plugin.id().trim().is_empty() {
            return Err(TimeBoxError::InvalidData(
                "filter plugin id must not be blank".to_owned(),
            ));
        }
        match self.plugins.entry(plugin.id().to_owned()) {
            Entry::Occupied(entry) => Err(TimeBoxError::InvalidData(format!(
                "filter plugin `{}` is already registered",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(plugin);
                Ok(())
            }
        }
    }

    /// Drops the observer with `plugin_id`, keeping the order of the rest.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.plugins.shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }

    /// Registered ids in notification order.
    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }
}
