mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod plugin_dispatch;
mod plugin_registry;
mod snapshot_controller;

pub use engine::TimeSearcher;
pub use engine_config::TimeSearcherConfig;
pub use engine_snapshot::TimeSearcherSnapshot;
