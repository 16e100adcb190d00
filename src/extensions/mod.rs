//! Observer hooks for host applications.
//!
//! Plugins see every box-manager change and each filter evaluation without
//! being able to mutate engine state.

pub mod plugins;

pub use plugins::{FilterEvent, FilterPlugin, PluginContext};
