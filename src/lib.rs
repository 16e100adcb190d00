//! timebox: interactive range filters over multi-series time charts.
//!
//! Users draw axis-aligned boxes over a time chart; a series stays
//! highlighted only while it lies inside every box. The crate owns the
//! coordinate mapping, the box lifecycle state machine and the filter
//! engine; drawing is delegated to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimeSearcher, TimeSearcherConfig};
pub use error::{TimeBoxError, TimeBoxResult};
