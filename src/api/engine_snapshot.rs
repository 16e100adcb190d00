use indexmap::IndexMap;
use serde::Serialize;

use crate::core::{FilterBox, PlotArea};
use crate::interaction::InteractionMode;

/// Read-only view of a session used by regression tests and debugging tooling.
///
/// Export only: box ranges are derived from geometry and the session's axes,
/// so a snapshot is never loaded back into boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSearcherSnapshot {
    pub plot: PlotArea,
    pub mode: InteractionMode,
    pub boxes: Vec<FilterBox>,
    pub verdicts: IndexMap<String, bool>,
}
