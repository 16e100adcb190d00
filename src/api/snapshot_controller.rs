use crate::error::{TimeBoxError, TimeBoxResult};
use crate::render::Renderer;

use super::{TimeSearcher, TimeSearcherSnapshot};

impl<R: Renderer> TimeSearcher<R> {
    #[must_use]
    pub fn snapshot(&self) -> TimeSearcherSnapshot {
        TimeSearcherSnapshot {
            plot: self.mapper.plot(),
            mode: self.manager.mode(),
            boxes: self.manager.boxes().to_vec(),
            verdicts: self.verdicts.clone(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> TimeBoxResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| TimeBoxError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
