mod box_manager;

pub use box_manager::{BoxChanges, BoxManager};

use serde::{Deserialize, Serialize};

use crate::core::BoxId;

/// Which gestures are live. Exactly one mode is active per chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    /// Drag on the plot draws a new box.
    #[default]
    Create,
    /// Drag a box body to move it, or its handle to resize it.
    Edit,
    /// Hover highlights a box, click removes it.
    Delete,
}

impl InteractionMode {
    /// Instruction text for the mode, shown next to the chart.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Create => "Click and drag to create a filter!",
            Self::Edit => "Click and drag to edit a filter!",
            Self::Delete => "Click on a filter to delete it.",
        }
    }
}

/// What lies under a plot-local pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Background,
    Body(BoxId),
    Handle(BoxId),
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActiveGesture {
    Create { id: BoxId },
    Resize { id: BoxId },
    Move { id: BoxId, last_x: f64, last_y: f64 },
}

impl ActiveGesture {
    #[must_use]
    pub fn box_id(self) -> BoxId {
        match self {
            Self::Create { id } | Self::Resize { id } | Self::Move { id, .. } => id,
        }
    }

    /// Mode a step of this gesture must observe to take effect.
    #[must_use]
    pub fn required_mode(self) -> InteractionMode {
        match self {
            Self::Create { .. } => InteractionMode::Create,
            Self::Resize { .. } | Self::Move { .. } => InteractionMode::Edit,
        }
    }
}

/// Observable change produced by a box-manager transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoxChange {
    ModeChanged { mode: InteractionMode },
    Added { id: BoxId },
    Updated { id: BoxId },
    Finalized { id: BoxId },
    /// Resize handle must be re-attached at the normalized live corner.
    HandlesRebuilt { id: BoxId },
    Removed { id: BoxId },
    HoverChanged { id: Option<BoxId> },
}

impl BoxChange {
    /// Whether the change alters the range set and so requires re-filtering.
    #[must_use]
    pub fn affects_filters(self) -> bool {
        matches!(
            self,
            Self::Added { .. } | Self::Updated { .. } | Self::Removed { .. }
        )
    }
}
