use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::core::{
    BoxGeometryConfig, BoxId, CoordinateMapper, DataRange, FilterBox, PixelDelta, PixelPoint,
};

use super::{ActiveGesture, BoxChange, HitTarget, InteractionMode};

pub type BoxChanges = SmallVec<[BoxChange; 4]>;

/// Owner of the filter boxes and the interaction mode.
///
/// Every gesture step reads the mode current at that step; a step whose
/// gesture belongs to another mode is a no-op. Pointer positions are
/// plot-local and unclamped; clamping happens in the box geometry.
#[derive(Debug, Clone)]
pub struct BoxManager {
    mode: InteractionMode,
    boxes: SmallVec<[FilterBox; 4]>,
    next_id: u64,
    gesture: Option<ActiveGesture>,
    geometry: BoxGeometryConfig,
}

impl Default for BoxManager {
    fn default() -> Self {
        Self::new(BoxGeometryConfig::default())
    }
}

impl BoxManager {
    #[must_use]
    pub fn new(geometry: BoxGeometryConfig) -> Self {
        Self {
            mode: InteractionMode::Create,
            boxes: SmallVec::new(),
            next_id: 0,
            gesture: None,
            geometry,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn geometry(&self) -> BoxGeometryConfig {
        self.geometry
    }

    #[must_use]
    pub fn boxes(&self) -> &[FilterBox] {
        &self.boxes
    }

    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&FilterBox> {
        self.boxes.iter().find(|b| b.id() == id)
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<ActiveGesture> {
        self.gesture
    }

    #[must_use]
    pub fn hovered(&self) -> Option<BoxId> {
        self.boxes.iter().find(|b| b.is_hovered()).map(FilterBox::id)
    }

    /// Ranges of every box in z-order, including a box still being drawn.
    #[must_use]
    pub fn ranges(&self) -> Vec<DataRange> {
        self.boxes.iter().map(FilterBox::range).collect()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) -> BoxChanges {
        if mode == self.mode {
            return BoxChanges::new();
        }
        let mut changes = BoxChanges::new();
        if self.mode == InteractionMode::Delete && self.clear_hover() {
            changes.push(BoxChange::HoverChanged { id: None });
        }
        debug!(from = ?self.mode, to = ?mode, "interaction mode changed");
        self.mode = mode;
        changes.push(BoxChange::ModeChanged { mode });
        changes
    }

    /// Resolves the handle or body under `local`. Handles win over bodies,
    /// later boxes over earlier ones.
    #[must_use]
    pub fn hit_test(&self, local: PixelPoint) -> HitTarget {
        let radius = self.geometry.handle_radius_px;
        if let Some(b) = self
            .boxes
            .iter()
            .rev()
            .find(|b| b.is_finalized() && b.handle().distance_to(local) <= radius)
        {
            return HitTarget::Handle(b.id());
        }
        match self.boxes.iter().rev().find(|b| b.contains(local)) {
            Some(b) => HitTarget::Body(b.id()),
            None => HitTarget::Background,
        }
    }

    pub fn pointer_down(&mut self, local: PixelPoint, mapper: &CoordinateMapper) -> BoxChanges {
        match self.mode {
            InteractionMode::Create => {
                let id = BoxId(self.next_id);
                self.next_id += 1;
                let filter_box = FilterBox::create(id, local, self.geometry.seed_size_px, mapper);
                debug!(%id, x = filter_box.anchor().x, y = filter_box.anchor().y, "box created");
                self.boxes.push(filter_box);
                self.gesture = Some(ActiveGesture::Create { id });
                smallvec![BoxChange::Added { id }]
            }
            InteractionMode::Edit => {
                self.gesture = match self.hit_test(local) {
                    HitTarget::Handle(id) => Some(ActiveGesture::Resize { id }),
                    HitTarget::Body(id) => Some(ActiveGesture::Move {
                        id,
                        last_x: local.x,
                        last_y: local.y,
                    }),
                    HitTarget::Background => None,
                };
                BoxChanges::new()
            }
            InteractionMode::Delete => BoxChanges::new(),
        }
    }

    pub fn pointer_move(&mut self, local: PixelPoint, mapper: &CoordinateMapper) -> BoxChanges {
        if self.mode == InteractionMode::Delete {
            return self.update_hover(local);
        }

        let Some(gesture) = self.gesture else {
            return BoxChanges::new();
        };
        if gesture.required_mode() != self.mode {
            return BoxChanges::new();
        }
        let id = gesture.box_id();
        let Some(filter_box) = self.boxes.iter_mut().find(|b| b.id() == id) else {
            return BoxChanges::new();
        };

        match gesture {
            ActiveGesture::Create { .. } | ActiveGesture::Resize { .. } => {
                filter_box.resize_to(local, mapper);
                trace!(%id, x1 = filter_box.live_corner().x, y1 = filter_box.live_corner().y, "box resized");
            }
            ActiveGesture::Move { last_x, last_y, .. } => {
                let delta = PixelDelta::between(PixelPoint::new(last_x, last_y), local);
                let applied = filter_box.move_by(delta, mapper);
                trace!(%id, dx = applied.dx, dy = applied.dy, "box moved");
                self.gesture = Some(ActiveGesture::Move {
                    id,
                    last_x: local.x,
                    last_y: local.y,
                });
            }
        }
        smallvec![BoxChange::Updated { id }]
    }

    /// Ends the current gesture. The gesture is always cleared; the geometry
    /// step runs only if the mode still matches.
    pub fn pointer_up(&mut self) -> BoxChanges {
        let Some(gesture) = self.gesture.take() else {
            return BoxChanges::new();
        };
        if gesture.required_mode() != self.mode {
            return BoxChanges::new();
        }
        let id = gesture.box_id();
        let Some(filter_box) = self.boxes.iter_mut().find(|b| b.id() == id) else {
            return BoxChanges::new();
        };

        let was_finalized = filter_box.is_finalized();
        let swapped = filter_box.finalize();
        match gesture {
            ActiveGesture::Create { .. } => {
                debug!(%id, range = ?filter_box.range(), "box finalized");
                smallvec![BoxChange::Finalized { id }]
            }
            ActiveGesture::Resize { .. } => {
                smallvec![BoxChange::Finalized { id }, BoxChange::HandlesRebuilt { id }]
            }
            ActiveGesture::Move { .. } if swapped || !was_finalized => {
                smallvec![BoxChange::Finalized { id }]
            }
            ActiveGesture::Move { .. } => BoxChanges::new(),
        }
    }

    /// Pointer left the plot: hover flags drop, as on mouse-out.
    pub fn pointer_leave(&mut self) -> BoxChanges {
        if self.clear_hover() {
            smallvec![BoxChange::HoverChanged { id: None }]
        } else {
            BoxChanges::new()
        }
    }

    /// In DELETE mode removes the box hovered at `local`; otherwise a no-op.
    pub fn click(&mut self, local: PixelPoint) -> BoxChanges {
        if self.mode != InteractionMode::Delete {
            return BoxChanges::new();
        }
        let mut changes = self.update_hover(local);
        if let Some(id) = self.hovered() {
            changes.extend(self.remove(id));
        }
        changes
    }

    /// Removes a box by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: BoxId) -> BoxChanges {
        let Some(index) = self.boxes.iter().position(|b| b.id() == id) else {
            return BoxChanges::new();
        };
        let removed = self.boxes.remove(index);
        debug!(%id, remaining = self.boxes.len(), "box removed");
        if self.gesture.is_some_and(|g| g.box_id() == id) {
            self.gesture = None;
        }

        let mut changes: BoxChanges = smallvec![BoxChange::Removed { id }];
        if removed.is_hovered() {
            changes.push(BoxChange::HoverChanged { id: None });
        }
        if self.boxes.is_empty() {
            changes.extend(self.set_mode(InteractionMode::Create));
        }
        changes
    }

    /// Removes every box and reverts to CREATE.
    pub fn clear(&mut self) -> BoxChanges {
        let ids: Vec<BoxId> = self.boxes.iter().map(FilterBox::id).collect();
        let mut changes = BoxChanges::new();
        for id in ids {
            changes.extend(self.remove(id));
        }
        changes
    }

    fn update_hover(&mut self, local: PixelPoint) -> BoxChanges {
        let target = self
            .boxes
            .iter()
            .rev()
            .find(|b| b.is_finalized() && b.contains(local))
            .map(FilterBox::id);

        let mut changed = false;
        for b in &mut self.boxes {
            changed |= b.set_hovered(Some(b.id()) == target);
        }
        if changed {
            smallvec![BoxChange::HoverChanged { id: target }]
        } else {
            BoxChanges::new()
        }
    }

    fn clear_hover(&mut self) -> bool {
        let mut changed = false;
        for b in &mut self.boxes {
            changed |= b.set_hovered(false);
        }
        changed
    }
}
