use crate::core::{BoxId, PixelPoint};
use crate::error::{TimeBoxError, TimeBoxResult};
use crate::interaction::{HitTarget, InteractionMode};
use crate::render::Renderer;

use super::TimeSearcher;

impl<R: Renderer> TimeSearcher<R> {
    /// Switches interaction mode. Takes effect at the next gesture step.
    pub fn set_mode(&mut self, mode: InteractionMode) -> TimeBoxResult<()> {
        let changes = self.manager.set_mode(mode);
        self.commit(changes)
    }

    /// Pointer pressed at raw surface coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> TimeBoxResult<()> {
        let local = self.plot_local(x, y)?;
        let changes = self.manager.pointer_down(local, &self.mapper);
        self.commit(changes)
    }

    /// Pointer moved at raw surface coordinates, pressed or not.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> TimeBoxResult<()> {
        let local = self.plot_local(x, y)?;
        let changes = self.manager.pointer_move(local, &self.mapper);
        self.commit(changes)
    }

    pub fn pointer_up(&mut self) -> TimeBoxResult<()> {
        let changes = self.manager.pointer_up();
        self.commit(changes)
    }

    pub fn pointer_leave(&mut self) -> TimeBoxResult<()> {
        let changes = self.manager.pointer_leave();
        self.commit(changes)
    }

    /// Click at raw surface coordinates; removes the hovered box in DELETE mode.
    pub fn click(&mut self, x: f64, y: f64) -> TimeBoxResult<()> {
        let local = self.plot_local(x, y)?;
        let changes = self.manager.click(local);
        self.commit(changes)
    }

    /// Removes a box regardless of mode. Unknown ids are a no-op.
    pub fn delete_box(&mut self, id: BoxId) -> TimeBoxResult<()> {
        let changes = self.manager.remove(id);
        self.commit(changes)
    }

    pub fn clear_boxes(&mut self) -> TimeBoxResult<()> {
        let changes = self.manager.clear();
        self.commit(changes)
    }

    /// Resolves what lies under raw surface coordinates.
    pub fn hit_test(&self, x: f64, y: f64) -> TimeBoxResult<HitTarget> {
        let local = self.plot_local(x, y)?;
        Ok(self.manager.hit_test(local))
    }

    fn plot_local(&self, x: f64, y: f64) -> TimeBoxResult<PixelPoint> {
        let raw = PixelPoint::new(x, y);
        if !raw.is_finite() {
            return Err(TimeBoxError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        Ok(self.mapper.to_plot_local(raw))
    }
}
