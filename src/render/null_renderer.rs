use crate::error::TimeBoxResult;
use crate::render::{FilterFrame, Renderer};

/// No-op renderer used by tests and headless sessions.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_box_count: usize,
    pub last_passing_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &FilterFrame) -> TimeBoxResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_box_count = frame.boxes.len();
        self.last_passing_count = frame.passing_len();
        Ok(())
    }
}
