use crate::core::PlotArea;
use crate::error::{TimeBoxError, TimeBoxResult};
use crate::interaction::InteractionMode;
use crate::render::{BoxPrimitive, SeriesPrimitive};

/// Backend-agnostic scene for one restyle pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFrame {
    pub plot: PlotArea,
    pub mode: InteractionMode,
    pub hint: &'static str,
    pub boxes: Vec<BoxPrimitive>,
    pub series: Vec<SeriesPrimitive>,
}

impl FilterFrame {
    #[must_use]
    pub fn new(plot: PlotArea, mode: InteractionMode) -> Self {
        Self {
            plot,
            mode,
            hint: mode.hint(),
            boxes: Vec::new(),
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_box(mut self, primitive: BoxPrimitive) -> Self {
        self.boxes.push(primitive);
        self
    }

    #[must_use]
    pub fn with_series(mut self, primitive: SeriesPrimitive) -> Self {
        self.series.push(primitive);
        self
    }

    pub fn validate(&self) -> TimeBoxResult<()> {
        if !self.plot.is_valid() {
            return Err(TimeBoxError::InvalidPlotArea {
                width: self.plot.width,
                height: self.plot.height,
            });
        }
        for primitive in &self.boxes {
            primitive.validate()?;
        }
        for primitive in &self.series {
            primitive.stroke.validate()?;
            primitive.label_color.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn passing_len(&self) -> usize {
        self.series.iter().filter(|s| s.passes).count()
    }
}
