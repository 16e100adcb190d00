use indexmap::IndexMap;
use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::core::{CoordinateMapper, Point, Series, evaluate_all, passes};
use crate::error::{TimeBoxError, TimeBoxResult};
use crate::extensions::{FilterEvent, FilterPlugin};
use crate::interaction::{BoxChanges, BoxManager, InteractionMode};
use crate::render::{BoxPrimitive, FilterFrame, RenderStyle, Renderer, SeriesPrimitive};

use super::TimeSearcherConfig;

/// One interactive chart session: series, filter boxes, and the render bridge.
///
/// Every public mutation is a synchronous transaction: box state changes,
/// the filter engine re-runs when ranges changed, plugins are notified and
/// the renderer receives a fresh frame before the call returns.
pub struct TimeSearcher<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimeSearcherConfig,
    pub(super) mapper: CoordinateMapper,
    pub(super) series: Vec<Series>,
    pub(super) manager: BoxManager,
    pub(super) verdicts: IndexMap<String, bool>,
    pub(super) plugins: IndexMap<String, Box<dyn FilterPlugin>>,
}

impl<R: Renderer> TimeSearcher<R> {
    /// Builds the axes from the full extent of all series points.
    pub fn new(renderer: R, config: TimeSearcherConfig, series: Vec<Series>) -> TimeBoxResult<Self> {
        let config = config.validate()?;
        let points: Vec<Point> = series
            .iter()
            .flat_map(|s| s.values().iter().copied())
            .collect();
        let mapper =
            CoordinateMapper::from_points(&points, config.plot, config.margin, config.value_headroom)?;
        Self::with_mapper(renderer, config, mapper, series)
    }

    /// Uses axes constructed by the caller.
    ///
    /// The mapper's plot area and margin must match `config`; a mismatch
    /// fails instead of letting one silently override the other.
    pub fn with_mapper(
        renderer: R,
        config: TimeSearcherConfig,
        mapper: CoordinateMapper,
        series: Vec<Series>,
    ) -> TimeBoxResult<Self> {
        let config = config.validate()?;
        if mapper.plot() != config.plot {
            return Err(TimeBoxError::InvalidPlotArea {
                width: config.plot.width,
                height: config.plot.height,
            });
        }
        if mapper.margin() != config.margin {
            return Err(TimeBoxError::InvalidData(format!(
                "config margin ({}, {}) does not match mapper margin ({}, {})",
                config.margin.x,
                config.margin.y,
                mapper.margin().x,
                mapper.margin().y
            )));
        }
        validate_unique_names(&series)?;
        debug!(series = series.len(), "time searcher initialized");
        let mut searcher = Self {
            renderer,
            config,
            mapper,
            series,
            manager: BoxManager::new(config.box_geometry),
            verdicts: IndexMap::new(),
            plugins: IndexMap::new(),
        };
        searcher.reevaluate();
        Ok(searcher)
    }

    #[must_use]
    pub fn config(&self) -> TimeSearcherConfig {
        self.config
    }

    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn box_manager(&self) -> &BoxManager {
        &self.manager
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.manager.mode()
    }

    /// Replaces the series list; axes are kept as constructed.
    pub fn set_series(&mut self, series: Vec<Series>) -> TimeBoxResult<()> {
        validate_unique_names(&series)?;
        debug!(count = series.len(), "series replaced");
        self.series = series;
        self.emit_plugin_event(FilterEvent::SeriesReplaced {
            series_len: self.series.len(),
        });
        self.reevaluate();
        self.render()
    }

    /// Verdict for a series by name under the current boxes.
    #[must_use]
    pub fn passes(&self, series_name: &str) -> Option<bool> {
        self.verdicts.get(series_name).copied()
    }

    /// Evaluates an arbitrary series against the current boxes.
    #[must_use]
    pub fn passes_series(&self, series: &Series) -> bool {
        passes(series, &self.manager.ranges())
    }

    #[must_use]
    pub fn verdicts(&self) -> &IndexMap<String, bool> {
        &self.verdicts
    }

    #[must_use]
    pub fn passing_series(&self) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|s| self.verdicts.get(s.name()).copied().unwrap_or(false))
            .collect()
    }

    #[must_use]
    pub fn style(&self) -> RenderStyle {
        self.config.render_style
    }

    /// Materializes the current state into a render frame.
    #[must_use]
    pub fn build_frame(&self) -> FilterFrame {
        let mode = self.manager.mode();
        let plot = self.mapper.plot();
        let min_size = self.manager.geometry().min_size_px;
        let style = self.config.render_style;

        let mut frame = FilterFrame::new(plot, mode);
        for filter_box in self.manager.boxes() {
            let handle = (mode == InteractionMode::Edit && filter_box.is_finalized())
                .then(|| filter_box.handle());
            frame = frame.with_box(BoxPrimitive {
                id: filter_box.id(),
                rect: filter_box.rect(plot, min_size),
                handle,
                hovered: filter_box.is_hovered(),
            });
        }
        for series in &self.series {
            let verdict = self.verdicts.get(series.name()).copied().unwrap_or(false);
            let (stroke, label_color) = if verdict {
                (style.passing_stroke, style.passing_label)
            } else {
                (style.failing_stroke, style.failing_label)
            };
            frame = frame.with_series(SeriesPrimitive {
                name: series.name().to_owned(),
                label: series.display_name(),
                passes: verdict,
                stroke,
                label_color,
            });
        }
        frame
    }

    /// Pushes the current frame to the renderer.
    pub fn render(&mut self) -> TimeBoxResult<()> {
        let frame = self.build_frame();
        if let Err(err) = self.renderer.render(&frame) {
            warn!(error = %err, "renderer rejected filter frame");
            return Err(err);
        }
        self.emit_plugin_event(FilterEvent::Rendered);
        Ok(())
    }

    /// Applies the outcome of one box-manager transaction.
    pub(super) fn commit(&mut self, changes: BoxChanges) -> TimeBoxResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let refilter = changes.iter().any(|change| change.affects_filters());
        for change in changes {
            self.emit_plugin_event(FilterEvent::Box(change));
        }
        if refilter {
            self.reevaluate();
        }
        self.render()
    }

    pub(super) fn reevaluate(&mut self) {
        self.verdicts = evaluate_all(&self.series, &self.manager.ranges());
        let passing_len = self.verdicts.values().filter(|verdict| **verdict).count();
        trace!(
            passing = passing_len,
            series = self.series.len(),
            boxes = self.manager.boxes().len(),
            "filters evaluated"
        );
        self.emit_plugin_event(FilterEvent::FiltersEvaluated {
            passing_len,
            series_len: self.series.len(),
        });
    }
}

fn validate_unique_names(series: &[Series]) -> TimeBoxResult<()> {
    let mut seen = IndexSet::with_capacity(series.len());
    for s in series {
        if !seen.insert(s.name()) {
            return Err(TimeBoxError::InvalidData(format!(
                "duplicate series name `{}`",
                s.name()
            )));
        }
    }
    Ok(())
}
