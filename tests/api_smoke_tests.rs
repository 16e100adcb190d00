use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use timebox::core::{
    Axis, BoxId, CoordinateMapper, PlotArea, PlotMargin, Point, Series, ValueHeadroom,
};
use timebox::extensions::{FilterEvent, FilterPlugin, PluginContext};
use timebox::interaction::{BoxChange, HitTarget, InteractionMode};
use timebox::render::{FilterFrame, NullRenderer, Renderer};
use timebox::{TimeBoxError, TimeBoxResult, TimeSearcher, TimeSearcherConfig};

const MARGIN: f64 = 75.0;

fn monthly(name: &str, values: impl Fn(u32) -> f64) -> Series {
    let points = (1..=12)
        .map(|m| Point::new(Utc.with_ymd_and_hms(2010, m, 1, 0, 0, 0).unwrap(), values(m)))
        .collect();
    Series::new(name, points).expect("valid series")
}

fn dataset() -> Vec<Series> {
    vec![
        monthly("low", |_| 10.0),
        monthly("high", |_| 100.0),
        monthly("rising", |m| f64::from(m - 1) * 10.0),
    ]
}

fn config() -> TimeSearcherConfig {
    TimeSearcherConfig::new(PlotArea::new(600.0, 300.0))
        .with_margin(PlotMargin::uniform(MARGIN))
        .with_value_headroom(ValueHeadroom::none())
}

fn build_searcher() -> TimeSearcher<NullRenderer> {
    TimeSearcher::new(NullRenderer::default(), config(), dataset()).expect("searcher init")
}

/// Raw pointer coordinates for a plot-local pixel.
fn raw(x: f64, y: f64) -> (f64, f64) {
    (x + MARGIN, y + MARGIN)
}

#[derive(Default)]
struct Recorder {
    events: Rc<RefCell<Vec<FilterEvent>>>,
    contexts: Rc<RefCell<Vec<PluginContext>>>,
}

impl FilterPlugin for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_event(&mut self, event: FilterEvent, context: PluginContext) {
        self.events.borrow_mut().push(event);
        self.contexts.borrow_mut().push(context);
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _frame: &FilterFrame) -> TimeBoxResult<()> {
        Err(TimeBoxError::InvalidData("backend unavailable".to_owned()))
    }
}

#[test]
fn every_series_passes_without_boxes() {
    let searcher = build_searcher();
    assert_eq!(searcher.interaction_mode(), InteractionMode::Create);
    assert_eq!(searcher.passes("low"), Some(true));
    assert_eq!(searcher.passes("high"), Some(true));
    assert_eq!(searcher.passes("rising"), Some(true));
    assert_eq!(searcher.passes("unknown"), None);
}

#[test]
fn drawing_a_box_filters_live_during_the_drag() {
    let mut searcher = build_searcher();
    let y50 = searcher.mapper().value_to_pixel(50.0);

    let (x, y) = raw(0.0, y50);
    searcher.pointer_down(x, y).expect("pointer down");
    // The seeded box selects January, where no series sits near 50.
    assert_eq!(searcher.passes("low"), Some(false));

    let (x, y) = raw(600.0, 300.0);
    searcher.pointer_move(x, y).expect("pointer move");
    assert_eq!(searcher.passes("low"), Some(true));
    assert_eq!(searcher.passes("high"), Some(false));
    assert_eq!(searcher.passes("rising"), Some(false));

    searcher.pointer_up().expect("pointer up");
    let passing: Vec<&str> = searcher.passing_series().iter().map(|s| s.name()).collect();
    assert_eq!(passing, ["low"]);
}

#[test]
fn drag_beyond_plot_is_clamped_to_plot_corner() {
    let mut searcher = build_searcher();
    searcher.pointer_down(75.0, 75.0).expect("pointer down");
    searcher.pointer_move(700.0, 400.0).expect("pointer move");
    searcher.pointer_up().expect("pointer up");

    let filter_box = &searcher.box_manager().boxes()[0];
    assert_eq!(filter_box.corners(), (0.0, 0.0, 600.0, 300.0));
    assert!(searcher.verdicts().values().all(|verdict| *verdict));
}

#[test]
fn second_box_narrows_the_result() {
    let mut searcher = build_searcher();
    let y0 = searcher.mapper().value_to_pixel(0.0);
    let y150 = searcher.mapper().value_to_pixel(150.0);
    let y5 = searcher.mapper().value_to_pixel(5.0);
    let y15 = searcher.mapper().value_to_pixel(15.0);

    let (x, y) = raw(0.0, y150);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(600.0, y0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();
    assert!(searcher.verdicts().values().all(|verdict| *verdict));

    // January only: rising starts at 0, low at 10.
    let (x, y) = raw(0.0, y15);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(10.0, y5);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();

    assert_eq!(searcher.passes("low"), Some(true));
    assert_eq!(searcher.passes("high"), Some(false));
    assert_eq!(searcher.passes("rising"), Some(false));
}

#[test]
fn deleting_last_box_restores_all_series_and_create_mode() {
    let mut searcher = build_searcher();
    let y50 = searcher.mapper().value_to_pixel(50.0);
    let (x, y) = raw(0.0, y50);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(600.0, 300.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();
    assert_eq!(searcher.passes("high"), Some(false));

    searcher.set_mode(InteractionMode::Delete).unwrap();
    let (x, y) = raw(300.0, 280.0);
    searcher.pointer_move(x, y).unwrap();
    assert!(searcher.build_frame().boxes[0].hovered);
    searcher.click(x, y).unwrap();

    assert!(searcher.box_manager().boxes().is_empty());
    assert_eq!(searcher.interaction_mode(), InteractionMode::Create);
    assert_eq!(searcher.passes("high"), Some(true));
}

#[test]
fn renderer_receives_frame_after_each_mutation() {
    let mut searcher = build_searcher();
    searcher.pointer_down(100.0, 100.0).unwrap();
    searcher.pointer_move(200.0, 200.0).unwrap();
    searcher.pointer_up().unwrap();

    let renderer = searcher.renderer();
    assert_eq!(renderer.frames_rendered, 3);
    assert_eq!(renderer.last_box_count, 1);

    // Moving without a gesture changes nothing and renders nothing.
    searcher.pointer_move(300.0, 300.0).unwrap();
    assert_eq!(searcher.renderer().frames_rendered, 3);
}

#[test]
fn frame_carries_handles_only_in_edit_mode() {
    let mut searcher = build_searcher();
    searcher.pointer_down(100.0, 100.0).unwrap();
    searcher.pointer_move(200.0, 200.0).unwrap();
    searcher.pointer_up().unwrap();

    let frame = searcher.build_frame();
    assert_eq!(frame.hint, "Click and drag to create a filter!");
    assert!(frame.boxes[0].handle.is_none());

    searcher.set_mode(InteractionMode::Edit).unwrap();
    let frame = searcher.build_frame();
    assert_eq!(frame.mode, InteractionMode::Edit);
    assert_eq!(frame.hint, "Click and drag to edit a filter!");
    let handle = frame.boxes[0].handle.expect("handle attached");
    assert_eq!((handle.x, handle.y), (125.0, 125.0));
}

#[test]
fn frame_styles_series_by_verdict() {
    let mut searcher = build_searcher();
    let y50 = searcher.mapper().value_to_pixel(50.0);
    let (x, y) = raw(0.0, y50);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(600.0, 300.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();

    let style = searcher.style();
    let frame = searcher.build_frame();
    let low = frame.series.iter().find(|s| s.name == "low").unwrap();
    let high = frame.series.iter().find(|s| s.name == "high").unwrap();
    assert!(low.passes);
    assert_eq!(low.stroke, style.passing_stroke);
    assert_eq!(low.label, "Low");
    assert!(!high.passes);
    assert_eq!(high.stroke, style.failing_stroke);
    assert_eq!(high.label_color, style.failing_label);
    assert_eq!(frame.passing_len(), 1);
}

#[test]
fn edit_gestures_through_raw_pointer_api() {
    let mut searcher = build_searcher();
    let (x, y) = raw(100.0, 100.0);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(200.0, 150.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();
    let id = searcher.box_manager().boxes()[0].id();

    searcher.set_mode(InteractionMode::Edit).unwrap();
    let (x, y) = raw(200.0, 150.0);
    assert_eq!(searcher.hit_test(x, y).unwrap(), HitTarget::Handle(id));

    let (x, y) = raw(150.0, 120.0);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(-500.0, 120.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();

    let filter_box = &searcher.box_manager().boxes()[0];
    assert_eq!(filter_box.corners(), (0.0, 100.0, 100.0, 150.0));
}

#[test]
fn plugins_observe_box_lifecycle_and_filter_passes() {
    let mut searcher = build_searcher();
    let recorder = Recorder::default();
    let events = Rc::clone(&recorder.events);
    let contexts = Rc::clone(&recorder.contexts);
    searcher.register_plugin(Box::new(recorder)).unwrap();

    searcher.pointer_down(100.0, 100.0).unwrap();
    searcher.pointer_up().unwrap();
    let id = BoxId(0);

    let events = events.borrow();
    assert!(events.contains(&FilterEvent::Box(BoxChange::Added { id })));
    assert!(events.contains(&FilterEvent::Box(BoxChange::Finalized { id })));
    assert!(events.iter().any(|event| matches!(event, FilterEvent::FiltersEvaluated { series_len: 3, .. })));
    assert!(events.contains(&FilterEvent::Rendered));
    assert!(contexts.borrow().iter().all(|context| context.series_len == 3));
}

#[test]
fn plugin_ids_must_be_unique() {
    let mut searcher = build_searcher();
    searcher.register_plugin(Box::new(Recorder::default())).unwrap();
    let err = searcher
        .register_plugin(Box::new(Recorder::default()))
        .unwrap_err();
    assert!(matches!(err, TimeBoxError::InvalidData(_)));
    assert!(searcher.has_plugin("recorder"));
    assert!(searcher.unregister_plugin("recorder"));
    assert_eq!(searcher.plugin_count(), 0);
}

struct Named(&'static str);

impl FilterPlugin for Named {
    fn id(&self) -> &str {
        self.0
    }

    fn on_event(&mut self, _event: FilterEvent, _context: PluginContext) {}
}

#[test]
fn plugin_registry_keeps_order_and_rejects_blank_ids() {
    let mut searcher = build_searcher();
    assert!(matches!(
        searcher.register_plugin(Box::new(Named("  "))),
        Err(TimeBoxError::InvalidData(_))
    ));

    for id in ["audit", "metrics", "export"] {
        searcher.register_plugin(Box::new(Named(id))).unwrap();
    }
    assert!(searcher.unregister_plugin("metrics"));
    assert!(!searcher.unregister_plugin("metrics"));
    assert_eq!(searcher.plugin_ids().collect::<Vec<_>>(), ["audit", "export"]);
}

#[test]
fn renderer_failure_is_surfaced_but_state_is_kept() {
    let mut searcher =
        TimeSearcher::new(FailingRenderer, config(), dataset()).expect("searcher init");
    let result = searcher.pointer_down(100.0, 100.0);
    assert!(result.is_err());
    assert_eq!(searcher.box_manager().boxes().len(), 1);
}

#[test]
fn non_finite_pointer_is_rejected() {
    let mut searcher = build_searcher();
    assert!(searcher.pointer_down(f64::NAN, 10.0).is_err());
    assert!(searcher.box_manager().boxes().is_empty());
}

#[test]
fn delete_box_by_id_and_unknown_id() {
    let mut searcher = build_searcher();
    searcher.pointer_down(100.0, 100.0).unwrap();
    searcher.pointer_up().unwrap();
    searcher.set_mode(InteractionMode::Edit).unwrap();

    searcher.delete_box(BoxId(99)).unwrap();
    assert_eq!(searcher.box_manager().boxes().len(), 1);

    searcher.delete_box(BoxId(0)).unwrap();
    assert!(searcher.box_manager().boxes().is_empty());
    assert_eq!(searcher.interaction_mode(), InteractionMode::Create);
}

#[test]
fn set_series_reevaluates_against_existing_boxes() {
    let mut searcher = build_searcher();
    let y50 = searcher.mapper().value_to_pixel(50.0);
    let (x, y) = raw(0.0, y50);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(600.0, 300.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();

    searcher
        .set_series(vec![monthly("mid", |_| 30.0), monthly("peak", |_| 90.0)])
        .unwrap();
    assert_eq!(searcher.passes("mid"), Some(true));
    assert_eq!(searcher.passes("peak"), Some(false));
    assert_eq!(searcher.passes("low"), None);
}

#[test]
fn duplicate_series_names_are_rejected() {
    let result = TimeSearcher::new(
        NullRenderer::default(),
        config(),
        vec![monthly("dup", |_| 1.0), monthly("dup", |_| 2.0)],
    );
    assert!(matches!(result, Err(TimeBoxError::InvalidData(_))));
}

#[test]
fn single_sample_dataset_cannot_build_axes() {
    let series = Series::new(
        "only",
        vec![Point::new(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(), 1.0)],
    )
    .unwrap();
    let result = TimeSearcher::new(NullRenderer::default(), config(), vec![series]);
    assert!(matches!(
        result,
        Err(TimeBoxError::EmptyDomain { axis: Axis::Time })
    ));
}

#[test]
fn snapshot_exports_boxes_with_geometry_and_range() {
    let mut searcher = build_searcher();
    searcher.pointer_down(100.0, 100.0).unwrap();
    searcher.pointer_move(300.0, 200.0).unwrap();
    searcher.pointer_up().unwrap();

    let snapshot = searcher.snapshot();
    assert_eq!(snapshot.mode, InteractionMode::Create);
    assert_eq!(snapshot.boxes.len(), 1);
    assert_eq!(snapshot.boxes[0].corners(), (25.0, 25.0, 225.0, 125.0));
    assert_eq!(snapshot.verdicts.len(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&searcher.snapshot_json_pretty().unwrap()).unwrap();
    assert_eq!(json["mode"], "Create");
    assert_eq!(json["boxes"][0]["x1"], 225.0);
    assert_eq!(json["boxes"][0]["finalized"], true);
    assert_abs_diff_eq!(
        json["boxes"][0]["range"]["ymax"].as_f64().unwrap(),
        snapshot.boxes[0].range().ymax,
        epsilon = 1e-9
    );
    assert_eq!(json["verdicts"]["low"], snapshot.verdicts["low"]);
}

#[test]
fn whole_plot_box_selects_every_series_with_default_headroom() {
    let series = vec![
        Series::new(
            "low",
            vec![
                Point::new(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(), 10.0),
                Point::new(Utc.with_ymd_and_hms(2010, 2, 1, 0, 0, 0).unwrap(), 12.0),
                Point::new(Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap(), 11.0),
            ],
        )
        .unwrap(),
        Series::new(
            "high",
            vec![
                Point::new(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(), 50.0),
                Point::new(Utc.with_ymd_and_hms(2010, 2, 1, 0, 0, 0).unwrap(), 60.0),
                Point::new(Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap(), 55.0),
            ],
        )
        .unwrap(),
    ];
    let config = TimeSearcherConfig::new(PlotArea::new(600.0, 300.0));
    let mut searcher =
        TimeSearcher::new(NullRenderer::default(), config, series).expect("searcher init");

    let (min, max) = searcher.mapper().value_scale().domain();
    assert!(min < 10.0 && max > 60.0);
    let y_min = searcher.mapper().value_to_pixel(10.0);
    assert!((0.0..=300.0).contains(&y_min));

    searcher.pointer_down(75.0, 75.0).unwrap();
    searcher.pointer_move(675.0, 375.0).unwrap();
    searcher.pointer_up().unwrap();

    let range = searcher.box_manager().boxes()[0].range();
    assert!(range.ymin <= 10.0);
    assert_eq!(searcher.passes("low"), Some(true));
    assert_eq!(searcher.passes("high"), Some(true));
}

#[test]
fn passes_series_checks_unregistered_series_against_current_boxes() {
    let mut searcher = build_searcher();
    let y50 = searcher.mapper().value_to_pixel(50.0);
    let (x, y) = raw(0.0, y50);
    searcher.pointer_down(x, y).unwrap();
    let (x, y) = raw(600.0, 300.0);
    searcher.pointer_move(x, y).unwrap();
    searcher.pointer_up().unwrap();

    assert!(searcher.passes_series(&monthly("inside", |_| 20.0)));
    assert!(!searcher.passes_series(&monthly("above", |_| 80.0)));
    assert_eq!(searcher.passes("inside"), None);
}

#[test]
fn with_mapper_rejects_config_that_disagrees_with_mapper() {
    let mapper = CoordinateMapper::from_extents(
        (0.0, 1_000.0),
        (0.0, 100.0),
        PlotArea::new(600.0, 300.0),
        PlotMargin::uniform(MARGIN),
        ValueHeadroom::none(),
    )
    .unwrap();

    let other_plot = TimeSearcherConfig::new(PlotArea::new(800.0, 300.0))
        .with_margin(PlotMargin::uniform(MARGIN));
    let result = TimeSearcher::with_mapper(NullRenderer::default(), other_plot, mapper, dataset());
    assert!(matches!(
        result,
        Err(TimeBoxError::InvalidPlotArea { width, .. }) if width == 800.0
    ));

    let other_margin =
        TimeSearcherConfig::new(PlotArea::new(600.0, 300.0)).with_margin(PlotMargin::uniform(10.0));
    let result =
        TimeSearcher::with_mapper(NullRenderer::default(), other_margin, mapper, dataset());
    assert!(matches!(result, Err(TimeBoxError::InvalidData(_))));

    let searcher = TimeSearcher::with_mapper(NullRenderer::default(), config(), mapper, dataset())
        .expect("matching config");
    assert_eq!(searcher.mapper(), &mapper);
}

#[test]
fn config_json_fills_defaults() {
    let config = TimeSearcherConfig::from_json_str(r#"{"plot":{"width":800.0,"height":250.0}}"#)
        .expect("config parses");
    assert_eq!(config.plot, PlotArea::new(800.0, 250.0));
    assert_eq!(config.margin, PlotMargin::uniform(75.0));
    assert_eq!(config.value_headroom, ValueHeadroom::default());

    let round_trip = TimeSearcherConfig::from_json_str(&config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(round_trip.plot, config.plot);
    assert_eq!(round_trip.margin, config.margin);
    assert_eq!(round_trip.value_headroom, config.value_headroom);
    assert_eq!(round_trip.box_geometry, config.box_geometry);
}

#[test]
fn config_validation_rejects_bad_geometry() {
    let input = r#"{"plot":{"width":800.0,"height":250.0},"box_geometry":{"min_size_px":0.5,"seed_size_px":1.0,"handle_radius_px":6.0}}"#;
    assert!(TimeSearcherConfig::from_json_str(input).is_err());

    let input = r#"{"plot":{"width":-1.0,"height":250.0}}"#;
    assert!(matches!(
        TimeSearcherConfig::from_json_str(input),
        Err(TimeBoxError::InvalidPlotArea { .. })
    ));
}
