use chrono::NaiveDate;
use tl_chart::api::{RenderStyle, SceneBuilder, SceneConfig, SceneLayers};
use tl_chart::core::{AxisMode, DateRange, Point, Rect, Segment, SegmentStyle, ViewportState};
use tl_chart::extensions::WorkPoint;
use tl_chart::render::{Color, LineStrokeStyle};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn build_scene() -> SceneBuilder {
    SceneBuilder::new(SceneConfig::default(), RenderStyle::default()).expect("scene init")
}

fn viewport() -> ViewportState {
    let mut viewport = ViewportState::new(800.0, 320.0);
    viewport.one_px_value_y = 6.0;
    viewport
}

fn range() -> DateRange {
    DateRange::new(date(2021, 5, 11), date(2027, 1, 11))
}

fn crossing_segments() -> [Segment; 2] {
    [
        Segment::new(100.0, 59.0, 600.0, 789.0),
        Segment::new(600.0, 59.0, 100.0, 789.0),
    ]
}

#[test]
fn frame_layout_combines_both_axes_and_conflicts() {
    let scene = build_scene();
    let layout = scene.compute_frame(&viewport(), range(), &crossing_segments());

    assert_eq!(layout.mode, AxisMode::HalfYear);
    assert_eq!(layout.x_ticks.len(), 16);
    assert_eq!(layout.x_ticks[0].label, "DK0-0");
    assert_eq!(layout.y_axis.period_ticks.len(), 13);
    assert_eq!(layout.segments_in_canvas_space[0].x1, 150.0);
    assert_eq!(layout.conflicts.len(), 1);
}

#[test]
fn segment_styles_survive_the_canvas_mapping() {
    let scene = build_scene();
    let style = SegmentStyle {
        color: Color::rgb(0.0, 0.5, 0.0),
        width: 4.0,
        dashed: true,
    };
    let segments = [Segment::new(0.0, 0.0, 100.0, 100.0).with_style(style)];
    let layout = scene.compute_frame(&viewport(), range(), &segments);
    assert_eq!(layout.segments_in_canvas_space[0].style, Some(style));

    let frame = scene.build_render_frame(&viewport(), SceneLayers::new(&layout));
    let line = frame
        .lines
        .iter()
        .find(|line| line.stroke_width == 4.0)
        .expect("styled work line");
    assert_eq!(line.stroke_style, LineStrokeStyle::DEFAULT_DASH);
    assert_eq!(line.color, style.color);
}

#[test]
fn crosshair_guides_run_from_the_pointer_to_both_axes() {
    let scene = build_scene();
    let viewport = viewport();
    let layout = scene.compute_frame(&viewport, range(), &crossing_segments());
    let crosshair = scene
        .crosshair(
            &viewport,
            layout.y_axis.origin,
            Point::new(400.0, 230.0),
            &layout.segments_in_canvas_space,
        )
        .expect("inside plot");

    assert_eq!(crosshair.horizontal, Segment::new(50.0, 230.0, 400.0, 230.0));
    assert_eq!(crosshair.vertical, Segment::new(400.0, 230.0, 400.0, 300.0));
    assert_eq!(crosshair.data_point, Point::new(350.0, 420.0));
    assert_eq!(crosshair.date_label.as_deref(), Some("2022-02-25"));
}

#[test]
fn crosshair_below_the_origin_has_no_date() {
    let scene = build_scene();
    let mut viewport = viewport();
    viewport.offset_y = -10.0;
    let crosshair = scene
        .crosshair(&viewport, date(2021, 1, 1), Point::new(400.0, 295.0), &[])
        .expect("inside plot");
    assert_eq!(crosshair.date_label, None);
    assert_eq!(crosshair.milepost_label.as_deref(), Some("DK0-350"));
}

#[test]
fn render_frame_draws_hover_tooltip_and_dashed_guides() {
    let scene = build_scene();
    let viewport = viewport();
    let layout = scene.compute_frame(&viewport, range(), &crossing_segments());
    let crosshair = scene.crosshair(
        &viewport,
        layout.y_axis.origin,
        Point::new(400.0, 230.0),
        &layout.segments_in_canvas_space,
    );
    let frame = scene.build_render_frame(
        &viewport,
        SceneLayers::new(&layout).with_crosshair(crosshair.as_ref()),
    );
    frame.validate().expect("valid frame");

    let dashed = frame
        .lines
        .iter()
        .filter(|line| line.stroke_style == LineStrokeStyle::DEFAULT_DASH)
        .count();
    assert_eq!(dashed, 2);
    assert!(frame.texts.iter().any(|text| text.text == "冲突点"));
    assert!(frame.texts.iter().any(|text| text.text == "DK0-350"));
    assert!(frame.texts.iter().any(|text| text.text == "2022-02-25"));

    let style = RenderStyle::default();
    let highlights = frame
        .lines
        .iter()
        .filter(|line| line.color == style.hover_highlight_color)
        .count();
    assert_eq!(highlights, 2);
}

#[test]
fn render_frame_without_hover_has_no_tooltip() {
    let scene = build_scene();
    let viewport = viewport();
    let layout = scene.compute_frame(&viewport, range(), &crossing_segments());
    let frame = scene.build_render_frame(&viewport, SceneLayers::new(&layout));
    frame.validate().expect("valid frame");
    assert!(!frame.texts.iter().any(|text| text.text == "冲突点"));

    // Background, both gutters and the single conflict marker.
    assert_eq!(frame.rects.len(), 4);
    assert!(frame.texts.iter().any(|text| text.text == "上"));
    assert!(frame.texts.iter().any(|text| text.text == "2021"));
}

#[test]
fn areas_and_work_points_add_layers() {
    let scene = build_scene();
    let viewport = viewport();
    let layout = scene.compute_frame(&viewport, range(), &crossing_segments());
    let areas = scene.compute_areas(
        &viewport,
        &[Rect::new(200.0, 100.0, 100.0, 200.0)],
        &layout.segments_in_canvas_space,
    );
    assert_eq!(areas.areas_in_canvas_space[0].x, 250.0);
    assert!(!areas.conflicts.is_empty());

    let work_points = [WorkPoint::new(0.0, 300.0, "仙山大桥")];
    let frame = scene.build_render_frame(
        &viewport,
        SceneLayers::new(&layout)
            .with_areas(&areas)
            .with_work_points(&work_points),
    );
    frame.validate().expect("valid frame");
    assert!(frame.texts.iter().any(|text| text.text == "仙山大桥"));

    let style = RenderStyle::default();
    assert!(frame.rects.iter().any(|rect| rect.fill_color == style.area_fill_color));
}

#[test]
fn invalid_style_is_rejected() {
    let mut style = RenderStyle::default();
    style.work_item_width = 0.0;
    assert!(SceneBuilder::new(SceneConfig::default(), style).is_err());

    let mut scene = build_scene();
    style = RenderStyle::default();
    style.background_color = Color::rgb(2.0, 0.0, 0.0);
    assert!(scene.set_style(style).is_err());
    assert_eq!(scene.style(), RenderStyle::default());
}

#[test]
fn sub_pixel_grid_is_rejected_by_the_scene_builder() {
    let config = SceneConfig {
        x_grid_size_px: 1e-4,
        ..SceneConfig::default()
    };
    assert!(SceneBuilder::new(config, RenderStyle::default()).is_err());

    let mut scene = build_scene();
    assert!(scene.set_x_grid_size_px(1e-9).is_err());
    assert!(scene.set_x_grid_size_px(f64::NAN).is_err());
    assert_eq!(scene.config().x_grid_size_px, 50.0);

    scene.set_x_grid_size_px(25.0).expect("valid grid");
    let layout = scene.compute_frame(&viewport(), range(), &crossing_segments());
    assert_eq!(layout.x_ticks.len(), 31);
}
