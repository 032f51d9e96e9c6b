use tl_chart::ChartError;
use tl_chart::core::{
    DataExtent, PanMargins, PanPolicy, Point, ViewportState, ViewportTransform, ZoomLimits,
};

fn build_transform() -> ViewportTransform {
    ViewportTransform::new(ViewportState::new(800.0, 600.0), DataExtent::default())
        .expect("transform init")
}

#[test]
fn conversions_account_for_gutters() {
    let transform = build_transform();
    let origin = transform.canvas_to_data(Point::new(50.0, 580.0));
    assert_eq!(origin, Point::new(0.0, 0.0));

    let canvas = transform.data_to_canvas(Point::new(100.0, 30.0));
    assert_eq!(canvas, Point::new(150.0, 550.0));
}

#[test]
fn conversions_follow_offsets_and_scale() {
    let mut transform = build_transform().with_pan_policy(PanPolicy::Free);
    assert!(transform.pan(-40.0, 10.0));
    assert!(transform.zoom(1.0));

    let state = transform.state();
    assert_eq!(state.offset_x, 40.0);
    assert_eq!(state.offset_y, 10.0);
    assert_eq!(state.one_px_value_x, 2.0);

    let data = transform.canvas_to_data(Point::new(60.0, 500.0));
    assert_eq!(data, Point::new(100.0, 90.0));
    assert_eq!(transform.data_to_canvas(data), Point::new(60.0, 500.0));
}

#[test]
fn clamped_horizontal_pan_stays_inside_range_plus_margin() {
    let mut transform = build_transform();
    assert_eq!(transform.pan_policy(), PanPolicy::Clamped);

    assert!(transform.pan(-100.0, 0.0));
    assert_eq!(transform.state().offset_x, 100.0);

    let mut fresh = build_transform();
    assert!(!fresh.pan(100.0, 0.0), "cannot reveal negative distances");
    assert_eq!(fresh.state().offset_x, 0.0);

    assert!(fresh.pan(-260.0, 0.0));
    assert_eq!(fresh.state().offset_x, 260.0);

    let mut fresh = build_transform();
    assert!(!fresh.pan(-300.0, 0.0));
    assert_eq!(fresh.state().offset_x, 0.0);
}

#[test]
fn clamped_pan_rejects_a_million_pixel_drag_both_ways() {
    let mut transform = build_transform();
    assert_eq!(transform.extent().x_range, 1000.0);

    assert!(!transform.pan(1_000_000.0, 0.0));
    assert!(!transform.pan(-1_000_000.0, 0.0));
    assert_eq!(transform.state().offset_x, 0.0);

    let mut free = build_transform().with_pan_policy(PanPolicy::Free);
    assert!(free.pan(-1_000_000.0, 0.0));
    assert_eq!(free.state().offset_x, 1_000_000.0);
    assert!(free.pan(2_000_000.0, 0.0));
    assert_eq!(free.state().offset_x, -1_000_000.0);
}

#[test]
fn clamped_vertical_pan_is_accepted_per_axis() {
    let mut transform = build_transform();
    assert!(transform.pan(0.0, 100.0));
    assert_eq!(transform.state().offset_y, 100.0);

    assert!(!transform.pan(0.0, 100.0), "window would end past 730 + 50");
    assert_eq!(transform.state().offset_y, 100.0);

    // The horizontal half of a diagonal drag still applies.
    assert!(transform.pan(-20.0, 100.0));
    assert_eq!(transform.state().offset_x, 20.0);
    assert_eq!(transform.state().offset_y, 100.0);
}

#[test]
fn free_pan_accepts_everything() {
    let mut transform = build_transform().with_pan_policy(PanPolicy::Free);
    assert!(transform.pan(100.0, -50.0));
    assert_eq!(transform.state().offset_x, -100.0);
    assert_eq!(transform.state().offset_y, -50.0);
}

#[test]
fn margins_widen_the_clamp() {
    let mut transform = build_transform().with_pan_margins(PanMargins { x: 200.0, y: 50.0 });
    assert!(transform.pan(-300.0, 0.0));
    assert_eq!(transform.state().offset_x, 300.0);
}

#[test]
fn non_finite_pan_is_ignored() {
    let mut transform = build_transform().with_pan_policy(PanPolicy::Free);
    assert!(!transform.pan(f64::NAN, 0.0));
    assert!(!transform.pan(0.0, f64::INFINITY));
    assert_eq!(transform.state().offset_x, 0.0);
}

#[test]
fn zoom_steps_within_bounds() {
    let mut transform = build_transform();
    assert!(!transform.zoom(-1.0), "scale cannot reach zero");
    assert_eq!(transform.state().one_px_value_x, 1.0);

    assert!(transform.zoom(1.0));
    assert_eq!(transform.state().one_px_value_x, 2.0);

    for _ in 0..200 {
        transform.zoom(3.0);
    }
    assert_eq!(transform.state().one_px_value_x, 100.0);
    assert!(!transform.zoom(1.0));

    assert!(transform.zoom(-5.0));
    assert_eq!(transform.state().one_px_value_x, 99.0);
}

#[test]
fn zero_wheel_delta_is_a_no_op() {
    let mut transform = build_transform();
    assert!(!transform.zoom(0.0));
    assert_eq!(transform.state().one_px_value_x, 1.0);
}

#[test]
fn custom_zoom_limits() {
    let mut transform = build_transform().with_zoom_limits(ZoomLimits {
        step: 0.5,
        max_one_px_value: 2.0,
    });
    assert!(transform.zoom(1.0));
    assert!(transform.zoom(1.0));
    assert!(!transform.zoom(1.0));
    assert_eq!(transform.state().one_px_value_x, 2.0);
}

#[test]
fn invalid_construction_is_rejected() {
    let err = ViewportTransform::new(ViewportState::new(0.0, 600.0), DataExtent::default())
        .expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 600 }));

    let mut state = ViewportState::new(800.0, 600.0);
    state.one_px_value_y = 0.0;
    assert!(ViewportTransform::new(state, DataExtent::default()).is_err());

    let extent = DataExtent {
        x_range: 1000.0,
        y_range: -1.0,
    };
    assert!(ViewportTransform::new(ViewportState::new(800.0, 600.0), extent).is_err());
}

#[test]
fn resize_and_scale_setters_validate() {
    let mut transform = build_transform();
    transform.resize(1024.0, 768.0).expect("resize");
    assert_eq!(transform.state().canvas_width, 1024.0);
    assert!(transform.resize(-1.0, 768.0).is_err());

    transform.set_one_px_value_y(6.0).expect("scale");
    assert_eq!(transform.state().one_px_value_y, 6.0);
    assert!(transform.set_one_px_value_y(f64::NAN).is_err());

    transform.set_y_range(2372.0).expect("range");
    assert_eq!(transform.extent().y_range, 2372.0);
    assert!(transform.set_y_range(0.0).is_err());
}

#[test]
fn reset_offsets_returns_to_origin() {
    let mut transform = build_transform().with_pan_policy(PanPolicy::Free);
    transform.pan(-30.0, 30.0);
    transform.reset_offsets();
    assert_eq!(transform.state().offset_x, 0.0);
    assert_eq!(transform.state().offset_y, 0.0);
}

#[test]
fn plot_membership_excludes_gutters() {
    let state = ViewportState::new(800.0, 600.0);
    assert!(state.is_inside_plot(Point::new(400.0, 300.0)));
    assert!(!state.is_inside_plot(Point::new(40.0, 300.0)));
    assert!(!state.is_inside_plot(Point::new(400.0, 590.0)));
    assert!(state.is_inside_canvas(Point::new(40.0, 590.0)));
    assert!(!state.is_inside_canvas(Point::new(-1.0, 10.0)));
}
