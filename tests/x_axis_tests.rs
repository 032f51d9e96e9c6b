use tl_chart::core::{MAX_X_TICKS, XAxisInput, generate_x_axis_ticks};

fn input(x_offset_px: f64, one_px_value_x: f64) -> XAxisInput {
    XAxisInput {
        grid_size_px: 50.0,
        out_x_offset_px: 50.0,
        x_offset_px,
        one_px_value_x,
        canvas_width: 650.0,
    }
}

#[test]
fn unpanned_ticks_start_at_the_gutter() {
    let ticks = generate_x_axis_ticks(&input(0.0, 1.0));
    assert_eq!(ticks.len(), 13);
    assert_eq!(ticks[0].position_px, 50.0);
    assert_eq!(ticks[0].label, "DK0-0");
    assert_eq!(ticks[1].label, "DK0-50");
    assert_eq!(ticks[12].position_px, 650.0);
    assert_eq!(ticks[12].label, "DK0-600");
    assert!(ticks.iter().all(|tick| !tick.is_major && tick.band_px == 50.0));
}

#[test]
fn panned_ticks_snap_to_the_next_grid_boundary() {
    let ticks = generate_x_axis_ticks(&input(20.0, 1.0));
    assert_eq!(ticks.len(), 12);
    assert_eq!(ticks[0].position_px, 80.0);
    assert_eq!(ticks[0].label, "DK0-50");
    assert_eq!(ticks[1].position_px, 130.0);
    assert_eq!(ticks[1].label, "DK0-100");
}

#[test]
fn scale_multiplies_tick_values() {
    let ticks = generate_x_axis_ticks(&input(0.0, 2.5));
    assert_eq!(ticks[1].label, "DK0-125");
    assert_eq!(ticks[8].label, "DK1-0");
    assert_eq!(ticks[9].label, "DK1-125");
}

#[test]
fn ticks_stop_at_the_canvas_edge() {
    let ticks = generate_x_axis_ticks(&input(0.0, 1.0));
    assert!(ticks.iter().all(|tick| tick.position_px <= 650.0));

    // Past the data range ticks keep coming while they fit on the canvas.
    let zoomed_out = generate_x_axis_ticks(&input(0.0, 10.0));
    assert_eq!(zoomed_out.len(), 13);
    assert_eq!(zoomed_out[12].label, "DK6-0");
}

#[test]
fn negative_offsets_leave_negative_values_unlabeled() {
    let ticks = generate_x_axis_ticks(&input(-20.0, 1.0));
    assert_eq!(ticks[0].position_px, 70.0);
    assert_eq!(ticks[0].label, "DK0-0");

    let ticks = generate_x_axis_ticks(&input(-70.0, 1.0));
    assert_eq!(ticks[0].position_px, 70.0);
    assert!(ticks[0].label.is_empty());
    assert_eq!(ticks[1].position_px, 120.0);
    assert_eq!(ticks[1].label, "DK0-0");
}

#[test]
fn degenerate_inputs_produce_no_ticks() {
    let mut zero_grid = input(0.0, 1.0);
    zero_grid.grid_size_px = 0.0;
    assert!(generate_x_axis_ticks(&zero_grid).is_empty());

    let mut zero_scale = input(0.0, 1.0);
    zero_scale.one_px_value_x = 0.0;
    assert!(generate_x_axis_ticks(&zero_scale).is_empty());

    let mut nan_offset = input(0.0, 1.0);
    nan_offset.x_offset_px = f64::NAN;
    assert!(generate_x_axis_ticks(&nan_offset).is_empty());
}

#[test]
fn sub_pixel_grid_is_rejected_before_allocating() {
    let mut tiny_grid = input(0.0, 1.0);
    tiny_grid.grid_size_px = 1e-9;
    assert!(generate_x_axis_ticks(&tiny_grid).is_empty());

    let mut huge_canvas = input(0.0, 1.0);
    huge_canvas.canvas_width = 1e12;
    assert!(generate_x_axis_ticks(&huge_canvas).is_empty());
}

#[test]
fn one_pixel_grid_stays_under_the_tick_cap() {
    let mut fine_grid = input(0.0, 1.0);
    fine_grid.grid_size_px = 1.0;
    let ticks = generate_x_axis_ticks(&fine_grid);
    assert_eq!(ticks.len(), 601);
    assert!(ticks.len() <= MAX_X_TICKS);
    assert_eq!(ticks[600].position_px, 650.0);
    assert_eq!(ticks[600].label, "DK0-600");
}
