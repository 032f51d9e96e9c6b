use tl_chart::core::Viewport;
use tl_chart::render::{
    Color, LinePrimitive, LineStrokeStyle, NullRenderer, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

fn black() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

#[test]
fn frame_builders_collect_primitives() {
    let frame = RenderFrame::new(Viewport::new(100, 50))
        .with_rect(RectPrimitive::new(0.0, 0.0, 100.0, 50.0, black()))
        .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, black()))
        .with_text(TextPrimitive::new(
            "DK0-0",
            5.0,
            5.0,
            10.0,
            black(),
            TextHAlign::Center,
        ));
    assert!(!frame.is_empty());
    frame.validate().expect("valid frame");
}

#[test]
fn extend_keeps_the_outer_viewport() {
    let mut frame = RenderFrame::new(Viewport::new(100, 50));
    frame.extend(
        RenderFrame::new(Viewport::new(10, 10))
            .with_line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, black())),
    );
    assert_eq!(frame.viewport, Viewport::new(100, 50));
    assert_eq!(frame.lines.len(), 1);
}

#[test]
fn invalid_primitives_fail_validation() {
    let base = RenderFrame::new(Viewport::new(100, 50));

    let zero_width_line = base
        .clone()
        .with_line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 0.0, black()));
    assert!(zero_width_line.validate().is_err());

    let empty_dash = base.clone().with_line(
        LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, black())
            .with_stroke_style(LineStrokeStyle::Dashed { on: 0, off: 5 }),
    );
    assert!(empty_dash.validate().is_err());

    let negative_rect = base
        .clone()
        .with_rect(RectPrimitive::new(0.0, 0.0, -1.0, 1.0, black()));
    assert!(negative_rect.validate().is_err());

    let empty_text = base.clone().with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        10.0,
        black(),
        TextHAlign::Left,
    ));
    assert!(empty_text.validate().is_err());

    let bad_color = base.with_rect(RectPrimitive::new(
        0.0,
        0.0,
        1.0,
        1.0,
        Color::rgba(0.0, 0.0, 0.0, 1.5),
    ));
    assert!(bad_color.validate().is_err());

    assert!(RenderFrame::new(Viewport::new(0, 10)).validate().is_err());
}

#[test]
fn null_renderer_counts_primitives() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(Viewport::new(100, 50))
        .with_rect(RectPrimitive::new(0.0, 0.0, 10.0, 10.0, black()).with_corner_radius(5.0))
        .with_line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, black()))
        .with_line(
            LinePrimitive::new(0.0, 1.0, 1.0, 0.0, 1.0, black())
                .with_stroke_style(LineStrokeStyle::DEFAULT_DASH),
        );
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_line_count, 2);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn null_renderer_rejects_invalid_frames() {
    let mut renderer = NullRenderer::default();
    let frame = RenderFrame::new(Viewport::new(100, 50))
        .with_line(LinePrimitive::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, black()));
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn rgb8_colors_are_normalized() {
    let color = Color::from_rgb8(0xff, 0x00, 0x33);
    assert_eq!(color.red, 1.0);
    assert_eq!(color.green, 0.0);
    assert_eq!(color.blue, 0.2);
    assert_eq!(color.alpha, 1.0);
}
