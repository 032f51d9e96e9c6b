use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

/// Primitive counts of the last drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Draws a diagram frame onto a Cairo context owned by the host.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer for time-location diagrams.
///
/// `Renderer::render` paints into an offscreen image surface that can be
/// exported with [`CairoRenderer::write_png`].
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    font_family: String,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(format!(
                "diagram surface must be non-empty, got {width}x{height}"
            )));
        }
        let surface =
            ImageSurface::create(Format::ARgb32, width, height).map_err(cairo_error("surface"))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            font_family: "Sans".to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    /// Pango family used for axis labels, readouts and tooltips.
    pub fn set_font_family(&mut self, family: impl Into<String>) -> ChartResult<()> {
        let family = family.into();
        if family.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        self.font_family = family;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Exports the offscreen surface as PNG.
    pub fn write_png<W: Write>(&self, out: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| ChartError::InvalidData(format!("png export failed: {err}")))
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        set_source(context, self.background);
        context.paint().map_err(cairo_error("background"))?;

        // Areas and boxes first, then grid and work segments, labels on top.
        let rects_drawn = draw_rects(context, &frame.rects)?;
        let lines_drawn = draw_lines(context, &frame.lines)?;
        let texts_drawn = draw_texts(context, &self.font_family, &frame.texts);

        self.last_stats = CairoRenderStats {
            lines_drawn,
            rects_drawn,
            texts_drawn,
        };
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface).map_err(cairo_error("context"))?;
        self.draw(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.draw(context, frame)
    }
}

fn draw_rects(context: &Context, rects: &[RectPrimitive]) -> ChartResult<usize> {
    for rect in rects {
        rounded_rect_path(context, rect);
        set_source(context, rect.fill_color);
        if rect.border_width > 0.0 {
            context.fill_preserve().map_err(cairo_error("rect fill"))?;
            set_source(context, rect.border_color);
            context.set_line_width(rect.border_width);
            context.stroke().map_err(cairo_error("rect border"))?;
        } else {
            context.fill().map_err(cairo_error("rect fill"))?;
        }
    }
    Ok(rects.len())
}

fn draw_lines(context: &Context, lines: &[LinePrimitive]) -> ChartResult<usize> {
    for line in lines {
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed { on, off } => {
                context.set_dash(&[f64::from(on), f64::from(off)], 0.0);
            }
        }
        set_source(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context.stroke().map_err(cairo_error("line"))?;
    }
    context.set_dash(&[], 0.0);
    Ok(lines.len())
}

/// Text `y` is the top of the layout box, which is Pango's own anchor.
fn draw_texts(context: &Context, font_family: &str, texts: &[TextPrimitive]) -> usize {
    let layout = pangocairo::functions::create_layout(context);
    for text in texts {
        let font = FontDescription::from_string(&format!("{font_family} {}", text.font_size_px));
        layout.set_font_description(Some(&font));
        layout.set_text(&text.text);

        let width = f64::from(layout.pixel_size().0);
        let left = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - width / 2.0,
            TextHAlign::Right => text.x - width,
        };

        set_source(context, text.color);
        context.move_to(left, text.y);
        pangocairo::functions::show_layout(context, &layout);
    }
    texts.len()
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn rounded_rect_path(context: &Context, rect: &RectPrimitive) {
    let radius = rect
        .corner_radius
        .min(rect.width / 2.0)
        .min(rect.height / 2.0);
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn cairo_error(step: &'static str) -> impl Fn(cairo::Error) -> ChartError {
    move |err| ChartError::InvalidData(format!("cairo {step} failed: {err}"))
}
