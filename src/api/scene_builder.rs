use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::calendar::format_iso_date;
use crate::core::{
    AreaConflict, AxisMode, AxisTick, ConflictPoint, DateRange, HitTest, MIN_X_GRID_SIZE_PX, Point,
    Rect, Segment, SegmentStyle, Viewport, ViewportState, XAxisInput, YAxisInput, YAxisLayout,
    date_at_offset, detect_area_conflicts, detect_conflicts, format_dk_value,
    generate_x_axis_ticks, generate_y_axis,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    MarkerPlacementConfig, WorkPoint, hovered_marker, is_marker_visible, layout_work_point_labels,
    marker_primitives, place_conflict_markers, tooltip_geometry, tooltip_primitives,
    work_point_strip_frame,
};
use crate::render::{
    LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{EngineConfig, RenderStyle};

/// Frame-independent inputs of the scene builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub x_grid_size_px: f64,
    pub hit_test: HitTest,
    pub markers: MarkerPlacementConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            x_grid_size_px: 50.0,
            hit_test: HitTest::default(),
            markers: MarkerPlacementConfig::default(),
        }
    }
}

impl SceneConfig {
    #[must_use]
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        Self {
            x_grid_size_px: config.x_grid_size_px,
            hit_test: config.hit_test,
            markers: MarkerPlacementConfig::default(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_x_grid_size_px(self.x_grid_size_px)?;
        self.markers.validate()
    }
}

fn validate_x_grid_size_px(grid_size_px: f64) -> ChartResult<()> {
    if !grid_size_px.is_finite() || grid_size_px < MIN_X_GRID_SIZE_PX {
        return Err(ChartError::InvalidData(format!(
            "x grid size must be finite and >= {MIN_X_GRID_SIZE_PX} px"
        )));
    }
    Ok(())
}

/// Geometry of one frame, before any styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub mode: AxisMode,
    pub x_ticks: Vec<AxisTick>,
    pub y_axis: YAxisLayout,
    pub segments_in_canvas_space: Vec<Segment>,
    /// Indices refer to `segments_in_canvas_space`.
    pub conflicts: Vec<ConflictPoint>,
}

/// Resumption areas mapped to the canvas and their boundary crossings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLayer {
    pub areas_in_canvas_space: Vec<Rect>,
    pub conflicts: Vec<AreaConflict>,
}

/// Hover guides from the pointer to both axes, plus the readout at the
/// pointer and the segments under it.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairOverlay {
    pub point: Point,
    pub data_point: Point,
    pub horizontal: Segment,
    pub vertical: Segment,
    pub milepost_label: Option<String>,
    pub date_label: Option<String>,
    pub hovered: SmallVec<[usize; 4]>,
}

/// Optional layers composed into one render frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneLayers<'a> {
    pub layout: &'a FrameLayout,
    pub areas: Option<&'a AreaLayer>,
    pub crosshair: Option<&'a CrosshairOverlay>,
    pub work_points: &'a [WorkPoint],
}

impl<'a> SceneLayers<'a> {
    #[must_use]
    pub fn new(layout: &'a FrameLayout) -> Self {
        Self {
            layout,
            areas: None,
            crosshair: None,
            work_points: &[],
        }
    }

    #[must_use]
    pub fn with_areas(mut self, areas: &'a AreaLayer) -> Self {
        self.areas = Some(areas);
        self
    }

    #[must_use]
    pub fn with_crosshair(mut self, crosshair: Option<&'a CrosshairOverlay>) -> Self {
        self.crosshair = crosshair;
        self
    }

    #[must_use]
    pub fn with_work_points(mut self, work_points: &'a [WorkPoint]) -> Self {
        self.work_points = work_points;
        self
    }
}

/// Turns a viewport snapshot plus data into axis ticks, canvas geometry and
/// render frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBuilder {
    config: SceneConfig,
    style: RenderStyle,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig, style: RenderStyle) -> ChartResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn set_hit_test(&mut self, hit_test: HitTest) {
        self.config.hit_test = hit_test;
    }

    pub fn set_x_grid_size_px(&mut self, grid_size_px: f64) -> ChartResult<()> {
        validate_x_grid_size_px(grid_size_px)?;
        self.config.x_grid_size_px = grid_size_px;
        Ok(())
    }

    /// Lays out one frame.
    ///
    /// `segments` are in data space: `x` in distance units and `y` in days
    /// since the axis origin of `date_range` (see `axis_origin`).
    #[must_use]
    pub fn compute_frame(
        &self,
        viewport: &ViewportState,
        date_range: DateRange,
        segments: &[Segment],
    ) -> FrameLayout {
        let mode = date_range.axis_mode();

        let x_ticks = generate_x_axis_ticks(&XAxisInput {
            grid_size_px: self.config.x_grid_size_px,
            out_x_offset_px: viewport.insets.left,
            x_offset_px: viewport.offset_x,
            one_px_value_x: viewport.one_px_value_x,
            canvas_width: viewport.canvas_width,
        });

        let y_axis = generate_y_axis(
            &YAxisInput {
                canvas_width: viewport.canvas_width,
                canvas_height: viewport.canvas_height,
                out_x_offset_px: viewport.insets.left,
                bottom_inset_px: viewport.insets.bottom,
                y_offset_px: viewport.offset_y,
                one_px_value_y: viewport.one_px_value_y,
            },
            date_range,
            mode,
        );

        let segments_in_canvas_space: Vec<Segment> = segments
            .iter()
            .map(|segment| segment.map_points(|point| viewport.data_to_canvas(point)))
            .collect();
        let conflicts = detect_conflicts(&segments_in_canvas_space);

        trace!(
            ?mode,
            x_ticks = x_ticks.len(),
            segments = segments_in_canvas_space.len(),
            conflicts = conflicts.len(),
            "computed frame layout"
        );

        FrameLayout {
            mode,
            x_ticks,
            y_axis,
            segments_in_canvas_space,
            conflicts,
        }
    }

    /// Maps data-space areas to the canvas and scans them against
    /// canvas-space segments.
    #[must_use]
    pub fn compute_areas(
        &self,
        viewport: &ViewportState,
        areas: &[Rect],
        canvas_segments: &[Segment],
    ) -> AreaLayer {
        let areas_in_canvas_space: Vec<Rect> = areas
            .iter()
            .map(|area| area.map_corners(|point| viewport.data_to_canvas(point)))
            .collect();
        let conflicts = detect_area_conflicts(&areas_in_canvas_space, canvas_segments);
        AreaLayer {
            areas_in_canvas_space,
            conflicts,
        }
    }

    /// Crosshair for a hover point, `None` outside the plot area.
    #[must_use]
    pub fn crosshair(
        &self,
        viewport: &ViewportState,
        origin: NaiveDate,
        point: Point,
        canvas_segments: &[Segment],
    ) -> Option<CrosshairOverlay> {
        if !point.is_finite() || !viewport.is_inside_plot(point) {
            return None;
        }

        let plot_bottom = viewport.canvas_height - viewport.insets.bottom;
        let data_point = viewport.canvas_to_data(point);
        let hovered = canvas_segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| self.config.hit_test.hits(point, segment))
            .map(|(index, _)| index)
            .collect();

        Some(CrosshairOverlay {
            point,
            data_point,
            horizontal: Segment::new(viewport.insets.left, point.y, point.x, point.y),
            vertical: Segment::new(point.x, point.y, point.x, plot_bottom),
            milepost_label: format_dk_value(data_point.x),
            date_label: date_at_offset(origin, data_point.y).map(format_iso_date),
            hovered,
        })
    }

    /// Styles every layer into a frame for a `Renderer`.
    #[must_use]
    pub fn build_render_frame(
        &self,
        viewport: &ViewportState,
        layers: SceneLayers<'_>,
    ) -> RenderFrame {
        let style = &self.style;
        let width = viewport.canvas_width;
        let height = viewport.canvas_height;
        let insets = viewport.insets;
        let plot_top = insets.top;
        let plot_bottom = height - insets.bottom;
        let frame_viewport = Viewport::new(width.round() as u32, height.round() as u32);
        let layout = layers.layout;

        let mut frame = RenderFrame::new(frame_viewport).with_rect(RectPrimitive::new(
            0.0,
            0.0,
            width,
            height,
            style.background_color,
        ));

        if let Some(areas) = layers.areas {
            for area in &areas.areas_in_canvas_space {
                let rect = RectPrimitive::new(
                    area.x,
                    area.y,
                    area.width,
                    area.height,
                    style.area_fill_color,
                )
                .with_border(style.area_border_width, style.area_border_color);
                if rect.validate().is_ok() {
                    frame.rects.push(rect);
                }
            }
        }

        frame.rects.push(RectPrimitive::new(
            0.0,
            0.0,
            insets.left,
            height,
            style.gutter_background_color,
        ));
        frame.rects.push(RectPrimitive::new(
            0.0,
            plot_bottom,
            width,
            insets.bottom,
            style.gutter_background_color,
        ));

        self.push_x_axis(&mut frame, layout, plot_top, plot_bottom);
        self.push_y_axis(&mut frame, &layout.y_axis, width, plot_top, plot_bottom);

        for separator_x in style.gutter_separators_px {
            frame.lines.push(LinePrimitive::new(
                separator_x,
                plot_top,
                separator_x,
                plot_bottom,
                style.axis_line_width,
                style.axis_line_color,
            ));
        }
        let baseline = layout.y_axis.baseline_px;
        if (0.0..=height).contains(&baseline) {
            frame.lines.push(LinePrimitive::new(
                0.0,
                baseline,
                width,
                baseline,
                style.axis_line_width,
                style.axis_line_color,
            ));
        }

        let default_segment_style = SegmentStyle {
            color: style.work_item_color,
            width: style.work_item_width,
            dashed: false,
        };
        for (index, segment) in layout.segments_in_canvas_space.iter().enumerate() {
            match segment_line(segment, segment.style.unwrap_or(default_segment_style)) {
                Some(line) => frame.lines.push(line),
                None => warn!(index, "skipping work segment with invalid geometry or style"),
            }
        }

        let markers = place_conflict_markers(&layout.conflicts, viewport, &self.config.markers);
        frame.rects.extend(marker_primitives(
            &markers,
            &self.config.markers,
            style.conflict_marker,
        ));
        if let Some(areas) = layers.areas {
            let r = self.config.markers.radius_px;
            for conflict in &areas.conflicts {
                if is_marker_visible(conflict.point, viewport, r) {
                    frame.rects.push(
                        RectPrimitive::new(
                            conflict.point.x - r,
                            conflict.point.y - r,
                            2.0 * r,
                            2.0 * r,
                            style.conflict_marker.border_color,
                        )
                        .with_corner_radius(r),
                    );
                }
            }
        }

        if let Some(crosshair) = layers.crosshair {
            self.push_crosshair(&mut frame, layout, crosshair, plot_bottom);
            if let Some(marker) = hovered_marker(&markers, crosshair.point) {
                let tooltip = tooltip_primitives(
                    &tooltip_geometry(marker.point, &self.config.markers),
                    style.conflict_marker,
                );
                frame.rects.push(tooltip.body);
                frame.lines.extend(tooltip.arrow);
                frame.texts.push(tooltip.label);
            }
        }

        if !layers.work_points.is_empty() {
            let labels = layout_work_point_labels(layers.work_points, viewport);
            frame.extend(work_point_strip_frame(
                &labels,
                viewport,
                style.work_point_strip,
                frame_viewport,
            ));
        }

        frame
    }

    fn push_x_axis(
        &self,
        frame: &mut RenderFrame,
        layout: &FrameLayout,
        plot_top: f64,
        plot_bottom: f64,
    ) {
        let style = &self.style;
        for tick in &layout.x_ticks {
            frame.lines.push(LinePrimitive::new(
                tick.position_px,
                plot_top,
                tick.position_px,
                plot_bottom,
                style.grid_line_width,
                style.grid_line_color,
            ));
            if !tick.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    tick.position_px,
                    plot_bottom + 4.0,
                    style.axis_label_font_size_px,
                    style.axis_label_color,
                    TextHAlign::Center,
                ));
            }
        }
    }

    fn push_y_axis(
        &self,
        frame: &mut RenderFrame,
        y_axis: &YAxisLayout,
        width: f64,
        plot_top: f64,
        plot_bottom: f64,
    ) {
        let style = &self.style;
        let font = style.axis_label_font_size_px;
        let in_plot = |y: f64| y >= plot_top && y <= plot_bottom;
        let [year_separator, period_separator] = style.gutter_separators_px;

        for tick in &y_axis.period_ticks {
            if in_plot(tick.position_px) {
                frame.lines.push(LinePrimitive::new(
                    year_separator,
                    tick.position_px,
                    width,
                    tick.position_px,
                    style.grid_line_width,
                    style.grid_line_color,
                ));
            }
            let label_center = tick.position_px + tick.band_px / 2.0;
            if in_plot(label_center) && !tick.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    (year_separator + period_separator) / 2.0,
                    label_center - font / 2.0,
                    font,
                    style.axis_label_color,
                    TextHAlign::Center,
                ));
            }
        }

        let (year_left, year_right) = y_axis.year_gutter;
        for tick in &y_axis.year_ticks {
            if in_plot(tick.position_px) {
                frame.lines.push(LinePrimitive::new(
                    year_left,
                    tick.position_px,
                    width,
                    tick.position_px,
                    style.grid_line_width,
                    style.year_line_color,
                ));
            }
            let label_center = tick.position_px + tick.band_px / 2.0;
            if in_plot(label_center) && !tick.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    (year_left + year_right) / 2.0,
                    label_center - font / 2.0,
                    font,
                    style.year_label_color,
                    TextHAlign::Center,
                ));
            }
        }
    }

    fn push_crosshair(
        &self,
        frame: &mut RenderFrame,
        layout: &FrameLayout,
        crosshair: &CrosshairOverlay,
        plot_bottom: f64,
    ) {
        let style = &self.style;

        for &index in &crosshair.hovered {
            let Some(segment) = layout.segments_in_canvas_space.get(index) else {
                continue;
            };
            let highlight = SegmentStyle {
                color: style.hover_highlight_color,
                width: segment.style.map_or(style.work_item_width, |s| s.width) + 2.0,
                dashed: false,
            };
            if let Some(line) = segment_line(segment, highlight) {
                frame.lines.push(line);
            }
        }

        for guide in [crosshair.horizontal, crosshair.vertical] {
            frame.lines.push(
                LinePrimitive::new(
                    guide.x1,
                    guide.y1,
                    guide.x2,
                    guide.y2,
                    style.crosshair_line_width,
                    style.crosshair_line_color,
                )
                .with_stroke_style(LineStrokeStyle::DEFAULT_DASH),
            );
        }

        let font = style.crosshair_label_font_size_px;
        let box_height = font + 4.0;
        if let Some(label) = &crosshair.milepost_label {
            let box_width = label.chars().count() as f64 * font * 0.6 + 8.0;
            frame.rects.push(RectPrimitive::new(
                crosshair.point.x - box_width / 2.0,
                plot_bottom,
                box_width,
                box_height,
                style.crosshair_label_box_color,
            ));
            frame.texts.push(TextPrimitive::new(
                label.clone(),
                crosshair.point.x,
                plot_bottom + 2.0,
                font,
                style.crosshair_label_color,
                TextHAlign::Center,
            ));
        }
        if let Some(label) = &crosshair.date_label {
            let gutter = crosshair.horizontal.x1;
            frame.rects.push(RectPrimitive::new(
                0.0,
                crosshair.point.y - box_height / 2.0,
                gutter,
                box_height,
                style.crosshair_label_box_color,
            ));
            frame.texts.push(TextPrimitive::new(
                label.clone(),
                gutter / 2.0,
                crosshair.point.y - font / 2.0,
                font,
                style.crosshair_label_color,
                TextHAlign::Center,
            ));
        }
    }
}

fn segment_line(segment: &Segment, style: SegmentStyle) -> Option<LinePrimitive> {
    let stroke_style = if style.dashed {
        LineStrokeStyle::DEFAULT_DASH
    } else {
        LineStrokeStyle::Solid
    };
    let line = LinePrimitive::new(
        segment.x1,
        segment.y1,
        segment.x2,
        segment.y2,
        style.width,
        style.color,
    )
    .with_stroke_style(stroke_style);
    line.validate().is_ok().then_some(line)
}
