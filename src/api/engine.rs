use chrono::NaiveDate;
use tracing::{debug, trace, warn};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use crate::core::{
    AxisMode, DateRange, HitTest, PanPolicy, Point, Rect, Segment, ViewportState,
    ViewportTransform, WorkItem, WorkItemSet, YAxisInput, axis_origin, generate_y_axis,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::WorkPoint;
use crate::interaction::{InteractionState, PointerMove};
use crate::render::{RenderFrame, Renderer};

use super::{
    AreaLayer, CrosshairOverlay, EngineConfig, FrameLayout, RenderStyle, SceneBuilder,
    SceneConfig, SceneLayers,
};

/// Main orchestration facade consumed by host applications.
///
/// Owns the viewport transform, pointer state and diagram data; every input
/// event updates the viewport first, and the next frame is computed from the
/// updated snapshot.
pub struct TimeLocationEngine<R: Renderer> {
    renderer: R,
    config: EngineConfig,
    transform: ViewportTransform,
    interaction: InteractionState,
    scene: SceneBuilder,
    date_range: Option<DateRange>,
    work_items: WorkItemSet,
    areas: Vec<Rect>,
    work_points: Vec<WorkPoint>,
}

impl<R: Renderer> TimeLocationEngine<R> {
    pub fn new(renderer: R, config: EngineConfig) -> ChartResult<Self> {
        let transform = config.viewport_transform()?;
        let scene = SceneBuilder::new(
            SceneConfig::from_engine_config(&config),
            RenderStyle::default(),
        )?;

        let mut engine = Self {
            renderer,
            config,
            transform,
            interaction: InteractionState::default(),
            scene,
            date_range: None,
            work_items: WorkItemSet::new(),
            areas: Vec::new(),
            work_points: Vec::new(),
        };
        if let Some(range) = config.date_range {
            engine.set_date_range(range)?;
        }
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Switches the diagram to a new time window.
    ///
    /// Picks the axis mode, applies its default vertical scale unless the
    /// config pins one, bounds vertical panning to the generated bands and
    /// resets the pan offsets.
    pub fn set_date_range(&mut self, range: DateRange) -> ChartResult<()> {
        let mode = range.axis_mode();
        let one_px_value_y = self
            .config
            .one_px_value_y
            .unwrap_or_else(|| mode.default_one_px_value_y());
        self.transform.set_one_px_value_y(one_px_value_y)?;

        let state = self.transform.state();
        let layout = generate_y_axis(
            &YAxisInput {
                canvas_width: state.canvas_width,
                canvas_height: state.canvas_height,
                out_x_offset_px: state.insets.left,
                bottom_inset_px: state.insets.bottom,
                y_offset_px: 0.0,
                one_px_value_y,
            },
            range,
            mode,
        );
        self.transform
            .set_y_range(f64::from(layout.span_days.max(1)))?;
        self.transform.reset_offsets();
        self.date_range = Some(range);

        debug!(
            start = %range.start,
            end = %range.end,
            ?mode,
            one_px_value_y,
            span_days = layout.span_days,
            "date range changed"
        );
        Ok(())
    }

    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    #[must_use]
    pub fn axis_mode(&self) -> Option<AxisMode> {
        self.date_range.map(DateRange::axis_mode)
    }

    /// Date at data-space `y == 0`.
    #[must_use]
    pub fn axis_origin(&self) -> Option<NaiveDate> {
        self.date_range
            .map(|range| axis_origin(range, range.axis_mode()))
    }

    /// Replaces all work items. Nothing changes if any item is invalid.
    pub fn set_work_items(&mut self, items: impl IntoIterator<Item = WorkItem>) -> ChartResult<()> {
        let mut set = WorkItemSet::new();
        for item in items {
            set.upsert(item)?;
        }
        debug!(count = set.len(), "work items replaced");
        self.work_items = set;
        Ok(())
    }

    pub fn upsert_work_item(&mut self, item: WorkItem) -> ChartResult<Option<WorkItem>> {
        self.work_items.upsert(item)
    }

    pub fn remove_work_item(&mut self, id: &str) -> Option<WorkItem> {
        self.work_items.remove(id)
    }

    #[must_use]
    pub fn work_items(&self) -> &WorkItemSet {
        &self.work_items
    }

    pub fn set_areas(&mut self, areas: Vec<Rect>) -> ChartResult<()> {
        for area in &areas {
            if !area.x.is_finite()
                || !area.y.is_finite()
                || !area.width.is_finite()
                || !area.height.is_finite()
                || area.width < 0.0
                || area.height < 0.0
            {
                return Err(ChartError::InvalidData(
                    "area must be finite with non-negative size".to_owned(),
                ));
            }
        }
        self.areas = areas;
        Ok(())
    }

    #[must_use]
    pub fn areas(&self) -> &[Rect] {
        &self.areas
    }

    pub fn set_work_points(&mut self, work_points: Vec<WorkPoint>) -> ChartResult<()> {
        for point in &work_points {
            point.validate()?;
        }
        self.work_points = work_points;
        Ok(())
    }

    #[must_use]
    pub fn work_points(&self) -> &[WorkPoint] {
        &self.work_points
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.scene.style()
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.scene.set_style(style)
    }

    pub fn set_hit_test(&mut self, hit_test: HitTest) {
        self.config.hit_test = hit_test;
        self.scene.set_hit_test(hit_test);
    }

    pub fn set_pan_policy(&mut self, policy: PanPolicy) {
        self.config.pan_policy = policy;
        self.transform.set_pan_policy(policy);
    }

    /// Snapshot of the current viewport.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.transform.state()
    }

    #[must_use]
    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        self.transform.resize(f64::from(width), f64::from(height))?;
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        Ok(())
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        if !point.is_finite() {
            warn!("ignoring pointer down with non-finite coordinates");
            return;
        }
        self.interaction.on_pointer_down(point);
        trace!(x = point.x, y = point.y, "drag started");
    }

    /// Returns whether the frame needs a redraw.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            warn!("ignoring pointer move with non-finite coordinates");
            return false;
        }
        match self.interaction.on_pointer_move(point) {
            PointerMove::Drag { dx, dy } => self.transform.pan(dx, dy),
            PointerMove::Hover(_) => true,
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.interaction.on_pointer_up();
        trace!("drag ended");
    }

    pub fn on_pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        trace!("pointer left canvas");
    }

    /// Horizontal zoom. The pointer position does not anchor the zoom.
    pub fn on_wheel(&mut self, delta_y: f64, point: Point) -> bool {
        let zoomed = self.transform.zoom(delta_y);
        trace!(delta_y, x = point.x, y = point.y, zoomed, "wheel");
        zoomed
    }

    /// Work items as data-space segments relative to the axis origin.
    pub fn data_segments(&self) -> ChartResult<Vec<Segment>> {
        let origin = self.require_origin()?;
        Ok(self.work_items.to_segments(origin))
    }

    pub fn compute_frame(&self) -> ChartResult<FrameLayout> {
        let range = self.require_date_range()?;
        let segments = self.data_segments()?;
        Ok(self
            .scene
            .compute_frame(&self.transform.state(), range, &segments))
    }

    pub fn compute_areas(&self, layout: &FrameLayout) -> AreaLayer {
        self.scene.compute_areas(
            &self.transform.state(),
            &self.areas,
            &layout.segments_in_canvas_space,
        )
    }

    /// Crosshair at the last hover point, if any.
    pub fn crosshair(&self, layout: &FrameLayout) -> Option<CrosshairOverlay> {
        let point = self.interaction.crosshair()?;
        self.scene.crosshair(
            &self.transform.state(),
            layout.y_axis.origin,
            point,
            &layout.segments_in_canvas_space,
        )
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let layout = self.compute_frame()?;
        let areas = self.compute_areas(&layout);
        let crosshair = self.crosshair(&layout);
        let layers = SceneLayers::new(&layout)
            .with_areas(&areas)
            .with_crosshair(crosshair.as_ref())
            .with_work_points(&self.work_points);
        Ok(self
            .scene
            .build_render_frame(&self.transform.state(), layers))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders into an external cairo context, e.g. a widget draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn require_date_range(&self) -> ChartResult<DateRange> {
        self.date_range
            .ok_or_else(|| ChartError::InvalidData("date range is not set".to_owned()))
    }

    fn require_origin(&self) -> ChartResult<NaiveDate> {
        let range = self.require_date_range()?;
        Ok(axis_origin(range, range.axis_mode()))
    }
}
