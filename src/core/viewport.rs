use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// Plot gutters reserved around the data area, in pixels.
///
/// `left` holds the calendar axis, `bottom` the milepost labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub left: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 50.0,
            bottom: 20.0,
            top: 0.0,
        }
    }
}

/// Pan/zoom state of one diagram.
///
/// Offsets are in pixels; `offset * one_px_value` is the data-space shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub one_px_value_x: f64,
    pub one_px_value_y: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub insets: PlotInsets,
}

impl ViewportState {
    #[must_use]
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            one_px_value_x: 1.0,
            one_px_value_y: 1.0,
            canvas_width,
            canvas_height,
            insets: PlotInsets::default(),
        }
    }

    /// Canvas pixel -> data units.
    #[must_use]
    pub fn canvas_to_data(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.insets.left + self.offset_x) * self.one_px_value_x,
            (self.canvas_height - self.insets.bottom - point.y + self.offset_y)
                * self.one_px_value_y,
        )
    }

    /// Data units -> canvas pixel. Data `y` grows upward, canvas `y` downward.
    #[must_use]
    pub fn data_to_canvas(&self, point: Point) -> Point {
        Point::new(
            point.x / self.one_px_value_x - self.offset_x + self.insets.left,
            self.canvas_height - self.insets.bottom - point.y / self.one_px_value_y
                + self.offset_y,
        )
    }

    /// Whether `point` lies inside the plot area (gutters excluded).
    #[must_use]
    pub fn is_inside_plot(&self, point: Point) -> bool {
        point.x > self.insets.left
            && point.x < self.canvas_width
            && point.y > self.insets.top
            && point.y < self.canvas_height - self.insets.bottom
    }

    #[must_use]
    pub fn is_inside_canvas(&self, point: Point) -> bool {
        point.x > 0.0
            && point.x < self.canvas_width
            && point.y > 0.0
            && point.y < self.canvas_height
    }
}

/// Maximum data values on each axis: distance units and days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataExtent {
    pub x_range: f64,
    pub y_range: f64,
}

impl Default for DataExtent {
    fn default() -> Self {
        Self {
            x_range: 1000.0,
            y_range: 730.0,
        }
    }
}

/// How `ViewportTransform::pan` treats offsets that leave the data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanPolicy {
    /// Each axis only moves while the visible window stays inside
    /// `[0, range + margin]`.
    #[default]
    Clamped,
    /// Every pan is accepted.
    Free,
}

/// Slack past the data range that a clamped pan may reveal, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanMargins {
    pub x: f64,
    pub y: f64,
}

impl Default for PanMargins {
    fn default() -> Self {
        Self { x: 60.0, y: 50.0 }
    }
}

/// Wheel zoom step and upper bound for `one_px_value_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub step: f64,
    pub max_one_px_value: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 1.0,
            max_one_px_value: 100.0,
        }
    }
}

/// Sole owner of `ViewportState`; every mutation goes through here.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    state: ViewportState,
    extent: DataExtent,
    pan_policy: PanPolicy,
    pan_margins: PanMargins,
    zoom_limits: ZoomLimits,
}

impl ViewportTransform {
    pub fn new(state: ViewportState, extent: DataExtent) -> ChartResult<Self> {
        if !state.canvas_width.is_finite()
            || !state.canvas_height.is_finite()
            || state.canvas_width <= 0.0
            || state.canvas_height <= 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: state.canvas_width.max(0.0) as u32,
                height: state.canvas_height.max(0.0) as u32,
            });
        }
        for (value, name) in [
            (state.one_px_value_x, "one_px_value_x"),
            (state.one_px_value_y, "one_px_value_y"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "viewport `{name}` must be finite and > 0"
                )));
            }
        }
        if !state.offset_x.is_finite() || !state.offset_y.is_finite() {
            return Err(ChartError::InvalidData(
                "viewport offsets must be finite".to_owned(),
            ));
        }
        if !extent.x_range.is_finite()
            || !extent.y_range.is_finite()
            || extent.x_range <= 0.0
            || extent.y_range <= 0.0
        {
            return Err(ChartError::InvalidData(
                "data extent must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            state,
            extent,
            pan_policy: PanPolicy::default(),
            pan_margins: PanMargins::default(),
            zoom_limits: ZoomLimits::default(),
        })
    }

    #[must_use]
    pub fn with_pan_policy(mut self, policy: PanPolicy) -> Self {
        self.pan_policy = policy;
        self
    }

    #[must_use]
    pub fn with_pan_margins(mut self, margins: PanMargins) -> Self {
        self.pan_margins = margins;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, limits: ZoomLimits) -> Self {
        self.zoom_limits = limits;
        self
    }

    /// Read-only snapshot for one frame.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn extent(&self) -> DataExtent {
        self.extent
    }

    #[must_use]
    pub fn pan_policy(&self) -> PanPolicy {
        self.pan_policy
    }

    pub fn set_pan_policy(&mut self, policy: PanPolicy) {
        self.pan_policy = policy;
    }

    /// Moves the view by a pointer delta in pixels.
    ///
    /// Dragging right reveals smaller distances, dragging down reveals later
    /// dates. Under `PanPolicy::Clamped` each axis is accepted on its own.
    /// Returns whether any axis moved.
    pub fn pan(&mut self, dx_px: f64, dy_px: f64) -> bool {
        if !dx_px.is_finite() || !dy_px.is_finite() {
            return false;
        }

        let proposed_x = self.state.offset_x - dx_px;
        let proposed_y = self.state.offset_y + dy_px;

        let (accept_x, accept_y) = match self.pan_policy {
            PanPolicy::Free => (true, true),
            PanPolicy::Clamped => (
                offset_within_range(
                    proposed_x,
                    self.state.canvas_width,
                    self.state.one_px_value_x,
                    self.extent.x_range,
                    self.pan_margins.x,
                ),
                offset_within_range(
                    proposed_y,
                    self.state.canvas_height,
                    self.state.one_px_value_y,
                    self.extent.y_range,
                    self.pan_margins.y,
                ),
            ),
        };

        let moved_x = accept_x && proposed_x != self.state.offset_x;
        let moved_y = accept_y && proposed_y != self.state.offset_y;
        if accept_x {
            self.state.offset_x = proposed_x;
        }
        if accept_y {
            self.state.offset_y = proposed_y;
        }

        if moved_x || moved_y {
            trace!(
                offset_x = self.state.offset_x,
                offset_y = self.state.offset_y,
                "viewport panned"
            );
        } else {
            trace!(dx_px, dy_px, "pan rejected by range clamp");
        }
        moved_x || moved_y
    }

    /// Steps the horizontal scale. `delta_y > 0` zooms out, `< 0` zooms in,
    /// `0` does nothing. Out-of-bounds results are ignored.
    pub fn zoom(&mut self, delta_y: f64) -> bool {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return false;
        }

        let step = if delta_y > 0.0 {
            self.zoom_limits.step
        } else {
            -self.zoom_limits.step
        };
        let proposed = self.state.one_px_value_x + step;
        if proposed <= 0.0 || proposed > self.zoom_limits.max_one_px_value {
            trace!(proposed, "zoom rejected by scale bounds");
            return false;
        }

        self.state.one_px_value_x = proposed;
        debug!(one_px_value_x = proposed, "horizontal scale changed");
        true
    }

    /// Replaces the vertical scale (days per pixel).
    pub fn set_one_px_value_y(&mut self, value: f64) -> ChartResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(
                "one_px_value_y must be finite and > 0".to_owned(),
            ));
        }
        self.state.one_px_value_y = value;
        Ok(())
    }

    pub fn set_y_range(&mut self, y_range: f64) -> ChartResult<()> {
        if !y_range.is_finite() || y_range <= 0.0 {
            return Err(ChartError::InvalidData(
                "y range must be finite and > 0".to_owned(),
            ));
        }
        self.extent.y_range = y_range;
        Ok(())
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) -> ChartResult<()> {
        if !canvas_width.is_finite()
            || !canvas_height.is_finite()
            || canvas_width <= 0.0
            || canvas_height <= 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: canvas_width.max(0.0) as u32,
                height: canvas_height.max(0.0) as u32,
            });
        }
        self.state.canvas_width = canvas_width;
        self.state.canvas_height = canvas_height;
        debug!(canvas_width, canvas_height, "viewport resized");
        Ok(())
    }

    pub fn reset_offsets(&mut self) {
        self.state.offset_x = 0.0;
        self.state.offset_y = 0.0;
    }

    #[must_use]
    pub fn canvas_to_data(&self, point: Point) -> Point {
        self.state.canvas_to_data(point)
    }

    #[must_use]
    pub fn data_to_canvas(&self, point: Point) -> Point {
        self.state.data_to_canvas(point)
    }
}

fn offset_within_range(
    offset_px: f64,
    canvas_extent_px: f64,
    one_px_value: f64,
    range: f64,
    margin: f64,
) -> bool {
    let offset_value = offset_px * one_px_value;
    offset_value >= 0.0
        && offset_value < range
        && (offset_px + canvas_extent_px) * one_px_value <= range + margin
}
