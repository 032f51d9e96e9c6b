pub mod axis_mode;
pub mod calendar;
pub mod geometry;
pub mod milepost;
pub mod types;
pub mod viewport;
pub mod work_item;
pub mod x_axis;
pub mod y_axis;

pub use axis_mode::{AxisMode, DateRange, select_axis_mode};
pub use geometry::{
    AreaConflict, BoundingBox, ConflictPoint, HitTest, Rect, SLOPE_TOLERANCE,
    detect_area_conflicts, detect_conflicts, distance_to_segment, intersect, point_near_line,
};
pub use milepost::{format_dk, format_dk_value, parse_dk};
pub use types::{AxisTick, Point, Segment, SegmentStyle, Viewport};
pub use viewport::{
    DataExtent, PanMargins, PanPolicy, PlotInsets, ViewportState, ViewportTransform, ZoomLimits,
};
pub use work_item::{WorkItem, WorkItemSet};
pub use x_axis::{MAX_X_TICKS, MIN_X_GRID_SIZE_PX, XAxisInput, generate_x_axis_ticks};
pub use y_axis::{
    PeriodStrategy, YAxisInput, YAxisLayout, axis_origin, date_at_offset, generate_y_axis,
    period_strategy,
};
