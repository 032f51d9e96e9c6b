//! Optional overlays drawn on top of the core diagram.
//!
//! Extensions only read core types; the scene builder decides when to call
//! them.

pub mod markers;
pub mod work_points;

pub use markers::{
    CONFLICT_TOOLTIP_TEXT, MarkerPlacementConfig, MarkerStyle, PlacedMarker, TooltipGeometry,
    TooltipPrimitives, hovered_marker, is_marker_visible, marker_primitives,
    place_conflict_markers, tooltip_geometry, tooltip_primitives,
};
pub use work_points::{
    WorkPoint, WorkPointLabel, WorkPointLabelKind, WorkPointStripStyle, layout_work_point_labels,
    work_point_strip_frame,
};
