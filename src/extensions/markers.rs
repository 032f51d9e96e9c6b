use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ConflictPoint, Point, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

pub const CONFLICT_TOOLTIP_TEXT: &str = "冲突点";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacementConfig {
    /// Radius used by the visibility rule and the drawn dot.
    pub radius_px: f64,
    /// Square hover target centred on the conflict point.
    pub icon_size_px: f64,
    pub tooltip_text: String,
    pub tooltip_font_size_px: f64,
    pub tooltip_arrow_px: f64,
    pub tooltip_corner_radius_px: f64,
}

impl Default for MarkerPlacementConfig {
    fn default() -> Self {
        Self {
            radius_px: 5.0,
            icon_size_px: 20.0,
            tooltip_text: CONFLICT_TOOLTIP_TEXT.to_owned(),
            tooltip_font_size_px: 10.0,
            tooltip_arrow_px: 5.0,
            tooltip_corner_radius_px: 5.0,
        }
    }
}

impl MarkerPlacementConfig {
    pub fn validate(&self) -> ChartResult<()> {
        for (value, name) in [
            (self.radius_px, "radius_px"),
            (self.icon_size_px, "icon_size_px"),
            (self.tooltip_font_size_px, "tooltip_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker config `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.tooltip_arrow_px, "tooltip_arrow_px"),
            (self.tooltip_corner_radius_px, "tooltip_corner_radius_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker config `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.tooltip_text.is_empty() {
            return Err(ChartError::InvalidData(
                "marker tooltip text must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub tooltip_fill_color: Color,
    pub tooltip_text_color: Color,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::from_rgb8(0xfe, 0xd9, 0x28),
            border_color: Color::rgb(1.0, 0.0, 0.0),
            border_width: 1.5,
            tooltip_fill_color: Color::rgb(1.0, 0.0, 0.0),
            tooltip_text_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

/// Rounded tooltip box above an anchor, with an arrow pointing down at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipGeometry {
    pub anchor: Point,
    pub text: String,
    pub left_px: f64,
    pub top_px: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub arrow_px: f64,
    pub corner_radius_px: f64,
    pub font_size_px: f64,
    /// Top of the label, vertically centred in the box.
    pub text_top_px: f64,
}

/// Sizes the tooltip from the character count: `chars * font + 20` wide and
/// `font + 10` tall, sitting `arrow_px` above the anchor.
#[must_use]
pub fn tooltip_geometry(anchor: Point, config: &MarkerPlacementConfig) -> TooltipGeometry {
    let font = config.tooltip_font_size_px;
    let chars = config.tooltip_text.chars().count() as f64;
    let width_px = chars * font + 20.0;
    let height_px = font + 10.0;
    let top_px = anchor.y - config.tooltip_arrow_px - height_px;
    TooltipGeometry {
        anchor,
        text: config.tooltip_text.clone(),
        left_px: anchor.x - width_px / 2.0,
        top_px,
        width_px,
        height_px,
        arrow_px: config.tooltip_arrow_px,
        corner_radius_px: config.tooltip_corner_radius_px,
        font_size_px: font,
        text_top_px: top_px + (height_px - font) / 2.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub point: Point,
    pub first: usize,
    pub second: usize,
    pub icon_left_px: f64,
    pub icon_top_px: f64,
    pub icon_size_px: f64,
}

impl PlacedMarker {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.icon_left_px
            && point.x <= self.icon_left_px + self.icon_size_px
            && point.y >= self.icon_top_px
            && point.y <= self.icon_top_px + self.icon_size_px
    }
}

/// Markers are hidden over the gutters and within `2 * radius` of the right
/// and bottom plot edges.
#[must_use]
pub fn is_marker_visible(point: Point, viewport: &ViewportState, radius_px: f64) -> bool {
    let insets = viewport.insets;
    point.x > insets.left
        && point.y > insets.top
        && point.x < viewport.canvas_width - 2.0 * radius_px
        && point.y < viewport.canvas_height - insets.bottom - 2.0 * radius_px
}

/// Places one marker per visible canvas-space conflict.
///
/// Output order is stable by x, then y, then segment indices, independent of
/// the scan order.
#[must_use]
pub fn place_conflict_markers(
    conflicts: &[ConflictPoint],
    viewport: &ViewportState,
    config: &MarkerPlacementConfig,
) -> Vec<PlacedMarker> {
    let half = config.icon_size_px / 2.0;
    let mut placed: Vec<PlacedMarker> = conflicts
        .iter()
        .filter(|conflict| {
            conflict.point.is_finite()
                && is_marker_visible(conflict.point, viewport, config.radius_px)
        })
        .map(|conflict| PlacedMarker {
            point: conflict.point,
            first: conflict.first,
            second: conflict.second,
            icon_left_px: conflict.point.x - half,
            icon_top_px: conflict.point.y - half,
            icon_size_px: config.icon_size_px,
        })
        .collect();

    placed.sort_by(|a, b| {
        OrderedFloat(a.point.x)
            .cmp(&OrderedFloat(b.point.x))
            .then_with(|| OrderedFloat(a.point.y).cmp(&OrderedFloat(b.point.y)))
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });
    placed
}

/// Topmost marker under the pointer; later markers draw above earlier ones.
#[must_use]
pub fn hovered_marker(markers: &[PlacedMarker], pointer: Point) -> Option<&PlacedMarker> {
    markers.iter().rev().find(|marker| marker.contains(pointer))
}

#[must_use]
pub fn marker_primitives(
    markers: &[PlacedMarker],
    config: &MarkerPlacementConfig,
    style: MarkerStyle,
) -> Vec<RectPrimitive> {
    let r = config.radius_px;
    markers
        .iter()
        .map(|marker| {
            RectPrimitive::new(
                marker.point.x - r,
                marker.point.y - r,
                2.0 * r,
                2.0 * r,
                style.fill_color,
            )
            .with_border(style.border_width, style.border_color)
            .with_corner_radius(r)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPrimitives {
    pub body: RectPrimitive,
    pub arrow: [LinePrimitive; 2],
    pub label: TextPrimitive,
}

#[must_use]
pub fn tooltip_primitives(tooltip: &TooltipGeometry, style: MarkerStyle) -> TooltipPrimitives {
    let anchor = tooltip.anchor;
    let arrow_base_y = tooltip.top_px + tooltip.height_px;
    let arrow = [
        LinePrimitive::new(
            anchor.x,
            anchor.y,
            anchor.x - tooltip.arrow_px,
            arrow_base_y,
            1.0,
            style.tooltip_fill_color,
        ),
        LinePrimitive::new(
            anchor.x,
            anchor.y,
            anchor.x + tooltip.arrow_px,
            arrow_base_y,
            1.0,
            style.tooltip_fill_color,
        ),
    ];
    TooltipPrimitives {
        body: RectPrimitive::new(
            tooltip.left_px,
            tooltip.top_px,
            tooltip.width_px,
            tooltip.height_px,
            style.tooltip_fill_color,
        )
        .with_corner_radius(tooltip.corner_radius_px),
        arrow,
        label: TextPrimitive::new(
            tooltip.text.clone(),
            anchor.x,
            tooltip.text_top_px,
            tooltip.font_size_px,
            style.tooltip_text_color,
            TextHAlign::Center,
        ),
    }
}
