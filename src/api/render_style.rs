use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::extensions::{MarkerStyle, WorkPointStripStyle};
use crate::render::Color;

/// Style contract for every frame the scene builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background_color: Color,
    pub gutter_background_color: Color,
    pub grid_line_color: Color,
    pub year_line_color: Color,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub year_label_color: Color,
    pub grid_line_width: f64,
    pub axis_line_width: f64,
    pub axis_label_font_size_px: f64,
    /// X positions of the gutter separator lines (year | period | plot).
    pub gutter_separators_px: [f64; 2],
    /// Applied to segments without their own style.
    pub work_item_color: Color,
    pub work_item_width: f64,
    pub hover_highlight_color: Color,
    pub crosshair_line_color: Color,
    pub crosshair_line_width: f64,
    pub crosshair_label_color: Color,
    pub crosshair_label_box_color: Color,
    pub crosshair_label_font_size_px: f64,
    pub area_fill_color: Color,
    pub area_border_color: Color,
    pub area_border_width: f64,
    pub conflict_marker: MarkerStyle,
    pub work_point_strip: WorkPointStripStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(1.0, 1.0, 1.0),
            gutter_background_color: Color::rgb(0.96, 0.96, 0.96),
            grid_line_color: Color::rgb(0.89, 0.92, 0.95),
            year_line_color: Color::rgb(0.60, 0.64, 0.70),
            axis_line_color: Color::rgb(0.0, 0.0, 0.0),
            axis_label_color: Color::rgb(0.10, 0.12, 0.16),
            year_label_color: Color::rgb(0.10, 0.12, 0.16),
            grid_line_width: 1.0,
            axis_line_width: 1.0,
            axis_label_font_size_px: 10.0,
            gutter_separators_px: [30.0, 50.0],
            work_item_color: Color::rgb(0.16, 0.38, 1.0),
            work_item_width: 6.0,
            hover_highlight_color: Color::rgba(1.0, 0.55, 0.0, 0.9),
            crosshair_line_color: Color::rgb(0.0, 0.0, 0.0),
            crosshair_line_width: 1.0,
            crosshair_label_color: Color::rgb(1.0, 1.0, 1.0),
            crosshair_label_box_color: Color::rgb(0.30, 0.35, 0.44),
            crosshair_label_font_size_px: 10.0,
            area_fill_color: Color::rgba(0.2, 0.7, 0.3, 0.15),
            area_border_color: Color::rgb(0.2, 0.6, 0.3),
            area_border_width: 1.0,
            conflict_marker: MarkerStyle::default(),
            work_point_strip: WorkPointStripStyle::default(),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.gutter_background_color,
            self.grid_line_color,
            self.year_line_color,
            self.axis_line_color,
            self.axis_label_color,
            self.year_label_color,
            self.work_item_color,
            self.hover_highlight_color,
            self.crosshair_line_color,
            self.crosshair_label_color,
            self.crosshair_label_box_color,
            self.area_fill_color,
            self.area_border_color,
            self.conflict_marker.fill_color,
            self.conflict_marker.border_color,
            self.conflict_marker.tooltip_fill_color,
            self.conflict_marker.tooltip_text_color,
            self.work_point_strip.background_color,
            self.work_point_strip.line_color,
            self.work_point_strip.label_color,
            self.work_point_strip.key_point_label_color,
        ] {
            color.validate()?;
        }

        for (value, name) in [
            (self.grid_line_width, "grid_line_width"),
            (self.axis_line_width, "axis_line_width"),
            (self.axis_label_font_size_px, "axis_label_font_size_px"),
            (self.work_item_width, "work_item_width"),
            (self.crosshair_line_width, "crosshair_line_width"),
            (
                self.crosshair_label_font_size_px,
                "crosshair_label_font_size_px",
            ),
            (self.work_point_strip.font_size_px, "work_point_strip.font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }

        for (value, name) in [
            (self.area_border_width, "area_border_width"),
            (self.conflict_marker.border_width, "conflict_marker.border_width"),
            (self.gutter_separators_px[0], "gutter_separators_px[0]"),
            (self.gutter_separators_px[1], "gutter_separators_px[1]"),
            (
                self.work_point_strip.strip_height_px,
                "work_point_strip.strip_height_px",
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }

        Ok(())
    }
}
