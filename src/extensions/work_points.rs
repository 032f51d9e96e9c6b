//! Work-point range strip drawn along the top of the diagram.
//!
//! Each work point spans a milepost range and shows its start/end DK values
//! plus its name centred over the range.

use serde::{Deserialize, Serialize};

use crate::core::{Viewport, ViewportState, format_dk_value};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPoint {
    pub dk_start: f64,
    pub dk_end: f64,
    pub name: String,
    #[serde(default)]
    pub is_key_point: bool,
}

impl WorkPoint {
    #[must_use]
    pub fn new(dk_start: f64, dk_end: f64, name: impl Into<String>) -> Self {
        Self {
            dk_start,
            dk_end,
            name: name.into(),
            is_key_point: false,
        }
    }

    #[must_use]
    pub fn key_point(mut self) -> Self {
        self.is_key_point = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.dk_start.is_finite() || !self.dk_end.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "work point `{}` range must be finite",
                self.name
            )));
        }
        if self.dk_start < 0.0 || self.dk_end < self.dk_start {
            return Err(ChartError::InvalidData(format!(
                "work point `{}` range must satisfy 0 <= start <= end",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkPointLabelKind {
    Start,
    Name,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPointLabel {
    pub kind: WorkPointLabelKind,
    pub text: String,
    pub center_x_px: f64,
    pub is_key_point: bool,
}

impl WorkPointLabel {
    /// Background width estimated from the character count.
    #[must_use]
    pub fn background_width_px(&self) -> f64 {
        self.text.chars().count() as f64 * 8.0 + 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkPointStripStyle {
    pub strip_height_px: f64,
    pub line_y_px: f64,
    pub label_top_px: f64,
    pub font_size_px: f64,
    pub background_color: Color,
    pub line_color: Color,
    pub label_color: Color,
    pub key_point_label_color: Color,
}

impl Default for WorkPointStripStyle {
    fn default() -> Self {
        Self {
            strip_height_px: 20.0,
            line_y_px: 10.0,
            label_top_px: 6.0,
            font_size_px: 8.0,
            background_color: Color::rgb(1.0, 1.0, 1.0),
            line_color: Color::rgb(0.0, 0.0, 0.0),
            label_color: Color::rgb(0.0, 0.0, 0.0),
            key_point_label_color: Color::rgb(0.85, 0.1, 0.1),
        }
    }
}

/// Start, name and end labels per work point, in input order.
///
/// Labels whose centre falls outside the plot's horizontal extent are dropped.
#[must_use]
pub fn layout_work_point_labels(
    points: &[WorkPoint],
    viewport: &ViewportState,
) -> Vec<WorkPointLabel> {
    let to_px = |value: f64| {
        value / viewport.one_px_value_x + viewport.insets.left - viewport.offset_x
    };
    let on_plot = |x: f64| x >= viewport.insets.left && x <= viewport.canvas_width;

    let mut labels = Vec::with_capacity(points.len() * 3);
    for point in points.iter().filter(|point| point.validate().is_ok()) {
        let entries = [
            (
                WorkPointLabelKind::Start,
                format_dk_value(point.dk_start),
                to_px(point.dk_start),
            ),
            (
                WorkPointLabelKind::Name,
                Some(point.name.clone()),
                to_px((point.dk_start + point.dk_end) / 2.0),
            ),
            (
                WorkPointLabelKind::End,
                format_dk_value(point.dk_end),
                to_px(point.dk_end),
            ),
        ];
        for (kind, text, center_x_px) in entries {
            let Some(text) = text.filter(|text| !text.is_empty()) else {
                continue;
            };
            if !on_plot(center_x_px) {
                continue;
            }
            labels.push(WorkPointLabel {
                kind,
                text,
                center_x_px,
                is_key_point: point.is_key_point,
            });
        }
    }
    labels
}

#[must_use]
pub fn work_point_strip_frame(
    labels: &[WorkPointLabel],
    viewport: &ViewportState,
    style: WorkPointStripStyle,
    frame_viewport: Viewport,
) -> RenderFrame {
    let mut frame = RenderFrame::new(frame_viewport)
        .with_rect(RectPrimitive::new(
            0.0,
            0.0,
            viewport.canvas_width,
            style.strip_height_px,
            style.background_color,
        ))
        .with_line(LinePrimitive::new(
            viewport.insets.left,
            style.line_y_px,
            viewport.canvas_width,
            style.line_y_px,
            1.0,
            style.line_color,
        ));

    for label in labels {
        let width = label.background_width_px();
        frame.rects.push(RectPrimitive::new(
            label.center_x_px - width / 2.0,
            style.label_top_px - 2.0,
            width,
            style.font_size_px + 4.0,
            style.background_color,
        ));
        let color = if label.is_key_point {
            style.key_point_label_color
        } else {
            style.label_color
        };
        frame.texts.push(TextPrimitive::new(
            label.text.clone(),
            label.center_x_px,
            style.label_top_px,
            style.font_size_px,
            color,
            TextHAlign::Center,
        ));
    }
    frame
}
