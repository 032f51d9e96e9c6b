use serde::{Deserialize, Serialize};

use crate::core::milepost::format_dk;
use crate::core::types::AxisTick;

/// Smallest gridline spacing accepted by configuration.
pub const MIN_X_GRID_SIZE_PX: f64 = 1.0;

/// Upper bound on gridlines in one frame; inputs needing more are degenerate.
pub const MAX_X_TICKS: usize = 8_192;

/// Inputs of the milepost (horizontal) tick generator.
///
/// `grid_size_px` is the gridline spacing in pixels, `x_offset_px` the current
/// pan offset in pixels and `one_px_value_x` the distance units per pixel.
/// The data range plays no part: generation always ends at the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XAxisInput {
    pub grid_size_px: f64,
    pub out_x_offset_px: f64,
    pub x_offset_px: f64,
    pub one_px_value_x: f64,
    pub canvas_width: f64,
}

impl XAxisInput {
    fn is_degenerate(&self) -> bool {
        !(self.grid_size_px.is_finite() && self.grid_size_px > 0.0)
            || !(self.one_px_value_x.is_finite() && self.one_px_value_x > 0.0)
            || !self.x_offset_px.is_finite()
            || !self.out_x_offset_px.is_finite()
            || !self.canvas_width.is_finite()
            || self.tick_capacity() > MAX_X_TICKS as f64
    }

    fn tick_capacity(&self) -> f64 {
        ((self.canvas_width - self.out_x_offset_px).max(0.0) / self.grid_size_px).floor() + 1.0
    }

    /// Pixel distance from the plot's left edge to the first gridline at or
    /// after it.
    #[must_use]
    pub fn first_gridline_offset_px(&self) -> f64 {
        let remainder = self.x_offset_px.rem_euclid(self.grid_size_px);
        if remainder == 0.0 {
            0.0
        } else {
            self.grid_size_px - remainder
        }
    }
}

/// Generates the visible milepost gridlines.
///
/// Ticks past the data range are still produced while they land on the
/// canvas; ticks past the canvas are never produced, even inside the data
/// range. Inputs that would need more than [`MAX_X_TICKS`] gridlines yield an
/// empty list.
#[must_use]
pub fn generate_x_axis_ticks(input: &XAxisInput) -> Vec<AxisTick> {
    if input.is_degenerate() {
        return Vec::new();
    }

    let grid = input.grid_size_px;
    let first_offset = input.first_gridline_offset_px();
    let panned_grid_count = (input.x_offset_px / grid).ceil();

    let mut ticks = Vec::with_capacity(input.tick_capacity() as usize);
    for i in 0_u64.. {
        let index = i as f64;
        let position_px = input.out_x_offset_px + first_offset + index * grid;
        let value = ((index + panned_grid_count) * grid * input.one_px_value_x).floor();

        // The canvas edge ends generation on both sides of the data range.
        if position_px > input.canvas_width {
            break;
        }

        let label = if value >= 0.0 {
            format_dk(value as u64)
        } else {
            String::new()
        };
        ticks.push(AxisTick::new(position_px, label, false, grid));
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::XAxisInput;

    fn input(x_offset_px: f64) -> XAxisInput {
        XAxisInput {
            grid_size_px: 50.0,
            out_x_offset_px: 50.0,
            x_offset_px,
            one_px_value_x: 1.0,
            canvas_width: 650.0,
        }
    }

    #[test]
    fn first_gridline_is_next_grid_boundary() {
        assert_eq!(input(0.0).first_gridline_offset_px(), 0.0);
        assert_eq!(input(20.0).first_gridline_offset_px(), 30.0);
        assert_eq!(input(100.0).first_gridline_offset_px(), 0.0);
    }

    #[test]
    fn capacity_counts_the_gutter_edge_tick() {
        assert_eq!(input(0.0).tick_capacity(), 13.0);
    }
}
