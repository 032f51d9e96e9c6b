use serde::{Deserialize, Serialize};

use crate::core::{
    DataExtent, DateRange, HitTest, MIN_X_GRID_SIZE_PX, PanMargins, PanPolicy, PlotInsets,
    Viewport, ViewportState, ViewportTransform, ZoomLimits,
};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload a diagram setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub insets: PlotInsets,
    #[serde(default)]
    pub extent: DataExtent,
    #[serde(default = "default_x_grid_size_px")]
    pub x_grid_size_px: f64,
    #[serde(default = "default_one_px_value_x")]
    pub one_px_value_x: f64,
    /// Days per pixel. `None` follows the axis mode of the date range.
    #[serde(default)]
    pub one_px_value_y: Option<f64>,
    #[serde(default)]
    pub pan_policy: PanPolicy,
    #[serde(default)]
    pub pan_margins: PanMargins,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default)]
    pub hit_test: HitTest,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl EngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            insets: PlotInsets::default(),
            extent: DataExtent::default(),
            x_grid_size_px: default_x_grid_size_px(),
            one_px_value_x: default_one_px_value_x(),
            one_px_value_y: None,
            pan_policy: PanPolicy::default(),
            pan_margins: PanMargins::default(),
            zoom_limits: ZoomLimits::default(),
            hit_test: HitTest::default(),
            date_range: None,
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: PlotInsets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_extent(mut self, extent: DataExtent) -> Self {
        self.extent = extent;
        self
    }

    #[must_use]
    pub fn with_x_grid_size_px(mut self, grid_size_px: f64) -> Self {
        self.x_grid_size_px = grid_size_px;
        self
    }

    #[must_use]
    pub fn with_one_px_value_x(mut self, value: f64) -> Self {
        self.one_px_value_x = value;
        self
    }

    /// Pins the vertical scale instead of deriving it from the axis mode.
    #[must_use]
    pub fn with_one_px_value_y(mut self, value: f64) -> Self {
        self.one_px_value_y = Some(value);
        self
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

    #[must_use]
    pub fn with_hit_test(mut self, hit_test: HitTest) -> Self {
        self.hit_test = hit_test;
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        for (value, name) in [
            (self.insets.left, "insets.left"),
            (self.insets.bottom, "insets.bottom"),
            (self.insets.top, "insets.top"),
            (self.pan_margins.x, "pan_margins.x"),
            (self.pan_margins.y, "pan_margins.y"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.insets.left >= width || self.insets.top + self.insets.bottom >= height {
            return Err(ChartError::InvalidData(
                "plot insets leave no plot area".to_owned(),
            ));
        }

        if !self.x_grid_size_px.is_finite() || self.x_grid_size_px < MIN_X_GRID_SIZE_PX {
            return Err(ChartError::InvalidData(format!(
                "config `x_grid_size_px` must be finite and >= {MIN_X_GRID_SIZE_PX}"
            )));
        }

        for (value, name) in [
            (self.one_px_value_x, "one_px_value_x"),
            (self.zoom_limits.step, "zoom_limits.step"),
            (self.zoom_limits.max_one_px_value, "zoom_limits.max_one_px_value"),
            (self.extent.x_range, "extent.x_range"),
            (self.extent.y_range, "extent.y_range"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        if self.one_px_value_x > self.zoom_limits.max_one_px_value {
            return Err(ChartError::InvalidData(
                "one_px_value_x exceeds zoom_limits.max_one_px_value".to_owned(),
            ));
        }
        if let Some(value) = self.one_px_value_y {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(
                    "config `one_px_value_y` must be finite and > 0".to_owned(),
                ));
            }
        }

        let tolerance = match self.hit_test {
            HitTest::SlopeBand { tolerance } => tolerance,
            HitTest::PerpendicularDistance { tolerance_px } => tolerance_px,
        };
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ChartError::InvalidData(
                "hit-test tolerance must be finite and >= 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Builds the initial viewport transform after validating the config.
    pub fn viewport_transform(&self) -> ChartResult<ViewportTransform> {
        self.validate()?;
        let mut state = ViewportState::new(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        );
        state.insets = self.insets;
        state.one_px_value_x = self.one_px_value_x;
        state.one_px_value_y = self.one_px_value_y.unwrap_or(1.0);
        Ok(ViewportTransform::new(state, self.extent)?
            .with_pan_policy(self.pan_policy)
            .with_pan_margins(self.pan_margins)
            .with_zoom_limits(self.zoom_limits))
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_x_grid_size_px() -> f64 {
    50.0
}

fn default_one_px_value_x() -> f64 {
    1.0
}
