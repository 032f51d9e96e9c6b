//! tl-chart: coordinate and layout engine for time-location diagrams.
//!
//! Mileposts run along the horizontal axis and calendar time up the vertical
//! axis. The crate owns the viewport transform, axis tick generation,
//! conflict geometry and scene building; drawing is delegated to a
//! `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{EngineConfig, TimeLocationEngine};
pub use error::{ChartError, ChartResult};
