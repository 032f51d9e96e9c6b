mod engine;
mod engine_config;
mod render_style;
mod scene_builder;

pub use engine::TimeLocationEngine;
pub use engine_config::EngineConfig;
pub use render_style::RenderStyle;
pub use scene_builder::{
    AreaLayer, CrosshairOverlay, FrameLayout, SceneBuilder, SceneConfig, SceneLayers,
};
