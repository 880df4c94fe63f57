//! Rendering pipeline components

pub mod pipeline_manager;
pub mod render_engine;
pub mod watercolor;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use watercolor::{WatercolorError, WatercolorPass, WatercolorSettings};
