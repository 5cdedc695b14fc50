use std::time::Duration;

use crate::device::GpuInit;
use crate::paint::Rgba;

/// Canvas configuration.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub title: String,
    /// Initial size in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Initial draw color.
    pub color: Rgba,
    /// Pause after every presented frame.
    pub frame_delay: Duration,
    pub gpu: GpuInit,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "LuaPlate".to_string(),
            width: 640,
            height: 480,
            color: Rgba::WHITE,
            frame_delay: Duration::from_millis(5),
            gpu: GpuInit::default(),
        }
    }
}
