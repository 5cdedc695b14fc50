//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Device/Queue for a window
//! - configuring the Surface (swapchain) and following window resizes
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
