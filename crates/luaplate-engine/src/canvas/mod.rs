//! Script-facing drawing canvas.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! implements [`Surface`](crate::surface::Surface) on top of a `DrawList`.
//! The event loop is pumped by the caller (`poll_event`), never run.

mod config;
mod platform;
mod runtime;

pub use config::CanvasConfig;
pub use runtime::Canvas;
