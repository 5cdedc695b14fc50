//! Color model shared between the canvas and renderers.
//!
//! - `Rgba`: packed 8-bit straight-alpha color, the form scripts see
//! - `Color`: linear premultiplied `f32` color, the form shaders consume

pub mod color;
pub mod rgba;

pub use color::Color;
pub use rgba::Rgba;
