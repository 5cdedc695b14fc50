//! LuaPlate engine crate.
//!
//! Owns the platform + GPU runtime behind the script-facing [`Surface`]:
//! window and event pumping, device setup, the quad renderer and the packed
//! color model scripts work with.

pub mod canvas;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod surface;

mod scene;

pub use canvas::{Canvas, CanvasConfig};
pub use paint::Rgba;
pub use surface::{Control, Surface};
