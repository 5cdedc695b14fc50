//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The canvas translates platform events into `InputEvent`s and collects them
//! per poll in an `InputFrame`.

mod frame;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub use types::{InputEvent, Key, KeyState};
