//! Shape renderers.

mod common;

pub mod quad;
