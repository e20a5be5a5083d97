//! Colour model shared by the scene and renderers.

pub mod color;

pub use color::Color;
