//! Font loading and measurement.
//!
//! Fonts are parsed once by [`FontSystem`]; draw commands refer to them by
//! [`FontId`] and the text renderer rasterizes glyphs from the same system.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
