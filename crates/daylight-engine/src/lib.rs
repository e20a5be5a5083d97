//! Daylight engine crate.
//!
//! Platform and GPU runtime: a winit window, a wgpu surface, a frame clock
//! and an instanced quad renderer fed from a sorted draw list.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
