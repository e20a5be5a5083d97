//! Frame timing.
//!
//! The runtime owns one `FrameClock` per window and ticks it once per
//! redraw. Consumers read `FrameTime::dt` (seconds) or
//! `FrameTime::frame_units` (60ths of a second, the unit the fixed-step
//! clock consumes).

mod frame_clock;

pub use frame_clock::{FRAME_UNITS_PER_SECOND, FrameClamps, FrameClock, FrameTime};
