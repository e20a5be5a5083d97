//! Display side of the clock: everything the window shows, updated through
//! the driver's sink callbacks.

use daylight_clock::daylight::backdrop_rgb;
use daylight_clock::{ClockSink, FrameEvent, TickEvent};

use crate::status::StatusPanel;

/// Sprite rotation lost per tick, per frame unit of the producing frame.
pub const SPIN_PER_DELTA: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct Display {
    pub status: StatusPanel,
    /// Grid rotation in radians; decreases as ticks fire.
    pub rotation: f32,
    /// Brightness computed at the end of the last frame.
    pub brightness: u8,
}

impl Display {
    pub fn new(status: StatusPanel, brightness: u8) -> Self {
        Self { status, rotation: 0.0, brightness }
    }

    pub fn backdrop(&self) -> [u8; 3] {
        backdrop_rgb(self.brightness)
    }
}

impl ClockSink for Display {
    fn on_tick(&mut self, tick: &TickEvent) {
        self.rotation -= SPIN_PER_DELTA * tick.delta as f32;
        // Ticks fire before the frame's brightness is recomputed, so the
        // metric shows the previous frame's value.
        self.status.refresh(&tick.timestamp, self.brightness);
    }

    fn on_frame(&mut self, frame: &FrameEvent) {
        self.brightness = frame.brightness;
    }
}
