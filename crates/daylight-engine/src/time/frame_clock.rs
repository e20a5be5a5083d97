use std::time::{Duration, Instant};

/// Nominal display rate that defines one frame unit.
pub const FRAME_UNITS_PER_SECOND: f64 = 60.0;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick.
    pub delta: Duration,

    /// `delta` in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// `delta` expressed in frame units: `1.0` for a frame at exactly 60 Hz,
    /// `2.0` for a frame that took twice as long.
    #[inline]
    pub fn frame_units(&self) -> f64 {
        self.delta.as_secs_f64() * FRAME_UNITS_PER_SECOND
    }
}

/// Bounds applied to every measured delta.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameClamps {
    pub min: Duration,
    pub max: Duration,
}

impl FrameClamps {
    /// Keeps per-frame simulations stable: no zero deltas from tight loops,
    /// nothing over a quarter second after a stall.
    pub const INTERACTIVE: Self = Self {
        min: Duration::from_micros(100),
        max: Duration::from_millis(250),
    };

    /// For accumulating consumers that must see stalls in full so they can
    /// catch up. Only pathological gaps (over an hour) are cut.
    pub const CATCH_UP: Self = Self {
        min: Duration::ZERO,
        max: Duration::from_secs(60 * 60),
    };

    #[inline]
    fn apply(self, dt: Duration) -> Duration {
        dt.clamp(self.min, self.max)
    }
}

impl Default for FrameClamps {
    fn default() -> Self {
        Self::INTERACTIVE
    }
}

/// Produces `FrameTime` snapshots from a monotonic clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    clamps: FrameClamps,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(FrameClamps::default())
    }

    pub fn with_clamps(clamps: FrameClamps) -> Self {
        debug_assert!(clamps.min <= clamps.max);
        Self::starting_at(Instant::now(), clamps)
    }

    fn starting_at(last: Instant, clamps: FrameClamps) -> Self {
        Self { last, frame_index: 0, clamps }
    }

    /// Moves the baseline to now without producing a frame, so the time
    /// spent suspended is not reported as a delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let delta = self.clamps.apply(now.saturating_duration_since(self.last));
        self.last = now;

        let ft = FrameTime {
            delta,
            dt: delta.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
