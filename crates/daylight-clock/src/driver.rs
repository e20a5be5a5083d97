//! Fixed-step driver.
//!
//! Converts irregular frame-advance signals into a constant-rate tick stream.
//! The number of ticks produced depends only on the total frame time fed in,
//! never on how that time was split across frames: a long stall yields a
//! burst of catch-up ticks on the next frame instead of lost time.

use crate::clock::{Advance, ClockStore};
use crate::config::ClockConfig;
use crate::daylight;
use crate::store::KeyValueStore;

/// Emitted once per tick consumed during a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TickEvent {
    pub advance: Advance,
    /// Formatted timestamp after the advance.
    pub timestamp: String,
    /// Delta of the frame that produced this tick, in frame units.
    pub delta: f64,
}

/// Emitted once per frame after all owed ticks have fired.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameEvent {
    /// Ticks fired during this frame (may be 0).
    pub ticks: u64,
    pub time_of_day_tick: u64,
    /// Cyclic brightness in `[0, 255]`.
    pub brightness: u8,
}

/// Display side of the driver.
///
/// `on_tick` runs inside the catch-up loop, `on_frame` exactly once per
/// frame afterwards.
pub trait ClockSink {
    fn on_tick(&mut self, tick: &TickEvent) {
        let _ = tick;
    }

    fn on_frame(&mut self, frame: &FrameEvent);
}

impl ClockSink for () {
    fn on_frame(&mut self, _frame: &FrameEvent) {}
}

impl<A: ClockSink, B: ClockSink> ClockSink for (A, B) {
    fn on_tick(&mut self, tick: &TickEvent) {
        self.0.on_tick(tick);
        self.1.on_tick(tick);
    }

    fn on_frame(&mut self, frame: &FrameEvent) {
        self.0.on_frame(frame);
        self.1.on_frame(frame);
    }
}

/// Carries unconsumed frame time between frames.
///
/// Invariant: `0 <= carryover`, and `carryover < threshold` after every
/// drained frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    carryover: f64,
    threshold: f64,
}

impl Accumulator {
    pub fn new(threshold: f64) -> Self {
        debug_assert!(threshold.is_finite() && threshold > 0.0);
        Self { carryover: 0.0, threshold }
    }

    /// Adds frame time. Negative or non-finite deltas count as zero.
    ///
    /// Returns the delta actually accumulated.
    pub fn push(&mut self, delta: f64) -> f64 {
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::debug!("clamping malformed frame delta {delta} to 0");
            0.0
        };
        self.carryover += delta;
        delta
    }

    /// Consumes one tick's worth of time if available.
    #[inline]
    pub fn take_tick(&mut self) -> bool {
        if self.carryover >= self.threshold {
            self.carryover -= self.threshold;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn carryover(&self) -> f64 {
        self.carryover
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Summary of one [`FixedStepDriver::on_frame_advance`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameReport {
    pub ticks: u64,
    pub brightness: u8,
}

/// Single entry point between the frame loop and the clock.
///
/// Holds no simulation state: the tick count belongs to the [`ClockStore`],
/// the driver only owns its accumulator.
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    acc: Accumulator,
}

impl FixedStepDriver {
    pub fn new(config: &ClockConfig) -> Self {
        Self::with_threshold(config.tick_threshold)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { acc: Accumulator::new(threshold) }
    }

    /// Feeds `delta` frame units into the accumulator and fires every tick
    /// owed, then reports the frame's brightness.
    pub fn on_frame_advance<S, K>(
        &mut self,
        delta: f64,
        clock: &mut ClockStore<S>,
        sink: &mut K,
    ) -> FrameReport
    where
        S: KeyValueStore,
        K: ClockSink + ?Sized,
    {
        let delta = self.acc.push(delta);

        let mut ticks = 0u64;
        while self.acc.take_tick() {
            let advance = clock.advance();
            ticks += 1;
            sink.on_tick(&TickEvent {
                advance,
                timestamp: clock.format_timestamp(),
                delta,
            });
        }

        if ticks > 1 {
            log::trace!("caught up {ticks} ticks in one frame");
        }

        let time_of_day_tick = clock.time_of_day_tick();
        let brightness = daylight::brightness(time_of_day_tick);
        sink.on_frame(&FrameEvent { ticks, time_of_day_tick, brightness });

        FrameReport { ticks, brightness }
    }

    #[inline]
    pub fn carryover(&self) -> f64 {
        self.acc.carryover()
    }

    #[inline]
    pub fn tick_threshold(&self) -> f64 {
        self.acc.threshold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::RecordingStore;
    use crate::store::MemoryStore;

    #[derive(Debug, Default)]
    struct Recorder {
        ticks: Vec<TickEvent>,
        frames: Vec<FrameEvent>,
    }

    impl ClockSink for Recorder {
        fn on_tick(&mut self, tick: &TickEvent) {
            self.ticks.push(tick.clone());
        }

        fn on_frame(&mut self, frame: &FrameEvent) {
            self.frames.push(*frame);
        }
    }

    fn fresh_clock() -> ClockStore<MemoryStore> {
        ClockStore::open(MemoryStore::new(), &ClockConfig::default())
    }

    fn run(deltas: &[f64]) -> (u64, f64) {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let fired: u64 = deltas
            .iter()
            .map(|&d| driver.on_frame_advance(d, &mut clock, &mut ()).ticks)
            .sum();
        assert_eq!(fired, clock.elapsed_ticks());
        (fired, driver.carryover())
    }

    // ── accumulator ───────────────────────────────────────────────────────

    #[test]
    fn accumulator_rejects_malformed_deltas() {
        let mut acc = Accumulator::new(10.0);
        assert_eq!(acc.push(-4.0), 0.0);
        assert_eq!(acc.push(f64::NAN), 0.0);
        assert_eq!(acc.push(f64::INFINITY), 0.0);
        assert_eq!(acc.carryover(), 0.0);
        assert!(!acc.take_tick());
    }

    #[test]
    fn accumulator_takes_exact_threshold() {
        let mut acc = Accumulator::new(10.0);
        acc.push(10.0);
        assert!(acc.take_tick());
        assert_eq!(acc.carryover(), 0.0);
    }

    // ── catch-up ──────────────────────────────────────────────────────────

    #[test]
    fn twenty_five_units_fire_two_ticks() {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let report = driver.on_frame_advance(25.0, &mut clock, &mut ());
        assert_eq!(report.ticks, 2);
        assert_eq!(clock.elapsed_ticks(), 2);
        assert_eq!(driver.carryover(), 5.0);
    }

    #[test]
    fn small_deltas_accumulate_into_a_tick() {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        for _ in 0..3 {
            assert_eq!(driver.on_frame_advance(3.0, &mut clock, &mut ()).ticks, 0);
        }
        assert_eq!(driver.on_frame_advance(3.0, &mut clock, &mut ()).ticks, 1);
        assert_eq!(driver.carryover(), 2.0);
    }

    #[test]
    fn long_stall_fires_every_owed_tick() {
        let mut clock = ClockStore::open(RecordingStore::default(), &ClockConfig::default());
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let report = driver.on_frame_advance(10_000.0, &mut clock, &mut ());
        assert_eq!(report.ticks, 1000);
        assert_eq!(clock.elapsed_ticks(), 1000);
        assert_eq!(clock.store().writes.len(), 1000 / 7);
    }

    #[test]
    fn tick_count_is_independent_of_frame_split() {
        let total = 137.5; // floor(137.5 / 10) = 13
        let splits: [&[f64]; 4] = [
            &[137.5],
            &[0.5; 275],
            &[10.0, 10.0, 10.0, 107.5],
            &[2.25, 7.75, 13.0, 0.0, 46.5, 0.25, 67.75],
        ];
        for deltas in splits {
            assert_eq!(deltas.iter().sum::<f64>(), total);
            let (ticks, carry) = run(deltas);
            assert_eq!(ticks, 13, "split {deltas:?}");
            assert_eq!(carry, 7.5, "split {deltas:?}");
        }
    }

    #[test]
    fn negative_delta_never_runs_backwards() {
        let (ticks, carry) = run(&[15.0, -100.0, f64::NEG_INFINITY, 5.0]);
        assert_eq!(ticks, 2);
        assert_eq!(carry, 0.0);
    }

    // ── sink protocol ─────────────────────────────────────────────────────

    #[test]
    fn one_tick_event_per_tick_and_one_frame_event_per_frame() {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let mut rec = Recorder::default();

        driver.on_frame_advance(4.0, &mut clock, &mut rec);
        driver.on_frame_advance(31.0, &mut clock, &mut rec);

        assert_eq!(rec.frames.len(), 2);
        assert_eq!(rec.frames[0].ticks, 0);
        assert_eq!(rec.frames[1].ticks, 3);

        let elapsed: Vec<u64> = rec.ticks.iter().map(|t| t.advance.elapsed).collect();
        assert_eq!(elapsed, [1, 2, 3]);
        assert!(rec.ticks.iter().all(|t| t.delta == 31.0));
        assert_eq!(rec.ticks[2].timestamp, "0년 1월 1일 0:3");
    }

    #[test]
    fn frame_event_reflects_time_after_ticks() {
        let store = MemoryStore::with_entry("elapseTime", "715");
        let mut clock = ClockStore::open(store, &ClockConfig::default());
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let mut rec = Recorder::default();

        let report = driver.on_frame_advance(50.0, &mut clock, &mut rec);
        assert_eq!(rec.frames[0].time_of_day_tick, 720);
        assert_eq!(report.brightness, 255);
        assert_eq!(rec.frames[0].brightness, 255);
    }

    #[test]
    fn tuple_sink_fans_out() {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::new(&ClockConfig::default());
        let mut pair = (Recorder::default(), Recorder::default());

        driver.on_frame_advance(20.0, &mut clock, &mut pair);
        assert_eq!(pair.0.ticks.len(), 2);
        assert_eq!(pair.1.ticks.len(), 2);
        assert_eq!(pair.0.frames, pair.1.frames);
    }

    #[test]
    fn custom_threshold() {
        let mut clock = fresh_clock();
        let mut driver = FixedStepDriver::with_threshold(2.5);
        assert_eq!(driver.tick_threshold(), 2.5);
        assert_eq!(driver.on_frame_advance(6.0, &mut clock, &mut ()).ticks, 2);
        assert_eq!(driver.carryover(), 1.0);
    }
}
