//! Daylight clock crate.
//!
//! A persisted tick counter and the fixed-step loop that drives it.
//!
//! ```rust,ignore
//! let config = ClockConfig::default();
//! let mut clock = ClockStore::open(FileStore::new("daylight-state.json"), &config);
//! let mut driver = FixedStepDriver::new(&config);
//!
//! // once per rendered frame, `delta` in frame units (1/60 s):
//! driver.on_frame_advance(delta, &mut clock, &mut sink);
//! ```

pub mod calendar;
pub mod clock;
pub mod config;
pub mod daylight;
pub mod driver;
pub mod store;

pub use calendar::CalendarTime;
pub use clock::{Advance, ClockStore};
pub use config::ClockConfig;
pub use driver::{ClockSink, FixedStepDriver, FrameEvent, FrameReport, TickEvent};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
