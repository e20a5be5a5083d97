use crate::calendar::{self, CalendarTime};
use crate::config::ClockConfig;
use crate::store::KeyValueStore;

/// Result of a single [`ClockStore::advance`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Advance {
    /// Tick count after the advance.
    pub elapsed: u64,
    /// A save was issued because `elapsed` hit the save cadence.
    pub saved: bool,
}

/// Authoritative owner of the elapsed tick count.
///
/// The count is read from `S` once when the clock is opened, raised by one
/// per [`advance`](Self::advance), and written back on a fixed cadence rather
/// than on every change. Storage failures never escape: they are logged and
/// the in-memory count stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct ClockStore<S> {
    elapsed: u64,
    store: S,
    key: String,
    save_every: u64,
}

impl<S: KeyValueStore> ClockStore<S> {
    /// Opens the clock, seeding the tick count from `store`.
    pub fn open(store: S, config: &ClockConfig) -> Self {
        let mut clock = Self {
            elapsed: 0,
            store,
            key: config.storage_key.clone(),
            save_every: config.effective_save_every(),
        };
        clock.elapsed = clock.load();
        log::info!(
            "clock opened at tick {} ({})",
            clock.elapsed,
            clock.format_timestamp()
        );
        clock
    }

    /// Reads the persisted tick count.
    ///
    /// Absent, unparseable, or unreadable values all read as 0.
    pub fn load(&self) -> u64 {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("no persisted value under '{}'; starting at 0", self.key);
                return 0;
            }
            Err(e) => {
                log::warn!("failed to read '{}': {e}; starting at 0", self.key);
                return 0;
            }
        };

        match raw.trim().parse::<u64>() {
            Ok(ticks) => ticks,
            Err(e) => {
                log::warn!("ignoring persisted '{}' = {raw:?} ({e}); starting at 0", self.key);
                0
            }
        }
    }

    /// Raises the tick count by one, saving when it lands on the cadence.
    ///
    /// The count is pinned at `u64::MAX`; advancing past it is logged and
    /// leaves the count unchanged.
    pub fn advance(&mut self) -> Advance {
        match self.elapsed.checked_add(1) {
            Some(next) => self.elapsed = next,
            None => {
                log::warn!("tick count is pinned at {}; not advancing", self.elapsed);
                return Advance { elapsed: self.elapsed, saved: false };
            }
        }

        let saved = self.elapsed % self.save_every == 0;
        if saved {
            self.save();
        }

        Advance { elapsed: self.elapsed, saved }
    }

    /// Writes the current tick count under the configured key.
    ///
    /// Returns `false` if the backend rejected the write; the failure is
    /// logged and otherwise ignored.
    pub fn save(&mut self) -> bool {
        let value = self.elapsed.to_string();
        match self.store.set(&self.key, &value) {
            Ok(()) => {
                log::debug!("saved '{}' = {value}", self.key);
                true
            }
            Err(e) => {
                log::warn!("failed to save '{}' = {value}: {e}", self.key);
                false
            }
        }
    }

    /// Rewinds to tick 0 and saves immediately.
    pub fn reset(&mut self) {
        log::info!("clock reset from tick {}", self.elapsed);
        self.elapsed = 0;
        self.save();
    }

    #[inline]
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed
    }

    #[inline]
    pub fn calendar(&self) -> CalendarTime {
        CalendarTime::from_ticks(self.elapsed)
    }

    /// `"<year>년 <month>월 <day>일 <hour>:<minute>"`, unpadded.
    pub fn format_timestamp(&self) -> String {
        self.calendar().to_string()
    }

    #[inline]
    pub fn time_of_day_tick(&self) -> u64 {
        calendar::time_of_day_tick(self.elapsed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    /// Wraps a `MemoryStore` and records every write.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingStore {
        pub inner: MemoryStore,
        pub writes: Vec<String>,
    }

    impl KeyValueStore for RecordingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writes.push(value.to_string());
            self.inner.set(key, value)
        }
    }

    /// Every operation fails.
    #[derive(Debug, Default)]
    struct BrokenStore {
        attempts: usize,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(broken())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            self.attempts += 1;
            Err(broken())
        }
    }

    fn broken() -> StoreError {
        StoreError::Io {
            path: "broken".into(),
            source: std::io::Error::other("disk on fire"),
        }
    }

    fn open_with(value: Option<&str>) -> ClockStore<MemoryStore> {
        let store = match value {
            Some(v) => MemoryStore::with_entry("elapseTime", v),
            None => MemoryStore::new(),
        };
        ClockStore::open(store, &ClockConfig::default())
    }

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn absent_key_starts_at_zero() {
        assert_eq!(open_with(None).elapsed_ticks(), 0);
    }

    #[test]
    fn persisted_value_is_loaded() {
        assert_eq!(open_with(Some("123")).elapsed_ticks(), 123);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(open_with(Some(" 42\n")).elapsed_ticks(), 42);
    }

    #[test]
    fn unparseable_values_start_at_zero() {
        for raw in ["", "abc", "-5", "12.5", "1e3"] {
            assert_eq!(open_with(Some(raw)).elapsed_ticks(), 0, "raw = {raw:?}");
        }
    }

    #[test]
    fn unreadable_store_starts_at_zero() {
        let clock = ClockStore::open(BrokenStore::default(), &ClockConfig::default());
        assert_eq!(clock.elapsed_ticks(), 0);
    }

    #[test]
    fn custom_key_is_used() {
        let store = MemoryStore::with_entry("ticks", "9");
        let clock = ClockStore::open(store, &ClockConfig::default().storage_key("ticks"));
        assert_eq!(clock.elapsed_ticks(), 9);
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn advance_raises_by_exactly_one() {
        let mut clock = open_with(Some("10"));
        for expected in 11..=40 {
            let adv = clock.advance();
            assert_eq!(adv.elapsed, expected);
            assert_eq!(clock.elapsed_ticks(), expected);
        }
    }

    #[test]
    fn advance_stops_at_the_ceiling() {
        let mut clock = ClockStore::open(
            RecordingStore {
                inner: MemoryStore::with_entry("elapseTime", u64::MAX.to_string()),
                writes: Vec::new(),
            },
            &ClockConfig::default(),
        );
        assert_eq!(clock.elapsed_ticks(), u64::MAX);
        assert_eq!(clock.advance(), Advance { elapsed: u64::MAX, saved: false });
        assert_eq!(clock.elapsed_ticks(), u64::MAX);
        assert!(clock.store().writes.is_empty());
    }

    #[test]
    fn saves_only_on_multiples_of_seven() {
        let mut clock = ClockStore::open(RecordingStore::default(), &ClockConfig::default());
        for _ in 0..30 {
            let adv = clock.advance();
            assert_eq!(adv.saved, adv.elapsed % 7 == 0, "tick {}", adv.elapsed);
        }
        assert_eq!(clock.store().writes, ["7", "14", "21", "28"]);
    }

    #[test]
    fn cadence_counts_from_absolute_ticks() {
        let store = RecordingStore {
            inner: MemoryStore::with_entry("elapseTime", "5"),
            writes: Vec::new(),
        };
        let mut clock = ClockStore::open(store, &ClockConfig::default());
        assert!(!clock.advance().saved); // 6
        assert!(clock.advance().saved); // 7
        assert_eq!(clock.store().writes, ["7"]);
    }

    #[test]
    fn custom_cadence() {
        let config = ClockConfig::default().save_every(3);
        let mut clock = ClockStore::open(RecordingStore::default(), &config);
        for _ in 0..9 {
            clock.advance();
        }
        assert_eq!(clock.store().writes, ["3", "6", "9"]);
    }

    #[test]
    fn failing_saves_do_not_stop_the_clock() {
        let mut clock = ClockStore::open(BrokenStore::default(), &ClockConfig::default());
        for _ in 0..14 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_ticks(), 14);
        assert_eq!(clock.store().attempts, 2);
        assert!(!clock.save());
    }

    // ── save / round-trip ─────────────────────────────────────────────────

    #[test]
    fn save_writes_decimal_text() {
        let mut clock = open_with(Some("99"));
        clock.advance();
        assert!(clock.save());
        assert_eq!(clock.store().get("elapseTime").unwrap().as_deref(), Some("100"));
    }

    #[test]
    fn save_is_idempotent() {
        let mut clock = open_with(Some("3"));
        assert!(clock.save());
        assert!(clock.save());
        assert_eq!(clock.store().get("elapseTime").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn save_then_load_in_fresh_instance() {
        let mut clock = open_with(None);
        for _ in 0..12 {
            clock.advance();
        }
        clock.save();
        let reopened = ClockStore::open(clock.into_store(), &ClockConfig::default());
        assert_eq!(reopened.elapsed_ticks(), 12);
    }

    #[test]
    fn reset_rewinds_and_persists() {
        let mut clock = open_with(Some("500"));
        clock.reset();
        assert_eq!(clock.elapsed_ticks(), 0);
        assert_eq!(clock.load(), 0);
        assert_eq!(clock.store().get("elapseTime").unwrap().as_deref(), Some("0"));
    }

    // ── derived values ────────────────────────────────────────────────────

    #[test]
    fn timestamp_follows_tick_count() {
        let clock = open_with(Some("43200"));
        assert_eq!(clock.format_timestamp(), "0년 2월 1일 0:0");
        assert_eq!(clock.format_timestamp(), clock.format_timestamp());
    }

    #[test]
    fn time_of_day_tick_wraps() {
        assert_eq!(open_with(Some("1445")).time_of_day_tick(), 5);
    }
}
