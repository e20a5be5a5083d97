/// Clock configuration.
///
/// Defaults reproduce the shipped behaviour: the tick count lives under
/// `"elapseTime"`, is flushed every 7th tick, and one tick costs 10 frame
/// units (1 frame unit = 1/60 s, so 6 ticks per real second).
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    /// Key of the persisted tick count.
    pub storage_key: String,

    /// Save when the tick count becomes a multiple of this value. `0` is
    /// treated as 1 (save on every tick).
    pub save_every: u64,

    /// Frame units consumed per tick. Must be finite and positive.
    pub tick_threshold: f64,
}

pub const DEFAULT_STORAGE_KEY: &str = "elapseTime";
pub const DEFAULT_SAVE_EVERY: u64 = 7;
pub const DEFAULT_TICK_THRESHOLD: f64 = 10.0;

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            save_every: DEFAULT_SAVE_EVERY,
            tick_threshold: DEFAULT_TICK_THRESHOLD,
        }
    }
}

impl ClockConfig {
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn save_every(mut self, n: u64) -> Self {
        self.save_every = n;
        self
    }

    /// Sets the per-tick threshold. Non-finite or non-positive values fall
    /// back to [`DEFAULT_TICK_THRESHOLD`].
    pub fn tick_threshold(mut self, threshold: f64) -> Self {
        self.tick_threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            log::warn!(
                "ignoring invalid tick threshold {threshold}; using {DEFAULT_TICK_THRESHOLD}"
            );
            DEFAULT_TICK_THRESHOLD
        };
        self
    }

    #[inline]
    pub(crate) fn effective_save_every(&self) -> u64 {
        self.save_every.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ClockConfig::default();
        assert_eq!(c.storage_key, "elapseTime");
        assert_eq!(c.save_every, 7);
        assert_eq!(c.tick_threshold, 10.0);
    }

    #[test]
    fn invalid_threshold_falls_back() {
        assert_eq!(ClockConfig::default().tick_threshold(0.0).tick_threshold, 10.0);
        assert_eq!(ClockConfig::default().tick_threshold(-3.0).tick_threshold, 10.0);
        assert_eq!(ClockConfig::default().tick_threshold(f64::NAN).tick_threshold, 10.0);
        assert_eq!(ClockConfig::default().tick_threshold(2.5).tick_threshold, 2.5);
    }

    #[test]
    fn zero_cadence_saves_every_tick() {
        assert_eq!(ClockConfig::default().save_every(0).effective_save_every(), 1);
    }
}
