use std::fmt;

/// One tick is one simulated minute.
pub const TICKS_PER_HOUR: u64 = 60;
pub const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24; // 1440
pub const DAYS_PER_MONTH: u64 = 30;
pub const TICKS_PER_MONTH: u64 = TICKS_PER_DAY * DAYS_PER_MONTH; // 43200
pub const MONTHS_PER_YEAR: u64 = 12;
pub const TICKS_PER_YEAR: u64 = TICKS_PER_MONTH * MONTHS_PER_YEAR; // 518400

/// Calendar decomposition of an elapsed tick count.
///
/// Every field is a pure function of the tick count; nothing here is stored
/// or persisted. `month` and `day` are 1-based, the rest are 0-based.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CalendarTime {
    pub year: u64,
    pub month: u64,
    pub day: u64,
    pub hour: u64,
    pub minute: u64,
}

impl CalendarTime {
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self {
            year: ticks / TICKS_PER_YEAR,
            month: (ticks % TICKS_PER_YEAR) / TICKS_PER_MONTH + 1,
            day: (ticks % TICKS_PER_MONTH) / TICKS_PER_DAY + 1,
            hour: (ticks % TICKS_PER_DAY) / TICKS_PER_HOUR,
            minute: ticks % TICKS_PER_HOUR,
        }
    }
}

/// Renders `"<year>년 <month>월 <day>일 <hour>:<minute>"`.
///
/// Hour and minute are written without zero padding (`3:5`, not `03:05`).
impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}년 {}월 {}일 {}:{}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Position within the current simulated day, in `[0, TICKS_PER_DAY)`.
#[inline]
pub const fn time_of_day_tick(ticks: u64) -> u64 {
    ticks % TICKS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal(t: u64) -> CalendarTime {
        CalendarTime::from_ticks(t)
    }

    // ── decomposition ─────────────────────────────────────────────────────

    #[test]
    fn zero_is_first_minute_of_first_day() {
        let c = cal(0);
        assert_eq!((c.year, c.month, c.day, c.hour, c.minute), (0, 1, 1, 0, 0));
    }

    #[test]
    fn start_of_second_month() {
        let c = cal(43_200);
        assert_eq!((c.year, c.month, c.day, c.hour, c.minute), (0, 2, 1, 0, 0));
    }

    #[test]
    fn last_minute_of_first_year() {
        let c = cal(TICKS_PER_YEAR - 1);
        assert_eq!((c.year, c.month, c.day, c.hour, c.minute), (0, 12, 30, 23, 59));
    }

    #[test]
    fn year_rolls_over_after_twelve_months() {
        let c = cal(TICKS_PER_YEAR);
        assert_eq!((c.year, c.month, c.day), (1, 1, 1));
    }

    #[test]
    fn hours_and_minutes_within_a_day() {
        // day 3, 13:07
        let c = cal(2 * TICKS_PER_DAY + 13 * TICKS_PER_HOUR + 7);
        assert_eq!((c.day, c.hour, c.minute), (3, 13, 7));
    }

    #[test]
    fn time_of_day_wraps_daily() {
        assert_eq!(time_of_day_tick(0), 0);
        assert_eq!(time_of_day_tick(1439), 1439);
        assert_eq!(time_of_day_tick(1440), 0);
        assert_eq!(time_of_day_tick(1440 * 5 + 720), 720);
    }

    // ── formatting ────────────────────────────────────────────────────────

    #[test]
    fn display_has_no_zero_padding() {
        let c = cal(TICKS_PER_DAY + 3 * TICKS_PER_HOUR + 5);
        assert_eq!(c.to_string(), "0년 1월 2일 3:5");
    }

    #[test]
    fn display_is_deterministic() {
        let t = 3 * TICKS_PER_YEAR + 7 * TICKS_PER_MONTH + 11 * TICKS_PER_DAY + 601;
        assert_eq!(cal(t).to_string(), cal(t).to_string());
        assert_eq!(cal(t).to_string(), "3년 8월 12일 10:1");
    }
}
