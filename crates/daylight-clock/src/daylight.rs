//! Day/night brightness derived from the time of day.

use std::f64::consts::PI;

use crate::calendar::TICKS_PER_DAY;

/// Brightness for a tick-of-day: `floor(255 * sin(t / 1440 * π))`.
///
/// Zero at midnight, 255 at noon, symmetric around noon. Inputs beyond one
/// day are wrapped first, so any tick count may be passed.
pub fn brightness(time_of_day_tick: u64) -> u8 {
    let t = (time_of_day_tick % TICKS_PER_DAY) as f64;
    let v = (255.0 * (t / TICKS_PER_DAY as f64 * PI).sin()).floor();
    v.clamp(0.0, 255.0) as u8
}

/// Background colour for a brightness value: a deep blue tint that rises
/// into cyan during the day.
#[inline]
pub const fn backdrop_rgb(brightness: u8) -> [u8; 3] {
    [0x10, brightness, brightness]
}

/// Secondary status metric: `"<b> , <b as lowercase hex>"`.
pub fn brightness_label(brightness: u8) -> String {
    format!("{brightness} , {brightness:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_at_midnight() {
        assert_eq!(brightness(0), 0);
        assert_eq!(brightness(TICKS_PER_DAY), 0);
    }

    #[test]
    fn brightest_at_noon() {
        assert_eq!(brightness(720), 255);
    }

    #[test]
    fn symmetric_around_noon() {
        for t in [1u64, 60, 300, 600, 719] {
            assert_eq!(brightness(t), brightness(TICKS_PER_DAY - t), "t = {t}");
        }
    }

    #[test]
    fn rises_through_the_morning() {
        let mut prev = 0;
        for t in (0..=720).step_by(30) {
            let b = brightness(t);
            assert!(b >= prev, "t = {t}");
            prev = b;
        }
    }

    #[test]
    fn known_sample() {
        // 255 * sin(π/6) = 127.5
        assert_eq!(brightness(240), 127);
    }

    #[test]
    fn backdrop_keeps_small_values_in_their_channels() {
        assert_eq!(backdrop_rgb(5), [0x10, 0x05, 0x05]);
        assert_eq!(backdrop_rgb(0xab), [0x10, 0xab, 0xab]);
    }

    #[test]
    fn label_shows_decimal_and_hex() {
        assert_eq!(brightness_label(0), "0 , 0");
        assert_eq!(brightness_label(255), "255 , ff");
        assert_eq!(brightness_label(10), "10 , a");
    }
}
