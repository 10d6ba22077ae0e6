/// Shared data types for the tide-pool analysis service.
///
/// Everything here is a plain value: readings come out of the database,
/// analysis functions derive extrema and day summaries from them, and the
/// endpoint serializes the results. Nothing in this module is mutated in
/// place — each request recomputes its values from scratch.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// One row of the `tide_predictions` table: a predicted water level for a
/// station at a point in time, in feet relative to MLLW (Mean Lower Low
/// Water). Times are local to the station's time zone — the fetch tooling
/// stores them that way, so no conversion happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct TideReading {
    pub station_id: String,
    pub reading_time: NaiveDateTime,
    pub mllw_feet: f64,
}

/// A single point on the day's tide curve, ready for display: wall-clock
/// time, position through the day as a percentage, and height in feet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightPoint {
    pub time: NaiveTime,
    pub time_pct: f64,
    pub feet: f64,
}

/// Whether an extremum is a low or a high tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

/// A local minimum or maximum on the tide curve. Carries the original
/// sample's time and height plus the derived day-position percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremum {
    pub kind: ExtremumKind,
    pub time: NaiveTime,
    pub time_pct: f64,
    pub feet: f64,
}

/// One row of the `sunrise_sunset` table: the astronomical events for a
/// place on a given day, as local times of day. Only sunrise/sunset gate
/// the daylight filter; dawn, noon and dusk are display-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunEvents {
    pub dawn: NaiveTime,
    pub sunrise: NaiveTime,
    pub noon: NaiveTime,
    pub sunset: NaiveTime,
    pub dusk: NaiveTime,
}

impl SunEvents {
    /// The daylight window used to decide which low tides are visitable.
    /// Bounds are inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.sunrise <= time && time <= self.sunset
    }
}

// ---------------------------------------------------------------------------
// Time normalization
// ---------------------------------------------------------------------------

/// Maps a time of day onto `[0, 1)`: fraction of the day elapsed.
///
/// Exact linear map — hours/24 + minutes/1440 + seconds/86400 — with no
/// timezone adjustment; callers pass times already localized to the
/// place's time zone.
pub fn day_fraction(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / 86_400.0
}

/// `day_fraction` as a display percentage, rounded to 2 decimal places.
/// 12:00:00 → 50.0, 22:48 → 95.0.
pub fn day_percent(time: NaiveTime) -> f64 {
    round2(100.0 * day_fraction(time))
}

/// Rounds to 2 decimal places for display fields.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_day_fraction_midnight_is_zero() {
        assert_eq!(day_fraction(t(0, 0, 0)), 0.0);
    }

    #[test]
    fn test_day_fraction_noon_is_half() {
        assert_eq!(day_fraction(t(12, 0, 0)), 0.5);
    }

    #[test]
    fn test_day_fraction_is_strictly_below_one() {
        assert!(day_fraction(t(23, 59, 59)) < 1.0);
    }

    #[test]
    fn test_day_percent_rounds_to_two_places() {
        // 05:42 → 5/24 + 42/1440 = 0.2375 exactly
        assert_eq!(day_percent(t(5, 42, 0)), 23.75);
        // 22:48 → the "nice round number" case from real pillar-point data
        assert_eq!(day_percent(t(22, 48, 0)), 95.0);
        // Seconds contribute: 06:02:08
        assert_eq!(day_percent(t(6, 2, 8)), 25.15);
    }

    #[test]
    fn test_daylight_window_bounds_are_inclusive() {
        let sun = SunEvents {
            dawn: t(6, 2, 8),
            sunrise: t(6, 30, 10),
            noon: t(13, 13, 37),
            sunset: t(19, 56, 5),
            dusk: t(20, 24, 2),
        };
        assert!(sun.contains(t(6, 30, 10)), "sunrise itself counts as daylight");
        assert!(sun.contains(t(19, 56, 5)), "sunset itself counts as daylight");
        assert!(sun.contains(t(12, 0, 0)));
        assert!(!sun.contains(t(6, 30, 9)), "one second before sunrise is dark");
        assert!(!sun.contains(t(19, 56, 6)), "one second after sunset is dark");
    }
}
