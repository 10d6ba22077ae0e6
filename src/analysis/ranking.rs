/// Best-day ranking over a rolling window of day candidates.
///
/// Each upcoming day is summarized into a `DayCandidate` (its lowest
/// daylight-visible minimum plus that day's sun times); the ranker picks
/// the `n` days with the lowest visible low tide and hands them back in
/// chronological order for display.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::model::{Extremum, SunEvents};

/// Default size of the rolling window: today plus the next 29 days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Default number of best days to select.
pub const DEFAULT_SELECTION_SIZE: usize = 4;

/// One day's summarized tide/daylight data for ranking purposes.
///
/// `lowest_daylight_minimum` is `None` when the day has no minimum inside
/// its daylight window (or no tide data at all). Absent days still take
/// part in ranking — they just sort after every day with a real value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCandidate {
    pub date: NaiveDate,
    pub lowest_daylight_minimum: Option<Extremum>,
    pub sunrise: chrono::NaiveTime,
    pub sunset: chrono::NaiveTime,
}

impl DayCandidate {
    pub fn new(date: NaiveDate, minimum: Option<Extremum>, sun: &SunEvents) -> Self {
        DayCandidate {
            date,
            lowest_daylight_minimum: minimum,
            sunrise: sun.sunrise,
            sunset: sun.sunset,
        }
    }
}

/// The chosen best days, in chronological order (selection happened by
/// height; the re-sort is part of the contract — output order is display
/// order, not ranking order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSelection {
    pub days: Vec<DayCandidate>,
}

impl RankedSelection {
    /// The selected dates, for "is this one of the best days" checks.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.iter().any(|d| d.date == date)
    }
}

/// Selects the `n` candidates with the lowest daylight minimum.
///
/// Sort key is the minimum's height ascending, with "absent sorts last":
/// days without a daylight minimum only survive selection when fewer than
/// `n` days have one, in which case they propagate their absent value
/// (serialized as `null`) rather than a sentinel height. The sort is
/// stable, so equal heights and absent-vs-absent keep window order, which
/// is date order.
pub fn rank_best_days(candidates: &[DayCandidate], n: usize) -> RankedSelection {
    let mut ranked: Vec<DayCandidate> = candidates.to_vec();
    ranked.sort_by(|a, b| {
        match (&a.lowest_daylight_minimum, &b.lowest_daylight_minimum) {
            (Some(a_min), Some(b_min)) => a_min.feet.total_cmp(&b_min.feet),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    ranked.truncate(n);
    ranked.sort_by_key(|d| d.date);
    RankedSelection { days: ranked }
}

/// The dates covered by a ranking window starting at an explicit reference
/// date. The reference date is always a parameter — "today" belongs to the
/// outermost caller, never to the analysis.
pub fn ranking_window(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64).map(|i| start + Duration::days(i)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
