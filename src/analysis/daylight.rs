/// Daylight filtering of tide minima.
///
/// A low tide is only worth a visit if it happens while the pools are
/// visible, so each day's minima are gated by that day's sunrise/sunset
/// window before the best one is chosen.

use crate::model::{Extremum, SunEvents};

/// Picks the lowest minimum that falls inside the daylight window
/// (`sunrise..=sunset`, both ends inclusive).
///
/// Ties on height resolve to the earliest time: `minima` arrives
/// time-ordered from the extrema scan, and the strict `<` comparison keeps
/// the first of any equal-height pair. Returns `None` when no minimum is
/// visible in daylight — a valid answer meaning "no safe low-tide window
/// that day", not an error.
pub fn lowest_daylight_minimum(minima: &[Extremum], sun: &SunEvents) -> Option<Extremum> {
    let mut best: Option<&Extremum> = None;
    for minimum in minima.iter().filter(|m| sun.contains(m.time)) {
        match best {
            Some(current) if minimum.feet < current.feet => best = Some(minimum),
            None => best = Some(minimum),
            _ => {}
        }
    }
    best.cloned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
