/// Tide-curve analysis for the tide-pool service.
///
/// Submodules:
/// - `extrema`  — plateau-aware minima/maxima detection over a day's curve.
/// - `daylight` — daylight-window filtering of minima.
/// - `ranking`  — best-N day selection over a rolling window.
///
/// This module assembles the per-day pieces into a `DaySummary` (the full
/// derived view of one day: heights, extrema, sun positions, SVG points)
/// and fans a window of days out over a worker pool to build ranking
/// candidates. Everything downstream of the database rows is pure and
/// per-call, so the fan-out needs no coordination beyond a channel.

pub mod daylight;
pub mod extrema;
pub mod ranking;

use std::sync::mpsc;

use chrono::NaiveDate;
use serde::Serialize;
use threadpool::ThreadPool;

use crate::analysis::ranking::DayCandidate;
use crate::chart;
use crate::model::{day_percent, Extremum, HeightPoint, SunEvents, TideReading};

/// Minimum number of samples (including the two padding rows) for a day's
/// analysis to mean anything. Below this there is no interior to scan.
pub const MIN_SAMPLES: usize = 3;

/// Sun event times restated as day-position percentages, for placing
/// markers along the chart's time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunPercents {
    pub dawn_pct: f64,
    pub sunrise_pct: f64,
    pub noon_pct: f64,
    pub sunset_pct: f64,
    pub dusk_pct: f64,
}

impl SunPercents {
    fn from_events(sun: &SunEvents) -> Self {
        SunPercents {
            dawn_pct: day_percent(sun.dawn),
            sunrise_pct: day_percent(sun.sunrise),
            noon_pct: day_percent(sun.noon),
            sunset_pct: day_percent(sun.sunset),
            dusk_pct: day_percent(sun.dusk),
        }
    }
}

/// The complete derived view of one day at one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// The day's own curve points; the adjacent-day padding rows are
    /// stripped after extrema detection.
    pub heights: Vec<HeightPoint>,
    pub minima: Vec<Extremum>,
    pub maxima: Vec<Extremum>,
    /// The lowest minimum of the day regardless of daylight. `None` when
    /// the curve has no interior minimum.
    pub lowest_tide: Option<Extremum>,
    /// The lowest minimum inside the daylight window; `None` means "no
    /// visitable low tide today".
    pub lowest_daylight_minimum: Option<Extremum>,
    pub sun: SunEvents,
    pub sun_pct: SunPercents,
    /// Polyline points for a 100×100 viewBox, see `chart::svg_points`.
    pub svg_points: String,
}

/// Derives the full day summary from one day's readings (padded with one
/// row from each adjacent day) and that day's sun events.
///
/// Returns `None` when fewer than three samples are available —
/// "insufficient data for this day" is a valid terminal state the caller
/// renders as "no tide chart", never an error.
pub fn summarize_day(
    date: NaiveDate,
    readings: &[TideReading],
    sun: &SunEvents,
) -> Option<DaySummary> {
    if readings.len() < MIN_SAMPLES {
        return None;
    }

    let padded: Vec<HeightPoint> = readings
        .iter()
        .map(|r| {
            let time = r.reading_time.time();
            HeightPoint {
                time,
                time_pct: day_percent(time),
                feet: r.mllw_feet,
            }
        })
        .collect();

    let (minima, maxima) = extrema::detect_extrema(&padded);

    // First and last rows are the adjacent-day context; they were needed
    // for boundary extrema but do not belong on this day's chart.
    let heights: Vec<HeightPoint> = padded[1..padded.len() - 1].to_vec();

    let lowest_tide = minima
        .iter()
        .min_by(|a, b| a.feet.total_cmp(&b.feet))
        .cloned();
    let lowest_daylight_minimum = daylight::lowest_daylight_minimum(&minima, sun);
    let svg_points = chart::svg_points(&heights);

    Some(DaySummary {
        date,
        heights,
        minima,
        maxima,
        lowest_tide,
        lowest_daylight_minimum,
        sun: sun.clone(),
        sun_pct: SunPercents::from_events(sun),
        svg_points,
    })
}

// ---------------------------------------------------------------------------
// Candidate construction
// ---------------------------------------------------------------------------

/// Everything needed to evaluate one day of a ranking window. The caller
/// (endpoint or CLI) loads the rows; days without a sun table entry are
/// omitted before this point since they cannot be daylight-filtered.
#[derive(Debug, Clone)]
pub struct DayInput {
    pub date: NaiveDate,
    pub readings: Vec<TideReading>,
    pub sun: SunEvents,
}

/// Evaluates a window of days in parallel and returns one `DayCandidate`
/// per input, in date order.
///
/// Each day's analysis is pure and independent, so the work fans out over
/// a thread pool and reassembles through a channel. Days with insufficient
/// tide data come back as candidates with no daylight minimum — they stay
/// in the window and sort last during ranking.
pub fn build_candidates(inputs: Vec<DayInput>, workers: usize) -> Vec<DayCandidate> {
    if inputs.is_empty() {
        return Vec::new();
    }

    let pool = ThreadPool::new(workers.max(1));
    let (tx, rx) = mpsc::channel();
    let count = inputs.len();

    for input in inputs {
        let tx = tx.clone();
        pool.execute(move || {
            let minimum = summarize_day(input.date, &input.readings, &input.sun)
                .and_then(|summary| summary.lowest_daylight_minimum);
            // Send fails only if the receiver hung up, i.e. the caller is gone.
            let _ = tx.send(DayCandidate::new(input.date, minimum, &input.sun));
        });
    }
    drop(tx);

    let mut candidates: Vec<DayCandidate> = rx.iter().take(count).collect();
    candidates.sort_by_key(|c| c.date);
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
