/// Integration test for the full day-analysis pipeline
///
/// Runs a real day of NOAA predictions for the Pillar Point Harbor
/// station (2020-08-19, 6-minute cadence) through the same path the
/// endpoint uses: padded readings → day summary → extrema, daylight
/// minimum, sun percentages, SVG points — and checks the results against
/// the known values for that day.
///
/// The fixture file holds the raw rows the padded-day database query
/// would return; `padded_day` mirrors that query's contract (previous
/// day's last reading, all of the day's readings, next day's first).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use tidepool_service::analysis::ranking::rank_best_days;
use tidepool_service::analysis::{build_candidates, summarize_day, DayInput};
use tidepool_service::model::{ExtremumKind, SunEvents, TideReading};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const STATION: &str = "9414131";

fn load_fixture_rows() -> Vec<TideReading> {
    let raw = include_str!("fixtures/pillar_point_2020-08-19.txt");
    raw.lines()
        .map(|line| {
            let mut parts = line.split_whitespace();
            let date = parts.next().expect("fixture line needs a date");
            let time = parts.next().expect("fixture line needs a time");
            let feet = parts.next().expect("fixture line needs a height");
            TideReading {
                station_id: STATION.to_string(),
                reading_time: NaiveDateTime::parse_from_str(
                    &format!("{} {}", date, time),
                    "%Y-%m-%d %H:%M",
                )
                .expect("fixture datetime should parse"),
                mllw_feet: feet.parse().expect("fixture height should parse"),
            }
        })
        .collect()
}

/// Mirrors the padded-day query: previous day's last row, all of the
/// day's rows, next day's first row, time-ordered.
fn padded_day(rows: &[TideReading], day: NaiveDate) -> Vec<TideReading> {
    let mut padded = Vec::new();
    if let Some(previous) = rows
        .iter()
        .filter(|r| r.reading_time.date() < day)
        .last()
    {
        padded.push(previous.clone());
    }
    padded.extend(rows.iter().filter(|r| r.reading_time.date() == day).cloned());
    if let Some(next) = rows.iter().find(|r| r.reading_time.date() > day) {
        padded.push(next.clone());
    }
    padded
}

fn pillar_point_sun() -> SunEvents {
    SunEvents {
        dawn: NaiveTime::from_hms_opt(6, 2, 8).unwrap(),
        sunrise: NaiveTime::from_hms_opt(6, 30, 10).unwrap(),
        noon: NaiveTime::from_hms_opt(13, 13, 37).unwrap(),
        sunset: NaiveTime::from_hms_opt(19, 56, 5).unwrap(),
        dusk: NaiveTime::from_hms_opt(20, 24, 2).unwrap(),
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 8, 19).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Day summary pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_padded_day_has_expected_shape() {
    let padded = padded_day(&load_fixture_rows(), day());
    // 240 six-minute readings for the day plus one padding row per side.
    assert_eq!(padded.len(), 242);
    assert_eq!(padded.first().unwrap().reading_time.time(), t(23, 54));
    assert!(padded.first().unwrap().reading_time.date() < day());
    assert!(padded.last().unwrap().reading_time.date() > day());
}

#[test]
fn test_full_day_extrema_match_known_values() {
    let padded = padded_day(&load_fixture_rows(), day());
    let summary = summarize_day(day(), &padded, &pillar_point_sun())
        .expect("a full day of readings is analyzable");

    let minima: Vec<(NaiveTime, f64, f64)> = summary
        .minima
        .iter()
        .map(|m| (m.time, m.time_pct, m.feet))
        .collect();
    assert_eq!(
        minima,
        vec![(t(5, 42), 23.75, -0.77), (t(17, 30), 72.92, 1.979)],
        "the day has a deep pre-dawn low and a shallow afternoon low"
    );

    let maxima: Vec<(NaiveTime, f64, f64)> = summary
        .maxima
        .iter()
        .map(|m| (m.time, m.time_pct, m.feet))
        .collect();
    assert_eq!(
        maxima,
        vec![(t(12, 12), 50.83, 4.97), (t(23, 24), 97.5, 6.397)],
        "the 23:24 high is a two-sample plateau; only its first member reports"
    );

    assert!(summary.minima.iter().all(|m| m.kind == ExtremumKind::Minimum));
    assert!(summary.maxima.iter().all(|m| m.kind == ExtremumKind::Maximum));
}

#[test]
fn test_full_day_lowest_and_daylight_minimum() {
    let padded = padded_day(&load_fixture_rows(), day());
    let summary = summarize_day(day(), &padded, &pillar_point_sun()).unwrap();

    let lowest = summary.lowest_tide.expect("day has minima");
    assert_eq!((lowest.time, lowest.feet), (t(5, 42), -0.77));

    // The deepest low is before sunrise; the visitable one is at 17:30.
    let daylight = summary
        .lowest_daylight_minimum
        .expect("afternoon low falls in daylight");
    assert_eq!((daylight.time, daylight.time_pct, daylight.feet), (t(17, 30), 72.92, 1.979));
}

#[test]
fn test_full_day_heights_strip_padding() {
    let padded = padded_day(&load_fixture_rows(), day());
    let summary = summarize_day(day(), &padded, &pillar_point_sun()).unwrap();

    assert_eq!(summary.heights.len(), 240);
    assert_eq!(summary.heights.first().unwrap().time, t(0, 0));
    assert_eq!(summary.heights.last().unwrap().time, t(23, 54));

    // The "nice round number" sample: 22:48 is exactly 95% of the day.
    let sample = &summary.heights[summary.heights.len() - 12];
    assert_eq!(sample.time, t(22, 48));
    assert_eq!(sample.time_pct, 95.0);
    assert_eq!(sample.feet, 6.253);
}

#[test]
fn test_full_day_sun_percentages() {
    let padded = padded_day(&load_fixture_rows(), day());
    let summary = summarize_day(day(), &padded, &pillar_point_sun()).unwrap();

    assert_eq!(summary.sun_pct.dawn_pct, 25.15);
    assert_eq!(summary.sun_pct.sunrise_pct, 27.09);
    assert_eq!(summary.sun_pct.noon_pct, 55.11);
    assert_eq!(summary.sun_pct.sunset_pct, 83.06);
    assert_eq!(summary.sun_pct.dusk_pct, 85.0);
}

#[test]
fn test_full_day_svg_points() {
    let padded = padded_day(&load_fixture_rows(), day());
    let summary = summarize_day(day(), &padded, &pillar_point_sun()).unwrap();

    let points: Vec<&str> = summary.svg_points.split(' ').collect();
    assert_eq!(points.len(), 240, "one polyline point per displayed height");
    assert!(
        points[0].starts_with("0,"),
        "midnight sits at x = 0, got '{}'",
        points[0]
    );

    // Every coordinate stays inside the 100×100 viewBox.
    for point in points {
        let (x, y) = point.split_once(',').expect("point should be x,y");
        let x: f64 = x.parse().unwrap();
        let y: f64 = y.parse().unwrap();
        assert!((0.0..=100.0).contains(&x), "x out of range: {}", x);
        assert!((0.0..=100.0).contains(&y), "y out of range: {}", y);
    }
}

#[test]
fn test_day_with_no_rows_is_unavailable() {
    // 2020-08-25 has no predictions in the fixture table.
    let missing = NaiveDate::from_ymd_opt(2020, 8, 25).unwrap();
    let padded = padded_day(
        &load_fixture_rows()
            .into_iter()
            .filter(|r| r.reading_time.date() <= day())
            .collect::<Vec<_>>(),
        missing,
    );
    assert!(
        summarize_day(missing, &padded, &pillar_point_sun()).is_none(),
        "a day without enough samples reports as unavailable, not an error"
    );
}

// ---------------------------------------------------------------------------
// Window ranking on top of the real day
// ---------------------------------------------------------------------------

#[test]
fn test_real_day_wins_ranking_against_shallower_days() {
    let rows = load_fixture_rows();
    let padded = padded_day(&rows, day());
    let sun = pillar_point_sun();

    // Window of four days: the real day plus three synthetic days whose
    // curves are the same shape lifted by 2 ft (shallower lows).
    let mut inputs = vec![DayInput {
        date: day(),
        readings: padded.clone(),
        sun: sun.clone(),
    }];
    for offset in 1..4 {
        let date = day() + chrono::Duration::days(offset);
        let readings: Vec<TideReading> = padded
            .iter()
            .map(|r| TideReading {
                station_id: r.station_id.clone(),
                reading_time: r.reading_time + chrono::Duration::days(offset),
                mllw_feet: r.mllw_feet + 2.0,
            })
            .collect();
        inputs.push(DayInput {
            date,
            readings,
            sun: sun.clone(),
        });
    }

    let candidates = build_candidates(inputs, 4);
    assert_eq!(candidates.len(), 4);

    let selection = rank_best_days(&candidates, 2);
    assert!(selection.contains(day()), "the unshifted day has the lowest daylight low");
    assert_eq!(
        selection.dates().first().copied(),
        Some(day()),
        "output is chronological and the real day is earliest"
    );
}
