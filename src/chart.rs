/// Display geometry for tide charts.
///
/// The presentation layer is external; this module only produces the
/// numbers and strings it renders from:
/// - the depth-gauge bar (how today's low tide sits within the window's
///   min/max range, anchored at the 50% midpoint),
/// - SVG-ready polyline points for the day's tide curve,
/// - ordinal suffixes for date display ("Aug 19th").

use serde::Serialize;

use crate::model::{round2, HeightPoint};

// ---------------------------------------------------------------------------
// Depth gauge
// ---------------------------------------------------------------------------

/// CSS-style geometry for the depth-gauge bar: `left` offset and `width`,
/// both percentages of the gauge track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthView {
    pub left: f64,
    pub width: f64,
}

/// Positions the depth-gauge bar for one day.
///
/// `today_lowest_tide` is clamped into `[min_tide, max_tide]`, mapped to a
/// 0–100 position, then folded around the 50% midpoint: the bar always
/// starts or ends at the middle of the track and extends toward the day's
/// position.
///
/// A degenerate range (`max_tide == min_tide`) has no meaningful position,
/// so the bar collapses to a zero-width mark at the midpoint.
pub fn depth_view(min_tide: f64, max_tide: f64, today_lowest_tide: f64) -> DepthView {
    if max_tide == min_tide {
        return DepthView { left: 50.0, width: 0.0 };
    }

    let clamped = today_lowest_tide.clamp(min_tide, max_tide);
    let left = 100.0 * (clamped - min_tide) / (max_tide - min_tide);

    if left > 50.0 {
        DepthView { left: 50.0, width: left - 50.0 }
    } else {
        DepthView { left, width: 50.0 - left }
    }
}

// ---------------------------------------------------------------------------
// SVG polyline
// ---------------------------------------------------------------------------

/// Renders the day's heights as SVG polyline points in a 100×100 viewBox:
/// x is the time-of-day percentage, y is the height normalized to the
/// day's own min/max range and inverted (SVG y grows downward, so the
/// highest tide sits at y = 0). A flat day renders as a midline at y = 50.
pub fn svg_points(heights: &[HeightPoint]) -> String {
    let min = heights.iter().map(|h| h.feet).fold(f64::INFINITY, f64::min);
    let max = heights.iter().map(|h| h.feet).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    heights
        .iter()
        .map(|h| {
            let y = if range == 0.0 {
                50.0
            } else {
                round2(100.0 * (max - h.feet) / range)
            };
            format!("{},{}", h.time_pct, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Ordinal dates
// ---------------------------------------------------------------------------

/// English ordinal form of a day number: 1st, 2nd, 3rd, 4th … 11th, 12th,
/// 13th … 21st, 22nd, 23rd.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
