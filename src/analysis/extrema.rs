/// Plateau-aware extrema detection over a day's tide curve.
///
/// The input is one day's time-ordered height points, padded with the last
/// reading of the previous day and the first reading of the next day so
/// that extrema right at the day boundary still have comparison context.
/// The first and last elements are never themselves reported.
///
/// Predicted tide curves are smooth but quantized to three decimal places,
/// so consecutive samples around a turning point frequently share the
/// exact same height (a plateau). A naive immediate-neighbor comparison
/// misses those turning points entirely; the scan below looks forward
/// through equal-valued runs to find the next strictly different height
/// before deciding.

use crate::model::{Extremum, ExtremumKind, HeightPoint};

/// Scans `points` left to right and returns `(minima, maxima)`.
///
/// A point at index `i` is reported when the strict inequality holds
/// against both its immediate predecessor and the nearest following point
/// with a different height:
///
/// - minimum: `points[i-1].feet > points[i].feet < next_distinct.feet`
/// - maximum: `points[i-1].feet < points[i].feet > next_distinct.feet`
///
/// Requiring strictness against the immediate predecessor means only the
/// first member of a plateau can qualify; the rest of the run fails the
/// backward test and is not reported again. A trailing plateau that runs
/// into the end of the slice has no distinct successor and reports
/// nothing — without the next day's first reading there is no way to know
/// which way the curve turns.
///
/// Total over any input: fewer than three points yields two empty lists,
/// and both outputs come back time-ordered because the scan is a single
/// forward pass.
pub fn detect_extrema(points: &[HeightPoint]) -> (Vec<Extremum>, Vec<Extremum>) {
    let mut minima = Vec::new();
    let mut maxima = Vec::new();

    for i in 1..points.len() {
        let current = points[i].feet;
        let previous = points[i - 1].feet;

        // Skip forward over the plateau to the first differing height.
        let mut j = i + 1;
        while j < points.len() && points[j].feet == current {
            j += 1;
        }
        if j == points.len() {
            // Trailing plateau reaches the edge: no distinct successor.
            continue;
        }
        let next = points[j].feet;

        if previous > current && current < next {
            minima.push(to_extremum(&points[i], ExtremumKind::Minimum));
        }
        if previous < current && current > next {
            maxima.push(to_extremum(&points[i], ExtremumKind::Maximum));
        }
    }

    (minima, maxima)
}

fn to_extremum(point: &HeightPoint, kind: ExtremumKind) -> Extremum {
    Extremum {
        kind,
        time: point.time,
        time_pct: point.time_pct,
        feet: point.feet,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
