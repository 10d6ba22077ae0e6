/// HTTP endpoint for tide-pool day data
///
/// Provides a small JSON API for the presentation layer (templates,
/// static-site builds, or ad-hoc tooling) to query derived tide data.
///
/// Endpoints:
/// - GET /health - Service health check
/// - GET /place/{slug} - Place registry metadata
/// - GET /place/{slug}/tides/{YYYY-MM-DD} - Full day summary
/// - GET /place/{slug}/best-days?from=YYYY-MM-DD&days=30&top=4 - Ranked best days

use chrono::{NaiveDate, Utc};
use postgres::Client;
use serde::Serialize;

use crate::analysis::ranking::{
    rank_best_days, ranking_window, DayCandidate, RankedSelection, DEFAULT_SELECTION_SIZE,
    DEFAULT_WINDOW_DAYS,
};
use crate::analysis::{build_candidates, summarize_day, DayInput, DaySummary};
use crate::chart::{depth_view, DepthView};
use crate::db;
use crate::places::{find_place, Place};

/// Worker threads for the per-day fan-out when building a ranking window.
const ANALYSIS_WORKERS: usize = 4;

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Place metadata response, straight from the registry
#[derive(Debug, Serialize)]
pub struct PlaceResponse {
    pub slug: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: String,
    pub station_id: String,
    pub station_name: String,
    pub tagline: String,
    pub description: String,
    pub address: String,
    pub parking: String,
}

/// One day's full tide summary. `available` is false when the day has
/// insufficient tide data or no sun events — a valid answer, not an error,
/// so it still comes back as HTTP 200.
#[derive(Debug, Serialize)]
pub struct TideDayResponse {
    pub place: String,
    pub date: NaiveDate,
    pub available: bool,
    pub summary: Option<DaySummary>,
}

/// One selected best day, with its depth-gauge geometry relative to the
/// whole window's range of visible low tides.
#[derive(Debug, Serialize)]
pub struct BestDayEntry {
    pub date: NaiveDate,
    pub candidate: DayCandidate,
    pub depth_view: Option<DepthView>,
}

/// The ranked best-days response: selected days in date order plus the
/// bare date list for membership checks.
#[derive(Debug, Serialize)]
pub struct BestDaysResponse {
    pub place: String,
    pub from: NaiveDate,
    pub window_days: u32,
    pub best_days: Vec<BestDayEntry>,
    pub dates: Vec<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Data Assembly
// ---------------------------------------------------------------------------

/// Build the full day summary response for a place and date
pub fn fetch_tide_day(
    client: &mut Client,
    place: &Place,
    date: NaiveDate,
) -> Result<TideDayResponse, String> {
    let sun = db::fetch_sun_events(client, &place.slug, date)
        .map_err(|e| format!("Sun events query failed: {}", e))?;

    let summary = match sun {
        Some(sun) => {
            let readings = db::fetch_day_readings(client, &place.station_id, date)
                .map_err(|e| format!("Tide predictions query failed: {}", e))?;
            summarize_day(date, &readings, &sun)
        }
        None => None,
    };

    Ok(TideDayResponse {
        place: place.slug.clone(),
        date,
        available: summary.is_some(),
        summary,
    })
}

/// Build and rank the best-days window for a place
pub fn fetch_best_days(
    client: &mut Client,
    place: &Place,
    from: NaiveDate,
    window_days: u32,
    top: usize,
) -> Result<BestDaysResponse, String> {
    let mut inputs = Vec::new();
    for date in ranking_window(from, window_days) {
        // Days outside the precomputed sun table cannot be daylight-gated;
        // they drop out of the window entirely.
        let sun = db::fetch_sun_events(client, &place.slug, date)
            .map_err(|e| format!("Sun events query failed: {}", e))?;
        if let Some(sun) = sun {
            let readings = db::fetch_day_readings(client, &place.station_id, date)
                .map_err(|e| format!("Tide predictions query failed: {}", e))?;
            inputs.push(DayInput {
                date,
                readings,
                sun,
            });
        }
    }

    let candidates = build_candidates(inputs, ANALYSIS_WORKERS);
    let selection = rank_best_days(&candidates, top);

    Ok(to_best_days_response(place, from, window_days, &candidates, selection))
}

/// Attach depth-gauge geometry to each selected day. The gauge range is
/// the span of visible low tides across the whole window, so a bar at the
/// far left marks the window's very best day.
fn to_best_days_response(
    place: &Place,
    from: NaiveDate,
    window_days: u32,
    candidates: &[DayCandidate],
    selection: RankedSelection,
) -> BestDaysResponse {
    let window_heights: Vec<f64> = candidates
        .iter()
        .filter_map(|c| c.lowest_daylight_minimum.as_ref().map(|m| m.feet))
        .collect();
    let min_tide = window_heights.iter().copied().fold(f64::INFINITY, f64::min);
    let max_tide = window_heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let dates = selection.dates();
    let best_days = selection
        .days
        .into_iter()
        .map(|candidate| {
            let gauge = candidate
                .lowest_daylight_minimum
                .as_ref()
                .filter(|_| !window_heights.is_empty())
                .map(|m| depth_view(min_tide, max_tide, m.feet));
            BestDayEntry {
                date: candidate.date,
                candidate,
                depth_view: gauge,
            }
        })
        .collect();

    BestDaysResponse {
        place: place.slug.clone(),
        from,
        window_days,
        best_days,
        dates,
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(
    port: u16,
    mut client: Client,
    places: Vec<Place>,
) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /health - Service health check");
    println!("   GET /place/{{slug}} - Place metadata");
    println!("   GET /place/{{slug}}/tides/{{YYYY-MM-DD}} - Day tide summary");
    println!("   GET /place/{{slug}}/best-days - Ranked best days\n");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url.as_str(), ""),
        };

        // Route requests
        let response = if path == "/health" {
            handle_health()
        } else if let Some(rest) = path.strip_prefix("/place/") {
            route_place(&mut client, &places, rest, query)
        } else {
            create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": [
                        "/health",
                        "/place/{slug}",
                        "/place/{slug}/tides/{YYYY-MM-DD}",
                        "/place/{slug}/best-days"
                    ]
                }),
            )
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Dispatch /place/{slug}[/...] routes
fn route_place(
    client: &mut Client,
    places: &[Place],
    rest: &str,
    query: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut segments = rest.splitn(2, '/');
    let slug = segments.next().unwrap_or("");
    let tail = segments.next();

    let place = match find_place(places, slug) {
        Some(place) => place,
        None => {
            return create_response(
                404,
                serde_json::json!({
                    "error": format!("Place '{}' not found in registry", slug),
                    "slug": slug
                }),
            )
        }
    };

    match tail {
        None => handle_place_metadata(place),
        Some(tail) if tail.starts_with("tides/") => {
            let date_str = tail.trim_start_matches("tides/");
            match date_str.parse::<NaiveDate>() {
                Ok(date) => handle_tide_day(client, place, date),
                Err(_) => create_response(
                    400,
                    serde_json::json!({
                        "error": format!("Invalid date '{}', expected YYYY-MM-DD", date_str)
                    }),
                ),
            }
        }
        Some("best-days") => handle_best_days(client, place, query),
        Some(other) => create_response(
            404,
            serde_json::json!({
                "error": format!("Unknown place route '{}'", other)
            }),
        ),
    }
}

/// Handle /health endpoint
fn handle_health() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "tidepool_service",
            "version": "0.1.0"
        }),
    )
}

/// Handle /place/{slug} endpoint
fn handle_place_metadata(place: &Place) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = PlaceResponse {
        slug: place.slug.clone(),
        name: place.name.clone(),
        latitude: place.latitude,
        longitude: place.longitude,
        time_zone: place.time_zone.clone(),
        station_id: place.station_id.clone(),
        station_name: place.station_name.clone(),
        tagline: place.tagline.clone(),
        description: place.description.clone(),
        address: place.address.clone(),
        parking: place.parking.clone(),
    };
    create_response(200, serde_json::to_value(&response).unwrap())
}

/// Handle /place/{slug}/tides/{date} endpoint
fn handle_tide_day(
    client: &mut Client,
    place: &Place,
    date: NaiveDate,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    match fetch_tide_day(client, place, date) {
        Ok(data) => create_response(200, serde_json::to_value(&data).unwrap()),
        Err(e) => create_response(
            500,
            serde_json::json!({
                "error": e,
                "place": place.slug,
                "date": date.to_string()
            }),
        ),
    }
}

/// Handle /place/{slug}/best-days endpoint
fn handle_best_days(
    client: &mut Client,
    place: &Place,
    query: &str,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    // The window start defaults to the current UTC date; callers wanting
    // place-local "today" pass from= explicitly.
    let from = query_param(query, "from")
        .and_then(|v| v.parse::<NaiveDate>().ok())
        .unwrap_or_else(|| Utc::now().date_naive());
    let window_days = query_param(query, "days")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_WINDOW_DAYS);
    let top = query_param(query, "top")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_SELECTION_SIZE);

    match fetch_best_days(client, place, from, window_days, top) {
        Ok(data) => create_response(200, serde_json::to_value(&data).unwrap()),
        Err(e) => create_response(
            500,
            serde_json::json!({
                "error": e,
                "place": place.slug
            }),
        ),
    }
}

/// Extract a single query-string parameter value
fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: serde_json::Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap();
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Extremum, ExtremumKind, SunEvents};
    use chrono::NaiveTime;

    fn place() -> Place {
        Place {
            slug: "pillar-point".to_string(),
            name: "Pillar Point Harbor Reef".to_string(),
            latitude: 37.4957,
            longitude: -122.4989,
            time_zone: "America/Los_Angeles".to_string(),
            station_id: "9414131".to_string(),
            station_name: "Pillar Point Harbor, CA".to_string(),
            tagline: String::new(),
            description: String::new(),
            address: String::new(),
            parking: String::new(),
        }
    }

    fn candidate(day: u32, feet: Option<f64>) -> DayCandidate {
        let sun = SunEvents {
            dawn: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            sunrise: NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            noon: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            sunset: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            dusk: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        };
        let minimum = feet.map(|feet| Extremum {
            kind: ExtremumKind::Minimum,
            time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            time_pct: 45.83,
            feet,
        });
        DayCandidate::new(
            NaiveDate::from_ymd_opt(2020, 8, day).unwrap(),
            minimum,
            &sun,
        )
    }

    #[test]
    fn test_query_param_extraction() {
        let query = "from=2020-08-19&days=30&top=4";
        assert_eq!(query_param(query, "from"), Some("2020-08-19"));
        assert_eq!(query_param(query, "days"), Some("30"));
        assert_eq!(query_param(query, "top"), Some("4"));
        assert_eq!(query_param(query, "missing"), None);
        assert_eq!(query_param("", "from"), None);
    }

    #[test]
    fn test_best_days_response_gauges_against_window_range() {
        let candidates = vec![
            candidate(19, Some(0.0)),
            candidate(20, Some(10.0)),
            candidate(21, Some(3.0)),
        ];
        let selection = rank_best_days(&candidates, 2);
        let response = to_best_days_response(
            &place(),
            NaiveDate::from_ymd_opt(2020, 8, 19).unwrap(),
            30,
            &candidates,
            selection,
        );

        assert_eq!(response.best_days.len(), 2);
        // Window range is 0.0..10.0; the 0.0 day sits at the far left,
        // the 3.0 day at 30%.
        let first = response.best_days[0].depth_view.unwrap();
        assert_eq!((first.left, first.width), (0.0, 50.0));
        let second = response.best_days[1].depth_view.unwrap();
        assert_eq!((second.left, second.width), (30.0, 20.0));
    }

    #[test]
    fn test_best_days_response_absent_minimum_has_no_gauge() {
        let candidates = vec![candidate(19, Some(1.0)), candidate(20, None)];
        let selection = rank_best_days(&candidates, 4);
        let response = to_best_days_response(
            &place(),
            NaiveDate::from_ymd_opt(2020, 8, 19).unwrap(),
            30,
            &candidates,
            selection,
        );

        assert_eq!(response.best_days.len(), 2);
        assert!(response.best_days[0].depth_view.is_some());
        assert!(
            response.best_days[1].depth_view.is_none(),
            "a day with no daylight minimum propagates null, not a sentinel"
        );
        assert!(response.best_days[1]
            .candidate
            .lowest_daylight_minimum
            .is_none());
    }

    #[test]
    fn test_best_days_response_dates_match_selection() {
        let candidates = vec![
            candidate(19, Some(2.0)),
            candidate(20, Some(-0.5)),
            candidate(21, Some(1.0)),
        ];
        let selection = rank_best_days(&candidates, 2);
        let response = to_best_days_response(
            &place(),
            NaiveDate::from_ymd_opt(2020, 8, 19).unwrap(),
            30,
            &candidates,
            selection,
        );
        assert_eq!(
            response.dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 8, 20).unwrap(),
                NaiveDate::from_ymd_opt(2020, 8, 21).unwrap()
            ]
        );
    }
}
