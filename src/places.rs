/// Place registry loader - parses places.toml
///
/// Defines the canonical list of tide-pool places served by this service:
/// each place carries its NOAA tide station, coordinates, time zone name,
/// and visitor-facing metadata. Keeping the registry in a data file means
/// adding a place or correcting a station id never requires recompiling.
/// This is the single source of truth for slugs — all other modules look
/// places up here rather than hardcoding them.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

/// One tide-pool place loaded from places.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    /// URL slug, unique across the registry.
    pub slug: String,
    pub name: String,

    // Geographic location
    pub latitude: f64,
    pub longitude: f64,

    /// IANA time zone name, e.g. "America/Los_Angeles". Tide predictions
    /// and sun events are stored already localized to this zone; the
    /// analysis itself never converts.
    pub time_zone: String,

    /// NOAA CO-OPS tide station whose predictions cover this place.
    pub station_id: String,
    pub station_name: String,

    // Visitor-facing metadata (optional in the file)
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub parking: String,
}

/// Root structure for TOML parsing.
#[derive(Debug, Deserialize)]
struct PlaceRegistry {
    place: Vec<Place>,
}

/// Loads the place registry from places.toml.
///
/// # Panics
/// Panics if the file is missing or malformed. This is intentional — the
/// service cannot answer any request without valid place metadata.
///
/// # File Location
/// Expects `places.toml` in the current working directory (project root
/// when running via `cargo run`).
pub fn load_places() -> Vec<Place> {
    let registry_path = "places.toml";

    let contents = fs::read_to_string(registry_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", registry_path, e));

    let registry: PlaceRegistry = toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", registry_path, e));

    registry.place
}

/// Loads the registry and builds a lookup map keyed by slug, for O(1)
/// lookups while serving requests.
pub fn load_places_map() -> HashMap<String, Place> {
    load_places()
        .into_iter()
        .map(|p| (p.slug.clone(), p))
        .collect()
}

/// Looks up a place by slug in an already-loaded registry.
pub fn find_place<'a>(places: &'a [Place], slug: &str) -> Option<&'a Place> {
    places.iter().find(|p| p.slug == slug)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
