/// tidepool_service: tide-pool low-tide analysis and serving.
///
/// # Module structure
///
/// ```text
/// tidepool_service
/// ├── model       — shared data types (TideReading, Extremum, SunEvents, …)
/// │                 and time-of-day normalization (day_fraction, day_percent)
/// ├── places      — place registry loader (places.toml): slug → NOAA station,
/// │                 coordinates, time zone, visitor metadata
/// ├── db          — read-only PostgreSQL queries (tide_predictions with
/// │                 adjacent-day padding, sunrise_sunset rows)
/// ├── analysis
/// │   ├── extrema  — plateau-aware minima/maxima scan
/// │   ├── daylight — daylight-window filtering of minima
/// │   └── ranking  — best-N day selection over a rolling window
/// ├── chart       — depth-gauge geometry, SVG polyline points, ordinals
/// └── endpoint    — JSON HTTP API for the presentation layer
/// ```
///
/// Tide prediction and sunrise/sunset tables are populated by external
/// fetch tooling; everything here derives read-only views from them.

/// Public modules
pub mod analysis;
pub mod chart;
pub mod db;
pub mod endpoint;
pub mod model;
pub mod places;
