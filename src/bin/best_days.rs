//! Best Days Report
//!
//! Ranks the upcoming days for one tide-pool place by its lowest
//! daylight-visible low tide and prints the winners as a table.
//!
//! Usage:
//!   cargo run --bin best_days -- --place pillar-point
//!
//! Options:
//!   --place SLUG       Place slug from places.toml (required)
//!   --from YYYY-MM-DD  Window start date (default: today, UTC)
//!   --days N           Window length in days (default: 30)
//!   --top N            Number of best days to select (default: 4)
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string

use chrono::{Datelike, NaiveDate, Utc};
use std::env;

use tidepool_service::analysis::ranking::{DEFAULT_SELECTION_SIZE, DEFAULT_WINDOW_DAYS};
use tidepool_service::chart::ordinal;
use tidepool_service::db;
use tidepool_service::endpoint::fetch_best_days;
use tidepool_service::places;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌊 Best Tide-Pool Days");
    println!("======================\n");

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let arg_after = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let slug = arg_after("--place").unwrap_or_else(|| {
        eprintln!("Error: --place SLUG is required");
        eprintln!("Usage: best_days --place SLUG [--from YYYY-MM-DD] [--days N] [--top N]");
        std::process::exit(1);
    });
    let from: NaiveDate = match arg_after("--from") {
        Some(value) => value.parse()?,
        None => Utc::now().date_naive(),
    };
    let days: u32 = match arg_after("--days") {
        Some(value) => value.parse()?,
        None => DEFAULT_WINDOW_DAYS,
    };
    let top: usize = match arg_after("--top") {
        Some(value) => value.parse()?,
        None => DEFAULT_SELECTION_SIZE,
    };

    // Look the place up in the registry
    let registry = places::load_places();
    let place = places::find_place(&registry, &slug).unwrap_or_else(|| {
        eprintln!("Error: place '{}' not found in places.toml", slug);
        eprintln!("Known places:");
        for place in &registry {
            eprintln!("  - {}", place.slug);
        }
        std::process::exit(1);
    });

    // Connect to database with validation
    println!("📊 Connecting to database...");
    let mut client = db::connect_and_verify(&["tide_predictions", "sunrise_sunset"])
        .unwrap_or_else(|e| {
            eprintln!("\n{}\n", e);
            std::process::exit(1);
        });
    println!("✓ Connected\n");

    println!(
        "📅 Ranking {} days from {} for {} (top {})...\n",
        days, from, place.name, top
    );

    let report = fetch_best_days(&mut client, place, from, days, top)
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    if report.best_days.is_empty() {
        println!("No days in the window have tide and sun data.");
        return Ok(());
    }

    for entry in &report.best_days {
        let date = entry.date;
        let label = format!("{} {}", date.format("%b"), ordinal(date.day()));
        match &entry.candidate.lowest_daylight_minimum {
            Some(low) => {
                println!(
                    "  {:<9} {:>6.2} ft at {}  (sunrise {}, sunset {})",
                    label,
                    low.feet,
                    low.time.format("%H:%M"),
                    entry.candidate.sunrise.format("%H:%M"),
                    entry.candidate.sunset.format("%H:%M"),
                );
            }
            None => {
                println!(
                    "  {:<9} no daylight low tide  (sunrise {}, sunset {})",
                    label,
                    entry.candidate.sunrise.format("%H:%M"),
                    entry.candidate.sunset.format("%H:%M"),
                );
            }
        }
    }

    Ok(())
}
