//! Tide-Pool Service - JSON API server
//!
//! Serves derived tide data for the registered tide-pool places:
//! per-day tide curves with plateau-aware extrema, daylight-gated low
//! tides, and ranked "best days to visit" windows. All raw data comes
//! from a read-only PostgreSQL database maintained by external fetch
//! tooling.
//!
//! Usage:
//!   cargo run --release                 # Serve on the default port 8080
//!   cargo run --release -- --port 8099  # Serve on a custom port
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string

use std::env;

use tidepool_service::db;
use tidepool_service::endpoint;
use tidepool_service::places;

const DEFAULT_PORT: u16 = 8080;

fn main() {
    println!("🌊 Tide-Pool Service");
    println!("====================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port = DEFAULT_PORT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                if i + 1 < args.len() {
                    port = match args[i + 1].parse() {
                        Ok(port) => port,
                        Err(_) => {
                            eprintln!("Error: --port requires a valid port number");
                            std::process::exit(1);
                        }
                    };
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load the place registry (panics with instructions if places.toml is bad)
    println!("📍 Loading place registry...");
    let places = places::load_places();
    for place in &places {
        println!("   {} — station {} ({})", place.slug, place.station_id, place.station_name);
    }
    println!("✓ {} places loaded\n", places.len());

    // Validate the database before serving anything
    println!("📊 Connecting to database...");
    let client = match db::connect_and_verify(&["tide_predictions", "sunrise_sunset"]) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("\n❌ Database validation failed:\n\n{}\n", e);
            std::process::exit(1);
        }
    };
    println!("✓ Connected, tide tables present\n");

    println!("🚀 Starting HTTP endpoint server...");
    if let Err(e) = endpoint::start_endpoint_server(port, client, places) {
        eprintln!("\n❌ Endpoint server error: {}", e);
        std::process::exit(1);
    }
}
