//! # Seed Data Generator
//!
//! Populates the database with sample cities and states for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./civitas.db (default)
//! cargo run -p civitas-db --bin seed
//!
//! # Specify database path
//! cargo run -p civitas-db --bin seed -- --db ./data/civitas.db
//! ```
//!
//! Records go through `CityService` and `StateService`, so seeded data
//! obeys the same uniqueness and reference rules as the REST API.

use std::env;
use std::sync::Arc;

use civitas_core::{CityService, StateService};
use civitas_db::{Database, DbConfig};

/// Sample cities with the states they own.
const SAMPLE: &[(&str, &[&str])] = &[
    ("Springfield", &["IL", "MO", "OR"]),
    ("Portland", &["OR", "ME"]),
    ("Columbus", &["OH", "GA", "IN"]),
    ("Salem", &["OR", "MA"]),
    ("Richmond", &["VA", "KY"]),
    ("Franklin", &["TN"]),
    ("Lisbon", &[]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./civitas.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Civitas Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./civitas.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Civitas Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.cities().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} cities", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let city_store = Arc::new(db.cities());
    let cities = CityService::new(city_store.clone());
    let states = StateService::new(Arc::new(db.states()), city_store);

    println!();
    println!("Creating cities and states...");

    let mut city_total = 0;
    let mut state_total = 0;

    for (city_name, state_names) in SAMPLE {
        let city = match cities.create(city_name).await {
            Ok(city) => city,
            Err(e) => {
                eprintln!("Failed to create {}: {}", city_name, e);
                continue;
            }
        };
        city_total += 1;

        for state_name in state_names.iter() {
            if let Err(e) = states.create(state_name, city.id).await {
                eprintln!("Failed to create {} in {}: {}", state_name, city.name, e);
                continue;
            }
            state_total += 1;
        }

        println!("  {} (id {}): {} states", city.name, city.id, state_names.len());
    }

    println!();
    println!("✓ Created {} cities and {} states", city_total, state_total);

    db.close().await;

    println!("✓ Seed complete!");

    Ok(())
}
