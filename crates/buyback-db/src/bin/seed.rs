//! # Seed Data Generator
//!
//! Writes the demo stock levels into a database file for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./buyback_dev.db (default)
//! cargo run -p buyback-db --bin seed
//!
//! # Specify database path
//! cargo run -p buyback-db --bin seed -- --db ./data/buyback.db
//! ```
//!
//! ## Seeded Rows
//! One barcode per standard tier:
//! - 123456789012 → 2  (HIGH_DEMAND)
//! - 987654321098 → 10 (MEDIUM_DEMAND)
//! - 456789012345 → 20 (LOW_DEMAND)
//! - 789012345678 → 35 (OVERSUPPLIED)
//!
//! Existing rows for these barcodes are overwritten; other rows are kept.

use std::env;

use buyback_core::inventory::DEMO_INVENTORY;
use buyback_core::pricing::PricingEngine;
use buyback_core::Barcode;
use buyback_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./buyback_dev.db");

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
                println!("Buyback Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./buyback_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Buyback Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let repo = db.inventory();
    let engine = PricingEngine::standard();

    for (raw, count) in DEMO_INVENTORY {
        let barcode = Barcode::parse(raw)?;
        let written = repo.set_count(&barcode, i64::try_from(*count)?).await?;
        let quote = engine.quote_count(barcode, written);
        println!(
            "  {:<14} {:>3}  {:<14} {}",
            quote.barcode.as_str(),
            written,
            quote.tier.as_str(),
            quote.price
        );
    }

    println!();
    println!("✓ {} barcodes in database", repo.count().await?);

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}
