//! # Menu Seeder
//!
//! Populates the database with the standard espresso-bar menu for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p barista-db --bin seed
//!
//! # Specify database path
//! cargo run -p barista-db --bin seed -- --db ./data/barista.db
//! ```
//!
//! Seeding is idempotent: a drink whose name is already in the catalog
//! is skipped, so re-running against a live database never duplicates
//! or resets anything.

use chrono::Utc;
use std::env;

use barista_core::Product;
use barista_db::repository::product::generate_product_id;
use barista_db::{Database, DbConfig};

/// The standard menu: (name, price in cents, opening stock).
const MENU: &[(&str, i64, i64)] = &[
    ("espresso", 250, 50),
    ("latte macchiato", 300, 30),
    ("cappuccino", 350, 20),
    ("espresso macchiato", 200, 40),
    ("mocha", 375, 25),
    ("macchiato", 325, 15),
    ("caffe latte", 400, 10),
    ("cortado", 450, 5),
    ("flat white", 350, 8),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./barista_dev.db");

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
                println!("Barista POS Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./barista_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Barista POS Menu Seeder");
    println!("=======================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let mut inserted = 0;
    let mut skipped = 0;

    for (name, price_cents, stock) in MENU {
        if db.products().get_by_name(name).await?.is_some() {
            skipped += 1;
            continue;
        }

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents: *price_cents,
            stock: *stock,
            created_at: now,
            updated_at: now,
        };

        db.products().insert(&product).await?;
        println!(
            "  + {:<20} {:>6}  stock {}",
            product.name,
            product.price().to_string(),
            product.stock
        );
        inserted += 1;
    }

    println!();
    println!("✓ Seed complete: {} inserted, {} skipped", inserted, skipped);

    let total = db.products().count().await?;
    println!("  Catalog now holds {} products", total);

    db.close().await;
    Ok(())
}
