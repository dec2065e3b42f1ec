//! # Seed Data Generator
//!
//! Populates a local database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default owner into ./shopkeep_dev.db
//! cargo run -p shopkeep-store --bin seed
//!
//! # Custom owner and database path
//! cargo run -p shopkeep-store --bin seed -- --owner demo-user --db ./data/shopkeep.db
//! ```
//!
//! ## Generated Data
//! - ~30 products across a handful of categories, several of them sitting
//!   near their reorder point
//! - a month of expenses
//! - budgets for the expense categories
//! - a Premium tier record for the owner

use std::env;

use chrono::{Duration, Utc};
use tracing_subscriber::EnvFilter;

use shopkeep_core::tier::Tier;
use shopkeep_core::types::{NewBudget, NewExpense, NewProduct, TierRecord};
use shopkeep_store::{RemoteStore, SqliteStore, StoreConfig};

/// Demo products: (title, category, price_cents, quantity, reorder_point).
const PRODUCTS: &[(&str, &str, i64, i64, Option<i64>)] = &[
    ("Espresso Beans 1kg", "Coffee", 1850, 24, Some(10)),
    ("House Blend 500g", "Coffee", 1150, 40, Some(15)),
    ("Decaf Blend 500g", "Coffee", 1250, 8, Some(10)),
    ("Ceramic Mug", "Merchandise", 1400, 32, Some(12)),
    ("Travel Tumbler", "Merchandise", 2200, 5, Some(8)),
    ("Tote Bag", "Merchandise", 1600, 18, None),
    ("Oat Milk 1L", "Dairy", 450, 36, Some(20)),
    ("Whole Milk 1L", "Dairy", 320, 48, Some(20)),
    ("Almond Milk 1L", "Dairy", 480, 12, Some(15)),
    ("Croissant", "Bakery", 380, 20, Some(10)),
    ("Banana Bread Slice", "Bakery", 420, 14, Some(8)),
    ("Blueberry Muffin", "Bakery", 400, 9, Some(10)),
    ("Chai Syrup 750ml", "Syrups", 950, 6, Some(5)),
    ("Vanilla Syrup 750ml", "Syrups", 900, 11, Some(5)),
    ("Caramel Syrup 750ml", "Syrups", 900, 3, Some(5)),
    ("Paper Cups 12oz (50)", "Supplies", 700, 60, Some(25)),
    ("Paper Cups 8oz (50)", "Supplies", 650, 45, Some(25)),
    ("Cup Lids (100)", "Supplies", 550, 30, Some(20)),
    ("Napkins (200)", "Supplies", 380, 22, Some(10)),
    ("Cleaning Spray", "Supplies", 620, 7, Some(4)),
];

/// Demo expenses: (description, category, amount_cents, days_ago).
const EXPENSES: &[(&str, &str, i64, i64)] = &[
    ("Coffee roaster invoice", "Inventory", 42_000, 28),
    ("Milk delivery", "Inventory", 8_600, 21),
    ("Milk delivery", "Inventory", 8_600, 14),
    ("Milk delivery", "Inventory", 9_100, 7),
    ("Shop rent", "Rent", 120_000, 27),
    ("Electricity", "Utilities", 14_500, 20),
    ("Water", "Utilities", 4_200, 20),
    ("Instagram ads", "Marketing", 10_000, 12),
    ("Window decals", "Marketing", 6_500, 9),
    ("Espresso machine descaler", "Maintenance", 2_800, 5),
    ("Grinder burr replacement", "Maintenance", 9_900, 2),
];

/// Demo budgets: (category, limit_cents).
const BUDGETS: &[(&str, i64)] = &[
    ("Inventory", 80_000),
    ("Utilities", 25_000),
    ("Marketing", 20_000),
    ("Maintenance", 15_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopkeep=debug,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut owner = String::from("demo-owner");
    let mut db_path = String::from("./shopkeep_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--owner" | "-o" => {
                if i + 1 < args.len() {
                    owner = args[i + 1].clone();
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopkeep Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --owner <ID>   Owner id to seed (default: demo-owner)");
                println!("  -d, --db <PATH>    Database file path (default: ./shopkeep_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Shopkeep Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Owner:    {}", owner);
    println!();

    let store = SqliteStore::connect(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if the owner already has data, to avoid duplicates.
    let existing = store.count_products(&owner).await?;
    if existing > 0 {
        println!("⚠ Owner already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding products...");
    for (title, category, price_cents, quantity, reorder_point) in PRODUCTS {
        let mut new = NewProduct::new(*title, *price_cents, *quantity).category(*category);
        if let Some(threshold) = reorder_point {
            new = new.reorder_point(*threshold);
        }
        store.insert_product(&owner, new).await?;
    }
    println!("  {} products", PRODUCTS.len());

    println!("Seeding budgets...");
    for (category, limit_cents) in BUDGETS {
        store
            .insert_budget(
                &owner,
                NewBudget {
                    category: category.to_string(),
                    limit_cents: *limit_cents,
                    period: Default::default(),
                    notifications: true,
                    notes: None,
                },
            )
            .await?;
    }
    println!("  {} budgets", BUDGETS.len());

    println!("Seeding expenses...");
    for (description, category, amount_cents, days_ago) in EXPENSES {
        store
            .insert_expense(
                &owner,
                NewExpense {
                    description: description.to_string(),
                    amount_cents: *amount_cents,
                    category: category.to_string(),
                    date: Utc::now() - Duration::days(*days_ago),
                    notes: None,
                },
            )
            .await?;
        // Accrue spend on the matching category budget, if any.
        store
            .add_budget_spend(&owner, category, *amount_cents)
            .await?;
    }
    println!("  {} expenses", EXPENSES.len());

    store
        .upsert_tier(TierRecord {
            owner_id: owner.clone(),
            tier: Tier::Premium,
            updated_at: Utc::now(),
        })
        .await?;
    println!("Tier set to Premium");

    let count = store.count_products(&owner).await?;
    println!();
    println!("✓ Seed complete! {} products for {}", count, owner);

    Ok(())
}
