//! # Snapshot Inspector
//!
//! Prints the statistics of a store snapshot file for operators.
//!
//! ## Usage
//! ```bash
//! # Inspect the default snapshot location
//! cargo run -p vela-store --bin inspect
//!
//! # Inspect a specific snapshot file
//! cargo run -p vela-store --bin inspect -- --data ./data/store.json
//! ```
//!
//! Opening a snapshot never mutates it: the tool only loads and aggregates.
//! A missing file reports an empty store; a corrupt file reports the same
//! (with a warning), exactly as the server would behave at startup.

use std::env;

use tracing_subscriber::EnvFilter;

use vela_store::{Store, StoreConfig};

fn main() {
    // Default: INFO, can be overridden with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut data_path = String::from("data/store.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vela Shop Snapshot Inspector");
                println!();
                println!("Usage: inspect [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <PATH>  Snapshot file path (default: data/store.json)");
                println!("  -h, --help         Show this help message");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    println!("🔍 Vela Shop Snapshot Inspector");
    println!("===============================");
    println!("Snapshot: {}", data_path);
    println!();

    let store = Store::open(StoreConfig::new(&data_path));
    let stats = store.get_statistics();

    println!("✓ Snapshot loaded");
    println!();
    println!("Orders:          {}", stats.total_orders);
    println!("Items purchased: {}", stats.total_items_purchased);
    println!("Purchase amount: {}", stats.total_purchase_amount);
    println!("Discount amount: {}", stats.total_discount_amount);
    println!("Order counter:   {}", store.order_count());
    println!("Interval:        every {} orders", store.discount_interval());
    println!();

    if stats.discount_codes.is_empty() {
        println!("No discount codes minted yet.");
    } else {
        println!("Discount codes ({}):", stats.discount_codes.len());
        for code in &stats.discount_codes {
            let state = if code.used { "used" } else { "unused" };
            println!("  {}  {}  minted {}", code.code, state, code.created_at);
        }
    }
}
