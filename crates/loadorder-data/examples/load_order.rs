//! Loads a content directory, prints the resolved load order and which
//! gates are open.
//!
//! Run with: `cargo run --package loadorder-data --example load_order [dir]`
//!
//! Set `RUST_LOG=debug` to see every accepted item.

use std::path::PathBuf;

use loadorder_core::Phase;
use loadorder_data::load_content;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Deserialize)]
struct Zone {
    #[serde(default)]
    title: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/content")));

    let content = load_content::<Zone, ()>(&dir).unwrap_or_else(|e| {
        eprintln!("failed to load {}: {e}", dir.display());
        std::process::exit(1);
    });
    let loaded = content.activate().unwrap_or_else(|e| {
        eprintln!("activation failed: {e}");
        std::process::exit(1);
    });

    println!("Primary load order:");
    for (index, zone) in loaded.primary.iter().enumerate() {
        println!("  {:>2}. {} ({})", index + 1, zone.name, zone.data.title);
    }

    println!("Secondary load order:");
    for (index, item) in loaded.secondary.iter().enumerate() {
        println!("  {:>2}. {}", index + 1, item.name);
    }

    for phase in [Phase::Primary, Phase::Secondary] {
        let rejected = loaded.resolver.rejected(phase);
        if !rejected.is_empty() {
            println!("Not loaded ({phase}): {}", rejected.join(", "));
        }
    }

    println!("Gates:");
    for gate in &loaded.gates {
        let missing = loaded.resolver.missing(&gate.requirements());
        if missing.is_empty() {
            println!("  [open]   {}", gate.name);
        } else {
            let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
            println!("  [locked] {} (needs {})", gate.name, names.join(", "));
        }
    }
}
