//! # txwatch
//!
//! Demo entry point: generates a seeded mock transaction stream, builds
//! every dashboard chart from it and prints the geometry as JSON.
//!
//! Usage: `txwatch [seed]` (log level via `RUST_LOG`, default `info`).

mod dashboard;

use tracing_subscriber::EnvFilter;
use txwatch_core::{MockConfig, MockProvider};

use crate::dashboard::build_dashboard;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => MockConfig::default().seed,
    };

    tracing::info!(seed, "txwatch starting");

    let provider = MockProvider::with_seed(seed);
    let dashboard = build_dashboard(&provider)?;

    tracing::info!(
        boxes = dashboard.price_distribution.boxes.len(),
        weeks = dashboard.weekly_pnl.bars.len(),
        categories = dashboard.category_performance.bars.len(),
        "dashboard built"
    );

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
