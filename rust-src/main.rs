//! trafficviz CLI
//!
//! Renders web traffic as a choropleth world map, area charts and bar charts.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod error;
mod format;
mod geo;
mod models;
mod scale;
mod scene;
mod visualization;

use tracing_subscriber::EnvFilter;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("TVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
