// =============================================================================
// Forex Metrics: Main Entry Point
// =============================================================================
//
// One run: load config, load the daily history, compute indicators, decide,
// print the report and optionally export the full indicator series.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod atomic_file;
mod decision;
mod error;
mod gap_fill;
mod indicator_engine;
mod indicators;
mod market_data;
mod pipeline;
mod report;
mod runtime_config;
mod types;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::market_data::csv_export::export_series;
use crate::market_data::csv_loader::load_bars;
use crate::runtime_config::RuntimeConfig;

const DEFAULT_CONFIG_PATH: &str = "forex_config.json";

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("FOREX_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = RuntimeConfig::load_or_init(&config_path)?;
    config.apply_overrides(|key| std::env::var(key).ok());

    info!(
        symbol = %config.symbol,
        data_file = %config.data_file,
        "starting analysis"
    );

    // ── 2. Load bar history ──────────────────────────────────────────────
    let bars = load_bars(&config.data_file)
        .with_context(|| format!("failed to load bar history from {}", config.data_file))?;

    // ── 3. Indicators, gap fill, decision ────────────────────────────────
    let analysis = pipeline::analyze(&config.symbol, &bars);

    // ── 4. Report ────────────────────────────────────────────────────────
    for line in analysis.report.render_lines() {
        println!("{line}");
    }
    if config.report_json {
        let json = serde_json::to_string_pretty(&analysis.report)
            .context("failed to serialise report")?;
        println!("{json}");
    }

    // ── 5. Export for charting ───────────────────────────────────────────
    if let Some(path) = &config.export_file {
        export_series(&analysis.filled, path)?;
    }

    info!(decision = %analysis.decision(), "analysis complete");
    Ok(())
}
