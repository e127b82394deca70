// =============================================================================
// mtf-signal - Main Entry Point
// =============================================================================
//
// Usage: mtf-signal <SYMBOL> [CONFIG_PATH]
//        mtf-signal --write-default-config [CONFIG_PATH]
//
// Reads bars from `<bars_dir>/<SYMBOL>_<timeframe>.json`, analyses every
// configured timeframe and prints the report as JSON on stdout.
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mtf_signal_engine::clock::SystemClock;
use mtf_signal_engine::market_data::{CachedBarProvider, JsonFileBarProvider, TtlBarCache};
use mtf_signal_engine::{AnalysisSettings, EngineConfig, MultiTimeframeAnalyzer};

const DEFAULT_CONFIG_PATH: &str = "engine_config.json";
const WRITE_DEFAULT_FLAG: &str = "--write-default-config";
const USAGE: &str = "usage: mtf-signal <SYMBOL> [CONFIG_PATH] | mtf-signal --write-default-config [CONFIG_PATH]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next().context(USAGE)?;
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if first == WRITE_DEFAULT_FLAG {
        return EngineConfig::default().save(&config_path);
    }
    let symbol = first;

    let mut config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });
    config.apply_overrides(|key| std::env::var(key).ok())?;

    info!(
        symbol = %symbol,
        timeframes = ?config.timeframes,
        style = %config.investment_style,
        bars_dir = %config.bars_dir.display(),
        "Configured analysis"
    );

    // ── 2. Data provider (file-backed, TTL cached) ───────────────────────
    let clock = Arc::new(SystemClock);
    let cache = Arc::new(TtlBarCache::new(
        Duration::seconds(config.bar_cache_ttl_secs),
        clock.clone(),
    ));
    let provider = Arc::new(CachedBarProvider::new(
        Arc::new(JsonFileBarProvider::new(&config.bars_dir)),
        cache,
    ));

    // ── 3. Analyse & report ──────────────────────────────────────────────
    let analyzer = MultiTimeframeAnalyzer::new(provider, clock, AnalysisSettings::from_config(&config));
    let report = analyzer.analyze(&symbol, &config.timeframes).await;

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");

    Ok(())
}
