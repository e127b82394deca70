use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::bar::Bar;
use super::timeframe::{Timeframe, TimeframeConfig};

// ---------------------------------------------------------------------------
// BarProvider -- the data-provider collaborator
// ---------------------------------------------------------------------------

/// Source of raw OHLCV history for one (symbol, timeframe) pair.
///
/// Implementations return bars oldest-first.  The engine validates ordering
/// itself, so a provider returning garbage only fails that timeframe.
#[async_trait]
pub trait BarProvider: Send + Sync {
    async fn fetch_bars(&self, symbol: &str, config: &TimeframeConfig) -> Result<Vec<Bar>>;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// InMemoryBarProvider
// ---------------------------------------------------------------------------

/// Serves bar sequences injected up front.  Used by tests and replays.
#[derive(Default)]
pub struct InMemoryBarProvider {
    series: RwLock<HashMap<(String, Timeframe), Vec<Bar>>>,
}

impl InMemoryBarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, symbol: &str, timeframe: Timeframe, bars: Vec<Bar>) {
        self.series
            .write()
            .insert((symbol.to_uppercase(), timeframe), bars);
    }

    pub fn with(self, symbol: &str, timeframe: Timeframe, bars: Vec<Bar>) -> Self {
        self.insert(symbol, timeframe, bars);
        self
    }
}

#[async_trait]
impl BarProvider for InMemoryBarProvider {
    async fn fetch_bars(&self, symbol: &str, config: &TimeframeConfig) -> Result<Vec<Bar>> {
        let key = (symbol.to_uppercase(), config.timeframe);
        self.series
            .read()
            .get(&key)
            .cloned()
            .with_context(|| format!("no bars loaded for {}@{}", key.0, key.1))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

// ---------------------------------------------------------------------------
// JsonFileBarProvider
// ---------------------------------------------------------------------------

/// Reads `<dir>/<SYMBOL>_<timeframe>.json`, each file a JSON array of bars.
pub struct JsonFileBarProvider {
    dir: PathBuf,
}

impl JsonFileBarProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", symbol.to_uppercase(), timeframe.name()))
    }
}

#[async_trait]
impl BarProvider for JsonFileBarProvider {
    async fn fetch_bars(&self, symbol: &str, config: &TimeframeConfig) -> Result<Vec<Bar>> {
        let path = self.path_for(symbol, config.timeframe);
        debug!(path = %path.display(), "reading bar file");

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read bars from {}", path.display()))?;

        let bars: Vec<Bar> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bars from {}", path.display()))?;

        info!(
            symbol,
            timeframe = %config.timeframe,
            bars = bars.len(),
            "bar file loaded"
        );
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
