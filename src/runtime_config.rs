// =============================================================================
// Engine Configuration - JSON-backed settings with atomic save
// =============================================================================
//
// Every tunable of the multi-timeframe engine lives here.  All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file.  Persistence uses tmp + rename.
// =============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::market_data::Timeframe;
use crate::signals::IndicatorKind;
use crate::types::InvestmentStyle;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_timeframes() -> Vec<Timeframe> {
    vec![Timeframe::Daily, Timeframe::Weekly]
}

fn default_timeframe_timeout_secs() -> u64 {
    30
}

fn default_pattern_lookback() -> usize {
    50
}

fn default_divergence_lookback() -> usize {
    30
}

fn default_bar_cache_ttl_secs() -> i64 {
    300
}

fn default_bars_dir() -> PathBuf {
    PathBuf::from("data")
}

// =============================================================================
// EngineConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeframes analysed per request, in report order.
    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<Timeframe>,

    #[serde(default)]
    pub investment_style: InvestmentStyle,

    /// Restrict scoring to these indicators.  Absent means all.
    #[serde(default)]
    pub selected_indicators: Option<Vec<IndicatorKind>>,

    /// Custom weight model.  When non-empty it replaces the default weights,
    /// and without `selected_indicators` only its keys are scored.
    #[serde(default)]
    pub custom_weights: BTreeMap<IndicatorKind, f64>,

    /// Per-timeframe budget for fetch + compute.
    #[serde(default = "default_timeframe_timeout_secs")]
    pub timeframe_timeout_secs: u64,

    /// Chart-pattern window, in bars.
    #[serde(default = "default_pattern_lookback")]
    pub pattern_lookback: usize,

    #[serde(default = "default_divergence_lookback")]
    pub divergence_lookback: usize,

    #[serde(default = "default_bar_cache_ttl_secs")]
    pub bar_cache_ttl_secs: i64,

    /// Directory holding `<SYMBOL>_<timeframe>.json` bar files.
    #[serde(default = "default_bars_dir")]
    pub bars_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeframes: default_timeframes(),
            investment_style: InvestmentStyle::default(),
            selected_indicators: None,
            custom_weights: BTreeMap::new(),
            timeframe_timeout_secs: default_timeframe_timeout_secs(),
            pattern_lookback: default_pattern_lookback(),
            divergence_lookback: default_divergence_lookback(),
            bar_cache_ttl_secs: default_bar_cache_ttl_secs(),
            bars_dir: default_bars_dir(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            timeframes = ?config.timeframes,
            style = %config.investment_style,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist to `path` via a `.tmp` sibling and a rename.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self).context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }

    /// Apply `SIGNAL_TIMEFRAMES`, `SIGNAL_STYLE` and `SIGNAL_BARS_DIR`
    /// style overrides from a lookup function.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup("SIGNAL_TIMEFRAMES") {
            let timeframes = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<Timeframe>)
                .collect::<Result<Vec<_>>>()
                .context("invalid SIGNAL_TIMEFRAMES")?;
            if !timeframes.is_empty() {
                self.timeframes = timeframes;
            }
        }
        if let Some(raw) = lookup("SIGNAL_STYLE") {
            self.investment_style = raw.parse::<InvestmentStyle>().context("invalid SIGNAL_STYLE")?;
        }
        if let Some(raw) = lookup("SIGNAL_BARS_DIR") {
            self.bars_dir = PathBuf::from(raw);
        }
        Ok(())
    }
}
