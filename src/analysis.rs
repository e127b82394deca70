// =============================================================================
// Multi-Timeframe Analysis - per-timeframe pipeline, fan-out and fan-in
// =============================================================================
//
// Per timeframe:  bars -> indicators -> patterns/divergences -> composite
// signal.  Each timeframe runs as its own task under a timeout; one that
// fails or times out is reported as such and left out of the alignment.
// Empty bar sequences are skipped.
// =============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::alignment::{align, AlignmentResult, TimeframeVote};
use crate::clock::Clock;
use crate::indicators::{IndicatorEngine, IndicatorSnapshot};
use crate::market_data::{Bar, BarProvider, BarSeries, Timeframe, TimeframeConfig};
use crate::patterns::{Divergence, Pattern, PatternDetector};
use crate::runtime_config::EngineConfig;
use crate::signals::{generate_signal, CompositeSignal, IndicatorKind, IndicatorWeights, ScoringInput};
use crate::types::{InvestmentStyle, SignalBias};

// =============================================================================
// Settings
// =============================================================================

/// The knobs the pipeline reads, resolved from [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub weights: IndicatorWeights,
    /// `None` scores every indicator.
    pub selection: Option<BTreeSet<IndicatorKind>>,
    pub detector: PatternDetector,
    pub timeframe_timeout: Duration,
    pub investment_style: InvestmentStyle,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl AnalysisSettings {
    /// Custom weights define the model: without an explicit indicator
    /// selection, only the indicators they name are scored.
    pub fn from_config(config: &EngineConfig) -> Self {
        let weights = IndicatorWeights::from_custom(&config.custom_weights);
        let selection = match &config.selected_indicators {
            Some(selected) => Some(selected.iter().copied().collect()),
            None if !config.custom_weights.is_empty() => Some(weights.kinds()),
            None => None,
        };

        Self {
            weights,
            selection,
            detector: PatternDetector::new(config.pattern_lookback, config.divergence_lookback),
            timeframe_timeout: Duration::from_secs(config.timeframe_timeout_secs),
            investment_style: config.investment_style,
        }
    }
}

// =============================================================================
// Per-timeframe results
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeAnalysis {
    pub config: TimeframeConfig,
    pub bars: usize,
    pub last_bar: DateTime<Utc>,
    pub indicators: IndicatorSnapshot,
    pub long_term_trend: Option<SignalBias>,
    pub patterns: Vec<Pattern>,
    pub divergences: Vec<Divergence>,
    pub signal: CompositeSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimeframeOutcome {
    Computed(Box<TimeframeAnalysis>),
    /// The provider returned no bars.
    Skipped,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeResult {
    pub timeframe: Timeframe,
    pub outcome: TimeframeOutcome,
}

impl TimeframeResult {
    pub fn analysis(&self) -> Option<&TimeframeAnalysis> {
        match &self.outcome {
            TimeframeOutcome::Computed(a) => Some(a.as_ref()),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TimeframeOutcome::Failed { .. })
    }
}

/// Runs the whole pipeline over one timeframe's bars.  Pure: the only input
/// besides the bars is `now`, which anchors the signal's validity window.
///
/// `Ok(None)` for an empty sequence.
pub fn analyze_bars(
    bars: Vec<Bar>,
    config: &TimeframeConfig,
    settings: &AnalysisSettings,
    now: DateTime<Utc>,
) -> Result<Option<TimeframeAnalysis>> {
    let series = BarSeries::new(bars).with_context(|| format!("invalid {} bars", config.timeframe))?;
    let Some(last_bar) = series.last().map(|b| b.timestamp) else {
        return Ok(None);
    };

    let output = IndicatorEngine.compute(&series, config);
    let patterns = settings.detector.detect_all(series.bars(), &output.series);
    let divergences = settings.detector.detect_divergences(series.bars(), &output.series);

    let signal = generate_signal(&ScoringInput {
        snapshot: &output.snapshot,
        patterns: &patterns,
        divergences: &divergences,
        config,
        weights: &settings.weights,
        selection: settings.selection.as_ref(),
        now,
    })?;

    Ok(Some(TimeframeAnalysis {
        config: config.clone(),
        bars: series.len(),
        last_bar,
        long_term_trend: output.snapshot.long_term_trend(),
        indicators: output.snapshot,
        patterns,
        divergences,
        signal,
    }))
}

// =============================================================================
// Multi-timeframe report
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiTimeframeReport {
    pub id: String,
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub investment_style: InvestmentStyle,
    pub timeframes: Vec<TimeframeResult>,
    /// Over computed timeframes only.
    pub alignment: AlignmentResult,
}

impl MultiTimeframeReport {
    pub fn get(&self, timeframe: Timeframe) -> Option<&TimeframeAnalysis> {
        self.timeframes
            .iter()
            .find(|r| r.timeframe == timeframe)
            .and_then(TimeframeResult::analysis)
    }

    pub fn computed(&self) -> impl Iterator<Item = &TimeframeAnalysis> {
        self.timeframes.iter().filter_map(TimeframeResult::analysis)
    }
}

pub struct MultiTimeframeAnalyzer {
    provider: Arc<dyn BarProvider>,
    clock: Arc<dyn Clock>,
    settings: Arc<AnalysisSettings>,
}

impl MultiTimeframeAnalyzer {
    pub fn new(provider: Arc<dyn BarProvider>, clock: Arc<dyn Clock>, settings: AnalysisSettings) -> Self {
        Self {
            provider,
            clock,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyses every requested timeframe concurrently.  Duplicates are
    /// ignored; result order follows the request.
    pub async fn analyze(&self, symbol: &str, timeframes: &[Timeframe]) -> MultiTimeframeReport {
        let now = self.clock.now();
        let mut seen = BTreeSet::new();
        let requested: Vec<Timeframe> = timeframes.iter().copied().filter(|tf| seen.insert(*tf)).collect();

        info!(symbol, timeframes = requested.len(), "multi-timeframe analysis started");

        let handles = requested.iter().map(|&timeframe| {
            let provider = Arc::clone(&self.provider);
            let settings = Arc::clone(&self.settings);
            let symbol = symbol.to_string();
            tokio::spawn(async move {
                let limit = settings.timeframe_timeout;
                let run = run_timeframe(provider, settings, symbol, timeframe.config(), now);
                match tokio::time::timeout(limit, run).await {
                    Ok(Ok(Some(analysis))) => TimeframeOutcome::Computed(Box::new(analysis)),
                    Ok(Ok(None)) => TimeframeOutcome::Skipped,
                    Ok(Err(e)) => TimeframeOutcome::Failed {
                        error: format!("{e:#}"),
                    },
                    Err(_) => TimeframeOutcome::Failed {
                        error: format!("timed out after {}s", limit.as_secs_f64()),
                    },
                }
            })
        });
        let joined = join_all(handles).await;

        let results: Vec<TimeframeResult> = requested
            .iter()
            .zip(joined)
            .map(|(&timeframe, joined)| {
                let outcome = joined.unwrap_or_else(|e| TimeframeOutcome::Failed {
                    error: format!("analysis task aborted: {e}"),
                });
                match &outcome {
                    TimeframeOutcome::Computed(a) => debug!(
                        symbol,
                        timeframe = %timeframe,
                        signal = %a.signal.signal_type,
                        confidence = format!("{:.3}", a.signal.confidence),
                        "timeframe analysed"
                    ),
                    TimeframeOutcome::Skipped => warn!(symbol, timeframe = %timeframe, "no bars, timeframe skipped"),
                    TimeframeOutcome::Failed { error } => {
                        warn!(symbol, timeframe = %timeframe, error = %error, "timeframe failed")
                    }
                }
                TimeframeResult { timeframe, outcome }
            })
            .collect();

        let votes: Vec<TimeframeVote> = results
            .iter()
            .filter_map(TimeframeResult::analysis)
            .map(|a| TimeframeVote::from(&a.signal))
            .collect();
        let alignment = align(&votes, self.settings.investment_style);

        info!(
            symbol,
            computed = votes.len(),
            alignment = format!("{:.3}", alignment.score),
            recommended = %alignment.recommended_timeframe,
            "multi-timeframe analysis complete"
        );

        MultiTimeframeReport {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.to_uppercase(),
            generated_at: now,
            investment_style: self.settings.investment_style,
            timeframes: results,
            alignment,
        }
    }
}

async fn run_timeframe(
    provider: Arc<dyn BarProvider>,
    settings: Arc<AnalysisSettings>,
    symbol: String,
    config: TimeframeConfig,
    now: DateTime<Utc>,
) -> Result<Option<TimeframeAnalysis>> {
    let bars = provider
        .fetch_bars(&symbol, &config)
        .await
        .with_context(|| format!("failed to fetch {} bars for {symbol}", config.timeframe))?;

    tokio::task::spawn_blocking(move || analyze_bars(bars, &config, &settings, now))
        .await
        .context("indicator task panicked")?
}
