use tracing::debug;

use crate::indicators::IndicatorSeries;
use crate::market_data::Bar;

use super::candlestick::detect_candlestick_patterns;
use super::chart::detect_chart_patterns;
use super::divergence::detect_divergences;
use super::moving_average::detect_ma_crossover;
use super::types::{Divergence, DivergenceSource, Pattern};

pub const DEFAULT_PATTERN_LOOKBACK: usize = 50;
pub const DEFAULT_DIVERGENCE_LOOKBACK: usize = 30;

/// Runs every pattern family over one timeframe.
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    /// Window for chart patterns.
    pub lookback: usize,
    /// Window for price/indicator divergences.
    pub divergence_lookback: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_PATTERN_LOOKBACK,
            divergence_lookback: DEFAULT_DIVERGENCE_LOOKBACK,
        }
    }
}

impl PatternDetector {
    pub fn new(lookback: usize, divergence_lookback: usize) -> Self {
        Self {
            lookback,
            divergence_lookback,
        }
    }

    /// Candlestick, chart and moving-average patterns, strongest first.
    /// Ties keep detection order.
    pub fn detect_all(&self, bars: &[Bar], series: &IndicatorSeries) -> Vec<Pattern> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let mut patterns = detect_candlestick_patterns(bars);
        patterns.extend(detect_chart_patterns(bars, self.lookback));
        patterns.extend(detect_ma_crossover(&closes, &series.sma_50, &series.sma_200));

        patterns.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        if !patterns.is_empty() {
            debug!(
                count = patterns.len(),
                strongest = %patterns[0].kind,
                "patterns detected"
            );
        }
        patterns
    }

    /// RSI and MACD-line divergences.
    pub fn detect_divergences(&self, bars: &[Bar], series: &IndicatorSeries) -> Vec<Divergence> {
        let mut out = detect_divergences(bars, &series.rsi, DivergenceSource::Rsi, self.divergence_lookback);
        out.extend(detect_divergences(bars, &series.macd, DivergenceSource::Macd, self.divergence_lookback));
        out
    }
}
