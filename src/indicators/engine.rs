// =============================================================================
// Indicator Engine
// =============================================================================
//
// Runs every indicator over one timeframe's bars and produces:
//   - `IndicatorSeries`: bar-aligned series (one `Option` per bar), used by
//     the pattern and divergence detectors.
//   - `IndicatorSnapshot`: the latest value of each indicator, used by the
//     signal scorer.
//
// An indicator whose lookback exceeds the available history is `None` in
// both, never a placeholder value.
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::{Bar, BarSeries, TimeframeConfig};
use crate::types::SignalBias;

use super::adx::{calculate_adx_series, AdxPoint};
use super::atr::calculate_atr_series;
use super::bollinger::calculate_bollinger_series;
use super::ema::calculate_ema;
use super::ichimoku::{calculate_ichimoku, IchimokuParams};
use super::levels::{fibonacci_levels, pivot_series, support_resistance, FibonacciLevels, PivotLevels};
use super::macd::calculate_macd;
use super::obv::calculate_obv;
use super::rsi::calculate_rsi;
use super::sma::calculate_sma;
use super::stochastic::calculate_stochastic;
use super::vwap::calculate_vwap;

const RSI_PERIOD: usize = 14;
const ATR_PERIOD: usize = 14;
const ADX_PERIOD: usize = 14;
const BB_PERIOD: usize = 20;
const BB_STD: f64 = 2.0;
const VOLUME_AVG_WINDOW: usize = 20;
const SUPPORT_RESISTANCE_WINDOW: usize = 30;
const FIBONACCI_WINDOW: usize = 60;

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Bar-aligned indicator series.  Every vector has `bars.len()` elements.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub sma_200: Vec<Option<f64>>,
    pub ema_12: Vec<Option<f64>>,
    pub ema_26: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub bb_width: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub stoch_k: Vec<Option<f64>>,
    pub stoch_d: Vec<Option<f64>>,
    pub obv: Vec<Option<f64>>,
    /// All `None` on daily and slower timeframes.
    pub vwap: Vec<Option<f64>>,
    pub ichimoku_conversion: Vec<Option<f64>>,
    pub ichimoku_base: Vec<Option<f64>>,
    pub ichimoku_span_a: Vec<Option<f64>>,
    pub ichimoku_span_b: Vec<Option<f64>>,
    pub pivots: Vec<Option<PivotLevels>>,
}

/// Left-pad a trimmed series (whose last element belongs to the last bar)
/// with `None` so that it lines up with the bars.
fn align(trimmed: Vec<f64>, len: usize) -> Vec<Option<f64>> {
    pad_front(trimmed.into_iter().map(Some).collect(), len)
}

fn pad_front<T: Copy>(trimmed: Vec<Option<T>>, len: usize) -> Vec<Option<T>> {
    let mut out = vec![None; len.saturating_sub(trimmed.len())];
    out.extend(trimmed);
    out
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Latest value of every indicator.  `None` means unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: Option<f64>,
    pub volume: Option<f64>,
    pub volume_avg: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_width: Option<f64>,
    pub atr: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub obv: Option<f64>,
    pub vwap: Option<f64>,
    pub ichimoku_conversion: Option<f64>,
    pub ichimoku_base: Option<f64>,
    pub ichimoku_span_a: Option<f64>,
    pub ichimoku_span_b: Option<f64>,
    pub pivots: Option<PivotLevels>,
    pub fibonacci: Option<FibonacciLevels>,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

impl IndicatorSnapshot {
    /// Bullish when price and SMA50 both sit above SMA200, bearish when both
    /// sit below, neutral otherwise.  `None` without a 200-bar history.
    pub fn long_term_trend(&self) -> Option<SignalBias> {
        let price = self.price?;
        let sma_50 = self.sma_50?;
        let sma_200 = self.sma_200?;
        Some(if price > sma_200 && sma_50 > sma_200 {
            SignalBias::Bullish
        } else if price < sma_200 && sma_50 < sma_200 {
            SignalBias::Bearish
        } else {
            SignalBias::Neutral
        })
    }

    /// Scalar indicators that are available, keyed by name.
    pub fn available(&self) -> BTreeMap<&'static str, f64> {
        let mut out = BTreeMap::new();
        let scalars = [
            ("price", self.price),
            ("volume", self.volume),
            ("volume_avg", self.volume_avg),
            ("sma_20", self.sma_20),
            ("sma_50", self.sma_50),
            ("sma_200", self.sma_200),
            ("ema_12", self.ema_12),
            ("ema_26", self.ema_26),
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macd_signal", self.macd_signal),
            ("macd_histogram", self.macd_histogram),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
            ("bb_width", self.bb_width),
            ("atr", self.atr),
            ("adx", self.adx),
            ("plus_di", self.plus_di),
            ("minus_di", self.minus_di),
            ("stoch_k", self.stoch_k),
            ("stoch_d", self.stoch_d),
            ("obv", self.obv),
            ("vwap", self.vwap),
            ("ichimoku_conversion", self.ichimoku_conversion),
            ("ichimoku_base", self.ichimoku_base),
            ("ichimoku_span_a", self.ichimoku_span_a),
            ("ichimoku_span_b", self.ichimoku_span_b),
            ("pivot", self.pivots.map(|p| p.pivot)),
            ("resistance1", self.pivots.map(|p| p.r1)),
            ("support1", self.pivots.map(|p| p.s1)),
            ("resistance2", self.pivots.map(|p| p.r2)),
            ("support2", self.pivots.map(|p| p.s2)),
            ("support", self.support),
            ("resistance", self.resistance),
        ];
        for (name, value) in scalars {
            if let Some(v) = value {
                out.insert(name, v);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Full indicator output for one timeframe.
#[derive(Debug, Clone, Default)]
pub struct IndicatorOutput {
    pub series: IndicatorSeries,
    pub snapshot: IndicatorSnapshot,
}

/// Stateless transform from bars to indicators.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn compute(&self, input: &BarSeries, config: &TimeframeConfig) -> IndicatorOutput {
        if input.is_empty() {
            return IndicatorOutput::default();
        }
        let bars = input.bars();
        let closes = input.closes();

        let series = self.series(bars, &closes, config);
        let snapshot = self.snapshot(bars, &closes, &series);

        debug!(
            timeframe = %config.timeframe,
            bars = bars.len(),
            available = snapshot.available().len(),
            "indicators computed"
        );

        IndicatorOutput { series, snapshot }
    }

    fn series(&self, bars: &[Bar], closes: &[f64], config: &TimeframeConfig) -> IndicatorSeries {
        let n = bars.len();

        let (macd, macd_signal, macd_histogram) = match calculate_macd(closes, 12, 26, 9) {
            Some(m) => (align(m.line, n), align(m.signal, n), align(m.histogram, n)),
            None => (vec![None; n], vec![None; n], vec![None; n]),
        };

        let bands = pad_front(calculate_bollinger_series(closes, BB_PERIOD, BB_STD), n);

        let adx_points = calculate_adx_series(bars, ADX_PERIOD);
        let adx_pad = n - adx_points.len();
        let adx_field = |f: fn(&AdxPoint) -> f64| -> Vec<Option<f64>> {
            let mut out = vec![None; adx_pad];
            out.extend(adx_points.iter().map(|p| Some(f(p))));
            out
        };

        let stoch = calculate_stochastic(bars, 14, 3, 3);
        let ichimoku = calculate_ichimoku(bars, IchimokuParams::default());

        let vwap = if config.timeframe.is_intraday() {
            calculate_vwap(bars)
        } else {
            vec![None; n]
        };

        IndicatorSeries {
            sma_20: align(calculate_sma(closes, 20), n),
            sma_50: align(calculate_sma(closes, 50), n),
            sma_200: align(calculate_sma(closes, 200), n),
            ema_12: align(calculate_ema(closes, 12), n),
            ema_26: align(calculate_ema(closes, 26), n),
            rsi: align(calculate_rsi(closes, RSI_PERIOD), n),
            macd,
            macd_signal,
            macd_histogram,
            bb_upper: bands.iter().map(|b| b.map(|b| b.upper)).collect(),
            bb_middle: bands.iter().map(|b| b.map(|b| b.middle)).collect(),
            bb_lower: bands.iter().map(|b| b.map(|b| b.lower)).collect(),
            bb_width: bands.iter().map(|b| b.map(|b| b.width)).collect(),
            atr: align(calculate_atr_series(bars, ATR_PERIOD), n),
            adx: adx_field(|p| p.adx),
            plus_di: adx_field(|p| p.plus_di),
            minus_di: adx_field(|p| p.minus_di),
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            obv: calculate_obv(bars).into_iter().map(Some).collect(),
            vwap,
            ichimoku_conversion: ichimoku.conversion,
            ichimoku_base: ichimoku.base,
            ichimoku_span_a: ichimoku.span_a,
            ichimoku_span_b: ichimoku.span_b,
            pivots: pivot_series(bars),
        }
    }

    fn snapshot(&self, bars: &[Bar], closes: &[f64], series: &IndicatorSeries) -> IndicatorSnapshot {
        let last = |s: &[Option<f64>]| s.last().copied().flatten();
        let current = &bars[bars.len() - 1];

        let recent_volume = &bars[bars.len().saturating_sub(VOLUME_AVG_WINDOW)..];
        let volume_avg = recent_volume.iter().map(|b| b.volume).sum::<f64>() / recent_volume.len() as f64;

        let (support, resistance) = match support_resistance(closes, SUPPORT_RESISTANCE_WINDOW) {
            Some((s, r)) => (Some(s), Some(r)),
            None => (None, None),
        };

        IndicatorSnapshot {
            price: Some(current.close),
            volume: Some(current.volume),
            volume_avg: volume_avg.is_finite().then_some(volume_avg),
            sma_20: last(&series.sma_20),
            sma_50: last(&series.sma_50),
            sma_200: last(&series.sma_200),
            ema_12: last(&series.ema_12),
            ema_26: last(&series.ema_26),
            rsi: last(&series.rsi),
            macd: last(&series.macd),
            macd_signal: last(&series.macd_signal),
            macd_histogram: last(&series.macd_histogram),
            bb_upper: last(&series.bb_upper),
            bb_middle: last(&series.bb_middle),
            bb_lower: last(&series.bb_lower),
            bb_width: last(&series.bb_width),
            atr: last(&series.atr),
            adx: last(&series.adx),
            plus_di: last(&series.plus_di),
            minus_di: last(&series.minus_di),
            stoch_k: last(&series.stoch_k),
            stoch_d: last(&series.stoch_d),
            obv: last(&series.obv),
            vwap: last(&series.vwap),
            ichimoku_conversion: last(&series.ichimoku_conversion),
            ichimoku_base: last(&series.ichimoku_base),
            ichimoku_span_a: last(&series.ichimoku_span_a),
            ichimoku_span_b: last(&series.ichimoku_span_b),
            pivots: series.pivots.last().copied().flatten(),
            fibonacci: fibonacci_levels(bars, FIBONACCI_WINDOW),
            support,
            resistance,
        }
    }
}
