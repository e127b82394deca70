// =============================================================================
// Stochastic Oscillator (slow, 14/3/3)
// =============================================================================
//
//   raw %K = (close - lowest_low(k)) / (highest_high(k) - lowest_low(k)) * 100
//   %K     = SMA(raw %K, smooth_k)
//   %D     = SMA(%K, d)
// =============================================================================

use crate::market_data::Bar;

use super::sma::rolling_mean;

/// Aligned %K / %D output: both vectors have one element per bar.
#[derive(Debug, Clone, Default)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

impl StochasticSeries {
    pub fn last_k(&self) -> Option<f64> {
        self.k.last().copied().flatten()
    }

    pub fn last_d(&self) -> Option<f64> {
        self.d.last().copied().flatten()
    }
}

/// Compute the slow stochastic for `bars`.
///
/// A window whose high equals its low has no defined %K, so that position
/// (and every smoothed value that depends on it) is `None`.
pub fn calculate_stochastic(bars: &[Bar], k_period: usize, smooth_k: usize, d_period: usize) -> StochasticSeries {
    let n = bars.len();
    if k_period == 0 || smooth_k == 0 || d_period == 0 {
        return StochasticSeries {
            k: vec![None; n],
            d: vec![None; n],
        };
    }

    let raw: Vec<Option<f64>> = (0..n)
        .map(|i| {
            if i + 1 < k_period {
                return None;
            }
            let window = &bars[i + 1 - k_period..=i];
            let hh = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let ll = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let range = hh - ll;
            if range <= 0.0 {
                return None;
            }
            let value = (bars[i].close - ll) / range * 100.0;
            value.is_finite().then_some(value)
        })
        .collect();

    let k = rolling_mean(&raw, smooth_k);
    let d = rolling_mean(&k, d_period);
    StochasticSeries { k, d }
}
