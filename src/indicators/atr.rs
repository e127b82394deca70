// =============================================================================
// Average True Range (ATR) - Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR_0   = SMA of first `period` TR values
//   ATR_t   = (ATR_{t-1} * (period - 1) + TR_t) / period
//
// Default period: 14
// =============================================================================

use crate::market_data::Bar;

/// True Range for every bar after the first (element `i` belongs to bar `i + 1`).
pub fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs())
        })
        .collect()
}

/// Compute the ATR series using Wilder's smoothing.
///
/// The first value belongs to bar index `period` (it needs `period` TR
/// values, each of which needs a previous bar).  Returns an empty vec when
/// `period` is zero, there are fewer than `period + 1` bars, or the seed is
/// non-finite; a later non-finite step truncates the series.
pub fn calculate_atr_series(bars: &[Bar], period: usize) -> Vec<f64> {
    if period == 0 || bars.len() < period + 1 {
        return Vec::new();
    }

    let tr_values = true_ranges(bars);

    // --- Seed ATR with SMA of first `period` TR values -----------------------
    let seed: f64 = tr_values[..period].iter().sum::<f64>() / period as f64;
    if !seed.is_finite() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(tr_values.len() - period + 1);
    result.push(seed);

    // --- Wilder's smoothing for remaining TR values --------------------------
    let period_f = period as f64;
    let mut atr = seed;
    for &tr in &tr_values[period..] {
        atr = (atr * (period_f - 1.0) + tr) / period_f;
        if !atr.is_finite() {
            break;
        }
        result.push(atr);
    }

    result
}

/// Most recent ATR value, or `None` when the full series is not computable.
pub fn calculate_atr(bars: &[Bar], period: usize) -> Option<f64> {
    let series = calculate_atr_series(bars, period);
    // A truncated series means a broken bar somewhere; don't report a stale value.
    if series.len() != bars.len().saturating_sub(period) {
        return None;
    }
    series.last().copied()
}
