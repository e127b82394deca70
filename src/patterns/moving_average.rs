// Golden / death cross on SMA50 vs SMA200, evaluated between the previous
// and the current bar only.

use crate::types::SignalBias;

use super::types::{Pattern, PatternKind, TradeLevels};

/// `sma_50` and `sma_200` are bar-aligned; `closes` is the matching price series.
pub fn detect_ma_crossover(closes: &[f64], sma_50: &[Option<f64>], sma_200: &[Option<f64>]) -> Option<Pattern> {
    let n = closes.len();
    if n < 2 || sma_50.len() != n || sma_200.len() != n {
        return None;
    }

    let prev_50 = sma_50[n - 2]?;
    let prev_200 = sma_200[n - 2]?;
    let curr_50 = sma_50[n - 1]?;
    let curr_200 = sma_200[n - 1]?;
    let price = closes[n - 1];

    if prev_50 <= prev_200 && curr_50 > curr_200 {
        Some(
            Pattern::new(
                PatternKind::GoldenCross,
                0.9,
                SignalBias::Bullish,
                "Golden cross: 50 SMA crossed above 200 SMA",
                50,
            )
            .with_levels(TradeLevels::new(price * 1.01, curr_200 * 0.98, price * 1.15)),
        )
    } else if prev_50 >= prev_200 && curr_50 < curr_200 {
        Some(
            Pattern::new(
                PatternKind::DeathCross,
                0.9,
                SignalBias::Bearish,
                "Death cross: 50 SMA crossed below 200 SMA",
                50,
            )
            .with_levels(TradeLevels::new(price * 0.99, curr_200 * 1.02, price * 0.85)),
        )
    } else {
        None
    }
}
