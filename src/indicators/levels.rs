// =============================================================================
// Price Levels: Classic Pivots, Fibonacci Retracements, Support/Resistance
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::market_data::Bar;

/// Classic floor-trader pivots derived from one completed bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub pivot: f64,
    pub r1: f64,
    pub s1: f64,
    pub r2: f64,
    pub s2: f64,
}

impl PivotLevels {
    pub fn from_bar(bar: &Bar) -> Self {
        let pivot = bar.typical_price();
        let range = bar.high - bar.low;
        Self {
            pivot,
            r1: 2.0 * pivot - bar.low,
            s1: 2.0 * pivot - bar.high,
            r2: pivot + range,
            s2: pivot - range,
        }
    }
}

/// Pivots for every bar, each computed from the bar *before* it.
pub fn pivot_series(bars: &[Bar]) -> Vec<Option<PivotLevels>> {
    (0..bars.len())
        .map(|i| i.checked_sub(1).map(|p| PivotLevels::from_bar(&bars[p])))
        .collect()
}

pub const FIB_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

/// Retracement levels measured down from the swing high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub swing_high: f64,
    pub swing_low: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
}

impl FibonacciLevels {
    pub fn levels(&self) -> [f64; 5] {
        [self.level_236, self.level_382, self.level_500, self.level_618, self.level_786]
    }
}

/// Fibonacci levels from the high/low of the trailing `window` bars.
pub fn fibonacci_levels(bars: &[Bar], window: usize) -> Option<FibonacciLevels> {
    if bars.is_empty() || window == 0 {
        return None;
    }
    let recent = &bars[bars.len().saturating_sub(window)..];
    let high = recent.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = recent.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let diff = high - low;
    if !diff.is_finite() {
        return None;
    }

    let at = |r: f64| high - r * diff;
    Some(FibonacciLevels {
        swing_high: high,
        swing_low: low,
        level_236: at(FIB_RATIOS[0]),
        level_382: at(FIB_RATIOS[1]),
        level_500: at(FIB_RATIOS[2]),
        level_618: at(FIB_RATIOS[3]),
        level_786: at(FIB_RATIOS[4]),
    })
}

/// Support and resistance as the lowest / highest close of the trailing
/// `window` bars (current bar included).
pub fn support_resistance(closes: &[f64], window: usize) -> Option<(f64, f64)> {
    if closes.is_empty() || window == 0 {
        return None;
    }
    let recent = &closes[closes.len().saturating_sub(window)..];
    let support = recent.iter().copied().fold(f64::MAX, f64::min);
    let resistance = recent.iter().copied().fold(f64::MIN, f64::max);
    Some((support, resistance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bar(i: i64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i),
            open: close,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn pivots_use_previous_bar() {
        let bars = vec![bar(0, 110.0, 90.0, 100.0), bar(1, 200.0, 150.0, 180.0)];
        let series = pivot_series(&bars);
        assert!(series[0].is_none());
        let p = series[1].unwrap();
        assert!((p.pivot - 100.0).abs() < 1e-12);
        assert!((p.r1 - 110.0).abs() < 1e-12);
        assert!((p.s1 - 90.0).abs() < 1e-12);
        assert!((p.r2 - 120.0).abs() < 1e-12);
        assert!((p.s2 - 80.0).abs() < 1e-12);
    }

    #[test]
    fn fibonacci_uses_trailing_window_only() {
        let mut bars = vec![bar(0, 500.0, 1.0, 250.0)];
        bars.extend((1..=60).map(|i| bar(i, 200.0, 100.0, 150.0)));
        let fib = fibonacci_levels(&bars, 60).unwrap();
        assert_eq!(fib.swing_high, 200.0);
        assert_eq!(fib.swing_low, 100.0);
        assert!((fib.level_236 - 176.4).abs() < 1e-9);
        assert!((fib.level_500 - 150.0).abs() < 1e-9);
        assert!((fib.level_786 - 121.4).abs() < 1e-9);
    }

    #[test]
    fn support_resistance_bounds() {
        let closes = [5.0, 1.0, 9.0, 3.0, 4.0];
        assert_eq!(support_resistance(&closes, 3), Some((3.0, 9.0)));
        assert_eq!(support_resistance(&[], 3), None);
    }
}
