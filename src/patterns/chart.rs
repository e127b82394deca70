// =============================================================================
// Chart Patterns
// =============================================================================
//
// Run over the trailing `lookback` bars (default 50):
//   - Double top / bottom from order-5 extrema.
//   - Head-and-shoulders / inverse from the last three order-5 extrema.
//   - Triangles from the regression slopes of highs and lows.
//   - Breakout / breakdown against the prior 30 bars with a volume filter.
// =============================================================================

use crate::market_data::Bar;
use crate::types::SignalBias;

use super::extrema::{find_peaks, find_troughs, regression_slope};
use super::types::{Pattern, PatternKind, TradeLevels};

const EXTREMA_ORDER: usize = 5;
const EQUAL_LEVEL_TOLERANCE: f64 = 0.03;
const MIN_RETRACEMENT: f64 = 0.05;
const FLAT_SLOPE: f64 = 0.001;
const MIN_TRIANGLE_BARS: usize = 20;
const BREAKOUT_WINDOW: usize = 30;
const BREAKOUT_MARGIN: f64 = 0.02;
const BREAKOUT_VOLUME_MULT: f64 = 1.5;

pub fn detect_chart_patterns(bars: &[Bar], lookback: usize) -> Vec<Pattern> {
    if lookback == 0 || bars.len() < lookback {
        return Vec::new();
    }

    let recent = &bars[bars.len() - lookback..];
    let highs: Vec<f64> = recent.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = recent.iter().map(|b| b.low).collect();
    let peaks = find_peaks(&highs, EXTREMA_ORDER);
    let troughs = find_troughs(&lows, EXTREMA_ORDER);

    let mut patterns = Vec::new();
    patterns.extend(double_top(&highs, &lows, &peaks));
    patterns.extend(double_bottom(&highs, &lows, &troughs));
    patterns.extend(head_and_shoulders(&highs, &lows, &peaks));
    patterns.extend(inverse_head_and_shoulders(&highs, &lows, &troughs));
    patterns.extend(triangle(&highs, &lows));
    patterns.extend(breakout(recent));
    patterns
}

fn within_tolerance(a: f64, b: f64) -> bool {
    a != 0.0 && ((a - b) / a).abs() < EQUAL_LEVEL_TOLERANCE
}

fn min_between(values: &[f64], from: usize, to: usize) -> Option<f64> {
    values.get(from..to)?.iter().copied().reduce(f64::min)
}

fn max_between(values: &[f64], from: usize, to: usize) -> Option<f64> {
    values.get(from..to)?.iter().copied().reduce(f64::max)
}

fn double_top(highs: &[f64], lows: &[f64], peaks: &[usize]) -> Option<Pattern> {
    let [.., prev, last] = peaks else {
        return None;
    };
    let (last_high, prev_high) = (highs[*last], highs[*prev]);
    if !within_tolerance(last_high, prev_high) {
        return None;
    }
    let valley = min_between(lows, *prev, *last)?;
    if (last_high - valley) / last_high <= MIN_RETRACEMENT {
        return None;
    }
    Some(
        Pattern::new(PatternKind::DoubleTop, 0.75, SignalBias::Bearish, "Double top: bearish reversal", 10).with_levels(
            TradeLevels::new(valley * 0.99, last_high * 1.02, valley - (last_high - valley) * 0.8),
        ),
    )
}

fn double_bottom(highs: &[f64], lows: &[f64], troughs: &[usize]) -> Option<Pattern> {
    let [.., prev, last] = troughs else {
        return None;
    };
    let (last_low, prev_low) = (lows[*last], lows[*prev]);
    if !within_tolerance(last_low, prev_low) {
        return None;
    }
    let peak = max_between(highs, *prev, *last)?;
    if (peak - last_low) / last_low <= MIN_RETRACEMENT {
        return None;
    }
    Some(
        Pattern::new(PatternKind::DoubleBottom, 0.75, SignalBias::Bullish, "Double bottom: bullish reversal", 10)
            .with_levels(TradeLevels::new(peak * 1.01, last_low * 0.98, peak + (peak - last_low) * 0.8)),
    )
}

fn head_and_shoulders(highs: &[f64], lows: &[f64], peaks: &[usize]) -> Option<Pattern> {
    let [.., left, head, right] = peaks else {
        return None;
    };
    let (l, h, r) = (highs[*left], highs[*head], highs[*right]);
    if !(h > l && h > r && within_tolerance(r, l)) {
        return None;
    }
    let neckline = min_between(lows, *left, *right)?;
    Some(
        Pattern::new(
            PatternKind::HeadAndShoulders,
            0.70,
            SignalBias::Bearish,
            format!("Head and shoulders: neckline at {neckline:.2}"),
            10,
        )
        .with_levels(TradeLevels::new(neckline * 0.99, h * 1.02, neckline - (h - neckline))),
    )
}

fn inverse_head_and_shoulders(highs: &[f64], lows: &[f64], troughs: &[usize]) -> Option<Pattern> {
    let [.., left, head, right] = troughs else {
        return None;
    };
    let (l, h, r) = (lows[*left], lows[*head], lows[*right]);
    if !(h < l && h < r && within_tolerance(r, l)) {
        return None;
    }
    let neckline = max_between(highs, *left, *right)?;
    Some(
        Pattern::new(
            PatternKind::InverseHeadAndShoulders,
            0.70,
            SignalBias::Bullish,
            format!("Inverse head and shoulders: neckline at {neckline:.2}"),
            10,
        )
        .with_levels(TradeLevels::new(neckline * 1.01, h * 0.98, neckline + (neckline - h))),
    )
}

fn triangle(highs: &[f64], lows: &[f64]) -> Option<Pattern> {
    if highs.len() < MIN_TRIANGLE_BARS {
        return None;
    }
    let high_trend = regression_slope(highs)?;
    let low_trend = regression_slope(lows)?;

    if high_trend.abs() < FLAT_SLOPE && low_trend > FLAT_SLOPE {
        Some(Pattern::new(
            PatternKind::AscendingTriangle,
            0.70,
            SignalBias::Bullish,
            "Ascending triangle: bullish continuation",
            15,
        ))
    } else if high_trend < -FLAT_SLOPE && low_trend.abs() < FLAT_SLOPE {
        Some(Pattern::new(
            PatternKind::DescendingTriangle,
            0.70,
            SignalBias::Bearish,
            "Descending triangle: bearish continuation",
            15,
        ))
    } else if high_trend < -FLAT_SLOPE && low_trend > FLAT_SLOPE {
        Some(Pattern::new(
            PatternKind::SymmetricalTriangle,
            0.65,
            SignalBias::Neutral,
            "Symmetrical triangle: breakout pending",
            10,
        ))
    } else {
        None
    }
}

fn breakout(recent: &[Bar]) -> Option<Pattern> {
    if recent.len() < BREAKOUT_WINDOW {
        return None;
    }
    let (current, prior) = recent[recent.len() - BREAKOUT_WINDOW..].split_last()?;

    let resistance = prior.iter().map(|b| b.high).reduce(f64::max)?;
    let support = prior.iter().map(|b| b.low).reduce(f64::min)?;
    let avg_volume = prior.iter().map(|b| b.volume).sum::<f64>() / prior.len() as f64;
    let price = current.close;
    let volume_spike = current.volume > avg_volume * BREAKOUT_VOLUME_MULT;

    if price > resistance * (1.0 + BREAKOUT_MARGIN) && volume_spike {
        Some(
            Pattern::new(
                PatternKind::Breakout,
                0.8,
                SignalBias::Bullish,
                format!("Breakout above resistance at {resistance:.2}"),
                5,
            )
            .with_levels(TradeLevels::new(price, resistance * 0.98, price + (price - support) * 0.5)),
        )
    } else if price < support * (1.0 - BREAKOUT_MARGIN) && volume_spike {
        Some(
            Pattern::new(
                PatternKind::Breakdown,
                0.8,
                SignalBias::Bearish,
                format!("Breakdown below support at {support:.2}"),
                5,
            )
            .with_levels(TradeLevels::new(price, support * 1.02, price - (resistance - price) * 0.5)),
        )
    } else {
        None
    }
}
