// =============================================================================
// Candlestick Patterns
// =============================================================================
//
// Evaluated on the most recent one to three bars.  Each detector needs only
// as many bars as its shape spans.

use crate::market_data::Bar;
use crate::types::SignalBias;

use super::types::{Pattern, PatternKind, TradeLevels};

const EPSILON: f64 = 0.001;

pub fn detect_candlestick_patterns(bars: &[Bar]) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    let Some(curr) = bars.last() else {
        return patterns;
    };

    patterns.extend(hammer(curr));
    patterns.extend(shooting_star(curr));
    patterns.extend(doji(curr));

    if bars.len() >= 2 {
        let prev = &bars[bars.len() - 2];
        patterns.extend(bullish_engulfing(prev, curr));
        patterns.extend(bearish_engulfing(prev, curr));
    }

    if bars.len() >= 3 {
        let first = &bars[bars.len() - 3];
        let star = &bars[bars.len() - 2];
        patterns.extend(morning_star(first, star, curr));
        patterns.extend(evening_star(first, star, curr));
    }

    patterns
}

fn hammer(c: &Bar) -> Option<Pattern> {
    let body = c.body_size();
    if !(c.lower_shadow() > 2.0 * body && c.upper_shadow() < 0.3 * body) {
        return None;
    }
    let confidence = (c.lower_shadow() / (body + EPSILON) / 3.0).min(0.9);
    Some(
        Pattern::new(PatternKind::Hammer, confidence, SignalBias::Bullish, "Hammer: potential bullish reversal", 3)
            .with_levels(TradeLevels::new(c.close * 1.01, c.low * 0.99, c.close * 1.05)),
    )
}

fn shooting_star(c: &Bar) -> Option<Pattern> {
    let body = c.body_size();
    if !(c.upper_shadow() > 2.0 * body && c.lower_shadow() < 0.3 * body) {
        return None;
    }
    let confidence = (c.upper_shadow() / (body + EPSILON) / 3.0).min(0.9);
    Some(
        Pattern::new(PatternKind::ShootingStar, confidence, SignalBias::Bearish, "Shooting star: potential bearish reversal", 3)
            .with_levels(TradeLevels::new(c.close * 0.99, c.high * 1.01, c.close * 0.95)),
    )
}

fn doji(c: &Bar) -> Option<Pattern> {
    // A zero-range bar has no shape to read.
    if c.range() <= 0.0 || c.body_size() >= 0.1 * c.range() {
        return None;
    }
    Some(Pattern::new(PatternKind::Doji, 0.7, SignalBias::Neutral, "Doji: market indecision", 2))
}

fn bullish_engulfing(prev: &Bar, curr: &Bar) -> Option<Pattern> {
    if !(prev.is_bearish() && curr.is_bullish() && curr.open < prev.close && curr.close > prev.open) {
        return None;
    }
    Some(
        Pattern::new(PatternKind::BullishEngulfing, 0.8, SignalBias::Bullish, "Bullish engulfing: strong bullish signal", 5)
            .with_levels(TradeLevels::new(
                curr.close * 1.01,
                prev.low.min(curr.low) * 0.99,
                curr.close * 1.08,
            )),
    )
}

fn bearish_engulfing(prev: &Bar, curr: &Bar) -> Option<Pattern> {
    if !(prev.is_bullish() && curr.is_bearish() && curr.open > prev.close && curr.close < prev.open) {
        return None;
    }
    Some(
        Pattern::new(PatternKind::BearishEngulfing, 0.8, SignalBias::Bearish, "Bearish engulfing: strong bearish signal", 5)
            .with_levels(TradeLevels::new(
                curr.close * 0.99,
                prev.high.max(curr.high) * 1.01,
                curr.close * 0.92,
            )),
    )
}

fn is_star(star: &Bar) -> bool {
    star.range() > 0.0 && star.body_size() < 0.3 * star.range()
}

fn morning_star(first: &Bar, star: &Bar, curr: &Bar) -> Option<Pattern> {
    let large_down = first.is_bearish() && first.body_size() >= 0.5 * first.range();
    let large_up = curr.is_bullish() && curr.body_size() >= 0.5 * curr.range();
    if !(large_down && is_star(star) && large_up && curr.close > first.open) {
        return None;
    }
    let low = first.low.min(star.low).min(curr.low);
    Some(
        Pattern::new(PatternKind::MorningStar, 0.85, SignalBias::Bullish, "Morning star: strong bullish reversal", 7)
            .with_levels(TradeLevels::new(curr.close * 1.01, low * 0.98, curr.close * 1.10)),
    )
}

fn evening_star(first: &Bar, star: &Bar, curr: &Bar) -> Option<Pattern> {
    let large_up = first.is_bullish() && first.body_size() >= 0.5 * first.range();
    let large_down = curr.is_bearish() && curr.body_size() >= 0.5 * curr.range();
    if !(large_up && is_star(star) && large_down && curr.close < first.open) {
        return None;
    }
    let high = first.high.max(star.high).max(curr.high);
    Some(
        Pattern::new(PatternKind::EveningStar, 0.85, SignalBias::Bearish, "Evening star: strong bearish reversal", 7)
            .with_levels(TradeLevels::new(curr.close * 0.99, high * 1.02, curr.close * 0.90)),
    )
}
