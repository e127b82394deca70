// =============================================================================
// Signal Components - per-indicator classification
// =============================================================================
//
// Each indicator that is available on the latest bar is turned into one
// `SignalComponent`: a closed-set label carrying a direction, plus a strength
// in [0, 1].  Strength is intensity in the label's own direction, so a strong
// bearish read has a high strength and a low directional score.
//
// Unavailable indicators produce no component at all.
// =============================================================================

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;
use crate::patterns::{Divergence, Pattern, PatternFamily, PatternKind};
use crate::types::SignalBias;

// ---------------------------------------------------------------------------
// Indicator names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Macd,
    MovingAverageCrossover,
    Adx,
    Rsi,
    Stochastic,
    Volume,
    Obv,
    SupportResistance,
    PivotPoints,
    CandlestickPattern,
    ChartPattern,
    Divergence,
    Ichimoku,
    Fibonacci,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 14] = [
        Self::Macd,
        Self::MovingAverageCrossover,
        Self::Adx,
        Self::Rsi,
        Self::Stochastic,
        Self::Volume,
        Self::Obv,
        Self::SupportResistance,
        Self::PivotPoints,
        Self::CandlestickPattern,
        Self::ChartPattern,
        Self::Divergence,
        Self::Ichimoku,
        Self::Fibonacci,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Macd => "macd",
            Self::MovingAverageCrossover => "moving_average_crossover",
            Self::Adx => "adx",
            Self::Rsi => "rsi",
            Self::Stochastic => "stochastic",
            Self::Volume => "volume",
            Self::Obv => "obv",
            Self::SupportResistance => "support_resistance",
            Self::PivotPoints => "pivot_points",
            Self::CandlestickPattern => "candlestick_pattern",
            Self::ChartPattern => "chart_pattern",
            Self::Divergence => "divergence",
            Self::Ichimoku => "ichimoku",
            Self::Fibonacci => "fibonacci",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for IndicatorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown indicator: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLabel {
    // Bullish
    Bullish,
    Oversold,
    GoldenCross,
    StrongUptrend,
    StrongTrendUp,
    BullishCross,
    NearSupport,
    AboveR1,
    AbovePivot,
    AboveCloud,
    ResistanceBreakout,
    BullishPattern,
    BullishDivergence,
    // Bearish
    Bearish,
    Overbought,
    DeathCross,
    StrongDowntrend,
    StrongTrendDown,
    BearishCross,
    NearResistance,
    BelowPivot,
    BelowS1,
    BelowCloud,
    SupportBreakdown,
    BearishPattern,
    BearishDivergence,
    // Neutral
    Neutral,
    Ranging,
    HighVolume,
    LowVolume,
    NormalVolume,
    MidRange,
    InCloud,
}

impl SignalLabel {
    pub fn direction(self) -> SignalBias {
        use SignalLabel::*;
        match self {
            Bullish | Oversold | GoldenCross | StrongUptrend | StrongTrendUp | BullishCross
            | NearSupport | AboveR1 | AbovePivot | AboveCloud | ResistanceBreakout
            | BullishPattern | BullishDivergence => SignalBias::Bullish,
            Bearish | Overbought | DeathCross | StrongDowntrend | StrongTrendDown
            | BearishCross | NearResistance | BelowPivot | BelowS1 | BelowCloud
            | SupportBreakdown | BearishPattern | BearishDivergence => SignalBias::Bearish,
            Neutral | Ranging | HighVolume | LowVolume | NormalVolume | MidRange | InCloud => {
                SignalBias::Neutral
            }
        }
    }

    /// Position on the 0 (bearish) .. 1 (bullish) axis for a given strength.
    pub fn directional_score(self, strength: f64) -> f64 {
        match self.direction() {
            SignalBias::Bullish => strength,
            SignalBias::Bearish => 1.0 - strength,
            SignalBias::Neutral => 0.5,
        }
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // serde already holds the canonical snake_case names
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => f.write_str(&s),
            _ => write!(f, "{self:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalComponent {
    pub indicator: IndicatorKind,
    pub label: SignalLabel,
    /// Intensity in the label's direction, [0, 1].
    pub strength: f64,
    /// The raw reading the label was derived from (RSI level, MACD histogram,
    /// volume ratio, ...).
    pub value: f64,
}

impl SignalComponent {
    fn new(indicator: IndicatorKind, label: SignalLabel, strength: f64, value: f64) -> Self {
        Self {
            indicator,
            label,
            strength: strength.clamp(0.0, 1.0),
            value,
        }
    }

    pub fn direction(&self) -> SignalBias {
        self.label.direction()
    }

    pub fn directional_score(&self) -> f64 {
        self.label.directional_score(self.strength)
    }
}

pub fn classify_rsi(rsi: f64) -> SignalComponent {
    let (label, strength) = if rsi < 30.0 {
        (SignalLabel::Oversold, (30.0 - rsi) / 30.0)
    } else if rsi > 70.0 {
        (SignalLabel::Overbought, (rsi - 70.0) / 30.0)
    } else {
        (SignalLabel::Neutral, 0.5)
    };
    SignalComponent::new(IndicatorKind::Rsi, label, strength, rsi)
}

pub fn classify_macd(histogram: f64) -> SignalComponent {
    let label = if histogram > 0.0 {
        SignalLabel::Bullish
    } else if histogram < 0.0 {
        SignalLabel::Bearish
    } else {
        SignalLabel::Neutral
    };
    let strength = if label == SignalLabel::Neutral {
        0.5
    } else {
        (histogram.abs() / 2.0).min(1.0)
    };
    SignalComponent::new(IndicatorKind::Macd, label, strength, histogram)
}

pub fn classify_adx(adx: f64, plus_di: f64, minus_di: f64) -> SignalComponent {
    if adx > 25.0 {
        let label = if plus_di > minus_di {
            SignalLabel::StrongTrendUp
        } else {
            SignalLabel::StrongTrendDown
        };
        SignalComponent::new(IndicatorKind::Adx, label, (adx / 50.0).min(1.0), adx)
    } else {
        SignalComponent::new(IndicatorKind::Adx, SignalLabel::Ranging, 0.3, adx)
    }
}

pub fn classify_stochastic(k: f64, d: f64) -> SignalComponent {
    let (label, strength) = if k < 20.0 {
        (SignalLabel::Oversold, (20.0 - k) / 20.0)
    } else if k > 80.0 {
        (SignalLabel::Overbought, (k - 80.0) / 20.0)
    } else if k > d {
        (SignalLabel::BullishCross, 0.6)
    } else {
        (SignalLabel::BearishCross, 0.6)
    };
    SignalComponent::new(IndicatorKind::Stochastic, label, strength, k)
}

/// Golden/death cross by the SMA50/SMA200 ratio, else the ordering of price
/// against the SMA stack.  A mixed stack produces nothing.
pub fn classify_moving_averages(price: f64, sma_20: Option<f64>, sma_50: f64, sma_200: f64) -> Option<SignalComponent> {
    if sma_200 <= 0.0 {
        return None;
    }
    let ratio = sma_50 / sma_200;
    let kind = IndicatorKind::MovingAverageCrossover;

    if ratio > 1.02 {
        return Some(SignalComponent::new(kind, SignalLabel::GoldenCross, (ratio - 1.0) * 10.0, ratio));
    }
    if ratio < 0.98 {
        return Some(SignalComponent::new(kind, SignalLabel::DeathCross, (1.0 - ratio) * 10.0, ratio));
    }

    let sma_20 = sma_20?;
    if price > sma_20 && sma_20 > sma_50 && sma_50 > sma_200 {
        Some(SignalComponent::new(kind, SignalLabel::StrongUptrend, 0.8, ratio))
    } else if price < sma_20 && sma_20 < sma_50 && sma_50 < sma_200 {
        Some(SignalComponent::new(kind, SignalLabel::StrongDowntrend, 0.8, ratio))
    } else {
        None
    }
}

pub fn classify_volume(volume: f64, average: f64) -> Option<SignalComponent> {
    if average <= 0.0 {
        return None;
    }
    let ratio = volume / average;
    let (label, strength) = if ratio > 1.5 {
        (SignalLabel::HighVolume, (ratio / 2.0).min(1.0))
    } else if ratio < 0.5 {
        (SignalLabel::LowVolume, 0.3)
    } else {
        (SignalLabel::NormalVolume, 0.5)
    };
    Some(SignalComponent::new(IndicatorKind::Volume, label, strength, ratio))
}

/// Position of price inside the support..resistance range.
pub fn classify_support_resistance(price: f64, support: f64, resistance: f64) -> Option<SignalComponent> {
    let range = resistance - support;
    if range <= 0.0 {
        return None;
    }
    let position = (price - support) / range;
    let (label, strength) = if position < 0.2 {
        (SignalLabel::NearSupport, 0.7)
    } else if position > 0.8 {
        (SignalLabel::NearResistance, 0.7)
    } else {
        (SignalLabel::MidRange, 0.4)
    };
    Some(SignalComponent::new(IndicatorKind::SupportResistance, label, strength, position))
}

pub fn classify_pivots(price: f64, pivot: f64, r1: f64, s1: f64) -> SignalComponent {
    let (label, strength) = if price > r1 {
        (SignalLabel::AboveR1, 0.8)
    } else if price > pivot {
        (SignalLabel::AbovePivot, 0.6)
    } else if price > s1 {
        (SignalLabel::BelowPivot, 0.6)
    } else {
        (SignalLabel::BelowS1, 0.8)
    };
    SignalComponent::new(IndicatorKind::PivotPoints, label, strength, price - pivot)
}

pub fn classify_ichimoku(price: f64, span_a: f64, span_b: f64) -> SignalComponent {
    let top = span_a.max(span_b);
    let bottom = span_a.min(span_b);
    let (label, strength) = if price > top {
        (SignalLabel::AboveCloud, 0.8)
    } else if price < bottom {
        (SignalLabel::BelowCloud, 0.8)
    } else {
        (SignalLabel::InCloud, 0.5)
    };
    SignalComponent::new(IndicatorKind::Ichimoku, label, strength, price - (top + bottom) / 2.0)
}

/// Highest-ranked breakout or breakdown among the detected patterns.
pub fn classify_chart_patterns(patterns: &[Pattern]) -> Option<SignalComponent> {
    patterns.iter().find_map(|p| {
        let label = match p.kind {
            PatternKind::Breakout => SignalLabel::ResistanceBreakout,
            PatternKind::Breakdown => SignalLabel::SupportBreakdown,
            _ => return None,
        };
        Some(SignalComponent::new(IndicatorKind::ChartPattern, label, p.confidence, p.confidence))
    })
}

/// Strongest directional candlestick pattern.
pub fn classify_candlesticks(patterns: &[Pattern]) -> Option<SignalComponent> {
    let strongest = patterns
        .iter()
        .filter(|p| p.family == PatternFamily::Candlestick && p.signal.is_directional())
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))?;
    let label = match strongest.signal {
        SignalBias::Bullish => SignalLabel::BullishPattern,
        _ => SignalLabel::BearishPattern,
    };
    Some(SignalComponent::new(
        IndicatorKind::CandlestickPattern,
        label,
        strongest.confidence,
        strongest.confidence,
    ))
}

pub fn classify_divergences(divergences: &[Divergence]) -> Option<SignalComponent> {
    let strongest = divergences
        .iter()
        .filter(|d| d.direction.is_directional())
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))?;
    let label = match strongest.direction {
        SignalBias::Bullish => SignalLabel::BullishDivergence,
        _ => SignalLabel::BearishDivergence,
    };
    Some(SignalComponent::new(
        IndicatorKind::Divergence,
        label,
        strongest.confidence,
        strongest.confidence,
    ))
}

/// Classifies every available indicator, restricted to `selection` when one
/// is given.
pub fn classify_all(
    snapshot: &IndicatorSnapshot,
    patterns: &[Pattern],
    divergences: &[Divergence],
    selection: Option<&BTreeSet<IndicatorKind>>,
) -> Vec<SignalComponent> {
    let wanted = |kind: IndicatorKind| selection.map_or(true, |s| s.contains(&kind));
    let s = snapshot;
    let mut out = Vec::new();

    if wanted(IndicatorKind::Rsi) {
        out.extend(s.rsi.map(classify_rsi));
    }
    if wanted(IndicatorKind::Macd) {
        out.extend(s.macd_histogram.map(classify_macd));
    }
    if wanted(IndicatorKind::Adx) {
        if let (Some(adx), Some(plus), Some(minus)) = (s.adx, s.plus_di, s.minus_di) {
            out.push(classify_adx(adx, plus, minus));
        }
    }
    if wanted(IndicatorKind::Stochastic) {
        if let (Some(k), Some(d)) = (s.stoch_k, s.stoch_d) {
            out.push(classify_stochastic(k, d));
        }
    }
    if wanted(IndicatorKind::MovingAverageCrossover) {
        if let (Some(price), Some(s50), Some(s200)) = (s.price, s.sma_50, s.sma_200) {
            out.extend(classify_moving_averages(price, s.sma_20, s50, s200));
        }
    }
    if wanted(IndicatorKind::Volume) {
        if let (Some(v), Some(avg)) = (s.volume, s.volume_avg) {
            out.extend(classify_volume(v, avg));
        }
    }
    if wanted(IndicatorKind::SupportResistance) {
        if let (Some(price), Some(sup), Some(res)) = (s.price, s.support, s.resistance) {
            out.extend(classify_support_resistance(price, sup, res));
        }
    }
    if wanted(IndicatorKind::PivotPoints) {
        if let (Some(price), Some(p)) = (s.price, s.pivots) {
            out.push(classify_pivots(price, p.pivot, p.r1, p.s1));
        }
    }
    if wanted(IndicatorKind::Ichimoku) {
        if let (Some(price), Some(a), Some(b)) = (s.price, s.ichimoku_span_a, s.ichimoku_span_b) {
            out.push(classify_ichimoku(price, a, b));
        }
    }
    if wanted(IndicatorKind::ChartPattern) {
        out.extend(classify_chart_patterns(patterns));
    }
    if wanted(IndicatorKind::CandlestickPattern) {
        out.extend(classify_candlesticks(patterns));
    }
    if wanted(IndicatorKind::Divergence) {
        out.extend(classify_divergences(divergences));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::PivotLevels;
    use crate::patterns::DivergenceSource;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rsi_thresholds() {
        let c = classify_rsi(15.0);
        assert_eq!(c.label, SignalLabel::Oversold);
        assert!(close(c.strength, 0.5));

        let c = classify_rsi(85.0);
        assert_eq!(c.label, SignalLabel::Overbought);
        assert!(close(c.directional_score(), 0.5));

        assert_eq!(classify_rsi(30.0).label, SignalLabel::Neutral);
        assert_eq!(classify_rsi(70.0).label, SignalLabel::Neutral);
    }

    #[test]
    fn macd_strength_saturates() {
        let c = classify_macd(0.5);
        assert_eq!(c.label, SignalLabel::Bullish);
        assert!(close(c.strength, 0.25));
        assert!(close(classify_macd(-7.0).strength, 1.0));
        assert_eq!(classify_macd(-7.0).label, SignalLabel::Bearish);

        // a faint bearish histogram sits near the bullish end
        assert!(close(classify_macd(-0.2).directional_score(), 0.9));
    }

    #[test]
    fn adx_direction_follows_di_lines() {
        assert_eq!(classify_adx(40.0, 30.0, 10.0).label, SignalLabel::StrongTrendUp);
        assert_eq!(classify_adx(40.0, 10.0, 30.0).label, SignalLabel::StrongTrendDown);
        assert!(close(classify_adx(40.0, 10.0, 30.0).strength, 0.8));
        let ranging = classify_adx(18.0, 30.0, 10.0);
        assert_eq!(ranging.label, SignalLabel::Ranging);
        assert!(close(ranging.directional_score(), 0.5));
    }

    #[test]
    fn stochastic_zones_and_cross() {
        assert_eq!(classify_stochastic(10.0, 15.0).label, SignalLabel::Oversold);
        assert_eq!(classify_stochastic(90.0, 85.0).label, SignalLabel::Overbought);
        assert_eq!(classify_stochastic(50.0, 45.0).label, SignalLabel::BullishCross);
        let bear = classify_stochastic(50.0, 55.0);
        assert_eq!(bear.label, SignalLabel::BearishCross);
        assert!(close(bear.directional_score(), 0.4));
    }

    #[test]
    fn moving_average_ratio_and_stack() {
        let golden = classify_moving_averages(110.0, Some(108.0), 105.0, 100.0).unwrap();
        assert_eq!(golden.label, SignalLabel::GoldenCross);
        assert!(close(golden.strength, 0.5));

        let up = classify_moving_averages(103.0, Some(102.0), 101.0, 100.0).unwrap();
        assert_eq!(up.label, SignalLabel::StrongUptrend);

        let down = classify_moving_averages(97.0, Some(98.0), 99.0, 100.0).unwrap();
        assert_eq!(down.label, SignalLabel::StrongDowntrend);

        assert!(classify_moving_averages(100.0, Some(102.0), 101.0, 100.0).is_none());
        assert!(classify_moving_averages(100.0, None, 101.0, 100.0).is_none());
    }

    #[test]
    fn volume_ratio_bands() {
        assert_eq!(classify_volume(4_000.0, 1_000.0).unwrap().label, SignalLabel::HighVolume);
        assert!(close(classify_volume(4_000.0, 1_000.0).unwrap().strength, 1.0));
        assert_eq!(classify_volume(300.0, 1_000.0).unwrap().label, SignalLabel::LowVolume);
        assert_eq!(classify_volume(1_000.0, 1_000.0).unwrap().label, SignalLabel::NormalVolume);
        assert!(classify_volume(1_000.0, 0.0).is_none());
    }

    #[test]
    fn degenerate_support_resistance_is_unavailable() {
        assert!(classify_support_resistance(100.0, 100.0, 100.0).is_none());
        assert!(classify_support_resistance(100.0, 110.0, 90.0).is_none());
        let near = classify_support_resistance(91.0, 90.0, 110.0).unwrap();
        assert_eq!(near.label, SignalLabel::NearSupport);
        assert!(close(near.value, 0.05));
    }

    #[test]
    fn pivot_zones_order_bullish_to_bearish() {
        let p = PivotLevels {
            pivot: 100.0,
            r1: 105.0,
            s1: 95.0,
            r2: 110.0,
            s2: 90.0,
        };
        let scores: Vec<f64> = [106.0, 101.0, 99.0, 94.0]
            .iter()
            .map(|&price| classify_pivots(price, p.pivot, p.r1, p.s1).directional_score())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] > w[1]), "{scores:?}");
    }

    #[test]
    fn bearish_labels_carry_bearish_intensity() {
        use SignalLabel::*;
        let cases = [
            (classify_rsi(85.0), Overbought, 0.5),
            (classify_macd(-1.0), Bearish, 0.5),
            (classify_adx(40.0, 10.0, 30.0), StrongTrendDown, 0.8),
            (classify_stochastic(90.0, 80.0), Overbought, 0.5),
            (classify_stochastic(40.0, 45.0), BearishCross, 0.6),
            (classify_moving_averages(90.0, Some(92.0), 95.0, 100.0).unwrap(), DeathCross, 0.5),
            (classify_moving_averages(97.0, Some(98.0), 99.0, 100.0).unwrap(), StrongDowntrend, 0.8),
            (classify_support_resistance(95.0, 50.0, 100.0).unwrap(), NearResistance, 0.7),
            (classify_pivots(99.0, 100.0, 105.0, 95.0), BelowPivot, 0.6),
            (classify_pivots(94.0, 100.0, 105.0, 95.0), BelowS1, 0.8),
            (classify_ichimoku(90.0, 110.0, 100.0), BelowCloud, 0.8),
        ];
        for (c, label, strength) in cases {
            assert_eq!(c.label, label);
            assert!(close(c.strength, strength), "{label}: {}", c.strength);
            assert_eq!(c.direction(), SignalBias::Bearish, "{label}");
            assert!(close(c.directional_score(), 1.0 - strength), "{label}");
        }
    }

    #[test]
    fn zone_labels_mirror_their_bullish_twins() {
        let pairs = [
            (classify_pivots(101.0, 100.0, 105.0, 95.0), classify_pivots(99.0, 100.0, 105.0, 95.0)),
            (classify_pivots(106.0, 100.0, 105.0, 95.0), classify_pivots(94.0, 100.0, 105.0, 95.0)),
            (classify_ichimoku(120.0, 100.0, 110.0), classify_ichimoku(90.0, 110.0, 100.0)),
            (classify_stochastic(50.0, 45.0), classify_stochastic(40.0, 45.0)),
        ];
        for (bull, bear) in pairs {
            assert_eq!(bull.strength, bear.strength, "{} vs {}", bull.label, bear.label);
            assert!(close(bull.directional_score() + bear.directional_score(), 1.0));
        }
    }

    #[test]
    fn ichimoku_cloud_position() {
        assert_eq!(classify_ichimoku(120.0, 100.0, 110.0).label, SignalLabel::AboveCloud);
        assert_eq!(classify_ichimoku(90.0, 110.0, 100.0).label, SignalLabel::BelowCloud);
        assert_eq!(classify_ichimoku(105.0, 110.0, 100.0).label, SignalLabel::InCloud);
    }

    #[test]
    fn pattern_and_divergence_components() {
        let patterns = vec![
            Pattern::new(PatternKind::Doji, 0.7, SignalBias::Neutral, "doji", 3),
            Pattern::new(PatternKind::Hammer, 0.65, SignalBias::Bullish, "hammer", 5),
            Pattern::new(PatternKind::Breakdown, 0.8, SignalBias::Bearish, "breakdown", 10),
        ];
        let candle = classify_candlesticks(&patterns).unwrap();
        assert_eq!(candle.label, SignalLabel::BullishPattern);
        assert!(close(candle.strength, 0.65));
        assert_eq!(classify_chart_patterns(&patterns).unwrap().label, SignalLabel::SupportBreakdown);

        let divs = vec![Divergence {
            direction: SignalBias::Bearish,
            indicator: DivergenceSource::Rsi,
            confidence: 0.75,
            description: String::new(),
        }];
        assert_eq!(classify_divergences(&divs).unwrap().label, SignalLabel::BearishDivergence);
        assert!(classify_divergences(&[]).is_none());
    }

    #[test]
    fn selection_and_missing_values_limit_components() {
        let snapshot = IndicatorSnapshot {
            price: Some(100.0),
            rsi: Some(25.0),
            macd_histogram: Some(0.4),
            ..Default::default()
        };
        let all = classify_all(&snapshot, &[], &[], None);
        let kinds: Vec<IndicatorKind> = all.iter().map(|c| c.indicator).collect();
        assert_eq!(kinds, vec![IndicatorKind::Rsi, IndicatorKind::Macd]);

        let only_rsi: BTreeSet<IndicatorKind> = [IndicatorKind::Rsi].into_iter().collect();
        assert_eq!(classify_all(&snapshot, &[], &[], Some(&only_rsi)).len(), 1);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in IndicatorKind::ALL {
            assert_eq!(kind.name().parse::<IndicatorKind>().unwrap(), kind);
        }
        assert_eq!(SignalLabel::AboveR1.to_string(), "above_r1");
        assert_eq!(SignalLabel::BelowS1.to_string(), "below_s1");
    }
}
