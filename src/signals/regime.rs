// =============================================================================
// Regime Adjustment - ADX-driven reweighting of component strengths
// =============================================================================
//
// Trending (ADX > 25): trend-following components are trusted more and
// oscillators less.  Ranging: the reverse.  Without ADX no adjustment is made.

use serde::{Deserialize, Serialize};

use super::components::{IndicatorKind, SignalComponent};

const TREND_ADX: f64 = 25.0;
const BOOST: f64 = 1.2;
const DAMPEN: f64 = 0.8;

const TREND_FOLLOWERS: [IndicatorKind; 3] = [
    IndicatorKind::Macd,
    IndicatorKind::MovingAverageCrossover,
    IndicatorKind::Ichimoku,
];
const OSCILLATORS: [IndicatorKind; 2] = [IndicatorKind::Rsi, IndicatorKind::Stochastic];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Trending,
    Ranging,
}

impl Regime {
    pub fn from_adx(adx: Option<f64>) -> Option<Self> {
        adx.map(|a| if a > TREND_ADX { Self::Trending } else { Self::Ranging })
    }

    fn multipliers(self) -> (f64, f64) {
        match self {
            Self::Trending => (BOOST, DAMPEN),
            Self::Ranging => (DAMPEN, BOOST),
        }
    }
}

/// Finer trend-strength label reported alongside the composite signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    StrongTrend,
    Trending,
    WeakTrend,
    Ranging,
    Unknown,
}

impl MarketCondition {
    pub fn from_adx(adx: Option<f64>) -> Self {
        match adx {
            None => Self::Unknown,
            Some(a) if a > 40.0 => Self::StrongTrend,
            Some(a) if a > 25.0 => Self::Trending,
            Some(a) if a > 20.0 => Self::WeakTrend,
            Some(_) => Self::Ranging,
        }
    }
}

/// Scales strengths in place; results stay within [0, 1].
pub fn apply_regime(components: &mut [SignalComponent], regime: Option<Regime>) {
    let Some(regime) = regime else {
        return;
    };
    let (trend_mult, osc_mult) = regime.multipliers();

    for c in components.iter_mut() {
        let mult = if TREND_FOLLOWERS.contains(&c.indicator) {
            trend_mult
        } else if OSCILLATORS.contains(&c.indicator) {
            osc_mult
        } else {
            continue;
        };
        c.strength = (c.strength * mult).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::components::{classify_macd, classify_rsi, classify_volume};

    #[test]
    fn trending_boosts_trend_and_dampens_oscillators() {
        let mut comps = vec![classify_macd(1.0), classify_rsi(15.0), classify_volume(1.0, 1.0).unwrap()];
        apply_regime(&mut comps, Regime::from_adx(Some(35.0)));
        assert!((comps[0].strength - 0.6).abs() < 1e-12);
        assert!((comps[1].strength - 0.4).abs() < 1e-12);
        assert!((comps[2].strength - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ranging_inverts_multipliers_and_clamps() {
        let mut comps = vec![classify_macd(10.0), classify_rsi(0.0)];
        apply_regime(&mut comps, Regime::from_adx(Some(15.0)));
        assert!((comps[0].strength - 0.8).abs() < 1e-12);
        assert_eq!(comps[1].strength, 1.0);
    }

    #[test]
    fn missing_adx_leaves_strengths_alone() {
        let mut comps = vec![classify_macd(1.0)];
        apply_regime(&mut comps, Regime::from_adx(None));
        assert!((comps[0].strength - 0.5).abs() < 1e-12);
        assert_eq!(MarketCondition::from_adx(None), MarketCondition::Unknown);
    }

    #[test]
    fn market_condition_bands() {
        assert_eq!(MarketCondition::from_adx(Some(45.0)), MarketCondition::StrongTrend);
        assert_eq!(MarketCondition::from_adx(Some(30.0)), MarketCondition::Trending);
        assert_eq!(MarketCondition::from_adx(Some(22.0)), MarketCondition::WeakTrend);
        assert_eq!(MarketCondition::from_adx(Some(25.0)), MarketCondition::WeakTrend);
        assert_eq!(MarketCondition::from_adx(Some(10.0)), MarketCondition::Ranging);
    }
}
