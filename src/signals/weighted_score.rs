// =============================================================================
// Weighted Composite Scorer - indicator-weighted fusion with confluence bonus
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::SignalBias;

use super::components::{IndicatorKind, SignalComponent, SignalLabel};

/// Per-indicator weights.  Missing entries weigh nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorWeights {
    pub weights: BTreeMap<IndicatorKind, f64>,
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        use IndicatorKind::*;
        let weights = [
            (Macd, 0.25),
            (MovingAverageCrossover, 0.15),
            (Adx, 0.15),
            (Rsi, 0.20),
            (Stochastic, 0.15),
            (Volume, 0.15),
            (Obv, 0.10),
            (SupportResistance, 0.15),
            (PivotPoints, 0.10),
            (CandlestickPattern, 0.10),
            (ChartPattern, 0.15),
            (Divergence, 0.12),
            (Ichimoku, 0.20),
            (Fibonacci, 0.10),
        ]
        .into_iter()
        .collect();
        Self { weights }
    }
}

impl IndicatorWeights {
    /// The weight model for a run.  An empty `custom` map means the defaults;
    /// otherwise the valid custom entries replace them outright, so only the
    /// indicators named there carry weight.  Negative or non-finite entries
    /// are dropped with a warning, and a map with nothing valid left falls
    /// back to the defaults.
    pub fn from_custom(custom: &BTreeMap<IndicatorKind, f64>) -> Self {
        if custom.is_empty() {
            return Self::default();
        }

        let weights: BTreeMap<IndicatorKind, f64> = custom
            .iter()
            .filter(|&(kind, &weight)| {
                let valid = weight.is_finite() && weight >= 0.0;
                if !valid {
                    warn!(indicator = %kind, weight, "ignoring invalid indicator weight");
                }
                valid
            })
            .map(|(&kind, &weight)| (kind, weight))
            .collect();

        if weights.is_empty() {
            warn!("no valid custom weights, using defaults");
            return Self::default();
        }
        Self { weights }
    }

    pub fn get(&self, kind: IndicatorKind) -> f64 {
        self.weights.get(&kind).copied().unwrap_or(0.0)
    }

    /// Indicators this model weighs.
    pub fn kinds(&self) -> BTreeSet<IndicatorKind> {
        self.weights.keys().copied().collect()
    }
}

/// The contribution of a single component to the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredComponent {
    pub indicator: IndicatorKind,
    pub label: SignalLabel,
    pub strength: f64,
    pub value: f64,
    pub weight: f64,
    pub directional_score: f64,
    /// weight × directional_score / Σweight
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedScore {
    /// Σ(weight × directional) / Σweight, in [0, 1].
    pub score: f64,
    pub confluence_bonus: f64,
    /// min(1, score + bonus)
    pub confidence: f64,
    pub total_weight: f64,
    pub components: Vec<ScoredComponent>,
}

/// Bonus for agreement: needs at least three components, then scales with
/// the share of the dominant direction.
pub fn confluence_bonus(components: &[SignalComponent]) -> f64 {
    let total = components.len();
    if total < 3 {
        return 0.0;
    }
    let bullish = components.iter().filter(|c| c.direction() == SignalBias::Bullish).count();
    let bearish = components.iter().filter(|c| c.direction() == SignalBias::Bearish).count();
    let fraction = bullish.max(bearish) as f64 / total as f64;

    if fraction > 0.8 {
        0.15
    } else if fraction > 0.7 {
        0.10
    } else if fraction > 0.6 {
        0.05
    } else {
        0.0
    }
}

/// Returns `None` when no component carries weight.
pub fn weighted_score(components: &[SignalComponent], weights: &IndicatorWeights) -> Option<WeightedScore> {
    let total_weight: f64 = components.iter().map(|c| weights.get(c.indicator)).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return None;
    }

    let mut score = 0.0;
    let scored = components
        .iter()
        .map(|c| {
            let weight = weights.get(c.indicator);
            let directional_score = c.directional_score();
            let contribution = weight * directional_score / total_weight;
            score += contribution;
            ScoredComponent {
                indicator: c.indicator,
                label: c.label,
                strength: c.strength,
                value: c.value,
                weight,
                directional_score,
                contribution,
            }
        })
        .collect();

    let score = score.clamp(0.0, 1.0);
    let bonus = confluence_bonus(components);

    Some(WeightedScore {
        score,
        confluence_bonus: bonus,
        confidence: (score + bonus).min(1.0),
        total_weight,
        components: scored,
    })
}
