// =============================================================================
// Composite Signal - one timeframe's fused verdict
// =============================================================================
//
// classify -> regime-adjust -> weight + confluence -> signal type -> levels
// =============================================================================

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::IndicatorSnapshot;
use crate::market_data::{Timeframe, TimeframeConfig};
use crate::patterns::{Divergence, Pattern};

use super::components::{classify_all, IndicatorKind};
use super::levels::{EntryZone, RiskReward};
use super::regime::{apply_regime, MarketCondition, Regime};
use super::signal_type::SignalType;
use super::weighted_score::{weighted_score, IndicatorWeights, ScoredComponent};

const KEY_SIGNAL_STRENGTH: f64 = 0.6;
const MAX_KEY_SIGNALS: usize = 5;

/// Everything the scorer needs for one timeframe.
pub struct ScoringInput<'a> {
    pub snapshot: &'a IndicatorSnapshot,
    pub patterns: &'a [Pattern],
    pub divergences: &'a [Divergence],
    pub config: &'a TimeframeConfig,
    pub weights: &'a IndicatorWeights,
    /// `None` scores every indicator.
    pub selection: Option<&'a BTreeSet<IndicatorKind>>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeSignal {
    pub timeframe: Timeframe,
    pub signal_type: SignalType,
    /// min(1, weighted_score + confluence_bonus)
    pub confidence: f64,
    pub weighted_score: f64,
    pub confluence_bonus: f64,
    pub regime: Option<Regime>,
    pub market_condition: MarketCondition,
    pub components: Vec<ScoredComponent>,
    /// "indicator: label" for the strongest components.
    pub key_signals: Vec<String>,
    pub entry_zone: Option<EntryZone>,
    pub risk_reward: Option<RiskReward>,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

/// Fails only when no available indicator carries weight.
pub fn generate_signal(input: &ScoringInput<'_>) -> Result<CompositeSignal> {
    let snapshot = input.snapshot;

    let mut components = classify_all(snapshot, input.patterns, input.divergences, input.selection);
    let regime = Regime::from_adx(snapshot.adx);
    apply_regime(&mut components, regime);

    let Some(scored) = weighted_score(&components, input.weights) else {
        bail!("no scorable indicators for {}", input.config.timeframe);
    };

    let signal_type = SignalType::from_score(scored.confidence);

    let key_signals: Vec<String> = scored
        .components
        .iter()
        .filter(|c| c.strength > KEY_SIGNAL_STRENGTH)
        .take(MAX_KEY_SIGNALS)
        .map(|c| format!("{}: {}", c.indicator, c.label))
        .collect();

    let entry_zone = match (snapshot.price, snapshot.atr, snapshot.support, snapshot.resistance) {
        (Some(price), Some(atr), Some(support), Some(resistance)) => {
            Some(EntryZone::compute(signal_type, price, atr, support, resistance))
        }
        _ => None,
    };
    let risk_reward = entry_zone.as_ref().and_then(EntryZone::risk_reward);

    debug!(
        timeframe = %input.config.timeframe,
        signal = %signal_type,
        confidence = format!("{:.3}", scored.confidence),
        components = scored.components.len(),
        "composite signal generated"
    );

    Ok(CompositeSignal {
        timeframe: input.config.timeframe,
        signal_type,
        confidence: scored.confidence,
        weighted_score: scored.score,
        confluence_bonus: scored.confluence_bonus,
        regime,
        market_condition: MarketCondition::from_adx(snapshot.adx),
        components: scored.components,
        key_signals,
        entry_zone,
        risk_reward,
        generated_at: input.now,
        valid_until: input.now + input.config.validity(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::PivotLevels;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()
    }

    fn bullish_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            price: Some(110.0),
            volume: Some(2_000.0),
            volume_avg: Some(1_000.0),
            sma_20: Some(108.0),
            sma_50: Some(105.0),
            sma_200: Some(100.0),
            rsi: Some(60.0),
            macd_histogram: Some(1.5),
            atr: Some(2.0),
            adx: Some(32.0),
            plus_di: Some(30.0),
            minus_di: Some(12.0),
            stoch_k: Some(65.0),
            stoch_d: Some(60.0),
            ichimoku_span_a: Some(104.0),
            ichimoku_span_b: Some(102.0),
            pivots: Some(PivotLevels {
                pivot: 107.0,
                r1: 112.0,
                s1: 103.0,
                r2: 115.0,
                s2: 100.0,
            }),
            support: Some(100.0),
            resistance: Some(120.0),
            ..Default::default()
        }
    }

    fn score(snapshot: &IndicatorSnapshot, selection: Option<&BTreeSet<IndicatorKind>>) -> Result<CompositeSignal> {
        let config = Timeframe::Daily.config();
        let weights = IndicatorWeights::default();
        generate_signal(&ScoringInput {
            snapshot,
            patterns: &[],
            divergences: &[],
            config: &config,
            weights: &weights,
            selection,
            now: now(),
        })
    }

    #[test]
    fn bullish_snapshot_scores_a_buy() {
        let signal = score(&bullish_snapshot(), None).unwrap();
        assert!(signal.signal_type.is_buy(), "{:?} {}", signal.signal_type, signal.confidence);
        assert!((0.0..=1.0).contains(&signal.confidence));
        assert_eq!(signal.regime, Some(Regime::Trending));
        assert_eq!(signal.market_condition, MarketCondition::Trending);
        assert!(signal.confluence_bonus > 0.0);
        assert!(!signal.key_signals.is_empty() && signal.key_signals.len() <= 5);
        assert_eq!(signal.valid_until, now() + Duration::days(5));

        let zone = signal.entry_zone.unwrap();
        assert_eq!(zone.take_profit_1, Some(120.0));
        assert!(signal.risk_reward.is_some());
    }

    #[test]
    fn bearish_snapshot_scores_a_sell() {
        let snapshot = IndicatorSnapshot {
            price: Some(90.0),
            sma_20: Some(92.0),
            sma_50: Some(95.0),
            sma_200: Some(100.0),
            rsi: Some(45.0),
            macd_histogram: Some(-2.0),
            adx: Some(35.0),
            plus_di: Some(10.0),
            minus_di: Some(30.0),
            stoch_k: Some(40.0),
            stoch_d: Some(45.0),
            ichimoku_span_a: Some(96.0),
            ichimoku_span_b: Some(98.0),
            ..Default::default()
        };
        let signal = score(&snapshot, None).unwrap();
        assert!(signal.signal_type.is_sell(), "{:?} {}", signal.signal_type, signal.confidence);
        assert!(signal.entry_zone.is_none());
    }

    #[test]
    fn collapsed_levels_give_no_risk_reward() {
        let snapshot = IndicatorSnapshot {
            atr: Some(0.0),
            support: Some(110.0),
            resistance: Some(110.0),
            ..bullish_snapshot()
        };
        let signal = score(&snapshot, None).unwrap();
        assert!(signal.signal_type.is_buy());
        assert!(signal
            .components
            .iter()
            .all(|c| c.indicator != IndicatorKind::SupportResistance));

        let zone = signal.entry_zone.unwrap();
        assert_eq!(zone.optimal_entry, 110.0);
        assert_eq!(zone.stop_loss, Some(110.0));
        assert_eq!(zone.entry_range, [110.0, 110.0]);
        assert!(signal.risk_reward.is_none());
        assert!(signal.confidence.is_finite());
    }

    #[test]
    fn flat_range_with_atr_keeps_finite_ratio() {
        let snapshot = IndicatorSnapshot {
            support: Some(110.0),
            resistance: Some(110.0),
            ..bullish_snapshot()
        };
        let signal = score(&snapshot, None).unwrap();
        let rr = signal.risk_reward.unwrap();
        assert_eq!(rr.ratio, 0.0);
        assert!(!rr.favorable);
        assert_eq!(signal.entry_zone.unwrap().take_profit_2, Some(110.0));
    }

    #[test]
    fn empty_snapshot_is_an_error() {
        let err = score(&IndicatorSnapshot::default(), None).unwrap_err();
        assert!(err.to_string().contains("no scorable indicators"));
    }

    #[test]
    fn selection_restricts_components() {
        let only: BTreeSet<IndicatorKind> = [IndicatorKind::Rsi, IndicatorKind::Macd].into_iter().collect();
        let signal = score(&bullish_snapshot(), Some(&only)).unwrap();
        let kinds: Vec<IndicatorKind> = signal.components.iter().map(|c| c.indicator).collect();
        assert_eq!(kinds, vec![IndicatorKind::Rsi, IndicatorKind::Macd]);
        assert_eq!(signal.confluence_bonus, 0.0);
    }
}
