// =============================================================================
// Entry Zone & Risk/Reward
// =============================================================================
//
// Buy:  entry between support and price, stop 1.5 ATR under support,
//       targets at resistance and half a range beyond it.
// Sell: the mirror around resistance.
// Neutral: a band of half an ATR around price, no stop or targets.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::signal_type::SignalType;

const ENTRY_FRACTION: f64 = 0.2;
const STOP_ATR_MULT: f64 = 1.5;
const ENTRY_BAND_ATR: f64 = 0.5;
const EXTENSION: f64 = 0.5;
const FAVORABLE_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryZone {
    pub optimal_entry: f64,
    /// `[low, high]`
    pub entry_range: [f64; 2],
    pub stop_loss: Option<f64>,
    pub take_profit_1: Option<f64>,
    pub take_profit_2: Option<f64>,
}

impl EntryZone {
    pub fn compute(signal: SignalType, price: f64, atr: f64, support: f64, resistance: f64) -> Self {
        let range = resistance - support;
        if signal.is_buy() {
            Self {
                optimal_entry: support + ENTRY_FRACTION * (price - support),
                entry_range: [support, price - ENTRY_BAND_ATR * atr],
                stop_loss: Some(support - STOP_ATR_MULT * atr),
                take_profit_1: Some(resistance),
                take_profit_2: Some(resistance + EXTENSION * range),
            }
        } else if signal.is_sell() {
            Self {
                optimal_entry: resistance - ENTRY_FRACTION * (resistance - price),
                entry_range: [price + ENTRY_BAND_ATR * atr, resistance],
                stop_loss: Some(resistance + STOP_ATR_MULT * atr),
                take_profit_1: Some(support),
                take_profit_2: Some(support - EXTENSION * range),
            }
        } else {
            Self {
                optimal_entry: price,
                entry_range: [price - ENTRY_BAND_ATR * atr, price + ENTRY_BAND_ATR * atr],
                stop_loss: None,
                take_profit_1: None,
                take_profit_2: None,
            }
        }
    }

    /// Risk/reward from the optimal entry to the first target.
    pub fn risk_reward(&self) -> Option<RiskReward> {
        risk_reward(self.optimal_entry, self.stop_loss?, self.take_profit_1?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    pub risk_amount: f64,
    pub reward_amount: f64,
    pub ratio: f64,
    pub favorable: bool,
}

/// `None` when entry and stop coincide.
pub fn risk_reward(entry: f64, stop: f64, target: f64) -> Option<RiskReward> {
    let risk = (entry - stop).abs();
    let reward = (target - entry).abs();
    if risk <= 0.0 || !risk.is_finite() || !reward.is_finite() {
        return None;
    }
    let ratio = reward / risk;
    Some(RiskReward {
        risk_amount: risk,
        reward_amount: reward,
        ratio,
        favorable: ratio >= FAVORABLE_RATIO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_to_one_is_favorable() {
        let rr = risk_reward(100.0, 90.0, 120.0).unwrap();
        assert_eq!(rr.ratio, 2.0);
        assert!(rr.favorable);
        assert_eq!(rr.risk_amount, 10.0);
        assert_eq!(rr.reward_amount, 20.0);
    }

    #[test]
    fn half_to_one_is_not() {
        let rr = risk_reward(100.0, 90.0, 105.0).unwrap();
        assert_eq!(rr.ratio, 0.5);
        assert!(!rr.favorable);
    }

    #[test]
    fn zero_risk_is_unavailable() {
        assert!(risk_reward(100.0, 100.0, 120.0).is_none());
    }

    #[test]
    fn buy_zone_levels() {
        let z = EntryZone::compute(SignalType::Buy, 110.0, 2.0, 100.0, 120.0);
        assert_eq!(z.optimal_entry, 102.0);
        assert_eq!(z.entry_range, [100.0, 109.0]);
        assert_eq!(z.stop_loss, Some(97.0));
        assert_eq!(z.take_profit_1, Some(120.0));
        assert_eq!(z.take_profit_2, Some(130.0));
        let rr = z.risk_reward().unwrap();
        assert!((rr.ratio - 18.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn sell_zone_mirrors_buy() {
        let z = EntryZone::compute(SignalType::StrongSell, 110.0, 2.0, 100.0, 120.0);
        assert_eq!(z.optimal_entry, 118.0);
        assert_eq!(z.entry_range, [111.0, 120.0]);
        assert_eq!(z.stop_loss, Some(123.0));
        assert_eq!(z.take_profit_1, Some(100.0));
        assert_eq!(z.take_profit_2, Some(90.0));
    }

    #[test]
    fn neutral_zone_has_no_stop() {
        let z = EntryZone::compute(SignalType::Neutral, 110.0, 2.0, 100.0, 120.0);
        assert_eq!(z.optimal_entry, 110.0);
        assert_eq!(z.entry_range, [109.0, 111.0]);
        assert!(z.stop_loss.is_none());
        assert!(z.risk_reward().is_none());
    }
}
