use serde::{Deserialize, Serialize};

use crate::types::SignalBias;

/// Five-way verdict on a composite score in [0, 1].
///
/// Boundaries: strong_buy `s >= 0.70`, buy `0.55 <= s < 0.70`,
/// neutral `0.45 < s < 0.55`, sell `0.30 < s <= 0.45`, strong_sell `s <= 0.30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalType {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.70 {
            Self::StrongBuy
        } else if score >= 0.55 {
            Self::Buy
        } else if score <= 0.30 {
            Self::StrongSell
        } else if score <= 0.45 {
            Self::Sell
        } else {
            Self::Neutral
        }
    }

    pub fn bias(self) -> SignalBias {
        match self {
            Self::StrongBuy | Self::Buy => SignalBias::Bullish,
            Self::StrongSell | Self::Sell => SignalBias::Bearish,
            Self::Neutral => SignalBias::Neutral,
        }
    }

    pub fn is_buy(self) -> bool {
        self.bias() == SignalBias::Bullish
    }

    pub fn is_sell(self) -> bool {
        self.bias() == SignalBias::Bearish
    }

    /// Where a signal of this type sits on the 0 (bearish) .. 1 (bullish) axis.
    pub fn directional_score(self, confidence: f64) -> f64 {
        match self.bias() {
            SignalBias::Bullish => confidence,
            SignalBias::Bearish => 1.0 - confidence,
            SignalBias::Neutral => 0.5,
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "strong_buy"),
            Self::Buy => write!(f, "buy"),
            Self::Neutral => write!(f, "neutral"),
            Self::Sell => write!(f, "sell"),
            Self::StrongSell => write!(f, "strong_sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_where_documented() {
        assert_eq!(SignalType::from_score(0.70), SignalType::StrongBuy);
        assert_eq!(SignalType::from_score(0.6999), SignalType::Buy);
        assert_eq!(SignalType::from_score(0.55), SignalType::Buy);
        assert_eq!(SignalType::from_score(0.5499), SignalType::Neutral);
        assert_eq!(SignalType::from_score(0.4501), SignalType::Neutral);
        assert_eq!(SignalType::from_score(0.45), SignalType::Sell);
        assert_eq!(SignalType::from_score(0.3001), SignalType::Sell);
        assert_eq!(SignalType::from_score(0.30), SignalType::StrongSell);
        assert_eq!(SignalType::from_score(0.0), SignalType::StrongSell);
        assert_eq!(SignalType::from_score(1.0), SignalType::StrongBuy);
    }

    #[test]
    fn mapping_is_monotone_over_the_unit_interval() {
        let rank = |t: SignalType| match t {
            SignalType::StrongSell => 0,
            SignalType::Sell => 1,
            SignalType::Neutral => 2,
            SignalType::Buy => 3,
            SignalType::StrongBuy => 4,
        };
        let ranks: Vec<i32> = (0..=1000).map(|i| rank(SignalType::from_score(i as f64 / 1000.0))).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranks.first(), Some(&0));
        assert_eq!(ranks.last(), Some(&4));
    }

    #[test]
    fn directional_score_by_side() {
        assert_eq!(SignalType::Buy.directional_score(0.6), 0.6);
        assert!((SignalType::Sell.directional_score(0.6) - 0.4).abs() < 1e-12);
        assert_eq!(SignalType::Neutral.directional_score(0.9), 0.5);
    }
}
