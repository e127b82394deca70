// =============================================================================
// Multi-Timeframe Alignment
// =============================================================================
//
// Measures how well the composite signals of several timeframes agree.
//
// Each timeframe is placed on a 0 (bearish) .. 1 (bullish) axis:
//   buy types  -> confidence
//   sell types -> 1 - confidence
//   neutral    -> 0.5
// Alignment = max(0, 1 - 2 * population stddev of those scores).  With fewer
// than two timeframes there is nothing to compare and the score is 0.5.
//
// The recommended timeframe is the most confident computed timeframe among
// the investment style's preferences, falling back to the first preference.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::Timeframe;
use crate::signals::{CompositeSignal, SignalType};
use crate::types::InvestmentStyle;

const SINGLE_TIMEFRAME_SCORE: f64 = 0.5;

/// One timeframe's contribution to the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeVote {
    pub timeframe: Timeframe,
    pub signal_type: SignalType,
    pub confidence: f64,
}

impl TimeframeVote {
    pub fn directional_score(&self) -> f64 {
        self.signal_type.directional_score(self.confidence)
    }
}

impl From<&CompositeSignal> for TimeframeVote {
    fn from(signal: &CompositeSignal) -> Self {
        Self {
            timeframe: signal.timeframe,
            signal_type: signal.signal_type,
            confidence: signal.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStrength {
    Strong,
    Moderate,
    Weak,
    Divergent,
}

impl AlignmentStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Strong
        } else if score >= 0.6 {
            Self::Moderate
        } else if score >= 0.4 {
            Self::Weak
        } else {
            Self::Divergent
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub score: f64,
    pub strength: AlignmentStrength,
    pub recommended_timeframe: Timeframe,
    /// Timeframes that took part, in input order.
    pub timeframes: Vec<Timeframe>,
}

/// Preferred timeframes for a style, most preferred first.
pub fn style_preferences(style: InvestmentStyle) -> [Timeframe; 3] {
    match style {
        InvestmentStyle::Conservative => [Timeframe::Monthly, Timeframe::Weekly, Timeframe::Daily],
        InvestmentStyle::Balanced => [Timeframe::Weekly, Timeframe::Daily, Timeframe::FourHour],
        InvestmentStyle::Aggressive => [Timeframe::Daily, Timeframe::FourHour, Timeframe::OneHour],
    }
}

pub fn alignment_score(votes: &[TimeframeVote]) -> f64 {
    if votes.len() < 2 {
        return SINGLE_TIMEFRAME_SCORE;
    }
    let scores: Vec<f64> = votes.iter().map(TimeframeVote::directional_score).collect();
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (1.0 - 2.0 * variance.sqrt()).max(0.0)
}

/// Ties go to the earlier vote.
pub fn recommended_timeframe(votes: &[TimeframeVote], style: InvestmentStyle) -> Timeframe {
    let preferences = style_preferences(style);
    let mut best: Option<&TimeframeVote> = None;
    for vote in votes.iter().filter(|v| preferences.contains(&v.timeframe)) {
        if best.map_or(true, |b| vote.confidence > b.confidence) {
            best = Some(vote);
        }
    }
    best.map_or(preferences[0], |v| v.timeframe)
}

pub fn align(votes: &[TimeframeVote], style: InvestmentStyle) -> AlignmentResult {
    let score = alignment_score(votes);
    let strength = AlignmentStrength::from_score(score);
    let recommended = recommended_timeframe(votes, style);

    debug!(
        timeframes = votes.len(),
        score = format!("{:.3}", score),
        ?strength,
        recommended = %recommended,
        "timeframe alignment complete"
    );

    AlignmentResult {
        score,
        strength,
        recommended_timeframe: recommended,
        timeframes: votes.iter().map(|v| v.timeframe).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(timeframe: Timeframe, signal_type: SignalType, confidence: f64) -> TimeframeVote {
        TimeframeVote {
            timeframe,
            signal_type,
            confidence,
        }
    }

    #[test]
    fn identical_votes_align_perfectly() {
        let votes = [
            vote(Timeframe::Daily, SignalType::Buy, 0.62),
            vote(Timeframe::Weekly, SignalType::Buy, 0.62),
            vote(Timeframe::Monthly, SignalType::Buy, 0.62),
        ];
        assert!((alignment_score(&votes) - 1.0).abs() < 1e-12);
        assert_eq!(align(&votes, InvestmentStyle::Balanced).strength, AlignmentStrength::Strong);
    }

    #[test]
    fn sell_votes_are_mirrored_before_comparison() {
        let votes = [
            vote(Timeframe::Daily, SignalType::Buy, 0.65),
            vote(Timeframe::Weekly, SignalType::Sell, 0.35),
        ];
        assert!((alignment_score(&votes) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn score_decreases_as_votes_spread() {
        let mut last = f64::INFINITY;
        for spread in [0.0, 0.05, 0.1, 0.15, 0.2] {
            let votes = [
                vote(Timeframe::Daily, SignalType::StrongBuy, 0.75 + spread),
                vote(Timeframe::Weekly, SignalType::StrongBuy, 0.75 - spread),
            ];
            let score = alignment_score(&votes);
            assert!(score < last, "spread {spread}: {score} !< {last}");
            last = score;
        }
    }

    #[test]
    fn opposite_extremes_floor_at_zero() {
        let votes = [
            vote(Timeframe::Daily, SignalType::StrongBuy, 1.0),
            vote(Timeframe::Weekly, SignalType::Neutral, 0.5),
            vote(Timeframe::Monthly, SignalType::StrongBuy, 0.0),
        ];
        // scores 1.0, 0.5, 0.0 -> stddev ~0.408 -> 1 - 0.816
        let score = alignment_score(&votes);
        assert!((score - (1.0 - 2.0 * (1.0f64 / 6.0).sqrt())).abs() < 1e-12);

        let split = [
            vote(Timeframe::Daily, SignalType::StrongBuy, 1.0),
            vote(Timeframe::Weekly, SignalType::StrongBuy, 0.0),
        ];
        assert_eq!(alignment_score(&split), 0.0);
        assert_eq!(AlignmentStrength::from_score(0.0), AlignmentStrength::Divergent);
    }

    #[test]
    fn single_timeframe_defaults_to_half() {
        assert_eq!(alignment_score(&[vote(Timeframe::Daily, SignalType::Buy, 0.9)]), 0.5);
        assert_eq!(alignment_score(&[]), 0.5);
    }

    #[test]
    fn recommendation_prefers_confident_preferred_timeframe() {
        let votes = [
            vote(Timeframe::OneHour, SignalType::StrongBuy, 0.95),
            vote(Timeframe::Daily, SignalType::Buy, 0.6),
            vote(Timeframe::Weekly, SignalType::Buy, 0.58),
        ];
        assert_eq!(recommended_timeframe(&votes, InvestmentStyle::Balanced), Timeframe::Daily);
        assert_eq!(recommended_timeframe(&votes, InvestmentStyle::Aggressive), Timeframe::OneHour);
        assert_eq!(recommended_timeframe(&votes, InvestmentStyle::Conservative), Timeframe::Daily);
    }

    #[test]
    fn recommendation_falls_back_to_first_preference() {
        let votes = [vote(Timeframe::OneHour, SignalType::Buy, 0.9)];
        assert_eq!(recommended_timeframe(&votes, InvestmentStyle::Conservative), Timeframe::Monthly);
        assert_eq!(recommended_timeframe(&[], InvestmentStyle::Balanced), Timeframe::Weekly);
    }

    #[test]
    fn bands() {
        assert_eq!(AlignmentStrength::from_score(0.8), AlignmentStrength::Strong);
        assert_eq!(AlignmentStrength::from_score(0.6), AlignmentStrength::Moderate);
        assert_eq!(AlignmentStrength::from_score(0.4), AlignmentStrength::Weak);
        assert_eq!(AlignmentStrength::from_score(0.39), AlignmentStrength::Divergent);
    }
}
