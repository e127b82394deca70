use serde::{Deserialize, Serialize};

use crate::types::SignalBias;

/// Pattern family, used for filtering and for picking the evidence that
/// feeds each scoring component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    Candlestick,
    Chart,
    MovingAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    // Candlestick
    Hammer,
    ShootingStar,
    Doji,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
    // Chart
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    InverseHeadAndShoulders,
    AscendingTriangle,
    DescendingTriangle,
    SymmetricalTriangle,
    Breakout,
    Breakdown,
    // Moving average
    GoldenCross,
    DeathCross,
}

impl PatternKind {
    pub fn family(self) -> PatternFamily {
        use PatternKind::*;
        match self {
            Hammer | ShootingStar | Doji | BullishEngulfing | BearishEngulfing | MorningStar
            | EveningStar => PatternFamily::Candlestick,
            DoubleTop | DoubleBottom | HeadAndShoulders | InverseHeadAndShoulders
            | AscendingTriangle | DescendingTriangle | SymmetricalTriangle | Breakout
            | Breakdown => PatternFamily::Chart,
            GoldenCross | DeathCross => PatternFamily::MovingAverage,
        }
    }

    pub fn name(self) -> &'static str {
        use PatternKind::*;
        match self {
            Hammer => "hammer",
            ShootingStar => "shooting_star",
            Doji => "doji",
            BullishEngulfing => "bullish_engulfing",
            BearishEngulfing => "bearish_engulfing",
            MorningStar => "morning_star",
            EveningStar => "evening_star",
            DoubleTop => "double_top",
            DoubleBottom => "double_bottom",
            HeadAndShoulders => "head_and_shoulders",
            InverseHeadAndShoulders => "inverse_head_and_shoulders",
            AscendingTriangle => "ascending_triangle",
            DescendingTriangle => "descending_triangle",
            SymmetricalTriangle => "symmetrical_triangle",
            Breakout => "breakout",
            Breakdown => "breakdown",
            GoldenCross => "golden_cross",
            DeathCross => "death_cross",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional trade levels suggested by a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

impl TradeLevels {
    pub fn new(entry: f64, stop_loss: f64, take_profit: f64) -> Self {
        Self {
            entry: Some(entry),
            stop_loss: Some(stop_loss),
            take_profit: Some(take_profit),
        }
    }
}

/// A detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub family: PatternFamily,
    pub confidence: f64,
    pub signal: SignalBias,
    pub description: String,
    /// How many bars the pattern stays actionable.
    pub validity_bars: u32,
    #[serde(flatten)]
    pub levels: TradeLevels,
}

impl Pattern {
    pub fn new(kind: PatternKind, confidence: f64, signal: SignalBias, description: impl Into<String>, validity_bars: u32) -> Self {
        Self {
            kind,
            family: kind.family(),
            confidence: confidence.clamp(0.0, 1.0),
            signal,
            description: description.into(),
            validity_bars,
            levels: TradeLevels::default(),
        }
    }

    pub fn with_levels(mut self, levels: TradeLevels) -> Self {
        self.levels = levels;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceSource {
    Rsi,
    Macd,
}

impl std::fmt::Display for DivergenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DivergenceSource::Rsi => write!(f, "RSI"),
            DivergenceSource::Macd => write!(f, "MACD"),
        }
    }
}

/// Price/indicator disagreement.  `direction` is never neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub direction: SignalBias,
    pub indicator: DivergenceSource,
    pub confidence: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_partition_kinds() {
        assert_eq!(PatternKind::Doji.family(), PatternFamily::Candlestick);
        assert_eq!(PatternKind::Breakout.family(), PatternFamily::Chart);
        assert_eq!(PatternKind::HeadAndShoulders.family(), PatternFamily::Chart);
        assert_eq!(PatternKind::DeathCross.family(), PatternFamily::MovingAverage);
    }

    #[test]
    fn pattern_serialises_flat_levels() {
        let p = Pattern::new(PatternKind::Hammer, 0.8, SignalBias::Bullish, "hammer", 3)
            .with_levels(TradeLevels::new(101.0, 98.0, 105.0));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["kind"], "hammer");
        assert_eq!(json["family"], "candlestick");
        assert_eq!(json["entry"], 101.0);
        assert_eq!(json["signal"], "bullish");
    }

    #[test]
    fn confidence_is_clamped() {
        let p = Pattern::new(PatternKind::Doji, 1.7, SignalBias::Neutral, "doji", 2);
        assert_eq!(p.confidence, 1.0);
    }
}
