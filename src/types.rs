// =============================================================================
// Shared types used across the signal engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Directional bias of a pattern, divergence or trend read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalBias {
    Bullish,
    Bearish,
    Neutral,
}

impl SignalBias {
    pub fn is_directional(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

impl std::fmt::Display for SignalBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Caller's investment-horizon preference. Drives the recommended timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStyle {
    Conservative,
    Balanced,
    Aggressive,
}

impl Default for InvestmentStyle {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for InvestmentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conservative => write!(f, "conservative"),
            Self::Balanced => write!(f, "balanced"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl std::str::FromStr for InvestmentStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            other => anyhow::bail!("unknown investment style: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("Aggressive".parse::<InvestmentStyle>().unwrap(), InvestmentStyle::Aggressive);
        assert_eq!(" balanced ".parse::<InvestmentStyle>().unwrap(), InvestmentStyle::Balanced);
        assert!("yolo".parse::<InvestmentStyle>().is_err());
    }

    #[test]
    fn bias_serialises_lowercase() {
        let json = serde_json::to_string(&SignalBias::Bearish).unwrap();
        assert_eq!(json, "\"bearish\"");
        assert!(!SignalBias::Neutral.is_directional());
    }
}
