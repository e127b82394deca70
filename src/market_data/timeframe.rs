// =============================================================================
// Timeframes
// =============================================================================
//
// The closed set of timeframes the engine analyses.  Each carries its bar
// interval, history lookback, the kind of trader it suits and how long a
// signal computed on it stays valid.

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "4hour")]
    FourHour,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Self::OneHour,
        Self::FourHour,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::OneHour => "1hour",
            Self::FourHour => "4hour",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Bars shorter than a trading day. VWAP is only computed for these.
    pub fn is_intraday(self) -> bool {
        matches!(self, Self::OneHour | Self::FourHour)
    }

    pub fn config(self) -> TimeframeConfig {
        let (interval, bar_secs, lookback_days, label, trader_type, validity_secs) = match self {
            Self::OneHour => ("1h", 3_600, 30, "1 Hour", "Day Trader", 4 * 3_600),
            Self::FourHour => ("4h", 4 * 3_600, 120, "4 Hours", "Swing Trader", 86_400),
            Self::Daily => ("1d", 86_400, 400, "Daily", "Swing/Position Trader", 5 * 86_400),
            Self::Weekly => ("1wk", 7 * 86_400, 5 * 365, "Weekly", "Position Trader", 14 * 86_400),
            Self::Monthly => ("1mo", 30 * 86_400, 20 * 365, "Monthly", "Long-term Investor", 56 * 86_400),
        };

        TimeframeConfig {
            timeframe: self,
            interval: interval.to_string(),
            bar_interval_secs: bar_secs,
            lookback_days,
            label: label.to_string(),
            trader_type: trader_type.to_string(),
            validity_secs,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tf| tf.name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown timeframe: {s}"))
    }
}

/// Static description of one timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeConfig {
    pub timeframe: Timeframe,
    /// Provider interval code, e.g. "1h" or "1wk".
    pub interval: String,
    pub bar_interval_secs: i64,
    /// Calendar days of history requested from the provider.
    pub lookback_days: i64,
    pub label: String,
    pub trader_type: String,
    pub validity_secs: i64,
}

impl TimeframeConfig {
    pub fn validity(&self) -> Duration {
        Duration::seconds(self.validity_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_windows_match_timeframe() {
        assert_eq!(Timeframe::OneHour.config().validity(), Duration::hours(4));
        assert_eq!(Timeframe::FourHour.config().validity(), Duration::days(1));
        assert_eq!(Timeframe::Daily.config().validity(), Duration::days(5));
        assert_eq!(Timeframe::Weekly.config().validity(), Duration::weeks(2));
        assert_eq!(Timeframe::Monthly.config().validity(), Duration::weeks(8));
    }

    #[test]
    fn names_roundtrip_through_from_str() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.name().parse::<Timeframe>().unwrap(), tf);
        }
        assert!("2hour".parse::<Timeframe>().is_err());
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&Timeframe::FourHour).unwrap();
        assert_eq!(json, "\"4hour\"");
        let tf: Timeframe = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(tf, Timeframe::Monthly);
    }

    #[test]
    fn only_sub_daily_frames_are_intraday() {
        assert!(Timeframe::OneHour.is_intraday());
        assert!(Timeframe::FourHour.is_intraday());
        assert!(!Timeframe::Daily.is_intraday());
        assert!(!Timeframe::Monthly.is_intraday());
    }
}
