use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV bar as delivered by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Signed body: positive for an up bar, negative for a down bar.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    pub fn body_size(&self) -> f64 {
        self.body().abs()
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// BarSeries -- validated, immutable bar sequence
// ---------------------------------------------------------------------------

/// Immutable, validated sequence of bars for one timeframe (oldest first).
///
/// Construction rejects non-finite values, inverted ranges, negative volume
/// and timestamps that are not strictly increasing.  Cloning is cheap: the
/// bars live behind an `Arc` so per-timeframe tasks can share them.
#[derive(Debug, Clone)]
pub struct BarSeries {
    bars: Arc<[Bar]>,
}

impl BarSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_finite() {
                bail!("bar {i} at {} has a non-finite field", bar.timestamp);
            }
            if bar.high < bar.low {
                bail!("bar {i} at {} has high {} below low {}", bar.timestamp, bar.high, bar.low);
            }
            if bar.volume < 0.0 {
                bail!("bar {i} at {} has negative volume", bar.timestamp);
            }
        }

        if let Some(pos) = bars.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            bail!(
                "bar timestamps must be strictly increasing (bar {} at {} follows {})",
                pos + 1,
                bars[pos + 1].timestamp,
                bars[pos].timestamp
            );
        }

        Ok(Self { bars: bars.into() })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
