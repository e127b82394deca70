// =============================================================================
// Price / Indicator Divergence
// =============================================================================
//
// Over the trailing `lookback` bars, compare the last two order-3 extrema of
// price against the last two order-3 extrema of the indicator:
//   bullish: price trough lower, indicator trough higher
//   bearish: price peak higher, indicator peak lower
// =============================================================================

use crate::market_data::Bar;
use crate::types::SignalBias;

use super::extrema::{find_peaks, find_troughs};
use super::types::{Divergence, DivergenceSource};

const ORDER: usize = 3;
const CONFIDENCE: f64 = 0.75;

/// `indicator` must be bar-aligned with `bars`.  Any gap inside the window
/// makes the comparison meaningless, so nothing is reported.
pub fn detect_divergences(
    bars: &[Bar],
    indicator: &[Option<f64>],
    source: DivergenceSource,
    lookback: usize,
) -> Vec<Divergence> {
    if lookback == 0 || bars.len() < lookback || indicator.len() != bars.len() {
        return Vec::new();
    }

    let start = bars.len() - lookback;
    let Some(ind) = indicator[start..].iter().copied().collect::<Option<Vec<f64>>>() else {
        return Vec::new();
    };
    let recent = &bars[start..];
    let highs: Vec<f64> = recent.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = recent.iter().map(|b| b.low).collect();

    let mut out = Vec::new();

    let price_troughs = find_troughs(&lows, ORDER);
    let ind_troughs = find_troughs(&ind, ORDER);
    if let ([.., pp, pl], [.., ip, il]) = (price_troughs.as_slice(), ind_troughs.as_slice()) {
        if lows[*pl] < lows[*pp] && ind[*il] > ind[*ip] {
            out.push(Divergence {
                direction: SignalBias::Bullish,
                indicator: source,
                confidence: CONFIDENCE,
                description: format!("Bullish divergence on {source}: lower price low, higher indicator low"),
            });
        }
    }

    let price_peaks = find_peaks(&highs, ORDER);
    let ind_peaks = find_peaks(&ind, ORDER);
    if let ([.., pp, pl], [.., ip, il]) = (price_peaks.as_slice(), ind_peaks.as_slice()) {
        if highs[*pl] > highs[*pp] && ind[*il] < ind[*ip] {
            out.push(Divergence {
                direction: SignalBias::Bearish,
                indicator: source,
                confidence: CONFIDENCE,
                description: format!("Bearish divergence on {source}: higher price high, lower indicator high"),
            });
        }
    }

    out
}
