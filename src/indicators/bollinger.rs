// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ). The Band Width (BBW) is the normalised
// distance: BBW = (upper - lower) / middle * 100.
//
// σ is the population standard deviation of the window.

use serde::{Deserialize, Serialize};

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub width: f64,
}

/// Calculate Bollinger Bands over the last `period` closing prices.
///
/// Returns `Some(BollingerResult)` containing:
/// - `upper`  = SMA + `num_std` * σ
/// - `middle` = SMA
/// - `lower`  = SMA - `num_std` * σ
/// - `width`  = (upper - lower) / middle * 100  (Bollinger Band Width)
///
/// Returns `None` when:
/// - Fewer than `period` data points.
/// - Middle band is zero (degenerate input).
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerResult> {
    if period == 0 || closes.len() < period {
        return None;
    }
    bands(&closes[closes.len() - period..], num_std)
}

/// Bollinger Bands for every window of `period` closes.
///
/// Element `i` covers closes `i ..= i + period - 1`, so the series is trimmed
/// like the moving averages.  A degenerate window yields `None` in place.
pub fn calculate_bollinger_series(closes: &[f64], period: usize, num_std: f64) -> Vec<Option<BollingerResult>> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }
    closes.windows(period).map(|w| bands(w, num_std)).collect()
}

fn bands(window: &[f64], num_std: f64) -> Option<BollingerResult> {
    let n = window.len() as f64;
    let middle = window.iter().sum::<f64>() / n;

    if middle == 0.0 {
        return None;
    }

    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;
    let width = (upper - lower) / middle * 100.0;

    if width.is_finite() {
        Some(BollingerResult {
            upper,
            middle,
            lower,
            width,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let result = calculate_bollinger(&closes, 20, 2.0);
        assert!(result.is_some());
        let bb = result.unwrap();
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!(bb.width > 0.0);
        assert!((bb.middle - 10.5).abs() < 1e-12);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_bollinger(&closes, 20, 2.0).is_none());
        assert!(calculate_bollinger_series(&closes, 20, 2.0).is_empty());
    }

    #[test]
    fn bollinger_flat() {
        let closes = vec![100.0; 20];
        let result = calculate_bollinger(&closes, 20, 2.0);
        assert!(result.is_some());
        assert!((result.unwrap().width - 0.0).abs() < 1e-10);
    }

    #[test]
    fn series_last_matches_single_shot() {
        let closes: Vec<f64> = (0..40).map(|x| 50.0 + (x as f64 * 0.4).sin() * 3.0).collect();
        let series = calculate_bollinger_series(&closes, 20, 2.0);
        assert_eq!(series.len(), 21);
        assert_eq!(*series.last().unwrap(), calculate_bollinger(&closes, 20, 2.0));
    }

    #[test]
    fn zero_mean_window_is_unavailable() {
        let closes = vec![-1.0, 1.0, -1.0, 1.0];
        assert!(calculate_bollinger(&closes, 4, 2.0).is_none());
    }
}
