// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line   = EMA(fast) - EMA(slow)
//   Signal line = EMA(signal) of the MACD line
//   Histogram   = MACD line - signal line
//
// Standard parameters: 12 / 26 / 9.
// =============================================================================

use super::ema::calculate_ema;

/// MACD output.  All three vectors end at the last close.
///
/// - `line` starts at close index `slow - 1`.
/// - `signal` and `histogram` start at close index `slow + signal - 2`.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD for `closes`.
///
/// Returns `None` when any period is zero, `fast >= slow`, or there are too
/// few closes to seed the slow EMA.  When there is enough for the line but
/// not the signal, `signal`/`histogram` are empty.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdSeries> {
    if fast == 0 || slow == 0 || signal == 0 || fast >= slow || closes.len() < slow {
        return None;
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);
    if ema_slow.is_empty() || ema_fast.len() < ema_slow.len() {
        return None;
    }

    // ema_fast starts `slow - fast` closes earlier than ema_slow.
    let offset = ema_fast.len() - ema_slow.len();
    let line: Vec<f64> = ema_slow
        .iter()
        .enumerate()
        .map(|(i, s)| ema_fast[i + offset] - s)
        .collect();

    let signal_line = calculate_ema(&line, signal);
    let line_offset = line.len() - signal_line.len();
    let histogram: Vec<f64> = signal_line
        .iter()
        .enumerate()
        .map(|(i, s)| line[i + line_offset] - s)
        .collect();

    Some(MacdSeries {
        line,
        signal: signal_line,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_rejects_bad_periods() {
        let closes = vec![1.0; 100];
        assert!(calculate_macd(&closes, 0, 26, 9).is_none());
        assert!(calculate_macd(&closes, 26, 12, 9).is_none());
        assert!(calculate_macd(&closes[..20], 12, 26, 9).is_none());
    }

    #[test]
    fn macd_series_lengths() {
        let closes: Vec<f64> = (0..100).map(|x| 100.0 + x as f64).collect();
        let macd = calculate_macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(macd.line.len(), 100 - 25);
        assert_eq!(macd.signal.len(), 100 - 33);
        assert_eq!(macd.histogram.len(), macd.signal.len());
    }

    #[test]
    fn macd_line_without_signal_when_short() {
        let closes: Vec<f64> = (0..30).map(|x| x as f64).collect();
        let macd = calculate_macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(macd.line.len(), 5);
        assert!(macd.signal.is_empty());
    }

    #[test]
    fn macd_on_a_line_converges_to_lag_gap() {
        // Slope 1: EMA12 lags 5.5, EMA26 lags 12.5, so MACD -> 7 and the
        // histogram -> 0.
        let closes: Vec<f64> = (0..400).map(|x| x as f64).collect();
        let macd = calculate_macd(&closes, 12, 26, 9).unwrap();
        assert!((macd.line.last().unwrap() - 7.0).abs() < 1e-6);
        assert!(macd.histogram.last().unwrap().abs() < 1e-6);
    }

    #[test]
    fn flat_prices_give_zero_macd() {
        let macd = calculate_macd(&[50.0; 60], 12, 26, 9).unwrap();
        assert!(macd.histogram.iter().all(|h| h.abs() < 1e-12));
    }
}
