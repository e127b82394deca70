// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_t = (x_t + x_{t-1} + ... + x_{t-period+1}) / period
//
// Computed with a running sum so the whole series costs O(n).
// =============================================================================

/// Compute the SMA series for `values`.
///
/// Each output element corresponds to an input starting at index
/// `period - 1`.  Returns an empty vec when `period == 0` or the input is
/// shorter than `period`.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut sum: f64 = values[..period].iter().sum();
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(sum / period_f);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        result.push(sum / period_f);
    }

    result
}

/// Rolling mean over a series with gaps.
///
/// The output has the same length as the input; a position is `None` unless
/// every value in its trailing window is present.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            let sum = window.iter().try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
            Some(sum / period as f64)
        })
        .collect()
}
