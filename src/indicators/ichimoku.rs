// =============================================================================
// Ichimoku Kinko Hyo
// =============================================================================
//
//   conversion (tenkan) = (highest high + lowest low) / 2 over 9 bars
//   base (kijun)        = (highest high + lowest low) / 2 over 26 bars
//   span A              = (conversion + base) / 2, plotted 26 bars ahead
//   span B              = (highest high + lowest low) / 2 over 52 bars,
//                         plotted 26 bars ahead
//
// The spans here are aligned to the bar they are plotted on, i.e. the cloud
// value at bar `i` was computed from data ending at bar `i - displacement`.
// =============================================================================

use crate::market_data::Bar;

#[derive(Debug, Clone, Copy)]
pub struct IchimokuParams {
    pub conversion: usize,
    pub base: usize,
    pub span_b: usize,
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            conversion: 9,
            base: 26,
            span_b: 52,
            displacement: 26,
        }
    }
}

/// Bar-aligned Ichimoku lines (one element per bar).
#[derive(Debug, Clone, Default)]
pub struct IchimokuSeries {
    pub conversion: Vec<Option<f64>>,
    pub base: Vec<Option<f64>>,
    pub span_a: Vec<Option<f64>>,
    pub span_b: Vec<Option<f64>>,
}

pub fn calculate_ichimoku(bars: &[Bar], params: IchimokuParams) -> IchimokuSeries {
    let conversion = midpoint_series(bars, params.conversion);
    let base = midpoint_series(bars, params.base);
    let b_raw = midpoint_series(bars, params.span_b);

    let a_raw: Vec<Option<f64>> = conversion
        .iter()
        .zip(&base)
        .map(|(c, b)| Some((c.as_ref()? + b.as_ref()?) / 2.0))
        .collect();

    IchimokuSeries {
        span_a: displace(&a_raw, params.displacement),
        span_b: displace(&b_raw, params.displacement),
        conversion,
        base,
    }
}

/// Donchian midpoint `(HH + LL) / 2` of the trailing `period` bars.
fn midpoint_series(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let window = &bars[i + 1 - period..=i];
            let hh = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let ll = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            Some((hh + ll) / 2.0)
        })
        .collect()
}

fn displace(values: &[Option<f64>], by: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| if i >= by { values[i - by] } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let mid = 100.0 + i as f64;
                Bar {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64),
                    open: mid,
                    high: mid + 1.0,
                    low: mid - 1.0,
                    close: mid,
                    volume: 1.0,
                }
            })
            .collect()
    }

    #[test]
    fn cloud_warmup_includes_displacement() {
        let series = calculate_ichimoku(&bars(78), IchimokuParams::default());
        assert!(series.span_b[76].is_none());
        assert!(series.span_b[77].is_some());
        assert!(series.span_a[50].is_none());
        assert!(series.span_a[51].is_some());
    }

    #[test]
    fn lines_on_a_rising_ramp() {
        // On a +1/bar ramp the midpoint of `p` bars lags the last bar by (p-1)/2.
        let b = bars(100);
        let series = calculate_ichimoku(&b, IchimokuParams::default());
        let last = 99;
        assert!((series.conversion[last].unwrap() - (199.0 - 4.0)).abs() < 1e-9);
        assert!((series.base[last].unwrap() - (199.0 - 12.5)).abs() < 1e-9);
        // Span B at 99 comes from bar 73: 173 - 25.5.
        assert!((series.span_b[last].unwrap() - 147.5).abs() < 1e-9);
        // Price is above the cloud in a steady uptrend.
        let top = series.span_a[last].unwrap().max(series.span_b[last].unwrap());
        assert!(b[last].close > top);
    }
}
