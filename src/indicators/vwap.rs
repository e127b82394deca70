// =============================================================================
// Session VWAP
// =============================================================================
//
//   VWAP = Σ(typical_price × volume) / Σ(volume)
//
// Accumulates from the first bar of each UTC calendar day, so it only means
// something on intraday bars.  The indicator engine skips it elsewhere.

use crate::market_data::Bar;

/// One value per bar; `None` while the session has seen no volume yet.
pub fn calculate_vwap(bars: &[Bar]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(bars.len());
    let mut session = None;
    let mut pv = 0.0;
    let mut vol = 0.0;

    for bar in bars {
        let day = bar.timestamp.date_naive();
        if session != Some(day) {
            session = Some(day);
            pv = 0.0;
            vol = 0.0;
        }
        pv += bar.typical_price() * bar.volume;
        vol += bar.volume;

        let vwap = if vol > 0.0 { Some(pv / vol) } else { None };
        result.push(vwap.filter(|v| v.is_finite()));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bar(hour: i64, price: f64, volume: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap() + Duration::hours(hour),
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
        }
    }

    #[test]
    fn vwap_weights_by_volume() {
        let bars = vec![bar(0, 10.0, 1.0), bar(1, 20.0, 3.0)];
        let vwap = calculate_vwap(&bars);
        assert_eq!(vwap[0], Some(10.0));
        assert!((vwap[1].unwrap() - 17.5).abs() < 1e-12);
    }

    #[test]
    fn vwap_resets_at_midnight_utc() {
        // 20:00, 21:00, 22:00, 23:00, then 00:00 next day.
        let bars: Vec<Bar> = (0..5).map(|h| bar(h, 10.0 + h as f64, 1.0)).collect();
        let vwap = calculate_vwap(&bars);
        assert!((vwap[3].unwrap() - 11.5).abs() < 1e-12);
        assert_eq!(vwap[4], Some(14.0));
    }

    #[test]
    fn zero_volume_session_is_unavailable() {
        let bars = vec![bar(0, 10.0, 0.0), bar(1, 11.0, 2.0)];
        let vwap = calculate_vwap(&bars);
        assert_eq!(vwap[0], None);
        assert_eq!(vwap[1], Some(11.0));
    }
}
