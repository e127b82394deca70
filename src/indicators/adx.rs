// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (period) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   6. ADX = Wilder's smoothed average of DX over `period` bars.
//
// Interpretation:
//   ADX > 25  => trending market
//   ADX < 20  => ranging / choppy market
// =============================================================================

use crate::market_data::Bar;

/// One ADX reading together with the directional indicators behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdxPoint {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

/// Compute the ADX series with +DI / -DI.
///
/// The first point belongs to bar index `2 * period - 1`: `period` bar
/// transitions seed the smoothed +DM/-DM/TR (first DX at bar `period`), then
/// `period` DX values seed the ADX average.  Returns an empty vec when
/// `period` is zero, there are fewer than `2 * period` bars, or any
/// intermediate value is degenerate (zero smoothed TR, non-finite).
pub fn calculate_adx_series(bars: &[Bar], period: usize) -> Vec<AdxPoint> {
    if period == 0 || bars.len() < 2 * period {
        return Vec::new();
    }

    let period_f = period as f64;

    // ------------------------------------------------------------------
    // Step 1 & 2: Raw +DM, -DM, and True Range for each consecutive pair
    // ------------------------------------------------------------------
    let transitions = bars.len() - 1;

    let mut plus_dm = Vec::with_capacity(transitions);
    let mut minus_dm = Vec::with_capacity(transitions);
    let mut tr_vals = Vec::with_capacity(transitions);

    for w in bars.windows(2) {
        let (prev, cur) = (&w[0], &w[1]);

        // True Range
        let tr = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());

        // Directional Movement
        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        let pdm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let mdm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        plus_dm.push(pdm);
        minus_dm.push(mdm);
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Step 3-5: Wilder's smoothing of +DM, -DM, TR and the DX per bar
    // ------------------------------------------------------------------
    let mut smooth_plus_dm: f64 = plus_dm[..period].iter().sum();
    let mut smooth_minus_dm: f64 = minus_dm[..period].iter().sum();
    let mut smooth_tr: f64 = tr_vals[..period].iter().sum();

    let mut directional: Vec<Directional> = Vec::with_capacity(transitions - period + 1);

    match compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
        Some(d) => directional.push(d),
        None => return Vec::new(),
    }

    for i in period..transitions {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / period_f + plus_dm[i];
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / period_f + minus_dm[i];
        smooth_tr = smooth_tr - smooth_tr / period_f + tr_vals[i];

        match compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr) {
            Some(d) => directional.push(d),
            None => return Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Step 6: ADX = Wilder's smoothed average of DX
    // ------------------------------------------------------------------
    if directional.len() < period {
        return Vec::new();
    }

    let adx_seed: f64 = directional[..period].iter().map(|d| d.dx).sum::<f64>() / period_f;
    if !adx_seed.is_finite() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(directional.len() - period + 1);
    let seed_src = &directional[period - 1];
    result.push(AdxPoint {
        adx: adx_seed,
        plus_di: seed_src.plus_di,
        minus_di: seed_src.minus_di,
    });

    let mut adx = adx_seed;
    for d in &directional[period..] {
        adx = (adx * (period_f - 1.0) + d.dx) / period_f;
        if !adx.is_finite() {
            return Vec::new();
        }
        result.push(AdxPoint {
            adx,
            plus_di: d.plus_di,
            minus_di: d.minus_di,
        });
    }

    result
}

/// Compute the most recent ADX value.
pub fn calculate_adx(bars: &[Bar], period: usize) -> Option<f64> {
    calculate_adx_series(bars, period).last().map(|p| p.adx)
}

// =============================================================================
// Internal helpers
// =============================================================================

struct Directional {
    plus_di: f64,
    minus_di: f64,
    dx: f64,
}

/// Compute +DI, -DI and DX from smoothed +DM, -DM, and TR values.
///
/// Returns `None` if the divisor is zero or the result is non-finite.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> Option<Directional> {
    if smooth_tr == 0.0 {
        return None;
    }

    let plus_di = (smooth_plus_dm / smooth_tr) * 100.0;
    let minus_di = (smooth_minus_dm / smooth_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    let dx = if di_sum == 0.0 {
        // Both +DI and -DI are zero - no directional movement.
        0.0
    } else {
        ((plus_di - minus_di).abs() / di_sum) * 100.0
    };

    if dx.is_finite() && plus_di.is_finite() && minus_di.is_finite() {
        Some(Directional { plus_di, minus_di, dx })
    } else {
        None
    }
}
