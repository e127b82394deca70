// Local extrema and trend-line helpers shared by the chart and divergence
// detectors.

/// Indices that are `>=` every neighbour within `order` bars on both sides.
///
/// Plateaus produce several adjacent peaks; the first and last `order`
/// indices can never qualify.
pub fn find_peaks(data: &[f64], order: usize) -> Vec<usize> {
    find_extrema(data, order, |center, other| center >= other)
}

/// Indices that are `<=` every neighbour within `order` bars on both sides.
pub fn find_troughs(data: &[f64], order: usize) -> Vec<usize> {
    find_extrema(data, order, |center, other| center <= other)
}

fn find_extrema(data: &[f64], order: usize, dominates: impl Fn(f64, f64) -> bool) -> Vec<usize> {
    if order == 0 || data.len() < 2 * order + 1 {
        return Vec::new();
    }
    (order..data.len() - order)
        .filter(|&i| (1..=order).all(|j| dominates(data[i], data[i - j]) && dominates(data[i], data[i + j])))
        .collect()
}

/// Least-squares slope of `values` against their index.
pub fn regression_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let (mut num, mut den) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }

    let slope = num / den;
    slope.is_finite().then_some(slope)
}
