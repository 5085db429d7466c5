//! Small numeric helpers shared by the metric computer and reporting layers.

/// Root-mean-square deviation between two weight profiles after normalizing
/// each to sum to one. Returns `None` when either profile carries no weight.
pub fn rmsd(first: &[f64], second: &[f64]) -> Option<f64> {
    if first.len() != second.len() || first.is_empty() {
        return None;
    }
    let sum_a: f64 = first.iter().sum();
    let sum_b: f64 = second.iter().sum();
    if sum_a == 0.0 || sum_b == 0.0 {
        return None;
    }
    let mean_sq = first
        .iter()
        .zip(second)
        .map(|(&a, &b)| {
            let d = a / sum_a - b / sum_b;
            d * d
        })
        .sum::<f64>()
        / first.len() as f64;
    Some(mean_sq.sqrt())
}

/// Trapezoidal integral of unit-spaced samples, rescaled by the span so the
/// result is a mean height. A single sample is returned unchanged.
pub fn normalized_trapezoid(samples: &[f64]) -> f64 {
    match samples.len() {
        0 => 0.0,
        1 => samples[0],
        n => {
            let area: f64 = samples.windows(2).map(|w| 0.5 * (w[0] + w[1])).sum();
            area / (n - 1) as f64
        }
    }
}

/// Area under the cumulative sum of a histogram by trapezoidal rule over bin
/// centers, rescaled so a window of any width integrates on a common scale.
/// `edges` must hold one more entry than `hist`.
pub fn area_under_cdf(hist: &[f64], edges: &[f64]) -> Option<f64> {
    if hist.is_empty() || edges.len() != hist.len() + 1 {
        return None;
    }
    let window = edges[edges.len() - 1] - edges[0];
    if window <= 0.0 {
        return None;
    }
    let mut cdf = Vec::with_capacity(hist.len());
    let mut running = 0.0;
    for &h in hist {
        running += h;
        cdf.push(running);
    }
    let centers: Vec<f64> = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
    let area: f64 = cdf
        .windows(2)
        .zip(centers.windows(2))
        .map(|(y, x)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum();
    Some(area * 2.0 / window)
}
