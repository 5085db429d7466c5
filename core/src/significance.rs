//! Empirical significance against a permutation null.

use crate::metrics::SignalMetrics;
use crate::null_model::NullDistribution;
use crate::{RspError, RspResult};
use serde::Serialize;

/// Per-metric p-values for one signal. A side stays `None` when the observed
/// metric itself was undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Significance {
    pub coverage_bias_p: Option<f64>,
    pub angular_skew_p: Option<f64>,
}

/// One-sided empirical p-value with add-one smoothing:
/// (#null >= observed + 1) / (R + 1). Never returns 0; the smallest
/// attainable value is 1/(R + 1).
pub fn empirical_p_value(observed: f64, null_samples: &[f64]) -> f64 {
    let exceeding = null_samples.iter().filter(|&&s| s >= observed).count();
    (exceeding + 1) as f64 / (null_samples.len() + 1) as f64
}

/// Scores both descriptors of one signal against its null distribution.
pub fn evaluate(observed: &SignalMetrics, null: &NullDistribution) -> Significance {
    Significance {
        coverage_bias_p: observed
            .coverage_bias
            .map(|v| empirical_p_value(v, &null.coverage_bias)),
        angular_skew_p: observed
            .angular_skew
            .map(|v| empirical_p_value(v, &null.angular_skew)),
    }
}

/// Replicate counts below `minimum` give too coarse a p-value grid and are
/// rejected up front, before any signal is scored.
pub fn check_permutations(requested: usize, minimum: usize) -> RspResult<()> {
    if requested < minimum {
        return Err(RspError::InsufficientPermutations { requested, minimum });
    }
    Ok(())
}
