use crate::{RspError, RspResult};
use serde::{Deserialize, Serialize};

/// Spacing rule for the threshold sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMethod {
    /// Evenly spaced in rank: thresholds sit at quantiles of the observed
    /// values inside the sweep bounds.
    Quantile,
    /// Evenly spaced in value between the sweep bounds.
    Linear,
}

/// Ascending threshold sequence for one signal vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSweep {
    thresholds: Vec<f64>,
    degenerate: bool,
}

impl ThresholdSweep {
    /// Derives the sweep for one signal. Bounds default to the observed
    /// min/max. A constant signal collapses the sweep to its single value and
    /// marks the result degenerate; the signal is still scorable.
    pub fn generate(
        values: &[f64],
        num_thresholds: usize,
        method: ThresholdMethod,
        min_threshold: Option<f64>,
        max_threshold: Option<f64>,
    ) -> RspResult<Self> {
        if num_thresholds == 0 {
            return Err(RspError::InvalidConfig(
                "num_thresholds must be at least 1".into(),
            ));
        }
        if values.is_empty() {
            return Err(RspError::InvalidSignal("empty signal vector".into()));
        }

        let observed_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let observed_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = min_threshold.unwrap_or(observed_min);
        let hi = max_threshold.unwrap_or(observed_max);
        if hi < lo {
            return Err(RspError::InvalidConfig(format!(
                "sweep upper bound {} below lower bound {}",
                hi, lo
            )));
        }

        if hi == lo {
            return Ok(Self {
                thresholds: vec![lo],
                degenerate: true,
            });
        }
        if num_thresholds == 1 {
            return Ok(Self {
                thresholds: vec![lo],
                degenerate: false,
            });
        }

        let steps = (num_thresholds - 1) as f64;
        let mut thresholds = match method {
            ThresholdMethod::Linear => (0..num_thresholds)
                .map(|i| lo + (hi - lo) * i as f64 / steps)
                .collect::<Vec<_>>(),
            ThresholdMethod::Quantile => {
                let mut in_bounds: Vec<f64> = values
                    .iter()
                    .copied()
                    .filter(|v| (lo..=hi).contains(v))
                    .collect();
                if in_bounds.is_empty() {
                    return Err(RspError::DegenerateSweep(
                        "no signal values inside the sweep bounds".into(),
                    ));
                }
                in_bounds.sort_unstable_by(f64::total_cmp);
                (0..num_thresholds)
                    .map(|i| quantile(&in_bounds, i as f64 / steps))
                    .collect()
            }
        };

        // Heavily tied signals repeat quantiles; keep the sweep strictly
        // ascending so no two RSP rows describe the same cut.
        thresholds.dedup();
        Ok(Self {
            thresholds,
            degenerate: false,
        })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// True when the signal was constant and the sweep collapsed.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q * (sorted.len() - 1) as f64;
    let index = position.floor() as usize;
    let fraction = position - index as f64;
    if index + 1 < sorted.len() {
        sorted[index] + (sorted[index + 1] - sorted[index]) * fraction
    } else {
        sorted[index]
    }
}
