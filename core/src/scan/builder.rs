use crate::scan::sweep::ThresholdSweep;
use crate::{RspError, RspResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Per-point contribution to a sector bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Unit weight per qualifying point.
    Count,
    /// Weight equals the point's signal value.
    Sum,
}

/// Builds the M x K Radar Scanning Plot matrix.
///
/// Row i holds the per-sector aggregate weight of points whose signal value
/// is at least threshold i. For a fixed sector the entries are non-increasing
/// down the rows: stricter thresholds only remove qualifying points.
pub fn build_rsp(
    sectors: &[usize],
    values: &[f64],
    sweep: &ThresholdSweep,
    num_sectors: usize,
    weighting: Weighting,
) -> RspResult<Array2<f64>> {
    if sectors.len() != values.len() {
        return Err(RspError::InvalidSignal(format!(
            "sector assignment covers {} points but the signal has {}",
            sectors.len(),
            values.len()
        )));
    }
    if let Some(&bad) = sectors.iter().find(|&&s| s >= num_sectors) {
        return Err(RspError::InvalidPartition(format!(
            "sector index {} outside partition of {} sectors",
            bad, num_sectors
        )));
    }

    let mut rsp = Array2::zeros((sweep.len(), num_sectors));
    for (row, &threshold) in sweep.thresholds().iter().enumerate() {
        for (&sector, &value) in sectors.iter().zip(values) {
            if value >= threshold {
                let weight = match weighting {
                    Weighting::Count => 1.0,
                    Weighting::Sum => value,
                };
                rsp[[row, sector]] += weight;
            }
        }
    }
    Ok(rsp)
}
