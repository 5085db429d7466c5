//! Core Radar Scanning Plot (RSP) engine.
//!
//! The modules compute coverage-bias (A1) and angular-skew (A2) descriptors
//! for continuous signals laid out on a shared 2D embedding, together with
//! permutation-based empirical significance. Dataset retrieval, file formats,
//! and plotting live outside this crate; callers hand in a coordinate matrix
//! plus signal vectors and receive a scored result table.

pub mod batch;
pub mod geometry;
pub mod metrics;
pub mod null_model;
pub mod prelude;
pub mod scan;
pub mod significance;
pub mod stats;
pub mod telemetry;

use serde::{Deserialize, Serialize};

use crate::metrics::Aggregation;
use crate::null_model::NullStrategy;
use crate::scan::{ThresholdMethod, Weighting};

/// Shared configuration for one analysis run.
///
/// The partition and null-model settings apply to every signal in a batch;
/// the threshold sweep is re-derived per signal from these settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub num_sectors: usize,
    /// Starting angle of sector 0, radians.
    pub start_angle: f64,
    /// Vantage point for the polar conversion; centroid when absent.
    pub reference_center: Option<(f64, f64)>,
    pub num_thresholds: usize,
    pub threshold_method: ThresholdMethod,
    pub min_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub weighting: Weighting,
    pub aggregation: Aggregation,
    pub num_permutations: usize,
    /// Replicate counts below this are rejected as a fatal config error.
    pub min_permutations: usize,
    pub null_strategy: NullStrategy,
    pub random_seed: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            num_sectors: 16,
            start_angle: 0.0,
            reference_center: None,
            num_thresholds: 10,
            threshold_method: ThresholdMethod::Quantile,
            min_threshold: None,
            max_threshold: None,
            weighting: Weighting::Count,
            aggregation: Aggregation::AreaUnderCurve,
            num_permutations: 1000,
            min_permutations: 100,
            null_strategy: NullStrategy::LabelPermutation,
            random_seed: 0,
        }
    }
}

impl ScanConfig {
    /// Checks the settings shared across all signals. Any error here is fatal
    /// for the whole run; per-signal problems are handled row by row instead.
    pub fn validate(&self) -> RspResult<()> {
        if self.num_sectors < 2 {
            return Err(RspError::InvalidPartition(format!(
                "need at least 2 sectors, got {}",
                self.num_sectors
            )));
        }
        if self.num_thresholds == 0 {
            return Err(RspError::InvalidConfig(
                "num_thresholds must be at least 1".into(),
            ));
        }
        if let (Some(lo), Some(hi)) = (self.min_threshold, self.max_threshold) {
            if hi < lo {
                return Err(RspError::InvalidConfig(format!(
                    "max_threshold {} below min_threshold {}",
                    hi, lo
                )));
            }
        }
        significance::check_permutations(self.num_permutations, self.min_permutations)?;
        Ok(())
    }
}

/// Error taxonomy shared by the scan pipeline.
///
/// `Clone` so a failed batch row can carry its cause in the result table.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RspError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid partition: {0}")]
    InvalidPartition(String),
    #[error("degenerate sweep: {0}")]
    DegenerateSweep(String),
    #[error("insufficient permutations: requested {requested}, minimum {minimum}")]
    InsufficientPermutations { requested: usize, minimum: usize },
    #[error("invalid signal: {0}")]
    InvalidSignal(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type RspResult<T> = Result<T, RspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn single_sector_partition_is_fatal() {
        let config = ScanConfig {
            num_sectors: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RspError::InvalidPartition(_))
        ));
    }

    #[test]
    fn too_few_permutations_is_fatal() {
        let config = ScanConfig {
            num_permutations: 10,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(RspError::InsufficientPermutations {
                requested: 10,
                minimum: 100
            })
        );
    }

    #[test]
    fn inverted_sweep_bounds_are_rejected() {
        let config = ScanConfig {
            min_threshold: Some(2.0),
            max_threshold: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RspError::InvalidConfig(_))));
    }
}
