use anyhow::Context;
use rspcore::metrics::Aggregation;
use rspcore::null_model::NullStrategy;
use rspcore::scan::{ThresholdMethod, Weighting};
use rspcore::ScanConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Workflow-level scan settings, loadable from YAML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub num_sectors: usize,
    pub start_angle: f64,
    pub num_thresholds: usize,
    pub threshold_method: ThresholdMethod,
    pub weighting: Weighting,
    pub aggregation: Aggregation,
    pub num_permutations: usize,
    pub null_strategy: NullStrategy,
    pub random_seed: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let scan = ScanConfig::default();
        Self {
            num_sectors: scan.num_sectors,
            start_angle: scan.start_angle,
            num_thresholds: scan.num_thresholds,
            threshold_method: scan.threshold_method,
            weighting: scan.weighting,
            aggregation: scan.aggregation,
            num_permutations: scan.num_permutations,
            null_strategy: scan.null_strategy,
            random_seed: scan.random_seed,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        num_sectors: usize,
        num_thresholds: usize,
        num_permutations: usize,
        random_seed: u64,
    ) -> Self {
        Self {
            num_sectors,
            num_thresholds,
            num_permutations,
            random_seed,
            ..Default::default()
        }
    }

    pub fn to_scan_config(&self) -> ScanConfig {
        ScanConfig {
            num_sectors: self.num_sectors,
            start_angle: self.start_angle,
            num_thresholds: self.num_thresholds,
            threshold_method: self.threshold_method,
            weighting: self.weighting,
            aggregation: self.aggregation,
            num_permutations: self.num_permutations,
            null_strategy: self.null_strategy,
            random_seed: self.random_seed,
            ..Default::default()
        }
    }
}
