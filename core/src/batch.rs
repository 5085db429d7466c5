//! Batch orchestration: runs the per-signal scan pipeline independently
//! across many signals sharing one spatial layout.

use crate::geometry::{AngularPartition, PolarEmbedding};
use crate::metrics::compute_metrics;
use crate::null_model::NullModel;
use crate::scan::{build_rsp, ThresholdSweep};
use crate::significance::evaluate;
use crate::telemetry::{BatchCounters, LogManager};
use crate::{RspError, RspResult, ScanConfig};
use ndarray::ArrayView2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One signal vector with its identifier (e.g. a gene name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalVector {
    pub id: String,
    pub values: Vec<f64>,
}

impl SignalVector {
    pub fn new(id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Ok,
    Failed,
}

/// Scored row of the result table. A row is either fully computed, including
/// significance, or failed with the error recorded; never half-populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub signal_id: String,
    pub coverage_bias: Option<f64>,
    pub angular_skew: Option<f64>,
    pub coverage_bias_p: Option<f64>,
    pub angular_skew_p: Option<f64>,
    pub evaluated_rows: usize,
    pub status: RowStatus,
    pub failure: Option<String>,
    pub notes: Vec<String>,
}

impl ResultRecord {
    fn failed(signal_id: &str, error: &RspError) -> Self {
        Self {
            signal_id: signal_id.to_string(),
            coverage_bias: None,
            angular_skew: None,
            coverage_bias_p: None,
            angular_skew_p: None,
            evaluated_rows: 0,
            status: RowStatus::Failed,
            failure: Some(error.to_string()),
            notes: Vec::new(),
        }
    }
}

/// Result table for one batch, rows in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub rows: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn failed_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == RowStatus::Failed)
            .count()
    }
}

/// Runs the full pipeline for every signal against one shared layout.
///
/// Configuration errors are fatal and abort before any signal is attempted.
/// Per-signal errors are caught at this boundary and recorded as failed rows,
/// so a completed call always yields one row per input signal, in input
/// order regardless of worker completion order.
pub fn run_batch(
    coordinates: ArrayView2<f64>,
    signals: &[SignalVector],
    config: &ScanConfig,
) -> RspResult<ResultTable> {
    config.validate()?;
    let embedding = PolarEmbedding::from_coordinates(coordinates, config.reference_center)?;
    let partition = AngularPartition::new(config.num_sectors, config.start_angle)?;
    let sectors = partition.assign_all(embedding.angles());

    let logger = LogManager::new();
    let counters = BatchCounters::new();
    logger.record(&format!(
        "scan batch: {} signals over {} points, {} sectors, {} permutations",
        signals.len(),
        embedding.len(),
        partition.sectors(),
        config.num_permutations
    ));

    let rows: Vec<ResultRecord> = signals
        .par_iter()
        .enumerate()
        .map(|(index, signal)| {
            match score_signal(index, signal, &embedding, &partition, &sectors, config) {
                Ok(record) => {
                    if record.notes.is_empty() {
                        counters.record_scored();
                    } else {
                        counters.record_degenerate();
                    }
                    record
                }
                Err(error) => {
                    counters.record_failed();
                    logger.record_warning(&format!("signal '{}' failed: {}", signal.id, error));
                    ResultRecord::failed(&signal.id, &error)
                }
            }
        })
        .collect();

    let (scored, degenerate, failed) = counters.snapshot();
    logger.record(&format!(
        "scan batch complete: {} scored, {} degenerate, {} failed",
        scored, degenerate, failed
    ));

    Ok(ResultTable { rows })
}

fn score_signal(
    index: usize,
    signal: &SignalVector,
    embedding: &PolarEmbedding,
    partition: &AngularPartition,
    sectors: &[usize],
    config: &ScanConfig,
) -> RspResult<ResultRecord> {
    if signal.values.len() != embedding.len() {
        return Err(RspError::InvalidSignal(format!(
            "signal has {} values but the embedding has {} points",
            signal.values.len(),
            embedding.len()
        )));
    }
    if signal.values.iter().any(|v| !v.is_finite()) {
        return Err(RspError::InvalidSignal(
            "signal contains non-finite values; filter or impute before scanning".into(),
        ));
    }

    let sweep = ThresholdSweep::generate(
        &signal.values,
        config.num_thresholds,
        config.threshold_method,
        config.min_threshold,
        config.max_threshold,
    )?;
    let mut notes = Vec::new();
    if sweep.is_degenerate() {
        notes.push("degenerate sweep: constant signal scored at a single threshold".to_string());
    }

    let rsp = build_rsp(
        sectors,
        &signal.values,
        &sweep,
        partition.sectors(),
        config.weighting,
    )?;
    let observed = compute_metrics(rsp.view(), partition, config.aggregation);

    let null = NullModel::new(
        embedding,
        *partition,
        config.null_strategy,
        config.weighting,
        config.aggregation,
        config.num_permutations,
    )
    .sample(sectors, &signal.values, &sweep, config.random_seed, index)?;
    let significance = evaluate(&observed, &null);

    Ok(ResultRecord {
        signal_id: signal.id.clone(),
        coverage_bias: observed.coverage_bias,
        angular_skew: observed.angular_skew,
        coverage_bias_p: significance.coverage_bias_p,
        angular_skew_p: significance.angular_skew_p,
        evaluated_rows: observed.evaluated_rows,
        status: RowStatus::Ok,
        failure: None,
        notes,
    })
}
