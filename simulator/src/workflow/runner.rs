use crate::generator::profile::Dataset;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use rspcore::batch::{run_batch, ResultTable, RowStatus};

/// Outcome of one offline batch run.
pub struct ScanSummary {
    pub table: ResultTable,
    pub scored: usize,
    pub degenerate: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, dataset: &Dataset) -> anyhow::Result<ScanSummary> {
        let scan_config = self.config.to_scan_config();
        let table = run_batch(dataset.coordinates.view(), &dataset.signals, &scan_config)
            .context("running scan batch")?;

        let failed = table.failed_rows();
        let degenerate = table
            .rows
            .iter()
            .filter(|row| row.status == RowStatus::Ok && !row.notes.is_empty())
            .count();
        let scored = table.len() - failed - degenerate;
        info!(
            "workflow complete: {} scored, {} degenerate, {} failed",
            scored, degenerate, failed
        );

        Ok(ScanSummary {
            table,
            scored,
            degenerate,
            failed,
        })
    }
}
