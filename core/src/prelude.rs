//! Common exports for driving scans against the RSP core.

pub use crate::batch::{run_batch, ResultRecord, ResultTable, RowStatus, SignalVector};
pub use crate::geometry::{shift_angles, within_window, AngularPartition, PolarEmbedding};
pub use crate::metrics::{compute_metrics, Aggregation, SignalMetrics};
pub use crate::null_model::{replicate_rng, NullDistribution, NullModel, NullStrategy};
pub use crate::scan::{build_rsp, ThresholdMethod, ThresholdSweep, Weighting};
pub use crate::significance::{empirical_p_value, evaluate, Significance};
pub use crate::{RspError, RspResult, ScanConfig};
