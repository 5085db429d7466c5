pub mod builder;
pub mod sweep;

pub use builder::{build_rsp, Weighting};
pub use sweep::{ThresholdMethod, ThresholdSweep};
