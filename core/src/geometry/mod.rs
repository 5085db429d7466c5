pub mod partition;
pub mod polar;

pub use partition::AngularPartition;
pub use polar::{shift_angles, within_window, PolarEmbedding};
