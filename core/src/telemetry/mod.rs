pub mod counters;
pub mod log;

pub use counters::BatchCounters;
pub use log::LogManager;
