//! Configuration types for scan runs

mod poll;
mod scan;
mod server;
mod thresholds;

pub use poll::PollSettings;
pub use scan::{FingerprintWrite, ScanConfig, SourceKind};
pub use server::{ServerConfig, CLOUD_BASE_URL};
pub use thresholds::ThresholdConfig;
