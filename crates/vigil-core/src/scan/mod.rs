//! Scan lifecycle: submission, polling, retrieval, threshold evaluation and
//! the orchestrator that ties them together

pub mod orchestrator;
pub mod retrieve;
pub mod submit;
pub mod thresholds;
pub mod types;
pub mod wait;

pub use orchestrator::{ScanOptions, ScanOrchestrator};
pub use retrieve::ResultRetriever;
pub use submit::ScanSubmitter;
pub use thresholds::{evaluate_thresholds, Severity, ThresholdViolation};
pub use types::{
    ProjectHandle, ScanJob, ScanReport, ScanResult, ScanStatus, SeverityCounts, SourceReference,
};
pub use wait::ScanWaiter;
