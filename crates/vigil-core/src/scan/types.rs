//! Domain types for one scan run

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::api::types::{Finding, PackageRecord, ReportSummary};
use crate::api::{ProjectId, ScanId};
use crate::scan::thresholds::ThresholdViolation;

/// Remote status of a scan job.
///
/// The job moves `Queued → Running` and ends in exactly one of the terminal
/// states; `Finished` is the only success terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    Queued,
    Running,
    Finished,
    Failed,
    #[serde(alias = "Cancelled")]
    Canceled,
}

impl ScanStatus {
    /// Whether no further polling can change this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Canceled)
    }

    /// Whether this is the success terminal
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Finished => "Finished",
            Self::Failed => "Failed",
            Self::Canceled => "Canceled",
        };
        f.write_str(name)
    }
}

/// Aggregated finding counts per severity, as consumed by the threshold
/// evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// A submitted scan job.
///
/// The identifier is assigned by the service and immutable afterwards; the
/// status and elapsed duration are updated only by the polling engine. The
/// monotonic submission instant is kept separate from the wall-clock start
/// timestamp so elapsed time reflects true queue + execution time, not poll
/// counts.
#[derive(Debug, Clone)]
pub struct ScanJob {
    id: ScanId,
    started_at: DateTime<Utc>,
    submitted: Instant,
    status: ScanStatus,
    elapsed: Duration,
}

impl ScanJob {
    /// Record a freshly submitted job
    pub fn new(id: ScanId) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            submitted: Instant::now(),
            status: ScanStatus::Queued,
            elapsed: Duration::ZERO,
        }
    }

    /// Service-assigned scan identifier
    pub fn id(&self) -> &ScanId {
        &self.id
    }

    /// Wall-clock submission timestamp
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Last status observed by the polling engine
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    /// Elapsed duration recorded by the polling engine; monotonic
    /// non-decreasing
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock time since submission, independent of poll count
    pub fn elapsed_since_submission(&self) -> Duration {
        self.submitted.elapsed()
    }

    pub(crate) fn mark(&mut self, status: ScanStatus) {
        self.status = status;
    }

    pub(crate) fn record_elapsed(&mut self) {
        self.elapsed = self.elapsed.max(self.elapsed_since_submission());
    }
}

/// The source a scan is started from. Exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
    /// The service clones the repository itself
    RemoteRepository { url: String },
    /// A local directory was packaged into an archive for upload
    LocalDirectory {
        archive_path: PathBuf,
        file_count: usize,
    },
}

/// A project resolved (or created) on the service. Immutable for the
/// lifetime of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    pub id: ProjectId,
    pub name: String,
}

/// The assembled result of a finished scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Aggregated summary
    pub summary: ReportSummary,
    /// Findings, in service order
    pub findings: Vec<Finding>,
    /// Package inventory, in service order
    pub packages: Vec<PackageRecord>,
    /// Link to the report in the web application; empty string when the web
    /// base URL is not configured
    pub web_link: String,
}

/// What a scan run hands back to the caller
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Echo of the requested mode
    pub sync_mode: bool,
    /// The project the scan ran under
    pub project: ProjectHandle,
    /// The submitted job, including final status and elapsed time in sync
    /// mode
    pub job: ScanJob,
    /// Populated only in sync mode after a successful terminal status
    pub report: Option<ScanReport>,
    /// Threshold violations; empty in async mode or when thresholds pass
    pub violations: Vec<ThresholdViolation>,
}

impl ScanResult {
    /// Whether any configured threshold was exceeded
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_three_statuses_are_terminal() {
        assert!(!ScanStatus::Queued.is_terminal());
        assert!(!ScanStatus::Running.is_terminal());
        assert!(ScanStatus::Finished.is_terminal());
        assert!(ScanStatus::Failed.is_terminal());
        assert!(ScanStatus::Canceled.is_terminal());
        assert!(ScanStatus::Finished.is_success());
        assert!(!ScanStatus::Failed.is_success());
    }

    #[test]
    fn status_accepts_british_spelling_alias() {
        let status: ScanStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(status, ScanStatus::Canceled);
    }

    #[test]
    fn recorded_elapsed_never_decreases() {
        let mut job = ScanJob::new(ScanId::new("s-1").unwrap());
        job.elapsed = Duration::from_secs(10);
        job.record_elapsed();
        assert!(job.elapsed() >= Duration::from_secs(10));
    }
}
