//! Scan outcome wrapper

use vigil_core::scan::{ScanReport, ScanResult, ThresholdViolation};

/// Result of a scan run.
///
/// Wraps the core [`ScanResult`] with convenience accessors.
///
/// # Examples
///
/// ```no_run
/// # use vigil_sdk::{ScanConfig, VigilClient};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = VigilClient::builder().credentials("id", "key").build()?;
/// # let config = ScanConfig::remote_repository("https://github.com/acme/app", "acme-app");
/// let outcome = client.scan(&config).await?;
///
/// if outcome.is_passed() {
///     println!("scan clean");
/// } else {
///     for violation in outcome.violations() {
///         eprintln!("{violation}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    result: ScanResult,
}

impl ScanOutcome {
    pub(crate) fn new(result: ScanResult) -> Self {
        Self { result }
    }

    /// The underlying scan result
    pub fn result(&self) -> &ScanResult {
        &self.result
    }

    /// Service-assigned scan identifier
    pub fn scan_id(&self) -> &str {
        self.result.job.id().as_str()
    }

    /// Whether this was an async submission (no report, caller polls
    /// separately)
    pub fn is_async_submission(&self) -> bool {
        !self.result.sync_mode
    }

    /// Whether the scan completed and no threshold was exceeded.
    /// Always false for async submissions, which carry no report.
    pub fn is_passed(&self) -> bool {
        self.result.sync_mode && self.result.report.is_some() && !self.result.has_violations()
    }

    /// Whether any configured threshold was exceeded
    pub fn has_violations(&self) -> bool {
        self.result.has_violations()
    }

    /// The threshold violations, ordered high, medium, low
    pub fn violations(&self) -> &[ThresholdViolation] {
        &self.result.violations
    }

    /// The retrieved report; `None` for async submissions
    pub fn report(&self) -> Option<&ScanReport> {
        self.result.report.as_ref()
    }

    /// Link to the report in the web application, when one could be built
    pub fn report_url(&self) -> Option<&str> {
        self.result
            .report
            .as_ref()
            .map(|r| r.web_link.as_str())
            .filter(|link| !link.is_empty())
    }
}
