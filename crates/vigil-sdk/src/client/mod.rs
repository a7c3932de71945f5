//! SDK client implementation

mod builder;
mod options;
mod outcome;

pub use builder::VigilClientBuilder;
pub use options::RunOptions;
pub use outcome::ScanOutcome;

use vigil_core::api::HttpTransport;
use vigil_core::config::ScanConfig;
use vigil_core::error::VigilResult;
use vigil_core::scan::ScanOrchestrator;

/// High-level client for the Vigil scanning service.
///
/// One client can serve many scans, sequentially or concurrently; each scan
/// run keeps its own state.
///
/// # Examples
///
/// ```no_run
/// use vigil_sdk::{ScanConfig, ThresholdConfig, VigilClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = VigilClient::builder()
///     .credentials("client-id", "api-key")
///     .web_app_base_url("https://app.vigilsec.io")
///     .build()?;
///
/// let config = ScanConfig::local_directory("/src/acme-app", "acme-app")
///     .with_thresholds(ThresholdConfig::ceilings(0, 5, 20));
/// let outcome = client.scan(&config).await?;
/// println!("report: {}", outcome.report_url().unwrap_or("unavailable"));
/// # Ok(())
/// # }
/// ```
pub struct VigilClient {
    pub(crate) orchestrator: ScanOrchestrator<HttpTransport>,
}

impl VigilClient {
    /// Start building a client
    pub fn builder() -> VigilClientBuilder {
        VigilClientBuilder::default()
    }

    /// Run a scan with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration is invalid or contradictory
    /// - any remote call fails (login, project resolution, submission,
    ///   polling, retrieval)
    /// - the scan reaches a failure terminal or polling times out
    /// - the source directory contains nothing to scan
    ///   ([`vigil_core::VigilError::Skipped`])
    pub async fn scan(&self, config: &ScanConfig) -> VigilResult<ScanOutcome> {
        self.scan_with_options(config, RunOptions::default()).await
    }

    /// Run a scan with per-run options (cancellation, poll overrides).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vigil_sdk::{RunOptions, ScanConfig, VigilClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = VigilClient::builder().credentials("id", "key").build()?;
    /// let options = RunOptions::new();
    /// let cancel = options.cancellation_token();
    ///
    /// tokio::spawn(async move {
    ///     tokio::time::sleep(std::time::Duration::from_secs(300)).await;
    ///     cancel.cancel();
    /// });
    ///
    /// let config = ScanConfig::remote_repository("https://github.com/acme/app", "acme-app");
    /// let outcome = client.scan_with_options(&config, options).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scan_with_options(
        &self,
        config: &ScanConfig,
        options: RunOptions,
    ) -> VigilResult<ScanOutcome> {
        let result = self
            .orchestrator
            .scan_with_options(config, options.into_scan_options())
            .await?;
        Ok(ScanOutcome::new(result))
    }
}
