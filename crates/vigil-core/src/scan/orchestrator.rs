//! End-to-end scan orchestration.
//!
//! One orchestrator instance can serve many runs; every run threads its own
//! immutable context (session, project, job) through the steps, so concurrent
//! runs never share mutable state.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::api::{HttpTransport, Transport};
use crate::config::{PollSettings, ScanConfig, ServerConfig, SourceKind};
use crate::error::{VigilError, VigilResult};
use crate::package::{PackagedSource, PathFilter, SourcePackager, write_fingerprints};
use crate::scan::retrieve::ResultRetriever;
use crate::scan::submit::ScanSubmitter;
use crate::scan::thresholds::evaluate_thresholds;
use crate::scan::types::{ProjectHandle, ScanResult, SourceReference};
use crate::scan::wait::ScanWaiter;

/// Per-run options
#[derive(Debug, Default, Clone)]
pub struct ScanOptions {
    /// Token cancelling the run; cancellation propagates to the polling
    /// loop's suspend point
    pub cancel: CancellationToken,
    /// Poll settings overriding the orchestrator defaults for this run
    pub poll: Option<PollSettings>,
}

/// Composes packaging, submission, polling, retrieval and threshold
/// evaluation into the single entry point callers consume
pub struct ScanOrchestrator<T: Transport> {
    transport: T,
    server: ServerConfig,
    poll: PollSettings,
}

impl ScanOrchestrator<HttpTransport> {
    /// Orchestrator speaking HTTP to the configured service
    pub fn new(server: ServerConfig) -> VigilResult<Self> {
        server.validate()?;
        let transport = HttpTransport::new(server.api_base_url.clone())?;
        Ok(Self::with_transport(transport, server))
    }
}

impl<T: Transport> ScanOrchestrator<T> {
    /// Orchestrator over a caller-provided transport (tests, custom stacks)
    pub fn with_transport(transport: T, server: ServerConfig) -> Self {
        Self {
            transport,
            server,
            poll: PollSettings::default(),
        }
    }

    /// Set default poll settings for runs without per-run overrides
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    /// The transport this orchestrator issues remote calls through
    pub fn transport_ref(&self) -> &T {
        &self.transport
    }

    /// Run a scan with default options
    pub async fn scan(&self, config: &ScanConfig) -> VigilResult<ScanResult> {
        self.scan_with_options(config, ScanOptions::default()).await
    }

    /// Run a scan.
    ///
    /// Steps execute in strict sequence; each depends on state produced by
    /// its predecessor. In async mode the result is returned right after
    /// submission with no report; in sync mode the run waits for a terminal
    /// status, retrieves the report and evaluates thresholds. A non-success
    /// terminal surfaces as [`VigilError::ScanFailed`].
    #[instrument(skip(self, config, options), fields(project = %config.project_name))]
    pub async fn scan_with_options(
        &self,
        config: &ScanConfig,
        options: ScanOptions,
    ) -> VigilResult<ScanResult> {
        config.validate()?;

        // The packaged source owns the temp archive; holding it in this scope
        // removes the file on every exit path, error or not.
        let packaged = self.package_source(config)?;
        let source = match &packaged {
            Some(packaged) => packaged.source_reference(),
            None => SourceReference::RemoteRepository {
                url: config.source_location.clone(),
            },
        };

        let submitter = ScanSubmitter::new(&self.transport, &self.server);
        // The session token lives in the transport after login; the run only
        // needs the project handle from here on.
        submitter.login().await?;
        let project = submitter.resolve_project(&config.project_name).await?;
        let ctx = RunContext { project };

        let mut job = submitter.submit(&ctx.project, &source).await?;

        if let (Some(path), Some(packaged)) = (&config.fingerprints_path, &packaged) {
            write_fingerprints(path, packaged.digests(), config.fingerprint_write)?;
        }

        if !config.sync_mode {
            info!(scan_id = %job.id(), "scan submitted; async mode returns without waiting");
            return Ok(ScanResult {
                sync_mode: false,
                project: ctx.project,
                job,
                report: None,
                violations: Vec::new(),
            });
        }

        let poll = options.poll.unwrap_or(self.poll);
        let waiter = ScanWaiter::new(&self.transport, poll, options.cancel);
        let terminal = waiter.wait_for_completion(&mut job).await?;
        if !terminal.is_success() {
            return Err(VigilError::ScanFailed { status: terminal });
        }

        let retriever =
            ResultRetriever::new(&self.transport, self.server.web_app_base_url.as_deref());
        let report = retriever.retrieve(&ctx.project, &job).await?;
        let violations = evaluate_thresholds(&report.summary.severity_counts(), &config.thresholds);

        info!(
            scan_id = %job.id(),
            elapsed_secs = job.elapsed().as_secs(),
            violations = violations.len(),
            "scan finished"
        );
        Ok(ScanResult {
            sync_mode: true,
            project: ctx.project,
            job,
            report: Some(report),
            violations,
        })
    }

    fn package_source(&self, config: &ScanConfig) -> VigilResult<Option<PackagedSource>> {
        if config.source_kind != SourceKind::LocalDirectory {
            return Ok(None);
        }
        let filter = if config.include_source {
            PathFilter::allow_all(&config.exclude_folders)?
        } else {
            PathFilter::new(&config.file_extensions, &config.exclude_folders)?
        };
        let packaged =
            SourcePackager::default().package(Path::new(&config.source_location), &filter)?;
        Ok(Some(packaged))
    }
}

/// Immutable state threaded through one run
struct RunContext {
    project: ProjectHandle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTransport;
    use crate::config::ThresholdConfig;
    use serde_json::json;

    fn server() -> ServerConfig {
        ServerConfig::new("client-1", "key-1").with_web_app_base_url("https://app.vigilsec.io")
    }

    #[tokio::test]
    async fn contradictory_config_fails_before_any_network_call() {
        let transport = MockTransport::new();
        let orchestrator = ScanOrchestrator::with_transport(transport, server());
        let config = crate::config::ScanConfig::local_directory(".", "acme-app")
            .with_include_source()
            .with_fingerprints_path("/tmp/fp.json");

        let result = orchestrator.scan(&config).await;
        assert!(matches!(result, Err(VigilError::Config(_))));
    }

    #[tokio::test]
    async fn empty_local_directory_skips_before_any_network_call() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "docs only").unwrap();

        let transport = MockTransport::new();
        let orchestrator = ScanOrchestrator::with_transport(transport, server());
        let config = crate::config::ScanConfig::local_directory(
            dir.path().to_string_lossy(),
            "acme-app",
        );

        let result = orchestrator.scan(&config).await;
        assert!(matches!(result, Err(VigilError::Skipped(_))));
    }

    #[tokio::test]
    async fn async_mode_returns_after_submission_without_polling() {
        let mut transport = MockTransport::new();
        transport.expect_login().returning(|_| {
            Ok(crate::api::types::Session {
                token: "tok".into(),
                expires_at: None,
            })
        });
        transport
            .expect_get()
            .withf(|path| path == "projects")
            .returning(|_| Ok(json!({ "projects": [{ "id": "p-1", "name": "acme-app" }] })));
        transport
            .expect_post()
            .withf(|path, _| path == "projects/p-1/scans")
            .returning(|_, _| Ok(json!({ "scanId": "s-5" })));
        // No status endpoint expectation: async mode must not poll.

        let orchestrator = ScanOrchestrator::with_transport(transport, server());
        let config =
            crate::config::ScanConfig::remote_repository("https://github.com/acme/app", "acme-app")
                .with_async_mode()
                .with_thresholds(ThresholdConfig::ceilings(0, 0, 0));

        let result = orchestrator.scan(&config).await.unwrap();
        assert!(!result.sync_mode);
        assert!(result.report.is_none());
        assert!(result.violations.is_empty());
        assert_eq!(result.job.id().as_str(), "s-5");
    }

    #[tokio::test]
    async fn failed_terminal_surfaces_as_scan_failed() {
        let mut transport = MockTransport::new();
        transport.expect_login().returning(|_| {
            Ok(crate::api::types::Session {
                token: "tok".into(),
                expires_at: None,
            })
        });
        transport
            .expect_get()
            .withf(|path| path == "projects")
            .returning(|_| Ok(json!({ "projects": [{ "id": "p-1", "name": "acme-app" }] })));
        transport
            .expect_post()
            .withf(|path, _| path == "projects/p-1/scans")
            .returning(|_, _| Ok(json!({ "scanId": "s-5" })));
        transport
            .expect_get()
            .withf(|path| path == "scans/s-5/status")
            .returning(|_| Ok(json!({ "status": "Failed" })));

        let orchestrator = ScanOrchestrator::with_transport(transport, server());
        let config =
            crate::config::ScanConfig::remote_repository("https://github.com/acme/app", "acme-app");

        let result = orchestrator.scan(&config).await;
        match result {
            Err(VigilError::ScanFailed { status }) => {
                assert_eq!(status, crate::scan::types::ScanStatus::Failed)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
