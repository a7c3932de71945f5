//! Per-run options

use tokio_util::sync::CancellationToken;
use vigil_core::config::PollSettings;
use vigil_core::scan::ScanOptions;

/// Options for one scan run.
///
/// Carries a cancellation token the caller can use to abort the run (the
/// abort propagates to the polling loop) and optional poll-setting overrides.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    cancel: CancellationToken,
    poll: Option<PollSettings>,
}

impl RunOptions {
    /// Fresh options with a new cancellation token
    pub fn new() -> Self {
        Self::default()
    }

    /// A clone of the run's cancellation token; cancelling it aborts the run
    /// at the polling loop's suspend point
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Override the client's poll settings for this run
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = Some(poll);
        self
    }

    pub(crate) fn into_scan_options(self) -> ScanOptions {
        ScanOptions {
            cancel: self.cancel,
            poll: self.poll,
        }
    }
}
