//! Status polling until the scan reaches a terminal state.
//!
//! The waiter is a bounded loop over `Queued → Running → {Finished, Failed,
//! Canceled}`. Timeouts are measured against wall-clock time since
//! submission, not poll counts, and a timeout is reported as its own error so
//! callers can tell "the service reported failure" apart from "we gave up
//! waiting". Transient transport errors during a poll are retried a bounded
//! number of times; they are never read as a terminal status.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::types::ScanStatusResponse;
use crate::api::{Endpoint, ScanId, Transport};
use crate::config::PollSettings;
use crate::error::{VigilError, VigilResult};
use crate::scan::types::{ScanJob, ScanStatus};

/// Polls a submitted job until it is terminal, times out or is cancelled
pub struct ScanWaiter<'a> {
    transport: &'a dyn Transport,
    settings: PollSettings,
    cancel: CancellationToken,
}

impl<'a> ScanWaiter<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        settings: PollSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            transport,
            settings,
            cancel,
        }
    }

    /// Poll until `job` reaches a terminal status and return it.
    ///
    /// Updates the job's status after each successful poll and records the
    /// final elapsed duration. Cancellation interrupts the sleep between
    /// polls promptly and has no remote side effects; the service-side job is
    /// left untouched.
    pub async fn wait_for_completion(&self, job: &mut ScanJob) -> VigilResult<ScanStatus> {
        let mut transient_errors = 0u32;

        loop {
            let elapsed = job.elapsed_since_submission();
            if elapsed > self.settings.max_wait {
                job.record_elapsed();
                return Err(VigilError::timeout(elapsed.as_secs()));
            }

            match self.fetch_status(job.id()).await {
                Ok(status) => {
                    transient_errors = 0;
                    job.mark(status);
                    debug!(scan_id = %job.id(), status = %status, elapsed_secs = elapsed.as_secs(), "poll");
                    if status.is_terminal() {
                        job.record_elapsed();
                        return Ok(status);
                    }
                }
                Err(e) => {
                    transient_errors += 1;
                    if transient_errors > self.settings.max_transient_errors {
                        return Err(VigilError::remote(
                            "status polling",
                            format!(
                                "{} consecutive poll failures, last: {e}",
                                transient_errors
                            ),
                        ));
                    }
                    warn!(
                        scan_id = %job.id(),
                        attempt = transient_errors,
                        error = %e,
                        "transient poll failure, will retry"
                    );
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    job.record_elapsed();
                    return Err(VigilError::Cancelled);
                }
                _ = sleep(self.settings.interval) => {}
            }
        }
    }

    async fn fetch_status(&self, scan: &ScanId) -> VigilResult<ScanStatus> {
        let value = self
            .transport
            .get(&Endpoint::ScanStatus { scan }.path())
            .await?;
        let response: ScanStatusResponse = serde_json::from_value(value)?;
        Ok(response.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTransport;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    fn job() -> ScanJob {
        ScanJob::new(ScanId::new("s-1").unwrap())
    }

    fn settings(interval_secs: u64, max_wait_secs: u64) -> PollSettings {
        PollSettings::default()
            .with_interval(Duration::from_secs(interval_secs))
            .with_max_wait(Duration::from_secs(max_wait_secs))
    }

    fn scripted_transport(statuses: &[&str]) -> MockTransport {
        let script: Mutex<VecDeque<String>> =
            Mutex::new(statuses.iter().map(|s| s.to_string()).collect());
        let mut transport = MockTransport::new();
        transport.expect_get().returning(move |_| {
            let status = script
                .lock()
                .unwrap()
                .pop_front()
                .expect("poll past end of scripted statuses");
            Ok(serde_json::json!({ "status": status }))
        });
        transport
    }

    #[tokio::test(start_paused = true)]
    async fn terminates_on_first_terminal_status() {
        let transport = scripted_transport(&["Queued", "Running", "Running", "Finished"]);
        let waiter = ScanWaiter::new(&transport, settings(5, 600), CancellationToken::new());

        let mut job = job();
        let status = waiter.wait_for_completion(&mut job).await.unwrap();

        assert_eq!(status, ScanStatus::Finished);
        assert_eq!(job.status(), ScanStatus::Finished);
        // Three sleeps happened before the terminal poll; elapsed tracks the
        // paused clock, not the poll count.
        assert!(job.elapsed() >= Duration::from_secs(15));
        assert!(job.elapsed() < Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_terminal_is_returned_not_timed_out() {
        let transport = scripted_transport(&["Running", "Failed"]);
        let waiter = ScanWaiter::new(&transport, settings(5, 600), CancellationToken::new());

        let status = waiter.wait_for_completion(&mut job()).await.unwrap();
        assert_eq!(status, ScanStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn exceeding_max_wait_is_a_timeout_never_a_false_finish() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(serde_json::json!({ "status": "Running" })));
        let waiter = ScanWaiter::new(&transport, settings(5, 30), CancellationToken::new());

        let result = waiter.wait_for_completion(&mut job()).await;
        match result {
            Err(VigilError::Timeout { waited_secs }) => assert!(waited_secs >= 30),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_then_recovered() {
        let calls = Mutex::new(0u32);
        let mut transport = MockTransport::new();
        transport.expect_get().returning(move |_| {
            let mut calls = calls.lock().unwrap();
            *calls += 1;
            if *calls <= 2 {
                Err(VigilError::Http("connection reset".into()))
            } else {
                Ok(serde_json::json!({ "status": "Finished" }))
            }
        });
        let waiter = ScanWaiter::new(&transport, settings(5, 600), CancellationToken::new());

        let status = waiter.wait_for_completion(&mut job()).await.unwrap();
        assert_eq!(status, ScanStatus::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_transient_budget_escalates_to_remote_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Err(VigilError::Http("connection reset".into())));
        let waiter = ScanWaiter::new(
            &transport,
            settings(5, 600).with_max_transient_errors(2),
            CancellationToken::new(),
        );

        let result = waiter.wait_for_completion(&mut job()).await;
        match result {
            Err(VigilError::Remote { step, .. }) => assert_eq!(step, "status polling"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_sleep_promptly() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(serde_json::json!({ "status": "Running" })));

        let cancel = CancellationToken::new();
        let waiter_cancel = cancel.clone();
        // Long interval: without cancellation the next poll is an hour away.
        let poll = settings(3600, 7200);

        let handle = tokio::spawn(async move {
            let transport = transport;
            let waiter = ScanWaiter::new(&transport, poll, waiter_cancel);
            waiter.wait_for_completion(&mut job()).await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        cancel.cancel();
        let result = handle.await.unwrap();
        assert!(matches!(result, Err(VigilError::Cancelled)));
    }
}
