//! Client construction

use vigil_core::config::{PollSettings, ServerConfig};
use vigil_core::error::{VigilError, VigilResult};
use vigil_core::scan::ScanOrchestrator;

use crate::client::VigilClient;

/// Builder for [`VigilClient`].
///
/// # Examples
///
/// ```no_run
/// use vigil_sdk::VigilClient;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), vigil_sdk::VigilError> {
/// let client = VigilClient::builder()
///     .credentials("client-id", "api-key")
///     .api_base_url("https://scans.example.com")
///     .poll_interval(Duration::from_secs(10))
///     .max_wait(Duration::from_secs(30 * 60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct VigilClientBuilder {
    client_id: Option<String>,
    api_key: Option<String>,
    api_base_url: Option<String>,
    web_app_base_url: Option<String>,
    poll: PollSettings,
}

impl VigilClientBuilder {
    /// Set the client id and API key (required)
    pub fn credentials(mut self, client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self.api_key = Some(api_key.into());
        self
    }

    /// Point at a self-hosted deployment instead of the cloud service
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the web application base URL used for report links
    pub fn web_app_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_app_base_url = Some(url.into());
        self
    }

    /// Set the default poll interval
    pub fn poll_interval(mut self, interval: std::time::Duration) -> Self {
        self.poll = self.poll.with_interval(interval);
        self
    }

    /// Set the default maximum wait for scan completion
    pub fn max_wait(mut self, max_wait: std::time::Duration) -> Self {
        self.poll = self.poll.with_max_wait(max_wait);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] when credentials are missing or blank.
    pub fn build(self) -> VigilResult<VigilClient> {
        let client_id = self
            .client_id
            .ok_or_else(|| VigilError::config("client_id is required"))?;
        let api_key = self
            .api_key
            .ok_or_else(|| VigilError::config("api_key is required"))?;

        let mut server = ServerConfig::new(client_id, api_key);
        if let Some(url) = self.api_base_url {
            server = server.with_api_base_url(url);
        }
        if let Some(url) = self.web_app_base_url {
            server = server.with_web_app_base_url(url);
        }

        let orchestrator = ScanOrchestrator::new(server)?.with_poll_settings(self.poll);
        Ok(VigilClient { orchestrator })
    }
}
