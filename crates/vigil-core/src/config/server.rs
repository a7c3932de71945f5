//! Scanning service endpoint and credential configuration

use serde::{Deserialize, Serialize};

use crate::error::{VigilError, VigilResult};

/// Base URL of the cloud-hosted scanning service. A configured API base that
/// matches this selects the cloud client-type tag at login; anything else is
/// treated as a self-hosted deployment.
pub const CLOUD_BASE_URL: &str = "https://api.vigilsec.io";

/// Connection settings for the scanning service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the scanning API
    pub api_base_url: String,
    /// Base URL of the web application, used to build report links. When
    /// unset, report links degrade to an empty string.
    pub web_app_base_url: Option<String>,
    /// Client identifier issued by the service
    pub client_id: String,
    /// API key paired with the client identifier
    pub api_key: String,
}

impl ServerConfig {
    /// Create a new server config pointing at the cloud-hosted service
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: CLOUD_BASE_URL.to_string(),
            web_app_base_url: None,
            client_id: client_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Set the API base URL (self-hosted deployments)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the web application base URL used for report links
    pub fn with_web_app_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_app_base_url = Some(url.into());
        self
    }

    /// Whether the configured API base is the cloud-hosted service. Selects
    /// the client-type tag sent during authentication, not the transport.
    pub fn is_cloud_hosted(&self) -> bool {
        self.api_base_url
            .trim_end_matches('/')
            .eq_ignore_ascii_case(CLOUD_BASE_URL)
    }

    /// Validate credentials and endpoint fields
    pub fn validate(&self) -> VigilResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(VigilError::config("api_base_url must not be empty"));
        }
        if self.client_id.trim().is_empty() {
            return Err(VigilError::config("client_id must not be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(VigilError::config("api_key must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_detection_ignores_trailing_slash_and_case() {
        let config =
            ServerConfig::new("id", "key").with_api_base_url("https://API.vigilsec.io/");
        assert!(config.is_cloud_hosted());
    }

    #[test]
    fn self_hosted_base_is_not_cloud() {
        let config =
            ServerConfig::new("id", "key").with_api_base_url("https://scans.example.com");
        assert!(!config.is_cloud_hosted());
    }

    #[test]
    fn validate_rejects_blank_credentials() {
        let config = ServerConfig::new("", "key");
        assert!(matches!(config.validate(), Err(VigilError::Config(_))));
    }
}
