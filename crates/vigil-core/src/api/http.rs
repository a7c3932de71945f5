//! reqwest-backed transport implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::api::endpoint::Endpoint;
use crate::api::transport::Transport;
use crate::api::types::{AuthRequest, Session};
use crate::error::{VigilError, VigilResult};

const USER_AGENT: &str = concat!("vigil/", env!("CARGO_PKG_VERSION"));

/// HTTP transport speaking JSON to the scanning API.
///
/// Holds the session token from the most recent login and injects it as a
/// bearer header on every subsequent request.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Create a transport for the given API base URL
    pub fn new(base_url: impl Into<String>) -> VigilResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| VigilError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().clone();
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn into_json(response: Response) -> VigilResult<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(http_status_error(status, response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| VigilError::Http(format!("failed to parse response body: {e}")))
    }
}

async fn http_status_error(status: StatusCode, response: Response) -> VigilError {
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    VigilError::Http(format!("service returned {status}: {snippet}"))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn login(&self, request: &AuthRequest) -> VigilResult<Session> {
        let url = self.url(&Endpoint::Login.path());
        debug!(url = %url, client_type = ?request.client_type, "authenticating");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| VigilError::Http(format!("login request failed: {e}")))?;
        let value = Self::into_json(response).await?;
        let session: Session = serde_json::from_value(value)
            .map_err(|e| VigilError::Http(format!("malformed login response: {e}")))?;
        *self.token.write() = Some(session.token.clone());
        Ok(session)
    }

    async fn get(&self, path: &str) -> VigilResult<Value> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self
            .authed(self.client.get(&url))
            .send()
            .await
            .map_err(|e| VigilError::Http(format!("GET {path} failed: {e}")))?;
        Self::into_json(response).await
    }

    async fn post(&self, path: &str, body: Value) -> VigilResult<Value> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .authed(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| VigilError::Http(format!("POST {path} failed: {e}")))?;
        Self::into_json(response).await
    }

    async fn put_absolute(&self, url: &str, body: Vec<u8>) -> VigilResult<()> {
        debug!(url = %url, bytes = body.len(), "PUT");
        let response = self
            .client
            .put(url)
            .body(body)
            .send()
            .await
            .map_err(|e| VigilError::Http(format!("upload PUT failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(http_status_error(status, response).await);
        }
        Ok(())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let transport = HttpTransport::new("https://api.vigilsec.io/").unwrap();
        assert_eq!(
            transport.url("/projects"),
            "https://api.vigilsec.io/projects"
        );
        assert_eq!(
            transport.url("scans/s-1/status"),
            "https://api.vigilsec.io/scans/s-1/status"
        );
    }
}
