//! The transport seam between the scan lifecycle and the network.
//!
//! All remote traffic goes through this trait so the lifecycle components can
//! be exercised against a mock. Request/response plumbing, header injection
//! and per-request timeouts are the transport's concern, not the callers'.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::types::{AuthRequest, Session};
use crate::error::VigilResult;

/// Narrow interface to the scanning service.
///
/// Network failures surface as [`crate::VigilError::Http`]; callers re-wrap
/// them with the lifecycle step that issued the request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Exchange credentials for a session token. Implementations are expected
    /// to remember the token and attach it to subsequent requests.
    async fn login(&self, request: &AuthRequest) -> VigilResult<Session>;

    /// GET a path relative to the API base URL
    async fn get(&self, path: &str) -> VigilResult<Value>;

    /// POST a JSON body to a path relative to the API base URL
    async fn post(&self, path: &str, body: Value) -> VigilResult<Value>;

    /// PUT raw bytes to an absolute URL (archive upload targets live outside
    /// the API base)
    async fn put_absolute(&self, url: &str, body: Vec<u8>) -> VigilResult<()>;
}
