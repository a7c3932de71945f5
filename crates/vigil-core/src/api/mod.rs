//! Remote API surface: typed endpoints, wire records and the transport seam

mod endpoint;
mod http;
mod transport;
pub mod types;

pub use endpoint::{Endpoint, ProjectId, ReportId, ScanId};
pub use http::HttpTransport;
pub use transport::Transport;

#[cfg(test)]
pub use transport::MockTransport;
