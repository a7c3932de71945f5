//! High-level SDK for the Vigil scanning client.
//!
//! Wraps `vigil-core` behind a builder-configured [`VigilClient`] with a
//! single entry point per scan:
//!
//! ```no_run
//! use vigil_sdk::{ScanConfig, VigilClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VigilClient::builder()
//!     .credentials("client-id", "api-key")
//!     .build()?;
//!
//! let config = ScanConfig::remote_repository("https://github.com/acme/app", "acme-app");
//! let outcome = client.scan(&config).await?;
//!
//! if outcome.has_violations() {
//!     eprintln!("thresholds exceeded: {:?}", outcome.violations());
//! }
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{RunOptions, ScanOutcome, VigilClient, VigilClientBuilder};

// Re-export the core types callers need to configure and inspect scans.
pub use vigil_core::config::{
    FingerprintWrite, PollSettings, ScanConfig, ServerConfig, SourceKind, ThresholdConfig,
};
pub use vigil_core::error::{VigilError, VigilResult};
pub use vigil_core::scan::{ScanReport, ScanResult, ScanStatus, Severity, ThresholdViolation};
