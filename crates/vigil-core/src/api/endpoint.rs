//! Typed API endpoints.
//!
//! Remote paths are rendered from validated identifier newtypes instead of
//! ad-hoc string interpolation, so a malformed identifier is rejected when it
//! is constructed rather than silently producing a bad URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VigilError, VigilResult};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a raw identifier
            pub fn new(raw: impl Into<String>) -> VigilResult<Self> {
                let raw = raw.into();
                if raw.is_empty() {
                    return Err(VigilError::config(concat!($label, " must not be empty")));
                }
                if !raw
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                {
                    return Err(VigilError::config(format!(
                        concat!($label, " contains invalid characters: {:?}"),
                        raw
                    )));
                }
                Ok(Self(raw))
            }

            /// The raw identifier string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(
    /// Identifier of a project on the scanning service
    ProjectId,
    "project id"
);
id_newtype!(
    /// Identifier of a scan job, assigned by the service at submission
    ScanId,
    "scan id"
);
id_newtype!(
    /// Identifier of a finished report
    ReportId,
    "report id"
);

/// One remote API endpoint, keyed by the identifiers it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Authentication endpoint
    Login,
    /// Full project collection
    Projects,
    /// One-shot upload URL for a project's source archive
    UploadUrl { project: &'a ProjectId },
    /// Start a scan under a project
    StartScan { project: &'a ProjectId },
    /// Current status of a scan job
    ScanStatus { scan: &'a ScanId },
    /// Report identifier mapped to a finished scan
    ReportMapping { scan: &'a ScanId },
    /// Aggregated report summary
    ReportSummary { report: &'a ReportId },
    /// Ordered findings of a report
    ReportFindings { report: &'a ReportId },
    /// Package inventory of a report
    ReportPackages { report: &'a ReportId },
}

impl Endpoint<'_> {
    /// Render the path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::Login => "auth/login".to_string(),
            Self::Projects => "projects".to_string(),
            Self::UploadUrl { project } => format!("projects/{project}/uploads"),
            Self::StartScan { project } => format!("projects/{project}/scans"),
            Self::ScanStatus { scan } => format!("scans/{scan}/status"),
            Self::ReportMapping { scan } => format!("scans/{scan}/report"),
            Self::ReportSummary { report } => format!("reports/{report}/summary"),
            Self::ReportFindings { report } => format!("reports/{report}/findings"),
            Self::ReportPackages { report } => format!("reports/{report}/packages"),
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
