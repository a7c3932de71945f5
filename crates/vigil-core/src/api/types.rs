//! Wire records exchanged with the scanning service.
//!
//! Every payload is an explicit serde struct; unexpected shapes fail
//! deserialization instead of being accessed field-by-field out of untyped
//! JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::endpoint::{ProjectId, ReportId};
use crate::scan::types::{ScanStatus, SeverityCounts};

/// Client-type tag sent during authentication. Cloud and self-hosted
/// deployments share the transport; only this tag differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientTag {
    Cloud,
    SelfHosted,
}

/// Credentials exchanged for a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub client_id: String,
    pub api_key: String,
    pub client_type: ClientTag,
}

/// Session returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// One project as listed by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
}

/// Response to the project collection fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectList {
    pub projects: Vec<ProjectRecord>,
}

/// One-shot upload target for a source archive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
}

/// Response to the start-scan call. The scan id is optional on the wire;
/// its absence is escalated to a hard failure by the submitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartScanResponse {
    #[serde(default)]
    pub scan_id: Option<String>,
}

/// Response to a status poll
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatusResponse {
    pub status: ScanStatus,
}

/// Report identifier mapped to a finished scan. Optional on the wire; a
/// missing mapping is a hard retrieval failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMapping {
    #[serde(default)]
    pub report_id: Option<String>,
}

/// Aggregated report summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub report_id: ReportId,
    pub created_at: DateTime<Utc>,
    pub high_count: u32,
    pub medium_count: u32,
    pub low_count: u32,
    pub total_packages: u32,
    pub outdated_packages: u32,
    pub risk_score: f64,
}

impl ReportSummary {
    /// Per-severity finding counts, in the shape the threshold evaluator
    /// consumes
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts {
            high: self.high_count,
            medium: self.medium_count,
            low: self.low_count,
        }
    }
}

/// One vulnerability finding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: String,
    pub package_name: String,
    #[serde(default)]
    pub cve: Option<String>,
}

/// Wrapper around the ordered findings list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingList {
    pub findings: Vec<Finding>,
}

/// One package in the report inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub outdated: bool,
}

/// Wrapper around the ordered package inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageList {
    pub packages: Vec<PackageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_parses_camel_case_payload() {
        let payload = json!({
            "reportId": "r-81",
            "createdAt": "2026-08-20T10:30:00Z",
            "highCount": 3,
            "mediumCount": 8,
            "lowCount": 4,
            "totalPackages": 120,
            "outdatedPackages": 17,
            "riskScore": 7.4
        });
        let summary: ReportSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(summary.report_id.as_str(), "r-81");
        let counts = summary.severity_counts();
        assert_eq!((counts.high, counts.medium, counts.low), (3, 8, 4));
    }

    #[test]
    fn summary_rejects_missing_fields() {
        let payload = json!({ "reportId": "r-81" });
        assert!(serde_json::from_value::<ReportSummary>(payload).is_err());
    }

    #[test]
    fn client_tag_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(ClientTag::SelfHosted).unwrap(),
            json!("selfHosted")
        );
    }
}
