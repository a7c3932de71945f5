//! Report retrieval for a finished scan

use tracing::{debug, warn};

use crate::api::types::{FindingList, PackageList, ReportMapping, ReportSummary};
use crate::api::{Endpoint, ReportId, Transport};
use crate::error::{VigilError, VigilResult};
use crate::scan::types::{ProjectHandle, ScanJob, ScanReport};

const STEP: &str = "report retrieval";

/// Fetches and assembles the structured report of a finished scan.
///
/// Summary, findings and packages are three independent calls keyed by the
/// report id; all three must succeed. Partial data is never returned as a
/// degraded report.
pub struct ResultRetriever<'a> {
    transport: &'a dyn Transport,
    web_app_base_url: Option<&'a str>,
}

impl<'a> ResultRetriever<'a> {
    pub fn new(transport: &'a dyn Transport, web_app_base_url: Option<&'a str>) -> Self {
        Self {
            transport,
            web_app_base_url,
        }
    }

    /// Retrieve the report for a completed job
    pub async fn retrieve(
        &self,
        project: &ProjectHandle,
        job: &ScanJob,
    ) -> VigilResult<ScanReport> {
        let report_id = self.resolve_report_id(job).await?;

        let summary: ReportSummary = self
            .fetch(&Endpoint::ReportSummary { report: &report_id })
            .await?;
        let findings: FindingList = self
            .fetch(&Endpoint::ReportFindings { report: &report_id })
            .await?;
        let packages: PackageList = self
            .fetch(&Endpoint::ReportPackages { report: &report_id })
            .await?;

        let web_link = self.web_link(project, &report_id);
        debug!(report_id = %report_id, findings = findings.findings.len(), "report retrieved");

        Ok(ScanReport {
            summary,
            findings: findings.findings,
            packages: packages.packages,
            web_link,
        })
    }

    async fn resolve_report_id(&self, job: &ScanJob) -> VigilResult<ReportId> {
        let mapping: ReportMapping = self
            .fetch(&Endpoint::ReportMapping { scan: job.id() })
            .await?;
        let raw = mapping
            .report_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                VigilError::remote(STEP, format!("no report mapped to scan {}", job.id()))
            })?;
        ReportId::new(raw)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, endpoint: &Endpoint<'_>) -> VigilResult<T> {
        let value = self
            .transport
            .get(&endpoint.path())
            .await
            .map_err(|e| VigilError::remote(STEP, e))?;
        serde_json::from_value(value).map_err(|e| VigilError::remote(STEP, e))
    }

    /// Build the web application link for the report.
    ///
    /// Degrades to an empty string with a logged warning when the web base
    /// URL is not configured; this never fails the retrieval.
    fn web_link(&self, project: &ProjectHandle, report: &ReportId) -> String {
        match self.web_app_base_url {
            Some(base) if !base.trim().is_empty() => format!(
                "{}/projects/{}/reports/{}",
                base.trim_end_matches('/'),
                project.id,
                report
            ),
            _ => {
                warn!("web_app_base_url not configured; report link unavailable");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockTransport, ProjectId, ScanId};
    use mockall::predicate::eq;
    use serde_json::json;

    fn handle() -> ProjectHandle {
        ProjectHandle {
            id: ProjectId::new("p-1").unwrap(),
            name: "acme-app".to_string(),
        }
    }

    fn job() -> ScanJob {
        ScanJob::new(ScanId::new("s-1").unwrap())
    }

    fn summary_json() -> serde_json::Value {
        json!({
            "reportId": "r-3",
            "createdAt": "2026-08-20T10:30:00Z",
            "highCount": 1,
            "mediumCount": 2,
            "lowCount": 3,
            "totalPackages": 40,
            "outdatedPackages": 5,
            "riskScore": 4.2
        })
    }

    fn full_transport() -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("scans/s-1/report"))
            .returning(|_| Ok(json!({ "reportId": "r-3" })));
        transport
            .expect_get()
            .with(eq("reports/r-3/summary"))
            .returning(|_| Ok(summary_json()));
        transport
            .expect_get()
            .with(eq("reports/r-3/findings"))
            .returning(|_| {
                Ok(json!({
                    "findings": [
                        { "id": "f-1", "title": "Outdated TLS", "severity": "high",
                          "packageName": "openssl", "cve": "CVE-2026-0001" }
                    ]
                }))
            });
        transport
            .expect_get()
            .with(eq("reports/r-3/packages"))
            .returning(|_| {
                Ok(json!({
                    "packages": [
                        { "name": "openssl", "version": "1.0.2", "outdated": true }
                    ]
                }))
            });
        transport
    }

    #[tokio::test]
    async fn assembles_report_with_web_link() {
        let transport = full_transport();
        let retriever = ResultRetriever::new(&transport, Some("https://app.vigilsec.io/"));
        let report = retriever.retrieve(&handle(), &job()).await.unwrap();

        assert_eq!(report.summary.report_id.as_str(), "r-3");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.packages.len(), 1);
        assert_eq!(
            report.web_link,
            "https://app.vigilsec.io/projects/p-1/reports/r-3"
        );
    }

    #[tokio::test]
    async fn missing_web_base_degrades_to_empty_link() {
        let transport = full_transport();
        let retriever = ResultRetriever::new(&transport, None);
        let report = retriever.retrieve(&handle(), &job()).await.unwrap();
        assert_eq!(report.web_link, "");
    }

    #[tokio::test]
    async fn missing_report_mapping_is_a_hard_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("scans/s-1/report"))
            .returning(|_| Ok(json!({})));

        let retriever = ResultRetriever::new(&transport, None);
        let result = retriever.retrieve(&handle(), &job()).await;
        match result {
            Err(VigilError::Remote { step, message }) => {
                assert_eq!(step, STEP);
                assert!(message.contains("no report mapped"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn partial_data_is_not_a_valid_report() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("scans/s-1/report"))
            .returning(|_| Ok(json!({ "reportId": "r-3" })));
        transport
            .expect_get()
            .with(eq("reports/r-3/summary"))
            .returning(|_| Ok(summary_json()));
        transport
            .expect_get()
            .with(eq("reports/r-3/findings"))
            .returning(|_| Err(VigilError::Http("502 bad gateway".into())));

        let retriever = ResultRetriever::new(&transport, None);
        let result = retriever.retrieve(&handle(), &job()).await;
        assert!(matches!(result, Err(VigilError::Remote { .. })));
    }
}
