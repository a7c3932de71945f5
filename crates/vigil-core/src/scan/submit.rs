//! Authentication, project resolution and scan submission

use serde_json::json;
use tracing::{debug, info};

use crate::api::types::{
    AuthRequest, ClientTag, ProjectList, ProjectRecord, Session, StartScanResponse, UploadTarget,
};
use crate::api::{Endpoint, ProjectId, ScanId, Transport};
use crate::config::ServerConfig;
use crate::error::{VigilError, VigilResult};
use crate::scan::types::{ProjectHandle, ScanJob, SourceReference};

/// Drives the remote calls that take a run from credentials to a submitted
/// scan job
pub struct ScanSubmitter<'a> {
    transport: &'a dyn Transport,
    server: &'a ServerConfig,
}

impl<'a> ScanSubmitter<'a> {
    pub fn new(transport: &'a dyn Transport, server: &'a ServerConfig) -> Self {
        Self { transport, server }
    }

    /// Exchange configured credentials for a session.
    ///
    /// Cloud-hosted and self-hosted deployments use the same endpoint and
    /// transport; only the client-type tag in the request differs, selected
    /// by comparing the configured base URL against the known cloud base.
    pub async fn login(&self) -> VigilResult<Session> {
        let client_type = if self.server.is_cloud_hosted() {
            ClientTag::Cloud
        } else {
            ClientTag::SelfHosted
        };
        let request = AuthRequest {
            client_id: self.server.client_id.clone(),
            api_key: self.server.api_key.clone(),
            client_type,
        };
        let session = self
            .transport
            .login(&request)
            .await
            .map_err(|e| VigilError::remote("login", e))?;
        debug!(client_type = ?client_type, "authenticated");
        Ok(session)
    }

    /// Resolve a project by name, creating it when absent.
    ///
    /// Read-then-maybe-write with no locking: two concurrent runs resolving
    /// the same missing name may race and create duplicate projects. This is
    /// an accepted limitation of the service API, not silently resolved here.
    pub async fn resolve_project(&self, name: &str) -> VigilResult<ProjectHandle> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VigilError::config("project name must not be empty"));
        }

        let value = self
            .transport
            .get(&Endpoint::Projects.path())
            .await
            .map_err(|e| VigilError::remote("project resolution", e))?;
        let list: ProjectList = serde_json::from_value(value)
            .map_err(|e| VigilError::remote("project resolution", e))?;

        if let Some(existing) = list
            .projects
            .into_iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(name))
        {
            debug!(project_id = %existing.id, name = %existing.name, "project found");
            return Ok(ProjectHandle {
                id: existing.id,
                name: existing.name,
            });
        }

        let value = self
            .transport
            .post(&Endpoint::Projects.path(), json!({ "name": name }))
            .await
            .map_err(|e| VigilError::remote("project creation", e))?;
        let created: ProjectRecord = serde_json::from_value(value)
            .map_err(|e| VigilError::remote("project creation", e))?;
        info!(project_id = %created.id, name = %created.name, "project created");
        Ok(ProjectHandle {
            id: created.id,
            name: created.name,
        })
    }

    /// Start a scan from the given source under the given project.
    ///
    /// Local archives are uploaded to a one-shot target before the start-scan
    /// call; an upload failure aborts the submission so a scan is never
    /// started against a missing upload.
    pub async fn submit(
        &self,
        project: &ProjectHandle,
        source: &SourceReference,
    ) -> VigilResult<ScanJob> {
        let body = match source {
            SourceReference::RemoteRepository { url } => {
                if url.trim().is_empty() {
                    return Err(VigilError::config(
                        "repository URL is required for remote-repository scans",
                    ));
                }
                json!({
                    "sourceType": "repository",
                    "repositoryUrl": url,
                })
            }
            SourceReference::LocalDirectory {
                archive_path,
                file_count,
            } => {
                if *file_count == 0 {
                    return Err(VigilError::skipped(
                        "archive contains no files; nothing to scan",
                    ));
                }
                let upload_url = self.upload_archive(project, archive_path).await?;
                json!({
                    "sourceType": "archive",
                    "uploadUrl": upload_url,
                })
            }
        };

        let value = self
            .transport
            .post(&Endpoint::StartScan { project: &project.id }.path(), body)
            .await
            .map_err(|e| VigilError::remote("scan submission", e))?;
        let response: StartScanResponse = serde_json::from_value(value)
            .map_err(|e| VigilError::remote("scan submission", e))?;

        let raw_id = response
            .scan_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VigilError::remote("scan submission", "unable to obtain scan id"))?;
        let scan_id = ScanId::new(raw_id)?;
        info!(scan_id = %scan_id, project_id = %project.id, "scan submitted");
        Ok(ScanJob::new(scan_id))
    }

    async fn upload_archive(
        &self,
        project: &ProjectHandle,
        archive_path: &std::path::Path,
    ) -> VigilResult<String> {
        let bytes = tokio::fs::read(archive_path).await.map_err(|e| {
            VigilError::Io(format!(
                "failed to read archive {}: {e}",
                archive_path.display()
            ))
        })?;

        let value = self
            .transport
            .post(
                &Endpoint::UploadUrl { project: &project.id }.path(),
                json!({}),
            )
            .await
            .map_err(|e| VigilError::remote("upload URL request", e))?;
        let target: UploadTarget = serde_json::from_value(value)
            .map_err(|e| VigilError::remote("upload URL request", e))?;

        self.transport
            .put_absolute(&target.upload_url, bytes)
            .await
            .map_err(|e| VigilError::remote("archive upload", e))?;
        debug!(upload_url = %target.upload_url, "archive uploaded");
        Ok(target.upload_url)
    }
}
