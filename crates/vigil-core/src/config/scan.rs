//! Per-run scan configuration and validation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ThresholdConfig;
use crate::error::{VigilError, VigilResult};

/// Where the source to scan lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A repository URL the service clones itself
    RemoteRepository,
    /// A local directory zipped and uploaded by the client
    LocalDirectory,
}

/// Policy for fingerprint file persistence failures.
///
/// The original client silently ignored fingerprint write errors; the default
/// keeps that behavior observable by logging a warning, and `Required` makes
/// the failure fatal for callers that depend on the fingerprints file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintWrite {
    /// Log a warning and continue when the write fails
    #[default]
    BestEffort,
    /// Fail the run when the write fails
    Required,
}

/// Configuration for a single scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Repository URL or local directory path, depending on `source_kind`
    pub source_location: String,
    /// Which submission strategy to use
    pub source_kind: SourceKind,
    /// Project name resolved (or created) on the service
    pub project_name: String,
    /// When true, wait for completion and embed the report in the result;
    /// when false, return right after submission
    #[serde(default = "default_sync_mode")]
    pub sync_mode: bool,
    /// Severity threshold ceilings applied to the finished report
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    /// Comma-separated dependency manifest extension allow-list, e.g.
    /// `"pom.xml,csproj,package.json"`. Empty means the packager default.
    #[serde(default)]
    pub file_extensions: String,
    /// Comma-separated folder-exclusion patterns, e.g. `"node_modules,target"`
    #[serde(default)]
    pub exclude_folders: String,
    /// Where to persist manifest fingerprints; mutually exclusive with
    /// `include_source`
    #[serde(default)]
    pub fingerprints_path: Option<PathBuf>,
    /// Package the whole tree rather than just dependency manifests
    #[serde(default)]
    pub include_source: bool,
    /// What to do when the fingerprints file cannot be written
    #[serde(default)]
    pub fingerprint_write: FingerprintWrite,
}

fn default_sync_mode() -> bool {
    true
}

impl ScanConfig {
    /// Scan a remote repository by URL
    pub fn remote_repository(url: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self::new(url, SourceKind::RemoteRepository, project_name)
    }

    /// Scan a local directory
    pub fn local_directory(path: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self::new(path, SourceKind::LocalDirectory, project_name)
    }

    fn new(location: impl Into<String>, kind: SourceKind, project_name: impl Into<String>) -> Self {
        Self {
            source_location: location.into(),
            source_kind: kind,
            project_name: project_name.into(),
            sync_mode: true,
            thresholds: ThresholdConfig::default(),
            file_extensions: String::new(),
            exclude_folders: String::new(),
            fingerprints_path: None,
            include_source: false,
            fingerprint_write: FingerprintWrite::default(),
        }
    }

    /// Set async submission mode (return without waiting for completion)
    pub fn with_async_mode(mut self) -> Self {
        self.sync_mode = false;
        self
    }

    /// Set severity thresholds
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the manifest extension allow-list
    pub fn with_file_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.file_extensions = extensions.into();
        self
    }

    /// Set folder-exclusion patterns
    pub fn with_exclude_folders(mut self, folders: impl Into<String>) -> Self {
        self.exclude_folders = folders.into();
        self
    }

    /// Persist manifest fingerprints to the given path
    pub fn with_fingerprints_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fingerprints_path = Some(path.into());
        self
    }

    /// Package the full source tree instead of manifests only
    pub fn with_include_source(mut self) -> Self {
        self.include_source = true;
        self
    }

    /// Set the fingerprint persistence failure policy
    pub fn with_fingerprint_write(mut self, policy: FingerprintWrite) -> Self {
        self.fingerprint_write = policy;
        self
    }

    /// Validate the configuration. Runs before any network call; every
    /// rejection here is a [`VigilError::Config`].
    pub fn validate(&self) -> VigilResult<()> {
        if self.project_name.trim().is_empty() {
            return Err(VigilError::config("project name must not be empty"));
        }
        if self.include_source && self.fingerprints_path.is_some() {
            return Err(VigilError::config(
                "include_source and fingerprints_path are mutually exclusive",
            ));
        }
        if self.source_kind == SourceKind::RemoteRepository
            && self.source_location.trim().is_empty()
        {
            return Err(VigilError::config(
                "repository URL is required for remote-repository scans",
            ));
        }
        Ok(())
    }
}
