//! Packages a local directory for upload

use std::path::Path;

use tracing::info;

use crate::error::{VigilError, VigilResult};
use crate::package::archive::{ArchiveBuilder, ArchiveManifest, FileDigest, ZipArchiveBuilder};
use crate::package::filter::PathFilter;
use crate::scan::types::SourceReference;

/// A packaged local directory, ready for upload.
///
/// Owns the temporary archive; dropping this value removes the file.
#[derive(Debug)]
pub struct PackagedSource {
    manifest: ArchiveManifest,
}

impl PackagedSource {
    /// Number of files in the archive
    pub fn file_count(&self) -> usize {
        self.manifest.file_count
    }

    /// Digests of the packaged files
    pub fn digests(&self) -> &[FileDigest] {
        &self.manifest.digests
    }

    /// The source reference to submit
    pub fn source_reference(&self) -> SourceReference {
        SourceReference::LocalDirectory {
            archive_path: self.manifest.archive.path().to_path_buf(),
            file_count: self.manifest.file_count,
        }
    }
}

/// Turns a scan root plus filter into an uploadable archive, or decides
/// there is nothing to scan
pub struct SourcePackager<'a> {
    builder: &'a dyn ArchiveBuilder,
}

impl Default for SourcePackager<'_> {
    fn default() -> Self {
        static DEFAULT_BUILDER: ZipArchiveBuilder = ZipArchiveBuilder;
        Self {
            builder: &DEFAULT_BUILDER,
        }
    }
}

impl<'a> SourcePackager<'a> {
    /// Package with a custom archive builder
    pub fn with_builder(builder: &'a dyn ArchiveBuilder) -> Self {
        Self { builder }
    }

    /// Walk `root`, archive the files accepted by `filter` and return the
    /// packaged source.
    ///
    /// A walk that matches zero files yields [`VigilError::Skipped`]: the run
    /// must stop, but this is "nothing to scan", not a failure. The check
    /// happens here, before any network call.
    pub fn package(&self, root: &Path, filter: &PathFilter) -> VigilResult<PackagedSource> {
        if !root.is_dir() {
            return Err(VigilError::config(format!(
                "source directory {} does not exist",
                root.display()
            )));
        }

        let manifest = self.builder.build(root, filter)?;
        if manifest.file_count == 0 {
            return Err(VigilError::skipped(format!(
                "no files matched the manifest filter under {}",
                root.display()
            )));
        }

        info!(
            root = %root.display(),
            file_count = manifest.file_count,
            "source packaged"
        );
        Ok(PackagedSource { manifest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_empty_directory_is_skipped_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "nothing scannable").unwrap();

        let filter = PathFilter::new("pom.xml", "").unwrap();
        let result = SourcePackager::default().package(dir.path(), &filter);
        assert!(matches!(result, Err(VigilError::Skipped(_))));
    }

    #[test]
    fn packaging_missing_directory_is_a_configuration_error() {
        let filter = PathFilter::new("pom.xml", "").unwrap();
        let result =
            SourcePackager::default().package(Path::new("/does/not/exist"), &filter);
        assert!(matches!(result, Err(VigilError::Config(_))));
    }

    #[test]
    fn packaged_source_reports_count_and_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();

        let filter = PathFilter::new("pom.xml", "").unwrap();
        let packaged = SourcePackager::default().package(dir.path(), &filter).unwrap();
        assert_eq!(packaged.file_count(), 1);
        match packaged.source_reference() {
            SourceReference::LocalDirectory { file_count, archive_path } => {
                assert_eq!(file_count, 1);
                assert!(archive_path.exists());
            }
            other => panic!("unexpected source reference: {other:?}"),
        }
    }
}
