//! Archive creation for local-directory scans

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{VigilError, VigilResult};
use crate::package::filter::PathFilter;

/// SHA-256 digest of one packaged file, recorded for fingerprint persistence
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileDigest {
    /// Path relative to the scan root, with forward slashes
    pub path: String,
    pub sha256: String,
}

/// A temporary archive file removed on drop.
///
/// Owning this guard for the duration of a run guarantees the file is
/// cleaned up on every exit path, including early errors.
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the archive on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary archive");
            }
        }
    }
}

/// What the archive builder produced
#[derive(Debug)]
pub struct ArchiveManifest {
    /// The archive, owned as a self-cleaning temp file
    pub archive: TempArchive,
    /// How many files were included
    pub file_count: usize,
    /// Digests of the included files, in walk order
    pub digests: Vec<FileDigest>,
}

/// Turns a directory into an uploadable archive given an inclusion filter
pub trait ArchiveBuilder: Send + Sync {
    /// Walk `root`, include files accepted by `filter` and write them into a
    /// compressed archive at a unique temporary path
    fn build(&self, root: &Path, filter: &PathFilter) -> VigilResult<ArchiveManifest>;
}

/// Default [`ArchiveBuilder`]: a deflate-compressed zip in the system temp
/// directory, named uniquely per invocation so concurrent runs in the same
/// process never collide.
#[derive(Debug, Default)]
pub struct ZipArchiveBuilder;

impl ArchiveBuilder for ZipArchiveBuilder {
    fn build(&self, root: &Path, filter: &PathFilter) -> VigilResult<ArchiveManifest> {
        let archive_path = std::env::temp_dir().join(format!("vigil-scan-{}.zip", Uuid::new_v4()));
        let file = File::create(&archive_path)
            .map_err(|e| VigilError::Io(format!("failed to create archive file: {e}")))?;
        // Guard is created before the first write so a failed walk still
        // cleans up the empty file.
        let archive = TempArchive::new(archive_path);

        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut file_count = 0usize;
        let mut digests = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| VigilError::Io(format!("directory walk failed: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| VigilError::Io(format!("path outside scan root: {e}")))?;
            if !filter.includes(relative) {
                continue;
            }

            let bytes = std::fs::read(entry.path()).map_err(|e| {
                VigilError::Io(format!("failed to read {}: {e}", entry.path().display()))
            })?;
            let name = zip_entry_name(relative);
            writer.start_file(name.clone(), options)?;
            writer.write_all(&bytes)?;
            digests.push(FileDigest {
                path: name,
                sha256: format!("{:x}", Sha256::digest(&bytes)),
            });
            file_count += 1;
        }

        writer.finish()?;
        debug!(
            archive = %archive.path().display(),
            file_count,
            "source archive written"
        );

        Ok(ArchiveManifest {
            archive,
            file_count,
            digests,
        })
    }
}

fn zip_entry_name(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}
