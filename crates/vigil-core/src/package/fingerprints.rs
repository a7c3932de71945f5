//! Manifest fingerprint persistence

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::FingerprintWrite;
use crate::error::{VigilError, VigilResult};
use crate::package::archive::FileDigest;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintFile<'a> {
    generated_at: chrono::DateTime<Utc>,
    files: &'a [FileDigest],
}

/// Write the packaged-file digests as a JSON fingerprints file.
///
/// Failure handling follows the configured policy: `BestEffort` logs a
/// warning and continues, `Required` fails the run.
pub fn write_fingerprints(
    path: &Path,
    digests: &[FileDigest],
    policy: FingerprintWrite,
) -> VigilResult<()> {
    let contents = serde_json::to_vec_pretty(&FingerprintFile {
        generated_at: Utc::now(),
        files: digests,
    })?;

    match std::fs::write(path, contents) {
        Ok(()) => {
            debug!(path = %path.display(), entries = digests.len(), "fingerprints written");
            Ok(())
        }
        Err(e) => match policy {
            FingerprintWrite::BestEffort => {
                warn!(path = %path.display(), error = %e, "failed to write fingerprints file; continuing");
                Ok(())
            }
            FingerprintWrite::Required => Err(VigilError::Io(format!(
                "failed to write fingerprints file {}: {e}",
                path.display()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest() -> FileDigest {
        FileDigest {
            path: "pom.xml".to_string(),
            sha256: "ab".repeat(32),
        }
    }

    #[test]
    fn writes_digests_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fingerprints.json");
        write_fingerprints(&path, &[digest()], FingerprintWrite::Required).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["files"][0]["path"], "pom.xml");
    }

    #[test]
    fn best_effort_swallows_write_failures() {
        let path = Path::new("/nonexistent-dir/fingerprints.json");
        assert!(write_fingerprints(path, &[digest()], FingerprintWrite::BestEffort).is_ok());
    }

    #[test]
    fn required_escalates_write_failures() {
        let path = Path::new("/nonexistent-dir/fingerprints.json");
        assert!(matches!(
            write_fingerprints(path, &[digest()], FingerprintWrite::Required),
            Err(VigilError::Io(_))
        ));
    }
}
