//! Local-source packaging: path filtering, archive creation and manifest
//! fingerprints

mod archive;
mod filter;
mod fingerprints;
mod packager;

pub use archive::{ArchiveBuilder, ArchiveManifest, FileDigest, TempArchive, ZipArchiveBuilder};
pub use filter::PathFilter;
pub use fingerprints::write_fingerprints;
pub use packager::{PackagedSource, SourcePackager};
