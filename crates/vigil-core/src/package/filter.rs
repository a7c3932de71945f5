//! Inclusion filter for the directory walk.
//!
//! Built from an extension allow-list and a folder-exclusion list, both
//! comma-separated. Allow-list entries match either a file extension
//! (`csproj`) or a full file name (`pom.xml`); exclusion entries are glob
//! patterns matched against each path component.

use std::path::Path;

use glob::Pattern;

use crate::error::{VigilError, VigilResult};

/// Default dependency manifest allow-list used when the caller configures
/// none.
const DEFAULT_MANIFESTS: &str = "pom.xml,build.gradle,package.json,requirements.txt,\
    Pipfile,pyproject.toml,Gemfile,go.mod,Cargo.toml,composer.json,csproj,packages.config";

/// Decides which files under the scan root are packaged
#[derive(Debug, Clone)]
pub struct PathFilter {
    /// Lowercased extension or file-name entries; empty means match all
    entries: Vec<String>,
    exclusions: Vec<Pattern>,
}

impl PathFilter {
    /// Build a filter from comma-separated allow-list and exclusion strings.
    /// An empty allow-list falls back to the default manifest set.
    pub fn new(extensions: &str, exclude_folders: &str) -> VigilResult<Self> {
        let source = if extensions.trim().is_empty() {
            DEFAULT_MANIFESTS
        } else {
            extensions
        };
        let entries = split_list(source)
            .map(|entry| entry.trim_start_matches("*.").to_ascii_lowercase())
            .collect();
        Ok(Self {
            entries,
            exclusions: parse_exclusions(exclude_folders)?,
        })
    }

    /// Build a filter that includes every file (used with `include_source`)
    pub fn allow_all(exclude_folders: &str) -> VigilResult<Self> {
        Ok(Self {
            entries: Vec::new(),
            exclusions: parse_exclusions(exclude_folders)?,
        })
    }

    /// Whether the given path (relative to the scan root) should be packaged
    pub fn includes(&self, path: &Path) -> bool {
        if self.is_excluded(path) {
            return false;
        }
        if self.entries.is_empty() {
            return true;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let file_name = file_name.to_ascii_lowercase();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        self.entries
            .iter()
            .any(|entry| file_name == *entry || extension.as_deref() == Some(entry))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclusions.iter().any(|pattern| {
            pattern.matches_path(path)
                || path
                    .iter()
                    .filter_map(|component| component.to_str())
                    .any(|component| pattern.matches(component))
        })
    }
}

fn parse_exclusions(exclude_folders: &str) -> VigilResult<Vec<Pattern>> {
    split_list(exclude_folders)
        .map(|entry| {
            Pattern::new(entry)
                .map_err(|e| VigilError::config(format!("invalid exclusion pattern {entry:?}: {e}")))
        })
        .collect()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn matches_full_file_names_and_extensions() {
        let filter = PathFilter::new("pom.xml,csproj", "").unwrap();
        assert!(filter.includes(&PathBuf::from("module/pom.xml")));
        assert!(filter.includes(&PathBuf::from("App/App.csproj")));
        assert!(!filter.includes(&PathBuf::from("src/main.rs")));
    }

    #[test]
    fn excluded_folders_are_skipped() {
        let filter = PathFilter::new("package.json", "node_modules,dist").unwrap();
        assert!(filter.includes(&PathBuf::from("package.json")));
        assert!(!filter.includes(&PathBuf::from("node_modules/left-pad/package.json")));
        assert!(!filter.includes(&PathBuf::from("dist/package.json")));
    }

    #[test]
    fn exclusion_patterns_support_globs() {
        let filter = PathFilter::new("package.json", "test*").unwrap();
        assert!(!filter.includes(&PathBuf::from("tests/fixtures/package.json")));
    }

    #[test]
    fn allow_all_still_honors_exclusions() {
        let filter = PathFilter::allow_all("target").unwrap();
        assert!(filter.includes(&PathBuf::from("src/lib.rs")));
        assert!(!filter.includes(&PathBuf::from("target/debug/build.log")));
    }

    #[test]
    fn empty_allow_list_falls_back_to_manifest_defaults() {
        let filter = PathFilter::new("", "").unwrap();
        assert!(filter.includes(&PathBuf::from("go.mod")));
        assert!(!filter.includes(&PathBuf::from("README.md")));
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        assert!(matches!(
            PathFilter::new("pom.xml", "[oops"),
            Err(VigilError::Config(_))
        ));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = PathFilter::new("POM.XML,CsProj", "").unwrap();
        assert!(filter.includes(&PathBuf::from("pom.xml")));
        assert!(filter.includes(&PathBuf::from("app.CSPROJ")));
    }
}
