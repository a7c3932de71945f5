//! `vigil.toml` loading

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Optional configuration file merged under CLI flags and environment
/// variables
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub poll: PollSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub client_id: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub web_app_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSection {
    pub extensions: Option<String>,
    pub exclude: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    /// Seconds between polls
    pub interval: Option<u64>,
    /// Maximum seconds to wait for completion
    pub max_wait: Option<u64>,
}

impl FileConfig {
    /// Load the config file when it exists; a missing file yields defaults
    /// so the CLI works from flags and environment alone.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = FileConfig::load(Path::new("/nonexistent/vigil.toml")).unwrap();
        assert!(config.server.client_id.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(
            &path,
            r#"
[server]
client_id = "client-1"
api_key = "key-1"
web_app_base_url = "https://app.vigilsec.io"

[scan]
extensions = "pom.xml,csproj"
exclude = "node_modules"

[poll]
interval = 10
max_wait = 1800
"#,
        )
        .unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.server.client_id.as_deref(), Some("client-1"));
        assert_eq!(config.scan.exclude.as_deref(), Some("node_modules"));
        assert_eq!(config.poll.interval, Some(10));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(&path, "[server]\nclient_secret = \"oops\"\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
