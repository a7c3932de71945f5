//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Vigil - client for the Vigil composition-analysis scanning service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a scan and wait for the report
    Scan(ScanArgs),
}

/// Source submission strategy
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceKindArg {
    /// The service clones a repository URL itself
    Remote,
    /// Zip and upload a local directory
    Local,
}

#[derive(Debug, clap::Args)]
pub struct ScanArgs {
    /// Repository URL (remote) or directory path (local)
    pub source: String,

    /// Project name on the service; created when absent
    #[arg(long, short)]
    pub project: String,

    /// Where the source lives
    #[arg(long, value_enum, default_value = "local")]
    pub kind: SourceKindArg,

    /// Submit and exit without waiting for completion
    #[arg(long = "async")]
    pub async_mode: bool,

    /// Fail when high-severity findings exceed this ceiling
    #[arg(long)]
    pub fail_on_high: Option<u32>,

    /// Fail when medium-severity findings exceed this ceiling
    #[arg(long)]
    pub fail_on_medium: Option<u32>,

    /// Fail when low-severity findings exceed this ceiling
    #[arg(long)]
    pub fail_on_low: Option<u32>,

    /// Comma-separated manifest extension allow-list
    #[arg(long)]
    pub extensions: Option<String>,

    /// Comma-separated folder-exclusion patterns
    #[arg(long)]
    pub exclude: Option<String>,

    /// Write manifest fingerprints to this path
    #[arg(long, conflicts_with = "include_source")]
    pub fingerprints: Option<PathBuf>,

    /// Package the whole source tree, not just manifests
    #[arg(long)]
    pub include_source: bool,

    /// Fail the run when the fingerprints file cannot be written
    #[arg(long, requires = "fingerprints")]
    pub require_fingerprints: bool,

    /// Path to a vigil.toml configuration file
    #[arg(long, default_value = "vigil.toml")]
    pub config: PathBuf,

    /// Client identifier (overrides the config file)
    #[arg(long, env = "VIGIL_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API key (overrides the config file)
    #[arg(long, env = "VIGIL_API_KEY")]
    pub api_key: Option<String>,

    /// API base URL for self-hosted deployments
    #[arg(long, env = "VIGIL_API_URL")]
    pub api_url: Option<String>,

    /// Web application base URL used for report links
    #[arg(long, env = "VIGIL_WEB_URL")]
    pub web_url: Option<String>,

    /// Seconds between status polls
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Maximum seconds to wait for scan completion
    #[arg(long)]
    pub max_wait: Option<u64>,
}
