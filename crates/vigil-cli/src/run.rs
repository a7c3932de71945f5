//! Builds the client and scan configuration from flags, environment and the
//! config file, then drives one scan

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::{error, warn};
use vigil_sdk::{
    FingerprintWrite, RunOptions, ScanConfig, ThresholdConfig, VigilClient, VigilError,
};

use crate::args::{ScanArgs, SourceKindArg};
use crate::file_config::FileConfig;
use crate::render::print_outcome;

/// Exit code when thresholds were exceeded
const EXIT_VIOLATIONS: u8 = 1;
/// Exit code when there was nothing to scan
const EXIT_SKIPPED: u8 = 2;
/// Exit code for any other failure
const EXIT_ERROR: u8 = 3;

pub async fn scan(args: ScanArgs) -> ExitCode {
    match try_scan(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn try_scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let file = FileConfig::load(&args.config)?;
    let client = build_client(&args, &file)?;
    let config = build_scan_config(&args, &file);

    let options = RunOptions::new();
    let cancel = options.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, aborting scan");
            cancel.cancel();
        }
    });

    match client.scan_with_options(&config, options).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            if outcome.has_violations() {
                Ok(ExitCode::from(EXIT_VIOLATIONS))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Err(VigilError::Skipped(reason)) => {
            println!("nothing to scan: {reason}");
            Ok(ExitCode::from(EXIT_SKIPPED))
        }
        Err(VigilError::Cancelled) => {
            eprintln!("scan aborted");
            Ok(ExitCode::from(EXIT_ERROR))
        }
        Err(e) => Err(e).context("scan failed"),
    }
}

fn build_client(args: &ScanArgs, file: &FileConfig) -> anyhow::Result<VigilClient> {
    let client_id = args
        .client_id
        .clone()
        .or_else(|| file.server.client_id.clone());
    let api_key = args.api_key.clone().or_else(|| file.server.api_key.clone());
    let (Some(client_id), Some(api_key)) = (client_id, api_key) else {
        bail!(
            "credentials missing: set --client-id/--api-key, VIGIL_CLIENT_ID/VIGIL_API_KEY \
             or the [server] section of vigil.toml"
        );
    };

    let mut builder = VigilClient::builder().credentials(client_id, api_key);
    if let Some(url) = args
        .api_url
        .clone()
        .or_else(|| file.server.api_base_url.clone())
    {
        builder = builder.api_base_url(url);
    }
    if let Some(url) = args
        .web_url
        .clone()
        .or_else(|| file.server.web_app_base_url.clone())
    {
        builder = builder.web_app_base_url(url);
    }
    if let Some(secs) = args.poll_interval.or(file.poll.interval) {
        builder = builder.poll_interval(Duration::from_secs(secs));
    }
    if let Some(secs) = args.max_wait.or(file.poll.max_wait) {
        builder = builder.max_wait(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

fn build_scan_config(args: &ScanArgs, file: &FileConfig) -> ScanConfig {
    let mut config = match args.kind {
        SourceKindArg::Remote => ScanConfig::remote_repository(&args.source, &args.project),
        SourceKindArg::Local => ScanConfig::local_directory(&args.source, &args.project),
    };

    if args.async_mode {
        config = config.with_async_mode();
    }
    if args.fail_on_high.is_some() || args.fail_on_medium.is_some() || args.fail_on_low.is_some() {
        config = config.with_thresholds(ThresholdConfig::ceilings(
            args.fail_on_high.unwrap_or(u32::MAX),
            args.fail_on_medium.unwrap_or(u32::MAX),
            args.fail_on_low.unwrap_or(u32::MAX),
        ));
    }
    if let Some(extensions) = args.extensions.clone().or_else(|| file.scan.extensions.clone()) {
        config = config.with_file_extensions(extensions);
    }
    if let Some(exclude) = args.exclude.clone().or_else(|| file.scan.exclude.clone()) {
        config = config.with_exclude_folders(exclude);
    }
    if let Some(path) = &args.fingerprints {
        config = config.with_fingerprints_path(path);
        if args.require_fingerprints {
            config = config.with_fingerprint_write(FingerprintWrite::Required);
        }
    }
    if args.include_source {
        config = config.with_include_source();
    }
    config
}
