#![deny(missing_docs)]
//! Hoist: score badges for performance-audit reports.
//!
//! Scans a directory for `*.report.json` files, renders an SVG badge per
//! configured category next to each report, and optionally uploads badges
//! and raw reports to S3-compatible or Azure-style blob storage. Meant to
//! run as a single CI step.

mod config;
mod outputs;
mod sign;
mod uploader;

use std::path::Path;

use clap::Parser;

use config::{InputArgs, RunConfig};
use hoist_core::{
    ReportFile, StdFileSystem, Tier, badge_file_name, badge_key, load_reports, percentage,
    render_badge, report_key, status_text, url_path,
};
use uploader::{
    JSON_CONTENT_TYPE, SVG_CONTENT_TYPE, Uploader, build_uploader, upload_failure_line,
    upload_success_line,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Command-line entry point.
#[cfg_attr(test, allow(dead_code))]
#[derive(Parser)]
#[command(name = "hoist", version, about = "Score badges for performance-audit reports")]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,
}

/// Overall outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    /// Every attempted step succeeded.
    Success,
    /// At least one upload failed; the failures are already logged.
    Failed,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = RunConfig::resolve(&cli.inputs);

    match run(&config).await {
        Ok(RunStatus::Success) => {}
        Ok(RunStatus::Failed) => std::process::exit(1),
        Err(err) => {
            log::error!("Action failed with error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
fn main() {}

/// Run the pipeline with the uploader selected by the configuration.
#[cfg_attr(test, allow(dead_code))]
async fn run(config: &RunConfig) -> CliResult<RunStatus> {
    let uploader = build_uploader(config);
    run_pipeline(config, uploader.as_deref()).await
}

/// Load the reports, then render and upload badges for each of them.
///
/// Upload failures mark the run failed but never stop the loop; anything
/// else propagates and aborts the run.
async fn run_pipeline(
    config: &RunConfig,
    uploader: Option<&(dyn Uploader + Send + Sync)>,
) -> CliResult<RunStatus> {
    let fs = StdFileSystem::new();
    let batch = load_reports(&fs, &config.reports_path)?;
    for name in &batch.invalid {
        log::warn!("invalid file {name}");
    }
    if batch.is_empty() {
        log::warn!("no reports found");
        return Ok(RunStatus::Success);
    }

    let mut status = RunStatus::Success;
    for report in &batch.reports {
        process_report(config, uploader, report, &mut status).await?;
    }
    Ok(status)
}

/// Render, write, and upload the badges for one report, then optionally
/// upload the raw report itself.
async fn process_report(
    config: &RunConfig,
    uploader: Option<&(dyn Uploader + Send + Sync)>,
    report: &ReportFile,
    status: &mut RunStatus,
) -> CliResult<()> {
    let destination_path = url_path(report.final_url.as_deref());

    for label in &config.categories {
        let pct = percentage(&report.categories, label);
        let badge = render_badge(label, &status_text(pct), Tier::from_percentage(pct))?;
        let badge_path = report
            .path
            .with_file_name(badge_file_name(&report.file_name, label));
        tokio::fs::write(&badge_path, badge.as_bytes()).await?;

        if let Some(uploader) = uploader {
            let key = badge_key(&config.s3.prefix, &destination_path, label);
            attempt_upload(uploader, &badge_path, &key, SVG_CONTENT_TYPE, status).await?;
        }
    }

    if config.upload_reports {
        if let Some(uploader) = uploader {
            let key = report_key(&config.s3.prefix, &destination_path);
            attempt_upload(uploader, &report.path, &key, JSON_CONTENT_TYPE, status).await?;
        }
    }
    Ok(())
}

/// Attempt one upload. Success records the URL as an output; failure logs
/// and downgrades the run status.
async fn attempt_upload(
    uploader: &(dyn Uploader + Send + Sync),
    local_path: &Path,
    key: &str,
    content_type: &str,
    status: &mut RunStatus,
) -> CliResult<()> {
    match uploader.upload(local_path, key, content_type).await {
        Ok(url) => {
            log::info!("{}", upload_success_line(uploader.backend(), key, &url));
            outputs::set_output(uploader.output_name(), &url)?;
        }
        Err(err) => {
            log::error!("{}", upload_failure_line(uploader.backend(), key, &err));
            *status = RunStatus::Failed;
        }
    }
    Ok(())
}
