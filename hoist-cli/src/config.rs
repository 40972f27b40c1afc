//! Run configuration resolved from CI action inputs.
//!
//! Every flag also reads the `INPUT_*` environment variable the CI runner
//! sets, so the binary works both standalone and as an action step.

use clap::Args;
use std::path::PathBuf;

/// Inputs controlling what is scanned, rendered, and uploaded.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Directory scanned (non-recursively) for `*.report.json` files.
    #[arg(long, env = "INPUT_REPORTS_PATH", default_value = ".")]
    pub reports_path: PathBuf,
    /// Upload backend: `s3`, `azure`, or anything else to disable uploads.
    #[arg(long, env = "INPUT_UPLOAD_DESTINATION", default_value = "s3")]
    pub upload_destination: String,
    /// Also upload the raw report files (only the literal `true` enables).
    #[arg(long, env = "INPUT_UPLOAD_REPORTS", default_value = "false")]
    pub upload_reports: String,
    /// Comma-separated category labels to render badges for.
    #[arg(long, env = "INPUT_RESULT_CATEGORIES", default_value = "")]
    pub result_categories: String,
    #[command(flatten)]
    pub s3: S3Args,
    #[command(flatten)]
    pub azure: AzureArgs,
}

/// S3 inputs. The prefix applies to destination keys on every backend.
#[derive(Args, Clone, Debug)]
pub struct S3Args {
    /// Bucket receiving the uploads.
    #[arg(long, env = "INPUT_S3_BUCKET_NAME", default_value = "")]
    pub s3_bucket_name: String,
    /// Access key id.
    #[arg(long, env = "INPUT_S3_ACCESS_KEY_ID", default_value = "")]
    pub s3_access_key_id: String,
    /// Secret access key.
    #[arg(long, env = "INPUT_S3_SECRET_ACCESS_KEY", default_value = "")]
    pub s3_secret_access_key: String,
    /// Bucket region, used for both the endpoint and request signatures.
    #[arg(long, env = "INPUT_S3_REGION", default_value = "")]
    pub s3_region: String,
    /// String prepended verbatim to every destination key.
    #[arg(long, env = "INPUT_S3_PREFIX", default_value = "")]
    pub s3_prefix: String,
    /// Path-style endpoint override for S3-compatible stores.
    #[arg(long, env = "INPUT_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,
}

/// Azure blob storage inputs.
#[derive(Args, Clone, Debug)]
pub struct AzureArgs {
    /// Container receiving the uploads.
    #[arg(long, env = "INPUT_AZURE_CONTAINER_NAME", default_value = "")]
    pub azure_container_name: String,
    /// Storage account name.
    #[arg(long, env = "INPUT_AZURE_STORAGE_ACCOUNT_NAME", default_value = "")]
    pub azure_storage_account_name: String,
    /// Base64-encoded storage account key.
    #[arg(long, env = "INPUT_AZURE_STORAGE_ACCOUNT_KEY", default_value = "")]
    pub azure_storage_account_key: String,
    /// Endpoint override for emulators; include the account path segment
    /// when the emulator expects one.
    #[arg(long, env = "INPUT_AZURE_ENDPOINT")]
    pub azure_endpoint: Option<String>,
}

/// Upload backend selected by the `upload-destination` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadDestination {
    /// S3-compatible object storage.
    S3,
    /// Azure-style blob storage.
    Azure,
    /// No uploads; badges are only written locally.
    None,
}

impl UploadDestination {
    /// Parse the raw input value.
    ///
    /// Only the exact strings `s3` and `azure` select a backend. Every other
    /// value, including different casing, silently disables uploads.
    pub fn parse(value: &str) -> Self {
        match value {
            "s3" => UploadDestination::S3,
            "azure" => UploadDestination::Azure,
            _ => UploadDestination::None,
        }
    }
}

/// Connection settings for the S3 uploader.
#[derive(Debug, Clone)]
pub struct S3Settings {
    /// Bucket receiving the uploads.
    pub bucket: String,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Bucket region.
    pub region: String,
    /// Key prefix prepended verbatim.
    pub prefix: String,
    /// Optional path-style endpoint override.
    pub endpoint: Option<String>,
}

/// Connection settings for the Azure uploader.
#[derive(Debug, Clone)]
pub struct AzureSettings {
    /// Container receiving the uploads.
    pub container: String,
    /// Storage account name.
    pub account: String,
    /// Base64-encoded account key.
    pub account_key: String,
    /// Optional endpoint override.
    pub endpoint: Option<String>,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned for report files.
    pub reports_path: PathBuf,
    /// Selected upload backend.
    pub destination: UploadDestination,
    /// Whether raw report files are uploaded after the badges.
    pub upload_reports: bool,
    /// Category labels to render, in input order.
    pub categories: Vec<String>,
    /// S3 settings.
    pub s3: S3Settings,
    /// Azure settings.
    pub azure: AzureSettings,
}

impl RunConfig {
    /// Resolve the configuration from parsed inputs.
    ///
    /// Credentials are not validated here; a missing or wrong credential
    /// surfaces later as a per-file upload failure.
    pub fn resolve(inputs: &InputArgs) -> Self {
        RunConfig {
            reports_path: inputs.reports_path.clone(),
            destination: UploadDestination::parse(&inputs.upload_destination),
            upload_reports: inputs.upload_reports == "true",
            categories: split_categories(&inputs.result_categories),
            s3: S3Settings {
                bucket: inputs.s3.s3_bucket_name.clone(),
                access_key_id: inputs.s3.s3_access_key_id.clone(),
                secret_access_key: inputs.s3.s3_secret_access_key.clone(),
                region: inputs.s3.s3_region.clone(),
                prefix: inputs.s3.s3_prefix.clone(),
                endpoint: inputs.s3.s3_endpoint.clone(),
            },
            azure: AzureSettings {
                container: inputs.azure.azure_container_name.clone(),
                account: inputs.azure.azure_storage_account_name.clone(),
                account_key: inputs.azure.azure_storage_account_key.clone(),
                endpoint: inputs.azure.azure_endpoint.clone(),
            },
        }
    }
}

/// Split the comma-separated category input, trimming whitespace and
/// dropping empty entries.
pub fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}
