//! Upload backends for badges and raw reports.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;

use crate::config::{AzureSettings, RunConfig, S3Settings, UploadDestination};
use crate::sign::{self, AzurePutRequest, S3PutRequest};

/// Content type for badge uploads.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
/// Content type for raw report uploads.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Error raised by a failed upload attempt.
#[derive(Debug, Clone)]
pub struct UploadError {
    message: String,
}

impl UploadError {
    /// Create an upload error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        UploadError {
            message: message.into(),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UploadError {}

/// Result of one upload attempt, carrying the object URL on success.
pub type UploadResult = Result<String, UploadError>;

/// A storage backend that stores local files under destination keys.
pub trait Uploader {
    /// Backend label used in log lines.
    fn backend(&self) -> &'static str;

    /// Name of the output that records the last successful upload URL.
    fn output_name(&self) -> &'static str;

    /// Upload the file at `local_path` under `key`, returning its URL.
    fn upload<'a>(
        &'a self,
        local_path: &'a Path,
        key: &'a str,
        content_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = UploadResult> + Send + 'a>>;
}

/// Select the uploader for the configured destination, if any.
pub fn build_uploader(config: &RunConfig) -> Option<Arc<dyn Uploader + Send + Sync>> {
    match config.destination {
        UploadDestination::S3 => Some(Arc::new(S3Uploader::new(config.s3.clone()))),
        UploadDestination::Azure => Some(Arc::new(AzureUploader::new(config.azure.clone()))),
        UploadDestination::None => None,
    }
}

/// Log line for a successful upload.
pub fn upload_success_line(backend: &str, key: &str, url: &str) -> String {
    format!("Uploaded {key} to {backend}: {url}")
}

/// Log line for a failed upload.
pub fn upload_failure_line(backend: &str, key: &str, error: &UploadError) -> String {
    format!("Failed to upload {key} to {backend}: {error}")
}

/// Uploader for S3-compatible object storage, using SigV4-signed `PUT`s.
#[derive(Debug, Clone)]
pub struct S3Uploader {
    settings: S3Settings,
    client: Client,
}

impl S3Uploader {
    /// Build an uploader from resolved S3 settings.
    pub fn new(settings: S3Settings) -> Self {
        S3Uploader {
            settings,
            client: Client::new(),
        }
    }

    /// Object URL for a key: path-style under an endpoint override,
    /// virtual-hosted against AWS otherwise.
    fn object_url(&self, key: &str) -> String {
        let encoded = encode_key(key);
        match &self.settings.endpoint {
            Some(endpoint) => format!(
                "{}/{}/{encoded}",
                endpoint.trim_end_matches('/'),
                self.settings.bucket
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{encoded}",
                self.settings.bucket, self.settings.region
            ),
        }
    }

    async fn put_object(&self, local_path: &Path, key: &str, content_type: &str) -> UploadResult {
        let payload = read_payload(local_path).await?;
        let url = self.object_url(key);
        let parsed = reqwest::Url::parse(&url)
            .map_err(|err| UploadError::new(format!("invalid object url {url}: {err}")))?;
        let host = host_header(&parsed)?;
        let signed = sign::sign_s3_put(
            &S3PutRequest {
                access_key_id: &self.settings.access_key_id,
                secret_access_key: &self.settings.secret_access_key,
                region: &self.settings.region,
                host: &host,
                canonical_uri: parsed.path(),
                content_type,
                payload: &payload,
            },
            Utc::now(),
        );

        let response = self
            .client
            .put(parsed)
            .header("content-type", content_type)
            .header("x-amz-acl", sign::S3_ACL)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("x-amz-date", &signed.amz_date)
            .header("authorization", &signed.authorization)
            .body(payload)
            .send()
            .await
            .map_err(|err| UploadError::new(format!("s3 request failed: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::new(format!("s3 api error ({status}): {body}")));
        }
        Ok(url)
    }
}

impl Uploader for S3Uploader {
    fn backend(&self) -> &'static str {
        "S3"
    }

    fn output_name(&self) -> &'static str {
        "s3-url"
    }

    fn upload<'a>(
        &'a self,
        local_path: &'a Path,
        key: &'a str,
        content_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = UploadResult> + Send + 'a>> {
        Box::pin(self.put_object(local_path, key, content_type))
    }
}

/// Uploader for Azure-style blob storage, using SharedKey-authorized
/// Put Blob requests.
///
/// Blob names come from the local file's base name; the destination key is
/// accepted for interface parity and logging but has never influenced the
/// blob name.
#[derive(Debug, Clone)]
pub struct AzureUploader {
    settings: AzureSettings,
    client: Client,
}

impl AzureUploader {
    /// Build an uploader from resolved Azure settings.
    pub fn new(settings: AzureSettings) -> Self {
        AzureUploader {
            settings,
            client: Client::new(),
        }
    }

    fn blob_url(&self, blob: &str) -> String {
        let encoded = urlencoding::encode(blob);
        match &self.settings.endpoint {
            Some(endpoint) => format!(
                "{}/{}/{encoded}",
                endpoint.trim_end_matches('/'),
                self.settings.container
            ),
            None => format!(
                "https://{}.blob.core.windows.net/{}/{encoded}",
                self.settings.account, self.settings.container
            ),
        }
    }

    async fn put_blob(&self, local_path: &Path, content_type: &str) -> UploadResult {
        let blob = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from)
            .ok_or_else(|| {
                UploadError::new(format!("no usable file name in {}", local_path.display()))
            })?;
        let payload = read_payload(local_path).await?;
        let signed = sign::sign_azure_put(
            &AzurePutRequest {
                account: &self.settings.account,
                account_key: &self.settings.account_key,
                container: &self.settings.container,
                blob: &blob,
                content_type,
                content_length: payload.len(),
            },
            Utc::now(),
        )
        .map_err(UploadError::new)?;

        let url = self.blob_url(&blob);
        let response = self
            .client
            .put(&url)
            .header("content-type", content_type)
            .header("x-ms-blob-type", sign::AZURE_BLOB_TYPE)
            .header("x-ms-date", &signed.ms_date)
            .header("x-ms-version", sign::AZURE_API_VERSION)
            .header("authorization", &signed.authorization)
            .body(payload)
            .send()
            .await
            .map_err(|err| UploadError::new(format!("azure request failed: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::new(format!(
                "azure api error ({status}): {body}"
            )));
        }
        Ok(url)
    }
}

impl Uploader for AzureUploader {
    fn backend(&self) -> &'static str {
        "Azure"
    }

    fn output_name(&self) -> &'static str {
        "azure-blob-url"
    }

    fn upload<'a>(
        &'a self,
        local_path: &'a Path,
        _key: &'a str,
        content_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = UploadResult> + Send + 'a>> {
        Box::pin(self.put_blob(local_path, content_type))
    }
}

async fn read_payload(local_path: &Path) -> Result<Vec<u8>, UploadError> {
    tokio::fs::read(local_path).await.map_err(|err| {
        UploadError::new(format!("reading {} failed: {err}", local_path.display()))
    })
}

/// Percent-encode a key per path segment, leaving the separators alone.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn host_header(url: &reqwest::Url) -> Result<String, UploadError> {
    let host = url
        .host_str()
        .ok_or_else(|| UploadError::new(format!("object url {url} has no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => String::from(host),
    })
}
