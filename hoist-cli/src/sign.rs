//! Request signing for the storage backends.
//!
//! S3 uploads are signed with AWS Signature Version 4 and Azure uploads with
//! the SharedKey scheme. Both are HMAC-SHA256 constructions over a canonical
//! rendering of the request, computed here as pure functions of the request
//! and a timestamp.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use ring::{digest, hmac};

/// Headers signed on every S3 upload, in canonical order.
const S3_SIGNED_HEADERS: &str = "content-type;host;x-amz-acl;x-amz-content-sha256;x-amz-date";
/// Canned ACL applied to uploaded objects so badges are publicly readable.
pub const S3_ACL: &str = "public-read";
/// Storage service version sent with every Azure request.
pub const AZURE_API_VERSION: &str = "2021-08-06";
/// Azure blob type for single-shot uploads.
pub const AZURE_BLOB_TYPE: &str = "BlockBlob";

/// An S3 object upload awaiting signature.
#[derive(Debug, Clone)]
pub struct S3PutRequest<'a> {
    /// Access key id.
    pub access_key_id: &'a str,
    /// Secret access key.
    pub secret_access_key: &'a str,
    /// Region in the credential scope.
    pub region: &'a str,
    /// Host header value, including any port.
    pub host: &'a str,
    /// Absolute request path, percent-encoded per segment.
    pub canonical_uri: &'a str,
    /// Content type of the payload.
    pub content_type: &'a str,
    /// Request body.
    pub payload: &'a [u8],
}

/// Headers produced by signing an S3 upload.
#[derive(Debug, Clone)]
pub struct S3SignedHeaders {
    /// Value for the `Authorization` header.
    pub authorization: String,
    /// Value for the `x-amz-date` header.
    pub amz_date: String,
    /// Value for the `x-amz-content-sha256` header.
    pub content_sha256: String,
}

/// Sign an S3 upload for the given instant.
pub fn sign_s3_put(request: &S3PutRequest<'_>, now: DateTime<Utc>) -> S3SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();
    let content_sha256 = sha256_hex(request.payload);

    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-amz-acl:{S3_ACL}\nx-amz-content-sha256:{content_sha256}\nx-amz-date:{amz_date}\n",
        request.content_type, request.host
    );
    let canonical_request = format!(
        "PUT\n{}\n\n{canonical_headers}\n{S3_SIGNED_HEADERS}\n{content_sha256}",
        request.canonical_uri
    );
    let scope = format!("{date_stamp}/{}/s3/aws4_request", request.region);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );
    let signing_key = s3_signing_key(request.secret_access_key, &date_stamp, request.region, "s3");
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));
    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={S3_SIGNED_HEADERS}, Signature={signature}",
        request.access_key_id
    );

    S3SignedHeaders {
        authorization,
        amz_date,
        content_sha256,
    }
}

/// Derive the SigV4 signing key for a date, region, and service.
fn s3_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// An Azure Put Blob request awaiting signature.
#[derive(Debug, Clone)]
pub struct AzurePutRequest<'a> {
    /// Storage account name.
    pub account: &'a str,
    /// Base64-encoded account key.
    pub account_key: &'a str,
    /// Container name.
    pub container: &'a str,
    /// Blob name, unencoded.
    pub blob: &'a str,
    /// Content type of the payload.
    pub content_type: &'a str,
    /// Payload length in bytes.
    pub content_length: usize,
}

/// Headers produced by signing an Azure Put Blob request.
#[derive(Debug, Clone)]
pub struct AzureSignedHeaders {
    /// Value for the `Authorization` header.
    pub authorization: String,
    /// Value for the `x-ms-date` header.
    pub ms_date: String,
}

/// Sign an Azure Put Blob request for the given instant.
///
/// Fails when the account key is not valid base64.
pub fn sign_azure_put(
    request: &AzurePutRequest<'_>,
    now: DateTime<Utc>,
) -> Result<AzureSignedHeaders, String> {
    let ms_date = now.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    let key = general_purpose::STANDARD
        .decode(request.account_key)
        .map_err(|err| format!("storage account key is not valid base64: {err}"))?;
    let string_to_sign = azure_string_to_sign(request, &ms_date);
    let signature = general_purpose::STANDARD.encode(hmac_sha256(&key, string_to_sign.as_bytes()));
    Ok(AzureSignedHeaders {
        authorization: format!("SharedKey {}:{signature}", request.account),
        ms_date,
    })
}

/// Canonical SharedKey string-to-sign for a Put Blob request.
///
/// The layout is the 2015-02-21 format: twelve standard header slots, the
/// canonicalized `x-ms-*` headers, then the canonicalized resource. Only the
/// slots this tool populates are non-empty.
fn azure_string_to_sign(request: &AzurePutRequest<'_>, ms_date: &str) -> String {
    let content_length = if request.content_length == 0 {
        String::new()
    } else {
        request.content_length.to_string()
    };
    let canonical_headers = format!(
        "x-ms-blob-type:{AZURE_BLOB_TYPE}\nx-ms-date:{ms_date}\nx-ms-version:{AZURE_API_VERSION}"
    );
    let canonical_resource = format!(
        "/{}/{}/{}",
        request.account, request.container, request.blob
    );
    format!(
        "PUT\n\n\n{content_length}\n\n{}\n\n\n\n\n\n\n{canonical_headers}\n{canonical_resource}",
        request.content_type
    )
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&key, data).as_ref().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(digest::digest(&digest::SHA256, data))
}
