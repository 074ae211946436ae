use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::store::Store;

type HmacSha256 = Hmac<Sha256>;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Gateway to the S3-compatible object store (Cloudflare R2 layout).
/// Credentials and bucket come from settings; requests are signed with
/// AWS SigV4 (region "auto", service "s3").
#[derive(Debug, Clone)]
pub struct ObjectStore {
    account_id: String,
    bucket: String,
    access_key: String,
    secret_key: String,
    public_base: String,
}

impl ObjectStore {
    pub fn from_settings(store: &dyn Store) -> Result<Self, String> {
        let account_id = store.setting_get_or("storage_account_id", "");
        let bucket = store.setting_get_or("storage_bucket", "");
        let access_key = store.setting_get_or("storage_access_key", "");
        let secret_key = store.setting_get_or("storage_secret_key", "");

        if account_id.is_empty()
            || bucket.is_empty()
            || access_key.is_empty()
            || secret_key.is_empty()
        {
            return Err("Object storage is not configured".to_string());
        }

        let public_base = match store.setting_get("storage_public_base") {
            Some(base) if !base.is_empty() => base,
            _ => format!("https://{}.{}.r2.dev", bucket, account_id),
        };

        Ok(ObjectStore {
            account_id,
            bucket,
            access_key,
            secret_key,
            public_base,
        })
    }

    /// Upload a blob and return its public URL.
    pub fn upload(&self, bytes: &[u8], content_type: &str, key: &str) -> Result<String, String> {
        self.request("PUT", key, bytes, Some(content_type))?;
        Ok(format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            key
        ))
    }

    pub fn delete(&self, key: &str) -> Result<(), String> {
        self.request("DELETE", key, &[], None)
    }

    fn host(&self) -> String {
        format!("{}.r2.cloudflarestorage.com", self.account_id)
    }

    /// One signed round trip to the store. No retries: callers treat a
    /// failed delete as an orphaned blob and log it.
    fn request(
        &self,
        method: &str,
        key: &str,
        body: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), String> {
        let host = self.host();
        let canonical_uri = format!("/{}/{}", uri_encode_path(&self.bucket), uri_encode_path(key));
        let url = format!("https://{}{}", host, canonical_uri);

        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let datestamp = now.format("%Y%m%d").to_string();

        let payload_hash = hex::encode(Sha256::digest(body));

        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "{}\n{}\n\n{}\n{}\n{}",
            method, canonical_uri, canonical_headers, signed_headers, payload_hash
        );

        let scope = format!("{}/auto/s3/aws4_request", datestamp);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = {
            let k_date = hmac_sha256(format!("AWS4{}", self.secret_key).as_bytes(), &datestamp);
            let k_region = hmac_sha256(&k_date, "auto");
            let k_service = hmac_sha256(&k_region, "s3");
            hmac_sha256(&k_service, "aws4_request")
        };
        let signature = hex::encode(hmac_sha256(&signing_key, &string_to_sign));

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.access_key, scope, signed_headers, signature
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;

        let mut req = match method {
            "PUT" => client.put(&url).body(body.to_vec()),
            "DELETE" => client.delete(&url),
            other => return Err(format!("Unsupported object-store method: {}", other)),
        };
        req = req
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization);
        if let Some(ct) = content_type {
            req = req
                .header("Content-Type", ct)
                .header("Cache-Control", "public, max-age=31536000");
        }

        let resp = req
            .send()
            .map_err(|e| format!("Object store request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(format!("Object store returned {}: {}", status, text));
        }

        Ok(())
    }
}

fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Percent-encode a path, leaving '/' and the unreserved set intact.
fn uri_encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// Derive the object key back out of a public URL: the path minus its
/// leading slash. Returns None for unparseable URLs.
pub fn key_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let key = parsed.path().trim_start_matches('/').to_string();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Fresh object key for an upload: `<prefix>/<uuid>.<ext>`.
pub fn object_key(prefix: &str, ext: &str) -> String {
    format!("{}/{}.{}", prefix, uuid::Uuid::new_v4(), ext)
}

/// Allow-list check on an uploaded image: content sniffing against
/// {JPEG, PNG, WebP} plus the 5 MiB cap.
pub fn validate_image(bytes: &[u8]) -> Result<(), String> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err("File size too large. Maximum size is 5MB.".to_string());
    }

    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) | Ok(image::ImageFormat::Png)
        | Ok(image::ImageFormat::WebP) => Ok(()),
        _ => Err("Invalid file type. Only JPEG, PNG, and WebP images are allowed.".to_string()),
    }
}
