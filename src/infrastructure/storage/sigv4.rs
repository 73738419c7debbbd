//! AWS Signature Version 4, query-string (pre-signed URL) form.
//!
//! Only what a pre-signed request needs: canonical request, string to sign,
//! derived signing key. The payload is always `UNSIGNED-PAYLOAD`.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// One request to presign.
#[derive(Debug, Clone)]
pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Unencoded object path, starting with `/`.
    pub path: &'a str,
    /// Headers the uploader must send verbatim, besides `host`.
    pub headers: &'a [(&'a str, &'a str)],
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
    pub expires_secs: u64,
}

/// RFC 3986 percent-encoding as S3 expects it.
///
/// Unreserved characters pass through; `/` passes through only when
/// `keep_slash` is set (object paths).
pub fn uri_encode(input: &str, keep_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b'/' if keep_slash => out.push('/'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn hmac(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date);
    let k_region = hmac(&k_date, region);
    let k_service = hmac(&k_region, service);
    hmac(&k_service, "aws4_request")
}

/// Returns the full pre-signed URL.
pub fn presign(request: &PresignRequest<'_>, credentials: &Credentials) -> String {
    let amz_date = request.time.format("%Y%m%dT%H%M%SZ").to_string();
    let date = request.time.format("%Y%m%d").to_string();
    let scope = format!(
        "{date}/{}/{}/aws4_request",
        request.region, request.service
    );

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .chain(std::iter::once(("host".to_string(), request.host.to_string())))
        .collect();
    headers.sort();

    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();

    let mut query = [
        ("X-Amz-Algorithm", ALGORITHM.to_string()),
        (
            "X-Amz-Credential",
            format!("{}/{scope}", credentials.access_key_id),
        ),
        ("X-Amz-Date", amz_date.clone()),
        ("X-Amz-Expires", request.expires_secs.to_string()),
        ("X-Amz-SignedHeaders", signed_headers.clone()),
    ];
    query.sort_by(|a, b| a.0.cmp(&b.0));
    let canonical_query = query
        .iter()
        .map(|(name, value)| format!("{}={}", uri_encode(name, false), uri_encode(value, false)))
        .collect::<Vec<_>>()
        .join("&");

    let canonical_uri = uri_encode(request.path, true);
    let canonical_request = format!(
        "{}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{UNSIGNED_PAYLOAD}",
        request.method
    );

    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(
        &credentials.secret_access_key,
        &date,
        request.region,
        request.service,
    );
    let signature = hex::encode(hmac(&key, &string_to_sign));

    format!(
        "https://{}{canonical_uri}?{canonical_query}&X-Amz-Signature={signature}",
        request.host
    )
}
