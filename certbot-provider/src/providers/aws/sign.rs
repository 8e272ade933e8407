//! AWS Signature Version 4 (`AWS4-HMAC-SHA256`)
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use std::fmt::Write;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;
use crate::types::AwsCredentials;
use crate::utils::log_sanitizer::{mask_key_id, truncate_for_log};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const TERMINATOR: &str = "aws4_request";

/// Request parts covered by the signature.
pub(crate) struct SigningRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Unencoded absolute path (e.g. `/2013-04-01/hostedzone/Z1/rrset`)
    pub path: &'a str,
    /// Unencoded query parameters
    pub query: &'a [(&'a str, String)],
    /// Extra headers to sign besides `host` / `x-amz-date`
    pub headers: &'a [(&'a str, String)],
    pub payload: &'a [u8],
}

/// Signs requests for one service in one region.
#[derive(Clone)]
pub(crate) struct AwsSigner {
    credentials: AwsCredentials,
    region: String,
    service: &'static str,
}

impl AwsSigner {
    pub fn new(credentials: AwsCredentials, region: impl Into<String>, service: &'static str) -> Self {
        Self {
            credentials,
            region: region.into(),
            service,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sign a request at `now`.
    ///
    /// Returns the headers to attach: `x-amz-date`, `x-amz-security-token` when a
    /// session token is present, and `authorization`.
    pub fn sign(&self, req: &SigningRequest<'_>, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let mut signed = vec![("x-amz-date", amz_date.clone())];
        if let Some(token) = &self.credentials.session_token {
            signed.push(("x-amz-security-token", token.clone()));
        }

        let (canonical_request, signed_headers) = self.canonical_request(req, &signed);
        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        let scope = format!("{date}/{}/{}/{TERMINATOR}", self.region, self.service);
        let string_to_sign = string_to_sign(&amz_date, &scope, &canonical_request);
        log::debug!("StringToSign:\n{string_to_sign}");

        let signature = hex::encode(hmac_sha256(
            &self.signing_key(&date),
            string_to_sign.as_bytes(),
        ));

        log::debug!(
            "[{}] signed {} {} as {}",
            self.service,
            req.method,
            req.path,
            mask_key_id(&self.credentials.access_key_id)
        );

        signed.push((
            "authorization",
            format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
                self.credentials.access_key_id
            ),
        ));
        signed
    }

    /// Build the canonical request; returns it together with the signed header list.
    fn canonical_request(
        &self,
        req: &SigningRequest<'_>,
        amz_headers: &[(&str, String)],
    ) -> (String, String) {
        let mut headers: Vec<(String, String)> = req
            .headers
            .iter()
            .chain(amz_headers.iter())
            .map(|(k, v)| (k.to_lowercase(), collapse_whitespace(v)))
            .chain(std::iter::once(("host".to_string(), req.host.to_string())))
            .collect();
        headers.sort_by(|a, b| a.0.cmp(&b.0));

        let canonical_headers = headers.iter().fold(String::new(), |mut acc, (k, v)| {
            let _ = writeln!(acc, "{k}:{v}");
            acc
        });
        let signed_headers = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let hashed_payload = hex::encode(Sha256::digest(req.payload));

        let canonical_request = format!(
            "{}\n{}\n{}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}",
            req.method,
            canonical_uri(req.path),
            canonical_query(req.query),
        );

        (canonical_request, signed_headers)
    }

    /// kSigning = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")
    fn signing_key(&self, date: &str) -> Vec<u8> {
        let k_date = hmac_sha256(
            format!("AWS4{}", self.credentials.secret_access_key).as_bytes(),
            date.as_bytes(),
        );
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, self.service.as_bytes());
        hmac_sha256(&k_service, TERMINATOR.as_bytes())
    }
}

fn string_to_sign(amz_date: &str, scope: &str, canonical_request: &str) -> String {
    let hashed = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    format!("{ALGORITHM}\n{amz_date}\n{scope}\n{hashed}")
}

/// RFC 3986 percent-encoding; only unreserved characters pass through.
pub(crate) fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Encode every path segment; non-S3 services expect the canonical form encoded twice.
fn canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    path.split('/')
        .map(|segment| uri_encode(&uri_encode(segment)))
        .collect::<Vec<_>>()
        .join("/")
}

/// Path as sent on the wire (each segment encoded once).
pub(crate) fn encode_path(path: &str) -> String {
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

/// Query string sorted by encoded name, then value.
pub(crate) fn canonical_query(query: &[(&str, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
