//! ACM JSON 1.1 request/response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CertificateDetail, CertificateSummary};

/// Every key type ACM knows; without an explicit filter only RSA-2048 is listed.
pub const ALL_KEY_TYPES: &[&str] = &[
    "RSA_1024",
    "RSA_2048",
    "RSA_3072",
    "RSA_4096",
    "EC_prime256v1",
    "EC_secp384r1",
    "EC_secp521r1",
];

// ============ Errors ============

/// `{"__type": "...#ResourceNotFoundException", "message": "..."}`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Error code without the namespace before `#`
    pub fn code(&self) -> Option<&str> {
        self.error_type
            .as_deref()
            .map(|t| t.rsplit_once('#').map_or(t, |(_, code)| code))
    }
}

// ============ ListCertificates ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertificatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<&'a str>,
    pub max_items: u32,
    pub includes: Filters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub key_types: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertificatesResponse {
    #[serde(default)]
    pub certificate_summary_list: Vec<CertificateSummaryJson>,
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateSummaryJson {
    pub certificate_arn: String,
    pub domain_name: Option<String>,
    #[serde(default)]
    pub subject_alternative_name_summaries: Vec<String>,
    pub status: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub not_after: Option<DateTime<Utc>>,
}

impl From<CertificateSummaryJson> for CertificateSummary {
    fn from(json: CertificateSummaryJson) -> Self {
        Self {
            certificate_arn: json.certificate_arn,
            domain_name: json.domain_name,
            subject_alternative_names: json.subject_alternative_name_summaries,
            status: json.status,
            not_after: json.not_after,
        }
    }
}

// ============ DescribeCertificate ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateArnRequest<'a> {
    pub certificate_arn: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCertificateResponse {
    pub certificate: CertificateDetailJson,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateDetailJson {
    pub certificate_arn: String,
    pub domain_name: Option<String>,
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    pub status: Option<String>,
    #[serde(rename = "Type")]
    pub certificate_type: Option<String>,
    pub issuer: Option<String>,
    pub key_algorithm: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub not_after: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub imported_at: Option<DateTime<Utc>>,
}

impl From<CertificateDetailJson> for CertificateDetail {
    fn from(json: CertificateDetailJson) -> Self {
        Self {
            certificate_arn: json.certificate_arn,
            domain_name: json.domain_name,
            subject_alternative_names: json.subject_alternative_names,
            status: json.status,
            certificate_type: json.certificate_type,
            issuer: json.issuer,
            key_algorithm: json.key_algorithm,
            not_before: json.not_before,
            not_after: json.not_after,
            imported_at: json.imported_at,
        }
    }
}

// ============ ImportCertificate ============

/// Blobs are base64-encoded PEM.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportCertificateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_arn: Option<&'a str>,
    pub certificate: String,
    pub private_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_chain: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportCertificateResponse {
    pub certificate_arn: String,
}
