//! Certificate material and expiry status

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Freshly issued certificate, consumed once by the import step.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateResource {
    /// Names the certificate was ordered for
    pub domains: Vec<String>,
    /// PEM bundle: leaf first, then the issuers
    pub certificate: String,
    /// PEM private key of the leaf
    pub private_key: String,
    /// PEM chain without the leaf
    pub issuer_certificate: String,
}

impl fmt::Debug for CertificateResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateResource")
            .field("domains", &self.domains)
            .field("certificate", &format_args!("{} bytes", self.certificate.len()))
            .field("private_key", &"<redacted>")
            .field(
                "issuer_certificate",
                &format_args!("{} bytes", self.issuer_certificate.len()),
            )
            .finish()
    }
}

/// How close a certificate is to its renewal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalStatus {
    /// Expiration of the certificate
    pub not_after: DateTime<Utc>,
    /// Whole days until expiry, floored (negative once expired)
    pub days_remaining: i64,
    /// Days until the renewal threshold is reached
    pub days_until_renewal: i64,
    /// Renewal is due
    pub renewal_due: bool,
}

/// Names and validity of a parsed leaf certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    pub common_name: Option<String>,
    pub subject_alternative_names: Vec<String>,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}
