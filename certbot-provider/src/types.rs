use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// A page of results from a token-paginated list operation.
///
/// # Type Parameters
///
/// * `T`: The item type (e.g., [`CertificateSummary`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Token to pass to the next call, `None` on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Create a new page.
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// Whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

// ============ Hosted Zone Types ============

/// A Route 53 hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    /// Zone identifier without the `/hostedzone/` prefix (e.g., `"Z1D633PJN98FT9"`).
    pub id: String,
    /// Zone name as a fully-qualified name with trailing dot (e.g., `"example.com."`).
    pub name: String,
    /// Whether the zone is private (VPC-only).
    pub private_zone: bool,
    /// Number of record sets in the zone, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
}

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"TXT"`, etc.).
/// Types this crate does not model deserialize to [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Start of authority record.
    Soa,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
    /// Any other record type.
    #[serde(other)]
    Other,
}

impl DnsRecordType {
    /// Wire name of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Other => "OTHER",
        }
    }

    /// Parse a wire name (case-insensitive); unknown names map to [`Other`](Self::Other).
    pub fn from_wire(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CAA" => Self::Caa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "NS" => Self::Ns,
            "SOA" => Self::Soa,
            "SRV" => Self::Srv,
            "TXT" => Self::Txt,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value inside a record set.
///
/// TXT values are stored quoted, e.g. `"\"abc\""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Record value in zone-file presentation format.
    pub value: String,
}

impl ResourceRecord {
    /// Create a record value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// All records sharing one name and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecordSet {
    /// Fully-qualified record name with trailing dot.
    pub name: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Time-to-live in seconds (absent for alias records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record values.
    pub resource_records: Vec<ResourceRecord>,
}

/// Action applied to a record set by a change batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record set, failing if it exists.
    Create,
    /// Delete the record set; values and TTL must match exactly.
    Delete,
    /// Create the record set or replace it if it exists.
    Upsert,
}

impl ChangeAction {
    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
            Self::Upsert => "UPSERT",
        }
    }
}

/// One change inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// What to do.
    pub action: ChangeAction,
    /// The record set to act on.
    pub resource_record_set: ResourceRecordSet,
}

/// A batch of changes applied atomically to one hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBatch {
    /// Optional free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Changes in the batch.
    pub changes: Vec<Change>,
}

/// Propagation status of a submitted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    /// Not yet applied to all authoritative servers.
    Pending,
    /// Applied to all authoritative servers.
    Insync,
}

/// Status information about a submitted change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Change identifier without the `/change/` prefix.
    pub id: String,
    /// Current propagation status.
    pub status: ChangeStatus,
    /// When the change was submitted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Comment of the batch, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ============ Certificate Store Types ============

/// One entry of the certificate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    /// ARN of the certificate.
    pub certificate_arn: String,
    /// Primary domain name of the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    /// Subject alternative names, if the listing includes them.
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    /// Certificate status (`ISSUED`, `EXPIRED`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Expiration time, if the listing includes it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub not_after: Option<DateTime<Utc>>,
}

/// Full description of a stored certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetail {
    /// ARN of the certificate.
    pub certificate_arn: String,
    /// Primary domain name of the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    /// Subject alternative names.
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    /// Certificate status (`ISSUED`, `EXPIRED`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Certificate type (`IMPORTED`, `AMAZON_ISSUED`, `PRIVATE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<String>,
    /// Issuer common name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Key algorithm (`RSA_2048`, `EC_prime256v1`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<String>,
    /// Start of the validity period.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub not_before: Option<DateTime<Utc>>,
    /// End of the validity period.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub not_after: Option<DateTime<Utc>>,
    /// When the certificate was (last) imported.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub imported_at: Option<DateTime<Utc>>,
}

/// Request to import a certificate, optionally replacing an existing one.
///
/// All byte fields are PEM-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCertificateRequest {
    /// ARN of the certificate to replace; `None` creates a new entry.
    pub certificate_arn: Option<String>,
    /// Server certificate (leaf only).
    pub certificate: Vec<u8>,
    /// Private key of the server certificate.
    pub private_key: Vec<u8>,
    /// Intermediate chain, if any.
    pub certificate_chain: Option<Vec<u8>>,
}

// ============ Credentials ============

/// Validation error for AWS credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::EmptyField { field } => write!(f, "Field must not be empty: {field}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Environment variable holding the access key id.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable holding the (optional) session token.
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// AWS credentials used to sign requests.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AwsCredentials {
    /// Long-term credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token (temporary credentials).
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Read credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
    /// and the optional `AWS_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary key lookup, validating required fields.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key_id = Self::required(&lookup, ENV_ACCESS_KEY_ID)?;
        let secret_access_key = Self::required(&lookup, ENV_SECRET_ACCESS_KEY)?;
        let session_token = lookup(ENV_SESSION_TOKEN).filter(|t| !t.trim().is_empty());

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }

    fn required<F>(lookup: &F, field: &str) -> Result<String, CredentialValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(field) {
            None => Err(CredentialValidationError::MissingField {
                field: field.to_string(),
            }),
            Some(value) if value.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: field.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn credentials_from_lookup() {
        let creds = AwsCredentials::from_lookup(lookup_from(&[
            (ENV_ACCESS_KEY_ID, "AKIDEXAMPLE"),
            (ENV_SECRET_ACCESS_KEY, "secret"),
            (ENV_SESSION_TOKEN, "token"),
        ]))
        .unwrap();
        assert_eq!(creds.access_key_id, "AKIDEXAMPLE");
        assert_eq!(creds.session_token.as_deref(), Some("token"));
    }

    #[test]
    fn credentials_missing_secret() {
        let err = AwsCredentials::from_lookup(lookup_from(&[(ENV_ACCESS_KEY_ID, "AKIDEXAMPLE")]))
            .unwrap_err();
        assert_eq!(
            err,
            CredentialValidationError::MissingField {
                field: ENV_SECRET_ACCESS_KEY.to_string()
            }
        );
    }

    #[test]
    fn credentials_empty_key_id() {
        let err = AwsCredentials::from_lookup(lookup_from(&[
            (ENV_ACCESS_KEY_ID, "  "),
            (ENV_SECRET_ACCESS_KEY, "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CredentialValidationError::EmptyField { .. }));
    }

    #[test]
    fn blank_session_token_ignored() {
        let creds = AwsCredentials::from_lookup(lookup_from(&[
            (ENV_ACCESS_KEY_ID, "AKIDEXAMPLE"),
            (ENV_SECRET_ACCESS_KEY, "secret"),
            (ENV_SESSION_TOKEN, ""),
        ]))
        .unwrap();
        assert!(creds.session_token.is_none());
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = AwsCredentials::new("AKIDEXAMPLE", "very-secret").with_session_token("tok");
        let out = format!("{creds:?}");
        assert!(!out.contains("very-secret"));
        assert!(!out.contains("tok\""));
    }

    #[test]
    fn record_type_unknown_deserializes_to_other() {
        let t: DnsRecordType = serde_json::from_str("\"HTTPS\"").unwrap();
        assert_eq!(t, DnsRecordType::Other);
        let t: DnsRecordType = serde_json::from_str("\"TXT\"").unwrap();
        assert_eq!(t, DnsRecordType::Txt);
    }

    #[test]
    fn paginated_has_more() {
        let page = PaginatedResponse::new(vec![1, 2], Some("next".to_string()));
        assert!(page.has_more());
        let last: PaginatedResponse<u8> = PaginatedResponse::new(vec![], None);
        assert!(!last.has_more());
    }
}
