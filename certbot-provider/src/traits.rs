use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CertificateDetail, CertificateSummary, ChangeBatch, ChangeInfo, DnsRecordType, HostedZone,
    ImportCertificateRequest, PaginatedResponse, ResourceRecordSet,
};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (`NoSuchHostedZone`, `ResourceNotFoundException`, ...)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Error context (internal use)
/// Supplies the identifiers a mapped error should carry
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Hosted zone id or name (for `DomainNotFound`)
    pub domain: Option<String>,
    /// Change id (for `ChangeNotFound`)
    pub change_id: Option<String>,
    /// Certificate ARN (for `CertificateNotFound`)
    pub certificate_arn: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone: impl Into<String>) -> Self {
        Self {
            domain: Some(zone.into()),
            ..Self::default()
        }
    }

    pub fn change(change_id: impl Into<String>) -> Self {
        Self {
            change_id: Some(change_id.into()),
            ..Self::default()
        }
    }

    pub fn certificate(arn: impl Into<String>) -> Self {
        Self {
            certificate_arn: Some(arn.into()),
            ..Self::default()
        }
    }
}

/// Error mapping trait (internal use)
/// Each client maps its service's raw error codes onto [`ProviderError`]
pub(crate) trait ProviderErrorMapper {
    /// Service identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Authoritative DNS service holding the hosted zones challenges are published in.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Service identifier
    fn id(&self) -> &'static str;

    /// List hosted zones starting at `dns_name` in lexicographic (reversed-label) order.
    ///
    /// The service returns zones whose name sorts at or after `dns_name`, so callers
    /// must compare names themselves.
    async fn list_hosted_zones_by_name(&self, dns_name: &str) -> Result<Vec<HostedZone>>;

    /// List record sets of a zone, starting at `start_name` / `start_type`.
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_name: &str,
        start_type: DnsRecordType,
    ) -> Result<Vec<ResourceRecordSet>>;

    /// Submit a change batch; returns the change status (usually `PENDING`).
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo>;

    /// Current status of a previously submitted change.
    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo>;

    /// Find the record set with exactly this name and type, if any.
    ///
    /// Names are compared case-insensitively, ignoring a trailing dot.
    async fn find_record_set(
        &self,
        zone_id: &str,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Option<ResourceRecordSet>> {
        let wanted = name.trim_end_matches('.');
        let sets = self
            .list_resource_record_sets(zone_id, name, record_type)
            .await?;

        Ok(sets.into_iter().find(|set| {
            set.record_type == record_type
                && set.name.trim_end_matches('.').eq_ignore_ascii_case(wanted)
        }))
    }
}

/// Managed certificate store certificates are imported into.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Service identifier
    fn id(&self) -> &'static str;

    /// List one page of certificates (all key types).
    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<PaginatedResponse<CertificateSummary>>;

    /// Describe a single certificate.
    async fn describe_certificate(&self, certificate_arn: &str) -> Result<CertificateDetail>;

    /// Import a certificate; returns its ARN.
    ///
    /// With `certificate_arn` set the existing entry is replaced in place.
    async fn import_certificate(&self, request: &ImportCertificateRequest) -> Result<String>;

    /// List every certificate, following pagination to the end.
    async fn list_all_certificates(&self) -> Result<Vec<CertificateSummary>> {
        let mut all = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self.list_certificates(next_token.as_deref()).await?;
            all.extend(page.items);
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        Ok(all)
    }
}
