//! Certificate issuer Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::CertificateResource;

/// Obtains a fresh certificate covering `domains`.
#[async_trait]
pub trait CertificateIssuer: Send + Sync {
    /// Issue a certificate for all `domains` on an account registered for `email`.
    async fn obtain(&self, domains: &[String], email: &str) -> CoreResult<CertificateResource>;
}
