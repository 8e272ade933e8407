//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
#[cfg(feature = "acm")]
use crate::providers::AcmProvider;
#[cfg(feature = "route53")]
use crate::providers::Route53Provider;
#[cfg(feature = "acm")]
use crate::traits::CertificateStore;
#[cfg(feature = "route53")]
use crate::traits::DnsProvider;
use crate::types::AwsCredentials;

/// Settings shared by every client the factory builds.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Automatic retries for transient errors.
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

/// Creates the Route 53 [`DnsProvider`] for the given credentials.
///
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use certbot_provider::{create_dns_provider, AwsCredentials, ClientOptions};
///
/// let provider = create_dns_provider(
///     AwsCredentials::from_env().unwrap(),
///     &ClientOptions::default(),
/// )
/// .unwrap();
/// ```
#[cfg(feature = "route53")]
pub fn create_dns_provider(
    credentials: AwsCredentials,
    options: &ClientOptions,
) -> Result<Arc<dyn DnsProvider>> {
    let provider = Route53Provider::builder(credentials)
        .max_retries(options.max_retries)
        .build()?;
    Ok(Arc::new(provider))
}

/// Creates the ACM [`CertificateStore`] for `region`.
#[cfg(feature = "acm")]
pub fn create_certificate_store(
    credentials: AwsCredentials,
    region: &str,
    options: &ClientOptions,
) -> Result<Arc<dyn CertificateStore>> {
    let provider = AcmProvider::builder(credentials)
        .region(region)
        .max_retries(options.max_retries)
        .build()?;
    Ok(Arc::new(provider))
}
