//! AWS Route 53 Provider

mod error;
mod http;
mod provider;
/// Route 53 REST-XML request/response types.
pub(crate) mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::aws::DEFAULT_REGION;
use crate::providers::aws::sign::AwsSigner;
use crate::providers::common::create_http_client;
use crate::types::AwsCredentials;

/// Route 53 API host (global endpoint).
pub(crate) const ROUTE53_HOST: &str = "route53.amazonaws.com";
/// Route 53 API version prefix.
pub(crate) const ROUTE53_API_VERSION: &str = "2013-04-01";
/// Signing name of the service.
pub(crate) const ROUTE53_SERVICE: &str = "route53";
/// XML namespace of request documents.
pub(crate) const ROUTE53_XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

/// AWS Route 53 provider implementation.
///
/// Talks to the REST-XML API and signs every request with Signature V4
/// (`us-east-1`, service `route53`).
///
/// # Construction
///
/// ```rust,no_run
/// use certbot_provider::{AwsCredentials, Route53Provider};
///
/// let provider = Route53Provider::new(AwsCredentials::new(
///     "your-access-key-id",
///     "your-secret-access-key",
/// ))
/// .unwrap();
/// ```
pub struct Route53Provider {
    pub(crate) client: Client,
    pub(crate) signer: AwsSigner,
    pub(crate) max_retries: u32,
}

/// Builder for [`Route53Provider`] with configurable retry behavior.
pub struct Route53ProviderBuilder {
    credentials: AwsCredentials,
    max_retries: u32,
}

impl Route53ProviderBuilder {
    fn new(credentials: AwsCredentials) -> Self {
        Self {
            credentials,
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`Route53Provider`] instance.
    pub fn build(self) -> Result<Route53Provider> {
        Ok(Route53Provider {
            client: create_http_client(ROUTE53_SERVICE)?,
            signer: AwsSigner::new(self.credentials, DEFAULT_REGION, ROUTE53_SERVICE),
            max_retries: self.max_retries,
        })
    }
}

impl Route53Provider {
    /// Creates a new Route 53 provider with default settings (2 retries).
    pub fn new(credentials: AwsCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(credentials: AwsCredentials) -> Route53ProviderBuilder {
        Route53ProviderBuilder::new(credentials)
    }
}
