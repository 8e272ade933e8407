//! AWS Certificate Manager Provider

mod error;
mod http;
mod provider;
/// ACM JSON request/response types.
pub(crate) mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::aws::DEFAULT_REGION;
use crate::providers::aws::sign::AwsSigner;
use crate::providers::common::create_http_client;
use crate::types::AwsCredentials;

/// Signing name of the service.
pub(crate) const ACM_SERVICE: &str = "acm";
/// `X-Amz-Target` prefix of every operation.
pub(crate) const ACM_TARGET_PREFIX: &str = "CertificateManager";
/// Upper bound accepted by `ListCertificates`.
pub(crate) const MAX_PAGE_SIZE: u32 = 1000;

/// AWS Certificate Manager provider implementation.
///
/// Talks to the JSON 1.1 API of one region. Certificates attached to
/// CloudFront distributions must live in `us-east-1`, the default.
///
/// # Construction
///
/// ```rust,no_run
/// use certbot_provider::{AcmProvider, AwsCredentials};
///
/// let provider = AcmProvider::builder(AwsCredentials::new(
///     "your-access-key-id",
///     "your-secret-access-key",
/// ))
/// .region("eu-west-1")
/// .build()
/// .unwrap();
/// ```
pub struct AcmProvider {
    pub(crate) client: Client,
    pub(crate) signer: AwsSigner,
    pub(crate) host: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`AcmProvider`] with configurable region and retry behavior.
pub struct AcmProviderBuilder {
    credentials: AwsCredentials,
    region: String,
    max_retries: u32,
}

impl AcmProviderBuilder {
    fn new(credentials: AwsCredentials) -> Self {
        Self {
            credentials,
            region: DEFAULT_REGION.to_string(),
            max_retries: 2,
        }
    }

    /// Set the region (default: `us-east-1`).
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`AcmProvider`] instance.
    pub fn build(self) -> Result<AcmProvider> {
        Ok(AcmProvider {
            client: create_http_client(ACM_SERVICE)?,
            host: format!("acm.{}.amazonaws.com", self.region),
            signer: AwsSigner::new(self.credentials, self.region, ACM_SERVICE),
            max_retries: self.max_retries,
        })
    }
}

impl AcmProvider {
    /// Creates a new provider for `us-east-1` with default settings (2 retries).
    pub fn new(credentials: AwsCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(credentials: AwsCredentials) -> AcmProviderBuilder {
        AcmProviderBuilder::new(credentials)
    }

    /// Region this provider talks to.
    pub fn region(&self) -> &str {
        self.signer.region()
    }
}
