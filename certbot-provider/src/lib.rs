//! # certbot-provider
//!
//! Typed clients for the two AWS services a DNS-01 certificate robot needs:
//! Route 53 for publishing challenge records and Certificate Manager (ACM)
//! for storing the resulting certificates.
//!
//! ## Supported Services
//!
//! | Service | Feature Flag | Protocol | Trait |
//! |---------|-------------|----------|-------|
//! | [Route 53](https://aws.amazon.com/route53/) | `route53` | REST-XML `2013-04-01` | [`DnsProvider`] |
//! | [Certificate Manager](https://aws.amazon.com/certificate-manager/) | `acm` | JSON 1.1 | [`CertificateStore`] |
//!
//! Every request is signed with AWS Signature Version 4; temporary credentials
//! (session tokens) are supported.
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable both clients.
//! - **`route53`**: Enable only the Route 53 client.
//! - **`acm`**: Enable only the ACM client.
//! - **`rustls`** *(default)* / **`native-tls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certbot_provider::{
//!     create_certificate_store, create_dns_provider, AwsCredentials, ClientOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = AwsCredentials::from_env()?;
//!     let options = ClientOptions::default();
//!
//!     // Hosted zones for a name
//!     let dns = create_dns_provider(credentials.clone(), &options)?;
//!     for zone in dns.list_hosted_zones_by_name("example.com.").await? {
//!         println!("{} {} private={}", zone.id, zone.name, zone.private_zone);
//!     }
//!
//!     // Every certificate in us-east-1
//!     let store = create_certificate_store(credentials, "us-east-1", &options)?;
//!     for cert in store.list_all_certificates().await? {
//!         println!("{} {:?} {:?}", cert.certificate_arn, cert.domain_name, cert.not_after);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: signature or credentials rejected
//! - [`ProviderError::DomainNotFound`]: hosted zone not found
//! - [`ProviderError::CertificateNotFound`]: certificate ARN not found
//! - [`ProviderError::RateLimited`]: throttled (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
#[cfg(feature = "acm")]
pub use factory::create_certificate_store;
#[cfg(feature = "route53")]
pub use factory::create_dns_provider;
pub use factory::ClientOptions;

// Re-export service traits only (internal traits are not exported)
pub use traits::{CertificateStore, DnsProvider};

// Re-export types
pub use types::{
    AwsCredentials, CertificateDetail, CertificateSummary, Change, ChangeAction, ChangeBatch,
    ChangeInfo, ChangeStatus, CredentialValidationError, DnsRecordType, HostedZone,
    ImportCertificateRequest, PaginatedResponse, ResourceRecord, ResourceRecordSet,
    ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY, ENV_SESSION_TOKEN,
};

// Re-export utils module
pub use utils::datetime;
pub use utils::log_sanitizer::truncate_for_log;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "acm")]
pub use providers::{AcmProvider, AcmProviderBuilder};
#[cfg(feature = "route53")]
pub use providers::{Route53Provider, Route53ProviderBuilder};

/// Region of the global services and the default certificate region.
pub const DEFAULT_REGION: &str = providers::aws::DEFAULT_REGION;
