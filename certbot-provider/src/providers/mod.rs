//! AWS service clients

/// Shared utilities used by the clients.
pub mod common;

pub(crate) mod aws;

#[cfg(feature = "acm")]
mod acm;
#[cfg(feature = "route53")]
mod route53;

#[cfg(feature = "acm")]
pub use acm::{AcmProvider, AcmProviderBuilder};
#[cfg(feature = "route53")]
pub use route53::{Route53Provider, Route53ProviderBuilder};
