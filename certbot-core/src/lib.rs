//! ACM certbot core library
//!
//! Business logic of the certificate robot:
//! - Renewal-threshold evaluation (`check_expiration`)
//! - DNS-01 challenge records in Route 53 (`Route53ChallengeProvider`)
//! - ACME issuance (`AcmeIssuer`)
//! - Certificate store lookup and import (`CertificateService`)
//! - Run orchestration (`CertbotService`)
//!
//! All cloud clients, the issuer and the clock are passed in through
//! [`CertbotContext`], so every piece can run against in-memory doubles.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, StageExt};
pub use services::{
    AcmeIssuer, CertbotContext, CertbotService, CertificateService, Dns01Config,
    Route53ChallengeProvider,
};
pub use traits::{CertificateIssuer, ChallengeProvider, Clock, SystemClock};
pub use types::{CertificateResource, RenewalEvent, RenewalStatus, RunOutcome};
pub use utils::wait::{wait_for, PollPolicy};
