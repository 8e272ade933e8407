//! Services of a renewal run

mod acme;
mod certbot_service;
mod certificate;
mod dns01;
mod renewal;

pub use acme::{lets_encrypt_url, AcmeIssuer};
pub use certbot_service::CertbotService;
pub use certificate::{inspect_certificate, retrieve_server_certificate, CertificateService};
pub use dns01::{
    challenge_record_name, challenge_record_value, Dns01Config, Route53ChallengeProvider,
    CHALLENGE_LABEL,
};
pub use renewal::check_expiration;

use std::sync::Arc;

use certbot_provider::{CertificateStore, DnsProvider};

use crate::traits::{CertificateIssuer, Clock};

/// Dependencies shared by every service
///
/// Clients are built once per process by the caller and handed in here.
pub struct CertbotContext {
    /// Route 53 client
    pub dns: Arc<dyn DnsProvider>,
    /// ACM client
    pub store: Arc<dyn CertificateStore>,
    /// Where new certificates come from
    pub issuer: Arc<dyn CertificateIssuer>,
    /// Time source for expiry checks and waits
    pub clock: Arc<dyn Clock>,
    /// DNS-01 settings
    pub dns01: Dns01Config,
}

impl CertbotContext {
    #[must_use]
    pub fn new(
        dns: Arc<dyn DnsProvider>,
        store: Arc<dyn CertificateStore>,
        issuer: Arc<dyn CertificateIssuer>,
        clock: Arc<dyn Clock>,
        dns01: Dns01Config,
    ) -> Self {
        Self {
            dns,
            store,
            issuer,
            clock,
            dns01,
        }
    }

    /// Context issuing through the ACME directory at `directory_url`, with
    /// challenges published in Route 53 through `dns`.
    #[must_use]
    pub fn with_acme(
        dns: Arc<dyn DnsProvider>,
        store: Arc<dyn CertificateStore>,
        clock: Arc<dyn Clock>,
        dns01: Dns01Config,
        directory_url: impl Into<String>,
    ) -> Self {
        let challenges = Arc::new(Route53ChallengeProvider::new(
            dns.clone(),
            clock.clone(),
            dns01.clone(),
        ));
        let issuer = Arc::new(AcmeIssuer::new(directory_url, challenges, clock.clone()));
        Self::new(dns, store, issuer, clock, dns01)
    }
}
