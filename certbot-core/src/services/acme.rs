//! ACME certificate issuance over DNS-01

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use instant_acme::{
    Account, AuthorizationStatus, ChallengeType, Identifier, LetsEncrypt, NewAccount, NewOrder,
    Order, OrderStatus,
};
use rcgen::{CertificateParams, DistinguishedName, KeyPair};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CertificateIssuer, ChallengeProvider, Clock};
use crate::types::CertificateResource;
use crate::utils::wait::{wait_for, PollPolicy};

const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";

/// Let's Encrypt directory, production or staging.
pub fn lets_encrypt_url(staging: bool) -> &'static str {
    if staging {
        LetsEncrypt::Staging.url()
    } else {
        LetsEncrypt::Production.url()
    }
}

/// A challenge record that has been (or may have been) published.
struct Presented {
    domain: String,
    token: String,
    key_authorization: String,
}

/// DNS-01 challenge offered for one authorization.
struct Dns01Challenge {
    token: String,
    url: String,
    key_authorization: String,
}

/// One authorization of an order, reduced to what validation needs.
struct OrderAuthorization {
    domain: String,
    valid: bool,
    challenge: Option<Dns01Challenge>,
}

/// The part of an ACME order driven while its authorizations are validated.
#[async_trait]
trait ValidationOrder: Send {
    async fn fetch_authorizations(&mut self) -> CoreResult<Vec<OrderAuthorization>>;

    async fn challenge_ready(&mut self, url: &str) -> CoreResult<()>;

    async fn refresh_status(&mut self) -> CoreResult<OrderStatus>;
}

#[async_trait]
impl ValidationOrder for Order {
    async fn fetch_authorizations(&mut self) -> CoreResult<Vec<OrderAuthorization>> {
        let authorizations = Order::authorizations(self)
            .await
            .map_err(|e| acme_error("failed to fetch authorizations", &e))?;

        Ok(authorizations
            .iter()
            .map(|authorization| {
                let Identifier::Dns(domain) = &authorization.identifier;
                OrderAuthorization {
                    domain: domain.clone(),
                    valid: authorization.status == AuthorizationStatus::Valid,
                    challenge: authorization
                        .challenges
                        .iter()
                        .find(|c| c.r#type == ChallengeType::Dns01)
                        .map(|c| Dns01Challenge {
                            token: c.token.clone(),
                            url: c.url.clone(),
                            key_authorization: self.key_authorization(c).as_str().to_string(),
                        }),
                }
            })
            .collect())
    }

    async fn challenge_ready(&mut self, url: &str) -> CoreResult<()> {
        Order::set_challenge_ready(self, url)
            .await
            .map_err(|e| acme_error("failed to mark challenge ready", &e))
    }

    async fn refresh_status(&mut self) -> CoreResult<OrderStatus> {
        let state = Order::refresh(self)
            .await
            .map_err(|e| acme_error("failed to refresh order", &e))?;
        Ok(state.status)
    }
}

/// [`CertificateIssuer`] talking to an ACME directory, validating with DNS-01.
///
/// A fresh account and key pair are created for every certificate; nothing is stored.
pub struct AcmeIssuer {
    directory_url: String,
    challenges: Arc<dyn ChallengeProvider>,
    clock: Arc<dyn Clock>,
    order_policy: PollPolicy,
}

impl AcmeIssuer {
    #[must_use]
    pub fn new(
        directory_url: impl Into<String>,
        challenges: Arc<dyn ChallengeProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory_url: directory_url.into(),
            challenges,
            clock,
            order_policy: PollPolicy::new(Duration::from_secs(3 * 60), Duration::from_secs(2)),
        }
    }

    /// How long to wait for the order to become ready and then valid.
    #[must_use]
    pub fn with_order_policy(mut self, policy: PollPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    pub fn directory_url(&self) -> &str {
        &self.directory_url
    }

    async fn create_account(&self, email: &str) -> CoreResult<Account> {
        let contact = format!("mailto:{email}");
        let new_account = NewAccount {
            contact: &[&contact],
            terms_of_service_agreed: true,
            only_return_existing: false,
        };

        let (account, _credentials) = Account::create(&new_account, &self.directory_url, None)
            .await
            .map_err(|e| acme_error("failed to register account", &e))?;
        log::info!("[acme] Registered account at {}", self.directory_url);
        Ok(account)
    }

    /// Publish every challenge of `order`, wait until the order is ready and
    /// withdraw the records again, whether or not validation succeeded.
    async fn validate<O: ValidationOrder>(&self, order: &Mutex<O>) -> CoreResult<()> {
        let mut presented = Vec::new();
        let published = {
            let mut order = order.lock().await;
            self.publish_challenges(&mut *order, &mut presented).await
        };
        let validated = match published {
            Ok(()) => {
                self.wait_for_order(order, "order validation", OrderStatus::Ready)
                    .await
            }
            Err(e) => Err(e),
        };
        self.cleanup_challenges(&presented).await;
        validated
    }

    /// Publish a DNS-01 record for every pending authorization and tell the
    /// server it may validate. Records are appended to `presented` before they
    /// are published, so a failure halfway still gets cleaned up.
    async fn publish_challenges<O: ValidationOrder>(
        &self,
        order: &mut O,
        presented: &mut Vec<Presented>,
    ) -> CoreResult<()> {
        for authorization in order.fetch_authorizations().await? {
            let domain = authorization.domain;
            if authorization.valid {
                log::debug!("[acme] {domain} already authorized");
                continue;
            }

            let challenge = authorization
                .challenge
                .ok_or_else(|| CoreError::Acme(format!("no DNS-01 challenge offered for {domain}")))?;

            presented.push(Presented {
                domain: domain.clone(),
                token: challenge.token.clone(),
                key_authorization: challenge.key_authorization.clone(),
            });

            self.challenges
                .present(&domain, &challenge.token, &challenge.key_authorization)
                .await?;

            order.challenge_ready(&challenge.url).await?;
            log::info!("[acme] Challenge for {domain} published");
        }

        Ok(())
    }

    /// Remove every presented record, one at a time; failures are logged, not returned.
    ///
    /// A domain and its wildcard share one record name, so cleanups must not overlap.
    async fn cleanup_challenges(&self, presented: &[Presented]) {
        for p in presented {
            if let Err(e) = self
                .challenges
                .cleanup(&p.domain, &p.token, &p.key_authorization)
                .await
            {
                log::warn!("[acme] Failed to clean up challenge for {}: {e}", p.domain);
            }
        }
    }

    /// Poll the order until it reaches `target` (or is already valid).
    async fn wait_for_order<O: ValidationOrder>(
        &self,
        order: &Mutex<O>,
        name: &str,
        target: OrderStatus,
    ) -> CoreResult<()> {
        wait_for(name, self.order_policy, self.clock.as_ref(), || async move {
            match order.lock().await.refresh_status().await? {
                OrderStatus::Invalid => Err(CoreError::Acme("order became invalid".to_string())),
                status => Ok(status == target || status == OrderStatus::Valid),
            }
        })
        .await
    }

    async fn finalize(
        &self,
        order: &Mutex<Order>,
        domains: &[String],
    ) -> CoreResult<(String, String)> {
        let mut params = CertificateParams::new(domains.to_vec()).map_err(certificate_error)?;
        params.distinguished_name = DistinguishedName::new();
        let key_pair = KeyPair::generate().map_err(certificate_error)?;
        let csr = params
            .serialize_request(&key_pair)
            .map_err(certificate_error)?;

        order
            .lock()
            .await
            .finalize(csr.der())
            .await
            .map_err(|e| acme_error("failed to finalize order", &e))?;

        self.wait_for_order(order, "certificate issuance", OrderStatus::Valid)
            .await?;

        let chain = order
            .lock()
            .await
            .certificate()
            .await
            .map_err(|e| acme_error("failed to download certificate", &e))?
            .ok_or_else(|| CoreError::Acme("no certificate returned".to_string()))?;

        Ok((chain, key_pair.serialize_pem()))
    }
}

#[async_trait]
impl CertificateIssuer for AcmeIssuer {
    async fn obtain(&self, domains: &[String], email: &str) -> CoreResult<CertificateResource> {
        if domains.is_empty() {
            return Err(CoreError::ValidationError(
                "no domains to order a certificate for".to_string(),
            ));
        }

        let account = self.create_account(email).await?;
        let identifiers: Vec<Identifier> = domains
            .iter()
            .map(|domain| Identifier::Dns(domain.clone()))
            .collect();
        let order = account
            .new_order(&NewOrder {
                identifiers: &identifiers,
            })
            .await
            .map_err(|e| acme_error("failed to create order", &e))?;
        log::info!("[acme] Order created for {domains:?}");

        let order = Mutex::new(order);
        self.validate(&order).await?;

        let (certificate, private_key) = self.finalize(&order, domains).await?;
        log::info!("[acme] Certificate issued for {domains:?}");

        Ok(CertificateResource {
            domains: domains.to_vec(),
            issuer_certificate: issuer_chain(&certificate),
            certificate,
            private_key,
        })
    }
}

/// The bundle minus its first certificate.
fn issuer_chain(bundle: &str) -> String {
    bundle
        .find(END_CERTIFICATE)
        .map(|end| bundle[end + END_CERTIFICATE.len()..].trim_start().to_string())
        .unwrap_or_default()
}

fn acme_error(action: &str, e: &instant_acme::Error) -> CoreError {
    CoreError::Acme(format!("{action}: {e}"))
}

#[allow(clippy::needless_pass_by_value)]
fn certificate_error(e: rcgen::Error) -> CoreError {
    CoreError::Certificate(e.to_string())
}
