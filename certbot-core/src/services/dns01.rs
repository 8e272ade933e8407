//! DNS-01 challenge records in Route 53

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use certbot_provider::{
    Change, ChangeAction, ChangeBatch, ChangeInfo, ChangeStatus, DnsProvider, DnsRecordType,
    ResourceRecord, ResourceRecordSet,
};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult, StageExt};
use crate::traits::{ChallengeProvider, Clock};
use crate::utils::wait::{wait_for, PollPolicy};

/// Label prepended to the validated name.
pub const CHALLENGE_LABEL: &str = "_acme-challenge";

const CHANGE_COMMENT: &str = "ACME DNS challenge";
const STAGE: &str = "route53";
const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

/// Settings of the Route 53 challenge provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dns01Config {
    /// Zone to publish in; when unset the zone is looked up by name
    pub hosted_zone_id: Option<String>,
    /// TTL of the TXT record in seconds
    pub ttl: u32,
    /// How long to wait for a change to reach `INSYNC`
    pub propagation_timeout: Duration,
    /// Pause between change status checks
    pub polling_interval: Duration,
}

impl Default for Dns01Config {
    fn default() -> Self {
        Self {
            hosted_zone_id: None,
            ttl: 10,
            propagation_timeout: Duration::from_secs(2 * 60),
            polling_interval: Duration::from_secs(4),
        }
    }
}

impl Dns01Config {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.propagation_timeout, self.polling_interval)
    }
}

/// FQDN of the TXT record validating `domain` (a leading `*.` is dropped).
pub fn challenge_record_name(domain: &str) -> String {
    let domain = domain.trim_end_matches('.');
    let domain = domain.strip_prefix("*.").unwrap_or(domain);
    format!("{CHALLENGE_LABEL}.{domain}.")
}

/// TXT value proving control: unpadded base64url of SHA-256 over the key authorization.
pub fn challenge_record_value(key_authorization: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(key_authorization.as_bytes()))
}

/// Route 53 stores TXT values in quoted form.
fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// Candidate zone names for `fqdn`, longest first: `a.b.c.` yields `a.b.c.`, `b.c.`, `c.`.
fn zone_candidates(fqdn: &str) -> Vec<String> {
    let labels: Vec<&str> = fqdn
        .trim_end_matches('.')
        .split('.')
        .filter(|label| !label.is_empty())
        .collect();

    (0..labels.len())
        .map(|i| format!("{}.", labels[i..].join(".")))
        .collect()
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

/// DNS-01 challenge provider publishing TXT records through Route 53.
pub struct Route53ChallengeProvider {
    dns: Arc<dyn DnsProvider>,
    clock: Arc<dyn Clock>,
    config: Dns01Config,
}

impl Route53ChallengeProvider {
    #[must_use]
    pub fn new(dns: Arc<dyn DnsProvider>, clock: Arc<dyn Clock>, config: Dns01Config) -> Self {
        Self { dns, clock, config }
    }

    pub fn config(&self) -> &Dns01Config {
        &self.config
    }

    /// Public hosted zone the record belongs in.
    async fn hosted_zone_id(&self, fqdn: &str) -> CoreResult<String> {
        if let Some(id) = &self.config.hosted_zone_id {
            return Ok(id.trim_start_matches(HOSTED_ZONE_PREFIX).to_string());
        }

        for candidate in zone_candidates(fqdn) {
            let zones = self.dns.list_hosted_zones_by_name(&candidate).await?;
            if let Some(zone) = zones
                .into_iter()
                .find(|zone| !zone.private_zone && same_name(&zone.name, &candidate))
            {
                log::debug!("[route53] {fqdn} belongs to zone {} ({})", zone.name, zone.id);
                return Ok(zone.id.trim_start_matches(HOSTED_ZONE_PREFIX).to_string());
            }
        }

        Err(CoreError::ZoneNotFound(fqdn.to_string()))
    }

    async fn existing_record_set(
        &self,
        zone_id: &str,
        fqdn: &str,
    ) -> CoreResult<Option<ResourceRecordSet>> {
        Ok(self
            .dns
            .find_record_set(zone_id, fqdn, DnsRecordType::Txt)
            .await?)
    }

    /// Submit one change and wait until Route 53 reports it `INSYNC`.
    async fn change_record(
        &self,
        action: ChangeAction,
        zone_id: &str,
        record_set: ResourceRecordSet,
    ) -> CoreResult<()> {
        let batch = ChangeBatch {
            comment: Some(CHANGE_COMMENT.to_string()),
            changes: vec![Change {
                action,
                resource_record_set: record_set,
            }],
        };

        let info = self.dns.change_resource_record_sets(zone_id, &batch).await?;
        log::info!(
            "[route53] {} submitted in zone {zone_id}: change {} is {:?}",
            action.as_str(),
            info.id,
            info.status
        );

        self.wait_for_sync(info).await
    }

    async fn wait_for_sync(&self, info: ChangeInfo) -> CoreResult<()> {
        if info.status == ChangeStatus::Insync {
            return Ok(());
        }

        let dns = &self.dns;
        let change_id = info.id.as_str();
        wait_for(
            &format!("change {change_id}"),
            self.config.poll_policy(),
            self.clock.as_ref(),
            || async move {
                let current = dns.get_change(change_id).await?;
                Ok::<_, CoreError>(current.status == ChangeStatus::Insync)
            },
        )
        .await
    }

    async fn present_record(&self, domain: &str, key_authorization: &str) -> CoreResult<()> {
        let fqdn = challenge_record_name(domain);
        let value = quote(&challenge_record_value(key_authorization));
        let zone_id = self.hosted_zone_id(&fqdn).await?;

        let mut records = self
            .existing_record_set(&zone_id, &fqdn)
            .await?
            .map(|set| set.resource_records)
            .unwrap_or_default();

        if !records.iter().any(|record| record.value == value) {
            records.push(ResourceRecord::new(value));
        }

        let record_set = ResourceRecordSet {
            name: fqdn,
            record_type: DnsRecordType::Txt,
            ttl: Some(self.config.ttl),
            resource_records: records,
        };

        self.change_record(ChangeAction::Upsert, &zone_id, record_set)
            .await
    }

    async fn cleanup_record(&self, domain: &str) -> CoreResult<()> {
        let fqdn = challenge_record_name(domain);
        let zone_id = self.hosted_zone_id(&fqdn).await?;

        let Some(existing) = self.existing_record_set(&zone_id, &fqdn).await? else {
            log::debug!("[route53] nothing to remove at {fqdn}");
            return Ok(());
        };
        if existing.resource_records.is_empty() {
            return Ok(());
        }

        // DELETE must match the stored set exactly
        let record_set = ResourceRecordSet {
            name: fqdn,
            record_type: DnsRecordType::Txt,
            ttl: existing.ttl.or(Some(self.config.ttl)),
            resource_records: existing.resource_records,
        };

        self.change_record(ChangeAction::Delete, &zone_id, record_set)
            .await
    }
}

#[async_trait]
impl ChallengeProvider for Route53ChallengeProvider {
    async fn present(&self, domain: &str, _token: &str, key_authorization: &str) -> CoreResult<()> {
        self.present_record(domain, key_authorization)
            .await
            .stage(STAGE)
    }

    async fn cleanup(&self, domain: &str, _token: &str, _key_authorization: &str) -> CoreResult<()> {
        self.cleanup_record(domain).await.stage(STAGE)
    }
}
