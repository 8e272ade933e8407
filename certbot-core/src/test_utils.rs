//! Test helpers
//!
//! In-memory mocks and factory functions for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use certbot_provider::{
    CertificateDetail, CertificateStore, CertificateSummary, ChangeAction, ChangeBatch,
    ChangeInfo, ChangeStatus, DnsProvider, DnsRecordType, HostedZone, ImportCertificateRequest,
    PaginatedResponse, ProviderError, ResourceRecordSet,
};
use chrono::{DateTime, TimeZone, Utc};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{inspect_certificate, CertbotContext, Dns01Config};
use crate::traits::{CertificateIssuer, ChallengeProvider, Clock};
use crate::types::CertificateResource;

fn same_name(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

// ===== MockDnsProvider =====

/// In-memory Route 53: zones, record sets and change status.
pub struct MockDnsProvider {
    zones: RwLock<Vec<HostedZone>>,
    record_sets: RwLock<HashMap<String, Vec<ResourceRecordSet>>>,
    /// GET change calls answering PENDING before INSYNC, per change id
    pending: RwLock<HashMap<String, u32>>,
    pending_polls: RwLock<u32>,
    get_change_error: RwLock<Option<ProviderError>>,
    batches: RwLock<Vec<(String, ChangeBatch)>>,
    zone_lookups: RwLock<Vec<String>>,
    get_change_calls: AtomicU32,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            record_sets: RwLock::new(HashMap::new()),
            pending: RwLock::new(HashMap::new()),
            pending_polls: RwLock::new(0),
            get_change_error: RwLock::new(None),
            batches: RwLock::new(Vec::new()),
            zone_lookups: RwLock::new(Vec::new()),
            get_change_calls: AtomicU32::new(0),
        }
    }

    pub async fn add_zone(&self, id: &str, name: &str, private_zone: bool) {
        self.zones.write().await.push(HostedZone {
            id: id.to_string(),
            name: name.to_string(),
            private_zone,
            record_count: None,
        });
    }

    pub async fn insert_record_set(&self, zone_id: &str, set: ResourceRecordSet) {
        self.record_sets
            .write()
            .await
            .entry(zone_id.to_string())
            .or_default()
            .push(set);
    }

    /// Subsequent changes stay PENDING for `polls` status checks.
    pub async fn set_pending_polls(&self, polls: u32) {
        *self.pending_polls.write().await = polls;
    }

    pub async fn set_get_change_error(&self, err: Option<ProviderError>) {
        *self.get_change_error.write().await = err;
    }

    /// TXT record set stored under `name`
    pub async fn record_set(&self, zone_id: &str, name: &str) -> Option<ResourceRecordSet> {
        self.record_sets
            .read()
            .await
            .get(zone_id)?
            .iter()
            .find(|set| set.record_type == DnsRecordType::Txt && same_name(&set.name, name))
            .cloned()
    }

    pub async fn submitted_batches(&self) -> Vec<(String, ChangeBatch)> {
        self.batches.read().await.clone()
    }

    pub async fn zone_lookups(&self) -> Vec<String> {
        self.zone_lookups.read().await.clone()
    }

    pub async fn get_change_calls(&self) -> u32 {
        self.get_change_calls.load(Ordering::SeqCst)
    }

    fn invalid_batch(detail: String) -> ProviderError {
        ProviderError::InvalidParameter {
            provider: "mock".to_string(),
            param: "ChangeBatch".to_string(),
            detail,
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_hosted_zones_by_name(
        &self,
        dns_name: &str,
    ) -> certbot_provider::Result<Vec<HostedZone>> {
        self.zone_lookups.write().await.push(dns_name.to_string());
        let mut zones = self.zones.read().await.clone();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(zones)
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        _start_name: &str,
        _start_type: DnsRecordType,
    ) -> certbot_provider::Result<Vec<ResourceRecordSet>> {
        // let other tasks run between a read and the change that follows it
        tokio::task::yield_now().await;
        let mut sets = self
            .record_sets
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_default();
        sets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sets)
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> certbot_provider::Result<ChangeInfo> {
        {
            let mut all = self.record_sets.write().await;
            let sets = all.entry(zone_id.to_string()).or_default();

            for change in &batch.changes {
                let wanted = &change.resource_record_set;
                let position = sets.iter().position(|set| {
                    set.record_type == wanted.record_type && same_name(&set.name, &wanted.name)
                });

                match (change.action, position) {
                    (ChangeAction::Create, Some(_)) => {
                        return Err(Self::invalid_batch(format!("{} already exists", wanted.name)));
                    }
                    (ChangeAction::Create | ChangeAction::Upsert, None) => sets.push(wanted.clone()),
                    (ChangeAction::Upsert, Some(i)) => sets[i] = wanted.clone(),
                    (ChangeAction::Delete, Some(i)) if sets[i] == *wanted => {
                        sets.remove(i);
                    }
                    (ChangeAction::Delete, _) => {
                        return Err(Self::invalid_batch(format!(
                            "{} not found with the given values",
                            wanted.name
                        )));
                    }
                }
            }
        }

        let mut batches = self.batches.write().await;
        batches.push((zone_id.to_string(), batch.clone()));
        let id = format!("C{}", batches.len());
        self.pending
            .write()
            .await
            .insert(id.clone(), *self.pending_polls.read().await);

        Ok(ChangeInfo {
            id,
            status: ChangeStatus::Pending,
            submitted_at: Some(Utc::now()),
            comment: batch.comment.clone(),
        })
    }

    async fn get_change(&self, change_id: &str) -> certbot_provider::Result<ChangeInfo> {
        self.get_change_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.get_change_error.read().await.clone() {
            return Err(err);
        }

        let mut pending = self.pending.write().await;
        let Some(remaining) = pending.get_mut(change_id) else {
            return Err(ProviderError::ChangeNotFound {
                provider: "mock".to_string(),
                change_id: change_id.to_string(),
                raw_message: None,
            });
        };

        let status = if *remaining == 0 {
            ChangeStatus::Insync
        } else {
            *remaining -= 1;
            ChangeStatus::Pending
        };

        Ok(ChangeInfo {
            id: change_id.to_string(),
            status,
            submitted_at: None,
            comment: None,
        })
    }
}

// ===== MockCertificateStore =====

/// In-memory ACM.
pub struct MockCertificateStore {
    certificates: RwLock<Vec<CertificateDetail>>,
    imports: RwLock<Vec<ImportCertificateRequest>>,
    page_size: RwLock<usize>,
    list_error: RwLock<Option<ProviderError>>,
    describe_error: RwLock<Option<ProviderError>>,
    import_error: RwLock<Option<ProviderError>>,
    list_calls: AtomicU32,
}

impl MockCertificateStore {
    pub fn new() -> Self {
        Self {
            certificates: RwLock::new(Vec::new()),
            imports: RwLock::new(Vec::new()),
            page_size: RwLock::new(100),
            list_error: RwLock::new(None),
            describe_error: RwLock::new(None),
            import_error: RwLock::new(None),
            list_calls: AtomicU32::new(0),
        }
    }

    pub async fn add_certificate(&self, arn: &str, domain: &str, not_after: Option<DateTime<Utc>>) {
        self.certificates.write().await.push(CertificateDetail {
            certificate_arn: arn.to_string(),
            domain_name: Some(domain.to_string()),
            subject_alternative_names: vec![domain.to_string()],
            status: Some("ISSUED".to_string()),
            certificate_type: Some("IMPORTED".to_string()),
            issuer: None,
            key_algorithm: None,
            not_before: None,
            not_after,
            imported_at: None,
        });
    }

    pub async fn set_page_size(&self, size: usize) {
        *self.page_size.write().await = size.max(1);
    }

    pub async fn set_list_error(&self, err: Option<ProviderError>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_describe_error(&self, err: Option<ProviderError>) {
        *self.describe_error.write().await = err;
    }

    pub async fn set_import_error(&self, err: Option<ProviderError>) {
        *self.import_error.write().await = err;
    }

    pub async fn imports(&self) -> Vec<ImportCertificateRequest> {
        self.imports.read().await.clone()
    }

    pub async fn certificate_count(&self) -> usize {
        self.certificates.read().await.len()
    }

    pub async fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn not_found(arn: &str) -> ProviderError {
        ProviderError::CertificateNotFound {
            provider: "mock".to_string(),
            certificate_arn: arn.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl CertificateStore for MockCertificateStore {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> certbot_provider::Result<PaginatedResponse<CertificateSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }

        let start: usize = next_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let page_size = *self.page_size.read().await;
        let certificates = self.certificates.read().await;
        let end = (start + page_size).min(certificates.len());

        let items = certificates
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|c| CertificateSummary {
                certificate_arn: c.certificate_arn.clone(),
                domain_name: c.domain_name.clone(),
                subject_alternative_names: c.subject_alternative_names.clone(),
                status: c.status.clone(),
                not_after: c.not_after,
            })
            .collect();
        let next_token = (end < certificates.len()).then(|| end.to_string());

        Ok(PaginatedResponse::new(items, next_token))
    }

    async fn describe_certificate(
        &self,
        certificate_arn: &str,
    ) -> certbot_provider::Result<CertificateDetail> {
        if let Some(err) = self.describe_error.read().await.clone() {
            return Err(err);
        }
        self.certificates
            .read()
            .await
            .iter()
            .find(|c| c.certificate_arn == certificate_arn)
            .cloned()
            .ok_or_else(|| Self::not_found(certificate_arn))
    }

    async fn import_certificate(
        &self,
        request: &ImportCertificateRequest,
    ) -> certbot_provider::Result<String> {
        if let Some(err) = self.import_error.read().await.clone() {
            return Err(err);
        }

        let pem = String::from_utf8_lossy(&request.certificate);
        let info = inspect_certificate(&pem).map_err(|e| ProviderError::InvalidParameter {
            provider: "mock".to_string(),
            param: "Certificate".to_string(),
            detail: e.to_string(),
        })?;

        let mut certificates = self.certificates.write().await;
        let arn = match &request.certificate_arn {
            Some(arn) => {
                if !certificates.iter().any(|c| &c.certificate_arn == arn) {
                    return Err(Self::not_found(arn));
                }
                arn.clone()
            }
            None => format!(
                "arn:aws:acm:us-east-1:123456789012:certificate/mock-{}",
                certificates.len() + 1
            ),
        };

        let detail = CertificateDetail {
            certificate_arn: arn.clone(),
            domain_name: info
                .subject_alternative_names
                .first()
                .cloned()
                .or(info.common_name),
            subject_alternative_names: info.subject_alternative_names,
            status: Some("ISSUED".to_string()),
            certificate_type: Some("IMPORTED".to_string()),
            issuer: Some(info.issuer),
            key_algorithm: Some("EC_prime256v1".to_string()),
            not_before: Some(info.not_before),
            not_after: Some(info.not_after),
            imported_at: Some(Utc::now()),
        };

        match certificates.iter_mut().find(|c| c.certificate_arn == arn) {
            Some(existing) => *existing = detail,
            None => certificates.push(detail),
        }
        self.imports.write().await.push(request.clone());

        Ok(arn)
    }
}

// ===== MockIssuer =====

/// Issuer minting certificates locally.
///
/// With a challenge provider attached, every domain is presented and then
/// cleaned up, the way an ACME order would.
pub struct MockIssuer {
    challenges: Option<Arc<dyn ChallengeProvider>>,
    error: RwLock<Option<String>>,
    calls: AtomicU32,
}

impl MockIssuer {
    pub fn new() -> Self {
        Self {
            challenges: None,
            error: RwLock::new(None),
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_challenges(challenges: Arc<dyn ChallengeProvider>) -> Self {
        Self {
            challenges: Some(challenges),
            ..Self::new()
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }

    pub async fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CertificateIssuer for MockIssuer {
    async fn obtain(&self, domains: &[String], _email: &str) -> CoreResult<CertificateResource> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error.read().await.clone() {
            return Err(CoreError::Acme(msg));
        }

        if let Some(challenges) = &self.challenges {
            for domain in domains {
                challenges
                    .present(domain, "mock-token", "mock-token.thumbprint")
                    .await?;
            }
            for domain in domains {
                challenges
                    .cleanup(domain, "mock-token", "mock-token.thumbprint")
                    .await?;
            }
        }

        Ok(mint_certificate(domains))
    }
}

/// Leaf for `domains` signed by a throwaway CA, bundled leaf first.
pub fn mint_certificate(domains: &[String]) -> CertificateResource {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.distinguished_name.push(DnType::CommonName, "Mock CA");
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::new(domains.to_vec()).unwrap();
    if let Some(first) = domains.first() {
        leaf_params.distinguished_name.push(DnType::CommonName, first.as_str());
    }
    let leaf = leaf_params.signed_by(&leaf_key, &ca, &ca_key).unwrap();

    CertificateResource {
        domains: domains.to_vec(),
        certificate: format!("{}{}", leaf.pem(), ca.pem()),
        private_key: leaf_key.serialize_pem(),
        issuer_certificate: ca.pem(),
    }
}

// ===== ManualClock =====

/// Clock whose `sleep` advances virtual time instantly.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: AtomicU32,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: AtomicU32::new(0),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(duration).unwrap();
    }

    /// Number of completed sleeps
    pub fn sleeps(&self) -> u32 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}

// ===== Factories =====

/// Context over `store` with an in-memory DNS, a [`MockIssuer`] and a [`ManualClock`].
pub fn test_context(
    store: Arc<MockCertificateStore>,
) -> (Arc<CertbotContext>, Arc<MockIssuer>, Arc<ManualClock>) {
    let issuer = Arc::new(MockIssuer::new());
    let clock = Arc::new(ManualClock::default());
    let ctx = CertbotContext::new(
        Arc::new(MockDnsProvider::new()),
        store,
        issuer.clone(),
        clock.clone(),
        Dns01Config::default(),
    );
    (Arc::new(ctx), issuer, clock)
}
