//! Shared live-test helpers

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use certbot_provider::{
    AwsCredentials, CertificateStore, ClientOptions, DnsProvider, HostedZone,
    create_certificate_store, create_dns_provider,
};

/// Skip the test when an environment variable is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique label for a throwaway TXT record
pub fn generate_test_record_name(domain: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{}.", &uuid.to_string()[..8], domain.trim_end_matches('.'))
}

/// Live test context: clients plus the test domain
pub struct TestContext {
    pub dns: Arc<dyn DnsProvider>,
    pub store: Arc<dyn CertificateStore>,
    pub domain: String,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let credentials = AwsCredentials::from_env().ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let region = env::var("ACM_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let options = ClientOptions::default();

        Some(Self {
            dns: create_dns_provider(credentials.clone(), &options).ok()?,
            store: create_certificate_store(credentials, &region, &options).ok()?,
            domain,
        })
    }

    /// Public hosted zone whose name equals the test domain
    pub async fn find_zone(&self) -> Option<HostedZone> {
        let fqdn = format!("{}.", self.domain.trim_end_matches('.'));
        self.dns
            .list_hosted_zones_by_name(&fqdn)
            .await
            .ok()?
            .into_iter()
            .find(|zone| zone.name == fqdn && !zone.private_zone)
    }
}
