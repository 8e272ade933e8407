//! Runtime configuration: JSON file plus environment overrides

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use certbot_core::services::lets_encrypt_url;
use certbot_core::Dns01Config;
use certbot_provider::{ClientOptions, DEFAULT_REGION};
use serde::Deserialize;

pub const ENV_ACME_DIRECTORY_URL: &str = "ACME_DIRECTORY_URL";
pub const ENV_ACM_REGION: &str = "ACM_REGION";
pub const ENV_HOSTED_ZONE_ID: &str = "ROUTE53_HOSTED_ZONE_ID";

/// Settings that rarely change between runs. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// ACME directory; Let's Encrypt production when unset
    pub acme_directory_url: Option<String>,
    /// Region certificates are imported into
    pub acm_region: Option<String>,
    /// Skip the hosted zone lookup and publish here
    pub hosted_zone_id: Option<String>,
    /// TTL of challenge records, seconds
    pub ttl: Option<u32>,
    pub propagation_timeout_secs: Option<u64>,
    pub polling_interval_secs: Option<u64>,
    /// Retries of transient API errors
    pub max_retries: Option<u32>,
}

impl AppConfig {
    /// Read `path`, or return the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse JSON settings. Blank strings count as unset.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(raw)?;
        for value in [
            &mut config.acme_directory_url,
            &mut config.acm_region,
            &mut config.hosted_zone_id,
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }

        if config.polling_interval_secs == Some(0) {
            bail!("polling_interval_secs must be at least 1");
        }
        Ok(config)
    }

    /// Environment variables win over the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_ACME_DIRECTORY_URL) {
            self.acme_directory_url = Some(url);
        }
        if let Some(region) = non_empty(ENV_ACM_REGION) {
            self.acm_region = Some(region);
        }
        if let Some(zone) = non_empty(ENV_HOSTED_ZONE_ID) {
            self.hosted_zone_id = Some(zone);
        }
    }

    /// `--staging` beats a configured directory, which beats production.
    pub fn directory_url(&self, staging: bool) -> String {
        if staging {
            return lets_encrypt_url(true).to_string();
        }
        self.acme_directory_url
            .clone()
            .unwrap_or_else(|| lets_encrypt_url(false).to_string())
    }

    pub fn acm_region(&self) -> &str {
        self.acm_region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn dns01(&self) -> Dns01Config {
        let defaults = Dns01Config::default();
        Dns01Config {
            hosted_zone_id: self.hosted_zone_id.clone(),
            ttl: self.ttl.unwrap_or(defaults.ttl),
            propagation_timeout: self
                .propagation_timeout_secs
                .map_or(defaults.propagation_timeout, Duration::from_secs),
            polling_interval: self
                .polling_interval_secs
                .map_or(defaults.polling_interval, Duration::from_secs),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();

        assert_eq!(config.acm_region(), "us-east-1");
        assert_eq!(config.dns01(), Dns01Config::default());
        assert_eq!(config.client_options().max_retries, 2);
        assert_eq!(config.directory_url(false), lets_encrypt_url(false));
        assert_eq!(config.directory_url(true), lets_encrypt_url(true));
    }

    #[test]
    fn parses_file_contents() {
        let config = AppConfig::parse(
            r#"{
                "acme_directory_url": "https://acme.internal/directory",
                "acm_region": "eu-west-1",
                "hosted_zone_id": "Z123",
                "ttl": 60,
                "propagation_timeout_secs": 300,
                "polling_interval_secs": 10,
                "max_retries": 5
            }"#,
        )
        .unwrap();

        let dns01 = config.dns01();
        assert_eq!(dns01.hosted_zone_id.as_deref(), Some("Z123"));
        assert_eq!(dns01.ttl, 60);
        assert_eq!(dns01.propagation_timeout, Duration::from_secs(300));
        assert_eq!(dns01.polling_interval, Duration::from_secs(10));
        assert_eq!(config.client_options().max_retries, 5);
        assert_eq!(config.acm_region(), "eu-west-1");
        assert_eq!(config.directory_url(false), "https://acme.internal/directory");
        assert_eq!(config.directory_url(true), lets_encrypt_url(true));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(AppConfig::parse(r#"{"tll": 60}"#).is_err());
    }

    #[test]
    fn rejects_zero_polling_interval() {
        let err = AppConfig::parse(r#"{"polling_interval_secs": 0}"#).unwrap_err();
        assert!(err.to_string().contains("polling_interval_secs"));
    }

    #[test]
    fn blank_file_values_are_unset() {
        let config = AppConfig::parse(
            r#"{"hosted_zone_id": "", "acm_region": "  ", "acme_directory_url": ""}"#,
        )
        .unwrap();

        assert_eq!(config.dns01().hosted_zone_id, None);
        assert_eq!(config.acm_region(), "us-east-1");
        assert_eq!(config.directory_url(false), lets_encrypt_url(false));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ACM_REGION, "ap-southeast-2"),
            (ENV_HOSTED_ZONE_ID, "ZENV"),
            (ENV_ACME_DIRECTORY_URL, "  "),
        ]);
        let mut config = AppConfig {
            acm_region: Some("eu-west-1".to_string()),
            acme_directory_url: Some("https://file/directory".to_string()),
            ..AppConfig::default()
        };

        config.apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.acm_region(), "ap-southeast-2");
        assert_eq!(config.hosted_zone_id.as_deref(), Some("ZENV"));
        // blank values are ignored
        assert_eq!(config.directory_url(false), "https://file/directory");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/certbot.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
