//! Certificate store lookup, bundle parsing and import

use std::sync::Arc;

use chrono::{DateTime, Utc};
use certbot_provider::{CertificateDetail, CertificateSummary, ImportCertificateRequest};
use pem::{EncodeConfig, LineEnding, Pem};
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;
use x509_parser::time::ASN1Time;

use crate::error::{CoreError, CoreResult};
use crate::services::CertbotContext;
use crate::types::{CertificateInfo, CertificateResource};

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Certificate store operations of a run.
pub struct CertificateService {
    ctx: Arc<CertbotContext>,
}

impl CertificateService {
    #[must_use]
    pub fn new(ctx: Arc<CertbotContext>) -> Self {
        Self { ctx }
    }

    /// First stored certificate whose primary name is one of `domains`.
    pub async fn find_certificate(
        &self,
        domains: &[String],
    ) -> CoreResult<Option<CertificateSummary>> {
        let certificates = self.ctx.store.list_all_certificates().await?;
        log::debug!("{} certificate(s) in {}", certificates.len(), self.ctx.store.id());

        Ok(certificates.into_iter().find(|summary| {
            summary.domain_name.as_deref().is_some_and(|name| {
                domains
                    .iter()
                    .any(|domain| domain.trim_end_matches('.').eq_ignore_ascii_case(name))
            })
        }))
    }

    pub async fn certificate_details(&self, certificate_arn: &str) -> CoreResult<CertificateDetail> {
        Ok(self.ctx.store.describe_certificate(certificate_arn).await?)
    }

    /// Import `resource`, replacing `certificate_arn` in place when given.
    ///
    /// Only the leaf goes into the certificate field; the issuers travel as the chain.
    pub async fn import_certificate(
        &self,
        certificate_arn: Option<&str>,
        resource: &CertificateResource,
    ) -> CoreResult<String> {
        let server_certificate = retrieve_server_certificate(&resource.certificate)?;
        let chain = resource.issuer_certificate.trim();

        let request = ImportCertificateRequest {
            certificate_arn: certificate_arn.map(str::to_string),
            certificate: server_certificate.into_bytes(),
            private_key: resource.private_key.as_bytes().to_vec(),
            certificate_chain: (!chain.is_empty()).then(|| chain.as_bytes().to_vec()),
        };

        let arn = self.ctx.store.import_certificate(&request).await?;
        log::info!(
            "Imported certificate for {:?} as {arn}{}",
            resource.domains,
            if certificate_arn.is_some() { " (replaced)" } else { "" }
        );
        Ok(arn)
    }
}

/// First non-CA certificate of a PEM bundle, re-encoded as PEM.
pub fn retrieve_server_certificate(bundle: &str) -> CoreResult<String> {
    let leaf = leaf_block(bundle)?;
    Ok(pem::encode_config(
        &leaf,
        EncodeConfig::new().set_line_ending(LineEnding::LF),
    ))
}

/// Names and validity of the leaf of a PEM bundle.
pub fn inspect_certificate(bundle: &str) -> CoreResult<CertificateInfo> {
    let leaf = leaf_block(bundle)?;
    let cert = parse(&leaf)?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(String::from);

    let subject_alternative_names = cert
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some((*dns).to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let validity = cert.validity();
    Ok(CertificateInfo {
        common_name,
        subject_alternative_names,
        issuer: cert.issuer().to_string(),
        not_before: to_utc(validity.not_before)?,
        not_after: to_utc(validity.not_after)?,
    })
}

fn leaf_block(bundle: &str) -> CoreResult<Pem> {
    let blocks = pem::parse_many(bundle)
        .map_err(|e| CoreError::Certificate(format!("invalid PEM: {e}")))?;
    for block in blocks {
        if block.tag() != CERTIFICATE_LABEL {
            continue;
        }
        if !parse(&block)?.is_ca() {
            return Ok(block);
        }
    }

    Err(CoreError::Certificate(
        "bundle contains no server certificate".to_string(),
    ))
}

fn parse(block: &Pem) -> CoreResult<X509Certificate<'_>> {
    x509_parser::parse_x509_certificate(block.contents())
        .map(|(_, cert)| cert)
        .map_err(|e| CoreError::Certificate(format!("unable to parse certificate: {e}")))
}

fn to_utc(time: ASN1Time) -> CoreResult<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| CoreError::Certificate(format!("validity out of range: {time}")))
}
