//! ACM `CertificateStore` trait implementation

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;
use crate::traits::{CertificateStore, ErrorContext};
use crate::types::{
    CertificateDetail, CertificateSummary, ImportCertificateRequest, PaginatedResponse,
};

use super::types::{
    ALL_KEY_TYPES, CertificateArnRequest, DescribeCertificateResponse, Filters,
    ImportCertificateBody, ImportCertificateResponse, ListCertificatesRequest,
    ListCertificatesResponse,
};
use super::{AcmProvider, MAX_PAGE_SIZE};

impl AcmProvider {
    /// Wire body of an import; blobs are base64-encoded.
    fn import_body(request: &ImportCertificateRequest) -> ImportCertificateBody<'_> {
        ImportCertificateBody {
            certificate_arn: request.certificate_arn.as_deref(),
            certificate: STANDARD.encode(&request.certificate),
            private_key: STANDARD.encode(&request.private_key),
            certificate_chain: request
                .certificate_chain
                .as_ref()
                .filter(|chain| !chain.is_empty())
                .map(|chain| STANDARD.encode(chain)),
        }
    }
}

#[async_trait]
impl CertificateStore for AcmProvider {
    fn id(&self) -> &'static str {
        "acm"
    }

    async fn list_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<PaginatedResponse<CertificateSummary>> {
        let body = ListCertificatesRequest {
            next_token,
            max_items: MAX_PAGE_SIZE,
            includes: Filters {
                key_types: ALL_KEY_TYPES.to_vec(),
            },
        };

        let response: ListCertificatesResponse = self
            .request("ListCertificates", &body, ErrorContext::default())
            .await?;

        let items: Vec<CertificateSummary> = response
            .certificate_summary_list
            .into_iter()
            .map(CertificateSummary::from)
            .collect();
        log::debug!("[acm] listed {} certificate(s)", items.len());

        Ok(PaginatedResponse::new(
            items,
            response.next_token.filter(|t| !t.is_empty()),
        ))
    }

    async fn describe_certificate(&self, certificate_arn: &str) -> Result<CertificateDetail> {
        let response: DescribeCertificateResponse = self
            .request(
                "DescribeCertificate",
                &CertificateArnRequest { certificate_arn },
                ErrorContext::certificate(certificate_arn),
            )
            .await?;

        Ok(response.certificate.into())
    }

    async fn import_certificate(&self, request: &ImportCertificateRequest) -> Result<String> {
        let ctx = request
            .certificate_arn
            .as_deref()
            .map(ErrorContext::certificate)
            .unwrap_or_default();

        let response: ImportCertificateResponse = self
            .request("ImportCertificate", &Self::import_body(request), ctx)
            .await?;

        log::info!(
            "[acm] imported certificate {} (replaced: {})",
            response.certificate_arn,
            request.certificate_arn.is_some()
        );
        Ok(response.certificate_arn)
    }
}
