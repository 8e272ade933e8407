//! Route 53 HTTP request methods

use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::aws::sign::{SigningRequest, canonical_query, encode_path};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{ErrorResponse, InvalidChangeBatchResponse};
use super::{ROUTE53_API_VERSION, ROUTE53_HOST, Route53Provider};

const XML_CONTENT_TYPE: &str = "application/xml";

impl Route53Provider {
    // ==================== helpers ====================

    /// Map a non-2xx Route 53 response
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(error) = quick_xml::de::from_str::<ErrorResponse>(response_text) {
            log::debug!("[route53] API error {}: {:?}", error.error.code, error.error.message);
            return Err(self.map_error(
                RawApiError::with_code(error.error.code, error.error.message.unwrap_or_default()),
                ctx,
            ));
        }

        // InvalidChangeBatch uses its own root element
        if let Ok(batch) = quick_xml::de::from_str::<InvalidChangeBatchResponse>(response_text) {
            return Err(self.map_error(
                RawApiError::with_code("InvalidChangeBatch", batch.messages.items.join("; ")),
                ctx,
            ));
        }

        Err(self.unknown_error(RawApiError::new(format!(
            "HTTP {status}: {}",
            truncate_for_log(response_text)
        ))))
    }

    fn parse_xml<T: DeserializeOwned>(&self, response_text: &str) -> Result<T> {
        quick_xml::de::from_str(response_text).map_err(|e| {
            log::error!("[route53] XML parse failed: {e}");
            log::error!("[route53] Raw response: {}", truncate_for_log(response_text));
            self.parse_error(e)
        })
    }

    /// Sign and send a request; `path` is relative to the API version prefix.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let path = format!("/{ROUTE53_API_VERSION}{path}");
        let query_string = canonical_query(query);
        let url = if query_string.is_empty() {
            format!("https://{ROUTE53_HOST}{}", encode_path(&path))
        } else {
            format!("https://{ROUTE53_HOST}{}?{query_string}", encode_path(&path))
        };

        if let Some(payload) = &body {
            log::debug!("Request Body: {}", truncate_for_log(payload));
        }

        let content_headers: Vec<(&str, String)> = if body.is_some() {
            vec![("content-type", XML_CONTENT_TYPE.to_string())]
        } else {
            Vec::new()
        };

        let build = || {
            let payload = body.as_deref().unwrap_or_default();
            let signed = self.signer.sign(
                &SigningRequest {
                    method: method.as_str(),
                    host: ROUTE53_HOST,
                    path: &path,
                    query,
                    headers: &content_headers,
                    payload: payload.as_bytes(),
                },
                Utc::now(),
            );

            let mut request = self.client.request(method.clone(), &url);
            for (name, value) in content_headers.iter().chain(signed.iter()) {
                request = request.header(*name, value);
            }
            if body.is_some() {
                request = request.body(payload.to_string());
            }
            request
        };

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            build,
            self.provider_name(),
            method.as_str(),
            &url,
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        Ok(response_text)
    }

    // ==================== API methods ====================

    /// Perform a GET request and parse the XML response
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self.execute(Method::GET, path, query, None, ctx).await?;
        self.parse_xml(&text)
    }

    /// Serialize `body` as XML, POST it and parse the XML response
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let xml = quick_xml::se::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })?;
        let payload = format!(r#"<?xml version="1.0" encoding="UTF-8"?>{xml}"#);

        let text = self
            .execute(Method::POST, path, &[], Some(payload), ctx)
            .await?;
        self.parse_xml(&text)
    }
}
