//! ACM HTTP request methods (JSON 1.1 protocol)

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::aws::sign::SigningRequest;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::ErrorResponse;
use super::{ACM_TARGET_PREFIX, AcmProvider};

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

impl AcmProvider {
    /// Map a non-2xx ACM response
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(error) = serde_json::from_str::<ErrorResponse>(response_text)
            && let Some(code) = error.code()
        {
            return Err(self.map_error(
                RawApiError::with_code(code, error.message.clone().unwrap_or_default()),
                ctx,
            ));
        }

        Err(self.unknown_error(RawApiError::new(format!(
            "HTTP {status}: {}",
            truncate_for_log(response_text)
        ))))
    }

    /// Invoke `CertificateManager.<action>` with a JSON body
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;

        log::debug!("Request Body: {}", truncate_for_log(&payload));

        let target = format!("{ACM_TARGET_PREFIX}.{action}");
        let url = format!("https://{}/", self.host);
        let headers = [
            ("content-type", JSON_CONTENT_TYPE.to_string()),
            ("x-amz-target", target),
        ];

        let build = || {
            let signed = self.signer.sign(
                &SigningRequest {
                    method: "POST",
                    host: &self.host,
                    path: "/",
                    query: &[],
                    headers: &headers,
                    payload: payload.as_bytes(),
                },
                Utc::now(),
            );

            let mut request = self.client.post(&url);
            for (name, value) in headers.iter().chain(signed.iter()) {
                request = request.header(*name, value);
            }
            request.body(payload.clone())
        };

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            build,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_json(&response_text, self.provider_name())
    }
}
