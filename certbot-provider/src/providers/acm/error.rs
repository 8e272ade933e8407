//! ACM error mapping
//!
//! Reference: <https://docs.aws.amazon.com/acm/latest/APIReference/CommonErrors.html>

use crate::error::ProviderError;
use crate::providers::aws::map_common_error;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AcmProvider;

impl ProviderErrorMapper for AcmProvider {
    fn provider_name(&self) -> &'static str {
        "acm"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("ResourceNotFoundException") => ProviderError::CertificateNotFound {
                provider: self.provider_name().to_string(),
                certificate_arn: context.certificate_arn.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("LimitExceededException") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("InvalidArnException") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "CertificateArn".to_string(),
                detail: raw.message,
            },

            Some("InvalidTagException" | "TagPolicyException" | "TooManyTagsException") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "Tags".to_string(),
                    detail: raw.message,
                }
            }

            Some(
                "ValidationException"
                | "InvalidParameterException"
                | "InvalidArgsException"
                | "SerializationException",
            ) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "input".to_string(),
                detail: raw.message,
            },

            _ => map_common_error(self.provider_name(), &raw)
                .unwrap_or_else(|| self.unknown_error(raw)),
        }
    }
}
