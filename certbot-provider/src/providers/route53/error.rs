//! Route 53 error mapping
//!
//! Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
//!
//! - **Zone**: `NoSuchHostedZone`, `HostedZoneNotFound` → `DomainNotFound`
//! - **Change**: `NoSuchChange` → `ChangeNotFound`
//! - **Input**: `InvalidChangeBatch`, `InvalidInput`, `InvalidDomainName`, `InvalidArgument` → `InvalidParameter`
//! - **Concurrency**: `PriorRequestNotComplete` → `RateLimited` (retried)
//! - **Quota**: `LimitsExceeded`, `TooManyHostedZones` → `QuotaExceeded`
//! - Credentials, permissions, throttling: shared AWS codes

use crate::error::ProviderError;
use crate::providers::aws::map_common_error;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Provider;

impl ProviderErrorMapper for Route53Provider {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("NoSuchHostedZone" | "HostedZoneNotFound") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("NoSuchChange") => ProviderError::ChangeNotFound {
                provider: self.provider_name().to_string(),
                change_id: context.change_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("InvalidChangeBatch") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ChangeBatch".to_string(),
                detail: raw.message,
            },

            Some("InvalidDomainName") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "name".to_string(),
                detail: raw.message,
            },

            Some("InvalidInput" | "InvalidArgument" | "InvalidPaginationToken") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "input".to_string(),
                    detail: raw.message,
                }
            }

            // Another change to the same zone is still being applied
            Some("PriorRequestNotComplete") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            Some("LimitsExceeded" | "TooManyHostedZones") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            _ => map_common_error(self.provider_name(), &raw)
                .unwrap_or_else(|| self.unknown_error(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AwsCredentials;

    fn provider() -> Route53Provider {
        Route53Provider::new(AwsCredentials::new("AKIDEXAMPLE", "secret")).unwrap()
    }

    fn map(code: &str, ctx: ErrorContext) -> ProviderError {
        provider().map_error(RawApiError::with_code(code, "message"), ctx)
    }

    #[test]
    fn no_such_hosted_zone_carries_zone() {
        let err = map("NoSuchHostedZone", ErrorContext::zone("Z123"));
        assert!(
            matches!(&err, ProviderError::DomainNotFound { domain, .. } if domain == "Z123"),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn no_such_change_carries_id() {
        let err = map("NoSuchChange", ErrorContext::change("C1"));
        assert!(
            matches!(&err, ProviderError::ChangeNotFound { change_id, .. } if change_id == "C1"),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn invalid_change_batch_is_parameter_error() {
        let err = map("InvalidChangeBatch", ErrorContext::default());
        assert!(
            matches!(&err, ProviderError::InvalidParameter { param, .. } if param == "ChangeBatch"),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn prior_request_not_complete_is_retryable() {
        assert!(map("PriorRequestNotComplete", ErrorContext::default()).is_retryable());
    }

    #[test]
    fn common_and_unknown_codes() {
        assert!(matches!(
            map("AccessDenied", ErrorContext::default()),
            ProviderError::PermissionDenied { .. }
        ));
        assert!(matches!(
            map("SomethingNew", ErrorContext::default()),
            ProviderError::Unknown { raw_code: Some(_), .. }
        ));
    }
}
