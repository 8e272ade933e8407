//! Pieces shared by every AWS client: request signing and the error codes
//! common to all AWS query/JSON/REST protocols.

pub(crate) mod sign;

use crate::error::ProviderError;
use crate::traits::RawApiError;

/// Region for global services and the default certificate region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Map error codes every AWS service can return.
///
/// Returns `None` for service-specific codes so the caller can keep matching.
pub(crate) fn map_common_error(provider: &str, raw: &RawApiError) -> Option<ProviderError> {
    let code = raw.code.as_deref()?;
    let provider = provider.to_string();
    let message = Some(raw.message.clone());

    let err = match code {
        // ============ Authentication ============
        "InvalidClientTokenId"
        | "UnrecognizedClientException"
        | "SignatureDoesNotMatch"
        | "InvalidSignatureException"
        | "IncompleteSignature"
        | "MissingAuthenticationToken"
        | "ExpiredToken"
        | "ExpiredTokenException"
        | "RequestExpired" => ProviderError::InvalidCredentials {
            provider,
            raw_message: message,
        },

        // ============ Authorization ============
        "AccessDenied" | "AccessDeniedException" | "NotAuthorized" => {
            ProviderError::PermissionDenied {
                provider,
                raw_message: message,
            }
        }

        // ============ Throttling ============
        "Throttling" | "ThrottlingException" | "RequestLimitExceeded" | "TooManyRequestsException" => {
            ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: message,
            }
        }

        // ============ Service side ============
        "ServiceUnavailable" | "ServiceUnavailableException" | "InternalFailure" | "InternalError" => {
            ProviderError::NetworkError {
                provider,
                detail: raw.message.clone(),
            }
        }

        _ => return None,
    };

    Some(err)
}
