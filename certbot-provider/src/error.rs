use serde::{Deserialize, Serialize};

/// Unified error type for all cloud API operations.
///
/// Each variant includes a `provider` field identifying which service produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API throttling
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Service that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The request signature or the credentials behind it were rejected.
    InvalidCredentials {
        /// Service that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., malformed change batch, bad ARN).
    InvalidParameter {
        /// Service that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's resource quota has been exceeded.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        /// Service that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or a throttling error code).
    ///
    /// This is a transient error; the request should succeed after waiting.
    RateLimited {
        /// Service that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Service that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The specified hosted zone was not found.
    DomainNotFound {
        /// Service that produced the error.
        provider: String,
        /// Zone id or name that was not found.
        domain: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS change was not found.
    ChangeNotFound {
        /// Service that produced the error.
        provider: String,
        /// Change id that was not found.
        change_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified certificate was not found.
    CertificateNotFound {
        /// Service that produced the error.
        provider: String,
        /// ARN of the certificate that was not found.
        certificate_arn: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated principal lacks permission for the requested operation.
    PermissionDenied {
        /// Service that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Service that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Service that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Service that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is an expected outcome (bad input, missing resource),
    /// used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::ChangeNotFound { .. }
                | Self::CertificateNotFound { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Hosted zone '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Hosted zone '{domain}' not found")
                }
            }
            Self::ChangeNotFound {
                provider,
                change_id,
                ..
            } => {
                write!(f, "[{provider}] Change '{change_id}' not found")
            }
            Self::CertificateNotFound {
                provider,
                certificate_arn,
                ..
            } => {
                write!(f, "[{provider}] Certificate '{certificate_arn}' not found")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "route53".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[route53] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "acm".to_string(),
            raw_message: Some("The security token included in the request is invalid".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[acm] Invalid credentials: The security token included in the request is invalid"
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "acm".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[acm] Invalid credentials");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "route53".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = ProviderError::RateLimited {
            provider: "route53".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Rate limited");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ProviderError::DomainNotFound {
            provider: "route53".to_string(),
            domain: "Z123".to_string(),
            raw_message: Some("No hosted zone found with ID: Z123".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[route53] Hosted zone 'Z123' not found: No hosted zone found with ID: Z123"
        );
    }

    #[test]
    fn display_change_not_found() {
        let e = ProviderError::ChangeNotFound {
            provider: "route53".to_string(),
            change_id: "C2682N5HXP0BZ4".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Change 'C2682N5HXP0BZ4' not found");
    }

    #[test]
    fn display_certificate_not_found() {
        let e = ProviderError::CertificateNotFound {
            provider: "acm".to_string(),
            certificate_arn: "arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string(),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[acm] Certificate 'arn:aws:acm:us-east-1:123456789012:certificate/abc' not found"
        );
    }

    #[test]
    fn display_invalid_parameter() {
        let e = ProviderError::InvalidParameter {
            provider: "route53".to_string(),
            param: "ChangeBatch".to_string(),
            detail: "Tried to delete resource record set but it was not found".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[route53] Invalid parameter 'ChangeBatch': Tried to delete resource record set but it was not found"
        );
    }

    #[test]
    fn display_unknown() {
        let e = ProviderError::Unknown {
            provider: "acm".to_string(),
            raw_code: Some("InternalFailure".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[acm] something broke");
    }

    #[test]
    fn serialize_tagged_by_code() {
        let e = ProviderError::RateLimited {
            provider: "acm".to_string(),
            retry_after: Some(60),
            raw_message: Some("Rate exceeded".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn retryable_variants() {
        assert!(
            ProviderError::NetworkError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_retryable()
        );
        assert!(
            ProviderError::Timeout {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_retryable()
        );
        assert!(
            ProviderError::RateLimited {
                provider: "t".into(),
                retry_after: None,
                raw_message: None,
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::QuotaExceeded {
                provider: "t".into(),
                raw_message: None,
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::CertificateNotFound {
                provider: "t".into(),
                certificate_arn: "x".into(),
                raw_message: None,
            }
            .is_retryable()
        );
    }

    #[test]
    fn expected_variants() {
        assert!(
            ProviderError::DomainNotFound {
                provider: "t".into(),
                domain: "x".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::ParseError {
                provider: "t".into(),
                detail: "bad xml".into(),
            }
            .is_expected()
        );
    }
}
