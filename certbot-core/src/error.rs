//! Unified error type definition

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use certbot_provider::{CredentialValidationError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No public hosted zone encloses the name
    #[error("No public hosted zone found for {0}")]
    ZoneNotFound(String),

    /// A bounded wait ran out of time
    #[error("Timed out after {timeout:?} waiting for {name}")]
    PropagationTimeout { name: String, timeout: Duration },

    /// ACME protocol failure (account, order, challenge, finalization)
    #[error("ACME error: {0}")]
    Acme(String),

    /// Certificate bundle could not be generated or parsed
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// Invalid input (event, configuration)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failure annotated with the step of the run it happened in
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        source: Box<CoreError>,
    },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ZoneNotFound(_) | Self::ValidationError(_) => true,
            Self::Stage { source, .. } => source.is_expected(),
            Self::Provider(e) => e.is_expected(),
            Self::PropagationTimeout { .. } | Self::Acme(_) | Self::Certificate(_) => false,
        }
    }

    /// Stage name of the outermost stage wrapper, if any.
    #[must_use]
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            Self::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// Innermost error below all stage wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Wraps errors with the run stage they occurred in.
pub trait StageExt<T> {
    fn stage(self, stage: &'static str) -> CoreResult<T>;
}

impl<T, E> StageExt<T> for std::result::Result<T, E>
where
    E: Into<CoreError>,
{
    fn stage(self, stage: &'static str) -> CoreResult<T> {
        self.map_err(|e| CoreError::Stage {
            stage,
            source: Box::new(e.into()),
        })
    }
}
