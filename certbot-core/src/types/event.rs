//! Trigger input and run result

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::RenewalStatus;

/// One invocation's worth of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalEvent {
    /// Fully qualified names the certificate must cover; the first is the primary name.
    #[serde(rename = "domainName", alias = "domainNames")]
    pub domain_names: Vec<String>,

    /// Contact address for the ACME account.
    pub email: String,

    /// Renew once this many days or fewer remain.
    pub renew_threshold: u16,
}

impl RenewalEvent {
    /// Reject events the run cannot act on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.domain_names.is_empty() {
            return Err(CoreError::ValidationError(
                "at least one domain name is required".to_string(),
            ));
        }
        if let Some(blank) = self.domain_names.iter().position(|d| d.trim().is_empty()) {
            return Err(CoreError::ValidationError(format!(
                "domain name #{} is empty",
                blank + 1
            )));
        }
        if self.email.trim().is_empty() {
            return Err(CoreError::ValidationError("email is required".to_string()));
        }
        Ok(())
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RunOutcome {
    /// No certificate existed; a new one was issued and imported.
    #[serde(rename_all = "camelCase")]
    Issued { certificate_arn: String },

    /// The existing certificate was due and has been replaced in place.
    #[serde(rename_all = "camelCase")]
    Renewed {
        certificate_arn: String,
        status: Option<RenewalStatus>,
    },

    /// The existing certificate is not due yet.
    #[serde(rename_all = "camelCase")]
    NotDue {
        certificate_arn: String,
        status: RenewalStatus,
    },
}

impl RunOutcome {
    pub fn certificate_arn(&self) -> &str {
        match self {
            Self::Issued { certificate_arn }
            | Self::Renewed {
                certificate_arn, ..
            }
            | Self::NotDue {
                certificate_arn, ..
            } => certificate_arn,
        }
    }
}
