//! DNS-01 challenge provider Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Publishes and withdraws the proof of control for one domain.
///
/// `token` identifies the challenge; `key_authorization` is the string the
/// ACME server expects the proof to be derived from.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// Publish the proof and return once it is visible to resolvers.
    async fn present(&self, domain: &str, token: &str, key_authorization: &str) -> CoreResult<()>;

    /// Remove whatever `present` published. Succeeds when nothing is left to remove.
    async fn cleanup(&self, domain: &str, token: &str, key_authorization: &str) -> CoreResult<()>;
}
