//! Bounded polling with an injected clock.

use std::future::Future;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::traits::Clock;

/// How long to keep polling and how long to pause between checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollPolicy {
    pub const fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Poll `check` until it reports completion.
///
/// - `Ok(true)`: done.
/// - `Ok(false)`: sleep `policy.interval` and check again, unless `policy.timeout`
///   has elapsed since the first check, in which case fail with
///   [`CoreError::PropagationTimeout`].
/// - `Err(_)`: returned immediately, no further checks.
///
/// The first check runs without any delay.
pub async fn wait_for<F, Fut>(
    name: &str,
    policy: PollPolicy,
    clock: &dyn Clock,
    mut check: F,
) -> CoreResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CoreResult<bool>>,
{
    let start = clock.now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        if check().await? {
            log::debug!("{name}: done after {attempt} check(s)");
            return Ok(());
        }

        let elapsed = (clock.now() - start).to_std().unwrap_or(Duration::ZERO);
        if elapsed >= policy.timeout {
            return Err(CoreError::PropagationTimeout {
                name: name.to_string(),
                timeout: policy.timeout,
            });
        }

        log::debug!(
            "{name}: not ready (check {attempt}, {elapsed:?} elapsed), retrying in {:?}",
            policy.interval
        );
        clock.sleep(policy.interval).await;
    }
}
