//! Renewal-threshold arithmetic

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::RenewalStatus;

/// Evaluate a certificate expiring at `not_after` against a threshold of `threshold` days.
///
/// Days remaining are floored, so an expired certificate has a negative count and
/// one expiring in 29 days 23 hours has 29. Renewal is due once
/// `days_remaining - threshold < 1`, i.e. when `days_remaining <= threshold`.
pub fn check_expiration(threshold: u16, not_after: DateTime<Utc>, now: DateTime<Utc>) -> RenewalStatus {
    let days_remaining = floor_days(not_after - now);
    let days_until_renewal = days_remaining - i64::from(threshold);

    RenewalStatus {
        not_after,
        days_remaining,
        days_until_renewal,
        renewal_due: days_until_renewal < 1,
    }
}

fn floor_days(delta: TimeDelta) -> i64 {
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}
