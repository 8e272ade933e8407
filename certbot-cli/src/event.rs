//! Trigger event from a file, stdin or flags

use std::io::Read;

use anyhow::{Context, Result};
use certbot_core::RenewalEvent;

use crate::Args;

/// Threshold used when neither the event nor the flags give one.
pub const DEFAULT_RENEW_THRESHOLD: u16 = 30;

/// Read the event named by `--event` and apply the flag overrides.
pub fn load(args: &Args) -> Result<RenewalEvent> {
    let raw = match args.event.as_deref() {
        None => None,
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            Some(buf)
        }
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read event file {path}"))?,
        ),
    };

    build(raw.as_deref(), args)
}

/// Parse `raw` (if any) and let the flags override individual fields.
fn build(raw: Option<&str>, args: &Args) -> Result<RenewalEvent> {
    let mut event = match raw {
        Some(raw) => serde_json::from_str(raw).context("invalid event JSON")?,
        None => RenewalEvent {
            domain_names: Vec::new(),
            email: String::new(),
            renew_threshold: DEFAULT_RENEW_THRESHOLD,
        },
    };

    if !args.domains.is_empty() {
        event.domain_names.clone_from(&args.domains);
    }
    if let Some(email) = &args.email {
        event.email.clone_from(email);
    }
    if let Some(threshold) = args.renew_threshold {
        event.renew_threshold = threshold;
    }

    Ok(event)
}
