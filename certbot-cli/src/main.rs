//! `acm-certbot` entry point
//!
//! Runs one renewal pass: looks the certificate up in ACM, and when it is
//! missing or due, obtains a new one from the ACME directory with a DNS-01
//! challenge in Route 53 and imports it.
//!
//! Exit status is 0 on success (including "not due yet") and 1 on any failure.

mod config;
mod event;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use certbot_core::{CertbotContext, CertbotService, CoreError, RunOutcome, SystemClock};
use certbot_provider::{create_certificate_store, create_dns_provider, AwsCredentials};
use clap::Parser;
use config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// acm-certbot - Issue and renew ACM certificates via ACME DNS-01 in Route 53
#[derive(Parser, Debug)]
#[command(name = "acm-certbot", author, version, about, long_about = None)]
pub struct Args {
    /// Trigger event JSON file (`-` reads stdin)
    #[arg(long, value_name = "FILE")]
    pub event: Option<String>,

    /// Domain the certificate must cover (repeatable; the first is the primary name)
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// ACME account contact email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Renew when this many days or fewer remain
    #[arg(short = 't', long, value_name = "DAYS")]
    pub renew_threshold: Option<u16>,

    /// Use the Let's Encrypt staging directory
    #[arg(long)]
    pub staging: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE", env = "CERTBOT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the run outcome
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(outcome) => {
            match serde_json::to_string(&outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("Failed to serialize outcome: {e}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<CoreError>() {
                Some(core) if core.is_expected() => tracing::warn!("Run failed: {e:#}"),
                _ => tracing::error!("Run failed: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<RunOutcome> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    let event = event::load(args)?;

    let credentials = AwsCredentials::from_env().context("AWS credentials")?;
    let options = config.client_options();
    let dns = create_dns_provider(credentials.clone(), &options)?;
    let store = create_certificate_store(credentials, config.acm_region(), &options)?;
    let directory_url = config.directory_url(args.staging);

    tracing::info!(
        "ACME directory {directory_url}, ACM region {}",
        config.acm_region()
    );

    let ctx = Arc::new(CertbotContext::with_acme(
        dns,
        store,
        Arc::new(SystemClock),
        config.dns01(),
        directory_url,
    ));
    let outcome = CertbotService::new(ctx).run(&event).await?;

    match &outcome {
        RunOutcome::Issued { certificate_arn } => {
            tracing::info!("Issued new certificate {certificate_arn}");
        }
        RunOutcome::Renewed {
            certificate_arn, ..
        } => tracing::info!("Renewed certificate {certificate_arn}"),
        RunOutcome::NotDue {
            certificate_arn,
            status,
        } => tracing::info!(
            "Certificate {certificate_arn} not due, renewal in {} day(s)",
            status.days_until_renewal
        ),
    }

    Ok(outcome)
}
