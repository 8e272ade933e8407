//! One renewal run: look up, check, obtain, import

use std::sync::Arc;

use crate::error::{CoreResult, StageExt};
use crate::services::{check_expiration, inspect_certificate, CertbotContext, CertificateService};
use crate::types::{CertificateResource, RenewalEvent, RunOutcome};

/// Drives a single invocation end to end.
pub struct CertbotService {
    ctx: Arc<CertbotContext>,
    certificates: CertificateService,
}

impl CertbotService {
    #[must_use]
    pub fn new(ctx: Arc<CertbotContext>) -> Self {
        Self {
            certificates: CertificateService::new(ctx.clone()),
            ctx,
        }
    }

    /// Issue a certificate for `event` if none exists, renew it if it is due,
    /// otherwise leave it alone.
    ///
    /// Failures carry the stage they happened in. Nothing is rolled back.
    pub async fn run(&self, event: &RenewalEvent) -> CoreResult<RunOutcome> {
        event.validate()?;
        log::info!(
            "Starting run: domains={:?}, renew_threshold={}",
            event.domain_names,
            event.renew_threshold
        );

        let existing = self
            .certificates
            .find_certificate(&event.domain_names)
            .await
            .stage("list certificates")?;

        let Some(summary) = existing else {
            log::info!(
                "No certificate found for {:?}, requesting a new one",
                event.domain_names
            );
            let resource = self
                .ctx
                .issuer
                .obtain(&event.domain_names, &event.email)
                .await
                .stage("request certificate")?;
            log_issued(&resource);

            let certificate_arn = self
                .certificates
                .import_certificate(None, &resource)
                .await
                .stage("import certificate")?;
            return Ok(RunOutcome::Issued { certificate_arn });
        };

        log::info!(
            "Certificate found for {:?}: {}",
            event.domain_names,
            summary.certificate_arn
        );
        let detail = self
            .certificates
            .certificate_details(&summary.certificate_arn)
            .await
            .stage("describe certificate")?;

        let status = detail
            .not_after
            .map(|not_after| check_expiration(event.renew_threshold, not_after, self.ctx.clock.now()));

        match status {
            Some(status) if !status.renewal_due => {
                log::info!(
                    "Certificate still valid for {} day(s), no action required",
                    status.days_remaining
                );
                Ok(RunOutcome::NotDue {
                    certificate_arn: detail.certificate_arn,
                    status,
                })
            }
            status => {
                match &status {
                    Some(status) => log::info!("Renewal due: {status:?}"),
                    None => log::warn!(
                        "{} has no expiration date, renewing",
                        detail.certificate_arn
                    ),
                }

                let resource = self
                    .ctx
                    .issuer
                    .obtain(&event.domain_names, &event.email)
                    .await
                    .stage("renew certificate")?;
                log_issued(&resource);

                let certificate_arn = self
                    .certificates
                    .import_certificate(Some(&detail.certificate_arn), &resource)
                    .await
                    .stage("import certificate")?;
                Ok(RunOutcome::Renewed {
                    certificate_arn,
                    status,
                })
            }
        }
    }
}

fn log_issued(resource: &CertificateResource) {
    match inspect_certificate(&resource.certificate) {
        Ok(info) => log::info!(
            "Obtained certificate for {:?}, valid {} to {}",
            info.subject_alternative_names,
            info.not_before,
            info.not_after
        ),
        Err(e) => log::warn!("Obtained certificate could not be inspected: {e}"),
    }
}
