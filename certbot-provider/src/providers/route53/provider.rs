//! Route 53 `DnsProvider` trait implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::providers::common::strip_resource_prefix;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{ChangeBatch, ChangeInfo, ChangeStatus, DnsRecordType, HostedZone, ResourceRecordSet};

use super::types::{
    ChangeBatchXml, ChangeInfoResponse, ChangeInfoXml, ChangeResourceRecordSetsRequest,
    ChangeXml, ChangesXml, ListHostedZonesByNameResponse, ListResourceRecordSetsResponse,
};
use super::{ROUTE53_XMLNS, Route53Provider};

impl Route53Provider {
    /// Convert a `ChangeInfo` element, dropping the `/change/` prefix
    pub(crate) fn convert_change_info(&self, xml: ChangeInfoXml) -> Result<ChangeInfo> {
        let status = match xml.status.as_str() {
            "PENDING" => ChangeStatus::Pending,
            "INSYNC" => ChangeStatus::Insync,
            other => return Err(self.parse_error(format!("unknown change status '{other}'"))),
        };

        let submitted_at = xml
            .submitted_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(ChangeInfo {
            id: strip_resource_prefix(&xml.id, "/change/").to_string(),
            status,
            submitted_at,
            comment: xml.comment,
        })
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn list_hosted_zones_by_name(&self, dns_name: &str) -> Result<Vec<HostedZone>> {
        let response: ListHostedZonesByNameResponse = self
            .get(
                "/hostedzonesbyname",
                &[("dnsname", dns_name.to_string())],
                ErrorContext::zone(dns_name),
            )
            .await?;

        Ok(response
            .hosted_zones
            .items
            .into_iter()
            .map(HostedZone::from)
            .collect())
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start_name: &str,
        start_type: DnsRecordType,
    ) -> Result<Vec<ResourceRecordSet>> {
        let zone_id = strip_resource_prefix(zone_id, "/hostedzone/");
        let mut query = vec![("name", start_name.to_string())];
        if start_type != DnsRecordType::Other {
            query.push(("type", start_type.as_str().to_string()));
        }

        let response: ListResourceRecordSetsResponse = self
            .get(
                &format!("/hostedzone/{zone_id}/rrset"),
                &query,
                ErrorContext::zone(zone_id),
            )
            .await?;

        Ok(response
            .resource_record_sets
            .items
            .into_iter()
            .map(ResourceRecordSet::from)
            .collect())
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeInfo> {
        let zone_id = strip_resource_prefix(zone_id, "/hostedzone/");
        let request = ChangeResourceRecordSetsRequest {
            xmlns: ROUTE53_XMLNS.to_string(),
            change_batch: ChangeBatchXml {
                comment: batch.comment.clone(),
                changes: ChangesXml {
                    items: batch.changes.iter().map(ChangeXml::from).collect(),
                },
            },
        };

        let response: ChangeInfoResponse = self
            .post(
                &format!("/hostedzone/{zone_id}/rrset/"),
                &request,
                ErrorContext::zone(zone_id),
            )
            .await?;

        let info = self.convert_change_info(response.change_info)?;
        log::info!(
            "[route53] submitted change {} to zone {zone_id} ({} change(s))",
            info.id,
            batch.changes.len()
        );
        Ok(info)
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo> {
        let change_id = strip_resource_prefix(change_id, "/change/");
        let response: ChangeInfoResponse = self
            .get(
                &format!("/change/{change_id}"),
                &[],
                ErrorContext::change(change_id),
            )
            .await?;

        self.convert_change_info(response.change_info)
    }
}
