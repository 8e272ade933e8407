//! Route 53 REST-XML documents
//!
//! Only the elements this crate reads or writes are modelled; unknown elements
//! are ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::providers::common::strip_resource_prefix;
use crate::types::{Change, DnsRecordType, HostedZone, ResourceRecord, ResourceRecordSet};

// ============ Shared elements ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordXml {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordsXml {
    #[serde(rename = "ResourceRecord", default)]
    pub items: Vec<ResourceRecordXml>,
}

/// Element order matters to the API: Name, Type, TTL, `ResourceRecords`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSetXml {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(
        rename = "ResourceRecords",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_records: Option<ResourceRecordsXml>,
}

impl From<&ResourceRecordSet> for ResourceRecordSetXml {
    fn from(set: &ResourceRecordSet) -> Self {
        Self {
            name: set.name.clone(),
            record_type: set.record_type.as_str().to_string(),
            ttl: set.ttl,
            resource_records: Some(ResourceRecordsXml {
                items: set
                    .resource_records
                    .iter()
                    .map(|r| ResourceRecordXml {
                        value: r.value.clone(),
                    })
                    .collect(),
            }),
        }
    }
}

impl From<ResourceRecordSetXml> for ResourceRecordSet {
    fn from(xml: ResourceRecordSetXml) -> Self {
        Self {
            name: xml.name,
            record_type: DnsRecordType::from_wire(&xml.record_type),
            ttl: xml.ttl,
            resource_records: xml
                .resource_records
                .map(|r| r.items.into_iter().map(|v| ResourceRecord::new(v.value)).collect())
                .unwrap_or_default(),
        }
    }
}

// ============ ChangeResourceRecordSets ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatchXml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBatchXml {
    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "Changes")]
    pub changes: ChangesXml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesXml {
    #[serde(rename = "Change", default)]
    pub items: Vec<ChangeXml>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeXml {
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "ResourceRecordSet")]
    pub resource_record_set: ResourceRecordSetXml,
}

impl From<&Change> for ChangeXml {
    fn from(change: &Change) -> Self {
        Self {
            action: change.action.as_str().to_string(),
            resource_record_set: ResourceRecordSetXml::from(&change.resource_record_set),
        }
    }
}

/// Body of both `ChangeResourceRecordSetsResponse` and `GetChangeResponse`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeInfoResponse {
    #[serde(rename = "ChangeInfo")]
    pub change_info: ChangeInfoXml,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeInfoXml {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "SubmittedAt", default)]
    pub submitted_at: Option<String>,
    #[serde(rename = "Comment", default)]
    pub comment: Option<String>,
}

// ============ ListHostedZonesByName ============

#[derive(Debug, Clone, Deserialize)]
pub struct ListHostedZonesByNameResponse {
    #[serde(rename = "HostedZones", default)]
    pub hosted_zones: HostedZonesXml,
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostedZonesXml {
    #[serde(rename = "HostedZone", default)]
    pub items: Vec<HostedZoneXml>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostedZoneXml {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Config", default)]
    pub config: Option<HostedZoneConfigXml>,
    #[serde(rename = "ResourceRecordSetCount", default)]
    pub resource_record_set_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostedZoneConfigXml {
    #[serde(rename = "PrivateZone", default)]
    pub private_zone: bool,
}

impl From<HostedZoneXml> for HostedZone {
    fn from(xml: HostedZoneXml) -> Self {
        Self {
            id: strip_resource_prefix(&xml.id, "/hostedzone/").to_string(),
            name: xml.name,
            private_zone: xml.config.is_some_and(|c| c.private_zone),
            record_count: xml.resource_record_set_count,
        }
    }
}

// ============ ListResourceRecordSets ============

#[derive(Debug, Clone, Deserialize)]
pub struct ListResourceRecordSetsResponse {
    #[serde(rename = "ResourceRecordSets", default)]
    pub resource_record_sets: ResourceRecordSetsXml,
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRecordSetsXml {
    #[serde(rename = "ResourceRecordSet", default)]
    pub items: Vec<ResourceRecordSetXml>,
}

// ============ Errors ============

/// `<ErrorResponse><Error><Code>..</Code><Message>..</Message></Error></ErrorResponse>`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: ErrorXml,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorXml {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

/// `<InvalidChangeBatch><Messages><Message>..</Message></Messages></InvalidChangeBatch>`
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidChangeBatchResponse {
    #[serde(rename = "Messages")]
    pub messages: MessagesXml,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesXml {
    #[serde(rename = "Message", default)]
    pub items: Vec<String>,
}
