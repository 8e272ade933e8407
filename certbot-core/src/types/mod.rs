//! Domain types

mod certificate;
mod event;

pub use certificate::{CertificateInfo, CertificateResource, RenewalStatus};
pub use event::{RenewalEvent, RunOutcome};

// Provider types used throughout the services
pub use certbot_provider::{
    CertificateDetail, CertificateSummary, ChangeInfo, ChangeStatus, DnsRecordType, HostedZone,
    ImportCertificateRequest, ResourceRecord, ResourceRecordSet,
};
