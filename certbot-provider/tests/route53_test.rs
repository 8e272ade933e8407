//! Route 53 live integration test
//!
//! Operation mode:
//! ```bash
//! AWS_ACCESS_KEY_ID=xxx AWS_SECRET_ACCESS_KEY=xxx TEST_DOMAIN=example.com \
//!     cargo test -p certbot-provider --test route53_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use std::time::Duration;

use certbot_provider::{
    Change, ChangeAction, ChangeBatch, ChangeStatus, DnsRecordType, ResourceRecord,
    ResourceRecordSet,
};
use common::{TestContext, generate_test_record_name};

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_find_zone() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "failed to create test context");
    let zone = require_some!(ctx.find_zone().await, "no public hosted zone for TEST_DOMAIN");

    assert!(!zone.id.starts_with("/hostedzone/"), "zone id keeps prefix");
    println!("✓ zone {} ({})", zone.name, zone.id);
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_txt_lifecycle() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "failed to create test context");
    let zone = require_some!(ctx.find_zone().await, "no public hosted zone for TEST_DOMAIN");
    let name = generate_test_record_name(&ctx.domain);

    let record_set = ResourceRecordSet {
        name: name.clone(),
        record_type: DnsRecordType::Txt,
        ttl: Some(10),
        resource_records: vec![ResourceRecord::new("\"integration-test\"")],
    };

    // 1. Create
    let info = require_ok!(
        ctx.dns
            .change_resource_record_sets(
                &zone.id,
                &ChangeBatch {
                    comment: Some("integration test".to_string()),
                    changes: vec![Change {
                        action: ChangeAction::Upsert,
                        resource_record_set: record_set.clone(),
                    }],
                },
            )
            .await,
        "UPSERT failed"
    );

    // 2. Wait for INSYNC (bounded)
    let mut status = info.status;
    for _ in 0..30 {
        if status == ChangeStatus::Insync {
            break;
        }
        tokio::time::sleep(Duration::from_secs(4)).await;
        status = require_ok!(ctx.dns.get_change(&info.id).await, "GetChange failed").status;
    }
    assert_eq!(status, ChangeStatus::Insync, "change never synchronized");

    // 3. Read back
    let found = require_ok!(
        ctx.dns.find_record_set(&zone.id, &name, DnsRecordType::Txt).await,
        "ListResourceRecordSets failed"
    );
    let found = require_some!(found, "record set not found after UPSERT");
    assert_eq!(found.resource_records, record_set.resource_records);

    // 4. Delete
    require_ok!(
        ctx.dns
            .change_resource_record_sets(
                &zone.id,
                &ChangeBatch {
                    comment: None,
                    changes: vec![Change {
                        action: ChangeAction::Delete,
                        resource_record_set: record_set,
                    }],
                },
            )
            .await,
        "DELETE failed"
    );

    println!("✓ TXT lifecycle on {name}");
}
