//! End-to-end coordinator runs over scripted sites.

mod common;

use std::sync::Arc;

use checkin_core::SiteStatus;
use checkin_fetch::{MockReply, MockTransport};
use checkin_sites::{Coordinator, RunOutcome, SiteRegistry, NOT_EXECUTED_TITLE};
use common::{checkin_html, client, config, detail_html, landing_html, test_profile};

fn registry() -> SiteRegistry {
    SiteRegistry::from_profiles(vec![
        test_profile("sitea", "SiteA"),
        test_profile("siteb", "SiteB"),
    ])
}

fn happy(mock: MockTransport, host: &str, account: &str) -> MockTransport {
    mock.on(
        &format!("{host}/qiandao.php"),
        MockReply::ok(landing_html(Some(account), Some("tok"))),
    )
    .on(
        &format!("{host}/qiandao.php"),
        MockReply::ok(detail_html(&["month: 5", "streak: 3"])),
    )
    .on(
        &format!("{host}/qiandao.php?sign="),
        MockReply::ok(checkin_html("You have checked in today!")),
    )
}

async fn run(mock: &Arc<MockTransport>, pairs: &[(&str, &str)]) -> RunOutcome {
    let registry = registry();
    let config = config(pairs, &registry.cookie_envs());
    Coordinator::new(client(mock), registry.build_sites())
        .run(&config)
        .await
}

#[tokio::test]
async fn test_unconfigured_site_is_reported_not_contacted() {
    let mock = Arc::new(happy(MockTransport::new(), "sitea.example", "alice"));

    let outcome = run(&mock, &[("SITEACOOKIE", "a=1")]).await;

    let RunOutcome::Completed(summary) = &outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };
    assert_eq!(summary.status_line(), "SiteA: success; SiteB: not configured");
    assert_eq!(mock.calls_to("siteb.example"), 0);
    assert_eq!(mock.call_count(), 3);

    let (title, body) = outcome.notification();
    assert_eq!(title, "Checkin results: SiteA: success; SiteB: not configured");
    let blocks: Vec<&str> = body.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("**SiteA**: You have checked in today!"), "{body}");
    assert!(blocks[0].contains("Account: alice; month: 5; streak: 3."), "{body}");
    assert_eq!(blocks[1], "**SiteB**: Cookie not configured, skipped.");
}

#[tokio::test]
async fn test_sites_run_in_registry_order() {
    let mock = happy(MockTransport::new(), "sitea.example", "alice");
    let mock = Arc::new(happy(mock, "siteb.example", "bob"));

    let outcome = run(&mock, &[("SITEACOOKIE", "a=1"), ("SITEBCOOKIE", "b=1")]).await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.status_line(), "SiteA: success; SiteB: success");

    let hosts: Vec<bool> = mock
        .calls()
        .iter()
        .map(|c| c.url.contains("sitea.example"))
        .collect();
    assert_eq!(hosts, vec![true, true, true, false, false, false]);
}

#[tokio::test]
async fn test_one_site_failing_does_not_stop_the_next() {
    let mock = MockTransport::new().on(
        "sitea.example/qiandao.php",
        MockReply::ok(landing_html(None, None)),
    );
    let mock = Arc::new(happy(mock, "siteb.example", "bob"));

    let outcome = run(&mock, &[("SITEACOOKIE", "a=1"), ("SITEBCOOKIE", "b=1")]).await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.status_line(), "SiteA: failure; SiteB: success");
    assert_eq!(summary.reports[0].status, SiteStatus::Failure);
}

#[tokio::test]
async fn test_no_cookies_means_not_executed() {
    let mock = Arc::new(MockTransport::new());

    let outcome = run(&mock, &[("SITEACOOKIE", "   ")]).await;

    assert_eq!(mock.call_count(), 0);
    let RunOutcome::NotExecuted { reason } = &outcome else {
        panic!("expected not executed, got {outcome:?}");
    };
    assert!(reason.contains("SiteA (SITEACOOKIE)"), "{reason}");
    assert!(reason.contains("SiteB (SITEBCOOKIE)"), "{reason}");

    let (title, body) = outcome.notification();
    assert_eq!(title, NOT_EXECUTED_TITLE);
    assert_eq!(&body, reason);
}

#[tokio::test]
async fn test_enabled_filter() {
    let mock = happy(MockTransport::new(), "sitea.example", "alice");
    let mock = Arc::new(happy(mock, "siteb.example", "bob"));

    let outcome = run(
        &mock,
        &[
            ("CHECKIN_SITES", "SITEB"),
            ("SITEACOOKIE", "a=1"),
            ("SITEBCOOKIE", "b=1"),
        ],
    )
    .await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.status_line(), "SiteB: success");
    assert_eq!(mock.calls_to("sitea.example"), 0);
}

#[tokio::test]
async fn test_nothing_enabled() {
    let mock = Arc::new(MockTransport::new());

    let outcome = run(&mock, &[("CHECKIN_SITES", "elsewhere"), ("SITEACOOKIE", "a=1")]).await;

    assert_eq!(
        outcome,
        RunOutcome::NotExecuted {
            reason: "No enabled site, checkin not executed.".to_string()
        }
    );
    assert_eq!(mock.call_count(), 0);
}
