//! Three-step protocol tests against scripted 4K视界 pages.

mod common;

use std::sync::Arc;
use std::time::Duration;

use checkin_fetch::{MockReply, MockTransport, NetworkErrorKind};
use checkin_sites::discuz::{COOKIE_EXPIRED_MESSAGE, NO_VERDICT_MESSAGE, TOKEN_MISSING_MESSAGE};
use checkin_sites::sites::sj4k;
use checkin_sites::{DiscuzSite, SiteProtocol};
use common::{checkin_html, client, detail_html, gbk, landing_html};

const COOKIE: &str = "auth=abc; will_timelogout_42=1700000000";

const STATS: &[&str] = &[
    "本月打卡: 5 天",
    "连续打卡: 3 天",
    "累计打卡: 120 天",
    "累计奖励: 360 K币",
    "最近奖励: 3 K币",
];

fn site() -> DiscuzSite {
    DiscuzSite::new(sj4k::profile())
}

async fn run(mock: &Arc<MockTransport>) -> checkin_core::SiteResult {
    let site = site();
    let result = site.profile().new_result(COOKIE);
    site.run(&client(mock), result).await
}

#[tokio::test]
async fn test_full_success() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php", MockReply::ok(gbk(&detail_html(STATS))))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("签到成功！获得 3 K币")))),
    );

    let result = run(&mock).await;

    assert!(result.succeeded());
    assert_eq!(result.account_label.as_deref(), Some("alice"));
    assert_eq!(result.session_token.as_deref(), Some("f00d"));

    let message = result.message();
    assert!(message.starts_with("签到成功！获得 3 K币"), "{message}");
    assert!(message.contains("Account: alice"), "{message}");
    assert!(message.contains("本月打卡: 5 天"), "{message}");
    assert!(message.contains("最近奖励: 3 K币"), "{message}");

    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].url, "https://www.4ksj.com/qiandao.php");
    assert_eq!(calls[1].url, "https://www.4ksj.com/qiandao.php?sign=f00d");
    assert_eq!(calls[2].url, "https://www.4ksj.com/qiandao.php");
}

#[tokio::test]
async fn test_requests_carry_session_headers() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("已签到")))),
    );

    run(&mock).await;

    for call in mock.calls() {
        let cookie = call.header("Cookie").unwrap();
        assert!(cookie.starts_with("auth=abc; will_timelogout_42="));
        assert!(!cookie.contains("1700000000"), "logout stamp not refreshed: {cookie}");
        assert!(call.header("user-agent").unwrap().contains("Edg/"));
        assert!(call.header("Accept").is_some());
    }
}

#[tokio::test]
async fn test_missing_stats_are_marked() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php", MockReply::ok(gbk(&detail_html(&STATS[..2]))))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("签到成功")))),
    );

    let message = run(&mock).await.message();
    assert!(message.contains("连续打卡: 3 天"), "{message}");
    assert!(message.contains("累计打卡: not available"), "{message}");
}

#[tokio::test]
async fn test_expired_cookie_stops_after_landing() {
    let mock = Arc::new(
        MockTransport::new().on("qiandao.php", MockReply::ok(landing_html(None, Some("f00d")))),
    );

    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert_eq!(result.message(), COOKIE_EXPIRED_MESSAGE);
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.calls_to("sign="), 0);
}

#[tokio::test]
async fn test_missing_token_stops_after_landing() {
    let mock = Arc::new(
        MockTransport::new().on("qiandao.php", MockReply::ok(landing_html(Some("alice"), None))),
    );

    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert_eq!(result.account_label.as_deref(), Some("alice"));
    assert_eq!(result.message(), TOKEN_MISSING_MESSAGE);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_landing_client_error_is_not_retried() {
    let mock = Arc::new(MockTransport::new().on("qiandao.php", MockReply::status(403)));

    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert!(result.message().starts_with("Failed to fetch the checkin page"));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_checkin_network_failure_skips_details() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php?sign=", MockReply::network(NetworkErrorKind::ConnectionReset)),
    );

    let start = tokio::time::Instant::now();
    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert!(result.message().starts_with("Checkin failed or timed out"));
    assert_eq!(mock.calls_to("sign="), 4);
    assert_eq!(mock.call_count(), 5);
    assert_eq!(start.elapsed(), Duration::from_secs(12));
}

#[tokio::test]
async fn test_checkin_error_hides_token() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php?sign=", MockReply::status(403)),
    );

    let result = run(&mock).await;

    let message = result.message();
    assert!(!result.succeeded());
    assert!(message.starts_with("Checkin failed or timed out"), "{message}");
    assert!(message.contains("HTTP 403 from https://www.4ksj.com"), "{message}");
    assert!(!message.contains("f00d"), "{message}");
}

#[tokio::test]
async fn test_detail_failure_keeps_success() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php", MockReply::status(404))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("签到成功")))),
    );

    let result = run(&mock).await;

    assert!(result.succeeded());
    let message = result.message();
    assert!(message.starts_with("签到成功"), "{message}");
    assert!(message.contains("Failed to fetch checkin details"), "{message}");
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_no_verdict_still_fetches_details() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php", MockReply::ok(gbk(&detail_html(STATS))))
            .on("qiandao.php?sign=", MockReply::ok(gbk("<html><body></body></html>"))),
    );

    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert!(result.message().starts_with(NO_VERDICT_MESSAGE));
    assert!(result.message().contains("Account: alice"));
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_unrecognized_verdict_is_failure() {
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing_html(Some("alice"), Some("f00d"))))
            .on("qiandao.php", MockReply::ok(gbk(&detail_html(STATS))))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("请先登录后再操作")))),
    );

    let result = run(&mock).await;

    assert!(!result.succeeded());
    assert!(result.message().starts_with("请先登录后再操作"));
}

#[tokio::test]
async fn test_token_fallback_selector() {
    let landing = r#"<html><body>
        <div class="nexmemberintels"><h5>bob</h5></div>
        <form id="scbar_form"><input type="hidden" name="mod" value="search"><input type="hidden" name="hash2" value="beef"></form>
        </body></html>"#;
    let mock = Arc::new(
        MockTransport::new()
            .on("qiandao.php", MockReply::ok(landing))
            .on("qiandao.php?sign=", MockReply::ok(gbk(&checkin_html("已签过到")))),
    );

    let result = run(&mock).await;

    assert!(result.succeeded());
    assert_eq!(result.session_token.as_deref(), Some("beef"));
    assert_eq!(mock.calls_to("sign=beef"), 1);
}
