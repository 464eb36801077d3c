//! 4K视界 (www.4ksj.com).
//!
//! The sign-in page is served as UTF-8, while the submission response and
//! the page fetched afterwards come back as GBK.

use checkin_core::DEFAULT_LOGOUT_PREFIX;
use checkin_fetch::TextEncoding;

use crate::profile::{
    SiteProfile, SiteSelectors, StatSelector, StepEncodings, TokenSelector, DEFAULT_USER_AGENT,
};

/// Site id.
pub const ID: &str = "4ksj";

/// Environment variable holding the session cookie.
pub const COOKIE_ENV: &str = "SJCOOKIE";

/// Sidebar list holding the sign-in statistics.
const STATS_LIST: &str = "#wp > .ct2 > .sd div:nth-child(2) .xl1";

/// Builds the 4K视界 profile.
pub fn profile() -> SiteProfile {
    let stat = |label: &str, position: u8| {
        StatSelector::new(label, format!("{STATS_LIST} li:nth-child({position})"))
    };

    SiteProfile {
        id: ID.to_string(),
        name: "4K视界".to_string(),
        base_url: "https://www.4ksj.com/".to_string(),
        landing_path: "qiandao.php".to_string(),
        checkin_param: "sign".to_string(),
        cookie_env: COOKIE_ENV.to_string(),
        logout_cookie_prefix: Some(DEFAULT_LOGOUT_PREFIX.to_string()),
        user_agent: DEFAULT_USER_AGENT.to_string(),
        selectors: SiteSelectors {
            account_name: ".nexmemberintels > h5".to_string(),
            token: vec![
                TokenSelector::value(r#"#scbar_form input[name="formhash"]"#),
                TokenSelector::value("#scbar_form input:nth-child(2)"),
            ],
            checkin_message: "#messagetext > p".to_string(),
            stats: vec![
                stat("本月打卡", 2),
                stat("连续打卡", 3),
                stat("累计打卡", 4),
                stat("累计奖励", 5),
                stat("最近奖励", 6),
            ],
        },
        encodings: StepEncodings {
            landing: TextEncoding::Utf8,
            checkin: TextEncoding::Gbk,
            detail: TextEncoding::Gbk,
        },
        success_phrases: vec![
            "签到成功".to_string(),
            "已签过到".to_string(),
            "已签到".to_string(),
        ],
    }
}
