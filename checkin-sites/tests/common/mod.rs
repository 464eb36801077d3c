//! Shared fixtures for site tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use checkin_core::Config;
use checkin_fetch::{HttpClient, MockTransport};
use checkin_sites::{SiteProfile, SiteSelectors, StatSelector, StepEncodings, TokenSelector};

/// Landing page with an optional logged-in account and token form.
pub fn landing_html(account: Option<&str>, token: Option<&str>) -> String {
    let account = account
        .map(|name| format!(r#"<div class="nexmemberintels"><h5>{name}</h5></div>"#))
        .unwrap_or_default();
    let form = token
        .map(|t| {
            format!(
                r#"<form id="scbar_form"><input type="hidden" name="mod" value="search"><input type="hidden" name="formhash" value="{t}"></form>"#
            )
        })
        .unwrap_or_default();
    format!("<html><body>{account}{form}</body></html>")
}

/// Checkin response carrying `message`.
pub fn checkin_html(message: &str) -> String {
    format!(r#"<html><body><div id="messagetext"><p>{message}</p></div></body></html>"#)
}

/// Detail page with the sidebar statistics list.
pub fn detail_html(stats: &[&str]) -> String {
    let items: String = stats.iter().map(|s| format!("<li>{s}</li>")).collect();
    format!(
        r#"<html><body><div id="wp"><div class="ct2"><div class="sd"><div class="bm">profile</div><div class="bm"><ul class="xl1"><li>我的签到</li>{items}</ul></div></div></div></div></body></html>"#
    )
}

/// Encodes `text` as GBK.
pub fn gbk(text: &str) -> Vec<u8> {
    encoding_rs::GBK.encode(text).0.into_owned()
}

/// Client over `mock` with the production retry policy.
pub fn client(mock: &Arc<MockTransport>) -> HttpClient {
    HttpClient::with_transport(mock.clone())
}

/// A UTF-8 test forum at `https://<id>.example/`.
pub fn test_profile(id: &str, name: &str) -> SiteProfile {
    SiteProfile {
        id: id.to_string(),
        name: name.to_string(),
        base_url: format!("https://{id}.example/"),
        landing_path: "qiandao.php".to_string(),
        checkin_param: "sign".to_string(),
        cookie_env: format!("{}COOKIE", id.to_uppercase()),
        logout_cookie_prefix: None,
        user_agent: "test-agent".to_string(),
        selectors: SiteSelectors {
            account_name: ".nexmemberintels > h5".to_string(),
            token: vec![TokenSelector::value(r#"#scbar_form input[name="formhash"]"#)],
            checkin_message: "#messagetext > p".to_string(),
            stats: vec![
                StatSelector::new("month", "ul.xl1 li:nth-child(2)"),
                StatSelector::new("streak", "ul.xl1 li:nth-child(3)"),
            ],
        },
        encodings: StepEncodings::default(),
        success_phrases: vec!["checked in".to_string()],
    }
}

/// Config with the given environment pairs, cookies loaded for `cookie_envs`.
pub fn config(pairs: &[(&str, &str)], cookie_envs: &[&str]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let lookup = |key: &str| env.get(key).cloned();
    let mut config = Config::from_lookup(lookup);
    config.load_cookies(cookie_envs.iter().copied(), lookup);
    config
}
