//! Notification channels.
//!
//! Each channel turns a title and a markdown body into one HTTP request.
//! Building the request is pure; sending is left to the dispatcher.

use checkin_core::NotifyConfig;
use checkin_fetch::HttpRequest;
use serde_json::{Value, json};

use crate::error::NotifyError;
use crate::format::{bark_plain, serverchan_body, telegram_text};

// ============================================================================
// Endpoints
// ============================================================================

const SERVERCHAN_URL: &str = "https://sctapi.ftqq.com";
const PUSHPLUS_URL: &str = "http://www.pushplus.plus/send";
const PUSHDEER_URL: &str = "https://api2.pushdeer.com/message/push";
const TELEGRAM_URL: &str = "https://api.telegram.org";

/// Public Bark server, used when no server is configured.
pub const DEFAULT_BARK_SERVER: &str = "https://api.day.app";

/// Bark group the notifications are filed under.
pub const BARK_GROUP: &str = "Checkin";

// ============================================================================
// Channel
// ============================================================================

/// A configured push service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// Server-chan (form POST).
    ServerChan {
        /// Send key.
        key: String,
    },
    /// `PushPlus` (JSON POST).
    PushPlus {
        /// User token.
        token: String,
    },
    /// `PushDeer` (JSON POST).
    PushDeer {
        /// Push key.
        key: String,
    },
    /// Bark (GET with the message in the path).
    Bark {
        /// Device key.
        key: String,
        /// Server origin override.
        server: Option<String>,
    },
    /// Telegram bot (JSON POST, `MarkdownV2`).
    Telegram {
        /// Bot token.
        bot_token: String,
        /// Target chat.
        chat_id: String,
    },
}

impl Channel {
    /// Every channel with credentials in `config`, in a fixed order.
    pub fn from_config(config: &NotifyConfig) -> Vec<Self> {
        let mut channels = Vec::new();
        if let Some(key) = &config.serverchan_key {
            channels.push(Self::ServerChan { key: key.clone() });
        }
        if let Some(token) = &config.pushplus_token {
            channels.push(Self::PushPlus {
                token: token.clone(),
            });
        }
        if let Some(key) = &config.pushdeer_key {
            channels.push(Self::PushDeer { key: key.clone() });
        }
        if let Some(bark) = &config.bark {
            channels.push(Self::Bark {
                key: bark.key.clone(),
                server: bark.server.clone(),
            });
        }
        if let Some(telegram) = &config.telegram {
            channels.push(Self::Telegram {
                bot_token: telegram.bot_token.clone(),
                chat_id: telegram.chat_id.clone(),
            });
        }
        channels
    }

    /// Short name, safe to log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServerChan { .. } => "serverchan",
            Self::PushPlus { .. } => "pushplus",
            Self::PushDeer { .. } => "pushdeer",
            Self::Bark { .. } => "bark",
            Self::Telegram { .. } => "telegram",
        }
    }

    /// Builds the request delivering `title` and `body`.
    pub fn build_request(&self, title: &str, body: &str) -> HttpRequest {
        match self {
            Self::ServerChan { key } => HttpRequest::post_form(
                format!("{SERVERCHAN_URL}/{key}.send"),
                vec![
                    ("title".to_string(), title.to_string()),
                    ("desp".to_string(), serverchan_body(body)),
                ],
            ),
            Self::PushPlus { token } => HttpRequest::post_json(
                PUSHPLUS_URL,
                json!({
                    "token": token,
                    "title": title,
                    "content": body,
                    "template": "markdown",
                }),
            ),
            Self::PushDeer { key } => HttpRequest::post_json(
                PUSHDEER_URL,
                json!({
                    "pushkey": key,
                    "type": "markdown",
                    "text": title,
                    "desp": body,
                }),
            ),
            Self::Bark { key, server } => {
                let server = server
                    .as_deref()
                    .unwrap_or(DEFAULT_BARK_SERVER)
                    .trim_end_matches('/');
                HttpRequest::get(format!(
                    "{server}/{key}/{}/{}?group={BARK_GROUP}",
                    urlencoding::encode(title),
                    urlencoding::encode(&bark_plain(body)),
                ))
            }
            Self::Telegram { bot_token, chat_id } => HttpRequest::post_json(
                format!("{TELEGRAM_URL}/bot{bot_token}/sendMessage"),
                json!({
                    "chat_id": chat_id,
                    "text": telegram_text(title, body),
                    "parse_mode": "MarkdownV2",
                }),
            ),
        }
    }

    /// Checks the service's own verdict in a 2xx response body.
    ///
    /// Bodies that are not JSON, or lack the verdict field, are accepted.
    pub fn verify_response(&self, body: &[u8]) -> Result<(), NotifyError> {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return Ok(());
        };

        let accepted = match self {
            Self::ServerChan { .. } | Self::PushDeer { .. } => code_is(&value, 0),
            Self::PushPlus { .. } | Self::Bark { .. } => code_is(&value, 200),
            Self::Telegram { .. } => value.get("ok").and_then(Value::as_bool).unwrap_or(true),
        };
        if accepted {
            return Ok(());
        }

        let detail = ["message", "msg", "description", "error"]
            .iter()
            .find_map(|k| value.get(*k).and_then(Value::as_str))
            .map_or_else(|| value.to_string(), str::to_string);
        Err(NotifyError::Rejected {
            channel: self.name(),
            detail,
        })
    }
}

fn code_is(value: &Value, expected: i64) -> bool {
    value
        .get("code")
        .and_then(Value::as_i64)
        .is_none_or(|code| code == expected)
}
