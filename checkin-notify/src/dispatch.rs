//! Settle-all fan-out to every configured channel.

use checkin_core::NotifyConfig;
use checkin_fetch::HttpClient;
use futures::future::join_all;
use tracing::{error, info, instrument};

use crate::channel::Channel;
use crate::error::NotifyError;

/// Title of the message sent by [`Dispatcher::send_test`].
pub const TEST_TITLE: &str = "Checkin notification test";

/// Body of the message sent by [`Dispatcher::send_test`].
pub const TEST_BODY: &str = "If you can read this, **checkin** notifications are working.";

/// Delivery result of one channel.
#[derive(Debug)]
pub struct ChannelOutcome {
    /// Channel name.
    pub channel: &'static str,
    /// Delivery result.
    pub result: Result<(), NotifyError>,
}

impl ChannelOutcome {
    /// True if the message was delivered.
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one fan-out, in channel order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// One entry per channel attempted.
    pub outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    /// Number of channels that delivered.
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Channels that failed.
    pub fn failed(&self) -> impl Iterator<Item = &ChannelOutcome> {
        self.outcomes.iter().filter(|o| !o.is_delivered())
    }

    /// True if no channel was attempted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Sends one message to every channel.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    channels: Vec<Channel>,
}

impl Dispatcher {
    /// Dispatcher over explicit channels.
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Dispatcher over every channel with credentials in `config`.
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(Channel::from_config(config))
    }

    /// Configured channels.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Sends to all channels at once and waits for every one to settle.
    ///
    /// A failing channel never prevents delivery to the others.
    #[instrument(skip_all, fields(channels = self.channels.len()))]
    pub async fn dispatch(&self, client: &HttpClient, title: &str, body: &str) -> DispatchReport {
        if self.channels.is_empty() {
            info!("No notification channel configured, skipping notification");
            return DispatchReport::default();
        }

        let sends = self.channels.iter().map(|channel| async move {
            let result = send(client, channel, title, body).await;
            match &result {
                Ok(()) => info!(channel = channel.name(), "Notification sent"),
                Err(e) => error!(channel = channel.name(), error = %e, "Notification failed"),
            }
            ChannelOutcome {
                channel: channel.name(),
                result,
            }
        });

        let report = DispatchReport {
            outcomes: join_all(sends).await,
        };
        info!(
            delivered = report.delivered(),
            total = report.outcomes.len(),
            "Notification fan-out finished"
        );
        report
    }

    /// Sends a fixed test message to every channel.
    pub async fn send_test(&self, client: &HttpClient) -> DispatchReport {
        self.dispatch(client, TEST_TITLE, TEST_BODY).await
    }
}

async fn send(
    client: &HttpClient,
    channel: &Channel,
    title: &str,
    body: &str,
) -> Result<(), NotifyError> {
    let request = channel.build_request(title, body);
    let response = client.execute(&request).await?;
    channel.verify_response(&response.body)
}
