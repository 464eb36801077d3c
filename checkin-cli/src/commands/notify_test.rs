//! Notify-test command - send a test message through every channel.

use anyhow::Result;
use checkin_core::Config;
use checkin_fetch::HttpClient;
use checkin_notify::Dispatcher;

/// Runs the notify-test command.
pub async fn run() -> Result<()> {
    let config = Config::from_env();
    let dispatcher = Dispatcher::from_config(&config.notify);

    if dispatcher.channels().is_empty() {
        println!("No notification channel configured.");
        return Ok(());
    }

    let client = HttpClient::new()?;
    let report = dispatcher.send_test(&client).await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("✓ {}", outcome.channel),
            Err(e) => println!("✗ {}: {e}", outcome.channel),
        }
    }
    println!();
    println!("{}/{} channels delivered", report.delivered(), report.outcomes.len());

    Ok(())
}
