// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Checkin CLI - daily forum checkin with push notifications.
//!
//! # Examples
//!
//! ```bash
//! # Check in on every site with a cookie set, then notify
//! SJCOOKIE='...' checkin
//!
//! # Only some sites
//! CHECKIN_SITES=4ksj checkin run
//!
//! # Extra sites from a YAML file
//! checkin --sites-file ./sites.yaml run
//!
//! # List known sites and whether each has a cookie
//! checkin sites
//!
//! # Send a test message through every configured channel
//! checkin notify-test
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{notify_test, run, sites};

// ============================================================================
// CLI Definition
// ============================================================================

/// Checkin CLI - daily forum checkin.
#[derive(Parser)]
#[command(name = "checkin")]
#[command(about = "Daily forum checkin with push notifications")]
#[command(long_about = r#"
Checks in on Discuz forums using session cookies from the environment,
then pushes a summary to every configured notification channel.

Environment:
  SJCOOKIE          Session cookie for 4K视界 (4ksj)
  CHECKIN_SITES     Comma-separated site ids to run (default: all)
  CHECKIN_SITES_FILE  YAML file with extra site profiles
  SCKEY, PPTOKEN, PDKEY, BARKKEY, BARKSERVER, TELEGRAM_TOKEN, TELEGRAM_ID
                    Notification channel credentials

Examples:
  checkin                  # Run every site with a cookie
  checkin sites            # List sites
  checkin notify-test      # Test notification channels
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'run' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// YAML file with extra site profiles (overrides CHECKIN_SITES_FILE).
    #[arg(long, global = true)]
    pub sites_file: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check in on every enabled site and notify (default).
    #[command(visible_alias = "r")]
    Run,

    /// List known sites.
    #[command(visible_alias = "s")]
    Sites,

    /// Send a test notification through every configured channel.
    NotifyTest,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let default = if verbose {
        "checkin=debug,info"
    } else {
        "checkin=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Run) | None => run::run(&cli).await,
        Some(Commands::Sites) => sites::run(&cli),
        Some(Commands::NotifyTest) => notify_test::run().await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}
