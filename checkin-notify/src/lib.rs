// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Notify
//!
//! Push notification delivery for checkin runs.
//!
//! ## Channels
//!
//! | Channel | Credentials | Request |
//! |---------|-------------|---------|
//! | Server-chan | `SCKEY` | form POST |
//! | `PushPlus` | `PPTOKEN` | JSON POST |
//! | `PushDeer` | `PDKEY` | JSON POST |
//! | Bark | `BARKKEY`, `BARKSERVER` | GET |
//! | Telegram | `TELEGRAM_TOKEN`, `TELEGRAM_ID` | JSON POST |
//!
//! A channel takes part iff its credentials are set. The [`Dispatcher`]
//! sends to all of them concurrently and reports each outcome; one failing
//! channel never blocks another.

pub mod channel;
pub mod dispatch;
pub mod error;
pub mod format;

pub use channel::Channel;
pub use dispatch::{ChannelOutcome, DispatchReport, Dispatcher, TEST_BODY, TEST_TITLE};
pub use error::NotifyError;
pub use format::{bark_plain, escape_markdown_v2, serverchan_body, telegram_text};
