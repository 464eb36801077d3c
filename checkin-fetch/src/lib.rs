// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Fetch
//!
//! Outbound HTTP and response handling for `checkin`.
//!
//! ## Transport
//!
//! - [`transport::Transport`] - Sends one request, no retries
//! - [`transport::ReqwestTransport`] - Production transport on `reqwest`
//! - `mock::MockTransport` - Scripted in-memory transport (`test-util` feature)
//!
//! ## Resilience
//!
//! - [`retry::RetryPolicy`] - Which failures are retried and how long to wait
//! - [`client::HttpClient`] - Applies the policy to every request
//!
//! ## Response Handling
//!
//! - [`decode::TextEncoding`] - Per-page body decoding
//! - [`html::HtmlPage`] - Selector-based text and attribute extraction
//!
//! ## Example
//!
//! ```ignore
//! use checkin_fetch::{HttpClient, HtmlPage, TextEncoding};
//!
//! let client = HttpClient::new()?;
//! let response = client.get("https://forum.example/qiandao.php", &headers).await?;
//! let page = HtmlPage::parse(&response.decode(TextEncoding::Gbk));
//! let message = page.text("#messagetext > p")?;
//! ```

pub mod client;
pub mod decode;
pub mod error;
pub mod html;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod request;
pub mod retry;
pub mod transport;

pub use client::HttpClient;
pub use decode::TextEncoding;
pub use error::{FetchError, NetworkErrorKind};
pub use html::HtmlPage;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockReply, MockTransport};
pub use request::{HttpRequest, HttpResponse, Method, RequestBody};
pub use retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport};
