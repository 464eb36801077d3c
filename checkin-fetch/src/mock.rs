//! Scripted in-memory transport.
//!
//! Replies are registered per URL fragment. When several fragments match a
//! request, the longest one wins, so `qiandao.php?sign=` can be scripted
//! apart from `qiandao.php`. Each fragment replays its replies in order and
//! repeats the last one. Unmatched requests get a 404.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{FetchError, NetworkErrorKind};
use crate::request::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with a response.
    Response(HttpResponse),
    /// Fail before any response.
    Network(NetworkErrorKind),
}

impl MockReply {
    /// 200 with the given body bytes.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::Response(HttpResponse::new(200, body))
    }

    /// Empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self::Response(HttpResponse::new(status, Vec::new()))
    }

    /// Network failure of the given kind.
    pub fn network(kind: NetworkErrorKind) -> Self {
        Self::Network(kind)
    }
}

#[derive(Debug)]
struct Route {
    fragment: String,
    replies: VecDeque<MockReply>,
}

/// Transport that replays scripted replies and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `reply` for URLs containing `fragment`.
    pub fn on(self, fragment: &str, reply: MockReply) -> Self {
        {
            let mut routes = self.routes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            match routes.iter_mut().find(|r| r.fragment == fragment) {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    fragment: fragment.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// Every request sent so far, in order.
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of requests sent.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }

    fn next_reply(&self, url: &str) -> Option<MockReply> {
        let mut routes = self.routes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let route = routes
            .iter_mut()
            .filter(|r| url.contains(&r.fragment))
            .max_by_key(|r| r.fragment.len())?;

        if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());

        match self.next_reply(&request.url) {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Network(kind)) => Err(FetchError::network(kind, "mock network failure")),
            None => Ok(HttpResponse::new(404, Vec::new())),
        }
    }
}
