//! Transport-neutral request and response types.

use std::fmt;

use reqwest::Url;

use crate::decode::TextEncoding;
use crate::error::FetchError;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON document.
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    /// Creates a POST request with a form body.
    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(form),
        }
    }

    /// Adds headers.
    pub fn with_headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    /// Loggable form of the URL, see [`redact_url`].
    pub fn origin(&self) -> String {
        redact_url(&self.url)
    }

    /// Returns the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response. The body is kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response without headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Converts 4xx/5xx responses into [`FetchError::Status`].
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.status >= 400 {
            Err(FetchError::Status {
                status: self.status,
                origin: redact_url(url),
            })
        } else {
            Ok(self)
        }
    }

    /// Decodes the body with `encoding`.
    pub fn decode(&self, encoding: TextEncoding) -> String {
        encoding.decode(&self.body)
    }
}

/// Scheme, host and port of `url`.
///
/// Paths and queries carry secrets (bot tokens, send keys, form hashes), so
/// only this form may reach logs and error messages.
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => "<invalid url>".to_string(),
    }
}
