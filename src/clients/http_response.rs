//! HTTP response types for the Parse API SDK.
//!
//! This module provides the [`HttpResponse`] type for decoded JSON responses,
//! [`StreamingResponse`] for binary bodies that are read incrementally, and
//! [`RateLimit`] for the rate limiting headers sent by the service.

use std::collections::HashMap;

/// Rate limit information parsed from the `X-RateLimit-*` headers.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use parse_api::clients::RateLimit;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-limit".to_string(), vec!["60".to_string()]);
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["59".to_string()]);
///
/// let limit = RateLimit::from_headers(&headers).unwrap();
/// assert_eq!(limit.limit, 60);
/// assert_eq!(limit.remaining, 59);
/// assert_eq!(limit.reset, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Total requests allowed in the current window.
    pub limit: u64,
    /// Requests remaining in the current window.
    pub remaining: u64,
    /// When the window resets, as reported by the server.
    pub reset: Option<String>,
}

impl RateLimit {
    /// Parses the rate limit headers.
    ///
    /// Returns `None` unless both `X-RateLimit-Limit` and
    /// `X-RateLimit-Remaining` are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let limit = first_header(headers, "x-ratelimit-limit")?.parse().ok()?;
        let remaining = first_header(headers, "x-ratelimit-remaining")?
            .parse()
            .ok()?;
        let reset = first_header(headers, "x-ratelimit-reset").map(String::from);

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }
}

fn first_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Parses the `Retry-After` header as a number of seconds.
pub(crate) fn retry_after(headers: &HashMap<String, Vec<String>>) -> Option<u64> {
    first_header(headers, "retry-after").and_then(|value| value.trim().parse().ok())
}

/// Converts reqwest headers into a lowercase-keyed map.
pub(crate) fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

/// A decoded response from the Parse API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// Response body parsed as JSON (`{}` when the body is empty).
    pub body: serde_json::Value,
    /// Rate limit state reported with the response.
    pub rate_limit: Option<RateLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` if the status code is 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, &name.to_lowercase())
    }
}

/// A successful response whose body has not been read yet.
///
/// Returned by [`HttpSession::stream`](crate::clients::HttpSession::stream)
/// so the body can be consumed chunk by chunk.
#[derive(Debug)]
pub struct StreamingResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    inner: reqwest::Response,
}

impl StreamingResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self {
            code: inner.status().as_u16(),
            headers: parse_headers(inner.headers()),
            inner,
        }
    }

    /// Returns the `Content-Type` of the body.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        first_header(&self.headers, "content-type")
    }

    /// Returns the `Content-Length` of the body, when known.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.inner.content_length()
    }

    /// Returns the file name from the `Content-Disposition` header.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        first_header(&self.headers, "content-disposition").and_then(disposition_file_name)
    }

    /// Consumes the wrapper and returns the underlying response.
    #[must_use]
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

/// Extracts `filename` from a `Content-Disposition` value.
fn disposition_file_name(value: &str) -> Option<&str> {
    value.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("filename=")
            .map(|name| name.trim_matches('"'))
            .filter(|name| !name.is_empty())
    })
}
