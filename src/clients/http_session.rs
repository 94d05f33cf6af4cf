//! Transport session for Parse API communication.
//!
//! This module provides the [`HttpSession`] type: a base URL, a shared set of
//! default headers, and the GET/POST plumbing every API call goes through.

use std::collections::HashMap;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use tokio::sync::RwLock;

use crate::auth::TokenState;
use crate::clients::errors::{ErrorBody, HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{
    parse_headers, retry_after, HttpResponse, RateLimit, StreamingResponse,
};
use crate::config::{BaseUrl, ParseConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP session shared by all calls of a client.
///
/// The session handles:
/// - URL construction from the configured base URL
/// - Default headers (User-Agent, Accept, and the Authorization header once
///   a token is installed) attached to every request
/// - Decoding JSON bodies and turning non-2xx responses into
///   [`HttpResponseError`]
///
/// The session never retries. Network failures surface as
/// [`HttpError::Network`], distinct from status failures.
///
/// # Thread Safety
///
/// `HttpSession` is `Send + Sync`. The default header set sits behind a
/// lock: each request takes one snapshot of it, so a concurrent header
/// update is either fully visible to a request or not at all.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: RwLock<HashMap<String, String>>,
}

// Verify HttpSession is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpSession>();
};

impl HttpSession {
    /// Creates a new session for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ParseConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Parse API Library v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers: RwLock::new(default_headers),
        })
    }

    /// Returns the base URL for this session.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns a snapshot of the default headers.
    pub async fn default_headers(&self) -> HashMap<String, String> {
        self.default_headers.read().await.clone()
    }

    /// Sets a header sent with every subsequent request on this session.
    ///
    /// Replaces any existing value for `name`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidHeader`] if the name or
    /// value is not a valid HTTP header.
    pub async fn set_default_header(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), InvalidHttpRequestError> {
        let name = name.into();
        let value = value.into();
        if HeaderName::from_bytes(name.as_bytes()).is_err()
            || HeaderValue::from_str(&value).is_err()
        {
            return Err(InvalidHttpRequestError::InvalidHeader { name });
        }

        let mut headers = self.default_headers.write().await;
        headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
        Ok(())
    }

    /// Removes a default header, compared case-insensitively.
    pub async fn remove_default_header(&self, name: &str) {
        self.default_headers
            .write()
            .await
            .retain(|key, _| !key.eq_ignore_ascii_case(name));
    }

    /// Rewrites the `Authorization` header from a token state.
    ///
    /// Installs `Bearer <access_token>` when the state holds an access token
    /// and removes the header otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidHeader`] if the token
    /// contains characters that cannot be sent in a header.
    pub async fn apply_token(&self, token: &TokenState) -> Result<(), InvalidHttpRequestError> {
        match token.bearer_header() {
            Some(bearer) => self.set_default_header(AUTHORIZATION.as_str(), bearer).await,
            None => {
                self.remove_default_header(AUTHORIZATION.as_str()).await;
                Ok(())
            }
        }
    }

    /// Sends a GET request with the given query parameters.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.request(builder.build()?).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        body: impl Into<serde_json::Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .json(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is not valid JSON (`InvalidBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let res = self.send(&request).await?;
        if !res.status().is_success() {
            return Err(Self::response_error(res).await.into());
        }

        let code = res.status().as_u16();
        let headers = parse_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(_) => {
                    tracing::warn!(path = %request.path, status = code, "Response body is not JSON");
                    return Err(HttpError::InvalidBody {
                        code,
                        raw: body_text,
                    });
                }
            }
        };

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Sends a request and returns the response with its body unread.
    ///
    /// Use this for binary payloads that should be consumed incrementally.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request); the status is checked before the
    /// body is handed back.
    pub async fn stream(&self, request: HttpRequest) -> Result<StreamingResponse, HttpError> {
        let res = self.send(&request).await?;
        if !res.status().is_success() {
            return Err(Self::response_error(res).await.into());
        }
        Ok(StreamingResponse::new(res))
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        // One snapshot per request so a concurrent token update is all-or-nothing.
        let mut headers = self.default_headers().await;
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending request");

        Ok(req_builder.send().await?)
    }

    /// Reads a non-2xx response into an [`HttpResponseError`].
    async fn response_error(res: reqwest::Response) -> HttpResponseError {
        let code = res.status().as_u16();
        let headers = parse_headers(res.headers());
        let body_text = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(status = code, error = %e, "Failed to read error response body");
                String::new()
            }
        };
        let body = ErrorBody::parse(&body_text);

        if !body.is_json() {
            tracing::warn!(status = code, "Error response body is not JSON");
        }

        HttpResponseError {
            code,
            body,
            rate_limit: RateLimit::from_headers(&headers),
            retry_after: retry_after(&headers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret};

    fn create_test_config(prefix: Option<&str>) -> ParseConfig {
        let mut builder = ParseConfig::builder()
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn test_session_construction() {
        let session = HttpSession::new(&create_test_config(None)).unwrap();

        assert_eq!(session.base_url().as_ref(), "https://api.example.com");
        let headers = session.default_headers().await;
        assert_eq!(
            headers.get("Accept"),
            Some(&"application/json".to_string())
        );
        assert!(!headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_user_agent_with_prefix() {
        let session = HttpSession::new(&create_test_config(Some("ERP/1.0"))).unwrap();

        let headers = session.default_headers().await;
        let user_agent = headers.get("User-Agent").unwrap();
        assert!(user_agent.starts_with("ERP/1.0 | "));
        assert!(user_agent.contains("Parse API Library"));
    }

    #[tokio::test]
    async fn test_set_default_header_replaces_case_insensitively() {
        let session = HttpSession::new(&create_test_config(None)).unwrap();

        session
            .set_default_header("authorization", "Bearer one")
            .await
            .unwrap();
        session
            .set_default_header("Authorization", "Bearer two")
            .await
            .unwrap();

        let headers = session.default_headers().await;
        let values: Vec<&String> = headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, vec!["Bearer two"]);
    }

    #[tokio::test]
    async fn test_set_default_header_rejects_invalid_value() {
        let session = HttpSession::new(&create_test_config(None)).unwrap();

        let result = session.set_default_header("X-Test", "bad\nvalue").await;
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidHeader { name }) if name == "X-Test"
        ));
    }

    #[tokio::test]
    async fn test_apply_token_installs_and_removes_bearer() {
        let session = HttpSession::new(&create_test_config(None)).unwrap();
        let token = TokenState {
            access_token: Some("abc".to_string()),
            ..TokenState::default()
        };

        session.apply_token(&token).await.unwrap();
        assert_eq!(
            session.default_headers().await.get("authorization"),
            Some(&"Bearer abc".to_string())
        );

        session.apply_token(&TokenState::default()).await.unwrap();
        assert!(!session
            .default_headers()
            .await
            .keys()
            .any(|k| k.eq_ignore_ascii_case("authorization")));
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpSession>();
    }
}
