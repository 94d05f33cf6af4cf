//! HTTP-specific error types for the Parse API SDK.
//!
//! This module contains error types for the transport layer:
//!
//! - [`ErrorBody`]: The decoded body of a non-2xx response
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_api::clients::{HttpError, HttpSession, HttpRequest, HttpMethod};
//!
//! match session.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.body);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => {
//!         println!("Invalid request: {}", e);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use std::fmt;

use crate::clients::http_response::RateLimit;
use thiserror::Error;

/// The body of a non-2xx response.
///
/// The service answers errors with a JSON object such as
/// `{"error": "not_found", "message": "Document not found"}`. When the body
/// cannot be parsed as JSON the raw text is kept in [`ErrorBody::NotJson`]
/// so that condition can be told apart from a well-formed error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body was empty or not valid JSON.
    NotJson {
        /// The raw response text.
        raw: String,
    },
}

impl ErrorBody {
    /// Decodes a raw error body.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).map_or_else(
            |_| Self::NotJson {
                raw: raw.to_string(),
            },
            Self::Json,
        )
    }

    /// Returns `true` if the body was valid JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Returns the machine-readable `error` code (e.g., `"invalid_client"`).
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.field("error")
    }

    /// Returns the human-readable description of the error.
    ///
    /// The auth endpoints use `error_description`, the document endpoints
    /// use `message`.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.field("error_description")
            .or_else(|| self.field("message"))
    }

    fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Json(value) => value.get(name).and_then(serde_json::Value::as_str),
            Self::NotJson { .. } => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::NotJson { raw } => write!(f, "non-JSON body: {raw:?}"),
        }
    }
}

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use parse_api::clients::{ErrorBody, HttpResponseError};
///
/// let error = HttpResponseError {
///     code: 400,
///     body: ErrorBody::parse(r#"{"error":"already_exported"}"#),
///     rate_limit: None,
///     retry_after: None,
/// };
///
/// assert_eq!(error.body.error_code(), Some("already_exported"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The decoded error body.
    pub body: ErrorBody,
    /// Rate limit state reported with the response, if any.
    pub rate_limit: Option<RateLimit>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_after: Option<u64>,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST requests
/// - Body provided without `body_type`
///
/// # Example
///
/// ```rust
/// use parse_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// println!("{}", error); // "Cannot use post without specifying data."
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A header name or value could not be encoded.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// The transport session never retries; each variant is surfaced as-is.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A success response whose body is not valid JSON.
    #[error("Response with status {code} is not valid JSON")]
    InvalidBody {
        /// HTTP status code of the response.
        code: u16,
        /// The raw body text.
        raw: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_parses_json() {
        let body = ErrorBody::parse(
            r#"{"error":"invalid_client","error_description":"Client authentication failed"}"#,
        );

        assert!(body.is_json());
        assert_eq!(body.error_code(), Some("invalid_client"));
        assert_eq!(body.description(), Some("Client authentication failed"));
    }

    #[test]
    fn test_error_body_falls_back_to_message() {
        let body = ErrorBody::parse(r#"{"error":"not_found","message":"Document not found"}"#);
        assert_eq!(body.description(), Some("Document not found"));
    }

    #[test]
    fn test_error_body_marks_non_json() {
        let body = ErrorBody::parse("<html>Bad Gateway</html>");

        assert_eq!(
            body,
            ErrorBody::NotJson {
                raw: "<html>Bad Gateway</html>".to_string()
            }
        );
        assert!(body.error_code().is_none());
        assert!(body.to_string().contains("non-JSON"));
    }

    #[test]
    fn test_empty_body_is_not_json() {
        assert!(!ErrorBody::parse("").is_json());
    }

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 404,
            body: ErrorBody::parse(r#"{"error":"not_found"}"#),
            rate_limit: None,
            retry_after: None,
        };
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("not_found"));
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
        assert_eq!(
            InvalidHttpRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_http_error_wraps_response_error() {
        let error: HttpError = HttpResponseError {
            code: 500,
            body: ErrorBody::parse("oops"),
            rate_limit: None,
            retry_after: None,
        }
        .into();
        assert!(matches!(error, HttpError::Response(e) if e.code == 500));
    }
}
