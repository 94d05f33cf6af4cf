//! Error types for the Parse API SDK.
//!
//! This module contains the two top-level error types of the SDK:
//!
//! - [`ConfigError`]: configuration and validation errors raised while
//!   building a [`ParseConfig`](crate::ParseConfig)
//! - [`ApiError`]: failures of the authenticated client operations
//!
//! # Error Handling
//!
//! Every [`ParseClient`](crate::ParseClient) operation either returns a fully
//! decoded result or one of the [`ApiError`] variants. Nothing is retried
//! automatically; the error carries enough information (status code, decoded
//! body, or transport error) for the caller to choose between retrying,
//! refreshing the token, and giving up.
//!
//! # Example
//!
//! ```rust
//! use parse_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use crate::clients::{ErrorBody, HttpError, HttpResponseError, InvalidHttpRequestError};
use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the client_id issued for your API client.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client_secret issued for your API client.")]
    EmptyClientSecret,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// A local precondition was violated.
///
/// These errors are always detected before a request is sent, so no network
/// traffic is produced for a call that fails with a `StateError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An authenticated call was attempted without an access token.
    #[error("No access token held. Call acquire_token() before making authenticated calls.")]
    NotAuthenticated,

    /// A refresh was attempted without a refresh token.
    #[error("No refresh token held. Acquire a new token with client credentials instead.")]
    MissingRefreshToken,

    /// A required argument was empty.
    #[error("Argument '{name}' cannot be empty")]
    EmptyArgument {
        /// The name of the empty argument.
        name: &'static str,
    },
}

/// Errors returned by [`ParseClient`](crate::ParseClient) operations.
///
/// # Example
///
/// ```rust,ignore
/// use parse_api::ApiError;
///
/// match client.get_document("doc-1").await {
///     Ok(document) => println!("Found: {}", document.id),
///     Err(ApiError::NotFound { id, .. }) => println!("{id} does not exist"),
///     Err(ApiError::Authentication { .. }) => client.refresh_token().await.map(|_| ())?,
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The connection could not be established or was interrupted.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The token or refresh endpoint rejected the request.
    #[error("Authentication failed with status {status}: {body}")]
    Authentication {
        /// The HTTP status code returned.
        status: u16,
        /// The decoded error body.
        body: ErrorBody,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Document").
        resource: &'static str,
        /// The id that was requested.
        id: String,
        /// The decoded error body.
        body: ErrorBody,
    },

    /// Any other non-2xx response.
    #[error(transparent)]
    HttpStatus(HttpResponseError),

    /// A local precondition was violated; no request was sent.
    #[error(transparent)]
    State(#[from] StateError),

    /// A successful response was missing a field the client reads.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// The request failed validation before it was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Writing to a download destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Returns the HTTP status code for server-side failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::HttpStatus(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the decoded error body for server-side failures.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Authentication { body, .. } | Self::NotFound { body, .. } => Some(body),
            Self::HttpStatus(e) => Some(&e.body),
            _ => None,
        }
    }

    /// Returns `true` if this is a [`ApiError::NotFound`] error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the server answered 401.
    ///
    /// A 401 on a resource call usually means the access token expired and
    /// should be refreshed.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Maps an error from an authenticated resource call.
    ///
    /// A 404 becomes [`ApiError::NotFound`] for the given resource and id.
    pub(crate) fn from_resource(error: HttpError, resource: &'static str, id: &str) -> Self {
        match error {
            HttpError::Response(e) if e.code == 404 => Self::NotFound {
                resource,
                id: id.to_string(),
                body: e.body,
            },
            other => other.into(),
        }
    }

    /// Maps an error from the token and refresh endpoints.
    ///
    /// Every non-2xx response becomes [`ApiError::Authentication`].
    pub(crate) fn from_auth(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::Authentication {
                status: e.code,
                body: e.body,
            },
            other => other.into(),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::HttpStatus(e),
            HttpError::InvalidRequest(e) => Self::InvalidRequest(e),
            HttpError::InvalidBody { code, .. } => Self::InvalidResponse {
                reason: format!("Response with status {code} is not valid JSON"),
            },
            HttpError::Network(e) => Self::Transport(e),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error)
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
    assert_send_sync::<StateError>();
    assert_send_sync::<ApiError>();
};
