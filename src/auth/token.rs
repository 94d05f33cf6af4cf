//! Token state for the client-credentials grant.
//!
//! This module provides [`TokenState`], the credential state held by a
//! [`ParseClient`](crate::ParseClient), and [`AccessTokenResponse`], the
//! payload returned by the token and refresh endpoints.

use std::fmt;

use crate::auth::ApiScopes;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Response body of `POST /api/v1/auth/token` and `POST /api/v1/auth/refresh`.
///
/// Only `access_token` is required. A missing `expires_in` means the expiry
/// is unknown; a missing `refresh_token` means the previously held one stays
/// in use.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    /// The bearer token for subsequent calls.
    pub access_token: String,
    /// Token type, normally `"Bearer"`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// A refresh token, when the server issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Space-separated list of granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
}

/// The lifecycle state of a client's credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// No access token is held.
    Unauthenticated,
    /// An access token is held and not known to be expired.
    Authenticated,
    /// The access token has expired but a refresh token is held.
    Expired,
}

/// Credential state of an authenticated client.
///
/// `TokenState` is only replaced as a whole after a token call fully
/// succeeds, so a cancelled or failed call leaves the previous state intact.
///
/// # Security
///
/// The `Debug` implementation masks both tokens.
///
/// # Example
///
/// ```rust
/// use parse_api::TokenState;
///
/// let state = TokenState::default();
/// assert!(!state.is_authenticated());
/// assert!(state.bearer_header().is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenState {
    /// The current access token.
    pub access_token: Option<String>,
    /// The current refresh token.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds, if the server sent one.
    pub expires_in: Option<u64>,
    /// Scopes granted with the current access token.
    pub granted_scopes: ApiScopes,
    /// When the current access token was received.
    pub obtained_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// Builds the state produced by a successful token acquisition.
    #[must_use]
    pub fn from_token_response(response: &AccessTokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(response.access_token.clone()),
            refresh_token: response.refresh_token.clone(),
            expires_in: response.expires_in,
            granted_scopes: granted_scopes(response),
            obtained_at: Some(now),
        }
    }

    /// Builds the state that follows a successful refresh.
    ///
    /// The access token is always replaced. The refresh token is replaced
    /// only when the response carries one; otherwise the held value is kept.
    /// Granted scopes are kept when the response does not list any.
    #[must_use]
    pub fn refreshed(&self, response: &AccessTokenResponse, now: DateTime<Utc>) -> Self {
        let granted = granted_scopes(response);
        Self {
            access_token: Some(response.access_token.clone()),
            refresh_token: response
                .refresh_token
                .clone()
                .or_else(|| self.refresh_token.clone()),
            expires_in: response.expires_in,
            granted_scopes: if granted.is_empty() {
                self.granted_scopes.clone()
            } else {
                granted
            },
            obtained_at: Some(now),
        }
    }

    /// Returns `true` if an access token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns when the access token expires, if the expiry is known.
    ///
    /// An `expires_in` too large to represent is treated as unknown.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let expires_in = Duration::try_seconds(i64::try_from(self.expires_in?).ok()?)?;
        self.obtained_at?.checked_add_signed(expires_in)
    }

    /// Returns `true` if the access token is known to have expired.
    ///
    /// Tokens with an unknown expiry are never considered expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() >= expires)
    }

    /// Returns the lifecycle state derived from this token state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        if !self.is_authenticated() {
            AuthState::Unauthenticated
        } else if self.expired() && self.refresh_token.is_some() {
            AuthState::Expired
        } else {
            AuthState::Authenticated
        }
    }

    /// Returns the `Authorization` header value for the access token.
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .map(|token| format!("Bearer {token}"))
    }
}

fn granted_scopes(response: &AccessTokenResponse) -> ApiScopes {
    response
        .scope
        .as_deref()
        .and_then(|scope| scope.parse().ok())
        .unwrap_or_default()
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |token: &Option<String>| token.as_ref().map(|_| "*****");
        f.debug_struct("TokenState")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("granted_scopes", &self.granted_scopes)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

// Verify TokenState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenState>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn token_response(access: &str, refresh: Option<&str>) -> AccessTokenResponse {
        AccessTokenResponse {
            access_token: access.to_string(),
            token_type: Some("Bearer".to_string()),
            refresh_token: refresh.map(String::from),
            expires_in: Some(3600),
            scope: Some("read:documents read:files".to_string()),
        }
    }

    #[test]
    fn test_from_token_response_populates_state() {
        let now = Utc::now();
        let state = TokenState::from_token_response(&token_response("at-1", Some("rt-1")), now);

        assert_eq!(state.access_token.as_deref(), Some("at-1"));
        assert_eq!(state.refresh_token.as_deref(), Some("rt-1"));
        assert_eq!(state.expires_in, Some(3600));
        assert_eq!(state.granted_scopes.to_string(), "read:documents read:files");
        assert_eq!(state.expires_at(), Some(now + Duration::seconds(3600)));
        assert_eq!(state.auth_state(), AuthState::Authenticated);
    }

    #[test]
    fn test_refresh_without_new_refresh_token_keeps_old_one() {
        let now = Utc::now();
        let state = TokenState::from_token_response(&token_response("at-1", Some("rt-1")), now);

        let refreshed = state.refreshed(&token_response("at-2", None), now);

        assert_eq!(refreshed.access_token.as_deref(), Some("at-2"));
        assert_eq!(refreshed.refresh_token.as_deref(), Some("rt-1"));
    }

    #[test]
    fn test_refresh_with_new_refresh_token_replaces_it() {
        let now = Utc::now();
        let state = TokenState::from_token_response(&token_response("at-1", Some("rt-1")), now);

        let refreshed = state.refreshed(&token_response("at-2", Some("rt-2")), now);

        assert_eq!(refreshed.refresh_token.as_deref(), Some("rt-2"));
    }

    #[test]
    fn test_refresh_keeps_scopes_when_response_omits_them() {
        let now = Utc::now();
        let state = TokenState::from_token_response(&token_response("at-1", Some("rt-1")), now);
        let mut response = token_response("at-2", None);
        response.scope = None;

        let refreshed = state.refreshed(&response, now);
        assert_eq!(refreshed.granted_scopes, state.granted_scopes);
    }

    #[test]
    fn test_missing_expires_in_means_unknown_expiry() {
        let mut response = token_response("at-1", None);
        response.expires_in = None;
        let state = TokenState::from_token_response(&response, Utc::now() - Duration::days(30));

        assert!(state.expires_at().is_none());
        assert!(!state.expired());
        assert_eq!(state.auth_state(), AuthState::Authenticated);
    }

    #[test]
    fn test_unrepresentable_expires_in_means_unknown_expiry() {
        for expires_in in [u64::MAX, 10_000_000_000_000] {
            let mut response = token_response("at-1", Some("rt-1"));
            response.expires_in = Some(expires_in);
            let state = TokenState::from_token_response(&response, Utc::now());

            assert!(state.expires_at().is_none());
            assert!(!state.expired());
            assert_eq!(state.auth_state(), AuthState::Authenticated);
        }
    }

    #[test]
    fn test_expired_token_with_refresh_token_is_expired_state() {
        let state = TokenState::from_token_response(
            &token_response("at-1", Some("rt-1")),
            Utc::now() - Duration::hours(2),
        );

        assert!(state.expired());
        assert_eq!(state.auth_state(), AuthState::Expired);
    }

    #[test]
    fn test_default_state_is_unauthenticated() {
        let state = TokenState::default();
        assert_eq!(state.auth_state(), AuthState::Unauthenticated);
        assert!(state.bearer_header().is_none());
    }

    #[test]
    fn test_bearer_header_format() {
        let state = TokenState::from_token_response(&token_response("abc", None), Utc::now());
        assert_eq!(state.bearer_header().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_debug_masks_tokens() {
        let state =
            TokenState::from_token_response(&token_response("secret-at", Some("secret-rt")), Utc::now());
        let debug = format!("{state:?}");
        assert!(!debug.contains("secret-at"));
        assert!(!debug.contains("secret-rt"));
        assert!(debug.contains("*****"));
    }

    #[test]
    fn test_token_response_deserializes_with_optional_fields_missing() {
        let response: AccessTokenResponse =
            serde_json::from_str(r#"{"access_token":"at"}"#).unwrap();
        assert_eq!(response.access_token, "at");
        assert!(response.refresh_token.is_none());
        assert!(response.expires_in.is_none());
        assert!(response.scope.is_none());
    }
}
