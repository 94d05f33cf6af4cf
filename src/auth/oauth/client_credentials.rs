//! OAuth 2.0 Client Credentials Grant for Parse API clients.
//!
//! The service authenticates API clients (not users) with a client id and
//! secret. The token endpoint answers with a short-lived bearer token and,
//! usually, a refresh token:
//!
//! ```text
//! POST /api/v1/auth/token
//! {"grant_type": "client_credentials", "client_id": "...", "client_secret": "...",
//!  "scope": "read:documents write:documents read:files"}
//!
//! 200 {"access_token": "...", "token_type": "Bearer", "expires_in": 3600,
//!      "refresh_token": "...", "scope": "read:documents read:files"}
//! ```

use crate::auth::oauth::{decode_token_response, TOKEN_PATH};
use crate::auth::{AccessTokenResponse, ApiScopes};
use crate::clients::HttpSession;
use crate::config::{ClientId, ClientSecret};
use crate::error::ApiError;
use serde::Serialize;

/// Grant type for client credentials.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Request body for client credentials exchange.
#[derive(Debug, Serialize)]
struct ClientCredentialsRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: String,
}

/// Exchanges client credentials for an access token.
///
/// The requested scopes are sent as one space-separated `scope` string.
///
/// # Errors
///
/// - [`ApiError::Authentication`] if the server rejects the credentials
/// - [`ApiError::Transport`] if the request could not be completed
/// - [`ApiError::InvalidResponse`] if the response has no `access_token`
pub async fn exchange_client_credentials(
    session: &HttpSession,
    client_id: &ClientId,
    client_secret: &ClientSecret,
    scopes: &ApiScopes,
) -> Result<AccessTokenResponse, ApiError> {
    let request_body = ClientCredentialsRequest {
        grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
        client_id: client_id.as_ref(),
        client_secret: client_secret.as_ref(),
        scope: scopes.to_string(),
    };
    let body = serde_json::to_value(&request_body).map_err(|e| ApiError::InvalidResponse {
        reason: format!("Failed to encode token request: {e}"),
    })?;

    let response = session
        .post(TOKEN_PATH, body)
        .await
        .map_err(ApiError::from_auth)?;

    decode_token_response(response)
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientCredentialsRequest<'_>>();
};
