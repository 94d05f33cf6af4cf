//! OAuth 2.0 token endpoints of the Parse public API.
//!
//! This module provides the raw token calls used by
//! [`ParseClient`](crate::ParseClient):
//!
//! - **Client Credentials Grant** ([`exchange_client_credentials`]): obtain an
//!   access token with the client id and secret
//! - **Token Refresh** ([`refresh_access_token`]): trade a refresh token for a
//!   new access token
//! - **Token Revocation** ([`revoke_access_token`]): invalidate a token
//!
//! These functions only perform the HTTP exchange and decode the response.
//! They never touch a client's [`TokenState`](crate::TokenState); installing
//! the result is up to the caller, which is how `ParseClient` keeps token
//! updates atomic.
//!
//! # Error Mapping
//!
//! Any non-2xx answer from the token or refresh endpoint is reported as
//! [`ApiError::Authentication`](crate::ApiError::Authentication) with the
//! decoded error body (e.g. `{"error": "invalid_client", "error_description": ...}`).
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_api::auth::oauth::exchange_client_credentials;
//! use parse_api::clients::HttpSession;
//!
//! let session = HttpSession::new(&config)?;
//! let token = exchange_client_credentials(
//!     &session,
//!     config.client_id(),
//!     config.client_secret(),
//!     config.scopes(),
//! )
//! .await?;
//! println!("expires in {:?}s", token.expires_in);
//! ```

mod client_credentials;
mod revoke;
mod token_refresh;

pub use client_credentials::exchange_client_credentials;
pub use revoke::{revoke_access_token, RevokeConfirmation};
pub use token_refresh::refresh_access_token;

use crate::auth::AccessTokenResponse;
use crate::clients::HttpResponse;
use crate::error::ApiError;

/// Path of the client-credentials token endpoint.
pub const TOKEN_PATH: &str = "api/v1/auth/token";
/// Path of the refresh endpoint.
pub const REFRESH_PATH: &str = "api/v1/auth/refresh";
/// Path of the revocation endpoint.
pub const REVOKE_PATH: &str = "api/v1/auth/revoke";

/// Decodes a 2xx token response, requiring a non-empty `access_token`.
fn decode_token_response(response: HttpResponse) -> Result<AccessTokenResponse, ApiError> {
    let token: AccessTokenResponse =
        serde_json::from_value(response.body).map_err(|e| ApiError::InvalidResponse {
            reason: format!("Failed to parse token response: {e}"),
        })?;

    if token.access_token.is_empty() {
        return Err(ApiError::InvalidResponse {
            reason: "Token response has an empty access_token".to_string(),
        });
    }

    Ok(token)
}
