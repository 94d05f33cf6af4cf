//! Token refresh for Parse API access tokens.
//!
//! A refresh trades the held refresh token for a new access token without
//! sending the client secret again. The server may rotate the refresh token;
//! when the response carries none, the old one stays valid.

use crate::auth::oauth::{decode_token_response, REFRESH_PATH};
use crate::auth::AccessTokenResponse;
use crate::clients::HttpSession;
use crate::error::ApiError;
use serde::Serialize;

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Request body for token refresh.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// Refreshes an access token using a refresh token.
///
/// # Errors
///
/// - [`ApiError::Authentication`] if the refresh token is invalid or expired
/// - [`ApiError::Transport`] if the request could not be completed
/// - [`ApiError::InvalidResponse`] if the response has no `access_token`
pub async fn refresh_access_token(
    session: &HttpSession,
    refresh_token: &str,
) -> Result<AccessTokenResponse, ApiError> {
    let request_body = TokenRefreshRequest {
        grant_type: REFRESH_TOKEN_GRANT_TYPE,
        refresh_token,
    };
    let body = serde_json::to_value(&request_body).map_err(|e| ApiError::InvalidResponse {
        reason: format!("Failed to encode refresh request: {e}"),
    })?;

    let response = session
        .post(REFRESH_PATH, body)
        .await
        .map_err(ApiError::from_auth)?;

    decode_token_response(response)
}
