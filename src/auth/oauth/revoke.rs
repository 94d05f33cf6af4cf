//! Token revocation.

use crate::auth::oauth::REVOKE_PATH;
use crate::clients::HttpSession;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/auth/revoke`.
#[derive(Debug, Serialize)]
struct RevokeRequest<'a> {
    token: &'a str,
    token_type_hint: &'a str,
}

/// Confirmation returned by the revocation endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RevokeConfirmation {
    /// Whether the server revoked the token.
    pub success: bool,
    /// Human-readable message from the server.
    #[serde(default)]
    pub message: Option<String>,
}

/// Revokes an access token.
///
/// The call is itself authenticated, so the session must still carry the
/// bearer header for `token`.
///
/// # Errors
///
/// - [`ApiError::HttpStatus`] if the server rejects the revocation
/// - [`ApiError::Transport`] if the request could not be completed
pub async fn revoke_access_token(
    session: &HttpSession,
    token: &str,
) -> Result<RevokeConfirmation, ApiError> {
    let body = serde_json::to_value(RevokeRequest {
        token,
        token_type_hint: "access_token",
    })
    .map_err(|e| ApiError::InvalidResponse {
        reason: format!("Failed to encode revoke request: {e}"),
    })?;

    let response = session.post(REVOKE_PATH, body).await?;

    let confirmation: RevokeConfirmation =
        serde_json::from_value(response.body).map_err(|e| ApiError::InvalidResponse {
            reason: format!("Failed to parse revoke response: {e}"),
        })?;
    if !confirmation.success {
        return Err(ApiError::InvalidResponse {
            reason: "Server did not confirm the revocation".to_string(),
        });
    }
    Ok(confirmation)
}
