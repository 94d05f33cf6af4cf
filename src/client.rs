//! The authenticated Parse API client.
//!
//! [`ParseClient`] owns the credential state of one API client and exposes
//! one async method per remote operation. Every method issues at most one
//! HTTP call, checks the status, and returns either a decoded payload or an
//! [`ApiError`].
//!
//! # Overview
//!
//! ```text
//! Unauthenticated --acquire_token--> Authenticated --refresh_token--> Authenticated
//!        ^                                 |
//!        +---- refresh failure / revoke ---+
//! ```
//!
//! Once a token is acquired the client installs `Authorization: Bearer <token>`
//! on its [`HttpSession`]; no call site attaches credentials by hand.
//!
//! # Concurrency
//!
//! `ParseClient` is `Send + Sync` and can be shared behind an `Arc`. Token
//! acquisition, refresh and revocation are serialized by one mutex so two
//! refreshes never race on the refresh token. The token state and the
//! session's `Authorization` header are updated together, and only after a
//! token response has been fully decoded: dropping an in-flight call leaves
//! the previous state untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_api::{BaseUrl, ClientId, ClientSecret, DocumentFilter, ParseClient, ParseConfig};
//!
//! let config = ParseConfig::builder()
//!     .base_url(BaseUrl::new("https://api.parsedemo.axiomacloud.com")?)
//!     .client_id(ClientId::new("client_abc")?)
//!     .client_secret(ClientSecret::new("secret")?)
//!     .build()?;
//!
//! let client = ParseClient::new(config)?;
//! client.acquire_token(None).await?;
//!
//! let page = client.list_documents(&DocumentFilter::new().exportado(false)).await?;
//! for doc in &page.documents {
//!     let lines = client.get_document_lines(&doc.id).await?;
//!     println!("{} has {} lines", doc.id, lines.len());
//! }
//! ```

use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWrite;
use tokio::sync::{Mutex, RwLock};

use crate::auth::oauth::{exchange_client_credentials, refresh_access_token, revoke_access_token};
use crate::auth::{ApiScopes, AuthState, TokenState};
use crate::clients::{write_chunks, HttpMethod, HttpRequest, HttpSession, StreamingResponse};
use crate::config::ParseConfig;
use crate::error::{ApiError, StateError};
use crate::resources::{
    Document, DocumentFilter, DocumentLine, DocumentPage, DocumentTax, ExportConfirmation,
    HealthStatus, Identity, MarkExported,
};

const IDENTITY_PATH: &str = "api/v1/auth/me";
const DOCUMENTS_PATH: &str = "api/v1/documents";
const HEALTH_PATH: &str = "api/v1/health";
const AUTH_HEALTH_PATH: &str = "api/v1/auth/health";

/// Resource name used in [`ApiError::NotFound`] for documents.
const DOCUMENT: &str = "Document";

/// Client for the Parse public API.
///
/// # Thread Safety
///
/// `ParseClient` is `Send + Sync`.
#[derive(Debug)]
pub struct ParseClient {
    config: ParseConfig,
    session: HttpSession,
    token: RwLock<TokenState>,
    token_update: Mutex<()>,
}

// Verify ParseClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseClient>();
};

impl ParseClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ParseConfig) -> Result<Self, ApiError> {
        let session = HttpSession::new(&config)?;
        Ok(Self {
            config,
            session,
            token: RwLock::new(TokenState::default()),
            token_update: Mutex::new(()),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Returns the underlying transport session.
    #[must_use]
    pub const fn session(&self) -> &HttpSession {
        &self.session
    }

    /// Returns a snapshot of the current token state.
    pub async fn token_state(&self) -> TokenState {
        self.token.read().await.clone()
    }

    /// Returns the lifecycle state of the credentials.
    pub async fn state(&self) -> AuthState {
        self.token.read().await.auth_state()
    }

    /// Obtains an access token with the client-credentials grant.
    ///
    /// `scopes` defaults to the configured scopes. On success the bearer
    /// header is installed on the session and the new state is returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] if the server denies the credentials
    /// - [`ApiError::Transport`] if the call could not be completed
    ///
    /// On error the previous token state is kept.
    pub async fn acquire_token(&self, scopes: Option<ApiScopes>) -> Result<TokenState, ApiError> {
        let _update = self.token_update.lock().await;

        let scopes = scopes.unwrap_or_else(|| self.config.scopes().clone());
        let response = exchange_client_credentials(
            &self.session,
            self.config.client_id(),
            self.config.client_secret(),
            &scopes,
        )
        .await?;

        let next = TokenState::from_token_response(&response, Utc::now());
        self.install(next.clone()).await?;

        tracing::info!(
            expires_in = ?next.expires_in,
            scopes = %next.granted_scopes,
            has_refresh_token = next.refresh_token.is_some(),
            "Access token acquired"
        );
        Ok(next)
    }

    /// Trades the held refresh token for a new access token.
    ///
    /// The access token is always replaced; the refresh token only when the
    /// server sends a new one.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] with [`StateError::MissingRefreshToken`] if no
    ///   refresh token is held; no request is sent and the client becomes
    ///   unauthenticated
    /// - [`ApiError::Authentication`] if the server rejects the refresh; the
    ///   client becomes unauthenticated
    /// - [`ApiError::Transport`] if the call could not be completed; the
    ///   token state is kept
    pub async fn refresh_token(&self) -> Result<TokenState, ApiError> {
        let _update = self.token_update.lock().await;

        let current = self.token.read().await.clone();
        let Some(refresh_token) = current.refresh_token.clone() else {
            if current.is_authenticated() {
                tracing::warn!("Refresh attempted without a refresh token, dropping credentials");
                self.install(TokenState::default()).await?;
            }
            return Err(StateError::MissingRefreshToken.into());
        };

        let response = match refresh_access_token(&self.session, &refresh_token).await {
            Ok(response) => response,
            Err(error @ ApiError::Authentication { .. }) => {
                tracing::warn!(status = ?error.status(), "Token refresh rejected, dropping credentials");
                self.install(TokenState::default()).await?;
                return Err(error);
            }
            Err(error) => return Err(error),
        };

        let next = current.refreshed(&response, Utc::now());
        self.install(next.clone()).await?;

        tracing::info!(
            expires_in = ?next.expires_in,
            rotated = response.refresh_token.is_some(),
            "Access token refreshed"
        );
        Ok(next)
    }

    /// Revokes the current access token and drops the credentials.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if no access token is held
    /// - [`ApiError::HttpStatus`] or [`ApiError::Transport`] if the call
    ///   fails; the token state is kept
    pub async fn revoke_token(&self) -> Result<(), ApiError> {
        let _update = self.token_update.lock().await;

        let access_token = self
            .token
            .read()
            .await
            .access_token
            .clone()
            .ok_or(StateError::NotAuthenticated)?;

        let confirmation = revoke_access_token(&self.session, &access_token).await?;
        self.install(TokenState::default()).await?;

        tracing::info!(message = ?confirmation.message, "Access token revoked");
        Ok(())
    }

    /// Returns the identity of the authenticated API client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if no access token is held
    /// - [`ApiError::HttpStatus`] or [`ApiError::Transport`] if the call fails
    pub async fn fetch_identity(&self) -> Result<Identity, ApiError> {
        self.ensure_authenticated().await?;

        let response = self.session.get(IDENTITY_PATH, Vec::new()).await?;
        decode(response.body, "identity")
    }

    /// Lists documents matching `filter`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if no access token is held
    /// - [`ApiError::InvalidResponse`] if `data.documents` or
    ///   `data.pagination` is missing
    /// - [`ApiError::HttpStatus`] or [`ApiError::Transport`] if the call fails
    pub async fn list_documents(&self, filter: &DocumentFilter) -> Result<DocumentPage, ApiError> {
        self.ensure_authenticated().await?;

        let response = self.session.get(DOCUMENTS_PATH, filter.to_query()).await?;
        let mut page: DocumentPage = decode(take_data(response.body)?, "document page")?;
        page.pagination.returned_count = page.documents.len();

        tracing::debug!(
            returned = page.pagination.returned_count,
            total = page.pagination.total,
            "Documents listed"
        );
        Ok(page)
    }

    /// Fetches one document.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if `id` is empty or no access token is held
    /// - [`ApiError::NotFound`] if the document does not exist
    /// - [`ApiError::HttpStatus`] or [`ApiError::Transport`] otherwise
    pub async fn get_document(&self, id: &str) -> Result<Document, ApiError> {
        self.ensure_document_call(id).await?;

        let response = self
            .session
            .get(&document_path(id, ""), Vec::new())
            .await
            .map_err(|e| ApiError::from_resource(e, DOCUMENT, id))?;
        decode(take_data(response.body)?, "document")
    }

    /// Fetches the line items of a document, in server order.
    ///
    /// # Errors
    ///
    /// Same as [`get_document`](Self::get_document).
    pub async fn get_document_lines(&self, id: &str) -> Result<Vec<DocumentLine>, ApiError> {
        self.ensure_document_call(id).await?;

        let response = self
            .session
            .get(&document_path(id, "/lineas"), Vec::new())
            .await
            .map_err(|e| ApiError::from_resource(e, DOCUMENT, id))?;
        take_list(take_data(response.body)?, "lineas")
    }

    /// Fetches the taxes of a document, in server order.
    ///
    /// # Errors
    ///
    /// Same as [`get_document`](Self::get_document).
    pub async fn get_document_taxes(&self, id: &str) -> Result<Vec<DocumentTax>, ApiError> {
        self.ensure_document_call(id).await?;

        let response = self
            .session
            .get(&document_path(id, "/impuestos"), Vec::new())
            .await
            .map_err(|e| ApiError::from_resource(e, DOCUMENT, id))?;
        take_list(take_data(response.body)?, "impuestos")
    }

    /// Marks a document as exported to an external system.
    ///
    /// This call is sent exactly once. It is never repeated after a timeout
    /// or any other failure, since a repeat could mark the document twice.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if `id` or the external system id is empty, or
    ///   no access token is held
    /// - [`ApiError::NotFound`] if the document does not exist
    /// - [`ApiError::HttpStatus`] with error code `already_exported` if the
    ///   document was already marked and `force` is not set
    /// - [`ApiError::Transport`] if the outcome is unknown
    pub async fn mark_exported(
        &self,
        id: &str,
        request: &MarkExported,
    ) -> Result<ExportConfirmation, ApiError> {
        if request.external_system_id().trim().is_empty() {
            return Err(StateError::EmptyArgument {
                name: "external_system_id",
            }
            .into());
        }
        self.ensure_document_call(id).await?;

        let body = serde_json::to_value(request).map_err(|e| ApiError::InvalidResponse {
            reason: format!("Failed to encode mark-exported request: {e}"),
        })?;
        let mut builder = HttpRequest::builder(HttpMethod::Post, document_path(id, "/mark-exported"))
            .json(body);
        if request.is_forced() {
            builder = builder.query_param("force", "true");
        }

        let response = self
            .session
            .request(builder.build()?)
            .await
            .map_err(|e| ApiError::from_resource(e, DOCUMENT, id))?;

        tracing::info!(document_id = %id, "Document marked as exported");
        decode(response.body, "export confirmation")
    }

    /// Streams the original file of a document into `sink`.
    ///
    /// The body is written chunk by chunk as it arrives and `sink` is flushed
    /// on every exit path. Returns the number of bytes written. A failure
    /// midway leaves a truncated prefix in `sink`; the download must then be
    /// restarted from the beginning.
    ///
    /// # Errors
    ///
    /// - [`ApiError::State`] if `id` is empty or no access token is held
    /// - [`ApiError::NotFound`] if the document or its file does not exist
    /// - [`ApiError::Transport`] if the body stream is interrupted
    /// - [`ApiError::Io`] if writing to `sink` fails
    pub async fn download_file<W>(&self, id: &str, sink: &mut W) -> Result<u64, ApiError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self.open_file(id).await?;
        copy_file(id, response, sink).await
    }

    /// Downloads the original file of a document to `path`.
    ///
    /// The file is only created once the server has answered with a
    /// success status. If the body stream fails, the truncated file is left
    /// in place and the error is returned.
    ///
    /// # Errors
    ///
    /// Same as [`download_file`](Self::download_file), plus
    /// [`ApiError::Io`] if the file cannot be created.
    pub async fn download_file_to_path(
        &self,
        id: &str,
        path: impl AsRef<Path>,
    ) -> Result<u64, ApiError> {
        let response = self.open_file(id).await?;
        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        copy_file(id, response, &mut file).await
    }

    /// Checks the health of the public API. Needs no token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpStatus`] or [`ApiError::Transport`] if the
    /// call fails.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.session.get(HEALTH_PATH, Vec::new()).await?;
        decode(response.body, "health status")
    }

    /// Checks the health of the authentication service. Needs no token.
    ///
    /// # Errors
    ///
    /// Same as [`health`](Self::health).
    pub async fn auth_health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.session.get(AUTH_HEALTH_PATH, Vec::new()).await?;
        decode(response.body, "health status")
    }

    async fn open_file(&self, id: &str) -> Result<StreamingResponse, ApiError> {
        self.ensure_document_call(id).await?;

        let request = HttpRequest::builder(HttpMethod::Get, document_path(id, "/file"))
            .header("Accept", "*/*")
            .build()?;
        self.session
            .stream(request)
            .await
            .map_err(|e| ApiError::from_resource(e, DOCUMENT, id))
    }

    /// Replaces the token state and the session's bearer header together.
    ///
    /// Both locks are taken before anything is written, and no await point
    /// follows the first write, so a dropped future never leaves the two
    /// out of sync.
    async fn install(&self, next: TokenState) -> Result<(), ApiError> {
        let mut current = self.token.write().await;
        self.session.apply_token(&next).await?;
        *current = next;
        Ok(())
    }

    async fn ensure_authenticated(&self) -> Result<(), StateError> {
        if self.token.read().await.is_authenticated() {
            Ok(())
        } else {
            Err(StateError::NotAuthenticated)
        }
    }

    async fn ensure_document_call(&self, id: &str) -> Result<(), StateError> {
        if id.trim().is_empty() {
            return Err(StateError::EmptyArgument { name: "id" });
        }
        self.ensure_authenticated().await
    }
}

/// Streams a file response into `sink`, logging what was received.
async fn copy_file<W>(id: &str, response: StreamingResponse, sink: &mut W) -> Result<u64, ApiError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let content_type = response.content_type().map(str::to_string);
    let file_name = response.file_name().map(str::to_string);
    let stream = Box::pin(response.into_inner().bytes_stream());

    let written = write_chunks(stream, sink).await?;

    tracing::info!(
        document_id = %id,
        bytes = written,
        content_type = ?content_type,
        file_name = ?file_name,
        "File downloaded"
    );
    Ok(written)
}

fn document_path(id: &str, suffix: &str) -> String {
    format!("{DOCUMENTS_PATH}/{}{suffix}", urlencoding::encode(id))
}

/// Takes the `data` field of a response envelope.
fn take_data(body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Object(mut map) => map.remove("data").ok_or_else(|| ApiError::InvalidResponse {
            reason: "Response is missing the 'data' envelope".to_string(),
        }),
        _ => Err(ApiError::InvalidResponse {
            reason: "Response body is not a JSON object".to_string(),
        }),
    }
}

/// Decodes a list that is either `data` itself or `data.<key>`.
fn take_list<T: DeserializeOwned>(data: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let list = match data {
        Value::Array(_) => data,
        Value::Object(mut map) => map.remove(key).ok_or_else(|| ApiError::InvalidResponse {
            reason: format!("Response is missing 'data.{key}'"),
        })?,
        _ => {
            return Err(ApiError::InvalidResponse {
                reason: format!("'data' is neither a list nor an object with '{key}'"),
            })
        }
    };
    decode(list, key)
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
        reason: format!("Failed to decode {what}: {e}"),
    })
}
