//! # Parse API Rust SDK
//!
//! A Rust SDK for the Parse public document-processing API, providing
//! type-safe configuration, client-credentials authentication and async
//! access to processed documents, their lines, taxes and original files.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ParseConfig`] and [`ParseConfigBuilder`]
//! - Validated newtypes for API credentials and the base URL
//! - OAuth 2.0 client credentials, refresh and revocation via [`auth::oauth`]
//! - [`ParseClient`]: one async method per remote operation, with the bearer
//!   header kept in sync with the current token
//! - [`DocumentFilter`]: listing options where unset filters are never sent
//! - Streaming file downloads into any `AsyncWrite` sink
//! - A structured error taxonomy in [`ApiError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use parse_api::{ParseConfig, BaseUrl, ClientId, ClientSecret};
//!
//! // Create configuration using the builder pattern
//! let config = ParseConfig::builder()
//!     .base_url(BaseUrl::new("https://api.parsedemo.axiomacloud.com").unwrap())
//!     .client_id(ClientId::new("client_abc").unwrap())
//!     .client_secret(ClientSecret::new("your-secret").unwrap())
//!     .scopes("read:documents read:files".parse().unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Authentication
//!
//! ```rust,ignore
//! use parse_api::{AuthState, ParseClient};
//!
//! let client = ParseClient::new(config)?;
//!
//! // Client credentials grant; installs the bearer header
//! let token = client.acquire_token(None).await?;
//! println!("Granted: {}", token.granted_scopes);
//!
//! // Later, when the token has expired
//! if client.state().await == AuthState::Expired {
//!     client.refresh_token().await?;
//! }
//! ```
//!
//! ## Listing and Exporting Documents
//!
//! ```rust,ignore
//! use parse_api::{DocumentFilter, MarkExported};
//!
//! let mut filter = DocumentFilter::new().exportado(false).limit(100);
//! loop {
//!     let page = client.list_documents(&filter).await?;
//!     for doc in &page.documents {
//!         client.download_file_to_path(&doc.id, format!("/tmp/{}.pdf", doc.id)).await?;
//!         client.mark_exported(&doc.id, &MarkExported::new(format!("ERP-{}", doc.id))).await?;
//!     }
//!     match filter.next_page(&page) {
//!         Some(next) => filter = next,
//!         None => break,
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events (requests at `debug`, token and download
//! events at `info`, refresh failures at `warn`). Tokens and secrets are never
//! logged. Install any subscriber to see them.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and tokens live in a client instance
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No automatic retries**: Every failure is returned to the caller

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{AccessTokenResponse, ApiScopes, AuthState, TokenState};
pub use client::ParseClient;
pub use config::{BaseUrl, ClientId, ClientSecret, ParseConfig, ParseConfigBuilder};
pub use error::{ApiError, ConfigError, StateError};

// Re-export HTTP client types
pub use clients::{
    DataType, ErrorBody, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, HttpSession, InvalidHttpRequestError, RateLimit, StreamingResponse,
};

// Re-export resource types
pub use resources::{
    Document, DocumentFilter, DocumentLine, DocumentPage, DocumentStatus, DocumentTax,
    ExportConfirmation, HealthStatus, Identity, MarkExported, Pagination, SortField, SortOrder,
};
