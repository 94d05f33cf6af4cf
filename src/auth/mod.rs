//! Authentication types for the Parse API SDK.
//!
//! This module provides types for handling OAuth scopes, the credential
//! state of a client, and the raw token endpoints.
//!
//! # Overview
//!
//! - [`ApiScopes`]: An ordered set of OAuth scopes
//! - [`TokenState`]: The access/refresh token pair held by a client
//! - [`AuthState`]: The lifecycle state derived from a [`TokenState`]
//! - [`AccessTokenResponse`]: The payload of the token and refresh endpoints
//! - [`oauth`]: Client credentials, refresh and revocation calls
//!
//! # Lifecycle
//!
//! A client starts `Unauthenticated`. A successful client-credentials
//! exchange makes it `Authenticated`; once the access token outlives its
//! `expires_in` and a refresh token is held it reports `Expired`. A failed
//! refresh or a revocation brings it back to `Unauthenticated`.
//!
//! # Example
//!
//! ```rust
//! use parse_api::{ApiScopes, AuthState, TokenState};
//!
//! let scopes: ApiScopes = "read:documents read:files".parse().unwrap();
//! assert!(scopes.contains("read:files"));
//!
//! let state = TokenState::default();
//! assert_eq!(state.auth_state(), AuthState::Unauthenticated);
//! ```

pub mod oauth;
mod scopes;
mod token;

pub use scopes::{ApiScopes, READ_DOCUMENTS, READ_FILES, WRITE_DOCUMENTS};
pub use token::{AccessTokenResponse, AuthState, TokenState};
