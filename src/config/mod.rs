//! Configuration types for the Parse API SDK.
//!
//! This module provides the configuration used to construct a
//! [`ParseClient`](crate::ParseClient).
//!
//! # Overview
//!
//! - [`ParseConfig`]: The configuration struct holding all SDK settings
//! - [`ParseConfigBuilder`]: A builder for constructing [`ParseConfig`] instances
//! - [`ClientId`]: A validated client id newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`BaseUrl`]: A validated base URL
//!
//! # Example
//!
//! ```rust
//! use parse_api::{ParseConfig, BaseUrl, ClientId, ClientSecret};
//!
//! let config = ParseConfig::builder()
//!     .base_url(BaseUrl::new("https://api.parsedemo.axiomacloud.com").unwrap())
//!     .client_id(ClientId::new("my-client").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, ClientId, ClientSecret};

use std::time::Duration;

use crate::auth::ApiScopes;
use crate::error::ConfigError;

/// Configuration for the Parse API SDK.
///
/// Holds the static client credentials, the base URL of the service and
/// transport settings. Credentials never change for the lifetime of a
/// client.
///
/// # Thread Safety
///
/// `ParseConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ParseConfig {
    base_url: BaseUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    scopes: ApiScopes,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ParseConfig {
    /// Creates a new builder for constructing a `ParseConfig`.
    #[must_use]
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the scopes requested when `acquire_token` is called without any.
    #[must_use]
    pub const fn scopes(&self) -> &ApiScopes {
        &self.scopes
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the total request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the connect timeout, if configured.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}

// Verify ParseConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseConfig>();
};

/// Builder for constructing [`ParseConfig`] instances.
///
/// Required fields are `base_url`, `client_id` and `client_secret`.
///
/// # Defaults
///
/// - `scopes`: `read:documents write:documents read:files`
/// - `user_agent_prefix`: `None`
/// - `timeout`, `connect_timeout`: `None` (transport defaults)
#[derive(Debug, Default)]
pub struct ParseConfigBuilder {
    base_url: Option<BaseUrl>,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    scopes: Option<ApiScopes>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ParseConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the client id (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the default scopes requested at token acquisition.
    #[must_use]
    pub fn scopes(mut self, scopes: ApiScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the total timeout applied to each request.
    ///
    /// For downloads the timeout covers the whole body.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout for establishing a connection.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the [`ParseConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url`,
    /// `client_id` or `client_secret` are not set.
    pub fn build(self) -> Result<ParseConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;

        Ok(ParseConfig {
            base_url,
            client_id,
            client_secret,
            scopes: self.scopes.unwrap_or_else(ApiScopes::default_scopes),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ParseConfigBuilder {
        ParseConfig::builder()
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ParseConfigBuilder::new()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = ParseConfigBuilder::new()
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_requires_client_secret() {
        let result = ParseConfigBuilder::new()
            .base_url(BaseUrl::new("https://api.example.com").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "client_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.scopes(), &ApiScopes::default_scopes());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
        assert!(config.connect_timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let scopes: ApiScopes = "read:documents".parse().unwrap();
        let config = base_builder()
            .scopes(scopes.clone())
            .user_agent_prefix("ERP-Sync/2.1")
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.scopes(), &scopes);
        assert_eq!(config.user_agent_prefix(), Some("ERP-Sync/2.1"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = base_builder().build().unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("ParseConfig"));
        assert!(!debug.contains("\"secret\""));
    }
}
