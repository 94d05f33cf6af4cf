//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated OAuth client id.
///
/// # Example
///
/// ```rust
/// use parse_api::ClientId;
///
/// let id = ClientId::new("client_abc").unwrap();
/// assert_eq!(id.as_ref(), "client_abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use parse_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated base URL for the Parse API.
///
/// The URL must use the `http` or `https` scheme and have a host. A trailing
/// slash is removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use parse_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.parsedemo.axiomacloud.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.parsedemo.axiomacloud.com");
/// assert_eq!(url.join("api/v1/auth/me"), "https://api.parsedemo.axiomacloud.com/api/v1/auth/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match host {
            Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Joins a relative path onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
        assert!(matches!(ClientId::new("   "), Err(ConfigError::EmptyClientId)));
        assert!(ClientId::new("client_1").is_ok());
    }

    #[test]
    fn test_client_secret_rejects_empty() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(ConfigError::EmptyClientSecret)
        ));
    }

    #[test]
    fn test_client_secret_debug_is_masked() {
        let secret = ClientSecret::new("super-secret").unwrap();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "ClientSecret(*****)");
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("http://localhost:5100///").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:5100");
    }

    #[test]
    fn test_base_url_requires_scheme_and_host() {
        assert!(BaseUrl::new("api.example.com").is_err());
        assert!(BaseUrl::new("ftp://api.example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_base_url_join() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(
            url.join("/api/v1/documents"),
            "https://api.example.com/api/v1/documents"
        );
        assert_eq!(
            url.join("api/v1/documents"),
            "https://api.example.com/api/v1/documents"
        );
    }
}
