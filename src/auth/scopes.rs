//! OAuth scope handling for the Parse API.
//!
//! This module provides the [`ApiScopes`] type for managing the scopes
//! requested at token acquisition and the scopes granted by the server.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scope required to list and read documents, lines and taxes.
pub const READ_DOCUMENTS: &str = "read:documents";
/// Scope required to mark documents as exported.
pub const WRITE_DOCUMENTS: &str = "write:documents";
/// Scope required to download original files.
pub const READ_FILES: &str = "read:files";

/// An ordered set of OAuth scopes.
///
/// Scopes keep the order in which they were added and duplicates are
/// dropped. On the wire scopes are a single space-separated string, which is
/// also how this type serializes.
///
/// # Example
///
/// ```rust
/// use parse_api::ApiScopes;
///
/// let scopes: ApiScopes = "read:documents read:files".parse().unwrap();
/// assert_eq!(scopes.to_string(), "read:documents read:files");
///
/// let required: ApiScopes = "read:files".parse().unwrap();
/// assert!(scopes.covers(&required));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ApiScopes {
    scopes: Vec<String>,
}

impl ApiScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scopes requested when none are configured:
    /// `read:documents write:documents read:files`.
    #[must_use]
    pub fn default_scopes() -> Self {
        [READ_DOCUMENTS, WRITE_DOCUMENTS, READ_FILES]
            .into_iter()
            .collect()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if `scope` is in the set.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Returns `true` if this scope set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.iter().all(|s| self.contains(s))
    }

    /// Returns an iterator over the scopes in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn push(&mut self, scope: &str) {
        if !self.contains(scope) {
            self.scopes.push(scope.to_string());
        }
    }
}

impl<'a> FromIterator<&'a str> for ApiScopes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut scopes = Self::new();
        for scope in iter {
            let scope = scope.trim();
            if !scope.is_empty() {
                scopes.push(scope);
            }
        }
        scopes
    }
}

impl FromStr for ApiScopes {
    type Err = ConfigError;

    /// Parses a space- or comma-separated scope list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separators: &[char] = &[' ', ',', '\t', '\n'];
        if let Some(bad) = s
            .split(separators)
            .find(|scope| scope.chars().any(char::is_control))
        {
            return Err(ConfigError::InvalidScopes {
                reason: format!("scope {bad:?} contains control characters"),
            });
        }
        Ok(s.split(separators).collect())
    }
}

impl fmt::Display for ApiScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scopes.join(" "))
    }
}

impl Serialize for ApiScopes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ApiScopes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scopes() {
        let scopes = ApiScopes::default_scopes();
        assert_eq!(
            scopes.to_string(),
            "read:documents write:documents read:files"
        );
        assert_eq!(scopes.len(), 3);
    }

    #[test]
    fn test_parse_keeps_order_and_dedups() {
        let scopes: ApiScopes = "read:files read:documents read:files".parse().unwrap();
        let collected: Vec<&str> = scopes.iter().collect();
        assert_eq!(collected, vec!["read:files", "read:documents"]);
    }

    #[test]
    fn test_parse_accepts_commas_and_extra_whitespace() {
        let scopes: ApiScopes = " read:documents,  write:documents ".parse().unwrap();
        assert_eq!(scopes.to_string(), "read:documents write:documents");
    }

    #[test]
    fn test_empty_string_parses_to_empty_set() {
        let scopes: ApiScopes = "".parse().unwrap();
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_covers() {
        let granted: ApiScopes = "read:documents".parse().unwrap();
        let required = ApiScopes::default_scopes();
        assert!(!granted.covers(&required));
        assert!(required.covers(&granted));
    }

    #[test]
    fn test_serde_round_trip_as_string() {
        let scopes = ApiScopes::default_scopes();
        let json = serde_json::to_string(&scopes).unwrap();
        assert_eq!(json, r#""read:documents write:documents read:files""#);

        let parsed: ApiScopes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scopes);
    }
}
