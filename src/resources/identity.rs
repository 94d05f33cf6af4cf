//! Identity of the authenticated API client (`GET /api/v1/auth/me`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The tenant an API client belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tenant {
    /// Display name of the tenant.
    pub nombre: String,
    /// URL slug of the tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Per-client request quotas.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientRateLimit {
    /// Requests allowed per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_minute: Option<u64>,
    /// Requests allowed per hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_hour: Option<u64>,
    /// Requests allowed per day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_day: Option<u64>,
}

/// The authenticated API client, its tenant and granted scopes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// The public client id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Display name of the client.
    pub nombre: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    /// Id of the tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// The tenant.
    pub tenant: Tenant,
    /// Scopes carried by the current access token.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// When the current access token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime<Utc>>,
    /// Whether the client has custom quotas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rate_limit: Option<bool>,
    /// The custom quotas, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<ClientRateLimit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_decodes_me_response() {
        let identity: Identity = serde_json::from_value(json!({
            "clientId": "client_abc",
            "nombre": "ERP Sync",
            "descripcion": null,
            "tenantId": "t-1",
            "tenant": {"nombre": "ACME", "slug": "acme"},
            "scopes": ["read:documents", "read:files"],
            "tokenExpiry": "2025-01-01T12:00:00.000Z",
            "customRateLimit": false,
            "rateLimit": null
        }))
        .unwrap();

        assert_eq!(identity.nombre, "ERP Sync");
        assert_eq!(identity.tenant.nombre, "ACME");
        assert_eq!(identity.scopes, vec!["read:documents", "read:files"]);
        assert!(identity.token_expiry.is_some());
        assert!(identity.rate_limit.is_none());
    }

    #[test]
    fn test_identity_with_minimal_fields() {
        let identity: Identity = serde_json::from_value(json!({
            "nombre": "ERP Sync",
            "tenant": {"nombre": "ACME"}
        }))
        .unwrap();
        assert!(identity.scopes.is_empty());
        assert!(identity.custom_rate_limit.is_none());
    }
}
