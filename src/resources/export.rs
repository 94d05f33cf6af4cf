//! Marking documents as exported to an external system.
//!
//! `POST /api/v1/documents/{id}/mark-exported` changes server state. The
//! client never repeats it on its own: a retry after a timeout could mark a
//! document twice. Callers that need idempotency should use a stable
//! `externalSystemId`.
//!
//! # Example
//!
//! ```rust
//! use parse_api::MarkExported;
//!
//! let request = MarkExported::new("ERP-2025-0042")
//!     .export_config_id("cfg-1")
//!     .notes("batch 17");
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["externalSystemId"], "ERP-2025-0042");
//! assert!(body.get("exportedAt").is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a mark-exported call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkExported {
    external_system_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    export_config_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,

    #[serde(skip)]
    force: bool,
}

impl MarkExported {
    /// Creates a request with the id the document has in the external system.
    #[must_use]
    pub fn new(external_system_id: impl Into<String>) -> Self {
        Self {
            external_system_id: external_system_id.into(),
            export_config_id: None,
            exported_at: None,
            notes: None,
            force: false,
        }
    }

    /// Sets the export configuration id.
    #[must_use]
    pub fn export_config_id(mut self, id: impl Into<String>) -> Self {
        self.export_config_id = Some(id.into());
        self
    }

    /// Sets the export time. The server uses its own clock when unset.
    #[must_use]
    pub const fn exported_at(mut self, at: DateTime<Utc>) -> Self {
        self.exported_at = Some(at);
        self
    }

    /// Attaches free-form notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Overrides the server's `already_exported` check (`?force=true`).
    #[must_use]
    pub const fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns the external system id.
    #[must_use]
    pub fn external_system_id(&self) -> &str {
        &self.external_system_id
    }

    /// Returns `true` if the already-exported check is overridden.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.force
    }
}

/// Export fields of a document after it was marked.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    /// The document id.
    pub id: String,
    /// Always `true` after a successful call.
    #[serde(default)]
    pub exportado: bool,
    /// Id of the document in the external system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_system_id: Option<String>,
    /// When the document was marked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_exported_at: Option<DateTime<Utc>>,
    /// Export configuration recorded by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_config_id: Option<String>,
}

/// Response of a mark-exported call.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExportConfirmation {
    /// Whether the server accepted the call.
    pub success: bool,
    /// Human-readable message from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The updated export fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExportedDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_minimal_body_has_only_external_id() {
        let body = serde_json::to_value(MarkExported::new("EXT-1")).unwrap();
        assert_eq!(body, json!({"externalSystemId": "EXT-1"}));
    }

    #[test]
    fn test_full_body_and_force_flag_not_serialized() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let request = MarkExported::new("EXT-1")
            .export_config_id("cfg-9")
            .exported_at(at)
            .notes("manual")
            .force(true);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["exportConfigId"], "cfg-9");
        assert_eq!(body["exportedAt"], "2025-03-01T10:00:00Z");
        assert_eq!(body["notes"], "manual");
        assert!(body.get("force").is_none());
        assert!(request.is_forced());
    }

    #[test]
    fn test_confirmation_decodes() {
        let confirmation: ExportConfirmation = serde_json::from_value(json!({
            "success": true,
            "message": "Document marked as exported",
            "data": {
                "id": "doc-1",
                "exportado": true,
                "externalSystemId": "EXT-1",
                "lastExportedAt": "2025-03-01T10:00:00.000Z",
                "exportConfigId": "cfg-9"
            }
        }))
        .unwrap();

        let data = confirmation.data.unwrap();
        assert!(data.exportado);
        assert_eq!(data.external_system_id.as_deref(), Some("EXT-1"));
    }

    #[test]
    fn test_confirmation_requires_success() {
        let result = serde_json::from_value::<ExportConfirmation>(json!({"message": "ok"}));
        assert!(result.is_err());
    }
}
