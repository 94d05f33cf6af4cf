//! Document payloads returned by the documents endpoints.
//!
//! Documents, lines and taxes are passed through as they come from the
//! server. Only the fields the client itself reads are typed (`id`, the
//! pagination envelope); everything else is kept in a JSON map so new server
//! fields survive a round trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Links to a document's sub-resources, as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUrls {
    /// The document itself.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The original file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// The line items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineas: Option<String>,
    /// The taxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impuestos: Option<String>,
}

/// A processed document.
///
/// # Example
///
/// ```rust
/// use parse_api::Document;
///
/// let doc: Document = serde_json::from_value(serde_json::json!({
///     "id": "doc-1",
///     "nombreArchivo": "factura.pdf",
///     "exportado": false
/// }))
/// .unwrap();
///
/// assert_eq!(doc.id, "doc-1");
/// assert_eq!(doc.str_field("nombreArchivo"), Some("factura.pdf"));
/// assert_eq!(doc.exportado(), Some(false));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The document id.
    pub id: String,

    /// Links to sub-resources, when the server includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<DocumentUrls>,

    /// All other fields, as sent by the server.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Returns a raw field by its wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a string field by its wire name.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Returns whether the document has been marked as exported.
    #[must_use]
    pub fn exportado(&self) -> Option<bool> {
        self.field("exportado").and_then(Value::as_bool)
    }
}

/// A line item of a document.
///
/// Lines are returned ordered by `numeroLinea`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocumentLine {
    /// All fields, as sent by the server.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DocumentLine {
    /// Returns the 1-based line number.
    #[must_use]
    pub fn numero_linea(&self) -> Option<u64> {
        self.fields.get("numeroLinea").and_then(Value::as_u64)
    }

    /// Returns the line description.
    #[must_use]
    pub fn descripcion(&self) -> Option<&str> {
        self.fields.get("descripcion").and_then(Value::as_str)
    }

    /// Returns a raw field by its wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A tax entry of a document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocumentTax {
    /// All fields, as sent by the server.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DocumentTax {
    /// Returns the tax type (e.g. `IVA`).
    #[must_use]
    pub fn tipo_impuesto(&self) -> Option<&str> {
        self.fields.get("tipoImpuesto").and_then(Value::as_str)
    }

    /// Returns a raw field by its wire name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Position of a page within the full listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of documents matching the filter.
    pub total: u64,
    /// Page size applied by the server.
    pub limit: u32,
    /// Number of documents skipped.
    pub offset: u64,
    /// Whether more documents follow this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    /// URL of the next page, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    /// Number of documents in this page.
    #[serde(skip)]
    pub returned_count: usize,
}

/// One page of a document listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentPage {
    /// The documents, in server order.
    pub documents: Vec<Document>,
    /// The pagination envelope.
    pub pagination: Pagination,
}

impl DocumentPage {
    /// Returns `true` if more documents follow this page.
    ///
    /// Uses the server's `hasMore` flag, falling back to
    /// `offset + returned_count < total` when it is absent.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pagination.has_more.unwrap_or_else(|| {
            let returned = u64::try_from(self.pagination.returned_count).unwrap_or(u64::MAX);
            self.pagination.offset.saturating_add(returned) < self.pagination.total
        })
    }
}
