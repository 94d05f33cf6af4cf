//! Query options for listing documents.
//!
//! [`DocumentFilter`] is the single place where listing options become query
//! parameters. The paging and sorting options (`status`, `limit`, `offset`,
//! `sort`, `order`) always have a value and are always sent. Every other
//! option is an [`Option`]: `None` means the key is left out of the query
//! string entirely, which is different from `Some(false)` or an empty string.
//!
//! # Example
//!
//! ```rust
//! use parse_api::{DocumentFilter, DocumentStatus};
//!
//! let filter = DocumentFilter::new()
//!     .status(DocumentStatus::Completado)
//!     .exportado(false)
//!     .limit(50);
//!
//! let query = filter.to_query();
//! assert!(query.contains(&("exportado".to_string(), "false".to_string())));
//! assert!(!query.iter().any(|(key, _)| key == "cuit"));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::DocumentPage;

/// Largest page size the service returns.
pub const MAX_LIMIT: u32 = 1000;

/// Page size used when none is set.
pub const DEFAULT_LIMIT: u32 = 10;

/// Processing status of a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Processing finished successfully.
    #[default]
    Completado,
    /// Processing failed.
    Error,
    /// Processing is still running.
    Procesando,
}

/// Field the listing is sorted by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Date extracted from the document.
    FechaExtraida,
    /// Amount extracted from the document.
    ImporteExtraido,
    /// When the document was processed.
    #[default]
    FechaProcesamiento,
    /// When the document was uploaded.
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

/// Options for [`ParseClient::list_documents`](crate::ParseClient::list_documents).
///
/// Defaults: `status=completado`, `limit=10`, `offset=0`,
/// `sort=fechaProcesamiento`, `order=desc`, no optional filters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    status: DocumentStatus,
    limit: u32,
    offset: u64,
    sort: SortField,
    order: SortOrder,

    #[serde(skip_serializing_if = "Option::is_none")]
    exportado: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    fecha_desde: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    fecha_hasta: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tipo_comprobante: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cuit: Option<String>,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            status: DocumentStatus::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: SortField::default(),
            order: SortOrder::default(),
            exportado: None,
            fecha_desde: None,
            fecha_hasta: None,
            tipo_comprobante: None,
            cuit: None,
        }
    }
}

impl DocumentFilter {
    /// Creates a filter with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the processing status.
    #[must_use]
    pub const fn status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    /// Filters by export state. `false` is sent as `exportado=false`.
    #[must_use]
    pub const fn exportado(mut self, exportado: bool) -> Self {
        self.exportado = Some(exportado);
        self
    }

    /// Only documents dated on or after `date`.
    #[must_use]
    pub const fn fecha_desde(mut self, date: NaiveDate) -> Self {
        self.fecha_desde = Some(date);
        self
    }

    /// Only documents dated on or before `date`.
    #[must_use]
    pub const fn fecha_hasta(mut self, date: NaiveDate) -> Self {
        self.fecha_hasta = Some(date);
        self
    }

    /// Filters by voucher type (e.g. `FACTURA_A`).
    #[must_use]
    pub fn tipo_comprobante(mut self, tipo: impl Into<String>) -> Self {
        self.tipo_comprobante = Some(tipo.into());
        self
    }

    /// Filters by the supplier's tax id.
    #[must_use]
    pub fn cuit(mut self, cuit: impl Into<String>) -> Self {
        self.cuit = Some(cuit.into());
        self
    }

    /// Sets the page size, clamped to `1..=1000`.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// Sets the number of documents to skip.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the sort field.
    #[must_use]
    pub const fn sort(mut self, sort: SortField) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the page size.
    #[must_use]
    pub const fn get_limit(&self) -> u32 {
        self.limit
    }

    /// Returns the offset.
    #[must_use]
    pub const fn get_offset(&self) -> u64 {
        self.offset
    }

    /// Returns the filter for the page after `page`, or `None` if `page` was
    /// the last one.
    #[must_use]
    pub fn next_page(&self, page: &DocumentPage) -> Option<Self> {
        if !page.has_more() {
            return None;
        }
        let mut next = self.clone();
        next.offset = page.pagination.offset + u64::from(page.pagination.limit);
        Some(next)
    }

    /// Serializes the filter into query parameters.
    ///
    /// Unset optional filters produce no key at all.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let Ok(Value::Object(map)) = serde_json::to_value(self) else {
            return Vec::new();
        };

        map.into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                Value::Bool(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Pagination;

    fn value_of<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_filter_sends_only_paging_and_sorting() {
        let query = DocumentFilter::new().to_query();

        let mut keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["limit", "offset", "order", "sort", "status"]);

        assert_eq!(value_of(&query, "status"), Some("completado"));
        assert_eq!(value_of(&query, "limit"), Some("10"));
        assert_eq!(value_of(&query, "offset"), Some("0"));
        assert_eq!(value_of(&query, "sort"), Some("fechaProcesamiento"));
        assert_eq!(value_of(&query, "order"), Some("desc"));
    }

    #[test]
    fn test_exportado_false_is_sent_when_set() {
        let query = DocumentFilter::new().exportado(false).to_query();
        assert_eq!(value_of(&query, "exportado"), Some("false"));
    }

    #[test]
    fn test_unset_exportado_is_absent() {
        let query = DocumentFilter::new().to_query();
        assert!(value_of(&query, "exportado").is_none());
    }

    #[test]
    fn test_all_optional_filters_use_wire_names() {
        let query = DocumentFilter::new()
            .status(DocumentStatus::Procesando)
            .exportado(true)
            .fecha_desde(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .fecha_hasta(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
            .tipo_comprobante("FACTURA_A")
            .cuit("20-12345678-9")
            .sort(SortField::ImporteExtraido)
            .order(SortOrder::Asc)
            .to_query();

        assert_eq!(value_of(&query, "status"), Some("procesando"));
        assert_eq!(value_of(&query, "exportado"), Some("true"));
        assert_eq!(value_of(&query, "fechaDesde"), Some("2025-01-01"));
        assert_eq!(value_of(&query, "fechaHasta"), Some("2025-01-31"));
        assert_eq!(value_of(&query, "tipoComprobante"), Some("FACTURA_A"));
        assert_eq!(value_of(&query, "cuit"), Some("20-12345678-9"));
        assert_eq!(value_of(&query, "sort"), Some("importeExtraido"));
        assert_eq!(value_of(&query, "order"), Some("asc"));
    }

    #[test]
    fn test_empty_string_filter_is_sent_as_empty() {
        let query = DocumentFilter::new().cuit("").to_query();
        assert_eq!(value_of(&query, "cuit"), Some(""));
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(DocumentFilter::new().limit(5000).get_limit(), MAX_LIMIT);
        assert_eq!(DocumentFilter::new().limit(0).get_limit(), 1);
        assert_eq!(DocumentFilter::new().limit(250).get_limit(), 250);
    }

    fn page(total: u64, limit: u32, offset: u64, returned: usize) -> DocumentPage {
        DocumentPage {
            documents: Vec::new(),
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: None,
                next_url: None,
                returned_count: returned,
            },
        }
    }

    #[test]
    fn test_next_page_advances_offset_by_limit() {
        let filter = DocumentFilter::new().limit(5);
        let next = filter.next_page(&page(12, 5, 0, 5)).unwrap();
        assert_eq!(next.get_offset(), 5);

        let last = next.next_page(&page(12, 5, 5, 5)).unwrap();
        assert_eq!(last.get_offset(), 10);

        assert!(last.next_page(&page(12, 5, 10, 2)).is_none());
    }

    #[test]
    fn test_next_page_respects_server_has_more() {
        let mut done = page(12, 5, 0, 5);
        done.pagination.has_more = Some(false);
        assert!(DocumentFilter::new().next_page(&done).is_none());
    }
}
