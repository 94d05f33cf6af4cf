//! Payload and option types of the Parse public API.
//!
//! # Overview
//!
//! - [`DocumentFilter`]: listing options and their query-string encoding
//! - [`Document`], [`DocumentLine`], [`DocumentTax`]: pass-through payloads
//! - [`DocumentPage`] and [`Pagination`]: one page of a listing
//! - [`Identity`]: the authenticated API client
//! - [`MarkExported`] and [`ExportConfirmation`]: the mark-exported call
//! - [`HealthStatus`]: health check responses

mod document;
mod export;
mod filter;
mod health;
mod identity;

pub use document::{Document, DocumentLine, DocumentPage, DocumentTax, DocumentUrls, Pagination};
pub use export::{ExportConfirmation, ExportedDocument, MarkExported};
pub use filter::{
    DocumentFilter, DocumentStatus, SortField, SortOrder, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use health::HealthStatus;
pub use identity::{ClientRateLimit, Identity, Tenant};
