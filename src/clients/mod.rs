//! HTTP transport types for Parse API communication.
//!
//! This module provides the transport layer every API call goes through. It
//! handles request/response processing, persistent default headers and
//! rate-limit header parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpSession`]: The async transport session with shared default headers
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A decoded JSON response
//! - [`StreamingResponse`]: A response whose body is consumed incrementally
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`DataType`]: Content types for request bodies
//! - [`RateLimit`]: The `X-RateLimit-*` headers of a response
//!
//! # Example
//!
//! ```rust,ignore
//! use parse_api::clients::{HttpSession, HttpRequest, HttpMethod};
//!
//! let session = HttpSession::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "api/v1/health")
//!     .build()
//!     .unwrap();
//!
//! let response = session.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The session never retries. A non-2xx answer becomes
//! [`HttpError::Response`] carrying the status, the decoded body, and the
//! `Retry-After` / rate-limit headers so the caller can decide what to do.

mod download;
mod errors;
mod http_request;
mod http_response;
mod http_session;

pub(crate) use download::write_chunks;
pub use errors::{ErrorBody, HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit, StreamingResponse};
pub use http_session::{HttpSession, SDK_VERSION};
