//! Core types for the Spyglass API client.
//!
//! This crate provides the transport-agnostic building blocks used by the
//! `spyglass` SDK crate:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`], [`ApiError`] and [`Result`] - Error handling
//! - [`HttpClient`] - Client trait for HTTP execution (the transport seam)
//! - [`QueryParams`] and [`to_query_string`] - Typed query-string encoding
//! - [`Form`] and [`Part`] - Multipart form-data bodies

mod body;
mod client;
mod error;
mod method;
mod multipart;
pub mod prelude;
pub mod query;
mod request;
mod response;

pub use body::{from_json, to_json};
pub use client::HttpClient;
pub use error::{ApiError, Error, Result};
pub use method::Method;
pub use multipart::{Form, Part};
pub use query::{QueryField, QueryParams, QueryValue, to_query_string};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
