//! Client SDK for the Spyglass LLM-observability API.
//!
//! One [`Client`] owns the base URL, bearer credential, and transport;
//! thin resource services map domain operations onto single pipeline calls.
//!
//! # Example
//!
//! ```ignore
//! use spyglass::{Spyglass, types::RequestLog};
//!
//! #[tokio::main]
//! async fn main() -> spyglass::Result<()> {
//!     // Credential from SPYGLASS_API_KEY, or set it explicitly:
//!     let sdk = Spyglass::with_api_key("sk-spy-...");
//!
//!     let log = RequestLog {
//!         model: "gpt-4".to_string(),
//!         ..RequestLog::default()
//!     };
//!     sdk.logs().create(&log).await?;
//!
//!     let models = sdk.models().list().await?;
//!     println!("{} models available", models.len());
//!     Ok(())
//! }
//! ```

mod client;
pub mod config;
mod connector;
pub mod prelude;
mod sdk;
pub mod services;
mod transport;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use sdk::Spyglass;
pub use transport::HyperClient;

// Re-export core types
pub use spyglass_core::{
    ApiError, Error, Form, HttpClient, Method, Part, QueryField, QueryParams, Request,
    RequestBuilder, Response, Result, StatusCode, from_json, header, to_json, to_query_string,
};
