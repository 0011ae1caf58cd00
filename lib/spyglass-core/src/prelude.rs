//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spyglass_core::prelude::*;
//! ```

pub use crate::{
    ApiError, Error, Form, HttpClient, Method, Part, QueryField, QueryParams, Request,
    RequestBuilder, Response, Result, from_json, to_json, to_query_string,
};
