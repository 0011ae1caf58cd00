//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between the request pipeline and the actual
//! transport. The SDK ships a hyper-based implementation; tests or embedders
//! can plug in their own.

use std::future::Future;

use crate::{Request, Response, Result};

/// Core HTTP execution trait.
///
/// Implementations should be async-first, safe for concurrent use, and
/// support connection pooling. Cancellation is cooperative: dropping the
/// returned future must abort the request.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid response
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
