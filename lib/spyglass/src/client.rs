//! The request pipeline.
//!
//! [`Client`] owns the base URL, the bearer credential, and the transport.
//! Every resource service funnels its operations through the verb helpers
//! here, which all share one execute path: uniform auth injection, JSON or
//! multipart encoding, structured error decoding, and request logging.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use spyglass_core::{
    ApiError, Error, Form, HttpClient, Method, QueryParams, Request, Response, Result, to_json,
    to_query_string,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{self, ClientConfig};
use crate::transport::HyperClient;

/// Request payload for the shared execute path.
enum Payload {
    /// JSON wire format; also used for body-less requests, which still carry
    /// the JSON content-type and accept headers.
    Json(Option<Bytes>),
    /// A pre-encoded multipart body with its boundary content type.
    Multipart { content_type: String, data: Bytes },
}

/// The shared request-execution core.
///
/// Cheap to clone (the transport is behind an `Arc`) and safe to share
/// across tasks: nothing is mutated after construction. Cancellation is
/// dropping the future of an in-flight call.
///
/// # Example
///
/// ```ignore
/// use spyglass::Client;
///
/// let client = Client::builder()
///     .api_key("sk-spy-...")
///     .build();
/// ```
#[derive(Debug)]
pub struct Client<C = HyperClient> {
    transport: Arc<C>,
    base_url: String,
    api_key: String,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl Client<HyperClient> {
    /// Create a client from the environment alone: `SPYGLASS_API_KEY` for
    /// the credential and `SPYGLASS_BASE_URL` (or the production default)
    /// for the endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a client with an explicit API key; everything else resolves
    /// as in [`Client::new`].
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl Default for Client<HyperClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> Client<C> {
    /// The configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.transport
    }

    fn request_url(&self, path: &str) -> Result<Url> {
        // The base URL was normalized at construction (trailing slash
        // trimmed); paths always start with '/'.
        Url::parse(&format!("{}{path}", self.base_url)).map_err(Error::from)
    }

    /// Execute one request: build the URL, inject auth and content headers,
    /// send, and decode any non-2xx response into a structured error.
    async fn execute(&self, method: Method, path: &str, payload: Payload) -> Result<Response> {
        let url = self.request_url(path)?;

        let mut builder = Request::builder(method, url.clone())
            .header("Authorization", format!("Bearer {}", self.api_key));

        match payload {
            Payload::Json(body) => {
                builder = builder
                    .header("Content-Type", "application/json")
                    .header("Accept", "application/json");
                if let Some(body) = body {
                    builder = builder.body(body);
                }
            }
            Payload::Multipart { content_type, data } => {
                builder = builder.header("Content-Type", content_type).body(data);
            }
        }

        debug!(%method, %url, "sending request");
        let started = Instant::now();

        let outcome = self.transport.execute(builder.build()).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, error = %err, elapsed_ms, "request failed");
                return Err(err);
            }
        };

        if response.status() >= 400 {
            let api_error = ApiError::from_body(response.status(), response.body());
            warn!(%method, %url, status = response.status(), elapsed_ms, "request failed with API error");
            return Err(Error::Api(api_error));
        }

        info!(%method, %url, status = response.status(), elapsed_ms, "request completed");
        Ok(response)
    }

    async fn execute_json(&self, method: Method, path: &str, body: Option<Bytes>) -> Result<Response> {
        self.execute(method, path, Payload::Json(body)).await
    }

    /// GET a resource and decode the JSON reply.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute_json(Method::Get, path, None).await?.json()
    }

    /// GET a resource with query parameters appended to the path when the
    /// encoded query string is non-empty.
    pub async fn get_with_query<Q, T>(&self, path: &str, query: Option<&Q>) -> Result<T>
    where
        Q: QueryParams + Sync,
        T: DeserializeOwned,
    {
        let query_string = to_query_string(query);
        if query_string.is_empty() {
            self.get(path).await
        } else {
            self.get(&format!("{path}?{query_string}")).await
        }
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.execute_json(Method::Post, path, Some(body))
            .await?
            .json()
    }

    /// POST a JSON body, discarding the reply body.
    pub async fn post_no_content<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let body = to_json(body)?;
        self.execute_json(Method::Post, path, Some(body)).await?;
        Ok(())
    }

    /// POST a JSON body and return the raw reply bytes (e.g. audio).
    pub async fn post_bytes<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Bytes> {
        let body = to_json(body)?;
        let response = self.execute_json(Method::Post, path, Some(body)).await?;
        Ok(response.into_body())
    }

    /// PUT a JSON body and decode the JSON reply.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.execute_json(Method::Put, path, Some(body))
            .await?
            .json()
    }

    /// PATCH a JSON body and decode the JSON reply.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.execute_json(Method::Patch, path, Some(body))
            .await?
            .json()
    }

    /// PATCH a JSON body, discarding the reply body.
    pub async fn patch_no_content<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
        let body = to_json(body)?;
        self.execute_json(Method::Patch, path, Some(body)).await?;
        Ok(())
    }

    /// DELETE a resource and decode the JSON reply.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute_json(Method::Delete, path, None).await?.json()
    }

    /// DELETE a resource, discarding the reply body.
    pub async fn delete_no_content(&self, path: &str) -> Result<()> {
        self.execute_json(Method::Delete, path, None).await?;
        Ok(())
    }

    /// POST a multipart form and decode the JSON reply.
    ///
    /// The body is fully built in memory before sending. Only the
    /// authorization and boundary content-type headers are set.
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let (content_type, data) = form.into_body();
        self.execute(Method::Post, path, Payload::Multipart { content_type, data })
            .await?
            .json()
    }
}

/// Builder for [`Client`].
///
/// Values set here win over the environment, which wins over the compiled
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Set the API key explicitly instead of reading `SPYGLASS_API_KEY`.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the base URL instead of reading `SPYGLASS_BASE_URL` or the
    /// production default.
    ///
    /// Trailing slashes are trimmed; every request path starts with `/`,
    /// and the full URL is their concatenation.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout of the default transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a client over the default hyper transport.
    #[must_use]
    pub fn build(self) -> Client<HyperClient> {
        let mut config = ClientConfig::builder();
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        let transport = HyperClient::with_config(config.build());
        self.build_with(transport)
    }

    /// Build a client over a custom transport.
    ///
    /// The transport owns its own timeout behavior; a timeout set on this
    /// builder only applies to the default transport.
    #[must_use]
    pub fn build_with<C: HttpClient>(self, transport: C) -> Client<C> {
        Client {
            transport: Arc::new(transport),
            base_url: config::resolve_base_url(self.base_url),
            api_key: config::resolve_api_key(self.api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_explicit_values_win() {
        let client = Client::builder()
            .api_key("sk-test")
            .base_url("https://staging.spyglass.ai")
            .build();

        assert_eq!(client.api_key(), "sk-test");
        assert_eq!(client.base_url(), "https://staging.spyglass.ai");
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let client = Client::builder()
            .api_key("sk-test")
            .base_url("https://staging.spyglass.ai/")
            .build();

        assert_eq!(client.base_url(), "https://staging.spyglass.ai");
    }

    #[test]
    fn request_url_concatenates_base_and_path() {
        let client = Client::builder()
            .api_key("sk-test")
            .base_url("https://staging.spyglass.ai")
            .build();

        let url = client.request_url("/api/models").expect("valid url");
        assert_eq!(url.as_str(), "https://staging.spyglass.ai/api/models");
    }

    #[test]
    fn client_is_clone() {
        let client = Client::builder().api_key("sk-test").build();
        let cloned = client.clone();
        assert_eq!(cloned.api_key(), "sk-test");
    }

    #[test]
    fn transport_accessor() {
        let client = Client::builder()
            .api_key("sk-test")
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(
            client.transport().config().timeout,
            Duration::from_secs(5)
        );
    }
}
