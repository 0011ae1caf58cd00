//! All-in-one SDK facade.

use spyglass_core::HttpClient;

use crate::client::{Client, ClientBuilder};
use crate::services::{
    IntegrationsService, KeysService, LogsService, ModelsService, PromptsService,
};
use crate::transport::HyperClient;

/// Convenience entry point bundling one [`Client`] with all resource
/// services.
///
/// # Example
///
/// ```ignore
/// use spyglass::Spyglass;
///
/// let sdk = Spyglass::new(); // credential from SPYGLASS_API_KEY
/// let models = sdk.models().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Spyglass<C = HyperClient> {
    client: Client<C>,
}

impl Spyglass<HyperClient> {
    /// Create an SDK from the environment alone.
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(Client::new())
    }

    /// Create an SDK with an explicit API key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::from_client(Client::with_api_key(api_key))
    }

    /// Create a client builder; pass the built client to
    /// [`Spyglass::from_client`].
    #[must_use]
    pub fn builder() -> ClientBuilder {
        Client::builder()
    }
}

impl Default for Spyglass<HyperClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> Spyglass<C> {
    /// Wrap an existing client.
    #[must_use]
    pub fn from_client(client: Client<C>) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &Client<C> {
        &self.client
    }

    /// Log ingestion and retrieval.
    #[must_use]
    pub fn logs(&self) -> LogsService<C> {
        LogsService::new(self.client.clone())
    }

    /// Prompt and prompt-version management.
    #[must_use]
    pub fn prompts(&self) -> PromptsService<C> {
        PromptsService::new(self.client.clone())
    }

    /// Model catalog.
    #[must_use]
    pub fn models(&self) -> ModelsService<C> {
        ModelsService::new(self.client.clone())
    }

    /// Temporary key management.
    #[must_use]
    pub fn keys(&self) -> KeysService<C> {
        KeysService::new(self.client.clone())
    }

    /// Audio and embedding integrations.
    #[must_use]
    pub fn integrations(&self) -> IntegrationsService<C> {
        IntegrationsService::new(self.client.clone())
    }
}
