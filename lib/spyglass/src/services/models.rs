//! Model catalog.

use spyglass_core::{HttpClient, Result};

use crate::client::Client;
use crate::transport::HyperClient;
use crate::types::Model;

/// Read-only access to the model catalog.
#[derive(Debug, Clone)]
pub struct ModelsService<C = HyperClient> {
    client: Client<C>,
}

impl<C: HttpClient> ModelsService<C> {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    /// List all models available through the platform.
    pub async fn list(&self) -> Result<Vec<Model>> {
        self.client.get("/api/models").await
    }
}
