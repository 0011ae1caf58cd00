//! Temporary API key management.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spyglass_core::{HttpClient, Result};

use crate::client::Client;
use crate::transport::HyperClient;
use crate::types::{JsonMap, Patch, TemporaryKey};

/// Payload for creating a temporary key.
#[derive(Debug, Clone, Serialize)]
pub struct CreateKeyRequest {
    /// Optional key name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry time; required.
    pub expires_at: DateTime<Utc>,
    /// Optional usage limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    /// Models the key may call; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_models: Vec<String>,
    /// Endpoints the key may call; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_endpoints: Vec<String>,
    /// Free-form metadata.
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
}

impl CreateKeyRequest {
    /// A request with only the required expiry set.
    #[must_use]
    pub fn expiring_at(expires_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            expires_at,
            usage_limit: None,
            allowed_models: Vec::new(),
            allowed_endpoints: Vec::new(),
            metadata: JsonMap::new(),
        }
    }
}

/// Temporary key issuance and management.
#[derive(Debug, Clone)]
pub struct KeysService<C = HyperClient> {
    client: Client<C>,
}

impl<C: HttpClient> KeysService<C> {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    /// Issue a temporary key.
    pub async fn create(&self, request: &CreateKeyRequest) -> Result<TemporaryKey> {
        self.client.post("/api/temporary-keys", request).await
    }

    /// List all temporary keys.
    pub async fn list(&self) -> Result<Vec<TemporaryKey>> {
        self.client.get("/api/temporary-keys").await
    }

    /// Fetch one key by id.
    pub async fn get(&self, key_id: &str) -> Result<TemporaryKey> {
        self.client
            .get(&format!("/api/temporary-keys/{key_id}"))
            .await
    }

    /// Partially update a key.
    pub async fn update(&self, key_id: &str, updates: &Patch) -> Result<TemporaryKey> {
        self.client
            .patch(&format!("/api/temporary-keys/{key_id}"), updates)
            .await
    }

    /// Revoke a key.
    pub async fn delete(&self, key_id: &str) -> Result<()> {
        self.client
            .delete_no_content(&format!("/api/temporary-keys/{key_id}"))
            .await
    }
}
