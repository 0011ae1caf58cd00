//! Prompt and prompt-version management.

use serde::Serialize;
use spyglass_core::{HttpClient, Result};

use crate::client::Client;
use crate::transport::HyperClient;
use crate::types::{Patch, Prompt, PromptVersion};

#[derive(Serialize)]
struct CreatePromptPayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Prompt CRUD plus version management.
#[derive(Debug, Clone)]
pub struct PromptsService<C = HyperClient> {
    client: Client<C>,
}

impl<C: HttpClient> PromptsService<C> {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    /// Create a prompt.
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Prompt> {
        self.client
            .post("/api/prompts/", &CreatePromptPayload { name, description })
            .await
    }

    /// List all prompts.
    pub async fn list(&self) -> Result<Vec<Prompt>> {
        self.client.get("/api/prompts/").await
    }

    /// Fetch one prompt by id.
    pub async fn get(&self, prompt_id: &str) -> Result<Prompt> {
        self.client.get(&format!("/api/prompts/{prompt_id}")).await
    }

    /// Partially update a prompt.
    pub async fn update(&self, prompt_id: &str, updates: &Patch) -> Result<Prompt> {
        self.client
            .patch(&format!("/api/prompts/{prompt_id}"), updates)
            .await
    }

    /// Delete a prompt.
    pub async fn delete(&self, prompt_id: &str) -> Result<()> {
        self.client
            .delete_no_content(&format!("/api/prompts/{prompt_id}"))
            .await
    }

    /// Create a new version of a prompt.
    pub async fn create_version(
        &self,
        prompt_id: &str,
        version: &PromptVersion,
    ) -> Result<PromptVersion> {
        self.client
            .post(&format!("/api/prompts/{prompt_id}/versions"), version)
            .await
    }

    /// List all versions of a prompt.
    pub async fn list_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>> {
        self.client
            .get(&format!("/api/prompts/{prompt_id}/versions"))
            .await
    }

    /// Fetch one version of a prompt.
    pub async fn get_version(&self, prompt_id: &str, version_id: &str) -> Result<PromptVersion> {
        self.client
            .get(&format!("/api/prompts/{prompt_id}/versions/{version_id}"))
            .await
    }

    /// Partially update a version of a prompt.
    pub async fn update_version(
        &self,
        prompt_id: &str,
        version_id: &str,
        updates: &Patch,
    ) -> Result<PromptVersion> {
        self.client
            .patch(
                &format!("/api/prompts/{prompt_id}/versions/{version_id}"),
                updates,
            )
            .await
    }

    /// Delete a version of a prompt.
    pub async fn delete_version(&self, prompt_id: &str, version_id: &str) -> Result<()> {
        self.client
            .delete_no_content(&format!("/api/prompts/{prompt_id}/versions/{version_id}"))
            .await
    }
}
