//! Audio and embedding integrations.

use bytes::Bytes;
use spyglass_core::{Form, HttpClient, Result};

use crate::client::Client;
use crate::transport::HyperClient;
use crate::types::{EmbeddingsRequest, EmbeddingsResponse, SttRequest, SttResponse, TtsRequest};

/// Audio synthesis, transcription, and embeddings.
#[derive(Debug, Clone)]
pub struct IntegrationsService<C = HyperClient> {
    client: Client<C>,
}

impl<C: HttpClient> IntegrationsService<C> {
    /// Create a service over an existing client.
    #[must_use]
    pub fn new(client: Client<C>) -> Self {
        Self { client }
    }

    /// Synthesize speech. Returns the raw audio bytes in the requested
    /// format.
    pub async fn text_to_speech(&self, request: &TtsRequest) -> Result<Bytes> {
        self.client.post_bytes("/api/audio/speech", request).await
    }

    /// Transcribe an audio clip.
    ///
    /// The clip travels as a multipart file part named `file`; the request
    /// fields travel as text parts alongside it.
    pub async fn speech_to_text(
        &self,
        audio: impl Into<Bytes>,
        request: &SttRequest,
    ) -> Result<SttResponse> {
        let mut form = Form::new()
            .text("model", request.model.as_str())
            .file("file", "audio.wav", audio);

        if let Some(response_format) = &request.response_format {
            form = form.text("response_format", response_format.as_str());
        }
        if let Some(language) = &request.language {
            form = form.text("language", language.as_str());
        }
        if let Some(temperature) = request.temperature {
            form = form.text("temperature", format!("{temperature:.6}"));
        }
        if let Some(prompt) = &request.prompt {
            form = form.text("prompt", prompt.as_str());
        }

        self.client
            .post_multipart("/api/audio/transcriptions", form)
            .await
    }

    /// Create embeddings for one or more inputs.
    pub async fn create_embeddings(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse> {
        self.client.post("/api/embeddings", request).await
    }
}
