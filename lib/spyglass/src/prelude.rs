//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spyglass::prelude::*;
//! ```

pub use crate::client::{Client, ClientBuilder};
pub use crate::sdk::Spyglass;
pub use crate::services::{
    CreateKeyRequest, IntegrationsService, KeysService, LogsService, ModelsService, PromptsService,
};
pub use crate::types::{
    EmbeddingsRequest, EmbeddingsResponse, LogFilter, LogsResponse, Message, Model, Patch, Prompt,
    PromptVersion, RequestLog, SttRequest, SttResponse, TemporaryKey, TtsRequest,
};
pub use spyglass_core::{ApiError, Error, Result};
