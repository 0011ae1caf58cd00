//! Resource services.
//!
//! Each service holds one [`crate::Client`] and maps its domain operations
//! onto single pipeline calls. Services own path construction and payload
//! typing; the pipeline owns transport, auth, encoding, and error
//! normalization.

mod integrations;
mod keys;
mod logs;
mod models;
mod prompts;

pub use integrations::IntegrationsService;
pub use keys::{CreateKeyRequest, KeysService};
pub use logs::{LogsService, MAX_LOG_BATCH_SIZE};
pub use models::ModelsService;
pub use prompts::PromptsService;
