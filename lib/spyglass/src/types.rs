//! Domain payloads for the Spyglass API.
//!
//! Optional fields are `Option<T>` and absent from the wire when unset;
//! collections are skipped when empty, matching what the API emits.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spyglass_core::{QueryField, QueryParams};

/// Arbitrary JSON object payload (metadata, request params, ...).
pub type JsonMap = serde_json::Map<String, Value>;

/// A chat message in a logged request or completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role (`system`, `user`, `assistant`, ...).
    pub role: String,
    /// Message content; either plain text or structured content blocks.
    #[serde(default)]
    pub content: Value,
    /// Optional participant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A tool invocation recorded on a completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call identifier.
    pub id: String,
    /// Tool call kind (currently always `function`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The invoked function.
    pub function: FunctionCall,
}

/// A function invocation inside a [`ToolCall`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name.
    pub name: String,
    /// JSON-encoded arguments, verbatim.
    pub arguments: String,
}

/// Token accounting for a logged request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens.
    #[serde(default)]
    pub total_tokens: u32,
}

/// Customer attribution for a logged request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerParams {
    /// Stable customer identifier.
    pub customer_identifier: String,
    /// Free-form customer metadata.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
}

/// One logged model request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestLog {
    /// Model identifier the request was made against.
    pub model: String,
    /// Prompt messages sent to the model.
    #[serde(default)]
    pub prompt_messages: Vec<Message>,
    /// The completion returned by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_message: Option<Message>,
    /// Customer attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_params: Option<CustomerParams>,
    /// Prompt token count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    /// Completion token count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    /// Cost of the request in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Request latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<u64>,
    /// Whether the upstream request failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<bool>,
    /// Upstream HTTP status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Upstream error text, if the request failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the request happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Token accounting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Tool calls made by the completion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
    /// Extra headers sent with the upstream request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra_headers: HashMap<String, String>,
    /// Upstream request parameters (temperature, max tokens, ...).
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub request_params: JsonMap,
    /// Upstream provider name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Whether the request streamed its response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Caller-defined category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Caller-defined tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter for listing logged requests. Every field is optional; unset and
/// empty fields stay out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    /// Match a model identifier.
    pub model: Option<String>,
    /// Match failed (or successful) requests only.
    pub failed: Option<bool>,
    /// Match a caller-defined category.
    pub category: Option<String>,
    /// Match a customer identifier.
    pub customer_identifier: Option<String>,
    /// Lower bound on the request timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Upper bound on the request timestamp.
    pub end_time: Option<DateTime<Utc>>,
    /// Match any of these tags.
    pub tags: Vec<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset; pagination is caller-driven.
    pub offset: Option<u32>,
}

impl QueryParams for LogFilter {
    fn query_fields(&self) -> Vec<QueryField> {
        vec![
            QueryField::optional("model", self.model.clone()),
            QueryField::optional("failed", self.failed),
            QueryField::optional("category", self.category.clone()),
            QueryField::optional("customer_identifier", self.customer_identifier.clone()),
            QueryField::optional("start_time", self.start_time),
            QueryField::optional("end_time", self.end_time),
            QueryField::omit_empty("tags", self.tags.clone()),
            QueryField::optional("limit", self.limit),
            QueryField::optional("offset", self.offset),
        ]
    }
}

/// One page of logged requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    /// The logs on this page.
    #[serde(default)]
    pub logs: Vec<RequestLog>,
    /// Total matching logs across all pages.
    #[serde(default)]
    pub total_count: u32,
    /// Offset of the next page, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u32>,
}

/// A conversation thread grouping logged requests per customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Thread identifier.
    pub id: String,
    /// Owning customer identifier.
    pub customer_identifier: String,
    /// Messages in the thread.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A managed prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    /// Prompt identifier.
    pub id: String,
    /// Prompt name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// One version of a managed prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
    /// Version identifier.
    pub id: String,
    /// Owning prompt identifier.
    pub prompt_id: String,
    /// Version number.
    pub version: u32,
    /// Version name.
    pub name: String,
    /// The prompt template text.
    pub template: String,
    /// Model the version targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Model parameters (temperature, max tokens, ...).
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub parameters: JsonMap,
    /// Whether this is the active version.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A model available through the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Upstream provider.
    pub provider: String,
    /// Input cost per token, USD.
    pub input_cost: f64,
    /// Output cost per token, USD.
    pub output_cost: f64,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Context window size in tokens.
    pub context_window: u32,
    /// Supported invocation modes.
    #[serde(default)]
    pub supported_modes: Vec<String>,
    /// Whether the model is currently available.
    pub is_available: bool,
}

/// A temporary API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporaryKey {
    /// Key identifier.
    pub id: String,
    /// The key material.
    pub key: String,
    /// Optional key name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the key is active.
    pub is_active: bool,
    /// Optional usage limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    /// Number of uses so far.
    #[serde(default)]
    pub usage_count: u32,
    /// Models the key may call; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_models: Vec<String>,
    /// Endpoints the key may call; empty means all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_endpoints: Vec<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
}

/// Text-to-speech request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TtsRequest {
    /// Speech model identifier.
    pub model: String,
    /// Text to synthesize.
    pub input: String,
    /// Voice identifier.
    pub voice: String,
    /// Audio format of the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    /// Speech speed multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Speech-to-text request; the audio clip travels as a multipart file part
/// next to these fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SttRequest {
    /// Transcription model identifier.
    pub model: String,
    /// Transcript format of the reply.
    pub response_format: Option<String>,
    /// Language hint.
    pub language: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Optional priming prompt.
    pub prompt: Option<String>,
}

/// Speech-to-text reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SttResponse {
    /// The transcript.
    pub text: String,
    /// Detected language.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    /// Audio duration in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub metadata: JsonMap,
}

/// Embeddings request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    /// Embedding model identifier.
    pub model: String,
    /// Input text: a string or an array of strings.
    #[serde(default)]
    pub input: Value,
    /// Encoding of the returned vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    /// Requested vector dimensionality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

/// One embedding vector in an [`EmbeddingsResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Object kind, always `embedding`.
    pub object: String,
    /// The vector.
    pub embedding: Vec<f64>,
    /// Index of the corresponding input.
    pub index: u32,
}

/// Embeddings reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    /// Object kind, always `list`.
    pub object: String,
    /// One entry per input, in input order.
    #[serde(default)]
    pub data: Vec<EmbeddingData>,
    /// Model that produced the vectors.
    pub model: String,
    /// Token accounting.
    #[serde(default)]
    pub usage: Usage,
}

/// A partial-update payload: only explicitly set fields are serialized.
///
/// Unset fields never appear on the wire, which is distinct from an
/// explicit null (set with [`Value::Null`]).
///
/// # Example
///
/// ```
/// use spyglass::types::Patch;
///
/// let patch = Patch::new()
///     .set("name", "nightly-eval")
///     .set("is_active", true);
///
/// assert_eq!(
///     serde_json::to_string(&patch).unwrap(),
///     r#"{"is_active":true,"name":"nightly-eval"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch {
    fields: JsonMap,
}

impl Patch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Setting the same field twice keeps the last value.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use chrono::TimeZone;
    use serde_json::json;
    use spyglass_core::to_query_string;

    use super::*;

    #[test]
    fn request_log_minimal_serialization() {
        let log = RequestLog {
            model: "gpt-4".to_string(),
            prompt_messages: vec![Message {
                role: "user".to_string(),
                content: json!("hello"),
                name: None,
            }],
            ..RequestLog::default()
        };

        let encoded = serde_json::to_value(&log).expect("serialize");
        check!(
            encoded
                == json!({
                    "model": "gpt-4",
                    "prompt_messages": [{"role": "user", "content": "hello"}],
                })
        );
    }

    #[test]
    fn request_log_round_trip() {
        let log = RequestLog {
            model: "claude-3".to_string(),
            prompt_messages: vec![Message {
                role: "user".to_string(),
                content: json!("ping"),
                name: Some("alice".to_string()),
            }],
            completion_message: Some(Message {
                role: "assistant".to_string(),
                content: json!("pong"),
                name: None,
            }),
            prompt_tokens: Some(12),
            completion_tokens: Some(3),
            cost: Some(0.0021),
            latency: Some(180),
            failed: Some(false),
            timestamp: Some(
                Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
                    .single()
                    .expect("valid date"),
            ),
            usage: Some(Usage {
                prompt_tokens: 12,
                completion_tokens: 3,
                total_tokens: 15,
            }),
            tags: vec!["eval".to_string()],
            ..RequestLog::default()
        };

        let encoded = serde_json::to_vec(&log).expect("serialize");
        let decoded: RequestLog = serde_json::from_slice(&encoded).expect("deserialize");
        check!(decoded == log);
    }

    #[test]
    fn log_filter_query_fields() {
        let filter = LogFilter {
            model: Some("gpt-4".to_string()),
            failed: Some(true),
            tags: vec!["a".to_string(), "b".to_string()],
            limit: Some(10),
            ..LogFilter::default()
        };

        check!(
            to_query_string(Some(&filter)) == "failed=true&limit=10&model=gpt-4&tags=a&tags=b"
        );
    }

    #[test]
    fn log_filter_empty_is_empty_query() {
        check!(to_query_string(Some(&LogFilter::default())) == "");
    }

    #[test]
    fn log_filter_timestamps_render_rfc3339() {
        let filter = LogFilter {
            start_time: Some(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                    .single()
                    .expect("valid date"),
            ),
            ..LogFilter::default()
        };

        check!(to_query_string(Some(&filter)) == "start_time=2024-01-01T00%3A00%3A00Z");
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = Patch::new().set("name", "renamed").set("usage_limit", 100);

        check!(
            serde_json::to_value(&patch).expect("serialize")
                == json!({"name": "renamed", "usage_limit": 100})
        );
    }

    #[test]
    fn patch_explicit_null_is_preserved() {
        let patch = Patch::new().set("description", Value::Null);

        check!(serde_json::to_string(&patch).expect("serialize") == r#"{"description":null}"#);
    }

    #[test]
    fn patch_empty() {
        let patch = Patch::new();
        check!(patch.is_empty());
        check!(patch.len() == 0);
        check!(serde_json::to_string(&patch).expect("serialize") == "{}");
    }

    #[test]
    fn tool_call_kind_renames_to_type() {
        let call = ToolCall {
            id: "call_1".to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: "lookup".to_string(),
                arguments: r#"{"q":"rust"}"#.to_string(),
            },
        };

        let encoded = serde_json::to_value(&call).expect("serialize");
        check!(encoded.get("type") == Some(&json!("function")));
    }
}
