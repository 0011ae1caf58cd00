//! JSON body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use serde::Serialize;
/// use spyglass_core::to_json;
///
/// #[derive(Serialize)]
/// struct Payload { model: String }
///
/// let payload = Payload { model: "gpt-4".to_string() };
/// let bytes = to_json(&payload).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"model":"gpt-4"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so decode failures name the exact field that
/// did not match (e.g. `logs[3].timestamp`).
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use spyglass_core::from_json;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Payload { model: String }
///
/// let bytes = br#"{"model":"gpt-4"}"#;
/// let payload: Payload = from_json(bytes).expect("deserialize");
/// assert_eq!(payload, Payload { model: "gpt-4".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
