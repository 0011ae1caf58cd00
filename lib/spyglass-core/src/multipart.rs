//! Multipart form data support for file uploads.
//!
//! Builds `multipart/form-data` request bodies, used by the audio
//! transcription endpoint. The whole body is assembled in memory before
//! sending, which is fine for the expected payloads (audio clips).
//!
//! # Example
//!
//! ```
//! use spyglass_core::Form;
//!
//! let form = Form::new()
//!     .text("model", "whisper-1")
//!     .file("file", "audio.wav", vec![0x52, 0x49, 0x46, 0x46]);
//!
//! let (content_type, body) = form.into_body();
//! assert!(content_type.starts_with("multipart/form-data; boundary="));
//! assert!(!body.is_empty());
//! ```

use bytes::{BufMut, Bytes, BytesMut};

/// A single part in a multipart form: a name plus exactly one of an inline
/// text value or a file payload.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    body: PartBody,
}

#[derive(Debug, Clone)]
enum PartBody {
    Text(String),
    File { filename: String, data: Bytes },
}

impl Part {
    /// Create a text part.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: PartBody::Text(value.into()),
        }
    }

    /// Create a file part. The bytes are written verbatim, with no
    /// transformation or content sniffing.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            body: PartBody::File {
                filename: filename.into(),
                data: data.into(),
            },
        }
    }

    /// Get the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the filename, if this is a file part.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match &self.body {
            PartBody::Text(_) => None,
            PartBody::File { filename, .. } => Some(filename),
        }
    }

    /// Returns `true` if this is a file part.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.body, PartBody::File { .. })
    }
}

/// A multipart form containing multiple parts, encoded in the order they
/// were added.
#[derive(Debug, Clone)]
pub struct Form {
    parts: Vec<Part>,
    boundary: String,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create a new empty form with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            boundary: generate_boundary(),
        }
    }

    /// Create a new form with a custom boundary.
    ///
    /// The boundary must not appear in any part data.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            parts: Vec::new(),
            boundary: boundary.into(),
        }
    }

    /// Add a part to the form.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add a text field to the form.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.part(Part::text(name, value))
    }

    /// Add a file to the form.
    #[must_use]
    pub fn file(
        self,
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.part(Part::file(name, filename, data))
    }

    /// Get the boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the parts in this form.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Get the Content-Type header value for this form:
    /// `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Convert the form into a (content-type, body) pair.
    #[must_use]
    pub fn into_body(self) -> (String, Bytes) {
        let content_type = self.content_type();
        let body = self.encode();
        (content_type, body)
    }

    /// Encode the form into bytes.
    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name.as_bytes());
            buf.put_slice(b"\"");

            match &part.body {
                PartBody::Text(value) => {
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(value.as_bytes());
                }
                PartBody::File { filename, data } => {
                    buf.put_slice(b"; filename=\"");
                    buf.put_slice(filename.as_bytes());
                    buf.put_slice(b"\"\r\n");
                    buf.put_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                    buf.put_slice(data);
                }
            }
            buf.put_slice(b"\r\n");
        }

        // Final boundary
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

/// Generate a boundary string unlikely to collide with part data.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----SpyglassBoundary{timestamp:x}")
}
