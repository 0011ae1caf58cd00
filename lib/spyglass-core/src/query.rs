//! Typed query-string encoding.
//!
//! Request-parameter structures implement [`QueryParams`] by listing their
//! fields as [`QueryField`] values; [`to_query_string`] renders, filters,
//! sorts, and percent-encodes them. There is no reflection: the trait is
//! the declarative per-field mapping of name and omit-if-empty behavior.
//!
//! Parameters are sorted alphabetically by name so the output is
//! byte-stable for tests and caching proxies. Encoding never fails; a
//! field that cannot be rendered is skipped.
//!
//! # Example
//!
//! ```
//! use spyglass_core::{QueryField, QueryParams, to_query_string};
//!
//! struct ListParams {
//!     model: String,
//!     limit: i64,
//! }
//!
//! impl QueryParams for ListParams {
//!     fn query_fields(&self) -> Vec<QueryField> {
//!         vec![
//!             QueryField::new("model", self.model.as_str()),
//!             QueryField::new("limit", self.limit),
//!         ]
//!     }
//! }
//!
//! let params = ListParams { model: "gpt-4".to_string(), limit: 10 };
//! assert_eq!(to_query_string(Some(&params)), "limit=10&model=gpt-4");
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

/// A typed query-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Rendered verbatim.
    Text(String),
    /// Rendered in base 10.
    Integer(i64),
    /// Rendered in fixed 6-decimal notation, never scientific.
    Float(f64),
    /// Rendered as `true`/`false`.
    Flag(bool),
    /// Rendered as an RFC 3339 timestamp (seconds precision).
    Timestamp(DateTime<Utc>),
    /// Rendered as one repeated parameter per element, in order.
    List(Vec<QueryValue>),
    /// Any nested structure, rendered as a single JSON-text parameter.
    Json(serde_json::Value),
}

impl QueryValue {
    /// The emptiness rule used by omit-if-empty fields: zero-length text,
    /// lists, and JSON strings/arrays/objects are empty; `false`, `0`, and
    /// `0.0` are empty; timestamps and other JSON values never are.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Integer(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::Flag(value) => !value,
            Self::Timestamp(_) => false,
            Self::List(items) => items.is_empty(),
            Self::Json(value) => match value {
                serde_json::Value::String(text) => text.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(entries) => entries.is_empty(),
                _ => false,
            },
        }
    }

    /// Render a scalar value. Lists are expanded by the encoder and return
    /// `None` here, as does JSON that cannot be serialized.
    fn render(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) => Some(format!("{value:.6}")),
            Self::Flag(value) => Some(value.to_string()),
            Self::Timestamp(value) => Some(value.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::List(_) => None,
            Self::Json(value) => serde_json::to_string(value).ok(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for QueryValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// One named query parameter produced by a [`QueryParams`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryField {
    name: &'static str,
    value: Option<QueryValue>,
    omit_empty: bool,
}

impl QueryField {
    /// A field that is always rendered, even when its value is empty.
    #[must_use]
    pub fn new(name: &'static str, value: impl Into<QueryValue>) -> Self {
        Self {
            name,
            value: Some(value.into()),
            omit_empty: false,
        }
    }

    /// A field that is dropped when its value is empty per
    /// [`QueryValue::is_empty`].
    #[must_use]
    pub fn omit_empty(name: &'static str, value: impl Into<QueryValue>) -> Self {
        Self {
            name,
            value: Some(value.into()),
            omit_empty: true,
        }
    }

    /// An optional field. An unset value is always dropped, regardless of
    /// emptiness; a set value is unwrapped and rendered even when empty.
    #[must_use]
    pub fn optional(name: &'static str, value: Option<impl Into<QueryValue>>) -> Self {
        Self {
            name,
            value: value.map(Into::into),
            omit_empty: false,
        }
    }

    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Trait for request-parameter structures that can be rendered as a query
/// string.
pub trait QueryParams {
    /// The ordered list of fields to encode.
    fn query_fields(&self) -> Vec<QueryField>;
}

/// Encode parameters into a query string (no leading `?`).
///
/// `None` yields the empty string, as does a value whose fields all end up
/// omitted. Output pairs are sorted by parameter name; repeated parameters
/// from list values keep their element order.
#[must_use]
pub fn to_query_string<Q: QueryParams + ?Sized>(params: Option<&Q>) -> String {
    let Some(params) = params else {
        return String::new();
    };

    let mut pairs: Vec<(&'static str, String)> = Vec::new();
    for field in params.query_fields() {
        let Some(value) = field.value else {
            continue;
        };
        if field.omit_empty && value.is_empty() {
            continue;
        }
        match value {
            QueryValue::List(items) => {
                for item in items {
                    if let Some(rendered) = item.render() {
                        pairs.push((field.name, rendered));
                    }
                }
            }
            scalar => {
                if let Some(rendered) = scalar.render() {
                    pairs.push((field.name, rendered));
                }
            }
        }
    }

    // Stable sort: repeated parameters keep insertion order within a name.
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in &pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}
