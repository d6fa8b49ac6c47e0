//! # Structured Error Responses
//!
//! The AccessManager reports failures as a JSON document:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "ArgumentException",
//!     "message": "Failed to add edge to graph.",
//!     "target": "graph",
//!     "attributes": [ { "name": "fromVertex", "value": "child" } ],
//!     "innererror": { "code": "...", "message": "..." }
//!   }
//! }
//! ```
//!
//! `code` and `message` are required at every level; everything else is
//! optional. Decoding is lenient about shape: attribute entries without both a
//! `name` and a `value` are skipped, and a non-object `innererror` or
//! non-array `attributes` is ignored.

use serde::Serialize;
use serde_json::{Map, Value};

const ERROR_PROPERTY: &str = "error";
const CODE_PROPERTY: &str = "code";
const MESSAGE_PROPERTY: &str = "message";
const TARGET_PROPERTY: &str = "target";
const ATTRIBUTES_PROPERTY: &str = "attributes";
const NAME_PROPERTY: &str = "name";
const VALUE_PROPERTY: &str = "value";
const INNER_ERROR_PROPERTY: &str = "innererror";

/// An error reported by the AccessManager, possibly caused by an inner error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub target: Option<String>,
    /// Ordered `(name, value)` pairs. Names are not required to be unique.
    pub attributes: Vec<(String, String)>,
    pub inner_error: Option<Box<ErrorResponse>>,
}

/// The body could not be decoded as an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorResponseDecodeError {
    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("JSON document does not contain an 'error' object property")]
    MissingErrorObject,
    #[error("'error' or 'innererror' object does not contain a '{0}' property")]
    MissingProperty(&'static str),
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            target: None,
            attributes: Vec::new(),
            inner_error: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_inner_error(mut self, inner_error: ErrorResponse) -> Self {
        self.inner_error = Some(Box::new(inner_error));
        self
    }

    /// Value of the first attribute whose name exactly matches `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate this error and its inner errors, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &ErrorResponse> {
        std::iter::successors(Some(self), |e| e.inner_error.as_deref())
    }

    /// Encode as the service's `{"error": {...}}` document.
    pub fn to_json(&self) -> Value {
        // Serializing plain strings and vectors of them cannot fail.
        serde_json::to_value(ErrorDocument {
            error: WireError::from(self),
        })
        .unwrap_or(Value::Null)
    }

    /// Decode from a parsed `{"error": {...}}` document.
    ///
    /// # Errors
    ///
    /// Fails if the document has no `error` object, or if the error or any
    /// inner error is missing `code` or `message`.
    pub fn from_json(document: &Value) -> Result<Self, ErrorResponseDecodeError> {
        match document.get(ERROR_PROPERTY) {
            Some(Value::Object(error)) => decode_error(error),
            _ => Err(ErrorResponseDecodeError::MissingErrorObject),
        }
    }

    /// Decode from raw response body text.
    ///
    /// # Errors
    ///
    /// As [`ErrorResponse::from_json`], plus [`ErrorResponseDecodeError::InvalidJson`].
    pub fn from_body(body: &str) -> Result<Self, ErrorResponseDecodeError> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| ErrorResponseDecodeError::InvalidJson(e.to_string()))?;
        Self::from_json(&document)
    }

    /// Best-effort decode of a response body. Returns `None` for empty bodies,
    /// non-JSON bodies, and JSON that is not a well-formed error document.
    pub fn parse_body(body: &str) -> Option<Self> {
        match Self::from_body(body) {
            Ok(error) => Some(error),
            Err(e) => {
                tracing::debug!("response body is not a structured error: {e}");
                None
            }
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

fn decode_error(error: &Map<String, Value>) -> Result<ErrorResponse, ErrorResponseDecodeError> {
    let code = error
        .get(CODE_PROPERTY)
        .map(value_as_text)
        .ok_or(ErrorResponseDecodeError::MissingProperty(CODE_PROPERTY))?;
    let message = error
        .get(MESSAGE_PROPERTY)
        .map(value_as_text)
        .ok_or(ErrorResponseDecodeError::MissingProperty(MESSAGE_PROPERTY))?;
    let target = error.get(TARGET_PROPERTY).map(value_as_text);

    let attributes = match error.get(ATTRIBUTES_PROPERTY) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let name = entry.get(NAME_PROPERTY)?;
                let value = entry.get(VALUE_PROPERTY)?;
                Some((value_as_text(name), value_as_text(value)))
            })
            .collect(),
        _ => Vec::new(),
    };

    // Innermost error is built first; the chain is assembled on the way out.
    let inner_error = match error.get(INNER_ERROR_PROPERTY) {
        Some(Value::Object(inner)) => Some(Box::new(decode_error(inner)?)),
        _ => None,
    };

    Ok(ErrorResponse {
        code,
        message,
        target,
        attributes,
        inner_error,
    })
}

/// Text of a scalar JSON value. Strings are taken verbatim, other scalars
/// use their JSON text, containers yield an empty string.
fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

// -- Wire encoding ------------------------------------------------------------

#[derive(Serialize)]
struct ErrorDocument<'a> {
    error: WireError<'a>,
}

#[derive(Serialize)]
struct WireError<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<WireAttribute<'a>>,
    #[serde(rename = "innererror", skip_serializing_if = "Option::is_none")]
    inner_error: Option<Box<WireError<'a>>>,
}

#[derive(Serialize)]
struct WireAttribute<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> From<&'a ErrorResponse> for WireError<'a> {
    fn from(error: &'a ErrorResponse) -> Self {
        Self {
            code: &error.code,
            message: &error.message,
            target: error.target.as_deref(),
            attributes: error
                .attributes
                .iter()
                .map(|(name, value)| WireAttribute { name, value })
                .collect(),
            inner_error: error
                .inner_error
                .as_deref()
                .map(|inner| Box::new(WireError::from(inner))),
        }
    }
}
