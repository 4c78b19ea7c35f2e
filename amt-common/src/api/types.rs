//! Request and reply types for the tutor backend
//!
//! All three endpoints answer with a flat JSON object carrying either the
//! success field (`response`, `plan`, `midi_path`) or an `error` string.
//! [`settle_reply`] is the one place a reply body becomes an [`ApiResult`].

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Result of one backend round trip
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a single backend request
///
/// Every variant is terminal for its request; nothing is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with an `error` field
    #[error("{0}")]
    Server(String),

    /// The request never produced a response body
    #[error("Network error: {0}")]
    Transport(String),

    /// The body was not JSON, or lacked the expected field
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub use_rag: bool,
}

/// Body of `POST /generate-plan`
///
/// A flat JSON object of form fields plus a `goals` array. Keys keep the
/// order in which the form produced them.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct PlanRequest(Map<String, Value>);

impl PlanRequest {
    /// Key under which the selected goals are sent
    pub const GOALS_KEY: &'static str = "goals";

    /// Build the payload from form entries and checked goal values
    ///
    /// Later entries overwrite earlier ones with the same name, and the goal
    /// list always replaces any scalar `goals` entry.
    pub fn from_form<I, K, V>(entries: I, goals: Vec<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = Map::new();
        for (name, value) in entries {
            fields.insert(name.into(), Value::String(value.into()));
        }
        fields.insert(
            Self::GOALS_KEY.to_string(),
            Value::Array(goals.into_iter().map(Value::String).collect()),
        );
        Self(fields)
    }

    /// Scalar field value, if present and a string
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Selected goals in checkbox order
    pub fn goals(&self) -> Vec<&str> {
        self.0
            .get(Self::GOALS_KEY)
            .and_then(Value::as_array)
            .map(|goals| goals.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// File sent to `POST /upload` as multipart field [`UploadFile::FIELD`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Multipart field name the backend reads the file from
    pub const FIELD: &'static str = "file";
}

/// Turn a reply body into the value of `field` or a typed error
///
/// The body is interpreted regardless of HTTP status. An `error` member wins
/// when it is truthy in the JavaScript sense.
pub fn settle_reply(body: &str, field: &str) -> ApiResult<String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| ApiError::Parse("reply is not a JSON object".to_string()))?;

    match object.get("error") {
        Some(error) if is_truthy(error) => {
            let message = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            return Err(ApiError::Server(message));
        }
        _ => {}
    }

    match object.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::Parse(format!("'{field}' is not a string"))),
        None => Err(ApiError::Parse(format!("reply is missing '{field}'"))),
    }
}

/// JavaScript truthiness: `null`, `false`, zero, and `""` are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
