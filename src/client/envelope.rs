//! JSON envelope returned by the backend
//!
//! Successful responses look like `{ "message": "...", "data": {...},
//! "<collection>": [...] }`; failures carry at least `{ "message": "..." }`.

use crate::core::error::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parsed response body
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Value,
}

impl Envelope {
    /// Parse a response body; an empty body is a parse error
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        if raw.trim().is_empty() {
            return Err(FetchError::Parse("empty response body".to_string()));
        }
        Ok(Self {
            body: serde_json::from_str(raw)?,
        })
    }

    /// Envelope of a bodiless response (`{}`)
    pub fn empty() -> Self {
        Self {
            body: Value::Object(Default::default()),
        }
    }

    pub fn from_value(body: Value) -> Self {
        Self { body }
    }

    /// The `message` field, if it is a non-empty string
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    /// The `data` payload
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data").filter(|d| !d.is_null())
    }

    /// Look up a field, following dots into nested objects
    pub fn field(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|part| !part.is_empty())
            .try_fold(&self.body, |value, part| value.get(part))
            .filter(|value| !value.is_null())
    }

    /// Decode the collection stored under `path`
    ///
    /// A missing collection is an empty one. A field that is not an array,
    /// or elements that do not decode as `T`, are parse errors.
    pub fn collection<T: DeserializeOwned>(&self, path: Option<&str>) -> Result<Vec<T>, FetchError> {
        let value = match path {
            Some(path) => self.field(path),
            None => Some(&self.body),
        };

        match value {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| T::deserialize(item).map_err(FetchError::from))
                .collect(),
            Some(other) => Err(FetchError::Parse(format!(
                "expected an array at '{}', found {}",
                path.unwrap_or("<root>"),
                kind(other)
            ))),
        }
    }

    /// Decode a single object stored under `path`
    pub fn object<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let value = self
            .field(path)
            .ok_or_else(|| FetchError::Parse(format!("missing field '{}'", path)))?;
        Ok(T::deserialize(value)?)
    }

    pub fn into_value(self) -> Value {
        self.body
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
