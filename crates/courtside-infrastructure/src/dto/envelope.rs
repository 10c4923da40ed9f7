//! Response envelope: `{ "ok": bool, "error"?: string, ... }`.

use super::loose;
use courtside_core::{CourtsideError, Result};
use serde_json::{Map, Value};

/// A successful (`ok: true`) response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Map<String, Value>,
}

impl Envelope {
    /// Parses a response body and checks `ok`.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` if the body is not a JSON object
    /// - `Backend` if `ok` is not `true`; the service's `error` text is kept
    ///   verbatim, else `default_error` is used
    pub fn parse(text: &str, default_error: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|_| CourtsideError::malformed("Invalid JSON"))?;
        let Value::Object(body) = value else {
            return Err(CourtsideError::malformed("expected a JSON object"));
        };

        let ok = body.get("ok").and_then(loose::as_flag).unwrap_or(false);
        if !ok {
            let message = body.get("error").and_then(loose::as_text);
            return Err(CourtsideError::backend(message, default_error));
        }

        Ok(Self { body })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    /// The first of `keys` holding an array, or an empty list.
    pub fn first_array(&self, keys: &[&str]) -> Vec<Value> {
        keys.iter()
            .find_map(|key| match self.get(key) {
                Some(Value::Array(items)) => Some(items.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(loose::as_text)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(loose::as_integer)
    }
}

/// Pulls `error` out of a non-2xx body, if the body is an envelope at all.
pub fn error_text(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(loose::as_text)
        .filter(|s| !s.trim().is_empty())
}
