//! Query request parsing and validation

use serde_json::{Map, Value};

use crate::api::{GatewayError, GatewayResult};

/// A validated query request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub sql: String,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// Parse a raw request body.
    ///
    /// An empty body is treated as `{}`.
    pub fn parse(body: &[u8]) -> GatewayResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_value(&Value::Object(Default::default()));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::validation(format!("Invalid JSON body: {}", e)))?;
        Self::from_value(&value)
    }

    /// Validate the fields of a url-encoded form body.
    ///
    /// A key given more than once becomes a list, so a repeated `sql` is
    /// rejected as a non-string.
    pub fn from_form(fields: Vec<(String, String)>) -> GatewayResult<Self> {
        let mut body = Map::new();
        for (key, value) in fields {
            match body.get_mut(&key) {
                Some(Value::Array(items)) => items.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
                None => {
                    body.insert(key, Value::String(value));
                }
            }
        }
        Self::from_value(&Value::Object(body))
    }

    /// Validate the `sql` field of an already-decoded body
    pub fn from_value(body: &Value) -> GatewayResult<Self> {
        match body.get("sql") {
            None => Err(GatewayError::validation("SQL query is required")),
            Some(value) if is_falsy(value) => {
                Err(GatewayError::validation("SQL query is required"))
            }
            Some(Value::String(sql)) => Ok(Self::new(sql.clone())),
            Some(_) => Err(GatewayError::validation("SQL query must be a string")),
        }
    }
}

/// `null`, `false`, zero and the empty string count as absent
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
