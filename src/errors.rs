use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReceiptResponseError {
    /// The decoded body handed to the parser was not a JSON object.
    #[error("input must be a structured object (found {found})")]
    InvalidInput { found: &'static str },
}

impl ReceiptResponseError {
    pub(crate) fn invalid_input(value: &Value) -> Self {
        Self::InvalidInput {
            found: json_kind(value),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
