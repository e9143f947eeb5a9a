//! Type token normalization.
//!
//! A declared port type is either a single token (`"float"`) or a list of
//! tokens (`["int", "string"]`). Downstream consumers always see a non-empty
//! list of strings.

use crate::spec::ANY_TYPE;
use serde_json::Value;

/// Render a single token as a string.
///
/// Strings are taken verbatim; anything else uses its compact JSON text.
pub fn value_to_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalize a declared port type into a non-empty list of string tokens.
pub fn type_tokens(declared: &Value) -> Vec<String> {
    match declared {
        Value::Array(items) if items.is_empty() => vec![ANY_TYPE.to_string()],
        Value::Array(items) => items.iter().map(value_to_token).collect(),
        scalar => vec![value_to_token(scalar)],
    }
}
