//! Spec layer: the JSON shapes handed around by the synthesizer, the plot
//! adapter and renderers.
//!
//! Process specs are human-authored and loosely shaped, so they stay as
//! `serde_json` objects rather than a fixed struct. This module owns:
//! - the reserved key names
//! - type aliases for specs, bigraphs and renderer config
//! - type token normalization

pub mod token;

pub use token::{type_tokens, value_to_token};

use serde_json::{Map, Value};

/// Type tag; its presence marks an object as a process spec.
pub const TYPE_KEY: &str = "_type";
/// Declared input ports (port -> type token or list of tokens).
pub const DECLARED_INPUTS_KEY: &str = "_inputs";
/// Declared output ports.
pub const DECLARED_OUTPUTS_KEY: &str = "_outputs";
/// Input wiring side-table (port -> list of string tokens).
pub const INPUTS_KEY: &str = "inputs";
/// Output wiring side-table.
pub const OUTPUTS_KEY: &str = "outputs";
/// Placeholder written over a declared port type once it has been extracted.
pub const ANY_TYPE: &str = "any";

/// A single process spec.
pub type ProcessSpec = Map<String, Value>;

/// Display name -> process spec. A composite is a bigraph with one entry.
pub type Bigraph = Map<String, Value>;

/// Renderer option name -> value.
pub type Config = Map<String, Value>;

/// True if `value` is an object carrying a `_type` tag.
pub fn is_process_spec(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(TYPE_KEY))
}
