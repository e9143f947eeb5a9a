//! Classification of the plot adapter's primary argument.

use crate::error::PlotError;
use crate::spec::{Bigraph, ProcessSpec, TYPE_KEY};
use serde_json::Value;

/// Display name used when a bare spec comes with neither a name nor a filename.
pub const DEFAULT_PROCESS_NAME: &str = "process";

/// The two argument shapes the adapter accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotInput {
    /// A single process spec; `name` is its display name, if one was given.
    BareSpec {
        spec: ProcessSpec,
        name: Option<String>,
    },
    /// A one-entry composite `{name: spec}`.
    Composite { name: String, spec: ProcessSpec },
}

impl PlotInput {
    /// Decide which shape `value` has.
    ///
    /// A top-level `_type` key wins: such an object is a bare spec even if it
    /// happens to have a single entry. Empty names count as missing. A
    /// composite keyed by the empty string is rejected.
    pub fn classify(value: Value, name: Option<&str>) -> Result<Self, PlotError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(PlotError::InvalidShape {
                    found: describe(&other),
                });
            }
        };

        if map.contains_key(TYPE_KEY) {
            return Ok(PlotInput::BareSpec {
                spec: map,
                name: name.filter(|n| !n.is_empty()).map(str::to_string),
            });
        }

        let len = map.len();
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((key, Value::Object(spec))), None) if spec.contains_key(TYPE_KEY) => {
                if key.is_empty() {
                    return Err(PlotError::InvalidShape {
                        found: "a composite keyed by an empty name".to_string(),
                    });
                }
                Ok(PlotInput::Composite { name: key, spec })
            }
            (Some((key, _)), None) => Err(PlotError::InvalidShape {
                found: format!("entry '{}' without a '_type'", key),
            }),
            _ => Err(PlotError::InvalidShape {
                found: format!("an object with {} entries and no '_type'", len),
            }),
        }
    }

    /// Display name the renderer will see.
    pub fn name(&self) -> &str {
        match self {
            PlotInput::BareSpec { name, .. } => name.as_deref().unwrap_or(DEFAULT_PROCESS_NAME),
            PlotInput::Composite { name, .. } => name,
        }
    }

    /// Normalize into the one-entry bigraph renderers consume.
    pub fn into_composite(self) -> Bigraph {
        let name = self.name().to_string();
        let spec = match self {
            PlotInput::BareSpec { spec, .. } | PlotInput::Composite { spec, .. } => spec,
        };
        let mut out = Bigraph::new();
        out.insert(name, Value::Object(spec));
        out
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
