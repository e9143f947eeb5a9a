//! Store synthesis.
//!
//! Declared ports carry their type inline:
//!
//! ```json
//! { "_type": "process",
//!   "_inputs":  { "mass": "float" },
//!   "_outputs": { "rate": ["float", "unit"] } }
//! ```
//!
//! Synthesis moves that type information into the `inputs`/`outputs`
//! side-tables, where the renderer reads it as a store path, and replaces the
//! declared type with `"any"`:
//!
//! ```json
//! { "_type": "process",
//!   "_inputs":  { "mass": "any" },
//!   "_outputs": { "rate": "any" },
//!   "inputs":   { "mass": ["float"] },
//!   "outputs":  { "rate": ["float", "unit"] } }
//! ```
//!
//! Existing side-table entries win over derived ones, so running synthesis
//! twice is a no-op.

use crate::diagnostics;
use crate::spec::{
    ANY_TYPE, Bigraph, DECLARED_INPUTS_KEY, DECLARED_OUTPUTS_KEY, INPUTS_KEY, OUTPUTS_KEY,
    ProcessSpec, type_tokens,
};
use serde_json::{Map, Value};

/// Declared-port key and the side-table it feeds.
#[derive(Debug, Clone, Copy)]
struct PortSide {
    declared: &'static str,
    wiring: &'static str,
}

const SIDES: [PortSide; 2] = [
    PortSide {
        declared: DECLARED_INPUTS_KEY,
        wiring: INPUTS_KEY,
    },
    PortSide {
        declared: DECLARED_OUTPUTS_KEY,
        wiring: OUTPUTS_KEY,
    },
];

/// Add store entries for every declared port of every process in `bigraph`.
///
/// Returns a new bigraph; `bigraph` itself is left as it was. Entries that are
/// not objects are copied through with a warning.
pub fn add_stores(bigraph: &Bigraph) -> Bigraph {
    bigraph
        .iter()
        .map(|(name, value)| {
            let value = match value.as_object() {
                Some(spec) => Value::Object(add_stores_to_spec(spec)),
                None => {
                    diagnostics::warn(format!(
                        "entry '{}' is not a process spec object; leaving it as is",
                        name
                    ));
                    value.clone()
                }
            };
            (name.clone(), value)
        })
        .collect()
}

/// Store synthesis for a single process spec.
pub fn add_stores_to_spec(spec: &ProcessSpec) -> ProcessSpec {
    let mut out = spec.clone();
    for side in SIDES {
        synthesize_side(&mut out, side);
    }
    out
}

fn synthesize_side(spec: &mut ProcessSpec, side: PortSide) {
    // A null side-table is treated like a missing one.
    let wiring = spec
        .entry(side.wiring)
        .or_insert_with(|| Value::Object(Map::new()));
    if wiring.is_null() {
        *wiring = Value::Object(Map::new());
    }

    let ports: Vec<(String, Vec<String>)> = match spec.get(side.declared) {
        None | Some(Value::Null) => return,
        Some(Value::Object(declared)) => declared
            .iter()
            .map(|(port, ty)| (port.clone(), type_tokens(ty)))
            .collect(),
        Some(other) => {
            diagnostics::warn(format!(
                "'{}' should map port names to types, found {}; skipping",
                side.declared, other
            ));
            return;
        }
    };

    let Some(Value::Object(wiring)) = spec.get_mut(side.wiring) else {
        diagnostics::warn(format!(
            "'{}' is not an object; leaving '{}' untouched",
            side.wiring, side.declared
        ));
        return;
    };
    for (port, tokens) in &ports {
        wiring.entry(port.clone()).or_insert_with(|| {
            Value::Array(tokens.iter().cloned().map(Value::String).collect())
        });
    }

    if let Some(Value::Object(declared)) = spec.get_mut(side.declared) {
        for (port, _) in &ports {
            declared.insert(port.clone(), Value::String(ANY_TYPE.to_string()));
        }
    }
}
