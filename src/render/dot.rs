use crate::diagnostics;
use crate::error::PlotError;
use crate::plot::Renderer;
use crate::spec::{Bigraph, Config, INPUTS_KEY, OUTPUTS_KEY, value_to_token};
use serde::Deserialize;
use serde::de::Deserializer;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Emits Graphviz DOT for a composite: processes as boxes, stores as circles,
/// one edge per wired port.
///
/// Layout and rasterization are left to Graphviz (`dot -Tpng`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

/// DOT text plus the path it was written to, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub dot: String,
    pub path: Option<PathBuf>,
}

/// Config keys the DOT renderer understands; the rest are ignored.
#[derive(Debug, Default, Deserialize)]
struct GraphAttrs {
    #[serde(default, deserialize_with = "deserialize_token")]
    rankdir: Option<String>,
    #[serde(default, deserialize_with = "deserialize_token")]
    dpi: Option<String>,
    #[serde(default, deserialize_with = "deserialize_token")]
    size: Option<String>,
}

const KNOWN_KEYS: [&str; 3] = ["rankdir", "dpi", "size"];
const DEFAULT_RANKDIR: &str = "TB";

impl Renderer for DotRenderer {
    type Output = Rendered;

    fn render(
        &self,
        composite: &Bigraph,
        config: &Config,
        filename: Option<&Path>,
    ) -> Result<Rendered, PlotError> {
        let dot = to_dot(composite, config)?;

        let path = match filename {
            Some(path) => {
                write_dot(path, &dot)?;
                Some(path.to_path_buf())
            }
            None => None,
        };
        Ok(Rendered { dot, path })
    }
}

/// Build the DOT text for `composite`.
pub fn to_dot(composite: &Bigraph, config: &Config) -> Result<String, PlotError> {
    let attrs: GraphAttrs = serde_json::from_value(Value::Object(config.clone()))
        .map_err(|e| PlotError::render("invalid renderer settings", e))?;
    for key in config.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        tracing::debug!(key = %key, "ignoring renderer option");
    }

    let mut processes = Vec::new();
    let mut stores = BTreeSet::new();
    let mut edges = Vec::new();

    for (name, spec) in composite {
        let Some(spec) = spec.as_object() else {
            diagnostics::warn(format!("'{}' is not a process spec; not drawn", name));
            continue;
        };
        processes.push(name.as_str());

        for (port, store) in wiring(spec, INPUTS_KEY) {
            edges.push((store_id(&store), process_id(name), port));
            stores.insert(store);
        }
        for (port, store) in wiring(spec, OUTPUTS_KEY) {
            edges.push((process_id(name), store_id(&store), port));
            stores.insert(store);
        }
    }

    // Writing into a String cannot fail.
    let mut out = String::new();
    let _ = writeln!(out, "digraph bigraph {{");
    let _ = writeln!(
        out,
        "  rankdir={};",
        quote(attrs.rankdir.as_deref().unwrap_or(DEFAULT_RANKDIR))
    );
    if let Some(dpi) = &attrs.dpi {
        let _ = writeln!(out, "  dpi={};", quote(dpi));
    }
    if let Some(size) = &attrs.size {
        let _ = writeln!(out, "  size={};", quote(size));
    }

    for name in processes {
        let _ = writeln!(
            out,
            "  {} [label={}, shape=box];",
            quote(&process_id(name)),
            quote(name)
        );
    }
    for store in &stores {
        let _ = writeln!(
            out,
            "  {} [label={}, shape=circle];",
            quote(&store_id(store)),
            quote(store)
        );
    }
    for (from, to, port) in &edges {
        let _ = writeln!(
            out,
            "  {} -> {} [label={}];",
            quote(from),
            quote(to),
            quote(port)
        );
    }
    let _ = writeln!(out, "}}");

    Ok(out)
}

/// (port, store name) pairs from an `inputs`/`outputs` side-table.
///
/// A store path like `["cell", "mass"]` is shown as `cell/mass`.
fn wiring(spec: &serde_json::Map<String, Value>, key: &str) -> Vec<(String, String)> {
    let Some(table) = spec.get(key).and_then(Value::as_object) else {
        return Vec::new();
    };
    table
        .iter()
        .map(|(port, path)| {
            let store = match path {
                Value::Array(parts) => parts
                    .iter()
                    .map(value_to_token)
                    .collect::<Vec<_>>()
                    .join("/"),
                other => value_to_token(other),
            };
            (port.clone(), store)
        })
        .collect()
}

fn process_id(name: &str) -> String {
    format!("process:{name}")
}

fn store_id(name: &str) -> String {
    format!("store:{name}")
}

fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{escaped}\"")
}

fn write_dot(path: &Path, dot: &str) -> Result<(), PlotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PlotError::render(format!("create {}", parent.display()), e))?;
    }
    fs::write(path, dot).map_err(|e| PlotError::render(format!("write {}", path.display()), e))
}

fn deserialize_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Graph attributes are strings in DOT; accept any scalar and stringify it.
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| value_to_token(&v)))
}
