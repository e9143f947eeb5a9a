use anyhow::{Context, bail};
use bigraph_stores::render::DotRenderer;
use bigraph_stores::spec::{Bigraph, Config};
use bigraph_stores::{PlotOptions, Result, add_stores, diagnostics, plot_process};
use clap::{Parser, Subcommand};
use regex::Regex;
use serde_json::Value;
use std::fs;

#[derive(Parser)]
#[command(name = "bigraph-stores")]
#[command(about = "Store synthesis and plotting for bigraph process specs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add store wiring for every declared port in a bigraph JSON file.
    Stores {
        #[arg(long)]
        spec: String,

        /// Write here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Render a process spec or one-entry composite as Graphviz DOT.
    Plot {
        #[arg(long)]
        spec: String,

        /// Write the DOT file here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,

        /// Display name for a bare process spec.
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        add_stores: bool,

        /// JSON object with renderer settings.
        #[arg(long)]
        settings: Option<String>,

        /// Renderer override, `key=value`. Values are parsed as JSON when possible.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,
    },
}

fn main() -> Result<()> {
    diagnostics::init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Stores { spec, out } => {
            let bigraph: Bigraph = match read_json(&spec)? {
                Value::Object(map) => map,
                _ => bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "{} must contain a JSON object of process specs",
                        spec
                    ))
                ),
            };
            let text = serde_json::to_string_pretty(&add_stores(&bigraph))?;
            match out {
                Some(out) => {
                    fs::write(&out, text + "\n")
                        .with_context(|| diagnostics::error_message(format!("write {}", out)))?;
                    eprintln!("Wrote {}", out);
                }
                None => println!("{}", text),
            }
        }
        Commands::Plot {
            spec,
            out,
            name,
            add_stores,
            settings,
            overrides,
        } => {
            let composite = read_json(&spec)?;

            let mut options = PlotOptions::new().add_stores(add_stores);
            if let Some(name) = name {
                options = options.name(name);
            }
            if let Some(out) = &out {
                options = options.filename(out.clone());
            }
            if let Some(path) = settings {
                options = options.plot_settings(read_config(&path)?);
            }
            options.overrides = parse_overrides(&overrides)?;

            let rendered = plot_process(&DotRenderer, composite, options)
                .map_err(|e| anyhow::anyhow!(diagnostics::error_message(e)))?;
            match rendered.path {
                Some(path) => eprintln!("Wrote {}", path.display()),
                None => print!("{}", rendered.dot),
            }
        }
    }

    Ok(())
}

fn read_json(path: &str) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read {}", path)))?;
    serde_json::from_str(&text)
        .with_context(|| diagnostics::error_message(format!("parse JSON in {}", path)))
}

fn read_config(path: &str) -> Result<Config> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => bail!(
            "{}",
            diagnostics::error_message(format!(
                "settings file {} must contain a JSON object",
                path
            ))
        ),
    }
}

/// Parse `key=value` pairs; `value` is JSON if it parses, a plain string otherwise.
fn parse_overrides(pairs: &[String]) -> Result<Config> {
    const SET_RE: &str = r#"^\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*=(.*)$"#;
    let re = Regex::new(SET_RE)?;

    let mut out = Config::new();
    for pair in pairs {
        let Some(caps) = re.captures(pair) else {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "--set expects key=value, got {:?}",
                    pair
                ))
            );
        };
        let key = caps[1].to_string();
        let raw = &caps[2];
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        out.insert(key, value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn overrides_parse_json_or_fall_back_to_string() {
        let config = parse_overrides(&[
            "dpi=300".to_string(),
            "rankdir=LR".to_string(),
            "size=\"8,5\"".to_string(),
            "flag=true".to_string(),
        ])
        .unwrap();

        assert_eq!(
            Value::Object(config),
            json!({"dpi": 300, "rankdir": "LR", "size": "8,5", "flag": true})
        );
    }

    #[test]
    fn malformed_override_is_an_error() {
        let err = parse_overrides(&["=300".to_string()]).unwrap_err();
        assert!(err.to_string().contains("key=value"));
    }
}
