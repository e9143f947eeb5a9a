//! Renderer config assembly.

use crate::spec::{Config, value_to_token};
use serde_json::Value;

/// Resolution option; renderers expect it as a string.
pub const DPI_KEY: &str = "dpi";

/// Overlay `overrides` on `settings` and coerce `dpi` to a string.
pub fn assemble_config(settings: Option<&Config>, overrides: &Config) -> Config {
    let mut config = settings.cloned().unwrap_or_default();
    config.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

    if let Some(dpi) = config.get_mut(DPI_KEY) {
        if !dpi.is_string() {
            *dpi = Value::String(value_to_token(dpi));
        }
    }
    config
}
