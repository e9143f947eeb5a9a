//! User-facing diagnostics.
//!
//! Errors get a uniform prefix so they read the same whether they come out of
//! the library or the CLI. Warnings go through `tracing` and therefore obey
//! `RUST_LOG`.

use std::fmt::Display;

const PREFIX: &str = "bigraph-stores";

/// Format an error message with the crate prefix.
pub fn error_message(msg: impl Display) -> String {
    format!("{PREFIX}: {msg}")
}

/// Report a recoverable oddity in the input.
pub fn warn(msg: impl Display) {
    tracing::warn!(target: PREFIX, "{}", msg);
}

/// Install the stderr subscriber used by the binary.
///
/// Defaults to `warn` unless `RUST_LOG` says otherwise. Calling it twice is a
/// no-op.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(error_message("boom"), "bigraph-stores: boom");
    }
}
