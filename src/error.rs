use thiserror::Error;

/// Errors raised by the plot adapter and renderers.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The argument is neither a bare process spec nor a one-entry composite.
    #[error(
        "expected a single process spec (an object with '_type') or a one-entry composite \
         {{\"Name\": spec}}, found {found}; when passing a bare spec, also pass a name"
    )]
    InvalidShape { found: String },

    /// The renderer could not produce or write its output.
    #[error("render failed: {0}")]
    Render(String),
}

impl PlotError {
    pub(crate) fn render(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::Render(format!("{context}: {err}"))
    }
}
