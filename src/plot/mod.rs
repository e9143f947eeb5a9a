//! Plot adapter: normalize a process spec or composite and hand it to a
//! renderer with consistent settings.
//!
//! The renderer is a collaborator behind the [`Renderer`] trait; this module
//! only owns argument normalization, optional store synthesis and config
//! assembly.

pub mod config;
pub mod input;

pub use config::{DPI_KEY, assemble_config};
pub use input::{DEFAULT_PROCESS_NAME, PlotInput};

use crate::error::PlotError;
use crate::spec::{Bigraph, Config};
use crate::stores;
use serde_json::Value;
use std::path::Path;

/// Something that can draw a one-entry composite.
pub trait Renderer {
    type Output;

    /// Render `composite` with `config`. `filename` of `None` means "do not
    /// write a file"; what happens instead is up to the renderer.
    fn render(
        &self,
        composite: &Bigraph,
        config: &Config,
        filename: Option<&Path>,
    ) -> Result<Self::Output, PlotError>;
}

/// Keyword arguments of [`plot_process`].
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Output path; also the display name fallback for bare specs.
    pub filename: Option<String>,
    /// Run store synthesis before rendering.
    pub add_stores: bool,
    /// Preferred display name for bare specs.
    pub name: Option<String>,
    /// Base renderer settings.
    pub plot_settings: Option<Config>,
    /// Per-call settings; these win over `plot_settings`.
    pub overrides: Config,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_stores(mut self, add_stores: bool) -> Self {
        self.add_stores = add_stores;
        self
    }

    pub fn plot_settings(mut self, settings: Config) -> Self {
        self.plot_settings = Some(settings);
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Name a bare spec will be shown under: `name`, then `filename`.
    fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or(non_empty(self.filename.as_deref()))
    }
}

/// Normalize `composite`, optionally add stores, and render it.
///
/// `composite` is either a process spec (an object with `_type`) or a
/// one-entry composite `{"Name": spec}`; anything else is
/// [`PlotError::InvalidShape`].
pub fn plot_process<R: Renderer>(
    renderer: &R,
    composite: Value,
    options: PlotOptions,
) -> Result<R::Output, PlotError> {
    let input = PlotInput::classify(composite, options.display_name())?;
    let mut graph = input.into_composite();
    if options.add_stores {
        graph = stores::add_stores(&graph);
    }

    let config = assemble_config(options.plot_settings.as_ref(), &options.overrides);
    let filename = non_empty(options.filename.as_deref()).map(Path::new);

    tracing::debug!(
        names = ?graph.keys().collect::<Vec<_>>(),
        add_stores = options.add_stores,
        filename = ?filename,
        "rendering composite"
    );
    renderer.render(&graph, &config, filename)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    /// Hands back exactly what the adapter passed on.
    struct Capture;

    impl Renderer for Capture {
        type Output = (Bigraph, Config, Option<PathBuf>);

        fn render(
            &self,
            composite: &Bigraph,
            config: &Config,
            filename: Option<&Path>,
        ) -> Result<Self::Output, PlotError> {
            Ok((composite.clone(), config.clone(), filename.map(Path::to_path_buf)))
        }
    }

    fn obj(value: Value) -> Config {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn bare_spec_is_wrapped_under_name() {
        let (graph, _, filename) = plot_process(
            &Capture,
            json!({"_type": "process", "_inputs": {"a": "int"}}),
            PlotOptions::new().name("Growth"),
        )
        .unwrap();

        assert_eq!(
            Value::Object(graph),
            json!({"Growth": {"_type": "process", "_inputs": {"a": "int"}}})
        );
        assert_eq!(filename, None);
    }

    #[test]
    fn filename_is_name_fallback_and_output_path() {
        let (graph, _, filename) = plot_process(
            &Capture,
            json!({"_type": "process"}),
            PlotOptions::new().filename("growth.dot"),
        )
        .unwrap();

        assert_eq!(graph.keys().collect::<Vec<_>>(), vec!["growth.dot"]);
        assert_eq!(filename, Some(PathBuf::from("growth.dot")));
    }

    #[test]
    fn name_wins_over_filename() {
        let (graph, _, _) = plot_process(
            &Capture,
            json!({"_type": "process"}),
            PlotOptions::new().filename("out.dot").name("Growth"),
        )
        .unwrap();

        assert_eq!(graph.keys().collect::<Vec<_>>(), vec!["Growth"]);
    }

    #[test]
    fn bare_spec_without_names_is_called_process() {
        let (graph, _, _) =
            plot_process(&Capture, json!({"_type": "process"}), PlotOptions::new()).unwrap();

        assert_eq!(graph.keys().collect::<Vec<_>>(), vec!["process"]);
    }

    #[test]
    fn composite_is_forwarded_unchanged() {
        let composite = json!({"Growth": {"_type": "process", "_inputs": {"a": "int"}}});

        let (graph, _, _) =
            plot_process(&Capture, composite.clone(), PlotOptions::new()).unwrap();

        assert_eq!(Value::Object(graph), composite);
    }

    #[test]
    fn add_stores_runs_synthesis() {
        let (graph, _, _) = plot_process(
            &Capture,
            json!({"Growth": {"_type": "process", "_inputs": {"a": "int"}}}),
            PlotOptions::new().add_stores(true),
        )
        .unwrap();

        assert_eq!(graph["Growth"]["inputs"], json!({"a": ["int"]}));
        assert_eq!(graph["Growth"]["_inputs"], json!({"a": "any"}));
    }

    #[test]
    fn dpi_is_forwarded_as_string() {
        let (_, config, _) = plot_process(
            &Capture,
            json!({"_type": "process"}),
            PlotOptions::new().plot_settings(obj(json!({"dpi": 300}))),
        )
        .unwrap();

        assert_eq!(Value::Object(config), json!({"dpi": "300"}));
    }

    #[test]
    fn overrides_win_over_settings() {
        let (_, config, _) = plot_process(
            &Capture,
            json!({"_type": "process"}),
            PlotOptions::new()
                .plot_settings(obj(json!({"rankdir": "TB", "size": "8,5"})))
                .set("rankdir", "LR")
                .set("dpi", 72.5),
        )
        .unwrap();

        assert_eq!(
            Value::Object(config),
            json!({"rankdir": "LR", "size": "8,5", "dpi": "72.5"})
        );
    }

    #[test]
    fn invalid_shapes_fail_before_rendering() {
        for bad in [
            json!({"A": {"_type": "process"}, "B": {"_type": "process"}}),
            json!({"config": {"k": 1}}),
        ] {
            let err = plot_process(&Capture, bad, PlotOptions::new().name("Growth")).unwrap_err();
            assert!(matches!(err, PlotError::InvalidShape { .. }));
        }
    }
}
