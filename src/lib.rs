//! Store synthesis and plot normalization for bigraph process specs.
//!
//! - [`stores::add_stores`] turns declared port types into explicit store
//!   wiring.
//! - [`plot::plot_process`] accepts a bare process spec or a one-entry
//!   composite and hands a normalized composite to a [`plot::Renderer`].
//! - [`render::DotRenderer`] is a Graphviz DOT renderer.

pub mod diagnostics;
pub mod error;
pub mod plot;
pub mod render;
pub mod spec;
pub mod stores;

pub use error::PlotError;
pub use plot::{PlotInput, PlotOptions, Renderer, plot_process};
pub use stores::add_stores;

pub type Result<T> = anyhow::Result<T>;
