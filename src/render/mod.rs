//! Renderers for composites.

pub mod dot;

pub use dot::{DotRenderer, Rendered};
