//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! Rendering is an explicit ordered pipeline of passes over the comrak
//! syntax tree: parse, GFM extensions, syntax highlighting of fenced code,
//! and HTML serialization without sanitization.

mod error;
mod passes;
mod pipeline;
mod renderer;

pub use error::{PipelineError, RenderError};
pub use passes::{GfmPass, HighlightPass, ParsePass, SerializePass};
pub use pipeline::{Pass, Pipeline, Stage};
pub use renderer::MarkdownRenderer;
