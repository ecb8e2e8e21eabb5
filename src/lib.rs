//! Markdown rendering pipeline for blog posts.

mod assets;
pub mod build;
pub mod components;
mod config;
pub mod content;
pub mod highlight;
pub mod markdown;

pub use assets::{HIGHLIGHT_CSS, write_highlight_css};
pub use build::{BuildReport, PostFailure, RenderedPost, render_posts, write_site};
pub use config::Config;
pub use content::{Post, PostMeta, load_posts, split_front_matter};
pub use highlight::{HighlightError, HighlightLimits, Highlighter};
pub use markdown::{
    GfmPass, HighlightPass, MarkdownRenderer, ParsePass, Pass, Pipeline, PipelineError,
    RenderError, SerializePass, Stage,
};
