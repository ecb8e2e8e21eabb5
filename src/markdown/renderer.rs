//! Markdown to HTML renderer for post bodies.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::{
    GfmPass, HighlightPass, ParsePass, Pass, Pipeline, PipelineError, RenderError, SerializePass,
    Stage,
};
use crate::highlight::{DEFAULT_CLASS_PREFIX, Highlighter};

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// The standard pipeline runs, in order: CommonMark parse, GFM extensions
/// (tables, strikethrough, autolinks, task lists, footnotes), syntect
/// highlighting of fenced code blocks with CSS classes, and serialization
/// that keeps raw HTML verbatim.
///
/// The renderer holds no per-call state and is `Send + Sync`; one instance
/// can render many documents from many threads.
pub struct MarkdownRenderer {
    pipeline: Pipeline,
}

impl MarkdownRenderer {
    /// Creates renderer with the standard pipeline and default class prefix.
    pub fn new() -> Self {
        Self::with_class_prefix(DEFAULT_CLASS_PREFIX)
    }

    /// Creates renderer with the standard pipeline, tagging highlighted
    /// tokens with `class_prefix`.
    pub fn with_class_prefix(class_prefix: &'static str) -> Self {
        Self::with_highlighter(Highlighter::new(class_prefix))
    }

    /// Creates renderer with the standard pipeline around a configured
    /// highlighter.
    pub fn with_highlighter(highlighter: Highlighter) -> Self {
        Self {
            pipeline: standard_pipeline(highlighter),
        }
    }

    /// Creates renderer from a custom pipeline.
    ///
    /// # Errors
    ///
    /// Returns error if the pipeline lacks a parse or serialize pass.
    pub fn with_pipeline(pipeline: Pipeline) -> Result<Self, PipelineError> {
        pipeline.validate()?;
        Ok(Self { pipeline })
    }

    /// Stages of the configured pipeline in execution order.
    pub fn stages(&self) -> Vec<Stage> {
        self.pipeline.stages()
    }

    /// Pass names of the configured pipeline in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.pipeline.pass_names()
    }

    /// Renders markdown content to HTML string.
    ///
    /// Empty input renders to an empty string. Malformed markdown is never
    /// an error; the parser accepts any text.
    ///
    /// # Errors
    ///
    /// Returns error if highlighting a code block fails or the tree cannot
    /// be serialized.
    pub fn render(&self, content: &str) -> Result<String, RenderError> {
        let html = self.pipeline.run(content)?;
        debug!(
            input_bytes = content.len(),
            output_bytes = html.len(),
            "Rendered markdown"
        );
        Ok(html)
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file {}", path.display()))?;
        self.render(&content)
            .with_context(|| format!("Failed to render markdown file {}", path.display()))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn standard_pipeline(highlighter: Highlighter) -> Pipeline {
    let passes: Vec<Box<dyn Pass>> = vec![
        Box::new(ParsePass::default()),
        Box::new(GfmPass),
        Box::new(HighlightPass::new(highlighter)),
        Box::new(SerializePass),
    ];
    Pipeline::from_ordered(passes)
}
