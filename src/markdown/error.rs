//! Error types for markdown rendering.

use crate::highlight::HighlightError;

use super::Stage;

/// Failure of a single render call.
///
/// Markdown parsing itself never fails; only the passes that run after the
/// tree is built can report errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Highlighting a fenced code block failed.
    #[error("failed to highlight `{language}` code block")]
    Highlight {
        language: String,
        #[source]
        source: HighlightError,
    },

    /// Writing the final tree to HTML failed.
    #[error("failed to serialize HTML")]
    Serialize(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("serialized HTML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Invalid pipeline composition.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("pass `{pass}` ({stage}) cannot run after a {after} pass")]
    OutOfOrder {
        pass: &'static str,
        stage: Stage,
        after: Stage,
    },

    #[error("pipeline has no {0} pass")]
    MissingStage(Stage),
}
