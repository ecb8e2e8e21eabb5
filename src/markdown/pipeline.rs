//! Ordered pass pipeline over the comrak syntax tree.

use comrak::nodes::AstNode;
use comrak::{Arena, Options, format_html, parse_document};
use std::fmt;

use super::{PipelineError, RenderError};

/// Position of a pass in the rendering pipeline.
///
/// Variants are declared in execution order; a pipeline never runs a pass
/// whose stage sorts before the stage of a pass already added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Base CommonMark parse.
    Parse,
    /// Grammar extensions layered on the base parse (GFM).
    Extend,
    /// Tree rewrites on the parsed document (syntax highlighting).
    Annotate,
    /// HTML output.
    Serialize,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Extend => "extend",
            Stage::Annotate => "annotate",
            Stage::Serialize => "serialize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single step of the markdown pipeline.
///
/// Passes contribute in two places, mirroring how markdown plugins work:
/// `configure` adjusts parser and renderer options before the tree is built,
/// `transform` rewrites the finished tree before it is serialized. Both
/// default to no-ops.
pub trait Pass: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Pipeline stage this pass belongs to.
    fn stage(&self) -> Stage;

    fn configure(&self, _options: &mut Options<'static>) {}

    /// Rewrites the parsed tree in place.
    ///
    /// # Errors
    ///
    /// Returns error if the pass cannot process a node. The render call
    /// that owns the tree is aborted.
    fn transform<'a>(&self, _root: &'a AstNode<'a>) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Explicit ordered list of passes.
///
/// Execution is: every pass configures options in order, the document is
/// parsed once, every pass transforms the tree in order, and the tree is
/// serialized with the accumulated options.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline from passes already listed in stage order.
    pub(crate) fn from_ordered(passes: Vec<Box<dyn Pass>>) -> Self {
        debug_assert!(
            passes.windows(2).all(|w| w[0].stage() <= w[1].stage()),
            "passes must be listed in stage order"
        );
        Self { passes }
    }

    /// Appends a pass, enforcing stage order.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::OutOfOrder` if the pass belongs to an earlier
    /// stage than the last pass already in the pipeline.
    pub fn push(&mut self, pass: impl Pass + 'static) -> Result<(), PipelineError> {
        if let Some(last) = self.passes.last()
            && pass.stage() < last.stage()
        {
            return Err(PipelineError::OutOfOrder {
                pass: pass.name(),
                stage: pass.stage(),
                after: last.stage(),
            });
        }

        self.passes.push(Box::new(pass));
        Ok(())
    }

    /// Builder form of [`Pipeline::push`].
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::push`].
    pub fn with(mut self, pass: impl Pass + 'static) -> Result<Self, PipelineError> {
        self.push(pass)?;
        Ok(self)
    }

    /// Checks that the pipeline both parses and serializes.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::MissingStage` naming the first absent stage.
    pub fn validate(&self) -> Result<(), PipelineError> {
        for required in [Stage::Parse, Stage::Serialize] {
            if !self.passes.iter().any(|p| p.stage() == required) {
                return Err(PipelineError::MissingStage(required));
            }
        }
        Ok(())
    }

    /// Pass names in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Stages in execution order, one entry per pass.
    pub fn stages(&self) -> Vec<Stage> {
        self.passes.iter().map(|p| p.stage()).collect()
    }

    /// Parser and renderer options accumulated from every pass.
    pub fn options(&self) -> Options<'static> {
        let mut options = Options::default();
        for pass in &self.passes {
            pass.configure(&mut options);
        }
        options
    }

    /// Runs the pipeline over one document.
    ///
    /// # Errors
    ///
    /// Returns error if a transform fails or serialization fails.
    pub fn run(&self, markdown: &str) -> Result<String, RenderError> {
        let options = self.options();
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &options);

        for pass in &self.passes {
            pass.transform(root)?;
        }

        let mut output = Vec::with_capacity(markdown.len() * 2);
        format_html(root, &options, &mut output)?;

        Ok(String::from_utf8(output)?)
    }
}
