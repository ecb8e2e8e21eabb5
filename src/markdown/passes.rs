//! Standard passes of the markdown pipeline.

use comrak::Options;
use comrak::nodes::{AstNode, NodeCodeBlock, NodeHtmlBlock, NodeValue};

use super::{Pass, RenderError, Stage};
use crate::highlight::Highlighter;

/// Base CommonMark parse.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParsePass {
    /// Convert straight quotes and dashes to typographic ones.
    pub smart: bool,
}

impl Pass for ParsePass {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn stage(&self) -> Stage {
        Stage::Parse
    }

    fn configure(&self, options: &mut Options<'static>) {
        options.parse.smart = self.smart;
    }
}

/// GitHub Flavored Markdown grammar: tables, strikethrough, autolinks,
/// task lists and footnotes.
///
/// The GFM tag filter is left off so hand-authored HTML is not rewritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct GfmPass;

impl Pass for GfmPass {
    fn name(&self) -> &'static str {
        "gfm"
    }

    fn stage(&self) -> Stage {
        Stage::Extend
    }

    fn configure(&self, options: &mut Options<'static>) {
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.tagfilter = false;
    }
}

/// Replaces fenced code blocks in a known language with highlighted HTML.
///
/// Output mirrors the Prism layout so existing `language-*` selectors keep
/// working:
///
/// ```html
/// <pre class="language-rust"><code class="language-rust"><span class="hl-…">…</span></code></pre>
/// ```
///
/// Blocks with no info string, an unknown language, or text beyond the
/// highlighter limits are left as ordinary code blocks.
pub struct HighlightPass {
    highlighter: Highlighter,
}

impl HighlightPass {
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }

    fn annotate(&self, block: &NodeCodeBlock) -> Result<Option<String>, RenderError> {
        let Some(language) = fence_language(&block.info) else {
            return Ok(None);
        };

        let highlighted = self
            .highlighter
            .highlight(&block.literal, language)
            .map_err(|source| RenderError::Highlight {
                language: language.to_string(),
                source,
            })?;

        Ok(highlighted.map(|code| {
            let class = escape_attribute(language);
            format!(
                "<pre class=\"language-{class}\"><code class=\"language-{class}\">{code}</code></pre>\n"
            )
        }))
    }
}

impl Pass for HighlightPass {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn stage(&self) -> Stage {
        Stage::Annotate
    }

    fn transform<'a>(&self, root: &'a AstNode<'a>) -> Result<(), RenderError> {
        for node in root.descendants() {
            let html = match &node.data.borrow().value {
                NodeValue::CodeBlock(block) if block.fenced => self.annotate(block)?,
                _ => None,
            };

            if let Some(literal) = html {
                node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal,
                });
            }
        }
        Ok(())
    }
}

/// Serializes the tree without sanitization.
///
/// Content is written by trusted authors and embeds hand-written HTML, so
/// raw HTML blocks and inline tags are emitted verbatim. Highlighted code
/// blocks are HTML nodes too and depend on this.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerializePass;

impl Pass for SerializePass {
    fn name(&self) -> &'static str {
        "serialize"
    }

    fn stage(&self) -> Stage {
        Stage::Serialize
    }

    fn configure(&self, options: &mut Options<'static>) {
        options.render.unsafe_ = true;
        options.render.escape = false;
    }
}

/// First word of a fence info string (`rust title="x"` → `rust`).
fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next().filter(|lang| !lang.is_empty())
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
