//! Class-based syntax highlighting with syntect.

use std::panic::{self, AssertUnwindSafe};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;

/// Default CSS class prefix for highlighted tokens.
pub const DEFAULT_CLASS_PREFIX: &str = "hl-";

/// Default theme used to generate the token stylesheet.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Language names accepted in fence info strings that syntect does not
/// resolve on its own.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("shell", "sh"),
    ("zsh", "sh"),
    ("console", "sh"),
    ("golang", "go"),
    ("javascript", "js"),
    ("yml", "yaml"),
];

/// Upper bounds on the text handed to the tokenizer.
///
/// The regex engine behind syntect backtracks, so very long lines and very
/// large blocks are left unhighlighted rather than tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightLimits {
    pub max_block_bytes: usize,
    pub max_line_bytes: usize,
}

impl Default for HighlightLimits {
    fn default() -> Self {
        Self {
            max_block_bytes: 256 * 1024,
            max_line_bytes: 16 * 1024,
        }
    }
}

impl HighlightLimits {
    fn admits(&self, code: &str) -> bool {
        code.len() <= self.max_block_bytes
            && code.lines().all(|line| line.len() <= self.max_line_bytes)
    }
}

/// Failure while tokenizing a code block.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("tokenizer error: {0}")]
    Tokenize(#[from] syntect::Error),

    #[error("tokenizer panicked: {0}")]
    Panicked(String),
}

/// Syntax highlighter emitting CSS class names instead of inline styles.
///
/// Token spans carry classes such as `hl-keyword hl-control`, leaving
/// colors to a stylesheet generated by [`Highlighter::stylesheet`].
pub struct Highlighter {
    syntax_set: SyntaxSet,
    class_prefix: &'static str,
    limits: HighlightLimits,
}

impl Highlighter {
    /// Creates highlighter with bundled syntax definitions.
    pub fn new(class_prefix: &'static str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            class_prefix,
            limits: HighlightLimits::default(),
        }
    }

    /// Replaces the tokenizer work bounds.
    pub fn with_limits(mut self, limits: HighlightLimits) -> Self {
        self.limits = limits;
        self
    }

    fn class_style(&self) -> ClassStyle {
        ClassStyle::SpacedPrefixed {
            prefix: self.class_prefix,
        }
    }

    /// Finds the syntax definition for a fence language name.
    ///
    /// Matches syntect tokens (names and extensions, case insensitive) first,
    /// then the alias table.
    pub fn resolve(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lower = language.to_ascii_lowercase();
        self.syntax_set
            .find_syntax_by_token(&lower)
            .or_else(|| self.syntax_set.find_syntax_by_extension(&lower))
            .or_else(|| {
                LANGUAGE_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .and_then(|(_, target)| self.syntax_set.find_syntax_by_token(target))
            })
    }

    /// Highlights code for the given language.
    ///
    /// # Returns
    ///
    /// `None` when the language is unknown or the code exceeds the work
    /// limits; the caller keeps the block as plain text. Otherwise HTML with
    /// escaped text wrapped in classed `<span>` elements.
    ///
    /// # Errors
    ///
    /// Returns error if the tokenizer fails or panics.
    pub fn highlight(&self, code: &str, language: &str) -> Result<Option<String>, HighlightError> {
        let Some(syntax) = self.resolve(language) else {
            return Ok(None);
        };

        if code.is_empty() {
            return Ok(Some(String::new()));
        }

        if !self.limits.admits(code) {
            warn!(
                language,
                bytes = code.len(),
                "Code block exceeds highlighting limits, leaving it plain"
            );
            return Ok(None);
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.tokenize(syntax, code)));
        match outcome {
            Ok(result) => result.map(Some),
            Err(payload) => Err(HighlightError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    fn tokenize(&self, syntax: &SyntaxReference, code: &str) -> Result<String, HighlightError> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, self.class_style());

        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }

    /// Generates the CSS that colors this highlighter's classes.
    ///
    /// # Errors
    ///
    /// Returns error if the theme is not bundled or CSS generation fails.
    pub fn stylesheet(&self, theme: &str) -> anyhow::Result<String> {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(theme)
            .ok_or_else(|| anyhow::anyhow!("Unknown highlighting theme: {}", theme))?;

        Ok(css_for_theme_with_class_style(theme, self.class_style())?)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

/// Names of the bundled themes accepted by [`Highlighter::stylesheet`].
pub fn theme_names() -> Vec<String> {
    let mut names: Vec<String> = ThemeSet::load_defaults().themes.into_keys().collect();
    names.sort();
    names
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
