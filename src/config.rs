//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::highlight::{DEFAULT_CLASS_PREFIX, DEFAULT_THEME, theme_names};

/// Command line configuration for Quillpost.
#[derive(Debug, Clone, Parser)]
#[command(name = "quillpost", version, about, long_about = None)]
pub struct Config {
    /// Directory containing markdown posts
    #[arg(default_value = "content")]
    pub content: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Syntax highlighting theme (base16-ocean.dark, InspiredGitHub, etc.)
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// CSS class prefix for highlighted tokens
    #[arg(long, default_value = DEFAULT_CLASS_PREFIX)]
    pub class_prefix: String,

    /// Log progress at info level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the content directory does not exist, the theme is
    /// not bundled, or the class prefix is not a valid CSS identifier start.
    pub fn validate(&self) -> Result<()> {
        if !self.content.is_dir() {
            bail!(
                "Content directory does not exist: {}",
                self.content.display()
            );
        }

        let themes = theme_names();
        if !themes.iter().any(|t| t == &self.theme) {
            bail!(
                "Unknown theme '{}'. Available themes: {}",
                self.theme,
                themes.join(", ")
            );
        }

        if !is_valid_class_prefix(&self.class_prefix) {
            bail!(
                "Invalid class prefix '{}': use ASCII letters, digits, '-' or '_', starting with a letter",
                self.class_prefix
            );
        }

        Ok(())
    }
}

fn is_valid_class_prefix(prefix: &str) -> bool {
    prefix.starts_with(|c: char| c.is_ascii_alphabetic())
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
