//! CSS asset output

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// File name of the generated token stylesheet.
pub const HIGHLIGHT_CSS: &str = "highlight.css";

/// Writes the syntax highlighting stylesheet into `assets_dir`.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file written.
pub fn write_highlight_css(assets_dir: &Path, css: &str) -> Result<()> {
    fs::create_dir_all(assets_dir)
        .with_context(|| format!("Failed to create assets directory {}", assets_dir.display()))?;
    fs::write(assets_dir.join(HIGHLIGHT_CSS), css)
        .with_context(|| format!("Failed to write CSS asset: {}", HIGHLIGHT_CSS))?;
    Ok(())
}
