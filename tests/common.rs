//! Shared test utilities for integration tests.
//!
//! Provides helpers for building temporary content directories with posts.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

/// Creates an empty temporary content directory.
///
/// # Errors
///
/// Returns error if directory creation fails
pub fn create_content_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Formats a post source with minimal front matter.
pub fn post_source(title: &str, date: &str, body: &str) -> String {
    format!("---\ntitle: '{}'\ndate: '{}'\n---\n{}", title, date, body)
}

/// Writes file to directory, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Writes a post file named `<slug>.md`.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_post(dir: &Path, slug: &str, title: &str, date: &str, body: &str) -> Result<()> {
    write_file(dir, &format!("{}.md", slug), &post_source(title, date, body))
}
