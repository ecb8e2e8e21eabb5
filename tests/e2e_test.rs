//! End-to-end tests for the quillpost binary.

mod common;

use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Tests full binary execution generates post fragments and stylesheet.
#[test]
fn test_full_workflow_e2e() -> Result<()> {
    // Arrange
    let content = common::create_content_dir()?;
    let output = TempDir::new()?;
    common::write_post(
        content.path(),
        "hello",
        "Hello E2E",
        "2022-08-01",
        "Intro with ~~old~~ text.\n\n```js\nconst a = 1;\n```\n",
    )?;

    // Act
    let status = Command::new(env!("CARGO_BIN_EXE_quillpost"))
        .arg(content.path())
        .arg("-o")
        .arg(output.path())
        .args(["--theme", "InspiredGitHub", "--class-prefix", "token-"])
        .status()?;

    // Assert
    assert!(status.success(), "Binary should succeed");
    let page = fs::read_to_string(output.path().join("blog/hello.html"))?;
    assert!(page.contains("Hello E2E"));
    assert!(page.contains("<del>old</del>"));
    assert!(page.contains("<span class=\"token-"), "{}", page);
    assert!(output.path().join("assets/highlight.css").exists());
    Ok(())
}

/// Tests an unknown theme fails before anything is written.
#[test]
fn test_invalid_theme_e2e() -> Result<()> {
    // Arrange
    let content = common::create_content_dir()?;
    let output = TempDir::new()?;
    common::write_post(content.path(), "a", "A", "2022-01-01", "body")?;

    // Act
    let result = Command::new(env!("CARGO_BIN_EXE_quillpost"))
        .arg(content.path())
        .arg("-o")
        .arg(output.path())
        .args(["--theme", "No-Such-Theme"])
        .output()?;

    // Assert
    assert!(!result.status.success(), "Unknown theme should fail");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Unknown theme"), "{}", stderr);
    assert!(!output.path().join("blog").exists());
    Ok(())
}

/// Tests a broken post fails the build loudly.
#[test]
fn test_broken_post_fails_build_e2e() -> Result<()> {
    // Arrange
    let content = common::create_content_dir()?;
    let output = TempDir::new()?;
    common::write_file(content.path(), "bad.md", "---\ntitle: missing date\n---\nbody")?;

    // Act
    let result = Command::new(env!("CARGO_BIN_EXE_quillpost"))
        .arg(content.path())
        .arg("-o")
        .arg(output.path())
        .output()?;

    // Assert
    assert!(!result.status.success(), "Broken post should fail the build");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("bad"), "Error should name the post: {}", stderr);
    Ok(())
}
