//! Batch rendering of posts and site output.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::components::post::post_body;
use crate::content::Post;
use crate::markdown::MarkdownRenderer;

/// A post whose body rendered successfully.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub post: Post,
    pub html: String,
}

/// A post whose body failed to render.
#[derive(Debug)]
pub struct PostFailure {
    pub slug: String,
    pub error: anyhow::Error,
}

/// Outcome of rendering a batch of posts.
///
/// Rendered posts keep the input order. A failure in one post never
/// prevents the others from rendering.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub rendered: Vec<RenderedPost>,
    pub failures: Vec<PostFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fails if any post failed to render, listing every failed slug.
    ///
    /// # Errors
    ///
    /// Returns error naming all failed posts.
    pub fn ensure_success(&self) -> Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }

        let slugs: Vec<&str> = self.failures.iter().map(|f| f.slug.as_str()).collect();
        bail!(
            "{} of {} posts failed to render: {}",
            self.failures.len(),
            self.failures.len() + self.rendered.len(),
            slugs.join(", ")
        )
    }
}

/// Renders every post body in parallel.
///
/// Each render is independent; the renderer is shared read-only across the
/// rayon pool.
pub fn render_posts(renderer: &MarkdownRenderer, posts: Vec<Post>) -> BuildReport {
    let results: Vec<Result<RenderedPost, PostFailure>> = posts
        .into_par_iter()
        .map(|post| match renderer.render(&post.content) {
            Ok(html) => Ok(RenderedPost { post, html }),
            Err(error) => Err(PostFailure {
                slug: post.slug,
                error: error.into(),
            }),
        })
        .collect();

    let mut report = BuildReport::default();
    for result in results {
        match result {
            Ok(rendered) => report.rendered.push(rendered),
            Err(failure) => {
                let message = format!("{:#}", failure.error);
                error!(slug = %failure.slug, error = %message, "Failed to render post");
                report.failures.push(failure);
            }
        }
    }
    report
}

/// Writes rendered posts and the highlighting stylesheet.
///
/// Layout under `output`:
/// - `blog/<slug>.html`: content body fragment per post
/// - `assets/highlight.css`: token colors for the configured theme
///
/// # Returns
///
/// Number of post fragments written
///
/// # Errors
///
/// Returns error if any directory or file cannot be written
pub fn write_site(report: &BuildReport, output: &Path, stylesheet: &str) -> Result<usize> {
    let blog_dir = output.join("blog");
    fs::create_dir_all(&blog_dir)
        .with_context(|| format!("Failed to create directory {}", blog_dir.display()))?;

    crate::assets::write_highlight_css(&output.join("assets"), stylesheet)?;

    for rendered in &report.rendered {
        let path = blog_dir.join(format!("{}.html", rendered.post.slug));
        let markup = post_body(&rendered.post, &rendered.html);
        fs::write(&path, markup.into_string())
            .with_context(|| format!("Failed to write post {}", path.display()))?;
        info!(path = %path.display(), "Generated post");
    }

    Ok(report.rendered.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostMeta;
    use crate::highlight::HighlightError;
    use crate::markdown::{ParsePass, Pass, Pipeline, RenderError, SerializePass, Stage};
    use comrak::nodes::{AstNode, NodeValue};
    use tempfile::TempDir;

    /// Fails any document containing the marker text.
    struct FailOn(&'static str);

    impl Pass for FailOn {
        fn name(&self) -> &'static str {
            "fail-on"
        }

        fn stage(&self) -> Stage {
            Stage::Annotate
        }

        fn transform<'a>(&self, root: &'a AstNode<'a>) -> Result<(), RenderError> {
            let marked = root.descendants().any(|node| {
                matches!(&node.data.borrow().value, NodeValue::Text(text) if text.contains(self.0))
            });
            if marked {
                return Err(RenderError::Highlight {
                    language: "rust".to_string(),
                    source: HighlightError::Panicked(self.0.to_string()),
                });
            }
            Ok(())
        }
    }

    fn post(slug: &str, content: &str) -> Post {
        Post {
            slug: slug.to_string(),
            meta: PostMeta {
                title: format!("Title {}", slug),
                date: "2022-08-01".to_string(),
                excerpt: None,
                author: None,
                cover_image: None,
                og_image: None,
            },
            content: content.to_string(),
        }
    }

    #[test]
    fn test_render_posts_keeps_order() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let posts: Vec<Post> = (0..16)
            .map(|i| post(&format!("p{i}"), &format!("# Post {i}")))
            .collect();

        // Act
        let report = render_posts(&renderer, posts);

        // Assert
        assert!(report.is_success());
        let slugs: Vec<String> = report.rendered.iter().map(|r| r.post.slug.clone()).collect();
        let expected: Vec<String> = (0..16).map(|i| format!("p{i}")).collect();
        assert_eq!(slugs, expected);
        assert!(report.rendered[3].html.contains("<h1>Post 3</h1>"));
    }

    #[test]
    fn test_render_posts_empty() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let report = render_posts(&renderer, Vec::new());

        // Assert
        assert!(report.rendered.is_empty());
        assert!(report.ensure_success().is_ok());
    }

    #[test]
    fn test_ensure_success_lists_failures() {
        // Arrange
        let report = BuildReport {
            rendered: vec![RenderedPost {
                post: post("ok", ""),
                html: String::new(),
            }],
            failures: vec![PostFailure {
                slug: "broken".to_string(),
                error: RenderError::Highlight {
                    language: "rust".to_string(),
                    source: HighlightError::Panicked("boom".to_string()),
                }
                .into(),
            }],
        };

        // Act
        let result = report.ensure_success();

        // Assert
        let message = result.expect_err("Should fail").to_string();
        assert!(message.contains("1 of 2 posts"), "{}", message);
        assert!(message.contains("broken"), "{}", message);
    }

    #[test]
    fn test_render_posts_isolates_failing_post() {
        // Arrange
        let pipeline = Pipeline::new()
            .with(ParsePass::default())
            .and_then(|p| p.with(FailOn("BOOM")))
            .and_then(|p| p.with(SerializePass))
            .expect("Should build pipeline");
        let renderer = MarkdownRenderer::with_pipeline(pipeline).expect("Pipeline should be valid");
        let posts = vec![
            post("first-light", "Morning *notes*."),
            post("deploy-log", "The release went BOOM at noon."),
            post("after-hours", "## Quiet evening"),
        ];

        // Act
        let report = render_posts(&renderer, posts);

        // Assert
        let slugs: Vec<&str> = report.rendered.iter().map(|r| r.post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first-light", "after-hours"]);
        assert!(report.rendered[0].html.contains("<em>notes</em>"));
        assert!(report.rendered[1].html.contains("<h2>Quiet evening</h2>"));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].slug, "deploy-log");
        assert_eq!(
            format!("{:#}", report.failures[0].error),
            "failed to highlight `rust` code block: tokenizer panicked: BOOM"
        );
    }

    #[test]
    fn test_write_site_layout() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let renderer = MarkdownRenderer::new();
        let report = render_posts(&renderer, vec![post("hello", "Some *text*.")]);

        // Act
        let written = write_site(&report, dir.path(), ".hl-keyword { color: red; }")?;

        // Assert
        assert_eq!(written, 1);
        let page = fs::read_to_string(dir.path().join("blog/hello.html"))?;
        assert!(page.contains("<em>text</em>"), "Body should be unescaped: {}", page);
        assert!(page.contains("Title hello"));
        let css = fs::read_to_string(dir.path().join("assets/highlight.css"))?;
        assert!(css.contains(".hl-keyword"));
        Ok(())
    }
}
