//! Post loading: front matter parsing and content directory scanning.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Front matter delimiter line.
const FENCE: &str = "---";

/// Post author as written in front matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

/// Attribution for a cover image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credit {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoverImage {
    pub url: String,
    #[serde(default)]
    pub credit: Option<Credit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OgImage {
    pub url: String,
}

/// Post metadata parsed from YAML front matter.
///
/// `title` and `date` are required. Keys follow the camelCase spelling used
/// in content files (`coverImage`, `ogImage`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,
    /// Publication date as authored, ISO 8601 expected.
    pub date: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub og_image: Option<OgImage>,
}

/// A content record: metadata plus the markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    /// Markdown body with front matter removed.
    pub content: String,
}

impl Post {
    /// Parses a post from the raw source of a content file.
    ///
    /// # Errors
    ///
    /// Returns error if the source has no front matter, the front matter is
    /// not closed, or the YAML does not describe a post.
    pub fn parse(slug: impl Into<String>, source: &str) -> Result<Self> {
        let slug = slug.into();
        let (front_matter, body) = split_front_matter(source)
            .with_context(|| format!("Invalid front matter in post '{}'", slug))?;

        let Some(yaml) = front_matter else {
            bail!("Post '{}' has no front matter", slug);
        };

        let meta: PostMeta = serde_yaml::from_str(yaml)
            .with_context(|| format!("Failed to parse front matter of post '{}'", slug))?;

        Ok(Self {
            slug,
            meta,
            content: body.to_string(),
        })
    }
}

/// Splits a leading `---` fenced front matter block from the body.
///
/// The first line must be exactly `---` to open front matter; the next line
/// that is exactly `---` closes it. Sources without an opening fence are
/// returned whole as body.
///
/// # Returns
///
/// Front matter text (without fences) if present, and the remaining body
///
/// # Errors
///
/// Returns error if front matter is opened but never closed
pub fn split_front_matter(source: &str) -> Result<(Option<&str>, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(rest) = source.strip_prefix(FENCE).and_then(strip_line_end) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    bail!("Front matter opened with '{}' but never closed", FENCE)
}

fn strip_line_end(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// Loads every `*.md` file directly inside `dir` as a post.
///
/// Slugs come from file stems. Posts are ordered newest first, ties broken
/// by slug.
///
/// # Errors
///
/// Returns error if the directory cannot be read or a file cannot be read
/// or has invalid UTF-8. Posts that fail to parse are all logged first and
/// then reported together in one error.
pub fn load_posts(dir: impl AsRef<Path>) -> Result<Vec<Post>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read content directory {}", dir.display()))?;

    let mut posts = Vec::new();
    let mut failed = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            bail!("Post file name is not valid UTF8: {}", path.display());
        };

        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read post {}", path.display()))?;

        match Post::parse(slug, &source) {
            Ok(post) => {
                debug!(slug = %post.slug, path = %path.display(), "Loaded post");
                posts.push(post);
            }
            Err(err) => {
                let message = format!("{:#}", err);
                error!(slug, path = %path.display(), error = %message, "Failed to load post");
                failed.push(slug.to_string());
            }
        }
    }

    if !failed.is_empty() {
        failed.sort();
        bail!(
            "{} posts have invalid front matter: {}",
            failed.len(),
            failed.join(", ")
        );
    }

    sort_posts(&mut posts);
    Ok(posts)
}

/// Orders posts newest first, then by slug.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.meta
            .date
            .cmp(&a.meta.date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
