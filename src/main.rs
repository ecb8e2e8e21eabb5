use anyhow::{Context, Result};
use quillpost::{Config, Highlighter, MarkdownRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes log output on stderr.
///
/// `--verbose` enables info level; otherwise `RUST_LOG` applies, falling
/// back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate().context("Invalid configuration")?;

    let posts = quillpost::load_posts(&config.content).context("Failed to load posts")?;
    info!(count = posts.len(), content = %config.content.display(), "Loaded posts");

    // Leaked once: syntect class styles borrow the prefix for 'static.
    let class_prefix: &'static str = Box::leak(config.class_prefix.clone().into_boxed_str());
    let highlighter = Highlighter::new(class_prefix);
    let stylesheet = highlighter
        .stylesheet(&config.theme)
        .with_context(|| format!("Failed to build stylesheet for theme {}", config.theme))?;
    let renderer = MarkdownRenderer::with_highlighter(highlighter);

    let report = quillpost::render_posts(&renderer, posts);

    // Nothing is written unless every post rendered.
    report.ensure_success()?;

    let written = quillpost::write_site(&report, &config.output, &stylesheet)
        .context("Failed to write site output")?;

    info!(
        posts = written,
        output = %config.output.display(),
        "Build complete"
    );

    Ok(())
}
