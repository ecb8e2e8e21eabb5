//! Post content body container

use maud::{Markup, PreEscaped, html};

use crate::content::Post;

/// Renders the content body container for a post
///
/// Wraps the rendered markdown body in an `article` element together with
/// the post heading. The body HTML is inserted verbatim: it already is HTML
/// and may carry hand-authored tags. Title, date, and author fields are
/// escaped.
///
/// # Arguments
///
/// * `post`: Post metadata
/// * `body_html`: Rendered markdown body
///
/// # Returns
///
/// Article markup ready for a page template
pub fn post_body(post: &Post, body_html: &str) -> Markup {
    let meta = &post.meta;
    html! {
        article class="post" data-slug=(post.slug) {
            header class="post-header" {
                time class="post-date" datetime=(meta.date) { (meta.date) }
                h1 class="post-title" { (meta.title) }
                @if let Some(author) = &meta.author {
                    div class="post-author" {
                        @if let Some(picture) = &author.picture {
                            img class="post-author-picture" src=(picture) alt="";
                        }
                        span class="post-author-name" { (author.name) }
                        @if let Some(handle) = &author.twitter {
                            a class="post-author-twitter" href=(format!("https://twitter.com/{}", handle)) target="_blank" {
                                "@" (handle)
                            }
                        }
                    }
                }
            }
            @if let Some(cover) = &meta.cover_image {
                figure class="post-cover" {
                    img src=(cover.url) alt=(format!("Cover Image for {}", meta.title));
                    @if let Some(credit) = &cover.credit {
                        figcaption {
                            a href=(credit.url) target="_blank" { (credit.name) }
                        }
                    }
                }
            }
            div class="post-content" {
                (PreEscaped(body_html))
            }
        }
    }
}
