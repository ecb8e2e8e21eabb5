//! Reusable HTML components for post output
//!
//! Components wrap rendered markdown for embedding into page templates.
//! Rendered bodies are inserted unescaped; metadata text is escaped by maud.

pub mod post;
