//! Markup parser: raw document text → front matter + content blocks.
//!
//! ```text
//! text ─► lines ─► frontmatter::extract ─► Header { front_matter, body_start }
//!                                               │
//!                     body::parse_body ◄────────┘
//!                       ├── directive   (snippet-card, code-block, toctree)
//!                       ├── list        (nested bullet/numbered lists)
//!                       └── inline      (emphasis, code spans, math)
//! ```
//!
//! Parsing never fails. Anything unrecognized ends up as paragraph text.

mod body;
mod directive;
mod frontmatter;
mod inline;
mod list;

use crate::model::{ContentBlock, FrontMatter};

/// Caller-supplied parse settings.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Title used for duplicate-heading suppression. Defaults to the
    /// front-matter title.
    pub title: Option<String>,
}

/// Result of parsing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    pub blocks: Vec<ContentBlock>,
    /// Snippet ids in order of appearance, duplicates kept.
    pub snippet_refs: Vec<String>,
}

/// Parse with default options.
pub fn parse(text: &str) -> ParsedDocument {
    parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions) -> ParsedDocument {
    let lines: Vec<&str> = text.lines().collect();
    let header = frontmatter::extract(&lines);

    let title = options
        .title
        .as_deref()
        .or_else(|| Some(header.front_matter.title.as_str()).filter(|t| !t.is_empty()));
    let body = body::parse_body(&lines[header.body_start..], title);

    ParsedDocument {
        front_matter: header.front_matter,
        blocks: body.blocks,
        snippet_refs: body.snippet_refs,
    }
}
