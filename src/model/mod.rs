//! Structured document model shared by the parser, resolver and indexers.
//!
//! All values here are build artifacts: created from scratch on every compile,
//! never mutated after the pass that produced them.

mod block;
mod document;

pub use block::{ContentBlock, Inline, List, ListItem, TextNode, plain_text};
pub use document::{Category, CategoryMeta, Document, EXTRA_KEYS, FrontMatter, Section};
