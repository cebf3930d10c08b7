//! Derived indices over the compiled corpus and the JSON artifacts they end
//! up in.
//!
//! # Architecture
//!
//! ```text
//! Corpus ──┬──► tags::build_tag_index       ──► tags.json
//!          ├──► search::build_search_index  ──► search-index.json
//!          ├──► recent::build_recent_index  ──► recent.json
//!          └──► per-category indexes/chunks ──► <category>-index.json, content-chunks/
//! ```
//!
//! All indices are rebuilt from scratch on every build and only read the
//! compiled documents.

mod output;
pub mod recent;
pub mod search;
pub mod tags;

pub use output::{RECENT_FILE, SEARCH_FILE, TAGS_FILE, read_search_index, write_artifacts};
