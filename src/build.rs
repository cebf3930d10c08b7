//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── compile_corpus()   ──► snippets, then articles/projects/books
//!     │
//!     └── write_artifacts()  ──► indexes, chunks, tags, search, recent
//! ```

use crate::{
    compiler::{Corpus, compile_corpus},
    config::SiteConfig,
    data::{self, search},
    log,
    model::Category,
};
use anyhow::{Context, Result, anyhow};

/// Compile the content tree and write every artifact.
pub fn build_site(config: &SiteConfig) -> Result<Corpus> {
    log!("compile"; "reading {}", config.build.content.display());
    let corpus = compile_corpus(&config.build);

    if corpus.is_empty() {
        log!("warn"; "no documents found, check [build.extensions]");
    }

    let written = data::write_artifacts(&corpus, config).with_context(|| {
        format!(
            "Failed to write artifacts to {}",
            config.build.output.display()
        )
    })?;
    log!("build"; "done, {} documents, {} files", corpus.len(), written);

    Ok(corpus)
}

/// Query the search index of a previous build and print the hits.
pub fn search_site(
    config: &SiteConfig,
    query: &str,
    category: Option<&str>,
    limit: usize,
) -> Result<()> {
    let category = category
        .map(|name| Category::from_name(name).ok_or_else(|| anyhow!("unknown category `{name}`")))
        .transpose()?;

    let docs = data::read_search_index(&config.paths())
        .context("Search index not available, run `peta build` first")?;
    let hits = search::query(&docs, query, category, limit);

    if hits.is_empty() {
        log!("search"; "no results for `{}`", query);
        return Ok(());
    }
    for hit in hits {
        println!(
            "{:>3}  {:<8} {}  {}",
            hit.score,
            hit.doc.category.name(),
            hit.doc.title,
            hit.doc.url
        );
    }
    Ok(())
}
