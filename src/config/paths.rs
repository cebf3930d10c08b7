//! Centralized path resolution for artifact files and document URLs.
//!
//! # Architecture
//!
//! ```text
//! SiteConfig
//!     │
//!     └── paths() → PathResolver
//!                       │
//!                       ├── output_dir()            → /abs/data
//!                       ├── index_file(Article)     → /abs/data/articles-index.json
//!                       ├── chunk_file(Article, 2)  → /abs/data/content-chunks/articles-chunk-2.json
//!                       ├── artifact("tags.json")   → /abs/data/tags.json
//!                       └── url_for_document(..)    → https://site/prefix/article/hello
//! ```
//!
//! `path_prefix` only affects URLs; artifacts always land directly in the
//! output directory.

use crate::model::Category;
use std::path::{Path, PathBuf};

/// Directory under the output root holding chunk files.
pub const CHUNK_DIR: &str = "content-chunks";

/// Path resolver for artifact locations and canonical URLs.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    /// Artifact output directory
    output: &'a Path,
    /// Path prefix for subdirectory deployment
    prefix: &'a Path,
    /// Absolute site origin, if configured
    base_url: Option<&'a str>,
}

impl<'a> PathResolver<'a> {
    #[inline]
    pub const fn new(output: &'a Path, prefix: &'a Path, base_url: Option<&'a str>) -> Self {
        Self {
            output,
            prefix,
            base_url,
        }
    }

    #[inline]
    pub const fn output_dir(&self) -> &Path {
        self.output
    }

    #[inline]
    pub fn chunk_dir(&self) -> PathBuf {
        self.output.join(CHUNK_DIR)
    }

    /// `<output>/<category>-index.json`
    pub fn index_file(&self, category: Category) -> PathBuf {
        self.output.join(format!("{}-index.json", category.dir()))
    }

    /// `<output>/content-chunks/<category>-chunk-<n>.json`, `n` from 1.
    pub fn chunk_file(&self, category: Category, n: usize) -> PathBuf {
        self.chunk_dir()
            .join(format!("{}-chunk-{n}.json", category.dir()))
    }

    /// Top-level artifact such as `tags.json`.
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.output.join(name)
    }

    /// URL path for a site-relative path, with the prefix applied.
    ///
    /// ```ignore
    /// // With prefix "blog":
    /// paths.url_for_rel_path("article/hello") → "/blog/article/hello"
    /// ```
    pub fn url_for_rel_path<P: AsRef<Path>>(&self, rel_path: P) -> String {
        let joined = self.prefix.join(rel_path);
        let path_str = joined.to_string_lossy().replace('\\', "/");
        format!("/{path_str}")
    }

    /// Canonical URL of a document: `[base.url]/[prefix]/<category>/<id>`.
    pub fn url_for_document(&self, category: Category, id: &str) -> String {
        let path = self.url_for_rel_path(format!("{}/{id}", category.name()));
        match self.base_url {
            Some(base) => format!("{}{path}", base.trim_end_matches('/')),
            None => path,
        }
    }
}
