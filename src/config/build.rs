//! `[build]` section configuration.
//!
//! Contains source/output paths, artifact settings and snippet resolution.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in peta.toml - compile pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"     # articles/, snippets/, projects/, books/
/// output = "data"         # JSON artifacts
/// extensions = ["rst"]
/// chunk_size = 1000
///
/// [build.resolve]
/// fuzzy = true
///
/// [build.recent]
/// limit = 5
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// URL path prefix for subdirectory deployment (e.g., "blog" → `/blog/...`).
    #[serde(default = "defaults::build::path_prefix")]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: PathBuf,

    /// Content source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Artifact output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Source file extensions, without the dot.
    #[serde(default = "defaults::build::extensions")]
    #[educe(Default = defaults::build::extensions())]
    pub extensions: Vec<String>,

    /// Documents per content chunk file.
    #[serde(default = "defaults::build::chunk_size")]
    #[educe(Default = defaults::build::chunk_size())]
    pub chunk_size: usize,

    /// Pretty-print JSON artifacts.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pretty: bool,

    /// Remove the output directory before writing.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Snippet resolution settings.
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Recent-items index settings.
    #[serde(default)]
    pub recent: RecentConfig,
}

impl BuildConfig {
    /// Does `ext` name a source file?
    pub fn is_source_ext(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.resolve]` section - snippet reference matching.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Allow title substring matches after the exact rules fail.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub fuzzy: bool,
}

/// `[build.recent]` section - `recent.json` generation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RecentConfig {
    /// Items kept per category.
    #[serde(default = "defaults::build::recent::limit")]
    #[educe(Default = defaults::build::recent::limit())]
    pub limit: usize,
}
