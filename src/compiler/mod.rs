//! Corpus compilation: content tree → resolved documents per category.
//!
//! - **category**: Flat categories (articles, snippets, projects)
//! - **book**: One document per book folder, with sections
//! - **resolve**: Snippet reference resolution for articles
//!
//! # Compile Flow
//!
//! ```text
//! snippets ──► Resolver ──┬──► articles (resolved)
//!   (barrier)             ├──► projects
//!                         └──► books ──► sections
//! ```
//!
//! Every file is compiled independently. A file that cannot be read is
//! logged and skipped; it never aborts the compile.

mod book;
mod category;
mod error;
pub mod resolve;

pub use book::compile_books;
pub use category::{compile_category, compile_source};
pub use error::CompileError;

use crate::config::BuildConfig;
use crate::log;
use crate::model::{Category, Document};
use resolve::Resolver;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// Corpus
// ============================================================================

/// All compiled documents, each category sorted by id.
#[derive(Debug, Default)]
pub struct Corpus {
    pub articles: Vec<Document>,
    pub snippets: Vec<Document>,
    pub projects: Vec<Document>,
    pub books: Vec<Document>,
}

impl Corpus {
    pub fn category(&self, category: Category) -> &[Document] {
        match category {
            Category::Article => &self.articles,
            Category::Snippet => &self.snippets,
            Category::Project => &self.projects,
            Category::Book => &self.books,
        }
    }

    /// Categories in output order with their documents.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[Document])> {
        Category::ALL.into_iter().map(|c| (c, self.category(c)))
    }

    /// Every document, category by category.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.categories().flat_map(|(_, docs)| docs)
    }

    pub fn len(&self) -> usize {
        self.categories().map(|(_, docs)| docs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compile the whole content tree.
///
/// Snippets are compiled first since article resolution needs the complete
/// snippet set. The remaining categories then compile in parallel.
pub fn compile_corpus(build: &BuildConfig) -> Corpus {
    let root = &build.content;
    let snippets = compile_category(root, Category::Snippet, build, None);
    let resolver = Resolver::new(&snippets, build.resolve.fuzzy);

    let (articles, (projects, books)) = rayon::join(
        || compile_category(root, Category::Article, build, Some(&resolver)),
        || {
            rayon::join(
                || compile_category(root, Category::Project, build, None),
                || compile_books(root, build),
            )
        },
    );

    let corpus = Corpus {
        articles,
        snippets,
        projects,
        books,
    };
    for (category, docs) in corpus.categories() {
        log!("compile"; "{} {}", docs.len(), category.dir());
    }
    corpus
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Source files under `dir`, sorted by path.
pub fn source_files(dir: &Path, build: &BuildConfig) -> Vec<PathBuf> {
    let mut files: Vec<_> = collect_all_files(dir)
        .into_iter()
        .filter(|p| is_source(p, build))
        .collect();
    files.sort();
    files
}

fn is_source(path: &Path, build: &BuildConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| build.is_source_ext(ext))
}

/// Document id from a path relative to its category root.
///
/// Components are joined with `-` and the extension is dropped:
/// `articles/dsp/fft.rst` → `dsp-fft`.
pub fn document_id(category_dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(category_dir).unwrap_or(path);
    let rel = rel.with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("-")
}
