//! Book compilation.
//!
//! ```text
//! books/
//! └── guide/                  → Document { id: "guide", sections }
//!     ├── index.rst           → section "index" (required)
//!     ├── basics.rst          → section "basics"
//!     └── advanced.rst        → section "advanced"
//! ```
//!
//! Sections are not resolved against snippets, so their references stay in
//! `unresolved_refs` of the book.

use super::{CompileError, compile_source};
use crate::config::BuildConfig;
use crate::log;
use crate::model::{Category, Document, Section};
use crate::parser;
use crate::utils::slug::title_case_id;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_STEM: &str = "index";

/// Compile every book folder under `<root>/books/`, sorted by id.
pub fn compile_books(root: &Path, build: &BuildConfig) -> Vec<Document> {
    let dir = root.join(Category::Book.dir());
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut folders: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();

    let mut books: Vec<Document> = folders
        .par_iter()
        .filter_map(|folder| match compile_book(folder, build) {
            Ok(book) => Some(book),
            Err(e @ CompileError::MissingIndex(_)) => {
                log!("warn"; "{e}, skipping");
                None
            }
            Err(e) => {
                log!("error"; "{:#}", anyhow::Error::new(e));
                None
            }
        })
        .collect();

    books.sort_by(|a, b| a.id.cmp(&b.id));
    books
}

/// Compile one book folder. The index file is required, section files that
/// fail to read are logged and left out.
fn compile_book(folder: &Path, build: &BuildConfig) -> Result<Document, CompileError> {
    let id = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (index_path, section_paths) = book_files(folder, build)?;
    let text = fs::read_to_string(&index_path).map_err(|e| CompileError::read(&index_path, e))?;

    let mut book = compile_source(id, Category::Book, &text, None);
    if book.front_matter.title.is_empty() {
        book.front_matter.title = title_case_id(&book.id);
    }

    let mut sections = vec![Section {
        id: INDEX_STEM.to_owned(),
        title: book.front_matter.title.clone(),
        content: book.content.clone(),
    }];

    for path in &section_paths {
        match compile_section(path) {
            Ok((section, refs)) => {
                book.snippet_refs.extend(refs);
                sections.push(section);
            }
            Err(e) => log!("error"; "{:#}", anyhow::Error::new(e)),
        }
    }

    book.sections = Some(sections);
    book.refresh_unresolved();
    Ok(book)
}

/// Index file and the sorted sibling section files of a book folder.
fn book_files(folder: &Path, build: &BuildConfig) -> Result<(PathBuf, Vec<PathBuf>), CompileError> {
    let entries = fs::read_dir(folder).map_err(|e| CompileError::read(folder, e))?;

    let mut index = None;
    let mut sections = Vec::new();
    for path in entries.filter_map(Result::ok).map(|e| e.path()) {
        let is_source = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| build.is_source_ext(ext));
        if !is_source {
            continue;
        }
        if path.file_stem().is_some_and(|s| s == INDEX_STEM) {
            index = Some(path);
        } else {
            sections.push(path);
        }
    }
    sections.sort();

    let index = index.ok_or_else(|| CompileError::MissingIndex(folder.to_path_buf()))?;
    Ok((index, sections))
}

fn compile_section(path: &Path) -> Result<(Section, Vec<String>), CompileError> {
    let text = fs::read_to_string(path).map_err(|e| CompileError::read(path, e))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let parsed = parser::parse(&text);
    let title = parsed.front_matter.title_or(&stem).to_owned();
    let section = Section {
        id: stem,
        title,
        content: parsed.blocks,
    };
    Ok((section, parsed.snippet_refs))
}
