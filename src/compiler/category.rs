//! Flat category compilation: one document per source file.

use super::resolve::Resolver;
use super::{CompileError, document_id, source_files};
use crate::config::BuildConfig;
use crate::log;
use crate::model::{Category, CategoryMeta, Document};
use crate::parser;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Compile every source file under `<root>/<category>/`, sorted by id.
///
/// Only articles pass a resolver. Files that fail to read are logged and
/// left out.
pub fn compile_category(
    root: &Path,
    category: Category,
    build: &BuildConfig,
    resolver: Option<&Resolver<'_>>,
) -> Vec<Document> {
    let dir = root.join(category.dir());
    let files = source_files(&dir, build);

    let mut docs: Vec<Document> = files
        .par_iter()
        .filter_map(|path| {
            let id = document_id(&dir, path);
            match compile_file(path, id, category, resolver) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    log!("error"; "{:#}", anyhow::Error::new(e));
                    None
                }
            }
        })
        .collect();

    docs.sort_by(|a, b| a.id.cmp(&b.id));
    docs
}

fn compile_file(
    path: &Path,
    id: String,
    category: Category,
    resolver: Option<&Resolver<'_>>,
) -> Result<Document, CompileError> {
    let text = fs::read_to_string(path).map_err(|e| CompileError::read(path, e))?;
    Ok(compile_source(id, category, &text, resolver))
}

/// Compile one document from its source text.
pub fn compile_source(
    id: String,
    category: Category,
    text: &str,
    resolver: Option<&Resolver<'_>>,
) -> Document {
    let parsed = parser::parse(text);
    let meta = CategoryMeta::narrow(category, &parsed.front_matter);
    let content = match resolver {
        Some(resolver) => resolver.resolve(parsed.blocks),
        None => parsed.blocks,
    };

    let mut doc = Document {
        id,
        category,
        front_matter: parsed.front_matter,
        meta,
        content,
        snippet_refs: parsed.snippet_refs,
        unresolved_refs: Vec::new(),
        sections: None,
    };
    doc.refresh_unresolved();

    if resolver.is_some() && !doc.unresolved_refs.is_empty() {
        log!(
            "resolve";
            "{}/{}: unresolved {}",
            category.dir(),
            doc.id,
            doc.unresolved_refs.join(", ")
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::super::tests::{build_config, write};
    use super::*;
    use crate::model::ContentBlock;
    use tempfile::TempDir;

    #[test]
    fn test_compile_source_without_resolver() {
        let doc = compile_source(
            "s".into(),
            Category::Snippet,
            "---\ntitle: S\nsnippet_id: sid\ngithub_url: x\n---\n.. snippet-card:: other\n",
            None,
        );
        assert_eq!(doc.meta.snippet_id(), Some("sid"));
        assert_eq!(doc.snippet_refs, ["other"]);
        assert_eq!(doc.unresolved_refs, ["other"]);
        assert!(matches!(doc.content[0], ContentBlock::SnippetRef { .. }));
        assert!(doc.sections.is_none());
    }

    #[test]
    fn test_compile_source_with_resolver() {
        let snippets = vec![compile_source(
            "fft".into(),
            Category::Snippet,
            "---\ntitle: Fast Fourier Transform\n---\nBody.\n",
            None,
        )];
        let resolver = Resolver::new(&snippets, true);
        let doc = compile_source(
            "a".into(),
            Category::Article,
            ".. snippet-card:: fast-fourier-transform\n",
            Some(&resolver),
        );
        assert_eq!(doc.snippet_refs, ["fast-fourier-transform"]);
        assert!(doc.unresolved_refs.is_empty());
        assert!(matches!(
            &doc.content[0],
            ContentBlock::EmbeddedSnippet { title, .. } if title == "Fast Fourier Transform"
        ));
    }

    #[test]
    fn test_compile_category_nested_ids_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "articles/zeta.rst", "Z\n");
        write(root, "articles/dsp/fft.rst", "F\n");
        write(root, "articles/alpha.rst", "A\n");
        write(root, "articles/skip.txt", "X\n");

        let docs = compile_category(root, Category::Article, &build_config(root), None);
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["alpha", "dsp-fft", "zeta"]);
        assert!(docs.iter().all(|d| d.category == Category::Article));
    }

    #[test]
    fn test_compile_category_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "articles/good.rst", "ok\n");
        // Invalid UTF-8 fails `read_to_string`.
        std::fs::write(root.join("articles/bad.rst"), [0xff, 0xfe, 0x00]).unwrap();

        let docs = compile_category(root, Category::Article, &build_config(root), None);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "good");
    }

    #[test]
    fn test_compile_category_missing_dir() {
        let dir = TempDir::new().unwrap();
        let docs = compile_category(
            dir.path(),
            Category::Project,
            &build_config(dir.path()),
            None,
        );
        assert!(docs.is_empty());
    }
}
