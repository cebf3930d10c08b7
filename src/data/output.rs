//! Artifact writer.
//!
//! ```text
//! <output>/
//! ├── articles-index.json        { items, total }   (one per category)
//! ├── content-chunks/
//! │   └── articles-chunk-1.json  [Document; ≤ chunk_size]
//! ├── tags.json                  [TagEntry]
//! ├── search-index.json          [SearchDocument]
//! └── recent.json                { <category>: [RecentItem] }
//! ```

use super::{recent, search, tags};
use crate::compiler::{CompileError, Corpus};
use crate::config::{PathResolver, SiteConfig};
use crate::log;
use crate::model::{Category, Document};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const TAGS_FILE: &str = "tags.json";
pub const SEARCH_FILE: &str = "search-index.json";
pub const RECENT_FILE: &str = "recent.json";

#[derive(Serialize)]
struct CategoryIndex<'a> {
    items: &'a [Document],
    total: usize,
}

/// Write every artifact for `corpus`. Returns the number of files written.
pub fn write_artifacts(corpus: &Corpus, config: &SiteConfig) -> Result<usize, CompileError> {
    let paths = config.paths();
    let build = &config.build;
    prepare_output(&paths, build.clean)?;

    let writer = JsonWriter {
        pretty: build.pretty,
    };
    let mut written = 0;

    for (category, docs) in corpus.categories() {
        let index = CategoryIndex {
            items: docs,
            total: docs.len(),
        };
        writer.write(&paths.index_file(category), &index)?;
        written += 1;

        let mut chunks = 0;
        for (i, chunk) in docs.chunks(build.chunk_size.max(1)).enumerate() {
            writer.write(&paths.chunk_file(category, i + 1), chunk)?;
            chunks += 1;
        }
        written += chunks;
        remove_stale_chunks(&paths, category, chunks)?;
        log!("write"; "{}-index.json ({} items, {} chunks)", category.dir(), docs.len(), chunks);
    }

    let tag_index = tags::build_tag_index(corpus.documents());
    writer.write(&paths.artifact(TAGS_FILE), &tag_index)?;
    log!("write"; "{} ({} tags)", TAGS_FILE, tag_index.len());

    let search_index = search::build_search_index(corpus.documents(), &paths);
    writer.write(&paths.artifact(SEARCH_FILE), &search_index)?;
    log!("write"; "{} ({} documents)", SEARCH_FILE, search_index.len());

    let recent_index = recent::build_recent_index(corpus, build.recent.limit);
    writer.write(&paths.artifact(RECENT_FILE), &recent_index)?;
    log!("write"; "{}", RECENT_FILE);

    Ok(written + 3)
}

/// Create the output and chunk directories, wiping the output first if asked.
fn prepare_output(paths: &PathResolver<'_>, clean: bool) -> Result<(), CompileError> {
    let output = paths.output_dir();
    if clean && output.exists() {
        fs::remove_dir_all(output).map_err(|e| CompileError::write(output, e))?;
        log!("write"; "cleaned {}", output.display());
    }
    let chunks = paths.chunk_dir();
    fs::create_dir_all(&chunks).map_err(|e| CompileError::write(&chunks, e))
}

/// Remove chunk files numbered past `kept`, left over from a larger build.
fn remove_stale_chunks(paths: &PathResolver<'_>, category: Category, kept: usize) -> Result<(), CompileError> {
    let mut n = kept + 1;
    loop {
        let path = paths.chunk_file(category, n);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| CompileError::write(&path, e))?;
        n += 1;
    }
}

/// Read a previously written search index.
pub fn read_search_index(paths: &PathResolver<'_>) -> Result<Vec<search::SearchDocument>, CompileError> {
    let path = paths.artifact(SEARCH_FILE);
    let text = fs::read_to_string(&path).map_err(|e| CompileError::read(&path, e))?;
    serde_json::from_str(&text).map_err(|source| CompileError::Json { path, source })
}

struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), CompileError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|source| CompileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| CompileError::write(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_corpus;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read_json(path: PathBuf) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn site(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("content");
        config.build.output = dir.path().join("data");
        config
    }

    #[test]
    fn test_write_artifacts_layout() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        write_file(&content, "articles/a.rst", "---\ntitle: A\ntags: [x, y]\n---\nBody.\n");
        write_file(&content, "articles/b.rst", "---\ntitle: B\ntags: [x]\n---\nMore.\n");
        write_file(&content, "articles/c.rst", "---\ntitle: C\n---\nLast.\n");

        let mut config = site(&dir);
        config.build.chunk_size = 2;
        let corpus = compile_corpus(&config.build);
        let written = write_artifacts(&corpus, &config).unwrap();
        // 4 indexes, 2 article chunks, 3 shared artifacts
        assert_eq!(written, 9);

        let paths = config.paths();
        let index = read_json(paths.index_file(Category::Article));
        assert_eq!(index["total"], 3);
        assert_eq!(index["items"][0]["id"], "a");

        let chunk = read_json(paths.chunk_file(Category::Article, 2));
        assert_eq!(chunk.as_array().unwrap().len(), 1);
        assert!(!paths.chunk_file(Category::Article, 3).exists());

        let tags = read_json(paths.artifact(TAGS_FILE));
        assert_eq!(tags[0]["name"], "x");
        assert_eq!(tags[0]["count"], 2);

        let recent = read_json(paths.artifact(RECENT_FILE));
        assert_eq!(recent["articles"].as_array().unwrap().len(), 3);

        let search = read_search_index(&paths).unwrap();
        assert_eq!(search.len(), 3);
        assert_eq!(search[0].url, "/article/a");
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        write_file(&dir.path().join("data"), "stale.json", "{}");

        let mut config = site(&dir);
        config.build.clean = true;
        write_artifacts(&Corpus::default(), &config).unwrap();

        assert!(!dir.path().join("data/stale.json").exists());
        assert!(config.paths().artifact(SEARCH_FILE).exists());
    }

    #[test]
    fn test_smaller_rebuild_drops_surplus_chunks() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        for id in ["a", "b", "c"] {
            write_file(&content, &format!("articles/{id}.rst"), "Body.\n");
        }

        let mut config = site(&dir);
        config.build.chunk_size = 1;
        write_artifacts(&compile_corpus(&config.build), &config).unwrap();
        let paths = config.paths();
        assert!(paths.chunk_file(Category::Article, 3).exists());

        fs::remove_file(content.join("articles/c.rst")).unwrap();
        fs::remove_file(content.join("articles/b.rst")).unwrap();
        write_artifacts(&compile_corpus(&config.build), &config).unwrap();

        assert!(paths.chunk_file(Category::Article, 1).exists());
        assert!(!paths.chunk_file(Category::Article, 2).exists());
        assert!(!paths.chunk_file(Category::Article, 3).exists());
    }

    #[test]
    fn test_compact_output() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir);
        config.build.pretty = false;
        write_artifacts(&Corpus::default(), &config).unwrap();

        let text = fs::read_to_string(config.paths().artifact(TAGS_FILE)).unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn test_read_search_index_missing() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let err = read_search_index(&config.paths()).unwrap_err();
        assert!(matches!(err, CompileError::Read { .. }));
    }
}
