//! Full-text search index and the substring query over it.
//!
//! The index is a flat list of [`SearchDocument`]s, one per source document,
//! with the readable text of its content flattened into a single string.
//! Code blocks and unresolved snippet references carry no prose and are left
//! out.

use crate::config::PathResolver;
use crate::model::{Category, ContentBlock, Document, List, TextNode, plain_text};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Title used when a document has none.
pub const UNTITLED: &str = "Untitled";

/// Residual markup tags in flattened text.
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// One entry of `search-index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: String,
    pub url: String,
}

impl SearchDocument {
    pub fn new(doc: &Document, paths: &PathResolver<'_>) -> Self {
        let date = if doc.front_matter.date.is_empty() {
            today()
        } else {
            doc.front_matter.date.clone()
        };
        Self {
            id: doc.id.clone(),
            category: doc.category,
            title: doc.front_matter.title_or(UNTITLED).to_owned(),
            content: flatten(doc),
            tags: doc.tags().to_vec(),
            date,
            url: paths.url_for_document(doc.category, &doc.id),
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Build the search index in corpus order.
pub fn build_search_index<'a>(
    docs: impl IntoIterator<Item = &'a Document>,
    paths: &PathResolver<'_>,
) -> Vec<SearchDocument> {
    docs.into_iter()
        .map(|doc| SearchDocument::new(doc, paths))
        .collect()
}

// ============================================================================
// Flattening
// ============================================================================

/// Readable text of a document, whitespace-normalized and stripped of tags.
///
/// Books are flattened section by section, section titles included.
pub fn flatten(doc: &Document) -> String {
    let mut parts = Vec::new();
    match &doc.sections {
        Some(sections) => {
            for section in sections {
                parts.push(section.title.clone());
                collect_blocks(&section.content, &mut parts);
            }
        }
        None => collect_blocks(&doc.content, &mut parts),
    }

    let joined = parts.join(" ");
    let stripped = MARKUP_TAG.replace_all(&joined, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_blocks(blocks: &[ContentBlock], parts: &mut Vec<String>) {
    for block in blocks {
        match block {
            ContentBlock::Text { body } => {
                for node in body {
                    match node {
                        TextNode::Heading { text, .. } | TextNode::Paragraph { text } => {
                            parts.push(plain_text(text));
                        }
                        TextNode::List(list) => collect_list(list, parts),
                    }
                }
            }
            ContentBlock::EmbeddedSnippet { title, body, .. } => {
                parts.push(title.clone());
                collect_blocks(body, parts);
            }
            ContentBlock::TocTree { entries, .. } => parts.extend(entries.iter().cloned()),
            ContentBlock::CodeBlock { .. } | ContentBlock::SnippetRef { .. } => {}
        }
    }
}

fn collect_list(list: &List, parts: &mut Vec<String>) {
    for item in &list.items {
        parts.push(plain_text(&item.text));
        if let Some(children) = &item.children {
            collect_list(children, parts);
        }
    }
}

// ============================================================================
// Query
// ============================================================================

const TITLE_SCORE: u32 = 10;
const TAG_SCORE: u32 = 5;
const CONTENT_SCORE: u32 = 1;

/// A scored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub score: u32,
    pub doc: &'a SearchDocument,
}

/// Case-insensitive term search.
///
/// Every whitespace-separated term scores independently against the title,
/// tags and content. Documents scoring zero are dropped; the rest are ordered
/// by score, then by date, both descending.
pub fn query<'a>(
    docs: &'a [SearchDocument],
    query: &str,
    category: Option<Category>,
    limit: usize,
) -> Vec<SearchHit<'a>> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = docs
        .iter()
        .filter(|doc| category.is_none_or(|c| doc.category == c))
        .map(|doc| SearchHit {
            score: score(doc, &terms),
            doc,
        })
        .filter(|hit| hit.score > 0)
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.doc.date.cmp(&a.doc.date))
    });
    hits.truncate(limit);
    hits
}

fn score(doc: &SearchDocument, terms: &[String]) -> u32 {
    let title = doc.title.to_lowercase();
    let content = doc.content.to_lowercase();
    let tags: Vec<String> = doc.tags.iter().map(|t| t.to_lowercase()).collect();

    terms
        .iter()
        .map(|term| {
            let mut s = 0;
            if title.contains(term.as_str()) {
                s += TITLE_SCORE;
            }
            if tags.iter().any(|t| t.contains(term.as_str())) {
                s += TAG_SCORE;
            }
            if content.contains(term.as_str()) {
                s += CONTENT_SCORE;
            }
            s
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryMeta, FrontMatter, Inline, ListItem, Section};
    use std::path::Path;

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.into())]
    }

    fn doc(id: &str, title: &str, content: Vec<ContentBlock>) -> Document {
        Document {
            id: id.into(),
            category: Category::Article,
            front_matter: FrontMatter {
                title: title.into(),
                date: "2024-01-02".into(),
                ..FrontMatter::default()
            },
            meta: CategoryMeta::Article {},
            content,
            snippet_refs: vec![],
            unresolved_refs: vec![],
            sections: None,
        }
    }

    fn paths() -> PathResolver<'static> {
        PathResolver::new(Path::new("/data"), Path::new(""), None)
    }

    fn search_doc(id: &str, title: &str, tags: &[&str], content: &str, date: &str) -> SearchDocument {
        SearchDocument {
            id: id.into(),
            category: Category::Article,
            title: title.into(),
            content: content.into(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            date: date.into(),
            url: format!("/article/{id}"),
        }
    }

    #[test]
    fn test_flatten_skips_code_and_refs() {
        let d = doc(
            "a",
            "A",
            vec![
                ContentBlock::Text {
                    body: vec![
                        TextNode::Heading {
                            level: 2,
                            text: text("Intro"),
                            anchor: "heading-intro".into(),
                        },
                        TextNode::Paragraph {
                            text: vec![
                                Inline::Text("Hello ".into()),
                                Inline::Strong("<b>world</b>".into()),
                            ],
                        },
                        TextNode::List(List {
                            ordered: false,
                            items: vec![ListItem {
                                text: text("outer"),
                                children: Some(List {
                                    ordered: true,
                                    items: vec![ListItem {
                                        text: text("inner"),
                                        children: None,
                                    }],
                                }),
                            }],
                        }),
                    ],
                },
                ContentBlock::CodeBlock {
                    language: "rust".into(),
                    body: "fn hidden() {}\n".into(),
                },
                ContentBlock::SnippetRef {
                    snippet_id: "missing".into(),
                },
                ContentBlock::EmbeddedSnippet {
                    snippet_id: "s".into(),
                    title: "Snip".into(),
                    body: vec![ContentBlock::Text {
                        body: vec![TextNode::Paragraph { text: text("embedded\ntext") }],
                    }],
                },
                ContentBlock::TocTree {
                    entries: vec!["Getting Started".into()],
                    targets: vec!["getting-started".into()],
                },
            ],
        );
        assert_eq!(
            flatten(&d),
            "Intro Hello world outer inner Snip embedded text Getting Started"
        );
    }

    #[test]
    fn test_flatten_book_sections() {
        let mut d = doc("b", "B", vec![]);
        d.sections = Some(vec![
            Section {
                id: "index".into(),
                title: "B".into(),
                content: vec![ContentBlock::Text {
                    body: vec![TextNode::Paragraph { text: text("welcome") }],
                }],
            },
            Section {
                id: "one".into(),
                title: "One".into(),
                content: vec![],
            },
        ]);
        assert_eq!(flatten(&d), "B welcome One");
    }

    #[test]
    fn test_search_document_defaults() {
        let mut d = doc("a", "", vec![]);
        d.front_matter.date.clear();
        let entry = SearchDocument::new(&d, &paths());
        assert_eq!(entry.title, UNTITLED);
        assert_eq!(entry.date, today());
        assert_eq!(entry.url, "/article/a");
        assert_eq!(entry.content, "");
    }

    #[test]
    fn test_build_search_index_keeps_date() {
        let docs = [doc("a", "A", vec![])];
        let index = build_search_index(&docs, &paths());
        assert_eq!(index[0].date, "2024-01-02");
        assert_eq!(index[0].category, Category::Article);
    }

    #[test]
    fn test_query_scoring_and_order() {
        let docs = [
            search_doc("content", "Other", &[], "all about rust", "2024-01-01"),
            search_doc("title", "Rust Basics", &[], "", "2023-01-01"),
            search_doc("tag", "Misc", &["rust"], "", "2024-05-01"),
            search_doc("none", "Nothing", &[], "python", "2024-06-01"),
        ];
        let ids: Vec<(&str, u32)> = query(&docs, "RUST", None, 10)
            .iter()
            .map(|h| (h.doc.id.as_str(), h.score))
            .collect();
        assert_eq!(ids, [("title", 10), ("tag", 5), ("content", 1)]);
    }

    #[test]
    fn test_query_ties_newest_first_and_limit() {
        let docs = [
            search_doc("old", "Rust", &[], "", "2020-01-01"),
            search_doc("new", "Rust", &[], "", "2024-01-01"),
        ];
        let hits = query(&docs, "rust", None, 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc.id, "new");
    }

    #[test]
    fn test_query_terms_accumulate() {
        let docs = [search_doc("a", "Fast Fourier", &["dsp"], "transform", "2024-01-01")];
        let hits = query(&docs, "fast dsp transform", None, 10);
        assert_eq!(hits[0].score, 16);
    }

    #[test]
    fn test_query_category_filter_and_empty() {
        let mut snippet = search_doc("s", "Rust", &[], "", "2024-01-01");
        snippet.category = Category::Snippet;
        let docs = [search_doc("a", "Rust", &[], "", "2024-01-01"), snippet];

        let hits = query(&docs, "rust", Some(Category::Snippet), 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc.id, "s");
        assert!(query(&docs, "   ", None, 10).is_empty());
    }
}
