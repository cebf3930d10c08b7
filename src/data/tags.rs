//! Tag index: tag name → documents carrying it.

use crate::model::{Category, Document};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One tag with every document that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub count: usize,
    pub items: Vec<TaggedItem>,
}

/// A document reference within a tag entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem {
    pub id: String,
    pub title: String,
    pub category: Category,
}

/// Build the tag index from documents in corpus order.
///
/// Entries are sorted by count descending, then by name. Items keep the order
/// the documents were given in. A tag repeated within one document counts once.
pub fn build_tag_index<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Vec<TagEntry> {
    let mut entries: Vec<TagEntry> = Vec::new();
    let mut slots: FxHashMap<&'a str, usize> = FxHashMap::default();

    for doc in docs {
        for (i, tag) in doc.tags().iter().enumerate() {
            if tag.is_empty() || doc.tags()[..i].contains(tag) {
                continue;
            }
            let slot = *slots.entry(tag.as_str()).or_insert_with(|| {
                entries.push(TagEntry {
                    name: tag.clone(),
                    count: 0,
                    items: Vec::new(),
                });
                entries.len() - 1
            });
            let entry = &mut entries[slot];
            entry.count += 1;
            entry.items.push(TaggedItem {
                id: doc.id.clone(),
                title: doc.title().to_owned(),
                category: doc.category,
            });
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryMeta, FrontMatter};

    fn doc(id: &str, category: Category, tags: &[&str]) -> Document {
        Document {
            id: id.into(),
            category,
            front_matter: FrontMatter {
                title: id.to_uppercase(),
                tags: tags.iter().map(|t| (*t).to_owned()).collect(),
                ..FrontMatter::default()
            },
            meta: CategoryMeta::narrow(category, &FrontMatter::default()),
            content: vec![],
            snippet_refs: vec![],
            unresolved_refs: vec![],
            sections: None,
        }
    }

    #[test]
    fn test_counts_and_order() {
        let docs = [
            doc("a", Category::Article, &["x", "y"]),
            doc("b", Category::Snippet, &["x"]),
        ];
        let index = build_tag_index(&docs);

        let names: Vec<(&str, usize)> = index.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(names, [("x", 2), ("y", 1)]);
        assert_eq!(
            index[0].items,
            [
                TaggedItem {
                    id: "a".into(),
                    title: "A".into(),
                    category: Category::Article
                },
                TaggedItem {
                    id: "b".into(),
                    title: "B".into(),
                    category: Category::Snippet
                },
            ]
        );
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let docs = [
            doc("a", Category::Article, &["zeta", "alpha"]),
            doc("b", Category::Project, &["mid"]),
        ];
        let names: Vec<String> = build_tag_index(&docs).into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_duplicate_tag_in_one_document() {
        let docs = [doc("a", Category::Article, &["x", "x", ""])];
        let index = build_tag_index(&docs);
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].count, 1);
        assert_eq!(index[0].items.len(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let docs = [doc("a", Category::Book, &["x"])];
        let json = serde_json::to_value(build_tag_index(&docs)).unwrap();
        assert_eq!(json[0]["name"], "x");
        assert_eq!(json[0]["count"], 1);
        assert_eq!(json[0]["items"][0]["category"], "book");
    }
}
