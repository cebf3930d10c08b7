//! Recent-items index: the newest documents of each category.

use crate::compiler::Corpus;
use crate::model::{Category, Document};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Recent items keyed by category directory name (`articles`, ...).
pub type RecentIndex = BTreeMap<String, Vec<RecentItem>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub category: Category,
}

impl From<&Document> for RecentItem {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title().to_owned(),
            date: doc.front_matter.date.clone(),
            tags: doc.tags().to_vec(),
            category: doc.category,
        }
    }
}

/// Newest `limit` documents per category.
pub fn build_recent_index(corpus: &Corpus, limit: usize) -> RecentIndex {
    corpus
        .categories()
        .map(|(category, docs)| (category.dir().to_owned(), newest(docs, limit)))
        .collect()
}

fn newest(docs: &[Document], limit: usize) -> Vec<RecentItem> {
    let mut dated: Vec<(Option<NaiveDate>, &Document)> = docs
        .iter()
        .map(|doc| (parse_date(&doc.front_matter.date), doc))
        .collect();
    dated.sort_by(|(a_date, a), (b_date, b)| compare_by_date(*a_date, *b_date, a.title(), b.title()));
    dated
        .into_iter()
        .take(limit)
        .map(|(_, doc)| RecentItem::from(doc))
        .collect()
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Newest first. Undated items go last, ties are broken by title.
fn compare_by_date(a_date: Option<NaiveDate>, b_date: Option<NaiveDate>, a_title: &str, b_title: &str) -> Ordering {
    let by_date = match (a_date, b_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a_title.cmp(b_title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryMeta, FrontMatter};

    fn doc(id: &str, date: &str) -> Document {
        Document {
            id: id.into(),
            category: Category::Article,
            front_matter: FrontMatter {
                title: id.into(),
                date: date.into(),
                ..FrontMatter::default()
            },
            meta: CategoryMeta::Article {},
            content: vec![],
            snippet_refs: vec![],
            unresolved_refs: vec![],
            sections: None,
        }
    }

    fn ids(items: &[RecentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_newest_first_undated_last() {
        let docs = [
            doc("old", "2020-01-01"),
            doc("none", ""),
            doc("bad", "someday"),
            doc("new", "2024-03-01"),
            doc("mid", "2022-06-15"),
        ];
        assert_eq!(ids(&newest(&docs, 10)), ["new", "mid", "old", "bad", "none"]);
    }

    #[test]
    fn test_same_date_sorted_by_title() {
        let docs = [doc("b", "2024-01-01"), doc("a", "2024-01-01")];
        assert_eq!(ids(&newest(&docs, 10)), ["a", "b"]);
    }

    #[test]
    fn test_limit_per_category() {
        let corpus = Corpus {
            articles: (1..=7).map(|d| doc(&format!("a{d}"), &format!("2024-01-0{d}"))).collect(),
            ..Corpus::default()
        };
        let index = build_recent_index(&corpus, 5);
        assert_eq!(ids(&index["articles"]), ["a7", "a6", "a5", "a4", "a3"]);
        assert!(index["books"].is_empty());
        assert_eq!(index.len(), 4);
    }
}
