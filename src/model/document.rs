//! Compiled documents and their metadata.
//!
//! Front matter is parsed without knowing the category of the file, so the
//! parser keeps optional keys in [`FrontMatter::extra`]. The compiler narrows
//! them into a [`CategoryMeta`] variant once the category is known. Both are
//! flattened on serialization, so JSON keys match the on-disk field names.

use super::block::ContentBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Optional front-matter keys the parser collects besides the common ones.
pub const EXTRA_KEYS: &[&str] = &[
    "snippet_id",
    "github_url",
    "demo_url",
    "description",
    "cover_image",
];

// ============================================================================
// Category
// ============================================================================

/// Content category, one subtree of the content directory each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Article,
    Snippet,
    Project,
    Book,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Self; 4] = [Self::Article, Self::Snippet, Self::Project, Self::Book];

    /// Directory name under the content root, also used for index file names.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Snippet => "snippets",
            Self::Project => "projects",
            Self::Book => "books",
        }
    }

    /// Singular name, used in URLs and search results.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Snippet => "snippet",
            Self::Project => "project",
            Self::Book => "book",
        }
    }

    /// Parse either the singular or the directory form.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.dir() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Front matter
// ============================================================================

/// Fields common to every document, produced once per parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    /// ISO date as authored, empty when absent.
    pub date: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Category-specific keys, narrowed later by [`CategoryMeta::narrow`].
    #[serde(skip)]
    pub extra: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Title, or `fallback` when the document supplies none.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.title.is_empty() {
            fallback
        } else {
            &self.title
        }
    }

    fn extra(&self, key: &str) -> Option<String> {
        self.extra.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Category-specific front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryMeta {
    Article {},
    Snippet {
        #[serde(skip_serializing_if = "Option::is_none")]
        snippet_id: Option<String>,
    },
    Project {
        #[serde(skip_serializing_if = "Option::is_none")]
        github_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        demo_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Book {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cover_image: Option<String>,
    },
}

impl CategoryMeta {
    /// Keep only the optional keys that make sense for `category`.
    pub fn narrow(category: Category, fm: &FrontMatter) -> Self {
        match category {
            Category::Article => Self::Article {},
            Category::Snippet => Self::Snippet {
                snippet_id: fm.extra("snippet_id"),
            },
            Category::Project => Self::Project {
                github_url: fm.extra("github_url"),
                demo_url: fm.extra("demo_url"),
                description: fm.extra("description"),
            },
            Category::Book => Self::Book {
                description: fm.extra("description"),
                cover_image: fm.extra("cover_image"),
            },
        }
    }

    /// Explicit `snippet_id` field, only present on snippets.
    pub fn snippet_id(&self) -> Option<&str> {
        match self {
            Self::Snippet { snippet_id } => snippet_id.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A compiled source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Derived from the path relative to the category root.
    pub id: String,
    pub category: Category,
    #[serde(flatten)]
    pub front_matter: FrontMatter,
    #[serde(flatten)]
    pub meta: CategoryMeta,
    pub content: Vec<ContentBlock>,
    /// Every snippet id referenced in the source, in order.
    pub snippet_refs: Vec<String>,
    /// Ids still left as `snippet-ref` blocks after resolution.
    pub unresolved_refs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    pub fn tags(&self) -> &[String] {
        &self.front_matter.tags
    }

    /// Recompute `unresolved_refs` from the current content.
    ///
    /// A book's first section carries its content, so books are scanned
    /// section by section instead.
    pub fn refresh_unresolved(&mut self) {
        let blocks: Vec<&ContentBlock> = match &self.sections {
            Some(sections) => sections.iter().flat_map(|s| &s.content).collect(),
            None => self.content.iter().collect(),
        };
        self.unresolved_refs = blocks
            .into_iter()
            .filter_map(ContentBlock::snippet_ref)
            .map(str::to_owned)
            .collect();
    }
}

/// A book chapter, owned by its parent book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: Vec<ContentBlock>,
}
