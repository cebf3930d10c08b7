//! Content blocks produced by the parser.
//!
//! A document body is an ordered `Vec<ContentBlock>`. Prose runs between
//! directives become a single [`ContentBlock::Text`] holding structured
//! [`TextNode`]s; the renderer turns those into presentation markup.
//!
//! ```text
//! ContentBlock
//!   ├── Text { body: [TextNode] }
//!   │     ├── Heading { level, text: [Inline], anchor }
//!   │     ├── Paragraph { text: [Inline] }
//!   │     └── List { ordered, items: [ListItem { text, children }] }
//!   ├── CodeBlock { language, body }
//!   ├── SnippetRef { snippet_id }
//!   ├── EmbeddedSnippet { snippet_id, title, body: [ContentBlock] }
//!   └── TocTree { entries, targets }
//! ```

use serde::Serialize;

/// One block of a document body, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    /// A run of prose between directives.
    Text { body: Vec<TextNode> },

    /// `.. code-block:: lang` body with one directive indent removed.
    CodeBlock { language: String, body: String },

    /// `.. snippet-card:: id` that has not been resolved.
    SnippetRef { snippet_id: String },

    /// A snippet spliced into its host document.
    EmbeddedSnippet {
        snippet_id: String,
        title: String,
        body: Vec<ContentBlock>,
    },

    /// `.. toctree::` display labels and the raw section ids they came from.
    #[serde(rename = "toctree")]
    TocTree {
        entries: Vec<String>,
        targets: Vec<String>,
    },
}

impl ContentBlock {
    /// Snippet id for `SnippetRef` blocks.
    pub fn snippet_ref(&self) -> Option<&str> {
        match self {
            Self::SnippetRef { snippet_id } => Some(snippet_id),
            _ => None,
        }
    }
}

/// Structured prose inside a [`ContentBlock::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TextNode {
    Heading {
        /// 2 for `=`, 3 for `-`, 4 for `~`.
        level: u8,
        text: Vec<Inline>,
        anchor: String,
    },
    Paragraph {
        text: Vec<Inline>,
    },
    List(List),
}

/// A (possibly nested) bullet or numbered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<List>,
}

/// Inline span inside headings, paragraphs and list items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
    Code(String),
    /// Interior of a `$...$` or `$$...$$` span, byte-for-byte as authored.
    Math { display: bool, tex: String },
}

impl Inline {
    /// Plain text of this span. Math keeps its delimiters.
    pub fn plain(&self) -> String {
        match self {
            Self::Text(s) | Self::Strong(s) | Self::Emphasis(s) | Self::Code(s) => s.clone(),
            Self::Math { display: true, tex } => format!("$${tex}$$"),
            Self::Math { display: false, tex } => format!("${tex}$"),
        }
    }
}

/// Concatenate the plain text of a run of inlines.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain).collect()
}
