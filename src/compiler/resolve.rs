//! Snippet resolution: replace `snippet-ref` blocks with embedded snippets.
//!
//! Matching rules, tried in order over the whole snippet set before moving
//! to the next rule:
//!
//! | Rule | Reference `r` matches snippet `s` when                        |
//! |------|---------------------------------------------------------------|
//! | 1    | `r == s.id`                                                   |
//! | 2    | `r == s.snippet_id` (front matter)                            |
//! | 3    | `r == s.title`                                                |
//! | 4    | `r == title_slug(s.title)`                                    |
//! | 5    | `lower(s.title)` contains `r` with `-` → ` `, or vice versa   |
//!
//! Rule 5 is the only fuzzy rule and can be switched off. Within a rule the
//! first snippet in corpus order wins.

use crate::log;
use crate::model::{ContentBlock, Document, TextNode, plain_text};
use crate::utils::slug::{scoped_anchor, title_slug};

/// Which rule matched a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Id,
    SnippetId,
    Title,
    TitleSlug,
    Substring,
}

impl MatchRule {
    const EXACT: [Self; 4] = [Self::Id, Self::SnippetId, Self::Title, Self::TitleSlug];

    fn matches(self, reference: &str, snippet: &Document) -> bool {
        let title = snippet.title();
        match self {
            Self::Id => snippet.id == reference,
            Self::SnippetId => snippet.meta.snippet_id() == Some(reference),
            Self::Title => !title.is_empty() && title == reference,
            Self::TitleSlug => !title.is_empty() && title_slug(title) == reference,
            Self::Substring => {
                let title = title.to_lowercase();
                let term = reference.to_lowercase().replace('-', " ");
                !title.is_empty() && (title.contains(&term) || term.contains(&title))
            }
        }
    }
}

/// Resolves snippet references against a fixed snippet set.
pub struct Resolver<'a> {
    snippets: &'a [Document],
    fuzzy: bool,
}

impl<'a> Resolver<'a> {
    /// `snippets` should be in a stable order (sorted by id) so resolution
    /// is deterministic.
    pub const fn new(snippets: &'a [Document], fuzzy: bool) -> Self {
        Self { snippets, fuzzy }
    }

    /// Find the snippet a reference points at.
    pub fn find(&self, reference: &str) -> Option<(&'a Document, MatchRule)> {
        if reference.is_empty() {
            return None;
        }

        for rule in MatchRule::EXACT {
            if let Some(snippet) = self.snippets.iter().find(|s| rule.matches(reference, s)) {
                return Some((snippet, rule));
            }
        }

        if !self.fuzzy {
            return None;
        }
        let mut candidates = self
            .snippets
            .iter()
            .filter(|s| MatchRule::Substring.matches(reference, s));
        let first = candidates.next()?;
        let others: Vec<&str> = candidates.map(|s| s.id.as_str()).collect();
        if !others.is_empty() {
            log!(
                "resolve";
                "`{}` matches several snippets by title, using `{}` (also: {})",
                reference,
                first.id,
                others.join(", ")
            );
        }
        Some((first, MatchRule::Substring))
    }

    /// Replace every resolvable `snippet-ref` with an `embedded-snippet`.
    ///
    /// All other blocks pass through unchanged, and references that match no
    /// snippet stay as `snippet-ref`.
    pub fn resolve(&self, blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
        blocks
            .into_iter()
            .map(|block| match block {
                ContentBlock::SnippetRef { snippet_id } => match self.find(&snippet_id) {
                    Some((snippet, _)) => embed(snippet),
                    None => ContentBlock::SnippetRef { snippet_id },
                },
                other => other,
            })
            .collect()
    }
}

/// Resolve with fuzzy matching enabled.
#[cfg(test)]
pub fn resolve(blocks: Vec<ContentBlock>, snippets: &[Document]) -> Vec<ContentBlock> {
    Resolver::new(snippets, true).resolve(blocks)
}

/// Build the embedded form of a snippet, with heading anchors scoped to it.
fn embed(snippet: &Document) -> ContentBlock {
    ContentBlock::EmbeddedSnippet {
        snippet_id: snippet.id.clone(),
        title: snippet.front_matter.title_or(&snippet.id).to_owned(),
        body: snippet
            .content
            .iter()
            .cloned()
            .map(|block| rescope(block, &snippet.id))
            .collect(),
    }
}

fn rescope(block: ContentBlock, scope: &str) -> ContentBlock {
    match block {
        ContentBlock::Text { body } => ContentBlock::Text {
            body: body
                .into_iter()
                .map(|node| match node {
                    TextNode::Heading { level, text, .. } => TextNode::Heading {
                        anchor: scoped_anchor(scope, &plain_text(&text)),
                        level,
                        text,
                    },
                    other => other,
                })
                .collect(),
        },
        other => other,
    }
}
