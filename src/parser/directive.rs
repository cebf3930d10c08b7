//! Directive capture: `snippet-card`, `code-block` and `toctree`.
//!
//! A directive opens on a column-0 marker line and captures every following
//! line that is blank or indented by at least three spaces. The first other
//! line closes it and is handed back to the body parser.

use crate::model::ContentBlock;
use crate::utils::slug::title_case_id;

const SNIPPET_CARD: &str = ".. snippet-card::";
const CODE_BLOCK: &str = ".. code-block::";
const TOCTREE: &str = ".. toctree::";

/// Body indentation of a directive.
const INDENT: &str = "   ";

const DEFAULT_LANGUAGE: &str = "text";

/// Does `line` open one of the body directives?
pub fn is_directive_marker(line: &str) -> bool {
    [SNIPPET_CARD, CODE_BLOCK, TOCTREE]
        .iter()
        .any(|m| line.starts_with(m))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    SnippetCard { id: String },
    CodeBlock { language: String },
    TocTree,
}

/// An open directive and its captured body lines.
#[derive(Debug)]
pub struct Directive<'a> {
    kind: Kind,
    body: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    /// Open a directive if `line` is a marker.
    pub fn open(line: &str) -> Option<Self> {
        let kind = if let Some(arg) = line.strip_prefix(SNIPPET_CARD) {
            Kind::SnippetCard {
                id: arg.trim().to_owned(),
            }
        } else if let Some(arg) = line.strip_prefix(CODE_BLOCK) {
            let language = arg.trim();
            Kind::CodeBlock {
                language: if language.is_empty() {
                    DEFAULT_LANGUAGE.to_owned()
                } else {
                    language.to_owned()
                },
            }
        } else if line.starts_with(TOCTREE) {
            Kind::TocTree
        } else {
            return None;
        };
        Some(Self {
            kind,
            body: Vec::new(),
        })
    }

    /// Snippet id when this is a `snippet-card`.
    pub fn snippet_id(&self) -> Option<&str> {
        match &self.kind {
            Kind::SnippetCard { id } => Some(id),
            _ => None,
        }
    }

    /// Does `line` belong to the directive body?
    pub fn accepts(line: &str) -> bool {
        line.trim().is_empty() || line.starts_with(INDENT)
    }

    /// Capture a body line, one indent level removed.
    ///
    /// Snippet-card bodies are options, not content, and are dropped.
    pub fn push(&mut self, line: &'a str) {
        if matches!(self.kind, Kind::SnippetCard { .. }) {
            return;
        }
        self.body.push(line.strip_prefix(INDENT).unwrap_or(line));
    }

    /// Close the directive into its block.
    pub fn close(self) -> ContentBlock {
        match self.kind {
            Kind::SnippetCard { id } => ContentBlock::SnippetRef { snippet_id: id },
            Kind::CodeBlock { language } => ContentBlock::CodeBlock {
                language,
                body: code_body(&self.body),
            },
            Kind::TocTree => {
                let targets: Vec<String> = self
                    .body
                    .iter()
                    .map(|l| l.trim())
                    .filter(|l| is_toctree_target(l))
                    .map(str::to_owned)
                    .collect();
                ContentBlock::TocTree {
                    entries: targets.iter().map(|t| title_case_id(t)).collect(),
                    targets,
                }
            }
        }
    }
}

/// Drop leading blank lines and trailing whitespace; end with one newline.
fn code_body(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let body = lines[start..].join("\n");
    let body = body.trim_end();
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}

/// Section ids only: no options, spaces or quotes.
fn is_toctree_target(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(':')
        && !line.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}
