//! Line-oriented body parser.
//!
//! One explicit state: scanning prose, or inside a directive. At each line,
//! in priority order:
//!
//! 1. directive marker: flush prose, open a capture
//! 2. inside a directive: capture blank/indented lines, otherwise close and
//!    re-process the line
//! 3. open display math: a `$$` without its closing pair keeps the
//!    paragraph going, blank lines included
//! 4. heading: text line plus a `=`, `-` or `~` underline (two lines)
//! 5. list: a run of marker lines, nested by indentation
//! 6. prose: accumulated into the current paragraph
//!
//! Every branch consumes at least one line, so parsing always terminates.

use super::directive::Directive;
use super::inline::{opens_display_math, parse_inline};
use super::list::{is_list_line, parse_list};
use crate::model::{ContentBlock, TextNode};
use crate::utils::slug::heading_anchor;

/// Blocks and snippet references parsed from a document body.
#[derive(Debug, Default)]
pub struct Body {
    pub blocks: Vec<ContentBlock>,
    pub snippet_refs: Vec<String>,
}

/// Parse body lines. `title` enables duplicate-title heading suppression.
pub fn parse_body(lines: &[&str], title: Option<&str>) -> Body {
    let mut parser = BodyParser {
        lines,
        title,
        seen_heading: false,
        body: Body::default(),
        prose: Vec::new(),
        paragraph: Vec::new(),
        directive: None,
    };
    parser.run();
    parser.body
}

struct BodyParser<'a> {
    lines: &'a [&'a str],
    title: Option<&'a str>,
    seen_heading: bool,
    body: Body,
    /// Prose nodes of the current `Text` block.
    prose: Vec<TextNode>,
    /// Lines of the paragraph being accumulated.
    paragraph: Vec<&'a str>,
    directive: Option<Directive<'a>>,
}

impl<'a> BodyParser<'a> {
    fn run(&mut self) {
        let mut i = 0;
        while let Some(&line) = self.lines.get(i) {
            i = self.step(i, line);
        }
        self.close_directive();
        self.flush_prose();
    }

    /// Handle the line at `i`, returning the next line index.
    fn step(&mut self, i: usize, line: &'a str) -> usize {
        if let Some(directive) = Directive::open(line) {
            self.flush_prose();
            self.close_directive();
            if let Some(id) = directive.snippet_id() {
                self.body.snippet_refs.push(id.to_owned());
            }
            self.directive = Some(directive);
            return i + 1;
        }

        if let Some(directive) = self.directive.as_mut() {
            if Directive::accepts(line) {
                directive.push(line);
                return i + 1;
            }
            // Re-process this line in scanning mode.
            self.close_directive();
            return i;
        }

        // An open `$$` keeps everything up to its closing pair in one paragraph.
        if self.in_display_math() {
            self.paragraph.push(line);
            return i + 1;
        }

        if line.trim().is_empty() {
            self.flush_paragraph();
            return i + 1;
        }

        // A line opening `$$` is prose, never heading text or a list item.
        if opens_display_math(line) && !is_list_line(line) {
            self.paragraph.push(line);
            return i + 1;
        }

        if let Some(level) = self.lines.get(i + 1).and_then(|u| underline_level(u)) {
            self.flush_paragraph();
            self.heading(line.trim(), level);
            return i + 2;
        }

        if is_list_line(line) {
            self.flush_paragraph();
            let (list, next) = parse_list(self.lines, i);
            self.prose.push(TextNode::List(list));
            return next;
        }

        self.paragraph.push(line);
        i + 1
    }

    fn heading(&mut self, text: &str, level: u8) {
        let first = !std::mem::replace(&mut self.seen_heading, true);
        if first && self.title == Some(text) {
            return;
        }
        self.prose.push(TextNode::Heading {
            level,
            text: parse_inline(text),
            anchor: heading_anchor(text),
        });
    }

    fn in_display_math(&self) -> bool {
        !self.paragraph.is_empty() && opens_display_math(&self.paragraph.join("\n"))
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join("\n");
        self.paragraph.clear();
        let text = joined.trim();
        if !text.is_empty() {
            self.prose.push(TextNode::Paragraph {
                text: parse_inline(text),
            });
        }
    }

    fn flush_prose(&mut self) {
        self.flush_paragraph();
        if !self.prose.is_empty() {
            self.body.blocks.push(ContentBlock::Text {
                body: std::mem::take(&mut self.prose),
            });
        }
    }

    fn close_directive(&mut self) {
        if let Some(directive) = self.directive.take() {
            self.body.blocks.push(directive.close());
        }
    }
}

/// Heading level for an underline line, if it is one.
fn underline_level(line: &str) -> Option<u8> {
    let line = line.trim();
    let first = line.chars().next()?;
    let level = match first {
        '=' => 2,
        '-' => 3,
        '~' => 4,
        _ => return None,
    };
    line.chars().all(|c| c == first).then_some(level)
}
