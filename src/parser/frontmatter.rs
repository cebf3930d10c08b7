//! Front-matter extraction.
//!
//! Two header forms are accepted, tried in order:
//!
//! ```text
//! ---                          Title
//! title: "Hello"               =====
//! date: 2024-05-01
//! tags: [rust, "parsing"]      .. date:: 2024-05-01
//! ---                          .. tags:: rust, parsing
//!                              .. description:: first line
//!                                 continued line
//! ```
//!
//! The delimited form is only considered when the first non-blank line is
//! `---`. An unterminated delimited block falls back to the field form.

use super::directive::is_directive_marker;
use crate::model::{EXTRA_KEYS, FrontMatter};

const DELIMITER: &str = "---";
const CONTINUATION_INDENT: &str = "   ";

/// Parsed header and where the body begins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub front_matter: FrontMatter,
    /// Index of the first body line.
    pub body_start: usize,
}

/// Split the header off `lines`. Never fails: a document without a header
/// gets default front matter and a body starting at line 0.
pub fn extract(lines: &[&str]) -> Header {
    delimited(lines).unwrap_or_else(|| field_form(lines))
}

// ============================================================================
// Delimited form
// ============================================================================

fn delimited(lines: &[&str]) -> Option<Header> {
    let open = lines.iter().position(|l| !l.trim().is_empty())?;
    if lines[open].trim() != DELIMITER {
        return None;
    }
    let close = open
        + 1
        + lines[open + 1..]
            .iter()
            .position(|l| l.trim() == DELIMITER)?;

    let mut fm = FrontMatter::default();
    for line in &lines[open + 1..close] {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        set_field(&mut fm, key, unquote(value.trim()));
    }

    Some(Header {
        front_matter: fm,
        body_start: close + 1,
    })
}

// ============================================================================
// Field form
// ============================================================================

fn field_form(lines: &[&str]) -> Header {
    let mut fm = FrontMatter::default();
    let mut title: Option<String> = None;
    let mut last_field: Option<(String, String)> = None;
    let mut i = 0;

    while let Some(&line) = lines.get(i) {
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        if let Some((key, value)) = field_directive(line) {
            flush_field(&mut fm, last_field.take());
            last_field = Some((key.to_owned(), value.to_owned()));
            i += 1;
            continue;
        }

        if line.starts_with(CONTINUATION_INDENT)
            && let Some((_, value)) = last_field.as_mut()
        {
            value.push('\n');
            value.push_str(line.trim());
            i += 1;
            continue;
        }

        if title.is_none()
            && !line.starts_with('.')
            && !line.starts_with(' ')
            && lines.get(i + 1).is_some_and(|u| is_title_underline(u, line))
        {
            flush_field(&mut fm, last_field.take());
            title = Some(line.trim().to_owned());
            i += 2;
            continue;
        }

        break;
    }

    flush_field(&mut fm, last_field);
    if let Some(title) = title {
        fm.title = title;
    }
    Header {
        front_matter: fm,
        body_start: i,
    }
}

/// `.. key:: value` at column 0, excluding body directives.
fn field_directive(line: &str) -> Option<(&str, &str)> {
    if is_directive_marker(line) {
        return None;
    }
    let rest = line.strip_prefix(".. ")?;
    let (key, value) = rest.split_once("::")?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// A title underline is all `=` and at least as long as the title.
fn is_title_underline(underline: &str, title: &str) -> bool {
    let underline = underline.trim_end();
    !underline.is_empty()
        && underline.chars().all(|c| c == '=')
        && underline.chars().count() >= title.trim().chars().count()
}

fn flush_field(fm: &mut FrontMatter, field: Option<(String, String)>) {
    if let Some((key, value)) = field {
        set_field(fm, &key, &value);
    }
}

// ============================================================================
// Values
// ============================================================================

fn set_field(fm: &mut FrontMatter, key: &str, value: &str) {
    match key {
        "title" => fm.title = value.to_owned(),
        "date" => fm.date = value.to_owned(),
        "author" => fm.author = Some(value.to_owned()).filter(|a| !a.is_empty()),
        "tags" => fm.tags = parse_tags(value),
        k if EXTRA_KEYS.contains(&k) => {
            fm.extra.insert(k.to_owned(), value.to_owned());
        }
        _ => {}
    }
}

/// `[a, "b", 'c']` or `a, b, c`.
fn parse_tags(value: &str) -> Vec<String> {
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    value
        .split(',')
        .map(|tag| unquote(tag.trim()))
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}
