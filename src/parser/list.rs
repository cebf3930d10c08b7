//! Nested list builder.
//!
//! Lists are recognised per line by a `-`, `*` or `N.` marker followed by
//! whitespace. Nesting follows indentation:
//!
//! ```text
//! - a            level 0, indent 0
//!   - b          deeper → nested list under "a"
//!   - c
//! - d            back to indent 0
//! ```
//!
//! Each recursive call consumes at least one line, so recursion depth is
//! bounded by the number of lines.

use super::inline::parse_inline;
use crate::model::{List, ListItem};
use regex::Regex;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.|\*|-)\s").expect("valid list marker regex"));

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid ordered marker regex"));

/// Does this line start a list item?
pub fn is_list_line(line: &str) -> bool {
    LIST_MARKER.is_match(line.trim_start())
}

/// Build a list starting at `lines[start]`.
///
/// Returns the list and the index of the first line not consumed.
pub fn parse_list(lines: &[&str], start: usize) -> (List, usize) {
    let mut list = List {
        ordered: lines
            .get(start)
            .is_some_and(|line| ORDERED_MARKER.is_match(line.trim_start())),
        items: Vec::new(),
    };
    let mut i = start;
    let mut level_indent = None;

    while let Some(line) = lines.get(i).copied().filter(|l| is_list_line(l)) {
        let indent = indent_of(line);
        let level = *level_indent.get_or_insert(indent);

        if indent > level {
            let (nested, next) = parse_list(lines, i);
            attach_nested(&mut list, nested);
            i = next;
            continue;
        }
        if indent < level {
            break;
        }

        list.items.push(ListItem {
            text: parse_inline(item_text(line)),
            children: None,
        });
        i += 1;
    }

    (list, i)
}

/// Hang `nested` under the last item, merging with an existing child list.
fn attach_nested(list: &mut List, nested: List) {
    // The first line always sets the level, so a deeper line has a parent.
    let Some(parent) = list.items.last_mut() else {
        list.items.extend(nested.items);
        return;
    };
    match &mut parent.children {
        Some(children) => children.items.extend(nested.items),
        None => parent.children = Some(nested),
    }
}

/// Column of the first non-whitespace character.
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Item text without its marker.
fn item_text(line: &str) -> &str {
    let trimmed = line.trim_start();
    LIST_MARKER
        .find(trimmed)
        .map_or(trimmed, |m| &trimmed[m.end()..])
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inline, plain_text};

    fn texts(list: &List) -> Vec<String> {
        list.items.iter().map(|i| plain_text(&i.text)).collect()
    }

    #[test]
    fn test_is_list_line() {
        assert!(is_list_line("- item"));
        assert!(is_list_line("  * item"));
        assert!(is_list_line("12. item"));
        assert!(!is_list_line("-item"));
        assert!(!is_list_line("*emphasis* here"));
        assert!(!is_list_line("1.5 apples"));
        assert!(!is_list_line(""));
    }

    #[test]
    fn test_nested_list_round_trip() {
        let lines = ["- a", "  - b", "  - c", "- d"];
        let (list, next) = parse_list(&lines, 0);

        assert_eq!(next, 4);
        assert!(!list.ordered);
        assert_eq!(texts(&list), ["a", "d"]);

        let nested = list.items[0].children.as_ref().expect("a owns a nested list");
        assert_eq!(texts(nested), ["b", "c"]);
        assert!(list.items[1].children.is_none());
    }

    #[test]
    fn test_ordered_list() {
        let lines = ["1. first", "2. second"];
        let (list, next) = parse_list(&lines, 0);
        assert!(list.ordered);
        assert_eq!(next, 2);
        assert_eq!(texts(&list), ["first", "second"]);
    }

    #[test]
    fn test_nested_kind_decided_per_list() {
        let lines = ["- a", "   1. one", "   2. two", "- b"];
        let (list, _) = parse_list(&lines, 0);
        assert!(!list.ordered);
        let nested = list.items[0].children.as_ref().unwrap();
        assert!(nested.ordered);
    }

    #[test]
    fn test_dedent_ends_nested_level() {
        let lines = ["  - a", "    - b", "- c"];
        let (list, next) = parse_list(&lines, 0);
        // "- c" is shallower than the first item, so the whole list ends there.
        assert_eq!(next, 2);
        assert_eq!(texts(&list), ["a"]);
    }

    #[test]
    fn test_stops_at_non_list_line() {
        let lines = ["- a", "", "- b"];
        let (list, next) = parse_list(&lines, 0);
        assert_eq!(next, 1);
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn test_three_levels() {
        let lines = ["- a", "  - b", "    - c", "  - d", "- e"];
        let (list, next) = parse_list(&lines, 0);
        assert_eq!(next, 5);
        let b_level = list.items[0].children.as_ref().unwrap();
        assert_eq!(texts(b_level), ["b", "d"]);
        let c_level = b_level.items[0].children.as_ref().unwrap();
        assert_eq!(texts(c_level), ["c"]);
    }

    #[test]
    fn test_misaligned_nesting_merges_into_parent() {
        let lines = ["- a", "    - b", "  - c"];
        let (list, next) = parse_list(&lines, 0);
        assert_eq!(next, 3);
        assert_eq!(list.items.len(), 1);
        let nested = list.items[0].children.as_ref().unwrap();
        assert_eq!(texts(nested), ["b", "c"]);
    }

    #[test]
    fn test_item_inline_markup() {
        let lines = ["- **bold** item"];
        let (list, _) = parse_list(&lines, 0);
        assert_eq!(list.items[0].text[0], Inline::Strong("bold".into()));
    }
}
