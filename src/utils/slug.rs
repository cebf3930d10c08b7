//! Slugification for anchors, snippet matching and display labels.
//!
//! Three different normalizations live here because each one is part of an
//! output contract:
//!
//! | Function          | Input             | Output            |
//! |-------------------|-------------------|-------------------|
//! | [`anchor_slug`]   | `Héllo, World!`   | `hello-world`     |
//! | [`title_slug`]    | `Fast FFT (v2)`   | `fast-fft-v2-`    |
//! | [`title_case_id`] | `getting-started` | `Getting Started` |

use deunicode::deunicode;

// ============================================================================
// Anchors
// ============================================================================

/// Heading anchor slug: transliterated, lowercased, `[a-z0-9 -]` only,
/// whitespace runs joined with `-`.
pub fn anchor_slug(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let kept: String = ascii
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Anchor for a top-level heading.
pub fn heading_anchor(text: &str) -> String {
    format!("heading-{}", anchor_slug(text))
}

/// Anchor for a heading inside an embedded snippet.
pub fn scoped_anchor(scope: &str, text: &str) -> String {
    format!("{scope}-{}", anchor_slug(text))
}

// ============================================================================
// Snippet matching
// ============================================================================

/// Title slug used to match snippet references.
///
/// Lowercase, every run of characters outside `[a-z0-9]` collapsed into one
/// `-`. Leading and trailing separators are kept, so `"Fast FFT (v2)"`
/// becomes `"fast-fft-v2-"`.
pub fn title_slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push('-');
            in_gap = true;
        }
    }
    out
}

// ============================================================================
// Labels
// ============================================================================

/// `getting-started` → `Getting Started`.
///
/// Only the first character of each word is touched; the rest is kept.
pub fn title_case_id(id: &str) -> String {
    id.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
