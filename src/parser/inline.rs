//! Inline parsing for prose: emphasis, code spans and math.
//!
//! Two cursor passes: the first cuts out math spans, the second finds code
//! spans and emphasis in the text between them. Math and code spans are raw
//! zones: nothing inside them is transformed, so `$a*b*c$` stays one span.
//!
//! Precedence at each position:
//!
//! | Order | Construct   | Delimiter   | Raw zone |
//! |-------|-------------|-------------|----------|
//! | 1     | display math | `$$...$$`  | yes      |
//! | 2     | inline math | `$...$`     | yes      |
//! | 3     | code span   | `` `...` `` | yes      |
//! | 4     | strong      | `**...**`   | no       |
//! | 5     | emphasis    | `*...*`     | no       |
//!
//! Unclosed or empty delimiters are kept as literal text.

use crate::model::Inline;

const DISPLAY_MATH: &str = "$$";
const INLINE_MATH: &str = "$";
const CODE: &str = "`";
const STRONG: &str = "**";
const EMPHASIS: &str = "*";

/// Byte cursor over a line of prose.
#[derive(Clone)]
struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    const fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    const fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advance by one character (not byte) so slices stay on boundaries.
    fn bump(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.i += c.len_utf8();
        }
    }

    /// Try to read `open inner close` at the cursor.
    ///
    /// `single_line` rejects spans whose interior contains a newline.
    /// On success the cursor moves past the closing delimiter.
    fn delimited(&mut self, open: &str, close: &str, single_line: bool) -> Option<&'a str> {
        if !self.starts_with(open) {
            return None;
        }
        let start = self.i + open.len();
        let rel = self.s[start..].find(close)?;
        let inner = &self.s[start..start + rel];
        if inner.is_empty() || (single_line && inner.contains('\n')) {
            return None;
        }
        self.i = start + rel + close.len();
        Some(inner)
    }
}

/// Parse a prose fragment into inline spans.
///
/// Math pairs are found first over the whole fragment; emphasis and code
/// spans are only looked for in the text between them.
pub fn parse_inline(s: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(s);
    let mut text_start = 0;

    while !cur.eof() {
        let at = cur.i;
        match try_math(&mut cur) {
            Some(math) => {
                parse_emphasis(&s[text_start..at], &mut out);
                out.push(math);
                text_start = cur.i;
            }
            None => cur.bump(),
        }
    }

    parse_emphasis(&s[text_start..], &mut out);
    out
}

/// Emphasis pass over a fragment known to contain no math.
fn parse_emphasis(s: &str, out: &mut Vec<Inline>) {
    let mut cur = Cursor::new(s);
    let mut text_start = 0;

    while !cur.eof() {
        let at = cur.i;
        let node = cur
            .delimited(CODE, CODE, false)
            .map(|c| Inline::Code(c.to_owned()))
            .or_else(|| {
                cur.delimited(STRONG, STRONG, false)
                    .map(|c| Inline::Strong(c.to_owned()))
            })
            .or_else(|| try_emphasis(&mut cur));

        match node {
            Some(node) => {
                push_text(out, &s[text_start..at]);
                out.push(node);
                text_start = cur.i;
            }
            None => cur.bump(),
        }
    }

    push_text(out, &s[text_start..]);
}

/// Append literal text, merging with a preceding text node.
fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Inline::Text(prev)) => prev.push_str(text),
        _ => out.push(Inline::Text(text.to_owned())),
    }
}

fn try_math(cur: &mut Cursor<'_>) -> Option<Inline> {
    if cur.starts_with(DISPLAY_MATH) {
        // `$$` never falls back to inline math: an unclosed `$$` is literal.
        return cur
            .delimited(DISPLAY_MATH, DISPLAY_MATH, false)
            .map(|tex| Inline::Math {
                display: true,
                tex: tex.to_owned(),
            });
    }
    cur.delimited(INLINE_MATH, INLINE_MATH, true)
        .map(|tex| Inline::Math {
            display: false,
            tex: tex.to_owned(),
        })
}

fn try_emphasis(cur: &mut Cursor<'_>) -> Option<Inline> {
    // A lone `*` directly before another `*` belongs to an unclosed `**`.
    if cur.starts_with(STRONG) {
        return None;
    }
    // `2 * 3 = 6 and 4 * 5` is arithmetic, not emphasis.
    let mut ahead = cur.clone();
    let inner = ahead.delimited(EMPHASIS, EMPHASIS, false)?;
    if inner.starts_with(char::is_whitespace) || inner.ends_with(char::is_whitespace) {
        return None;
    }
    *cur = ahead;
    Some(Inline::Emphasis(inner.to_owned()))
}

/// Does `s` leave a `$$` open?
///
/// Code spans are skipped and balanced `$$` pairs are stepped over, so only a
/// display delimiter that [`parse_inline`] would still be waiting to close
/// counts.
pub fn opens_display_math(s: &str) -> bool {
    let mut cur = Cursor::new(s);
    while !cur.eof() {
        if cur.starts_with(DISPLAY_MATH) {
            let start = cur.i + DISPLAY_MATH.len();
            match s[start..].find(DISPLAY_MATH) {
                Some(rel) => cur.i = start + rel + DISPLAY_MATH.len(),
                None => return true,
            }
            continue;
        }
        if cur.delimited(CODE, CODE, false).is_none() {
            cur.bump();
        }
    }
    false
}
