//! # Alias Rewriter
//!
//! Shortens a verbose package prefix to an alias in rendered source text.
//!
//! Literals built by [`crate::literal`] are aliased on the expression tree
//! ([`crate::literal::Literal::alias`]), where symbols are distinct nodes.
//! Text authored in templates has no tree, so [`rewrite`] scans it with a
//! small lexer instead: string, raw string and char literals and comments are
//! copied through untouched, and the prefix only matches as a whole path at a
//! path boundary, followed by `::`.
//!
//! ```rust
//! use kodify::alias::rewrite;
//!
//! let text = r#"let x = kodify::api::core::v1::Quantity("kodify::api::core::v1".into());"#;
//! assert_eq!(
//!     rewrite(text, "kodify::api::core::v1", "corev1"),
//!     r#"let x = corev1::Quantity("kodify::api::core::v1".into());"#
//! );
//! ```

/// Replace every code occurrence of `prefix::` with `alias::`.
///
/// An empty `prefix` leaves the text unchanged.
pub fn rewrite(text: &str, prefix: &str, alias: &str) -> String {
    if prefix.is_empty() || !text.contains(prefix) {
        return text.to_string();
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let skip_to = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => Some(line_end(bytes, i)),
            b'/' if bytes.get(i + 1) == Some(&b'*') => Some(block_comment_end(bytes, i)),
            b'"' => Some(string_end(bytes, i + 1)),
            b'r' if is_boundary(bytes, i) => raw_string_end(bytes, i + 1),
            b'b' if is_boundary(bytes, i) && bytes.get(i + 1) == Some(&b'r') => {
                raw_string_end(bytes, i + 2)
            }
            b'\'' => char_literal_end(bytes, i),
            _ => None,
        };
        if let Some(end) = skip_to {
            i = end;
            continue;
        }

        if is_boundary(bytes, i)
            && bytes[i..].starts_with(prefix.as_bytes())
            && bytes[i + prefix.len()..].starts_with(b"::")
        {
            out.push_str(&text[copied..i]);
            out.push_str(alias);
            i += prefix.len();
            copied = i;
            continue;
        }

        i += utf8_len(bytes[i]);
    }
    out.push_str(&text[copied..]);
    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Nothing path-like directly before `i`: not an identifier and not `::`.
fn is_boundary(bytes: &[u8], i: usize) -> bool {
    match i.checked_sub(1).map(|p| bytes[p]) {
        None => true,
        Some(prev) => !is_ident_byte(prev) && prev != b':',
    }
}

fn utf8_len(first: u8) -> usize {
    match first {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

fn block_comment_end(bytes: &[u8], from: usize) -> usize {
    let mut depth = 0usize;
    let mut i = from;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// `from` is just past the opening quote.
fn string_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// `from` is just past the `r`. `None` when this is not a raw string.
fn raw_string_end(bytes: &[u8], from: usize) -> Option<usize> {
    let hashes = bytes[from..].iter().take_while(|&&b| b == b'#').count();
    let open = from + hashes;
    if bytes.get(open) != Some(&b'"') {
        return None;
    }
    let mut i = open + 1;
    while i < bytes.len() {
        if bytes[i] == b'"'
            && bytes.len() >= i + 1 + hashes
            && bytes[i + 1..i + 1 + hashes].iter().all(|&b| b == b'#')
        {
            return Some(i + 1 + hashes);
        }
        i += 1;
    }
    Some(bytes.len())
}

/// `None` for lifetimes and labels (`'a`, `'static`), which are code.
fn char_literal_end(bytes: &[u8], from: usize) -> Option<usize> {
    let next = *bytes.get(from + 1)?;
    if next == b'\\' {
        let close = bytes.get(from + 3..)?.iter().position(|&b| b == b'\'')?;
        return Some(from + 3 + close + 1);
    }
    let len = utf8_len(next);
    (bytes.get(from + 1 + len) == Some(&b'\'')).then_some(from + 2 + len)
}
