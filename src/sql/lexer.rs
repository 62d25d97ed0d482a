//! Word-level lexing shared by the clause scanner and the predicate parser.
//!
//! A word is a maximal run of non-whitespace characters. Single-quoted
//! literals are kept inside one word even when they contain spaces, and every
//! word records the parenthesis depth it starts at so callers can ignore
//! keywords nested inside subqueries.

use super::token::{is_keyword, Keyword};
use crate::error::{TranslateError, TranslateResult};

/// Deepest parenthesis nesting accepted in a query.
pub const MAX_NESTING: usize = 64;

/// A whitespace-delimited word with its byte span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    /// Parenthesis depth at the first character of the word.
    pub depth: usize,
}

impl Word<'_> {
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    pub fn is(&self, keyword: Keyword) -> bool {
        is_keyword(self.text, keyword)
    }
}

/// Split `input` into words.
///
/// Fails on unterminated string literals, unbalanced parentheses and nesting
/// deeper than [`MAX_NESTING`].
pub fn words(input: &str) -> TranslateResult<Vec<Word<'_>>> {
    let mut words = Vec::new();
    let mut depth: usize = 0;
    let mut in_quote = false;
    let mut current: Option<(usize, usize)> = None;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_quote {
            if c == '\'' {
                // '' is an escaped quote inside a literal
                if matches!(chars.peek(), Some((_, '\''))) {
                    chars.next();
                } else {
                    in_quote = false;
                }
            }
            continue;
        }

        if c.is_whitespace() {
            if let Some((start, d)) = current.take() {
                words.push(Word {
                    text: &input[start..i],
                    start,
                    end: i,
                    depth: d,
                });
            }
            continue;
        }

        if current.is_none() {
            current = Some((i, depth));
        }

        match c {
            '\'' => in_quote = true,
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(TranslateError::malformed(format!(
                        "nesting too deep: more than {} levels of parentheses",
                        MAX_NESTING
                    )));
                }
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    TranslateError::malformed(format!("unbalanced ')' at position {}", i))
                })?
            }
            _ => {}
        }
    }

    if in_quote {
        return Err(TranslateError::malformed("unterminated string literal"));
    }
    if depth != 0 {
        return Err(TranslateError::malformed("unbalanced '(': missing ')'"));
    }

    if let Some((start, d)) = current {
        words.push(Word {
            text: &input[start..],
            start,
            end: input.len(),
            depth: d,
        });
    }

    Ok(words)
}

/// Split `input` on every top-level occurrence of `keyword`.
///
/// Parts are trimmed; empty parts are kept so callers can reject them.
pub fn split_top_level(input: &str, keyword: Keyword) -> TranslateResult<Vec<&str>> {
    let mut parts = Vec::new();
    let mut from = 0;

    for word in words(input)? {
        if word.is_top_level() && word.is(keyword) {
            parts.push(input[from..word.start].trim());
            from = word.end;
        }
    }
    parts.push(input[from..].trim());

    Ok(parts)
}

/// Return the inside of `input` when one pair of parentheses wraps all of it.
///
/// `(a) AND (b)` is not wrapped: its first `(` closes before the end.
pub fn strip_enclosing_parens(input: &str) -> Option<&str> {
    let s = input.trim();
    if !s.starts_with('(') || !s.ends_with(')') {
        return None;
    }

    let mut depth: usize = 0;
    let mut in_quote = false;
    for (i, c) in s.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (i == s.len() - 1).then(|| s[1..i].trim());
                }
            }
            _ => {}
        }
    }
    None
}
