//! Quote-aware character scanning shared by the scanner and the header parser.
//!
//! FGD strings use `"` delimiters. A backslash inside a string always takes
//! the next character with it, so `\"` never ends the string. Everything
//! between quotes is invisible to the functions here.

use std::ops::Range;

/// Find the first character outside quoted strings accepted by `pred`.
///
/// `pred` sees every unquoted character in order, so it may keep state such
/// as a nesting depth.
pub(crate) fn find_unquoted<F>(text: &str, mut pred: F) -> Option<usize>
where
    F: FnMut(usize, char) -> bool,
{
    let mut in_quote = false;
    let mut chars = text.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if in_quote {
            match ch {
                '\\' => {
                    chars.next();
                }
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        if ch == '"' {
            in_quote = true;
            continue;
        }
        if pred(idx, ch) {
            return Some(idx);
        }
    }
    None
}

/// `text` without a trailing `//` comment.
///
/// A comment starts the line or follows whitespace. Slashes inside helper
/// arguments and bare words such as `editor//x.vmt` are content.
pub(crate) fn strip_comment(text: &str) -> &str {
    let mut depth = 0i32;
    let found = find_unquoted(text, |idx, ch| {
        match ch {
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            '/' if depth <= 0 => {
                let after_space = text[..idx]
                    .chars()
                    .next_back()
                    .is_none_or(char::is_whitespace);
                return after_space && text[idx + 1..].starts_with('/');
            }
            _ => {}
        }
        false
    });
    match found {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Position of the first `=` outside quotes, parentheses and braces.
pub(crate) fn top_level_equals(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    find_unquoted(text, |_, ch| {
        match ch {
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            '=' => return depth == 0,
            _ => {}
        }
        false
    })
}

/// Position of the `)` closing the argument list that starts right after
/// `open`, the byte index of a `(`.
///
/// Parentheses and braces are tracked together; quoted text is skipped.
pub(crate) fn closing_paren(text: &str, open: usize) -> Option<usize> {
    let rest = &text[open + 1..];
    let mut parens = 1i32;
    let mut braces = 0i32;
    find_unquoted(rest, |_, ch| {
        match ch {
            '(' => parens += 1,
            ')' => {
                parens -= 1;
                return parens == 0 && braces == 0;
            }
            '{' => braces += 1,
            '}' => braces -= 1,
            _ => {}
        }
        false
    })
    .map(|idx| open + 1 + idx)
}

/// Split `text` so every block bracket stands alone.
///
/// Brackets nested in parentheses or braces belong to helper arguments and
/// are left alone, unless the grouping never balances on this line, in which
/// case every unquoted bracket splits. Returned ranges are trimmed and never
/// empty.
pub(crate) fn split_brackets(text: &str) -> Vec<Range<usize>> {
    split_brackets_within(text, 0)
}

/// [`split_brackets`] for a line that continues a header whose helper
/// arguments were left `open` groups deep by earlier lines.
///
/// Brackets stay unsplit until those groups close.
pub(crate) fn split_brackets_within(text: &str, open: i32) -> Vec<Range<usize>> {
    let cuts = bracket_positions(text, open, true)
        .or_else(|| bracket_positions(text, 0, false))
        .unwrap_or_default();
    if cuts.is_empty() {
        return trimmed_range(text, 0..text.len()).into_iter().collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for cut in cuts {
        pieces.extend(trimmed_range(text, start..cut));
        pieces.push(cut..cut + 1);
        start = cut + 1;
    }
    pieces.extend(trimmed_range(text, start..text.len()));
    pieces
}

/// Net number of parentheses and braces `text` opens outside quotes.
pub(crate) fn group_depth(text: &str) -> i32 {
    let mut depth = 0i32;
    find_unquoted(text, |_, ch| {
        match ch {
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            _ => {}
        }
        false
    });
    depth
}

/// Unquoted bracket positions, starting `open` groups deep. With `nested`
/// set, brackets inside parentheses or braces are skipped and `None` means
/// the grouping did not balance. A line that starts inside open groups may
/// end inside them too.
fn bracket_positions(text: &str, open: i32, nested: bool) -> Option<Vec<usize>> {
    let mut depth = open;
    let mut balanced = true;
    let mut cuts = Vec::new();
    find_unquoted(text, |idx, ch| {
        match ch {
            '(' | '{' => depth += 1,
            ')' | '}' => {
                depth -= 1;
                balanced &= depth >= 0;
            }
            '[' | ']' if depth == 0 || !nested => cuts.push(idx),
            _ => {}
        }
        false
    });
    let balanced = balanced && (depth == 0 || open > 0);
    if nested && !balanced { None } else { Some(cuts) }
}

fn trimmed_range(text: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[range.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let start = range.start + (slice.len() - slice.trim_start().len());
    Some(start..start + trimmed.len())
}
