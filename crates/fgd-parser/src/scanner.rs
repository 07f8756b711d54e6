//! Logical lines of an FGD source.
//!
//! The scanner turns raw text into trimmed logical lines before any parsing
//! happens:
//!
//! - blank lines and `//` comments (whole-line or trailing) disappear;
//! - a line ending in `" +` continues into the next line starting with `"`,
//!   and the two string segments are joined with a newline;
//! - every block bracket `[` / `]` outside quotes and helper arguments gets
//!   a line of its own, so `]]` or `= [` never need special handling;
//! - helper arguments spread over several lines keep their brackets until
//!   the argument list closes;
//! - a leading byte order mark is ignored.
//!
//! Parsing then walks the lines with [`LineScanner::peek`] and
//! [`Iterator::next`]; the cursor only moves forward.

use std::mem;

use log::trace;

use crate::{span::Span, text};

/// One trimmed logical line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: String,
    number: usize,
    span: Span,
}

impl Line {
    pub(crate) fn new(text: impl Into<String>, number: usize, span: Span) -> Self {
        Self {
            text: text.into(),
            number,
            span,
        }
    }

    /// The line content without surrounding whitespace or comments.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based number of the physical line this logical line starts on.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Byte range in the source covered by this line.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether this line is exactly the block bracket `bracket`.
    pub fn is(&self, bracket: &str) -> bool {
        self.text == bracket
    }
}

/// A forward-only cursor over the logical lines of a source.
#[derive(Debug, Clone)]
pub struct LineScanner {
    lines: Vec<Line>,
    cursor: usize,
}

impl LineScanner {
    pub fn new(source: &str) -> Self {
        let lines = logical_lines(source);
        trace!(lines = lines.len(); "Scanned source");
        Self { lines, cursor: 0 }
    }

    /// The next line, without consuming it.
    pub fn peek(&self) -> Option<&Line> {
        self.lines.get(self.cursor)
    }

    /// The text of the next line, without consuming it.
    pub fn peek_text(&self) -> Option<&str> {
        self.peek().map(Line::text)
    }

    /// Whether the next line is exactly `bracket`.
    pub fn peek_is(&self, bracket: &str) -> bool {
        self.peek().is_some_and(|line| line.is(bracket))
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    /// Consume the next line only if it is exactly `bracket`.
    pub fn eat(&mut self, bracket: &str) -> Option<Line> {
        if self.peek_is(bracket) {
            self.next()
        } else {
            None
        }
    }
}

impl Iterator for LineScanner {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let line = self.lines.get_mut(self.cursor)?;
        let line = mem::take(line);
        self.cursor += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

/// A non-empty physical line after comment stripping.
struct Physical<'a> {
    text: &'a str,
    number: usize,
    span: Span,
}

fn physical_lines(source: &str) -> Vec<Physical<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (idx, raw) in source.split('\n').enumerate() {
        let mut start = offset;
        offset += raw.len() + 1;

        let raw = match raw.strip_prefix('\u{feff}') {
            Some(rest) if idx == 0 => {
                start += '\u{feff}'.len_utf8();
                rest
            }
            _ => raw,
        };
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let content = text::strip_comment(raw);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lead = content.len() - content.trim_start().len();
        lines.push(Physical {
            text: trimmed,
            number: idx + 1,
            span: Span::new(start + lead..start + lead + trimmed.len()),
        });
    }
    lines
}

/// Byte index of the closing quote when `text` ends in `" +`.
fn continuation_quote(text: &str) -> Option<usize> {
    let body = text.strip_suffix('+')?.trim_end();
    body.ends_with('"').then(|| body.len() - 1)
}

fn logical_lines(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut physical = physical_lines(source).into_iter().peekable();
    // Helper groups a header line left open.
    let mut open = 0;

    while let Some(first) = physical.next() {
        let mut content = first.text.to_string();
        let mut span = first.span;
        let mut merged = false;

        while let Some(quote) = continuation_quote(&content) {
            let Some(next) = physical.next_if(|next| next.text.starts_with('"')) else {
                break;
            };
            content.truncate(quote);
            content.push('\n');
            content.push_str(&next.text[1..]);
            span = span.union(next.span);
            merged = true;
        }
        if merged {
            trace!(line = first.number; "Joined continuation lines");
        }

        let directive = content.starts_with('@');
        let continues_header = open > 0 && !directive && content != "[" && content != "]";
        let ranges = if continues_header {
            text::split_brackets_within(&content, open)
        } else {
            text::split_brackets(&content)
        };
        open = if continues_header {
            (open + text::group_depth(&content)).max(0)
        } else if directive && ranges.len() == 1 {
            text::group_depth(&content).max(0)
        } else {
            0
        };
        if open > 0 {
            trace!(line = first.number, open; "Helper arguments continue");
        }

        for range in ranges {
            // Offsets inside a joined line no longer map onto the source.
            let piece_span = if merged { span } else { span.slice(range.clone()) };
            lines.push(Line::new(&content[range], first.number, piece_span));
        }
    }
    lines
}
