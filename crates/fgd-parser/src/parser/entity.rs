//! Entity class headers and bodies.

use fgd_core::{ChoiceItem, ClassType, EntityClass, FlagItem, Io, Property, PropertyKind};
use log::{debug, trace};
use thiserror::Error;
use winnow::Parser as _;

use super::Parser;
use crate::{
    error::{Diagnostic, ErrorCode},
    grammar::{self, Column, IoLine, PropertyLine},
    scanner::Line,
    text,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum HeaderError {
    #[error("entity class header has no `=` before the class name")]
    MissingEquals,

    #[error("unknown entity class type `@{0}`")]
    UnknownClassType(String),

    #[error("expected a class name and optional `: \"description\"` after `=`")]
    BadName,
}

/// A parsed `@XxxClass helpers... = name : "description"` header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    class_type: ClassType,
    name: String,
    description: Option<String>,
    helpers: Vec<(String, String)>,
    /// Name of a helper whose argument list never closes.
    unbalanced: Option<String>,
}

impl Parser {
    pub(super) fn entity_class(&mut self, first: Line) {
        let header_line = self.collect_header(first);
        let header = match parse_header(header_line.text()) {
            Ok(header) => header,
            Err(err) => {
                self.emit(Diagnostic::error(ErrorCode::E103, err.to_string()).at(&header_line));
                self.skip_block();
                return;
            }
        };

        if let Some(helper) = &header.unbalanced {
            self.emit(
                Diagnostic::warning(
                    ErrorCode::E104,
                    format!("helper `{helper}` has no closing `)`"),
                )
                .at(&header_line)
                .with_help("helpers after this one were ignored"),
            );
        }

        let mut class = match EntityClass::new(header.class_type, header.name) {
            Ok(class) => class,
            Err(err) => {
                self.emit(Diagnostic::error(ErrorCode::E103, err.to_string()).at(&header_line));
                self.skip_block();
                return;
            }
        };
        if let Some(description) = header.description {
            class.set_description(description);
        }
        for (key, args) in header.helpers {
            class.set_helper(&key, args);
        }

        if let Some(open) = self.scanner.eat("[") {
            self.class_body(&mut class, &open);
        }

        debug!(
            class = class.name(),
            class_type = class.class_type().as_str(),
            properties = class.properties().len(),
            inputs = class.inputs().len(),
            outputs = class.outputs().len();
            "Entity class"
        );

        let name = class.name().to_string();
        if !self.document.push(class) {
            self.emit(
                Diagnostic::warning(
                    ErrorCode::E300,
                    format!("entity class `{name}` is defined more than once"),
                )
                .at(&header_line)
                .with_help("lookups by name use the first definition"),
            );
        }
    }

    /// Join the header lines that precede the body into one line.
    ///
    /// A header keeps growing while it lacks a class name, or while the
    /// next line continues it with `:` or a quoted string. It never
    /// swallows a bracket or another directive.
    fn collect_header(&mut self, first: Line) -> Line {
        let mut header = first.text().to_string();
        let mut span = first.span();
        loop {
            let Some(next) = self.scanner.peek() else {
                break;
            };
            if next.is("[") || next.is("]") || next.text().starts_with('@') {
                break;
            }
            let continues = next.text().starts_with(':') || next.text().starts_with('"');
            if header_complete(&header) && !continues {
                break;
            }
            header.push('\n');
            header.push_str(next.text());
            span = span.union(next.span());
            self.scanner.next();
        }
        if header.contains('\n') {
            trace!(line = first.number(); "Multi-line entity class header");
        }
        Line::new(header, first.number(), span)
    }

    fn class_body(&mut self, class: &mut EntityClass, open: &Line) {
        while let Some(line) = self.next_in_block(open) {
            if line.is("[") {
                self.emit(
                    Diagnostic::warning(ErrorCode::E200, "unexpected block in class body")
                        .at(&line),
                );
                self.skip_nested();
                continue;
            }
            if let Ok(io) = grammar::io_line.parse(line.text()) {
                self.io(class, &line, io);
                continue;
            }
            match grammar::property_line.parse(line.text()) {
                Ok(property) => self.property(class, &line, property),
                Err(_) => self.emit(
                    Diagnostic::warning(ErrorCode::E200, "expected a property or an input/output")
                        .at(&line),
                ),
            }
        }
    }

    fn io(&mut self, class: &mut EntityClass, line: &Line, parsed: IoLine) {
        let mut columns = parsed.columns.into_iter();
        let description = columns.next().map(|column| column.text).unwrap_or_default();
        self.extra_columns(line, columns.len());

        match Io::new(parsed.direction, parsed.name, parsed.arg_type) {
            Ok(io) => class.add_io(io.with_description(description)),
            Err(err) => self.emit(Diagnostic::warning(ErrorCode::E200, err.to_string()).at(line)),
        }
    }

    fn property(&mut self, class: &mut EntityClass, line: &Line, parsed: PropertyLine) {
        let mut property = match Property::new(parsed.name, parsed.prop_type) {
            Ok(property) => property,
            Err(err) => {
                self.emit(Diagnostic::warning(ErrorCode::E200, err.to_string()).at(line));
                return;
            }
        }
        .with_readonly(parsed.readonly)
        .with_report(parsed.report);

        let mut columns = parsed.columns.into_iter();
        if let Some(display) = columns.next() {
            property.set_display_name(display.text);
        }
        if let Some(default) = columns.next() {
            property.set_default_value(default.text);
        }
        if let Some(description) = columns.next() {
            property.set_description(description.text);
        }
        self.extra_columns(line, columns.len());

        let has_items = !matches!(property.kind(), PropertyKind::Keyvalue);
        match self.scanner.eat("[") {
            Some(open) if has_items => self.items(&mut property, &open),
            Some(open) => {
                self.emit(
                    Diagnostic::warning(
                        ErrorCode::E200,
                        format!(
                            "`{}` properties take no item block",
                            property.base_type()
                        ),
                    )
                    .at(&open),
                );
                self.skip_nested();
            }
            None if has_items && parsed.opens_block => {
                self.emit(
                    Diagnostic::warning(
                        ErrorCode::E203,
                        format!("`{}` ends with `=` but no item block follows", property.name()),
                    )
                    .at(line),
                );
            }
            None => {}
        }

        class.add_property(property);
    }

    /// Items of a `choices` or `flags` block.
    fn items(&mut self, property: &mut Property, open: &Line) {
        let code = match property.kind() {
            PropertyKind::Flags(_) => ErrorCode::E202,
            _ => ErrorCode::E201,
        };
        while let Some(line) = self.next_in_block(open) {
            if line.is("[") {
                self.emit(Diagnostic::warning(code, "unexpected nested block").at(&line));
                self.skip_nested();
                continue;
            }
            let added = match code {
                ErrorCode::E202 => self.flag_item(property, &line),
                _ => self.choice_item(property, &line),
            };
            if let Err(message) = added {
                self.emit(Diagnostic::warning(code, message).at(&line));
            }
        }
    }

    fn choice_item(&mut self, property: &mut Property, line: &Line) -> Result<(), String> {
        let parsed = grammar::choice_line
            .parse(line.text())
            .map_err(|_| "expected `value : \"Display\"`".to_string())?;
        let mut columns = parsed.columns.into_iter();
        let display = columns
            .next()
            .ok_or_else(|| "choice item has no display name".to_string())?;
        let description = columns.next().map(|column| column.text).unwrap_or_default();
        self.extra_columns(line, columns.len());

        let item = ChoiceItem::new(parsed.value.text, display.text).with_description(description);
        property.add_choice(item).map_err(|err| err.to_string())
    }

    fn flag_item(&mut self, property: &mut Property, line: &Line) -> Result<(), String> {
        let parsed = grammar::flag_line
            .parse(line.text())
            .map_err(|_| "expected `bit : \"Display\" : 0|1`".to_string())?;
        let mut columns = parsed.columns.into_iter().peekable();
        let display = columns
            .next()
            .ok_or_else(|| "flag item has no display name".to_string())?;

        let mut item = FlagItem::new(parsed.value, display.text);
        if let Some(column) = columns.next_if(|column| !column.quoted) {
            match tick_state(&column) {
                Some(ticked) => item.set_default_ticked(ticked),
                None => self.emit(
                    Diagnostic::warning(
                        ErrorCode::E202,
                        format!("flag tick state `{}` is not an integer", column.text),
                    )
                    .at(line)
                    .with_help("the flag starts unticked"),
                ),
            }
        }
        if let Some(description) = columns.next() {
            item.set_description(description.text);
        }
        self.extra_columns(line, columns.count());

        property.add_flag(item).map_err(|err| err.to_string())
    }

    fn extra_columns(&mut self, line: &Line, extra: usize) {
        if extra > 0 {
            self.emit(
                Diagnostic::warning(ErrorCode::E205, format!("ignored {extra} extra column(s)"))
                    .at(line),
            );
        }
    }
}

/// `0` is unticked, any other integer ticked.
fn tick_state(column: &Column) -> Option<bool> {
    column.text.parse::<i64>().ok().map(|value| value != 0)
}

/// The `=` separating helpers from the class name.
///
/// An unclosed helper hides every later `=` from the depth-aware search, so
/// the last unquoted `=` is used instead.
fn header_equals(header: &str) -> Option<usize> {
    text::top_level_equals(header).or_else(|| {
        let mut last = None;
        text::find_unquoted(header, |idx, ch| {
            if ch == '=' {
                last = Some(idx);
            }
            false
        });
        last
    })
}

/// Whether `header` already names its class.
fn header_complete(header: &str) -> bool {
    header_equals(header).is_some_and(|eq| grammar::class_name.parse(&header[eq + 1..]).is_ok())
}

fn parse_header(header: &str) -> Result<Header, HeaderError> {
    let eq = header_equals(header).ok_or(HeaderError::MissingEquals)?;
    let (before, after) = (&header[..eq], &header[eq + 1..]);

    let rest = before.trim_start().trim_start_matches('@');
    let token_end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let token = &rest[..token_end];
    let class_type = token
        .parse::<ClassType>()
        .map_err(|_| HeaderError::UnknownClassType(token.to_string()))?;

    let (name, description) = grammar::class_name
        .parse(after)
        .map_err(|_| HeaderError::BadName)?;

    let (helpers, unbalanced) = scan_helpers(&rest[token_end..]);
    Ok(Header {
        class_type,
        name,
        description,
        helpers,
        unbalanced,
    })
}

/// Collect every `key(args)` between the class type and the `=`.
///
/// Scanning stops at the first helper whose parentheses never balance; its
/// name is returned alongside the helpers found before it.
fn scan_helpers(text: &str) -> (Vec<(String, String)>, Option<String>) {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut helpers = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text::find_unquoted(&text[cursor..], |_, c| is_word(c)) {
        let start = cursor + offset;
        let end = text[start..]
            .find(|c: char| !is_word(c))
            .map_or(text.len(), |len| start + len);
        let key = &text[start..end];

        let after = &text[end..];
        let open = end + (after.len() - after.trim_start().len());
        if !text[open..].starts_with('(') {
            cursor = end;
            continue;
        }
        let Some(close) = text::closing_paren(text, open) else {
            return (helpers, Some(key.to_string()));
        };
        helpers.push((key.to_string(), normalize_args(&text[open + 1..close])));
        cursor = close + 1;
    }
    (helpers, None)
}

/// Trim helper arguments; multi-line arguments keep one trimmed line per
/// source line.
fn normalize_args(args: &str) -> String {
    let args = args.trim();
    if !args.contains('\n') {
        return args.to_string();
    }
    args.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
