//! Line grammars.
//!
//! Each public parser here recognizes one complete logical line (as produced
//! by the [`scanner`](crate::scanner)). The directive parser decides which
//! grammar to try; a grammar that does not consume the whole line is a
//! malformed line.

use fgd_core::IoDirection;
use winnow::{
    Parser as _,
    ascii::{Caseless, dec_int, dec_uint, multispace0, multispace1},
    combinator::{alt, delimited, not, opt, peek, preceded, repeat, separated_pair, terminated},
    error::ModalResult,
    token::{any, literal, one_of, take_till, take_while},
};

/// One `:`-separated column of a property, IO or item line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Column {
    pub text: String,
    pub quoted: bool,
}

impl Column {
    fn quoted(text: String) -> Self {
        Self { text, quoted: true }
    }

    fn bare(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            quoted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyLine {
    pub name: String,
    pub prop_type: String,
    pub readonly: bool,
    pub report: bool,
    pub columns: Vec<Column>,
    /// The line ends with `=`, announcing an item block.
    pub opens_block: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IoLine {
    pub direction: IoDirection,
    pub name: String,
    pub arg_type: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChoiceLine {
    pub value: Column,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagLine {
    pub value: i64,
    pub columns: Vec<Column>,
}

fn ws0(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn ws1(input: &mut &str) -> ModalResult<()> {
    multispace1.void().parse_next(input)
}

/// Keyword followed by a word boundary, ignoring case.
fn keyword<'a>(word: &'static str) -> impl FnMut(&mut &'a str) -> ModalResult<&'a str> {
    move |input: &mut &'a str| {
        terminated(
            literal(Caseless(word)),
            peek(not(one_of(|c: char| c.is_alphanumeric() || c == '_'))),
        )
        .parse_next(input)
    }
}

fn integer(input: &mut &str) -> ModalResult<i64> {
    dec_int.parse_next(input)
}

fn unsigned(input: &mut &str) -> ModalResult<u32> {
    dec_uint.parse_next(input)
}

enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

/// A backslash takes the next character with it. Only `\"` is unescaped.
fn string_fragment<'a>(input: &mut &'a str) -> ModalResult<Fragment<'a>> {
    alt((
        take_till(1.., ['"', '\\']).map(Fragment::Literal),
        preceded('\\', any).map(Fragment::Escaped),
    ))
    .parse_next(input)
}

/// A double-quoted string with `\"` unescaped.
pub(crate) fn quoted_string(input: &mut &str) -> ModalResult<String> {
    delimited(
        '"',
        repeat(0.., string_fragment).fold(String::new, |mut acc, fragment| {
            match fragment {
                Fragment::Literal(text) => acc.push_str(text),
                Fragment::Escaped('"') => acc.push('"'),
                Fragment::Escaped(other) => {
                    acc.push('\\');
                    acc.push(other);
                }
            }
            acc
        }),
        '"',
    )
    .parse_next(input)
}

fn bare_column<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., [':', '"', '=', '[', ']']).parse_next(input)
}

/// A column value: quoted, bare or empty.
fn column(input: &mut &str) -> ModalResult<Column> {
    opt(alt((
        quoted_string.map(Column::quoted),
        bare_column.map(Column::bare),
    )))
    .map(Option::unwrap_or_default)
    .parse_next(input)
}

fn columns(input: &mut &str) -> ModalResult<Vec<Column>> {
    repeat(0.., preceded((ws0, ':', ws0), terminated(column, ws0))).parse_next(input)
}

/// `(text)` with the inner text trimmed.
fn parenthesized<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('(', take_till(0.., ')'), ')')
        .map(str::trim)
        .parse_next(input)
}

/// `@include "path"`
pub(crate) fn include(input: &mut &str) -> ModalResult<String> {
    preceded((keyword("@include"), ws0), quoted_string).parse_next(input)
}

/// `@mapsize(min, max)`
pub(crate) fn mapsize(input: &mut &str) -> ModalResult<(i64, i64)> {
    preceded(
        (keyword("@mapsize"), ws0),
        delimited(
            ('(', ws0),
            separated_pair(integer, (ws0, ',', ws0), integer),
            (ws0, ')'),
        ),
    )
    .parse_next(input)
}

/// `@version(n)`
pub(crate) fn version(input: &mut &str) -> ModalResult<u32> {
    preceded(
        (keyword("@version"), ws0),
        delimited(('(', ws0), unsigned, (ws0, ')')),
    )
    .parse_next(input)
}

/// `@MaterialExclusion` on its own.
pub(crate) fn material_exclusion(input: &mut &str) -> ModalResult<()> {
    keyword("@materialexclusion").void().parse_next(input)
}

/// `@AutoVisGroup = "Parent"`
pub(crate) fn autovisgroup(input: &mut &str) -> ModalResult<String> {
    preceded((keyword("@autovisgroup"), ws0, '=', ws0), quoted_string).parse_next(input)
}

/// The name and optional description after the `=` of an entity class
/// header: `info_target : "A target"`.
pub(crate) fn class_name(input: &mut &str) -> ModalResult<(String, Option<String>)> {
    (
        ws0,
        take_while(1.., |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')),
        ws0,
        opt(preceded((':', ws0), quoted_string)),
        ws0,
    )
        .map(|(_, name, _, description, _)| (name.to_string(), description))
        .parse_next(input)
}

fn property_name(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '"')
    })
    .verify_map(|name: &str| {
        let name = name.trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
    .parse_next(input)
}

/// `name(type) [readonly] [report] : col : col ... [=]`
pub(crate) fn property_line(input: &mut &str) -> ModalResult<PropertyLine> {
    let name = property_name.parse_next(input)?;
    ws0.parse_next(input)?;
    let prop_type = parenthesized.parse_next(input)?;
    ws0.parse_next(input)?;

    let mut readonly = false;
    let mut report = false;
    loop {
        if opt(terminated(keyword("readonly"), ws0))
            .parse_next(input)?
            .is_some()
        {
            readonly = true;
        } else if opt(terminated(keyword("report"), ws0))
            .parse_next(input)?
            .is_some()
        {
            report = true;
        } else {
            break;
        }
    }

    let columns = columns.parse_next(input)?;
    let opens_block = opt(terminated('=', ws0)).parse_next(input)?.is_some();

    Ok(PropertyLine {
        name,
        prop_type: prop_type.to_string(),
        readonly,
        report,
        columns,
        opens_block,
    })
}

fn io_direction(input: &mut &str) -> ModalResult<IoDirection> {
    alt((
        keyword("input").value(IoDirection::Input),
        keyword("output").value(IoDirection::Output),
    ))
    .parse_next(input)
}

fn io_name(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '(')
        .verify_map(|name: &str| {
            let name = name.trim_matches('"');
            (!name.is_empty()).then(|| name.to_string())
        })
        .parse_next(input)
}

/// `input Name(type) : "description"`
pub(crate) fn io_line(input: &mut &str) -> ModalResult<IoLine> {
    let direction = io_direction.parse_next(input)?;
    ws1.parse_next(input)?;
    let name = io_name.parse_next(input)?;
    ws0.parse_next(input)?;
    let arg_type = parenthesized.parse_next(input)?;
    let columns = columns.parse_next(input)?;

    Ok(IoLine {
        direction,
        name,
        arg_type: arg_type.to_string(),
        columns,
    })
}

/// `value : "Display" [: "Description"]`
pub(crate) fn choice_line(input: &mut &str) -> ModalResult<ChoiceLine> {
    let value = alt((
        quoted_string.map(Column::quoted),
        take_till(1.., [':', '"']).map(Column::bare),
    ))
    .parse_next(input)?;
    let columns = columns.parse_next(input)?;
    Ok(ChoiceLine { value, columns })
}

/// `bit : "Display" [: 0|1] [: "Description"]`
pub(crate) fn flag_line(input: &mut &str) -> ModalResult<FlagLine> {
    let value = alt((integer, delimited('"', integer, '"'))).parse_next(input)?;
    let columns = columns.parse_next(input)?;
    Ok(FlagLine { value, columns })
}
