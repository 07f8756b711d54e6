//! FGD Parser
//!
//! Turns FGD (Forge Game Data) text into an [`fgd_core::Document`].
//!
//! FGD files in the wild are loosely formatted, so the parser is error
//! tolerant: a directive or body line it cannot understand is skipped and
//! reported as a [`Diagnostic`](error::Diagnostic), and parsing resumes at the
//! next line. Only failing to read the input is an error.
//!
//! # Pipeline
//!
//! 1. **Scanning**: the [`scanner`] produces trimmed logical lines, with
//!    comments removed, string continuations joined and block brackets on
//!    their own lines.
//! 2. **Parsing**: a line-oriented recursive descent dispatches on the
//!    directive keyword and builds the document element by element.
//!
//! # Example
//!
//! ```
//! let parsed = fgd_parser::parse_str(
//!     r#"
//! @BaseClass = Targetname [ targetname(target_source) : "Name" ]
//! @PointClass base(Targetname) = info_target : "A target" []
//! "#,
//! );
//! assert!(parsed.diagnostics().is_empty());
//! assert_eq!(parsed.document().len(), 2);
//! assert!(parsed.document().contains_class("info_target"));
//! ```

pub mod error;
pub mod scanner;

mod grammar;
mod parser;
#[cfg(test)]
mod parser_tests;
mod span;
mod text;

use std::{fs, io::Read, path::Path};

use fgd_core::Document;
use log::{debug, info};

use error::{Diagnostic, ParseError};

pub use span::Span;

/// The outcome of a parse: the document plus everything that was skipped or
/// repaired along the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    document: Document,
    diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Diagnostics in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether a whole top-level directive was dropped.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity().is_error())
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn into_parts(self) -> (Document, Vec<Diagnostic>) {
        (self.document, self.diagnostics)
    }
}

/// Parse FGD source text.
///
/// Never fails: malformed input ends up in [`Parsed::diagnostics`].
pub fn parse_str(source: &str) -> Parsed {
    let parsed = parser::Parser::new(source).parse();
    debug!(
        elements = parsed.document.len(),
        diagnostics = parsed.diagnostics.len();
        "Parsed FGD source"
    );
    parsed
}

/// Read and parse an FGD file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read as UTF-8 text.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Parsed, ParseError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Reading FGD file");
    let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_str(&source))
}

/// Read an FGD source to the end and parse it.
///
/// # Errors
///
/// Returns [`ParseError::Read`] if reading fails or the data is not UTF-8.
pub fn parse_reader(mut reader: impl Read) -> Result<Parsed, ParseError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    Ok(parse_str(&source))
}
