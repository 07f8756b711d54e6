//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Parsing always produces a document; severity only says how much of the
/// input made it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The enclosing directive was kept: a body line or item was skipped, or
    /// the input was accepted with a fix-up such as ignoring extra columns.
    Warning,

    /// A whole top-level directive or line was dropped.
    Error,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
