//! The diagnostic type reported for skipped or repaired input.

use std::fmt;

use crate::{
    error::{ErrorCode, Severity},
    scanner::Line,
    span::Span,
};

/// A problem found while parsing, tied to the logical line it came from.
///
/// ```text
/// error[E201]: bad choice item
///   line 12: 0 "Off"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: ErrorCode,
    message: String,
    line_context: String,
    line: usize,
    span: Span,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic: the offending input was dropped.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a warning diagnostic: the input was kept, possibly repaired.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The trimmed text of the offending logical line.
    pub fn line_context(&self) -> &str {
        &self.line_context
    }

    /// 1-based line number of the offending line, 0 when unknown.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte range of the offending line in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Attach the location of a source line.
    pub fn with_location(
        mut self,
        line: usize,
        span: Span,
        line_context: impl Into<String>,
    ) -> Self {
        self.line = line;
        self.span = span;
        self.line_context = line_context.into();
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub(crate) fn at(self, line: &Line) -> Self {
        self.with_location(line.number(), line.span(), line.text())
    }

    fn new(severity: Severity, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            line_context: String::new(),
            line: 0,
            span: Span::default(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if self.line > 0 {
            write!(f, " (line {})", self.line)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
