//! Collector for accumulating diagnostics during a parse.

use log::{debug, warn};

use crate::error::Diagnostic;

/// Accumulates diagnostics so the parser can keep going after bad input.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
            warn!(
                code = diagnostic.code().as_str(),
                line = diagnostic.line();
                "Dropped input: {}", diagnostic.message()
            );
        } else {
            debug!(
                code = diagnostic.code().as_str(),
                line = diagnostic.line();
                "Repaired input: {}", diagnostic.message()
            );
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether any error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
