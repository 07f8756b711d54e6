//! Diagnostics reported while reading FGD text.
//!
//! The parser never aborts on malformed input. Every line it cannot use is
//! skipped and described by a [`Diagnostic`] carrying an [`ErrorCode`], the
//! offending line and its location. The only hard failure is being unable to
//! read the source at all, reported as [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use fgd_parser::error::{Diagnostic, ErrorCode, Severity};
//! let diag = Diagnostic::warning(ErrorCode::E100, "unknown directive `@foo`")
//!     .with_help("remove the line or fix the directive name");
//! assert_eq!(diag.severity(), Severity::Warning);
//! assert_eq!(diag.code(), ErrorCode::E100);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
