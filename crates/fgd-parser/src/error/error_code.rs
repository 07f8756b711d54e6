//! Error codes for FGD diagnostics.
//!
//! Codes are organized by where the problem was found:
//! - `E1xx` - Top-level directives
//! - `E2xx` - Entity class bodies
//! - `E3xx` - Document-level checks

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Directive Errors (E1xx)
    // =========================================================================
    /// Unknown directive.
    ///
    /// A line starts with `@` but names no known directive or class type.
    E100,

    /// Unrecognized top-level line.
    ///
    /// Only directives may appear outside of a block.
    E101,

    /// Malformed directive.
    ///
    /// `@include`, `@mapsize`, `@version`, `@AutoVisGroup` or one of their
    /// block lines did not have the expected shape.
    E102,

    /// Malformed entity class header.
    ///
    /// The header is missing the `=`, the class name, or names an unknown
    /// class type.
    E103,

    /// Unbalanced helper.
    ///
    /// A helper's argument list was never closed. The helpers before it are
    /// kept.
    E104,

    // =========================================================================
    // Body Errors (E2xx)
    // =========================================================================
    /// Unrecognized body line.
    ///
    /// A line inside an entity class body is neither a property nor an
    /// input/output.
    E200,

    /// Bad choice item.
    E201,

    /// Bad flag item.
    E202,

    /// Expected item block missing.
    ///
    /// A `choices` or `flags` property ends with `=` but no `[` block follows.
    E203,

    /// Unterminated block.
    ///
    /// The input ended before the closing `]`.
    E204,

    /// Extra columns ignored.
    E205,

    // =========================================================================
    // Document Errors (E3xx)
    // =========================================================================
    /// Duplicate class name.
    ///
    /// The class is kept in the element list but lookups by name resolve to
    /// the first definition.
    E300,
}

impl ErrorCode {
    /// Get the string representation of this error code (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E300 => "E300",
        }
    }

    /// Get a short description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unknown directive",
            ErrorCode::E101 => "unrecognized top-level line",
            ErrorCode::E102 => "malformed directive",
            ErrorCode::E103 => "malformed entity class header",
            ErrorCode::E104 => "unbalanced helper",
            ErrorCode::E200 => "unrecognized body line",
            ErrorCode::E201 => "bad choice item",
            ErrorCode::E202 => "bad flag item",
            ErrorCode::E203 => "expected item block missing",
            ErrorCode::E204 => "unterminated block",
            ErrorCode::E205 => "extra columns ignored",
            ErrorCode::E300 => "duplicate class name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
