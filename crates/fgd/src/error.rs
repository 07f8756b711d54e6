//! Error types for FGD operations.
//!
//! This module provides the main error type [`FgdError`] which wraps the
//! failures of the underlying crates. Grammar problems are not errors: they
//! are recovered by the parser and reported as diagnostics.

use std::{io, path::PathBuf};

use thiserror::Error;

use fgd_core::ModelError;
use fgd_parser::error::ParseError;

/// The main error type for FGD operations.
#[derive(Debug, Error)]
pub enum FgdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error in `{}`: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}
