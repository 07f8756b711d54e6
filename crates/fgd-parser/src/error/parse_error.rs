//! The hard failure of the parsing entry points.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Reading the source failed before any parsing happened.
///
/// Malformed FGD content is never a `ParseError`; it is reported through
/// [`Diagnostic`](crate::error::Diagnostic)s next to the parsed document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read FGD source: {0}")]
    Read(#[from] io::Error),
}
