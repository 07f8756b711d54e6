//! Error types for document model operations.

use thiserror::Error;

/// Errors raised by the document model when an operation would break one of
/// its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("name must be a non-empty string")]
    EmptyName,

    #[error("`{0}` is not a valid name, use letters, digits, `_`, `-` or `.`")]
    InvalidName(String),

    #[error("an entity class named `{0}` already exists")]
    DuplicateName(String),

    #[error("no entity class named `{0}`")]
    UnknownClass(String),

    #[error("property `{property}` is not a {expected} property")]
    KindMismatch {
        property: String,
        expected: &'static str,
    },

    #[error("unknown entity class type `{0}`")]
    UnknownClassType(String),
}

/// Reject empty names.
pub(crate) fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        Err(ModelError::EmptyName)
    } else {
        Ok(())
    }
}

/// Reject names that cannot be written as a bare FGD word.
pub(crate) fn validate_identifier(name: &str) -> Result<(), ModelError> {
    validate_name(name)?;
    if name
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}
