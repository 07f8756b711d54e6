//! Entity inputs and outputs.

use std::fmt;

use crate::error::{ModelError, validate_name};

/// Whether an [`Io`] entry receives or fires events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoDirection {
    Input,
    Output,
}

impl IoDirection {
    /// The lower-case keyword used in FGD text.
    pub fn keyword(&self) -> &'static str {
        match self {
            IoDirection::Input => "input",
            IoDirection::Output => "output",
        }
    }
}

impl fmt::Display for IoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single `input` or `output` line of an entity class body.
///
/// ```text
/// input Toggle(void) : "Toggle the light on or off."
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Io {
    direction: IoDirection,
    name: String,
    arg_type: String,
    description: String,
}

impl Io {
    /// Create a new IO entry.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is empty.
    pub fn new(
        direction: IoDirection,
        name: impl Into<String>,
        arg_type: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            direction,
            name,
            arg_type: arg_type.into(),
            description: String::new(),
        })
    }

    /// Set the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn direction(&self) -> IoDirection {
        self.direction
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entry.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// The raw argument type, e.g. `void`, `integer` or `target_destination`.
    pub fn arg_type(&self) -> &str {
        &self.arg_type
    }

    pub fn set_arg_type(&mut self, arg_type: impl Into<String>) {
        self.arg_type = arg_type.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}
