//! Configuration types for FGD output.
//!
//! This module provides the configuration structures that control how
//! documents are written back to text. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`FormatConfig`] - Indentation and spacing of serialized documents.
//! - [`Indent`] - One indentation step: a tab or a number of spaces.
//!
//! # Example
//!
//! ```
//! # use fgd::config::{AppConfig, Indent};
//! let config = AppConfig::default();
//! assert_eq!(config.format().indent(), Indent::Spaces(4));
//! assert_eq!(config.format().blank_lines(), 1);
//! ```

use std::fmt;

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Output formatting section.
    #[serde(default)]
    format: FormatConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given formatting options.
    pub fn new(format: FormatConfig) -> Self {
        Self { format }
    }

    /// Returns the formatting configuration.
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }
}

/// How the serializer lays out a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatConfig {
    /// One level of indentation inside blocks.
    #[serde(default)]
    indent: Indent,

    /// Empty lines between top-level elements.
    #[serde(default = "default_blank_lines")]
    blank_lines: usize,
}

fn default_blank_lines() -> usize {
    1
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            blank_lines: default_blank_lines(),
        }
    }
}

impl FormatConfig {
    /// Creates a new [`FormatConfig`].
    ///
    /// # Arguments
    ///
    /// * `indent` - One level of block indentation.
    /// * `blank_lines` - Number of empty lines between top-level elements.
    pub fn new(indent: Indent, blank_lines: usize) -> Self {
        Self {
            indent,
            blank_lines,
        }
    }

    /// Returns the indentation step.
    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// Returns the number of empty lines between top-level elements.
    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }
}

/// One indentation step.
///
/// In TOML this is either the string `"tab"` or a number of spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentSetting")]
pub enum Indent {
    Tab,
    Spaces(u8),
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab => f.write_str("\t"),
            Self::Spaces(count) => write!(f, "{:width$}", "", width = usize::from(*count)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndentSetting {
    Named(String),
    Width(u8),
}

impl TryFrom<IndentSetting> for Indent {
    type Error = String;

    fn try_from(setting: IndentSetting) -> Result<Self, Self::Error> {
        match setting {
            IndentSetting::Width(count) => Ok(Self::Spaces(count)),
            IndentSetting::Named(name) if name.eq_ignore_ascii_case("tab") => Ok(Self::Tab),
            IndentSetting::Named(name) => Err(format!(
                "invalid indent `{name}`: expected \"tab\" or a number of spaces"
            )),
        }
    }
}
