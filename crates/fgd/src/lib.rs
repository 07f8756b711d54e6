//! FGD - read, edit and write Forge Game Data files.
//!
//! FGD files describe the entity classes a level editor offers: their
//! keyvalues, spawnflags, inputs and outputs. This crate ties the document
//! model of `fgd-core` and the error-tolerant parser of `fgd-parser` together
//! and adds the serializer that writes documents back to text.
//!
//! # Example
//!
//! ```
//! use fgd::FgdBuilder;
//!
//! let builder = FgdBuilder::default();
//! let parsed = builder.parse(r#"@PointClass = info_target : "A target" []"#);
//! assert!(parsed.diagnostics().is_empty());
//!
//! let text = builder.serialize(parsed.document());
//! assert_eq!(text, "@PointClass = info_target : \"A target\"\n[\n]\n");
//! ```

pub mod config;

mod error;
mod serialize;

pub use fgd_core::{
    AutoVisGroup, ChoiceItem, ClassType, Document, Element, EntityClass, FlagItem, Include, Io,
    IoDirection, MapSize, MaterialExclusion, ModelError, Property, PropertyKind, Version,
    VisGroupChild,
};
pub use fgd_parser::{
    Parsed, Span,
    error::{Diagnostic, ErrorCode, ParseError, Severity},
};

pub use error::FgdError;
pub use serialize::Serializer;

use std::{fs, path::Path};

use log::{debug, info};

use config::AppConfig;

/// Entry point for parsing and writing FGD documents with one configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use fgd::{FgdBuilder, config::AppConfig};
///
/// let builder = FgdBuilder::new(AppConfig::default());
/// let parsed = builder.parse_file("halflife.fgd").expect("Failed to read");
/// for diagnostic in parsed.diagnostics() {
///     eprintln!("{diagnostic}");
/// }
/// builder
///     .write_file(parsed.document(), "halflife.formatted.fgd")
///     .expect("Failed to write");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FgdBuilder {
    config: AppConfig,
}

impl FgdBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder writes with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse FGD source text.
    ///
    /// Parsing never fails: problems in the text are skipped and reported
    /// through [`Parsed::diagnostics`].
    pub fn parse(&self, source: &str) -> Parsed {
        fgd_parser::parse_str(source)
    }

    /// Read and parse an FGD file.
    ///
    /// # Errors
    ///
    /// Returns [`FgdError::Parse`] when the file cannot be read or is not
    /// valid UTF-8.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Parsed, FgdError> {
        Ok(fgd_parser::parse_file(path)?)
    }

    /// Render `document` as FGD text using the configured format.
    pub fn serialize(&self, document: &Document) -> String {
        Serializer::new(self.config.format()).serialize(document)
    }

    /// Render `document` and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FgdError::Io`] when the file cannot be written.
    pub fn write_file(&self, document: &Document, path: impl AsRef<Path>) -> Result<(), FgdError> {
        let path = path.as_ref();
        let text = self.serialize(document);
        fs::write(path, &text)?;
        info!(path = path.display().to_string(), bytes = text.len(); "Wrote FGD file");
        Ok(())
    }
}

/// Render `document` with the default format.
pub fn serialize(document: &Document) -> String {
    FgdBuilder::default().serialize(document)
}

/// The starter document for a new file: a base class and one light entity
/// deriving from it.
///
/// # Errors
///
/// Returns [`FgdError::Model`] if a class of the template is rejected by the
/// document model.
pub fn template_document() -> Result<Document, FgdError> {
    let base = EntityClass::new(ClassType::BaseClass, "BaseEntity")?
        .with_description("A base class for other entities to inherit from.")
        .with_property(
            Property::new("targetname", "string")?
                .with_display_name("Name")
                .with_description("The name that other entities use to target this entity."),
        );

    let light = EntityClass::new(ClassType::PointClass, "light_example")?
        .with_description("A simple point light source.")
        .with_base_classes(["BaseEntity"])
        .with_helper("color", "255 220 180")
        .with_helper("iconsprite", "\"sprites/light.spr\"")
        .with_property(
            Property::new("brightness", "integer")?
                .with_display_name("Light Brightness")
                .with_default_value("200")
                .with_description("How bright the light is."),
        );

    let mut document = Document::new();
    document.add_element(base)?;
    document.add_element(light)?;
    debug!(elements = document.len(); "Built template document");
    Ok(document)
}
