//! Entity class properties.
//!
//! A [`Property`] is one keyvalue line of an entity class body:
//!
//! ```text
//! name(type) readonly report : "Display Name" : default : "Description"
//! ```
//!
//! The three shapes the format knows are modelled by [`PropertyKind`]:
//! - [`PropertyKind::Keyvalue`] carries no extra data.
//! - [`PropertyKind::Choices`] carries the `[ value : "display" ]` item block.
//! - [`PropertyKind::Flags`] carries the `[ bit : "display" : ticked ]` item block.
//!
//! Default values and choice values are stored in their raw textual form. How
//! they are quoted on output is decided by the serializer.

use log::{debug, trace};

use crate::error::{ModelError, validate_identifier};

/// The item payload of a property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyKind {
    #[default]
    Keyvalue,
    Choices(Vec<ChoiceItem>),
    Flags(Vec<FlagItem>),
}

impl PropertyKind {
    /// Pick the kind that matches a declared base type.
    ///
    /// `choices` and `flags` get an empty item list, everything else is a
    /// plain keyvalue.
    pub fn for_base_type(base_type: &str) -> Self {
        match base_type {
            "choices" => PropertyKind::Choices(Vec::new()),
            "flags" => PropertyKind::Flags(Vec::new()),
            _ => PropertyKind::Keyvalue,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PropertyKind::Keyvalue => "keyvalue",
            PropertyKind::Choices(_) => "choices",
            PropertyKind::Flags(_) => "flags",
        }
    }
}

/// One keyvalue declaration of an entity class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    prop_type: String,
    display_name: String,
    default_value: String,
    description: String,
    readonly: bool,
    report: bool,
    kind: PropertyKind,
}

impl Property {
    /// Create a property whose kind follows the declared type.
    ///
    /// `prop_type` is the raw text between the parentheses and may carry
    /// trailing qualifiers (`choices,some,qualifier`). Only the part before
    /// the first comma decides the kind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is empty and
    /// [`ModelError::InvalidName`] if it is not a bare word.
    pub fn new(name: impl Into<String>, prop_type: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        validate_identifier(&name)?;
        let prop_type = prop_type.into();
        let kind = PropertyKind::for_base_type(&base_type_of(&prop_type));
        Ok(Self {
            name,
            prop_type,
            display_name: String::new(),
            default_value: String::new(),
            description: String::new(),
            readonly: false,
            report: false,
            kind,
        })
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the property.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is empty and
    /// [`ModelError::InvalidName`] if it is not a bare word.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        let name = name.into();
        validate_identifier(&name)?;
        self.name = name;
        Ok(())
    }

    /// The raw declared type, including any trailing qualifiers.
    pub fn prop_type(&self) -> &str {
        &self.prop_type
    }

    /// Change the declared type.
    ///
    /// Items survive as long as the kind stays the same. Moving to a type of
    /// another kind resets the payload to that kind's empty form.
    pub fn set_prop_type(&mut self, prop_type: impl Into<String>) {
        self.prop_type = prop_type.into();
        let kind = PropertyKind::for_base_type(&self.base_type());
        if kind.label() != self.kind.label() {
            trace!(property = self.name.as_str(), kind = kind.label(); "Property kind changed");
            self.kind = kind;
        }
    }

    /// The lower-cased declared type before the first comma.
    pub fn base_type(&self) -> String {
        base_type_of(&self.prop_type)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    /// The default value in its raw textual form.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn set_default_value(&mut self, default_value: impl Into<String>) {
        self.default_value = default_value.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    pub fn report(&self) -> bool {
        self.report
    }

    pub fn set_report(&mut self, report: bool) {
        self.report = report;
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// The choice items, or `None` if this is not a choices property.
    pub fn choices(&self) -> Option<&[ChoiceItem]> {
        match &self.kind {
            PropertyKind::Choices(items) => Some(items),
            _ => None,
        }
    }

    /// The flag items, or `None` if this is not a flags property.
    pub fn flags(&self) -> Option<&[FlagItem]> {
        match &self.kind {
            PropertyKind::Flags(items) => Some(items),
            _ => None,
        }
    }

    /// Append a choice item.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KindMismatch`] if this is not a choices property.
    pub fn add_choice(&mut self, item: ChoiceItem) -> Result<(), ModelError> {
        if let PropertyKind::Choices(items) = &mut self.kind {
            items.push(item);
            return Ok(());
        }
        Err(self.mismatch("choices"))
    }

    /// Remove the choice item at `index`.
    ///
    /// Returns `None` if this is not a choices property or the index is out
    /// of range.
    pub fn remove_choice(&mut self, index: usize) -> Option<ChoiceItem> {
        match &mut self.kind {
            PropertyKind::Choices(items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Append a flag item.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KindMismatch`] if this is not a flags property.
    pub fn add_flag(&mut self, item: FlagItem) -> Result<(), ModelError> {
        if let PropertyKind::Flags(items) = &mut self.kind {
            items.push(item);
            return Ok(());
        }
        Err(self.mismatch("flags"))
    }

    /// Remove the flag item at `index`.
    ///
    /// Returns `None` if this is not a flags property or the index is out of
    /// range.
    pub fn remove_flag(&mut self, index: usize) -> Option<FlagItem> {
        match &mut self.kind {
            PropertyKind::Flags(items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> ModelError {
        debug!(
            property = self.name.as_str(),
            actual = self.kind.label(),
            expected;
            "Rejected item for property of another kind"
        );
        ModelError::KindMismatch {
            property: self.name.clone(),
            expected,
        }
    }
}

/// Lower-cased type text before the first comma, trimmed.
pub fn base_type_of(prop_type: &str) -> String {
    prop_type
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// One `value : "display" : "description"` line of a choices block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    value: String,
    display_name: String,
    description: String,
}

impl ChoiceItem {
    /// Create a choice item. The value may be empty, as in `"" : "Default"`.
    pub fn new(value: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_name: display_name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

/// One `bit : "display" : ticked : "description"` line of a flags block.
///
/// `value` is kept exactly as written. It is not required to be unique or a
/// power of two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagItem {
    value: i64,
    display_name: String,
    description: String,
    default_ticked: bool,
}

impl FlagItem {
    pub fn new(value: i64, display_name: impl Into<String>) -> Self {
        Self {
            value,
            display_name: display_name.into(),
            description: String::new(),
            default_ticked: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default_ticked(mut self, default_ticked: bool) -> Self {
        self.default_ticked = default_ticked;
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn default_ticked(&self) -> bool {
        self.default_ticked
    }

    pub fn set_default_ticked(&mut self, default_ticked: bool) {
        self.default_ticked = default_ticked;
    }
}
