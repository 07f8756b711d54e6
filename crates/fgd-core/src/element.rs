//! Top-level FGD elements.
//!
//! Every line of an FGD file that starts with `@` introduces one [`Element`].
//! Entity classes are by far the most common; the remaining directives
//! configure the editor itself.

use std::borrow::Cow;

use crate::entity::EntityClass;

/// `@include "base.fgd"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub file_path: String,
}

/// `@mapsize(-16384, 16384)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    pub min: i64,
    pub max: i64,
}

/// `@version(2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub number: u32,
}

/// A `@MaterialExclusion` block listing material directories the editor
/// should hide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaterialExclusion {
    pub excluded_paths: Vec<String>,
}

/// One entry of an [`AutoVisGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisGroupChild {
    /// An entity class name. Not checked against the classes of the document.
    Entity(String),
    /// A nested group with its own children.
    Group(AutoVisGroup),
}

/// An `@AutoVisGroup = "Parent"` block.
///
/// ```text
/// @AutoVisGroup = "Lights"
/// [
///     "Spot"
///     [
///         "light_spot"
///     ]
///     "light"
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoVisGroup {
    pub parent_name: String,
    pub children: Vec<VisGroupChild>,
}

impl AutoVisGroup {
    pub fn new(parent_name: impl Into<String>) -> Self {
        Self {
            parent_name: parent_name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_entity(mut self, name: impl Into<String>) -> Self {
        self.children.push(VisGroupChild::Entity(name.into()));
        self
    }

    pub fn with_group(mut self, group: AutoVisGroup) -> Self {
        self.children.push(VisGroupChild::Group(group));
        self
    }

    /// Nesting depth: 1 for a group with no sub-groups.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                VisGroupChild::Entity(_) => 0,
                VisGroupChild::Group(group) => group.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

/// A top-level element of an FGD document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Include(Include),
    MapSize(MapSize),
    Version(Version),
    MaterialExclusion(MaterialExclusion),
    AutoVisGroup(AutoVisGroup),
    EntityClass(EntityClass),
}

impl Element {
    /// The label an editor shows for this element.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Element::Include(include) => format!("@include \"{}\"", include.file_path).into(),
            Element::MapSize(_) => "@mapsize".into(),
            Element::Version(_) => "@version".into(),
            Element::MaterialExclusion(_) => "@MaterialExclusion".into(),
            Element::AutoVisGroup(group) => format!("VisGroup: {}", group.parent_name).into(),
            Element::EntityClass(class) => class.name().into(),
        }
    }

    /// A short description of this element.
    pub fn description(&self) -> Cow<'_, str> {
        match self {
            Element::Include(include) => {
                format!("Includes definitions from '{}'", include.file_path).into()
            }
            Element::MapSize(size) => {
                format!("Defines map bounds from {} to {}", size.min, size.max).into()
            }
            Element::Version(version) => {
                format!("Specifies FGD version {}", version.number).into()
            }
            Element::MaterialExclusion(exclusion) => format!(
                "Excludes {} material paths",
                exclusion.excluded_paths.len()
            )
            .into(),
            Element::AutoVisGroup(_) => "Editor automatic visibility group".into(),
            Element::EntityClass(class) => class.description().into(),
        }
    }

    pub fn as_entity_class(&self) -> Option<&EntityClass> {
        match self {
            Element::EntityClass(class) => Some(class),
            _ => None,
        }
    }
}

impl From<EntityClass> for Element {
    fn from(class: EntityClass) -> Self {
        Element::EntityClass(class)
    }
}

impl From<Include> for Element {
    fn from(include: Include) -> Self {
        Element::Include(include)
    }
}

impl From<AutoVisGroup> for Element {
    fn from(group: AutoVisGroup) -> Self {
        Element::AutoVisGroup(group)
    }
}
