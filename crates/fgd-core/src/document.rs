//! The FGD document and its lookup indices.
//!
//! A [`Document`] owns the ordered list of top-level [`Element`]s and keeps
//! two indices next to it:
//!
//! - the class index, mapping every entity class name to its position, and
//! - the base-class index, holding the subset whose type is `@BaseClass`.
//!
//! All mutation goes through `Document` so the list and both indices change
//! together. Entity class contents (properties, IO, helpers) can be edited
//! freely through [`Document::class_mut`], because they do not take part in
//! either index.
//!
//! Documents produced by the parser may contain two classes with the same
//! name. Such documents are accepted as-is; lookups then resolve to the first
//! class with that name.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    element::Element,
    entity::{ClassType, EntityClass},
    error::{ModelError, validate_identifier},
};

/// An in-memory FGD file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
    class_index: HashMap<String, usize>,
    base_index: HashMap<String, usize>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// All elements in file order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an element.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if the element is an entity class
    /// whose name is already taken.
    pub fn add_element(&mut self, element: impl Into<Element>) -> Result<(), ModelError> {
        let element = element.into();
        if let Element::EntityClass(class) = &element {
            if self.class_index.contains_key(class.name()) {
                return Err(ModelError::DuplicateName(class.name().to_string()));
            }
        }
        self.push(element);
        Ok(())
    }

    /// Append an element without the duplicate-name check.
    ///
    /// Returns `false` if the element is an entity class whose name was
    /// already present. The element is appended either way.
    pub fn push(&mut self, element: impl Into<Element>) -> bool {
        let element = element.into();
        let position = self.elements.len();
        let is_new = match &element {
            Element::EntityClass(class) => self.index_class(class, position),
            _ => true,
        };
        self.elements.push(element);
        is_new
    }

    /// Remove the element at `index`.
    pub fn remove_element(&mut self, index: usize) -> Option<Element> {
        if index >= self.elements.len() {
            return None;
        }
        let element = self.elements.remove(index);
        debug!(element = &*element.name(), index; "Removed element");
        self.reindex();
        Some(element)
    }

    /// Replace the element at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateName`] if the replacement is an entity
    /// class whose name belongs to another class of this document.
    pub fn replace_element(
        &mut self,
        index: usize,
        element: impl Into<Element>,
    ) -> Result<Option<Element>, ModelError> {
        let element = element.into();
        if index >= self.elements.len() {
            return Ok(None);
        }
        if let Element::EntityClass(class) = &element {
            let taken = self
                .class_index
                .get(class.name())
                .is_some_and(|&position| position != index);
            if taken {
                return Err(ModelError::DuplicateName(class.name().to_string()));
            }
        }
        let old = std::mem::replace(&mut self.elements[index], element);
        self.reindex();
        Ok(Some(old))
    }

    /// Remove the entity class with the given name.
    pub fn remove_class(&mut self, name: &str) -> Option<EntityClass> {
        let position = *self.class_index.get(name)?;
        match self.remove_element(position)? {
            Element::EntityClass(class) => Some(class),
            // The class index only ever points at entity classes.
            _ => None,
        }
    }

    /// Rename an entity class.
    ///
    /// # Errors
    ///
    /// - [`ModelError::EmptyName`] if `new_name` is empty
    /// - [`ModelError::InvalidName`] if `new_name` is not a bare word
    /// - [`ModelError::UnknownClass`] if no class is named `old_name`
    /// - [`ModelError::DuplicateName`] if another class is named `new_name`
    pub fn rename_class(&mut self, old_name: &str, new_name: &str) -> Result<(), ModelError> {
        validate_identifier(new_name)?;
        let position = *self
            .class_index
            .get(old_name)
            .ok_or_else(|| ModelError::UnknownClass(old_name.to_string()))?;
        if old_name == new_name {
            return Ok(());
        }
        if self.class_index.contains_key(new_name) {
            return Err(ModelError::DuplicateName(new_name.to_string()));
        }
        if let Element::EntityClass(class) = &mut self.elements[position] {
            class.set_name(new_name.to_string());
        }
        debug!(old_name, new_name; "Renamed entity class");
        self.reindex();
        Ok(())
    }

    /// Change the type of an entity class, moving it in or out of the
    /// base-class index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownClass`] if no class has this name.
    pub fn set_class_type(&mut self, name: &str, class_type: ClassType) -> Result<(), ModelError> {
        let position = *self
            .class_index
            .get(name)
            .ok_or_else(|| ModelError::UnknownClass(name.to_string()))?;
        if let Element::EntityClass(class) = &mut self.elements[position] {
            trace!(name, from = class.class_type().as_str(), to = class_type.as_str(); "Changing class type");
            class.set_class_type(class_type);
        }
        self.reindex();
        Ok(())
    }

    /// Look up an entity class by name.
    pub fn class(&self, name: &str) -> Option<&EntityClass> {
        self.class_at(*self.class_index.get(name)?)
    }

    /// Look up an entity class by name for editing its contents.
    pub fn class_mut(&mut self, name: &str) -> Option<&mut EntityClass> {
        let position = *self.class_index.get(name)?;
        match self.elements.get_mut(position)? {
            Element::EntityClass(class) => Some(class),
            _ => None,
        }
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.class_index.contains_key(name)
    }

    /// Look up a `@BaseClass` by name.
    pub fn base_class(&self, name: &str) -> Option<&EntityClass> {
        self.class_at(*self.base_index.get(name)?)
    }

    /// Every indexed `@BaseClass`, in file order.
    pub fn base_classes(&self) -> impl Iterator<Item = &EntityClass> {
        let mut positions: Vec<usize> = self.base_index.values().copied().collect();
        positions.sort_unstable();
        positions
            .into_iter()
            .filter_map(|position| self.class_at(position))
    }

    /// Every entity class, in file order, duplicates included.
    pub fn classes(&self) -> impl Iterator<Item = &EntityClass> {
        self.elements.iter().filter_map(Element::as_entity_class)
    }

    fn class_at(&self, position: usize) -> Option<&EntityClass> {
        self.elements.get(position)?.as_entity_class()
    }

    /// Record a class at `position`. First occurrence of a name wins.
    fn index_class(&mut self, class: &EntityClass, position: usize) -> bool {
        if self.class_index.contains_key(class.name()) {
            return false;
        }
        self.class_index.insert(class.name().to_string(), position);
        if class.class_type().is_base() {
            self.base_index.insert(class.name().to_string(), position);
        }
        true
    }

    fn reindex(&mut self) {
        let mut class_index = HashMap::with_capacity(self.class_index.len());
        let mut base_index = HashMap::with_capacity(self.base_index.len());
        for (position, element) in self.elements.iter().enumerate() {
            let Element::EntityClass(class) = element else {
                continue;
            };
            if class_index.contains_key(class.name()) {
                continue;
            }
            class_index.insert(class.name().to_string(), position);
            if class.class_type().is_base() {
                base_index.insert(class.name().to_string(), position);
            }
        }
        self.class_index = class_index;
        self.base_index = base_index;
    }
}
