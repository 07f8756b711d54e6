//! Entity class definitions.
//!
//! An entity class is the main building block of an FGD file:
//!
//! ```text
//! @PointClass base(Targetname) color(255 200 0) = light_spot : "A cone of light"
//! [
//!     brightness(integer) : "Brightness" : 200
//!     input TurnOn(void) : "Turn the light on."
//! ]
//! ```
//!
//! The class name and class type are indexed by the owning
//! [`Document`](crate::Document), so they can only be changed through it.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::{ModelError, validate_identifier},
    io::{Io, IoDirection},
    property::Property,
};

/// The directive an entity class is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassType {
    BaseClass,
    PointClass,
    SolidClass,
    NpcClass,
    KeyframeClass,
    MoveClass,
    FilterClass,
    ExtendClass,
}

impl ClassType {
    /// All class types, in a stable order.
    pub const ALL: [ClassType; 8] = [
        ClassType::BaseClass,
        ClassType::PointClass,
        ClassType::SolidClass,
        ClassType::NpcClass,
        ClassType::KeyframeClass,
        ClassType::MoveClass,
        ClassType::FilterClass,
        ClassType::ExtendClass,
    ];

    /// The canonical `XxxClass` spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::BaseClass => "BaseClass",
            ClassType::PointClass => "PointClass",
            ClassType::SolidClass => "SolidClass",
            ClassType::NpcClass => "NpcClass",
            ClassType::KeyframeClass => "KeyframeClass",
            ClassType::MoveClass => "MoveClass",
            ClassType::FilterClass => "FilterClass",
            ClassType::ExtendClass => "ExtendClass",
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, ClassType::BaseClass)
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassType {
    type Err = ModelError;

    /// Parse a class type token.
    ///
    /// Matching is case-insensitive, a leading `@` is ignored and the
    /// trailing `class` suffix is optional: `@pointclass`, `PointClass` and
    /// `point` all yield [`ClassType::PointClass`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().trim_start_matches('@').to_ascii_lowercase();
        let stem = lowered.strip_suffix("class").unwrap_or(&lowered);
        match stem {
            "base" => Ok(ClassType::BaseClass),
            "point" => Ok(ClassType::PointClass),
            "solid" => Ok(ClassType::SolidClass),
            "npc" => Ok(ClassType::NpcClass),
            "keyframe" => Ok(ClassType::KeyframeClass),
            "move" => Ok(ClassType::MoveClass),
            "filter" => Ok(ClassType::FilterClass),
            "extend" => Ok(ClassType::ExtendClass),
            _ => Err(ModelError::UnknownClassType(s.to_string())),
        }
    }
}

/// A `@XxxClass` definition with its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityClass {
    class_type: ClassType,
    name: String,
    description: String,
    base_classes: Vec<String>,
    helpers: IndexMap<String, String>,
    properties: Vec<Property>,
    inputs: Vec<Io>,
    outputs: Vec<Io>,
}

impl EntityClass {
    /// Create an empty entity class.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] if `name` is empty and
    /// [`ModelError::InvalidName`] if it holds anything but letters, digits,
    /// `_`, `-` or `.`.
    pub fn new(class_type: ClassType, name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self {
            class_type,
            name,
            description: String::new(),
            base_classes: Vec::new(),
            helpers: IndexMap::new(),
            properties: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_base_classes<I, S>(mut self, base_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_base_classes(base_classes);
        self
    }

    pub fn with_helper(mut self, key: &str, args: impl Into<String>) -> Self {
        self.set_helper(key, args);
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.add_property(property);
        self
    }

    pub fn with_io(mut self, io: Io) -> Self {
        self.add_io(io);
        self
    }

    pub fn class_type(&self) -> ClassType {
        self.class_type
    }

    pub(crate) fn set_class_type(&mut self, class_type: ClassType) {
        self.class_type = class_type;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Callers are responsible for validating the name and keeping the
    /// document indices in step.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Names of the classes listed in `base(...)`, unresolved.
    pub fn base_classes(&self) -> &[String] {
        &self.base_classes
    }

    /// Replace the base class list, dropping blank entries.
    pub fn set_base_classes<I, S>(&mut self, base_classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_classes = base_classes
            .into_iter()
            .map(|base| base.into().trim().to_string())
            .filter(|base| !base.is_empty())
            .collect();
    }

    /// Replace the base class list from comma separated text, as typed into
    /// an editor field (`"Targetname, Parentname"`).
    pub fn set_base_classes_from_str(&mut self, text: &str) {
        self.set_base_classes(text.split(','));
    }

    pub fn add_base_class(&mut self, base: impl Into<String>) {
        let base = base.into();
        let base = base.trim();
        if !base.is_empty() {
            self.base_classes.push(base.to_string());
        }
    }

    /// Helper calls other than `base(...)`, keyed by lower-cased name in
    /// encounter order.
    pub fn helpers(&self) -> &IndexMap<String, String> {
        &self.helpers
    }

    /// Raw argument text of a helper, looked up case-insensitively.
    pub fn helper(&self, key: &str) -> Option<&str> {
        self.helpers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Insert or replace a helper. A replaced helper keeps its position.
    ///
    /// `base` is not a helper: calling this with `base` appends to the base
    /// class list instead.
    pub fn set_helper(&mut self, key: &str, args: impl Into<String>) {
        let key = key.to_ascii_lowercase();
        let args = args.into();
        if key == "base" {
            for base in args.split(',') {
                self.add_base_class(base);
            }
            return;
        }
        trace!(class = self.name.as_str(), helper = key.as_str(); "Setting helper");
        self.helpers.insert(key, args);
    }

    /// Remove a helper, keeping the order of the remaining ones.
    pub fn remove_helper(&mut self, key: &str) -> Option<String> {
        self.helpers.shift_remove(&key.to_ascii_lowercase())
    }

    /// The `color(r g b)` helper as an RGB triple.
    pub fn color(&self) -> Option<[u8; 3]> {
        let mut parts = self.helper("color")?.split_whitespace();
        let rgb = [
            parts.next()?.parse().ok()?,
            parts.next()?.parse().ok()?,
            parts.next()?.parse().ok()?,
        ];
        parts.next().is_none().then_some(rgb)
    }

    /// The `size(x y z, x y z)` helper as a min/max pair.
    pub fn size(&self) -> Option<([f64; 3], [f64; 3])> {
        let (min, max) = self.helper("size")?.split_once(',')?;
        Some((parse_triple(min)?, parse_triple(max)?))
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// First property with the given name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|prop| prop.name() == name)
    }

    /// First property with the given name, mutably.
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|prop| prop.name() == name)
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Remove the property at `index`.
    pub fn remove_property(&mut self, index: usize) -> Option<Property> {
        (index < self.properties.len()).then(|| self.properties.remove(index))
    }

    pub fn inputs(&self) -> &[Io] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Io] {
        &self.outputs
    }

    /// Append an IO entry to the inputs or outputs, by its direction.
    pub fn add_io(&mut self, io: Io) {
        match io.direction() {
            IoDirection::Input => self.inputs.push(io),
            IoDirection::Output => self.outputs.push(io),
        }
    }

    /// Remove the IO entry at `index` of the list for `direction`.
    pub fn remove_io(&mut self, direction: IoDirection, index: usize) -> Option<Io> {
        let list = match direction {
            IoDirection::Input => &mut self.inputs,
            IoDirection::Output => &mut self.outputs,
        };
        (index < list.len()).then(|| list.remove(index))
    }
}

fn parse_triple(text: &str) -> Option<[f64; 3]> {
    let mut parts = text.split_whitespace();
    let triple = [
        parts.next()?.parse().ok()?,
        parts.next()?.parse().ok()?,
        parts.next()?.parse().ok()?,
    ];
    parts.next().is_none().then_some(triple)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_type_from_str() {
        assert_eq!("@PointClass".parse(), Ok(ClassType::PointClass));
        assert_eq!("@pointclass".parse(), Ok(ClassType::PointClass));
        assert_eq!("npc".parse(), Ok(ClassType::NpcClass));
        assert_eq!("KEYFRAMECLASS".parse(), Ok(ClassType::KeyframeClass));
        assert_eq!(
            "@WidgetClass".parse::<ClassType>(),
            Err(ModelError::UnknownClassType("@WidgetClass".to_string()))
        );
    }

    #[test]
    fn test_class_type_round_trips_through_display() {
        for class_type in ClassType::ALL {
            assert_eq!(class_type.to_string().parse(), Ok(class_type));
        }
    }

    #[test]
    fn test_helpers_keep_order_and_lowercase_keys() {
        let class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_helper("Studio", "\"models/thing.mdl\"")
            .with_helper("color", "255 0 0")
            .with_helper("iconsprite", "\"editor/thing.vmt\"");

        let keys: Vec<_> = class.helpers().keys().map(String::as_str).collect();
        assert_eq!(keys, ["studio", "color", "iconsprite"]);
        assert_eq!(class.helper("STUDIO"), Some("\"models/thing.mdl\""));
    }

    #[test]
    fn test_replacing_helper_keeps_position() {
        let mut class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_helper("color", "255 0 0")
            .with_helper("size", "-8 -8 -8, 8 8 8");
        class.set_helper("color", "0 0 255");

        let keys: Vec<_> = class.helpers().keys().map(String::as_str).collect();
        assert_eq!(keys, ["color", "size"]);
        assert_eq!(class.color(), Some([0, 0, 255]));

        assert_eq!(class.remove_helper("Color"), Some("0 0 255".to_string()));
        assert!(class.color().is_none());
    }

    #[test]
    fn test_base_helper_goes_to_base_classes() {
        let mut class = EntityClass::new(ClassType::SolidClass, "func_wall").unwrap();
        class.set_helper("base", "Targetname, RenderFields");
        assert!(class.helpers().is_empty());
        assert_eq!(class.base_classes(), ["Targetname", "RenderFields"]);
    }

    #[test]
    fn test_set_base_classes_from_str_drops_blanks() {
        let mut class = EntityClass::new(ClassType::PointClass, "thing").unwrap();
        class.set_base_classes_from_str(" Targetname, , Angles ,");
        assert_eq!(class.base_classes(), ["Targetname", "Angles"]);
    }

    #[test]
    fn test_size_helper() {
        let class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_helper("size", "-16 -16 0, 16 16 72");
        assert_eq!(
            class.size(),
            Some(([-16.0, -16.0, 0.0], [16.0, 16.0, 72.0]))
        );

        let class = class.with_helper("size", "16 16 16");
        assert!(class.size().is_none());
    }

    #[test]
    fn test_color_helper_rejects_garbage() {
        let class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_helper("color", "255 0");
        assert!(class.color().is_none());

        let class = class.with_helper("color", "300 0 0");
        assert!(class.color().is_none());
    }

    #[test]
    fn test_names_must_be_bare_words() {
        assert!(EntityClass::new(ClassType::PointClass, "prop_door.v2-b").is_ok());
        assert_eq!(
            EntityClass::new(ClassType::PointClass, "my light"),
            Err(ModelError::InvalidName("my light".to_string()))
        );
        assert!(EntityClass::new(ClassType::PointClass, "a[b]").is_err());
    }

    #[test]
    fn test_add_io_routes_by_direction() {
        let class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_io(Io::new(IoDirection::Input, "Enable", "void").unwrap())
            .with_io(Io::new(IoDirection::Output, "OnEnabled", "void").unwrap())
            .with_io(Io::new(IoDirection::Input, "Disable", "void").unwrap());

        assert_eq!(class.inputs().len(), 2);
        assert_eq!(class.outputs().len(), 1);
        assert_eq!(class.outputs()[0].name(), "OnEnabled");
    }

    #[test]
    fn test_remove_property_and_io() {
        let mut class = EntityClass::new(ClassType::PointClass, "thing")
            .unwrap()
            .with_property(Property::new("health", "integer").unwrap())
            .with_property(Property::new("model", "studio").unwrap())
            .with_io(Io::new(IoDirection::Input, "Kill", "void").unwrap());

        assert_eq!(class.remove_property(0).unwrap().name(), "health");
        assert!(class.remove_property(3).is_none());
        assert_eq!(class.properties()[0].name(), "model");

        assert!(class.remove_io(IoDirection::Output, 0).is_none());
        assert_eq!(
            class.remove_io(IoDirection::Input, 0).unwrap().name(),
            "Kill"
        );
    }
}
