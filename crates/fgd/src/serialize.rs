//! Rendering a [`Document`] back to FGD text.
//!
//! The output is canonical: one block per top-level element separated by
//! blank lines, one level of indentation per nested block, and quoting chosen
//! from the property type rather than from how the value was written in the
//! source. Parsing the output again yields the same document.

use std::borrow::Cow;

use log::{debug, trace};

use fgd_core::{
    AutoVisGroup, ChoiceItem, Document, Element, EntityClass, FlagItem, Io, Property,
    PropertyKind, VisGroupChild,
};

use crate::config::FormatConfig;

/// Property base types whose defaults are written without quotes.
const BARE_DEFAULT_TYPES: &[&str] = &[
    "integer", "float", "bool", "angle", "color255", "vector", "flags",
];

/// Writes one document into a string buffer.
///
/// # Examples
///
/// ```
/// use fgd::{Serializer, config::FormatConfig};
/// use fgd_core::{Document, Element, Version};
///
/// let mut document = Document::new();
/// document.push(Element::Version(Version { number: 2 }));
///
/// let format = FormatConfig::default();
/// assert_eq!(Serializer::new(&format).serialize(&document), "@version(2)\n");
/// ```
pub struct Serializer<'a> {
    format: &'a FormatConfig,
    output: String,
}

impl<'a> Serializer<'a> {
    pub fn new(format: &'a FormatConfig) -> Self {
        Self {
            format,
            output: String::new(),
        }
    }

    /// Renders `document`, consuming the serializer.
    pub fn serialize(mut self, document: &Document) -> String {
        for (index, element) in document.elements().iter().enumerate() {
            if index > 0 {
                for _ in 0..self.format.blank_lines() {
                    self.output.push('\n');
                }
            }
            self.element(element);
        }
        debug!(elements = document.len(), bytes = self.output.len(); "Serialized document");
        self.output
    }

    fn element(&mut self, element: &Element) {
        trace!(element = element.name().as_ref(); "Writing element");
        match element {
            Element::Include(include) => {
                let line = format!("@include {}", self.quoted(&include.file_path, 0));
                self.line(0, &line);
            }
            Element::MapSize(size) => {
                self.line(0, &format!("@mapsize({}, {})", size.min, size.max));
            }
            Element::Version(version) => {
                self.line(0, &format!("@version({})", version.number));
            }
            Element::MaterialExclusion(exclusion) => {
                self.line(0, "@MaterialExclusion");
                self.line(0, "[");
                for path in &exclusion.excluded_paths {
                    let line = self.quoted(path, 1);
                    self.line(1, &line);
                }
                self.line(0, "]");
            }
            Element::AutoVisGroup(group) => {
                let line = format!("@AutoVisGroup = {}", self.quoted(&group.parent_name, 0));
                self.line(0, &line);
                self.visgroup_block(group, 0);
            }
            Element::EntityClass(class) => self.entity_class(class),
        }
    }

    fn visgroup_block(&mut self, group: &AutoVisGroup, depth: usize) {
        self.line(depth, "[");
        for child in &group.children {
            match child {
                VisGroupChild::Entity(name) => {
                    let line = self.quoted(name, depth + 1);
                    self.line(depth + 1, &line);
                }
                VisGroupChild::Group(sub) => {
                    let line = self.quoted(&sub.parent_name, depth + 1);
                    self.line(depth + 1, &line);
                    self.visgroup_block(sub, depth + 1);
                }
            }
        }
        self.line(depth, "]");
    }

    fn entity_class(&mut self, class: &EntityClass) {
        let mut header = format!("@{}", class.class_type());
        if !class.base_classes().is_empty() {
            header.push_str(" base(");
            header.push_str(&class.base_classes().join(", "));
            header.push(')');
        }
        for (key, args) in class.helpers() {
            header.push(' ');
            header.push_str(&self.helper(key, args));
        }
        header.push_str(" = ");
        header.push_str(class.name());
        if !class.description().is_empty() {
            header.push_str(" : ");
            header.push_str(&self.quoted(class.description(), 0));
        }
        self.line(0, &header);

        self.line(0, "[");
        for property in class.properties() {
            self.property(property);
        }
        for io in class.inputs().iter().chain(class.outputs()) {
            self.io(io);
        }
        self.line(0, "]");
    }

    /// `key(args)`, or an indented block when the arguments span lines.
    fn helper(&self, key: &str, args: &str) -> String {
        if !args.contains('\n') {
            return format!("{key}({args})");
        }
        let indent = self.indent(1);
        let mut text = format!("{key}(\n");
        for line in args.lines() {
            text.push_str(&indent);
            text.push_str(line);
            text.push('\n');
        }
        text.push(')');
        text
    }

    fn property(&mut self, property: &Property) {
        let mut line = format!("{}({})", property.name(), property.prop_type());
        if property.readonly() {
            line.push_str(" readonly");
        }
        if property.report() {
            line.push_str(" report");
        }
        for column in self.property_columns(property) {
            line.push_str(" : ");
            line.push_str(&column);
        }

        match property.kind() {
            PropertyKind::Choices(items) if !items.is_empty() => {
                line.push_str(" =");
                self.line(1, &line);
                self.line(1, "[");
                for item in items {
                    self.choice_item(item);
                }
                self.line(1, "]");
            }
            PropertyKind::Flags(items) if !items.is_empty() => {
                line.push_str(" =");
                self.line(1, &line);
                self.line(1, "[");
                for item in items {
                    self.flag_item(item);
                }
                self.line(1, "]");
            }
            _ => self.line(1, &line),
        }
    }

    /// The fewest `display : default : description` columns that keep every
    /// non-empty value in its position.
    fn property_columns(&self, property: &Property) -> Vec<String> {
        let count = if !property.description().is_empty() {
            3
        } else if !property.default_value().is_empty() {
            2
        } else if !property.display_name().is_empty() {
            1
        } else {
            0
        };

        let mut columns = Vec::with_capacity(count);
        if count >= 1 {
            columns.push(self.quoted(property.display_name(), 1));
        }
        if count >= 2 {
            columns.push(self.default_value(property));
        }
        if count >= 3 {
            columns.push(self.quoted(property.description(), 1));
        }
        columns
    }

    fn default_value(&self, property: &Property) -> String {
        let value = property.default_value();
        let base_type = property.base_type();
        let bare = if base_type == "choices" {
            is_numeric(value)
        } else {
            BARE_DEFAULT_TYPES.contains(&base_type.as_str()) && is_bare_safe(value)
        };
        if bare {
            value.to_string()
        } else {
            self.quoted(value, 1)
        }
    }

    fn choice_item(&mut self, item: &ChoiceItem) {
        let value = if is_numeric(item.value()) {
            item.value().to_string()
        } else {
            self.quoted(item.value(), 2)
        };
        let mut line = format!("{value} : {}", self.quoted(item.display_name(), 2));
        if !item.description().is_empty() {
            line.push_str(" : ");
            line.push_str(&self.quoted(item.description(), 2));
        }
        self.line(2, &line);
    }

    fn flag_item(&mut self, item: &FlagItem) {
        let mut line = format!(
            "{} : {} : {}",
            item.value(),
            self.quoted(item.display_name(), 2),
            u8::from(item.default_ticked())
        );
        if !item.description().is_empty() {
            line.push_str(" : ");
            line.push_str(&self.quoted(item.description(), 2));
        }
        self.line(2, &line);
    }

    fn io(&mut self, io: &Io) {
        let mut line = format!("{} {}({})", io.direction(), io.name(), io.arg_type());
        if !io.description().is_empty() {
            line.push_str(" : ");
            line.push_str(&self.quoted(io.description(), 1));
        }
        self.line(1, &line);
    }

    /// A quoted string. Each embedded newline starts a `+` continuation
    /// segment, indented one level deeper than the line it belongs to.
    fn quoted(&self, text: &str, depth: usize) -> String {
        let separator = format!("\" +\n{}\"", self.indent(depth + 1));
        let segments: Vec<Cow<'_, str>> = text.split('\n').map(escape).collect();
        format!("\"{}\"", segments.join(separator.as_str()))
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.output.push_str(&self.indent(depth));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn indent(&self, depth: usize) -> String {
        self.format.indent().to_string().repeat(depth)
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if text.contains('"') {
        Cow::Owned(text.replace('"', "\\\""))
    } else {
        Cow::Borrowed(text)
    }
}

/// An optional minus sign, digits and at most one decimal point.
fn is_numeric(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Text that reads back unchanged as an unquoted column.
fn is_bare_safe(text: &str) -> bool {
    !text.is_empty()
        && text.trim() == text
        && !text.contains("//")
        && !text.contains(|c: char| {
            matches!(
                c,
                ':' | '"' | '=' | '[' | ']' | '(' | ')' | '{' | '}' | '\\' | '\n'
            )
        })
}
