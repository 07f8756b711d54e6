//! Parse and serialize through the public API.

use fgd::{
    AutoVisGroup, ChoiceItem, ClassType, Document, Element, EntityClass, FgdBuilder, Property,
    VisGroupChild,
    config::{AppConfig, FormatConfig, Indent},
};

/// Parse, serialize, parse again, and check nothing was lost or reported.
fn reparse(document: &Document) -> Document {
    let text = fgd::serialize(document);
    let parsed = fgd_parser::parse_str(&text);
    assert!(
        parsed.diagnostics().is_empty(),
        "serializer output produced diagnostics: {:#?}\n{text}",
        parsed.diagnostics()
    );
    parsed.into_document()
}

#[test]
fn test_keyvalue_default_is_written_bare() {
    let source = r#"@PointClass = light_example : "desc" [ brightness(integer) : "Light Brightness" : "200" : "How bright" ]"#;
    let parsed = fgd_parser::parse_str(source);
    assert!(parsed.diagnostics().is_empty());

    let class = parsed.document().class("light_example").expect("class is indexed");
    assert_eq!(class.class_type(), ClassType::PointClass);
    assert_eq!(class.class_type().to_string(), "PointClass");
    assert_eq!(class.properties().len(), 1);
    let brightness = &class.properties()[0];
    assert_eq!(brightness.name(), "brightness");
    assert_eq!(brightness.default_value(), "200");
    assert!(brightness.choices().is_none() && brightness.flags().is_none());

    let text = fgd::serialize(parsed.document());
    assert!(
        text.contains(r#"brightness(integer) : "Light Brightness" : 200 : "How bright""#),
        "{text}"
    );
    assert!(!text.contains(r#""200""#), "{text}");
}

#[test]
fn test_choice_values_quoted_only_when_not_numeric() {
    let mut property = Property::new("state", "choices")
        .unwrap()
        .with_display_name("State")
        .with_default_value("0");
    property.add_choice(ChoiceItem::new("0", "Off")).unwrap();
    property.add_choice(ChoiceItem::new("1", "On")).unwrap();
    property
        .add_choice(ChoiceItem::new("auto", "Automatic"))
        .unwrap();
    property.add_choice(ChoiceItem::new("", "Default")).unwrap();

    let mut document = Document::new();
    document.push(
        EntityClass::new(ClassType::PointClass, "switch")
            .unwrap()
            .with_property(property),
    );

    let text = fgd::serialize(&document);
    assert!(text.contains("\n        0 : \"Off\"\n"), "{text}");
    assert!(text.contains("\n        1 : \"On\"\n"), "{text}");
    assert!(text.contains("\n        \"auto\" : \"Automatic\"\n"), "{text}");
    assert!(text.contains("\n        \"\" : \"Default\"\n"), "{text}");
    assert_eq!(reparse(&document), document);
}

#[test]
fn test_retyped_property_drops_its_items() {
    let mut property = Property::new("mode", "choices")
        .unwrap()
        .with_default_value("0");
    property.add_choice(ChoiceItem::new("0", "Off")).unwrap();
    property.set_prop_type("string");

    let mut document = Document::new();
    document.push(
        EntityClass::new(ClassType::PointClass, "switch")
            .unwrap()
            .with_property(property),
    );

    let text = fgd::serialize(&document);
    assert!(!text.contains("Off"), "{text}");
    assert_eq!(reparse(&document), document);
}

#[test]
fn test_nested_visgroups_survive_a_round_trip() {
    let source = r#"
@AutoVisGroup = "World"
[
    "Lights"
    [
        "Spot"
        [
            "light_spot"
            "point_spotlight"
        ]
        "light"
    ]
    "func_detail"
]
"#;
    let parsed = fgd_parser::parse_str(source);
    assert!(parsed.diagnostics().is_empty());
    let Some(Element::AutoVisGroup(group)) = parsed.document().elements().first() else {
        panic!("expected an AutoVisGroup");
    };
    assert_eq!(group.depth(), 3);

    let again = reparse(parsed.document());
    assert_eq!(&again, parsed.document());
    let Some(Element::AutoVisGroup(group)) = again.elements().first() else {
        panic!("expected an AutoVisGroup");
    };
    assert_eq!(group.depth(), 3);
    let names: Vec<&str> = group
        .children
        .iter()
        .map(|child| match child {
            VisGroupChild::Entity(name) => name.as_str(),
            VisGroupChild::Group(sub) => sub.parent_name.as_str(),
        })
        .collect();
    assert_eq!(names, vec!["Lights", "func_detail"]);
}

#[test]
fn test_realistic_file_reaches_a_fixed_point() {
    let source = r#"
// Test file
@include "base.fgd"
@mapsize(-16384, 16384)
@version(2)

@MaterialExclusion
[
    // Comment inside the block
    "debug"
    "editor"
]

@BaseClass color(0 200 200) = Targetname
[
	targetname(target_source) : "Name" : : "The name that other entities refer to this entity by."
]

@PointClass base(Targetname) studio("models/props/crate.mdl") size(-16 -16 0, 16 16 32)
	sphere(radius) = prop_crate : "A crate that can be " +
	"broken into pieces."
[
	health(integer) : "Health" : 10
	model(studio) report : "World Model" : "models/props/crate.mdl"
	skin(choices) : "Skin" : 0 : "Which skin" =
	[
		0 : "Wood"
		1 : "Metal" : "Shiny"
	]
	spawnflags(flags) =
	[
		1 : "Break on touch" : 0
		2 : "Break on pressure" : 1 : "Breaks when stood on."
	]
	input Break(void) : "Breaks the crate."
	output OnBreak(void) : "Fired when the crate breaks."
]
"#;
    let parsed = fgd_parser::parse_str(source);
    assert!(parsed.diagnostics().is_empty(), "{:#?}", parsed.diagnostics());

    let crate_class = parsed.document().class("prop_crate").unwrap();
    assert_eq!(
        crate_class.description(),
        "A crate that can be \nbroken into pieces."
    );
    assert_eq!(crate_class.helper("size"), Some("-16 -16 0, 16 16 32"));

    let first = fgd::serialize(parsed.document());
    let document = reparse(parsed.document());
    assert_eq!(&document, parsed.document());
    assert_eq!(fgd::serialize(&document), first);
}

#[test]
fn test_escaped_quotes_round_trip() {
    let mut document = Document::new();
    document.push(
        EntityClass::new(ClassType::PointClass, "sign")
            .unwrap()
            .with_description(r#"Shows "text" on a wall"#)
            .with_property(
                Property::new("message", "string")
                    .unwrap()
                    .with_display_name("Message")
                    .with_default_value(r#"say "hi""#),
            ),
    );
    assert_eq!(reparse(&document), document);
}

#[test]
fn test_template_document() {
    let document = fgd::template_document().expect("template is valid");
    assert_eq!(document.len(), 2);
    assert!(document.base_class("BaseEntity").is_some());

    let light = document.class("light_example").unwrap();
    assert_eq!(light.base_classes(), ["BaseEntity"]);
    assert_eq!(light.color(), Some([255, 220, 180]));
    assert_eq!(light.helper("iconsprite"), Some("\"sprites/light.spr\""));
    assert_eq!(light.properties()[0].default_value(), "200");

    let text = fgd::serialize(&document);
    assert!(text.starts_with(
        "@BaseClass = BaseEntity : \"A base class for other entities to inherit from.\"\n[\n"
    ));
    assert!(text.contains(
        "@PointClass base(BaseEntity) color(255 220 180) iconsprite(\"sprites/light.spr\") = light_example"
    ));
    assert_eq!(reparse(&document), document);
}

#[test]
fn test_builder_uses_configured_format() {
    let config = AppConfig::new(FormatConfig::new(Indent::Tab, 0));
    let builder = FgdBuilder::new(config);

    let mut document = Document::new();
    document.push(AutoVisGroup::new("A").with_entity("a"));
    document.push(AutoVisGroup::new("B"));

    assert_eq!(
        builder.serialize(&document),
        "@AutoVisGroup = \"A\"\n[\n\t\"a\"\n]\n@AutoVisGroup = \"B\"\n[\n]\n"
    );
}

#[test]
fn test_write_file_then_parse_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("template.fgd");

    let builder = FgdBuilder::default();
    let document = fgd::template_document().unwrap();
    builder.write_file(&document, &path).expect("Failed to write");

    let parsed = builder.parse_file(&path).expect("Failed to read");
    assert!(parsed.diagnostics().is_empty());
    assert_eq!(parsed.document(), &document);
}

#[test]
fn test_parse_file_missing_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = FgdBuilder::default().parse_file(dir.path().join("nope.fgd"));
    assert!(matches!(result, Err(fgd::FgdError::Parse(_))));
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str("[format]\nindent = \"tab\"\nblank_lines = 2\n")
        .expect("valid config");
    assert_eq!(config.format().indent(), Indent::Tab);
    assert_eq!(config.format().blank_lines(), 2);

    let config: AppConfig = toml::from_str("[format]\nindent = 2\n").expect("valid config");
    assert_eq!(config.format().indent(), Indent::Spaces(2));
    assert_eq!(config.format().blank_lines(), 1);

    let config: AppConfig = toml::from_str("").expect("empty config");
    assert_eq!(config, AppConfig::default());

    assert!(toml::from_str::<AppConfig>("[format]\nindent = \"wide\"\n").is_err());
}
