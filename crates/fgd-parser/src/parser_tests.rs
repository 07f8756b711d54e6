//! Unit tests for the directive parser.
//!
//! These tests cover every directive, the entity class header and body
//! forms, and recovery from malformed input.

use fgd_core::{ClassType, Element, EntityClass, IoDirection, PropertyKind, VisGroupChild};

use crate::{
    Parsed,
    error::{ErrorCode, Severity},
    parse_str,
};

/// Parse and assert that no diagnostics were produced.
fn parse_clean(source: &str) -> Parsed {
    let parsed = parse_str(source);
    assert!(
        parsed.diagnostics().is_empty(),
        "expected no diagnostics, got: {:#?}",
        parsed.diagnostics()
    );
    parsed
}

/// The error codes of all diagnostics, in order.
fn codes(parsed: &Parsed) -> Vec<ErrorCode> {
    parsed.diagnostics().iter().map(|diag| diag.code()).collect()
}

fn only_class(parsed: &Parsed) -> &EntityClass {
    let classes: Vec<&EntityClass> = parsed.document().classes().collect();
    assert_eq!(classes.len(), 1, "expected exactly one class");
    classes[0]
}

mod directives {
    use super::*;

    #[test]
    fn test_simple_directives_in_order() {
        let parsed = parse_clean(
            r#"
@include "base.fgd"
@mapsize(-16384, 16384)
@version(2)
"#,
        );
        let elements = parsed.document().elements();
        assert_eq!(elements.len(), 3);
        match &elements[0] {
            Element::Include(include) => assert_eq!(include.file_path, "base.fgd"),
            other => panic!("expected include, got {other:?}"),
        }
        match &elements[1] {
            Element::MapSize(size) => {
                assert_eq!(size.min, -16384);
                assert_eq!(size.max, 16384);
            }
            other => panic!("expected mapsize, got {other:?}"),
        }
        match &elements[2] {
            Element::Version(version) => assert_eq!(version.number, 2),
            other => panic!("expected version, got {other:?}"),
        }
    }

    #[test]
    fn test_material_exclusion() {
        let parsed = parse_clean(
            r#"
@MaterialExclusion
[
    // Skip these
    "debug"
    "tools/toolsnodraw"
]
"#,
        );
        match &parsed.document().elements()[0] {
            Element::MaterialExclusion(exclusion) => {
                assert_eq!(exclusion.excluded_paths, vec!["debug", "tools/toolsnodraw"]);
            }
            other => panic!("expected material exclusion, got {other:?}"),
        }
    }

    #[test]
    fn test_material_exclusion_without_block_is_empty() {
        let parsed = parse_clean("@MaterialExclusion\n@version(1)");
        assert_eq!(parsed.document().len(), 2);
        match &parsed.document().elements()[0] {
            Element::MaterialExclusion(exclusion) => assert!(exclusion.excluded_paths.is_empty()),
            other => panic!("expected material exclusion, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_autovisgroup() {
        let parsed = parse_clean(
            r#"
@AutoVisGroup = "Lights"
[
    "Spot"
    [
        "light_spot"
        "Dynamic"
        [
            "light_dynamic"
        ]
    ]
    "light"
]
"#,
        );
        let Element::AutoVisGroup(group) = &parsed.document().elements()[0] else {
            panic!("expected an AutoVisGroup");
        };
        assert_eq!(group.parent_name, "Lights");
        assert_eq!(group.depth(), 3);
        assert_eq!(group.children.len(), 2);

        let VisGroupChild::Group(spot) = &group.children[0] else {
            panic!("expected a sub-group");
        };
        assert_eq!(spot.parent_name, "Spot");
        assert_eq!(
            spot.children[0],
            VisGroupChild::Entity("light_spot".to_string())
        );
        assert!(matches!(&spot.children[1], VisGroupChild::Group(g) if g.parent_name == "Dynamic"));
        assert_eq!(group.children[1], VisGroupChild::Entity("light".to_string()));
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let parsed = parse_clean("\u{feff}@PointClass = x []\n");
        assert!(parsed.document().contains_class("x"));
    }

    #[test]
    fn test_directives_are_case_insensitive() {
        let parsed = parse_clean("@INCLUDE \"a.fgd\"\n@MapSize(0, 1)\n@pointclass = x []");
        assert_eq!(parsed.document().len(), 3);
        assert!(parsed.document().contains_class("x"));
    }
}

mod entity_classes {
    use super::*;

    #[test]
    fn test_full_class() {
        let parsed = parse_clean(
            r#"
@BaseClass = Targetname
[
    targetname(target_source) : "Name" : : "The name other entities use."
    input Kill(void) : "Removes this entity."
]

@PointClass base(Targetname) color(255 200 0) iconsprite("sprites/light.vmt") = light : "A point light"
[
    _light(color255) : "Brightness" : "255 255 255 200"
    style(choices) : "Appearance" : 0 =
    [
        0 : "Normal"
        10 : "Fluorescent flicker" : "Flickers like a bad tube."
    ]
    spawnflags(flags) =
    [
        1 : "Initially dark" : 0
        2 : "Debug" : 1 : "Print state changes."
    ]
    input TurnOn(void) : "Turn the light on."
    output OnTurnedOn(void) : "Fired when the light turns on."
]
"#,
        );
        let document = parsed.document();
        assert_eq!(document.len(), 2);
        assert!(document.base_class("Targetname").is_some());

        let light = document.class("light").unwrap();
        assert_eq!(light.class_type(), ClassType::PointClass);
        assert_eq!(light.description(), "A point light");
        assert_eq!(light.base_classes(), ["Targetname"]);
        assert_eq!(light.helper("color"), Some("255 200 0"));
        assert_eq!(light.helper("iconsprite"), Some("\"sprites/light.vmt\""));
        assert_eq!(light.color(), Some([255, 200, 0]));

        let properties = light.properties();
        assert_eq!(properties.len(), 3);
        assert_eq!(properties[0].name(), "_light");
        assert_eq!(properties[0].default_value(), "255 255 255 200");

        let choices = properties[1].choices().unwrap();
        assert_eq!(properties[1].default_value(), "0");
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[1].value(), "10");
        assert_eq!(choices[1].description(), "Flickers like a bad tube.");

        let flags = properties[2].flags().unwrap();
        assert_eq!(flags.len(), 2);
        assert!(!flags[0].default_ticked());
        assert!(flags[1].default_ticked());
        assert_eq!(flags[1].description(), "Print state changes.");

        assert_eq!(light.inputs().len(), 1);
        assert_eq!(light.inputs()[0].direction(), IoDirection::Input);
        assert_eq!(light.outputs().len(), 1);
        assert_eq!(light.outputs()[0].description(), "Fired when the light turns on.");
    }

    #[test]
    fn test_compact_single_line_class() {
        let parsed = parse_clean(
            r#"@PointClass = light_example : "Example" [ brightness(integer) : "Light Brightness" : 200 : "How bright the light is." ]"#,
        );
        let class = only_class(&parsed);
        assert_eq!(class.name(), "light_example");
        let property = &class.properties()[0];
        assert_eq!(property.display_name(), "Light Brightness");
        assert_eq!(property.default_value(), "200");
        assert_eq!(property.description(), "How bright the light is.");
    }

    #[test]
    fn test_header_without_body() {
        let parsed = parse_clean("@SolidClass = worldspawn\n@PointClass = info_null []");
        assert_eq!(parsed.document().len(), 2);
        let world = parsed.document().class("worldspawn").unwrap();
        assert!(world.properties().is_empty());
    }

    #[test]
    fn test_multi_line_header() {
        let parsed = parse_clean(
            r#"
@SolidClass base(Trigger)
    sphere(radius)
    = trigger_once
    : "Fires once, then removes itself."
[
]
"#,
        );
        let class = only_class(&parsed);
        assert_eq!(class.class_type(), ClassType::SolidClass);
        assert_eq!(class.name(), "trigger_once");
        assert_eq!(class.description(), "Fires once, then removes itself.");
        assert_eq!(class.base_classes(), ["Trigger"]);
        assert_eq!(class.helper("sphere"), Some("radius"));
    }

    #[test]
    fn test_multi_line_helper_arguments() {
        let parsed = parse_clean(
            "@PointClass studio(\n    \"models/a.mdl\"\n) = prop_a []",
        );
        let class = only_class(&parsed);
        assert_eq!(class.helper("studio"), Some("\"models/a.mdl\""));
    }

    #[test]
    fn test_bracketed_helper_arguments_on_their_own_line() {
        let parsed = parse_clean("@SolidClass line(\n    [0 1]\n) = x : \"Line\" []");
        let class = only_class(&parsed);
        assert_eq!(class.name(), "x");
        assert_eq!(class.helper("line"), Some("[0 1]"));
    }

    #[test]
    fn test_double_slash_inside_helper_is_not_a_comment() {
        let parsed = parse_clean(r#"@PointClass iconsprite(editor//x.vmt) = x : "d" []"#);
        let class = only_class(&parsed);
        assert_eq!(class.helper("iconsprite"), Some("editor//x.vmt"));
        assert_eq!(class.description(), "d");
    }

    #[test]
    fn test_description_continuation() {
        let parsed = parse_clean(
            "@PointClass = info_x : \"First part \" +\n    \"second part\"\n[\n    note(string) : \"Note\" : \"\" : \"One \" +\n    \"two\"\n]",
        );
        let class = only_class(&parsed);
        assert_eq!(class.description(), "First part \nsecond part");
        assert_eq!(class.properties()[0].description(), "One \ntwo");
    }

    #[test]
    fn test_empty_choice_value() {
        let parsed = parse_clean(
            "@PointClass = a\n[\n    mode(choices) : \"Mode\" : 1 =\n    [\n        \"\" : \"Default\"\n        1 : \"One\"\n    ]\n]",
        );
        let choices = only_class(&parsed).properties()[0].choices().unwrap();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].value(), "");
        assert_eq!(choices[0].display_name(), "Default");
    }

    #[test]
    fn test_closing_brackets_on_one_line() {
        let parsed = parse_clean(
            r#"
@PointClass = a
[
    spawnflags(flags) =
    [
        1 : "One" : 0
    ]]
@PointClass = b []
"#,
        );
        assert_eq!(parsed.document().len(), 2);
        let a = parsed.document().class("a").unwrap();
        assert_eq!(a.properties()[0].flags().unwrap().len(), 1);
    }

    #[test]
    fn test_choices_without_block_marker_take_following_block() {
        let parsed = parse_clean(
            "@PointClass = a\n[\n    mode(choices) : \"Mode\" : 1\n    [\n        1 : \"One\"\n    ]\n]",
        );
        let class = only_class(&parsed);
        assert_eq!(class.properties()[0].choices().unwrap().len(), 1);
    }

    #[test]
    fn test_readonly_report_and_type_qualifiers() {
        let parsed = parse_clean(
            r#"@PointClass = a [ origin(origin) readonly report : "Origin" ]
@PointClass = b [ mode(choices,ignore) : "Mode" = [ "x" : "X" ] ]"#,
        );
        let a = parsed.document().class("a").unwrap();
        assert!(a.properties()[0].readonly());
        assert!(a.properties()[0].report());

        let b = parsed.document().class("b").unwrap();
        let mode = &b.properties()[0];
        assert_eq!(mode.prop_type(), "choices,ignore");
        assert!(matches!(mode.kind(), PropertyKind::Choices(items) if items[0].value() == "x"));
    }

    #[test]
    fn test_escaped_quotes_in_descriptions() {
        let parsed = parse_clean(r#"@PointClass = a : "Say \"hello\"" []"#);
        assert_eq!(only_class(&parsed).description(), r#"Say "hello""#);
    }
}

mod recovery {
    use super::*;

    #[test]
    fn test_unknown_directive_and_block_are_skipped() {
        let parsed = parse_str(
            r#"
@Frobnicate = x
[
    nonsense(string)
]
@PointClass = kept []
"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E100]);
        assert_eq!(parsed.diagnostics()[0].line(), 2);
        assert_eq!(parsed.document().len(), 1);
        assert!(parsed.document().contains_class("kept"));
    }

    #[test]
    fn test_unrecognized_top_level_line() {
        let parsed = parse_str("hello there\n@version(1)");
        assert_eq!(codes(&parsed), vec![ErrorCode::E101]);
        assert_eq!(parsed.diagnostics()[0].line_context(), "hello there");
        assert_eq!(parsed.document().len(), 1);
    }

    #[test]
    fn test_malformed_directives() {
        let parsed = parse_str("@include base.fgd\n@mapsize(1)\n@version(x)\n@version(3)");
        assert_eq!(
            codes(&parsed),
            vec![ErrorCode::E102, ErrorCode::E102, ErrorCode::E102]
        );
        assert_eq!(parsed.document().len(), 1);
        assert!(parsed.has_errors());
    }

    #[test]
    fn test_malformed_header_skips_its_body() {
        let parsed = parse_str(
            r#"
@PointClass base(Targetname)
[
    health(integer) : "Health"
]
@WeirdClass = odd []
@PointClass = good []
"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E103, ErrorCode::E103]);
        assert_eq!(parsed.document().len(), 1);
        assert!(parsed.document().contains_class("good"));
    }

    #[test]
    fn test_unbalanced_helper_keeps_class() {
        let parsed = parse_str("@PointClass size(-8 -8 -8, 8 8 8) color(255 0 = a []");
        assert_eq!(codes(&parsed), vec![ErrorCode::E104]);
        assert_eq!(parsed.diagnostics()[0].severity(), Severity::Warning);
        let class = only_class(&parsed);
        assert!(class.helper("size").is_some());
        assert_eq!(class.helper("color"), None);
    }

    #[test]
    fn test_bad_body_lines_are_skipped() {
        let parsed = parse_str(
            r#"
@PointClass = a
[
    health(integer) : "Health" : 100
    this is not a property
    input Kill(void)
]
"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E200]);
        assert_eq!(parsed.diagnostics()[0].line(), 5);
        let class = only_class(&parsed);
        assert_eq!(class.properties().len(), 1);
        assert_eq!(class.inputs().len(), 1);
    }

    #[test]
    fn test_bad_items_are_skipped() {
        let parsed = parse_str(
            r#"
@PointClass = a
[
    mode(choices) : "Mode" : 0 =
    [
        0 : "Zero"
        1
    ]
    spawnflags(flags) =
    [
        x : "Bad"
        2 : "Two" : 0
    ]
]
"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E201, ErrorCode::E202]);
        let class = only_class(&parsed);
        assert_eq!(class.properties()[0].choices().unwrap().len(), 1);
        assert_eq!(class.properties()[1].flags().unwrap().len(), 1);
    }

    #[test]
    fn test_non_integer_tick_state_is_reported() {
        let parsed = parse_str(
            r#"@PointClass = a [ spawnflags(flags) = [ 1 : "One" : x : "Desc" ] ]"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E202]);
        assert_eq!(parsed.diagnostics()[0].severity(), Severity::Warning);
        let flags = only_class(&parsed).properties()[0].flags().unwrap();
        assert_eq!(flags.len(), 1);
        assert!(!flags[0].default_ticked());
        assert_eq!(flags[0].description(), "Desc");
    }

    #[test]
    fn test_missing_item_block() {
        let parsed = parse_str("@PointClass = a\n[\n    mode(choices) : \"Mode\" : 0 =\n]");
        assert_eq!(codes(&parsed), vec![ErrorCode::E203]);
        let class = only_class(&parsed);
        assert_eq!(class.properties()[0].choices(), Some(&[][..]));
    }

    #[test]
    fn test_unterminated_body_closes_at_next_directive() {
        let parsed = parse_str(
            "@PointClass = a\n[\n    health(integer) : \"Health\"\n@PointClass = b []",
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E204]);
        assert_eq!(parsed.diagnostics()[0].line(), 2);
        assert_eq!(parsed.document().len(), 2);
        assert_eq!(
            parsed.document().class("a").unwrap().properties().len(),
            1
        );
    }

    #[test]
    fn test_unterminated_body_at_end_of_input() {
        let parsed = parse_str("@PointClass = a\n[\n    health(integer)");
        assert_eq!(codes(&parsed), vec![ErrorCode::E204]);
        assert!(!parsed.has_errors());
        assert_eq!(parsed.document().len(), 1);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let parsed = parse_str(
            r#"@PointClass = a [ health(integer) : "Health" : 1 : "Desc" : "Extra" ]"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E205]);
        assert_eq!(only_class(&parsed).properties()[0].description(), "Desc");
    }

    #[test]
    fn test_duplicate_class_is_kept_but_not_indexed() {
        let parsed = parse_str(
            r#"
@PointClass = a : "first" []
@SolidClass = a : "second" []
"#,
        );
        assert_eq!(codes(&parsed), vec![ErrorCode::E300]);
        assert_eq!(parsed.document().len(), 2);
        assert_eq!(parsed.document().class("a").unwrap().description(), "first");
    }

    #[test]
    fn test_stray_closing_bracket() {
        let parsed = parse_str("]\n@version(1)");
        assert_eq!(codes(&parsed), vec![ErrorCode::E101]);
        assert_eq!(parsed.document().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_clean("");
        assert!(parsed.document().is_empty());
        let parsed = parse_clean("// only a comment\n\n");
        assert!(parsed.document().is_empty());
    }
}
