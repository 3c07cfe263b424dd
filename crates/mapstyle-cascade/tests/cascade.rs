//! End-to-end tests for stylesheet compilation and cascade ordering.

use mapstyle_cascade::parser::{stylesheet_declarations, stylesheet_rulesets};
use mapstyle_cascade::prelude::*;
use mapstyle_cascade::resolve::sort_declarations;
use mapstyle_cascade::selector::SCALE_DENOMINATOR;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn compile(source: &str, config: ParserConfig) -> Result<Vec<Declaration>> {
    init_logging();
    stylesheet_declarations(source, PropertyRegistry::standard(), config)
}

const ROADS: &str = r#"
    /* base */
    Map { map-bgcolor: transparent; }

    Layer, #roads.major { line-width: 1; line-color: #999; line-join: round; }
    #roads[highway="primary"][zoom>=12] { line-width: 4 !important; }
    #roads name { text-face-name: "DejaVu Sans Book"; }
    .major[zoom=14] { line-dasharray: 2, 4.5, 2; }
    Layer[lanes>2] { line-width: 2; polygon-fill: #f00; }
"#;

#[test]
fn zoom_shorthand_end_to_end() {
    let declarations = compile(
        "Layer[zoom>=10] { line-width: 2; line-color: #336699; }",
        ParserConfig::MERCATOR,
    )
    .unwrap();

    assert_eq!(declarations.len(), 2);
    let (width, color) = (&declarations[0], &declarations[1]);

    assert_eq!(
        width.selector.all_tests(),
        &[AttributeTest::new(SCALE_DENOMINATOR, Operator::Lt, 750_000.0)]
    );
    assert!(std::sync::Arc::ptr_eq(&width.selector, &color.selector));

    assert_eq!(width.property.name(), "line-width");
    assert_eq!(width.value.data, PropertyValue::Float(2.0));
    assert_eq!(color.property.name(), "line-color");
    assert_eq!(color.value.data, PropertyValue::Color(Color::rgb(51, 102, 153)));

    assert!(!width.is_important() && !color.is_important());
    assert_eq!(width.sort_key.specificity, color.sort_key.specificity);
    assert_eq!(width.position().line, color.position().line);
    assert!(width.position() < color.position());
}

#[test]
fn malformed_color_names_the_property() {
    let err = compile("Layer { polygon-fill: notacolor; }", ParserConfig::default()).unwrap_err();

    match &err {
        Error::InvalidValue { property, location, .. } => {
            assert_eq!(property, "polygon-fill");
            assert_eq!(*location, SourceLocation::new(1, 9));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("polygon-fill"));
}

#[test]
fn uri_wrappers() {
    let declarations = compile("Layer { point-file: url( \"a.png\" ); }", ParserConfig::default()).unwrap();
    assert_eq!(declarations[0].value.data, PropertyValue::Uri("a.png".into()));

    let err = compile("Layer { point-file: url(\"a.png\" x); }", ParserConfig::default()).unwrap_err();
    match err {
        Error::InvalidValue { property, message, .. } => {
            assert_eq!(property, "point-file");
            assert_eq!(message, "Malformed URI value");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parser_paths_agree() {
    init_logging();
    let registry = PropertyRegistry::standard();

    let rulesets = stylesheet_rulesets(ROADS, registry, ParserConfig::MERCATOR).unwrap();
    let from_rulesets = flatten(&rulesets);
    let from_rules = stylesheet_declarations(ROADS, registry, ParserConfig::MERCATOR).unwrap();

    assert_eq!(rulesets.len(), 6);
    assert_eq!(from_rulesets.len(), 12);
    assert_eq!(from_rulesets, from_rules);
}

#[test]
fn parser_paths_agree_on_errors() {
    let registry = PropertyRegistry::standard();

    for source in [
        "Layer { line-join: sharp; }",
        "Layer { line-wdith: 1; }",
        "Road { line-width: 1; }",
        "Layer[zoom=30] { line-width: 1; }",
        "Layer[zoom!=10] { line-width: 1; }",
        "Layer { line-width: 1 }",
    ] {
        let a = stylesheet_rulesets(source, registry, ParserConfig::MERCATOR).unwrap_err();
        let b = stylesheet_declarations(source, registry, ParserConfig::MERCATOR).unwrap_err();

        assert_eq!(a.to_string(), b.to_string(), "{source}");
    }
}

#[test]
fn parser_paths_agree_on_comments() {
    let registry = PropertyRegistry::standard();

    let source = "Layer./* c */major[lanes>/* c */=2][kind!/* c */='a'] { line-width: 1; }";
    let rulesets = stylesheet_rulesets(source, registry, ParserConfig::default()).unwrap();
    let declarations = stylesheet_declarations(source, registry, ParserConfig::default()).unwrap();

    assert_eq!(flatten(&rulesets), declarations);
    assert_eq!(
        declarations[0].selector.to_string(),
        "Layer.major[lanes>=2][kind!=\"a\"]"
    );

    let source = "Layer./* c */ major { line-width: 1; }";
    let a = stylesheet_rulesets(source, registry, ParserConfig::default()).unwrap_err();
    let b = stylesheet_declarations(source, registry, ParserConfig::default()).unwrap_err();
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn resorting_is_a_fixed_point() {
    let declarations = compile(ROADS, ParserConfig::MERCATOR).unwrap();

    let mut resorted = declarations.clone();
    sort_declarations(&mut resorted);
    assert_eq!(resorted, declarations);

    assert!(declarations.windows(2).all(|pair| pair[0].sort_key <= pair[1].sort_key));
}

#[test]
fn important_dominates() {
    let declarations = compile(ROADS, ParserConfig::MERCATOR).unwrap();

    let widths: Vec<&Declaration> = declarations
        .iter()
        .filter(|d| d.property.name() == "line-width")
        .collect();
    let first_important = widths.iter().position(|d| d.is_important()).unwrap();

    assert!(widths[..first_important].iter().all(|d| !d.is_important()));
    assert!(widths[first_important..].iter().all(|d| d.is_important()));

    // An important rule with the weakest selector still outranks a stronger one.
    let declarations = compile(
        "* { line-width: 1 !important; }\n#a#b.c[x=1] { line-width: 2; }",
        ParserConfig::default(),
    )
    .unwrap();
    assert!(declarations[1].is_important());
}

#[test]
fn more_ids_outrank_everything_else() {
    let declarations = compile(
        "#a { line-width: 1; }\nLayer.a.b.c[x=1][y=2] name { line-width: 2; }",
        ParserConfig::default(),
    )
    .unwrap();

    assert_eq!(declarations[1].selector.to_string(), "#a");
    assert!(declarations[1].sort_key.specificity > declarations[0].sort_key.specificity);
}

#[test]
fn color_forms() {
    let declarations = compile(
        "Map { map-bgcolor: #ff0000; } Map { map-bgcolor: #F00; } Map { map-bgcolor: transparent; }",
        ParserConfig::default(),
    )
    .unwrap();
    let values: Vec<&PropertyValue> = declarations.iter().map(|d| &d.value.data).collect();

    assert_eq!(values[0], &PropertyValue::Color(Color::rgb(255, 0, 0)));
    assert_eq!(values[0], values[1]);
    assert_eq!(values[2], &PropertyValue::Transparent);
    assert_ne!(values[2], &PropertyValue::Color(Color::BLACK));
}

#[test]
fn zoom_conversion_table() {
    let declarations = compile(
        "Layer[zoom=10] { line-width: 1; } Layer[zoom>5] { line-width: 2; }",
        ParserConfig::MERCATOR,
    )
    .unwrap();
    let tests: Vec<String> = declarations
        .iter()
        .map(|d| d.selector.all_tests().iter().map(ToString::to_string).collect())
        .collect();

    assert_eq!(tests[0], "[scale-denominator<12500000]");
    assert_eq!(tests[1], "[scale-denominator>=400000][scale-denominator<750000]");
}

#[test]
fn zoom_requires_mercator() {
    let err = compile("Layer[zoom>5] { line-width: 2; }", ParserConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Projection { .. }));
}

#[test]
fn attribute_compatibility() {
    let not_five = AttributeTest::new("width", Operator::Ne, 5.0);
    let above_two = AttributeTest::new("width", Operator::Gt, 2.0);
    let five = AttributeTest::new("width", Operator::Eq, 5.0);

    assert!(!five.is_compatible([&not_five]));
    assert!(five.is_compatible([&above_two]));
    assert!(!five.is_compatible([&above_two, &not_five]));
}

#[test]
fn resolves_styles_per_layer() {
    init_logging();
    let sheet = Stylesheet::from_css(ROADS, ParserConfig::MERCATOR).unwrap();

    let roads = sheet.compute_style(
        &StyleContext::new("Layer")
            .id("roads")
            .classes(&["major"])
            .scale_denominator(10_000.0),
    );
    // zoom 14 covers 1:25000 to 1:50000.
    assert!(roads.get("line-dasharray").is_none());
    assert_eq!(roads.get("line-width").map(|v| &v.data), Some(&PropertyValue::Float(4.0)));
    assert_eq!(
        roads.get("text-face-name").map(|v| &v.data),
        Some(&PropertyValue::String("DejaVu Sans Book".into()))
    );

    let groups = roads.groups();
    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["line", "polygon", "text"]);
    assert_eq!(groups["line"].len(), 3);

    let far = sheet.compute_style(&StyleContext::new("Layer").id("roads").scale_denominator(1e6));
    assert_eq!(far.get("line-width").map(|v| &v.data), Some(&PropertyValue::Float(2.0)));
}

#[test]
fn concurrent_compilation() {
    let registry = PropertyRegistry::standard();

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    stylesheet_declarations(ROADS, registry, ParserConfig::MERCATOR)
                        .map(|d| d.len())
                        .unwrap_or(0)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, [12, 12, 12, 12]);
}
