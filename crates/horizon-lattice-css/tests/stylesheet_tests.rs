//! Stylesheet parsing and error recovery tests.

use std::sync::Arc;

use horizon_lattice_css::prelude::*;
use horizon_lattice_css::rules::FontFaceSrcKind;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn parser() -> (CssParser, Arc<ErrorCollector>) {
    init_tracing();
    let collector = Arc::new(ErrorCollector::new());
    let options = ParserOptions::new().collector(Arc::clone(&collector));
    (CssParser::new(options), collector)
}

#[test]
fn test_malformed_declaration_recovery() {
    let (parser, errors) = parser();
    let sheet = parser.parse(
        ".first { -fx-padding: 1px; }\n\
         .bad { -fx-padding: ; }\n\
         .second { -fx-padding: 2px; }",
    );

    assert_eq!(sheet.len(), 3, "all three rules should be kept");
    assert_eq!(sheet.rules[0].declarations.len(), 1);
    assert!(sheet.rules[1].declarations.is_empty());
    assert_eq!(sheet.rules[2].declarations.len(), 1);

    let reported = errors.take();
    assert_eq!(reported.len(), 1, "exactly one error: {:?}", reported);
    assert!(reported[0].message.starts_with("Unexpected token ';'"));
    assert!(matches!(reported[0].source, ErrorSource::Text(_)));
}

#[test]
fn test_bad_declaration_keeps_neighbours() {
    let (parser, errors) = parser();
    let sheet = parser.parse(
        "Button {\n  -fx-text-fill: red;\n  -fx-background-color: rgb(255, 50%, 0);\n  -fx-font-size: 14px;\n}",
    );

    let properties: Vec<&str> = sheet.rules[0]
        .declarations
        .iter()
        .map(|d| d.property.as_str())
        .collect();
    assert_eq!(properties, vec!["-fx-text-fill", "-fx-font-size"]);

    let reported = errors.take();
    assert_eq!(reported.len(), 1);
    assert_eq!(
        reported[0].message,
        "Argument type mistmatch while parsing '-fx-background-color' at [3,34]"
    );
}

#[test]
fn test_multi_layer_background() {
    let (parser, errors) = parser();
    let sheet = parser.parse(".pane { -fx-background-color: red, blue; }");
    assert!(errors.is_empty());

    let value = &sheet.rules[0].declarations[0].value;
    let layers = value.as_list().expect("layers");
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].as_color(), Some(Color::RED));
    assert_eq!(layers[1].as_color(), Some(Color::BLUE));
}

#[test]
fn test_inherit_and_null_for_unknown_property() {
    let (parser, errors) = parser();
    let sheet = parser.parse(".x { -fx-made-up: inherit; -fx-other-made-up: NULL; }");
    assert!(errors.is_empty());

    let declarations = &sheet.rules[0].declarations;
    assert!(declarations[0].value.is_inherit());
    assert!(declarations[1].value.is_null_sentinel());

    let ctx = ConvertContext::default();
    assert_eq!(convert(&declarations[0].value, &ctx).unwrap(), StyleValue::Inherit);
    assert_eq!(convert(&declarations[1].value, &ctx).unwrap(), StyleValue::Null);
}

#[test]
fn test_important_and_order() {
    let (parser, _) = parser();
    let sheet = parser.parse(
        "* { -fx-fill: red !important; }\n.a > .b { -fx-fill: blue; }\n#c { -fx-fill: white; }",
    );
    assert_eq!(sheet.len(), 3);
    assert!(sheet.rules[0].declarations[0].important);
    assert!(!sheet.rules[1].declarations[0].important);

    let orders: Vec<u32> = sheet.iter().map(|r| r.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    assert_eq!(sheet.rules[1].selectors[0].combinators, vec![Combinator::Child]);
    assert_eq!(sheet.rules[2].specificity(), Specificity(1, 0, 0));
}

#[test]
fn test_structural_error_keeps_earlier_rules() {
    let (parser, errors) = parser();
    let sheet = parser.parse(".a { -fx-fill: red; } .b ; .c { -fx-fill: white; }");
    assert_eq!(sheet.len(), 1);
    assert!(errors.take()[0].message.starts_with("Expected LBRACE"));

    // A bad selector only loses its own rule.
    let sheet = parser.parse(".a { -fx-fill: red; } .b -fx-fill: blue; } .c { -fx-fill: white; }");
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[1].selectors, vec![Selector::class("c")]);
    assert!(errors.take()[0].message.contains("in selector"));
}

#[test]
fn test_deep_nesting_is_reported_not_fatal() {
    let (parser, errors) = parser();
    let depth = 200;
    let css = format!(
        ".deep {{ -fx-padding: {}1{}; }} .ok {{ -fx-padding: 3px; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let sheet = parser.parse(&css);
    assert_eq!(sheet.len(), 2);
    assert!(sheet.rules[0].declarations.is_empty());
    assert_eq!(sheet.rules[1].declarations.len(), 1);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_inline_style() {
    let (parser, errors) = parser();
    let sheet = parser.parse_inline_style("Label#title", "-fx-font-size: 2em; -fx-padding: \"x\";");
    assert_eq!(sheet.origin, StyleOrigin::Inline);
    assert_eq!(sheet.rules[0].selectors, vec![Selector::universal()]);
    assert_eq!(sheet.rules[0].declarations.len(), 1);

    let reported = errors.take();
    assert_eq!(reported.len(), 1);
    assert!(
        reported[0]
            .to_string()
            .starts_with("CSS Error parsing in-line style '-fx-font-size: 2em; -fx-padding: \"x\";' from Label#title: ")
    );
}

#[test]
fn test_font_face_with_base() {
    let (parser, errors) = parser();
    let base = url::Url::parse("file:///srv/app/styles/app.css").unwrap();
    let sheet = parser.parse_with_base(
        &base,
        "@font-face {\n  font-family: Amble;\n  src: url('/fonts/amble.ttf');\n}\n.label { -fx-font-family: Amble; }",
    );
    assert!(errors.is_empty(), "{:?}", errors.snapshot());
    assert_eq!(sheet.url.as_ref(), Some(&base));

    let face = &sheet.font_faces[0];
    assert_eq!(face.family(), Some("Amble"));
    assert_eq!(face.sources[0].kind, FontFaceSrcKind::Url);
    assert_eq!(face.sources[0].src, "file:///srv/app/styles/fonts/amble.ttf");
}

#[test]
fn test_global_collector_is_default() {
    let before = ErrorCollector::global().len();
    let sheet = parse_css("a { -fx-padding: ; } b { -fx-padding: 1px; }");
    assert_eq!(sheet.len(), 2);
    assert!(ErrorCollector::global().len() > before);
}

#[test]
fn test_non_ascii_input_is_reported_not_fatal() {
    let (parser, errors) = parser();
    let sheet = parser.parse(
        ".a { -fx-padding: 1é; }\n.b { -fx-padding: 1px; -fx-text: \"日本\"; -fx-text-fill: aé; }",
    );
    assert_eq!(sheet.len(), 2);
    assert!(sheet.rules[0].declarations.is_empty());

    let b = &sheet.rules[1].declarations;
    assert_eq!(b.len(), 3);
    assert_eq!(b[1].value.as_str(), Some("日本"));
    assert_eq!(b[2].value.as_str(), Some("aé"));

    let reported = errors.take();
    assert_eq!(reported.len(), 1, "{:?}", reported);
    assert!(reported[0].message.contains("1é"));
}
