//! Value resolution and conversion tests.

use horizon_lattice_css::convert::{Insets, LinearGradient};
use horizon_lattice_css::lexer::{TokenKind, TokenStream};
use horizon_lattice_css::prelude::*;
use horizon_lattice_css::term;
use horizon_lattice_css::types::CycleMethod;

fn value(property: &str, css: &str) -> ParsedValue {
    CssParser::default()
        .try_parse_expr(property, css)
        .unwrap_or_else(|err| panic!("{property}: {css}: {err}"))
}

fn converted(property: &str, css: &str) -> StyleValue {
    convert(&value(property, css), &ConvertContext::default()).unwrap()
}

fn gradient(css: &str) -> LinearGradient {
    match converted("-fx-fill", css) {
        StyleValue::Paint(Paint::LinearGradient(gradient)) => gradient,
        other => panic!("not a linear gradient: {other:?}"),
    }
}

#[test]
fn test_padding_sides_expand() {
    let cases = [
        ("1px", Insets::new(1.0, 1.0, 1.0, 1.0)),
        ("1px 2px", Insets::new(1.0, 2.0, 1.0, 2.0)),
        ("1px 2px 3px", Insets::new(1.0, 2.0, 3.0, 2.0)),
        ("1px 2px 3px 4px", Insets::new(1.0, 2.0, 3.0, 4.0)),
    ];
    for (css, expected) in cases {
        assert_eq!(converted("-fx-padding", css), StyleValue::Insets(expected), "{css}");
    }
}

#[test]
fn test_hex_and_rgb_agree() {
    let hex = value("-fx-text-fill", "#ff0000").as_color().unwrap();
    let rgb = value("-fx-text-fill", "rgb(255, 0, 0)").as_color().unwrap();
    assert_eq!(hex, rgb);
    assert_eq!(hex, Color::RED);
}

#[test]
fn test_hex_alpha() {
    let long = value("-fx-text-fill", "#ff000080").as_color().unwrap();
    assert!((long.a - 128.0 / 255.0).abs() < 1e-9);

    let short = value("-fx-text-fill", "#f008").as_color().unwrap();
    assert!((short.a - 8.0 / 15.0).abs() < 1e-9);
    assert!(short.approx_eq(&Color::new(1.0, 0.0, 0.0, 8.0 / 15.0), 1e-9));
}

#[test]
fn test_gradient_stop_offsets() {
    let gradient = gradient("linear-gradient(red, green 50%, blue)");
    let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!(gradient.stops[0].color, Color::RED);
    assert_eq!(gradient.stops[2].color, Color::BLUE);
    assert!(gradient.proportional);
    assert_eq!(gradient.cycle, CycleMethod::NoCycle);
}

#[test]
fn test_gradient_repeat_cycle() {
    let gradient = gradient("linear-gradient(to right, repeat, red, blue)");
    assert_eq!(gradient.cycle, CycleMethod::Repeat);
    assert_eq!((gradient.end_x, gradient.end_y), (1.0, 0.0));
}

#[test]
fn test_center_background_position() {
    let StyleValue::List(layers) = converted("-fx-background-position", "center") else {
        panic!("expected one entry per layer");
    };
    let StyleValue::BackgroundPosition(position) = &layers[0] else {
        panic!("not a background position: {:?}", layers[0]);
    };
    assert_eq!(position.top, Size::percent(50.0));
    assert_eq!(position.left, Size::percent(50.0));
    assert_eq!(position.right.value, 0.0);
    assert_eq!(position.bottom.value, 0.0);
}

#[test]
fn test_font_size_em_is_relative() {
    let value = value("-fx-font-size", "1.5em");
    assert_eq!(
        convert(&value, &ConvertContext::new(10.0)).unwrap(),
        StyleValue::Number(15.0)
    );
}

#[test]
fn test_lookup_resolution() {
    let lookup = |name: &str| (name == "-my-accent").then(|| ParsedValue::color(Color::BLUE));
    let ctx = ConvertContext::default().with_lookup(&lookup);

    let StyleValue::List(layers) = convert(&value("-fx-background-color", "-my-accent"), &ctx).unwrap()
    else {
        panic!("expected layers");
    };
    assert_eq!(layers, vec![StyleValue::Paint(Paint::Color(Color::BLUE))]);

    let missing = convert(&value("-fx-background-color", "-my-other"), &ctx);
    assert!(missing.is_err());
}

#[test]
fn test_nested_function_arguments() {
    let mut stream = TokenStream::new(
        "ladder(derive(red, 20%), stop(0%, derive(white, -10%)), stop(100%, black))",
        128,
    );
    stream.advance();
    let (tree, root) = term::expr(&mut stream).unwrap();

    assert_eq!(tree.kind(root), Some(TokenKind::Function));
    assert_eq!(tree.number_of_args(root), 3);

    let args: Vec<_> = tree.args(root).collect();
    assert_eq!(tree.number_of_args(args[0]), 2);
    assert_eq!(tree.number_of_args(args[1]), 2);

    let inner = tree.args(args[1]).nth(1).unwrap();
    assert_eq!(tree.text(inner), "derive(");
    assert_eq!(tree.number_of_args(inner), 2);
    assert_eq!(stream.kind(), TokenKind::Eof);
}
