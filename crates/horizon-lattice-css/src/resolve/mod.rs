//! Declaration value resolution.
//!
//! [`value_for`] turns the term tree of one declaration into a
//! [`ParsedValue`]. Properties with a dedicated grammar are routed through
//! a name table built once per process; everything else goes through the
//! generic [`Resolver::parse`], which classifies a single term (size,
//! color, keyword, lookup or function call).
//!
//! Grammars that consume a variable number of series terms (the legacy
//! `linear ... stops ...` forms, border styles) return the term where their
//! caller should continue instead of rewriting the tree.

mod background;
mod border;
mod color;
mod font;
mod paint;
mod size;
mod uri;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use url::Url;

use crate::lexer::TokenKind;
use crate::parser::{ParseError, ValueResult};
use crate::term::{TermId, TermTree};
use crate::types::{Color, Size};
use crate::value::{Converter, ParsedValue};

/// Resolve the value of `property` from the term tree rooted at `root`.
///
/// The lower-cased property name is added to `properties`; identifiers
/// naming a property already in that set resolve to lookups. Relative
/// `url(...)` values record `base_url` for later resolution.
pub fn value_for(
    property: &str,
    tree: &TermTree,
    root: TermId,
    properties: &mut HashSet<String>,
    base_url: Option<&Url>,
) -> ValueResult<ParsedValue> {
    let prop = property.to_lowercase();
    properties.insert(prop.clone());
    Resolver::new(tree, properties, base_url).value_for(&prop, root)
}

/// Grammar selected for a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyGrammar {
    Fill,
    PaintLayers,
    UrlLayers,
    InsetsLayers,
    InsetsLayer,
    PositionLayers,
    CornerRadius,
    RepeatLayers,
    BackgroundSizeLayers,
    BorderPaintLayers,
    BorderStyleLayers,
    MarginsLayers,
    ImageSliceLayers,
    ImageWidthLayers,
    Padding,
    DashArray,
    LineJoin,
    LineCap,
    StrokeType,
    StringOrIdent,
}

fn property_grammars() -> &'static HashMap<&'static str, PropertyGrammar> {
    static TABLE: OnceLock<HashMap<&'static str, PropertyGrammar>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use PropertyGrammar::*;
        HashMap::from([
            ("-fx-fill", Fill),
            ("-fx-background-color", PaintLayers),
            ("-fx-background-image", UrlLayers),
            ("-fx-background-insets", InsetsLayers),
            ("-fx-opaque-insets", InsetsLayer),
            ("-fx-background-position", PositionLayers),
            ("-fx-background-radius", CornerRadius),
            ("-fx-background-repeat", RepeatLayers),
            ("-fx-background-size", BackgroundSizeLayers),
            ("-fx-border-color", BorderPaintLayers),
            ("-fx-border-insets", InsetsLayers),
            ("-fx-border-radius", CornerRadius),
            ("-fx-border-style", BorderStyleLayers),
            ("-fx-border-width", MarginsLayers),
            ("-fx-border-image-insets", InsetsLayers),
            ("-fx-border-image-repeat", RepeatLayers),
            ("-fx-border-image-slice", ImageSliceLayers),
            ("-fx-border-image-source", UrlLayers),
            ("-fx-border-image-width", ImageWidthLayers),
            ("-fx-padding", Padding),
            ("-fx-label-padding", Padding),
            ("-fx-stroke-dash-array", DashArray),
            ("-fx-stroke-line-join", LineJoin),
            ("-fx-stroke-line-cap", LineCap),
            ("-fx-stroke-type", StrokeType),
            ("-fx-font-smoothing-type", StringOrIdent),
            ("-fx-blend-mode", StringOrIdent),
        ])
    })
}

/// Grammar selected for a function name (including its open paren).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionGrammar {
    Rgb,
    Hsb,
    Derive,
    InnerShadow,
    DropShadow,
    LinearGradient,
    RadialGradient,
    ImagePattern,
    RepeatingImagePattern,
    Ladder,
    Region,
    Url,
}

fn function_grammars() -> &'static HashMap<&'static str, FunctionGrammar> {
    static TABLE: OnceLock<HashMap<&'static str, FunctionGrammar>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use FunctionGrammar::*;
        HashMap::from([
            ("rgb(", Rgb),
            ("rgba(", Rgb),
            ("hsb(", Hsb),
            ("hsba(", Hsb),
            ("derive(", Derive),
            ("innershadow(", InnerShadow),
            ("dropshadow(", DropShadow),
            ("linear-gradient(", LinearGradient),
            ("radial-gradient(", RadialGradient),
            ("image-pattern(", ImagePattern),
            ("repeating-image-pattern(", RepeatingImagePattern),
            ("ladder(", Ladder),
            ("region(", Region),
            ("url(", Url),
        ])
    })
}

/// Read-only view over one declaration's terms.
pub(crate) struct Resolver<'a> {
    tree: &'a TermTree,
    properties: &'a HashSet<String>,
    base_url: Option<&'a Url>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        tree: &'a TermTree,
        properties: &'a HashSet<String>,
        base_url: Option<&'a Url>,
    ) -> Self {
        Self {
            tree,
            properties,
            base_url,
        }
    }

    /// Dispatch on the (lower-cased) property name.
    pub(crate) fn value_for(&self, prop: &str, root: TermId) -> ValueResult<ParsedValue> {
        if self.kind(root) == Some(TokenKind::Ident) {
            let text = self.tree.text(root);
            if text.eq_ignore_ascii_case("inherit") {
                return Ok(ParsedValue::inherit());
            }
            if text.eq_ignore_ascii_case("null") || text.eq_ignore_ascii_case("none") {
                return Ok(ParsedValue::null_sentinel());
            }
        }

        if let Some(grammar) = property_grammars().get(prop) {
            return self.dispatch(*grammar, root);
        }

        if prop.ends_with("font-family") {
            self.parse_font_family(root)
        } else if prop.ends_with("font-size") {
            self.parse_font_size(root)
        } else if prop.ends_with("font-style") {
            self.parse_font_style(root)?
                .ok_or_else(|| self.error(root, "Expected '<font-style>'"))
        } else if prop.ends_with("font-weight") {
            self.parse_font_weight(root)
        } else if prop.ends_with("font") {
            self.parse_font(root)
        } else {
            self.parse(root)
        }
    }

    fn dispatch(&self, grammar: PropertyGrammar, root: TermId) -> ValueResult<ParsedValue> {
        use PropertyGrammar::*;
        match grammar {
            Fill => {
                let value = self.parse(root)?;
                if value.converter == Some(Converter::Url) {
                    Ok(ParsedValue::list(vec![value], Converter::ImagePattern))
                } else {
                    Ok(value)
                }
            }
            PaintLayers => self.parse_paint_layers(root),
            UrlLayers => self.parse_url_layers(root),
            InsetsLayers => Ok(ParsedValue::list(
                self.parse_insets_layers(root)?,
                Converter::InsetsLayers,
            )),
            InsetsLayer => self.parse_insets_layer(root),
            PositionLayers => self.parse_background_position_layers(root),
            CornerRadius => self.parse_corner_radius(root),
            RepeatLayers => self.parse_repeat_style_layers(root),
            BackgroundSizeLayers => self.parse_background_size_layers(root),
            BorderPaintLayers => self.parse_border_paint_layers(root),
            BorderStyleLayers => self.parse_border_style_layers(root),
            MarginsLayers => self.parse_margins_layers(root),
            ImageSliceLayers => self.parse_border_image_slice_layers(root),
            ImageWidthLayers => self.parse_border_image_width_layers(root),
            Padding => Ok(ParsedValue::list(
                self.parse_size1to4(root)?,
                Converter::Insets,
            )),
            DashArray => {
                let segments = self
                    .tree
                    .series(root)
                    .map(|term| self.parse_size(term))
                    .collect::<ValueResult<Vec<_>>>()?;
                Ok(ParsedValue::list(segments, Converter::SizeSequence))
            }
            LineJoin => match self.parse_stroke_line_join(Some(root))? {
                Some((join, _, _)) => Ok(join),
                None => Err(self.error(root, "Expected 'miter', 'bevel' or 'round'")),
            },
            LineCap => self
                .parse_stroke_line_cap(Some(root))
                .ok_or_else(|| self.error(root, "Expected 'square', 'butt' or 'round'")),
            StrokeType => self
                .parse_stroke_type(Some(root))
                .ok_or_else(|| self.error(root, "Expected 'centered', 'inside' or 'outside'")),
            StringOrIdent => match self.kind(root) {
                Some(TokenKind::String | TokenKind::Ident) if !self.tree.text(root).is_empty() => {
                    Ok(ParsedValue::string(self.tree.text(root), None))
                }
                _ => Err(self.error(root, "Expected STRING or IDENT")),
            },
        }
    }

    /// Resolve a single term by its token class.
    pub(crate) fn parse(&self, id: TermId) -> ValueResult<ParsedValue> {
        self.parse_term(id).map(|(value, _)| value)
    }

    /// Resolve a single term and return the term after whatever it
    /// consumed. A size followed by further terms consumes the whole
    /// series.
    pub(crate) fn parse_term(&self, id: TermId) -> ValueResult<(ParsedValue, Option<TermId>)> {
        let Some(token) = self.tree.token(id) else {
            return Err(self.error(id, "Parse error"));
        };
        let next = self.tree.next_in_series(id);

        match token.kind {
            kind if kind.is_size() => {
                if next.is_none() {
                    let size = ParsedValue::size(self.size(id)?);
                    Ok((ParsedValue::wrap(size, Converter::Size), None))
                } else {
                    let sizes = self.parse_size_series(id)?;
                    Ok((ParsedValue::list(sizes, Converter::SizeSequence), None))
                }
            }
            TokenKind::String | TokenKind::Ident => {
                let is_ident = token.kind == TokenKind::Ident;
                let text = token.text.as_str();
                let lower = text.to_lowercase();
                match lower.as_str() {
                    "ladder" => self.legacy_ladder(id),
                    "linear" if next.is_some() => self.legacy_linear_gradient(id),
                    "radial" if next.is_some() => self.legacy_radial_gradient(id),
                    "infinity" => {
                        let size = ParsedValue::size(Size::px(f64::MAX));
                        Ok((ParsedValue::wrap(size, Converter::Size), next))
                    }
                    "true" => Ok((ParsedValue::boolean(true), next)),
                    "false" => Ok((ParsedValue::boolean(false), next)),
                    _ if is_ident && self.properties.contains(&lower) => {
                        Ok((ParsedValue::lookup(lower), next))
                    }
                    _ => match Color::web(text) {
                        Some(color) => Ok((ParsedValue::color(color), next)),
                        None => {
                            let mut value = ParsedValue::string(text, None);
                            value.lookup = is_ident;
                            Ok((value, next))
                        }
                    },
                }
            }
            TokenKind::Hash => match Color::web(&token.text) {
                Some(color) => Ok((ParsedValue::color(color), next)),
                None => Err(self.error(id, format!("Invalid color '{}'", token.text))),
            },
            TokenKind::Function => Ok((self.parse_function(id)?, next)),
            kind => Err(self.error(id, format!("Unknown token type: '{:?}'", kind))),
        }
    }

    fn parse_function(&self, id: TermId) -> ValueResult<ParsedValue> {
        let name = self.tree.text(id).to_lowercase();
        let Some(grammar) = function_grammars().get(name.as_str()) else {
            return Err(self.error(
                id,
                format!("Unexpected function '{}'", self.tree.text(id)),
            ));
        };

        use FunctionGrammar::*;
        match grammar {
            Rgb => self.rgb(id),
            Hsb => self.hsb(id),
            Derive => self.derive(id),
            InnerShadow => self.shadow(id, Converter::InnerShadow),
            DropShadow => self.shadow(id, Converter::DropShadow),
            LinearGradient => self.parse_linear_gradient(id),
            RadialGradient => self.parse_radial_gradient(id),
            ImagePattern => self.parse_image_pattern(id),
            RepeatingImagePattern => self.parse_repeating_image_pattern(id),
            Ladder => self.parse_ladder(id),
            Region => self.parse_region(id),
            Url => self.parse_uri(id),
        }
    }

    // Helpers shared by the grammar modules.

    fn kind(&self, id: TermId) -> Option<TokenKind> {
        self.tree.kind(id)
    }

    /// Size tokens and identifiers (which resolve to lookups).
    fn is_size(&self, id: TermId) -> bool {
        self.kind(id)
            .is_some_and(|kind| kind.is_size() || kind == TokenKind::Ident)
    }

    /// Lower-cased identifier text, or `None` for any other token.
    fn keyword(&self, id: Option<TermId>) -> Option<String> {
        let id = id?;
        if self.kind(id) == Some(TokenKind::Ident) && !self.tree.text(id).is_empty() {
            Some(self.tree.text(id).to_lowercase())
        } else {
            None
        }
    }

    fn error(&self, id: TermId, message: impl Into<String>) -> ParseError {
        ParseError::at(message, self.tree.token(id))
    }

    /// `id`, or an error pointing at `prev` when it is absent.
    fn require(&self, id: Option<TermId>, prev: TermId, message: &str) -> ValueResult<TermId> {
        id.ok_or_else(|| self.error(prev, message))
    }
}
