//! Conversion of parsed values into final style values.
//!
//! The resolver stops at [`ParsedValue`]: sizes keep their units, lookups
//! stay names and colors may still be `derive(...)` or `ladder(...)`
//! expressions. [`convert`] finishes the job given a [`ConvertContext`]
//! holding the font size in effect and, optionally, a way to resolve
//! lookups.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_css::convert::{convert, ConvertContext, Insets, StyleValue};
//! use horizon_lattice_css::CssParser;
//!
//! let parser = CssParser::default();
//! let value = parser.parse_expr("-fx-padding", "1em 4px").unwrap();
//!
//! let ctx = ConvertContext::new(10.0);
//! let insets = convert(&value, &ctx).unwrap();
//! assert_eq!(insets, StyleValue::Insets(Insets::new(10.0, 4.0, 10.0, 4.0)));
//! ```

mod paint;
mod types;

pub use paint::{ImagePattern, LinearGradient, Paint, RadialGradient, Shadow, Stop};
pub use types::{
    BackgroundPosition, BackgroundSize, BorderImageSlice, BorderStrokeStyle, CornerRadii,
    DashStyle, FontSpec, Insets, RepeatStyle, Sides,
};

use crate::error::{Error, Result};
use crate::types::{BackgroundRepeat, Color, FontPosture, FontWeight, Size};
use crate::value::{Converter, Keyword, ParsedValue, Value};

/// Lookups nested deeper than this are treated as cycles.
const MAX_LOOKUP_DEPTH: usize = 32;

/// Font size used when none is given.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// A fully converted style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// The `null`/`none` sentinel, or an absent optional part.
    Null,
    Inherit,
    Bool(bool),
    /// A size in pixels. Percentages are fractions; angles are degrees.
    Number(f64),
    Numbers(Vec<f64>),
    String(String),
    Url(String),
    Color(Color),
    Paint(Paint),
    Keyword(Keyword),
    Insets(Insets),
    CornerRadii(CornerRadii),
    BackgroundPosition(BackgroundPosition),
    BackgroundSize(BackgroundSize),
    Repeat(RepeatStyle),
    BorderPaint(Sides<Paint>),
    BorderStyle(BorderStrokeStyle),
    BorderStyles(Sides<BorderStrokeStyle>),
    BorderImageSlice(BorderImageSlice),
    Shadow(Shadow),
    Font(FontSpec),
    /// One entry per layer, or the entries of an untagged list.
    List(Vec<StyleValue>),
}

/// Resolves a looked-up name to the value declared for it.
pub type LookupFn<'a> = dyn Fn(&str) -> Option<ParsedValue> + 'a;

/// Inputs to [`convert`] that do not come from the value itself.
pub struct ConvertContext<'a> {
    /// Font size in pixels that `em`, `ex` and font-size percentages are
    /// relative to.
    pub font_size: f64,
    lookup: Option<&'a LookupFn<'a>>,
}

impl Default for ConvertContext<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE)
    }
}

impl<'a> ConvertContext<'a> {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            lookup: None,
        }
    }

    /// Resolve lookups through `lookup`. Without one, any lookup fails with
    /// [`Error::UnresolvedLookup`].
    pub fn with_lookup(mut self, lookup: &'a LookupFn<'a>) -> Self {
        self.lookup = Some(lookup);
        self
    }
}

impl std::fmt::Debug for ConvertContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertContext")
            .field("font_size", &self.font_size)
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}

/// Convert `value` according to its converter tag.
pub fn convert(value: &ParsedValue, ctx: &ConvertContext<'_>) -> Result<StyleValue> {
    Conversion { ctx, depth: 0 }.value(value)
}

/// One conversion in progress. `depth` counts the lookups followed to get
/// here.
#[derive(Clone, Copy)]
struct Conversion<'c, 'a> {
    ctx: &'c ConvertContext<'a>,
    depth: usize,
}

impl Conversion<'_, '_> {
    /// Apply `f` to `value`, first replacing a lookup by the value it names.
    fn follow<T, F>(&self, value: &ParsedValue, f: &F) -> Result<T>
    where
        F: Fn(&Self, &ParsedValue) -> Result<T>,
    {
        if !value.lookup {
            return f(self, value);
        }
        let name = value.as_str().unwrap_or_default();
        if self.depth >= MAX_LOOKUP_DEPTH {
            return Err(Error::UnresolvedLookup {
                name: name.to_string(),
            });
        }
        let resolved = self
            .ctx
            .lookup
            .and_then(|lookup| lookup(name))
            .ok_or_else(|| Error::UnresolvedLookup {
                name: name.to_string(),
            })?;
        let nested = Self {
            ctx: self.ctx,
            depth: self.depth + 1,
        };
        nested.follow(&resolved, f)
    }

    fn value(&self, value: &ParsedValue) -> Result<StyleValue> {
        self.follow(value, &|conv, value| conv.tagged(value))
    }

    fn tagged(&self, value: &ParsedValue) -> Result<StyleValue> {
        if value.is_inherit() {
            return Ok(StyleValue::Inherit);
        }
        if value.is_null_sentinel() {
            return Ok(StyleValue::Null);
        }
        let Some(converter) = value.converter else {
            return self.untagged(value);
        };

        use Converter as C;
        let converted = match converter {
            C::Size => StyleValue::Number(self.pixels(value)?),
            C::SizeSequence => StyleValue::Numbers(
                self.list(value, converter)?
                    .iter()
                    .map(|v| self.pixels(v))
                    .collect::<Result<_>>()?,
            ),
            C::Boolean => StyleValue::Bool(self.boolean(value, converter)?),
            C::String => StyleValue::String(self.string(value, converter)?.to_string()),
            C::Url => StyleValue::Url(self.url(value)?),
            C::DeriveColor | C::Ladder => StyleValue::Color(self.color(value)?),
            C::LinearGradient | C::RadialGradient | C::ImagePattern | C::RepeatingImagePattern => {
                StyleValue::Paint(self.paint(value)?)
            }
            C::InnerShadow | C::DropShadow => StyleValue::Shadow(self.shadow(value)?),
            C::Enum => StyleValue::Keyword(self.keyword(value, converter)?),
            C::Insets | C::Margins | C::BorderImageWidth => {
                StyleValue::Insets(self.insets(value, converter)?)
            }
            C::BackgroundPosition => {
                StyleValue::BackgroundPosition(self.background_position(value)?)
            }
            C::BackgroundSize => StyleValue::BackgroundSize(self.background_size(value)?),
            C::BorderPaint => StyleValue::BorderPaint(self.border_paint(value)?),
            C::BorderStyle => StyleValue::BorderStyle(self.border_style(value)?),
            C::BorderStyleSeries => StyleValue::BorderStyles(self.sides(value, converter, |v| {
                self.border_style(v)
            })?),
            C::BorderImageSlice => StyleValue::BorderImageSlice(self.border_image_slice(value)?),
            C::FontSize => StyleValue::Number(self.font_size(value)?),
            C::FontStyle => {
                if value.as_str() == Some("inherit") {
                    StyleValue::Inherit
                } else {
                    StyleValue::Keyword(Keyword::Posture(self.posture(value)?))
                }
            }
            C::FontWeight => StyleValue::Keyword(Keyword::Weight(self.weight(value)?)),
            C::Font => StyleValue::Font(self.font(value)?),
            C::UrlLayers => self.layers(value, converter, |v| Ok(StyleValue::Url(self.url(v)?)))?,
            C::PaintLayers => {
                self.layers(value, converter, |v| Ok(StyleValue::Paint(self.paint(v)?)))?
            }
            C::CornerRadii => self.layers(value, converter, |v| {
                Ok(StyleValue::CornerRadii(self.corner_radii(v)?))
            })?,
            C::InsetsLayers
            | C::MarginsLayers
            | C::BorderImageWidthLayers
            | C::BackgroundPositionLayers
            | C::BackgroundSizeLayers
            | C::BorderPaintLayers
            | C::BorderStyleLayers
            | C::BorderImageSliceLayers => self.layers(value, converter, |v| self.value(v))?,
            C::RepeatStructLayers => self.layers(value, converter, |v| {
                Ok(StyleValue::Repeat(self.repeat_style(v)?))
            })?,
            C::Stop => {
                return Err(Error::conversion(
                    converter.name(),
                    "a color stop is only meaningful inside a gradient",
                ));
            }
        };
        Ok(converted)
    }

    fn untagged(&self, value: &ParsedValue) -> Result<StyleValue> {
        Ok(match &value.value {
            Value::Null => StyleValue::Null,
            Value::Bool(b) => StyleValue::Bool(*b),
            Value::String(s) => StyleValue::String(s.clone()),
            Value::Size(size) => StyleValue::Number(size.pixels(1.0, self.ctx.font_size)),
            Value::Color(color) => StyleValue::Color(*color),
            Value::Keyword(keyword) => StyleValue::Keyword(*keyword),
            Value::Value(inner) => self.value(inner)?,
            Value::List(values) => StyleValue::List(
                values
                    .iter()
                    .map(|v| self.value(v))
                    .collect::<Result<_>>()?,
            ),
        })
    }

    // Shape helpers.

    fn list<'v>(&self, value: &'v ParsedValue, converter: Converter) -> Result<&'v [ParsedValue]> {
        value
            .as_list()
            .ok_or_else(|| Error::conversion(converter.name(), format!("expected a list, got {value}")))
    }

    /// Entry `index` of a list value, or null when the list is shorter.
    fn entry<'v>(&self, values: &'v [ParsedValue], index: usize) -> Option<&'v ParsedValue> {
        values.get(index).filter(|v| !v.is_null())
    }

    fn layers<F>(&self, value: &ParsedValue, converter: Converter, f: F) -> Result<StyleValue>
    where
        F: Fn(&ParsedValue) -> Result<StyleValue>,
    {
        let layers = self
            .list(value, converter)?
            .iter()
            .map(f)
            .collect::<Result<_>>()?;
        Ok(StyleValue::List(layers))
    }

    fn sides<T, F>(&self, value: &ParsedValue, converter: Converter, f: F) -> Result<Sides<T>>
    where
        F: Fn(&ParsedValue) -> Result<T>,
    {
        let values = self
            .list(value, converter)?
            .iter()
            .map(f)
            .collect::<Result<Vec<_>>>()?;
        Sides::from_vec(values)
            .ok_or_else(|| Error::conversion(converter.name(), "expected four sides"))
    }

    fn boolean(&self, value: &ParsedValue, converter: Converter) -> Result<bool> {
        self.follow(value, &|_, value| {
            value
                .as_bool()
                .ok_or_else(|| Error::conversion(converter.name(), format!("not a boolean: {value}")))
        })
    }

    fn string<'v>(&self, value: &'v ParsedValue, converter: Converter) -> Result<&'v str> {
        value
            .as_str()
            .ok_or_else(|| Error::conversion(converter.name(), format!("not a string: {value}")))
    }

    fn keyword(&self, value: &ParsedValue, converter: Converter) -> Result<Keyword> {
        self.follow(value, &|_, value| {
            value
                .as_keyword()
                .ok_or_else(|| Error::conversion(converter.name(), format!("not a keyword: {value}")))
        })
    }

    // Sizes.

    fn size(&self, value: &ParsedValue) -> Result<Size> {
        self.follow(value, &|_, value| {
            value.as_size().ok_or_else(|| {
                Error::conversion(Converter::Size.name(), format!("not a size: {value}"))
            })
        })
    }

    /// Pixels, with percentages as fractions.
    fn pixels(&self, value: &ParsedValue) -> Result<f64> {
        Ok(self.size(value)?.pixels(1.0, self.ctx.font_size))
    }

    fn font_size(&self, value: &ParsedValue) -> Result<f64> {
        let font_size = self.ctx.font_size;
        Ok(self.size(value)?.pixels(font_size, font_size))
    }

    fn insets(&self, value: &ParsedValue, converter: Converter) -> Result<Insets> {
        self.sides(value, converter, |v| self.pixels(v))
    }

    fn corner_radii(&self, layer: &ParsedValue) -> Result<CornerRadii> {
        let axes = self.list(layer, Converter::CornerRadii)?;
        let axis = |index: usize| -> Result<[f64; 4]> {
            let values = axes
                .get(index)
                .and_then(|axis| axis.as_list())
                .ok_or_else(|| Error::conversion(Converter::CornerRadii.name(), "missing radii"))?;
            let radii = values
                .iter()
                .map(|v| self.pixels(v))
                .collect::<Result<Vec<_>>>()?;
            radii
                .try_into()
                .map_err(|_| Error::conversion(Converter::CornerRadii.name(), "expected four radii"))
        };
        Ok(CornerRadii {
            horizontal: axis(0)?,
            vertical: axis(1)?,
        })
    }

    fn background_position(&self, value: &ParsedValue) -> Result<BackgroundPosition> {
        self.sides(value, Converter::BackgroundPosition, |v| self.size(v))
    }

    fn background_size(&self, value: &ParsedValue) -> Result<BackgroundSize> {
        let values = self.list(value, Converter::BackgroundSize)?;
        let optional = |index| self.entry(values, index).map(|v| self.size(v)).transpose();
        let flag = |index| {
            self.entry(values, index)
                .map(|v| self.boolean(v, Converter::BackgroundSize))
                .transpose()
                .map(Option::unwrap_or_default)
        };
        Ok(BackgroundSize {
            width: optional(0)?,
            height: optional(1)?,
            cover: flag(2)?,
            contain: flag(3)?,
        })
    }

    fn repeat_style(&self, layer: &ParsedValue) -> Result<RepeatStyle> {
        let values = self.list(layer, Converter::RepeatStructLayers)?;
        let axis = |index: usize| -> Result<BackgroundRepeat> {
            match self.entry(values, index).map(|v| self.keyword(v, Converter::RepeatStructLayers)) {
                Some(Ok(Keyword::Repeat(repeat))) => Ok(repeat),
                Some(Err(err)) => Err(err),
                _ => Err(Error::conversion(
                    Converter::RepeatStructLayers.name(),
                    "expected a repeat keyword",
                )),
            }
        };
        Ok(RepeatStyle {
            x: axis(0)?,
            y: axis(1)?,
        })
    }

    // Borders.

    fn border_paint(&self, value: &ParsedValue) -> Result<Sides<Paint>> {
        self.sides(value, Converter::BorderPaint, |v| self.paint(v))
    }

    fn border_style(&self, value: &ParsedValue) -> Result<BorderStrokeStyle> {
        let values = self.list(value, Converter::BorderStyle)?;
        let mut style = BorderStrokeStyle::default();

        if let Some(dash) = self.entry(values, 0) {
            style.dash = match &dash.value {
                Value::String(name) => match name.as_str() {
                    "none" => DashStyle::None,
                    "solid" => DashStyle::Solid,
                    "dotted" => DashStyle::Dotted,
                    "dashed" => DashStyle::Dashed,
                    other => {
                        return Err(Error::conversion(
                            Converter::BorderStyle.name(),
                            format!("unknown dash style '{other}'"),
                        ));
                    }
                },
                Value::List(segments) => DashStyle::Segments(
                    segments
                        .iter()
                        .map(|v| self.pixels(v))
                        .collect::<Result<_>>()?,
                ),
                _ => {
                    return Err(Error::conversion(
                        Converter::BorderStyle.name(),
                        format!("not a dash style: {dash}"),
                    ));
                }
            };
        }
        if let Some(phase) = self.entry(values, 1) {
            style.dash_offset = self.pixels(phase)?;
        }
        if let Some(Keyword::StrokeType(stroke_type)) = self.optional_keyword(values, 2)? {
            style.stroke_type = stroke_type;
        }
        if let Some(Keyword::LineJoin(join)) = self.optional_keyword(values, 3)? {
            style.line_join = join;
        }
        if let Some(limit) = self.entry(values, 4) {
            style.miter_limit = self.pixels(limit)?;
        }
        if let Some(Keyword::LineCap(cap)) = self.optional_keyword(values, 5)? {
            style.line_cap = cap;
        }
        Ok(style)
    }

    fn optional_keyword(&self, values: &[ParsedValue], index: usize) -> Result<Option<Keyword>> {
        self.entry(values, index)
            .map(|v| self.keyword(v, Converter::BorderStyle))
            .transpose()
    }

    fn border_image_slice(&self, value: &ParsedValue) -> Result<BorderImageSlice> {
        let values = self.list(value, Converter::BorderImageSlice)?;
        let widths = values.first().ok_or_else(|| {
            Error::conversion(Converter::BorderImageSlice.name(), "missing slice widths")
        })?;
        let fill = match self.entry(values, 1) {
            Some(flag) => self.boolean(flag, Converter::BorderImageSlice)?,
            None => false,
        };
        Ok(BorderImageSlice {
            widths: self.sides(widths, Converter::BorderImageSlice, |v| self.size(v))?,
            fill,
        })
    }

    // Fonts.

    fn posture(&self, value: &ParsedValue) -> Result<FontPosture> {
        match self.keyword(value, Converter::FontStyle)? {
            Keyword::Posture(posture) => Ok(posture),
            other => Err(Error::conversion(
                Converter::FontStyle.name(),
                format!("not a font style: {}", other.as_css()),
            )),
        }
    }

    fn weight(&self, value: &ParsedValue) -> Result<FontWeight> {
        match self.keyword(value, Converter::FontWeight)? {
            Keyword::Weight(weight) => Ok(weight),
            other => Err(Error::conversion(
                Converter::FontWeight.name(),
                format!("not a font weight: {}", other.as_css()),
            )),
        }
    }

    fn font(&self, value: &ParsedValue) -> Result<FontSpec> {
        let values = self.list(value, Converter::Font)?;
        let family = values
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::conversion(Converter::Font.name(), "missing font family"))?;
        let size = match self.entry(values, 1) {
            Some(size) => self.font_size(size)?,
            None => self.ctx.font_size,
        };
        let weight = match self.entry(values, 2) {
            Some(weight) => self.weight(weight)?,
            None => FontWeight::Normal,
        };
        let posture = match self.entry(values, 3) {
            Some(posture) => self.posture(posture)?,
            None => FontPosture::Regular,
        };
        Ok(FontSpec {
            family: family.to_string(),
            size,
            weight,
            posture,
        })
    }
}
