//! Converter-tagged parse results.

use std::fmt;

use crate::types::{
    BackgroundRepeat, BlurType, Color, CycleMethod, FontPosture, FontWeight, Size, StrokeLineCap,
    StrokeLineJoin, StrokeType,
};

/// Names the conversion that turns a [`ParsedValue`] payload into its final
/// style value. See [`convert`](crate::convert::convert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    Size,
    /// A whitespace-separated series of sizes.
    SizeSequence,
    Boolean,
    String,
    /// `[uri, base]`, resolved against the base when converted.
    Url,
    UrlLayers,
    /// `[color, brightness]`.
    DeriveColor,
    /// `[color, stop, stop, ...]`.
    Ladder,
    /// `[offset, color]`.
    Stop,
    /// `[start-x, start-y, end-x, end-y, cycle, stop...]`.
    LinearGradient,
    /// `[focus-angle, focus-distance, center-x, center-y, radius, cycle, stop...]`.
    RadialGradient,
    /// `[uri, x, y, width, height, proportional]`, trailing entries optional.
    ImagePattern,
    RepeatingImagePattern,
    PaintLayers,
    /// `[blur-type, color, radius, choke, offset-x, offset-y]`.
    InnerShadow,
    /// `[blur-type, color, radius, spread, offset-x, offset-y]`.
    DropShadow,
    /// A keyword enum value.
    Enum,
    /// Per layer: `[[horizontal x4], [vertical x4]]`, top-left first.
    CornerRadii,
    /// Four sizes: top, right, bottom, left.
    Insets,
    InsetsLayers,
    Margins,
    MarginsLayers,
    /// Four offsets from the area edges: top, right, bottom, left.
    BackgroundPosition,
    BackgroundPositionLayers,
    /// Per layer: `[x-repeat, y-repeat]`.
    RepeatStructLayers,
    /// `[width, height, cover, contain]`.
    BackgroundSize,
    BackgroundSizeLayers,
    /// Four paints: top, right, bottom, left.
    BorderPaint,
    BorderPaintLayers,
    /// `[dash, phase, type, line-join, miter-limit, line-cap]`. The dash is
    /// a keyword string (`none`, `solid`, `dotted`, `dashed`) or a
    /// size sequence from `segments(...)`.
    BorderStyle,
    BorderStyleSeries,
    BorderStyleLayers,
    /// `[insets, fill]`: a four-size `Insets` list (top, right, bottom,
    /// left) and the `fill` flag.
    BorderImageSlice,
    BorderImageSliceLayers,
    BorderImageWidth,
    BorderImageWidthLayers,
    FontSize,
    FontStyle,
    FontWeight,
    /// `[family, size, weight, style]`.
    Font,
}

impl Converter {
    pub fn name(self) -> &'static str {
        match self {
            Self::Size => "SizeConverter",
            Self::SizeSequence => "SizeSequenceConverter",
            Self::Boolean => "BooleanConverter",
            Self::String => "StringConverter",
            Self::Url => "UrlConverter",
            Self::UrlLayers => "UrlLayersConverter",
            Self::DeriveColor => "DeriveColorConverter",
            Self::Ladder => "LadderConverter",
            Self::Stop => "StopConverter",
            Self::LinearGradient => "LinearGradientConverter",
            Self::RadialGradient => "RadialGradientConverter",
            Self::ImagePattern => "ImagePatternConverter",
            Self::RepeatingImagePattern => "RepeatingImagePatternConverter",
            Self::PaintLayers => "PaintLayersConverter",
            Self::InnerShadow => "InnerShadowConverter",
            Self::DropShadow => "DropShadowConverter",
            Self::Enum => "EnumConverter",
            Self::CornerRadii => "CornerRadiiConverter",
            Self::Insets => "InsetsConverter",
            Self::InsetsLayers => "InsetsLayersConverter",
            Self::Margins => "MarginsConverter",
            Self::MarginsLayers => "MarginsLayersConverter",
            Self::BackgroundPosition => "BackgroundPositionConverter",
            Self::BackgroundPositionLayers => "BackgroundPositionLayersConverter",
            Self::RepeatStructLayers => "RepeatStructLayersConverter",
            Self::BackgroundSize => "BackgroundSizeConverter",
            Self::BackgroundSizeLayers => "BackgroundSizeLayersConverter",
            Self::BorderPaint => "BorderPaintConverter",
            Self::BorderPaintLayers => "BorderPaintLayersConverter",
            Self::BorderStyle => "BorderStyleConverter",
            Self::BorderStyleSeries => "BorderStyleSeriesConverter",
            Self::BorderStyleLayers => "BorderStyleLayersConverter",
            Self::BorderImageSlice => "BorderImageSliceConverter",
            Self::BorderImageSliceLayers => "BorderImageSliceLayersConverter",
            Self::BorderImageWidth => "BorderImageWidthConverter",
            Self::BorderImageWidthLayers => "BorderImageWidthLayersConverter",
            Self::FontSize => "FontSizeConverter",
            Self::FontStyle => "FontStyleConverter",
            Self::FontWeight => "FontWeightConverter",
            Self::Font => "FontConverter",
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A keyword resolved at parse time to one of the typed enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Cycle(CycleMethod),
    Blur(BlurType),
    Repeat(BackgroundRepeat),
    StrokeType(StrokeType),
    LineJoin(StrokeLineJoin),
    LineCap(StrokeLineCap),
    Posture(FontPosture),
    Weight(FontWeight),
}

impl Keyword {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Cycle(v) => v.as_css(),
            Self::Blur(v) => v.as_css(),
            Self::Repeat(v) => v.as_css(),
            Self::StrokeType(v) => v.as_css(),
            Self::LineJoin(v) => v.as_css(),
            Self::LineCap(v) => v.as_css(),
            Self::Posture(v) => v.as_css(),
            Self::Weight(v) => v.as_css(),
        }
    }
}

/// Payload of a [`ParsedValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent optional sub-value; the converter's default applies.
    Null,
    Bool(bool),
    String(String),
    Size(Size),
    Color(Color),
    Keyword(Keyword),
    Value(Box<ParsedValue>),
    List(Vec<ParsedValue>),
}

/// A parsed, not yet converted, style value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub value: Value,
    pub converter: Option<Converter>,
    /// The payload is the name of another property whose value applies.
    pub lookup: bool,
}

impl ParsedValue {
    pub fn new(value: Value, converter: Option<Converter>) -> Self {
        Self {
            value,
            converter,
            lookup: false,
        }
    }

    /// A reference to the named value.
    pub fn lookup(name: impl Into<String>) -> Self {
        Self {
            value: Value::String(name.into()),
            converter: None,
            lookup: true,
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null, None)
    }

    pub fn string(s: impl Into<String>, converter: Option<Converter>) -> Self {
        Self::new(Value::String(s.into()), converter)
    }

    pub fn size(size: Size) -> Self {
        Self::new(Value::Size(size), None)
    }

    pub fn color(color: Color) -> Self {
        Self::new(Value::Color(color), None)
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Self::new(Value::Keyword(keyword), Some(Converter::Enum))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(Value::Bool(value), Some(Converter::Boolean))
    }

    pub fn list(values: Vec<ParsedValue>, converter: Converter) -> Self {
        Self::new(Value::List(values), Some(converter))
    }

    /// A list whose meaning is given by the enclosing value's converter.
    pub fn group(values: Vec<ParsedValue>) -> Self {
        Self::new(Value::List(values), None)
    }

    pub fn wrap(inner: ParsedValue, converter: Converter) -> Self {
        Self::new(Value::Value(Box::new(inner)), Some(converter))
    }

    /// The `inherit` sentinel.
    pub fn inherit() -> Self {
        Self::string("inherit", None)
    }

    /// The `null` sentinel, also produced by `none`.
    pub fn null_sentinel() -> Self {
        Self::string("null", None)
    }

    pub fn is_inherit(&self) -> bool {
        self.converter.is_none() && !self.lookup && self.as_str() == Some("inherit")
    }

    pub fn is_null_sentinel(&self) -> bool {
        self.converter.is_none() && !self.lookup && self.as_str() == Some("null")
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<Size> {
        match &self.value {
            Value::Size(s) => Some(*s),
            Value::Value(inner) => inner.as_size(),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match &self.value {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<Keyword> {
        match &self.value {
            Value::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParsedValue]> {
        match &self.value {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_inner(&self) -> Option<&ParsedValue> {
        match &self.value {
            Value::Value(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lookup {
            write!(f, "<{}>", self.as_str().unwrap_or_default())?;
            return Ok(());
        }
        match &self.value {
            Value::Null => f.write_str("null")?,
            Value::Bool(b) => write!(f, "{}", b)?,
            Value::String(s) => write!(f, "{}", s)?,
            Value::Size(s) => write!(f, "{}", s)?,
            Value::Color(c) => write!(f, "{}", c)?,
            Value::Keyword(k) => f.write_str(k.as_css())?,
            Value::Value(inner) => write!(f, "{}", inner)?,
            Value::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")?;
            }
        }
        if let Some(converter) = self.converter {
            write!(f, " as {}", converter)?;
        }
        Ok(())
    }
}
