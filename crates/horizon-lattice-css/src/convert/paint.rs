//! Colors, paints, shadows and URLs.

use url::Url;

use super::Conversion;
use crate::error::{Error, Result};
use crate::types::{BlurType, Color, CycleMethod, Size, SizeUnits};
use crate::value::{Converter, Keyword, ParsedValue, Value};

/// A gradient stop. `offset` is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub offset: f64,
    pub color: Color,
}

impl Stop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Points are fractions of the filled area when `proportional`, pixels
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub proportional: bool,
    pub cycle: CycleMethod,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// Degrees.
    pub focus_angle: f64,
    /// Fraction of the radius.
    pub focus_distance: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub proportional: bool,
    pub cycle: CycleMethod,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePattern {
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub proportional: bool,
    /// Tile the image at its natural size instead of stretching one copy.
    pub repeating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    ImagePattern(ImagePattern),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub inner: bool,
    pub blur_type: BlurType,
    pub color: Color,
    pub radius: f64,
    /// Choke for inner shadows, spread for drop shadows.
    pub spread: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Conversion<'_, '_> {
    pub(super) fn color(&self, value: &ParsedValue) -> Result<Color> {
        self.follow(value, &|conv, value| {
            if let Value::Color(color) = value.value {
                return Ok(color);
            }
            match value.converter {
                Some(Converter::DeriveColor) => {
                    let args = conv.list(value, Converter::DeriveColor)?;
                    let (Some(base), Some(brightness)) = (args.first(), args.get(1)) else {
                        return Err(Error::conversion(
                            Converter::DeriveColor.name(),
                            "expected a color and a brightness",
                        ));
                    };
                    let base = conv.color(base)?;
                    let brightness = conv.size(brightness)?;
                    Ok(base.derive((brightness.value / 100.0).clamp(-1.0, 1.0)))
                }
                Some(Converter::Ladder) => conv.ladder(value),
                _ => Err(Error::conversion(
                    "ColorConverter",
                    format!("not a color: {value}"),
                )),
            }
        })
    }

    /// The stop color at the brightness of the ladder's base color.
    fn ladder(&self, value: &ParsedValue) -> Result<Color> {
        let args = self.list(value, Converter::Ladder)?;
        let Some((base, stops)) = args.split_first() else {
            return Err(Error::conversion(Converter::Ladder.name(), "missing base color"));
        };
        let brightness = self.color(base)?.brightness();
        let stops = self.stops(stops)?;

        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Err(Error::conversion(Converter::Ladder.name(), "missing stops"));
        };
        if brightness <= first.offset {
            return Ok(first.color);
        }
        if brightness >= last.offset {
            return Ok(last.color);
        }
        for pair in stops.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if brightness <= upper.offset {
                let span = upper.offset - lower.offset;
                if span <= 0.0 {
                    return Ok(upper.color);
                }
                return Ok(lower.color.lerp(upper.color, (brightness - lower.offset) / span));
            }
        }
        Ok(last.color)
    }

    /// Stop offsets as fractions. Percentages are divided by 100; lengths
    /// by the largest length.
    fn stops(&self, values: &[ParsedValue]) -> Result<Vec<Stop>> {
        let mut raw = Vec::with_capacity(values.len());
        for value in values {
            let parts = self.list(value, Converter::Stop)?;
            let (Some(offset), Some(color)) = (parts.first(), parts.get(1)) else {
                return Err(Error::conversion(Converter::Stop.name(), "expected an offset and a color"));
            };
            raw.push((self.size(offset)?, self.color(color)?));
        }

        let font_size = self.ctx.font_size;
        let length_scale = raw
            .iter()
            .filter(|(size, _)| size.units != SizeUnits::Percent)
            .map(|(size, _)| size.pixels(1.0, font_size))
            .fold(0.0f64, f64::max);

        Ok(raw
            .into_iter()
            .map(|(size, color)| {
                let offset = if size.units == SizeUnits::Percent {
                    size.value / 100.0
                } else if length_scale > 0.0 {
                    size.pixels(1.0, font_size) / length_scale
                } else {
                    size.value
                };
                Stop::new(offset.clamp(0.0, 1.0), color)
            })
            .collect())
    }

    fn cycle(&self, value: Option<&ParsedValue>) -> Result<CycleMethod> {
        match value.filter(|v| !v.is_null()) {
            Some(value) => match self.keyword(value, Converter::Enum)? {
                Keyword::Cycle(cycle) => Ok(cycle),
                other => Err(Error::conversion(
                    Converter::Enum.name(),
                    format!("not a cycle method: {}", other.as_css()),
                )),
            },
            None => Ok(CycleMethod::NoCycle),
        }
    }

    pub(super) fn paint(&self, value: &ParsedValue) -> Result<Paint> {
        self.follow(value, &|conv, value| match value.converter {
            Some(Converter::LinearGradient) => {
                Ok(Paint::LinearGradient(conv.linear_gradient(value)?))
            }
            Some(Converter::RadialGradient) => {
                Ok(Paint::RadialGradient(conv.radial_gradient(value)?))
            }
            Some(Converter::ImagePattern) => Ok(Paint::ImagePattern(conv.image_pattern(value, false)?)),
            Some(Converter::RepeatingImagePattern) => {
                Ok(Paint::ImagePattern(conv.image_pattern(value, true)?))
            }
            _ => Ok(Paint::Color(conv.color(value)?)),
        })
    }

    fn linear_gradient(&self, value: &ParsedValue) -> Result<LinearGradient> {
        let values = self.list(value, Converter::LinearGradient)?;
        if values.len() < 7 {
            return Err(Error::conversion(
                Converter::LinearGradient.name(),
                "expected four points, a cycle method and two stops",
            ));
        }
        let points = values[..4]
            .iter()
            .map(|v| self.size(v))
            .collect::<Result<Vec<_>>>()?;
        let proportional = points[0].units == SizeUnits::Percent;
        if points
            .iter()
            .any(|p| (p.units == SizeUnits::Percent) != proportional)
        {
            return Err(Error::conversion(
                Converter::LinearGradient.name(),
                "mixed percentage and length points",
            ));
        }
        let coord = |size: &Size| {
            if proportional {
                size.value / 100.0
            } else {
                size.pixels(1.0, self.ctx.font_size)
            }
        };
        Ok(LinearGradient {
            start_x: coord(&points[0]),
            start_y: coord(&points[1]),
            end_x: coord(&points[2]),
            end_y: coord(&points[3]),
            proportional,
            cycle: self.cycle(values.get(4))?,
            stops: self.stops(&values[5..])?,
        })
    }

    fn radial_gradient(&self, value: &ParsedValue) -> Result<RadialGradient> {
        let values = self.list(value, Converter::RadialGradient)?;
        if values.len() < 8 {
            return Err(Error::conversion(
                Converter::RadialGradient.name(),
                "expected five geometry entries, a cycle method and two stops",
            ));
        }
        let optional = |index: usize| self.entry(values, index).map(|v| self.size(v)).transpose();

        let focus_angle = optional(0)?.map(|s| s.degrees()).unwrap_or(0.0);
        let focus_distance = optional(1)?.map(|s| s.value / 100.0).unwrap_or(0.0);
        let center_x = optional(2)?.unwrap_or(Size::percent(50.0));
        let center_y = optional(3)?.unwrap_or(Size::percent(50.0));
        let radius = optional(4)?.unwrap_or(Size::percent(50.0));

        let proportional = radius.units == SizeUnits::Percent;
        let coord = |size: Size| {
            if size.units == SizeUnits::Percent {
                size.value / 100.0
            } else {
                size.pixels(1.0, self.ctx.font_size)
            }
        };
        Ok(RadialGradient {
            focus_angle,
            focus_distance,
            center_x: coord(center_x),
            center_y: coord(center_y),
            radius: coord(radius),
            proportional,
            cycle: self.cycle(values.get(5))?,
            stops: self.stops(&values[6..])?,
        })
    }

    fn image_pattern(&self, value: &ParsedValue, repeating: bool) -> Result<ImagePattern> {
        let values = self.list(value, Converter::ImagePattern)?;
        let url = values
            .first()
            .ok_or_else(|| Error::conversion(Converter::ImagePattern.name(), "missing url"))?;
        let mut pattern = ImagePattern {
            url: self.url(url)?,
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            proportional: true,
            repeating,
        };
        if values.len() >= 5 {
            pattern.x = self.pixels(&values[1])?;
            pattern.y = self.pixels(&values[2])?;
            pattern.width = self.pixels(&values[3])?;
            pattern.height = self.pixels(&values[4])?;
        }
        if let Some(proportional) = values.get(5) {
            pattern.proportional = self.boolean(proportional, Converter::ImagePattern)?;
        }
        Ok(pattern)
    }

    pub(super) fn shadow(&self, value: &ParsedValue) -> Result<Shadow> {
        let converter = value.converter.unwrap_or(Converter::DropShadow);
        let values = self.list(value, converter)?;
        if values.len() != 6 {
            return Err(Error::conversion(converter.name(), "expected six arguments"));
        }
        let blur_type = match self.keyword(&values[0], converter)? {
            Keyword::Blur(blur) => blur,
            other => {
                return Err(Error::conversion(
                    converter.name(),
                    format!("not a blur type: {}", other.as_css()),
                ));
            }
        };
        Ok(Shadow {
            inner: converter == Converter::InnerShadow,
            blur_type,
            color: self.color(&values[1])?,
            radius: self.pixels(&values[2])?,
            spread: self.pixels(&values[3])?,
            offset_x: self.pixels(&values[4])?,
            offset_y: self.pixels(&values[5])?,
        })
    }

    /// `[uri, base]`: an absolute uri as is, a relative one joined to the
    /// base when there is one.
    pub(super) fn url(&self, value: &ParsedValue) -> Result<String> {
        let parts = self.list(value, Converter::Url)?;
        let uri = parts
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::conversion(Converter::Url.name(), "missing uri"))?;
        let base = parts.get(1).and_then(|v| v.as_str());
        resolve_url(uri, base)
    }
}

/// Resolve `uri` against `base`. A relative uri without a base is
/// returned unchanged.
pub(crate) fn resolve_url(uri: &str, base: Option<&str>) -> Result<String> {
    match Url::parse(uri) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => {
                let base = Url::parse(base).map_err(|e| Error::invalid_url(base, e))?;
                let joined = base.join(uri).map_err(|e| Error::invalid_url(uri, e))?;
                Ok(joined.into())
            }
            None => Ok(uri.to_string()),
        },
        Err(e) => Err(Error::invalid_url(uri, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{convert, ConvertContext, StyleValue};
    use super::*;

    fn stop(offset: Size, color: Color) -> ParsedValue {
        ParsedValue::list(
            vec![ParsedValue::size(offset), ParsedValue::color(color)],
            Converter::Stop,
        )
    }

    fn paint(value: &ParsedValue) -> Paint {
        match convert(value, &ConvertContext::default()).unwrap() {
            StyleValue::Paint(paint) => paint,
            other => panic!("expected a paint, got {other:?}"),
        }
    }

    #[test]
    fn linear_gradient_is_proportional() {
        let value = ParsedValue::list(
            vec![
                ParsedValue::size(Size::percent(0.0)),
                ParsedValue::size(Size::percent(0.0)),
                ParsedValue::size(Size::percent(0.0)),
                ParsedValue::size(Size::percent(100.0)),
                ParsedValue::keyword(Keyword::Cycle(CycleMethod::Repeat)),
                stop(Size::percent(0.0), Color::RED),
                stop(Size::percent(100.0), Color::BLUE),
            ],
            Converter::LinearGradient,
        );
        let Paint::LinearGradient(gradient) = paint(&value) else {
            panic!("expected a linear gradient");
        };
        assert!(gradient.proportional);
        assert_eq!(gradient.end_y, 1.0);
        assert_eq!(gradient.cycle, CycleMethod::Repeat);
        assert_eq!(gradient.stops[1], Stop::new(1.0, Color::BLUE));
    }

    #[test]
    fn length_stops_are_scaled() {
        let stops = vec![
            stop(Size::px(0.0), Color::RED),
            stop(Size::px(5.0), Color::WHITE),
            stop(Size::px(20.0), Color::BLUE),
        ];
        let conversion = Conversion {
            ctx: &ConvertContext::default(),
            depth: 0,
        };
        let stops = conversion.stops(&stops).unwrap();
        assert_eq!(stops[1].offset, 0.25);
    }

    #[test]
    fn ladder_picks_by_brightness() {
        let ladder = ParsedValue::list(
            vec![
                ParsedValue::color(Color::BLACK),
                stop(Size::percent(49.0), Color::WHITE),
                stop(Size::percent(50.0), Color::BLACK),
            ],
            Converter::Ladder,
        );
        let value = convert(&ladder, &ConvertContext::default()).unwrap();
        assert_eq!(value, StyleValue::Color(Color::WHITE));

        let ladder = ParsedValue::list(
            vec![
                ParsedValue::color(Color::WHITE),
                stop(Size::percent(49.0), Color::WHITE),
                stop(Size::percent(50.0), Color::BLACK),
            ],
            Converter::Ladder,
        );
        let value = convert(&ladder, &ConvertContext::default()).unwrap();
        assert_eq!(value, StyleValue::Color(Color::BLACK));
    }

    #[test]
    fn derive_darkens() {
        let value = ParsedValue::list(
            vec![
                ParsedValue::color(Color::WHITE),
                ParsedValue::size(Size::percent(-50.0)),
            ],
            Converter::DeriveColor,
        );
        let StyleValue::Color(color) = convert(&value, &ConvertContext::default()).unwrap() else {
            panic!("expected a color");
        };
        assert!(color.brightness() < Color::WHITE.brightness());
    }

    #[test]
    fn urls() {
        assert_eq!(
            resolve_url("img/a.png", Some("file:///css/app.css")).unwrap(),
            "file:///css/img/a.png"
        );
        assert_eq!(resolve_url("img/a.png", None).unwrap(), "img/a.png");
        assert_eq!(
            resolve_url("http://example.com/a.png", Some("file:///css/app.css")).unwrap(),
            "http://example.com/a.png"
        );
        assert!(matches!(
            resolve_url("a.png", Some("not a url")),
            Err(Error::InvalidUrl { .. })
        ));
    }
}
