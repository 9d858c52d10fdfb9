//! Sizes with units.

use std::fmt;

use crate::lexer::TokenKind;

/// Pixels per inch used for physical units.
pub const DOTS_PER_INCH: f64 = 96.0;
/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Units a [`Size`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeUnits {
    #[default]
    Px,
    Percent,
    Em,
    Ex,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
    Deg,
    Grad,
    Rad,
    Turn,
}

impl SizeUnits {
    /// Units for a numeric token kind. A plain number is pixels.
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        let units = match kind {
            TokenKind::Number | TokenKind::Px => Self::Px,
            TokenKind::Percentage => Self::Percent,
            TokenKind::Ems => Self::Em,
            TokenKind::Exs => Self::Ex,
            TokenKind::Cm => Self::Cm,
            TokenKind::Mm => Self::Mm,
            TokenKind::In => Self::In,
            TokenKind::Pt => Self::Pt,
            TokenKind::Pc => Self::Pc,
            TokenKind::Deg => Self::Deg,
            TokenKind::Grad => Self::Grad,
            TokenKind::Rad => Self::Rad,
            TokenKind::Turn => Self::Turn,
            _ => return None,
        };
        Some(units)
    }

    /// Length of the unit suffix on the source text of a token of `kind`.
    pub fn suffix_len(kind: TokenKind) -> usize {
        match kind {
            TokenKind::Percentage => 1,
            TokenKind::Ems
            | TokenKind::Exs
            | TokenKind::Px
            | TokenKind::Cm
            | TokenKind::Mm
            | TokenKind::In
            | TokenKind::Pt
            | TokenKind::Pc => 2,
            TokenKind::Deg | TokenKind::Rad => 3,
            TokenKind::Grad | TokenKind::Turn => 4,
            _ => 0,
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Self::Deg | Self::Grad | Self::Rad | Self::Turn)
    }

    /// Units that do not depend on font or container size.
    pub fn is_absolute(self) -> bool {
        !matches!(self, Self::Percent | Self::Em | Self::Ex)
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::In => "in",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Deg => "deg",
            Self::Grad => "grad",
            Self::Rad => "rad",
            Self::Turn => "turn",
        }
    }
}

/// A magnitude with units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub value: f64,
    pub units: SizeUnits,
}

impl Size {
    pub const fn new(value: f64, units: SizeUnits) -> Self {
        Self { value, units }
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, SizeUnits::Px)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, SizeUnits::Percent)
    }

    /// Resolve to pixels.
    ///
    /// Percentages are taken of `multiplier`; `em` and `ex` are relative to
    /// `font_size`. Angles resolve to degrees.
    pub fn pixels(&self, multiplier: f64, font_size: f64) -> f64 {
        let v = self.value;
        match self.units {
            SizeUnits::Px => v,
            SizeUnits::Percent => v / 100.0 * multiplier,
            SizeUnits::Em => v * font_size,
            SizeUnits::Ex => v * font_size / 2.0,
            SizeUnits::In => v * DOTS_PER_INCH,
            SizeUnits::Cm => v / 2.54 * DOTS_PER_INCH,
            SizeUnits::Mm => v / 25.4 * DOTS_PER_INCH,
            SizeUnits::Pt => v / POINTS_PER_INCH * DOTS_PER_INCH,
            SizeUnits::Pc => v * 12.0 / POINTS_PER_INCH * DOTS_PER_INCH,
            SizeUnits::Deg | SizeUnits::Grad | SizeUnits::Rad | SizeUnits::Turn => self.degrees(),
        }
    }

    /// Angle in degrees; other units return the bare magnitude.
    pub fn degrees(&self) -> f64 {
        match self.units {
            SizeUnits::Grad => self.value * 9.0 / 10.0,
            SizeUnits::Rad => self.value.to_degrees(),
            SizeUnits::Turn => self.value * 360.0,
            _ => self.value,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units.as_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_units() {
        assert_eq!(Size::new(1.0, SizeUnits::In).pixels(1.0, 12.0), 96.0);
        assert_eq!(Size::new(72.0, SizeUnits::Pt).pixels(1.0, 12.0), 96.0);
        assert!((Size::new(1.0, SizeUnits::Pc).pixels(1.0, 12.0) - 16.0).abs() < 1e-9);
        assert!((Size::new(2.54, SizeUnits::Cm).pixels(1.0, 12.0) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn relative_units() {
        assert_eq!(Size::percent(50.0).pixels(200.0, 12.0), 100.0);
        assert_eq!(Size::new(2.0, SizeUnits::Em).pixels(1.0, 12.0), 24.0);
        assert_eq!(Size::new(2.0, SizeUnits::Ex).pixels(1.0, 12.0), 12.0);
    }

    #[test]
    fn angles() {
        assert_eq!(Size::new(0.5, SizeUnits::Turn).degrees(), 180.0);
        assert_eq!(Size::new(100.0, SizeUnits::Grad).degrees(), 90.0);
        assert!((Size::new(std::f64::consts::PI, SizeUnits::Rad).degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn suffix_lengths() {
        assert_eq!(SizeUnits::suffix_len(TokenKind::Number), 0);
        assert_eq!(SizeUnits::suffix_len(TokenKind::Percentage), 1);
        assert_eq!(SizeUnits::suffix_len(TokenKind::Px), 2);
        assert_eq!(SizeUnits::suffix_len(TokenKind::Deg), 3);
        assert_eq!(SizeUnits::suffix_len(TokenKind::Grad), 4);
        assert_eq!(SizeUnits::suffix_len(TokenKind::Turn), 4);
    }
}
