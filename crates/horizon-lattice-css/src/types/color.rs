//! RGBA colors.
//!
//! Components are straight (not premultiplied) and in the `0.0..=1.0` range.

use std::fmt;

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Create a color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit RGB components and an opacity.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8, opacity: f64) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            opacity,
        )
    }

    /// Parse 3, 4, 6 or 8 hex digits, optionally prefixed by `#` or `0x`.
    ///
    /// In the 4- and 8-digit forms the last digit or digit pair is alpha,
    /// scaled by 15 or 255.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = if let Some(rest) = hex.strip_prefix('#') {
            rest
        } else if has_hex_prefix(hex) {
            &hex[2..]
        } else {
            hex
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            3 | 4 => {
                let alpha = if digits.len() == 4 {
                    nibble(3)? as f64 / 15.0
                } else {
                    1.0
                };
                Some(Self::new(
                    nibble(0)? as f64 / 15.0,
                    nibble(1)? as f64 / 15.0,
                    nibble(2)? as f64 / 15.0,
                    alpha,
                ))
            }
            6 | 8 => {
                let alpha = if digits.len() == 8 {
                    byte(6)? as f64 / 255.0
                } else {
                    1.0
                };
                Some(Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?, alpha))
            }
            _ => None,
        }
    }

    /// Look up a CSS named color (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .binary_search_by(|(n, ..)| n.cmp(&name.as_str()))
            .ok()
            .map(|i| {
                let (_, r, g, b, a) = NAMED_COLORS[i];
                Self::from_rgb8(r, g, b, a as f64 / 255.0)
            })
    }

    /// Parse a hex literal or a color name.
    pub fn web(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.starts_with('#') || has_hex_prefix(spec) {
            Self::from_hex(spec)
        } else {
            Self::named(spec)
        }
    }

    /// Create a color from hue (degrees, any range), saturation and
    /// brightness (`0.0..=1.0`) and opacity.
    pub fn hsb(hue: f64, saturation: f64, brightness: f64, opacity: f64) -> Self {
        let hue = (hue % 360.0 + 360.0) % 360.0 / 360.0;
        if saturation == 0.0 {
            return Self::new(brightness, brightness, brightness, opacity);
        }
        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::new(r, g, b, opacity)
    }

    /// Hue (degrees), saturation and brightness of this color.
    pub fn to_hsb(&self) -> [f64; 3] {
        let (r, g, b) = (self.r, self.g, self.b);
        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let saturation = if cmax != 0.0 { (cmax - cmin) / cmax } else { 0.0 };
        let mut hue = 0.0;
        if saturation != 0.0 {
            let redc = (cmax - r) / (cmax - cmin);
            let greenc = (cmax - g) / (cmax - cmin);
            let bluec = (cmax - b) / (cmax - cmin);
            hue = if r == cmax {
                bluec - greenc
            } else if g == cmax {
                2.0 + redc - bluec
            } else {
                4.0 + greenc - redc
            } / 6.0;
            if hue < 0.0 {
                hue += 1.0;
            }
        }
        [hue * 360.0, saturation, cmax]
    }

    /// Perceived brightness in `0.0..=1.0`.
    pub fn brightness(&self) -> f64 {
        (self.r * self.r * 0.241 + self.g * self.g * 0.691 + self.b * self.b * 0.068).sqrt()
    }

    /// Shift hue and scale saturation, brightness and opacity.
    pub fn derive_color(
        &self,
        hue_shift: f64,
        saturation_factor: f64,
        brightness_factor: f64,
        opacity_factor: f64,
    ) -> Self {
        let [hue, saturation, brightness] = self.to_hsb();
        let brightness = if brightness == 0.0 && brightness_factor > 1.0 {
            0.05
        } else {
            brightness
        };
        Self::hsb(
            ((hue + hue_shift) % 360.0 + 360.0) % 360.0,
            (saturation * saturation_factor).clamp(0.0, 1.0),
            (brightness * brightness_factor).clamp(0.0, 1.0),
            (self.a * opacity_factor).clamp(0.0, 1.0),
        )
    }

    /// Brighten (positive) or darken (negative) by a fraction in `-1.0..=1.0`.
    ///
    /// The requested change is damped or amplified by the color's own
    /// perceived brightness so very light and very dark colors still show a
    /// visible difference.
    pub fn derive(&self, brightness: f64) -> Self {
        let base = self.brightness();
        let mut amount = brightness;
        if brightness > 0.0 {
            amount *= if base > 0.85 {
                1.6
            } else if base > 0.6 {
                1.0
            } else if base > 0.5 {
                0.9
            } else if base > 0.4 {
                0.8
            } else if base > 0.3 {
                0.7
            } else {
                0.6
            };
        } else if base < 0.2 {
            amount *= 0.6;
        }
        let amount = amount.clamp(-1.0, 1.0);

        let [hue, mut saturation, mut value] = self.to_hsb();
        if amount > 0.0 {
            saturation *= 1.0 - amount;
            value += (1.0 - value) * amount;
        } else {
            value *= amount + 1.0;
        }
        Self::hsb(
            hue.trunc(),
            saturation.clamp(0.0, 1.0),
            value.clamp(0.0, 1.0),
            self.a,
        )
    }

    /// Return a new color with modified alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: alpha, ..self }
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Whether every component differs from `other` by less than `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
}

/// Whether `s` starts with `0x` or `0X`. Compares bytes so a multi-byte
/// first character is never split.
fn has_hex_prefix(s: &str) -> bool {
    s.as_bytes()
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"0x"))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a)
        )
    }
}

/// CSS named colors, sorted by name for binary search.
const NAMED_COLORS: &[(&str, u8, u8, u8, u8)] = &[
    ("aliceblue", 0xf0, 0xf8, 0xff, 0xff),
    ("antiquewhite", 0xfa, 0xeb, 0xd7, 0xff),
    ("aqua", 0x00, 0xff, 0xff, 0xff),
    ("aquamarine", 0x7f, 0xff, 0xd4, 0xff),
    ("azure", 0xf0, 0xff, 0xff, 0xff),
    ("beige", 0xf5, 0xf5, 0xdc, 0xff),
    ("bisque", 0xff, 0xe4, 0xc4, 0xff),
    ("black", 0x00, 0x00, 0x00, 0xff),
    ("blanchedalmond", 0xff, 0xeb, 0xcd, 0xff),
    ("blue", 0x00, 0x00, 0xff, 0xff),
    ("blueviolet", 0x8a, 0x2b, 0xe2, 0xff),
    ("brown", 0xa5, 0x2a, 0x2a, 0xff),
    ("burlywood", 0xde, 0xb8, 0x87, 0xff),
    ("cadetblue", 0x5f, 0x9e, 0xa0, 0xff),
    ("chartreuse", 0x7f, 0xff, 0x00, 0xff),
    ("chocolate", 0xd2, 0x69, 0x1e, 0xff),
    ("coral", 0xff, 0x7f, 0x50, 0xff),
    ("cornflowerblue", 0x64, 0x95, 0xed, 0xff),
    ("cornsilk", 0xff, 0xf8, 0xdc, 0xff),
    ("crimson", 0xdc, 0x14, 0x3c, 0xff),
    ("cyan", 0x00, 0xff, 0xff, 0xff),
    ("darkblue", 0x00, 0x00, 0x8b, 0xff),
    ("darkcyan", 0x00, 0x8b, 0x8b, 0xff),
    ("darkgoldenrod", 0xb8, 0x86, 0x0b, 0xff),
    ("darkgray", 0xa9, 0xa9, 0xa9, 0xff),
    ("darkgreen", 0x00, 0x64, 0x00, 0xff),
    ("darkgrey", 0xa9, 0xa9, 0xa9, 0xff),
    ("darkkhaki", 0xbd, 0xb7, 0x6b, 0xff),
    ("darkmagenta", 0x8b, 0x00, 0x8b, 0xff),
    ("darkolivegreen", 0x55, 0x6b, 0x2f, 0xff),
    ("darkorange", 0xff, 0x8c, 0x00, 0xff),
    ("darkorchid", 0x99, 0x32, 0xcc, 0xff),
    ("darkred", 0x8b, 0x00, 0x00, 0xff),
    ("darksalmon", 0xe9, 0x96, 0x7a, 0xff),
    ("darkseagreen", 0x8f, 0xbc, 0x8f, 0xff),
    ("darkslateblue", 0x48, 0x3d, 0x8b, 0xff),
    ("darkslategray", 0x2f, 0x4f, 0x4f, 0xff),
    ("darkslategrey", 0x2f, 0x4f, 0x4f, 0xff),
    ("darkturquoise", 0x00, 0xce, 0xd1, 0xff),
    ("darkviolet", 0x94, 0x00, 0xd3, 0xff),
    ("deeppink", 0xff, 0x14, 0x93, 0xff),
    ("deepskyblue", 0x00, 0xbf, 0xff, 0xff),
    ("dimgray", 0x69, 0x69, 0x69, 0xff),
    ("dimgrey", 0x69, 0x69, 0x69, 0xff),
    ("dodgerblue", 0x1e, 0x90, 0xff, 0xff),
    ("firebrick", 0xb2, 0x22, 0x22, 0xff),
    ("floralwhite", 0xff, 0xfa, 0xf0, 0xff),
    ("forestgreen", 0x22, 0x8b, 0x22, 0xff),
    ("fuchsia", 0xff, 0x00, 0xff, 0xff),
    ("gainsboro", 0xdc, 0xdc, 0xdc, 0xff),
    ("ghostwhite", 0xf8, 0xf8, 0xff, 0xff),
    ("gold", 0xff, 0xd7, 0x00, 0xff),
    ("goldenrod", 0xda, 0xa5, 0x20, 0xff),
    ("gray", 0x80, 0x80, 0x80, 0xff),
    ("green", 0x00, 0x80, 0x00, 0xff),
    ("greenyellow", 0xad, 0xff, 0x2f, 0xff),
    ("grey", 0x80, 0x80, 0x80, 0xff),
    ("honeydew", 0xf0, 0xff, 0xf0, 0xff),
    ("hotpink", 0xff, 0x69, 0xb4, 0xff),
    ("indianred", 0xcd, 0x5c, 0x5c, 0xff),
    ("indigo", 0x4b, 0x00, 0x82, 0xff),
    ("ivory", 0xff, 0xff, 0xf0, 0xff),
    ("khaki", 0xf0, 0xe6, 0x8c, 0xff),
    ("lavender", 0xe6, 0xe6, 0xfa, 0xff),
    ("lavenderblush", 0xff, 0xf0, 0xf5, 0xff),
    ("lawngreen", 0x7c, 0xfc, 0x00, 0xff),
    ("lemonchiffon", 0xff, 0xfa, 0xcd, 0xff),
    ("lightblue", 0xad, 0xd8, 0xe6, 0xff),
    ("lightcoral", 0xf0, 0x80, 0x80, 0xff),
    ("lightcyan", 0xe0, 0xff, 0xff, 0xff),
    ("lightgoldenrodyellow", 0xfa, 0xfa, 0xd2, 0xff),
    ("lightgray", 0xd3, 0xd3, 0xd3, 0xff),
    ("lightgreen", 0x90, 0xee, 0x90, 0xff),
    ("lightgrey", 0xd3, 0xd3, 0xd3, 0xff),
    ("lightpink", 0xff, 0xb6, 0xc1, 0xff),
    ("lightsalmon", 0xff, 0xa0, 0x7a, 0xff),
    ("lightseagreen", 0x20, 0xb2, 0xaa, 0xff),
    ("lightskyblue", 0x87, 0xce, 0xfa, 0xff),
    ("lightslategray", 0x77, 0x88, 0x99, 0xff),
    ("lightslategrey", 0x77, 0x88, 0x99, 0xff),
    ("lightsteelblue", 0xb0, 0xc4, 0xde, 0xff),
    ("lightyellow", 0xff, 0xff, 0xe0, 0xff),
    ("lime", 0x00, 0xff, 0x00, 0xff),
    ("limegreen", 0x32, 0xcd, 0x32, 0xff),
    ("linen", 0xfa, 0xf0, 0xe6, 0xff),
    ("magenta", 0xff, 0x00, 0xff, 0xff),
    ("maroon", 0x80, 0x00, 0x00, 0xff),
    ("mediumaquamarine", 0x66, 0xcd, 0xaa, 0xff),
    ("mediumblue", 0x00, 0x00, 0xcd, 0xff),
    ("mediumorchid", 0xba, 0x55, 0xd3, 0xff),
    ("mediumpurple", 0x93, 0x70, 0xdb, 0xff),
    ("mediumseagreen", 0x3c, 0xb3, 0x71, 0xff),
    ("mediumslateblue", 0x7b, 0x68, 0xee, 0xff),
    ("mediumspringgreen", 0x00, 0xfa, 0x9a, 0xff),
    ("mediumturquoise", 0x48, 0xd1, 0xcc, 0xff),
    ("mediumvioletred", 0xc7, 0x15, 0x85, 0xff),
    ("midnightblue", 0x19, 0x19, 0x70, 0xff),
    ("mintcream", 0xf5, 0xff, 0xfa, 0xff),
    ("mistyrose", 0xff, 0xe4, 0xe1, 0xff),
    ("moccasin", 0xff, 0xe4, 0xb5, 0xff),
    ("navajowhite", 0xff, 0xde, 0xad, 0xff),
    ("navy", 0x00, 0x00, 0x80, 0xff),
    ("oldlace", 0xfd, 0xf5, 0xe6, 0xff),
    ("olive", 0x80, 0x80, 0x00, 0xff),
    ("olivedrab", 0x6b, 0x8e, 0x23, 0xff),
    ("orange", 0xff, 0xa5, 0x00, 0xff),
    ("orangered", 0xff, 0x45, 0x00, 0xff),
    ("orchid", 0xda, 0x70, 0xd6, 0xff),
    ("palegoldenrod", 0xee, 0xe8, 0xaa, 0xff),
    ("palegreen", 0x98, 0xfb, 0x98, 0xff),
    ("paleturquoise", 0xaf, 0xee, 0xee, 0xff),
    ("palevioletred", 0xdb, 0x70, 0x93, 0xff),
    ("papayawhip", 0xff, 0xef, 0xd5, 0xff),
    ("peachpuff", 0xff, 0xda, 0xb9, 0xff),
    ("peru", 0xcd, 0x85, 0x3f, 0xff),
    ("pink", 0xff, 0xc0, 0xcb, 0xff),
    ("plum", 0xdd, 0xa0, 0xdd, 0xff),
    ("powderblue", 0xb0, 0xe0, 0xe6, 0xff),
    ("purple", 0x80, 0x00, 0x80, 0xff),
    ("red", 0xff, 0x00, 0x00, 0xff),
    ("rosybrown", 0xbc, 0x8f, 0x8f, 0xff),
    ("royalblue", 0x41, 0x69, 0xe1, 0xff),
    ("saddlebrown", 0x8b, 0x45, 0x13, 0xff),
    ("salmon", 0xfa, 0x80, 0x72, 0xff),
    ("sandybrown", 0xf4, 0xa4, 0x60, 0xff),
    ("seagreen", 0x2e, 0x8b, 0x57, 0xff),
    ("seashell", 0xff, 0xf5, 0xee, 0xff),
    ("sienna", 0xa0, 0x52, 0x2d, 0xff),
    ("silver", 0xc0, 0xc0, 0xc0, 0xff),
    ("skyblue", 0x87, 0xce, 0xeb, 0xff),
    ("slateblue", 0x6a, 0x5a, 0xcd, 0xff),
    ("slategray", 0x70, 0x80, 0x90, 0xff),
    ("slategrey", 0x70, 0x80, 0x90, 0xff),
    ("snow", 0xff, 0xfa, 0xfa, 0xff),
    ("springgreen", 0x00, 0xff, 0x7f, 0xff),
    ("steelblue", 0x46, 0x82, 0xb4, 0xff),
    ("tan", 0xd2, 0xb4, 0x8c, 0xff),
    ("teal", 0x00, 0x80, 0x80, 0xff),
    ("thistle", 0xd8, 0xbf, 0xd8, 0xff),
    ("tomato", 0xff, 0x63, 0x47, 0xff),
    ("transparent", 0x00, 0x00, 0x00, 0x00),
    ("turquoise", 0x40, 0xe0, 0xd0, 0xff),
    ("violet", 0xee, 0x82, 0xee, 0xff),
    ("wheat", 0xf5, 0xde, 0xb3, 0xff),
    ("white", 0xff, 0xff, 0xff, 0xff),
    ("whitesmoke", 0xf5, 0xf5, 0xf5, 0xff),
    ("yellow", 0xff, 0xff, 0x00, 0xff),
    ("yellowgreen", 0x9a, 0xcd, 0x32, 0xff),
];
