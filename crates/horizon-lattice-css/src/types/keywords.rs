//! Keyword-valued enums.

/// How a gradient fills the area outside its stop range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleMethod {
    #[default]
    NoCycle,
    Reflect,
    Repeat,
}

impl CycleMethod {
    /// Parse from CSS string.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "no-cycle" => Some(Self::NoCycle),
            "reflect" => Some(Self::Reflect),
            "repeat" => Some(Self::Repeat),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::NoCycle => "no-cycle",
            Self::Reflect => "reflect",
            Self::Repeat => "repeat",
        }
    }
}

/// Blur algorithm of a shadow effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlurType {
    Gaussian,
    OnePassBox,
    TwoPassBox,
    #[default]
    ThreePassBox,
}

impl BlurType {
    /// Parse from CSS string.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gaussian" => Some(Self::Gaussian),
            "one-pass-box" => Some(Self::OnePassBox),
            "two-pass-box" => Some(Self::TwoPassBox),
            "three-pass-box" => Some(Self::ThreePassBox),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::OnePassBox => "one-pass-box",
            Self::TwoPassBox => "two-pass-box",
            Self::ThreePassBox => "three-pass-box",
        }
    }
}

/// Tiling of a background or border image along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundRepeat {
    #[default]
    Repeat,
    Space,
    Round,
    Stretch,
    NoRepeat,
}

impl BackgroundRepeat {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Repeat => "repeat",
            Self::Space => "space",
            Self::Round => "round",
            Self::Stretch => "stretch",
            Self::NoRepeat => "no-repeat",
        }
    }
}

/// Placement of a stroke relative to its shape outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeType {
    Inside,
    Outside,
    #[default]
    Centered,
}

impl StrokeType {
    /// Parse from CSS string.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inside" => Some(Self::Inside),
            "outside" => Some(Self::Outside),
            "centered" => Some(Self::Centered),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::Centered => "centered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeLineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

impl StrokeLineJoin {
    /// Parse from CSS string.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "miter" => Some(Self::Miter),
            "bevel" => Some(Self::Bevel),
            "round" => Some(Self::Round),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Bevel => "bevel",
            Self::Round => "round",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeLineCap {
    #[default]
    Square,
    Butt,
    Round,
}

impl StrokeLineCap {
    /// Parse from CSS string.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(Self::Square),
            "butt" => Some(Self::Butt),
            "round" => Some(Self::Round),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontPosture {
    #[default]
    Regular,
    Italic,
}

impl FontPosture {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Italic => "italic",
        }
    }
}

/// Font weight, from 100 (thin) to 900 (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Weight for a numeric CSS value; only exact hundreds are accepted.
    pub fn from_weight(weight: u16) -> Option<Self> {
        let weight = match weight {
            100 => Self::Thin,
            200 => Self::ExtraLight,
            300 => Self::Light,
            400 => Self::Normal,
            500 => Self::Medium,
            600 => Self::SemiBold,
            700 => Self::Bold,
            800 => Self::ExtraBold,
            900 => Self::Black,
            _ => return None,
        };
        Some(weight)
    }

    pub fn weight(self) -> u16 {
        (self as u16 + 1) * 100
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Thin => "thin",
            Self::ExtraLight => "extra-light",
            Self::Light => "light",
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::SemiBold => "semi-bold",
            Self::Bold => "bold",
            Self::ExtraBold => "extra-bold",
            Self::Black => "black",
        }
    }
}
