//! Value types produced by the resolver.

mod color;
mod keywords;
mod size;

pub use color::Color;
pub use keywords::{
    BackgroundRepeat, BlurType, CycleMethod, FontPosture, FontWeight, StrokeLineCap,
    StrokeLineJoin, StrokeType,
};
pub use size::{DOTS_PER_INCH, POINTS_PER_INCH, Size, SizeUnits};
