//! Converted value types.

use crate::types::{
    BackgroundRepeat, FontPosture, FontWeight, Size, StrokeLineCap, StrokeLineJoin, StrokeType,
};

/// Four per-side values in top, right, bottom, left order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Sides<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Build from exactly four values. The resolver always expands side
    /// lists to four entries, so anything else is malformed.
    pub fn from_vec(values: Vec<T>) -> Option<Self> {
        let [top, right, bottom, left]: [T; 4] = values.try_into().ok()?;
        Some(Self::new(top, right, bottom, left))
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides::new(f(self.top), f(self.right), f(self.bottom), f(self.left))
    }
}

impl<T: Clone> Sides<T> {
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }
}

/// Insets or widths in pixels.
pub type Insets = Sides<f64>;

/// Elliptical corner radii in pixels, top-left first, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub horizontal: [f64; 4],
    pub vertical: [f64; 4],
}

impl CornerRadii {
    pub fn is_uniform(&self) -> bool {
        let first = self.horizontal[0];
        self.horizontal.iter().chain(&self.vertical).all(|&r| r == first)
    }
}

/// Offsets of a background image from each edge of its area. Percentages
/// stay unresolved since they depend on the image size.
pub type BackgroundPosition = Sides<Size>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundSize {
    /// `None` is `auto`.
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub cover: bool,
    pub contain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeatStyle {
    pub x: BackgroundRepeat,
    pub y: BackgroundRepeat,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashStyle {
    #[default]
    None,
    Solid,
    Dotted,
    Dashed,
    /// Alternating dash and gap lengths in pixels.
    Segments(Vec<f64>),
}

/// How one edge of a border is stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStrokeStyle {
    pub dash: DashStyle,
    pub dash_offset: f64,
    pub stroke_type: StrokeType,
    pub line_join: StrokeLineJoin,
    pub miter_limit: f64,
    pub line_cap: StrokeLineCap,
}

impl Default for BorderStrokeStyle {
    fn default() -> Self {
        Self {
            dash: DashStyle::Solid,
            dash_offset: 0.0,
            stroke_type: StrokeType::Inside,
            line_join: StrokeLineJoin::Miter,
            miter_limit: 10.0,
            line_cap: StrokeLineCap::Butt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderImageSlice {
    /// Slice offsets into the image; plain numbers are image pixels.
    pub widths: Sides<Size>,
    /// Keep the middle part of the image.
    pub fill: bool,
}

/// A resolved font request.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    pub weight: FontWeight,
    pub posture: FontPosture,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_from_vec_requires_four() {
        assert_eq!(
            Sides::from_vec(vec![1, 2, 3, 4]),
            Some(Sides::new(1, 2, 3, 4))
        );
        assert_eq!(Sides::<i32>::from_vec(vec![1, 2]), None);
    }

    #[test]
    fn uniform_radii() {
        let radii = CornerRadii {
            horizontal: [4.0; 4],
            vertical: [4.0; 4],
        };
        assert!(radii.is_uniform());
    }
}
