//! Selector specificity.

use super::{Selector, SelectorPart, TypeSelector};

/// Specificity as an (a, b, c) tuple.
///
/// - a: ID selectors
/// - b: Style classes and pseudo-classes
/// - c: Type selectors
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Calculate specificity of a selector.
    pub fn of_selector(selector: &Selector) -> Self {
        selector
            .parts
            .iter()
            .map(Self::of_part)
            .fold(Self::ZERO, |acc, part| {
                Self(acc.0 + part.0, acc.1 + part.1, acc.2 + part.2)
            })
    }

    /// Calculate specificity of a selector part.
    pub fn of_part(part: &SelectorPart) -> Self {
        let a = u32::from(part.id.is_some());
        let b = (part.classes.len() + part.pseudo_classes.len()) as u32;
        let c = u32::from(matches!(part.type_selector, Some(TypeSelector::Type(_))));
        Self(a, b, c)
    }

    /// Get the ID selector count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the class/pseudo-class count.
    pub fn classes(&self) -> u32 {
        self.1
    }

    /// Get the type selector count.
    pub fn types(&self) -> u32 {
        self.2
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}
