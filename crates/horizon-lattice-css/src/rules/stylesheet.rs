//! Stylesheet collection.

use std::path::Path;

use url::Url;

use crate::Result;
use crate::config::ParserOptions;
use crate::parser::CssParser;
use crate::rules::{FontFace, Rule};

/// Where a stylesheet comes from.
///
/// Later origins override earlier ones in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum StyleOrigin {
    /// Platform defaults (lowest priority).
    UserAgent = 0,
    /// Set by the user of the application.
    User = 1,
    /// Application stylesheets.
    #[default]
    Author = 2,
    /// In-line `style` attributes (highest priority).
    Inline = 3,
}

impl StyleOrigin {
    /// Get a numeric value for ordering calculations.
    pub fn as_order_offset(&self) -> u32 {
        (*self as u32) << 24
    }
}

/// A parsed stylesheet: rules and font faces in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub font_faces: Vec<FontFace>,
    pub origin: StyleOrigin,
    /// Location the stylesheet was loaded from, if any.
    pub url: Option<Url>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new(origin: StyleOrigin) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    /// Create an empty author stylesheet located at `url`.
    pub fn with_url(url: Url) -> Self {
        Self {
            url: Some(url),
            ..Default::default()
        }
    }

    /// Load a stylesheet from a CSS file with default parser options.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        CssParser::default().parse_file(path)
    }

    /// Parse a stylesheet from CSS text with the given origin.
    pub fn from_css(css: &str, origin: StyleOrigin) -> Self {
        CssParser::new(ParserOptions::default().origin(origin)).parse(css)
    }

    /// Add a rule to the stylesheet.
    ///
    /// The rule's order is set from the current number of rules.
    pub fn add_rule(&mut self, mut rule: Rule) {
        rule.order = self.rules.len() as u32;
        self.rules.push(rule);
    }

    pub fn add_font_face(&mut self, font_face: FontFace) {
        self.font_faces.push(font_face);
    }

    /// Move the rules and font faces of `other` to the end of this
    /// stylesheet.
    pub fn append(&mut self, other: Stylesheet) {
        for rule in other.rules {
            self.add_rule(rule);
        }
        self.font_faces.extend(other.font_faces);
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Clear all rules and font faces.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.font_faces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    #[test]
    fn stylesheet_creation() {
        let mut sheet = Stylesheet::new(StyleOrigin::UserAgent);
        assert!(sheet.is_empty());

        sheet.add_rule(Rule::new(vec![Selector::type_selector("Button")], vec![]));

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].order, 0);
        assert_eq!(sheet.origin, StyleOrigin::UserAgent);
    }

    #[test]
    fn origin_priority() {
        assert!(StyleOrigin::Inline > StyleOrigin::Author);
        assert!(StyleOrigin::Author > StyleOrigin::User);
        assert!(StyleOrigin::User > StyleOrigin::UserAgent);
        assert!(StyleOrigin::Inline.as_order_offset() > StyleOrigin::Author.as_order_offset());
    }

    #[test]
    fn append_renumbers_rules() {
        let mut sheet = Stylesheet::default();
        sheet.add_rule(Rule::new(vec![Selector::type_selector("A")], vec![]));

        let mut imported = Stylesheet::default();
        imported.add_rule(Rule::new(vec![Selector::type_selector("B")], vec![]));
        imported.add_rule(Rule::new(vec![Selector::type_selector("C")], vec![]));
        imported.add_font_face(FontFace::default());

        sheet.append(imported);
        let orders: Vec<u32> = sheet.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(sheet.font_faces.len(), 1);
    }

    #[test]
    fn from_css_sets_origin() {
        let sheet = Stylesheet::from_css(".root { -fx-padding: 1px; }", StyleOrigin::User);
        assert_eq!(sheet.origin, StyleOrigin::User);
        assert_eq!(sheet.len(), 1);
    }
}
