//! Single style rule definition.

use crate::rules::Declaration;
use crate::selector::{Selector, Specificity};

/// A selector group with its declarations.
///
/// Each rule has:
/// - The selectors it applies to, in source order
/// - Its declarations, in source order
/// - Source order within its stylesheet (for tie-breaking)
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
    /// Source order, assigned when the rule is added to a stylesheet.
    pub order: u32,
}

impl Rule {
    /// Create a new rule.
    pub fn new(selectors: Vec<Selector>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
            order: 0,
        }
    }

    /// A rule matching everything, as produced for an in-line style.
    pub fn universal(declarations: Vec<Declaration>) -> Self {
        Self::new(vec![Selector::universal()], declarations)
    }

    /// Highest specificity among the selectors.
    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(Specificity::of_selector)
            .max()
            .unwrap_or(Specificity::ZERO)
    }

    /// The last declaration of `property`, honouring `!important`.
    pub fn declaration(&self, property: &str) -> Option<&Declaration> {
        let property = property.to_lowercase();
        let mut found = None;
        for decl in self.declarations.iter().filter(|d| d.property == property) {
            if decl.important || found.is_none_or(|f: &Declaration| !f.important) {
                found = Some(decl);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorPart;
    use crate::types::Color;
    use crate::value::ParsedValue;

    fn color(property: &str, color: Color, important: bool) -> Declaration {
        Declaration::new(property, ParsedValue::color(color), important)
    }

    #[test]
    fn rule_specificity() {
        let rule = Rule::new(
            vec![
                Selector::type_selector("Button"),
                Selector::class("primary").child(SelectorPart::id_only("ok")),
            ],
            vec![],
        );
        assert_eq!(rule.specificity(), Specificity(1, 1, 0));
        assert_eq!(Rule::universal(vec![]).specificity(), Specificity::ZERO);
    }

    #[test]
    fn important_declaration_wins() {
        let rule = Rule::universal(vec![
            color("-fx-text-fill", Color::RED, true),
            color("-fx-text-fill", Color::BLUE, false),
            color("-fx-fill", Color::RED, false),
            color("-fx-fill", Color::BLUE, false),
        ]);
        let text = rule.declaration("-FX-TEXT-FILL").unwrap();
        assert_eq!(text.value.as_color(), Some(Color::RED));
        let fill = rule.declaration("-fx-fill").unwrap();
        assert_eq!(fill.value.as_color(), Some(Color::BLUE));
        assert!(rule.declaration("-fx-stroke").is_none());
    }
}
