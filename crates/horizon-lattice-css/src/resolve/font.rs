//! Font properties and the `font` shorthand.

use crate::lexer::TokenKind;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{FontPosture, FontWeight, Size};
use crate::value::{Converter, Keyword, ParsedValue, Value};

use super::Resolver;

impl Resolver<'_> {
    /// `<size> | xx-small | x-small | small | medium | large | x-large |
    /// xx-large | smaller | larger | inherit`
    pub(super) fn parse_font_size(&self, id: TermId) -> ValueResult<ParsedValue> {
        if !self.is_size(id) {
            return Err(self.error(id, "Expected '<font-size>'"));
        }
        let keyword_percent = match self.keyword(Some(id)).as_deref() {
            Some("inherit") => Some(100.0),
            Some("xx-small") => Some(60.0),
            Some("x-small") => Some(75.0),
            Some("small") => Some(80.0),
            Some("medium") => Some(100.0),
            Some("large") => Some(120.0),
            Some("x-large") => Some(150.0),
            Some("xx-large") => Some(200.0),
            Some("smaller") => Some(80.0),
            Some("larger") => Some(120.0),
            _ => None,
        };
        let size = match keyword_percent {
            Some(percent) => Size::percent(percent),
            None => self.size(id)?,
        };
        Ok(ParsedValue::wrap(ParsedValue::size(size), Converter::FontSize))
    }

    /// `normal | italic | oblique | inherit`, or `None` for any other
    /// identifier.
    pub(super) fn parse_font_style(&self, id: TermId) -> ValueResult<Option<ParsedValue>> {
        if self.kind(id) != Some(TokenKind::Ident) {
            return Err(self.error(id, "Expected '<font-style>'"));
        }
        let posture = match self.keyword(Some(id)).as_deref() {
            Some("normal") => FontPosture::Regular,
            Some("italic" | "oblique") => FontPosture::Italic,
            Some("inherit") => {
                return Ok(Some(ParsedValue::string(
                    "inherit",
                    Some(Converter::FontStyle),
                )));
            }
            _ => return Ok(None),
        };
        Ok(Some(ParsedValue::new(
            Value::Keyword(Keyword::Posture(posture)),
            Some(Converter::FontStyle),
        )))
    }

    /// `normal | bold | bolder | lighter | 100 | ... | 900 | inherit`
    pub(super) fn parse_font_weight(&self, id: TermId) -> ValueResult<ParsedValue> {
        self.font_weight(id)
            .ok_or_else(|| self.error(id, "Expected '<font-weight>'"))
    }

    fn font_weight(&self, id: TermId) -> Option<ParsedValue> {
        let text = self.tree.text(id).to_lowercase();
        let weight = match text.as_str() {
            "inherit" | "normal" => FontWeight::Normal,
            "bold" | "bolder" => FontWeight::Bold,
            "lighter" => FontWeight::Light,
            number => FontWeight::from_weight(number.parse().ok()?)?,
        };
        Some(ParsedValue::new(
            Value::Keyword(Keyword::Weight(weight)),
            Some(Converter::FontWeight),
        ))
    }

    /// A family name: an identifier or a quoted string. Generic family
    /// names are lower-cased.
    pub(super) fn parse_font_family(&self, id: TermId) -> ValueResult<ParsedValue> {
        if !matches!(self.kind(id), Some(TokenKind::Ident | TokenKind::String)) {
            return Err(self.error(id, "Expected '<font-family>'"));
        }
        let text = self.tree.text(id);
        let lower = text.to_lowercase();
        let family = match lower.as_str() {
            "inherit" | "serif" | "sans-serif" | "cursive" | "fantasy" | "monospace" => lower,
            _ => text.to_string(),
        };
        Ok(ParsedValue::string(family, Some(Converter::String)))
    }

    /// `[<font-style> || <font-variant> || <font-weight>]? <font-size>
    /// [/ <line-height>]? <font-family>`
    ///
    /// Read right to left: the family is last, the size before it (or
    /// before a `/ <line-height>`, which is ignored).
    pub(super) fn parse_font(&self, root: TermId) -> ValueResult<ParsedValue> {
        let mut terms: Vec<TermId> = self.tree.series(root).collect();
        terms.reverse();
        let mut terms = terms.into_iter().peekable();

        let family_id = terms
            .next()
            .ok_or_else(|| self.error(root, "Expected '<font-family>'"))?;
        let family = self.parse_font_family(family_id)?;

        let mut size_id = terms
            .next()
            .ok_or_else(|| self.error(family_id, "Expected '<size>'"))?;
        if !self.is_size(size_id) {
            return Err(self.error(size_id, "Expected '<size>'"));
        }
        if terms
            .peek()
            .is_some_and(|&id| self.kind(id) == Some(TokenKind::Solidus))
        {
            terms.next();
            size_id = terms
                .next()
                .ok_or_else(|| self.error(size_id, "Expected '<size>'"))?;
        }
        let size = self.parse_font_size(size_id)?;

        let mut weight = None;
        let mut style = None;
        let mut variant = false;
        for id in terms {
            if weight.is_some() && style.is_some() && variant {
                break;
            }
            if self.kind(id) != Some(TokenKind::Ident) && self.kind(id) != Some(TokenKind::Number) {
                return Err(self.error(
                    id,
                    "Expected '<font-weight>', '<font-style>' or '<font-variant>'",
                ));
            }
            if style.is_none()
                && self.kind(id) == Some(TokenKind::Ident)
                && let Some(value) = self.parse_font_style(id)?
            {
                style = Some(value);
            } else if !variant && self.tree.is_ident(id, "small-caps") {
                variant = true;
            } else if weight.is_none() {
                weight = Some(self.parse_font_weight(id)?);
            } else {
                return Err(self.error(
                    id,
                    "Expected '<font-weight>', '<font-style>' or '<font-variant>'",
                ));
            }
        }

        Ok(ParsedValue::list(
            vec![
                family,
                size,
                weight.unwrap_or_else(ParsedValue::null),
                style.unwrap_or_else(ParsedValue::null),
            ],
            Converter::Font,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::resolve;
    use super::*;

    #[test]
    fn font_size_keywords() {
        let value = resolve("-fx-font-size", "x-large").unwrap();
        assert_eq!(value.converter, Some(Converter::FontSize));
        assert_eq!(value.as_size(), Some(Size::percent(150.0)));
        let value = resolve("-fx-font-size", "12pt").unwrap();
        assert_eq!(
            value.as_size(),
            Some(Size::new(12.0, crate::types::SizeUnits::Pt))
        );
        let err = resolve("-fx-font-size", "\"big\"").unwrap_err();
        assert_eq!(err.message, "Expected '<font-size>'");
    }

    #[test]
    fn font_weight_and_style() {
        let value = resolve("-fx-font-weight", "600").unwrap();
        assert_eq!(
            value.as_keyword(),
            Some(Keyword::Weight(FontWeight::SemiBold))
        );
        let err = resolve("-fx-font-weight", "heavy").unwrap_err();
        assert_eq!(err.message, "Expected '<font-weight>'");

        let value = resolve("-fx-font-style", "oblique").unwrap();
        assert_eq!(
            value.as_keyword(),
            Some(Keyword::Posture(FontPosture::Italic))
        );
        let err = resolve("-fx-font-style", "slanted").unwrap_err();
        assert_eq!(err.message, "Expected '<font-style>'");
    }

    #[test]
    fn font_family_generic_names() {
        let value = resolve("-fx-font-family", "SANS-SERIF").unwrap();
        assert_eq!(value.as_str(), Some("sans-serif"));
        let value = resolve("-fx-font-family", "\"Open Sans\"").unwrap();
        assert_eq!(value.as_str(), Some("Open Sans"));
    }

    #[test]
    fn font_shorthand() {
        let value = resolve("-fx-font", "italic small-caps bold 16px/2 \"Fira Sans\"").unwrap();
        assert_eq!(value.converter, Some(Converter::Font));
        let parts = value.as_list().unwrap();
        assert_eq!(parts[0].as_str(), Some("Fira Sans"));
        assert_eq!(parts[1].as_size(), Some(Size::px(16.0)));
        assert_eq!(parts[2].as_keyword(), Some(Keyword::Weight(FontWeight::Bold)));
        assert_eq!(
            parts[3].as_keyword(),
            Some(Keyword::Posture(FontPosture::Italic))
        );

        let value = resolve("-fx-font", "12px serif").unwrap();
        let parts = value.as_list().unwrap();
        assert!(parts[2].is_null());
        assert!(parts[3].is_null());

        let err = resolve("-fx-font", "serif").unwrap_err();
        assert_eq!(err.message, "Expected '<size>'");
    }
}
