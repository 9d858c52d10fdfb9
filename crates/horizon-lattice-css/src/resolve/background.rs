//! Background position, repeat and size layers.

use crate::lexer::TokenKind;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{BackgroundRepeat, Size};
use crate::value::{Converter, Keyword, ParsedValue, Value};

use super::Resolver;

fn is_position_keyword(text: &str) -> bool {
    matches!(text, "center" | "left" | "right" | "top" | "bottom")
}

impl Resolver<'_> {
    pub(super) fn parse_background_position_layers(
        &self,
        root: TermId,
    ) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_background_position(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(
            layers,
            Converter::BackgroundPositionLayers,
        ))
    }

    /// One to four position terms resolved to top, right, bottom and left
    /// offsets. Keywords may come in either axis order.
    fn parse_background_position(&self, layer: TermId) -> ValueResult<ParsedValue> {
        let mut terms: Vec<TermId> = self.tree.series(layer).take(4).collect();
        let texts = |terms: &[TermId]| -> Vec<String> {
            terms
                .iter()
                .map(|&id| self.tree.text(id).to_lowercase())
                .collect()
        };

        // Put the horizontal part first.
        let t = texts(&terms);
        let vertical_first = matches!(t[0].as_str(), "top" | "bottom");
        match terms.len() {
            2 if vertical_first && matches!(t[1].as_str(), "left" | "right" | "center") => {
                terms.swap(0, 1);
            }
            3 if vertical_first => {
                if matches!(t[1].as_str(), "left" | "right") {
                    terms = vec![terms[1], terms[2], terms[0]];
                } else {
                    terms = vec![terms[2], terms[0], terms[1]];
                }
            }
            4 if vertical_first && matches!(t[2].as_str(), "left" | "right") => {
                terms = vec![terms[2], terms[3], terms[0], terms[1]];
            }
            _ => {}
        }
        let t = texts(&terms);

        let zero = || ParsedValue::size(Size::percent(0.0));
        let pct = |v: f64| ParsedValue::size(Size::percent(v));
        let (mut top, mut right, mut bottom, mut left) = (zero(), zero(), zero(), zero());

        match terms.len() {
            1 => match t[0].as_str() {
                "center" => {
                    left = pct(50.0);
                    top = pct(50.0);
                }
                "left" => top = pct(50.0),
                "right" => {
                    left = pct(100.0);
                    top = pct(50.0);
                }
                "top" => left = pct(50.0),
                "bottom" => {
                    left = pct(50.0);
                    top = pct(100.0);
                }
                _ => {
                    left = self.parse_size(terms[0])?;
                    top = pct(50.0);
                }
            },
            2 => {
                let v1 = t[0].as_str();
                let v2 = t[1].as_str();
                if !is_position_keyword(v1) || v1 == "left" || v1 == "right" || v1 == "center" {
                    left = match v1 {
                        "left" => pct(0.0),
                        "right" => pct(100.0),
                        "center" => pct(50.0),
                        _ => self.parse_size(terms[0])?,
                    };
                    match v2 {
                        "top" => top = pct(0.0),
                        "bottom" => top = pct(100.0),
                        "center" => top = pct(50.0),
                        _ if !is_position_keyword(v2) => top = self.parse_size(terms[1])?,
                        _ => {
                            return Err(self.error(
                                terms[1],
                                "Expected 'top', 'bottom', 'center' or <size>",
                            ));
                        }
                    }
                }
            }
            3 => {
                let v1 = t[0].as_str();
                let v2 = t[1].as_str();
                let v3 = t[2].as_str();
                if !is_position_keyword(v1) || v1 == "center" {
                    left = if v1 == "center" {
                        pct(50.0)
                    } else {
                        self.parse_size(terms[0])?
                    };
                    if is_position_keyword(v3) {
                        return Err(self.error(terms[2], "Expected <size>"));
                    }
                    match v2 {
                        "top" => top = self.parse_size(terms[2])?,
                        "bottom" => bottom = self.parse_size(terms[2])?,
                        _ => return Err(self.error(terms[1], "Expected 'top' or 'bottom'")),
                    }
                } else if v1 == "left" || v1 == "right" {
                    if !is_position_keyword(v2) {
                        let offset = self.parse_size(terms[1])?;
                        if v1 == "left" {
                            left = offset;
                        } else {
                            right = offset;
                        }
                        match v3 {
                            "top" => top = pct(0.0),
                            "bottom" => top = pct(100.0),
                            "center" => top = pct(50.0),
                            _ => {
                                return Err(self.error(
                                    terms[2],
                                    "Expected 'top', 'bottom' or 'center'",
                                ));
                            }
                        }
                    } else {
                        left = if v1 == "left" { pct(0.0) } else { pct(100.0) };
                        if is_position_keyword(v3) {
                            return Err(self.error(terms[2], "Expected <size>"));
                        }
                        match v2 {
                            "top" => top = self.parse_size(terms[2])?,
                            "bottom" => bottom = self.parse_size(terms[2])?,
                            _ => return Err(self.error(terms[1], "Expected 'top' or 'bottom'")),
                        }
                    }
                }
            }
            _ => {
                const EXPECTED: &str = "Expected 'left' or 'right' followed by <size> followed by 'top' or 'bottom' followed by <size>";
                let (v1, v2, v3, v4) = (t[0].as_str(), t[1].as_str(), t[2].as_str(), t[3].as_str());
                let horizontal = matches!(v1, "left" | "right") && !is_position_keyword(v2);
                let vertical = matches!(v3, "top" | "bottom") && !is_position_keyword(v4);
                if !horizontal || !vertical {
                    return Err(self.error(terms[0], EXPECTED));
                }
                let x = self.parse_size(terms[1])?;
                let y = self.parse_size(terms[3])?;
                if v1 == "left" {
                    left = x;
                } else {
                    right = x;
                }
                if v3 == "top" {
                    top = y;
                } else {
                    bottom = y;
                }
            }
        }

        Ok(ParsedValue::list(
            vec![top, right, bottom, left],
            Converter::BackgroundPosition,
        ))
    }

    pub(super) fn parse_repeat_style_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_repeat_style(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::RepeatStructLayers))
    }

    /// `repeat-x | repeat-y | <repeat> <repeat>?`
    fn parse_repeat_style(&self, layer: TermId) -> ValueResult<ParsedValue> {
        if self.kind(layer) != Some(TokenKind::Ident) {
            return Err(self.error(layer, "Expected '<repeat-style>'"));
        }
        let repeat = |text: &str| match text {
            "repeat" => Some(BackgroundRepeat::Repeat),
            "space" => Some(BackgroundRepeat::Space),
            "round" => Some(BackgroundRepeat::Round),
            "no-repeat" | "stretch" => Some(BackgroundRepeat::NoRepeat),
            _ => None,
        };

        let first = self.tree.text(layer).to_lowercase();
        let (x, mut y) = match first.as_str() {
            "repeat-x" => (BackgroundRepeat::Repeat, BackgroundRepeat::NoRepeat),
            "repeat-y" => (BackgroundRepeat::NoRepeat, BackgroundRepeat::Repeat),
            text => match repeat(text) {
                Some(both) => (both, both),
                None => return Err(self.error(layer, "Expected '<repeat-style>'")),
            },
        };

        if let Some(second) = self.tree.next_in_series(layer) {
            let text = self.tree.text(second).to_lowercase();
            match text.as_str() {
                "repeat-x" | "repeat-y" => {
                    return Err(self.error(second, format!("Unexpected '{}'", text)));
                }
                _ if matches!(first.as_str(), "repeat-x" | "repeat-y") => {
                    return Err(self.error(second, format!("Unexpected '{}'", text)));
                }
                other => match repeat(other) {
                    Some(value) => y = value,
                    None => return Err(self.error(second, "Expected '<repeat-style>'")),
                },
            }
        }

        Ok(ParsedValue::group(vec![
            ParsedValue::keyword(Keyword::Repeat(x)),
            ParsedValue::keyword(Keyword::Repeat(y)),
        ]))
    }

    pub(super) fn parse_background_size_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_background_size(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::BackgroundSizeLayers))
    }

    /// `[<size> | auto]{1,2} | cover | contain | stretch`
    fn parse_background_size(&self, layer: TermId) -> ValueResult<ParsedValue> {
        const EXPECTED: &str = "Expected 'auto', 'cover', 'contain', or 'stretch'";
        let mut width = ParsedValue::null();
        let mut height = ParsedValue::null();
        let mut cover = false;
        let mut contain = false;

        match self.keyword(Some(layer)).as_deref() {
            Some("auto") => {}
            Some("cover") => cover = true,
            Some("contain") => contain = true,
            Some("stretch") => {
                width = ParsedValue::size(Size::percent(100.0));
                height = ParsedValue::size(Size::percent(100.0));
            }
            Some(_) => return Err(self.error(layer, EXPECTED)),
            None if self.is_size(layer) => width = self.parse_size(layer)?,
            None => return Err(self.error(layer, EXPECTED)),
        }

        if let Some(second) = self.tree.next_in_series(layer) {
            if cover || contain {
                return Err(self.error(second, "Unexpected '<bg-size>'"));
            }
            match self.keyword(Some(second)).as_deref() {
                Some("auto") => height = ParsedValue::null(),
                Some("stretch") => height = ParsedValue::size(Size::percent(100.0)),
                Some(word @ ("cover" | "contain")) => {
                    return Err(self.error(second, format!("Unexpected '{}'", word)));
                }
                Some(_) => return Err(self.error(second, EXPECTED)),
                None if self.is_size(second) => height = self.parse_size(second)?,
                None => return Err(self.error(second, EXPECTED)),
            }
        }

        Ok(ParsedValue::list(
            vec![
                width,
                height,
                ParsedValue::new(Value::Bool(cover), None),
                ParsedValue::new(Value::Bool(contain), None),
            ],
            Converter::BackgroundSize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::resolve;
    use super::*;

    fn position(value: &str) -> Vec<Size> {
        let value = resolve("-fx-background-position", value).unwrap();
        let layer = &value.as_list().unwrap()[0];
        assert_eq!(layer.converter, Some(Converter::BackgroundPosition));
        layer
            .as_list()
            .unwrap()
            .iter()
            .map(|v| v.as_size().unwrap())
            .collect()
    }

    #[test]
    fn position_center() {
        // top, right, bottom, left
        assert_eq!(
            position("center"),
            vec![
                Size::percent(50.0),
                Size::percent(0.0),
                Size::percent(0.0),
                Size::percent(50.0)
            ]
        );
    }

    #[test]
    fn position_keyword_order_is_free() {
        assert_eq!(position("top right"), position("right top"));
        assert_eq!(position("bottom 10px right 5px"), position("right 5px bottom 10px"));
    }

    #[test]
    fn position_sizes() {
        let sides = position("10px 20%");
        assert_eq!(sides[0], Size::percent(20.0));
        assert_eq!(sides[3], Size::px(10.0));

        let sides = position("right 5px bottom 10px");
        assert_eq!(sides[1], Size::px(5.0));
        assert_eq!(sides[2], Size::px(10.0));
    }

    #[test]
    fn position_errors() {
        let err = resolve("-fx-background-position", "10px left").unwrap_err();
        assert_eq!(err.message, "Expected 'top', 'bottom', 'center' or <size>");
        let err = resolve("-fx-background-position", "left 1px 2px 3px").unwrap_err();
        assert!(err.message.starts_with("Expected 'left' or 'right'"));
    }

    #[test]
    fn repeat_styles() {
        let value = resolve("-fx-background-repeat", "repeat-x, space round").unwrap();
        assert_eq!(value.converter, Some(Converter::RepeatStructLayers));
        let layers = value.as_list().unwrap();
        let first = layers[0].as_list().unwrap();
        assert_eq!(
            first[1].as_keyword(),
            Some(Keyword::Repeat(BackgroundRepeat::NoRepeat))
        );
        let second = layers[1].as_list().unwrap();
        assert_eq!(
            second[0].as_keyword(),
            Some(Keyword::Repeat(BackgroundRepeat::Space))
        );
        assert_eq!(
            second[1].as_keyword(),
            Some(Keyword::Repeat(BackgroundRepeat::Round))
        );

        let err = resolve("-fx-background-repeat", "repeat repeat-y").unwrap_err();
        assert_eq!(err.message, "Unexpected 'repeat-y'");
    }

    #[test]
    fn background_sizes() {
        let value = resolve("-fx-background-size", "cover, 10px auto, stretch").unwrap();
        let layers = value.as_list().unwrap();
        let cover = layers[0].as_list().unwrap();
        assert_eq!(cover[2].as_bool(), Some(true));
        let sized = layers[1].as_list().unwrap();
        assert_eq!(sized[0].as_size(), Some(Size::px(10.0)));
        assert!(sized[1].is_null());
        let stretch = layers[2].as_list().unwrap();
        assert_eq!(stretch[1].as_size(), Some(Size::percent(100.0)));

        let err = resolve("-fx-background-size", "contain 10px").unwrap_err();
        assert_eq!(err.message, "Unexpected '<bg-size>'");
        let err = resolve("-fx-background-size", "10px cover").unwrap_err();
        assert_eq!(err.message, "Unexpected 'cover'");
    }
}
