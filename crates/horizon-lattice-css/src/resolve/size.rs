//! Sizes, side lists and corner radii.

use crate::lexer::TokenKind;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{Size, SizeUnits};
use crate::value::{Converter, ParsedValue};

use super::Resolver;

impl Resolver<'_> {
    /// Numeric value and units of a size token.
    pub(super) fn size(&self, id: TermId) -> ValueResult<Size> {
        let Some(token) = self.tree.token(id) else {
            return Err(self.error(id, "Expected '<number>'"));
        };
        let Some(units) = SizeUnits::from_kind(token.kind) else {
            return Err(self.error(id, "Expected '<number>'"));
        };
        let text = &token.text;
        let digits = &text[..text.len().saturating_sub(SizeUnits::suffix_len(token.kind))];
        let value = digits
            .parse::<f64>()
            .map_err(|_| self.error(id, format!("Invalid number '{}'", text)))?;
        Ok(Size::new(value, units))
    }

    /// A size, or an identifier standing for a looked-up size.
    pub(super) fn parse_size(&self, id: TermId) -> ValueResult<ParsedValue> {
        match self.kind(id) {
            Some(kind) if kind.is_size() => Ok(ParsedValue::size(self.size(id)?)),
            Some(TokenKind::Ident) => Ok(ParsedValue::lookup(self.tree.text(id))),
            _ => Err(self.error(id, "Expected '<size>'")),
        }
    }

    /// Every term of the series must be a size token.
    pub(super) fn parse_size_series(&self, root: TermId) -> ValueResult<Vec<ParsedValue>> {
        self.tree
            .series(root)
            .map(|id| match self.kind(id) {
                Some(kind) if kind.is_size() => Ok(ParsedValue::size(self.size(id)?)),
                _ => Err(self.error(root, "expected series of <size>")),
            })
            .collect()
    }

    /// One to four sizes expanded to top, right, bottom, left.
    pub(super) fn parse_size1to4(&self, root: TermId) -> ValueResult<Vec<ParsedValue>> {
        let mut sides = self
            .tree
            .series(root)
            .take(4)
            .map(|id| self.parse_size(id))
            .collect::<ValueResult<Vec<_>>>()?;
        replicate_sides(&mut sides);
        Ok(sides)
    }

    pub(super) fn parse_insets_layers(&self, root: TermId) -> ValueResult<Vec<ParsedValue>> {
        self.tree
            .layers(root)
            .map(|layer| Ok(ParsedValue::list(self.parse_size1to4(layer)?, Converter::Insets)))
            .collect()
    }

    pub(super) fn parse_insets_layer(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self.parse_insets_layers(root)?;
        layers
            .into_iter()
            .last()
            .ok_or_else(|| self.error(root, "Expected '<size>'"))
    }

    pub(super) fn parse_margins_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| Ok(ParsedValue::list(self.parse_size1to4(layer)?, Converter::Margins)))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::MarginsLayers))
    }

    /// `[<size>{1,4} [/ <size>{1,4}]?]#`
    pub(super) fn parse_corner_radius(&self, root: TermId) -> ValueResult<ParsedValue> {
        const SHAPE: &str = "expected [<length>|<percentage>]{1,4} [/ [<length>|<percentage>]{1,4}]?";

        let mut layers = Vec::new();
        for layer in self.tree.layers(root) {
            let mut horizontal = Vec::new();
            let mut vertical = Vec::new();
            let mut after_solidus = false;
            for id in self.tree.series(layer) {
                if self.kind(id) == Some(TokenKind::Solidus) {
                    if after_solidus {
                        return Err(self.error(id, "unexpected SOLIDUS"));
                    }
                    after_solidus = true;
                    continue;
                }
                let size = self.parse_size(id)?;
                if after_solidus {
                    vertical.push(size);
                } else {
                    horizontal.push(size);
                }
            }

            if horizontal.is_empty() || horizontal.len() > 4 || vertical.len() > 4 {
                return Err(self.error(layer, SHAPE));
            }
            if after_solidus && vertical.is_empty() {
                return Err(self.error(layer, SHAPE));
            }

            replicate_sides(&mut horizontal);
            if vertical.is_empty() {
                vertical = horizontal.clone();
            } else {
                replicate_sides(&mut vertical);
            }

            // A corner with either radius zero is square.
            for (h, v) in horizontal.iter_mut().zip(vertical.iter_mut()) {
                if is_zero(h) || is_zero(v) {
                    *h = ParsedValue::size(Size::px(0.0));
                    *v = ParsedValue::size(Size::px(0.0));
                }
            }

            layers.push(ParsedValue::group(vec![
                ParsedValue::group(horizontal),
                ParsedValue::group(vertical),
            ]));
        }
        Ok(ParsedValue::list(layers, Converter::CornerRadii))
    }
}

/// Fill a one to four entry side list out to four: a missing right copies
/// top, bottom copies top, left copies right.
pub(super) fn replicate_sides<T: Clone>(sides: &mut Vec<T>) {
    if sides.is_empty() {
        return;
    }
    if sides.len() < 2 {
        sides.push(sides[0].clone());
    }
    if sides.len() < 3 {
        sides.push(sides[0].clone());
    }
    if sides.len() < 4 {
        sides.push(sides[1].clone());
    }
}

fn is_zero(value: &ParsedValue) -> bool {
    value.as_size().is_some_and(|size| size.value == 0.0)
}

#[cfg(test)]
mod tests {
    use super::super::tests::resolve;
    use super::*;

    fn sizes(value: &ParsedValue) -> Vec<Size> {
        value
            .as_list()
            .unwrap()
            .iter()
            .map(|v| v.as_size().unwrap())
            .collect()
    }

    #[test]
    fn side_replication() {
        let one = resolve("-fx-padding", "1").unwrap();
        assert_eq!(one.converter, Some(Converter::Insets));
        assert_eq!(sizes(&one), vec![Size::px(1.0); 4]);

        let two = resolve("-fx-padding", "1 2").unwrap();
        assert_eq!(
            sizes(&two),
            vec![Size::px(1.0), Size::px(2.0), Size::px(1.0), Size::px(2.0)]
        );

        let three = resolve("-fx-padding", "1 2 3").unwrap();
        assert_eq!(
            sizes(&three),
            vec![Size::px(1.0), Size::px(2.0), Size::px(3.0), Size::px(2.0)]
        );

        let four = resolve("-fx-padding", "1 2 3 4").unwrap();
        assert_eq!(
            sizes(&four),
            vec![Size::px(1.0), Size::px(2.0), Size::px(3.0), Size::px(4.0)]
        );
    }

    #[test]
    fn padding_rejects_colors() {
        let err = resolve("-fx-padding", "#fff").unwrap_err();
        assert_eq!(err.message, "Expected '<size>'");
    }

    #[test]
    fn padding_identifier_is_lookup() {
        let value = resolve("-fx-padding", "-fx-gap").unwrap();
        let sides = value.as_list().unwrap();
        assert!(sides.iter().all(|side| side.lookup));
    }

    #[test]
    fn size_series_rejects_non_sizes() {
        let err = resolve("-fx-spacing", "1 red").unwrap_err();
        assert_eq!(err.message, "expected series of <size>");
    }

    #[test]
    fn insets_layers() {
        let value = resolve("-fx-background-insets", "0, 1 2, 3").unwrap();
        let layers = value.as_list().unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[1].converter, Some(Converter::Insets));
        assert_eq!(sizes(&layers[1])[3], Size::px(2.0));

        let single = resolve("-fx-opaque-insets", "1, 5").unwrap();
        assert_eq!(sizes(&single), vec![Size::px(5.0); 4]);
    }

    #[test]
    fn border_width_is_margins() {
        let value = resolve("-fx-border-width", "1 2").unwrap();
        assert_eq!(value.converter, Some(Converter::MarginsLayers));
        assert_eq!(value.as_list().unwrap()[0].converter, Some(Converter::Margins));
    }

    #[test]
    fn corner_radius_with_vertical_part() {
        let value = resolve("-fx-background-radius", "4 8 / 2").unwrap();
        assert_eq!(value.converter, Some(Converter::CornerRadii));
        let layer = value.as_list().unwrap()[0].as_list().unwrap();
        assert_eq!(
            sizes(&layer[0]),
            vec![Size::px(4.0), Size::px(8.0), Size::px(4.0), Size::px(8.0)]
        );
        assert_eq!(sizes(&layer[1]), vec![Size::px(2.0); 4]);
    }

    #[test]
    fn corner_radius_zero_squares_the_corner() {
        let value = resolve("-fx-border-radius", "5 / 0 3").unwrap();
        let layer = value.as_list().unwrap()[0].as_list().unwrap();
        assert_eq!(sizes(&layer[0])[0], Size::px(0.0));
        assert_eq!(sizes(&layer[0])[1], Size::px(5.0));
        assert_eq!(sizes(&layer[1])[1], Size::px(3.0));
    }

    #[test]
    fn corner_radius_errors() {
        let err = resolve("-fx-background-radius", "1 / 2 / 3").unwrap_err();
        assert_eq!(err.message, "unexpected SOLIDUS");
        assert!(resolve("-fx-background-radius", "1 2 3 4 5").is_err());
    }
}
