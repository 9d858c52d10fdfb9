//! Border paints, styles and border images, plus the stroke keywords they
//! share with shapes.

use crate::lexer::TokenKind;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{StrokeLineCap, StrokeLineJoin, StrokeType};
use crate::value::{Converter, Keyword, ParsedValue, Value};

use super::Resolver;
use super::size::replicate_sides;

impl Resolver<'_> {
    pub(super) fn parse_stroke_type(&self, id: Option<TermId>) -> Option<ParsedValue> {
        let keyword = self.keyword(id)?;
        StrokeType::from_css(&keyword).map(|t| ParsedValue::keyword(Keyword::StrokeType(t)))
    }

    /// `miter [<size>]? | bevel | round`. Returns the join, the miter limit
    /// (null when absent) and the term after the last one consumed.
    pub(super) fn parse_stroke_line_join(
        &self,
        id: Option<TermId>,
    ) -> ValueResult<Option<(ParsedValue, ParsedValue, Option<TermId>)>> {
        let Some(join) = self.keyword(id).and_then(|kw| StrokeLineJoin::from_css(&kw)) else {
            return Ok(None);
        };
        let Some(id) = id else {
            return Ok(None);
        };

        let mut cursor = self.tree.next_in_series(id);
        let mut miter_limit = ParsedValue::null();
        if join == StrokeLineJoin::Miter
            && let Some(limit) = cursor
            && self.kind(limit).is_some_and(|kind| kind.is_size())
        {
            miter_limit = ParsedValue::size(self.size(limit)?);
            cursor = self.tree.next_in_series(limit);
        }
        Ok(Some((
            ParsedValue::keyword(Keyword::LineJoin(join)),
            miter_limit,
            cursor,
        )))
    }

    pub(super) fn parse_stroke_line_cap(&self, id: Option<TermId>) -> Option<ParsedValue> {
        let keyword = self.keyword(id)?;
        StrokeLineCap::from_css(&keyword).map(|cap| ParsedValue::keyword(Keyword::LineCap(cap)))
    }

    pub(super) fn parse_border_paint_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_border_paint(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::BorderPaintLayers))
    }

    /// One to four paints, top, right, bottom, left.
    fn parse_border_paint(&self, layer: TermId) -> ValueResult<ParsedValue> {
        let mut paints = Vec::with_capacity(4);
        let mut cursor = Some(layer);
        while let Some(id) = cursor {
            if paints.len() == 4 {
                return Err(self.error(id, "Expected '<paint>'"));
            }
            let (paint, next) = self.parse_term(id)?;
            paints.push(paint);
            cursor = next;
        }
        replicate_sides(&mut paints);
        Ok(ParsedValue::list(paints, Converter::BorderPaint))
    }

    pub(super) fn parse_border_style_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_border_style_series(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::BorderStyleLayers))
    }

    fn parse_border_style_series(&self, layer: TermId) -> ValueResult<ParsedValue> {
        let mut styles = Vec::with_capacity(4);
        let mut cursor = Some(layer);
        while let Some(id) = cursor {
            if styles.len() == 4 {
                return Err(self.error(id, "Expected '<border-style>'"));
            }
            let (style, next) = self.parse_border_style(id)?;
            styles.push(style);
            cursor = next;
        }
        replicate_sides(&mut styles);
        Ok(ParsedValue::list(styles, Converter::BorderStyleSeries))
    }

    /// `<dash-style> [phase <size>]? [centered | inside | outside]?
    /// [line-join [miter <size>? | bevel | round]]? [line-cap [square | butt | round]]?`
    fn parse_border_style(&self, id: TermId) -> ValueResult<(ParsedValue, Option<TermId>)> {
        let dash = self.dash_style(id)?;
        let mut cursor = self.tree.next_in_series(id);

        let mut phase = ParsedValue::null();
        if let Some(keyword) = cursor
            && self.tree.is_ident(keyword, "phase")
        {
            let value = self.require(self.tree.next_in_series(keyword), keyword, "Expected '<size>'")?;
            if !self.is_size(value) {
                return Err(self.error(value, "Expected '<size>'"));
            }
            phase = ParsedValue::wrap(self.parse_size(value)?, Converter::Size);
            cursor = self.tree.next_in_series(value);
        }

        let mut stroke_type = ParsedValue::null();
        if let Some(value) = self.parse_stroke_type(cursor) {
            stroke_type = value;
            cursor = cursor.and_then(|id| self.tree.next_in_series(id));
        }

        let mut line_join = ParsedValue::null();
        let mut miter_limit = ParsedValue::null();
        if let Some(keyword) = cursor
            && self.tree.is_ident(keyword, "line-join")
        {
            let value = self.tree.next_in_series(keyword);
            match self.parse_stroke_line_join(value)? {
                Some((join, limit, next)) => {
                    line_join = join;
                    miter_limit = limit;
                    cursor = next;
                }
                None => {
                    return Err(self.error(
                        value.unwrap_or(keyword),
                        "Expected 'miter <size>?', 'bevel' or 'round'",
                    ));
                }
            }
        }

        let mut line_cap = ParsedValue::null();
        if let Some(keyword) = cursor
            && self.tree.is_ident(keyword, "line-cap")
        {
            let value = self.tree.next_in_series(keyword);
            match self.parse_stroke_line_cap(value) {
                Some(cap) => {
                    line_cap = cap;
                    cursor = value.and_then(|id| self.tree.next_in_series(id));
                }
                None => {
                    return Err(self.error(
                        value.unwrap_or(keyword),
                        "Expected 'square', 'butt' or 'round'",
                    ));
                }
            }
        }

        let style = ParsedValue::list(
            vec![dash, phase, stroke_type, line_join, miter_limit, line_cap],
            Converter::BorderStyle,
        );
        Ok((style, cursor))
    }

    /// `none | hidden | dotted | dashed | solid | segments(<size>[, <size>]+)`
    fn dash_style(&self, id: TermId) -> ValueResult<ParsedValue> {
        match self.kind(id) {
            Some(TokenKind::Ident) => {
                let text = self.tree.text(id).to_lowercase();
                match text.as_str() {
                    "none" | "hidden" => Ok(ParsedValue::string("none", None)),
                    "dotted" | "dashed" | "solid" => Ok(ParsedValue::string(text, None)),
                    _ => Err(self.error(
                        id,
                        format!("Unsupported <border-style> '{}'", self.tree.text(id)),
                    )),
                }
            }
            Some(TokenKind::Function) if self.tree.text(id).eq_ignore_ascii_case("segments(") => {
                let segments = self
                    .tree
                    .args(id)
                    .map(|arg| self.parse_size(arg))
                    .collect::<ValueResult<Vec<_>>>()?;
                if segments.is_empty() {
                    return Err(self.error(id, "Expected '<size>'"));
                }
                Ok(ParsedValue::list(segments, Converter::SizeSequence))
            }
            _ => Err(self.error(id, "Expected '<dash-style>'")),
        }
    }

    pub(super) fn parse_border_image_slice_layers(
        &self,
        root: TermId,
    ) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| self.parse_border_image_slice(layer))
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(
            layers,
            Converter::BorderImageSliceLayers,
        ))
    }

    /// `<size>{1,4} fill?`
    fn parse_border_image_slice(&self, layer: TermId) -> ValueResult<ParsedValue> {
        if !self.is_size(layer) {
            return Err(self.error(layer, "Expected '<size>'"));
        }
        let mut sides = Vec::with_capacity(4);
        let mut fill = false;
        for id in self.tree.series(layer) {
            if self.tree.is_ident(id, "fill") {
                fill = true;
                break;
            }
            if sides.len() == 4 {
                break;
            }
            sides.push(self.parse_size(id)?);
        }
        if sides.is_empty() {
            return Err(self.error(layer, "Expected '<size>'"));
        }
        replicate_sides(&mut sides);
        Ok(ParsedValue::list(
            vec![
                ParsedValue::list(sides, Converter::Insets),
                ParsedValue::new(Value::Bool(fill), None),
            ],
            Converter::BorderImageSlice,
        ))
    }

    pub(super) fn parse_border_image_width_layers(
        &self,
        root: TermId,
    ) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| {
                Ok(ParsedValue::list(
                    self.parse_size1to4(layer)?,
                    Converter::BorderImageWidth,
                ))
            })
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(
            layers,
            Converter::BorderImageWidthLayers,
        ))
    }
}
