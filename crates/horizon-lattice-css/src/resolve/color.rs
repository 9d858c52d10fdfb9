//! Color functions, ladders, color stops and shadows.

use tracing::warn;

use crate::lexer::TokenKind;
use crate::logging::targets;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{BlurType, Color, Size, SizeUnits};
use crate::value::{Converter, Keyword, ParsedValue};

use super::Resolver;

impl Resolver<'_> {
    /// A term that can produce a color: a name, a lookup, a hex literal or
    /// a color function.
    pub(super) fn parse_color(&self, id: TermId) -> ValueResult<ParsedValue> {
        match self.kind(id) {
            Some(TokenKind::Ident | TokenKind::Hash | TokenKind::Function) => self.parse(id),
            _ => Err(self.error(id, "Expected '<color>'")),
        }
    }

    /// `rgb(r, g, b)` and `rgba(r, g, b, a)`. Channels are all numbers
    /// (0-255) or all percentages.
    pub(super) fn rgb(&self, function: TermId) -> ValueResult<ParsedValue> {
        let mut channels = [0.0f64; 3];
        let mut channel_kind = None;
        let mut prev = function;
        let mut arg = self.tree.first_arg(function);

        for channel in channels.iter_mut() {
            let id = self.require(arg, prev, "Expected '<number>' or '<percentage>'")?;
            let kind = self.kind(id);
            if !matches!(kind, Some(TokenKind::Number | TokenKind::Percentage)) {
                return Err(self.error(id, "Expected '<number>' or '<percentage>'"));
            }
            match channel_kind {
                None => channel_kind = kind,
                Some(expected) if Some(expected) != kind => {
                    return Err(self.error(id, "Argument type mistmatch"));
                }
                _ => {}
            }
            let size = self.size(id)?;
            let scale = if kind == Some(TokenKind::Percentage) {
                100.0
            } else {
                255.0
            };
            *channel = (size.value / scale).clamp(0.0, 1.0);
            prev = id;
            arg = self.tree.next_arg(id);
        }

        let alpha = self.alpha(arg)?;
        let [r, g, b] = channels;
        Ok(ParsedValue::color(Color::new(r, g, b, alpha)))
    }

    /// `hsb(h, s%, b%)` and `hsba(h, s%, b%, a)`.
    pub(super) fn hsb(&self, function: TermId) -> ValueResult<ParsedValue> {
        let hue_id = self.require(self.tree.first_arg(function), function, "Expected '<number>'")?;
        if self.kind(hue_id) != Some(TokenKind::Number) {
            return Err(self.error(hue_id, "Expected '<number>'"));
        }
        let hue = self.size(hue_id)?.value;

        let mut percents = [0.0f64; 2];
        let mut prev = hue_id;
        for percent in percents.iter_mut() {
            let id = self.require(self.tree.next_arg(prev), prev, "Expected '<percent>'")?;
            if self.kind(id) != Some(TokenKind::Percentage) {
                return Err(self.error(id, "Expected '<percent>'"));
            }
            *percent = (self.size(id)?.value / 100.0).clamp(0.0, 1.0);
            prev = id;
        }

        let alpha = self.alpha(self.tree.next_arg(prev))?;
        let [saturation, brightness] = percents;
        Ok(ParsedValue::color(Color::hsb(
            hue, saturation, brightness, alpha,
        )))
    }

    fn alpha(&self, arg: Option<TermId>) -> ValueResult<f64> {
        let Some(id) = arg else {
            return Ok(1.0);
        };
        if self.kind(id) != Some(TokenKind::Number) {
            return Err(self.error(id, "Expected '<number>'"));
        }
        Ok(self.size(id)?.value.clamp(0.0, 1.0))
    }

    /// `derive(<color>, <percent>)`
    pub(super) fn derive(&self, function: TermId) -> ValueResult<ParsedValue> {
        let color_id = self.require(self.tree.first_arg(function), function, "Expected '<color>'")?;
        let color = self.parse_color(color_id)?;
        let brightness_id = self.require(
            self.tree.next_arg(color_id),
            color_id,
            "Expected '<percent'",
        )?;
        let brightness = self.parse_size(brightness_id)?;
        Ok(ParsedValue::list(
            vec![color, brightness],
            Converter::DeriveColor,
        ))
    }

    /// `ladder <color> stops (<number>, <color>)+`
    pub(super) fn legacy_ladder(&self, id: TermId) -> ValueResult<(ParsedValue, Option<TermId>)> {
        warn!(
            target: targets::VALUE,
            "Using deprecated ladder syntax at {}",
            self.position(id)
        );

        let color_id = self.require(self.tree.next_in_series(id), id, "Expected '<color>'")?;
        let color = self.parse_color(color_id)?;

        let stops_id = self.require(self.tree.next_in_series(color_id), color_id, "Expected 'stops'")?;
        if !self.tree.is_ident(stops_id, "stops") {
            return Err(self.error(stops_id, "Expected 'stops'"));
        }

        let (stops, cursor) = self.legacy_stops(stops_id, "Expected '(<number>, <color>)'")?;
        let mut values = vec![color];
        values.extend(stops);
        Ok((ParsedValue::list(values, Converter::Ladder), cursor))
    }

    /// `ladder(<color>, <color-stop>[, <color-stop>]+)`
    pub(super) fn parse_ladder(&self, function: TermId) -> ValueResult<ParsedValue> {
        let color_id = self.require(self.tree.first_arg(function), function, "Expected '<color>'")?;
        let color = self.parse_color(color_id)?;
        let first_stop = self.require(
            self.tree.next_arg(color_id),
            color_id,
            "Expected '<color-stop>[, <color-stop>]+'",
        )?;
        let mut values = vec![color];
        values.extend(self.parse_color_stops(first_stop)?);
        Ok(ParsedValue::list(values, Converter::Ladder))
    }

    /// The `(<number>, <color>)` terms following the legacy `stops`
    /// keyword. Returns the stops and the term after the last of them.
    pub(super) fn legacy_stops(
        &self,
        keyword: TermId,
        message: &str,
    ) -> ValueResult<(Vec<ParsedValue>, Option<TermId>)> {
        let mut stops = Vec::new();
        let mut cursor = self.tree.next_in_series(keyword);
        while let Some(id) = cursor {
            if self.kind(id) != Some(TokenKind::LParen) {
                break;
            }
            stops.push(self.stop(id)?);
            cursor = self.tree.next_in_series(id);
        }
        if stops.is_empty() {
            return Err(self.error(keyword, message));
        }
        Ok((stops, cursor))
    }

    /// `(<size>, <color>)`
    pub(super) fn stop(&self, id: TermId) -> ValueResult<ParsedValue> {
        if self.kind(id) != Some(TokenKind::LParen) {
            return Err(self.error(id, "Expected '('"));
        }
        let offset_id = self.require(self.tree.first_arg(id), id, "Expected '<number>'")?;
        let offset = self.parse_size(offset_id)?;
        let color_id = self.require(self.tree.next_arg(offset_id), offset_id, "Expected '<color>'")?;
        let color = self.parse_color(color_id)?;
        Ok(ParsedValue::list(vec![offset, color], Converter::Stop))
    }

    /// Color stops from the argument `first` to the last argument.
    ///
    /// An unpositioned first stop defaults to zero in the stops' unit and an
    /// unpositioned last stop to 100%. Each position is
    /// raised to the largest position before it, and runs of unpositioned
    /// stops are spaced evenly between their neighbors.
    pub(super) fn parse_color_stops(&self, first: TermId) -> ValueResult<Vec<ParsedValue>> {
        let heads: Vec<TermId> =
            std::iter::successors(Some(first), |&head| self.tree.next_arg(head)).collect();
        if heads.len() < 2 {
            return Err(self.error(first, "Expected '<color-stop>'"));
        }

        let mut colors = Vec::with_capacity(heads.len());
        let mut offsets: Vec<Option<Size>> = Vec::with_capacity(heads.len());
        let mut units: Option<SizeUnits> = None;

        for &head in &heads {
            colors.push(self.parse_color(head)?);
            let Some(offset_id) = self.tree.next_in_series(head) else {
                offsets.push(None);
                continue;
            };
            if !self.is_size(offset_id) {
                return Err(self.error(offset_id, "Expected '<percent>' or '<length>'"));
            }
            let offset = self.size(offset_id)?;
            match units {
                None => units = Some(offset.units),
                Some(u) if (u == SizeUnits::Percent) != (offset.units == SizeUnits::Percent) => {
                    return Err(self.error(
                        offset_id,
                        "Parser unable to handle mixed '<percent>' and '<length>'",
                    ));
                }
                _ => {}
            }
            offsets.push(Some(offset));
        }

        normalize_offsets(&mut offsets, units.unwrap_or(SizeUnits::Percent));

        Ok(offsets
            .into_iter()
            .zip(colors)
            .map(|(offset, color)| {
                let offset = offset.unwrap_or(Size::percent(0.0));
                ParsedValue::list(vec![ParsedValue::size(offset), color], Converter::Stop)
            })
            .collect())
    }

    /// `innershadow(...)` and `dropshadow(...)`:
    /// `(<blur-type>, <color>, <number>, <number>, <number>, <number>)`.
    pub(super) fn shadow(&self, function: TermId, converter: Converter) -> ValueResult<ParsedValue> {
        let blur_id = self.require(self.tree.first_arg(function), function, "Expected '<blur-type>'")?;
        let blur = self
            .keyword(Some(blur_id))
            .and_then(|kw| BlurType::from_css(&kw))
            .ok_or_else(|| {
                self.error(
                    blur_id,
                    "Expected 'gaussian', 'one-pass-box', 'two-pass-box', or 'three-pass-box'",
                )
            })?;

        let color_id = self.require(self.tree.next_arg(blur_id), blur_id, "Expected '<color>'")?;
        let color = self.parse_color(color_id)?;

        let mut values = vec![ParsedValue::keyword(Keyword::Blur(blur)), color];
        let mut prev = color_id;
        for _ in 0..4 {
            let id = self.require(self.tree.next_arg(prev), prev, "Expected '<number>'")?;
            if !self.is_size(id) {
                return Err(self.error(id, "Expected '<number>'"));
            }
            values.push(self.parse_size(id)?);
            prev = id;
        }
        Ok(ParsedValue::list(values, converter))
    }

    /// `[line,offset]` of a term, for log messages.
    pub(super) fn position(&self, id: TermId) -> String {
        self.tree
            .token(id)
            .map(|t| format!("[{},{}]", t.line, t.offset))
            .unwrap_or_else(|| "[?,?]".to_string())
    }
}

fn normalize_offsets(offsets: &mut [Option<Size>], units: SizeUnits) {
    let last = offsets.len() - 1;
    if offsets[0].is_none() {
        offsets[0] = Some(Size::new(0.0, units));
    }
    if offsets[last].is_none() {
        offsets[last] = Some(Size::percent(100.0));
    }

    let mut max = f64::MIN;
    for offset in offsets.iter_mut().flatten() {
        if offset.value < max {
            offset.value = max;
        }
        max = offset.value;
    }

    let mut i = 0;
    while i < last {
        let Some(start) = offsets[i] else {
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while offsets[j].is_none() {
            j += 1;
        }
        if let Some(end) = offsets[j] {
            let step = (end.value - start.value) / (j - i) as f64;
            for (k, offset) in offsets[i + 1..j].iter_mut().enumerate() {
                *offset = Some(Size::new(start.value + step * (k + 1) as f64, end.units));
            }
        }
        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::resolve;
    use super::*;

    fn stop_offsets(values: &[ParsedValue]) -> Vec<f64> {
        values
            .iter()
            .filter(|v| v.converter == Some(Converter::Stop))
            .map(|v| v.as_list().unwrap()[0].as_size().unwrap().value)
            .collect()
    }

    #[test]
    fn hex_and_rgb_agree() {
        let hex = resolve("-fx-text-fill", "#ff0000").unwrap();
        let rgb = resolve("-fx-text-fill", "rgb(255, 0, 0)").unwrap();
        assert_eq!(hex, rgb);
        let pct = resolve("-fx-text-fill", "rgb(100%, 0%, 0%)").unwrap();
        assert_eq!(pct.as_color(), Some(Color::RED));
    }

    #[test]
    fn rgba_alpha_and_clamping() {
        let value = resolve("-fx-text-fill", "rgba(300, 0, -5, 0.5)").unwrap();
        let color = value.as_color().unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn rgb_mixed_channels() {
        let err = resolve("-fx-text-fill", "rgb(255, 0%, 0)").unwrap_err();
        assert_eq!(err.message, "Argument type mistmatch");
        let err = resolve("-fx-text-fill", "rgb(255, 0)").unwrap_err();
        assert_eq!(err.message, "Expected '<number>' or '<percentage>'");
    }

    #[test]
    fn hsb_function() {
        let value = resolve("-fx-text-fill", "hsb(0, 100%, 100%)").unwrap();
        assert!(value.as_color().unwrap().approx_eq(&Color::RED, 1e-9));
        let err = resolve("-fx-text-fill", "hsb(0, 1, 100%)").unwrap_err();
        assert_eq!(err.message, "Expected '<percent>'");
    }

    #[test]
    fn derive_keeps_arguments() {
        let value = resolve("-fx-text-fill", "derive(-fx-base, -20%)").unwrap();
        assert_eq!(value.converter, Some(Converter::DeriveColor));
        let args = value.as_list().unwrap();
        assert!(args[0].lookup);
        assert_eq!(args[1].as_size(), Some(Size::percent(-20.0)));
    }

    #[test]
    fn ladder_function() {
        let value = resolve(
            "-fx-text-fill",
            "ladder(-fx-base, white 49%, black 50%)",
        )
        .unwrap();
        assert_eq!(value.converter, Some(Converter::Ladder));
        assert_eq!(stop_offsets(value.as_list().unwrap()), vec![49.0, 50.0]);
    }

    #[test]
    fn legacy_ladder() {
        let value = resolve("-fx-text-fill", "ladder red stops (0.2, white) (0.8, black)").unwrap();
        assert_eq!(value.converter, Some(Converter::Ladder));
        assert_eq!(stop_offsets(value.as_list().unwrap()), vec![0.2, 0.8]);

        let err = resolve("-fx-text-fill", "ladder red (0.2, white)").unwrap_err();
        assert_eq!(err.message, "Expected 'stops'");
    }

    #[test]
    fn stops_are_distributed() {
        let value = resolve("-fx-text-fill", "linear-gradient(red, green, blue)").unwrap();
        assert_eq!(stop_offsets(value.as_list().unwrap()), vec![0.0, 50.0, 100.0]);

        let value = resolve("-fx-text-fill", "linear-gradient(red, green, blue 40%, white)").unwrap();
        assert_eq!(
            stop_offsets(value.as_list().unwrap()),
            vec![0.0, 20.0, 40.0, 100.0]
        );

        let mut again: Vec<Option<Size>> = [0.0, 20.0, 40.0, 100.0]
            .into_iter()
            .map(|v| Some(Size::percent(v)))
            .collect();
        let resolved = again.clone();
        normalize_offsets(&mut again, SizeUnits::Percent);
        assert_eq!(again, resolved);
    }

    #[test]
    fn unpositioned_last_stop_is_full_extent() {
        let value =
            resolve("-fx-text-fill", "linear-gradient(red 0px, blue 10px, green)").unwrap();
        let sizes: Vec<Size> = value
            .as_list()
            .unwrap()
            .iter()
            .filter(|v| v.converter == Some(Converter::Stop))
            .map(|v| v.as_list().unwrap()[0].as_size().unwrap())
            .collect();
        assert_eq!(sizes, vec![Size::px(0.0), Size::px(10.0), Size::percent(100.0)]);
    }

    #[test]
    fn stops_never_go_backwards() {
        let value = resolve("-fx-text-fill", "linear-gradient(red 60%, green 20%, blue)").unwrap();
        assert_eq!(stop_offsets(value.as_list().unwrap()), vec![60.0, 60.0, 100.0]);
    }

    #[test]
    fn mixed_stop_units() {
        let err = resolve("-fx-text-fill", "linear-gradient(red 10px, blue 50%)").unwrap_err();
        assert_eq!(
            err.message,
            "Parser unable to handle mixed '<percent>' and '<length>'"
        );
    }

    #[test]
    fn single_stop_is_an_error() {
        let err = resolve("-fx-text-fill", "linear-gradient(to top, red)").unwrap_err();
        assert_eq!(err.message, "Expected '<color-stop>'");
    }

    #[test]
    fn dropshadow() {
        let value = resolve(
            "-fx-effect",
            "dropshadow(gaussian, rgba(0,0,0,0.5), 10, 0, 2, 2)",
        )
        .unwrap();
        assert_eq!(value.converter, Some(Converter::DropShadow));
        let args = value.as_list().unwrap();
        assert_eq!(args.len(), 6);
        assert_eq!(args[0].as_keyword(), Some(Keyword::Blur(BlurType::Gaussian)));
        assert_eq!(args[2].as_size(), Some(Size::px(10.0)));

        let err = resolve("-fx-effect", "innershadow(blurry, red, 1, 0, 0, 0)").unwrap_err();
        assert_eq!(
            err.message,
            "Expected 'gaussian', 'one-pass-box', 'two-pass-box', or 'three-pass-box'"
        );
    }
}
