//! Gradients, image patterns and paint layers.

use tracing::warn;

use crate::lexer::TokenKind;
use crate::logging::targets;
use crate::parser::ValueResult;
use crate::term::TermId;
use crate::types::{CycleMethod, Size, SizeUnits};
use crate::value::{Converter, Keyword, ParsedValue, Value};

use super::Resolver;

const LINEAR_START: &str =
    "Expected 'from <point> to <point>' or 'to <side-or-corner>' or '<cycle-method>' or '<color-stop>'";
const LEGACY_POINT: &str = "Expected '(<number>, <number>)'";

impl Resolver<'_> {
    /// `repeat`, `reflect` or `no-cycle`.
    pub(super) fn cycle_method(&self, id: Option<TermId>) -> Option<ParsedValue> {
        let keyword = self.keyword(id)?;
        CycleMethod::from_css(&keyword).map(|cycle| ParsedValue::keyword(Keyword::Cycle(cycle)))
    }

    /// `(<size>, <size>)`
    fn point(&self, id: TermId) -> ValueResult<(ParsedValue, ParsedValue)> {
        if self.kind(id) != Some(TokenKind::LParen) {
            return Err(self.error(id, LEGACY_POINT));
        }
        let x = self.require(self.tree.first_arg(id), id, LEGACY_POINT)?;
        let y = self.require(self.tree.next_arg(x), x, LEGACY_POINT)?;
        Ok((self.parse_size(x)?, self.parse_size(y)?))
    }

    /// Cycle method after the legacy stops, if present, and where the
    /// caller continues.
    fn legacy_cycle(&self, cursor: Option<TermId>) -> (ParsedValue, Option<TermId>) {
        match self.cycle_method(cursor) {
            Some(cycle) => (cycle, cursor.and_then(|id| self.tree.next_in_series(id))),
            None => (
                ParsedValue::keyword(Keyword::Cycle(CycleMethod::NoCycle)),
                cursor,
            ),
        }
    }

    /// `linear (<x>, <y>) to (<x>, <y>) stops (<number>, <color>)+ [<cycle-method>]`
    pub(super) fn legacy_linear_gradient(
        &self,
        id: TermId,
    ) -> ValueResult<(ParsedValue, Option<TermId>)> {
        warn!(
            target: targets::VALUE,
            "Using deprecated linear gradient syntax at {}",
            self.position(id)
        );

        let start_id = self.require(self.tree.next_in_series(id), id, LEGACY_POINT)?;
        let (start_x, start_y) = self.point(start_id)?;

        let to_id = self.require(self.tree.next_in_series(start_id), start_id, "Expected 'to'")?;
        if !self.tree.is_ident(to_id, "to") {
            return Err(self.error(to_id, "Expected 'to'"));
        }

        let end_id = self.require(self.tree.next_in_series(to_id), to_id, LEGACY_POINT)?;
        let (end_x, end_y) = self.point(end_id)?;

        let stops_id = self.require(self.tree.next_in_series(end_id), end_id, "Expected 'stops'")?;
        if !self.tree.is_ident(stops_id, "stops") {
            return Err(self.error(stops_id, "Expected 'stops'"));
        }
        let (stops, cursor) = self.legacy_stops(stops_id, "Expected '(<number>, <color>)'")?;
        let (cycle, cursor) = self.legacy_cycle(cursor);

        let mut values = vec![start_x, start_y, end_x, end_y, cycle];
        values.extend(stops);
        Ok((ParsedValue::list(values, Converter::LinearGradient), cursor))
    }

    /// `radial [focus-angle <size>] [focus-distance <size>] [center (<x>, <y>)]
    /// <size> stops (<number>, <color>)+ [<cycle-method>]`
    pub(super) fn legacy_radial_gradient(
        &self,
        id: TermId,
    ) -> ValueResult<(ParsedValue, Option<TermId>)> {
        const EXPECTED: &str = "Expected 'focus-angle <number>', 'focus-distance <number>', 'center (<number>,<number>)' or '<size>'";

        warn!(
            target: targets::VALUE,
            "Using deprecated radial gradient syntax at {}",
            self.position(id)
        );

        let mut focus_angle = ParsedValue::null();
        let mut focus_distance = ParsedValue::null();
        let mut center = (ParsedValue::null(), ParsedValue::null());
        let mut prev = id;

        let radius = loop {
            let term = self.require(self.tree.next_in_series(prev), prev, EXPECTED)?;
            match self.keyword(Some(term)).as_deref() {
                Some("focus-angle") => {
                    let value = self.require(self.tree.next_in_series(term), term, EXPECTED)?;
                    focus_angle = self.parse_size(value)?;
                    prev = value;
                }
                Some("focus-distance") => {
                    let value = self.require(self.tree.next_in_series(term), term, EXPECTED)?;
                    focus_distance = self.parse_size(value)?;
                    prev = value;
                }
                Some("center") => {
                    let value = self.require(self.tree.next_in_series(term), term, EXPECTED)?;
                    center = self.point(value)?;
                    prev = value;
                }
                _ if self.kind(term).is_some_and(|kind| kind.is_size()) => {
                    prev = term;
                    break self.parse_size(term)?;
                }
                _ => return Err(self.error(term, EXPECTED)),
            }
        };

        let stops_id =
            self.require(self.tree.next_in_series(prev), prev, "Expected 'stops' keyword")?;
        if !self.tree.is_ident(stops_id, "stops") {
            return Err(self.error(stops_id, "Expected 'stops' keyword"));
        }
        let (stops, cursor) = self.legacy_stops(stops_id, "Expected '(<number>, <color>)'")?;
        let (cycle, cursor) = self.legacy_cycle(cursor);

        let mut values = vec![
            focus_angle,
            focus_distance,
            center.0,
            center.1,
            radius,
            cycle,
        ];
        values.extend(stops);
        Ok((ParsedValue::list(values, Converter::RadialGradient), cursor))
    }

    /// `linear-gradient([[from <point> to <point>] | [to <side-or-corner>],]?
    /// [[repeat | reflect],]? <color-stop>[, <color-stop>]+)`
    pub(super) fn parse_linear_gradient(&self, function: TermId) -> ValueResult<ParsedValue> {
        let mut arg = self.require(self.tree.first_arg(function), function, LINEAR_START)?;
        let mut direction_given = true;

        let [start_x, start_y, end_x, end_y] = if self.tree.is_ident(arg, "from") {
            let mut sizes = Vec::with_capacity(4);
            let mut prev = arg;
            for index in 0..5 {
                let id = self.require(self.tree.next_in_series(prev), prev, LINEAR_START)?;
                if index == 2 {
                    if !self.tree.is_ident(id, "to") {
                        return Err(self.error(id, LINEAR_START));
                    }
                } else {
                    sizes.push(self.parse_size(id)?);
                }
                prev = id;
            }
            let Ok(points) = <[ParsedValue; 4]>::try_from(sizes) else {
                return Err(self.error(arg, LINEAR_START));
            };
            points
        } else if self.tree.is_ident(arg, "to") {
            self.side_or_corner(arg)?
                .map(|v| ParsedValue::size(Size::percent(v)))
        } else {
            direction_given = false;
            [0.0, 0.0, 0.0, 100.0].map(|v| ParsedValue::size(Size::percent(v)))
        };

        if direction_given {
            arg = self.require(
                self.tree.next_arg(arg),
                arg,
                "Expected '<cycle-method>' or '<color-stop>'",
            )?;
        }

        let (cycle, first_stop) = self.gradient_cycle(arg)?;
        let mut values = vec![start_x, start_y, end_x, end_y, cycle];
        values.extend(self.parse_color_stops(first_stop)?);
        Ok(ParsedValue::list(values, Converter::LinearGradient))
    }

    /// Start and end percentages for `to <side> [<side>]`.
    fn side_or_corner(&self, to: TermId) -> ValueResult<[f64; 4]> {
        // start-x, start-y, end-x, end-y
        let mut points = [0.0; 4];
        let first = self.require(self.tree.next_in_series(to), to, "Expected '<side-or-corner>'")?;

        let mut vertical_set = false;
        let mut horizontal_set = false;
        for id in self.tree.series(first).take(2) {
            let side = self.keyword(Some(id));
            match side.as_deref() {
                Some("top") if !vertical_set => {
                    points[1] = 100.0;
                    points[3] = 0.0;
                    vertical_set = true;
                }
                Some("bottom") if !vertical_set => {
                    points[1] = 0.0;
                    points[3] = 100.0;
                    vertical_set = true;
                }
                Some("right") if !horizontal_set => {
                    points[0] = 0.0;
                    points[2] = 100.0;
                    horizontal_set = true;
                }
                Some("left") if !horizontal_set => {
                    points[0] = 100.0;
                    points[2] = 0.0;
                    horizontal_set = true;
                }
                _ => return Err(self.error(id, "Invalid '<side-or-corner>'")),
            }
        }
        if let Some(extra) = self.tree.series(first).nth(2) {
            return Err(self.error(extra, "Invalid '<side-or-corner>'"));
        }
        Ok(points)
    }

    /// Optional `repeat` or `reflect` argument, and the argument holding
    /// the first color stop.
    fn gradient_cycle(&self, arg: TermId) -> ValueResult<(ParsedValue, TermId)> {
        match self.keyword(Some(arg)).as_deref() {
            Some("repeat" | "reflect") => {
                let cycle = self
                    .cycle_method(Some(arg))
                    .unwrap_or_else(|| ParsedValue::keyword(Keyword::Cycle(CycleMethod::NoCycle)));
                let next = self.require(self.tree.next_arg(arg), arg, "Expected '<color-stop>'")?;
                Ok((cycle, next))
            }
            _ => Ok((
                ParsedValue::keyword(Keyword::Cycle(CycleMethod::NoCycle)),
                arg,
            )),
        }
    }

    /// `radial-gradient([focus-angle <angle>,]? [focus-distance <percentage>,]?
    /// [center <point>,]? [radius <size>,]? [[repeat | reflect],]?
    /// <color-stop>[, <color-stop>]+)`
    pub(super) fn parse_radial_gradient(&self, function: TermId) -> ValueResult<ParsedValue> {
        let mut arg = self.require(self.tree.first_arg(function), function, "Expected '<color-stop>'")?;

        let mut focus_angle = ParsedValue::null();
        if self.tree.is_ident(arg, "focus-angle") {
            let id = self.require(
                self.tree.next_in_series(arg),
                arg,
                "Expected [deg | rad | grad | turn ]",
            )?;
            let angle = self.size(id)?;
            if !(angle.units.is_angle() || angle.units == SizeUnits::Px) {
                return Err(self.error(id, "Expected [deg | rad | grad | turn ]"));
            }
            focus_angle = ParsedValue::size(angle);
            arg = self.require(self.tree.next_arg(arg), arg, "Expected '<color-stop>'")?;
        }

        let mut focus_distance = ParsedValue::null();
        if self.tree.is_ident(arg, "focus-distance") {
            let id = self.require(self.tree.next_in_series(arg), arg, "Expected '%'")?;
            let distance = self.size(id)?;
            if distance.units != SizeUnits::Percent {
                return Err(self.error(id, "Expected '%'"));
            }
            focus_distance = ParsedValue::size(distance);
            arg = self.require(self.tree.next_arg(arg), arg, "Expected '<color-stop>'")?;
        }

        let mut center = (ParsedValue::null(), ParsedValue::null());
        if self.tree.is_ident(arg, "center") {
            let x = self.require(self.tree.next_in_series(arg), arg, "Expected '<point>'")?;
            let y = self.require(self.tree.next_in_series(x), x, "Expected '<point>'")?;
            center = (self.parse_size(x)?, self.parse_size(y)?);
            arg = self.require(self.tree.next_arg(arg), arg, "Expected '<color-stop>'")?;
        }

        let mut radius = ParsedValue::null();
        if self.tree.is_ident(arg, "radius") {
            const RADIUS: &str = "Expected 'radius [<length> | <percentage>]'";
            let id = self.require(self.tree.next_in_series(arg), arg, RADIUS)?;
            if !self.is_size(id) {
                return Err(self.error(id, RADIUS));
            }
            radius = self.parse_size(id)?;
            arg = self.require(self.tree.next_arg(arg), arg, RADIUS)?;
        }

        let (cycle, first_stop) = self.gradient_cycle(arg)?;
        let mut values = vec![
            focus_angle,
            focus_distance,
            center.0,
            center.1,
            radius,
            cycle,
        ];
        values.extend(self.parse_color_stops(first_stop)?);
        Ok(ParsedValue::list(values, Converter::RadialGradient))
    }

    /// `image-pattern(<uri>[, <x>, <y>, <width>, <height>[, <boolean>]?]?)`
    pub(super) fn parse_image_pattern(&self, function: TermId) -> ValueResult<ParsedValue> {
        let (url, uri_id) = self.pattern_url(function)?;
        let mut values = vec![url];

        if self.tree.next_arg(uri_id).is_some() {
            let mut prev = uri_id;
            let mut next = self.tree.next_arg(uri_id);
            for _ in 0..4 {
                let id = self.require(next, prev, "Expected '<size>'")?;
                if !self.is_size(id) {
                    return Err(self.error(id, "Expected '<size>'"));
                }
                values.push(self.parse_size(id)?);
                prev = id;
                next = self.tree.next_arg(id);
            }

            if let Some(flag) = next {
                let proportional = match self.keyword(Some(flag)).as_deref() {
                    Some("true") => true,
                    Some("false") => false,
                    _ => return Err(self.error(flag, "Expected '<boolean>'")),
                };
                values.push(ParsedValue::new(Value::Bool(proportional), None));
            }
        }

        Ok(ParsedValue::list(values, Converter::ImagePattern))
    }

    /// `repeating-image-pattern(<uri>)`
    pub(super) fn parse_repeating_image_pattern(
        &self,
        function: TermId,
    ) -> ValueResult<ParsedValue> {
        let (url, _) = self.pattern_url(function)?;
        Ok(ParsedValue::list(
            vec![url],
            Converter::RepeatingImagePattern,
        ))
    }

    fn pattern_url(&self, function: TermId) -> ValueResult<(ParsedValue, TermId)> {
        let id = self.require(self.tree.first_arg(function), function, "Expected '<uri-string>'")?;
        let uri = self.tree.text(id);
        if uri.is_empty() || !matches!(self.kind(id), Some(TokenKind::String | TokenKind::Ident)) {
            return Err(self.error(id, "Expected '<uri-string>'"));
        }
        Ok((self.url_value(uri), id))
    }

    /// `<paint>[, <paint>]*`
    pub(super) fn parse_paint_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| {
                if self.tree.text(layer).is_empty() {
                    return Err(self.error(layer, "Expected '<paint>'"));
                }
                self.parse(layer)
            })
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::PaintLayers))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::resolve;
    use super::*;

    fn percents(values: &[ParsedValue]) -> Vec<f64> {
        values
            .iter()
            .map(|v| v.as_size().map(|s| s.value).unwrap_or(f64::NAN))
            .collect()
    }

    #[test]
    fn linear_gradient_default_direction() {
        let value = resolve("-fx-background-color", "linear-gradient(red, blue)").unwrap();
        let layer = &value.as_list().unwrap()[0];
        assert_eq!(layer.converter, Some(Converter::LinearGradient));
        let values = layer.as_list().unwrap();
        assert_eq!(percents(&values[..4]), vec![0.0, 0.0, 0.0, 100.0]);
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn linear_gradient_to_corner() {
        let value = resolve("-fx-fill", "linear-gradient(to bottom right, red, blue)").unwrap();
        let values = value.as_list().unwrap();
        assert_eq!(percents(&values[..4]), vec![0.0, 0.0, 100.0, 100.0]);

        let err = resolve("-fx-fill", "linear-gradient(to top bottom, red, blue)").unwrap_err();
        assert_eq!(err.message, "Invalid '<side-or-corner>'");
        let err = resolve("-fx-fill", "linear-gradient(to, red, blue)").unwrap_err();
        assert_eq!(err.message, "Expected '<side-or-corner>'");
    }

    #[test]
    fn linear_gradient_from_points() {
        let value = resolve(
            "-fx-fill",
            "linear-gradient(from 0px 0px to 0px 50px, reflect, red, blue)",
        )
        .unwrap();
        let values = value.as_list().unwrap();
        assert_eq!(values[3].as_size(), Some(Size::px(50.0)));
        assert_eq!(
            values[4].as_keyword(),
            Some(Keyword::Cycle(CycleMethod::Reflect))
        );
    }

    #[test]
    fn legacy_linear_gradient() {
        let value = resolve(
            "-fx-fill",
            "linear (0%, 0%) to (0%, 100%) stops (0%, red) (100%, blue) repeat",
        )
        .unwrap();
        assert_eq!(value.converter, Some(Converter::LinearGradient));
        let values = value.as_list().unwrap();
        assert_eq!(
            values[4].as_keyword(),
            Some(Keyword::Cycle(CycleMethod::Repeat))
        );
        assert_eq!(values.len(), 7);

        let err = resolve("-fx-fill", "linear (0%, 0%) (0%, 100%) stops (0%, red)").unwrap_err();
        assert_eq!(err.message, "Expected 'to'");
    }

    #[test]
    fn legacy_gradients_share_a_layer_list() {
        let value = resolve(
            "-fx-background-color",
            "linear (0,0) to (0,1) stops (0, red) (1, blue), white",
        )
        .unwrap();
        let layers = value.as_list().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1].as_color(), Some(crate::types::Color::WHITE));
    }

    #[test]
    fn legacy_radial_gradient() {
        let value = resolve(
            "-fx-fill",
            "radial center (50%, 50%) 20px stops (0, red) (1, blue)",
        )
        .unwrap();
        let values = value.as_list().unwrap();
        assert!(values[0].is_null());
        assert_eq!(values[2].as_size(), Some(Size::percent(50.0)));
        assert_eq!(values[4].as_size(), Some(Size::px(20.0)));

        let err = resolve("-fx-fill", "radial 20px (0, red)").unwrap_err();
        assert_eq!(err.message, "Expected 'stops' keyword");
    }

    #[test]
    fn radial_gradient() {
        let value = resolve(
            "-fx-fill",
            "radial-gradient(focus-angle 45deg, focus-distance 20%, center 25% 25%, radius 50%, repeat, red, blue)",
        )
        .unwrap();
        assert_eq!(value.converter, Some(Converter::RadialGradient));
        let values = value.as_list().unwrap();
        assert_eq!(values[0].as_size(), Some(Size::new(45.0, SizeUnits::Deg)));
        assert_eq!(values[1].as_size(), Some(Size::percent(20.0)));
        assert_eq!(values[4].as_size(), Some(Size::percent(50.0)));
        assert_eq!(values.len(), 8);

        let err = resolve("-fx-fill", "radial-gradient(focus-distance 20px, red, blue)").unwrap_err();
        assert_eq!(err.message, "Expected '%'");
        let err = resolve("-fx-fill", "radial-gradient(focus-angle 1em, red, blue)").unwrap_err();
        assert_eq!(err.message, "Expected [deg | rad | grad | turn ]");
    }

    #[test]
    fn image_patterns() {
        let value = resolve("-fx-fill", "image-pattern(\"tile.png\")").unwrap();
        assert_eq!(value.converter, Some(Converter::ImagePattern));
        assert_eq!(value.as_list().unwrap().len(), 1);

        let value = resolve("-fx-fill", "image-pattern(\"tile.png\", 0, 0, 1, 1, false)").unwrap();
        let values = value.as_list().unwrap();
        assert_eq!(values.len(), 6);
        assert_eq!(values[5].as_bool(), Some(false));

        let err = resolve("-fx-fill", "image-pattern(\"tile.png\", 0, 0)").unwrap_err();
        assert_eq!(err.message, "Expected '<size>'");
        let err = resolve("-fx-fill", "image-pattern(\"tile.png\", 0, 0, 1, 1, maybe)").unwrap_err();
        assert_eq!(err.message, "Expected '<boolean>'");

        let value = resolve("-fx-fill", "repeating-image-pattern(\"tile.png\")").unwrap();
        assert_eq!(value.converter, Some(Converter::RepeatingImagePattern));
    }

    #[test]
    fn paint_layers() {
        let value = resolve("-fx-background-color", "red, #00f").unwrap();
        assert_eq!(value.converter, Some(Converter::PaintLayers));
        assert_eq!(value.as_list().unwrap().len(), 2);
    }
}
