//! `url(...)` and `region(...)` references.

use crate::parser::ValueResult;
use crate::term::TermId;
use crate::value::{Converter, ParsedValue};

use super::Resolver;

/// Prefix marking a region reference in place of an image url.
pub const SPECIAL_REGION_URL_PREFIX: &str = "SPECIAL-REGION-URL:";

impl Resolver<'_> {
    /// `[uri, base]` tagged for url conversion. The base is null when the
    /// stylesheet has no location.
    pub(super) fn url_value(&self, uri: &str) -> ParsedValue {
        let base = match self.base_url {
            Some(base) => ParsedValue::string(base.as_str(), None),
            None => ParsedValue::null(),
        };
        ParsedValue::list(
            vec![ParsedValue::string(uri, Some(Converter::String)), base],
            Converter::Url,
        )
    }

    /// `url(<uri-string>)`
    pub(super) fn parse_uri(&self, function: TermId) -> ValueResult<ParsedValue> {
        const EXPECTED: &str = "Expected 'url(\"<uri-string>\")'";
        let arg = self.require(self.tree.first_arg(function), function, EXPECTED)?;
        let uri = self.tree.text(arg).trim();
        if uri.is_empty() {
            return Err(self.error(arg, EXPECTED));
        }
        Ok(self.url_value(uri))
    }

    /// `<url>[, <url>]*`
    pub(super) fn parse_url_layers(&self, root: TermId) -> ValueResult<ParsedValue> {
        let layers = self
            .tree
            .layers(root)
            .map(|layer| {
                if !self.tree.text(layer).eq_ignore_ascii_case("url(") {
                    return Err(self.error(layer, "Expected 'url(\"<uri-string>\")'"));
                }
                self.parse_uri(layer)
            })
            .collect::<ValueResult<Vec<_>>>()?;
        Ok(ParsedValue::list(layers, Converter::UrlLayers))
    }

    /// `region("<styleclass-or-id>")`
    pub(super) fn parse_region(&self, function: TermId) -> ValueResult<ParsedValue> {
        const EXPECTED: &str = "Expected 'region(\"<styleclass-or-id-string>\")'";
        let arg = self.require(self.tree.first_arg(function), function, EXPECTED)?;
        let name = self.tree.text(arg);
        if name.is_empty() {
            return Err(self.error(arg, EXPECTED));
        }
        Ok(ParsedValue::string(
            format!("{SPECIAL_REGION_URL_PREFIX}{name}"),
            Some(Converter::String),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use url::Url;

    use super::super::tests::resolve;
    use super::super::value_for;
    use super::*;
    use crate::lexer::TokenStream;
    use crate::term::expr;

    #[test]
    fn url_without_base() {
        let value = resolve("-fx-image", "url(images/a.png)").unwrap();
        assert_eq!(value.converter, Some(Converter::Url));
        let parts = value.as_list().unwrap();
        assert_eq!(parts[0].as_str(), Some("images/a.png"));
        assert!(parts[1].is_null());
    }

    #[test]
    fn url_records_base() {
        let base = Url::parse("file:///styles/app.css").unwrap();
        let mut stream = TokenStream::new("url(\"a.png\"), url(b.png)", 128);
        stream.advance();
        let (tree, root) = expr(&mut stream).unwrap();
        let mut properties = HashSet::new();
        let value = value_for(
            "-fx-background-image",
            &tree,
            root,
            &mut properties,
            Some(&base),
        )
        .unwrap();
        assert_eq!(value.converter, Some(Converter::UrlLayers));
        let layers = value.as_list().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(
            layers[0].as_list().unwrap()[1].as_str(),
            Some("file:///styles/app.css")
        );
    }

    #[test]
    fn url_layers_reject_other_values() {
        let err = resolve("-fx-border-image-source", "red").unwrap_err();
        assert_eq!(err.message, "Expected 'url(\"<uri-string>\")'");
    }

    #[test]
    fn region_reference() {
        let value = resolve("-fx-shape", "region(\"arrow\")").unwrap();
        assert_eq!(value.as_str(), Some("SPECIAL-REGION-URL:arrow"));
        assert!(resolve("-fx-shape", "region()").is_err());
    }
}
