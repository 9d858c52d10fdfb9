//! Stylesheet assembler and parser entry points.
//!
//! A [`CssParser`] holds only its [`ParserOptions`]. Each call builds a
//! fresh `ParseContext` owning the token stream, the set of properties
//! seen so far and the `@import` chain, so one parser can be shared between
//! threads.
//!
//! # Error Recovery
//!
//! Nothing a stylesheet contains makes a parse call fail:
//! - A bad declaration is reported and skipped up to the next `;` or `}`
//! - A bad selector is reported and its whole rule skipped
//! - A missing `{` or `}` is reported and the rest of the stylesheet dropped
//!
//! Rules assembled before the error are kept.

use std::collections::HashSet;
use std::path::Path;

use url::Url;

use crate::collector::{CssError, ErrorSource};
use crate::config::ParserOptions;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::logging::targets;
use crate::parser::ParseError;
use crate::resolve;
use crate::rules::{
    Declaration, FontFace, FontFaceSrc, FontFaceSrcKind, Rule, StyleOrigin, Stylesheet,
};
use crate::selector;
use crate::term;
use crate::value::ParsedValue;
use crate::{Error, Result};

/// Parse a stylesheet with default options.
///
/// Errors go to the global [`ErrorCollector`](crate::collector::ErrorCollector).
///
/// # Example
///
/// ```
/// let sheet = horizon_lattice_css::parse_css(".button { -fx-padding: 2px 4px; }");
/// assert_eq!(sheet.len(), 1);
/// ```
pub fn parse_css(css: &str) -> Stylesheet {
    CssParser::default().parse(css)
}

/// Stylesheet parser.
#[derive(Debug, Clone, Default)]
pub struct CssParser {
    options: ParserOptions,
}

impl CssParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse stylesheet text. Relative URLs resolve against the configured
    /// base URL, if any.
    pub fn parse(&self, css: &str) -> Stylesheet {
        let sheet = Stylesheet::new(self.options.origin);
        self.run(css, ErrorSource::Text(css.to_string()), sheet, Vec::new())
    }

    /// Parse stylesheet text located at `base`.
    pub fn parse_with_base(&self, base: &Url, css: &str) -> Stylesheet {
        let mut sheet = Stylesheet::with_url(base.clone());
        sheet.origin = self.options.origin;
        let source = ErrorSource::Stylesheet(Some(base.clone()));
        self.run(css, source, sheet, vec![base.clone()])
    }

    /// Load and parse the stylesheet at `url`.
    ///
    /// Only `file:` URLs are supported. Fails only if the stylesheet
    /// cannot be read.
    pub fn parse_url(&self, url: &Url) -> Result<Stylesheet> {
        let css = read_url(url)?;
        Ok(self.parse_with_base(url, &css))
    }

    /// Load and parse a stylesheet file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Stylesheet> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
        let url = Url::from_file_path(&absolute)
            .map_err(|()| Error::invalid_url(absolute.display().to_string(), "not a file path"))?;
        self.parse_url(&url)
    }

    /// Parse the in-line `style` of the element described by `owner`.
    ///
    /// The result holds at most one rule, with the universal selector, and
    /// has origin [`StyleOrigin::Inline`].
    pub fn parse_inline_style(&self, owner: &str, style: &str) -> Stylesheet {
        let mut sheet = Stylesheet::new(StyleOrigin::Inline);
        if style.trim().is_empty() {
            return sheet;
        }

        let source = ErrorSource::InlineStyle {
            owner: owner.to_string(),
            style: style.to_string(),
        };
        let base = self.options.base_url.clone();
        let mut context = ParseContext::new(&self.options, style, source, base, Vec::new());
        context.stream.advance();
        let declarations = context.declarations();
        if !declarations.is_empty() {
            sheet.add_rule(Rule::universal(declarations));
        }
        sheet
    }

    /// Resolve a single property value, e.g. `("-fx-padding", "1 2")`.
    ///
    /// Returns `None` if the value does not parse; the error is reported.
    pub fn parse_expr(&self, property: &str, value: &str) -> Option<ParsedValue> {
        self.try_parse_expr(property, value).ok()
    }

    /// Like [`parse_expr`](Self::parse_expr), but also returns the error.
    pub fn try_parse_expr(&self, property: &str, value: &str) -> Result<ParsedValue> {
        let source = ErrorSource::Text(format!("{}: {}", property, value));
        let base = self.options.base_url.clone();
        let mut context = ParseContext::new(&self.options, value, source, base, Vec::new());
        context.stream.advance();
        let (tree, root) = term::expr(&mut context.stream).inspect_err(|err| {
            context.report(err.message.clone());
        })?;
        resolve::value_for(
            property,
            &tree,
            root,
            &mut context.properties,
            context.base.as_ref(),
        )
        .map_err(|err| {
            context.report(value_error(&err, property));
            Error::from(err)
        })
    }

    fn run(
        &self,
        css: &str,
        source: ErrorSource,
        mut sheet: Stylesheet,
        imports: Vec<Url>,
    ) -> Stylesheet {
        if css.trim().is_empty() {
            return sheet;
        }
        let base = sheet.url.clone().or_else(|| self.options.base_url.clone());
        let mut context = ParseContext::new(&self.options, css, source, base, imports);
        context.stylesheet(&mut sheet);
        tracing::debug!(
            target: targets::PARSER,
            url = sheet.url.as_ref().map_or("?", Url::as_str),
            rules = sheet.len(),
            font_faces = sheet.font_faces.len(),
            "parsed stylesheet"
        );
        sheet
    }
}

/// State of one parse call.
struct ParseContext<'p> {
    options: &'p ParserOptions,
    stream: TokenStream,
    source: ErrorSource,
    base: Option<Url>,
    /// Properties declared so far; identifiers naming one are lookups.
    properties: HashSet<String>,
    /// Stylesheets being imported, outermost first.
    imports: Vec<Url>,
}

impl<'p> ParseContext<'p> {
    fn new(
        options: &'p ParserOptions,
        css: &str,
        source: ErrorSource,
        base: Option<Url>,
        imports: Vec<Url>,
    ) -> Self {
        Self {
            options,
            stream: TokenStream::new(css, options.max_nesting_depth),
            source,
            base,
            properties: HashSet::new(),
            imports,
        }
    }

    fn report(&self, message: impl Into<String>) {
        let error = CssError::new(self.source.clone(), message);
        tracing::warn!(target: targets::PARSER, source = %error.source, "{}", error);
        self.options.error_collector().push(error);
    }

    fn report_at(&self, message: &str, token: &Token) {
        self.report(format!("{} at [{},{}]", message, token.line, token.offset));
    }

    fn report_current(&self, message: &str) {
        self.report_at(message, self.stream.current());
    }

    fn kind(&self) -> TokenKind {
        self.stream.kind()
    }

    fn stylesheet(&mut self, sheet: &mut Stylesheet) {
        self.stream.advance();
        loop {
            match self.kind() {
                TokenKind::Eof => return,
                TokenKind::FontFace => {
                    if let Some(font_face) = self.font_face() {
                        sheet.add_font_face(font_face);
                    }
                    self.stream.advance();
                }
                TokenKind::AtKeyword => self.at_rule(sheet),
                _ => {
                    if !self.rule(sheet) {
                        return;
                    }
                }
            }
        }
    }

    /// `selectors { declarations }`. Returns `false` if the rest of the
    /// stylesheet has to be dropped.
    fn rule(&mut self, sheet: &mut Stylesheet) -> bool {
        let selectors = match selector::selectors(&mut self.stream) {
            Ok(selectors) => selectors,
            Err(err) => {
                let (line, offset) = err.position();
                self.report(format!("{} at [{},{}]", err.message, line, offset));
                self.skip_rule();
                return true;
            }
        };

        if self.kind() != TokenKind::LBrace {
            self.report_current("Expected LBRACE");
            return false;
        }
        self.stream.advance();

        let declarations = self.declarations();
        if self.kind() != TokenKind::RBrace {
            self.report_current("Expected RBRACE");
            return false;
        }
        sheet.add_rule(Rule::new(selectors, declarations));
        self.stream.advance();
        true
    }

    /// Skip past the next `}`.
    fn skip_rule(&mut self) {
        while !matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) {
            self.stream.advance();
        }
        self.stream.advance();
    }

    fn declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            match self.declaration() {
                Some(declaration) => declarations.push(declaration),
                None => {
                    term::skip_expr(&mut self.stream);
                    if self.kind() != TokenKind::Semi {
                        return declarations;
                    }
                }
            }
            while self.kind() == TokenKind::Semi {
                self.stream.advance();
            }
            if self.kind() != TokenKind::Ident {
                return declarations;
            }
        }
    }

    /// `IDENT : expr [!important]`. `None` on any error; only a missing
    /// property name (an empty block) goes unreported.
    fn declaration(&mut self) -> Option<Declaration> {
        if self.kind() != TokenKind::Ident {
            return None;
        }
        let property = self.stream.current().text.clone();
        self.stream.advance();
        if self.kind() != TokenKind::Colon {
            self.report_current("Expected COLON");
            return None;
        }
        self.stream.advance();

        let (tree, root) = match term::expr(&mut self.stream) {
            Ok(expr) => expr,
            Err(err) => {
                self.report(err.message);
                return None;
            }
        };
        let value = match resolve::value_for(
            &property,
            &tree,
            root,
            &mut self.properties,
            self.base.as_ref(),
        ) {
            Ok(value) => value,
            Err(err) => {
                self.report(value_error(&err, &property));
                return None;
            }
        };

        let important = self.kind() == TokenKind::ImportantSym;
        if important {
            self.stream.advance();
        }
        Some(Declaration::new(property, value, important))
    }

    fn font_face(&mut self) -> Option<FontFace> {
        let mut font_face = FontFace::default();
        loop {
            self.stream.advance();
            if self.kind() == TokenKind::Ident {
                let name = self.stream.current().text.to_lowercase();
                self.stream.advance();
                if self.kind() == TokenKind::Colon {
                    self.stream.advance();
                } else {
                    self.report_current("Expected COLON");
                }
                if name == "src" {
                    if !self.font_face_sources(&mut font_face) {
                        self.skip_block();
                        return None;
                    }
                } else {
                    let value = self.descriptor_value();
                    font_face.descriptors.insert(name, value);
                }
            }
            if matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) {
                return Some(font_face);
            }
        }
    }

    fn descriptor_value(&mut self) -> String {
        let mut parts = Vec::new();
        while !matches!(
            self.kind(),
            TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        ) {
            parts.push(self.stream.current().text.clone());
            self.stream.advance();
        }
        parts.join(" ")
    }

    /// `[url(...) [format(...)]? | local(...) | IDENT]#`. Returns `false`
    /// if a URL cannot be resolved, which drops the whole font face.
    fn font_face_sources(&mut self, font_face: &mut FontFace) -> bool {
        loop {
            let token = self.stream.current().clone();
            match token.kind {
                TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof => return true,
                TokenKind::Comma => {
                    self.stream.advance();
                }
                TokenKind::Ident => {
                    font_face
                        .sources
                        .push(FontFaceSrc::new(FontFaceSrcKind::Reference, token.text));
                    self.stream.advance();
                }
                TokenKind::Function if token.text.eq_ignore_ascii_case("url(") => {
                    let text = self.function_text();
                    let Some(url) = self.resolve_font_url(&text) else {
                        self.report_at(
                            &format!("Could not resolve @font-face url [{}]", text),
                            &token,
                        );
                        return false;
                    };
                    let mut src = FontFaceSrc::new(FontFaceSrcKind::Url, url);
                    if self.kind() == TokenKind::Function
                        && self.stream.current().text.eq_ignore_ascii_case("format(")
                    {
                        src = src.with_format(self.function_text());
                    }
                    font_face.sources.push(src);
                }
                TokenKind::Function if token.text.eq_ignore_ascii_case("local(") => {
                    let text = self.function_text();
                    font_face
                        .sources
                        .push(FontFaceSrc::new(FontFaceSrcKind::Local, text));
                }
                TokenKind::Function => {
                    self.report_at(
                        &format!("Unknown @font-face src type [{})]", token.text),
                        &token,
                    );
                    self.function_text();
                }
                _ => {
                    self.report_at(&format!("Unexpected TOKEN [{}]", token.text), &token);
                    self.stream.advance();
                }
            }
        }
    }

    /// Concatenated text of the arguments of the function on the current
    /// token. Leaves the stream after its `)`.
    fn function_text(&mut self) -> String {
        let mut text = String::new();
        self.stream.advance();
        while !matches!(self.kind(), TokenKind::RParen | TokenKind::Eof) {
            text.push_str(&self.stream.current().text);
            self.stream.advance();
        }
        if self.kind() == TokenKind::RParen {
            self.stream.advance();
        }
        text
    }

    fn resolve_font_url(&self, src: &str) -> Option<String> {
        let src = src
            .strip_prefix(['/', '\\'])
            .unwrap_or(src);
        self.resolve_url(src).map(String::from)
    }

    fn resolve_url(&self, src: &str) -> Option<Url> {
        match &self.base {
            Some(base) => base.join(src).ok(),
            None => Url::parse(src).ok(),
        }
    }

    /// Skip to the `}` closing the current block.
    fn skip_block(&mut self) {
        while !matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) {
            self.stream.advance();
        }
    }

    fn at_rule(&mut self, sheet: &mut Stylesheet) {
        let token = self.stream.current().clone();
        if token.text.eq_ignore_ascii_case("import") {
            self.import(sheet, &token);
        } else {
            self.report_at(&format!("Unsupported at-rule '@{}'", token.text), &token);
            self.skip_at_rule();
        }
    }

    /// Skip past the `;` or the block ending the current at-rule.
    fn skip_at_rule(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.stream.advance().kind {
                TokenKind::Eof => return,
                TokenKind::Semi if depth == 0 => break,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth <= 1 => break,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
        }
        self.stream.advance();
    }

    /// `@import [STRING | url(...)] ;`
    fn import(&mut self, sheet: &mut Stylesheet, at: &Token) {
        self.stream.advance();
        let name = match self.kind() {
            TokenKind::String => {
                let name = self.stream.current().text.clone();
                self.stream.advance();
                name
            }
            TokenKind::Function if self.stream.current().text.eq_ignore_ascii_case("url(") => {
                self.function_text()
            }
            _ => {
                self.report_current("Expected '<uri>' in @import");
                self.skip_at_rule();
                return;
            }
        };
        match self.kind() {
            TokenKind::Semi => {
                self.stream.advance();
            }
            TokenKind::Eof => {}
            _ => {
                self.report_current("Expected SEMI");
                self.skip_at_rule();
                return;
            }
        }

        if !self.options.allow_imports {
            tracing::debug!(target: targets::PARSER, import = %name, "@import ignored");
            return;
        }
        let Some(url) = self.resolve_url(&name) else {
            self.report_at(&format!("Could not import {}", name), at);
            return;
        };
        if self.imports.contains(&url) {
            let current = self.imports.last().map_or("?", Url::as_str);
            self.report(format!("Recursive @import at {} imports {}", current, url));
            return;
        }

        let css = match read_url(&url) {
            Ok(css) => css,
            Err(err) => {
                tracing::debug!(target: targets::PARSER, error = %err, "@import failed");
                self.report_at(&format!("Could not import {}", name), at);
                return;
            }
        };

        let mut imports = self.imports.clone();
        imports.push(url.clone());
        let source = ErrorSource::Stylesheet(Some(url.clone()));
        let mut imported = Stylesheet::with_url(url.clone());
        let mut context = ParseContext::new(self.options, &css, source, Some(url), imports);
        context.properties = std::mem::take(&mut self.properties);
        context.stylesheet(&mut imported);
        self.properties = context.properties;
        sheet.append(imported);
    }
}

/// Report text for a grammar error in the value of `property`.
fn value_error(err: &ParseError, property: &str) -> String {
    let (line, offset) = err.position();
    format!(
        "{} while parsing '{}' at [{},{}]",
        err.message, property, line, offset
    )
}

fn read_url(url: &Url) -> Result<String> {
    if url.scheme() != "file" {
        return Err(Error::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }
    let path = url
        .to_file_path()
        .map_err(|()| Error::invalid_url(url.as_str(), "not a local file"))?;
    std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
}
