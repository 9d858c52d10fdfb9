//! Tokenizer.
//!
//! The `cssparser` tokenizer does the character-level work; this module
//! flattens its block-structured output into the linear [`Token`] stream the
//! recursive-descent parser consumes. Function, parenthesis and curly blocks
//! are entered and their close token is emitted explicitly, so the value
//! parser sees `rgb(` ... `)` the same way it sees any other token run.

mod token;

pub use token::{Token, TokenKind};

use crate::logging::targets;
use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token as CssToken};

/// Tokenize `css`, entering at most `max_depth` nested blocks.
///
/// Blocks nested deeper than `max_depth` are replaced by a single
/// [`TokenKind::Invalid`] token; their content is skipped. The returned
/// vector always ends with an [`TokenKind::Eof`] token.
pub fn tokenize(css: &str, max_depth: usize) -> Vec<Token> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut lexer = Lexer {
        tokens: Vec::new(),
        max_depth,
    };
    lexer.run(&mut parser, 0);
    let end = parser.current_source_location();
    lexer.tokens.push(Token::eof(end.line + 1, end.column));
    lexer.tokens
}

struct Lexer {
    tokens: Vec<Token>,
    max_depth: usize,
}

impl Lexer {
    fn push(&mut self, kind: TokenKind, text: impl Into<String>, line: u32, offset: u32) {
        self.tokens.push(Token::new(kind, text, line, offset));
    }

    fn run<'i, 't>(&mut self, parser: &mut Parser<'i, 't>, depth: usize) {
        loop {
            let start = parser.position();
            let location = parser.current_source_location();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return,
            };
            let line = location.line + 1;
            let offset = location.column;
            let raw = parser.slice_from(start);

            match token {
                CssToken::Comment(_) | CssToken::CDO | CssToken::CDC => {}
                CssToken::WhiteSpace(_) => self.push(TokenKind::Ws, " ", line, offset),
                CssToken::Ident(name) => self.push(TokenKind::Ident, name.as_ref(), line, offset),
                CssToken::AtKeyword(name) => {
                    if name.eq_ignore_ascii_case("font-face") {
                        self.push(TokenKind::FontFace, "@font-face", line, offset);
                    } else {
                        self.push(TokenKind::AtKeyword, name.as_ref(), line, offset);
                    }
                }
                CssToken::Hash(value) | CssToken::IDHash(value) => {
                    self.push(TokenKind::Hash, format!("#{}", value.as_ref()), line, offset);
                }
                CssToken::QuotedString(value) => {
                    self.push(TokenKind::String, value.as_ref(), line, offset);
                }
                CssToken::UnquotedUrl(value) => {
                    self.push(TokenKind::Function, "url(", line, offset);
                    self.push(TokenKind::String, value.as_ref(), line, offset + 4);
                    let end = parser.current_source_location();
                    self.push(TokenKind::RParen, ")", end.line + 1, end.column.saturating_sub(1));
                }
                CssToken::Number { .. } => self.push(TokenKind::Number, raw, line, offset),
                CssToken::Percentage { .. } => self.push(TokenKind::Percentage, raw, line, offset),
                CssToken::Dimension { unit, .. } => {
                    // `0xff00ff` tokenizes as the number 0 with unit `xff00ff`.
                    if raw.len() > 2 && raw.as_bytes()[..2].eq_ignore_ascii_case(b"0x") {
                        self.push(TokenKind::Hash, raw, line, offset);
                    } else if let Some(kind) = TokenKind::from_unit(unit.as_ref()) {
                        self.push(kind, raw, line, offset);
                    } else {
                        self.push(TokenKind::Invalid, raw, line, offset);
                    }
                }
                CssToken::Delim('!') => {
                    if parser
                        .try_parse(|p| p.expect_ident_matching("important"))
                        .is_ok()
                    {
                        self.push(TokenKind::ImportantSym, "!important", line, offset);
                    } else {
                        self.push(TokenKind::Invalid, "!", line, offset);
                    }
                }
                CssToken::Delim(c) => {
                    let kind = match c {
                        '*' => TokenKind::Star,
                        '.' => TokenKind::Dot,
                        '>' => TokenKind::Greater,
                        '/' => TokenKind::Solidus,
                        _ => TokenKind::Invalid,
                    };
                    self.push(kind, c.to_string(), line, offset);
                }
                CssToken::Colon => self.push(TokenKind::Colon, ":", line, offset),
                CssToken::Semicolon => self.push(TokenKind::Semi, ";", line, offset),
                CssToken::Comma => self.push(TokenKind::Comma, ",", line, offset),
                CssToken::Function(name) => {
                    let open = format!("{}(", name.as_ref());
                    self.block(parser, depth, TokenKind::Function, open, ')', line, offset);
                }
                CssToken::ParenthesisBlock => {
                    self.block(parser, depth, TokenKind::LParen, "(".to_string(), ')', line, offset);
                }
                CssToken::CurlyBracketBlock => {
                    self.block(parser, depth, TokenKind::LBrace, "{".to_string(), '}', line, offset);
                }
                CssToken::SquareBracketBlock => self.push(TokenKind::Invalid, "[", line, offset),
                CssToken::CloseParenthesis => self.push(TokenKind::RParen, ")", line, offset),
                CssToken::CloseCurlyBracket => self.push(TokenKind::RBrace, "}", line, offset),
                _ => self.push(TokenKind::Invalid, raw, line, offset),
            }
        }
    }

    /// Emit `open`, the block content, and the close token if the source
    /// actually closes the block.
    #[allow(clippy::too_many_arguments)]
    fn block<'i, 't>(
        &mut self,
        parser: &mut Parser<'i, 't>,
        depth: usize,
        kind: TokenKind,
        open: String,
        close: char,
        line: u32,
        offset: u32,
    ) {
        if depth >= self.max_depth {
            tracing::debug!(
                target: targets::LEXER,
                line,
                offset,
                "block nested deeper than {} levels skipped",
                self.max_depth
            );
            self.push(TokenKind::Invalid, open, line, offset);
            return;
        }

        let start = parser.position();
        self.push(kind, open, line, offset);
        let _ = parser.parse_nested_block(|nested| {
            self.run(nested, depth + 1);
            Ok::<(), CssParseError<'i, ()>>(())
        });

        if parser.slice_from(start).ends_with(close) {
            let end = parser.current_source_location();
            let close_kind = if close == '}' {
                TokenKind::RBrace
            } else {
                TokenKind::RParen
            };
            self.push(
                close_kind,
                close.to_string(),
                end.line + 1,
                end.column.saturating_sub(1),
            );
        }
    }
}

/// A cursor over a tokenized stylesheet or value.
///
/// Holds exactly one buffered token, [`current`](Self::current); the
/// parsers inspect it and call [`advance`](Self::advance) once consumed.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    current: Token,
}

impl TokenStream {
    /// Tokenize `css` with the given nesting bound. Nothing is buffered
    /// until the first call to [`advance`](Self::advance).
    pub fn new(css: &str, max_depth: usize) -> Self {
        Self {
            tokens: tokenize(css, max_depth),
            pos: 0,
            current: Token::new(TokenKind::Invalid, "", 0, 0),
        }
    }

    /// The buffered token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Kind of the buffered token.
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Buffer the next token, whitespace included. Sticks at EOF.
    pub fn advance_raw(&mut self) -> &Token {
        if let Some(token) = self.tokens.get(self.pos) {
            self.pos += 1;
            self.current = token.clone();
        } else if let Some(last) = self.tokens.last() {
            self.current = last.clone();
        } else {
            self.current = Token::eof(1, 1);
        }
        &self.current
    }

    /// Buffer the next token that is not whitespace.
    pub fn advance(&mut self) -> &Token {
        while self.advance_raw().kind == TokenKind::Ws {}
        &self.current
    }

    /// Advance past whitespace if the buffered token is whitespace.
    pub fn skip_ws(&mut self) -> &Token {
        if self.current.kind == TokenKind::Ws {
            self.advance();
        }
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(css: &str) -> Vec<TokenKind> {
        tokenize(css, 128)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Ws)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn units_map_to_size_kinds() {
        assert_eq!(
            kinds("1 2% 3em 4ex 5px 6cm 7mm 8in 9pt 10pc 11deg 12grad 13rad 14turn"),
            vec![
                TokenKind::Number,
                TokenKind::Percentage,
                TokenKind::Ems,
                TokenKind::Exs,
                TokenKind::Px,
                TokenKind::Cm,
                TokenKind::Mm,
                TokenKind::In,
                TokenKind::Pt,
                TokenKind::Pc,
                TokenKind::Deg,
                TokenKind::Grad,
                TokenKind::Rad,
                TokenKind::Turn,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numeric_text_keeps_suffix() {
        let tokens = tokenize("12.5PX", 128);
        assert_eq!(tokens[0].kind, TokenKind::Px);
        assert_eq!(tokens[0].text, "12.5PX");
    }

    #[test]
    fn hex_prefixes() {
        let tokens = tokenize("#fff 0x80ff00", 128);
        assert_eq!(tokens[0].kind, TokenKind::Hash);
        assert_eq!(tokens[0].text, "#fff");
        assert_eq!(tokens[2].kind, TokenKind::Hash);
        assert_eq!(tokens[2].text, "0x80ff00");
    }

    #[test]
    fn non_ascii_units_are_invalid() {
        assert_eq!(
            kinds("1é 2日 0x1F"),
            vec![
                TokenKind::Invalid,
                TokenKind::Invalid,
                TokenKind::Hash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn function_block_is_flattened() {
        assert_eq!(
            kinds("rgb(1, 2, 3)"),
            vec![
                TokenKind::Function,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn important_and_at_rules() {
        assert_eq!(
            kinds("a ! important; @font-face @import"),
            vec![
                TokenKind::Ident,
                TokenKind::ImportantSym,
                TokenKind::Semi,
                TokenKind::FontFace,
                TokenKind::AtKeyword,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unquoted_url_becomes_function() {
        let tokens: Vec<Token> = tokenize("url(a/b.png)", 128);
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_eq!(tokens[0].text, "url(");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, "a/b.png");
        assert_eq!(tokens[2].kind, TokenKind::RParen);
    }

    #[test]
    fn comments_are_dropped() {
        let tokens = tokenize("/* note */10px", 128);
        assert_eq!(tokens[0].kind, TokenKind::Px);
        assert_eq!(tokens[0].text, "10px");
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("a\n  b", 128);
        assert_eq!((tokens[0].line, tokens[0].offset), (1, 1));
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!((b.line, b.offset), (2, 3));
    }

    #[test]
    fn nesting_limit_replaces_block() {
        let tokens = tokenize("f(g(h(1)))", 2);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Function,
                TokenKind::Function,
                TokenKind::Invalid,
                TokenKind::RParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn stream_skips_whitespace() {
        let mut stream = TokenStream::new("a   b", 128);
        assert_eq!(stream.advance().text, "a");
        assert_eq!(stream.advance().text, "b");
        assert!(stream.advance().is(TokenKind::Eof));
        assert!(stream.advance().is(TokenKind::Eof));
    }

    #[test]
    fn raw_stream_keeps_whitespace() {
        let mut stream = TokenStream::new("a b", 128);
        stream.advance_raw();
        assert_eq!(stream.advance_raw().kind, TokenKind::Ws);
        assert_eq!(stream.advance_raw().text, "b");
    }
}
