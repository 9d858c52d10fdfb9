//! Selector parser.
//!
//! Works on the raw token stream: whitespace between two simple selectors
//! is the descendant combinator, so only the group separator `,` skips it.

use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::{ParseError, ValueResult};

use super::{Combinator, Selector, SelectorPart, TypeSelector};

/// Parse a comma-separated selector group.
///
/// The stream must be on the first token of the group. On success it is
/// left on the token that ended the group, normally `{`.
pub(crate) fn selectors(stream: &mut TokenStream) -> ValueResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    loop {
        selectors.push(selector(stream)?);
        if stream.kind() != TokenKind::Comma {
            return Ok(selectors);
        }
        stream.advance();
    }
}

fn selector(stream: &mut TokenStream) -> ValueResult<Selector> {
    let mut selector = Selector::simple(simple_selector(stream)?);
    while let Some(combinator) = combinator(stream) {
        selector = selector.join(combinator, simple_selector(stream)?);
    }
    Ok(selector)
}

fn simple_selector(stream: &mut TokenStream) -> ValueResult<SelectorPart> {
    let mut part = SelectorPart::new();
    loop {
        let token = stream.current().clone();
        match token.kind {
            TokenKind::Star => part.type_selector = Some(TypeSelector::Universal),
            TokenKind::Ident => part.type_selector = Some(TypeSelector::Type(token.text)),
            TokenKind::Dot => {
                let class = stream.advance_raw();
                if class.kind != TokenKind::Ident {
                    return Err(unexpected(class));
                }
                part.classes.push(class.text.clone());
            }
            TokenKind::Hash => match token.text.strip_prefix('#') {
                Some(id) if !id.is_empty() => part.id = Some(id.to_string()),
                _ => return Err(unexpected(&token)),
            },
            TokenKind::Colon => {
                let pseudo = stream.advance_raw().clone();
                match pseudo.kind {
                    TokenKind::Ident => part.pseudo_classes.push(pseudo.text),
                    TokenKind::Function => {
                        let pseudo = functional_pseudo(stream)?;
                        part.pseudo_classes.push(pseudo);
                    }
                    _ => return Err(unexpected(&pseudo)),
                }
            }
            TokenKind::Ws
            | TokenKind::Comma
            | TokenKind::Greater
            | TokenKind::LBrace
            | TokenKind::Eof => {
                if part.is_empty() {
                    part.type_selector = Some(TypeSelector::Universal);
                }
                return Ok(part);
            }
            _ => return Err(unexpected(&token)),
        }
        stream.advance_raw();
    }
}

/// `FUNCTION [IDENT | STRING]* ')'`, kept as text.
fn functional_pseudo(stream: &mut TokenStream) -> ValueResult<String> {
    let mut pseudo = stream.current().text.clone();
    loop {
        let token = stream.advance();
        match token.kind {
            TokenKind::Ident | TokenKind::String => pseudo.push_str(&token.text),
            TokenKind::RParen => {
                pseudo.push(')');
                return Ok(pseudo);
            }
            _ => return Err(unexpected(token)),
        }
    }
}

/// The combinator before the next simple selector, or `None` when the
/// selector ends here.
fn combinator(stream: &mut TokenStream) -> Option<Combinator> {
    let mut combinator = None;
    loop {
        match stream.kind() {
            TokenKind::Ws => {
                combinator.get_or_insert(Combinator::Descendant);
            }
            TokenKind::Greater => combinator = Some(Combinator::Child),
            TokenKind::Star
            | TokenKind::Ident
            | TokenKind::Dot
            | TokenKind::Hash
            | TokenKind::Colon => return combinator,
            _ => return None,
        }
        stream.advance_raw();
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::at(
        format!("Unexpected token '{}' in selector", token.text),
        Some(token),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> ValueResult<Vec<Selector>> {
        let mut stream = TokenStream::new(css, 128);
        stream.advance();
        selectors(&mut stream)
    }

    #[test]
    fn simple_parts() {
        let group = parse("Button#ok.default.big:focused {").unwrap();
        assert_eq!(group.len(), 1);
        let part = &group[0].parts[0];
        assert_eq!(part.element(), "Button");
        assert_eq!(part.id.as_deref(), Some("ok"));
        assert_eq!(part.classes, vec!["default", "big"]);
        assert_eq!(part.pseudo_classes, vec!["focused"]);
    }

    #[test]
    fn combinators() {
        let group = parse(".root VBox > .label{").unwrap();
        let selector = &group[0];
        assert_eq!(
            selector.combinators,
            vec![Combinator::Descendant, Combinator::Child]
        );
        assert_eq!(selector.to_string(), ".root VBox > .label");
    }

    #[test]
    fn group_and_stream_position() {
        let mut stream = TokenStream::new("a , .b,#c { x: 1 }", 128);
        stream.advance();
        let group = selectors(&mut stream).unwrap();
        assert_eq!(group.len(), 3);
        assert_eq!(group[2].parts[0].id.as_deref(), Some("c"));
        assert_eq!(stream.kind(), TokenKind::LBrace);
    }

    #[test]
    fn functional_pseudo_class() {
        let group = parse("Cell:nth-child( odd ) {").unwrap();
        assert_eq!(group[0].parts[0].pseudo_classes, vec!["nth-child(odd)"]);
    }

    #[test]
    fn empty_selector_is_universal() {
        let group = parse("{").unwrap();
        assert!(group[0].parts[0].is_universal_only());
    }

    #[test]
    fn bad_class_name() {
        let err = parse(".12 {").unwrap_err();
        assert!(err.message.starts_with("Unexpected token"));
        assert!(err.token.is_some());
    }
}
