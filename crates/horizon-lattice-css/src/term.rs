//! Term trees for declaration values.
//!
//! A declaration value such as
//!
//! ```text
//! linear-gradient(to right, red 0%, blue), #fff
//! ```
//!
//! is held as a flat arena of [`Term`]s linked four ways:
//!
//! - `next_in_series`: the next whitespace-separated term (`red` → `0%`)
//! - `next_layer`: from the last term of a top-level series to the first
//!   term of the next comma-separated layer (`linear-gradient(...)` → `#fff`)
//! - `first_arg`: from a function or parenthesis term to its first argument
//! - `next_arg`: from the last term of an argument's series to the first
//!   term of the following argument
//!
//! Links are only written while the tree is being built. Resolvers never
//! rewrite them; a composite grammar that consumes a variable number of terms
//! hands back the [`TermId`] where its caller should continue.

use crate::lexer::{Token, TokenKind, TokenStream};
use crate::parser::{ParseError, ValueResult};

/// Index of a term in its [`TermTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermId(usize);

/// One syntactic unit of a value expression.
#[derive(Debug, Clone, Default)]
pub struct Term {
    pub token: Option<Token>,
    pub next_in_series: Option<TermId>,
    pub next_layer: Option<TermId>,
    pub first_arg: Option<TermId>,
    pub next_arg: Option<TermId>,
}

/// Arena holding the terms of one declaration value.
#[derive(Debug, Clone, Default)]
pub struct TermTree {
    terms: Vec<Term>,
}

impl TermTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, token: Option<Token>) -> TermId {
        self.terms.push(Term {
            token,
            ..Default::default()
        });
        TermId(self.terms.len() - 1)
    }

    fn term_mut(&mut self, id: TermId) -> &mut Term {
        &mut self.terms[id.0]
    }

    pub fn get(&self, id: TermId) -> &Term {
        &self.terms[id.0]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn token(&self, id: TermId) -> Option<&Token> {
        self.get(id).token.as_ref()
    }

    pub fn kind(&self, id: TermId) -> Option<TokenKind> {
        self.token(id).map(|t| t.kind)
    }

    /// Token text, or `""` for a synthetic term.
    pub fn text(&self, id: TermId) -> &str {
        self.token(id).map(|t| t.text.as_str()).unwrap_or("")
    }

    /// Whether the term is an identifier equal to `name` (ASCII case-insensitive).
    pub fn is_ident(&self, id: TermId, name: &str) -> bool {
        self.token(id).is_some_and(|t| t.is_ident(name))
    }

    pub fn next_in_series(&self, id: TermId) -> Option<TermId> {
        self.get(id).next_in_series
    }

    pub fn first_arg(&self, id: TermId) -> Option<TermId> {
        self.get(id).first_arg
    }

    /// Last term of the series starting at `id`.
    pub fn series_tail(&self, id: TermId) -> TermId {
        let mut tail = id;
        while let Some(next) = self.get(tail).next_in_series {
            tail = next;
        }
        tail
    }

    /// Head of the layer after the one `head` starts.
    pub fn next_layer(&self, head: TermId) -> Option<TermId> {
        self.get(self.series_tail(head)).next_layer
    }

    /// Head of the function argument after the one `head` starts.
    pub fn next_arg(&self, head: TermId) -> Option<TermId> {
        self.get(self.series_tail(head)).next_arg
    }

    /// Terms of the series starting at `id`, in source order.
    pub fn series(&self, id: TermId) -> impl Iterator<Item = TermId> + '_ {
        std::iter::successors(Some(id), move |&t| self.next_in_series(t))
    }

    /// Heads of every layer starting at `root`.
    pub fn layers(&self, root: TermId) -> impl Iterator<Item = TermId> + '_ {
        std::iter::successors(Some(root), move |&t| self.next_layer(t))
    }

    /// Heads of each argument of the function term `function`.
    pub fn args(&self, function: TermId) -> impl Iterator<Item = TermId> + '_ {
        std::iter::successors(self.first_arg(function), move |&t| self.next_arg(t))
    }

    pub fn number_of_terms(&self, id: TermId) -> usize {
        self.series(id).count()
    }

    pub fn number_of_layers(&self, root: TermId) -> usize {
        self.layers(root).count()
    }

    pub fn number_of_args(&self, function: TermId) -> usize {
        self.args(function).count()
    }
}

/// Build the term tree of one declaration value.
///
/// Consumes tokens up to (not including) the value terminator: `;`,
/// `!important`, `}` or end of input. On a token that cannot start a term,
/// skips to the next `;`, `}` or end of input and returns the error; only
/// this declaration is lost.
pub fn expr(stream: &mut TokenStream) -> ValueResult<(TermTree, TermId)> {
    let mut tree = TermTree::new();
    match build_expr(&mut tree, stream) {
        Ok(root) => Ok((tree, root)),
        Err(err) => {
            skip_expr(stream);
            Err(err)
        }
    }
}

fn build_expr(tree: &mut TermTree, stream: &mut TokenStream) -> ValueResult<TermId> {
    let root = term(tree, stream)?;
    let mut current = root;
    loop {
        match stream.kind() {
            kind if kind.is_terminator() => return Ok(root),
            TokenKind::Comma => {
                stream.advance();
                let next = term(tree, stream)?;
                tree.term_mut(current).next_layer = Some(next);
                current = next;
            }
            _ => {
                let next = term(tree, stream)?;
                tree.term_mut(current).next_in_series = Some(next);
                current = next;
            }
        }
    }
}

fn term(tree: &mut TermTree, stream: &mut TokenStream) -> ValueResult<TermId> {
    let token = stream.current().clone();
    match token.kind {
        kind if kind.is_size() => {}
        TokenKind::String | TokenKind::Ident | TokenKind::Hash | TokenKind::Solidus => {}
        TokenKind::Function | TokenKind::LParen => return function(tree, stream, token),
        _ => {
            return Err(ParseError::new(format!(
                "Unexpected token '{}' at [{},{}]",
                token.text, token.line, token.offset
            )));
        }
    }
    let id = tree.push(Some(token));
    stream.advance();
    Ok(id)
}

fn function(tree: &mut TermTree, stream: &mut TokenStream, token: Token) -> ValueResult<TermId> {
    let function = tree.push(Some(token));
    stream.advance();
    if stream.kind() == TokenKind::RParen {
        stream.advance();
        return Ok(function);
    }

    let mut arg = term(tree, stream)?;
    tree.term_mut(function).first_arg = Some(arg);
    loop {
        match stream.kind() {
            TokenKind::RParen => {
                stream.advance();
                return Ok(function);
            }
            TokenKind::Comma => {
                stream.advance();
                let next = term(tree, stream)?;
                tree.term_mut(arg).next_arg = Some(next);
                arg = next;
            }
            _ => {
                let next = term(tree, stream)?;
                tree.term_mut(arg).next_in_series = Some(next);
                arg = next;
            }
        }
    }
}

/// Advance to the next `;`, `}` or end of input. A no-op when already there.
pub fn skip_expr(stream: &mut TokenStream) {
    while !matches!(
        stream.kind(),
        TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
    ) {
        stream.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(value: &str) -> ValueResult<(TermTree, TermId)> {
        let mut stream = TokenStream::new(value, 128);
        stream.advance();
        expr(&mut stream)
    }

    #[test]
    fn series_and_layers() {
        let (tree, root) = build("1px 2px 3px, red blue").unwrap();
        assert_eq!(tree.number_of_layers(root), 2);
        assert_eq!(tree.number_of_terms(root), 3);
        let second = tree.next_layer(root).unwrap();
        assert_eq!(tree.text(second), "red");
        assert_eq!(tree.number_of_terms(second), 2);
    }

    #[test]
    fn function_arguments() {
        let (tree, root) = build("rgb(1, 2 3, 4)").unwrap();
        assert_eq!(tree.kind(root), Some(TokenKind::Function));
        assert_eq!(tree.number_of_args(root), 3);
        let second = tree.args(root).nth(1).unwrap();
        assert_eq!(tree.number_of_terms(second), 2);
    }

    #[test]
    fn empty_function() {
        let (tree, root) = build("f()").unwrap();
        assert_eq!(tree.number_of_args(root), 0);
    }

    #[test]
    fn nested_functions_keep_argument_counts() {
        let (tree, root) =
            build("linear-gradient(to top, ladder(red, stop(0%, derive(red, 10%)), blue), white)")
                .unwrap();
        assert_eq!(tree.number_of_args(root), 3);
        let ladder = tree.args(root).nth(1).unwrap();
        assert_eq!(tree.number_of_args(ladder), 3);
        let stop = tree.args(ladder).nth(1).unwrap();
        assert_eq!(tree.number_of_args(stop), 2);
        let derive = tree.args(stop).nth(1).unwrap();
        assert_eq!(tree.number_of_args(derive), 2);
    }

    #[test]
    fn deep_parenthesis_nesting() {
        let depth = 64;
        let value = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let (tree, root) = build(&value).unwrap();
        let mut current = root;
        let mut levels = 0;
        while tree.kind(current) == Some(TokenKind::LParen) {
            assert_eq!(tree.number_of_args(current), 1);
            current = tree.first_arg(current).unwrap();
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(tree.text(current), "1");
    }

    #[test]
    fn stops_at_important() {
        let mut stream = TokenStream::new("red !important;", 128);
        stream.advance();
        let (tree, root) = expr(&mut stream).unwrap();
        assert_eq!(tree.number_of_terms(root), 1);
        assert_eq!(stream.kind(), TokenKind::ImportantSym);
    }

    #[test]
    fn unexpected_token_skips_to_terminator() {
        let mut stream = TokenStream::new("red : blue; next", 128);
        stream.advance();
        let err = expr(&mut stream).unwrap_err();
        assert!(err.message.starts_with("Unexpected token ':'"));
        assert_eq!(stream.kind(), TokenKind::Semi);
    }

    #[test]
    fn empty_value_is_an_error_without_consuming() {
        let mut stream = TokenStream::new(";a", 128);
        stream.advance();
        assert!(expr(&mut stream).is_err());
        assert_eq!(stream.kind(), TokenKind::Semi);
    }
}
