//! Internal parse failure carried through the value resolver.

use crate::lexer::Token;

/// Result of a grammar-level parse step.
pub type ValueResult<T> = std::result::Result<T, ParseError>;

/// A grammar violation: what was expected, and the token found instead.
///
/// Never escapes a top-level parse call. The stylesheet assembler turns it
/// into a [`CssError`](crate::collector::CssError) report.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The error message describing what went wrong.
    pub message: String,
    /// The offending token, if one is known.
    pub token: Option<Token>,
}

impl ParseError {
    /// Create an error with no token attached.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: None,
        }
    }

    /// Create an error pointing at `token`.
    pub fn at(message: impl Into<String>, token: Option<&Token>) -> Self {
        Self {
            message: message.into(),
            token: token.cloned(),
        }
    }

    /// Line and column of the offending token, or `(0, 0)`.
    pub fn position(&self) -> (u32, u32) {
        self.token
            .as_ref()
            .map(|t| (t.line, t.offset))
            .unwrap_or((0, 0))
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{}: {}", self.message, token),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for crate::Error {
    fn from(err: ParseError) -> Self {
        let (line, column) = err.position();
        crate::Error::parse(err.message, line, column)
    }
}
