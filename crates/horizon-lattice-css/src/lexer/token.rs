//! Token definitions.

use std::fmt;

/// The closed set of token classes the value and rule parsers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain number, e.g. `1.5`.
    Number,
    /// Number with a `%` suffix.
    Percentage,
    Ems,
    Exs,
    Px,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
    Deg,
    Grad,
    Rad,
    Turn,
    /// Quoted string (text holds the unquoted value) or the body of an
    /// unquoted `url(...)`.
    String,
    Ident,
    /// `#rrggbb` or `0xrrggbb`; text includes the prefix.
    Hash,
    /// Function name including the open paren, e.g. `rgb(`.
    Function,
    LParen,
    RParen,
    Comma,
    Solidus,
    Colon,
    Semi,
    LBrace,
    RBrace,
    Star,
    Dot,
    Greater,
    Ws,
    /// `!important`.
    ImportantSym,
    /// `@name` other than `@font-face`; text holds `name`.
    AtKeyword,
    FontFace,
    Eof,
    Invalid,
}

impl TokenKind {
    /// Whether this kind is a number with (or without) a unit.
    pub fn is_size(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Percentage
                | Self::Ems
                | Self::Exs
                | Self::Px
                | Self::Cm
                | Self::Mm
                | Self::In
                | Self::Pt
                | Self::Pc
                | Self::Deg
                | Self::Grad
                | Self::Rad
                | Self::Turn
        )
    }

    /// Whether this kind ends a declaration value.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Self::Semi | Self::ImportantSym | Self::RBrace | Self::Eof
        )
    }

    /// Map a dimension unit (case-insensitive) to its token kind.
    pub fn from_unit(unit: &str) -> Option<Self> {
        let kind = match unit.to_ascii_lowercase().as_str() {
            "em" => Self::Ems,
            "ex" => Self::Exs,
            "px" => Self::Px,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "in" => Self::In,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "deg" => Self::Deg,
            "grad" => Self::Grad,
            "rad" => Self::Rad,
            "turn" => Self::Turn,
            _ => return None,
        };
        Some(kind)
    }
}

/// A classified lexeme with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub offset: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, offset: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            offset,
        }
    }

    /// End-of-input marker at the given position.
    pub fn eof(line: u32, offset: u32) -> Self {
        Self::new(TokenKind::Eof, "", line, offset)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is an identifier equal to `name`, ignoring ASCII case.
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}] '{}'", self.line, self.offset, self.text)
    }
}
