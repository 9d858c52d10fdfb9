//! CSS parser and style value resolver for Horizon Lattice.
//!
//! This crate turns stylesheet text into typed style values:
//!
//! - **Parsing**: a recursive-descent parser over a flat token stream builds
//!   a [`Stylesheet`] of rules, declarations and `@font-face` blocks,
//!   following `@import` chains
//! - **Resolution**: each declaration value is checked against the grammar of
//!   its property and resolved into a converter-tagged [`ParsedValue`]
//! - **Conversion**: [`convert::convert`] finishes a parsed value into
//!   pixels, colors, paints, insets or fonts
//! - **Recovery**: malformed input never fails a parse; errors are reported
//!   to an [`ErrorCollector`] and parsing resumes at the next declaration
//!
//! # Example
//!
//! ```
//! use horizon_lattice_css::prelude::*;
//!
//! let sheet = CssParser::default().parse(
//!     ".button { -fx-background-color: #336699, linear-gradient(to bottom, white, black); }",
//! );
//! let declaration = &sheet.rules[0].declarations[0];
//! assert_eq!(declaration.value.as_list().map(<[_]>::len), Some(2));
//! ```

pub mod collector;
pub mod config;
pub mod convert;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod term;
pub mod types;
pub mod value;

mod error;

pub use collector::{CssError, ErrorCollector, ErrorSource};
pub use config::ParserOptions;
pub use error::{Error, Result};
pub use parser::{CssParser, parse_css};
pub use rules::{Declaration, FontFace, Rule, StyleOrigin, Stylesheet};
pub use value::ParsedValue;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::collector::{CssError, ErrorCollector, ErrorSource};
    pub use crate::config::ParserOptions;
    pub use crate::convert::{ConvertContext, Paint, StyleValue, convert};
    pub use crate::parser::{CssParser, parse_css};
    pub use crate::rules::{Declaration, FontFace, Rule, StyleOrigin, Stylesheet};
    pub use crate::selector::{Combinator, Selector, SelectorPart, Specificity};
    pub use crate::types::{Color, Size, SizeUnits};
    pub use crate::value::{Converter, ParsedValue};
}
