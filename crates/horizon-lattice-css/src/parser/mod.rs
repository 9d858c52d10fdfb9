//! Stylesheet parsing.

mod css_parser;
mod error;

pub use css_parser::{CssParser, parse_css};
pub use error::{ParseError, ValueResult};
