//! Parsed values.

mod parsed;

pub use parsed::{Converter, Keyword, ParsedValue, Value};
