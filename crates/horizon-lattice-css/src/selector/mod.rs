//! Selectors: output types, specificity and the selector parser.

mod parse;
mod specificity;
mod types;

pub(crate) use parse::selectors;
pub use specificity::Specificity;
pub use types::*;
