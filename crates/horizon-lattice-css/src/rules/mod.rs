//! Declarations, rules and stylesheets.

mod declaration;
mod font_face;
mod rule;
mod stylesheet;

pub use declaration::Declaration;
pub use font_face::{FontFace, FontFaceSrc, FontFaceSrcKind};
pub use rule::Rule;
pub use stylesheet::{StyleOrigin, Stylesheet};
