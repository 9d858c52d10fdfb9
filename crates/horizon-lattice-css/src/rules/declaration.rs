//! A single `property: value` declaration.

use std::fmt;

use crate::value::ParsedValue;

/// A resolved declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Lower-cased property name.
    pub property: String,
    pub value: ParsedValue,
    /// Declared with `!important`.
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: ParsedValue, important: bool) -> Self {
        Self {
            property: property.into().to_lowercase(),
            value,
            important,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn property_is_lower_cased() {
        let decl = Declaration::new("-FX-Padding", ParsedValue::size(Size::px(2.0)), true);
        assert_eq!(decl.property, "-fx-padding");
        assert!(decl.to_string().ends_with("!important"));
    }
}
