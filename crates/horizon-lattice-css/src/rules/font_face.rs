//! `@font-face` rules.

use std::collections::BTreeMap;
use std::fmt;

/// Where a font face is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFaceSrcKind {
    /// `url(...)`, resolved to an absolute URL.
    Url,
    /// `local(...)`: a font installed on the system.
    Local,
    /// A bare identifier naming another font family.
    Reference,
}

/// One entry of a `src` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceSrc {
    pub kind: FontFaceSrcKind,
    pub src: String,
    /// The `format(...)` hint of a URL source.
    pub format: Option<String>,
}

impl FontFaceSrc {
    pub fn new(kind: FontFaceSrcKind, src: impl Into<String>) -> Self {
        Self {
            kind,
            src: src.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl fmt::Display for FontFaceSrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FontFaceSrcKind::Url => write!(f, "url(\"{}\")", self.src)?,
            FontFaceSrcKind::Local => write!(f, "local(\"{}\")", self.src)?,
            FontFaceSrcKind::Reference => write!(f, "{}", self.src)?,
        }
        if let Some(format) = &self.format {
            write!(f, " format(\"{}\")", format)?;
        }
        Ok(())
    }
}

/// A parsed `@font-face` block.
///
/// Descriptors other than `src` are kept as text, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFace {
    pub descriptors: BTreeMap<String, String>,
    pub sources: Vec<FontFaceSrc>,
}

impl FontFace {
    /// Value of a descriptor, e.g. `font-family`.
    pub fn descriptor(&self, name: &str) -> Option<&str> {
        self.descriptors.get(name).map(String::as_str)
    }

    pub fn family(&self) -> Option<&str> {
        self.descriptor("font-family")
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@font-face {{ ")?;
        for (name, value) in &self.descriptors {
            write!(f, "{}: {}; ", name, value)?;
        }
        if !self.sources.is_empty() {
            let sources: Vec<String> = self.sources.iter().map(ToString::to_string).collect();
            write!(f, "src: {}; ", sources.join(", "))?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let mut face = FontFace::default();
        face.descriptors
            .insert("font-family".to_string(), "Fira Sans".to_string());
        face.sources.push(
            FontFaceSrc::new(FontFaceSrcKind::Url, "file:///fonts/fira.ttf").with_format("truetype"),
        );
        face.sources
            .push(FontFaceSrc::new(FontFaceSrcKind::Local, "Fira Sans Regular"));
        assert_eq!(face.family(), Some("Fira Sans"));
        assert_eq!(
            face.to_string(),
            "@font-face { font-family: Fira Sans; src: url(\"file:///fonts/fira.ttf\") \
             format(\"truetype\"), local(\"Fira Sans Regular\"); }"
        );
    }
}
