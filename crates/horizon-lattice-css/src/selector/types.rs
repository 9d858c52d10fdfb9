//! Parsed selectors.

use std::fmt;

/// A compound selector such as `HBox > .button:hover`.
///
/// `parts` runs from the outermost ancestor to the subject; `combinators[i]`
/// joins `parts[i]` and `parts[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Wrap a single part.
    pub fn simple(part: SelectorPart) -> Self {
        Self {
            parts: vec![part],
            combinators: Vec::new(),
        }
    }

    /// `Element`
    pub fn type_selector(element: impl Into<String>) -> Self {
        Self::simple(SelectorPart::type_only(element))
    }

    /// The `*` selector used for in-line style rules.
    pub fn universal() -> Self {
        Self::simple(SelectorPart::universal())
    }

    /// `.class`
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::simple(SelectorPart::class_only(class_name))
    }

    /// `#id`
    pub fn id(id: impl Into<String>) -> Self {
        Self::simple(SelectorPart::id_only(id))
    }

    /// Append `part` as a descendant of the current subject.
    pub fn descendant(self, part: SelectorPart) -> Self {
        self.join(Combinator::Descendant, part)
    }

    /// Append `part` as a direct child of the current subject.
    pub fn child(self, part: SelectorPart) -> Self {
        self.join(Combinator::Child, part)
    }

    pub(crate) fn join(mut self, combinator: Combinator, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(combinator);
        }
        self.parts.push(part);
        self
    }

    /// The part an element must match itself, i.e. the last one.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }

    /// True for a selector made of one part.
    pub fn is_simple(&self) -> bool {
        self.parts.len() == 1
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.parts.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for (combinator, part) in self.combinators.iter().zip(parts) {
            f.write_str(combinator.as_css())?;
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// One compound part, e.g. `Button#ok.primary:hover`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// `None` when the part names no element at all (`.primary`).
    pub type_selector: Option<TypeSelector>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Pseudo-classes without the colon. Functional pseudo-classes keep
    /// their argument text, e.g. `nth-child(odd)`.
    pub pseudo_classes: Vec<String>,
}

impl SelectorPart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_only(element: impl Into<String>) -> Self {
        Self::new().with_type(element)
    }

    pub fn universal() -> Self {
        Self {
            type_selector: Some(TypeSelector::Universal),
            ..Self::default()
        }
    }

    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self::new().with_class(class_name)
    }

    pub fn id_only(id: impl Into<String>) -> Self {
        Self::new().with_id(id)
    }

    pub fn with_type(mut self, element: impl Into<String>) -> Self {
        self.type_selector = Some(TypeSelector::Type(element.into()));
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a pseudo-class, given without its colon.
    pub fn with_pseudo(mut self, pseudo: impl Into<String>) -> Self {
        self.pseudo_classes.push(pseudo.into());
        self
    }

    /// Type name, or `*` for universal and absent type selectors.
    pub fn element(&self) -> &str {
        match &self.type_selector {
            Some(TypeSelector::Type(name)) => name,
            _ => "*",
        }
    }

    /// Whether the part matches every element: `*` or nothing at all.
    pub fn is_universal_only(&self) -> bool {
        !matches!(self.type_selector, Some(TypeSelector::Type(_))) && self.has_no_filters()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.type_selector.is_none() && self.has_no_filters()
    }

    fn has_no_filters(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.pseudo_classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => f.write_str("*")?,
            Some(TypeSelector::Type(name)) => f.write_str(name)?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        self.classes.iter().try_for_each(|class| write!(f, ".{class}"))?;
        self.pseudo_classes
            .iter()
            .try_for_each(|pseudo| write!(f, ":{pseudo}"))
    }
}

/// Element part of a [`SelectorPart`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// `*`
    Universal,
    /// An element type name such as `Button`.
    Type(String),
}

/// How two adjacent parts relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
}

impl Combinator {
    fn as_css(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
        }
    }
}
