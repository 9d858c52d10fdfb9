//! Error reports.
//!
//! Grammar and structural errors found while parsing never abort a parse.
//! Each one becomes a [`CssError`] pushed to an [`ErrorCollector`]: the one
//! configured on the parser, or the process-wide [`ErrorCollector::global`].

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use url::Url;

/// Process-wide collector instance.
static GLOBAL_COLLECTOR: OnceLock<ErrorCollector> = OnceLock::new();

/// What was being parsed when an error was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSource {
    /// A stylesheet, with its location if it has one.
    Stylesheet(Option<Url>),
    /// The in-line `style` of some element.
    InlineStyle { owner: String, style: String },
    /// Free-standing CSS text.
    Text(String),
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSource::Stylesheet(Some(url)) => write!(f, "{}", url),
            ErrorSource::Stylesheet(None) => write!(f, "?"),
            ErrorSource::InlineStyle { owner, .. } => write!(f, "{}", owner),
            ErrorSource::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A reported parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssError {
    pub source: ErrorSource,
    pub message: String,
}

impl CssError {
    pub fn new(source: ErrorSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for CssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ErrorSource::Stylesheet(url) => {
                let url = url.as_ref().map_or("?", Url::as_str);
                write!(f, "CSS Error parsing {}: {}", url, self.message)
            }
            ErrorSource::InlineStyle { owner, style } => write!(
                f,
                "CSS Error parsing in-line style '{}' from {}: {}",
                style, owner, self.message
            ),
            ErrorSource::Text(text) => {
                write!(f, "CSS Error parsing '{}: {}", text, self.message)
            }
        }
    }
}

/// Append-only, thread-safe sink for [`CssError`] reports.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Mutex<Vec<CssError>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide collector, used by parsers without their own.
    pub fn global() -> &'static ErrorCollector {
        GLOBAL_COLLECTOR.get_or_init(ErrorCollector::new)
    }

    pub fn push(&self, error: CssError) {
        self.errors.lock().push(error);
    }

    /// Copy of the reports collected so far.
    pub fn snapshot(&self) -> Vec<CssError> {
        self.errors.lock().clone()
    }

    /// Remove and return all reports.
    pub fn take(&self) -> Vec<CssError> {
        std::mem::take(&mut *self.errors.lock())
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    pub fn clear(&self) {
        self.errors.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn display_by_source() {
        let url = Url::parse("file:///app/main.css").unwrap();
        let error = CssError::new(ErrorSource::Stylesheet(Some(url)), "Expected LBRACE at [1,3]");
        assert_eq!(
            error.to_string(),
            "CSS Error parsing file:///app/main.css: Expected LBRACE at [1,3]"
        );

        let error = CssError::new(ErrorSource::Stylesheet(None), "oops");
        assert_eq!(error.to_string(), "CSS Error parsing ?: oops");

        let error = CssError::new(
            ErrorSource::InlineStyle {
                owner: "Button#ok".to_string(),
                style: "-fx-padding: ;".to_string(),
            },
            "oops",
        );
        assert_eq!(
            error.to_string(),
            "CSS Error parsing in-line style '-fx-padding: ;' from Button#ok: oops"
        );

        let error = CssError::new(ErrorSource::Text("a { }".to_string()), "oops");
        assert_eq!(error.to_string(), "CSS Error parsing 'a { }: oops");
    }

    #[test]
    fn concurrent_pushes() {
        let collector = Arc::new(ErrorCollector::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || {
                    for j in 0..25 {
                        collector.push(CssError::new(
                            ErrorSource::Text(format!("{i}")),
                            format!("{j}"),
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(collector.len(), 100);
        assert_eq!(collector.snapshot().len(), 100);
        assert_eq!(collector.take().len(), 100);
        assert!(collector.is_empty());
    }
}
