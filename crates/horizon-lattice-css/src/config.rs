//! Parser configuration.

use std::sync::Arc;

use url::Url;

use crate::collector::ErrorCollector;
use crate::rules::StyleOrigin;

/// Default bound on nested blocks.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Lowest accepted nesting bound.
pub const MIN_NESTING_DEPTH: usize = 64;

/// Configuration for [`CssParser`](crate::parser::CssParser).
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Base for relative `url(...)`, `@import` and `@font-face` sources.
    pub base_url: Option<Url>,

    /// Blocks nested deeper than this are dropped by the tokenizer and the
    /// enclosing declaration is reported as an error.
    pub max_nesting_depth: usize,

    /// Origin stamped on produced stylesheets. In-line styles always use
    /// [`StyleOrigin::Inline`].
    pub origin: StyleOrigin,

    /// Where error reports go. `None` uses [`ErrorCollector::global`].
    pub collector: Option<Arc<ErrorCollector>>,

    /// Whether `@import` rules are followed.
    pub allow_imports: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            origin: StyleOrigin::Author,
            collector: None,
            allow_imports: true,
        }
    }
}

impl ParserOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the nesting bound, raised to [`MIN_NESTING_DEPTH`] if lower.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth.max(MIN_NESTING_DEPTH);
        self
    }

    /// Set the stylesheet origin.
    pub fn origin(mut self, origin: StyleOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Report errors to `collector` instead of the global one.
    pub fn collector(mut self, collector: Arc<ErrorCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Set whether `@import` is followed.
    pub fn allow_imports(mut self, allow: bool) -> Self {
        self.allow_imports = allow;
        self
    }

    /// The collector errors are reported to.
    pub fn error_collector(&self) -> &ErrorCollector {
        self.collector
            .as_deref()
            .unwrap_or_else(|| ErrorCollector::global())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let collector = Arc::new(ErrorCollector::new());
        let options = ParserOptions::new()
            .base_url(Url::parse("file:///styles/").unwrap())
            .max_nesting_depth(8)
            .origin(StyleOrigin::User)
            .collector(Arc::clone(&collector))
            .allow_imports(false);

        assert_eq!(options.base_url.as_ref().map(Url::as_str), Some("file:///styles/"));
        assert_eq!(options.max_nesting_depth, MIN_NESTING_DEPTH);
        assert_eq!(options.origin, StyleOrigin::User);
        assert!(!options.allow_imports);
        assert!(std::ptr::eq(options.error_collector(), &*collector));
    }

    #[test]
    fn defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.max_nesting_depth, 128);
        assert_eq!(options.origin, StyleOrigin::Author);
        assert!(options.allow_imports);
        assert!(std::ptr::eq(options.error_collector(), ErrorCollector::global()));
    }
}
