//! Logging targets.
//!
//! All log output of this crate goes through `tracing` under the targets
//! below so an embedding application can filter parser noise separately,
//! e.g. `RUST_LOG=horizon_lattice_css::parser=warn`.

/// `tracing` target names used by this crate.
pub mod targets {
    /// Stylesheet assembly and reported parse errors.
    pub const PARSER: &str = "horizon_lattice_css::parser";
    /// Tokenizer anomalies.
    pub const LEXER: &str = "horizon_lattice_css::lexer";
    /// Value resolution (deprecated syntax and similar notices).
    pub const VALUE: &str = "horizon_lattice_css::value";
}
