//! Loglint - log message linter for Go.
//!
//! Loglint inspects Go source for calls to supported logging libraries
//! (`log`, `log/slog`, `go.uber.org/zap`), reconstructs the message
//! argument's text, and checks it against four content rules: lowercase
//! start, English-only text, no special characters, and no sensitive
//! data. Where the message is a single string literal, the lowercase and
//! special-character rules also offer auto-fix edits.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: Go front end, call-site classification, message resolution
//! - `rules`: the four content rules and the rule driver
//! - `config`: YAML configuration merged onto built-in defaults
//! - `engine`: per-file pipeline and parallel fan-out
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line interface and fix application
//!
//! The analysis layer is pure: classification misses and resolution
//! failures degrade to "no call" / "empty value" instead of erroring,
//! and the only side effect in the pipeline is emitting diagnostics.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod report;
pub mod rules;

pub use analysis::{GoSource, GoSymbols, LitKind, LogCall, SymbolResolver};
pub use config::{Config, ConfigError};
pub use diagnostics::{AnalysisResult, Diagnostic, RuleKind, Severity, Span, SuggestedEdit};
pub use engine::Engine;
