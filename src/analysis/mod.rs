//! AST-backed call-site analysis.
//!
//! Data flows one direction:
//!
//! ```text
//! ┌──────────────┐    ┌─────────────┐    ┌──────────────┐    ┌────────────┐
//! │ GoSource     │───▶│ Classifier  │───▶│ Resolver     │───▶│ Rule driver│
//! │ (tree-sitter)│    │ (log calls) │    │ (msg text)   │    │ (rules/)   │
//! └──────────────┘    └─────────────┘    └──────────────┘    └────────────┘
//! ```
//!
//! Everything upstream of the rule driver is pure: classification misses
//! and resolution failures degrade to "no call" / "empty literal" rather
//! than erroring.

mod classify;
mod go;
mod resolve;
mod source;

pub use classify::{classify, is_log_method};
pub use go::{base_identifier, GoSource, GoSymbols};
pub use resolve::resolve_message;
pub use source::{LitKind, LogCall, SymbolResolver};
