//! Parser-independent seam between the host front end and the rules.
//!
//! The classifier and message resolver only need two things from the
//! host's symbol information: which package a receiver identifier
//! belongs to, and the textual value of a string constant. Keeping that
//! behind a trait means the core can be retargeted to a different front
//! end without touching rule evaluation.

use crate::diagnostics::Span;

/// Symbol information for one compilation unit.
pub trait SymbolResolver {
    /// Import path of the package declaring the given receiver
    /// identifier, resolved through the unit's import table (and, for
    /// logger variables, their recorded initializer package).
    fn declaring_package(&self, receiver: &str) -> Option<&str>;

    /// Textual value of a compile-time string constant (delimiters
    /// stripped, escapes resolved). `None` for ordinary variables.
    fn constant_value(&self, name: &str) -> Option<&str>;
}

/// Delimiter style of a string literal, preserved when a fix re-emits
/// the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    /// `"..."` with backslash escapes.
    Interpreted,
    /// `` `...` `` raw literal.
    Raw,
}

impl LitKind {
    pub fn delimiter(&self) -> char {
        match self {
            LitKind::Interpreted => '"',
            LitKind::Raw => '`',
        }
    }
}

/// One recognized logging invocation.
///
/// Created during classification, read-only afterward, and discarded once
/// the rule driver has run; it owns its data so rule evaluation is not
/// tied to the syntax tree's lifetime.
#[derive(Debug, Clone)]
pub struct LogCall {
    /// Position of the whole call expression.
    pub call_span: Span,
    /// Position of the message argument (diagnostic range, fix range).
    pub msg_span: Span,
    /// Resolved literal string value; empty when nothing could be
    /// statically resolved.
    pub literal: String,
    /// Raw source text of the argument expression, for lexical matching
    /// against variable names.
    pub raw_text: String,
    /// `Some` when the argument is a single unmodified string literal —
    /// the only shape that is safe to auto-fix.
    pub lit_kind: Option<LitKind>,
}

impl LogCall {
    /// Whether suggested fixes may be attached to this call.
    pub fn is_fixable(&self) -> bool {
        self.lit_kind.is_some()
    }
}
