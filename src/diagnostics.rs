//! Core types for reported diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The four content rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "lowercase")]
    Lowercase,
    #[serde(rename = "language")]
    Language,
    #[serde(rename = "special")]
    Special,
    #[serde(rename = "sensitive")]
    Sensitive,
}

impl RuleKind {
    /// All rules, in the fixed evaluation order.
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Lowercase,
        RuleKind::Language,
        RuleKind::Special,
        RuleKind::Sensitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Lowercase => "lowercase",
            RuleKind::Language => "language",
            RuleKind::Special => "special",
            RuleKind::Sensitive => "sensitive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lowercase" => Some(RuleKind::Lowercase),
            "language" => Some(RuleKind::Language),
            "special" => Some(RuleKind::Special),
            "sensitive" => Some(RuleKind::Sensitive),
            _ => None,
        }
    }

    /// Severity is implied by rule identity: leaking secrets is a defect,
    /// the rest is style.
    pub fn severity(&self) -> Severity {
        match self {
            RuleKind::Sensitive => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A textual replacement that a consumer may apply verbatim to the
/// underlying source buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedEdit {
    /// Byte range to replace.
    pub span: Span,
    /// Replacement text, including the literal's delimiters.
    pub replacement: String,
    /// Short description of what the edit does.
    pub description: String,
}

/// A single reported rule violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleKind,
    pub severity: Severity,
    pub file: String,
    pub span: Span,
    pub message: String,
    /// Suggested fixes; empty for rules that cannot fix, or when the
    /// message argument is not a single string literal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<SuggestedEdit>,
}

impl Diagnostic {
    pub fn has_fix(&self) -> bool {
        !self.fixes.is_empty()
    }
}

/// Results of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files scanned.
    pub scanned: usize,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: AnalysisResult) {
        self.diagnostics.extend(other.diagnostics);
        self.scanned += other.scanned;
    }

    /// Check if there are any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of diagnostics carrying at least one suggested fix.
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.has_fix()).count()
    }

    /// Sort diagnostics by file, then position, for deterministic output.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            (&a.file, a.span.start_line, a.span.start_col, a.rule.as_str()).cmp(&(
                &b.file,
                b.span.start_line,
                b.span.start_col,
                b.rule.as_str(),
            ))
        });
    }
}
