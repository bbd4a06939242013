//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{AnalysisResult, Diagnostic, Severity};

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub config: String,
    pub files_scanned: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub fixable: usize,
}

/// One diagnostic in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub rule: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: &str, result: &AnalysisResult) -> anyhow::Result<()> {
    let diagnostics: Vec<JsonDiagnostic> =
        result.diagnostics.iter().map(diagnostic_to_json).collect();

    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.to_string(),
        files_scanned: result.scanned,
        diagnostics,
        fixable: result.fixable_count(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

fn diagnostic_to_json(d: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        rule: d.rule.as_str().to_string(),
        severity: d.severity.to_string(),
        file: d.file.clone(),
        line: d.span.start_line,
        column: d.span.start_col,
        message: d.message.clone(),
        fix: d.fixes.first().map(|f| f.replacement.clone()),
    }
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: &str, result: &AnalysisResult) {
    println!();
    print!("  ");
    print!("{}", "loglint".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path);
    println!();

    if !result.diagnostics.is_empty() {
        write_diagnostics(&result.diagnostics);
        println!();
    }

    write_summary(result);
    println!();
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        write_severity_tag(&d.severity);
        print!("   ");
        print!("{:<12}", d.rule.as_str().dimmed());
        print!("{}", d.file.blue());
        print!(
            "{}",
            format!(":{}:{}", d.span.start_line, d.span.start_col).dimmed()
        );
        println!();

        println!("            {}", d.message);
        if let Some(fix) = d.fixes.first() {
            println!(
                "            {}",
                format!("fix: {} -> {}", fix.description, fix.replacement).dimmed()
            );
        }
        println!();
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
    }
}

fn write_summary(result: &AnalysisResult) {
    let plural = if result.scanned != 1 { "s" } else { "" };
    if result.diagnostics.is_empty() {
        println!(
            "  {}  {} file{} scanned",
            "✓ clean".green(),
            result.scanned,
            plural
        );
        return;
    }

    let issues = result.diagnostics.len();
    let issue_plural = if issues != 1 { "s" } else { "" };
    print!(
        "  {}  {} issue{} in {} file{} scanned",
        "✗ issues found".red(),
        issues,
        issue_plural,
        result.scanned,
        plural
    );
    let fixable = result.fixable_count();
    if fixable > 0 {
        print!(
            "  {}",
            format!("({} fixable with --fix)", fixable).dimmed()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{RuleKind, Span, SuggestedEdit};

    #[test]
    fn test_diagnostic_to_json() {
        let d = Diagnostic {
            rule: RuleKind::Lowercase,
            severity: Severity::Warning,
            file: "main.go".to_string(),
            span: Span {
                start_byte: 10,
                end_byte: 20,
                start_line: 2,
                start_col: 5,
                end_line: 2,
                end_col: 15,
            },
            message: "m".to_string(),
            fixes: vec![SuggestedEdit {
                span: Span {
                    start_byte: 10,
                    end_byte: 20,
                    start_line: 2,
                    start_col: 5,
                    end_line: 2,
                    end_col: 15,
                },
                replacement: "\"fixed\"".to_string(),
                description: "d".to_string(),
            }],
        };

        let j = diagnostic_to_json(&d);
        assert_eq!(j.rule, "lowercase");
        assert_eq!(j.severity, "warning");
        assert_eq!(j.line, 2);
        assert_eq!(j.column, 5);
        assert_eq!(j.fix.as_deref(), Some("\"fixed\""));
    }
}
