//! Analysis engine: drives the per-file pipeline and fans out over files.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::{classify, GoSource};
use crate::config::Config;
use crate::diagnostics::{AnalysisResult, Diagnostic};
use crate::rules::run_rules;

/// Runs the classification/resolution/rule pipeline with one immutable
/// configuration. Construct explicitly; nothing reads global state.
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze one file's source: parse, build the symbol table, then
    /// classify every call expression and run the enabled rules against
    /// each recognized log call.
    pub fn check_source(&self, path: &str, source: &[u8]) -> anyhow::Result<Vec<Diagnostic>> {
        let src = GoSource::parse(std::path::Path::new(path), source)?;
        let symbols = src.symbols();

        let mut diagnostics = Vec::new();
        for call in src.call_expressions() {
            let Some(log_call) = classify(&src, call, &symbols) else {
                continue;
            };
            debug!(
                file = path,
                line = log_call.call_span.start_line,
                "recognized log call"
            );
            diagnostics.extend(run_rules(path, &log_call, &self.config));
        }

        Ok(diagnostics)
    }

    /// Analyze many files in parallel. Each file is an independent pass
    /// sharing the read-only configuration; a file that cannot be read
    /// or parsed is logged and skipped. Results are sorted by file and
    /// position for deterministic output.
    pub fn check_files(&self, files: &[PathBuf]) -> AnalysisResult {
        let per_file: Vec<Option<Vec<Diagnostic>>> = files
            .par_iter()
            .map(|path| {
                let source = match std::fs::read(path) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("skipping {}: {e}", path.display());
                        return None;
                    }
                };
                match self.check_source(&path.to_string_lossy(), &source) {
                    Ok(diags) => Some(diags),
                    Err(e) => {
                        warn!("skipping {}: {e}", path.display());
                        None
                    }
                }
            })
            .collect();

        let mut result = AnalysisResult::new();
        for diags in per_file.into_iter().flatten() {
            result.scanned += 1;
            result.diagnostics.extend(diags);
        }
        result.sort();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RuleKind;

    fn check(source: &str) -> Vec<Diagnostic> {
        Engine::new(Config::default())
            .check_source("test.go", source.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_end_to_end_multiple_rules() {
        let diags = check(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"Starting Server!!!\")\n}\n",
        );
        assert!(diags.len() >= 2, "got {diags:?}");
        assert!(diags.iter().any(|d| d.rule == RuleKind::Lowercase));
        assert!(diags.iter().any(|d| d.rule == RuleKind::Special));

        let lower = diags.iter().find(|d| d.rule == RuleKind::Lowercase).unwrap();
        assert_eq!(lower.fixes[0].replacement, "\"starting Server!!!\"");
    }

    #[test]
    fn test_end_to_end_sensitive_concatenation() {
        let diags = check(
            "package main\n\nimport \"log\"\n\nfunc f(password string) {\n    log.Println(\"user password: \" + password)\n}\n",
        );
        let sensitive: Vec<_> = diags
            .iter()
            .filter(|d| d.rule == RuleKind::Sensitive)
            .collect();
        assert_eq!(sensitive.len(), 1);
        assert!(sensitive[0].message.contains("\"password\""));
    }

    #[test]
    fn test_clean_file_has_no_diagnostics() {
        let diags = check(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"server listening on :8080\")\n}\n",
        );
        assert!(diags.is_empty(), "got {diags:?}");
    }

    #[test]
    fn test_diagnostic_positions_point_at_argument() {
        let diags = check(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"Bad\")\n}\n",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span.start_line, 6);
        // Column of the opening quote, 1-indexed.
        assert_eq!(diags[0].span.start_col, 17);
    }

    #[test]
    fn test_check_files_parallel_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.go");
        let b = dir.path().join("b.go");
        std::fs::write(
            &b,
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"B side\")\n}\n",
        )
        .unwrap();
        std::fs::write(
            &a,
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"A side\")\n}\n",
        )
        .unwrap();

        let engine = Engine::new(Config::default());
        let result = engine.check_files(&[b.clone(), a.clone()]);
        assert_eq!(result.scanned, 2);
        assert_eq!(result.diagnostics.len(), 2);
        assert!(result.diagnostics[0].file.ends_with("a.go"));
        assert!(result.diagnostics[1].file.ends_with("b.go"));
    }

    #[test]
    fn test_unreadable_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.go");
        let engine = Engine::new(Config::default());
        let result = engine.check_files(&[missing]);
        assert_eq!(result.scanned, 0);
        assert!(result.diagnostics.is_empty());
    }
}
