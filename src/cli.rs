//! Command-line interface for loglint.

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::diagnostics::{AnalysisResult, SuggestedEdit};
use crate::engine::Engine;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default configuration template written by `loglint init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/loglint.yaml");

/// Log message linter for Go.
///
/// Loglint finds calls to supported logging libraries (log, log/slog,
/// go.uber.org/zap), extracts the message argument, and checks it for
/// style problems, non-English text, noisy special characters and
/// potentially sensitive data.
#[derive(Parser)]
#[command(name = "loglint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check log messages in a file or directory
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Create a default .loglint.yaml configuration file
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    pub config: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Apply suggested fixes to the source files
    #[arg(long)]
    pub fix: bool,

    /// Skip _test.go files
    #[arg(long)]
    pub skip_tests: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    pub output: PathBuf,
}

/// Collect .go files under root, skipping hidden directories, vendor
/// trees, testdata, and any path matching a config exclude pattern.
fn collect_files(root: &Path, cfg: &Config, skip_tests: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is always walked, whatever its name.
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            if e.file_type().is_dir() && (name == "vendor" || name == "testdata") {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }
        if skip_tests {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.ends_with("_test.go") {
                continue;
            }
        }
        if cfg.is_path_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // An unreadable or malformed config falls back to the defaults so
    // analysis can always proceed.
    let config = Config::load_or_default(&args.config);

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &config, args.skip_tests)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let engine = Engine::new(config);
    let mut result = engine.check_files(&files);

    if args.fix {
        let applied = apply_fixes(&result)?;
        if applied > 0 {
            println!("Applied {} fix(es)", applied);
            // Re-check so the report reflects the rewritten sources.
            result = engine.check_files(&files);
        }
    }

    let path_str = args.path.to_string_lossy().to_string();
    let config_str = args.config.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &config_str, &result)?,
        _ => report::write_pretty(&path_str, &config_str, &result),
    }

    if result.diagnostics.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Apply every suggested edit to the source files, one file at a time.
/// Returns the number of edits applied.
fn apply_fixes(result: &AnalysisResult) -> anyhow::Result<usize> {
    let mut edits_by_file: HashMap<&str, Vec<&SuggestedEdit>> = HashMap::new();
    for d in &result.diagnostics {
        for fix in &d.fixes {
            edits_by_file.entry(d.file.as_str()).or_default().push(fix);
        }
    }

    let mut applied = 0;
    for (file, edits) in edits_by_file {
        let mut text = std::fs::read_to_string(file)?;
        let n = apply_edits(&mut text, &edits);
        if n > 0 {
            std::fs::write(file, text)?;
            applied += n;
        }
    }
    Ok(applied)
}

/// Apply non-overlapping edits to a string, bottom-up so earlier byte
/// offsets stay valid. Overlapping or out-of-range edits are dropped.
fn apply_edits(text: &mut String, edits: &[&SuggestedEdit]) -> usize {
    let mut sorted: Vec<&SuggestedEdit> = edits.to_vec();
    sorted.sort_by_key(|e| (e.span.start_byte, e.span.end_byte));

    let mut filtered: Vec<&SuggestedEdit> = Vec::new();
    let mut last_end = 0usize;
    for edit in sorted {
        if edit.span.start_byte < last_end
            || edit.span.end_byte > text.len()
            || edit.span.start_byte > edit.span.end_byte
        {
            continue;
        }
        last_end = edit.span.end_byte;
        filtered.push(edit);
    }

    for edit in filtered.iter().rev() {
        text.replace_range(edit.span.start_byte..edit.span.end_byte, &edit.replacement);
    }

    filtered.len()
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize rules", args.output.display());
    println!("  2. Run: loglint check .");

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Span;

    fn edit(start: usize, end: usize, replacement: &str) -> SuggestedEdit {
        SuggestedEdit {
            span: Span {
                start_byte: start,
                end_byte: end,
                start_line: 1,
                start_col: start + 1,
                end_line: 1,
                end_col: end + 1,
            },
            replacement: replacement.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_apply_edits() {
        let mut text = "aaa bbb ccc".to_string();
        let e1 = edit(0, 3, "xx");
        let e2 = edit(8, 11, "yy");
        let n = apply_edits(&mut text, &[&e2, &e1]);
        assert_eq!(n, 2);
        assert_eq!(text, "xx bbb yy");
    }

    #[test]
    fn test_apply_edits_drops_overlaps() {
        let mut text = "aaa bbb".to_string();
        let e1 = edit(0, 5, "x");
        let e2 = edit(4, 7, "y");
        let n = apply_edits(&mut text, &[&e1, &e2]);
        assert_eq!(n, 1);
        assert_eq!(text, "x bb");
    }

    #[test]
    fn test_apply_edits_drops_out_of_range() {
        let mut text = "abc".to_string();
        let e1 = edit(10, 12, "x");
        let n = apply_edits(&mut text, &[&e1]);
        assert_eq!(n, 0);
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("vendor")).unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("main.go"), "package main\n").unwrap();
        std::fs::write(dir.path().join("main_test.go"), "package main\n").unwrap();
        std::fs::write(dir.path().join("vendor").join("v.go"), "package v\n").unwrap();
        std::fs::write(dir.path().join("pkg").join("p.go"), "package pkg\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x\n").unwrap();

        let cfg = Config::default();
        let files = collect_files(dir.path(), &cfg, false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["main.go", "main_test.go", "pkg/p.go"]);

        let files = collect_files(dir.path(), &cfg, true).unwrap();
        assert!(files.iter().all(|p| !p.to_string_lossy().ends_with("_test.go")));
    }

    #[test]
    fn test_collect_files_respects_excludes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("gen")).unwrap();
        std::fs::write(dir.path().join("main.go"), "package main\n").unwrap();
        std::fs::write(dir.path().join("gen").join("g.go"), "package gen\n").unwrap();

        let mut cfg = Config::default();
        cfg.exclude = vec!["**/gen/**".to_string()];
        let files = collect_files(dir.path(), &cfg, false).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.go"));
    }
}
