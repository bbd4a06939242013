//! Sensitive-data rule.
//!
//! Scans both the resolved message text and the raw argument expression,
//! so secrets carried in variable *names* are caught even when their
//! values are unknowable at analysis time.

use phf::phf_set;

/// Words that commonly follow tokens like "token"/"auth" in a harmless
/// status-style message (e.g. "token validated"). A keyword match that is
/// immediately followed by one of these is not flagged.
static SAFE_FOLLOWERS: phf::Set<&'static str> = phf_set! {
    "ok",
    "success",
    "successful",
    "succeeded",
    "failed",
    "failure",
    "error",
    "invalid",
    "missing",
    "present",
    "enabled",
    "disabled",
    "created",
    "generated",
    "refreshed",
    "expired",
    "validated",
    "completed",
    "revoked",
    "rotated",
    "updated",
    "authorized",
    "unauthorized",
};

/// Check that a log message does not contain keywords indicating
/// potentially sensitive data.
///
/// `raw_expr` is the full source text of the argument expression
/// (e.g. `"user password: " + password`); keywords are matched against
/// whole tokens of the message text and against the normalized
/// identifier text of the expression, in list order. The first match
/// wins, message text before expression text.
pub fn check_sensitive(msg: &str, raw_expr: &str, keywords: &[String]) -> String {
    let lower = msg.to_lowercase();
    let lower_expr = raw_expr.to_lowercase();
    let tokens = tokenize_words(&lower);

    // Keyword hits in the expression should come from identifier and
    // variable names only; literal contents are already covered by the
    // message-text check.
    let expr_no_strings = strip_string_literals(&lower_expr);
    let normalized: String = expr_no_strings
        .chars()
        .filter(|c| *c != '_' && *c != ' ')
        .collect();

    for kw in keywords {
        let kw = kw.to_lowercase();

        // Match by whole token rather than raw substring. This avoids
        // noisy matches like keyword "auth" inside "authenticated".
        for (i, tok) in tokens.iter().enumerate() {
            if *tok != kw {
                continue;
            }
            if let Some(next) = tokens.get(i + 1) {
                if SAFE_FOLLOWERS.contains(next) {
                    break;
                }
            }
            return format!(
                "log message may contain sensitive data (keyword {:?} found in message text)",
                kw
            );
        }

        // Underscores are removed from both sides so identifier-style
        // naming normalizes: "apiKey" -> "apikey" matches "api_key".
        let kw_norm: String = kw.chars().filter(|c| *c != '_').collect();
        if normalized.contains(&kw_norm) {
            return format!(
                "log message may contain sensitive data (keyword {:?} found in argument expression)",
                kw
            );
        }
    }

    String::new()
}

/// Split a lower-cased string into maximal runs of `[a-z0-9_]`.
fn tokenize_words(s: &str) -> Vec<&str> {
    s.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Remove the contents of Go-style string literals from an expression so
/// identifier scanning is not affected by the literal text itself.
/// Supports double-quoted strings with escaping and raw backtick strings.
fn strip_string_literals(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());

    let mut in_double = false;
    let mut in_raw = false;
    let mut escape = false;

    for c in expr.chars() {
        if in_raw {
            if c == '`' {
                in_raw = false;
                out.push(' ');
            }
            continue;
        }
        if in_double {
            if escape {
                escape = false;
                continue;
            }
            match c {
                '\\' => escape = true,
                '"' => {
                    in_double = false;
                    out.push(' ');
                }
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_double = true;
                out.push(' ');
            }
            '`' => {
                in_raw = true;
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}
