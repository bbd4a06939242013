//! Rule driver: runs every enabled rule against one classified log call
//! and packages violations into diagnostics.

use crate::analysis::LogCall;
use crate::config::Config;
use crate::diagnostics::{Diagnostic, RuleKind, SuggestedEdit};

use super::{check_language, check_lowercase, check_sensitive, check_special_chars, clean_message};

/// Run all enabled rules against a log call, in the fixed order
/// lowercase, language, special, sensitive. Rules are independent:
/// several may each produce a diagnostic for the same call.
pub fn run_rules(file: &str, call: &LogCall, cfg: &Config) -> Vec<Diagnostic> {
    let msg = &call.literal;
    let mut out = Vec::new();

    if cfg.is_rule_enabled(RuleKind::Lowercase.as_str()) {
        let found = check_lowercase(msg);
        if !found.is_empty() {
            out.push(diagnostic(file, call, RuleKind::Lowercase, found, lowercase_fix(call)));
        }
    }

    if cfg.is_rule_enabled(RuleKind::Language.as_str()) {
        let found = check_language(msg);
        if !found.is_empty() {
            out.push(diagnostic(file, call, RuleKind::Language, found, Vec::new()));
        }
    }

    if cfg.is_rule_enabled(RuleKind::Special.as_str()) {
        let found = check_special_chars(msg, &cfg.allowed_special_chars);
        if !found.is_empty() {
            out.push(diagnostic(
                file,
                call,
                RuleKind::Special,
                found,
                special_fix(call, &cfg.allowed_special_chars),
            ));
        }
    }

    if cfg.is_rule_enabled(RuleKind::Sensitive.as_str()) {
        let found = check_sensitive(msg, &call.raw_text, &cfg.sensitive_keywords);
        if !found.is_empty() {
            out.push(diagnostic(file, call, RuleKind::Sensitive, found, Vec::new()));
        }
    }

    out
}

fn diagnostic(
    file: &str,
    call: &LogCall,
    rule: RuleKind,
    message: String,
    fixes: Vec<SuggestedEdit>,
) -> Diagnostic {
    Diagnostic {
        rule,
        severity: rule.severity(),
        file: file.to_string(),
        span: call.msg_span.clone(),
        message,
        fixes,
    }
}

/// Lowercase the first character of the message, leaving the rest
/// untouched. Only single unmodified string literals are rewritten;
/// fixes that would change nothing are skipped.
fn lowercase_fix(call: &LogCall) -> Vec<SuggestedEdit> {
    let msg = &call.literal;
    if msg.is_empty() {
        return Vec::new();
    }
    let Some(kind) = call.lit_kind else {
        return Vec::new();
    };

    let mut chars = msg.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let fixed: String = first.to_lowercase().chain(chars).collect();
    if fixed == *msg {
        return Vec::new();
    }

    let quote = kind.delimiter();
    vec![SuggestedEdit {
        span: call.msg_span.clone(),
        replacement: format!("{quote}{fixed}{quote}"),
        description: "lowercase first letter of log message".to_string(),
    }]
}

/// Remove emoji and disallowed special characters from the message.
/// Complex expressions are never rewritten, to avoid surprising edits to
/// code whose value is not statically known.
fn special_fix(call: &LogCall, allowed_extra: &str) -> Vec<SuggestedEdit> {
    let msg = &call.literal;
    if msg.is_empty() {
        return Vec::new();
    }
    let Some(kind) = call.lit_kind else {
        return Vec::new();
    };

    let fixed = clean_message(msg, allowed_extra);
    if fixed == *msg {
        return Vec::new();
    }

    let quote = kind.delimiter();
    vec![SuggestedEdit {
        span: call.msg_span.clone(),
        replacement: format!("{quote}{fixed}{quote}"),
        description: "remove emoji and noisy special characters from log message".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::LitKind;
    use crate::diagnostics::Span;

    fn span() -> Span {
        Span {
            start_byte: 30,
            end_byte: 50,
            start_line: 3,
            start_col: 15,
            end_line: 3,
            end_col: 35,
        }
    }

    fn literal_call(msg: &str) -> LogCall {
        LogCall {
            call_span: span(),
            msg_span: span(),
            literal: msg.to_string(),
            raw_text: format!("{:?}", msg),
            lit_kind: Some(LitKind::Interpreted),
        }
    }

    #[test]
    fn test_rule_order_and_multiple_diagnostics() {
        let cfg = Config::default();
        let call = literal_call("Starting Server!!!");
        let diags = run_rules("main.go", &call, &cfg);

        // Uppercase start and repeated punctuation fire independently.
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].rule, RuleKind::Lowercase);
        assert_eq!(diags[1].rule, RuleKind::Special);

        // The lowercase fix changes only the first character.
        assert_eq!(diags[0].fixes.len(), 1);
        assert_eq!(diags[0].fixes[0].replacement, "\"starting Server!!!\"");
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let mut cfg = Config::default();
        cfg.rules.insert("lowercase".to_string(), false);
        cfg.rules.insert("special".to_string(), false);

        let call = literal_call("Starting Server!!!");
        let diags = run_rules("main.go", &call, &cfg);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_no_fix_for_concatenation() {
        let cfg = Config::default();
        let call = LogCall {
            call_span: span(),
            msg_span: span(),
            literal: "Starting ".to_string(),
            raw_text: "\"Starting \" + name".to_string(),
            lit_kind: None,
        };
        let diags = run_rules("main.go", &call, &cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::Lowercase);
        assert!(diags[0].fixes.is_empty());
    }

    #[test]
    fn test_sensitive_via_expression_text() {
        let cfg = Config::default();
        let call = LogCall {
            call_span: span(),
            msg_span: span(),
            literal: "authenticated ".to_string(),
            raw_text: "\"authenticated \" + jwtToken".to_string(),
            lit_kind: None,
        };
        let diags = run_rules("main.go", &call, &cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::Sensitive);
        assert!(diags[0].message.contains("argument expression"));
    }

    #[test]
    fn test_raw_literal_fix_keeps_backtick_delimiter() {
        let cfg = Config::default();
        let call = LogCall {
            call_span: span(),
            msg_span: span(),
            literal: "Ready".to_string(),
            raw_text: "`Ready`".to_string(),
            lit_kind: Some(LitKind::Raw),
        };
        let diags = run_rules("main.go", &call, &cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].fixes[0].replacement, "`ready`");
    }

    #[test]
    fn test_empty_message_never_flagged() {
        let cfg = Config::default();
        let call = LogCall {
            call_span: span(),
            msg_span: span(),
            literal: String::new(),
            raw_text: "expr()".to_string(),
            lit_kind: None,
        };
        assert!(run_rules("main.go", &call, &cfg).is_empty());
    }

    #[test]
    fn test_special_fix_round_trip() {
        let cfg = Config::default();
        let call = literal_call("wait...");
        let diags = run_rules("main.go", &call, &cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, RuleKind::Special);
        assert_eq!(diags[0].fixes[0].replacement, "\"wait.\"");
    }
}
