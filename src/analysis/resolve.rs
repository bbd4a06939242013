//! Message resolution: best-effort literal value and raw source text of
//! a message argument expression.
//!
//! The two outputs are deliberately asymmetric. The literal value
//! captures only *known* text (string literals, `+` concatenation,
//! resolved constants) and feeds the prose-judging rules; the raw text
//! captures *everything syntactic* so the sensitive-keyword rule can see
//! variable names whose values are unknowable at analysis time.

use tree_sitter::Node;

use crate::analysis::go::GoSource;
use crate::analysis::source::SymbolResolver;

/// Resolve one argument expression to `(literal, raw_text)`.
pub fn resolve_message(
    src: &GoSource,
    expr: Node,
    symbols: &dyn SymbolResolver,
) -> (String, String) {
    let raw = raw_text(src, expr);

    let mut literal = String::new();
    collect_literal(src, expr, symbols, &mut literal);

    (literal, raw)
}

/// Verbatim source slice of the expression. When the slice is not valid
/// UTF-8 the fallback reconstructs what it can: every string-literal
/// token verbatim and every identifier name, in depth-first order —
/// precision is sacrificed so the keyword rule still has text to search.
fn raw_text(src: &GoSource, expr: Node) -> String {
    let bytes = src.source();
    if let Some(slice) = bytes.get(expr.start_byte()..expr.end_byte()) {
        if let Ok(s) = std::str::from_utf8(slice) {
            return s.to_string();
        }
    }

    let mut out = String::new();
    reconstruct(src, expr, &mut out);
    out
}

fn reconstruct(src: &GoSource, node: Node, out: &mut String) {
    match node.kind() {
        "interpreted_string_literal" | "raw_string_literal" | "identifier"
        | "field_identifier" => {
            out.push_str(src.node_text(node));
            return;
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        reconstruct(src, child, out);
    }
}

/// Recursive descent collecting the statically-known string value.
///
/// Recognized shapes: string literals, binary `+` (operands concatenated
/// left to right), parentheses (unwrapped), and identifiers that resolve
/// to string constants. Everything else contributes nothing.
fn collect_literal(src: &GoSource, expr: Node, symbols: &dyn SymbolResolver, out: &mut String) {
    match expr.kind() {
        "interpreted_string_literal" | "raw_string_literal" => {
            out.push_str(&unquote(src.node_text(expr)));
        }
        "binary_expression" => {
            let op = expr
                .child_by_field_name("operator")
                .map(|n| src.node_text(n).to_string())
                .unwrap_or_default();
            if op == "+" {
                if let Some(left) = expr.child_by_field_name("left") {
                    collect_literal(src, left, symbols, out);
                }
                if let Some(right) = expr.child_by_field_name("right") {
                    collect_literal(src, right, symbols, out);
                }
            }
        }
        "parenthesized_expression" => {
            if let Some(inner) = expr.named_child(0) {
                collect_literal(src, inner, symbols, out);
            }
        }
        "identifier" => {
            // Constants contribute their value; ordinary variables
            // contribute nothing here (their names are visible through
            // the raw text).
            if let Some(value) = symbols.constant_value(src.node_text(expr)) {
                out.push_str(value);
            }
        }
        _ => {}
    }
}

/// Strip a string literal's delimiters and resolve the standard
/// backslash escapes (quote, backslash, newline, tab). Raw backtick
/// literals have no escapes. Unknown escapes are kept verbatim.
pub fn unquote(lit: &str) -> String {
    if let Some(raw) = lit
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return raw.to_string();
    }

    let inner = lit
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lit);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Parse a file and resolve the message argument of its single log
    /// call.
    fn resolve_first_arg(source: &str) -> (String, String) {
        let src = GoSource::parse(Path::new("test.go"), source.as_bytes()).unwrap();
        let symbols = src.symbols();
        let calls = src.call_expressions();
        // Nested selector calls inside the argument are candidates too;
        // the outermost call starts first.
        assert!(!calls.is_empty(), "expected a candidate call");
        let args = calls[0]
            .child_by_field_name("arguments")
            .expect("argument list");
        let mut cursor = args.walk();
        let arg = args.named_children(&mut cursor).next().expect("argument");
        resolve_message(&src, arg, &symbols)
    }

    #[test]
    fn test_simple_literal() {
        let (literal, raw) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"starting up\")\n}\n",
        );
        assert_eq!(literal, "starting up");
        assert_eq!(raw, "\"starting up\"");
    }

    #[test]
    fn test_concatenation() {
        let (literal, raw) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f(name string) {\n    log.Println(\"user \" + name + \" logged in\")\n}\n",
        );
        // The variable contributes nothing to the literal value.
        assert_eq!(literal, "user  logged in");
        assert_eq!(raw, "\"user \" + name + \" logged in\"");
    }

    #[test]
    fn test_constant_resolution() {
        let (literal, _) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nconst prefix = \"svc: \"\n\nfunc f() {\n    log.Println(prefix + \"ready\")\n}\n",
        );
        assert_eq!(literal, "svc: ready");
    }

    #[test]
    fn test_parenthesized() {
        let (literal, _) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println((\"a\" + \"b\"))\n}\n",
        );
        assert_eq!(literal, "ab");
    }

    #[test]
    fn test_raw_literal_and_escapes() {
        let (literal, _) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(`raw \\n text`)\n}\n",
        );
        // Raw literals keep backslashes verbatim.
        assert_eq!(literal, "raw \\n text");

        let (literal, _) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f() {\n    log.Println(\"tab\\there \\\"q\\\"\")\n}\n",
        );
        assert_eq!(literal, "tab\there \"q\"");
    }

    #[test]
    fn test_unresolvable_shapes_contribute_nothing() {
        let (literal, raw) = resolve_first_arg(
            "package main\n\nimport \"log\"\n\nfunc f(err error) {\n    log.Println(err.Error())\n}\n",
        );
        assert_eq!(literal, "");
        assert_eq!(raw, "err.Error()");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"hello\""), "hello");
        assert_eq!(unquote("`hello`"), "hello");
        assert_eq!(unquote("\"a\\\"b\\\\c\\nd\\te\""), "a\"b\\c\nd\te");
        assert_eq!(unquote("\"\\r\""), "\\r");
    }
}
