//! Call-site classification.
//!
//! A call qualifies as a log call when its callee is a member access
//! whose method name is one of the conventional logging entry points and
//! whose receiver resolves to a recognized logging package. Everything
//! else is silently skipped; absence of a [`LogCall`] is the negative
//! result.

use phf::phf_set;
use tree_sitter::Node;

use crate::analysis::go::{base_identifier, GoSource};
use crate::analysis::resolve::resolve_message;
use crate::analysis::source::{LitKind, LogCall, SymbolResolver};
use crate::diagnostics::Span;

/// Conventional log call entry points across the supported loggers:
/// slog/zap shared names, zap extras, slog context variants, and the
/// stdlib printf family.
static LOG_METHODS: phf::Set<&'static str> = phf_set! {
    "Info", "Warn", "Error", "Debug",
    "Fatal", "Panic", "DPanic",
    "InfoCtx", "WarnCtx", "ErrorCtx", "DebugCtx",
    "InfoContext", "WarnContext", "ErrorContext", "DebugContext",
    "Print", "Printf", "Println",
    "Fatalf", "Fatalln",
    "Panicf", "Panicln",
};

/// How a recognized package's import path is matched.
#[derive(Debug, Clone, Copy)]
enum PackageMatch {
    /// Exact path identity. Used for the bare stdlib `log` package so
    /// similarly named third-party packages do not collide.
    Exact(&'static str),
    /// Exact path or any subpackage (`prefix` + "/").
    Prefix(&'static str),
}

impl PackageMatch {
    fn matches(&self, path: &str) -> bool {
        match self {
            PackageMatch::Exact(p) => path == *p,
            PackageMatch::Prefix(p) => path
                .strip_prefix(p)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

/// One recognized logging API. Adding a logger is a table edit.
struct LoggingApi {
    package: PackageMatch,
    /// 0-based index of the message argument for this API.
    message_index: usize,
}

/// The closed set of recognized logging libraries.
static LOGGING_APIS: &[LoggingApi] = &[
    LoggingApi {
        package: PackageMatch::Prefix("log/slog"),
        message_index: 0,
    },
    LoggingApi {
        package: PackageMatch::Prefix("go.uber.org/zap"),
        message_index: 0,
    },
    LoggingApi {
        package: PackageMatch::Exact("log"),
        message_index: 0,
    },
];

/// Whether the method name is a conventional log entry point.
pub fn is_log_method(name: &str) -> bool {
    LOG_METHODS.contains(name)
}

/// Look up the recognized API for an import path.
fn api_for_package(path: &str) -> Option<&'static LoggingApi> {
    LOGGING_APIS.iter().find(|api| api.package.matches(path))
}

/// Classify one call expression, returning a [`LogCall`] descriptor if
/// it is a supported logging call.
pub fn classify(src: &GoSource, call: Node, symbols: &dyn SymbolResolver) -> Option<LogCall> {
    let function = call.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }

    let method = function.child_by_field_name("field")?;
    if !is_log_method(src.node_text(method)) {
        return None;
    }

    let operand = function.child_by_field_name("operand")?;
    let receiver = base_identifier(operand)?;
    let pkg = symbols.declaring_package(src.node_text(receiver))?;
    let api = api_for_package(pkg)?;

    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let arg_nodes: Vec<Node> = args.named_children(&mut cursor).collect();

    // The index must land inside the actual argument list, or the call
    // is rejected; classification never indexes out of range.
    let msg_arg = *arg_nodes.get(api.message_index)?;

    let (literal, raw_text) = resolve_message(src, msg_arg, symbols);
    let lit_kind = match msg_arg.kind() {
        "interpreted_string_literal" => Some(LitKind::Interpreted),
        "raw_string_literal" => Some(LitKind::Raw),
        _ => None,
    };

    Some(LogCall {
        call_span: Span::from_node(call),
        msg_span: Span::from_node(msg_arg),
        literal,
        raw_text,
        lit_kind,
    })
}
