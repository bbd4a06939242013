//! Go front end using tree-sitter.
//!
//! Extracts, per file:
//! - Call expressions whose callee is a selector (candidate log calls)
//! - The import table (alias or last path segment -> import path)
//! - String constants (for resolving constant message parts)
//! - Logger variables (`logger := zap.NewProduction()`), tracked by the
//!   base identifier of their initializer
//!
//! This is the tree-sitter rendition of static symbol information:
//! best-effort and single-file. A receiver that cannot be resolved is a
//! classification miss, never an error.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, Tree};

use crate::analysis::resolve::unquote;
use crate::analysis::source::SymbolResolver;

static GO: Lazy<Language> = Lazy::new(|| tree_sitter_go::LANGUAGE.into());

/// Tree-sitter query for candidate log calls: any call whose callee is a
/// member access. Filtering to recognized APIs happens in the classifier.
const CALL_QUERY: &str = r#"
(call_expression
  function: (selector_expression
    field: (field_identifier))
) @call
"#;

/// Tree-sitter query for imports (single and grouped specs).
const IMPORT_QUERY: &str = r#"
(import_spec
  name: (package_identifier)? @alias
  path: (_) @path
)
"#;

/// Tree-sitter query for declarations feeding the symbol table.
const DECL_QUERY: &str = r#"
(const_spec) @const
(var_spec) @var
(short_var_declaration) @short_var
"#;

/// One parsed Go file.
pub struct GoSource {
    tree: Tree,
    source: Vec<u8>,
    path: String,
}

impl GoSource {
    /// Parse a Go source file.
    pub fn parse(path: &Path, source: &[u8]) -> anyhow::Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&GO)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Go source: {}", path.display()))?;

        Ok(Self {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// All call expressions whose callee is a member access, in document
    /// order.
    pub fn call_expressions(&self) -> Vec<Node<'_>> {
        let query = match Query::new(&GO, CALL_QUERY) {
            Ok(q) => q,
            Err(_) => return Vec::new(),
        };
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), &self.source[..]);

        let mut calls = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                calls.push(capture.node);
            }
        }
        calls.sort_by_key(|n| n.start_byte());
        calls
    }

    /// Build the file's symbol table.
    pub fn symbols(&self) -> GoSymbols {
        let mut symbols = GoSymbols::default();
        self.collect_imports(&mut symbols);
        self.collect_declarations(&mut symbols);
        symbols
    }

    fn collect_imports(&self, symbols: &mut GoSymbols) {
        let query = match Query::new(&GO, IMPORT_QUERY) {
            Ok(q) => q,
            Err(_) => return,
        };
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), &self.source[..]);

        while let Some(m) = matches.next() {
            let mut path = String::new();
            let mut alias = None;

            for capture in m.captures {
                let name = query.capture_names()[capture.index as usize];
                match name {
                    "path" => {
                        path = self.node_text(capture.node).trim_matches('"').to_string();
                    }
                    "alias" => {
                        alias = Some(self.node_text(capture.node).to_string());
                    }
                    _ => {}
                }
            }

            if path.is_empty() {
                continue;
            }
            // Without an explicit alias the local name is the last path
            // segment; the dot and blank forms never act as receivers.
            let local = match alias {
                Some(a) => a,
                None => path.rsplit('/').next().unwrap_or(&path).to_string(),
            };
            symbols.imports.insert(local, path);
        }
    }

    fn collect_declarations(&self, symbols: &mut GoSymbols) {
        let query = match Query::new(&GO, DECL_QUERY) {
            Ok(q) => q,
            Err(_) => return,
        };
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), &self.source[..]);

        // Assignments are paired up here but resolved in document order
        // below, so `sugar := logger.Sugar()` sees the earlier `logger`.
        let mut assignments: Vec<(usize, String, Node)> = Vec::new();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                match query.capture_names()[capture.index as usize] {
                    "const" => self.collect_const_spec(node, symbols),
                    "var" => {
                        let names = self.field_nodes(node, "name");
                        let values = node
                            .child_by_field_name("value")
                            .map(|v| named_children(v))
                            .unwrap_or_default();
                        for (name, value) in names.iter().zip(values.iter()) {
                            assignments.push((
                                value.start_byte(),
                                self.node_text(*name).to_string(),
                                *value,
                            ));
                        }
                    }
                    "short_var" => {
                        let lhs = node
                            .child_by_field_name("left")
                            .map(|v| named_children(v))
                            .unwrap_or_default();
                        let rhs = node
                            .child_by_field_name("right")
                            .map(|v| named_children(v))
                            .unwrap_or_default();
                        for (name, value) in lhs.iter().zip(rhs.iter()) {
                            if name.kind() != "identifier" {
                                continue;
                            }
                            assignments.push((
                                value.start_byte(),
                                self.node_text(*name).to_string(),
                                *value,
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }

        assignments.sort_by_key(|(pos, _, _)| *pos);
        for (_, name, value) in assignments {
            let Some(base) = base_identifier(value) else {
                continue;
            };
            let base = self.node_text(base);
            let pkg = symbols.declaring_package(base).map(String::from);
            if let Some(pkg) = pkg {
                symbols.vars.insert(name, pkg);
            }
        }
    }

    /// Record string constants from one `const_spec`, pairing names with
    /// values positionally.
    fn collect_const_spec(&self, spec: Node, symbols: &mut GoSymbols) {
        let names = self.field_nodes(spec, "name");
        let values = spec
            .child_by_field_name("value")
            .map(|v| named_children(v))
            .unwrap_or_default();

        for (name, value) in names.iter().zip(values.iter()) {
            if matches!(
                value.kind(),
                "interpreted_string_literal" | "raw_string_literal"
            ) {
                symbols.consts.insert(
                    self.node_text(*name).to_string(),
                    unquote(self.node_text(*value)),
                );
            }
        }
    }

    fn field_nodes<'t>(&self, node: Node<'t>, field: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor).collect()
    }
}

/// Named children of a node (skips punctuation tokens).
fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// The leftmost identifier an expression hangs off: `zap.NewProduction()`
/// -> `zap`, `logger.Sugar().With(...)` -> `logger`. `None` for
/// expressions with no identifier base.
pub fn base_identifier(mut node: Node) -> Option<Node> {
    loop {
        match node.kind() {
            "identifier" => return Some(node),
            "selector_expression" | "index_expression" | "unary_expression" => {
                node = node.child_by_field_name("operand")?;
            }
            "call_expression" => {
                node = node.child_by_field_name("function")?;
            }
            "composite_literal" => {
                node = node.child_by_field_name("type")?;
            }
            "parenthesized_expression" => {
                node = node.named_child(0)?;
            }
            _ => return None,
        }
    }
}

/// Single-file symbol table: imports, string constants and tracked
/// logger variables.
#[derive(Debug, Default)]
pub struct GoSymbols {
    /// Local package name -> import path.
    imports: HashMap<String, String>,
    /// Constant name -> resolved string value.
    consts: HashMap<String, String>,
    /// Variable name -> import path of its initializer's base package.
    vars: HashMap<String, String>,
}

impl SymbolResolver for GoSymbols {
    fn declaring_package(&self, receiver: &str) -> Option<&str> {
        self.imports
            .get(receiver)
            .or_else(|| self.vars.get(receiver))
            .map(String::as_str)
    }

    fn constant_value(&self, name: &str) -> Option<&str> {
        self.consts.get(name).map(String::as_str)
    }
}
