//! Tree-sitter plumbing shared by the indexer

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use super::grammar::Grammar;
use crate::error::IndexError;
use crate::models::{Position, Span};

pub fn create_parser(grammar: &Grammar) -> Result<Parser, IndexError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.ts_language())
        .map_err(|e| IndexError::Grammar {
            language: grammar.language,
            message: e.to_string(),
        })?;
    Ok(parser)
}

/// Compile the grammar's import query, if it has one
pub fn import_query(grammar: &Grammar) -> Result<Option<Query>, IndexError> {
    let Some(source) = grammar.import_query else {
        return Ok(None);
    };
    Query::new(&grammar.ts_language(), source)
        .map(Some)
        .map_err(|e| IndexError::Query {
            language: grammar.language,
            message: e.to_string(),
        })
}

/// Import paths captured as `@path`, with quotes stripped. Aliased, blank
/// and dot imports are skipped: they do not bind the package's own name.
pub fn collect_imports(query: &Query, root: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut cursor = QueryCursor::new();
    let mut imports = Vec::new();
    let mut matches = cursor.matches(query, root, source);
    while let Some(query_match) = matches.next() {
        for capture in query_match.captures {
            let aliased = capture
                .node
                .parent()
                .and_then(|spec| spec.child_by_field_name("name"))
                .is_some();
            if aliased {
                continue;
            }
            let path = node_text(capture.node, source).trim_matches(|c| c == '"' || c == '`');
            if !path.is_empty() && !imports.iter().any(|i| i == path) {
                imports.push(path.to_string());
            }
        }
    }
    imports
}

pub fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

pub fn node_span(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        Position::new(start.row as u32, start.column as u32),
        Position::new(end.row as u32, end.column as u32),
        node.start_byte(),
        node.end_byte(),
    )
}

/// First ERROR or MISSING node in document order
pub fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// Climb to the outermost ancestor that still sits directly inside a
/// statement container
pub fn statement_of<'t>(grammar: &Grammar, node: Node<'t>) -> Node<'t> {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if grammar.is_statement_container(parent.kind()) {
            break;
        }
        current = parent;
    }
    current
}

/// Node spanning exactly `start..end` that satisfies `accept`
pub fn node_at<'t>(
    root: Node<'t>,
    start: usize,
    end: usize,
    accept: impl Fn(&Node<'t>) -> bool,
) -> Option<Node<'t>> {
    let mut node = root.descendant_for_byte_range(start, end)?;
    loop {
        if node.start_byte() == start && node.end_byte() == end && accept(&node) {
            return Some(node);
        }
        if node.start_byte() < start || node.end_byte() > end {
            return None;
        }
        node = node.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn parse(language: Language, code: &str) -> tree_sitter::Tree {
        let grammar = Grammar::for_language(language).unwrap();
        create_parser(grammar).unwrap().parse(code, None).unwrap()
    }

    #[test]
    fn test_first_error_none_for_valid_code() {
        let tree = parse(Language::Go, "package main\n\nfunc main() {}\n");
        assert!(first_error(tree.root_node()).is_none());
    }

    #[test]
    fn test_first_error_found() {
        let tree = parse(Language::Go, "package main\n\nfunc main() {\n\tx := \n");
        let err = first_error(tree.root_node()).unwrap();
        assert!(err.start_position().row >= 2);
    }

    #[test]
    fn test_collect_go_imports() {
        let code = "package main\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n)\n";
        let grammar = Grammar::for_language(Language::Go).unwrap();
        let tree = parse(Language::Go, code);
        let query = import_query(grammar).unwrap().unwrap();
        let imports = collect_imports(&query, tree.root_node(), code.as_bytes());
        assert_eq!(imports, vec!["fmt".to_string()]);
    }

    #[test]
    fn test_collect_go_imports_skips_aliases() {
        let grammar = Grammar::for_language(Language::Go).unwrap();
        let query = import_query(grammar).unwrap().unwrap();
        for code in [
            "package main\n\nimport f \"fmt\"\n",
            "package main\n\nimport _ \"fmt\"\n",
            "package main\n\nimport . \"fmt\"\n",
        ] {
            let tree = parse(Language::Go, code);
            assert!(collect_imports(&query, tree.root_node(), code.as_bytes()).is_empty());
        }
    }

    #[test]
    fn test_node_at_finds_block() {
        let code = "package main\n\nfunc main() {\n\tx := 1\n}\n";
        let tree = parse(Language::Go, code);
        let start = code.find('{').unwrap();
        let end = code.rfind('}').unwrap() + 1;
        let block = node_at(tree.root_node(), start, end, |n| n.kind() == "block").unwrap();
        assert_eq!(block.kind(), "block");
        assert!(node_at(tree.root_node(), start, end, |n| n.kind() == "func_literal").is_none());
    }

    #[test]
    fn test_node_span() {
        let code = "package main\n\nvar x = 1\n";
        let tree = parse(Language::Go, code);
        let span = node_span(tree.root_node());
        assert_eq!(span.start, Position::new(0, 0));
        assert!(span.end_byte >= code.trim_end().len());
    }
}
