//! Scope-tracking tree walk
//!
//! Visits named nodes in pre-order, asks the language layer what each node
//! declares and opens scopes for the node kinds the grammar lists.

use std::collections::{HashMap, HashSet};

use tracing::trace;
use tree_sitter::Node;

use crate::infra::ast::{Grammar, declarations, node_span, statement_of};
use crate::infra::text;
use crate::models::{
    Scope, ScopeId, ScopeKind, Span, Symbol, SymbolKind, SymbolTable, ValueHint, ValueShape,
};

/// Where new declarations land while descending
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub scope: ScopeId,
    /// Inside a struct/class/impl body
    pub type_body: bool,
}

impl Frame {
    pub fn file() -> Self {
        Self {
            scope: 0,
            type_body: false,
        }
    }
}

pub(crate) struct Walker<'g, 's> {
    grammar: &'g Grammar,
    source: &'s [u8],
    /// Id given to the first scope this walker opens
    base: ScopeId,
    scopes: Vec<Scope>,
    /// Body opener of each scope this walker opened, when it has one
    openers: HashMap<ScopeId, Span>,
    symbols: Vec<Symbol>,
}

impl<'g, 's> Walker<'g, 's> {
    pub fn new(grammar: &'g Grammar, source: &'s [u8], base: ScopeId) -> Self {
        Self {
            grammar,
            source,
            base,
            scopes: Vec::new(),
            openers: HashMap::new(),
            symbols: Vec::new(),
        }
    }

    /// Walk a whole file. The file scope is id 0.
    pub fn walk_file(grammar: &'g Grammar, source: &'s [u8], root: Node<'_>) -> Self {
        let mut walker = Self::new(grammar, source, 0);
        walker.scopes.push(Scope {
            id: 0,
            parent: None,
            kind: ScopeKind::File,
            span: file_span(source),
        });
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            walker.visit(child, Frame::file());
        }
        walker
    }

    pub fn visit(&mut self, node: Node<'_>, frame: Frame) {
        let (inner, outer): (Vec<_>, Vec<_>) =
            declarations(self.grammar, node, self.source, frame.type_body)
                .into_iter()
                .partition(|d| d.inner);

        for decl in outer {
            self.push_symbol(decl, frame.scope);
        }

        let frame = match self.grammar.scope_kind(node.kind()) {
            Some(kind) => Frame {
                scope: self.open_scope(node, kind, frame.scope),
                type_body: self.grammar.is_type_body(node.kind()),
            },
            None => frame,
        };

        for decl in inner {
            self.push_symbol(decl, frame.scope);
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, frame);
        }
    }

    pub fn into_parts(self) -> (Vec<Scope>, Vec<Symbol>) {
        (self.scopes, self.symbols)
    }

    fn open_scope(&mut self, node: Node<'_>, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = self.base + self.scopes.len() as ScopeId;
        trace!(id, kind = ?kind, node = node.kind(), "open scope");
        self.scopes.push(Scope {
            id,
            parent: Some(parent),
            kind,
            span: node_span(node),
        });
        if !self.grammar.is_type_body(node.kind())
            && let Some(open) = body_opener(self.grammar, node)
        {
            self.openers.insert(id, open);
        }
        id
    }

    fn push_symbol(&mut self, decl: crate::infra::ast::Declaration<'_>, scope: ScopeId) {
        let statement = node_span(outer_statement(self.grammar, decl.span_node));
        trace!(name = %decl.name, kind = %decl.kind, scope, "declare");
        let body_open = self.binding_body(scope, statement);
        self.symbols.push(
            Symbol::new(decl.name, decl.kind, node_span(decl.span_node))
                .with_name_span(node_span(decl.name_node))
                .with_statement(statement)
                .with_body_open(body_open)
                .with_scope(scope)
                .with_hint(decl.hint),
        );
    }

    /// Body opener of `scope` when the declaring statement is the construct
    /// that opens it: a parameter or loop variable rather than a local
    fn binding_body(&self, scope: ScopeId, statement: Span) -> Option<Span> {
        let open = self.openers.get(&scope)?;
        let span = self.scopes.get(scope.checked_sub(self.base)? as usize)?.span;
        (statement.start_byte <= span.start_byte && span.end_byte <= statement.end_byte)
            .then_some(*open)
    }
}

/// Nearest scope-opening ancestor of `node`
fn scope_owner<'t>(grammar: &Grammar, node: Node<'t>) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if grammar.scope_kind(parent.kind()).is_some() {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// Statement a log line can follow. A member of a struct, class or impl
/// body cannot host one, so the whole type declaration is used instead.
fn outer_statement<'t>(grammar: &Grammar, node: Node<'t>) -> Node<'t> {
    let mut statement = statement_of(grammar, node);
    while let Some(owner) = scope_owner(grammar, statement)
        && grammar.is_type_body(owner.kind())
    {
        statement = statement_of(grammar, owner);
    }
    statement
}

/// `{` of a brace body, or the `:` before an indented one. Expression
/// bodies have none.
fn body_opener(grammar: &Grammar, node: Node<'_>) -> Option<Span> {
    let body = node
        .child_by_field_name("body")
        .or_else(|| node.child_by_field_name("consequence"))
        .filter(|b| grammar.is_statement_container(b.kind()))?;
    let open = match body.child(0) {
        Some(brace) if brace.kind() == "{" => brace,
        _ => body.prev_sibling()?,
    };
    Some(node_span(open))
}

/// Span covering the whole buffer
pub(crate) fn file_span(source: &[u8]) -> Span {
    Span::new(
        Default::default(),
        text::position_at(source, source.len()),
        0,
        source.len(),
    )
}

/// Scope-opening ancestor nearest to `node`, used to rebuild the frame a
/// full walk would have reached it with
pub(crate) fn enclosing_type_body(grammar: &Grammar, node: Node<'_>) -> bool {
    scope_owner(grammar, node).is_some_and(|owner| grammar.is_type_body(owner.kind()))
}

/// Drop everything declared at or after the first syntax error. A MISSING
/// node is zero-width, so a declaration ending exactly on it is incomplete.
pub(crate) fn restrict_to_prefix(table: &mut SymbolTable, error: Node<'_>) {
    let at = error.start_byte();
    let missing = error.is_missing();
    table.scopes.retain(|s| s.id == 0 || s.span.start_byte < at);
    table.symbols.retain(|s| {
        let end = s.declaration_span.end_byte;
        end < at || (end == at && !missing)
    });
}

/// Whole-table pass run after every full or incremental index
pub(crate) fn finalize(table: &mut SymbolTable, source: &str) {
    table.symbols.sort_by_key(|s| s.name_span.start_byte);

    let structs: HashSet<String> = table
        .struct_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let language = table.language;
    for symbol in &mut table.symbols {
        match symbol.body_open {
            Some(open) if text::ends_line(source, open.end, language) => {
                symbol.anchor_line = open.end.line;
                symbol.indent = text::indentation_from(source, open.end.line + 1);
            }
            _ => {
                symbol.anchor_line = symbol.statement.last_line();
                symbol.indent = text::indentation_of(source, symbol.statement.start.line);
            }
        }
        symbol.shape = infer_shape(symbol, &structs);
    }
}

fn infer_shape(symbol: &Symbol, structs: &HashSet<String>) -> ValueShape {
    if !matches!(symbol.kind, SymbolKind::Variable | SymbolKind::StructField) {
        return ValueShape::Scalar;
    }
    match &symbol.hint {
        ValueHint::CompositeLiteral | ValueHint::New(_) => ValueShape::Composite,
        ValueHint::Construct(t) | ValueHint::Typed(t) if structs.contains(t) => {
            ValueShape::Composite
        }
        _ => ValueShape::Scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ast::create_parser;
    use crate::models::{Language, Position};

    fn walk(language: Language, code: &str) -> SymbolTable {
        let grammar = Grammar::for_language(language).unwrap();
        let tree = create_parser(grammar).unwrap().parse(code, None).unwrap();
        let (scopes, symbols) =
            Walker::walk_file(grammar, code.as_bytes(), tree.root_node()).into_parts();
        let mut table = SymbolTable::empty(language, file_span(code.as_bytes()));
        table.scopes = scopes;
        table.symbols = symbols;
        finalize(&mut table, code);
        table
    }

    #[test]
    fn test_go_scopes_are_preorder() {
        let code = "package main\n\nfunc main() {\n\tx := 5\n\tif x > 1 {\n\t\ty := 2\n\t}\n}\n";
        let table = walk(Language::Go, code);
        assert!(table.is_consistent());
        assert_eq!(table.scopes[0].kind, ScopeKind::File);
        assert_eq!(table.scopes[1].kind, ScopeKind::Function);

        let x = table.symbols_named("x").next().unwrap();
        let y = table.symbols_named("y").next().unwrap();
        assert!(table.scope_depth(y.scope_id) > table.scope_depth(x.scope_id));
        assert_eq!(x.indent, "\t");
        assert_eq!(y.indent, "\t\t");
    }

    #[test]
    fn test_statement_span_for_nested_declaration() {
        let code = "package main\n\nfunc main() {\n\tfor i := 0; i < 3; i++ {\n\t}\n}\n";
        let table = walk(Language::Go, code);
        let i = table.symbols_named("i").next().unwrap();
        assert_eq!(i.statement.start, Position::new(3, 1));
        assert_eq!(i.statement.last_line(), 4);
    }

    #[test]
    fn test_members_take_type_statement() {
        let code = "package main\n\ntype User struct {\n\tName string\n}\n";
        let table = walk(Language::Go, code);
        let user = table.symbols_named("User").next().unwrap();
        let name = table.symbols_named("Name").next().unwrap();
        assert_eq!(name.statement, user.statement);
        assert_eq!(name.anchor_line, 4);
        assert_eq!(name.indent, "");

        let code = "struct User {\n    name: String,\n}\n\nimpl User {\n    fn greet(&self) {}\n}\n";
        let table = walk(Language::Rust, code);
        let greet = table.symbols_named("greet").next().unwrap();
        assert_eq!(greet.statement.start, Position::new(4, 0));
        assert_eq!(greet.anchor_line, 6);
        assert_eq!(table.symbols_named("name").next().unwrap().anchor_line, 2);
    }

    #[test]
    fn test_parameters_anchor_on_body_opener() {
        let code = "package main\n\nfunc greet(n int) {\n\n\tw := n\n}\n";
        let table = walk(Language::Go, code);
        let n = table.symbols_named("n").next().unwrap();
        let w = table.symbols_named("w").next().unwrap();
        assert_eq!(n.body_open.map(|open| open.start), Some(Position::new(2, 18)));
        assert_eq!(n.anchor_line, 2);
        assert_eq!(n.indent, "\t");
        assert!(w.body_open.is_none());
        assert_eq!(w.anchor_line, 4);

        let code = "class Cart:\n    def add(self, item):\n        return item\n";
        let table = walk(Language::Python, code);
        let item = table.symbols_named("item").next().unwrap();
        assert_eq!(item.anchor_line, 1);
        assert_eq!(item.indent, "        ");
    }

    #[test]
    fn test_one_line_body_keeps_statement_anchor() {
        let code = "function id(x) { return x; }\n";
        let table = walk(Language::JavaScript, code);
        let x = table.symbols_named("x").next().unwrap();
        assert!(x.body_open.is_some());
        assert_eq!(x.anchor_line, 0);
        assert_eq!(x.indent, "");
    }

    #[test]
    fn test_symbols_sorted_by_name() {
        let code = "def f(a, b):\n    c = a\n    return c\n";
        let table = walk(Language::Python, code);
        let names: Vec<_> = table.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["f", "a", "b", "c"]);
    }

    #[test]
    fn test_methods_inside_impl() {
        let code = "struct User { name: String }\n\nimpl User {\n    fn greet(&self) {}\n}\n\nfn main() {}\n";
        let table = walk(Language::Rust, code);
        let kind = |name: &str| table.symbols_named(name).next().unwrap().kind;
        assert_eq!(kind("User"), SymbolKind::Struct);
        assert_eq!(kind("name"), SymbolKind::StructField);
        assert_eq!(kind("greet"), SymbolKind::Method);
        assert_eq!(kind("main"), SymbolKind::Function);
    }

    #[test]
    fn test_shape_from_struct_names() {
        let code = "package main\n\ntype User struct {\n\tName string\n}\n\nfunc main() {\n\tvar u User\n\tvar n int\n\tp := User{}\n}\n";
        let table = walk(Language::Go, code);
        let shape = |name: &str| table.symbols_named(name).next().unwrap().shape;
        assert_eq!(shape("u"), ValueShape::Composite);
        assert_eq!(shape("p"), ValueShape::Composite);
        assert_eq!(shape("n"), ValueShape::Scalar);
        assert_eq!(shape("User"), ValueShape::Scalar);
    }

    #[test]
    fn test_restrict_keeps_root() {
        let code = "package main\n\nfunc main() {\n\tx := 1\n}\n";
        let grammar = Grammar::for_language(Language::Go).unwrap();
        let tree = create_parser(grammar).unwrap().parse(code, None).unwrap();
        let mut table = walk(Language::Go, code);
        restrict_to_prefix(&mut table, tree.root_node());
        assert_eq!(table.scopes.len(), 1);
        assert!(table.symbols.is_empty());
        assert!(table.is_consistent());
    }
}
