//! Per-language declaration extraction
//!
//! [`declarations`] looks at a single node and reports the names it declares.
//! The walker calls it for every node and decides scopes on its own.

use tree_sitter::Node;

use super::grammar::Grammar;
use super::parser::node_text;
use crate::models::{Language, SymbolKind, ValueHint};

/// A name bound by one syntax node
#[derive(Debug, Clone)]
pub struct Declaration<'t> {
    pub name: String,
    pub kind: SymbolKind,
    pub name_node: Node<'t>,
    /// Node whose extent becomes the declaration span
    pub span_node: Node<'t>,
    pub hint: ValueHint,
    /// Binds in the scope this node opens rather than the enclosing one
    pub inner: bool,
}

/// Names declared by `node`. `in_type_body` is true for members of a
/// struct/class/impl body.
pub fn declarations<'t>(
    grammar: &Grammar,
    node: Node<'t>,
    source: &[u8],
    in_type_body: bool,
) -> Vec<Declaration<'t>> {
    let mut cx = Extractor {
        grammar,
        source,
        in_type_body,
        out: Vec::new(),
    };
    match grammar.language {
        Language::Go => cx.go(node),
        Language::Rust => cx.rust(node),
        Language::Python => cx.python(node),
        Language::JavaScript | Language::TypeScript => cx.javascript(node),
        Language::Java => cx.java(node),
        Language::CSharp => cx.csharp(node),
        Language::PHP => cx.php(node),
        Language::Unknown => {}
    }
    cx.out
}

struct Extractor<'g, 's, 't> {
    grammar: &'g Grammar,
    source: &'s [u8],
    in_type_body: bool,
    out: Vec<Declaration<'t>>,
}

impl<'g, 's, 't> Extractor<'g, 's, 't> {
    fn text(&self, node: Node<'t>) -> &'s str {
        node_text(node, self.source)
    }

    fn callable(&self) -> SymbolKind {
        if self.in_type_body {
            SymbolKind::Method
        } else {
            SymbolKind::Function
        }
    }

    fn push(
        &mut self,
        name_node: Node<'t>,
        span_node: Node<'t>,
        kind: SymbolKind,
        hint: ValueHint,
        inner: bool,
    ) {
        let raw = self.text(name_node);
        let name = match self.grammar.language {
            Language::PHP => raw.strip_prefix('$').unwrap_or(raw),
            _ => raw,
        };
        if name.is_empty() || name == "_" {
            return;
        }
        self.out.push(Declaration {
            name: name.to_string(),
            kind,
            name_node,
            span_node,
            hint,
            inner,
        });
    }

    /// Declare the node's `field` child, spanning the whole node
    fn field(&mut self, node: Node<'t>, field: &str, kind: SymbolKind, hint: ValueHint) {
        if let Some(name) = node.child_by_field_name(field) {
            self.push(name, node, kind, hint, false);
        }
    }

    fn each_field(&mut self, node: Node<'t>, field: &str, kind: SymbolKind, hint: ValueHint) {
        let mut cursor = node.walk();
        let names: Vec<Node<'t>> = node.children_by_field_name(field, &mut cursor).collect();
        for name in names {
            self.push(name, node, kind, hint.clone(), false);
        }
    }

    fn bind_pattern(
        &mut self,
        pattern: Node<'t>,
        span_node: Node<'t>,
        kind: SymbolKind,
        hint: ValueHint,
        inner: bool,
    ) {
        let mut names = Vec::new();
        self.pattern_names(pattern, &mut names);
        for name in names {
            self.push(name, span_node, kind, hint.clone(), inner);
        }
    }

    /// Identifiers bound by a (possibly destructuring) pattern. Type names,
    /// object keys and default values are skipped.
    fn pattern_names(&self, node: Node<'t>, out: &mut Vec<Node<'t>>) {
        if self.grammar.is_identifier(node.kind()) {
            out.push(node);
            return;
        }
        if !self.grammar.is_pattern(node.kind()) {
            return;
        }
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return;
        }
        loop {
            let child = cursor.node();
            let skipped = matches!(cursor.field_name(), Some("type" | "key" | "right"));
            if child.is_named() && !skipped {
                self.pattern_names(child, out);
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    fn typed(&self, node: Option<Node<'t>>) -> ValueHint {
        node.map(|n| typed_hint(self.text(n)))
            .unwrap_or_default()
    }

    // Go

    fn go(&mut self, node: Node<'t>) {
        match node.kind() {
            "function_declaration" => self.field(node, "name", SymbolKind::Function, ValueHint::Unknown),
            "method_declaration" => self.field(node, "name", SymbolKind::Method, ValueHint::Unknown),
            "type_spec" => self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown),
            "field_declaration" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.each_field(node, "name", SymbolKind::StructField, hint);
            }
            "parameter_declaration" | "variadic_parameter_declaration" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.each_field(node, "name", SymbolKind::Variable, hint);
            }
            "short_var_declaration" => {
                let mut names = Vec::new();
                if let Some(left) = node.child_by_field_name("left") {
                    self.pattern_names(left, &mut names);
                }
                self.go_bindings(names, node.child_by_field_name("right"), node, ValueHint::Unknown);
            }
            "var_spec" | "const_spec" => {
                let mut cursor = node.walk();
                let names: Vec<Node<'t>> =
                    node.children_by_field_name("name", &mut cursor).collect();
                let type_hint = self.typed(node.child_by_field_name("type"));
                self.go_bindings(names, node.child_by_field_name("value"), node, type_hint);
            }
            "range_clause" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_pattern(left, node, SymbolKind::Variable, ValueHint::Unknown, false);
                }
            }
            _ => {}
        }
    }

    /// Pair names with values positionally; `a, err := f()` leaves both unknown
    fn go_bindings(
        &mut self,
        names: Vec<Node<'t>>,
        values: Option<Node<'t>>,
        span_node: Node<'t>,
        type_hint: ValueHint,
    ) {
        let values = values.map(list_items).unwrap_or_default();
        let paired = values.len() == names.len();
        for (idx, name) in names.into_iter().enumerate() {
            let value = if paired { values.get(idx).copied() } else { None };
            let kind = if value.is_some_and(|v| v.kind() == "func_literal") {
                SymbolKind::Function
            } else {
                SymbolKind::Variable
            };
            let hint = value
                .map(|v| go_value(v, self.source))
                .unwrap_or_default()
                .or(type_hint.clone());
            self.push(name, span_node, kind, hint, false);
        }
    }

    // Rust

    fn rust(&mut self, node: Node<'t>) {
        match node.kind() {
            "function_item" | "function_signature_item" => {
                let kind = self.callable();
                self.field(node, "name", kind, ValueHint::Unknown);
            }
            "struct_item" | "enum_item" | "union_item" => {
                self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown)
            }
            "field_declaration" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.field(node, "name", SymbolKind::StructField, hint);
            }
            "let_declaration" => {
                let value = node.child_by_field_name("value");
                let kind = if value.is_some_and(|v| v.kind() == "closure_expression") {
                    SymbolKind::Function
                } else {
                    SymbolKind::Variable
                };
                let hint = value
                    .map(|v| rust_value(v, self.source))
                    .unwrap_or_default()
                    .or(self.typed(node.child_by_field_name("type")));
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    self.bind_pattern(pattern, node, kind, hint, false);
                }
            }
            "const_item" | "static_item" => {
                let hint = node
                    .child_by_field_name("value")
                    .map(|v| rust_value(v, self.source))
                    .unwrap_or_default()
                    .or(self.typed(node.child_by_field_name("type")));
                self.field(node, "name", SymbolKind::Variable, hint);
            }
            "parameter" => {
                let hint = self.typed(node.child_by_field_name("type"));
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    self.bind_pattern(pattern, node, SymbolKind::Variable, hint, false);
                }
            }
            "closure_parameters" => {
                for child in named_children(node) {
                    if child.kind() != "parameter" {
                        self.bind_pattern(child, child, SymbolKind::Variable, ValueHint::Unknown, false);
                    }
                }
            }
            "for_expression" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    self.bind_pattern(pattern, pattern, SymbolKind::Variable, ValueHint::Unknown, true);
                }
            }
            "let_condition" => {
                if let Some(pattern) = node.child_by_field_name("pattern") {
                    self.bind_pattern(pattern, node, SymbolKind::Variable, ValueHint::Unknown, false);
                }
            }
            _ => {}
        }
    }

    // Python

    fn python(&mut self, node: Node<'t>) {
        match node.kind() {
            "function_definition" => {
                let kind = self.callable();
                self.field(node, "name", kind, ValueHint::Unknown);
            }
            "class_definition" => self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown),
            "assignment" => {
                let right = node.child_by_field_name("right");
                let kind = if self.in_type_body {
                    SymbolKind::StructField
                } else if right.is_some_and(|r| r.kind() == "lambda") {
                    SymbolKind::Function
                } else {
                    SymbolKind::Variable
                };
                let hint = right
                    .map(|r| python_value(r, self.source))
                    .unwrap_or_default()
                    .or(self.typed(node.child_by_field_name("type")));
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_pattern(left, node, kind, hint, false);
                }
            }
            "parameters" | "lambda_parameters" => {
                for param in named_children(node) {
                    self.python_parameter(param);
                }
            }
            "for_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_pattern(left, left, SymbolKind::Variable, ValueHint::Unknown, false);
                }
            }
            "named_expression" => self.field(node, "name", SymbolKind::Variable, ValueHint::Unknown),
            _ => {}
        }
    }

    fn python_parameter(&mut self, param: Node<'t>) {
        let hint = self.typed(param.child_by_field_name("type"));
        match param.kind() {
            "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                self.bind_pattern(param, param, SymbolKind::Variable, ValueHint::Unknown, false)
            }
            "typed_parameter" => {
                if let Some(name) = named_children(param)
                    .into_iter()
                    .find(|c| c.kind() != "type")
                {
                    self.bind_pattern(name, param, SymbolKind::Variable, hint, false);
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.child_by_field_name("name") {
                    self.push(name, param, SymbolKind::Variable, hint, false);
                }
            }
            _ => {}
        }
    }

    // JavaScript / TypeScript

    fn javascript(&mut self, node: Node<'t>) {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                let kind = self.callable();
                self.field(node, "name", kind, ValueHint::Unknown);
            }
            "class_declaration" | "abstract_class_declaration" | "class" => {
                self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown)
            }
            "method_definition" => self.field(node, "name", SymbolKind::Method, ValueHint::Unknown),
            "field_definition" => {
                let hint = node
                    .child_by_field_name("value")
                    .map(|v| js_value(v, self.source))
                    .unwrap_or_default();
                self.field(node, "property", SymbolKind::StructField, hint);
            }
            "public_field_definition" => {
                let hint = node
                    .child_by_field_name("value")
                    .map(|v| js_value(v, self.source))
                    .unwrap_or_default()
                    .or(self.typed(node.child_by_field_name("type")));
                self.field(node, "name", SymbolKind::StructField, hint);
            }
            "variable_declarator" => {
                let value = node.child_by_field_name("value");
                let kind = if value.is_some_and(|v| is_js_function(v.kind())) {
                    SymbolKind::Function
                } else {
                    SymbolKind::Variable
                };
                let hint = value
                    .map(|v| js_value(v, self.source))
                    .unwrap_or_default()
                    .or(self.typed(node.child_by_field_name("type")));
                let span = node
                    .parent()
                    .filter(|p| matches!(p.kind(), "lexical_declaration" | "variable_declaration"))
                    .unwrap_or(node);
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind_pattern(name, span, kind, hint, false);
                }
            }
            "formal_parameters" => {
                for param in named_children(node) {
                    match param.kind() {
                        "required_parameter" | "optional_parameter" => {
                            let hint = self.typed(param.child_by_field_name("type"));
                            if let Some(pattern) = param.child_by_field_name("pattern") {
                                self.bind_pattern(pattern, param, SymbolKind::Variable, hint, false);
                            }
                        }
                        _ => self.bind_pattern(param, param, SymbolKind::Variable, ValueHint::Unknown, false),
                    }
                }
            }
            "arrow_function" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    self.bind_pattern(param, param, SymbolKind::Variable, ValueHint::Unknown, true);
                }
            }
            "for_in_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_pattern(left, left, SymbolKind::Variable, ValueHint::Unknown, true);
                }
            }
            "catch_clause" => {
                if let Some(param) = node.child_by_field_name("parameter") {
                    self.bind_pattern(param, param, SymbolKind::Variable, ValueHint::Unknown, true);
                }
            }
            _ => {}
        }
    }

    // Java

    fn java(&mut self, node: Node<'t>) {
        match node.kind() {
            "class_declaration" | "record_declaration" | "enum_declaration"
            | "interface_declaration" => {
                self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown)
            }
            "method_declaration" | "constructor_declaration" => {
                self.field(node, "name", SymbolKind::Method, ValueHint::Unknown)
            }
            "field_declaration" => self.java_declarators(node, SymbolKind::StructField),
            "local_variable_declaration" => self.java_declarators(node, SymbolKind::Variable),
            "formal_parameter" | "catch_formal_parameter" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.field(node, "name", SymbolKind::Variable, hint);
            }
            "enhanced_for_statement" => {
                let hint = self.typed(node.child_by_field_name("type"));
                if let Some(name) = node.child_by_field_name("name") {
                    self.push(name, name, SymbolKind::Variable, hint, true);
                }
            }
            "lambda_expression" => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    let names = match params.kind() {
                        "identifier" => vec![params],
                        "inferred_parameters" => named_children(params)
                            .into_iter()
                            .filter(|c| c.kind() == "identifier")
                            .collect(),
                        _ => Vec::new(),
                    };
                    for name in names {
                        self.push(name, name, SymbolKind::Variable, ValueHint::Unknown, true);
                    }
                }
            }
            _ => {}
        }
    }

    fn java_declarators(&mut self, node: Node<'t>, kind: SymbolKind) {
        let type_hint = self.typed(node.child_by_field_name("type"));
        let mut cursor = node.walk();
        let declarators: Vec<Node<'t>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let hint = declarator
                .child_by_field_name("value")
                .map(|v| java_value(v, self.source))
                .unwrap_or_default()
                .or(type_hint.clone());
            self.push(name, node, kind, hint, false);
        }
    }

    // C#

    fn csharp(&mut self, node: Node<'t>) {
        match node.kind() {
            "class_declaration" | "struct_declaration" | "record_declaration"
            | "record_struct_declaration" | "interface_declaration" | "enum_declaration" => {
                self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown)
            }
            "method_declaration" | "constructor_declaration" => {
                self.field(node, "name", SymbolKind::Method, ValueHint::Unknown)
            }
            "local_function_statement" => {
                self.field(node, "name", SymbolKind::Function, ValueHint::Unknown)
            }
            "property_declaration" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.field(node, "name", SymbolKind::StructField, hint);
            }
            "variable_declaration" => self.csharp_variables(node),
            "parameter" | "catch_declaration" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.field(node, "name", SymbolKind::Variable, hint);
            }
            "foreach_statement" => {
                let hint = self.typed(node.child_by_field_name("type"));
                if let Some(left) = node.child_by_field_name("left")
                    && left.kind() == "identifier"
                {
                    self.push(left, left, SymbolKind::Variable, hint, true);
                }
            }
            _ => {}
        }
    }

    fn csharp_variables(&mut self, node: Node<'t>) {
        let (kind, span) = match node.parent() {
            Some(p) if matches!(p.kind(), "field_declaration" | "event_field_declaration") => {
                (SymbolKind::StructField, p)
            }
            Some(p) if p.kind() == "local_declaration_statement" => (SymbolKind::Variable, p),
            _ => (SymbolKind::Variable, node),
        };
        let type_hint = self.typed(node.child_by_field_name("type"));
        for declarator in named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let name = declarator.child_by_field_name("name").or_else(|| {
                named_children(declarator)
                    .into_iter()
                    .find(|c| c.kind() == "identifier")
            });
            let Some(name) = name else {
                continue;
            };
            let hint = csharp_initializer(declarator, name)
                .map(|v| csharp_value(v, self.source))
                .unwrap_or_default()
                .or(type_hint.clone());
            self.push(name, span, kind, hint, false);
        }
    }

    // PHP

    fn php(&mut self, node: Node<'t>) {
        match node.kind() {
            "function_definition" => self.field(node, "name", SymbolKind::Function, ValueHint::Unknown),
            "method_declaration" => self.field(node, "name", SymbolKind::Method, ValueHint::Unknown),
            "class_declaration" | "interface_declaration" | "trait_declaration"
            | "enum_declaration" => {
                self.field(node, "name", SymbolKind::Struct, ValueHint::Unknown)
            }
            "property_declaration" => {
                for element in named_children(node) {
                    if element.kind() != "property_element" {
                        continue;
                    }
                    if let Some(var) = named_children(element)
                        .into_iter()
                        .find(|c| c.kind() == "variable_name")
                    {
                        self.push(var, node, SymbolKind::StructField, ValueHint::Unknown, false);
                    }
                }
            }
            "simple_parameter" | "variadic_parameter" | "property_promotion_parameter" => {
                let hint = self.typed(node.child_by_field_name("type"));
                self.field(node, "name", SymbolKind::Variable, hint);
            }
            "assignment_expression" => {
                if let Some(left) = node.child_by_field_name("left")
                    && left.kind() == "variable_name"
                {
                    let hint = node
                        .child_by_field_name("right")
                        .map(|r| php_value(r, self.source))
                        .unwrap_or_default();
                    self.push(left, node, SymbolKind::Variable, hint, false);
                }
            }
            "foreach_statement" => {
                // First child is the iterated expression, the body comes last
                for child in named_children(node).into_iter().skip(1) {
                    match child.kind() {
                        "variable_name" => {
                            self.push(child, child, SymbolKind::Variable, ValueHint::Unknown, false)
                        }
                        "pair" | "by_ref" => {
                            for var in php_variables(child) {
                                self.push(var, var, SymbolKind::Variable, ValueHint::Unknown, false);
                            }
                        }
                        _ => {}
                    }
                }
            }
            "catch_clause" => self.field(node, "name", SymbolKind::Variable, ValueHint::Unknown),
            _ => {}
        }
    }
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Items of a comma list, or the node itself when it is not a list
fn list_items<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    if node.kind() == "expression_list" {
        named_children(node)
    } else {
        vec![node]
    }
}

fn php_variables<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut vars = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "variable_name" => vars.push(child),
            "by_ref" => vars.extend(php_variables(child)),
            _ => {}
        }
    }
    vars
}

fn csharp_initializer<'t>(declarator: Node<'t>, name: Node<'t>) -> Option<Node<'t>> {
    for child in named_children(declarator) {
        if child.id() == name.id() {
            continue;
        }
        match child.kind() {
            "equals_value_clause" => return named_children(child).into_iter().next(),
            "bracketed_argument_list" | "tuple_pattern" => continue,
            _ => return Some(child),
        }
    }
    None
}

fn is_js_function(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Reduce a type annotation to its base name: `&mut User` -> `User`,
/// `models.User` -> `User`, `List<User>` -> `List`
pub fn base_type_name(raw: &str) -> &str {
    let mut t = raw.trim().trim_start_matches(':').trim();
    loop {
        let stripped = t.trim_start_matches(['&', '*', '?']).trim_start();
        let stripped = stripped
            .strip_prefix("mut ")
            .or_else(|| stripped.strip_prefix("const "))
            .or_else(|| stripped.strip_prefix("dyn "))
            .unwrap_or(stripped)
            .trim_start();
        if stripped == t {
            break;
        }
        t = stripped;
    }
    let end = t
        .find(|c: char| matches!(c, '<' | '[' | '(' | '{' | '?' | '|') || c.is_whitespace())
        .unwrap_or(t.len());
    let base = &t[..end];
    base.rsplit(['.', ':', '\\']).next().unwrap_or(base)
}

fn typed_hint(raw: &str) -> ValueHint {
    match base_type_name(raw) {
        "" => ValueHint::Unknown,
        name => ValueHint::Typed(name.to_string()),
    }
}

fn construct(node: Option<Node<'_>>, source: &[u8]) -> ValueHint {
    match node.map(|n| base_type_name(node_text(n, source))) {
        Some(name) if !name.is_empty() => ValueHint::Construct(name.to_string()),
        _ => ValueHint::Unknown,
    }
}

fn new_of(node: Option<Node<'_>>, source: &[u8]) -> ValueHint {
    match node.map(|n| base_type_name(node_text(n, source))) {
        Some(name) if !name.is_empty() => ValueHint::New(name.to_string()),
        _ => ValueHint::Unknown,
    }
}

fn go_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "composite_literal" => ValueHint::CompositeLiteral,
        "unary_expression" => match node.child_by_field_name("operand") {
            Some(operand) if operand.kind() == "composite_literal" => ValueHint::CompositeLiteral,
            _ => ValueHint::Unknown,
        },
        "call_expression" => match node.child_by_field_name("function") {
            Some(f) if f.kind() == "identifier" => construct(Some(f), source),
            _ => ValueHint::Unknown,
        },
        "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
        | "interpreted_string_literal" | "raw_string_literal" | "true" | "false" | "nil"
        | "iota" => ValueHint::Literal,
        _ => ValueHint::Unknown,
    }
}

fn rust_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "struct_expression" => ValueHint::CompositeLiteral,
        "call_expression" => match node.child_by_field_name("function") {
            Some(f) if f.kind() == "identifier" => construct(Some(f), source),
            Some(f) if f.kind() == "scoped_identifier" => {
                construct(f.child_by_field_name("path"), source)
            }
            _ => ValueHint::Unknown,
        },
        "reference_expression" => node
            .child_by_field_name("value")
            .map(|v| rust_value(v, source))
            .unwrap_or_default(),
        "integer_literal" | "float_literal" | "string_literal" | "raw_string_literal"
        | "char_literal" | "boolean_literal" => ValueHint::Literal,
        _ => ValueHint::Unknown,
    }
}

fn python_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "dictionary" => ValueHint::CompositeLiteral,
        "call" => construct(node.child_by_field_name("function"), source),
        "integer" | "float" | "string" | "concatenated_string" | "true" | "false" | "none" => {
            ValueHint::Literal
        }
        _ => ValueHint::Unknown,
    }
}

fn js_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "object" => ValueHint::CompositeLiteral,
        "new_expression" => new_of(node.child_by_field_name("constructor"), source),
        "call_expression" => match node.child_by_field_name("function") {
            Some(f) if f.kind() == "identifier" => construct(Some(f), source),
            _ => ValueHint::Unknown,
        },
        "number" | "string" | "template_string" | "true" | "false" | "null" | "undefined" => {
            ValueHint::Literal
        }
        _ => ValueHint::Unknown,
    }
}

fn java_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "object_creation_expression" => new_of(node.child_by_field_name("type"), source),
        "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
        | "binary_integer_literal" | "decimal_floating_point_literal"
        | "hex_floating_point_literal" | "string_literal" | "text_block" | "character_literal"
        | "true" | "false" | "null_literal" => ValueHint::Literal,
        _ => ValueHint::Unknown,
    }
}

fn csharp_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "object_creation_expression" => new_of(node.child_by_field_name("type"), source),
        "implicit_object_creation_expression" | "anonymous_object_creation_expression" => {
            ValueHint::CompositeLiteral
        }
        "integer_literal" | "real_literal" | "string_literal" | "verbatim_string_literal"
        | "raw_string_literal" | "character_literal" | "boolean_literal" | "null_literal"
        | "interpolated_string_expression" => ValueHint::Literal,
        _ => ValueHint::Unknown,
    }
}

fn php_value(node: Node<'_>, source: &[u8]) -> ValueHint {
    match node.kind() {
        "object_creation_expression" => new_of(
            named_children(node)
                .into_iter()
                .find(|c| matches!(c.kind(), "name" | "qualified_name")),
            source,
        ),
        "array_creation_expression" => ValueHint::CompositeLiteral,
        "integer" | "float" | "string" | "encapsed_string" | "boolean" | "null" | "heredoc"
        | "nowdoc" => ValueHint::Literal,
        _ => ValueHint::Unknown,
    }
}
