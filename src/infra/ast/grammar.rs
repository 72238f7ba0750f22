//! Per-language grammar tables
//!
//! Node type names come from each grammar's `src/node-types.json`. Kinds a
//! grammar version does not produce simply never match.

use crate::models::{Language, ScopeKind};

/// What the indexer needs to know about one tree-sitter grammar
#[derive(Debug)]
pub struct Grammar {
    pub language: Language,
    /// Nodes that open a `Function` scope
    pub function_scopes: &'static [&'static str],
    /// Nodes that open a `Block` scope
    pub block_scopes: &'static [&'static str],
    /// Scope nodes whose members are methods and fields
    pub type_bodies: &'static [&'static str],
    /// Nodes whose direct children are statements
    pub statement_containers: &'static [&'static str],
    /// Leaf nodes that bind a name inside a pattern
    pub identifiers: &'static [&'static str],
    /// Destructuring nodes to descend into when collecting bound names
    pub patterns: &'static [&'static str],
    /// Query capturing import paths as `@path`
    pub import_query: Option<&'static str>,
}

impl Grammar {
    pub fn for_language(language: Language) -> Option<&'static Grammar> {
        match language {
            Language::Go => Some(&GO),
            Language::Rust => Some(&RUST),
            Language::Python => Some(&PYTHON),
            Language::JavaScript => Some(&JAVASCRIPT),
            Language::TypeScript => Some(&TYPESCRIPT),
            Language::Java => Some(&JAVA),
            Language::CSharp => Some(&CSHARP),
            Language::PHP => Some(&PHP),
            Language::Unknown => None,
        }
    }

    pub fn ts_language(&self) -> tree_sitter::Language {
        match self.language {
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            // TSX is a superset and handles both .ts and .tsx
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::PHP | Language::Unknown => tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    pub fn scope_kind(&self, kind: &str) -> Option<ScopeKind> {
        if self.function_scopes.contains(&kind) {
            Some(ScopeKind::Function)
        } else if self.block_scopes.contains(&kind) {
            Some(ScopeKind::Block)
        } else {
            None
        }
    }

    pub fn is_type_body(&self, kind: &str) -> bool {
        self.type_bodies.contains(&kind)
    }

    pub fn is_statement_container(&self, kind: &str) -> bool {
        self.statement_containers.contains(&kind)
    }

    pub fn is_identifier(&self, kind: &str) -> bool {
        self.identifiers.contains(&kind)
    }

    pub fn is_pattern(&self, kind: &str) -> bool {
        self.patterns.contains(&kind)
    }
}

/// Languages with a grammar
pub fn supported_languages() -> &'static [Language] {
    &[
        Language::Go,
        Language::Rust,
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::CSharp,
        Language::PHP,
    ]
}

pub fn is_supported(language: Language) -> bool {
    Grammar::for_language(language).is_some()
}

// Go (tree-sitter-go)
static GO: Grammar = Grammar {
    language: Language::Go,
    function_scopes: &["function_declaration", "method_declaration", "func_literal"],
    block_scopes: &[
        "block",
        "for_statement",
        "if_statement",
        "expression_switch_statement",
        "type_switch_statement",
        "select_statement",
        "struct_type",
    ],
    type_bodies: &["struct_type"],
    statement_containers: &[
        "source_file",
        "block",
        "statement_list",
        "field_declaration_list",
        "expression_case",
        "default_case",
        "type_case",
        "communication_case",
    ],
    identifiers: &["identifier"],
    patterns: &["expression_list"],
    import_query: Some("(import_spec path: (_) @path)"),
};

// Rust (tree-sitter-rust)
static RUST: Grammar = Grammar {
    language: Language::Rust,
    function_scopes: &["function_item", "closure_expression"],
    block_scopes: &[
        "block",
        "for_expression",
        "struct_item",
        "enum_item",
        "union_item",
        "impl_item",
        "trait_item",
        "mod_item",
    ],
    type_bodies: &["struct_item", "enum_item", "union_item", "impl_item", "trait_item"],
    statement_containers: &[
        "source_file",
        "block",
        "declaration_list",
        "field_declaration_list",
    ],
    identifiers: &["identifier", "shorthand_field_identifier"],
    patterns: &[
        "tuple_pattern",
        "tuple_struct_pattern",
        "struct_pattern",
        "field_pattern",
        "ref_pattern",
        "mut_pattern",
        "reference_pattern",
        "slice_pattern",
        "captured_pattern",
    ],
    import_query: None,
};

// Python (tree-sitter-python)
static PYTHON: Grammar = Grammar {
    language: Language::Python,
    function_scopes: &["function_definition", "lambda"],
    block_scopes: &[
        "class_definition",
        "list_comprehension",
        "dictionary_comprehension",
        "set_comprehension",
        "generator_expression",
    ],
    type_bodies: &["class_definition"],
    statement_containers: &["module", "block"],
    identifiers: &["identifier"],
    patterns: &[
        "pattern_list",
        "tuple_pattern",
        "list_pattern",
        "list_splat_pattern",
        "dictionary_splat_pattern",
    ],
    import_query: None,
};

// JavaScript (tree-sitter-javascript)
static JAVASCRIPT: Grammar = Grammar {
    language: Language::JavaScript,
    function_scopes: &[
        "function_declaration",
        "generator_function_declaration",
        "function_expression",
        "function",
        "generator_function",
        "arrow_function",
        "method_definition",
    ],
    block_scopes: &[
        "statement_block",
        "class_declaration",
        "class",
        "for_statement",
        "for_in_statement",
        "catch_clause",
    ],
    type_bodies: &["class_declaration", "class"],
    statement_containers: &[
        "program",
        "statement_block",
        "class_body",
        "switch_case",
        "switch_default",
    ],
    identifiers: &["identifier", "shorthand_property_identifier_pattern"],
    patterns: &[
        "object_pattern",
        "array_pattern",
        "pair_pattern",
        "assignment_pattern",
        "object_assignment_pattern",
        "rest_pattern",
    ],
    import_query: None,
};

// TypeScript (tree-sitter-typescript, TSX dialect)
static TYPESCRIPT: Grammar = Grammar {
    language: Language::TypeScript,
    function_scopes: &[
        "function_declaration",
        "generator_function_declaration",
        "function_expression",
        "function",
        "generator_function",
        "arrow_function",
        "method_definition",
    ],
    block_scopes: &[
        "statement_block",
        "class_declaration",
        "abstract_class_declaration",
        "class",
        "for_statement",
        "for_in_statement",
        "catch_clause",
    ],
    type_bodies: &["class_declaration", "abstract_class_declaration", "class"],
    statement_containers: &[
        "program",
        "statement_block",
        "class_body",
        "switch_case",
        "switch_default",
    ],
    identifiers: &["identifier", "shorthand_property_identifier_pattern"],
    patterns: &[
        "object_pattern",
        "array_pattern",
        "pair_pattern",
        "assignment_pattern",
        "object_assignment_pattern",
        "rest_pattern",
    ],
    import_query: None,
};

// Java (tree-sitter-java)
static JAVA: Grammar = Grammar {
    language: Language::Java,
    function_scopes: &["method_declaration", "constructor_declaration", "lambda_expression"],
    block_scopes: &[
        "block",
        "class_declaration",
        "record_declaration",
        "enum_declaration",
        "interface_declaration",
        "for_statement",
        "enhanced_for_statement",
        "catch_clause",
    ],
    type_bodies: &[
        "class_declaration",
        "record_declaration",
        "enum_declaration",
        "interface_declaration",
    ],
    statement_containers: &[
        "program",
        "block",
        "class_body",
        "constructor_body",
        "interface_body",
        "enum_body_declarations",
        "switch_block_statement_group",
    ],
    identifiers: &["identifier"],
    patterns: &[],
    import_query: None,
};

// C# (tree-sitter-c-sharp)
static CSHARP: Grammar = Grammar {
    language: Language::CSharp,
    function_scopes: &[
        "method_declaration",
        "constructor_declaration",
        "local_function_statement",
        "lambda_expression",
        "anonymous_method_expression",
    ],
    block_scopes: &[
        "block",
        "class_declaration",
        "struct_declaration",
        "record_declaration",
        "interface_declaration",
        "for_statement",
        "foreach_statement",
        "catch_clause",
        "using_statement",
    ],
    type_bodies: &[
        "class_declaration",
        "struct_declaration",
        "record_declaration",
        "interface_declaration",
    ],
    statement_containers: &[
        "compilation_unit",
        "block",
        "declaration_list",
        "switch_section",
        "file_scoped_namespace_declaration",
    ],
    identifiers: &["identifier"],
    patterns: &[],
    import_query: None,
};

// PHP (tree-sitter-php, PHP-only dialect)
static PHP: Grammar = Grammar {
    language: Language::PHP,
    function_scopes: &[
        "function_definition",
        "method_declaration",
        "anonymous_function",
        "anonymous_function_creation_expression",
        "arrow_function",
    ],
    block_scopes: &[
        "class_declaration",
        "interface_declaration",
        "trait_declaration",
        "enum_declaration",
    ],
    type_bodies: &[
        "class_declaration",
        "interface_declaration",
        "trait_declaration",
        "enum_declaration",
    ],
    statement_containers: &[
        "program",
        "compound_statement",
        "declaration_list",
        "case_statement",
        "default_statement",
    ],
    identifiers: &["variable_name"],
    patterns: &[],
    import_query: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_languages_have_tables() {
        for lang in supported_languages() {
            let grammar = Grammar::for_language(*lang).unwrap();
            assert_eq!(grammar.language, *lang);
            assert!(!grammar.function_scopes.is_empty(), "{:?}", lang);
            assert!(!grammar.statement_containers.is_empty(), "{:?}", lang);
        }
        assert!(!is_supported(Language::Unknown));
    }

    #[test]
    fn test_scope_kind() {
        let go = Grammar::for_language(Language::Go).unwrap();
        assert_eq!(go.scope_kind("func_literal"), Some(ScopeKind::Function));
        assert_eq!(go.scope_kind("block"), Some(ScopeKind::Block));
        assert_eq!(go.scope_kind("short_var_declaration"), None);
    }

    #[test]
    fn test_python_blocks_do_not_open_scopes() {
        let py = Grammar::for_language(Language::Python).unwrap();
        assert_eq!(py.scope_kind("block"), None);
        assert!(py.is_statement_container("block"));
        assert!(py.is_type_body("class_definition"));
    }

    #[test]
    fn test_only_go_collects_imports() {
        for lang in supported_languages() {
            let grammar = Grammar::for_language(*lang).unwrap();
            assert_eq!(grammar.import_query.is_some(), *lang == Language::Go);
        }
    }

    #[test]
    fn test_grammars_load() {
        for lang in supported_languages() {
            let grammar = Grammar::for_language(*lang).unwrap();
            let mut parser = tree_sitter::Parser::new();
            assert!(parser.set_language(&grammar.ts_language()).is_ok(), "{:?}", lang);
        }
    }
}
