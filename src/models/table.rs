//! Scope tree and the per-buffer symbol table

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::span::{Position, Span};
use super::symbol::{Language, ScopeId, Symbol, SymbolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    File,
    Function,
    Block,
}

/// A lexical region. Scope ids are their index in the table, assigned in
/// pre-order so a parent always precedes its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: ScopeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub span: Span,
}

/// Everything the indexer learned about one buffer version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub language: Language,
    pub scopes: Vec<Scope>,
    /// In declaration order
    pub symbols: Vec<Symbol>,
    /// Set when the buffer failed to parse and only a prefix was indexed
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<Position>,
    /// Import paths the buffer already declares
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(skip)]
    pub source_hash: u64,
}

impl SymbolTable {
    /// A table holding only the file scope
    pub fn empty(language: Language, file_span: Span) -> Self {
        Self {
            language,
            scopes: vec![Scope {
                id: 0,
                parent: None,
                kind: ScopeKind::File,
                span: file_span,
            }],
            symbols: Vec::new(),
            partial: false,
            parse_error: None,
            imports: Vec::new(),
            source_hash: 0,
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id as usize)
    }

    /// Number of ancestors between the scope and the file scope
    pub fn scope_depth(&self, id: ScopeId) -> usize {
        let mut depth = 0;
        let mut current = self.scope(id).and_then(|s| s.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.scope(parent).and_then(|s| s.parent);
        }
        depth
    }

    pub fn symbols_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }

    /// Names of every declared struct/class in the buffer
    pub fn struct_names(&self) -> HashSet<&str> {
        self.symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Struct)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn has_import(&self, module: &str) -> bool {
        self.imports.iter().any(|i| i == module)
    }

    /// Check the structural invariants every published table must satisfy
    pub fn is_consistent(&self) -> bool {
        let scopes_ok = self.scopes.iter().enumerate().all(|(idx, scope)| {
            scope.id as usize == idx
                && match scope.parent {
                    None => idx == 0 && scope.kind == ScopeKind::File,
                    Some(parent) => (parent as usize) < idx,
                }
        });
        let symbols_ok = self.symbols.iter().all(|s| {
            !s.name.is_empty()
                && s.declaration_span.start <= s.declaration_span.end
                && (s.scope_id as usize) < self.scopes.len()
        });
        scopes_ok && symbols_ok
    }
}
