//! Source indexer
//!
//! Parses a buffer with tree-sitter and builds its [`SymbolTable`]. The last
//! parse tree is cached so that an edit confined to one scope only re-walks
//! that scope.

mod incremental;
mod walker;

pub use incremental::TextChange;

use serde::Serialize;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser, Query, Tree};

use crate::error::{Degraded, IndexError};
use crate::infra::ast::{
    Grammar, collect_imports, create_parser, first_error, import_query, node_at, node_span,
};
use crate::infra::hash_content;
use crate::models::{Language, ScopeId, SymbolTable};

use incremental::{enclosing_scope, splice};
use walker::{Frame, Walker, enclosing_type_body, file_span, finalize, restrict_to_prefix};

/// How the last [`Indexer::reindex`] call produced its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReindexStrategy {
    Incremental,
    Full,
}

struct ParsedBuffer {
    source: String,
    hash: u64,
    tree: Tree,
}

pub struct Indexer {
    grammar: &'static Grammar,
    parser: Parser,
    imports: Option<Query>,
    incremental: bool,
    cache: Option<ParsedBuffer>,
    last_strategy: Option<ReindexStrategy>,
}

impl Indexer {
    pub fn new(language: Language) -> Result<Self, IndexError> {
        let grammar =
            Grammar::for_language(language).ok_or_else(|| IndexError::unsupported(language))?;
        Ok(Self {
            grammar,
            parser: create_parser(grammar)?,
            imports: import_query(grammar)?,
            incremental: true,
            cache: None,
            last_strategy: None,
        })
    }

    pub fn with_incremental(mut self, enabled: bool) -> Self {
        self.incremental = enabled;
        self
    }

    pub fn language(&self) -> Language {
        self.grammar.language
    }

    pub fn last_strategy(&self) -> Option<ReindexStrategy> {
        self.last_strategy
    }

    /// Index a whole buffer. Syntax errors yield a partial table, never an
    /// error.
    pub fn index(&mut self, source: &str) -> SymbolTable {
        let hash = hash_content(source);
        let Some(tree) = self.parser.parse(source, None) else {
            warn!(language = %self.language(), "parser returned no tree");
            self.cache = None;
            let mut table = SymbolTable::empty(self.language(), file_span(source.as_bytes()));
            table.partial = true;
            table.parse_error = Some(Default::default());
            table.source_hash = hash;
            return table;
        };

        let table = self.build(source, hash, tree.root_node());
        self.cache = Some(ParsedBuffer {
            source: source.to_string(),
            hash,
            tree,
        });
        table
    }

    /// Produce the table for `source` given the table of the previous
    /// version. Equal to `index(source)` whichever path is taken.
    pub fn reindex(&mut self, previous: &SymbolTable, source: &str) -> SymbolTable {
        if self.incremental
            && let Some(table) = self.try_incremental(previous, source)
        {
            self.last_strategy = Some(ReindexStrategy::Incremental);
            return table;
        }
        self.last_strategy = Some(ReindexStrategy::Full);
        self.index(source)
    }

    fn build(&self, source: &str, hash: u64, root: Node<'_>) -> SymbolTable {
        let (scopes, symbols) = Walker::walk_file(self.grammar, source.as_bytes(), root).into_parts();
        let mut table = SymbolTable {
            language: self.language(),
            scopes,
            symbols,
            partial: false,
            parse_error: None,
            imports: self.imports_of(root, source),
            source_hash: hash,
        };

        if let Some(error) = first_error(root) {
            let at = node_span(error).start;
            debug!(
                language = %self.language(),
                "{}",
                Degraded::Parse { line: at.line, column: at.column }
            );
            restrict_to_prefix(&mut table, error);
            table.partial = true;
            table.parse_error = Some(at);
        }

        finalize(&mut table, source);
        table
    }

    fn imports_of(&self, root: Node<'_>, source: &str) -> Vec<String> {
        self.imports
            .as_ref()
            .map(|query| collect_imports(query, root, source.as_bytes()))
            .unwrap_or_default()
    }

    fn try_incremental(&mut self, previous: &SymbolTable, source: &str) -> Option<SymbolTable> {
        if previous.partial {
            debug!("previous table is partial, full reindex");
            return None;
        }
        let grammar = self.grammar;
        let cached = self
            .cache
            .as_ref()
            .filter(|c| c.hash == previous.source_hash)?;
        if cached.source == source {
            return Some(previous.clone());
        }

        let change = TextChange::between(&cached.source, source);
        let Some(target) = enclosing_scope(previous, &change) else {
            debug!(start = change.start, "edit not inside a single scope, full reindex");
            return None;
        };
        let (start, end) = (target.span.start_byte, target.span.end_byte);
        let kind = node_at(cached.tree.root_node(), start, end, |n| {
            grammar.scope_kind(n.kind()) == Some(target.kind)
        })?
        .kind();

        let mut tree = cached.tree.clone();
        tree.edit(&change.input_edit());
        let new_tree = self.parser.parse(source, Some(&tree))?;
        if new_tree.root_node().has_error() {
            debug!("edited buffer has syntax errors, full reindex");
            return None;
        }

        let new_end = change.shift_byte(end);
        let Some(node) = node_at(new_tree.root_node(), start, new_end, |n| n.kind() == kind) else {
            debug!(kind, "edited scope changed shape, full reindex");
            return None;
        };

        let frame = Frame {
            scope: target.parent.unwrap_or(0),
            type_body: enclosing_type_body(grammar, node),
        };
        let mut walker = Walker::new(grammar, source.as_bytes(), previous.scopes.len() as ScopeId);
        walker.visit(node, frame);
        let (scopes, symbols) = walker.into_parts();

        let mut table = splice(previous, target, &change, scopes, symbols);
        table.imports = self.imports_of(new_tree.root_node(), source);
        table.source_hash = hash_content(source);
        finalize(&mut table, source);
        debug!(scope = target.id, kind, "incremental reindex");

        self.cache = Some(ParsedBuffer {
            source: source.to_string(),
            hash: table.source_hash,
            tree: new_tree,
        });
        Some(table)
    }
}
