//! Selection resolver
//!
//! Maps a caret or range onto the declarations it covers.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::debug;

use crate::error::Degraded;
use crate::models::{Position, Selection, Symbol, SymbolTable};

/// Symbols targeted by `selection`, in declaration order. Empty when the
/// selection covers no declaration.
pub fn resolve(selection: &Selection, table: &SymbolTable) -> Vec<Symbol> {
    let found = match selection.normalized() {
        Selection::Point(point) => resolve_point(point, table).into_iter().collect(),
        Selection::Range { start, end } => resolve_range(start, end, table),
    };
    if found.is_empty() {
        debug!(selection = ?selection, "{}", Degraded::NoSymbolAtSelection);
    }
    found
}

/// Innermost declaration under the caret: one whose name is under the caret
/// first, then the smallest declaration, then the deepest scope
fn resolve_point(point: Position, table: &SymbolTable) -> Option<Symbol> {
    table
        .symbols
        .iter()
        .filter(|s| s.declaration_span.contains(point))
        .min_by_key(|s| {
            (
                !s.name_span.contains(point),
                s.declaration_span.len(),
                Reverse(table.scope_depth(s.scope_id)),
            )
        })
        .cloned()
}

fn resolve_range(start: Position, end: Position, table: &SymbolTable) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    table
        .symbols
        .iter()
        .filter(|s| {
            s.declaration_span.overlaps(start, end) && !s.declaration_span.encloses(start, end)
        })
        .filter(|s| seen.insert((s.name.as_str(), s.scope_id)))
        .cloned()
        .collect()
}
