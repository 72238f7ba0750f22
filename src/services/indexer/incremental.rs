//! Edit detection and table splicing for incremental reindex

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use tree_sitter::{InputEdit, Point};

use crate::infra::text::position_at;
use crate::models::{Position, Scope, ScopeId, ScopeKind, Span, Symbol, SymbolTable};

/// Single contiguous replacement between two versions of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
    pub start_position: Position,
    pub old_end_position: Position,
    pub new_end_position: Position,
}

impl TextChange {
    /// Region outside the common prefix and suffix
    pub fn between(old: &str, new: &str) -> Self {
        let (a, b) = (old.as_bytes(), new.as_bytes());
        let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
        let room = a.len().min(b.len()) - prefix;
        let suffix = a
            .iter()
            .rev()
            .zip(b.iter().rev())
            .take(room)
            .take_while(|(x, y)| x == y)
            .count();

        let old_end = a.len() - suffix;
        let new_end = b.len() - suffix;
        Self {
            start: prefix,
            old_end,
            new_end,
            start_position: position_at(a, prefix),
            old_end_position: position_at(a, old_end),
            new_end_position: position_at(b, new_end),
        }
    }

    pub fn input_edit(&self) -> InputEdit {
        InputEdit {
            start_byte: self.start,
            old_end_byte: self.old_end,
            new_end_byte: self.new_end,
            start_position: point(self.start_position),
            old_end_position: point(self.old_end_position),
            new_end_position: point(self.new_end_position),
        }
    }

    /// Map an old byte offset that is not inside the replaced region
    pub fn shift_byte(&self, offset: usize) -> usize {
        if offset >= self.old_end {
            offset - self.old_end + self.new_end
        } else {
            offset
        }
    }

    pub fn shift_position(&self, offset: usize, pos: Position) -> Position {
        if offset < self.old_end {
            return pos;
        }
        if pos.line == self.old_end_position.line {
            Position::new(
                self.new_end_position.line,
                self.new_end_position.column + (pos.column - self.old_end_position.column),
            )
        } else {
            let line = pos.line as i64 + self.new_end_position.line as i64
                - self.old_end_position.line as i64;
            Position::new(line as u32, pos.column)
        }
    }

    pub fn shift_span(&self, span: Span) -> Span {
        Span::new(
            self.shift_position(span.start_byte, span.start),
            self.shift_position(span.end_byte, span.end),
            self.shift_byte(span.start_byte),
            self.shift_byte(span.end_byte),
        )
    }
}

fn point(pos: Position) -> Point {
    Point::new(pos.line as usize, pos.column as usize)
}

/// Smallest non-file scope that holds the change strictly inside it
pub(crate) fn enclosing_scope<'a>(table: &'a SymbolTable, change: &TextChange) -> Option<&'a Scope> {
    table
        .scopes
        .iter()
        .filter(|s| {
            s.kind != ScopeKind::File
                && s.span.start_byte < change.start
                && change.old_end < s.span.end_byte
        })
        .min_by_key(|s| s.span.len())
}

/// Replace `target`'s subtree in `previous` with freshly walked scopes and
/// symbols, then renumber scopes in pre-order.
///
/// `scopes` and `symbols` are in new-buffer coordinates with scope ids at or
/// above `previous.scopes.len()`.
pub(crate) fn splice(
    previous: &SymbolTable,
    target: &Scope,
    change: &TextChange,
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
) -> SymbolTable {
    let parent = target.parent.unwrap_or(0);
    let (start, end) = (target.span.start_byte, target.span.end_byte);

    let mut removed: HashSet<ScopeId> = HashSet::from([target.id]);
    for scope in &previous.scopes {
        if let Some(p) = scope.parent
            && removed.contains(&p)
        {
            removed.insert(scope.id);
        }
    }

    let mut all_scopes: Vec<Scope> = previous
        .scopes
        .iter()
        .filter(|s| !removed.contains(&s.id))
        .cloned()
        .map(|mut s| {
            s.span = change.shift_span(s.span);
            s
        })
        .chain(scopes)
        .collect();
    all_scopes.sort_by_key(|s| (s.span.start_byte, Reverse(s.span.end_byte)));

    let renumber: HashMap<ScopeId, ScopeId> = all_scopes
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.id, idx as ScopeId))
        .collect();
    for (idx, scope) in all_scopes.iter_mut().enumerate() {
        scope.id = idx as ScopeId;
        scope.parent = scope
            .parent
            .map(|p| renumber.get(&p).copied().unwrap_or(0));
    }

    let mut all_symbols: Vec<Symbol> = previous
        .symbols
        .iter()
        .filter(|s| {
            let declared_by_target = s.scope_id == parent
                && start <= s.declaration_span.start_byte
                && s.declaration_span.end_byte <= end;
            !removed.contains(&s.scope_id) && !declared_by_target
        })
        .cloned()
        .map(|mut s| {
            s.declaration_span = change.shift_span(s.declaration_span);
            s.name_span = change.shift_span(s.name_span);
            s.statement = change.shift_span(s.statement);
            s.body_open = s.body_open.map(|open| change.shift_span(open));
            s
        })
        .chain(symbols)
        .collect();
    for symbol in &mut all_symbols {
        symbol.scope_id = renumber.get(&symbol.scope_id).copied().unwrap_or(0);
    }

    SymbolTable {
        language: previous.language,
        scopes: all_scopes,
        symbols: all_symbols,
        partial: false,
        parse_error: None,
        imports: Vec::new(),
        source_hash: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_insert() {
        let change = TextChange::between("ab\ncd\n", "ab\nXYcd\n");
        assert_eq!((change.start, change.old_end, change.new_end), (3, 3, 5));
        assert_eq!(change.start_position, Position::new(1, 0));
        assert_eq!(change.new_end_position, Position::new(1, 2));
    }

    #[test]
    fn test_change_delete_repeated_chars() {
        // common prefix and suffix must not overlap
        let change = TextChange::between("aaaa", "aaa");
        assert_eq!((change.start, change.old_end, change.new_end), (3, 4, 3));
    }

    #[test]
    fn test_change_identical() {
        let change = TextChange::between("same", "same");
        assert_eq!(change.start, change.old_end);
        assert_eq!(change.old_end, change.new_end);
    }

    #[test]
    fn test_shift_position_same_line() {
        let change = TextChange::between("ab\ncd ef\n", "ab\ncdXX ef\n");
        // "ef" started at byte 6, (1, 3)
        assert_eq!(change.shift_byte(6), 8);
        assert_eq!(change.shift_position(6, Position::new(1, 3)), Position::new(1, 5));
        // before the change stays put
        assert_eq!(change.shift_position(0, Position::new(0, 0)), Position::new(0, 0));
    }

    #[test]
    fn test_shift_position_added_lines() {
        let change = TextChange::between("a\nb\nc\n", "a\nb\nx\ny\nc\n");
        let old_c = 4;
        let shifted = change.shift_position(old_c, Position::new(2, 0));
        assert_eq!(shifted, Position::new(4, 0));
        assert_eq!(change.shift_byte(old_c), 8);
    }

    #[test]
    fn test_shift_position_removed_lines() {
        let change = TextChange::between("a\nx\ny\nc\n", "a\nc\n");
        assert_eq!(change.shift_position(6, Position::new(3, 0)), Position::new(1, 0));
    }
}
