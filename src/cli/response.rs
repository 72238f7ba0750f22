//! Response types for CLI output
//!
//! Lines and columns are shown 1-indexed, as typed on the command line.

use serde::Serialize;

use crate::models::{Position, Symbol, SymbolKind, SymbolTable, TextEdit, ValueShape};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PositionOutput {
    pub line: u32,
    pub column: u32,
}

impl From<Position> for PositionOutput {
    fn from(pos: Position) -> Self {
        let (line, column) = pos.to_display();
        Self { line, column }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolOutput {
    pub name: String,
    pub kind: SymbolKind,
    pub start: PositionOutput,
    pub end: PositionOutput,
    pub scope: u32,
    pub shape: ValueShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl From<&Symbol> for SymbolOutput {
    fn from(symbol: &Symbol) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            start: symbol.name_span.start.into(),
            end: symbol.declaration_span.end.into(),
            scope: symbol.scope_id,
            shape: symbol.shape,
            type_name: symbol.hint.type_name().map(str::to_string),
        }
    }
}

/// Response for `index`
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub file: String,
    pub language: String,
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<PositionOutput>,
    pub scope_count: usize,
    pub count: usize,
    pub symbols: Vec<SymbolOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
}

impl IndexResponse {
    pub fn new(file: String, table: &SymbolTable) -> Self {
        Self {
            file,
            language: table.language.to_string(),
            partial: table.partial,
            parse_error: table.parse_error.map(PositionOutput::from),
            scope_count: table.scopes.len(),
            count: table.symbols.len(),
            symbols: table.symbols.iter().map(SymbolOutput::from).collect(),
            imports: table.imports.clone(),
        }
    }
}

/// Response for `resolve`
#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub count: usize,
    pub symbols: Vec<SymbolOutput>,
}

impl SymbolsResponse {
    pub fn new(symbols: &[Symbol]) -> Self {
        Self {
            count: symbols.len(),
            symbols: symbols.iter().map(SymbolOutput::from).collect(),
        }
    }
}

/// Outcome of `log`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    /// Edits were written to the file
    Applied,
    /// `--dry-run`: edits computed, file untouched
    Preview,
    /// The log lines were already there
    Unchanged,
    /// Nothing declared at the selection
    NoSymbol,
    /// `--key` did not match the trigger key
    NotTriggered,
}

/// Response for `log`
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub file: String,
    pub status: LogStatus,
    pub targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_line: Option<u32>,
    pub edits: Vec<TextEdit>,
}

impl LogResponse {
    pub fn empty(file: String, status: LogStatus) -> Self {
        Self {
            file,
            status,
            targets: Vec::new(),
            insertion_line: None,
            edits: Vec::new(),
        }
    }
}

/// One row of `languages`
#[derive(Debug, Serialize)]
pub struct LanguageOutput {
    pub language: String,
    pub extensions: &'static [&'static str],
    pub template: &'static str,
    pub scalar: &'static str,
    pub composite: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Span};

    #[test]
    fn test_symbol_output_is_one_indexed() {
        let decl = Span::new(Position::new(3, 1), Position::new(3, 7), 30, 36);
        let symbol = Symbol::new("x", SymbolKind::Variable, decl).with_scope(2);
        let out = SymbolOutput::from(&symbol);
        assert_eq!((out.start.line, out.start.column), (4, 2));
        assert_eq!((out.end.line, out.end.column), (4, 8));
        assert_eq!(out.scope, 2);
    }

    #[test]
    fn test_index_response() {
        let mut table = SymbolTable::empty(Language::Go, Span::default());
        table.partial = true;
        table.parse_error = Some(Position::new(5, 0));
        let response = IndexResponse::new("main.go".into(), &table);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["language"], "go");
        assert_eq!(value["parse_error"]["line"], 6);
        assert_eq!(value["scope_count"], 1);
        assert!(value.get("imports").is_none());
    }

    #[test]
    fn test_log_status_names() {
        let response = LogResponse::empty("a.go".into(), LogStatus::NotTriggered);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "not_triggered");
        assert!(value.get("insertion_line").is_none());
    }
}
