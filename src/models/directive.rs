//! Synthesized log output and the edits that apply it

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;
use super::table::SymbolTable;
use crate::infra::text;

/// An insertion into the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub insertion_line: u32,
    #[serde(default)]
    pub insertion_column: u32,
    pub text_to_insert: String,
}

impl TextEdit {
    pub fn insert_lines(line: u32, text: impl Into<String>) -> Self {
        Self {
            insertion_line: line,
            insertion_column: 0,
            text_to_insert: text.into(),
        }
    }

    pub fn apply(&self, source: &str) -> String {
        text::insert_at(
            source,
            self.insertion_line,
            self.insertion_column,
            &self.text_to_insert,
        )
    }
}

/// Apply edits bottom-up so earlier insertions do not move later ones
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| {
        (b.insertion_line, b.insertion_column).cmp(&(a.insertion_line, a.insertion_column))
    });
    ordered
        .into_iter()
        .fold(source.to_string(), |acc, edit| edit.apply(&acc))
}

/// A module the generated statements depend on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequirement {
    /// Path as it appears in the buffer's import list (`fmt`)
    pub module: String,
    /// Line to add when missing (`import "fmt"`)
    pub statement: String,
}

impl ImportRequirement {
    pub fn new(module: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            statement: statement.into(),
        }
    }

    pub fn edit_for(&self, source: &str) -> TextEdit {
        TextEdit::insert_lines(text::import_line(source), format!("{}\n", self.statement))
    }
}

/// Debug-print statements ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDirective {
    pub target_symbols: Vec<Symbol>,
    pub insertion_line: u32,
    pub indentation: String,
    pub format_template: String,
    /// One rendered statement per target, without indentation
    pub statements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportRequirement>,
}

impl LogDirective {
    /// Indented statements, one per line
    pub fn text(&self) -> String {
        self.statements
            .iter()
            .map(|s| format!("{}{}\n", self.indentation, s))
            .collect()
    }

    pub fn to_text_edit(&self) -> TextEdit {
        TextEdit::insert_lines(self.insertion_line, self.text())
    }

    /// True when the lines at the insertion point already hold these statements
    pub fn is_applied(&self, source: &str) -> bool {
        !self.statements.is_empty()
            && self.statements.iter().enumerate().all(|(offset, stmt)| {
                text::line_at(source, self.insertion_line + offset as u32)
                    .is_some_and(|line| line.trim() == stmt.trim())
            })
    }

    /// All edits for this directive, including a missing import
    pub fn edits(&self, table: &SymbolTable, source: &str) -> Vec<TextEdit> {
        let mut edits = vec![self.to_text_edit()];
        if let Some(import) = &self.import
            && !table.has_import(&import.module)
        {
            edits.push(import.edit_for(source));
        }
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Span};

    fn directive(line: u32, statements: &[&str]) -> LogDirective {
        LogDirective {
            target_symbols: Vec::new(),
            insertion_line: line,
            indentation: "\t".into(),
            format_template: "fmt.Printf(\"${name}: ${spec}\\n\", ${name})".into(),
            statements: statements.iter().map(|s| s.to_string()).collect(),
            import: Some(ImportRequirement::new("fmt", "import \"fmt\"")),
        }
    }

    #[test]
    fn test_text_indents_every_statement() {
        let d = directive(4, &["a()", "b()"]);
        assert_eq!(d.text(), "\ta()\n\tb()\n");
        assert_eq!(d.to_text_edit().insertion_line, 4);
    }

    #[test]
    fn test_apply_edits_descending() {
        let source = "package main\n\nfunc main() {\n\tx := 5\n}\n";
        let d = directive(4, &["fmt.Printf(\"x: %v\\n\", x)"]);
        let table = SymbolTable::empty(Language::Go, Span::default());
        let edits = d.edits(&table, source);
        assert_eq!(edits.len(), 2);

        let out = apply_edits(source, &edits);
        assert_eq!(
            out,
            "package main\nimport \"fmt\"\n\nfunc main() {\n\tx := 5\n\tfmt.Printf(\"x: %v\\n\", x)\n}\n"
        );
    }

    #[test]
    fn test_existing_import_is_not_repeated() {
        let mut table = SymbolTable::empty(Language::Go, Span::default());
        table.imports.push("fmt".into());
        let d = directive(4, &["x"]);
        assert_eq!(d.edits(&table, "").len(), 1);
    }

    #[test]
    fn test_is_applied() {
        let d = directive(1, &["print(x)"]);
        assert!(!d.is_applied("x = 1\n"));
        let applied = apply_edits("x = 1\n", &[d.to_text_edit()]);
        assert!(d.is_applied(&applied));
    }

    #[test]
    fn test_edit_at_eof_without_newline() {
        let d = directive(1, &["print(x)"]);
        let out = d.to_text_edit().apply("x = 1");
        assert_eq!(out, "x = 1\n\tprint(x)\n");
    }
}
