//! Log statement synthesis

use crate::models::{LogDirective, Selection, Symbol};
use crate::services::templates::FormatRules;

/// Build the print statements for `symbols`. `None` when there is nothing
/// to print.
///
/// Statements go on the first line after the latest anchor (or after the
/// selection, when it reaches further) and take the anchor's indentation.
/// Parameters and loop variables anchor on the opening line of the body they
/// are bound in, everything else on the end of its declaring statement
/// (see [`Symbol::anchor_line`]).
pub fn synthesize(
    symbols: &[Symbol],
    selection: &Selection,
    rules: &FormatRules,
) -> Option<LogDirective> {
    let anchor = symbols.iter().max_by_key(|s| s.anchor_line)?;
    let last_line = anchor.anchor_line.max(selection.last_line());

    Some(LogDirective {
        target_symbols: symbols.to_vec(),
        insertion_line: last_line + 1,
        indentation: anchor.indent.clone(),
        format_template: rules.template.clone(),
        statements: symbols.iter().map(|s| rules.render(s)).collect(),
        import: rules.import.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Position, SymbolTable, apply_edits};
    use crate::services::indexer::Indexer;
    use crate::services::resolver::resolve;

    fn run(language: Language, code: &str, selection: Selection) -> (SymbolTable, LogDirective) {
        let table = Indexer::new(language).unwrap().index(code);
        let symbols = resolve(&selection, &table);
        let rules = FormatRules::builtin(language).unwrap();
        let directive = synthesize(&symbols, &selection, &rules).unwrap();
        (table, directive)
    }

    #[test]
    fn test_empty_symbols() {
        let rules = FormatRules::builtin(Language::Go).unwrap();
        assert!(synthesize(&[], &Selection::point(0, 0), &rules).is_none());
    }

    #[test]
    fn test_go_point() {
        let code = "package main\n\nfunc main() {\n\tx := 5\n}\n";
        let (table, directive) = run(Language::Go, code, Selection::point(3, 2));
        assert_eq!(directive.insertion_line, 4);
        assert_eq!(directive.indentation, "\t");
        assert_eq!(directive.statements, vec!["fmt.Printf(\"x: %v\\n\", x)"]);

        let edited = apply_edits(code, &directive.edits(&table, code));
        assert_eq!(
            edited,
            "package main\nimport \"fmt\"\n\nfunc main() {\n\tx := 5\n\tfmt.Printf(\"x: %v\\n\", x)\n}\n"
        );
    }

    #[test]
    fn test_go_existing_import() {
        let code = "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tx := 5\n}\n";
        let (table, directive) = run(Language::Go, code, Selection::point(5, 1));
        assert_eq!(directive.edits(&table, code).len(), 1);
    }

    #[test]
    fn test_range_inserts_after_block() {
        let code = "function report(items) {\n  const filtered = items.filter(Boolean);\n  const total = filtered.length;\n  return total;\n}\n";
        let selection = Selection::range(Position::new(1, 0), Position::new(3, 0));
        let (_, directive) = run(Language::JavaScript, code, selection);
        assert_eq!(directive.insertion_line, 3);
        assert_eq!(
            directive.text(),
            "  console.log('filtered:', filtered);\n  console.log('total:', total);\n"
        );
    }

    #[test]
    fn test_multiline_statement_anchor() {
        let code = "package main\n\ntype User struct {\n\tName string\n}\n\nfunc main() {\n\tu := User{\n\t\tName: \"a\",\n\t}\n}\n";
        let (_, directive) = run(Language::Go, code, Selection::point(7, 1));
        assert_eq!(directive.insertion_line, 10);
        assert_eq!(directive.statements, vec!["fmt.Printf(\"u: %+v\\n\", u)"]);
    }

    #[test]
    fn test_python_composite_class_instance() {
        let code = "class User:\n    pass\n\ndef main():\n    user = User()\n    n = 1\n";
        let (_, directive) = run(Language::Python, code, Selection::point(4, 5));
        assert_eq!(directive.insertion_line, 5);
        assert_eq!(directive.text(), "    print(f'user: {user!r}')\n");
    }

    #[test]
    fn test_apply_then_reindex_keeps_target() {
        let code = "fn main() {\n    let total = 3;\n}\n";
        let (table, directive) = run(Language::Rust, code, Selection::point(1, 9));
        let edited = apply_edits(code, &directive.edits(&table, code));
        assert!(directive.is_applied(&edited));

        let reindexed = Indexer::new(Language::Rust).unwrap().index(&edited);
        let before = table.symbols_named("total").next().unwrap();
        let after = reindexed.symbols_named("total").next().unwrap();
        assert_eq!(before, after);
    }

    /// Log `name` at its declaration, apply the edits and index the result
    fn log_and_reindex(language: Language, code: &str, name: &str) -> (LogDirective, String) {
        let table = Indexer::new(language).unwrap().index(code);
        assert!(!table.partial);
        let at = table.symbols_named(name).next().unwrap().name_span.start;
        let (_, directive) = run(language, code, Selection::point(at.line, at.column));
        assert_eq!(directive.target_symbols[0].name, name);

        let edited = apply_edits(code, &directive.edits(&table, code));
        let reindexed = Indexer::new(language).unwrap().index(&edited);
        assert!(!reindexed.partial, "{}", edited);
        for symbol in &table.symbols {
            assert!(
                reindexed.symbols_named(&symbol.name).next().is_some(),
                "{} lost after edit:\n{}",
                symbol.name,
                edited
            );
        }
        (directive, edited)
    }

    #[test]
    fn test_member_logs_after_type() {
        let go = "package main\n\ntype User struct {\n\tName string\n}\n\nfunc greet(n int) { w := n }\n";
        let rust = "struct User {\n    name: String,\n}\n\nimpl User {\n    fn greet(&self) {\n        let n = 1;\n    }\n}\n";
        let python = "class User:\n    count = 0\n\n    def greet(self):\n        return self.count\n";
        let javascript = "class Cart {\n  total = 0;\n\n  add(item) {\n    this.total += item;\n  }\n}\n";
        let java = "class Cart {\n    int total = 0;\n\n    void add(int item) {\n        total += item;\n    }\n}\n";
        let cases = [
            (Language::Go, go, "Name", 5),
            (Language::Rust, rust, "name", 3),
            (Language::Rust, rust, "greet", 9),
            (Language::Python, python, "count", 5),
            (Language::Python, python, "greet", 5),
            (Language::JavaScript, javascript, "total", 7),
            (Language::JavaScript, javascript, "add", 7),
            (Language::Java, java, "total", 7),
            (Language::Java, java, "add", 7),
        ];
        for (language, code, member, line) in cases {
            let (directive, _) = log_and_reindex(language, code, member);
            assert_eq!(directive.insertion_line, line, "{} {}", language, member);
            assert_eq!(directive.indentation, "", "{} {}", language, member);
        }
    }

    #[test]
    fn test_parameter_logs_inside_body() {
        let code = "package main\n\nfunc greet(n int) {\n\tw := n\n}\n";
        let (directive, edited) = log_and_reindex(Language::Go, code, "n");
        assert_eq!(directive.insertion_line, 3);
        assert_eq!(directive.indentation, "\t");
        assert_eq!(
            edited,
            "package main\nimport \"fmt\"\n\nfunc greet(n int) {\n\tfmt.Printf(\"n: %v\\n\", n)\n\tw := n\n}\n"
        );

        let code = "def greet(name):\n    message = 'hi ' + name\n    return message\n";
        let (directive, edited) = log_and_reindex(Language::Python, code, "name");
        assert_eq!(directive.insertion_line, 1);
        assert_eq!(directive.indentation, "    ");
        assert!(edited.lines().nth(1).unwrap().starts_with("    print("));

        let code = "fn main() {\n    for item in [1, 2] {\n        let doubled = item * 2;\n    }\n}\n";
        let (directive, _) = log_and_reindex(Language::Rust, code, "item");
        assert_eq!(directive.insertion_line, 2);
        assert_eq!(directive.indentation, "        ");
    }

    #[test]
    fn test_aliased_import_still_gets_import_edit() {
        let code = "package main\n\nimport f \"fmt\"\n\nfunc main() {\n\tx := 5\n\tf.Println(x)\n}\n";
        let (table, directive) = run(Language::Go, code, Selection::point(5, 1));
        assert!(!table.has_import("fmt"));
        assert_eq!(directive.edits(&table, code).len(), 2);
    }
}
