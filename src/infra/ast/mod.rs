//! AST parsing infrastructure for ghostlog
//!
//! Tree-sitter grammars, parsing helpers and per-language declaration
//! extraction.

pub mod declarations;
pub mod grammar;
pub mod parser;

pub use declarations::{Declaration, base_type_name, declarations};
pub use grammar::{Grammar, is_supported, supported_languages};
pub use parser::{
    collect_imports, create_parser, first_error, import_query, node_at, node_span, node_text,
    statement_of,
};
