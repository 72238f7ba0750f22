//! Symbol model definitions
//!
//! Core types for the identifiers a buffer declares.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::span::Span;

/// Index into [`SymbolTable::scopes`](super::SymbolTable::scopes)
pub type ScopeId = u32;

/// A named, declared entity in the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Whole declaring construct
    pub declaration_span: Span,
    /// The identifier token itself
    pub name_span: Span,
    /// Outermost statement holding the declaration. Members of a type body
    /// take the statement of the whole type.
    pub statement: Span,
    /// Token opening the body of the construct that binds the name
    /// (`{` or `:`), set for parameters and loop variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_open: Option<Span>,
    /// Line a log statement for this symbol goes after. Indexing moves it to
    /// the body opener when the body starts on the next line.
    #[serde(default)]
    pub anchor_line: u32,
    pub scope_id: ScopeId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub indent: String,
    #[serde(default, skip_serializing_if = "ValueHint::is_unknown")]
    pub hint: ValueHint,
    #[serde(default)]
    pub shape: ValueShape,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, declaration_span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            declaration_span,
            name_span: declaration_span,
            statement: declaration_span,
            body_open: None,
            anchor_line: declaration_span.last_line(),
            scope_id: 0,
            indent: String::new(),
            hint: ValueHint::Unknown,
            shape: ValueShape::Scalar,
        }
    }

    pub fn with_scope(mut self, scope_id: ScopeId) -> Self {
        self.scope_id = scope_id;
        self
    }

    pub fn with_name_span(mut self, span: Span) -> Self {
        self.name_span = span;
        self
    }

    pub fn with_statement(mut self, span: Span) -> Self {
        self.statement = span;
        self.anchor_line = span.last_line();
        self
    }

    pub fn with_body_open(mut self, open: Option<Span>) -> Self {
        self.body_open = open;
        self
    }

    pub fn with_hint(mut self, hint: ValueHint) -> Self {
        self.hint = hint;
        self
    }

    pub fn is_composite(&self) -> bool {
        self.shape == ValueShape::Composite
    }
}

/// Kinds of declarations the indexer records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Variable,
    Function,
    Method,
    StructField,
    /// Type declarations: structs, classes, records, enums
    Struct,
}

impl SymbolKind {
    /// Kinds whose value can be printed
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Variable | Self::StructField)
    }

    pub fn all_kind_names() -> &'static [&'static str] {
        &["variable", "function", "method", "struct_field", "struct"]
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Method => "method",
            Self::StructField => "struct_field",
            Self::Struct => "struct",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "variable" | "var" => Ok(Self::Variable),
            "function" | "fn" | "func" => Ok(Self::Function),
            "method" => Ok(Self::Method),
            "struct_field" | "field" => Ok(Self::StructField),
            "struct" | "class" | "type" => Ok(Self::Struct),
            _ => Err(format!(
                "Unknown symbol kind: {}. Valid kinds: {}",
                s,
                Self::all_kind_names().join(", ")
            )),
        }
    }
}

/// What the indexer could tell about a declaration's value from syntax alone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ValueHint {
    #[default]
    Unknown,
    /// Number, string, boolean or null literal
    Literal,
    /// Struct, object or map literal (`User{..}`, `{a: 1}`)
    CompositeLiteral,
    /// `new T(..)`
    New(String),
    /// Call whose callee might be a type (`User(..)`, `User::new(..)`)
    Construct(String),
    /// Declared type annotation
    Typed(String),
}

impl ValueHint {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Use `other` when nothing was learned from the value expression
    pub fn or(self, other: ValueHint) -> ValueHint {
        match self {
            Self::Unknown => other,
            hint => hint,
        }
    }

    /// Type name this hint refers to, if any
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::New(t) | Self::Construct(t) | Self::Typed(t) => Some(t),
            _ => None,
        }
    }
}

/// Whether a printed value should use the composite or scalar specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    #[default]
    Scalar,
    Composite,
}

/// Supported programming languages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Go,
    Python,
    JavaScript,
    TypeScript,
    Java,
    CSharp,
    PHP,
    #[default]
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Self::Rust,
            "go" => Self::Go,
            "py" | "pyi" => Self::Python,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "java" => Self::Java,
            "cs" => Self::CSharp,
            "php" => Self::PHP,
            _ => Self::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Parse language from string, returning Unknown for unrecognized values
    pub fn from_str_loose(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }

    /// Get file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Rust => &["rs"],
            Self::Go => &["go"],
            Self::Python => &["py", "pyi"],
            Self::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Self::TypeScript => &["ts", "tsx", "mts", "cts"],
            Self::Java => &["java"],
            Self::CSharp => &["cs"],
            Self::PHP => &["php"],
            Self::Unknown => &[],
        }
    }

    /// Editor language identifier (the `languageId` editors send)
    pub fn id(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::PHP => "php",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        *self != Self::Unknown
    }

    /// All supported languages, in display order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Go,
            Self::Rust,
            Self::Python,
            Self::JavaScript,
            Self::TypeScript,
            Self::Java,
            Self::CSharp,
            Self::PHP,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            "go" | "golang" => Ok(Self::Go),
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" | "javascriptreact" | "jsx" => Ok(Self::JavaScript),
            "typescript" | "ts" | "typescriptreact" | "tsx" => Ok(Self::TypeScript),
            "java" => Ok(Self::Java),
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            "php" => Ok(Self::PHP),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}
