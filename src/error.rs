//! Error types for ghostlog

use std::fmt;

use thiserror::Error;

use crate::models::symbol::{Language, SymbolKind};

pub type GhostResult<T> = std::result::Result<T, GhostError>;

#[derive(Debug, Error)]
pub enum GhostError {
    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Unsupported language: {0}. Run 'ghostlog languages' to see supported languages.")]
    UnsupportedLanguage(String),

    #[error("Failed to load {language} grammar: {message}")]
    Grammar { language: Language, message: String },

    #[error("Invalid {language} query: {message}")]
    Query { language: Language, message: String },

    #[error("File too large ({size_mb}MB > {limit_mb}MB limit): {path}")]
    FileTooLarge {
        path: String,
        size_mb: u64,
        limit_mb: u64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub fn unsupported(language: impl fmt::Display) -> Self {
        Self::UnsupportedLanguage(language.to_string())
    }

    /// Editor bridge error code
    pub fn error_code(&self) -> i32 {
        match self {
            Self::UnsupportedLanguage(_) => -32002,
            _ => -32603,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Conditions that are absorbed on the request path instead of failing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degraded {
    /// The buffer has a syntax error; only the prefix before it was indexed
    Parse { line: u32, column: u32 },
    /// The selection covers no declaration
    NoSymbolAtSelection,
    /// The kind has no printable value and was rendered with the scalar template
    UnsupportedSymbolKind(SymbolKind),
}

impl fmt::Display for Degraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, column } => {
                write!(f, "parse error at {}:{}, indexed prefix only", line, column)
            }
            Self::NoSymbolAtSelection => write!(f, "no symbol at selection"),
            Self::UnsupportedSymbolKind(kind) => {
                write!(f, "no log template for {} symbols, using scalar", kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_code() {
        let err = IndexError::unsupported("cobol");
        assert_eq!(err.error_code(), -32002);
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_grammar_error_code() {
        let err = IndexError::Grammar {
            language: Language::Go,
            message: "version mismatch".to_string(),
        };
        assert_eq!(err.error_code(), -32603);
        assert_eq!(
            err.to_string(),
            "Failed to load go grammar: version mismatch"
        );
    }

    #[test]
    fn test_ghost_error_wraps_config() {
        let err: GhostError = ConfigError::Parse("bad toml".to_string()).into();
        assert_eq!(err.to_string(), "Config parse error: bad toml");
    }

    #[test]
    fn test_degraded_display() {
        assert_eq!(
            Degraded::Parse { line: 4, column: 2 }.to_string(),
            "parse error at 4:2, indexed prefix only"
        );
        assert_eq!(
            Degraded::UnsupportedSymbolKind(SymbolKind::Struct).to_string(),
            "no log template for struct symbols, using scalar"
        );
    }
}
