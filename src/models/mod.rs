//! Data models for ghostlog
//!
//! Contains core type definitions used throughout the application.

pub mod config;
pub mod directive;
pub mod selection;
pub mod span;
pub mod symbol;
pub mod table;

// Re-export commonly used types
pub use config::{CompositeDetection, GhostConfig, IndexConfig, LanguageOverride, SynthConfig};
pub use directive::{ImportRequirement, LogDirective, TextEdit, apply_edits};
pub use selection::Selection;
pub use span::{Position, Span};
pub use symbol::{Language, ScopeId, Symbol, SymbolKind, ValueHint, ValueShape};
pub use table::{Scope, ScopeKind, SymbolTable};
