//! ghostlog - Syntax-aware debug log insertion
//!
//! Indexes a buffer's declarations with tree-sitter, resolves an editor
//! selection to the identifiers it covers, and synthesizes language-specific
//! print statements to insert after them.

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod infra;
pub mod models;
pub mod services;

pub use error::{GhostError, GhostResult};
