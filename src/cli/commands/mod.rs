//! Command implementations for ghostlog
//!
//! Each command is implemented in its own module.

pub mod config;
pub mod index;
pub mod languages;
pub mod log;
pub mod resolve;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::IndexError;
use crate::models::Language;
use crate::services::Document;

/// Read `path` and index it as a fresh document
pub(crate) async fn open_document(path: &Path) -> Result<Document> {
    let language = Language::from_path(path);
    if !language.is_supported() {
        return Err(IndexError::unsupported(path.display()).into());
    }

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(Document::open(path.display().to_string(), language, text)?)
}
