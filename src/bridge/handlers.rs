//! RPC Handlers
//!
//! Parameter types and the per-method logic of the editor bridge.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::bridge::protocol::RpcError;
use crate::error::IndexError;
use crate::models::{Language, Selection, SynthConfig};
use crate::services::document::Document;
use crate::services::templates::FormatRules;

// ============================================================================
// Request Parameter Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenParams {
    pub uri: String,
    #[serde(default)]
    pub language: Option<String>,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeParams {
    pub uri: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UriParams {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionParams {
    pub uri: String,
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
pub struct KeypressParams {
    pub uri: String,
    pub selection: Selection,
    pub key: String,
}

pub(super) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError::invalid_params(&e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(&e.to_string()))
}

// ============================================================================
// Workspace
// ============================================================================

/// Documents open in the editor plus the synthesis settings
pub(super) struct Workspace {
    documents: HashMap<String, Document>,
    synth: SynthConfig,
}

impl Workspace {
    pub fn new(synth: SynthConfig) -> Self {
        Self {
            documents: HashMap::new(),
            synth,
        }
    }

    fn document(&self, uri: &str) -> Result<&Document, RpcError> {
        self.documents
            .get(uri)
            .ok_or_else(|| RpcError::unknown_document(uri))
    }

    fn rules(&self, language: Language) -> Result<FormatRules, RpcError> {
        FormatRules::from_config(language, &self.synth).map_err(RpcError::from)
    }

    pub fn open(&mut self, params: OpenParams) -> Result<Value, RpcError> {
        let language = match params.language.as_deref() {
            Some(id) => Language::from_str_loose(id),
            None => Language::from_path(Path::new(&params.uri)),
        };
        if !language.is_supported() {
            let named = params.language.unwrap_or(params.uri);
            return Err(IndexError::unsupported(named).into());
        }

        let document = Document::open(params.uri.clone(), language, params.text)?;
        let snapshot = document.snapshot();
        tracing::info!(uri = %params.uri, language = %language, "document opened");
        self.documents.insert(params.uri.clone(), document);

        Ok(json!({
            "uri": params.uri,
            "language": language,
            "version": snapshot.version,
            "symbols": snapshot.table.symbols.len(),
            "partial": snapshot.table.partial,
        }))
    }

    pub fn change(&mut self, params: ChangeParams) -> Result<Value, RpcError> {
        let document = self.document(&params.uri)?;
        let snapshot = document.update(params.text)?;
        Ok(json!({
            "uri": params.uri,
            "version": snapshot.version,
            "strategy": document.last_strategy(),
            "symbols": snapshot.table.symbols.len(),
            "partial": snapshot.table.partial,
        }))
    }

    pub fn close(&mut self, params: UriParams) -> Result<Value, RpcError> {
        let closed = self.documents.remove(&params.uri).is_some();
        if closed {
            tracing::info!(uri = %params.uri, "document closed");
        }
        Ok(json!({ "closed": closed }))
    }

    pub fn symbols(&self, params: UriParams) -> Result<Value, RpcError> {
        let snapshot = self.document(&params.uri)?.snapshot();
        Ok(json!({
            "version": snapshot.version,
            "table": to_value(&snapshot.table)?,
        }))
    }

    pub fn resolve(&self, params: SelectionParams) -> Result<Value, RpcError> {
        let snapshot = self.document(&params.uri)?.snapshot();
        let symbols = snapshot.resolve(&params.selection);
        Ok(json!({
            "version": snapshot.version,
            "count": symbols.len(),
            "symbols": to_value(&symbols)?,
        }))
    }

    pub fn synthesize(&self, params: SelectionParams) -> Result<Value, RpcError> {
        let document = self.document(&params.uri)?;
        let rules = self.rules(document.language())?;
        let snapshot = document.snapshot();

        let directive = snapshot.synthesize(&params.selection, &rules);
        let edits = directive
            .as_ref()
            .map(|d| d.edits(&snapshot.table, &snapshot.text))
            .unwrap_or_default();
        Ok(json!({
            "version": snapshot.version,
            "directive": to_value(&directive)?,
            "applied": directive.as_ref().is_some_and(|d| d.is_applied(&snapshot.text)),
            "edits": to_value(&edits)?,
        }))
    }

    /// Synthesize only for the configured trigger key
    pub fn keypress(&self, params: KeypressParams) -> Result<Value, RpcError> {
        let document = self.document(&params.uri)?;
        if !self.synth.is_trigger(&params.key) {
            return Ok(json!({ "triggered": false, "edits": [] }));
        }

        let rules = self.rules(document.language())?;
        let snapshot = document.snapshot();
        let edits = snapshot.log_edits(&params.selection, &rules);
        Ok(json!({
            "triggered": true,
            "version": snapshot.version,
            "edits": to_value(&edits)?,
        }))
    }
}
