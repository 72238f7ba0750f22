//! Open buffers and their published snapshots
//!
//! A [`Document`] owns one buffer's indexer. Every change produces a complete
//! new [`Snapshot`] that replaces the previous one atomically; readers holding
//! the old `Arc` keep a consistent view.

use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::config;
use crate::error::IndexError;
use crate::models::{Language, LogDirective, Selection, Symbol, SymbolTable, TextEdit};
use crate::services::indexer::{Indexer, ReindexStrategy};
use crate::services::resolver;
use crate::services::synthesizer;
use crate::services::templates::FormatRules;

/// One published version of a buffer
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub text: String,
    pub table: SymbolTable,
}

impl Snapshot {
    pub fn resolve(&self, selection: &Selection) -> Vec<Symbol> {
        resolver::resolve(selection, &self.table)
    }

    pub fn synthesize(&self, selection: &Selection, rules: &FormatRules) -> Option<LogDirective> {
        synthesizer::synthesize(&self.resolve(selection), selection, rules)
    }

    /// Edits that add log lines for `selection`. Empty when nothing resolves
    /// or the lines are already present.
    pub fn log_edits(&self, selection: &Selection, rules: &FormatRules) -> Vec<TextEdit> {
        match self.synthesize(selection, rules) {
            Some(directive) if !directive.is_applied(&self.text) => {
                directive.edits(&self.table, &self.text)
            }
            Some(_) => {
                debug!(version = self.version, "log lines already present");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

pub struct Document {
    name: String,
    language: Language,
    indexer: Mutex<Indexer>,
    current: RwLock<Arc<Snapshot>>,
}

impl Document {
    /// Index `text` and publish version 0
    pub fn open(
        name: impl Into<String>,
        language: Language,
        text: impl Into<String>,
    ) -> Result<Self, IndexError> {
        let name = name.into();
        let text = text.into();
        check_size(&name, &text)?;

        let mut indexer = Indexer::new(language)?.with_incremental(config::incremental());
        let table = indexer.index(&text);
        debug!(document = %name, symbols = table.symbols.len(), "opened");

        Ok(Self {
            name,
            language,
            indexer: Mutex::new(indexer),
            current: RwLock::new(Arc::new(Snapshot {
                version: 0,
                text,
                table,
            })),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Reindex against the latest snapshot and publish the result
    pub fn update(&self, text: impl Into<String>) -> Result<Arc<Snapshot>, IndexError> {
        let text = text.into();
        check_size(&self.name, &text)?;

        let mut indexer = self.indexer.lock().unwrap_or_else(|e| e.into_inner());
        let previous = self.snapshot();
        let table = indexer.reindex(&previous.table, &text);
        let next = Arc::new(Snapshot {
            version: previous.version + 1,
            text,
            table,
        });
        debug!(
            document = %self.name,
            version = next.version,
            strategy = ?indexer.last_strategy(),
            "reindexed"
        );

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Arc::clone(&next);
        Ok(next)
    }

    pub fn last_strategy(&self) -> Option<ReindexStrategy> {
        self.indexer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last_strategy()
    }
}

fn check_size(name: &str, text: &str) -> Result<(), IndexError> {
    let limit = config::max_file_size_bytes();
    let size = text.len() as u64;
    if size > limit {
        return Err(IndexError::FileTooLarge {
            path: name.to_string(),
            size_mb: size / (1024 * 1024),
            limit_mb: limit / (1024 * 1024),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    const CODE: &str = "package main\n\nfunc main() {\n\tx := 5\n}\n";

    #[test]
    fn test_open_publishes_version_zero() {
        let doc = Document::open("main.go", Language::Go, CODE).unwrap();
        let snap = doc.snapshot();
        assert_eq!(snap.version, 0);
        assert_eq!(snap.resolve(&Selection::point(3, 1))[0].name, "x");
    }

    #[test]
    fn test_open_unsupported() {
        let err = Document::open("a.txt", Language::Unknown, "").err().unwrap();
        assert!(matches!(err, IndexError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_old_snapshot_survives_update() {
        let doc = Document::open("main.go", Language::Go, CODE).unwrap();
        let old = doc.snapshot();
        let edited = CODE.replace("\tx := 5\n", "\tx := 5\n\ty := 6\n");
        let new = doc.update(edited).unwrap();

        assert_eq!(new.version, 1);
        assert_eq!(doc.last_strategy(), Some(ReindexStrategy::Incremental));
        assert!(old.table.symbols_named("y").next().is_none());
        assert!(new.table.symbols_named("y").next().is_some());
        assert_eq!(doc.snapshot().version, 1);
    }

    #[test]
    fn test_log_edits_idempotent() {
        let doc = Document::open("main.go", Language::Go, CODE).unwrap();
        let rules = FormatRules::builtin(Language::Go).unwrap();
        let selection = Selection::point(3, 2);

        let edits = doc.snapshot().log_edits(&selection, &rules);
        assert_eq!(edits.len(), 2);
        let applied = crate::models::apply_edits(CODE, &edits);

        let snap = doc.update(applied).unwrap();
        let again = snap.log_edits(&Selection::point(4, 2), &rules);
        assert!(again.is_empty());
    }

    #[test]
    fn test_log_edits_empty_selection() {
        let doc = Document::open("main.go", Language::Go, CODE).unwrap();
        let rules = FormatRules::builtin(Language::Go).unwrap();
        let range = Selection::range(Position::new(0, 0), Position::new(1, 0));
        assert!(doc.snapshot().log_edits(&range, &rules).is_empty());
    }

    #[test]
    fn test_concurrent_readers() {
        let doc = Arc::new(Document::open("main.go", Language::Go, CODE).unwrap());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let doc = Arc::clone(&doc);
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        let snap = doc.snapshot();
                        assert!(snap.table.is_consistent());
                    }
                })
            })
            .collect();
        for i in 0..5 {
            let text = CODE.replace("x := 5", &format!("x := {}", i));
            doc.update(text).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(doc.snapshot().version, 5);
    }
}
