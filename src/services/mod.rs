//! Service layer for ghostlog

pub mod config;
pub mod document;
pub mod indexer;
pub mod resolver;
pub mod synthesizer;
pub mod templates;

pub use config::{ConfigService, DefaultConfigService};
pub use document::{Document, Snapshot};
pub use indexer::{Indexer, ReindexStrategy};
pub use resolver::resolve;
pub use synthesizer::synthesize;
pub use templates::FormatRules;
