//! Configuration model for ghostlog

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::symbol::Language;

/// ghostlog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GhostConfig {
    #[serde(default)]
    pub synth: SynthConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

/// How a value's shape picks the composite specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompositeDetection {
    /// Use the shape the indexer inferred
    #[default]
    Inferred,
    Always,
    Never,
}

/// Log synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthConfig {
    /// Key that turns a selection into an inserted log line
    #[serde(default = "defaults::trigger_key")]
    pub trigger_key: String,

    /// Overrides every language's built-in composite specifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_specifier_for_composite: Option<String>,

    /// Overrides every language's built-in scalar specifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_specifier_for_scalar: Option<String>,

    #[serde(default)]
    pub composite_detection: CompositeDetection,

    /// Add imports the generated statements need (Go's `fmt`)
    #[serde(default = "defaults::auto_import")]
    pub auto_import: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub languages: BTreeMap<Language, LanguageOverride>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            trigger_key: defaults::trigger_key(),
            format_specifier_for_composite: None,
            format_specifier_for_scalar: None,
            composite_detection: CompositeDetection::default(),
            auto_import: defaults::auto_import(),
            languages: BTreeMap::new(),
        }
    }
}

impl SynthConfig {
    /// Case-insensitive match against the configured trigger key
    pub fn is_trigger(&self, key: &str) -> bool {
        !key.is_empty() && key.eq_ignore_ascii_case(&self.trigger_key)
    }

    pub fn language(&self, language: Language) -> Option<&LanguageOverride> {
        self.languages.get(&language)
    }
}

/// Per-language replacements for the built-in template and specifiers
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LanguageOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<String>,
}

/// Indexing limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexConfig {
    /// Reuse the previous tree and table when an edit stays inside one scope
    #[serde(default = "defaults::incremental")]
    pub incremental: bool,

    #[serde(default = "defaults::max_file_size_mb")]
    pub max_file_size_mb: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            incremental: defaults::incremental(),
            max_file_size_mb: defaults::max_file_size_mb(),
        }
    }
}

impl IndexConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        if self.max_file_size_mb == 0 {
            u64::MAX
        } else {
            self.max_file_size_mb as u64 * 1024 * 1024
        }
    }
}

mod defaults {
    // Synth
    pub fn trigger_key() -> String {
        "l".to_string()
    }
    pub fn auto_import() -> bool {
        true
    }

    // Index
    pub fn incremental() -> bool {
        true
    }
    pub fn max_file_size_mb() -> u32 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GhostConfig::default();
        assert_eq!(config.synth.trigger_key, "l");
        assert!(config.synth.auto_import);
        assert_eq!(config.synth.composite_detection, CompositeDetection::Inferred);
        assert!(config.index.incremental);
        assert_eq!(config.index.max_file_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_unlimited_file_size() {
        let index = IndexConfig {
            max_file_size_mb: 0,
            ..Default::default()
        };
        assert_eq!(index.max_file_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_trigger_key_is_case_insensitive() {
        let synth = SynthConfig::default();
        assert!(synth.is_trigger("l"));
        assert!(synth.is_trigger("L"));
        assert!(!synth.is_trigger("k"));
        assert!(!synth.is_trigger(""));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: GhostConfig = toml::from_str(
            r#"
            [synth]
            trigger_key = "p"
            composite_detection = "never"

            [synth.languages.go]
            composite = "%#v"
            "#,
        )
        .unwrap();
        assert_eq!(config.synth.trigger_key, "p");
        assert_eq!(config.synth.composite_detection, CompositeDetection::Never);
        assert!(config.synth.auto_import);
        assert_eq!(
            config
                .synth
                .language(Language::Go)
                .and_then(|o| o.composite.as_deref()),
            Some("%#v")
        );
        assert_eq!(config.index, IndexConfig::default());
    }
}
