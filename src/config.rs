//! Global Configuration Singleton

use std::sync::OnceLock;

use crate::models::config::GhostConfig;

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Index limits read on every open/change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub max_file_size_bytes: u64,
    pub incremental: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(&GhostConfig::default())
    }
}

impl From<&GhostConfig> for RuntimeConfig {
    fn from(config: &GhostConfig) -> Self {
        Self {
            max_file_size_bytes: config.index.max_file_size_bytes(),
            incremental: config.index.incremental,
        }
    }
}

pub fn init(config: &GhostConfig) {
    let _ = CONFIG.set(RuntimeConfig::from(config));
}

pub fn max_file_size_bytes() -> u64 {
    config().max_file_size_bytes
}

pub fn incremental() -> bool {
    config().incremental
}

fn config() -> RuntimeConfig {
    CONFIG.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::IndexConfig;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_file_size_bytes, 5 * 1024 * 1024);
        assert!(config.incremental);
    }

    #[test]
    fn test_unlimited_size() {
        let config = GhostConfig {
            index: IndexConfig {
                incremental: false,
                max_file_size_mb: 0,
            },
            ..Default::default()
        };
        let runtime = RuntimeConfig::from(&config);
        assert_eq!(runtime.max_file_size_bytes, u64::MAX);
        assert!(!runtime.incremental);
    }
}
