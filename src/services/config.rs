//! Configuration service for ghostlog

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use toml::Table;

use crate::error::ConfigError;
use crate::models::config::GhostConfig;

pub const ENV_TRIGGER_KEY: &str = "GHOSTLOG_TRIGGER_KEY";
pub const ENV_COMPOSITE_SPECIFIER: &str = "GHOSTLOG_COMPOSITE_SPECIFIER";
pub const ENV_SCALAR_SPECIFIER: &str = "GHOSTLOG_SCALAR_SPECIFIER";

#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn load(&self, global_only: bool) -> Result<GhostConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    global: PathBuf,
    project: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self::with_paths(Self::global_config_path(), root.join(".ghostlog").join("config.toml"))
    }

    pub fn with_paths(global: PathBuf, project: PathBuf) -> Self {
        Self { global, project }
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/ghostlog/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghostlog")
            .join("config.toml")
    }

    async fn read_table(path: &Path) -> Result<Table, ConfigError> {
        if !path.exists() {
            return Ok(Table::new());
        }
        let content = tokio::fs::read_to_string(path).await?;
        toml::from_str::<Table>(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    async fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let config = GhostConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigService for DefaultConfigService {
    async fn load(&self, global_only: bool) -> Result<GhostConfig, ConfigError> {
        let mut table = Self::read_table(&self.global).await?;
        if !global_only {
            let project = Self::read_table(&self.project).await?;
            merge_tables(&mut table, project);
        }
        let config: GhostConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        Ok(apply_overrides(config, |key| std::env::var(key).ok()))
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            self.global.clone()
        } else {
            self.project.clone()
        }
    }

    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path).await?;
        Ok(path)
    }
}

/// Overlay `overlay` onto `base`, recursing into nested tables
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply `GHOSTLOG_*` overrides read through `lookup`
pub fn apply_overrides(
    mut config: GhostConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> GhostConfig {
    if let Some(key) = lookup(ENV_TRIGGER_KEY)
        && !key.is_empty()
    {
        config.synth.trigger_key = key;
    }
    if let Some(spec) = lookup(ENV_COMPOSITE_SPECIFIER) {
        config.synth.format_specifier_for_composite = Some(spec);
    }
    if let Some(spec) = lookup(ENV_SCALAR_SPECIFIER) {
        config.synth.format_specifier_for_scalar = Some(spec);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompositeDetection, Language};
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> DefaultConfigService {
        DefaultConfigService::with_paths(
            dir.path().join("global").join("config.toml"),
            dir.path().join("project").join(".ghostlog").join("config.toml"),
        )
    }

    async fn write(path: &Path, content: &str) {
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(path, content).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let config = service(&dir).load(false).await.unwrap();
        assert_eq!(config.synth.trigger_key, "l");
        assert!(config.index.incremental);
    }

    #[tokio::test]
    async fn test_project_overlays_global() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        write(
            &svc.config_path(true),
            "[synth]\ntrigger_key = \"k\"\nformat_specifier_for_scalar = \"%d\"\n\n[index]\nmax_file_size_mb = 1\n",
        )
        .await;
        write(
            &svc.config_path(false),
            "[synth]\ntrigger_key = \"p\"\ncomposite_detection = \"never\"\n\n[synth.languages.go]\ncomposite = \"%#v\"\n",
        )
        .await;

        let config = svc.load(false).await.unwrap();
        assert_eq!(config.synth.trigger_key, "p");
        assert_eq!(config.synth.format_specifier_for_scalar.as_deref(), Some("%d"));
        assert_eq!(config.synth.composite_detection, CompositeDetection::Never);
        assert_eq!(config.index.max_file_size_mb, 1);
        assert_eq!(
            config.synth.language(Language::Go).unwrap().composite.as_deref(),
            Some("%#v")
        );

        let global = svc.load(true).await.unwrap();
        assert_eq!(global.synth.trigger_key, "k");
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        write(&svc.config_path(false), "[synth\n").await;
        let err = svc.load(false).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        let path = svc.init(false, false).await.unwrap();
        assert!(path.exists());
        assert!(svc.init(false, false).await.is_err());
        assert!(svc.init(false, true).await.is_ok());

        let written = svc.load(false).await.unwrap();
        assert_eq!(written.synth, GhostConfig::default().synth);
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_overrides(GhostConfig::default(), |key| match key {
            ENV_TRIGGER_KEY => Some("d".to_string()),
            ENV_COMPOSITE_SPECIFIER => Some("%#v".to_string()),
            _ => None,
        });
        assert_eq!(config.synth.trigger_key, "d");
        assert_eq!(config.synth.format_specifier_for_composite.as_deref(), Some("%#v"));
        assert!(config.synth.format_specifier_for_scalar.is_none());
    }

    #[test]
    fn test_empty_trigger_override_ignored() {
        let config = apply_overrides(GhostConfig::default(), |key| {
            (key == ENV_TRIGGER_KEY).then(String::new)
        });
        assert_eq!(config.synth.trigger_key, "l");
    }
}
