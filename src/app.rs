//! Application container for ghostlog

use std::path::Path;
use std::sync::Arc;

use crate::cli::OutputContext;
use crate::config;
use crate::models::config::GhostConfig;
use crate::services::config::{ConfigService, DefaultConfigService};

pub struct App {
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) config: GhostConfig,
}

impl App {
    pub async fn new() -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;
        tracing::debug!("Initializing ghostlog at {:?}", root);

        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = match config_service.load(false).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                GhostConfig::default()
            }
        };

        config::init(&config);

        Ok(Self {
            output: OutputContext::new(root),
            config_service,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        self.output.root()
    }

    pub fn config(&self) -> &GhostConfig {
        &self.config
    }
}
