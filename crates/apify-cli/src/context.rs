use std::path::PathBuf;
use std::sync::Arc;

use apify::{CatalogConfig, FilesystemNamespace, SpecCatalog};

use crate::error::CliError;

#[derive(Clone, Copy, Debug, Default)]
pub struct Verbosity {
    pub json: bool,
    pub verbose: bool,
}

/// Catalog settings gathered from the command line.
#[derive(Clone, Debug, Default)]
pub struct CatalogOverrides {
    pub config_file: Option<PathBuf>,
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
}

impl CatalogOverrides {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve(self) -> Result<CatalogConfig, CliError> {
        let mut config = match &self.config_file {
            Some(path) => CatalogConfig::load(path)?,
            None => CatalogConfig::default(),
        };
        if !self.roots.is_empty() {
            config.roots = self.roots;
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions;
        }
        config.validate()?;
        Ok(config)
    }
}

pub struct CliSession {
    pub config: CatalogConfig,
    pub catalog: Arc<SpecCatalog<FilesystemNamespace>>,
    pub verbosity: Verbosity,
}

impl CliSession {
    pub fn bootstrap(overrides: CatalogOverrides, verbosity: Verbosity) -> Result<Self, CliError> {
        let config = overrides.resolve()?;
        let catalog = Arc::new(SpecCatalog::from_config(&config)?);
        Ok(Self {
            config,
            catalog,
            verbosity,
        })
    }
}
