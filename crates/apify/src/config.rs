use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ApifyError;
use crate::scanner::ExtensionSet;

/// Where to look for spec documents and how to present their locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub display_markers: Vec<String>,
    pub follow_links: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
            extensions: ExtensionSet::default().as_slice().to_vec(),
            display_markers: default_display_markers(),
            follow_links: false,
        }
    }
}

/// Markers cut from raw locations for display, tried in order.
pub fn default_display_markers() -> Vec<String> {
    vec!["/classes/".into(), "!/".into()]
}

impl CatalogConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ApifyError> {
        let config: CatalogConfig =
            serde_yaml::from_str(raw).map_err(|err| ApifyError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApifyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| ApifyError::Config(format!("{}: {err}", path.display())))?;
        Self::from_yaml_str(&raw).map_err(|err| err.context(path.display()))
    }

    pub fn validate(&self) -> Result<(), ApifyError> {
        if self.roots.is_empty() {
            return Err(ApifyError::Config(
                "at least one search root is required".into(),
            ));
        }
        self.extension_set()?;
        Ok(())
    }

    pub fn extension_set(&self) -> Result<ExtensionSet, ApifyError> {
        ExtensionSet::new(&self.extensions)
    }
}
