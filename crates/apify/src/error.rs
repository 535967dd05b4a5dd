use std::fmt;

use thiserror::Error;

/// High-level error type shared across catalog components.
///
/// Only [`ApifyError::Scan`] and [`ApifyError::Config`] are expected to reach a
/// caller of the catalog; per-document failures are recovered where they occur.
#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("scan failed: {0}")]
    Scan(String),
    #[error("unable to read {location}: {source}")]
    DocumentRead {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("metadata parse error: {0}")]
    MetadataParse(String),
    #[error("spec not found: {0}")]
    NotFound(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MetadataParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for ApifyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::MetadataParse(err.to_string())
    }
}

impl From<walkdir::Error> for ApifyError {
    fn from(err: walkdir::Error) -> Self {
        Self::Scan(err.to_string())
    }
}

impl ApifyError {
    pub fn context<T: fmt::Display>(self, ctx: T) -> Self {
        match self {
            ApifyError::Scan(msg) => ApifyError::Scan(format!("{ctx}: {msg}")),
            ApifyError::MetadataParse(msg) => {
                ApifyError::MetadataParse(format!("{ctx}: {msg}"))
            }
            ApifyError::Config(msg) => ApifyError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}
