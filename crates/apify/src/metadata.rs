use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApifyError;

/// Serialization format of a spec document, decided by filename suffix alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// `.json` (any case) is JSON; every other recognised name is YAML.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".json") {
            SpecFormat::Json
        } else {
            SpecFormat::Yaml
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpecFormat::Yaml => "yaml",
            SpecFormat::Json => "json",
        }
    }

    /// Content type used when serving the raw document.
    pub fn media_type(self) -> &'static str {
        match self {
            SpecFormat::Yaml => "application/yaml",
            SpecFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata projected out of a document's top-level `info` object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SpecMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Best-effort extraction: any failure yields empty metadata.
pub fn extract(format: SpecFormat, bytes: &[u8]) -> SpecMetadata {
    match try_extract(format, bytes) {
        Ok(metadata) => metadata,
        Err(err) => {
            tracing::debug!(%format, error = %err, "ignoring unparseable spec metadata");
            SpecMetadata::default()
        }
    }
}

/// Parses `bytes` and projects `info.title` / `info.description`.
///
/// Only a parse failure is an error. A missing `info` object or missing fields
/// produce empty metadata.
pub fn try_extract(format: SpecFormat, bytes: &[u8]) -> Result<SpecMetadata, ApifyError> {
    match format {
        SpecFormat::Yaml => {
            // Only the first document of a multi-document stream carries `info`.
            let Some(document) = serde_yaml::Deserializer::from_slice(bytes).next() else {
                return Ok(SpecMetadata::default());
            };
            let root = serde_yaml::Value::deserialize(document)?;
            Ok(project_yaml(&root))
        }
        SpecFormat::Json => {
            let root: serde_json::Value = serde_json::from_slice(bytes)?;
            Ok(project_json(&root))
        }
    }
}

fn project_yaml(root: &serde_yaml::Value) -> SpecMetadata {
    let Some(info) = root.get("info").and_then(serde_yaml::Value::as_mapping) else {
        return SpecMetadata::default();
    };
    SpecMetadata {
        title: info.get("title").and_then(yaml_scalar),
        description: info.get("description").and_then(yaml_scalar),
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn project_json(root: &serde_json::Value) -> SpecMetadata {
    let Some(info) = root.get("info").and_then(serde_json::Value::as_object) else {
        return SpecMetadata::default();
    };
    SpecMetadata {
        title: info.get("title").and_then(json_scalar),
        description: info.get("description").and_then(json_scalar),
    }
}

fn json_scalar(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
