use serde::Serialize;

use crate::error::ApifyError;
use crate::identifier;
use crate::metadata::SpecFormat;
use crate::namespace::ResourceNamespace;

/// Case-insensitive set of recognised document suffixes, stored without dots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Result<Self, ApifyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() {
                return Err(ApifyError::Config("extension must not be empty".into()));
            }
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        if normalized.is_empty() {
            return Err(ApifyError::Config(
                "at least one document extension is required".into(),
            ));
        }
        Ok(Self {
            extensions: normalized,
        })
    }

    pub fn matches(&self, filename: &str) -> bool {
        let lower = filename.to_ascii_lowercase();
        self.extensions.iter().any(|ext| {
            lower
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: vec!["yaml".into(), "yml".into(), "json".into()],
        }
    }
}

/// Handle to one discovered spec document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpecDocument {
    pub location: String,
    pub filename: String,
    pub format: SpecFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

impl SpecDocument {
    pub fn id(&self) -> String {
        identifier::encode(&self.location)
    }

    pub fn matches(&self, id: &str) -> bool {
        identifier::matches(id, &self.location, Some(&self.filename))
    }
}

/// Filters a namespace down to spec documents.
#[derive(Clone, Debug)]
pub struct ResourceScanner<N> {
    namespace: N,
    extensions: ExtensionSet,
}

impl<N: ResourceNamespace> ResourceScanner<N> {
    pub fn new(namespace: N, extensions: ExtensionSet) -> Self {
        Self {
            namespace,
            extensions,
        }
    }

    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// Enumerates matching documents, sorted and deduplicated by location.
    /// Entries without a filename are dropped.
    pub fn scan(&self) -> Result<Vec<SpecDocument>, ApifyError> {
        let mut documents: Vec<SpecDocument> = self
            .namespace
            .entries()?
            .into_iter()
            .filter_map(|entry| {
                let Some(filename) = entry.filename else {
                    tracing::debug!(location = %entry.location, "skipping resource without filename");
                    return None;
                };
                if !self.extensions.matches(&filename) {
                    return None;
                }
                Some(SpecDocument {
                    format: SpecFormat::from_filename(&filename),
                    location: entry.location,
                    filename,
                    relative_path: entry.relative_path,
                })
            })
            .collect();

        documents.sort_by(|a, b| a.location.cmp(&b.location));
        documents.dedup_by(|a, b| a.location == b.location);
        tracing::debug!(count = documents.len(), "scanned spec documents");
        Ok(documents)
    }

    pub fn read(&self, document: &SpecDocument) -> Result<Vec<u8>, ApifyError> {
        self.namespace.read(&document.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::InMemoryNamespace;

    #[test]
    fn extension_set_normalizes_input() {
        let set = ExtensionSet::new([".YAML", "json", "yaml"]).unwrap();
        assert_eq!(set.as_slice(), ["yaml".to_string(), "json".to_string()]);
        assert!(set.matches("api.yaml"));
        assert!(set.matches("API.Yaml"));
        assert!(set.matches("api.json"));
        assert!(!set.matches("api.yml"));
        assert!(!set.matches("apiyaml"));
    }

    #[test]
    fn extension_set_rejects_empty_input() {
        assert!(matches!(
            ExtensionSet::new(Vec::<String>::new()),
            Err(ApifyError::Config(_))
        ));
        assert!(matches!(ExtensionSet::new([" . "]), Err(ApifyError::Config(_))));
    }

    #[test]
    fn scan_filters_sorts_and_drops_nameless_entries() {
        let namespace = InMemoryNamespace::new()
            .with_resource("b!/zeta.yaml", "info: {}")
            .with_resource("a!/alpha.json", "{}")
            .with_resource("a!/readme.md", "# hi")
            .with_resource("a!/dir/", "");
        let scanner = ResourceScanner::new(namespace, ExtensionSet::default());

        let docs = scanner.scan().unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, ["alpha.json", "zeta.yaml"]);
        assert_eq!(docs[0].format, SpecFormat::Json);
        assert_eq!(docs[1].format, SpecFormat::Yaml);
    }

    #[test]
    fn document_matches_id_or_filename() {
        let doc = SpecDocument {
            location: "archive!/petstore.yaml".into(),
            filename: "petstore.yaml".into(),
            format: SpecFormat::Yaml,
            relative_path: None,
        };
        assert!(doc.matches(&doc.id()));
        assert!(doc.matches("petstore.yaml"));
        assert!(!doc.matches("orders.yaml"));
    }
}
