use serde::Serialize;

use crate::config::{CatalogConfig, default_display_markers};
use crate::error::ApifyError;
use crate::metadata::{self, SpecFormat};
use crate::namespace::{FilesystemNamespace, ResourceNamespace};
use crate::scanner::{ExtensionSet, ResourceScanner, SpecDocument};

/// Display record for one discovered spec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpecSummary {
    pub id: String,
    pub filename: String,
    /// Shortened location meant for humans; not a lookup key.
    pub location: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub format: SpecFormat,
    pub size_bytes: u64,
}

impl SpecSummary {
    /// The parsed title, or the filename when the title is absent or blank.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.filename,
        }
    }
}

/// Raw bytes of a resolved spec.
#[derive(Clone, Debug)]
pub struct SpecContent {
    pub document: SpecDocument,
    pub bytes: Vec<u8>,
}

impl SpecContent {
    pub fn media_type(&self) -> &'static str {
        self.document.format.media_type()
    }
}

/// Read-only catalog over a resource namespace.
///
/// Every call rescans the namespace; nothing is cached between calls, so the
/// catalog can be shared freely across threads.
#[derive(Clone, Debug)]
pub struct SpecCatalog<N> {
    scanner: ResourceScanner<N>,
    display_markers: Vec<String>,
}

impl SpecCatalog<FilesystemNamespace> {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ApifyError> {
        config.validate()?;
        let namespace =
            FilesystemNamespace::new(config.roots.iter().cloned()).follow_links(config.follow_links);
        Ok(Self::new(namespace, config.extension_set()?)
            .with_display_markers(config.display_markers.clone()))
    }
}

impl<N: ResourceNamespace> SpecCatalog<N> {
    pub fn new(namespace: N, extensions: ExtensionSet) -> Self {
        Self {
            scanner: ResourceScanner::new(namespace, extensions),
            display_markers: default_display_markers(),
        }
    }

    pub fn with_display_markers(mut self, markers: Vec<String>) -> Self {
        self.display_markers = markers;
        self
    }

    pub fn scanner(&self) -> &ResourceScanner<N> {
        &self.scanner
    }

    /// Summaries for every discovered document, in scan order.
    pub fn list(&self) -> Result<Vec<SpecSummary>, ApifyError> {
        let documents = self.scanner.scan()?;
        Ok(documents.iter().map(|doc| self.summarize(doc)).collect())
    }

    /// Builds the summary for one document. A read failure degrades to a
    /// filename-only summary.
    pub fn summarize(&self, document: &SpecDocument) -> SpecSummary {
        let (size_bytes, meta) = match self.scanner.read(document) {
            Ok(bytes) => (
                bytes.len() as u64,
                metadata::extract(document.format, &bytes),
            ),
            Err(err) => {
                tracing::warn!(
                    location = %document.location,
                    error = %err,
                    "listing spec without metadata"
                );
                (0, Default::default())
            }
        };

        SpecSummary {
            id: document.id(),
            filename: document.filename.clone(),
            location: display_location(
                &document.location,
                &self.display_markers,
                document.relative_path.as_deref(),
            ),
            title: meta.title,
            description: meta.description,
            format: document.format,
            size_bytes,
        }
    }

    /// First document whose filename equals `id` or whose encoded location does.
    pub fn resolve(&self, id: &str) -> Result<Option<SpecDocument>, ApifyError> {
        let found = self
            .scanner
            .scan()?
            .into_iter()
            .find(|doc| doc.matches(id));
        if found.is_none() {
            tracing::debug!(id, "no spec matches id");
        }
        Ok(found)
    }

    /// Like [`SpecCatalog::resolve`], but a miss is [`ApifyError::NotFound`].
    pub fn require(&self, id: &str) -> Result<SpecDocument, ApifyError> {
        self.resolve(id)?
            .ok_or_else(|| ApifyError::NotFound(id.to_string()))
    }

    /// Resolves `id` and reads the document's bytes.
    pub fn content(&self, id: &str) -> Result<Option<SpecContent>, ApifyError> {
        let Some(document) = self.resolve(id)? else {
            return Ok(None);
        };
        let bytes = self.scanner.read(&document)?;
        Ok(Some(SpecContent { document, bytes }))
    }
}

/// Shortens a raw location for display.
///
/// The text after the first marker found wins; otherwise the path relative to
/// the search root; otherwise the raw location.
pub fn display_location(raw: &str, markers: &[String], relative_path: Option<&str>) -> String {
    for marker in markers {
        if let Some(idx) = raw.find(marker.as_str()) {
            return raw[idx + marker.len()..].to_string();
        }
    }
    relative_path.unwrap_or(raw).to_string()
}
