use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;
use walkdir::WalkDir;

use crate::error::ApifyError;

/// A loadable resource as seen by a namespace, before extension filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    pub location: String,
    pub filename: Option<String>,
    /// Path below the search root the entry was found under, `/`-separated.
    pub relative_path: Option<String>,
}

/// Tree of loadable documents the scanner searches.
pub trait ResourceNamespace: Send + Sync {
    /// Enumerates every resource in the namespace. Unreadable individual
    /// entries are skipped; only a failure of the enumeration itself errors.
    fn entries(&self) -> Result<Vec<ResourceEntry>, ApifyError>;

    /// Reads the full content of the resource at `location`.
    fn read(&self, location: &str) -> Result<Vec<u8>, ApifyError>;
}

impl<N> ResourceNamespace for Arc<N>
where
    N: ResourceNamespace + ?Sized,
{
    fn entries(&self) -> Result<Vec<ResourceEntry>, ApifyError> {
        (**self).entries()
    }

    fn read(&self, location: &str) -> Result<Vec<u8>, ApifyError> {
        (**self).read(location)
    }
}

impl<N> ResourceNamespace for Box<N>
where
    N: ResourceNamespace + ?Sized,
{
    fn entries(&self) -> Result<Vec<ResourceEntry>, ApifyError> {
        (**self).entries()
    }

    fn read(&self, location: &str) -> Result<Vec<u8>, ApifyError> {
        (**self).read(location)
    }
}

/// Last `/`-separated segment of a location, or `None` when it is empty.
pub fn filename_of(location: &str) -> Option<&str> {
    let name = location.rsplit('/').next().unwrap_or(location);
    if name.is_empty() { None } else { Some(name) }
}

/// Directory roots walked recursively. Locations are `file://` URLs.
#[derive(Clone, Debug)]
pub struct FilesystemNamespace {
    roots: Vec<PathBuf>,
    follow_links: bool,
}

impl FilesystemNamespace {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn walk_root(&self, root: &Path, out: &mut Vec<ResourceEntry>) -> Result<(), ApifyError> {
        if !root.is_dir() {
            return Err(ApifyError::Scan(format!(
                "search root {} is not a directory",
                root.display()
            )));
        }
        let root = fs::canonicalize(root)
            .map_err(|err| ApifyError::Scan(format!("{}: {err}", root.display())))?;

        for result in WalkDir::new(&root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ApifyError::from(err).context(root.display()));
                }
                Err(err) => {
                    tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            // Without link following, a linked file still counts when its target is a file.
            let file_type = entry.file_type();
            if !(file_type.is_file() || (file_type.is_symlink() && path.is_file())) {
                continue;
            }

            let Ok(url) = Url::from_file_path(path) else {
                tracing::warn!(path = %path.display(), "skipping path without a file URL form");
                continue;
            };
            let relative_path = path.strip_prefix(&root).ok().map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            });

            out.push(ResourceEntry {
                location: url.to_string(),
                filename: entry.file_name().to_str().map(str::to_owned),
                relative_path,
            });
        }
        Ok(())
    }
}

impl ResourceNamespace for FilesystemNamespace {
    fn entries(&self) -> Result<Vec<ResourceEntry>, ApifyError> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.walk_root(root, &mut out)?;
        }
        Ok(out)
    }

    fn read(&self, location: &str) -> Result<Vec<u8>, ApifyError> {
        let path = Url::parse(location)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| ApifyError::DocumentRead {
                location: location.to_string(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a file URL"),
            })?;
        fs::read(&path).map_err(|source| ApifyError::DocumentRead {
            location: location.to_string(),
            source,
        })
    }
}

/// Fixed set of resources keyed by location, for embedded or packaged specs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryNamespace {
    resources: BTreeMap<String, Vec<u8>>,
}

impl InMemoryNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(location, bytes);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(location.into(), bytes.into());
    }
}

impl ResourceNamespace for InMemoryNamespace {
    fn entries(&self) -> Result<Vec<ResourceEntry>, ApifyError> {
        Ok(self
            .resources
            .keys()
            .map(|location| ResourceEntry {
                location: location.clone(),
                filename: filename_of(location).map(str::to_owned),
                relative_path: None,
            })
            .collect())
    }

    fn read(&self, location: &str) -> Result<Vec<u8>, ApifyError> {
        self.resources
            .get(location)
            .cloned()
            .ok_or_else(|| ApifyError::DocumentRead {
                location: location.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such resource"),
            })
    }
}
