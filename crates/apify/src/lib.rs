pub mod catalog;
pub mod config;
pub mod error;
pub mod identifier;
pub mod metadata;
pub mod namespace;
pub mod scanner;

pub use catalog::{SpecCatalog, SpecContent, SpecSummary, display_location};
pub use config::CatalogConfig;
pub use error::ApifyError;
pub use identifier::{decode as decode_id, encode as encode_id, matches as id_matches};
pub use metadata::{SpecFormat, SpecMetadata, extract as extract_metadata, try_extract};
pub use namespace::{
    FilesystemNamespace, InMemoryNamespace, ResourceEntry, ResourceNamespace, filename_of,
};
pub use scanner::{ExtensionSet, ResourceScanner, SpecDocument};
