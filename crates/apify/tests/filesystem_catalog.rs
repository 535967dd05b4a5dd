use std::fs;
use std::path::Path;

use apify::{ApifyError, CatalogConfig, SpecCatalog, SpecFormat, decode_id, encode_id};
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn catalog_for(root: &Path) -> SpecCatalog<apify::FilesystemNamespace> {
    let config = CatalogConfig {
        roots: vec![root.to_path_buf()],
        ..CatalogConfig::default()
    };
    SpecCatalog::from_config(&config).unwrap()
}

#[test]
fn lists_specs_across_nested_directories() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "petstore.yaml",
        "openapi: 3.0.0\ninfo:\n  title: Petstore\n  description: A sample API\n",
    );
    write(
        temp.path(),
        "billing/v2/invoices.json",
        r#"{"openapi":"3.1.0","info":{"title":"Invoices"}}"#,
    );
    write(temp.path(), "notes/readme.md", "# not a spec");

    let specs = catalog_for(temp.path()).list().unwrap();
    assert_eq!(specs.len(), 2);

    let invoices = specs.iter().find(|s| s.filename == "invoices.json").unwrap();
    assert_eq!(invoices.format, SpecFormat::Json);
    assert_eq!(invoices.title.as_deref(), Some("Invoices"));
    assert_eq!(invoices.description, None);
    assert_eq!(invoices.location, "billing/v2/invoices.json");

    let petstore = specs.iter().find(|s| s.filename == "petstore.yaml").unwrap();
    assert_eq!(petstore.format, SpecFormat::Yaml);
    assert_eq!(petstore.description.as_deref(), Some("A sample API"));
    assert!(decode_id(&petstore.id).unwrap().starts_with("file://"));
}

#[test]
fn listing_is_stable_between_calls() {
    let temp = tempdir().unwrap();
    write(temp.path(), "b.yaml", "info:\n  title: B\n");
    write(temp.path(), "a/a.yaml", "info:\n  title: A\n");
    write(temp.path(), "c.yml", "info:\n  title: C\n");

    let catalog = catalog_for(temp.path());
    let first = catalog.list().unwrap();
    let second = catalog.list().unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_listed_id_resolves_back_to_its_document() {
    let temp = tempdir().unwrap();
    write(temp.path(), "one.yaml", "info:\n  title: One\n");
    write(temp.path(), "nested/two.json", "{}");

    let catalog = catalog_for(temp.path());
    for summary in catalog.list().unwrap() {
        let document = catalog.resolve(&summary.id).unwrap().expect("id resolves");
        assert_eq!(document.filename, summary.filename);
        assert_eq!(encode_id(&document.location), summary.id);
    }
}

#[test]
fn filename_lookup_returns_first_match_in_scan_order() {
    let temp = tempdir().unwrap();
    write(temp.path(), "a/api.yaml", "info:\n  title: First\n");
    write(temp.path(), "b/api.yaml", "info:\n  title: Second\n");

    let catalog = catalog_for(temp.path());
    let document = catalog.resolve("api.yaml").unwrap().unwrap();
    assert_eq!(document.relative_path.as_deref(), Some("a/api.yaml"));

    let content = catalog.content("api.yaml").unwrap().unwrap();
    assert_eq!(content.bytes, b"info:\n  title: First\n");
    assert_eq!(content.media_type(), "application/yaml");
}

#[test]
fn malformed_spec_is_listed_with_filename_fallback() {
    let temp = tempdir().unwrap();
    write(temp.path(), "broken.yaml", "info: [oops\n  title: Hidden\n");

    let specs = catalog_for(temp.path()).list().unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].display_title(), "broken.yaml");
    assert_eq!(specs[0].description, None);
    assert!(specs[0].size_bytes > 0);
}

#[test]
fn extension_filter_is_configurable() {
    let temp = tempdir().unwrap();
    write(temp.path(), "a.yaml", "info: {}\n");
    write(temp.path(), "b.json", "{}");

    let config = CatalogConfig {
        roots: vec![temp.path().to_path_buf()],
        extensions: vec!["json".into()],
        ..CatalogConfig::default()
    };
    let specs = SpecCatalog::from_config(&config).unwrap().list().unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, ["b.json"]);
}

#[test]
fn missing_root_fails_the_whole_scan() {
    let temp = tempdir().unwrap();
    let catalog = catalog_for(&temp.path().join("missing"));

    assert!(matches!(catalog.list(), Err(ApifyError::Scan(_))));
    assert!(matches!(catalog.resolve("x.yaml"), Err(ApifyError::Scan(_))));
}

#[test]
fn unknown_id_is_not_found() {
    let temp = tempdir().unwrap();
    write(temp.path(), "a.yaml", "info: {}\n");

    let catalog = catalog_for(temp.path());
    assert!(catalog.resolve("nonexistent-id").unwrap().is_none());
}

#[cfg(unix)]
#[test]
fn symlinked_spec_files_are_listed_without_following_links() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("specs");
    write(&root, "plain.yaml", "info:\n  title: Plain\n");
    write(temp.path(), "store/real.yaml", "info:\n  title: Linked\n");
    std::os::unix::fs::symlink("../store/real.yaml", root.join("linked.yaml")).unwrap();

    let catalog = catalog_for(&root);
    let specs = catalog.list().unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, ["linked.yaml", "plain.yaml"]);

    let linked = specs.iter().find(|s| s.filename == "linked.yaml").unwrap();
    assert_eq!(linked.title.as_deref(), Some("Linked"));
    assert_eq!(linked.location, "linked.yaml");

    let content = catalog.content("linked.yaml").unwrap().unwrap();
    assert_eq!(content.bytes, b"info:\n  title: Linked\n");
}

#[cfg(unix)]
#[test]
fn walk_errors_below_the_root_skip_only_that_entry() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("specs");
    write(&root, "ok.yaml", "info:\n  title: Ok\n");
    write(&root, "dir/inner.yaml", "info:\n  title: Inner\n");
    // Followed, this link loops back to the root and walkdir reports an error below it.
    std::os::unix::fs::symlink("..", root.join("dir").join("loop")).unwrap();

    let config = CatalogConfig {
        roots: vec![root.clone()],
        follow_links: true,
        ..CatalogConfig::default()
    };
    let specs = SpecCatalog::from_config(&config).unwrap().list().unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, ["inner.yaml", "ok.yaml"]);
}
