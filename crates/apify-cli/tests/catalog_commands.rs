use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_apify"))
}

fn seed_specs(root: &Path) {
    fs::create_dir_all(root.join("billing")).unwrap();
    fs::write(
        root.join("petstore.yaml"),
        "openapi: 3.0.0\ninfo:\n  title: Petstore\n  description: A sample API\n",
    )
    .unwrap();
    fs::write(
        root.join("billing").join("invoices.json"),
        r#"{"openapi":"3.1.0","info":{"title":"Invoices"}}"#,
    )
    .unwrap();
    fs::write(root.join("broken.yaml"), "info: [oops\n").unwrap();
}

#[test]
fn list_prints_every_spec() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());

    cli()
        .arg("--root")
        .arg(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("API specs (3):"))
        .stdout(contains("Petstore [yaml] petstore.yaml"))
        .stdout(contains("Invoices [json] billing/invoices.json"))
        .stdout(contains("broken.yaml [yaml] broken.yaml"));
    Ok(())
}

#[test]
fn list_json_emits_summaries() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());

    let output = cli()
        .arg("--root")
        .arg(temp.path())
        .arg("--json")
        .arg("list")
        .output()?;
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["type"], "spec_list");
    let specs = payload["specs"].as_array().unwrap();
    assert_eq!(specs.len(), 3);
    let petstore = specs
        .iter()
        .find(|s| s["filename"] == "petstore.yaml")
        .unwrap();
    assert_eq!(petstore["title"], "Petstore");
    assert_eq!(petstore["description"], "A sample API");
    assert_eq!(petstore["format"], "yaml");
    Ok(())
}

#[test]
fn content_by_filename_prints_raw_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());

    cli()
        .arg("--root")
        .arg(temp.path())
        .args(["content", "invoices.json"])
        .assert()
        .success()
        .stdout(r#"{"openapi":"3.1.0","info":{"title":"Invoices"}}"#);
    Ok(())
}

#[test]
fn show_resolves_listed_id() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());

    let output = cli()
        .arg("--root")
        .arg(temp.path())
        .arg("--json")
        .arg("list")
        .output()?;
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let id = payload["specs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["filename"] == "petstore.yaml")
        .and_then(|s| s["id"].as_str())
        .unwrap()
        .to_string();

    cli()
        .arg("--root")
        .arg(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Petstore"))
        .stdout(contains("Format: yaml"))
        .stdout(contains("Description: A sample API"));
    Ok(())
}

#[test]
fn unknown_id_exits_with_noinput() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());

    cli()
        .arg("--root")
        .arg(temp.path())
        .args(["content", "nonexistent-id"])
        .assert()
        .failure()
        .code(66)
        .stderr(contains("spec not found: nonexistent-id"));
    Ok(())
}

#[test]
fn missing_root_is_io_failure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    cli()
        .arg("--root")
        .arg(temp.path().join("absent"))
        .arg("list")
        .assert()
        .failure()
        .code(74)
        .stderr(contains("scan failed"));
    Ok(())
}

#[test]
fn config_file_and_ext_flag_apply() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    seed_specs(temp.path());
    let config = temp.path().join("apify-config.yml");
    fs::write(
        &config,
        format!("roots:\n  - {}\n", temp.path().display()),
    )?;

    cli()
        .arg("--config")
        .arg(&config)
        .args(["--ext", "json", "list"])
        .assert()
        .success()
        .stdout(contains("API specs (1):"))
        .stdout(contains("Invoices"));
    Ok(())
}

#[test]
fn invalid_config_exits_with_config_status() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("apify.yaml");
    fs::write(&config, "roots: []\n")?;

    cli()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .failure()
        .code(78);
    Ok(())
}
