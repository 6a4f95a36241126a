//! Integration tests for the `scaffold` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn scaffold(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scaffold"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("templates")).unwrap();
    fs::write(
        dir.path().join("templates/model.txt"),
        "package ${package};\nclass ${Entity} {\n{% for f in fields %}  ${f.type} ${f.name};\n{% endfor %}}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("scaffold.toml"),
        "template_root = \"templates\"\noutput_root = \"out\"\n",
    )
    .unwrap();
    dir
}

/// Test that a render creates the file once and skips it afterwards
#[test]
fn test_render_is_idempotent() {
    let dir = project();
    let args = [
        "--config",
        "scaffold.toml",
        "render",
        "model.txt",
        "${Entity}.txt",
        "--namespace",
        "ca.example",
        "--name",
        "Invoice",
        "--field",
        "id:Long",
        "--field",
        "INSTANCE:Invoice:static",
    ];

    let first = scaffold(dir.path(), &args);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(String::from_utf8_lossy(&first.stdout).contains("Creating"));

    let target = dir.path().join("out/Invoice.txt");
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "package ca.example;\nclass Invoice {\n  Long id;\n}\n"
    );

    fs::write(&target, "hand edited").unwrap();
    let second = scaffold(dir.path(), &args);
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stdout).contains("Skipping"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "hand edited");
}

/// Test that a missing template fails the process and writes nothing
#[test]
fn test_missing_template_fails() {
    let dir = project();
    let output = scaffold(
        dir.path(),
        &["render", "absent.txt", "${Entity}.txt", "--name", "Invoice"],
    );

    assert!(!output.status.success());
    assert!(!dir.path().join("out").exists());
}

/// Test that the context command prints the merge keys as JSON
#[test]
fn test_context_json() {
    let dir = project();
    let output = scaffold(
        dir.path(),
        &["context", "--namespace", "ca.example", "--name", "Invoice", "--field", "id:Long"],
    );
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["package"], "ca.example");
    assert_eq!(json["Entity"], "Invoice");
    assert_eq!(json["entity"], "invoice");
    assert_eq!(json["fields"][0]["type"], "Long");
    assert_eq!(json["scaffold"], "ca.example.Invoice");
}

/// Test that a recipe renders all of its units
#[test]
fn test_run_recipe() {
    let dir = project();
    fs::write(
        dir.path().join("recipe.toml"),
        r#"
[entity]
namespace = "ca.example"
name = "Invoice"

[[render]]
template = "model.txt"
output = "${Entity}.txt"

[[render]]
template = "model.txt"
output = "copy/${entity}.txt"
"#,
    )
    .unwrap();

    let output = scaffold(dir.path(), &["run", "recipe.toml"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("out/Invoice.txt").is_file());
    assert!(dir.path().join("out/copy/invoice.txt").is_file());
}
