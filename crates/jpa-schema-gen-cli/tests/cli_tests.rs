//! CLI integration tests for jpa-schema-gen.
//!
//! These tests verify command-line argument parsing, help output,
//! exit codes for the error taxonomy, and an end-to-end generate run
//! against a stub generator script.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the jpa-schema-gen binary.
fn cmd() -> Command {
    Command::cargo_bin("jpa-schema-gen").unwrap()
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("schemagen.yaml");
    std::fs::write(&path, body).unwrap();
    path
}

fn write_descriptor(dir: &TempDir, body: &str) {
    let meta_inf = dir.path().join("classes/META-INF");
    std::fs::create_dir_all(&meta_inf).unwrap();
    std::fs::write(meta_inf.join("persistence.xml"), body).unwrap();
}

fn base_config(dir: &TempDir) -> String {
    format!(
        r#"
database:
  product_name: PostgreSQL
build:
  build_dir: {0}
  output_dir: {0}/classes
"#,
        dir.path().display()
    )
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("units"));
}

#[test]
fn test_generate_subcommand_help() {
    cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--persistence-unit"))
        .stdout(predicate::str::contains("--no-format"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jpa-schema-gen"));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/schemagen.yaml", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_descriptor_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("classes")).unwrap();
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "units"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unsupported_descriptor_version_exit_code() {
    let dir = TempDir::new().unwrap();
    write_descriptor(&dir, r#"<persistence version="9.9"/>"#);
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "validate"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("9.9"));
}

#[test]
fn test_ambiguous_units_exit_code() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="a"/>
  <persistence-unit name="b"/>
</persistence>"#,
    );
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "validate"])
        .assert()
        .failure()
        .code(9)
        .stderr(predicate::str::contains("persistence_unit"));
}

#[test]
fn test_generate_without_generator_command_fails() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="orders-pu"/>
</persistence>"#,
    );
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("generator.command"));
}

// =============================================================================
// Inspection Tests
// =============================================================================

#[test]
fn test_units_lists_declared_units_in_order() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="orders-pu"/>
  <persistence-unit name="billing-pu"/>
</persistence>"#,
    );
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "units"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orders-pu").and(predicate::str::contains("billing-pu")));
}

#[test]
fn test_validate_reports_single_unit() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="orders-pu"/>
</persistence>"#,
    );
    let config = write_config(&dir, &base_config(&dir));

    cmd()
        .args(["--config", config.to_str().unwrap(), "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orders-pu"));
}

// =============================================================================
// End-to-end Generate
// =============================================================================

/// Stub generator: reads the target paths out of the properties JSON it is
/// handed and writes minimal DDL there, like the real facility would.
fn write_stub_generator(dir: &TempDir) -> std::path::PathBuf {
    let script = dir.path().join("stub-generator.sh");
    std::fs::write(
        &script,
        r#"#!/bin/sh
props="$2"
drop=$(sed -n 's/.*"javax.persistence.schema-generation.scripts.drop-target": "\([^"]*\)".*/\1/p' "$props")
create=$(sed -n 's/.*"javax.persistence.schema-generation.scripts.create-target": "\([^"]*\)".*/\1/p' "$props")
echo "drop table customer;" > "$drop"
echo "create table customer (id bigint not null, primary key (id));" > "$create"
"#,
    )
    .unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    script
}

#[test]
fn test_generate_end_to_end_with_stub_generator() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="orders-pu"/>
</persistence>"#,
    );
    let stub = write_stub_generator(&dir);
    let config = write_config(
        &dir,
        &format!(
            "{}generator:\n  command: {}\n",
            base_config(&dir),
            stub.display()
        ),
    );

    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output-json",
            "generate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unit\": \"orders-pu\""));

    let create = dir.path().join("generated-schema/create.sql");
    let drop = dir.path().join("generated-schema/drop.sql");
    assert!(create.exists());
    assert!(drop.exists());

    // Post-processing reformatted the create script.
    let text = std::fs::read_to_string(create).unwrap();
    assert!(text.contains("\n    id bigint not null,"));
}

#[test]
fn test_generate_explicit_unit_override() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="a"/>
  <persistence-unit name="b"/>
</persistence>"#,
    );
    let stub = write_stub_generator(&dir);
    let config = write_config(
        &dir,
        &format!(
            "{}generator:\n  command: {}\n",
            base_config(&dir),
            stub.display()
        ),
    );

    // Ambiguous descriptor, but the override bypasses selection.
    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "generate",
            "--persistence-unit",
            "a",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit: a"));
}

#[test]
fn test_generate_failure_propagates_exit_code() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        &dir,
        r#"<persistence version="2.1">
  <persistence-unit name="orders-pu"/>
</persistence>"#,
    );
    let config = write_config(
        &dir,
        &format!("{}generator:\n  command: /bin/false\n", base_config(&dir)),
    );

    cmd()
        .args(["--config", config.to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("Schema generation failed"));
}

#[test]
fn test_stub_generator_path_is_absolute() {
    // Guards the fixture itself: relative stub paths would depend on the
    // test runner's working directory.
    let dir = TempDir::new().unwrap();
    let stub = write_stub_generator(&dir);
    assert!(Path::new(&stub).is_absolute());
}
