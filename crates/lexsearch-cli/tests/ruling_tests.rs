//! Integration tests for ruling and tag commands
//!
//! These exercise the store-backed commands only; nothing here needs a
//! network or a configured AI service.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lexsearch_cmd(db_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lexsearch").unwrap();
    cmd.env("LEXSEARCH_DB", db_dir.path().join("test.sqlite"));
    cmd
}

fn add_ruling(db_dir: &TempDir, caption: &str, extra: &[&str]) {
    let mut cmd = lexsearch_cmd(db_dir);
    cmd.arg("ruling").arg("add").arg(caption).args(extra);
    cmd.assert().success();
}

#[test]
fn test_ruling_add_and_show() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling")
        .arg("add")
        .arg("Perez c/ Gomez s/ despido")
        .arg("--date")
        .arg("2024-03-15")
        .arg("--court")
        .arg("Camara del Trabajo Sala I")
        .arg("--subject-matter")
        .arg("LABORAL");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Added ruling #1"));

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling").arg("show").arg("1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Perez c/ Gomez s/ despido"))
        .stdout(predicate::str::contains("2024-03-15"))
        .stdout(predicate::str::contains("LABORAL"));
}

#[test]
fn test_ruling_add_with_text_file() {
    let db_dir = TempDir::new().unwrap();
    let text_path = db_dir.path().join("fallo.txt");
    fs::write(&text_path, "VISTO: el expediente... RESUELVE: hacer lugar.").unwrap();

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling")
        .arg("add")
        .arg("Lopez c/ Empresa SA")
        .arg("--text-file")
        .arg(&text_path);
    cmd.assert().success();
}

#[test]
fn test_ruling_show_missing_exits_not_found() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling").arg("show").arg("99");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_ruling_list_filtered() {
    let db_dir = TempDir::new().unwrap();
    add_ruling(&db_dir, "a", &["--subject-matter", "CIVIL"]);
    add_ruling(&db_dir, "b", &["--subject-matter", "LABORAL"]);
    add_ruling(&db_dir, "c", &["--subject-matter", "CIVIL"]);

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling")
        .arg("list")
        .arg("--subject-matter")
        .arg("CIVIL");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 ruling(s)"))
        .stdout(predicate::str::contains("b").not());
}

#[test]
fn test_ruling_remove() {
    let db_dir = TempDir::new().unwrap();
    add_ruling(&db_dir, "to remove", &[]);

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling").arg("rm").arg("1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Removed ruling #1"));

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling").arg("rm").arg("1");
    cmd.assert().failure().code(2);
}

#[test]
fn test_ruling_list_json_format() {
    let db_dir = TempDir::new().unwrap();
    add_ruling(&db_dir, "json case", &[]);

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("ruling").arg("list").arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"caption\": \"json case\""));
}

#[test]
fn test_tags_list_empty() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("tags").arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 tag(s)"));
}

#[test]
fn test_status_counts() {
    let db_dir = TempDir::new().unwrap();
    add_ruling(&db_dir, "one", &[]);
    add_ruling(&db_dir, "two", &[]);

    let mut cmd = lexsearch_cmd(&db_dir);
    cmd.arg("status").arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"rulings\":2"))
        .stdout(predicate::str::contains("\"missing_embeddings\":2"));
}
