//! End-to-end tests for the pathtree binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn pathtree(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathtree"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_get() {
    let books = fixture("books.json");
    let books = books.to_str().unwrap();

    let output = pathtree(&["get", books, "books.title"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), r#"["Don Quixote","Crime and Punishment","Steppenwolf"]"#);

    let output = pathtree(&["get", books, "books.unknown", "--default", "none"]);
    assert_eq!(stdout(&output), "none");
}

#[test]
fn test_exists_sets_exit_status() {
    let books = fixture("books.xml");
    let books = books.to_str().unwrap();

    let output = pathtree(&["exists", books, "books.book.title"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "true");

    let output = pathtree(&["exists", books, "books.book.publisher"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "false");
}

#[test]
fn test_set_in_place_with_condition() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.json");
    fs::copy(fixture("books.json"), &path).unwrap();
    let file = path.to_str().unwrap();

    let output = pathtree(&["set", file, "books.classic", "true", "--if", "book.lang=es", "-i"]);
    assert!(output.status.success());

    let output = pathtree(&["get", file, "books.classic"]);
    assert_eq!(stdout(&output), "true");
}

#[test]
fn test_edit_prints_to_stdout_by_default() {
    let book = fixture("book.json");
    let output = pathtree(&["reroot", book.to_str().unwrap(), "book"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        r#"{"title":"Steppenwolf","author":"Hermann Hesse","year":1927}"#
    );
}

#[test]
fn test_checksum_of_empty_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.json");
    fs::write(&path, "{}").unwrap();

    let output = pathtree(&["checksum", path.to_str().unwrap()]);
    assert_eq!(stdout(&output), "99914b932bd37a50b983c5e7c90ae93b");
}

#[test]
fn test_unsupported_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.txt");
    fs::write(&path, "{}").unwrap();

    let output = pathtree(&["show", path.to_str().unwrap()]);
    assert!(!output.status.success());
}
