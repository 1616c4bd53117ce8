use std::fs;
use std::path::Path;

use confspec_core::Node;
use confspec_loader::{DocumentBuilder, LoaderError};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_standard_layering_precedence() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "config.yml", "foo: base\nonly_base: true\n");
    write_file(dir.path(), "config.local.yml", "foo: local\n");
    write_file(dir.path(), "billing.yml", "foo: service\n");

    let document = DocumentBuilder::standard(dir.path(), Some("billing"))
        .build_with(|_| None)
        .unwrap();

    assert_eq!(document.subtree("foo"), Some(&Node::scalar("service")));
    assert_eq!(document.subtree("only_base"), Some(&Node::scalar("true")));
}

#[test]
fn test_missing_standard_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "config.yml", "foo: base\n");

    let document = DocumentBuilder::standard(dir.path(), None)
        .build_with(|_| None)
        .unwrap();

    assert_eq!(document.subtree("foo"), Some(&Node::scalar("base")));
}

#[test]
fn test_caller_source_beats_override_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "config.yml", "foo: default\n");
    let env_file = write_file(dir.path(), "env.yml", "foo: env\n");
    let cli_file = write_file(dir.path(), "cli.yml", "foo: cli\n");

    let document = DocumentBuilder::standard(dir.path(), None)
        .with_override_path(Some(&env_file))
        .unwrap()
        .with_file(&cli_file)
        .build_with(|_| None)
        .unwrap();

    assert_eq!(document.subtree("foo"), Some(&Node::scalar("cli")));
}

#[test]
fn test_override_file_beats_default() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "config.yml", "foo: default\n");
    let env_file = write_file(dir.path(), "env.yml", "foo: env\n");

    let document = DocumentBuilder::standard(dir.path(), None)
        .with_override_path(Some(&env_file))
        .unwrap()
        .build_with(|_| None)
        .unwrap();

    assert_eq!(document.subtree("foo"), Some(&Node::scalar("env")));
}

#[test]
fn test_missing_override_path_errors() {
    let dir = tempfile::tempdir().unwrap();

    let err = DocumentBuilder::new()
        .with_override_path(Some(dir.path().join("missing.yml")))
        .unwrap_err();

    assert!(matches!(err, LoaderError::Source { .. }));
}

#[test]
fn test_required_file_must_be_readable() {
    let err = DocumentBuilder::new()
        .with_file("/nonexistent/config.yml")
        .build_with(|_| None)
        .unwrap_err();

    assert!(matches!(err, LoaderError::Source { .. }));
}

#[test]
fn test_defaults_sit_below_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "config.yml", "http:\n  addr: \":9090\"\n");

    let defaults = Node::mapping([(
        "http",
        Node::mapping([
            ("addr", Node::scalar(":8080")),
            ("timeout", Node::scalar("5s")),
        ]),
    )]);

    let document = DocumentBuilder::new()
        .with_value(defaults)
        .with_optional_file(dir.path().join("config.yml"))
        .build_with(|_| None)
        .unwrap();

    assert_eq!(document.subtree("http.addr"), Some(&Node::scalar(":9090")));
    assert_eq!(document.subtree("http.timeout"), Some(&Node::scalar("5s")));
}
