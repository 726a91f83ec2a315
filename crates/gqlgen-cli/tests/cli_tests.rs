use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const SCHEMA: &str = r#"
type Query {
    user(id: ID!): User @resolve
}

type User {
    id: ID!
    name: String
}

schema {
    query: Query
}
"#;

fn gqlgen(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gqlgen"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("GOPACKAGE")
        .output()
        .expect("failed to run gqlgen")
}

fn with_schema(source: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.graphql"), source).unwrap();
    dir
}

#[test]
fn test_list_sorted() {
    let dir = with_schema(SCHEMA);
    let out = gqlgen(&dir, &["list", "--sort", "schema.graphql"]);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Query\nUser\n");
}

#[test]
fn test_types_with_package_flag() {
    let dir = with_schema(SCHEMA);
    let out = gqlgen(&dir, &["types", "--package", "model", "schema.graphql"]);

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "package model\n\ntype ID string\n\ntype User struct {\n\tID ID `json:\"id\"`\n\tName string `json:\"name\"`\n}\n"
    );
}

#[test]
fn test_inputs_with_package_flag() {
    let dir = with_schema(SCHEMA);
    let out = gqlgen(&dir, &["inputs", "--package", "model", "schema.graphql"]);

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "package model\n\ntype ID string\n\n\ntype User struct {\n\tID ID `json:\"id\"`\n\tName string `json:\"name\"`\n}\n\ntype QueryUserArgs struct {\n\tID ID `json:\"id\"`\n}\n"
    );
}

#[test]
fn test_schema_from_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_gqlgen"))
        .args(["list", "--sort"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run gqlgen");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(SCHEMA.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "Query\nUser\n");
}

#[test]
fn test_stdin_syntax_error_names_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_gqlgen"))
        .arg("list")
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run gqlgen");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"type Query { ping: [String }")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("<stdin>:1:28"));
}

#[test]
fn test_package_from_config_file() {
    let dir = with_schema(SCHEMA);
    fs::write(dir.path().join(".gqlgenrc.toml"), "package = \"fromconfig\"\n").unwrap();

    let out = gqlgen(&dir, &["types", "schema.graphql"]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("package fromconfig\n"));
}

#[test]
fn test_types_without_package_fails() {
    let dir = with_schema(SCHEMA);
    let out = gqlgen(&dir, &["types", "schema.graphql"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("GOPACKAGE"));
}

#[test]
fn test_manifest() {
    let dir = with_schema(SCHEMA);
    let out = gqlgen(&dir, &["manifest", "schema.graphql"]);

    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(entries, serde_json::json!([{ "type": "Query", "field": "user" }]));
}

#[test]
fn test_syntax_error_exits_nonzero() {
    let dir = with_schema("type Query { ping: [String }");
    let out = gqlgen(&dir, &["list", "schema.graphql"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Parse error"));
    assert!(stderr.contains("schema.graphql:1:28"));
}
