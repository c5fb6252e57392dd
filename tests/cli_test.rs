#![cfg(unix)]

mod common;

use common::{FakeClient, MEETINGS_OUTPUT, POSTS_OUTPUT};
use std::process::{Command, Output};
use tempfile::TempDir;

fn command(bin: &str) -> Command {
    let mut command = Command::new(bin);
    command
        .env("MBTA_SQL_SERVER", "sql.example.com")
        .env("MBTA_SQL_USERNAME", "importer")
        .env("MBTA_SQL_PASSWORD", "s3cret")
        .env("MBTA_SQL_DATABASE", "cms")
        .env_remove("RUST_LOG");
    command
}

fn run(bin: &str, args: &[&str]) -> Output {
    command(bin).args(args).output().unwrap()
}

#[test]
fn test_missing_target_dir_prints_usage() {
    let output = run(env!("CARGO_BIN_EXE_import_posts"), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: "));
    assert!(stdout.contains("<directory to put posts in>"));
}

#[test]
fn test_import_meetings_binary() {
    let work_dir = TempDir::new().unwrap();
    let target_dir = work_dir.path().join("meetings");
    let client = FakeClient::new(work_dir.path(), MEETINGS_OUTPUT);

    let output = run(
        env!("CARGO_BIN_EXE_import_meetings"),
        &["--client", &client.program(), target_dir.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert!(target_dir.join("2020-01-15-4821.json").exists());
    assert!(target_dir.join("2020-03-09-4823.json").exists());
    assert!(!target_dir.join("2020-02-01-4822.json").exists());
}

#[test]
fn test_import_posts_binary() {
    let work_dir = TempDir::new().unwrap();
    let client = FakeClient::new(work_dir.path(), POSTS_OUTPUT);
    let target_dir = work_dir.path().join("posts");
    std::fs::create_dir(&target_dir).unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_import_posts"),
        &["--client", &client.program(), target_dir.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert_eq!(
        std::fs::read_to_string(target_dir.join("2020-01-15-4821.md")).unwrap(),
        "---\nlocation: Room A\n---\nBody text\n"
    );
}

#[test]
fn test_generic_binary_with_profile_file() {
    let work_dir = TempDir::new().unwrap();
    let client = FakeClient::new(work_dir.path(), MEETINGS_OUTPUT);
    let target_dir = work_dir.path().join("events");

    let profile_path = work_dir.path().join("events.toml");
    std::fs::write(
        &profile_path,
        format!(
            r#"
[profile]
name = "events"
query_filter = 'xml_config_id="41"'
format = "json"
create_target_dir = true
id_field = "event_id"

[client]
program = "{}"
"#,
            client.program()
        ),
    )
    .unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_content-import"),
        &["--config", profile_path.to_str().unwrap(), target_dir.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let value: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(target_dir.join("2020-01-15-4821.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(value["event_id"], "4821");
    assert!(value.get("meeting_id").is_none());
}

#[test]
fn test_client_failure_exits_with_one() {
    let work_dir = TempDir::new().unwrap();
    let client = FakeClient::failing(work_dir.path(), "Login failed for user", 1);
    let target_dir = work_dir.path().join("meetings");

    let output = run(
        env!("CARGO_BIN_EXE_import_meetings"),
        &["--client", &client.program(), target_dir.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR: while calling"));
    assert!(stdout.contains("Login failed for user"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));
    assert_eq!(std::fs::read_dir(&target_dir).unwrap().count(), 0);
}

#[test]
fn test_missing_environment_variable() {
    let work_dir = TempDir::new().unwrap();
    let client = FakeClient::new(work_dir.path(), MEETINGS_OUTPUT);
    let target_dir = work_dir.path().join("meetings");

    let output = command(env!("CARGO_BIN_EXE_import_meetings"))
        .env_remove("MBTA_SQL_PASSWORD")
        .args(["--client", client.program().as_str(), target_dir.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("MBTA_SQL_PASSWORD"));
    assert!(!client.args_file.exists());
}

#[test]
fn test_missing_body_field_exits_with_three() {
    let work_dir = TempDir::new().unwrap();
    let client = FakeClient::new(
        work_dir.path(),
        "header\n2020-01-15 10:30:00\n7\n<root><Title>No body</Title></root>\n@SEP@\n",
    );

    let output = run(
        env!("CARGO_BIN_EXE_import_posts"),
        &["--client", &client.program(), work_dir.path().to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Information"));
}
