use crate::common::{cmd, data_fixture, stdout_json, TestContext};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_query_prints_result_as_json() {
    let output = cmd()
        .arg("query")
        .arg("--data")
        .arg(data_fixture())
        .arg("requests.get")
        .args(["--args", r#"["https://mocked.url"]"#])
        .output()
        .expect("Failed to run query");

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["status_code"], json!(200));
    assert_eq!(value["content"], json!("Gocha!"));
}

#[test]
fn test_query_with_kwargs() {
    let output = cmd()
        .arg("query")
        .arg("-d")
        .arg(data_fixture())
        .arg("requests.get")
        .args(["-a", r#"["https://mocked.url"]"#, "-k", r#"{"data": "x"}"#])
        .output()
        .expect("Failed to run query");

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["content"], json!("Mocked query"));
}

#[test]
fn test_query_pretty_output() {
    cmd()
        .arg("query")
        .arg("--data")
        .arg(data_fixture())
        .arg("testjsonable")
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"a\": 1"));
}

#[test]
fn test_query_unknown_name_fails() {
    cmd()
        .arg("query")
        .arg("--data")
        .arg(data_fixture())
        .arg("requests.post")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown method for mocking"));
}

#[test]
fn test_query_declared_error_fails_with_message() {
    cmd()
        .arg("query")
        .arg("--data")
        .arg(data_fixture())
        .arg("db.query")
        .args(["--args", r#"["DROP TABLE users"]"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn test_query_invalid_kwargs() {
    cmd()
        .arg("query")
        .arg("--data")
        .arg(data_fixture())
        .arg("requests.get")
        .args(["--kwargs", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_query_without_dataset() {
    let ctx = TestContext::new().expect("Failed to create test context");
    cmd()
        .current_dir(ctx.temp_path())
        .args(["query", "requests.get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dataset given"));
}

#[test]
fn test_query_uses_configured_sources() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file("mocks.yaml", "clock.now:\n  - result: 1700000000\n")
        .expect("Failed to write dataset");
    ctx.create_file(".smock.toml", "[data]\nsources = [\"mocks.yaml\"]\n")
        .expect("Failed to write config");

    cmd()
        .current_dir(ctx.temp_path())
        .args(["query", "clock.now"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1700000000\n"));
}
