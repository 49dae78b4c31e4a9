use crate::common::{cmd, data_fixture, TestContext};
use predicates::prelude::*;

#[test]
fn test_list_shows_names_and_rule_counts() {
    cmd()
        .arg("list")
        .arg("--data")
        .arg(data_fixture())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("requests.get (3 rules)"))
        .stdout(predicate::str::contains("fixture (1 rule)"))
        .stdout(predicate::str::contains("6 mocked calls"));
}

#[test]
fn test_list_rejects_invalid_rule() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file("bad.yaml", "f:\n  - args: [1]\n")
        .expect("Failed to write dataset");

    cmd()
        .arg("list")
        .arg("--data")
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rule #0 for 'f'"));
}

#[test]
fn test_list_with_malformed_config_warns_and_continues() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file(".smock.toml", "[data\n").expect("Failed to write config");

    cmd()
        .current_dir(ctx.temp_path())
        .arg("list")
        .arg("--data")
        .arg(data_fixture())
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring config file"));
}

#[test]
fn test_list_prints_summary_once_at_debug_level() {
    let output = cmd()
        .arg("-vvv")
        .arg("list")
        .arg("--data")
        .arg(data_fixture())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SMOCK_LOG_JSON")
        .output()
        .expect("Failed to run smock");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout");
    let stderr = String::from_utf8(output.stderr).expect("Invalid UTF-8 in stderr");
    assert_eq!(stdout.matches("requests.get (3 rules)").count(), 1);
    assert!(stderr.contains("Listing mocked calls"));
    assert!(!stderr.contains("requests.get (3 rules)"));
}
