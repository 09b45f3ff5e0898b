use assert_cmd::Command;
use predicates::prelude::*;

use recur::error::exit_codes;

fn recur_cmd() -> Command {
    let mut cmd = Command::cargo_bin("recur").expect("binary");
    cmd.env_remove("TODOIST_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_describes_the_surface() {
    recur_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--log-file"))
        .stdout(predicate::str::contains("--token"))
        .stdout(predicate::str::contains("TODOIST_TOKEN"));
}

#[test]
fn missing_config_file_fails_initialization() {
    let dir = tempfile::tempdir().expect("tempdir");
    recur_cmd()
        .arg(dir.path().join("no-such.toml"))
        .assert()
        .failure()
        .code(exit_codes::INIT_FAILED);
}

#[test]
fn invalid_config_fails_initialization() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recur.toml");
    std::fs::write(&path, "rules = 3").expect("write config");

    recur_cmd()
        .arg(&path)
        .assert()
        .failure()
        .code(exit_codes::INIT_FAILED);
}

#[test]
fn missing_token_fails_before_any_network_call() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recur.toml");
    std::fs::write(
        &path,
        r#"
[[rules]]
recreate_on_complete = true

[rules.filter]
project = "Chores"
"#,
    )
    .expect("write config");

    recur_cmd()
        .arg(&path)
        .assert()
        .failure()
        .code(exit_codes::INIT_FAILED)
        .stderr(predicate::str::contains("TODOIST_TOKEN"));
}
