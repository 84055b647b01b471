use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mirror_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rss-mirror").unwrap();
    cmd.env("MIRROR_DATA_DIR", data_dir.path());
    cmd.env_remove("MIRROR_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_list_shows_every_feed() {
    let temp_dir = TempDir::new().unwrap();

    mirror_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("journal9"))
        .stdout(predicate::str::contains("red_articles"))
        .stdout(predicate::str::contains("red_theory"))
        .stdout(predicate::str::contains("imr_issue"));
}

#[test]
fn test_list_shows_output_paths_under_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let expected = temp_dir.path().join("journal9.xml");

    mirror_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_help_shows_run_flags() {
    let temp_dir = TempDir::new().unwrap();

    mirror_cmd(&temp_dir)
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("--max-items"));
}

#[test]
fn test_unknown_source_fails_before_fetching() {
    let temp_dir = TempDir::new().unwrap();

    mirror_cmd(&temp_dir)
        .arg("run")
        .arg("--source")
        .arg("bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown feed: bogus"))
        .stderr(predicate::str::contains("known feeds: journal9, red_articles"));

    assert!(!temp_dir.path().join("bogus.xml").exists());
    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[test]
fn test_zero_max_items_rejected() {
    let temp_dir = TempDir::new().unwrap();

    mirror_cmd(&temp_dir)
        .arg("run")
        .arg("--max-items")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn test_invalid_timeout_is_config_error() {
    let temp_dir = TempDir::new().unwrap();

    mirror_cmd(&temp_dir)
        .env("MIRROR_TIMEOUT_SECS", "soon")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
