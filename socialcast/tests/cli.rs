use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn no_arguments_prints_usage_and_fails() {
    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_fails_fast_without_an_api_key() {
    let workdir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.current_dir(workdir.path())
        .env_remove("OPENAI_API_KEY")
        .arg("generate")
        .arg("some-page.md");

    // Configuration errors are fatal before any work begins, so the
    // missing page path is never even read.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn post_fails_fast_without_x_credentials() {
    let workdir = tempdir().unwrap();
    fs::create_dir_all(workdir.path().join("my-page")).unwrap();

    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.current_dir(workdir.path())
        .env_remove("X_API_KEY")
        .env_remove("X_API_SECRET")
        .env_remove("X_ACCESS_TOKEN")
        .env_remove("X_ACCESS_SECRET")
        .arg("post")
        .arg("my-page");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));
}

#[test]
fn dry_run_posts_a_page_folder_offline() {
    let workdir = tempdir().unwrap();
    let page = workdir.path().join("my-page");
    fs::create_dir_all(page.join("X")).unwrap();
    fs::write(page.join("X").join("content.txt"), "Hello from the CLI\n").unwrap();

    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.current_dir(workdir.path())
        .arg("post")
        .arg("my-page")
        .arg("--dry-run")
        .arg("--delay")
        .arg("0")
        .arg("--output")
        .arg("results.json")
        .arg("--file-output-dir")
        .arg("sink");

    cmd.assert().success();

    let run_level: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(workdir.path().join("results.json")).unwrap())
            .unwrap();
    let results = run_level.as_array().expect("Run-level file is an array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["platform"], "X");
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[0]["page_name"], "my-page");

    assert!(
        page.join("X").join("posting_results.json").exists(),
        "Per-platform result file must be written"
    );

    let sink_files: Vec<_> = fs::read_dir(workdir.path().join("sink"))
        .expect("File sink directory must exist")
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(sink_files.len(), 1);
    let posted = fs::read_to_string(&sink_files[0]).unwrap();
    assert!(
        posted.starts_with("Hello from the CLI"),
        "Sink file must start with the posted content: {posted}"
    );
}

#[test]
fn dry_run_skips_unsupported_platform_folders() {
    let workdir = tempdir().unwrap();
    let page = workdir.path().join("my-page");
    fs::create_dir_all(page.join("Mastodon")).unwrap();
    fs::write(page.join("Mastodon").join("content.txt"), "toot").unwrap();

    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.current_dir(workdir.path())
        .arg("post")
        .arg("my-page")
        .arg("--dry-run")
        .arg("--delay")
        .arg("0")
        .arg("--output")
        .arg("results.json");

    cmd.assert().success();

    let run_level: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(workdir.path().join("results.json")).unwrap())
            .unwrap();
    assert_eq!(
        run_level,
        serde_json::json!([]),
        "Unsupported folders are skipped, not failed"
    );
}

#[test]
fn post_fails_on_a_missing_page_folder() {
    let workdir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("socialcast").expect("Binary exists");
    cmd.current_dir(workdir.path())
        .arg("post")
        .arg("does-not-exist")
        .arg("--dry-run")
        .arg("--delay")
        .arg("0");

    cmd.assert().failure();
}
