use assert_cmd::Command;
use hook_common::subprocess::command_exists;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn git_available() -> bool {
    command_exists("git")
}

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
        .status;
    assert!(status.success(), "git {args:?} failed");
}

/// An empty repository whose HEAD points at `branch`.
fn repo_on_branch(branch: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(
        dir.path(),
        &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")],
    );
    dir
}

fn hook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("add-msg-issue").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PRE_COMMIT_HOOKS_DEBUG");
    cmd
}

#[test]
fn test_inserts_issue_id() {
    if !git_available() {
        return;
    }
    let dir = repo_on_branch("feature/TEST-01/demo");
    fs::write(dir.path().join("COMMIT_EDITMSG"), "test commit\n\ndesc\n").unwrap();

    hook(&dir).arg("COMMIT_EDITMSG").assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join("COMMIT_EDITMSG")).unwrap(),
        "test commit\n\n[TEST-01]\ndesc\n"
    );
}

#[test]
fn test_custom_template() {
    if !git_available() {
        return;
    }
    let dir = repo_on_branch("abc-12-fix");
    fs::write(dir.path().join("MSG"), "fix crash\n").unwrap();

    hook(&dir)
        .args(["--template", "{issue_id}: {subject}\n{body}", "MSG"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("MSG")).unwrap(),
        "ABC-12: fix crash\n"
    );
}

#[test]
fn test_branch_without_issue_leaves_message() {
    if !git_available() {
        return;
    }
    let dir = repo_on_branch("main");
    fs::write(dir.path().join("MSG"), "subject\n\nbody\n").unwrap();

    hook(&dir).arg("MSG").assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("MSG")).unwrap(),
        "subject\n\nbody\n"
    );
}

#[test]
fn test_issue_already_present() {
    if !git_available() {
        return;
    }
    let dir = repo_on_branch("TEST-01");
    fs::write(dir.path().join("MSG"), "[TEST-01] subject\n").unwrap();

    hook(&dir).arg("MSG").assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("MSG")).unwrap(),
        "[TEST-01] subject\n"
    );
}

#[test]
fn test_invalid_template_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("MSG"), "subject\n").unwrap();

    hook(&dir)
        .args(["-t", "{subject}", "MSG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required placeholder"));
}
