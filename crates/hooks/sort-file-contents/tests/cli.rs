use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn hook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sort-file-contents").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PRE_COMMIT_HOOKS_DEBUG");
    cmd
}

#[test]
fn test_sorts_each_section() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".gitignore"),
        "# build\ntarget/\ndist/\n\n# editors\n.vscode/\n.idea/\n",
    )
    .unwrap();

    hook(&dir)
        .arg(".gitignore")
        .assert()
        .failure()
        .stdout(".gitignore\n");

    let sorted = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
    insta::assert_snapshot!(sorted, @r"
    # build
    dist/
    target/

    # editors
    .idea/
    .vscode/
    ");

    hook(&dir).arg(".gitignore").assert().success().stdout("");
}

#[test]
fn test_unique_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "# runtime\nrequests\nclick\nrequests\n\n# dev\nrequests\npytest\n",
    )
    .unwrap();

    hook(&dir)
        .args(["--unique", "requirements.txt"])
        .assert()
        .failure()
        .stdout("requirements.txt\n")
        .stderr(predicate::str::contains(
            "'requests' appears in more than one section",
        ));

    assert_eq!(
        fs::read_to_string(dir.path().join("requirements.txt")).unwrap(),
        "# runtime\nclick\nrequests\n\n# dev\npytest\nrequests\n"
    );
}

#[test]
fn test_sorted_file_passes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.txt"), "alpha\nbravo\n").unwrap();

    hook(&dir).arg("words.txt").assert().success().stdout("");
}

#[test]
fn test_crlf_preserved() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("list.txt"), "b\r\na\r\n").unwrap();

    hook(&dir).arg("list.txt").assert().failure();
    assert_eq!(
        fs::read_to_string(dir.path().join("list.txt")).unwrap(),
        "a\r\nb\r\n"
    );
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    hook(&dir)
        .arg("nope.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn test_multi_line_header_is_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "# Runtime dependencies\n# pinned in constraints.txt\nrequests\nclick\n",
    )
    .unwrap();

    hook(&dir).arg("requirements.txt").assert().failure();

    assert_eq!(
        fs::read_to_string(dir.path().join("requirements.txt")).unwrap(),
        "# Runtime dependencies\n# pinned in constraints.txt\nclick\nrequests\n"
    );
}
