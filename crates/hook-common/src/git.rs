//! Queries against the local git metadata.

use crate::error::{HookError, HookResult};
use crate::subprocess::{CommandResult, run_command};
use camino::{Utf8Path, Utf8PathBuf};

fn git(args: &[&str]) -> HookResult<CommandResult> {
    run_command("git", args).map_err(|e| HookError::Git {
        command: args.join(" "),
        stderr: format!("{e:#}"),
    })
}

/// Root of the working tree containing the current directory.
pub fn repo_root() -> HookResult<Utf8PathBuf> {
    let result = git(&["rev-parse", "--show-toplevel"])?;
    if !result.success {
        let cwd = std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        return Err(HookError::NotARepository(cwd));
    }
    Ok(Utf8PathBuf::from(result.stdout.trim()))
}

/// `user.name` from git configuration, if set.
pub fn user_name() -> HookResult<Option<String>> {
    let result = git(&["config", "user.name"])?;
    let name = result.stdout.trim();
    if !result.success || name.is_empty() {
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}

/// Short name of the checked-out branch. Empty when HEAD is detached or the
/// directory is not a repository.
pub fn current_branch() -> HookResult<String> {
    let result = git(&["symbolic-ref", "--short", "HEAD"])?;
    if !result.success {
        return Ok(String::new());
    }
    Ok(result.stdout.trim().to_string())
}

/// Year of the oldest commit touching `file`, following renames.
///
/// `None` when the file has no history yet.
pub fn first_commit_year(file: &Utf8Path) -> HookResult<Option<i32>> {
    let result = git(&[
        "log",
        "--follow",
        "--format=%ad",
        "--date=format:%Y",
        "--",
        file.as_str(),
    ])?;

    if !result.success {
        if result.stderr.contains("not a git repository") {
            return Err(HookError::NotARepository(file.to_path_buf()));
        }
        // A fresh repository without commits has no HEAD to log from.
        return Ok(None);
    }

    Ok(parse_oldest_year(&result.stdout))
}

fn parse_oldest_year(log: &str) -> Option<i32> {
    log.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .and_then(|l| l.parse().ok())
}
