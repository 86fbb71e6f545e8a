//! Add msg issue hook.
//!
//! Runs at the `commit-msg` stage. Finds an issue ID such as `PROJ-123` in the
//! current branch name and adds it to the commit message if it is missing.
//! Never blocks the commit.

mod message;

use clap::Parser;
use hook_common::debug::HookDebugLog;
use hook_common::files::write_atomic;
use hook_common::git;
use hook_common::prelude::*;
use message::{DEFAULT_TEMPLATE, Template, apply};
use std::process::ExitCode;

const HOOK_NAME: &str = "add-msg-issue";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Add the branch's issue ID to the commit message")]
struct Cli {
    /// Commit message file passed by git
    #[arg(value_name = "COMMIT_MSG_FILE")]
    commit_msg_file: Utf8PathBuf,

    /// Message layout; must use {subject}, {issue_id} and {body}
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    template: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => fatal(HOOK_NAME, &error),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let template = Template::parse(&cli.template)?;
    let path = cli.commit_msg_file.as_path();

    let branch = git::current_branch().unwrap_or_else(|e| {
        eprintln!("{HOOK_NAME}: warning: could not read the branch name: {e}");
        String::new()
    });

    let message = std::fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    let Some(rewritten) = apply(&branch, &message, &template)? else {
        HookDebugLog::new(HOOK_NAME, path.as_str())
            .with_decision("unchanged", &branch)
            .write_quietly();
        return Ok(());
    };

    write_atomic(path, &format!("{rewritten}\n"))
        .with_context(|| format!("failed to write {path}"))?;
    HookDebugLog::new(HOOK_NAME, path.as_str())
        .with_decision("modified", &branch)
        .write_quietly();
    Ok(())
}
