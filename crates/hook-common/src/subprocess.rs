//! Subprocess execution utilities.

use anyhow::{Context, Result};
use std::process::Output;

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal)
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
}

impl CommandResult {
    /// Create from std::process::Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }
}

/// Run a program with arguments, capturing its output.
///
/// A non-zero exit is reported through [`CommandResult::success`], not as an
/// error; only a failure to spawn is an error.
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    let output = duct::cmd(program, args)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .with_context(|| format!("Failed to execute command: {} {}", program, args.join(" ")))?;

    Ok(CommandResult::from_output(output))
}

/// Check if a command exists in PATH.
pub fn command_exists(cmd: &str) -> bool {
    let finder = if cfg!(target_os = "windows") { "where" } else { "which" };
    run_command(finder, &[cmd]).is_ok_and(|r| r.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_captures_failure() {
        if !command_exists("git") {
            return;
        }
        let result = run_command("git", &["--no-such-flag-here"]).unwrap();
        assert!(!result.success);
        assert!(result.exit_code.is_some());
    }

    #[test]
    fn test_run_command_success() {
        if !command_exists("git") {
            return;
        }
        let result = run_command("git", &["--version"]).unwrap();
        assert!(result.success);
        assert!(result.stdout.starts_with("git version"));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        assert!(run_command("nonexistent_command_12345", &[]).is_err());
        assert!(!command_exists("nonexistent_command_12345"));
    }
}
