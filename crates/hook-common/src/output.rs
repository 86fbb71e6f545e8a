//! Per-file outcomes, user-facing output and the hook's exit status.

use crate::debug::HookDebugLog;
use crate::input::display_path;
use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use std::process::ExitCode;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to do.
    Unchanged,
    /// Content was rewritten on disk.
    Modified,
    /// The file breaks a rule the hook does not (or may not) fix.
    Violation(Vec<String>),
    /// The file could not be processed.
    Failed(String),
}

impl FileOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Modified => "modified",
            Self::Violation(_) => "violation",
            Self::Failed(_) => "failed",
        }
    }

    fn fails_hook(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Collects per-file outcomes for one hook run.
///
/// Modified files are printed to stdout, one relative path per line.
/// Violations, failures and warnings go to stderr.
#[derive(Debug)]
pub struct HookReport {
    hook_name: &'static str,
    base: Utf8PathBuf,
    results: Vec<(Utf8PathBuf, FileOutcome)>,
}

impl HookReport {
    pub fn new(hook_name: &'static str) -> Self {
        let base = std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        Self::with_base(hook_name, base)
    }

    pub fn with_base(hook_name: &'static str, base: impl Into<Utf8PathBuf>) -> Self {
        Self {
            hook_name,
            base: base.into(),
            results: Vec::new(),
        }
    }

    /// Record and print the outcome for `path`.
    pub fn record(&mut self, path: &Utf8Path, outcome: FileOutcome) {
        let shown = display_path(path, &self.base);

        match &outcome {
            FileOutcome::Unchanged => {}
            FileOutcome::Modified => println!("{shown}"),
            FileOutcome::Violation(messages) => {
                for message in messages {
                    eprintln!("{shown}: {message}");
                }
            }
            FileOutcome::Failed(error) => {
                eprintln!("{}: {shown}: {error}", self.hook_name);
            }
        }

        let detail = match &outcome {
            FileOutcome::Violation(messages) => messages.join("; "),
            FileOutcome::Failed(error) => error.clone(),
            _ => String::new(),
        };
        HookDebugLog::new(self.hook_name, shown.as_str())
            .with_decision(outcome.as_str(), &detail)
            .write_quietly();

        self.results.push((path.to_path_buf(), outcome));
    }

    /// Print a non-fatal warning about `path`.
    pub fn warn(&self, path: &Utf8Path, message: &str) {
        let shown = display_path(path, &self.base);
        eprintln!("{}: warning: {shown}: {message}", self.hook_name);
        HookDebugLog::new(self.hook_name, shown.as_str())
            .with_decision("warning", message)
            .write_quietly();
    }

    /// Print detail about `path` (a diff, the lines added) to stderr.
    pub fn note(&self, path: &Utf8Path, message: &str) {
        eprintln!("{}: {message}", display_path(path, &self.base));
    }

    /// Whether any file was modified, violated a rule or failed.
    pub fn failed(&self) -> bool {
        self.results.iter().any(|(_, o)| o.fails_hook())
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Report an error that stops the hook before any file is processed.
pub fn fatal(hook_name: &'static str, error: &anyhow::Error) -> ExitCode {
    eprintln!("{hook_name}: {error:#}");
    HookDebugLog::new(hook_name, "")
        .with_decision("fatal", &format!("{error:#}"))
        .write_quietly();
    ExitCode::FAILURE
}

/// Two-line before/after view of an edited line, highlighting the change.
pub fn format_diff(old_line: &str, new_line: &str) -> String {
    let prefix = old_line
        .chars()
        .zip(new_line.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum::<usize>();
    let suffix = old_line[prefix..]
        .chars()
        .rev()
        .zip(new_line[prefix..].chars().rev())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum::<usize>();

    let old_mid = &old_line[prefix..old_line.len() - suffix];
    let new_mid = &new_line[prefix..new_line.len() - suffix];

    format!(
        "  - {}{}{}\n  + {}{}{}",
        &old_line[..prefix],
        old_mid.red(),
        &old_line[old_line.len() - suffix..],
        &new_line[..prefix],
        new_mid.green(),
        &new_line[new_line.len() - suffix..],
    )
}
