//! Values fixed for the duration of one hook invocation.

use crate::error::{HookError, HookResult};
use crate::git;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Datelike;

/// Current year, git identity and repository root, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub current_year: i32,
    pub identity: Option<String>,
    pub repo_root: Option<Utf8PathBuf>,
    pub cwd: Utf8PathBuf,
}

impl InvocationContext {
    /// Resolve the context from the system clock and the local git metadata.
    ///
    /// Missing git metadata leaves the corresponding field empty.
    pub fn detect() -> HookResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| HookError::io(".", e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|p| HookError::config(format!("non UTF-8 working directory: {}", p.display())))?;

        Ok(Self {
            current_year: chrono::Local::now().year(),
            identity: git::user_name().ok().flatten(),
            repo_root: git::repo_root().ok(),
            cwd,
        })
    }

    #[cfg(test)]
    fn fixed(current_year: i32, identity: Option<&str>) -> Self {
        Self {
            current_year,
            identity: identity.map(str::to_string),
            repo_root: None,
            cwd: Utf8PathBuf::from("."),
        }
    }

    /// Directory searched for configuration files.
    pub fn config_root(&self) -> &Utf8Path {
        self.repo_root.as_deref().unwrap_or(&self.cwd)
    }

    /// Git repository root, or an error naming the working directory.
    pub fn require_repo(&self) -> HookResult<&Utf8Path> {
        self.repo_root
            .as_deref()
            .ok_or_else(|| HookError::NotARepository(self.cwd.clone()))
    }
}
