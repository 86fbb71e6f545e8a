//! Changed-file arguments passed by pre-commit.

use crate::error::{HookError, HookResult};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;

/// Positional file list shared by every file-based hook.
#[derive(Debug, Clone, Default, Args)]
pub struct FileArgs {
    /// Files to process (supplied by pre-commit).
    #[arg(value_name = "FILE")]
    pub files: Vec<Utf8PathBuf>,
}

impl FileArgs {
    /// Check that every argument names an existing regular file.
    pub fn resolve(&self) -> HookResult<Vec<Utf8PathBuf>> {
        resolve_files(&self.files)
    }
}

/// Check that every path names an existing regular file.
pub fn resolve_files(files: &[Utf8PathBuf]) -> HookResult<Vec<Utf8PathBuf>> {
    for file in files {
        if !file.is_file() {
            return Err(HookError::io(
                file.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            ));
        }
    }
    Ok(files.to_vec())
}

/// Path to show the user: relative to `base` when possible.
pub fn display_path(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    path.strip_prefix(base)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
