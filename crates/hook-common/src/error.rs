//! Error kinds shared by every hook.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the hook library crates.
#[derive(Error, Debug)]
pub enum HookError {
    /// Conflicting or malformed configuration (unknown key, bad template, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Git metadata was requested outside a repository.
    #[error("not a git repository: {0}")]
    NotARepository(Utf8PathBuf),

    /// No copyright holder name could be resolved.
    #[error("no name available: pass --name, set `name` in a config file, or configure git user.name")]
    MissingIdentity,

    /// A line looks like a copyright notice but its years cannot be used.
    #[error("malformed copyright notice on line {line}: {reason}")]
    MalformedNotice { line: usize, reason: String },

    /// No comment style is known for the file's extension.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(Utf8PathBuf),

    #[error("failed to access {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl HookError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type HookResult<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = HookError::config("unsupported option 'nmae'");
        assert_eq!(
            err.to_string(),
            "configuration error: unsupported option 'nmae'"
        );

        let err = HookError::MalformedNotice {
            line: 3,
            reason: "end year 1312 is before start year 2012".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = HookError::io(
            "src/missing.py",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().starts_with("failed to access src/missing.py"));
    }
}
