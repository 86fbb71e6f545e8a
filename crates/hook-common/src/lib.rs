//! Common utilities for the pre-commit hooks.
//!
//! This crate provides shared functionality for all hook binaries:
//! - Changed-file arguments and path display
//! - Whole-file line buffers with atomic write-back
//! - Comment syntax per language
//! - Git queries and the per-invocation context
//! - Config file loading
//! - Per-file outcomes, exit codes and debug logging
//! - Error handling

pub mod comment;
pub mod config;
pub mod context;
pub mod debug;
pub mod error;
pub mod files;
pub mod git;
pub mod input;
pub mod output;
pub mod subprocess;

pub use comment::{CommentStyle, Language, language_for_path};
pub use context::InvocationContext;
pub use error::{HookError, HookResult};
pub use files::SourceText;
pub use input::FileArgs;
pub use output::{FileOutcome, HookReport};
pub use subprocess::run_command;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::comment::{CommentStyle, Language, language_for_path, style_or_hash};
    pub use crate::context::InvocationContext;
    pub use crate::error::{HookError, HookResult};
    pub use crate::files::SourceText;
    pub use crate::input::FileArgs;
    pub use crate::output::{FileOutcome, HookReport, fatal, format_diff};
    pub use anyhow::{Context, Result};
    pub use camino::{Utf8Path, Utf8PathBuf};
}
