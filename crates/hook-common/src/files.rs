//! Whole-file line buffers with atomic write-back.

use crate::error::{HookError, HookResult};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// A file's content as an ordered sequence of lines.
///
/// The newline sequence and the presence of a final newline are remembered so
/// that rendering an unmodified buffer reproduces the original text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub lines: Vec<String>,
    pub newline: &'static str,
    pub trailing_newline: bool,
}

impl SourceText {
    pub fn parse(content: &str) -> Self {
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);
        let body = if newline == "\r\n" {
            body.strip_suffix('\r').unwrap_or(body)
        } else {
            body
        };

        let lines = if content.is_empty() {
            Vec::new()
        } else {
            body.split(newline).map(str::to_string).collect()
        };

        Self {
            lines,
            newline,
            trailing_newline,
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.newline);
        if self.trailing_newline {
            out.push_str(self.newline);
        }
        out
    }

    /// Same layout with different lines.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            newline: self.newline,
            trailing_newline: self.trailing_newline,
        }
    }

    /// Read a whole file.
    pub fn read(path: &Utf8Path) -> HookResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    /// Replace the file's content atomically.
    pub fn write(&self, path: &Utf8Path) -> HookResult<()> {
        write_atomic(path, &self.render())
    }
}

/// Write `content` to a temp file next to `path`, then rename it over `path`.
///
/// The original file's permissions are carried over so executable scripts
/// stay executable.
pub fn write_atomic(path: &Utf8Path, content: &str) -> HookResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| HookError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| HookError::io(tmp.path().to_string_lossy().as_ref(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions())
            .map_err(|e| HookError::io(path, e))?;
    }

    tmp.persist(path).map_err(|e| HookError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_tracks_final_newline() {
        let text = SourceText::parse("a\nb\n");
        assert_eq!(text.lines, vec!["a", "b"]);
        assert!(text.trailing_newline);
        assert_eq!(text.render(), "a\nb\n");

        let text = SourceText::parse("a\nb");
        assert!(!text.trailing_newline);
        assert_eq!(text.render(), "a\nb");
    }

    #[test]
    fn test_parse_empty_and_blank() {
        let empty = SourceText::parse("");
        assert!(empty.lines.is_empty());
        assert_eq!(empty.render(), "");

        let blank = SourceText::parse("\n");
        assert_eq!(blank.lines, vec![""]);
        assert_eq!(blank.render(), "\n");
    }

    #[test]
    fn test_crlf_is_preserved() {
        let text = SourceText::parse("one\r\ntwo\r\n");
        assert_eq!(text.lines, vec!["one", "two"]);
        assert_eq!(text.newline, "\r\n");
        assert_eq!(text.render(), "one\r\ntwo\r\n");
    }

    #[test]
    fn test_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("file.txt")).unwrap();
        fs::write(&path, "old\n").unwrap();

        let text = SourceText::read(&path).unwrap().with_lines(vec!["new".into()]);
        text.write(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("run.sh")).unwrap();
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        write_atomic(&path, "#!/bin/sh\necho hi\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_read_missing_file() {
        let err = SourceText::read(Utf8Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, HookError::Io { .. }));
    }
}
