//! Comment marker syntax per language, keyed by file extension.

use camino::Utf8Path;

/// Comment markers for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub line_prefix: Option<&'static str>,
    pub block_prefix: Option<&'static str>,
    pub block_suffix: Option<&'static str>,
}

impl CommentStyle {
    pub const fn line(prefix: &'static str) -> Self {
        Self {
            line_prefix: Some(prefix),
            block_prefix: None,
            block_suffix: None,
        }
    }

    pub const fn block(prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            line_prefix: None,
            block_prefix: Some(prefix),
            block_suffix: Some(suffix),
        }
    }

    /// Marker that opens a comment written by this crate.
    pub fn leading(&self) -> &'static str {
        self.line_prefix.or(self.block_prefix).unwrap_or("#")
    }

    /// Marker that closes a comment, for block-only languages.
    pub fn trailing(&self) -> Option<&'static str> {
        match self.line_prefix {
            Some(_) => None,
            None => self.block_suffix,
        }
    }
}

const HASH: CommentStyle = CommentStyle::line("#");
const SLASH: CommentStyle = CommentStyle::line("//");
const DASH: CommentStyle = CommentStyle::line("--");
const C_BLOCK: CommentStyle = CommentStyle::block("/*", "*/");
const HTML: CommentStyle = CommentStyle::block("<!---", "-->");

/// A language entry in the comment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Key used for per-language configuration blocks.
    pub tag: &'static str,
    pub style: CommentStyle,
    /// Module-level docstrings can carry a notice.
    pub docstrings: bool,
}

impl Language {
    const fn new(tag: &'static str, style: CommentStyle) -> Self {
        Self {
            tag,
            style,
            docstrings: false,
        }
    }
}

const PYTHON: Language = Language {
    tag: "python",
    style: HASH,
    docstrings: true,
};

/// Extension → language. Extensions are matched case-insensitively.
const LANGUAGES: &[(&str, Language)] = &[
    ("c", Language::new("c", C_BLOCK)),
    ("h", Language::new("c", C_BLOCK)),
    ("cc", Language::new("cpp", SLASH)),
    ("cpp", Language::new("cpp", SLASH)),
    ("cxx", Language::new("cpp", SLASH)),
    ("hpp", Language::new("cpp", SLASH)),
    ("cs", Language::new("c-sharp", C_BLOCK)),
    ("css", Language::new("css", C_BLOCK)),
    ("dart", Language::new("dart", SLASH)),
    ("go", Language::new("go", SLASH)),
    ("htm", Language::new("html", HTML)),
    ("html", Language::new("html", HTML)),
    ("java", Language::new("java", SLASH)),
    ("js", Language::new("javascript", SLASH)),
    ("cjs", Language::new("javascript", SLASH)),
    ("mjs", Language::new("javascript", SLASH)),
    ("kt", Language::new("kotlin", SLASH)),
    ("kts", Language::new("kotlin", SLASH)),
    ("lua", Language::new("lua", DASH)),
    ("md", Language::new("markdown", HTML)),
    ("markdown", Language::new("markdown", HTML)),
    ("pl", Language::new("perl", HASH)),
    ("pm", Language::new("perl", HASH)),
    ("php", Language::new("php", SLASH)),
    ("py", PYTHON),
    ("pyi", PYTHON),
    ("rb", Language::new("ruby", HASH)),
    ("rs", Language::new("rust", SLASH)),
    ("scala", Language::new("scala", SLASH)),
    ("sh", Language::new("shell", HASH)),
    ("bash", Language::new("shell", HASH)),
    ("sql", Language::new("sql", DASH)),
    ("swift", Language::new("swift", SLASH)),
    ("ts", Language::new("typescript", SLASH)),
    ("tsx", Language::new("typescript", SLASH)),
    ("toml", Language::new("toml", HASH)),
    ("yaml", Language::new("yaml", HASH)),
    ("yml", Language::new("yaml", HASH)),
];

/// Every distinct language tag in the table, in table order.
pub fn language_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::new();
    for (_, language) in LANGUAGES {
        if !tags.contains(&language.tag) {
            tags.push(language.tag);
        }
    }
    tags
}

/// Look up the language for a file by its extension.
pub fn language_for_path(path: &Utf8Path) -> Option<Language> {
    let extension = path.extension()?.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
}

/// Comment style for a file, falling back to `#` for unknown or
/// extension-less files such as `.gitignore`.
pub fn style_or_hash(path: &Utf8Path) -> CommentStyle {
    language_for_path(path).map_or(HASH, |l| l.style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_uses_hash_and_docstrings() {
        let language = language_for_path(Utf8Path::new("pkg/module.py")).unwrap();
        assert_eq!(language.tag, "python");
        assert_eq!(language.style.leading(), "#");
        assert_eq!(language.style.trailing(), None);
        assert!(language.docstrings);
    }

    #[test]
    fn test_block_languages_have_trailing_marker() {
        let language = language_for_path(Utf8Path::new("Program.CS")).unwrap();
        assert_eq!(language.tag, "c-sharp");
        assert_eq!(language.style.leading(), "/*");
        assert_eq!(language.style.trailing(), Some("*/"));

        let markdown = language_for_path(Utf8Path::new("README.md")).unwrap();
        assert_eq!(markdown.style.leading(), "<!---");
        assert_eq!(markdown.style.trailing(), Some("-->"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(language_for_path(Utf8Path::new("notes.unknownext")), None);
        assert_eq!(language_for_path(Utf8Path::new("Makefile")), None);
        assert_eq!(style_or_hash(Utf8Path::new(".gitignore")).leading(), "#");
    }

    #[test]
    fn test_language_tags_are_unique() {
        let tags = language_tags();
        assert!(tags.contains(&"python"));
        assert!(tags.contains(&"c-sharp"));
        assert_eq!(tags.iter().filter(|t| **t == "cpp").count(), 1);
    }
}
