//! Finding and rendering copyright notices.
//!
//! Only the top of a file is searched: a shebang, an encoding pragma, blank
//! lines, comments and (for languages that have them) the module docstring.
//! The first line of code ends the search.

use hook_common::comment::{CommentStyle, Language};
use hook_common::error::{HookError, HookResult};
use regex::Regex;
use std::ops::Range;

/// One or more signifiers at the start of the comment text.
const SIGNIFIERS: &str = r"(?i)^\s*(?:(?:copyright\b|\(c\)|©)\s*)+";
/// A year or a year range. The separator is kept as written.
const YEARS: &str = r"\b([0-9]{4})\b(?:\s*-\s*([0-9]{4})\b)?";

const DOCSTRING_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// What wraps the line a notice was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeMarker {
    /// A line comment (`# ...`, `// ...`).
    Line,
    /// The opening or an interior line of a block comment.
    Block,
    /// A line of the module docstring.
    Docstring,
}

/// A copyright notice matched in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNotice {
    pub holder: String,
    pub start_year: i32,
    /// Present only when the notice carries a range.
    pub end_year: Option<i32>,
    /// Index of the line holding the notice.
    pub line: usize,
    /// Lines of the comment or docstring the notice sits in.
    pub lines: Range<usize>,
    pub marker: NoticeMarker,
    /// Byte span of the year field within the notice line.
    pub years: Range<usize>,
}

impl NoticeMarker {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Line => "comment",
            Self::Block => "block comment",
            Self::Docstring => "docstring",
        }
    }
}

impl ParsedNotice {
    /// The latest year the notice covers.
    pub fn last_year(&self) -> i32 {
        self.end_year.unwrap_or(self.start_year)
    }
}

/// Result of searching a file's header.
#[derive(Debug, Default)]
pub struct NoticeScan {
    pub notice: Option<ParsedNotice>,
    /// Lines that look like notices but whose years cannot be used.
    pub warnings: Vec<HookError>,
}

/// A run of header lines sharing one wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    lines: Range<usize>,
    marker: NoticeMarker,
}

pub fn is_shebang(line: &str) -> bool {
    line.starts_with("#!")
}

/// A `coding:` or `coding=` comment, as placed on the first two lines of
/// Python sources.
pub fn is_encoding_pragma(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('#') && (line.contains("coding:") || line.contains("coding="))
}

/// The triple quote opening `line`, if it opens a docstring.
pub fn docstring_quote(line: &str) -> Option<&'static str> {
    let line = line.trim_start();
    DOCSTRING_QUOTES.into_iter().find(|q| line.starts_with(*q))
}

/// Number of leading lines (shebang, then encoding pragma) that must stay
/// first in the file.
pub fn preamble_len(lines: &[String]) -> usize {
    let mut len = 0;
    if lines.first().is_some_and(|l| is_shebang(l)) {
        len += 1;
    }
    if len < 2 && lines.get(len).is_some_and(|l| is_encoding_pragma(l)) {
        len += 1;
    }
    len
}

fn header_segments(lines: &[String], language: &Language) -> Vec<Segment> {
    let style = language.style;
    let mut segments = Vec::new();
    let mut seen_docstring = false;
    let mut i = usize::from(lines.first().is_some_and(|l| is_shebang(l)));

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() || is_encoding_pragma(line) {
            i += 1;
            continue;
        }

        if style.line_prefix.is_some_and(|p| line.starts_with(p)) {
            segments.push(Segment {
                lines: i..i + 1,
                marker: NoticeMarker::Line,
            });
            i += 1;
            continue;
        }

        if let (Some(open), Some(close)) = (style.block_prefix, style.block_suffix) {
            if let Some(after) = line.strip_prefix(open) {
                let end = closing_line(lines, i, after, close);
                segments.push(Segment {
                    lines: i..end,
                    marker: NoticeMarker::Block,
                });
                i = end;
                continue;
            }
        }

        if language.docstrings && !seen_docstring {
            if let Some(quote) = docstring_quote(line) {
                let end = closing_line(lines, i, &line[quote.len()..], quote);
                segments.push(Segment {
                    lines: i..end,
                    marker: NoticeMarker::Docstring,
                });
                seen_docstring = true;
                i = end;
                continue;
            }
        }

        break;
    }

    segments
}

/// One past the line that closes a block opened on line `start`.
fn closing_line(lines: &[String], start: usize, rest_of_first: &str, close: &str) -> usize {
    if rest_of_first.contains(close) {
        return start + 1;
    }
    lines[start + 1..]
        .iter()
        .position(|l| l.contains(close))
        .map_or(lines.len(), |offset| start + offset + 2)
}

/// Text of a header line with its markers removed, and its byte offset.
fn comment_text<'a>(
    line: &'a str,
    index: usize,
    segment: &Segment,
    style: &CommentStyle,
) -> (usize, &'a str) {
    let mut start = line.len() - line.trim_start().len();
    let mut end = line.trim_end().len();
    let first = index == segment.lines.start;

    match segment.marker {
        NoticeMarker::Line => {
            if let Some(prefix) = style.line_prefix {
                if line[start..].starts_with(prefix) {
                    start += prefix.len();
                    // `//!` and `///` doc comments.
                    if prefix == "//" && line[start..].starts_with(['!', '/']) {
                        start += 1;
                    }
                }
            }
        }
        NoticeMarker::Block => {
            if first {
                start += style.block_prefix.map_or(0, str::len);
            }
            let rest = &line[start..];
            if !rest.starts_with("*/") {
                start += rest.len() - rest.trim_start_matches('*').len();
            }
            if let Some(close) = style.block_suffix {
                if end >= start && line[start..end].ends_with(close) {
                    end -= close.len();
                }
            }
        }
        NoticeMarker::Docstring => {
            if first {
                start += docstring_quote(line).map_or(0, str::len);
            }
            if let Some(quote) = DOCSTRING_QUOTES
                .into_iter()
                .find(|q| end >= start && line[start..end].ends_with(*q))
            {
                end -= quote.len();
            }
        }
    }

    let end = end.max(start);
    (start, &line[start..end])
}

struct NoticePatterns {
    signifiers: Regex,
    years: Regex,
}

impl NoticePatterns {
    fn new() -> HookResult<Self> {
        Ok(Self {
            signifiers: Regex::new(SIGNIFIERS)?,
            years: Regex::new(YEARS)?,
        })
    }

    /// `Ok(None)` for lines that are not notices, `Err` for notices whose
    /// years are unusable.
    fn match_line(
        &self,
        text: &str,
        offset: usize,
        index: usize,
        segment: &Segment,
    ) -> HookResult<Option<ParsedNotice>> {
        let Some(signifiers) = self.signifiers.find(text) else {
            return Ok(None);
        };
        let rest = &text[signifiers.end()..];
        let Some(caps) = self.years.captures(rest) else {
            return Ok(None);
        };
        let (Some(field), Ok(start_year)) = (caps.get(0), caps[1].parse::<i32>()) else {
            return Ok(None);
        };
        let end_year = caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok());

        let holder = [rest[..field.start()].trim(), rest[field.end()..].trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let holder = holder.trim_matches(|c: char| c == ',' || c.is_whitespace());
        if holder.is_empty() {
            return Ok(None);
        }

        if let Some(end_year) = end_year {
            if end_year < start_year {
                return Err(HookError::MalformedNotice {
                    line: index + 1,
                    reason: format!("end year {end_year} is before start year {start_year}"),
                });
            }
        }

        let base = offset + signifiers.end();
        Ok(Some(ParsedNotice {
            holder: holder.to_string(),
            start_year,
            end_year,
            line: index,
            lines: segment.lines.clone(),
            marker: segment.marker,
            years: base + field.start()..base + field.end(),
        }))
    }
}

/// Search the top of a file for its copyright notice. The first match wins.
pub fn find_notice(lines: &[String], language: &Language) -> HookResult<NoticeScan> {
    let patterns = NoticePatterns::new()?;
    let mut scan = NoticeScan::default();

    for segment in header_segments(lines, language) {
        for index in segment.lines.clone() {
            let (offset, text) = comment_text(&lines[index], index, &segment, &language.style);
            match patterns.match_line(text, offset, index, &segment) {
                Ok(Some(notice)) => {
                    scan.notice = Some(notice);
                    return Ok(scan);
                }
                Ok(None) => {}
                Err(warning) => scan.warnings.push(warning),
            }
        }
    }

    Ok(scan)
}

/// `2024`, or `2022 - 2024` when the years differ.
pub fn format_years(start_year: i32, end_year: Option<i32>) -> String {
    match end_year {
        Some(end_year) if end_year != start_year => format!("{start_year} - {end_year}"),
        _ => start_year.to_string(),
    }
}

/// Check that a notice template carries both placeholders.
pub fn validate_format(format: &str) -> HookResult<()> {
    let missing: Vec<&str> = ["{name}", "{year}"]
        .into_iter()
        .filter(|placeholder| !format.contains(*placeholder))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(HookError::config(format!(
        "the format string '{format}' is missing the required placeholder(s): {}",
        missing.join(", ")
    )))
}

/// Notice text without comment markers, one entry per line.
pub fn render_notice(
    name: &str,
    start_year: i32,
    end_year: Option<i32>,
    format: &str,
) -> HookResult<Vec<String>> {
    validate_format(format)?;
    let text = format
        .replace("{year}", &format_years(start_year, end_year))
        .replace("{name}", name);
    Ok(text.lines().map(str::to_string).collect())
}

/// Notice lines wrapped in `style`'s comment markers.
pub fn build_notice(
    name: &str,
    start_year: i32,
    end_year: Option<i32>,
    format: &str,
    style: &CommentStyle,
) -> HookResult<Vec<String>> {
    let leading = style.leading();
    let trailing = style.trailing();

    Ok(render_notice(name, start_year, end_year, format)?
        .into_iter()
        .map(|line| {
            let mut line = if line.trim_start().starts_with(leading) {
                line
            } else {
                format!("{leading} {line}").trim_end().to_string()
            };
            if let Some(trailing) = trailing {
                if !line.ends_with(trailing) {
                    line = format!("{line} {trailing}");
                }
            }
            line
        })
        .collect())
}
