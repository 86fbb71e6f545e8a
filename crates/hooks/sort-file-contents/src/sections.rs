//! Sorting within comment-anchored sections.
//!
//! A section is a run of non-blank lines. The comment lines it starts with
//! form its header and stay put; the remaining lines are sorted.

use std::collections::BTreeMap;

/// Result of sorting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub lines: Vec<String>,
    pub changed: bool,
    /// Lines dropped in favour of a differently written duplicate, and keys
    /// found in more than one section, when deduplicating.
    pub warnings: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Section {
    header: Vec<String>,
    body: Vec<String>,
}

impl Section {
    fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeSection,
    InHeader,
    InBody,
}

/// The part of a line that orders it: no indentation, no comment marker.
fn sort_key<'a>(line: &'a str, marker: &str) -> &'a str {
    line.trim_start()
        .trim_start_matches(|c: char| marker.contains(c))
        .trim_start()
}

fn split_sections(lines: &[String], marker: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();
    let mut state = State::BeforeSection;

    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
            state = State::BeforeSection;
            continue;
        }

        let is_comment = line.trim_start().starts_with(marker);
        state = match state {
            State::BeforeSection | State::InHeader if is_comment => {
                current.header.push(line.clone());
                State::InHeader
            }
            _ => {
                current.body.push(line.clone());
                State::InBody
            }
        };
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Keep the first line of each run of equal keys in an already sorted body.
fn dedup_keys(body: Vec<String>, marker: &str, warnings: &mut Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(body.len());
    for line in body {
        if let Some(last) = kept.last() {
            if sort_key(last, marker) == sort_key(&line, marker) {
                if last.trim() != line.trim() {
                    warnings.push(format!(
                        "'{}' dropped as a duplicate of '{}'",
                        line.trim(),
                        last.trim()
                    ));
                }
                continue;
            }
        }
        kept.push(line);
    }
    kept
}

/// Sort every section's body by key, keeping headers in place.
///
/// With `unique`, repeated keys within a section collapse to their first
/// occurrence; a dropped line written differently from the kept one (say
/// `# zulu` against `zulu`) is reported. A key present in several sections is
/// kept everywhere and reported once.
pub fn sort_sections(lines: &[String], unique: bool, marker: &str) -> SortOutcome {
    let mut sections = split_sections(lines, marker);
    let mut warnings = Vec::new();

    for section in &mut sections {
        section
            .body
            .sort_by(|a, b| sort_key(a, marker).cmp(sort_key(b, marker)));
        if unique {
            section.body = dedup_keys(std::mem::take(&mut section.body), marker, &mut warnings);
        }
    }

    if unique {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for section in &sections {
            for line in &section.body {
                *seen.entry(sort_key(line, marker)).or_default() += 1;
            }
        }
        warnings.extend(
            seen.into_iter()
                .filter(|(_, count)| *count > 1)
                .map(|(key, _)| format!("'{key}' appears in more than one section")),
        );
    }

    let mut out = Vec::with_capacity(lines.len());
    for (index, section) in sections.into_iter().enumerate() {
        if index > 0 {
            out.push(String::new());
        }
        out.extend(section.header);
        out.extend(section.body);
    }

    SortOutcome {
        changed: out != lines,
        lines: out,
        warnings,
    }
}
