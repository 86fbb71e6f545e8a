//! The add and update transforms. Both map a file's lines to new lines and
//! never touch the filesystem.

use crate::notice::{
    NoticeScan, ParsedNotice, build_notice, docstring_quote, find_notice, preamble_len,
    render_notice,
};
use crate::settings::NoticeSettings;
use hook_common::comment::Language;
use hook_common::error::{HookError, HookResult};

/// Outcome of a transform.
#[derive(Debug)]
pub struct Edit {
    pub lines: Vec<String>,
    pub changed: bool,
    /// The notice already in the file, if any.
    pub notice: Option<ParsedNotice>,
    /// Malformed notices seen while scanning.
    pub warnings: Vec<HookError>,
}

impl Edit {
    fn unchanged(lines: &[String], scan: NoticeScan) -> Self {
        Self {
            lines: lines.to_vec(),
            changed: false,
            notice: scan.notice,
            warnings: scan.warnings,
        }
    }
}

/// Insert a notice dated `current_year` unless the file already has one.
///
/// The notice follows the shebang and encoding pragma (after one blank line)
/// and is separated from the rest of the file by exactly one blank line. When
/// nothing follows, the notice is the last line.
pub fn add_copyright(
    lines: &[String],
    settings: &NoticeSettings,
    language: &Language,
    current_year: i32,
) -> HookResult<Edit> {
    let scan = find_notice(lines, language)?;
    if scan.notice.is_some() {
        return Ok(Edit::unchanged(lines, scan));
    }

    let preamble = preamble_len(lines);
    let body_start = lines[preamble..]
        .iter()
        .position(|l| !l.trim().is_empty())
        .map_or(lines.len(), |offset| preamble + offset);
    let body = &lines[body_start..];

    let mut out: Vec<String> = lines[..preamble].to_vec();
    if !out.is_empty() {
        out.push(String::new());
    }

    if settings.docstr && language.docstrings {
        let notice = render_notice(&settings.name, current_year, None, &settings.format)?;
        insert_into_docstring(&mut out, &notice, body);
    } else {
        out.extend(build_notice(
            &settings.name,
            current_year,
            None,
            &settings.format,
            &language.style,
        )?);
        push_body(&mut out, body);
    }

    Ok(Edit {
        lines: out,
        changed: true,
        notice: None,
        warnings: scan.warnings,
    })
}

/// Open the module docstring with `notice`, creating the docstring if the
/// body does not start with one.
fn insert_into_docstring(out: &mut Vec<String>, notice: &[String], body: &[String]) {
    let notice = notice.join("\n");

    if let Some((first, rest)) = body.split_first() {
        if let Some(quote) = docstring_quote(first) {
            let indent = first.len() - first.trim_start().len();
            let remainder = &first[indent + quote.len()..];

            out.extend(format!("{quote}{notice}").lines().map(str::to_string));
            out.push(String::new());
            if !remainder.trim().is_empty() {
                out.push(remainder.to_string());
            }
            out.extend(rest.iter().cloned());
            return;
        }
    }

    out.extend(
        format!("\"\"\"{notice}\"\"\"")
            .lines()
            .map(str::to_string),
    );
    push_body(out, body);
}

fn push_body(out: &mut Vec<String>, body: &[String]) {
    if !body.is_empty() {
        out.push(String::new());
        out.extend(body.iter().cloned());
    }
}

/// Advance the end year of an existing notice to `current_year`.
///
/// Files without a notice are left alone. A notice that already reaches
/// `current_year`, or a file whose history starts this year or later, is
/// unchanged. Only the year field of the notice line is rewritten.
pub fn update_copyright(
    lines: &[String],
    language: &Language,
    first_commit_year: i32,
    current_year: i32,
) -> HookResult<Edit> {
    let scan = find_notice(lines, language)?;
    let Some(notice) = scan.notice.clone() else {
        return Ok(Edit::unchanged(lines, scan));
    };
    if notice.last_year() >= current_year || first_commit_year >= current_year {
        return Ok(Edit::unchanged(lines, scan));
    }

    let line = &lines[notice.line];
    let field = &line[notice.years.clone()];
    let new_field = match notice.end_year {
        // The end year is the field's last four digits.
        Some(_) => format!("{}{current_year}", &field[..field.len() - 4]),
        None => format!("{} - {current_year}", notice.start_year),
    };

    let mut out = lines.to_vec();
    out[notice.line] = format!(
        "{}{new_field}{}",
        &line[..notice.years.start],
        &line[notice.years.end..]
    );

    Ok(Edit {
        lines: out,
        changed: true,
        notice: Some(notice),
        warnings: scan.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use hook_common::comment::language_for_path;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn language(file: &str) -> Language {
        language_for_path(Utf8Path::new(file)).unwrap()
    }

    fn settings(docstr: bool) -> NoticeSettings {
        NoticeSettings {
            name: "Ada Lovelace".into(),
            format: "Copyright (c) {year} {name}".into(),
            docstr,
        }
    }

    fn add(text: &str, file: &str, docstr: bool) -> Edit {
        add_copyright(&lines(text), &settings(docstr), &language(file), 2024).unwrap()
    }

    #[test]
    fn test_add_to_empty_python_file() {
        let edit = add("", "empty.py", false);
        assert!(edit.changed);
        assert_eq!(edit.lines, vec!["# Copyright (c) 2024 Ada Lovelace"]);
    }

    #[test]
    fn test_add_after_preamble_only() {
        let edit = add("#!/bin/sh\n\n\n", "run.sh", false);
        assert_eq!(edit.lines, vec!["#!/bin/sh", "", "# Copyright (c) 2024 Ada Lovelace"]);

        let edit = add("", "a.py", true);
        assert_eq!(edit.lines, vec!["\"\"\"Copyright (c) 2024 Ada Lovelace\"\"\""]);
    }

    #[test]
    fn test_add_drops_leading_blank_lines() {
        let edit = add("\n\nimport os\n\nprint(os.sep)\n", "a.py", false);
        assert_eq!(
            edit.lines,
            vec![
                "# Copyright (c) 2024 Ada Lovelace",
                "",
                "import os",
                "",
                "print(os.sep)"
            ]
        );
    }

    #[test]
    fn test_add_after_shebang_and_pragma() {
        let edit = add(
            "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nimport os\n",
            "run.py",
            false,
        );
        insta::assert_snapshot!(edit.lines.join("\n"), @r"
        #!/usr/bin/env python
        # -*- coding: utf-8 -*-

        # Copyright (c) 2024 Ada Lovelace

        import os
        ");
    }

    #[test]
    fn test_add_block_comment_language() {
        let edit = add("int main(void) { return 0; }\n", "main.c", false);
        assert_eq!(
            edit.lines,
            vec![
                "/* Copyright (c) 2024 Ada Lovelace */",
                "",
                "int main(void) { return 0; }"
            ]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        for (text, file, docstr) in [
            ("", "a.py", false),
            ("#!/bin/sh\necho hi\n", "run.sh", false),
            ("\"\"\"Summary.\"\"\"\n", "a.py", true),
            ("import os\n", "a.py", true),
            ("fn main() {}\n", "main.rs", false),
        ] {
            let first = add(text, file, docstr);
            assert!(first.changed, "{file}");
            let second = add_copyright(&first.lines, &settings(docstr), &language(file), 2025)
                .unwrap();
            assert!(!second.changed, "{file}");
            assert_eq!(second.lines, first.lines, "{file}");
        }
    }

    #[test]
    fn test_add_keeps_existing_notice() {
        let text = "# Copyright 2019 Someone Else\nimport os\n";
        let edit = add(text, "a.py", false);
        assert!(!edit.changed);
        assert_eq!(edit.lines, lines(text));
    }

    #[test]
    fn test_add_into_existing_docstring() {
        let edit = add("\"\"\"\nModule summary.\n\"\"\"\n\nimport os\n", "a.py", true);
        assert_eq!(
            edit.lines,
            vec![
                "\"\"\"Copyright (c) 2024 Ada Lovelace",
                "",
                "Module summary.",
                "\"\"\"",
                "",
                "import os"
            ]
        );
    }

    #[test]
    fn test_add_into_one_line_docstring() {
        let edit = add("'''Module summary.'''\n", "a.py", true);
        assert_eq!(
            edit.lines,
            vec!["'''Copyright (c) 2024 Ada Lovelace", "", "Module summary.'''"]
        );
    }

    #[test]
    fn test_add_new_docstring() {
        let edit = add("import os\n", "a.py", true);
        assert_eq!(
            edit.lines,
            vec!["\"\"\"Copyright (c) 2024 Ada Lovelace\"\"\"", "", "import os"]
        );
    }

    #[test]
    fn test_docstr_ignored_without_docstrings() {
        let edit = add("fn main() {}\n", "main.rs", true);
        assert_eq!(edit.lines[0], "// Copyright (c) 2024 Ada Lovelace");
    }

    #[test]
    fn test_add_rejects_bad_format() {
        let settings = NoticeSettings {
            name: "Ada".into(),
            format: "Copyright {name}".into(),
            docstr: false,
        };
        let err = add_copyright(&[], &settings, &language("a.py"), 2024).unwrap_err();
        assert!(matches!(err, HookError::Configuration(_)));
    }

    #[test]
    fn test_update_single_year() {
        let edit = update_copyright(
            &lines("# Copyright (c) 2022 Ada Lovelace\n"),
            &language("a.py"),
            2022,
            2024,
        )
        .unwrap();
        assert!(edit.changed);
        assert_eq!(edit.lines, vec!["# Copyright (c) 2022 - 2024 Ada Lovelace"]);
        assert_eq!(edit.notice.unwrap().holder, "Ada Lovelace");
    }

    #[test]
    fn test_update_range_keeps_separator() {
        let edit = update_copyright(
            &lines("/*\n * (c) 2019-2021 Ada\n */\nint x;\n"),
            &language("lib.c"),
            2019,
            2024,
        )
        .unwrap();
        assert_eq!(edit.lines, lines("/*\n * (c) 2019-2024 Ada\n */\nint x;"));
    }

    #[test]
    fn test_update_only_touches_year_field() {
        let text = "#!/bin/sh\n# © Ada Lovelace 2020, all rights reserved\necho 2020\n";
        let edit = update_copyright(&lines(text), &language("run.sh"), 2020, 2024).unwrap();
        assert_eq!(
            edit.lines,
            vec![
                "#!/bin/sh",
                "# © Ada Lovelace 2020 - 2024, all rights reserved",
                "echo 2020"
            ]
        );
    }

    #[test]
    fn test_update_current_notice_is_unchanged() {
        for text in ["# Copyright 2024 Ada\n", "# Copyright 2020 - 2024 Ada\n"] {
            let edit = update_copyright(&lines(text), &language("a.py"), 2020, 2024).unwrap();
            assert!(!edit.changed, "{text}");
        }
    }

    #[test]
    fn test_update_round_trip_after_add() {
        let added = add("import os\n", "a.py", false);
        let updated = update_copyright(&added.lines, &language("a.py"), 2024, 2024).unwrap();
        assert!(!updated.changed);
        assert_eq!(updated.lines, added.lines);
    }

    #[test]
    fn test_update_history_from_the_future_is_unchanged() {
        let text = lines("# Copyright 2022 Ada\n");
        let edit = update_copyright(&text, &language("a.py"), 2030, 2024).unwrap();
        assert!(!edit.changed);
    }

    #[test]
    fn test_update_never_inserts() {
        let text = lines("import os\n");
        let edit = update_copyright(&text, &language("a.py"), 2020, 2024).unwrap();
        assert!(!edit.changed);
        assert_eq!(edit.lines, text);
    }

    #[test]
    fn test_update_skips_malformed_notice() {
        let text = lines("# Copyright 2012 - 1312 Ada\nimport os\n");
        let edit = update_copyright(&text, &language("a.py"), 2012, 2024).unwrap();
        assert!(!edit.changed);
        assert_eq!(edit.warnings.len(), 1);
    }

    #[test]
    fn test_doc_comment_notice_is_recognised() {
        let text = "//! Copyright (c) 2020 Ada\n\npub fn f() {}\n";
        let added = add(text, "lib.rs", false);
        assert!(!added.changed);

        let updated = update_copyright(&lines(text), &language("lib.rs"), 2020, 2024).unwrap();
        assert_eq!(updated.lines[0], "//! Copyright (c) 2020 - 2024 Ada");
    }

    #[test]
    fn test_update_docstring_notice() {
        let text = lines("\"\"\"Copyright (c) 2021 Ada Lovelace\n\nSummary.\n\"\"\"\n");
        let edit = update_copyright(&text, &language("a.py"), 2021, 2024).unwrap();
        assert_eq!(edit.lines[0], "\"\"\"Copyright (c) 2021 - 2024 Ada Lovelace");
        let notice = edit.notice.unwrap();
        assert_eq!(notice.marker.describe(), "docstring");
        assert_eq!(notice.lines, 0..4);
    }
}
