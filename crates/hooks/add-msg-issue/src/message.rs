//! Issue IDs from branch names, spliced into commit messages.

use hook_common::error::{HookError, HookResult};
use regex::{Captures, Regex};

/// Layout used when the message has a subject line.
pub const DEFAULT_TEMPLATE: &str = "{subject}\n\n[{issue_id}]\n{body}";

/// Letters, a hyphen, digits: `PROJ-123`.
const ISSUE_ID: &str = r"[a-zA-Z]{1,10}-[0-9]{1,5}";
const PLACEHOLDER: &str = r"\{([^{}]*)\}";
const PLACEHOLDERS: [&str; 3] = ["subject", "issue_id", "body"];

/// A validated message template.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    placeholder: Regex,
}

impl Template {
    /// Accept `text` only if it uses each of `{subject}`, `{issue_id}` and
    /// `{body}` and nothing else.
    pub fn parse(text: &str) -> HookResult<Self> {
        let placeholder = Regex::new(PLACEHOLDER)?;
        let used: Vec<&str> = placeholder
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();

        if let Some(unknown) = used
            .iter()
            .find(|name| !PLACEHOLDERS.iter().any(|p| p == *name))
        {
            return Err(HookError::config(format!(
                "template '{text}' uses unknown placeholder {{{unknown}}}; only {{subject}}, {{issue_id}} and {{body}} are allowed"
            )));
        }
        let missing: Vec<String> = PLACEHOLDERS
            .iter()
            .filter(|name| !used.contains(*name))
            .map(|name| format!("{{{name}}}"))
            .collect();
        if !missing.is_empty() {
            return Err(HookError::config(format!(
                "template '{text}' is missing required placeholder(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            text: text.to_string(),
            placeholder,
        })
    }

    fn render(&self, subject: &str, issue_id: &str, body: &str) -> String {
        self.placeholder
            .replace_all(&self.text, |caps: &Captures| match &caps[1] {
                "subject" => subject.to_string(),
                "issue_id" => issue_id.to_string(),
                "body" => body.to_string(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// The first issue ID in `branch`, upper-cased.
pub fn find_issue_id(branch: &str) -> HookResult<Option<String>> {
    let pattern = Regex::new(ISSUE_ID)?;
    Ok(pattern.find(branch).map(|m| m.as_str().to_uppercase()))
}

/// Whether `issue_id` already appears outside git comment lines.
pub fn issue_in_message(issue_id: &str, message: &str) -> bool {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .any(|line| line.contains(issue_id))
}

/// First line (trimmed) and everything after it.
pub fn split_message(message: &str) -> (&str, &str) {
    match message.split_once('\n') {
        Some((subject, body)) => (subject.trim(), body),
        None => (message.trim(), ""),
    }
}

/// Lay out `subject` and `body` around the issue ID found in `branch`.
///
/// Without an ID the message is returned as it was. A subject that is a git
/// comment gets the ID appended on its own line instead, whatever the
/// template says.
pub fn build_message(
    branch: &str,
    subject: &str,
    body: &str,
    template: &Template,
) -> HookResult<String> {
    let Some(issue_id) = find_issue_id(branch)? else {
        return Ok(join(subject, body));
    };

    if subject.starts_with('#') {
        return Ok(format!("{}\n[{issue_id}]", join(subject, body))
            .trim()
            .to_string());
    }

    let body = body.trim();
    // Keep a leading comment on its own line so git still strips it.
    let body = if body.starts_with('#') {
        format!("\n{body}")
    } else {
        body.to_string()
    };

    Ok(template
        .render(subject, &issue_id, &body)
        .trim()
        .to_string())
}

fn join(subject: &str, body: &str) -> String {
    if body.is_empty() {
        subject.to_string()
    } else {
        format!("{subject}\n{body}")
    }
}

/// The rewritten commit message, or `None` when it needs no change.
pub fn apply(branch: &str, message: &str, template: &Template) -> HookResult<Option<String>> {
    let Some(issue_id) = find_issue_id(branch)? else {
        return Ok(None);
    };
    if issue_in_message(&issue_id, message) {
        return Ok(None);
    }

    let (subject, body) = split_message(message);
    build_message(branch, subject, body, template).map(Some)
}
