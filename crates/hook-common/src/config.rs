//! Configuration file discovery and loading.
//!
//! Every supported format (YAML, JSON, TOML, `setup.cfg`) is normalised into a
//! `toml::Table` so that hooks validate a single shape.

use crate::error::{HookError, HookResult};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use toml::{Table, Value};

/// Project-wide files that may carry a `[tool.<name>]` section.
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["pyproject.toml", "setup.cfg"];

/// A tool's configuration section and the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub table: Table,
    pub source: Utf8PathBuf,
}

/// Load a standalone configuration file, choosing the parser by extension.
pub fn read_config_file(path: &Utf8Path) -> HookResult<Table> {
    let content = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    let parse_error = |e: &dyn std::fmt::Display| {
        HookError::config(format!("could not parse config file '{path}': {e}"))
    };

    match path.extension() {
        Some("yaml" | "yml") => {
            if content.trim().is_empty() {
                return Ok(Table::new());
            }
            serde_yaml::from_str(&content).map_err(|e| parse_error(&e))
        }
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(&e)),
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(&e)),
        Some("cfg" | "ini") => parse_setup_cfg(&content).map_err(|e| parse_error(&e)),
        _ => Err(HookError::config(format!(
            "'{path}' is not a supported config file (expected .yaml, .yml, .json, .toml or .cfg)"
        ))),
    }
}

/// Find `[tool.<tool_name>]` in the project config files under `root`.
///
/// Both files carrying the section is ambiguous and reported as an error
/// listing every path.
pub fn read_tool_section(root: &Utf8Path, tool_name: &str) -> HookResult<Option<ToolConfig>> {
    let mut found = Vec::new();

    for filename in PROJECT_CONFIG_FILES {
        let path = root.join(filename);
        if !path.is_file() {
            continue;
        }
        let table = read_config_file(&path)?;
        let section = if filename == "setup.cfg" {
            setup_cfg_tool_section(&table, tool_name)
        } else {
            pyproject_tool_section(&table, tool_name)
        };
        if let Some(table) = section {
            found.push(ToolConfig {
                table,
                source: path,
            });
        }
    }

    if found.len() > 1 {
        let paths: Vec<&str> = found.iter().map(|c| c.source.as_str()).collect();
        return Err(HookError::config(format!(
            "found [tool.{tool_name}] in multiple config files: {}. Keep exactly one.",
            paths.join(", ")
        )));
    }

    Ok(found.pop())
}

fn pyproject_tool_section(table: &Table, tool_name: &str) -> Option<Table> {
    table
        .get("tool")?
        .as_table()?
        .get(tool_name)?
        .as_table()
        .cloned()
}

/// `[tool.x]` holds top-level keys, `[tool.x.sub]` becomes a nested table.
fn setup_cfg_tool_section(sections: &Table, tool_name: &str) -> Option<Table> {
    let header = format!("tool.{tool_name}");
    let prefix = format!("{header}.");
    let mut out = Table::new();
    let mut seen = false;

    for (name, value) in sections {
        let Some(values) = value.as_table() else {
            continue;
        };
        if *name == header {
            seen = true;
            out.extend(values.clone());
        } else if let Some(sub) = name.strip_prefix(&prefix) {
            seen = true;
            out.insert(sub.to_string(), Value::Table(values.clone()));
        }
    }

    seen.then_some(out)
}

/// Read an INI-style `setup.cfg` into `section name → table`.
///
/// `true`/`false` become booleans, everything else stays a string. Indented
/// lines continue the previous value.
pub fn parse_setup_cfg(content: &str) -> Result<Table, String> {
    let mut sections = Table::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if raw.starts_with([' ', '\t']) {
            if let (Some(section), Some(key)) = (&current, &last_key) {
                if let Some(Value::String(existing)) = sections
                    .get_mut(section)
                    .and_then(Value::as_table_mut)
                    .and_then(|t| t.get_mut(key))
                {
                    if !existing.is_empty() {
                        existing.push('\n');
                    }
                    existing.push_str(trimmed);
                    continue;
                }
            }
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections
                .entry(name.clone())
                .or_insert_with(|| Value::Table(Table::new()));
            current = Some(name);
            last_key = None;
            continue;
        }

        let Some(section) = &current else {
            return Err(format!("line {line_no}: option outside of any [section]"));
        };
        let Some((key, value)) = trimmed.split_once(['=', ':']) else {
            return Err(format!("line {line_no}: expected 'key = value', got '{trimmed}'"));
        };

        let key = key.trim().to_string();
        let value = value.trim();
        let value = match value.to_ascii_lowercase().as_str() {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::String(value.to_string()),
        };

        if let Some(table) = sections.get_mut(section).and_then(Value::as_table_mut) {
            table.insert(key.clone(), value);
        }
        last_key = Some(key);
    }

    Ok(sections)
}
