//! Layered configuration for `add-copyright`.
//!
//! Each source (command line, config file, project file) yields a
//! [`PartialConfig`]. Partials are folded in precedence order and the first
//! value set wins; defaults fill whatever is still missing.

use crate::notice::validate_format;
use camino::Utf8Path;
use hook_common::comment::{Language, language_tags};
use hook_common::config::{read_config_file, read_tool_section};
use hook_common::error::{HookError, HookResult};
use std::collections::BTreeMap;
use toml::{Table, Value};

/// Section name under `[tool.*]` in project config files.
pub const TOOL_NAME: &str = "add_copyright";

/// Dedicated config file looked up at the repository root.
pub const CONFIG_FILE: &str = ".add-copyright-hook-config.yaml";

pub const DEFAULT_FORMAT: &str = "Copyright (c) {year} {name}";

const GLOBAL_KEYS: [&str; 2] = ["name", "format"];
const LANGUAGE_KEYS: [&str; 2] = ["format", "docstr"];

/// Settings for one language block (`[tool.add_copyright.python]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageOverride {
    pub format: Option<String>,
    pub docstr: Option<bool>,
}

impl LanguageOverride {
    fn or(self, lower: Self) -> Self {
        Self {
            format: self.format.or(lower.format),
            docstr: self.docstr.or(lower.docstr),
        }
    }
}

/// Options from a single source. Absent values defer to lower sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub name: Option<String>,
    pub format: Option<String>,
    /// Keyed by language tag.
    pub languages: BTreeMap<String, LanguageOverride>,
}

impl PartialConfig {
    /// Validate a config table read from `source`.
    pub fn from_table(table: &Table, source: &Utf8Path) -> HookResult<Self> {
        let tags = language_tags();
        let mut config = Self::default();

        for (key, value) in table {
            match key.as_str() {
                "name" => config.name = Some(string_value(value, key, source)?),
                "format" => config.format = Some(string_value(value, key, source)?),
                tag if tags.iter().any(|t| *t == tag) => {
                    let Some(block) = value.as_table() else {
                        return Err(HookError::config(format!(
                            "option '{tag}' in config file {source} must be a table"
                        )));
                    };
                    config
                        .languages
                        .insert(tag.to_string(), language_block(block, tag, source)?);
                }
                other => {
                    let mut supported: Vec<&str> = GLOBAL_KEYS.to_vec();
                    supported.extend(&tags);
                    return Err(HookError::config(format!(
                        "unsupported option in config file {source}: '{other}'. Supported options are: {}",
                        supported.join(", ")
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Fill values this source leaves unset from `lower`.
    pub fn or(self, lower: Self) -> Self {
        let mut languages = lower.languages;
        for (tag, block) in self.languages {
            let merged = match languages.remove(&tag) {
                Some(lower_block) => block.or(lower_block),
                None => block,
            };
            languages.insert(tag, merged);
        }

        Self {
            name: self.name.or(lower.name),
            format: self.format.or(lower.format),
            languages,
        }
    }
}

fn string_value(value: &Value, key: &str, source: &Utf8Path) -> HookResult<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        HookError::config(format!(
            "option '{key}' in config file {source} must be a string"
        ))
    })
}

fn language_block(block: &Table, tag: &str, source: &Utf8Path) -> HookResult<LanguageOverride> {
    let mut language = LanguageOverride::default();

    for (key, value) in block {
        let path = format!("{tag}.{key}");
        match key.as_str() {
            "format" => language.format = Some(string_value(value, &path, source)?),
            "docstr" => {
                language.docstr = Some(value.as_bool().ok_or_else(|| {
                    HookError::config(format!(
                        "option '{path}' in config file {source} must be a boolean"
                    ))
                })?);
            }
            _ => {
                return Err(HookError::config(format!(
                    "unsupported option in config file {source}: '{path}'. Supported options for '{tag}' are: {}",
                    LANGUAGE_KEYS.join(", ")
                )));
            }
        }
    }

    Ok(language)
}

/// Read every file-based source below the command line, highest first:
/// the dedicated config file (or `explicit`), then the project file section.
pub fn load_file_config(explicit: Option<&Utf8Path>, root: &Utf8Path) -> HookResult<PartialConfig> {
    let dedicated = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(root.join(CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let mut config = match dedicated {
        Some(path) => PartialConfig::from_table(&read_config_file(&path)?, &path)?,
        None => PartialConfig::default(),
    };

    if let Some(tool) = read_tool_section(root, TOOL_NAME)? {
        config = config.or(PartialConfig::from_table(&tool.table, &tool.source)?);
    }

    Ok(config)
}

/// What the transform needs for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeSettings {
    pub name: String,
    pub format: String,
    /// Place the notice in the module docstring.
    pub docstr: bool,
}

/// Configuration after folding every source and applying defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub name: String,
    pub format: String,
    /// A format given on the command line beats per-language blocks.
    pub format_from_cli: bool,
    pub languages: BTreeMap<String, LanguageOverride>,
}

impl ResolvedConfig {
    /// Fold `cli` over `files`, falling back to `identity` and the default
    /// format. Every format that may be used is validated here.
    pub fn resolve(cli: PartialConfig, files: PartialConfig, identity: Option<&str>) -> HookResult<Self> {
        let format_from_cli = cli.format.is_some();
        let merged = cli.or(files);

        let name = merged
            .name
            .or_else(|| identity.map(str::to_string))
            .ok_or(HookError::MissingIdentity)?;
        let format = merged.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string());

        validate_format(&format)?;
        if !format_from_cli {
            for block in merged.languages.values() {
                if let Some(format) = &block.format {
                    validate_format(format)?;
                }
            }
        }

        Ok(Self {
            name,
            format,
            format_from_cli,
            languages: merged.languages,
        })
    }

    /// Settings for files of `language`.
    pub fn for_language(&self, language: &Language) -> NoticeSettings {
        let block = self.languages.get(language.tag);
        let format = match block.and_then(|b| b.format.as_ref()) {
            Some(format) if !self.format_from_cli => format.clone(),
            _ => self.format.clone(),
        };

        NoticeSettings {
            name: self.name.clone(),
            format,
            docstr: block.and_then(|b| b.docstr).unwrap_or(false),
        }
    }
}
