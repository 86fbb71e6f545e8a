//! Non-US spellings and their US counterparts.

use hook_common::error::HookResult;
use regex::{Captures, Regex};

/// Non-US spelling → US spelling, lower case.
pub const DICTIONARY: &[(&str, &str)] = &[
    // -ise -> -ize
    ("characterise", "characterize"),
    ("initialise", "initialize"),
    ("instantiater", "instantiator"),
    ("organise", "organize"),
    ("parametrise", "parametrize"),
    ("prioritise", "prioritize"),
    ("specialise", "specialize"),
    // -yse -> -yze
    ("analyse", "analyze"),
    ("catalyse", "catalyze"),
    // -our -> -or
    ("armour", "armor"),
    ("behaviour", "behavior"),
    ("colour", "color"),
    ("flavour", "flavor"),
    ("neighbour", "neighbor"),
    // -re -> -er
    ("centre", "center"),
    ("fibre", "fiber"),
    ("litre", "liter"),
    // -ae, -oe -> -e
    ("anaesthesia", "anesthesia"),
    ("caesium", "cesium"),
    // -ce -> -se
    ("defence", "defense"),
    ("licence", "license"),
    ("practise", "practice"),
    // -ge -> -g
    ("acknowledgement", "acknowledgment"),
    ("ageing", "aging"),
    ("judgement", "judgment"),
    // -ogue -> -og
    ("analogue", "analog"),
    ("dialogue", "dialog"),
    // -l -> -ll
    ("enrol", "enroll"),
    ("fulfil", "fulfill"),
    ("skilful", "skillful"),
    // -ll -> -l
    ("labelled", "labeled"),
    ("signalling", "signaling"),
];

/// One non-US spelling found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based character column.
    pub column: usize,
    pub found: String,
    pub suggestion: String,
}

/// Matches dictionary words (and their plurals) as whole words, in any case.
#[derive(Debug, Clone)]
pub struct Speller {
    pattern: Regex,
}

impl Speller {
    pub fn new() -> HookResult<Self> {
        let mut words: Vec<&str> = DICTIONARY.iter().map(|(word, _)| *word).collect();
        // Longest first so that no word shadows a longer one sharing its prefix.
        words.sort_by_key(|word| std::cmp::Reverse(word.len()));
        let pattern = Regex::new(&format!(r"(?i)\b({})(s?)\b", words.join("|")))?;
        Ok(Self { pattern })
    }

    /// US spelling for a matched word, in the same case as the match.
    fn suggest(caps: &Captures) -> Option<String> {
        let word = &caps[1];
        let plural = &caps[2];
        let lower = word.to_lowercase();
        let (_, us) = DICTIONARY.iter().find(|(uk, _)| *uk == lower)?;
        Some(format!("{}{plural}", match_case(word, us)))
    }

    pub fn check_line(&self, line: &str) -> Vec<Finding> {
        self.pattern
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Finding {
                    column: line[..whole.start()].chars().count() + 1,
                    found: whole.as_str().to_string(),
                    suggestion: Self::suggest(&caps)?,
                })
            })
            .collect()
    }

    pub fn correct_line(&self, line: &str) -> String {
        self.pattern
            .replace_all(line, |caps: &Captures| {
                Self::suggest(caps).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Give `replacement` the capitalisation pattern of `original`.
fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let rest: Vec<char> = chars.collect();

    if first_upper && !rest.is_empty() && rest.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if first_upper && rest.iter().all(|c| !c.is_uppercase()) {
        let mut out = replacement.chars();
        return match out.next() {
            Some(first) => first.to_uppercase().chain(out).collect(),
            None => String::new(),
        };
    }
    replacement.to_string()
}
