//! Americanise hook.
//!
//! Reports non-US spellings with their line and column, or rewrites them to
//! US spellings with `--fix`.

mod dictionary;

use clap::Parser;
use dictionary::Speller;
use hook_common::prelude::*;
use std::process::ExitCode;

const HOOK_NAME: &str = "americanise";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Correct non-US spellings")]
struct Cli {
    /// Rewrite non-US spellings instead of only reporting them
    #[arg(long)]
    fix: bool,

    #[command(flatten)]
    files: FileArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => report.exit_code(),
        Err(error) => fatal(HOOK_NAME, &error),
    }
}

fn run(cli: &Cli) -> Result<HookReport> {
    let speller = Speller::new()?;
    let mut report = HookReport::new(HOOK_NAME);

    for file in &cli.files.resolve()? {
        let outcome = process_file(file, &speller, cli.fix)
            .unwrap_or_else(|e| FileOutcome::Failed(format!("{e:#}")));
        report.record(file, outcome);
    }

    Ok(report)
}

fn process_file(path: &Utf8Path, speller: &Speller, fix: bool) -> Result<FileOutcome> {
    let source = SourceText::read(path)?;

    if fix {
        let lines: Vec<String> = source
            .lines
            .iter()
            .map(|line| speller.correct_line(line))
            .collect();
        if lines == source.lines {
            return Ok(FileOutcome::Unchanged);
        }
        source
            .with_lines(lines)
            .write(path)
            .with_context(|| format!("failed to write {path}"))?;
        return Ok(FileOutcome::Modified);
    }

    let violations: Vec<String> = source
        .lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            speller.check_line(line).into_iter().map(move |finding| {
                format!(
                    "{}:{}: non-US spelling '{}', use '{}'",
                    index + 1,
                    finding.column,
                    finding.found,
                    finding.suggestion
                )
            })
        })
        .collect();

    if violations.is_empty() {
        Ok(FileOutcome::Unchanged)
    } else {
        Ok(FileOutcome::Violation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_flag() {
        let cli = Cli::try_parse_from(["americanise", "--fix", "README.md"]).unwrap();
        assert!(cli.fix);
        assert_eq!(cli.files.files, vec![Utf8PathBuf::from("README.md")]);

        let cli = Cli::try_parse_from(["americanise"]).unwrap();
        assert!(!cli.fix);
        assert!(cli.files.files.is_empty());
    }
}
