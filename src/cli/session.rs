use std::io::Write;

use anyhow::{Result, bail};
use clap::Parser;
use log::debug;

use crate::application::TrackerService;
use crate::domain::Locale;

use super::{LedgerCommands, run_ledger_command};

/// One line of a session script.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: LedgerCommands,
}

/// Run each non-empty, non-comment line of `script` against the same ledger.
/// A failing line is reported and the session moves on.
pub fn run_session<W: Write>(
    service: &mut TrackerService<'_>,
    script: &str,
    locale: Locale,
    out: &mut W,
) -> Result<()> {
    for (number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        debug!("session line {}: {}", number + 1, line);
        writeln!(out, "> {}", line)?;

        let outcome = split_args(line)
            .and_then(|args| SessionLine::try_parse_from(args).map_err(Into::into))
            .and_then(|parsed| run_ledger_command(service, parsed.command, locale, out));

        if let Err(e) = outcome {
            writeln!(out, "Error on line {}: {}", number + 1, e)?;
        }
    }
    Ok(())
}

/// Split a command line into arguments.
/// Double quotes group words; `\"` inside quotes is a literal quote.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            '\\' if in_quotes => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => bail!("Unterminated escape"),
            },
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args(r#"add "Compra no supermercado" -150 Alimentação"#).unwrap(),
            vec!["add", "Compra no supermercado", "-150", "Alimentação"]
        );
        assert_eq!(split_args("  list  ").unwrap(), vec!["list"]);
        assert_eq!(
            split_args(r#"add "" 10 x"#).unwrap(),
            vec!["add", "", "10", "x"]
        );
        assert_eq!(
            split_args(r#"add "say \"hi\"" 1 x"#).unwrap(),
            vec!["add", "say \"hi\"", "1", "x"]
        );
    }

    #[test]
    fn test_split_args_unterminated() {
        assert!(split_args(r#"add "oops 10 x"#).is_err());
    }
}
