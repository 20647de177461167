//! Interactive prompts for series selection and publish confirmation.

use std::io::{self, BufRead, StdinLock, Write};

use color_eyre::eyre::{Context, Result};
use color_print::cprintln;

use crate::series::SeriesEntry;

/// The user's answer to the publish confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user answered `y`.
    Accepted,

    /// The user answered anything else.
    Declined,

    /// Input ended before an answer was given.
    NoInput,
}

/// Reads answers from a line-oriented input, usually stdin.
pub struct Prompter<R> {
    input: R,
}

impl Prompter<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Prompt with `> ` and read one line without its terminator; `None` at
    /// end of input.
    pub fn read_answer(&mut self) -> Result<Option<String>> {
        print!("> ");
        io::stdout().flush().context("flush stdout")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("read user input")?;
        if read == 0 {
            println!();
            return Ok(None);
        }

        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_string()))
    }

    /// Show a numbered menu of `entries` and return the chosen index.
    ///
    /// Returns `None` when the answer is not a listed number.
    pub fn select_series(&mut self, entries: &[SeriesEntry]) -> Result<Option<usize>> {
        cprintln!("\n<bold>📚 Available Series:</bold>");
        println!("{}", "-".repeat(30));
        for (number, entry) in entries.iter().enumerate() {
            println!("{}. {entry}", number + 1);
        }

        println!("\nSelect a series to upload (enter number):");
        let answer = self.read_answer()?;
        Ok(answer.and_then(|answer| parse_selection(&answer, entries.len())))
    }

    /// Ask whether to continue. Never assumes consent.
    pub fn confirm(&mut self) -> Result<Confirmation> {
        println!("Continue? (y/N):");
        let answer = self.read_answer()?;
        Ok(parse_confirmation(answer.as_deref()))
    }
}

/// Map a 1-based menu answer to an index into a list of `len` entries.
pub fn parse_selection(answer: &str, len: usize) -> Option<usize> {
    let number = answer.trim().parse::<usize>().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}

/// Interpret a confirmation answer; `None` means input ended.
///
/// Only `y` in either case accepts; surrounding whitespace declines.
pub fn parse_confirmation(answer: Option<&str>) -> Confirmation {
    match answer {
        None => Confirmation::NoInput,
        Some(answer) if answer.to_lowercase() == "y" => Confirmation::Accepted,
        Some(_) => Confirmation::Declined,
    }
}
