/*!
 * Yes/no confirmation used before repairing stored values.
 */

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Asks the operator to confirm an action
pub trait Confirm {
    /// Ask `question`; an empty answer selects `default`
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Answers every question the same way without asking
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _question: &str, _default: bool) -> Result<bool> {
        Ok(self.0)
    }
}

/// Interactive prompt over a reader/writer pair
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the terminal
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Interpret a typed answer; `None` when it is neither yes nor no
fn parse_answer(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(self.output, "{} {} ", question, hint)?;
            self.output.flush()?;

            let mut answer = String::new();
            let read = self
                .input
                .read_line(&mut answer)
                .context("Failed to read answer")?;

            // End of input counts as accepting the default
            if read == 0 {
                writeln!(self.output)?;
                return Ok(default);
            }

            if let Some(decision) = parse_answer(&answer, default) {
                return Ok(decision);
            }
            writeln!(self.output, "Please answer yes or no.")?;
        }
    }
}
