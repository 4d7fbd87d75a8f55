//! Interactive questions
//!
//! The menu flow only talks to the [`Prompter`] trait. [`TerminalPrompter`]
//! prints numbered choices and reads one answer per line, so it works the
//! same on a terminal and with piped input.

use anstyle::Style;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::ui;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input reached end of file before an answer was given
    #[error("Input closed")]
    Closed,

    #[error("Failed to read answer")]
    Io(#[from] io::Error),
}

/// A single-select option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub disabled: bool,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

pub trait Prompter {
    /// Free text answer, trimmed
    fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// Index of exactly one enabled choice
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, PromptError>;

    /// Ascending, deduplicated indices of any number of choices
    fn multi_select(&mut self, message: &str, choices: &[String])
        -> Result<Vec<usize>, PromptError>;

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError>;
}

/// Line-oriented prompter over any reader/writer pair
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), ui::stdout_color())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            format!("{}{text}{}", style.render(), style.render_reset())
        } else {
            text.to_string()
        }
    }

    fn question(&mut self, message: &str, hint: &str) -> io::Result<()> {
        let marker = self.paint(ui::prompt_style(), "?");
        if hint.is_empty() {
            write!(self.output, "{marker} {message} ")?;
        } else {
            write!(self.output, "{marker} {message} ({hint}) ")?;
        }
        self.output.flush()
    }

    fn list(&mut self, labels: impl Iterator<Item = (String, bool)>) -> io::Result<()> {
        for (idx, (label, disabled)) in labels.enumerate() {
            let line = format!("{:>4}) {label}", idx + 1);
            if disabled {
                let line = self.paint(ui::disabled_style(), &format!("{line} (unavailable)"));
                writeln!(self.output, "{line}")?;
            } else {
                writeln!(self.output, "{line}")?;
            }
        }
        Ok(())
    }

    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn retry(&mut self, reason: &str) -> io::Result<()> {
        writeln!(self.output, "  {reason}")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        self.question(message, "")?;
        self.read_answer()
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize, PromptError> {
        let marker = self.paint(ui::prompt_style(), "?");
        writeln!(self.output, "{marker} {message}")?;
        self.list(choices.iter().map(|c| (c.label.clone(), c.disabled)))?;

        loop {
            write!(self.output, "  > ")?;
            self.output.flush()?;
            let answer = self.read_answer()?;

            match parse_index(&answer, choices.len()) {
                Some(idx) if choices[idx].disabled => {
                    self.retry(&format!("'{}' is not available right now", choices[idx].label))?
                }
                Some(idx) => return Ok(idx),
                None => self.retry(&format!("Enter a number from 1 to {}", choices.len()))?,
            }
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[String],
    ) -> Result<Vec<usize>, PromptError> {
        let marker = self.paint(ui::prompt_style(), "?");
        if choices.is_empty() {
            writeln!(self.output, "{marker} {message}")?;
            writeln!(self.output, "  (nothing to select)")?;
            return Ok(Vec::new());
        }

        writeln!(
            self.output,
            "{marker} {message} (numbers separated by spaces or commas, empty for none)"
        )?;
        self.list(choices.iter().map(|label| (label.clone(), false)))?;

        loop {
            write!(self.output, "  > ")?;
            self.output.flush()?;
            let answer = self.read_answer()?;

            match parse_indices(&answer, choices.len()) {
                Some(indices) => return Ok(indices),
                None => self.retry(&format!(
                    "Enter numbers from 1 to {}, or leave empty",
                    choices.len()
                ))?,
            }
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        loop {
            self.question(message, "y/N")?;
            let answer = self.read_answer()?;

            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => self.retry("Answer y or n")?,
            }
        }
    }
}

/// One-based answer to zero-based index
fn parse_index(answer: &str, len: usize) -> Option<usize> {
    let number: usize = answer.parse().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}

fn parse_indices(answer: &str, len: usize) -> Option<Vec<usize>> {
    let mut indices = answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| parse_index(part, len))
        .collect::<Option<Vec<usize>>>()?;
    indices.sort_unstable();
    indices.dedup();
    Some(indices)
}
