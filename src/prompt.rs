//! Interactive prompting
//!
//! The workflow talks to the operator through the [`Prompt`] trait; the
//! terminal implementation sits on `console::Term`. Tests substitute a
//! scripted double so the state machine can be driven without a TTY.

use anyhow::Result;
use colored::Colorize;
use console::Term;

/// Operator interaction points of the commit workflow.
pub trait Prompt {
    /// Ask a yes/no question. `default` is returned on empty input.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Ask for a single line of text. `default` is returned on empty input.
    fn input(&self, question: &str, default: &str) -> Result<String>;

    /// Collect a free-form multi-line message. Input ends at the first empty
    /// line (or EOF). The result is not trimmed here; emptiness is the
    /// caller's concern.
    fn multiline(&self, header: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Rewrites the question line with the settled answer, so the transcript
    /// reads as a record rather than a prompt.
    fn settle(&self, question: &str, answer: &str) -> Result<()> {
        self.term.clear_last_lines(1)?;
        self.term.write_line(&format!(
            "{} {}",
            format!("?? {question}").white().bold(),
            answer.cyan().bold()
        ))?;
        Ok(())
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y)" } else { "(N)" };
        self.term.write_str(&format!(
            "{} {} ",
            format!("?? {question}").white().bold(),
            hint.white().dimmed()
        ))?;

        let line = self.term.read_line()?;
        let answer = match line.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        };
        self.settle(question, if answer { "Y" } else { "N" })?;
        Ok(answer)
    }

    fn input(&self, question: &str, default: &str) -> Result<String> {
        self.term.write_str(&format!(
            "{} {} ",
            format!("?? {question}").white().bold(),
            format!("({default})").white().dimmed()
        ))?;

        let line = self.term.read_line()?;
        let answer = if line.trim().is_empty() {
            default.to_string()
        } else {
            line.trim().to_string()
        };
        self.settle(question, &answer)?;
        Ok(answer)
    }

    fn multiline(&self, header: &str) -> Result<String> {
        self.term.write_line(&header.blue().bold().to_string())?;

        let mut lines = Vec::new();
        loop {
            let line = self.term.read_line()?;
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}
