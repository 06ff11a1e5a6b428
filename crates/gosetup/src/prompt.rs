//! Blocking yes/no prompts on the terminal.

use gosetup_profile::{Error, Prompter, Result};
use std::io::{self, BufRead, Write};

/// Interprets an answer; `None` for anything that is not yes or no.
fn parse_answer(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn prompt_error(e: &io::Error) -> Error {
    Error::prompt(format!("terminal I/O failed: {e}"))
}

/// A [`Prompter`] reading answers from `input` and writing to `output`.
///
/// Empty answers select the default, unrecognized answers re-prompt, and end
/// of input counts as "no".
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    /// Create a prompter over arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn present(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| {
                if text.ends_with('\n') {
                    Ok(())
                } else {
                    self.output.write_all(b"\n")
                }
            })
            .and_then(|()| self.output.flush())
            .map_err(|e| prompt_error(&e))
    }

    fn confirm_action(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(self.output, "{message} {hint} ")
                .and_then(|()| self.output.flush())
                .map_err(|e| prompt_error(&e))?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| prompt_error(&e))?;
            if read == 0 {
                writeln!(self.output).map_err(|e| prompt_error(&e))?;
                tracing::debug!("Prompt input closed, treating as no");
                return Ok(false);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(default_yes);
            }
            if let Some(yes) = parse_answer(answer) {
                return Ok(yes);
            }
            writeln!(self.output, "Please answer 'y' or 'n'.").map_err(|e| prompt_error(&e))?;
        }
    }
}
