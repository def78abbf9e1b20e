//! Line-oriented terminal I/O for the interactive menu
//!
//! Wraps any reader/writer pair so the menu can be driven from stdin/stdout
//! or from in-memory buffers in tests.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use shelf_core::{parse_read_answer, parse_year};

/// Input ended while a prompt was waiting for an answer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("input closed")]
pub struct InputClosed;

/// Prompt/response console over a reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Per-character delay for animated messages; `None` prints at once
    animation: Option<Duration>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, animation: Option<Duration>) -> Self {
        Self {
            input,
            output,
            animation,
        }
    }

    /// Print a line
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Print a line one character at a time
    pub fn announce(&mut self, text: impl AsRef<str>) -> Result<()> {
        let Some(delay) = self.animation else {
            return self.say(text);
        };

        for ch in text.as_ref().chars() {
            write!(self.output, "{}", ch)?;
            self.output.flush()?;
            thread::sleep(delay);
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Print a section banner
    pub fn header(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(50);
        self.say("")?;
        self.say(&rule)?;
        self.say(format!("{:^50}", title))?;
        self.say(&rule)
    }

    /// Prompt and read one trimmed line
    ///
    /// Fails with [`InputClosed`] at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Prompt until the answer parses as a year
    pub fn ask_year(&mut self, prompt: &str) -> Result<i32> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_year(&answer) {
                Ok(year) => return Ok(year),
                Err(_) => self.say("✗ Invalid input! Please enter a valid year.")?,
            }
        }
    }

    /// Prompt for a yes/no answer; only "yes" counts as true
    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        Ok(parse_read_answer(&self.ask(prompt)?))
    }

    /// Consume the console, returning the writer
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Check whether an error means the input stream ended
pub fn is_input_closed(error: &anyhow::Error) -> bool {
    error.is::<InputClosed>()
}
