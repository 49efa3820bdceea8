//! Line-oriented console prompting
//!
//! Generic over the input and output streams so sessions can be scripted.
//! Validation loops re-prompt until the input is acceptable; the only way out
//! of a prompt is valid input or end of input.

use cheesedir_common::normalize::NOT_AVAILABLE;
use cheesedir_common::{Error, Result};
use std::io::{BufRead, ErrorKind, Write};

/// Prompt/response channel for the interactive session
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Captured output (useful when `W` is a buffer)
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Write one line
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line without its line terminator
    ///
    /// End of input is an `UnexpectedEof` I/O error.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "console input closed",
            )));
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Read an integer in `min..=max`, re-prompting until one is given
    ///
    /// `parse_error` is shown for non-integer input, `range_error` for an
    /// integer outside the bounds.
    pub fn read_bounded(
        &mut self,
        prompt: &str,
        min: i64,
        max: i64,
        parse_error: &str,
        range_error: &str,
    ) -> Result<i64> {
        loop {
            self.prompt(prompt)?;
            let line = self.read_line()?;

            match line.trim().parse::<i64>() {
                Err(_) => self.say(format!("\n{}", parse_error))?,
                Ok(n) if n < min || n > max => self.say(format!("\n{}", range_error))?,
                Ok(n) => return Ok(n),
            }
        }
    }

    /// Read a 0-based record position below `len`
    ///
    /// `len` must be non-zero, otherwise no input is acceptable.
    pub fn read_position(&mut self, action: &str, len: usize) -> Result<usize> {
        let max = len as i64 - 1;
        let prompt = format!(
            "\n Please enter the # of the record you would like to {}: ",
            action
        );
        let range_error = format!("Please enter a valid record ID between 0 and {}.", max);
        let position =
            self.read_bounded(&prompt, 0, max, "Please enter a valid integer.", &range_error)?;
        Ok(position as usize)
    }

    /// Read a free-text value; empty input becomes `"N/A"`
    pub fn read_string(&mut self, label: &str) -> Result<String> {
        self.prompt(&format!("Please enter the {}: ", label))?;
        let line = self.read_line()?;
        if line.is_empty() {
            return Ok(NOT_AVAILABLE.to_string());
        }
        Ok(line)
    }

    /// Read a new value, keeping `current` when the input is empty
    pub fn read_or_keep(&mut self, label: &str, current: &str) -> Result<String> {
        self.prompt(&format!("Please enter the {} [{}]: ", label, current))?;
        let line = self.read_line()?;
        if line.is_empty() {
            return Ok(current.to_string());
        }
        Ok(line)
    }
}
