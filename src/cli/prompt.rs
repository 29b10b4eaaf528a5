//! Line prompts
//!
//! Reads one answer per prompt from any buffered reader, so the menu can be
//! driven from stdin or from a test fixture.

use std::io::{BufRead, Write};

use crate::error::GradebookResult;

/// Prompts on an output stream and reads answers from `input`
pub struct Prompt<R> {
    input: R,
    buffer: String,
}

impl<R: BufRead> Prompt<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buffer: String::new(),
        }
    }

    /// Print `prompt` and read one trimmed line
    ///
    /// Returns `None` once the input is exhausted.
    pub fn ask<W: Write>(&mut self, out: &mut W, prompt: &str) -> GradebookResult<Option<String>> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        self.buffer.clear();
        if self.input.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buffer.trim().to_string()))
    }
}
