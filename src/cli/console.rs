use anyhow::Result;
use std::{
    fmt::Display,
    io::{BufRead, Write},
};

/// Line oriented prompt over any reader/writer pair
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// # Errors
    ///
    /// Will return `Err` if the output can not be written
    pub fn println(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Read one line without its terminator, `None` at the end of the input
    ///
    /// # Errors
    ///
    /// Will return `Err` if the output can not be flushed or the input read
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
