use std::io::{BufRead, Write};

use log::trace;

use crate::error::{Error, InputError, Result};
use crate::types::InputField;

/// Line-oriented prompt/print collaborator. Answers are parsed and checked
/// before they are handed back; nothing falls back to a default.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask(&mut self, field: InputField) -> Result<f64> {
        write!(self.output, "{}", field.prompt())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::UnexpectedEof(field.key()));
        }
        let answer = line.trim();
        trace!("{} answered {:?}", field.key(), answer);
        let value: f64 = answer.parse().map_err(|_| InputError::NotNumeric {
            field: field.key(),
            value: answer.to_string(),
        })?;
        Ok(field.check(value)?)
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
