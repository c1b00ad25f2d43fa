use anyhow::{Result, bail};
use std::io::{BufRead, Write};

/// Line-oriented question and answer over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` and returns the next input line, trimmed.
    ///
    /// # Errors
    ///
    /// Fails when the input is exhausted or on I/O errors.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }

    /// Writes a full line of output.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_and_echoes_prompt() {
        let mut p = Prompter::new(Cursor::new("  hello \n"), Vec::new());
        assert_eq!(p.ask("> ").unwrap(), "hello");
        assert_eq!(p.into_output(), b"> ");
    }

    #[test]
    fn test_ask_on_closed_input_errors() {
        let mut p = Prompter::new(Cursor::new(""), Vec::new());
        assert!(p.ask("> ").is_err());
    }
}
