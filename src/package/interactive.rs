use crate::core::{GhpmError, GhpmResult};
use crate::di::traits::Prompter;
use std::io::{self, BufRead, Write};

/// Prompter over a line reader and a writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

/// The prompter used by the CLI: stdin and stdout.
pub type StdinPrompter = LinePrompter<io::StdinLock<'static>, io::Stdout>;

impl StdinPrompter {
    pub fn stdio() -> Self {
        LinePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, line: &str) -> GhpmResult<()> {
        writeln!(self.output, "{}", line)
            .map_err(|e| GhpmError::Path(format!("Failed to write to stdout: {}", e)))
    }

    fn ask(&mut self, prompt: &str) -> GhpmResult<Option<String>> {
        write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| GhpmError::Path(format!("Failed to write to stdout: {}", e)))?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .map_err(|e| GhpmError::Path(format!("Failed to read from stdin: {}", e)))?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}
