//! Line-oriented terminal IO used by the interactive session.

use std::io::{self, BufRead, Write};

const WIDTH: usize = 60;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Console::prompt`], re-asking until the answer is non-empty.
    pub fn prompt_required(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.prompt(prompt)? {
                Some(value) if value.is_empty() => {
                    self.line("This field is required. Please try again.")?
                }
                other => return Ok(other),
            }
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    pub fn success(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "\n✅ {}", text.as_ref())
    }

    pub fn failure(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "\n❌ {}", text.as_ref())
    }

    pub fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(WIDTH))?;
        writeln!(self.output, "{:^width$}", title, width = WIDTH)?;
        writeln!(self.output, "{}", "=".repeat(WIDTH))
    }

    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "-".repeat(WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_trims_and_reports_eof() {
        let mut console = Console::new(&b"  hello \n"[..], Vec::new());
        assert_eq!(console.prompt("> ").unwrap().as_deref(), Some("hello"));
        assert_eq!(console.prompt("> ").unwrap(), None);
    }

    #[test]
    fn required_prompt_asks_again() {
        let mut console = Console::new(&b"\n \nvalue\n"[..], Vec::new());
        assert_eq!(console.prompt_required("? ").unwrap().as_deref(), Some("value"));
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out.matches("This field is required").count(), 2);
    }
}
