use crate::utils::error::{CliError, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-based terminal prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn text(&mut self, message: &str) -> Result<String> {
        write!(self.output, "? {}: ", message)?;
        Ok(self.read_line()?.trim().to_string())
    }

    /// Empty input takes the default.
    pub fn text_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        write!(self.output, "? {} [{}]: ", message, default)?;
        let answer = self.read_line()?.trim().to_string();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        write!(self.output, "? {} ({}): ", message, hint)?;
        let answer = self.read_line()?.trim().to_lowercase();
        Ok(match answer.as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    /// Numbered choice list; returns the zero-based index. Empty input picks the first entry,
    /// anything unparseable asks again.
    pub fn select<S: AsRef<str>>(&mut self, message: &str, choices: &[S]) -> Result<usize> {
        writeln!(self.output, "? {}", message)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice.as_ref())?;
        }

        loop {
            write!(self.output, "Enter choice [1-{}]: ", choices.len())?;
            let answer = self.read_line()?;
            let answer = answer.trim();
            if answer.is_empty() && !choices.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Invalid choice '{}'", answer)?,
            }
        }
    }

    pub fn pause(&mut self, message: &str) -> Result<()> {
        write!(self.output, "{}", message)?;
        self.read_line()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_select_retries_until_valid() {
        let mut p = prompter("9\nabc\n2\n");
        let choice = p.select("Pick", &["one", "two", "three"]).unwrap();
        assert_eq!(choice, 1);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn test_select_empty_input_takes_first() {
        let mut p = prompter("\n");
        assert_eq!(p.select("Pick", &["one", "two"]).unwrap(), 0);
    }

    #[test]
    fn test_confirm_defaults() {
        let mut p = prompter("\nyes\nnope\n");
        assert!(!p.confirm("Sure?", false).unwrap());
        assert!(p.confirm("Sure?", false).unwrap());
        assert!(!p.confirm("Sure?", true).unwrap());
    }

    #[test]
    fn test_text_with_default() {
        let mut p = prompter("\n 300 \n");
        assert_eq!(p.text_with_default("TTL", "1").unwrap(), "1");
        assert_eq!(p.text_with_default("TTL", "1").unwrap(), "300");
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.text("Name"), Err(CliError::InputClosed)));
    }
}
