//! Line-oriented console boundary
//!
//! Wraps any `BufRead`/`Write` pair so the game can run against stdin and
//! stdout or against in-memory buffers in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{GameError, Result};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of player-facing text
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Show `text` without a newline and read the reply (newline stripped)
    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        let reply = line.trim_end_matches(['\r', '\n']).to_string();
        log::trace!("Read reply {:?}", reply);
        Ok(reply)
    }

    /// Consume the console, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_line_and_echoes_text() {
        let mut console = Console::new(Cursor::new("42\nnext\n"), Vec::new());
        assert_eq!(console.prompt("Guess: ").unwrap(), "42");
        assert_eq!(console.prompt("Again: ").unwrap(), "next");
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "Guess: Again: ");
    }

    #[test]
    fn test_prompt_strips_crlf() {
        let mut console = Console::new(Cursor::new("yes\r\n"), Vec::new());
        assert_eq!(console.prompt("").unwrap(), "yes");
    }

    #[test]
    fn test_prompt_at_eof_is_input_closed() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert!(matches!(console.prompt("> "), Err(GameError::InputClosed)));
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut console = Console::new(Cursor::new("3"), Vec::new());
        assert_eq!(console.prompt("> ").unwrap(), "3");
        assert!(matches!(console.prompt("> "), Err(GameError::InputClosed)));
    }
}
