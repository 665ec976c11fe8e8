//! Line-oriented prompt I/O.
//!
//! [`Console`] is generic over any `BufRead` input and `Write` output so interactive flows can
//! run against stdin/stdout or against in-memory buffers.

use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::error::{ExplorerError, ExplorerResult};

/// Answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    /// First normalized character is `y`.
    Yes,
    /// First normalized character is `n`.
    No,
}

impl YesNo {
    /// Classify a raw response by its first non-whitespace character, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => Some(Self::Yes),
            Some('n') => Some(Self::No),
            _ => None,
        }
    }
}

/// Prompt reader/writer pair.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap an input and an output.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` (no newline), then read one line without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InputClosed`] at end of input, or [`ExplorerError::Io`].
    pub fn ask(&mut self, prompt: &str) -> ExplorerResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExplorerError::InputClosed);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(line)
    }

    /// Ask until the response starts with `y` or `n`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Console::ask`].
    pub fn ask_yes_no(&mut self, prompt: &str) -> ExplorerResult<YesNo> {
        loop {
            if let Some(answer) = YesNo::parse(&self.ask(prompt)?) {
                return Ok(answer);
            }
        }
    }

    /// Ask once; only a response starting with `y` counts as yes.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Console::ask`].
    pub fn ask_continue(&mut self, prompt: &str) -> ExplorerResult<bool> {
        Ok(YesNo::parse(&self.ask(prompt)?) == Some(YesNo::Yes))
    }

    /// Print one line.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Io`] if the output cannot be written.
    pub fn say(&mut self, line: impl Display) -> ExplorerResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Mutable access to the output, for multi-line renderers.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the console, returning the output (useful with `Vec<u8>` in tests).
    pub fn into_output(self) -> W {
        self.output
    }
}
