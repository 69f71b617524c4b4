//! Lazy whitespace tokenizer over a line-oriented input.

use crate::core::error::{CollagerError, CollagerResult};
use std::collections::VecDeque;
use std::io::BufRead;

/// Reads whitespace-separated tokens from a [`BufRead`], one line at a time.
///
/// Required arguments may continue on later lines; optional arguments are only taken
/// from the line currently being read.
pub struct CommandReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> CommandReader<R> {
    /// Wrap an input source.
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// The next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> CollagerResult<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// The next token of a command that needs one.
    pub fn require(&mut self) -> CollagerResult<String> {
        self.next_token()?
            .ok_or_else(|| CollagerError::Session("Invalid end of input".to_string()))
    }

    /// The next token if the current line has one left.
    pub fn optional(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}
