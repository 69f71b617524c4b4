//! Whitespace token reader shared by the text formats.

use crate::codec::{CodecError, CodecResult};

/// Splits text into whitespace-separated tokens, ignoring comment lines.
///
/// A comment line is one whose first non-blank character is `#`.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    /// Tokenize `text`.
    pub fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect();

        Self { tokens, position: 0 }
    }

    /// Check if any tokens remain.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Read the next token. `expected` names the item for error messages.
    pub fn next_token(&mut self, expected: &'static str) -> CodecResult<&'a str> {
        let token = self
            .tokens
            .get(self.position)
            .copied()
            .ok_or(CodecError::UnexpectedEnd { expected })?;
        self.position += 1;
        Ok(token)
    }

    /// Read the next token as a signed integer.
    pub fn next_int(&mut self, expected: &'static str) -> CodecResult<i64> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| CodecError::InvalidNumber {
            expected,
            token: token.to_string(),
        })
    }

    /// Read the next token as a non-negative size.
    pub fn next_size(&mut self, expected: &'static str) -> CodecResult<usize> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| CodecError::InvalidNumber {
            expected,
            token: token.to_string(),
        })
    }

    /// Read the magic header token and check that it is `header`.
    pub fn expect_header(&mut self, format: &'static str, header: &'static str) -> CodecResult<()> {
        let found = self.next_token("file header")?;
        if found != header {
            return Err(CodecError::BadHeader {
                format,
                expected: header,
                found: found.to_string(),
            });
        }
        Ok(())
    }
}
