use crate::error::{ParseError, Result};

/// Single-pass cursor over argv.
#[derive(Debug)]
pub struct Scanner<'a, S> {
    args: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    pub fn new(args: &'a [S]) -> Self {
        Self { args, pos: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.args.len()
    }

    /// Current token without advancing.
    pub fn peek(&self) -> Result<&'a str> {
        let args: &'a [S] = self.args;
        args.get(self.pos)
            .map(|s| s.as_ref())
            .ok_or(ParseError::ExhaustedInput)
    }

    /// Current token, advancing past it.
    pub fn pop(&mut self) -> Result<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        tracing::trace!(index = self.pos - 1, token, "scanned token");
        Ok(token)
    }
}
