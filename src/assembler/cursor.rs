use super::error::AsmErrorKind;

/// A forward-only cursor over the tokens of one function body.
pub struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: Vec<&'a str>) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    /// Index of the next token to be consumed.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Consumes a token, returning it along with its index.
    /// Returns None if no tokens are left.
    pub fn next(&mut self) -> Option<(usize, &'a str)> {
        let tok = self.peek()?;
        let pos = self.pos;
        self.pos += 1;
        Some((pos, tok))
    }

    /// Consumes the operand of the token just read.
    pub fn operand(&mut self) -> Result<&'a str, AsmErrorKind> {
        match self.next() {
            Some((_, tok)) => Ok(tok),
            None => {
                let after = self.pos.checked_sub(1)
                    .and_then(|i| self.tokens.get(i))
                    .copied()
                    .unwrap_or_default();
                Err(AsmErrorKind::MissingToken { after: after.to_owned() })
            }
        }
    }

    /// Consumes the operand of the token just read as a base-10 integer.
    pub fn int_operand(&mut self) -> Result<i32, AsmErrorKind> {
        let tok = self.operand()?;
        tok.parse::<i32>().map_err(|source| AsmErrorKind::InvalidInteger {
            token: tok.to_owned(),
            source,
        })
    }
}
