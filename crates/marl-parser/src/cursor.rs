//! One-token lookahead over the lexer.

use marl_lexer::Lexer;
use marl_syntax::error::{Error, Result};
use marl_syntax::token::Token;

/// A pull cursor holding the single token of lookahead the grammar needs.
///
/// The cursor starts empty: one `advance` (or `prime`) must run before
/// `peek` means anything. Priming is explicit rather than a constructor
/// side effect. Comment tokens are filtered out here, so grammar rules
/// never see them.
pub struct TokenCursor {
    lexer: Lexer,
    current: Option<Token>,
}

impl TokenCursor {
    pub fn new(lexer: Lexer) -> Self {
        Self { lexer, current: None }
    }

    fn next_meaningful(&mut self) -> Result<Token> {
        loop {
            let token = self.lexer.next_token()?;
            if !token.kind.is_comment() {
                return Ok(token);
            }
        }
    }

    /// Ensure the cursor holds a lookahead token: one `advance` when
    /// nothing has been fetched yet, a no-op afterwards.
    pub fn prime(&mut self) -> Result<()> {
        if self.current.is_none() {
            self.advance()?;
        }
        Ok(())
    }

    /// The cached lookahead token, without consuming it.
    pub fn peek(&self) -> Result<Token> {
        self.current
            .ok_or_else(|| Error::new("token cursor has not been primed"))
    }

    /// Fetch the next token into the cursor and return the one consumed.
    ///
    /// The first call primes the cursor; its return value is the freshly
    /// fetched lookahead rather than a consumed token. At end of input the
    /// replacement is `Eof` again, so advancing never runs off the stream.
    pub fn advance(&mut self) -> Result<Token> {
        let next = self.next_meaningful()?;
        let previous = self.current.replace(next);
        Ok(previous.unwrap_or(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marl_syntax::token::TokenKind;

    fn cursor(input: &str) -> TokenCursor {
        TokenCursor::new(Lexer::new(input))
    }

    #[test]
    fn peek_requires_priming() {
        let mut c = cursor("1 2");
        assert!(c.peek().is_err());
        c.prime().unwrap();
        assert_eq!(c.peek().unwrap().kind, TokenKind::IntegerLiteral);
    }

    #[test]
    fn the_first_advance_primes_the_cursor() {
        let mut c = cursor("1 2");
        c.advance().unwrap();
        let first = c.peek().unwrap();
        assert_eq!(first.kind, TokenKind::IntegerLiteral);
        assert_eq!(first.offset, 0);
    }

    #[test]
    fn advance_returns_the_consumed_token() {
        let mut c = cursor("1 2");
        c.prime().unwrap();
        let first = c.peek().unwrap();
        assert_eq!(first.kind, TokenKind::IntegerLiteral);
        let consumed = c.advance().unwrap();
        assert_eq!(consumed, first);
        assert_eq!(c.peek().unwrap().kind, TokenKind::IntegerLiteral);
        assert_ne!(c.peek().unwrap().offset, first.offset);
    }

    #[test]
    fn priming_twice_does_not_skip() {
        let mut c = cursor("1");
        c.prime().unwrap();
        c.prime().unwrap();
        assert_eq!(c.peek().unwrap().kind, TokenKind::IntegerLiteral);
    }

    #[test]
    fn comments_are_filtered() {
        let mut c = cursor("// lead\n1 /* between */ 2");
        c.prime().unwrap();
        assert_eq!(c.advance().unwrap().kind, TokenKind::IntegerLiteral);
        assert_eq!(c.advance().unwrap().kind, TokenKind::IntegerLiteral);
        assert_eq!(c.peek().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn advancing_past_the_end_keeps_yielding_eof() {
        let mut c = cursor("");
        c.prime().unwrap();
        assert_eq!(c.advance().unwrap().kind, TokenKind::Eof);
        assert_eq!(c.advance().unwrap().kind, TokenKind::Eof);
        assert_eq!(c.peek().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn scan_errors_propagate() {
        let mut c = cursor("1 &");
        c.prime().unwrap();
        let err = c.advance().expect_err("fetching the next token should fail");
        assert_eq!(err.msg, "unexpected character '&'");
    }
}
