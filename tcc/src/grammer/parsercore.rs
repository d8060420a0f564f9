use super::token::{Token, TokenKind};
use crate::error::Diagnostic;

/// Cursor over a finished token list.
///
/// Tokens are consumed left to right. `back` undoes exactly one `next`,
/// which is the only lookbehind the grammar needs (`ident` vs `ident "="`).
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let last = tokens.last().map(|t| t.pos).unwrap_or_default();
        Parser {
            tokens,
            pos: 0,
            end: Token::new(TokenKind::End, "", last),
        }
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.end)
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Back : Push the last consumed token back
    pub fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&TokenKind) -> bool>(&self, cond: F) -> bool {
        cond(&self.peek().kind)
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&TokenKind) -> bool>(&mut self, cond: F) -> Option<Token> {
        if self.check_if(cond) {
            Some(self.next())
        } else {
            None
        }
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&TokenKind) -> bool>(
        &mut self,
        cond: F,
        message: &str,
    ) -> Result<Token, Diagnostic> {
        if self.check_if(cond) {
            Ok(self.next())
        } else {
            Err(self.error(message))
        }
    }

    /// Diagnostic located at the next token
    pub fn error(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(message, self.peek().line())
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|kind| matches!(kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:pat, $message:expr) => {
        $parser.expect_tobe(|kind| matches!(kind, $kind), $message)
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:pat, $following:expr) => {
        if $parser.consume_if(|kind| matches!(kind, $trigger)).is_some() {
            Some($following)
        } else {
            None
        }
    };
    ($parser:expr, $trigger:pat) => {
        $parser.consume_if(|kind| matches!(kind, $trigger))
    };
}
