//! Recursive-descent parser that evaluates while it parses
//!
//! Grammar (left-associative unless noted):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := '-' factor | power
//! power      := primary ('^' exponent)?        // right-associative
//! exponent   := '-' exponent | power
//! primary    := number | '(' expression ')'
//! ```

use super::token::{normalize, tokenize, validate, Spanned, Token};
use crate::error::SyntaxError;

/// Nesting limit for parentheses and unary operators
const MAX_DEPTH: usize = 256;

/// Evaluate a restricted arithmetic expression.
///
/// Accepts digits, `.`, `+ - * / ^ ( )`, the `×`/`÷` glyphs and whitespace.
/// Division by zero follows IEEE semantics and yields an infinity; callers
/// must check finiteness themselves.
///
/// # Example
/// ```
/// use fincalc::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
/// ```
pub fn evaluate(expression: &str) -> Result<f64, SyntaxError> {
    let normalized = normalize(expression);
    validate(&normalized)?;
    let tokens = tokenize(&normalized)?;

    let mut parser = Parser::new(&tokens);
    let value = parser.expression()?;
    parser.finish()?;

    log::trace!("evaluated {:?} = {}", expression, value);
    Ok(value)
}

/// Cursor over one expression's tokens.
///
/// Created fresh for every evaluation and never shared.
struct Parser<'a> {
    tokens: &'a [Spanned],
    cursor: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    /// Consume the next token if it matches `expected`
    fn eat(&mut self, expected: Token) -> bool {
        match self.peek() {
            Some(spanned) if spanned.token == expected => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    fn expression(&mut self) -> Result<f64, SyntaxError> {
        let mut left = self.term()?;
        loop {
            if self.eat(Token::Plus) {
                left += self.term()?;
            } else if self.eat(Token::Minus) {
                left -= self.term()?;
            } else {
                return Ok(left);
            }
        }
    }

    fn term(&mut self) -> Result<f64, SyntaxError> {
        let mut left = self.factor()?;
        loop {
            if self.eat(Token::Star) {
                left *= self.factor()?;
            } else if self.eat(Token::Slash) {
                left /= self.factor()?;
            } else {
                return Ok(left);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, SyntaxError> {
        self.descend(|parser| {
            if parser.eat(Token::Minus) {
                Ok(-parser.factor()?)
            } else {
                parser.power()
            }
        })
    }

    fn power(&mut self) -> Result<f64, SyntaxError> {
        let base = self.primary()?;
        if self.eat(Token::Caret) {
            let exponent = self.exponent()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn exponent(&mut self) -> Result<f64, SyntaxError> {
        self.descend(|parser| {
            if parser.eat(Token::Minus) {
                Ok(-parser.exponent()?)
            } else {
                parser.power()
            }
        })
    }

    fn primary(&mut self) -> Result<f64, SyntaxError> {
        let spanned = *self.peek().ok_or(SyntaxError::UnexpectedEnd)?;
        match spanned.token {
            Token::Number(value) => {
                self.cursor += 1;
                Ok(value)
            }
            Token::LParen => {
                self.cursor += 1;
                let value = self.descend(|parser| parser.expression())?;
                if !self.eat(Token::RParen) {
                    return Err(SyntaxError::UnbalancedParentheses {
                        position: spanned.position,
                    });
                }
                Ok(value)
            }
            other => Err(SyntaxError::UnexpectedToken {
                token: other.describe(),
                position: spanned.position,
            }),
        }
    }

    fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            let position = self.peek().map_or(0, |s| s.position);
            return Err(SyntaxError::NestingTooDeep { position });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Every token must have been consumed
    fn finish(&self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some(spanned) => Err(SyntaxError::TrailingInput {
                token: spanned.token.describe(),
                position: spanned.position,
            }),
        }
    }
}
