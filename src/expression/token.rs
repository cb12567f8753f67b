//! Lexical stage: glyph normalization, character validation and tokenizing

use crate::error::SyntaxError;

/// A lexical unit of an arithmetic expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn from_operator(c: char) -> Option<Self> {
        match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        }
    }

    /// Source text of the token, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "^".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

/// A token together with its character offset in the normalized input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Replace calculator glyphs with ASCII operators and drop whitespace
pub fn normalize(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' | '·' => '*',
            '÷' => '/',
            '−' => '-',
            other => other,
        })
        .collect()
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Reject anything outside digits, the decimal point, operators and parentheses
pub fn validate(normalized: &str) -> Result<(), SyntaxError> {
    for (position, character) in normalized.chars().enumerate() {
        if !is_number_char(character) && Token::from_operator(character).is_none() {
            return Err(SyntaxError::IllegalCharacter { character, position });
        }
    }
    Ok(())
}

/// Split a validated, normalized expression into tokens.
///
/// Digit/decimal-point runs become one number; every other character is a
/// single-character operator.
pub fn tokenize(normalized: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut literal_start = 0;

    for (position, c) in normalized.chars().enumerate() {
        if is_number_char(c) {
            if literal.is_empty() {
                literal_start = position;
            }
            literal.push(c);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(parse_number(&literal, literal_start)?);
            literal.clear();
        }

        let token = Token::from_operator(c)
            .ok_or(SyntaxError::IllegalCharacter { character: c, position })?;
        tokens.push(Spanned { token, position });
    }

    if !literal.is_empty() {
        tokens.push(parse_number(&literal, literal_start)?);
    }

    Ok(tokens)
}

fn parse_number(literal: &str, position: usize) -> Result<Spanned, SyntaxError> {
    literal
        .parse::<f64>()
        .map(|value| Spanned { token: Token::Number(value), position })
        .map_err(|_| SyntaxError::InvalidNumber {
            literal: literal.to_string(),
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<Token> {
        tokenize(&normalize(expr))
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_normalize_glyphs() {
        assert_eq!(normalize(" 3 × 4 ÷ 2 "), "3*4/2");
        assert_eq!(normalize("5 − 1"), "5-1");
    }

    #[test]
    fn test_tokenize_runs() {
        assert_eq!(
            kinds("12.5+(3)"),
            vec![
                Token::Number(12.5),
                Token::Plus,
                Token::LParen,
                Token::Number(3.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("10*2").unwrap();
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 2);
        assert_eq!(tokens[2].position, 3);
    }

    #[test]
    fn test_validate_rejects_letters() {
        let err = validate("2+a").unwrap_err();
        assert_eq!(err, SyntaxError::IllegalCharacter { character: 'a', position: 2 });
        assert!(validate("(1.5+2)^3/4-1*2").is_ok());
    }

    #[test]
    fn test_invalid_literal() {
        let err = tokenize("1.2.3+1").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidNumber { position: 0, .. }));
        assert!(tokenize(".").is_err());
    }
}
