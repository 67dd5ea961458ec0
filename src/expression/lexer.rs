use std::fmt;

use log::debug;

use crate::expression::errors::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    Sqrt,
    Sigma,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Sqrt => write!(f, "√"),
            TokenKind::Sigma => write!(f, "Σ"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

/// Split raw input into tokens, folding display glyphs onto one token per operator.
///
/// # Errors
///
/// Returns `UnexpectedCharacter` for anything outside the operator vocabulary and
/// `InvalidNumber` for a literal that does not parse.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = position;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = input.get(position..end).unwrap_or_default();
                let value = parse_number(text)?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position,
                });
                continue;
            }
            c if is_identifier_char(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if is_identifier_char(c) {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let kind = if name == "sqrt" {
                    TokenKind::Sqrt
                } else {
                    TokenKind::Ident(name)
                };
                tokens.push(Token { kind, position });
                continue;
            }
            '+' => TokenKind::Plus,
            '-' | '−' => TokenKind::Minus,
            '*' => {
                chars.next();
                let kind = if let Some(&(_, '*')) = chars.peek() {
                    chars.next();
                    TokenKind::Caret
                } else {
                    TokenKind::Star
                };
                tokens.push(Token { kind, position });
                continue;
            }
            '×' => TokenKind::Star,
            '/' | '÷' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '!' => TokenKind::Bang,
            '√' => TokenKind::Sqrt,
            'Σ' => TokenKind::Sigma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            other => {
                debug!("Rejecting character '{}' at {}", other, position);
                return Err(ExpressionError::UnexpectedCharacter {
                    ch: other,
                    position,
                });
            }
        };
        chars.next();
        tokens.push(Token { kind, position });
    }

    debug!("Tokenized '{}' into {} tokens", input, tokens.len());
    Ok(tokens)
}

// Digits never join an identifier so literal counting stays textual.
fn is_identifier_char(c: char) -> bool {
    (c.is_alphabetic() || c == '_') && c != 'Σ'
}

fn parse_number(text: &str) -> Result<f64, ExpressionError> {
    let well_formed = !text.starts_with('.')
        && !text.ends_with('.')
        && text.chars().filter(|&c| c == '.').count() <= 1;
    if !well_formed {
        return Err(ExpressionError::InvalidNumber(text.to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| ExpressionError::InvalidNumber(text.to_string()))
}
