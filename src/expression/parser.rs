use std::str::FromStr;

use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;
use crate::expression::lexer::{Token, TokenKind, tokenize};

/// Deepest nesting of parentheses, signs, roots and exponents accepted
pub const MAX_NESTING_DEPTH: usize = 256;

/// Longest token stream accepted; bounds the depth of any parsed tree
pub const MAX_EXPRESSION_TOKENS: usize = 512;

/// Recursive-descent parser over the token stream.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := ('-' | '+') unary | power
/// power   := postfix ('^' unary)?
/// postfix := primary '!'*
/// primary := number | '(' expr ')' | '√' postfix | 'Σ' '(' [ident ','] expr ',' expr ')'
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn unexpected(&self) -> ExpressionError {
        match self.tokens.get(self.pos) {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => ExpressionError::UnbalancedParentheses,
            Some(token) => ExpressionError::UnexpectedToken {
                found: token.kind.to_string(),
                position: token.position,
            },
            None => ExpressionError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExpressionError> {
        match self.peek() {
            Some(found) if *found == kind => {
                self.pos += 1;
                Ok(())
            }
            None if kind == TokenKind::RParen => Err(ExpressionError::UnbalancedParentheses),
            _ => Err(self.unexpected()),
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Expression, ExpressionError>,
    ) -> Result<Expression, ExpressionError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ExpressionError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.term()?;
        loop {
            match self.peek() {
                Some(TokenKind::Plus) => {
                    self.pos += 1;
                    left = Expression::add(left, self.term()?);
                }
                Some(TokenKind::Minus) => {
                    self.pos += 1;
                    left = Expression::sub(left, self.term()?);
                }
                _ => return Ok(left),
            }
        }
    }

    fn term(&mut self) -> Result<Expression, ExpressionError> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Some(TokenKind::Star) => {
                    self.pos += 1;
                    left = Expression::mul(left, self.unary()?);
                }
                Some(TokenKind::Slash) => {
                    self.pos += 1;
                    left = Expression::div(left, self.unary()?);
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> Result<Expression, ExpressionError> {
        self.nested(Self::signed)
    }

    fn signed(&mut self) -> Result<Expression, ExpressionError> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                Ok(Expression::Neg(Box::new(self.unary()?)))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expression, ExpressionError> {
        let base = self.postfix()?;
        if let Some(TokenKind::Caret) = self.peek() {
            self.pos += 1;
            // Exponent goes back through unary so 2^-1 and 2^3^2 (right-assoc) both parse.
            let exponent = self.unary()?;
            return Ok(Expression::pow(base, exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expression, ExpressionError> {
        let mut operand = self.primary()?;
        while let Some(TokenKind::Bang) = self.peek() {
            self.pos += 1;
            operand = Expression::factorial(operand);
        }
        Ok(operand)
    }

    fn primary(&mut self) -> Result<Expression, ExpressionError> {
        let tokens = self.tokens;
        let token = match tokens.get(self.pos) {
            Some(token) => token,
            None => return Err(ExpressionError::UnexpectedEnd),
        };

        match &token.kind {
            TokenKind::Number(n) => {
                self.pos += 1;
                Ok(Expression::Number(*n))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Sqrt => {
                self.pos += 1;
                Ok(Expression::sqrt(self.nested(Self::postfix)?))
            }
            TokenKind::Sigma => {
                self.pos += 1;
                self.summation()
            }
            _ => Err(self.unexpected()),
        }
    }

    fn summation(&mut self) -> Result<Expression, ExpressionError> {
        self.expect(TokenKind::LParen)?;

        let mut arity = 0;
        if let Some(TokenKind::Ident(name)) = self.peek() {
            debug!("Summation placeholder '{}' ignored", name);
            self.pos += 1;
            arity += 1;
            self.expect(TokenKind::Comma)?;
        }

        let mut bounds = vec![self.expr()?];
        while let Some(TokenKind::Comma) = self.peek() {
            self.pos += 1;
            bounds.push(self.expr()?);
        }
        self.expect(TokenKind::RParen)?;
        arity += bounds.len();

        let mut bounds = bounds.into_iter();
        match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(lower), Some(upper), None) => Ok(Expression::sum_range(lower, upper)),
            _ => Err(ExpressionError::SummationArity(arity)),
        }
    }
}

impl Expression {
    /// Parse player or generator text into an expression tree.
    ///
    /// # Errors
    ///
    /// Returns a parse-kind `ExpressionError` for unknown characters, malformed
    /// literals, misplaced tokens, unbalanced parentheses, bad summation arity,
    /// or input longer or more deeply nested than the parser accepts.
    pub fn parse(input: &str) -> Result<Expression, ExpressionError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(ExpressionError::EmptyExpression);
        }
        if tokens.len() > MAX_EXPRESSION_TOKENS {
            return Err(ExpressionError::ExpressionTooLong(tokens.len()));
        }

        let mut parser = Parser::new(&tokens);
        let expr = parser.expr()?;
        if parser.pos < tokens.len() {
            let err = parser.unexpected();
            debug!("Trailing input after expression: {}", err);
            return Err(err);
        }

        debug!("Parsed '{}' as {:?}", input, expr);
        Ok(expr)
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}
