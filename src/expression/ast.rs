use crate::tier::Operator;

/// Parsed form of a submitted or generated expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Pow(Box<Expression>, Box<Expression>),
    Neg(Box<Expression>),
    Factorial(Box<Expression>),
    Sqrt(Box<Expression>),
    SumRange(Box<Expression>, Box<Expression>), // SumRange(lower, upper) = lower + ... + upper
}

impl Expression {
    pub fn number(value: impl Into<f64>) -> Self {
        Expression::Number(value.into())
    }

    pub fn add(l: Expression, r: Expression) -> Self {
        Expression::Add(Box::new(l), Box::new(r))
    }

    pub fn sub(l: Expression, r: Expression) -> Self {
        Expression::Sub(Box::new(l), Box::new(r))
    }

    pub fn mul(l: Expression, r: Expression) -> Self {
        Expression::Mul(Box::new(l), Box::new(r))
    }

    pub fn div(l: Expression, r: Expression) -> Self {
        Expression::Div(Box::new(l), Box::new(r))
    }

    pub fn pow(base: Expression, exponent: Expression) -> Self {
        Expression::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn factorial(operand: Expression) -> Self {
        Expression::Factorial(Box::new(operand))
    }

    pub fn sqrt(operand: Expression) -> Self {
        Expression::Sqrt(Box::new(operand))
    }

    pub fn sum_range(lower: Expression, upper: Expression) -> Self {
        Expression::SumRange(Box::new(lower), Box::new(upper))
    }

    /// Numeric literals in left-to-right order
    pub fn literals(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.collect_literals(&mut out);
        out
    }

    /// Operators the expression applies, one entry per occurrence
    pub fn operators(&self) -> Vec<Operator> {
        let mut out = Vec::new();
        self.collect_operators(&mut out);
        out
    }

    fn collect_operators(&self, out: &mut Vec<Operator>) {
        match self {
            Expression::Number(_) => {}
            Expression::Add(l, r)
            | Expression::Sub(l, r)
            | Expression::Mul(l, r)
            | Expression::Div(l, r)
            | Expression::Pow(l, r)
            | Expression::SumRange(l, r) => {
                out.extend(self.operator());
                l.collect_operators(out);
                r.collect_operators(out);
            }
            Expression::Neg(e) | Expression::Factorial(e) | Expression::Sqrt(e) => {
                out.extend(self.operator());
                e.collect_operators(out);
            }
        }
    }

    /// Operator applied at the root of this node, if any
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expression::Number(_) => None,
            Expression::Add(_, _) => Some(Operator::Add),
            Expression::Sub(_, _) | Expression::Neg(_) => Some(Operator::Subtract),
            Expression::Mul(_, _) => Some(Operator::Multiply),
            Expression::Div(_, _) => Some(Operator::Divide),
            Expression::Pow(_, _) => Some(Operator::Power),
            Expression::Factorial(_) => Some(Operator::Factorial),
            Expression::Sqrt(_) => Some(Operator::SquareRoot),
            Expression::SumRange(_, _) => Some(Operator::Summation),
        }
    }

    fn collect_literals(&self, out: &mut Vec<f64>) {
        match self {
            Expression::Number(n) => out.push(*n),
            Expression::Add(l, r)
            | Expression::Sub(l, r)
            | Expression::Mul(l, r)
            | Expression::Div(l, r)
            | Expression::Pow(l, r)
            | Expression::SumRange(l, r) => {
                l.collect_literals(out);
                r.collect_literals(out);
            }
            Expression::Neg(e) | Expression::Factorial(e) | Expression::Sqrt(e) => {
                e.collect_literals(out);
            }
        }
    }
}
