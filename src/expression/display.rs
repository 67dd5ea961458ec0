use std::fmt;

use crate::expression::ast::Expression;

impl fmt::Display for Expression {
    /// Renders with keyboard glyphs; the output parses back to an equal tree.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn precedence(expr: &Expression) -> u8 {
            match expr {
                Expression::Add(_, _) | Expression::Sub(_, _) => 1,
                Expression::Mul(_, _) | Expression::Div(_, _) => 2,
                Expression::Neg(_) => 3,
                Expression::Pow(_, _) => 4,
                Expression::Number(_)
                | Expression::Factorial(_)
                | Expression::Sqrt(_)
                | Expression::SumRange(_, _) => 5,
            }
        }

        fn write_with_parens(
            f: &mut fmt::Formatter,
            expr: &Expression,
            need_parens: bool,
        ) -> fmt::Result {
            if need_parens {
                write!(f, "(")?;
                fmt_expression(f, expr)?;
                write!(f, ")")
            } else {
                fmt_expression(f, expr)
            }
        }

        fn write_binary(
            f: &mut fmt::Formatter,
            l: &Expression,
            glyph: &str,
            r: &Expression,
            level: u8,
        ) -> fmt::Result {
            write_with_parens(f, l, precedence(l) < level)?;
            write!(f, " {} ", glyph)?;
            write_with_parens(f, r, precedence(r) <= level)
        }

        fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
            match expr {
                Expression::Number(n) => write!(f, "{}", n),
                Expression::Add(l, r) => write_binary(f, l, "+", r, 1),
                Expression::Sub(l, r) => write_binary(f, l, "−", r, 1),
                Expression::Mul(l, r) => write_binary(f, l, "×", r, 2),
                Expression::Div(l, r) => write_binary(f, l, "÷", r, 2),
                Expression::Pow(l, r) => {
                    write_with_parens(f, l, precedence(l) <= 4)?;
                    write!(f, "^")?;
                    write_with_parens(f, r, precedence(r) < 4)
                }
                Expression::Neg(e) => {
                    write!(f, "−")?;
                    write_with_parens(f, e, precedence(e) < 4)
                }
                Expression::Factorial(e) => {
                    let bare = matches!(
                        e.as_ref(),
                        Expression::Number(_) | Expression::Factorial(_) | Expression::SumRange(_, _)
                    );
                    write_with_parens(f, e, !bare)?;
                    write!(f, "!")
                }
                Expression::Sqrt(e) => {
                    write!(f, "√")?;
                    write_with_parens(f, e, !matches!(e.as_ref(), Expression::Number(_)))
                }
                Expression::SumRange(lower, upper) => {
                    write!(f, "Σ(")?;
                    fmt_expression(f, lower)?;
                    write!(f, ", ")?;
                    fmt_expression(f, upper)?;
                    write!(f, ")")
                }
            }
        }

        fmt_expression(f, self)
    }
}
