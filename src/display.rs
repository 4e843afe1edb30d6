// Display formatting for expressions
use crate::Expr;
use std::fmt;

/// Integral values below this magnitude print without a fractional part
const INTEGER_DISPLAY_LIMIT: f64 = 1e15;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => format_number(f, *n),

            Expr::Variable(name) => write!(f, "{}", name),

            Expr::Neg(u) => write!(f, "-{}", u),

            Expr::Sin(u) => write!(f, "sin({})", u),

            Expr::Cos(u) => write!(f, "cos({})", u),

            Expr::Add(u, v) => write!(f, "({} + {})", u, v),

            // No parentheses: mirrors the tree shape, not operator precedence
            Expr::Mul(u, v) => write!(f, "{} * {}", u, v),
        }
    }
}

fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            write!(f, "Infinity")
        } else {
            write!(f, "-Infinity")
        }
    } else if n.fract() == 0.0 && n.abs() < INTEGER_DISPLAY_LIMIT {
        // Display as integer if no fractional part
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}
