// Differentiation engine - applies calculus rules
//
// Every level simplifies its own result, so the tree handed back to the
// parent is already reduced. Operands that a rule needs unchanged (the `v`
// in `u' * v`, the `u` inside `cos(u)`) are shared through their `Arc`.

use crate::Expr;
use std::sync::Arc;

impl Expr {
    /// Differentiate this expression with respect to `var`
    ///
    /// The result is always simplified.
    ///
    /// # Example
    /// ```
    /// use symb_expr::Expr;
    ///
    /// let expr = Expr::sin(Expr::variable("x"));
    /// assert_eq!(expr.derive("x"), Expr::cos(Expr::variable("x")));
    /// ```
    pub fn derive(&self, var: &str) -> Expr {
        let derivative = match self {
            // Base cases
            Expr::Number(_) => Expr::number(0.0),

            Expr::Variable(name) => {
                if name == var {
                    Expr::number(1.0)
                } else {
                    Expr::number(0.0)
                }
            }

            // (-u)' = -u'
            Expr::Neg(u) => Expr::negate(u.derive(var)),

            // sin(u)' = u' * cos(u)
            Expr::Sin(u) => Expr::mul_expr(u.derive(var), Expr::Cos(Arc::clone(u))),

            // cos(u)' = u' * -sin(u)
            Expr::Cos(u) => Expr::mul_expr(u.derive(var), Expr::negate(Expr::Sin(Arc::clone(u)))),

            // Sum rule: (u + v)' = u' + v'
            Expr::Add(u, v) => Expr::add_expr(u.derive(var), v.derive(var)),

            // Product rule: (u * v)' = u' * v + u * v'
            Expr::Mul(u, v) => {
                let term1 = Expr::Mul(Arc::new(u.derive(var)), Arc::clone(v));
                let term2 = Expr::Mul(Arc::clone(u), Arc::new(v.derive(var)));
                Expr::add_expr(term1, term2)
            }
        };

        derivative.simplify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn y() -> Expr {
        Expr::variable("y")
    }

    #[test]
    fn test_derive_constant() {
        assert_eq!(Expr::number(42.0).derive("x"), Expr::number(0.0));
        let exact = Expr::sin(Expr::add_expr(Expr::number(1.0), Expr::number(2.0)));
        assert_eq!(exact.derive("x"), Expr::number(0.0));
    }

    #[test]
    fn test_derive_variable() {
        assert_eq!(x().derive("x"), Expr::number(1.0));
        assert_eq!(x().derive("y"), Expr::number(0.0));
    }

    #[test]
    fn test_derive_negation() {
        assert_eq!(Expr::negate(x()).derive("x"), Expr::number(-1.0));
        assert_eq!(
            Expr::negate(Expr::sin(x())).derive("x"),
            Expr::negate(Expr::cos(x()))
        );
    }

    #[test]
    fn test_derive_trig() {
        assert_eq!(Expr::sin(x()).derive("x"), Expr::cos(x()));
        assert_eq!(Expr::cos(x()).derive("x"), Expr::negate(Expr::sin(x())));
        assert_eq!(Expr::sin(y()).derive("x"), Expr::number(0.0));
    }

    #[test]
    fn test_chain_rule() {
        // sin(x * y)' wrt x = y * cos(x * y)
        let inner = Expr::mul_expr(x(), y());
        let result = Expr::sin(inner.clone()).derive("x");
        assert_eq!(result, Expr::mul_expr(y(), Expr::cos(inner)));
    }

    #[test]
    fn test_sum_rule() {
        let expr = Expr::add_expr(x(), Expr::mul_expr(Expr::number(3.0), y()));
        assert_eq!(expr.derive("x"), Expr::number(1.0));
        assert_eq!(expr.derive("y"), Expr::number(3.0));
    }

    #[test]
    fn test_product_rule() {
        let square = Expr::mul_expr(x(), x());
        let derivative = square.derive("x");
        assert_eq!(derivative, Expr::add_expr(x(), x()));

        let env = Environment::new().with("x", 3.0);
        assert_eq!(derivative.evaluate(&env), Ok(6.0));

        // (x * y)' wrt x keeps y
        assert_eq!(Expr::mul_expr(x(), y()).derive("x"), y());
    }

    #[test]
    fn test_product_with_constant_factor_derivative() {
        // (sin(x) * cos(y))' wrt x = cos(x) * cos(y)
        let v = Arc::new(Expr::cos(y()));
        let product = Expr::Mul(Arc::new(Expr::sin(x())), Arc::clone(&v));

        match product.derive("x") {
            Expr::Mul(left, right) => {
                assert_eq!(*left, Expr::cos(x()));
                assert!(Arc::ptr_eq(&right, &v), "untouched factor should be shared");
            }
            other => panic!("expected a product, got {}", other),
        }
    }

    #[test]
    fn test_chain_rule_shares_inner_operand() {
        let inner = Arc::new(Expr::mul_expr(x(), y()));
        let derivative = Expr::Sin(Arc::clone(&inner)).derive("x");

        match derivative {
            Expr::Mul(_, outer) => match outer.as_ref() {
                Expr::Cos(u) => assert!(Arc::ptr_eq(u, &inner)),
                other => panic!("expected a cosine, got {}", other),
            },
            other => panic!("expected a product, got {}", other),
        }
    }
}
