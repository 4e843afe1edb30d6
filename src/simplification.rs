//! Simplification - reduces expressions with algebraic identities
//!
//! Rules, applied top-down:
//! - exact subtrees fold to a single `Number`
//! - `0 + u` and `u + 0` become `u`
//! - `1 * u` and `u * 1` become `u`
//!
//! Absorption by zero (`0 * u`) needs no rule of its own: such a product is
//! exact and folds to `0`.

use crate::Expr;
use crate::evaluator::is_exact_zero;
use num_traits::One;
use std::sync::Arc;
use tracing::trace;

impl Expr {
    /// Simplify this expression
    ///
    /// The result evaluates to the same value as `self` under every
    /// environment that can evaluate `self`. Simplifying twice gives the same
    /// tree as simplifying once. Subtrees that need no rewrite are shared with
    /// `self` through their `Arc`, not copied.
    pub fn simplify(&self) -> Expr {
        let root = Arc::new(self.clone());
        let simplified = simplify_shared(&root);
        drop(root);
        Arc::unwrap_or_clone(simplified)
    }
}

/// Simplify a shared node, handing back the same `Arc` when nothing changes
pub(crate) fn simplify_shared(node: &Arc<Expr>) -> Arc<Expr> {
    match node.as_ref() {
        // Leaves are already canonical
        Expr::Number(_) | Expr::Variable(_) => Arc::clone(node),

        expr => {
            if let Some(value) = expr.constant_value() {
                trace!(expr = %expr, value, "fold exact subtree");
                return Arc::new(Expr::Number(value));
            }
            simplify_inexact(node)
        }
    }
}

/// Rewrite a node already known not to be exact
fn simplify_inexact(node: &Arc<Expr>) -> Arc<Expr> {
    match node.as_ref() {
        Expr::Number(_) | Expr::Variable(_) => Arc::clone(node),

        Expr::Neg(u) => rebuild_unary(node, u, Expr::Neg),
        Expr::Sin(u) => rebuild_unary(node, u, Expr::Sin),
        Expr::Cos(u) => rebuild_unary(node, u, Expr::Cos),

        // Additive identity: 0 + u = u + 0 = u
        Expr::Add(l, r) => {
            if is_exact_zero(l) {
                trace!(expr = %node, "drop zero addend on the left");
                simplify_shared(r)
            } else if is_exact_zero(r) {
                trace!(expr = %node, "drop zero addend on the right");
                simplify_shared(l)
            } else {
                rebuild_binary(node, l, r, Expr::Add)
            }
        }

        // Multiplicative identity: 1 * u = u * 1 = u
        Expr::Mul(l, r) => {
            if is_exact_one(l) {
                trace!(expr = %node, "drop unit factor on the left");
                simplify_shared(r)
            } else if is_exact_one(r) {
                trace!(expr = %node, "drop unit factor on the right");
                simplify_shared(l)
            } else {
                rebuild_binary(node, l, r, Expr::Mul)
            }
        }
    }
}

fn rebuild_unary(node: &Arc<Expr>, u: &Arc<Expr>, wrap: fn(Arc<Expr>) -> Expr) -> Arc<Expr> {
    let su = simplify_shared(u);
    if Arc::ptr_eq(&su, u) {
        Arc::clone(node)
    } else {
        Arc::new(wrap(su))
    }
}

fn rebuild_binary(
    node: &Arc<Expr>,
    l: &Arc<Expr>,
    r: &Arc<Expr>,
    wrap: fn(Arc<Expr>, Arc<Expr>) -> Expr,
) -> Arc<Expr> {
    let sl = simplify_shared(l);
    let sr = simplify_shared(r);
    if Arc::ptr_eq(&sl, l) && Arc::ptr_eq(&sr, r) {
        Arc::clone(node)
    } else {
        Arc::new(wrap(sl, sr))
    }
}

fn is_exact_one(expr: &Expr) -> bool {
    expr.constant_value().is_some_and(|v| v.is_one())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn n(v: f64) -> Expr {
        Expr::number(v)
    }

    #[test]
    fn test_leaves_unchanged() {
        assert_eq!(n(3.0).simplify(), n(3.0));
        assert_eq!(x().simplify(), x());
    }

    #[test]
    fn test_constant_folding() {
        let expr = Expr::add_expr(Expr::mul_expr(n(2.0), n(3.0)), Expr::negate(n(1.0)));
        assert_eq!(expr.simplify(), n(5.0));

        assert_eq!(Expr::sin(n(0.0)).simplify(), n(0.0));
        assert_eq!(Expr::cos(n(0.0)).simplify(), n(1.0));
    }

    #[test]
    fn test_add_zero() {
        assert_eq!(Expr::add_expr(n(0.0), x()).simplify(), x());
        assert_eq!(Expr::add_expr(x(), n(0.0)).simplify(), x());
        // Zero hidden behind an exact subtree
        let hidden_zero = Expr::add_expr(n(1.0), n(-1.0));
        assert_eq!(Expr::add_expr(hidden_zero, Expr::sin(x())).simplify(), Expr::sin(x()));
    }

    #[test]
    fn test_mul_one_and_zero() {
        assert_eq!(Expr::mul_expr(n(1.0), x()).simplify(), x());
        assert_eq!(Expr::mul_expr(x(), n(1.0)).simplify(), x());
        assert_eq!(Expr::mul_expr(n(0.0), x()).simplify(), n(0.0));
        assert_eq!(Expr::mul_expr(Expr::cos(x()), n(0.0)).simplify(), n(0.0));
    }

    #[test]
    fn test_nested_rewrites() {
        // -(1 * x) + (x * (0 + y))
        let expr = Expr::add_expr(
            Expr::negate(Expr::mul_expr(n(1.0), x())),
            Expr::mul_expr(x(), Expr::add_expr(n(0.0), Expr::variable("y"))),
        );
        let expected = Expr::add_expr(Expr::negate(x()), Expr::mul_expr(x(), Expr::variable("y")));
        assert_eq!(expr.simplify(), expected);
    }

    #[test]
    fn test_no_commutative_rewrites() {
        // Like terms are not collected
        let expr = Expr::add_expr(x(), x());
        assert_eq!(expr.simplify(), expr);

        let scaled = Expr::mul_expr(n(2.0), x());
        assert_eq!(scaled.simplify(), scaled);
    }

    #[test]
    fn test_idempotent() {
        let expr = Expr::add_expr(
            Expr::mul_expr(Expr::add_expr(x(), n(0.0)), n(1.0)),
            Expr::sin(Expr::mul_expr(n(2.0), n(3.0))),
        );
        let once = expr.simplify();
        assert_eq!(once.simplify(), once);
        assert_eq!(once, Expr::add_expr(x(), n(6.0_f64.sin())));
    }

    #[test]
    fn test_unchanged_subtrees_are_shared() {
        let untouched = Arc::new(Expr::sin(x()));
        let expr = Expr::Add(
            Arc::clone(&untouched),
            Arc::new(Expr::mul_expr(n(1.0), Expr::variable("y"))),
        );

        match expr.simplify() {
            Expr::Add(left, right) => {
                assert!(Arc::ptr_eq(&left, &untouched));
                assert_eq!(*right, Expr::variable("y"));
            }
            other => panic!("expected a sum, got {}", other),
        }

        // A dropped identity hands back the surviving operand itself
        let kept = Arc::new(Expr::cos(x()));
        let shared = simplify_shared(&Arc::new(Expr::Mul(Arc::new(n(1.0)), Arc::clone(&kept))));
        assert!(Arc::ptr_eq(&shared, &kept));
    }
}
