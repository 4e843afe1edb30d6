//! Parallel batch evaluation using Rayon
//!
//! Expressions are immutable and `Sync`, so one tree can be evaluated from
//! many threads at once without locking.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_expr = { version = "0.1", features = ["parallel"] }
//! ```

use crate::evaluator::Bindings;
use crate::{Expr, ExprError};
use rayon::prelude::*;

/// Evaluate one expression under many environments
///
/// Results come back in the order of `envs`. Each entry fails or succeeds on
/// its own.
///
/// # Example
/// ```ignore
/// use symb_expr::{Environment, Expr, parallel::evaluate_batch};
///
/// let expr = Expr::mul_expr(Expr::variable("x"), Expr::variable("x"));
/// let envs: Vec<Environment> = (0..4).map(|i| Environment::new().with("x", i as f64)).collect();
/// let squares = evaluate_batch(&expr, &envs);
/// ```
pub fn evaluate_batch<E>(expr: &Expr, envs: &[E]) -> Vec<Result<f64, ExprError>>
where
    E: Bindings + Sync,
{
    envs.par_iter().map(|env| expr.evaluate(env)).collect()
}

/// Evaluate many expressions under one environment
pub fn evaluate_many<E>(exprs: &[Expr], env: &E) -> Vec<Result<f64, ExprError>>
where
    E: Bindings + Sync + ?Sized,
{
    exprs.par_iter().map(|expr| expr.evaluate(env)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Environment;

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let expr = Expr::mul_expr(Expr::variable("x"), Expr::variable("x"));
        let envs: Vec<Environment> = (0..100)
            .map(|i| Environment::new().with("x", i as f64))
            .collect();

        let results = evaluate_batch(&expr, &envs);
        assert_eq!(results.len(), 100);
        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result, Ok((i * i) as f64));
        }
    }

    #[test]
    fn test_evaluate_batch_independent_failures() {
        let expr = Expr::add_expr(Expr::variable("x"), Expr::number(1.0));
        let envs = vec![
            Environment::new().with("x", 1.0),
            Environment::new(),
            Environment::new().with("x", -1.0),
        ];
        let results = evaluate_batch(&expr, &envs);
        assert_eq!(results[0], Ok(2.0));
        assert_eq!(
            results[1],
            Err(ExprError::UndefinedVariable("x".to_string()))
        );
        assert_eq!(results[2], Ok(0.0));
    }

    #[test]
    fn test_evaluate_many() {
        let x = Expr::variable("x");
        let exprs = vec![
            x.clone(),
            Expr::negate(x.clone()),
            Expr::mul_expr(Expr::number(0.0), Expr::variable("unbound")),
            x.derive("x"),
        ];
        let env = Environment::new().with("x", 4.0);
        let results = evaluate_many(&exprs, &env);
        assert_eq!(results, vec![Ok(4.0), Ok(-4.0), Ok(0.0), Ok(1.0)]);
    }
}
