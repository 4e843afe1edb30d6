//! Symbolic Expression Library
//!
//! Expression trees over numbers, variables, negation, sine, cosine,
//! addition and multiplication, with numeric evaluation, symbolic
//! differentiation and algebraic simplification.
//!
//! # Features
//! - Build expressions from nested-list descriptions (`tree!` or JSON)
//! - Evaluate under any variable environment (`HashMap`, `BTreeMap`, [`Environment`])
//! - Exactness analysis: subtrees that do not depend on variables fold to constants
//! - Derivatives with respect to a named variable, always simplified
//! - **Builder pattern API** with depth and size limits
//! - Optional parallel batch evaluation (`parallel` feature)
//!
//! # Usage Examples
//!
//! ## Description-based API
//! ```
//! use symb_expr::{diff, tree};
//!
//! let description = tree!["multiply", tree!["variable", "x"], tree!["sine", tree!["variable", "x"]]];
//! let result = diff(&description, "x").unwrap();
//! assert_eq!(result, "(sin(x) + x * cos(x))");
//! ```
//!
//! ## Expression API
//! ```
//! use symb_expr::{Environment, Expr};
//!
//! let x = Expr::variable("x");
//! let expr = Expr::add_expr(Expr::number(0.0), Expr::mul_expr(Expr::number(1.0), x.clone()));
//! assert_eq!(expr.simplify(), x);
//!
//! let env = Environment::new().with("x", 2.0);
//! assert_eq!(expr.evaluate(&env).unwrap(), 2.0);
//! ```

#[macro_use]
mod tree;

mod ast;
mod builder;
mod differentiation;
mod display;
mod error;
mod evaluator;
mod simplification;

#[cfg(feature = "parallel")]
pub mod parallel;


// Re-export key types for easier usage
pub use ast::Expr;
pub use builder::{Diff, Eval, Simplify};
pub use error::ExprError;
pub use evaluator::{Bindings, Environment};
pub use tree::Tree;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum tree node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Main API function for symbolic differentiation
///
/// # Arguments
/// * `tree` - Description of the expression to differentiate
/// * `var` - Variable to differentiate with respect to (e.g., "x")
///
/// # Returns
/// The simplified derivative printed in canonical form, or an error if the
/// description is invalid or exceeds the default limits
///
/// # Note
/// For other limits use the `Diff` builder:
/// ```ignore
/// Diff::new().max_depth(500).diff_tree(&tree, "x")
/// ```
pub fn diff(tree: &Tree, var: &str) -> Result<String, ExprError> {
    Diff::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .diff_tree(tree, var)
        .map(|expr| expr.to_string())
}

/// Simplify an expression description
///
/// # Example
/// ```
/// use symb_expr::{simplify, tree};
///
/// let result = simplify(&tree!["sine", tree!["number", 0]]).unwrap();
/// assert_eq!(result, "0");
/// ```
pub fn simplify(tree: &Tree) -> Result<String, ExprError> {
    Simplify::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .simplify_tree(tree)
        .map(|expr| expr.to_string())
}

/// Evaluate an expression description under `env`
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use symb_expr::{evaluate, tree};
///
/// let env: HashMap<&str, f64> = [("x", 4.0)].into_iter().collect();
/// let value = evaluate(&tree!["add", tree!["variable", "x"], tree!["number", 1]], &env).unwrap();
/// assert_eq!(value, 5.0);
/// ```
pub fn evaluate<B: Bindings + ?Sized>(tree: &Tree, env: &B) -> Result<f64, ExprError> {
    Eval::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .evaluate_tree(tree, env)
}
