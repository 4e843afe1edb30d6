//! Builder pattern API for differentiation, simplification and evaluation
//!
//! Provides a fluent interface for configuring per-call safety limits.
//!
//! # Example
//! ```
//! use symb_expr::{Diff, tree};
//!
//! let description = tree!["multiply", tree!["variable", "x"], tree!["variable", "x"]];
//! let derivative = Diff::new()
//!     .max_depth(50)
//!     .diff_tree(&description, "x")
//!     .unwrap();
//! assert_eq!(derivative.to_string(), "(x + x)");
//! ```

use crate::evaluator::Bindings;
use crate::{Expr, ExprError, Tree};
use tracing::{debug, warn};

/// Depth and size limits checked before any traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Limits {
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Limits {
    fn check(&self, expr: &Expr) -> Result<(), ExprError> {
        if let Some(limit) = self.max_depth {
            let depth = expr.max_depth();
            if depth > limit {
                warn!(depth, limit, "expression rejected: too deep");
                return Err(ExprError::MaxDepthExceeded { depth, limit });
            }
        }
        if let Some(limit) = self.max_nodes {
            let nodes = expr.node_count();
            if nodes > limit {
                warn!(nodes, limit, "expression rejected: too large");
                return Err(ExprError::MaxNodesExceeded { nodes, limit });
            }
        }
        Ok(())
    }
}

/// Builder for differentiation operations
#[derive(Debug, Clone, Default)]
pub struct Diff {
    limits: Limits,
}

impl Diff {
    /// Create a new differentiation builder with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = Some(depth);
        self
    }

    /// Set maximum tree node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.limits.max_nodes = Some(nodes);
        self
    }

    /// Differentiate an expression with respect to `var`, then simplify
    pub fn differentiate(&self, expr: &Expr, var: &str) -> Result<Expr, ExprError> {
        self.limits.check(expr)?;
        debug!(var, nodes = expr.node_count(), "differentiate");
        Ok(expr.derive(var))
    }

    /// Build an expression from its description and differentiate it
    pub fn diff_tree(&self, tree: &Tree, var: &str) -> Result<Expr, ExprError> {
        let expr = Expr::build_within(tree, self.limits.max_depth)?;
        self.differentiate(&expr, var)
    }
}

/// Builder for simplification operations
#[derive(Debug, Clone, Default)]
pub struct Simplify {
    limits: Limits,
}

impl Simplify {
    /// Create a new simplification builder with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = Some(depth);
        self
    }

    /// Set maximum tree node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.limits.max_nodes = Some(nodes);
        self
    }

    /// Simplify an expression
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, ExprError> {
        self.limits.check(expr)?;
        debug!(nodes = expr.node_count(), "simplify");
        Ok(expr.simplify())
    }

    /// Build an expression from its description and simplify it
    pub fn simplify_tree(&self, tree: &Tree) -> Result<Expr, ExprError> {
        let expr = Expr::build_within(tree, self.limits.max_depth)?;
        self.simplify(&expr)
    }
}

/// Builder for numeric evaluation
#[derive(Debug, Clone, Default)]
pub struct Eval {
    limits: Limits,
}

impl Eval {
    /// Create a new evaluation builder with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = Some(depth);
        self
    }

    /// Set maximum tree node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.limits.max_nodes = Some(nodes);
        self
    }

    /// Evaluate an expression under `env`
    pub fn evaluate<B: Bindings + ?Sized>(&self, expr: &Expr, env: &B) -> Result<f64, ExprError> {
        self.limits.check(expr)?;
        debug!(nodes = expr.node_count(), "evaluate");
        expr.evaluate(env)
    }

    /// Build an expression from its description and evaluate it
    pub fn evaluate_tree<B: Bindings + ?Sized>(
        &self,
        tree: &Tree,
        env: &B,
    ) -> Result<f64, ExprError> {
        let expr = Expr::build_within(tree, self.limits.max_depth)?;
        self.evaluate(&expr, env)
    }
}
