//! Abstract Syntax Tree for symbolic expressions

use std::collections::BTreeSet;
use std::sync::Arc;

/// A symbolic expression node.
///
/// The set of variants is closed: every traversal (evaluation, exactness,
/// differentiation, simplification, display) matches on all of them.
/// Children live behind `Arc` so derivative trees can reuse untouched
/// operands by reference. Nodes are never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant number (e.g. 5, 2.5)
    Number(f64),

    /// Named variable, resolved through the evaluation environment
    Variable(String),

    // Unary operations
    /// Negation: -u
    Neg(Arc<Expr>),

    /// Sine (radians)
    Sin(Arc<Expr>),

    /// Cosine (radians)
    Cos(Arc<Expr>),

    // Binary operations
    /// Addition
    Add(Arc<Expr>, Arc<Expr>),

    /// Multiplication
    Mul(Arc<Expr>, Arc<Expr>),
}

impl Expr {
    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// Create a variable expression
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// Create a negation expression
    pub fn negate(operand: Expr) -> Self {
        Expr::Neg(Arc::new(operand))
    }

    /// Create a sine expression
    pub fn sin(operand: Expr) -> Self {
        Expr::Sin(Arc::new(operand))
    }

    /// Create a cosine expression
    pub fn cos(operand: Expr) -> Self {
        Expr::Cos(Arc::new(operand))
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::Add(Arc::new(left), Arc::new(right))
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::Mul(Arc::new(left), Arc::new(right))
    }

    /// Return the payload if this is a `Number` node
    ///
    /// Only looks at the node itself. Use [`Expr::constant_value`] to fold
    /// whole exact subtrees.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    // Analysis methods

    /// Count the total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Neg(u) | Expr::Sin(u) | Expr::Cos(u) => 1 + u.node_count(),
            Expr::Add(l, r) | Expr::Mul(l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Get the maximum nesting depth of the tree (a leaf has depth 1)
    pub fn max_depth(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Neg(u) | Expr::Sin(u) | Expr::Cos(u) => 1 + u.max_depth(),
            Expr::Add(l, r) | Expr::Mul(l, r) => 1 + l.max_depth().max(r.max_depth()),
        }
    }

    /// Check if the expression contains a specific variable
    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(name) => name == var,
            Expr::Neg(u) | Expr::Sin(u) | Expr::Cos(u) => u.contains_var(var),
            Expr::Add(l, r) | Expr::Mul(l, r) => l.contains_var(var) || r.contains_var(var),
        }
    }

    /// Collect all variable names in the expression, sorted
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                if !vars.contains(name) {
                    vars.insert(name.clone());
                }
            }
            Expr::Neg(u) | Expr::Sin(u) | Expr::Cos(u) => u.collect_variables(vars),
            Expr::Add(l, r) | Expr::Mul(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Number(n)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }
}
