//! Numeric evaluation and exactness analysis
//!
//! An expression is *exact* when its value does not depend on any variable
//! binding. A product with an exact zero operand is exact even if the other
//! operand mentions unbound variables; evaluation short-circuits on it.

use crate::{Expr, ExprError};
use num_traits::Zero;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Source of variable values for evaluation
pub trait Bindings {
    /// Look up the value bound to `name`
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<K, S> Bindings for HashMap<K, f64, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<K> Bindings for BTreeMap<K, f64>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

/// Owned variable environment
///
/// # Example
/// ```
/// use symb_expr::{Environment, Expr};
///
/// let env = Environment::new().with("x", 3.0).with("y", 4.0);
/// let expr = Expr::mul_expr(Expr::variable("x"), Expr::variable("y"));
/// assert_eq!(expr.evaluate(&env).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    values: FxHashMap<String, f64>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, builder style
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Bind a variable, returning the previous value if there was one
    pub fn set(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Value bound to `name`, if any
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Bindings for Environment {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Environment {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Expr {
    /// Evaluate the expression to a number under `env`
    ///
    /// Fails with [`ExprError::UndefinedVariable`] when a variable is reached
    /// that `env` does not bind. A product whose left or right operand is
    /// exactly zero evaluates to zero without visiting the other operand.
    pub fn evaluate<B: Bindings + ?Sized>(&self, env: &B) -> Result<f64, ExprError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => env
                .lookup(name)
                .ok_or_else(|| ExprError::UndefinedVariable(name.clone())),
            Expr::Neg(u) => Ok(-u.evaluate(env)?),
            Expr::Sin(u) => Ok(u.evaluate(env)?.sin()),
            Expr::Cos(u) => Ok(u.evaluate(env)?.cos()),
            Expr::Add(l, r) => Ok(l.evaluate(env)? + r.evaluate(env)?),
            Expr::Mul(l, r) => {
                if is_exact_zero(l) || is_exact_zero(r) {
                    return Ok(0.0);
                }
                Ok(l.evaluate(env)? * r.evaluate(env)?)
            }
        }
    }

    /// Evaluate with no variables bound
    pub fn evaluate_empty(&self) -> Result<f64, ExprError> {
        self.evaluate(&Environment::new())
    }

    /// Check whether the value of this expression is independent of every variable
    pub fn is_exact(&self) -> bool {
        self.constant_value().is_some()
    }

    /// Fold an exact expression to its value
    ///
    /// Returns `Some(v)` iff the expression is exact; `v` is what
    /// [`Expr::evaluate`] returns under any environment.
    pub fn constant_value(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            Expr::Variable(_) => None,
            Expr::Neg(u) => u.constant_value().map(|v| -v),
            Expr::Sin(u) => u.constant_value().map(f64::sin),
            Expr::Cos(u) => u.constant_value().map(f64::cos),
            Expr::Add(l, r) => Some(l.constant_value()? + r.constant_value()?),
            Expr::Mul(l, r) => {
                let left = l.constant_value();
                if left.is_some_and(|v| v.is_zero()) {
                    return Some(0.0);
                }
                let right = r.constant_value();
                if right.is_some_and(|v| v.is_zero()) {
                    return Some(0.0);
                }
                Some(left? * right?)
            }
        }
    }
}

/// Exact and equal to zero (`-0.0` included)
pub(crate) fn is_exact_zero(expr: &Expr) -> bool {
    expr.constant_value().is_some_and(|v| v.is_zero())
}
