//! Tree descriptions and the expression builder
//!
//! A description is a nested list: `[tag, payload]` for leaves and unary
//! operations, `[tag, left, right]` for binary operations.
//!
//! ```
//! use symb_expr::{Expr, tree};
//!
//! let description = tree!["add", tree!["number", 0], tree!["variable", "x"]];
//! let expr = Expr::build(&description).unwrap();
//! assert_eq!(expr.simplify(), Expr::variable("x"));
//! ```

use crate::{Expr, ExprError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Nested-list description of an expression
///
/// Deserializes from plain JSON: numbers become [`Tree::Number`], strings
/// become [`Tree::Atom`] and arrays become [`Tree::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    Number(f64),
    /// Operation tag or variable name
    Atom(String),
    List(Vec<Tree>),
}

/// Build a [`Tree::List`] from items convertible into [`Tree`]
#[macro_export]
macro_rules! tree {
    [$($item:expr),* $(,)?] => {
        $crate::Tree::List(vec![$($crate::Tree::from($item)),*])
    };
}

impl Tree {
    /// Parse a JSON description such as `["multiply", ["number", 2], ["variable", "x"]]`
    pub fn from_json(json: &str) -> Result<Tree, ExprError> {
        serde_json::from_str(json).map_err(|e| ExprError::malformed(e.to_string()))
    }

    fn kind(&self) -> &'static str {
        match self {
            Tree::Number(_) => "number",
            Tree::Atom(_) => "atom",
            Tree::List(_) => "list",
        }
    }
}

impl From<f64> for Tree {
    fn from(n: f64) -> Self {
        Tree::Number(n)
    }
}

impl From<i32> for Tree {
    fn from(n: i32) -> Self {
        Tree::Number(n as f64)
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::Atom(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::Atom(s)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Tree::List(items)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Number(n) => write!(f, "{}", n),
            Tree::Atom(s) => write!(f, ":{}", s),
            Tree::List(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl Expr {
    /// Build an expression from its tree description
    ///
    /// Descriptions with more than two elements are binary (`add`/`+`,
    /// `multiply`/`*`); shorter ones are unary (`negate`/`-`, `sine`/`sin`,
    /// `cosine`/`cos`) or leaves (`variable`, `number`).
    pub fn build(tree: &Tree) -> Result<Expr, ExprError> {
        build_node(tree, 1, None)
    }

    /// Build an expression, refusing descriptions nested deeper than `max_depth`
    ///
    /// Stops at the first node past the limit, so arbitrarily deep input never
    /// recurses further than `max_depth` levels.
    pub(crate) fn build_within(tree: &Tree, max_depth: Option<usize>) -> Result<Expr, ExprError> {
        build_node(tree, 1, max_depth)
    }
}

/// `depth` is the depth of the node being built, the root is 1
fn build_node(tree: &Tree, depth: usize, limit: Option<usize>) -> Result<Expr, ExprError> {
    if let Some(limit) = limit
        && depth > limit
    {
        warn!(depth, limit, "description rejected: too deep");
        return Err(ExprError::MaxDepthExceeded { depth, limit });
    }

    let items = match tree {
        Tree::List(items) => items,
        other => {
            return Err(ExprError::malformed(format!(
                "expected a list, got {} {}",
                other.kind(),
                other
            )));
        }
    };

    let (tag, operands) = match items.split_first() {
        Some((Tree::Atom(tag), operands)) => (tag.as_str(), operands),
        Some((other, _)) => {
            return Err(ExprError::malformed(format!(
                "operation tag must be an atom, got {} {}",
                other.kind(),
                other
            )));
        }
        None => return Err(ExprError::malformed("empty description")),
    };

    match operands {
        [left, right] => build_binary(tag, left, right, depth, limit),
        [payload] => build_unary(tag, payload, depth, limit),
        [] => Err(ExprError::malformed(format!("operation '{}' has no operand", tag))),
        _ => Err(ExprError::malformed(format!(
            "operation '{}' has {} operands, at most 2 are supported",
            tag,
            operands.len()
        ))),
    }
}

fn build_unary(
    tag: &str,
    payload: &Tree,
    depth: usize,
    limit: Option<usize>,
) -> Result<Expr, ExprError> {
    let operand = || build_node(payload, depth + 1, limit);
    match tag {
        "negate" | "-" => Ok(Expr::negate(operand()?)),
        "sine" | "sin" => Ok(Expr::sin(operand()?)),
        "cosine" | "cos" => Ok(Expr::cos(operand()?)),
        "variable" => match payload {
            Tree::Atom(name) => Ok(Expr::Variable(name.clone())),
            other => Err(ExprError::malformed(format!(
                "variable name must be an atom, got {} {}",
                other.kind(),
                other
            ))),
        },
        "number" => match payload {
            Tree::Number(n) => Ok(Expr::Number(*n)),
            other => Err(ExprError::malformed(format!(
                "number payload must be numeric, got {} {}",
                other.kind(),
                other
            ))),
        },
        _ => Err(ExprError::UnknownOperation(tag.to_string())),
    }
}

fn build_binary(
    tag: &str,
    left: &Tree,
    right: &Tree,
    depth: usize,
    limit: Option<usize>,
) -> Result<Expr, ExprError> {
    let operand = |tree: &Tree| build_node(tree, depth + 1, limit);
    match tag {
        "add" | "+" => Ok(Expr::add_expr(operand(left)?, operand(right)?)),
        "multiply" | "*" => Ok(Expr::mul_expr(operand(left)?, operand(right)?)),
        _ => Err(ExprError::UnknownOperation(tag.to_string())),
    }
}

impl TryFrom<&Tree> for Expr {
    type Error = ExprError;

    fn try_from(tree: &Tree) -> Result<Self, Self::Error> {
        Expr::build(tree)
    }
}
