use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::expr::Expr;
use super::values::Lookup;
use crate::parse::ParseError;

/// A user-supplied hidden/visible predicate.
pub type Predicate = Arc<dyn Fn(&Lookup<'_>) -> bool + Send + Sync>;

/// A hidden or visible condition: a literal, a closure, or a declarative
/// expression. Resolved only against a values context, never eagerly.
#[derive(Clone)]
pub enum Condition {
    Literal(bool),
    Predicate(Predicate),
    Expr(Expr),
}

impl Condition {
    /// Wrap a closure as a predicate condition.
    pub fn predicate(f: impl Fn(&Lookup<'_>) -> bool + Send + Sync + 'static) -> Self {
        Condition::Predicate(Arc::new(f))
    }

    /// Resolve this condition against a lookup.
    ///
    /// Literals pass through and expressions are evaluated. Predicates are
    /// invoked, and a panic inside one propagates to the caller.
    #[must_use]
    pub fn resolve(&self, get: &Lookup<'_>) -> bool {
        match self {
            Condition::Literal(b) => *b,
            Condition::Predicate(f) => f(get),
            Condition::Expr(expr) => crate::evaluate::eval_expr(expr, get),
        }
    }

    /// The literal value, if this condition is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<bool> {
        match self {
            Condition::Literal(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Condition {
    fn from(b: bool) -> Self {
        Condition::Literal(b)
    }
}

impl From<Expr> for Condition {
    fn from(expr: Expr) -> Self {
        Condition::Expr(expr)
    }
}

impl From<Predicate> for Condition {
    fn from(f: Predicate) -> Self {
        Condition::Predicate(f)
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    /// Parse a condition from DSL text. Bare `true`/`false` become literals;
    /// a key with one of those names is written in backticks.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(Condition::Literal(true)),
            "false" => Ok(Condition::Literal(false)),
            _ => crate::parse::parse(s).map(Condition::Expr),
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Condition::Literal(a), Condition::Literal(b)) => a == b,
            (Condition::Predicate(a), Condition::Predicate(b)) => Arc::ptr_eq(a, b),
            (Condition::Expr(a), Condition::Expr(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Literal(b) => f.debug_tuple("Literal").field(b).finish(),
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
            Condition::Expr(expr) => f.debug_tuple("Expr").field(expr).finish(),
        }
    }
}

/// Unresolved predicates have no data form and serialize as `null`;
/// expressions serialize as their DSL text.
impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Condition::Literal(b) => serializer.serialize_bool(*b),
            Condition::Predicate(_) => serializer.serialize_none(),
            Condition::Expr(expr) => serializer.collect_str(expr),
        }
    }
}
