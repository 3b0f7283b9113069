use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde_json::Value;

use crate::parse::ParseError;

/// Words the condition grammar reserves, matched case-insensitively.
const RESERVED: [&str; 6] = ["and", "or", "not", "true", "false", "null"];

/// Comparison operators supported in condition expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Declarative condition over the values context.
///
/// Unlike a closure predicate, an expression can be displayed, parsed back
/// from text and serialized into an unresolved record.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Compare {
        key: String,
        op: CompareOp,
        value: Value,
    },
    /// True when the value under the key is truthy.
    Truthy(String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

impl FromStr for CompareOp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Neq),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            other => Err(ParseError::new(format!("unknown operator '{other}'"))),
        }
    }
}

pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

pub(crate) fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(word))
}

fn is_bare_key(key: &str) -> bool {
    key.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(is_key_char)
        && !is_reserved(key)
}

/// A form key as condition text: bare when the grammar reads it back as a
/// key, otherwise in backticks with `` ` `` and `\` escaped.
struct KeyText<'a>(&'a str);

impl fmt::Display for KeyText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_bare_key(self.0) {
            return f.write_str(self.0);
        }
        f.write_str("`")?;
        for c in self.0.chars() {
            if matches!(c, '`' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("`")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Values print as JSON, which is what the grammar reads back.
            Expr::Compare { key, op, value } => write!(f, "({} {op} {value})", KeyText(key)),
            Expr::Truthy(key) => write!(f, "{}", KeyText(key)),
            Expr::And(a, b) => write!(f, "({a} AND {b})"),
            Expr::Or(a, b) => write!(f, "({a} OR {b})"),
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

impl Expr {
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

/// Intermediate builder for key comparison expressions.
/// Created by [`key()`]; requires a comparison method to produce an [`Expr`].
#[derive(Debug, Clone)]
pub struct KeyExpr {
    key: String,
}

impl KeyExpr {
    fn compare(self, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            key: self.key,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lte, value)
    }

    /// True when the value under the key is truthy.
    #[must_use]
    pub fn truthy(self) -> Expr {
        Expr::Truthy(self.key)
    }

    /// True when the key is absent or holds `null`.
    #[must_use]
    pub fn is_null(self) -> Expr {
        self.compare(CompareOp::Eq, Value::Null)
    }
}

#[must_use]
pub fn key(name: &str) -> KeyExpr {
    KeyExpr {
        key: name.to_owned(),
    }
}
