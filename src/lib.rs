//! Fluent builder for declarative settings fields.
//!
//! A [`Field`] describes one configurable option of an admin settings panel:
//! id, label, type, default, help text, and `hidden`/`visible` conditions that
//! may depend on other submitted values. The [`Evaluator`] resolves those
//! conditions against a [`Values`] context and produces plain [`Record`]s
//! ready for a front-end renderer.

mod error;
mod evaluate;
pub mod parse;
mod types;

pub use error::FieldwiseError;
pub use evaluate::Evaluator;
pub use parse::ParseError;
pub use types::{
    compare, is_truthy, key, Base, CompareOp, Condition, Entry, Expr, Field, KeyExpr, Lookup,
    Output, Predicate, Record, Values, Variant, DEFAULT_COMPONENT,
};
