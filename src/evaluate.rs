use tracing::{debug, trace};

use crate::types::value::{compare, is_truthy};
use crate::{Condition, Entry, Expr, Field, Lookup, Output, Record, Values};

/// Resolves field conditions against a values context.
///
/// Holds no state between calls: every call brings its own fields and values,
/// so one evaluator can be shared freely.
///
/// ```
/// use fieldwise::{Base, Entry, Evaluator, Values, Variant, key};
///
/// let entries: Vec<Entry> = vec![
///     Base::create("discount_type", "").into(),
///     Base::create("percentage", "")
///         .set_visible(key("discount_type").eq("percentage"))
///         .into(),
/// ];
/// let values = Values::new().set("discount_type", "fixed");
///
/// let out = Evaluator::new().evaluate_fields(&entries, &values);
/// let record = out[1].as_record().unwrap();
/// assert_eq!(record.visible.as_literal(), Some(false));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a batch, position by position.
    ///
    /// Fields become records with `hidden`/`visible` resolved to literals;
    /// any other entry is passed through unchanged. All fields share one
    /// lookup over `values`.
    #[must_use]
    pub fn evaluate_fields(&self, entries: &[Entry], values: &Values) -> Vec<Output> {
        debug!(
            entries = entries.len(),
            values = values.len(),
            "evaluating fields"
        );
        let get = values.lookup();
        entries
            .iter()
            .map(|entry| match entry {
                Entry::Field(field) => Output::Record(self.evaluate_field(field, &get)),
                Entry::Other(value) => Output::Other(value.clone()),
            })
            .collect()
    }

    /// Evaluate a batch made only of fields.
    #[must_use]
    pub fn evaluate_records(&self, fields: &[Field], values: &Values) -> Vec<Record> {
        debug!(
            fields = fields.len(),
            values = values.len(),
            "evaluating fields"
        );
        let get = values.lookup();
        fields
            .iter()
            .map(|field| self.evaluate_field(field, &get))
            .collect()
    }

    /// Serialize one field and resolve its conditions.
    #[must_use]
    pub fn evaluate_field(&self, field: &Field, get: &Lookup<'_>) -> Record {
        let mut record = field.to_record();
        let hidden = Self::resolve_condition(field.hidden(), get);
        let visible = Self::resolve_condition(field.visible(), get);
        trace!(id = field.id(), hidden, visible, "resolved field");
        record.hidden = Condition::Literal(hidden);
        record.visible = Condition::Literal(visible);
        record
    }

    /// Literal conditions pass through; predicates are invoked with `get`.
    #[must_use]
    pub fn resolve_condition(condition: &Condition, get: &Lookup<'_>) -> bool {
        condition.resolve(get)
    }
}

pub(crate) fn eval_expr(expr: &Expr, get: &Lookup<'_>) -> bool {
    match expr {
        Expr::Compare { key, op, value } => compare(get.get(key), *op, value),
        Expr::Truthy(key) => is_truthy(get.get(key)),
        Expr::And(a, b) => eval_expr(a, get) && eval_expr(b, get),
        Expr::Or(a, b) => eval_expr(a, get) || eval_expr(b, get),
        Expr::Not(inner) => !eval_expr(inner, get),
    }
}
