use serde::{Serialize, Serializer};
use serde_json::Value;

use super::condition::Condition;
use super::record::Record;
use super::values::{Lookup, Values};
use super::variant::{snake_case, title_case, Variant};

/// Definition of a single configurable setting.
///
/// Built through [`Field::create`] (or [`Variant::create`]) and then refined
/// with chained setters, each of which moves the same field through the chain.
///
/// ```
/// use fieldwise::{Base, Values, Variant};
///
/// let field = Base::create("discount", "")
///     .set_default(10)
///     .set_info("Applied at checkout")
///     .hidden_when(|get| get.str("type") != Some("percentage"));
///
/// let record = field.evaluate_with_values(&Values::new().set("type", "percentage"));
/// assert_eq!(record.hidden.as_literal(), Some(false));
/// ```
///
/// Only the setters defined here exist; a misspelled attribute does not compile.
///
/// ```compile_fail
/// use fieldwise::{Base, Variant};
///
/// let field = Base::create("discount", "").set_colour("red");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: String,
    label: String,
    field_type: String,
    default: Value,
    info: String,
    component: &'static str,
    live: bool,
    hidden: Condition,
    visible: Condition,
}

impl Field {
    /// Create a fully initialized field of variant `V`.
    ///
    /// An empty `label` is derived from `id`: underscores become spaces and
    /// each word is capitalized. `type` is `V::TYPE` when the variant fixes
    /// one, otherwise the snake-cased `V::NAME`. The default is `null`, the
    /// info text empty, the field not live, not hidden and visible.
    ///
    /// `id` is expected to be non-empty; an empty one is accepted but logged.
    #[must_use]
    pub fn create<V: Variant>(id: &str, label: &str) -> Self {
        if id.is_empty() {
            tracing::warn!(variant = V::NAME, "creating field with an empty id");
        }

        let label = if label.is_empty() {
            title_case(&id.replace('_', " "))
        } else {
            label.to_owned()
        };

        Self {
            id: id.to_owned(),
            label,
            field_type: V::TYPE.map_or_else(|| snake_case(V::NAME), str::to_owned),
            default: Value::Null,
            info: String::new(),
            component: V::COMPONENT,
            live: false,
            hidden: Condition::Literal(false),
            visible: Condition::Literal(true),
        }
    }

    #[must_use]
    pub fn set_id(mut self, id: &str) -> Self {
        id.clone_into(&mut self.id);
        self
    }

    #[must_use]
    pub fn set_label(mut self, label: &str) -> Self {
        label.clone_into(&mut self.label);
        self
    }

    #[must_use]
    pub fn set_type(mut self, field_type: &str) -> Self {
        field_type.clone_into(&mut self.field_type);
        self
    }

    #[must_use]
    pub fn set_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    #[must_use]
    pub fn set_info(mut self, info: &str) -> Self {
        info.clone_into(&mut self.info);
        self
    }

    /// Enable or disable client-side live updates.
    #[must_use]
    pub fn set_live(mut self, state: bool) -> Self {
        self.live = state;
        self
    }

    /// Turn on live updates; same as `set_live(true)`.
    #[must_use]
    pub fn live(self) -> Self {
        self.set_live(true)
    }

    /// Hide unconditionally; same as `set_hidden(true)`.
    #[must_use]
    pub fn hide(self) -> Self {
        self.set_hidden(true)
    }

    /// Show unconditionally; same as `set_visible(true)`.
    #[must_use]
    pub fn show(self) -> Self {
        self.set_visible(true)
    }

    /// Set the hidden condition: a `bool`, an [`Expr`](crate::Expr) or a
    /// [`Condition`].
    #[must_use]
    pub fn set_hidden(mut self, condition: impl Into<Condition>) -> Self {
        self.hidden = condition.into();
        self
    }

    /// Set the visible condition: a `bool`, an [`Expr`](crate::Expr) or a
    /// [`Condition`].
    #[must_use]
    pub fn set_visible(mut self, condition: impl Into<Condition>) -> Self {
        self.visible = condition.into();
        self
    }

    /// Hide the field when the predicate holds for the submitted values.
    #[must_use]
    pub fn hidden_when(self, f: impl Fn(&Lookup<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.set_hidden(Condition::predicate(f))
    }

    /// Show the field when the predicate holds for the submitted values.
    #[must_use]
    pub fn visible_when(self, f: impl Fn(&Lookup<'_>) -> bool + Send + Sync + 'static) -> Self {
        self.set_visible(Condition::predicate(f))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// The variant's rendering component.
    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[must_use]
    pub fn hidden(&self) -> &Condition {
        &self.hidden
    }

    #[must_use]
    pub fn visible(&self) -> &Condition {
        &self.visible
    }

    /// Read an attribute by its record key.
    ///
    /// Unknown names read as `null`. So do `hidden` and `visible` unless they
    /// are literals, since other conditions need a values context.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Value {
        match name {
            "id" => Value::from(self.id.as_str()),
            "label" => Value::from(self.label.as_str()),
            "type" => Value::from(self.field_type.as_str()),
            "default" => self.default.clone(),
            "info" => Value::from(self.info.as_str()),
            "component" => Value::from(self.component),
            "live" => Value::Bool(self.live),
            "hidden" => self.hidden.as_literal().map_or(Value::Null, Value::Bool),
            "visible" => self.visible.as_literal().map_or(Value::Null, Value::Bool),
            _ => Value::Null,
        }
    }

    /// Serialize to a record without resolving conditions.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record {
            id: self.id.clone(),
            label: self.label.clone(),
            field_type: self.field_type.clone(),
            default: self.default.clone(),
            info: self.info.clone(),
            component: self.component,
            live: self.live,
            hidden: self.hidden.clone(),
            visible: self.visible.clone(),
        }
    }

    /// Resolve this field alone against `values`.
    ///
    /// Same result as evaluating a one-element batch with
    /// [`Evaluator::evaluate_fields`](crate::Evaluator::evaluate_fields).
    #[must_use]
    pub fn evaluate_with_values(&self, values: &Values) -> Record {
        crate::Evaluator::new().evaluate_field(self, &values.lookup())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}
