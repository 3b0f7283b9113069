use serde::Serialize;
use serde_json::Value;

use super::condition::Condition;
use super::field::Field;
use crate::FieldwiseError;

/// Plain serialized form of a [`Field`], ready for transport.
///
/// Keys serialize in the fixed order of [`Record::KEYS`]. `hidden` and
/// `visible` are literals once the record has gone through the
/// [`Evaluator`](crate::Evaluator); a raw [`Field::to_record`] passes
/// conditions through unresolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub default: Value,
    pub info: String,
    pub component: &'static str,
    pub live: bool,
    pub hidden: Condition,
    pub visible: Condition,
}

impl Record {
    pub const KEYS: [&'static str; 9] = [
        "id",
        "label",
        "type",
        "default",
        "info",
        "component",
        "live",
        "hidden",
        "visible",
    ];

    /// Whether both conditions are concrete booleans.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.hidden.as_literal().is_some() && self.visible.as_literal().is_some()
    }

    /// # Errors
    ///
    /// Returns [`FieldwiseError::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, FieldwiseError> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    ///
    /// Returns [`FieldwiseError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, FieldwiseError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One element of a batch handed to the evaluator: a field, or any other
/// value that is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Field(Field),
    Other(Value),
}

impl From<Field> for Entry {
    fn from(field: Field) -> Self {
        Entry::Field(field)
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::Other(value)
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Other(Value::from(value))
    }
}

/// One element of an evaluated batch, at the same position as its [`Entry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Record(Record),
    Other(Value),
}

impl Output {
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Output::Record(record) => Some(record),
            Output::Other(_) => None,
        }
    }

    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Output::Record(record) => Some(record),
            Output::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Base, Variant};

    #[test]
    fn keys_serialize_in_order() {
        let record = Base::create("shipping_fee", "").to_record();
        let value = record.to_value().unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, Record::KEYS);
    }

    #[test]
    fn to_json_text() {
        let record = Base::create("shipping_fee", "").to_record();
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"id":"shipping_fee","label":"Shipping Fee","type":"base","default":null,"info":"","component":"base-setting","live":false,"hidden":false,"visible":true}"#
        );
    }

    #[test]
    fn unresolved_predicate_is_not_resolved() {
        let record = Base::create("a", "").hidden_when(|_| true).to_record();
        assert!(!record.is_resolved());
        assert_eq!(record.to_value().unwrap()["hidden"], json!(null));
    }

    #[test]
    fn entry_from_conversions() {
        assert_eq!(Entry::from("x"), Entry::Other(json!("x")));
        assert_eq!(Entry::from(json!(3)), Entry::Other(json!(3)));
        assert!(matches!(Entry::from(Base::create("a", "")), Entry::Field(_)));
    }

    #[test]
    fn output_accessors() {
        let record = Base::create("a", "").to_record();
        let out = Output::Record(record.clone());
        assert_eq!(out.as_record(), Some(&record));
        assert_eq!(out.into_record(), Some(record));
        assert_eq!(Output::Other(json!(1)).as_record(), None);
    }

    #[test]
    fn output_serializes_untagged() {
        let batch = vec![
            Output::Other(json!("divider")),
            Output::Record(Base::create("a", "").to_record()),
        ];
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value[0], json!("divider"));
        assert_eq!(value[1]["id"], json!("a"));
    }
}
