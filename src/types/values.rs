use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value::is_truthy;

static NULL: Value = Value::Null;

/// The values context: submitted or known field values keyed by field id.
///
/// Read-only during evaluation. Deserializes from a JSON object, so form
/// payloads can be handed over directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    data: Map<String, Value>,
}

impl Values {
    /// Create an empty values context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value for a key.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Insert a value for a key (mutable reference version).
    pub fn insert(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_owned(), value);
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build a context from a JSON value.
    ///
    /// Returns `None` unless `value` is an object.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }

    /// The lookup handed to condition predicates.
    #[must_use]
    pub fn lookup(&self) -> Lookup<'_> {
        Lookup { values: self }
    }
}

impl From<Map<String, Value>> for Values {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

impl TryFrom<Value> for Values {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read-only view over a [`Values`] context, passed to predicates.
///
/// Missing keys read as `null`, never as an error.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    values: &'a Values,
}

impl<'a> Lookup<'a> {
    /// The value stored under `key`, or `null` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &'a Value {
        self.values.get(key).unwrap_or(&NULL)
    }

    /// The value under `key` if it is a string.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).as_str()
    }

    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        is_truthy(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_and_get() {
        let values = Values::new().set("type", "percentage");
        assert_eq!(values.get("type"), Some(&json!("percentage")));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let values = Values::new().set("a", 1);
        assert_eq!(values.get("b"), None);
    }

    #[test]
    fn overwrite_value() {
        let values = Values::new().set("score", 10).set("score", 20);
        assert_eq!(values.get("score"), Some(&json!(20)));
    }

    #[test]
    fn insert_mutable_ref() {
        let mut values = Values::new();
        values.insert("key", Value::Bool(true));
        assert_eq!(values.get("key"), Some(&Value::Bool(true)));
    }

    #[test]
    fn lookup_missing_is_null() {
        let values = Values::new();
        let get = values.lookup();
        assert_eq!(get.get("anything"), &Value::Null);
        assert_eq!(get.str("anything"), None);
        assert!(!get.is_truthy("anything"));
    }

    #[test]
    fn lookup_str_only_for_strings() {
        let values = Values::new().set("n", 1).set("s", "1");
        let get = values.lookup();
        assert_eq!(get.str("n"), None);
        assert_eq!(get.str("s"), Some("1"));
    }

    #[test]
    fn from_json_object() {
        let values = Values::from_json(json!({"enabled": "1", "count": 3})).unwrap();
        assert_eq!(values.get("enabled"), Some(&json!("1")));
        assert_eq!(values.get("count"), Some(&json!(3)));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(Values::from_json(json!([1, 2])).is_none());
        assert_eq!(Values::try_from(json!("x")), Err(json!("x")));
    }

    #[test]
    fn deserialize_from_form_payload() {
        let values: Values = serde_json::from_str(r#"{"type":"fixed","amount":5}"#).unwrap();
        assert_eq!(values.lookup().str("type"), Some("fixed"));
    }

    #[test]
    fn collect_from_pairs() {
        let values: Values = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(values.get("b"), Some(&json!(2)));
    }
}
