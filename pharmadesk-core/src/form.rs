use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single raw value as collected by an input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl FormValue {
    /// `true` for text whose trimmed form is empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, FormValue::Text(s) if s.trim().is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable name of the value's shape, used in type mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormValue::Bool(_) => "boolean",
            FormValue::Integer(_) => "integer",
            FormValue::Text(_) => "text",
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Integer(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

/// Flat form state: field name to raw value.
///
/// ```ignore
/// let form = FormValues::new()
///     .with("name", "Acme")
///     .with("email", "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    fields: BTreeMap<String, FormValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Insert only when `value` is present.
    pub fn insert_opt<V: Into<FormValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(v) = value {
            self.insert(name, v);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FormValue::as_text)
    }

    pub fn remove(&mut self, name: &str) -> Option<FormValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormValues::new();
        form.extend(iter);
        form
    }
}

impl<K: Into<String>, V: Into<FormValue>> Extend<(K, V)> for FormValues {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(FormValue::from("   ").is_blank());
        assert!(FormValue::from("").is_blank());
        assert!(!FormValue::from("a").is_blank());
        assert!(!FormValue::Integer(0).is_blank());
    }

    #[test]
    fn untagged_json_shapes() {
        let form: FormValues =
            serde_json::from_str(r#"{"name":"Acme","role_id":3,"is_active":true}"#).unwrap();
        assert_eq!(form.text("name"), Some("Acme"));
        assert_eq!(form.get("role_id"), Some(&FormValue::Integer(3)));
        assert_eq!(form.get("is_active"), Some(&FormValue::Bool(true)));
    }

    #[test]
    fn insert_opt_skips_none() {
        let mut form = FormValues::new();
        form.insert_opt("contact", None::<String>);
        form.insert_opt("address", Some("Calle 1"));
        assert!(!form.contains("contact"));
        assert_eq!(form.text("address"), Some("Calle 1"));
    }
}
