use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw scalar held in one column of a project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One applicant project row keyed by column header.
///
/// The set of columns is data-driven, so lookups take arbitrary names and a
/// column the row does not carry reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRecord {
    fields: HashMap<String, FieldValue>,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
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
}

impl FromIterator<(String, FieldValue)> for ProjectRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_columns_read_as_absent() {
        let record = ProjectRecord::new().with_field("OSO: Total Stars", 12.0);
        assert_eq!(record.get("OSO: Total Stars"), Some(&FieldValue::Number(12.0)));
        assert!(record.get("OSO: Total Forks").is_none());
        assert!(!record.contains("OSO: Total Forks"));
    }

    #[test]
    fn field_values_serialize_as_bare_scalars() {
        let json = serde_json::to_value(vec![
            FieldValue::Number(3.5),
            FieldValue::Boolean(true),
            FieldValue::from("optimism"),
        ])
        .expect("serializes");
        assert_eq!(json, serde_json::json!([3.5, true, "optimism"]));
    }
}
