//! Per-document extracted field mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The flat field-to-value mapping an external extractor produces for one
/// source document.
///
/// Field names arrive with free-form casing (upper- or lower-snake-case
/// depending on the extraction mode); values are scalars coerced to strings,
/// or `None` when the extractor found nothing. Insertion order is preserved
/// so resolution scans fields in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields(IndexMap<String, Option<String>>);

impl DocumentFields {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate (name, value) pairs in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Look up the first non-empty value whose name matches one of the given
    /// aliases. Names are compared case-insensitively, exact matches first,
    /// then substring containment in either direction.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        for alias in aliases {
            let alias = alias.to_lowercase();
            for (name, value) in self.iter() {
                let value = match value {
                    Some(v) if !v.trim().is_empty() => v,
                    _ => continue,
                };
                if name.to_lowercase() == alias {
                    return Some(value);
                }
            }
        }
        for alias in aliases {
            let alias = alias.to_lowercase();
            for (name, value) in self.iter() {
                let value = match value {
                    Some(v) if !v.trim().is_empty() => v,
                    _ => continue,
                };
                let name = name.to_lowercase();
                if name.contains(&alias) || alias.contains(&name) {
                    return Some(value);
                }
            }
        }
        None
    }

    /// Build a mapping from an arbitrary JSON object, coercing scalar values
    /// to strings. Nulls become `None`; nested objects and arrays are
    /// skipped (the extractor contract is a flat mapping).
    pub fn from_json_value(value: &Value) -> Self {
        let mut fields = Self::new();
        if let Value::Object(map) = value {
            for (name, value) in map {
                match value {
                    Value::Null => fields.insert(name, None),
                    Value::String(s) => fields.insert(name, Some(s.clone())),
                    Value::Number(n) => fields.insert(name, Some(n.to_string())),
                    Value::Bool(b) => fields.insert(name, Some(b.to_string())),
                    Value::Object(_) | Value::Array(_) => {}
                }
            }
        }
        fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DocumentFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}
