//! Response option sets.
//!
//! An option set maps the raw value stored in the respondent data (for
//! example `"1"`) to the label shown to the respondent (for example `"Yes"`).
//! Items may carry their own set; groups may carry a default set shared by
//! all of their items.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from option value to option label, in file order.
///
/// Inserting a value that is already present replaces its label and keeps
/// its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: Vec<(String, String)>,
}

impl OptionSet {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
        let value = value.into();
        let label = label.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == value) {
            Some((_, slot)) => *slot = label,
            None => self.values.push((value, label)),
        }
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(existing, _)| existing == value)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(value, label)| (value.as_str(), label.as_str()))
    }

    /// Option values in file order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(value, _)| value.as_str())
    }

    /// Copy into a map keyed by option value, for order-independent
    /// comparison.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values.iter().cloned().collect()
    }

    /// Resolve a raw data value to its label.
    ///
    /// Tries the exact value, then a case-insensitive match, then a
    /// numeric match so that `"2.0"` in an exported data file still finds
    /// option `"2"`.
    pub fn lookup_text(&self, raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(label) = self.get(trimmed) {
            return Some(label);
        }
        if let Some((_, label)) = self
            .values
            .iter()
            .find(|(value, _)| value.eq_ignore_ascii_case(trimmed))
        {
            return Some(label.as_str());
        }
        let key = normalize_numeric_key(trimmed)?;
        self.values
            .iter()
            .find(|(value, _)| normalize_numeric_key(value).as_deref() == Some(key.as_str()))
            .map(|(_, label)| label.as_str())
    }
}

impl From<BTreeMap<String, String>> for OptionSet {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OptionSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (value, label) in iter {
            options.insert(value, label);
        }
        options
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (value, label) in &self.values {
            map.serialize_entry(value, label)?;
        }
        map.end()
    }
}

/// Option labels are usually strings, but exported codebooks sometimes
/// store numeric scales as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawLabel {
    fn into_text(self) -> String {
        match self {
            RawLabel::Text(text) => text,
            RawLabel::Integer(value) => value.to_string(),
            RawLabel::Float(value) => format!("{value}"),
            RawLabel::Bool(value) => value.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionSetVisitor;

        impl<'de> Visitor<'de> for OptionSetVisitor {
            type Value = OptionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping option values to labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut options = OptionSet::new();
                while let Some((value, label)) = map.next_entry::<String, RawLabel>()? {
                    options.insert(value, label.into_text());
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionSetVisitor)
    }
}

fn normalize_numeric_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    let mut text = format!("{parsed}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text.is_empty() { None } else { Some(text) }
}
