use std::fmt::Display;

use indexmap::IndexMap;

use super::schema::Field;
use super::value::Value;

/// A mapping of field names to values.
///
/// A row only means something relative to a table's fields. It may hold
/// fewer or more names than the schema declares, an absent name is a missing
/// value and is not the same thing as [`Value::Null`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row {
            values: IndexMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Row {
        //! Builder style [`Row::set`].

        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        //! Store a value under `name`, returning what was there before.

        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub(crate) fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub(crate) fn display_with<'a>(&'a self, fields: &'a [Field]) -> RowDisplay<'a> {
        RowDisplay { row: self, fields }
    }
}

impl From<IndexMap<String, Value>> for Row {
    fn from(values: IndexMap<String, Value>) -> Self {
        Row { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", row.join(" | "))
    }
}

/// Renders a row in the column order of a schema, `-` marking a missing value.
pub(crate) struct RowDisplay<'a> {
    row: &'a Row,
    fields: &'a [Field],
}

impl Display for RowDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self
            .fields
            .iter()
            .map(|field| match self.row.get(&field.name) {
                Some(value) => value.to_string(),
                None => "-".to_string(),
            })
            .collect();
        write!(f, "{}", row.join(" | "))
    }
}
