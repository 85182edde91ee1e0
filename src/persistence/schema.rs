use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{Error, SchemaMismatch};

/// The closed set of column types a [`Field`] may declare.
///
/// [`DataType::Date`] and [`DataType::DateInterval`] compare by calendar day,
/// everything else compares by plain value equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    #[serde(rename = "interval", alias = "dateinterval")]
    DateInterval,
}

impl DataType {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateInterval => "interval",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" | "text" | "txt" => Ok(DataType::String),
            "integer" | "int" | "num" => Ok(DataType::Integer),
            "float" | "flt" => Ok(DataType::Float),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "interval" | "dateinterval" => Ok(DataType::DateInterval),
            _ => Err(Error::InvalidValue {
                value: s.to_string(),
                expected: "a data type".to_string(),
            }),
        }
    }
}

/// A named, typed column descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Field {
        Field {
            name: name.into(),
            data_type,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.data_type)
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        //! Parse a `name:type` column definition.

        let (name, datatype) = s.split_once(':').ok_or_else(|| Error::InvalidValue {
            value: s.to_string(),
            expected: "a field definition like name:type".to_string(),
        })?;

        if name.trim().is_empty() {
            return Err(Error::InvalidValue {
                value: s.to_string(),
                expected: "a non-empty field name".to_string(),
            });
        }

        Ok(Field::new(name.trim(), datatype.parse()?))
    }
}

pub(crate) fn compare_schemas(left: &[Field], right: &[Field]) -> Option<SchemaMismatch> {
    //! Compare two ordered field lists position by position.
    //!
    //! Returns the first place where the lists disagree. Field order is
    //! significant, the same fields in another order do not match.

    if left.len() != right.len() {
        return Some(SchemaMismatch::FieldCount {
            left: left.len(),
            right: right.len(),
        });
    }

    left.iter()
        .zip(right.iter())
        .enumerate()
        .find(|(_, (l, r))| l.name != r.name || l.data_type != r.data_type)
        .map(|(index, (l, r))| SchemaMismatch::Field {
            index,
            left: l.clone(),
            right: r.clone(),
        })
}
