use std::fmt::Display;

use chrono::{NaiveDateTime, Timelike};

use super::error::{Error, Result};
use super::schema::DataType;
use super::temporal::parse_date_time;

/// A single cell of a [`super::Row`].
///
/// Insertion is not checked against the declared [`DataType`] of the
/// column, so any variant may end up under any field. The comparator deals
/// with the mismatch at comparison time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    /// Raw `"<start> - <end>"` text, parsed only when compared.
    Interval(String),
    Null,
}

impl Value {
    pub fn parse(text: &str, datatype: DataType) -> Result<Value> {
        //! Convert user supplied text into a value of the given type.
        //!
        //! `null` and `NIL` (any case) always give [`Value::Null`]. Interval
        //! text is stored as written and never rejected here.

        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("nil") {
            return Ok(Value::Null);
        }

        match datatype {
            DataType::String => Ok(Value::String(text.to_string())),
            DataType::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| Error::invalid_value(text, datatype)),
            DataType::Float => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| Error::invalid_value(text, datatype)),
            DataType::Boolean => match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Boolean(true)),
                "false" | "no" | "0" => Ok(Value::Boolean(false)),
                _ => Err(Error::invalid_value(text, datatype)),
            },
            DataType::Date => parse_date_time(trimmed)
                .map(Value::Date)
                .ok_or_else(|| Error::invalid_value(text, datatype)),
            DataType::DateInterval => Ok(Value::Interval(trimmed.to_string())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(string) => write!(f, "{}", string),
            Value::Integer(integer) => write!(f, "{}", integer),
            Value::Float(float) => write!(f, "{}", float),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::Date(date) => {
                if date.num_seconds_from_midnight() == 0 && date.nanosecond() == 0 {
                    write!(f, "{}", date.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            Value::Interval(interval) => write!(f, "{}", interval),
            Value::Null => write!(f, "NIL"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
