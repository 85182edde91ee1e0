//! The on-disk shape of a [`Database`].
//!
//! The in-memory types are never serialized directly. Each of them has a
//! document counterpart here and the conversion both ways is spelled out, so
//! the file format only changes when [`FORMAT_VERSION`] does.
//!
//! ```text
//! { "version": 1,
//!   "tables": [ { "name", "fields": [ { "name", "type" } ],
//!                 "rows": [ { "values": { <field>: <value> } } ] } ] }
//! ```
//!
//! Plain values are written as their JSON counterparts. Dates and intervals
//! are wrapped as `{"date": ...}` and `{"interval": ...}` so they read back as
//! the same variant. JSON has no NaN or infinity, those floats are wrapped as
//! `{"float": "NaN"}`, `{"float": "inf"}` and `{"float": "-inf"}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as Json};

use super::database::Database;
use super::error::{Error, Result};
use super::row::Row;
use super::schema::{DataType, Field};
use super::table::Table;
use super::temporal::{DATE_TIME_FORMAT, parse_date_time};
use super::value::Value;

pub const FORMAT_VERSION: u32 = 1;

const DATE_TAG: &str = "date";
const INTERVAL_TAG: &str = "interval";
const FLOAT_TAG: &str = "float";

#[derive(Serialize, Deserialize)]
pub(crate) struct DatabaseDocument {
    #[serde(default = "unversioned")]
    version: u32,
    tables: Vec<TableDocument>,
}

#[derive(Serialize, Deserialize)]
struct TableDocument {
    name: String,
    fields: Vec<FieldDocument>,
    rows: Vec<RowDocument>,
}

#[derive(Serialize, Deserialize)]
struct FieldDocument {
    name: String,
    #[serde(rename = "type")]
    datatype: DataType,
}

#[derive(Serialize, Deserialize)]
struct RowDocument {
    values: IndexMap<String, Json>,
}

// Files written before the version key existed share the version 1 layout.
fn unversioned() -> u32 {
    1
}

impl DatabaseDocument {
    pub(crate) fn encode(database: &Database) -> DatabaseDocument {
        DatabaseDocument {
            version: FORMAT_VERSION,
            tables: database.tables().map(TableDocument::encode).collect(),
        }
    }

    pub(crate) fn decode(self) -> Result<Database> {
        if self.version != FORMAT_VERSION {
            return Err(Error::deserialization(format!(
                "unsupported format version {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }

        let mut database = Database::new();
        for document in self.tables {
            let table = document.decode()?;
            let name = table.name().to_string();
            database.add_table(table).map_err(|_| {
                Error::deserialization(format!("table '{}' appears more than once", name))
            })?;
        }

        Ok(database)
    }
}

impl TableDocument {
    fn encode(table: &Table) -> TableDocument {
        TableDocument {
            name: table.name().to_string(),
            fields: table
                .fields()
                .iter()
                .map(|field| FieldDocument {
                    name: field.name.clone(),
                    datatype: field.data_type,
                })
                .collect(),
            rows: table
                .rows()
                .iter()
                .map(|row| RowDocument {
                    values: row
                        .values()
                        .iter()
                        .map(|(name, value)| (name.clone(), encode_value(value)))
                        .collect(),
                })
                .collect(),
        }
    }

    fn decode(self) -> Result<Table> {
        let fields = self
            .fields
            .into_iter()
            .map(|field| Field::new(field.name, field.datatype))
            .collect();

        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.values
                    .into_iter()
                    .map(|(name, value)| decode_value(value).map(|value| (name, value)))
                    .collect::<Result<IndexMap<String, Value>>>()
                    .map(Row::from)
            })
            .collect::<Result<Vec<Row>>>()?;

        Ok(Table::from_parts(self.name, fields, rows))
    }
}

pub(crate) fn encode_value(value: &Value) -> Json {
    match value {
        Value::String(string) => Json::String(string.clone()),
        Value::Integer(integer) => Json::from(*integer),
        Value::Float(float) => Number::from_f64(*float)
            .map_or_else(|| tagged(FLOAT_TAG, float.to_string()), Json::Number),
        Value::Boolean(boolean) => Json::Bool(*boolean),
        Value::Date(date) => tagged(DATE_TAG, date.format(DATE_TIME_FORMAT).to_string()),
        Value::Interval(interval) => tagged(INTERVAL_TAG, interval.clone()),
        Value::Null => Json::Null,
    }
}

fn tagged(tag: &str, text: String) -> Json {
    let mut object = Map::new();
    object.insert(tag.to_string(), Json::String(text));
    Json::Object(object)
}

pub(crate) fn decode_value(json: Json) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(boolean) => Ok(Value::Boolean(boolean)),
        Json::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => Ok(Value::Integer(integer)),
            (None, Some(float)) => Ok(Value::Float(float)),
            (None, None) => Err(Error::deserialization(format!(
                "number {} is out of range",
                number
            ))),
        },
        Json::String(string) => Ok(Value::String(string)),
        Json::Object(object) if object.len() == 1 => {
            match object.into_iter().next() {
                Some((tag, Json::String(text))) if tag == DATE_TAG => parse_date_time(&text)
                    .map(Value::Date)
                    .ok_or_else(|| Error::deserialization(format!("invalid date '{}'", text))),
                Some((tag, Json::String(text))) if tag == INTERVAL_TAG => {
                    Ok(Value::Interval(text))
                }
                Some((tag, Json::String(text))) if tag == FLOAT_TAG => text
                    .parse::<f64>()
                    .ok()
                    .filter(|float| !float.is_finite())
                    .map(Value::Float)
                    .ok_or_else(|| Error::deserialization(format!("invalid float '{}'", text))),
                Some((tag, _)) => Err(Error::deserialization(format!(
                    "unknown value tag '{}'",
                    tag
                ))),
                None => Err(Error::deserialization("empty value object")),
            }
        }
        other => Err(Error::deserialization(format!(
            "unsupported value {}",
            other
        ))),
    }
}
