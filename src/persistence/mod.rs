//! Persistence as tables needs to have the following components
//! - Field (a column name and its datatype, order is important)
//! - Row (field names mapped to values, checked only when compared)
//! - Table (an ordered list of fields and the rows stored against them)
//! - Database (name-unique tables, saved to and loaded from a JSON file)
//!
//! On top of those sits the difference of two tables, which keeps the rows
//! of one table that have no equal row in the other.

//  All modules of this lib
mod comparer;
mod database;
mod document;
mod error;
mod row;
mod schema;
mod table;
mod temporal;
mod value;

//  External API
pub use comparer::RowEqualityComparer;
pub use database::Database;
pub use document::FORMAT_VERSION;
pub use error::{Error, Result, SchemaMismatch};
pub use row::Row;
pub use schema::{DataType, Field};
pub use table::Table;
pub use temporal::{DateInterval, INTERVAL_SEPARATOR, parse_date_time};
pub use value::Value;
